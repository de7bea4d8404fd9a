//! Human-readable diagnostic lines.
//!
//! Each [`Diagnostic`] renders to exactly one line of the console stream. The
//! text is fixed so that any compatible firmware prints the same output.

use crate::types::OutputChannel;
use core::fmt::{self, Write};

/// Capacity large enough for the longest diagnostic line (UTF-8 bytes).
pub const LINE_CAPACITY: usize = 128;

/// A single event reported on the diagnostic stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Diagnostic {
    /// Start-up banner.
    Ready,

    /// All outputs lit at the start of a sequence.
    AllOn,

    /// One output switched off, `elapsed_ms` after the sequence started.
    Extinguished {
        channel: OutputChannel,
        elapsed_ms: i64,
    },

    /// Final output switched off; a new press will be accepted.
    Complete,

    /// Press rejected because a sequence is still running.
    Busy,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Ready => {
                write!(f, "Sistema pronto! Pressione o botão A para iniciar...")
            }
            Diagnostic::AllOn => write!(f, "[0 ms] Todos os LEDs acesos!"),
            Diagnostic::Extinguished { channel, elapsed_ms } => {
                write!(f, "[{} ms] LED {} apagado", elapsed_ms, channel.label())
            }
            Diagnostic::Complete => write!(
                f,
                "Todos os LEDs foram apagados. Você pode pressionar o botão novamente."
            ),
            Diagnostic::Busy => write!(
                f,
                "[Aviso] O botão foi pressionado, mas os LEDs ainda estão no processo de desligamento. Aguarde."
            ),
        }
    }
}

impl Diagnostic {
    /// Renders the line (without terminator) into an owned buffer.
    ///
    /// Useful when the line has to cross a queue, e.g. to a USB logger task.
    pub fn render(&self) -> heapless::String<LINE_CAPACITY> {
        let mut line = heapless::String::new();
        // Every line fits in LINE_CAPACITY.
        let _ = write!(line, "{}", self);
        line
    }
}

/// Receiver for diagnostic lines.
///
/// Implementations must not block for long: [`Diagnostic::Extinguished`] and
/// [`Diagnostic::Complete`] are emitted from the alarm context.
pub trait DiagnosticSink {
    /// Reports one event.
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl<F: FnMut(Diagnostic)> DiagnosticSink for F {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self(diagnostic)
    }
}

/// Discards every diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _diagnostic: Diagnostic) {}
}

/// Writes each diagnostic as a `\n`-terminated line to a [`core::fmt::Write`].
///
/// Write errors are logged and dropped; the console is best-effort.
#[derive(Debug)]
pub struct FmtSink<W: Write> {
    writer: W,
}

impl<W: Write> FmtSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticSink for FmtSink<W> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if writeln!(self.writer, "{}", diagnostic).is_err() {
            warn!("diagnostic line dropped: {}", diagnostic);
        }
    }
}
