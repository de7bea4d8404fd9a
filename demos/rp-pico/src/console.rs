use oneshot_sequencer::{Diagnostic, DiagnosticSink};
use rtt_target::rprintln;

/// Prints diagnostics over RTT, one line each
pub struct RttConsole;

impl DiagnosticSink for RttConsole {
    fn emit(&mut self, diagnostic: Diagnostic) {
        rprintln!("{}", diagnostic);
    }
}
