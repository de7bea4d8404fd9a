#![no_std]
#![no_main]

use embedded_hal::delay::DelayNs;
use panic_halt as _;
use rp_pico::entry;
use rp_pico::hal::{
    Clock, Sio, Timer,
    clocks::init_clocks_and_plls,
    gpio::{FunctionSioOutput, Pin, PullDown, bank0},
    pac::{self, interrupt},
    watchdog::Watchdog,
};
use rtt_target::{rprintln, rtt_init_print};

use oneshot_sequencer::config::{POLL_INTERVAL_MS, SETTLE_MS};
use oneshot_sequencer::{
    BlockingDebouncer, ButtonLoop, PinOutputs, SequenceController, SharedController, service_alarm,
};

use rp_pico_demos::alarm::HalAlarm;
use rp_pico_demos::console::RttConsole;
use rp_pico_demos::time::{HardwareTimer, Instant};

/// Red on GPIO13, green on GPIO11, blue on GPIO12 (see `oneshot_sequencer::config`)
type Leds = PinOutputs<
    Pin<bank0::Gpio13, FunctionSioOutput, PullDown>,
    Pin<bank0::Gpio11, FunctionSioOutput, PullDown>,
    Pin<bank0::Gpio12, FunctionSioOutput, PullDown>,
>;

static CONTROLLER: SharedController<'static, Instant, Leds, HardwareTimer, RttConsole> =
    SharedController::new();

static ALARM: HalAlarm = HalAlarm::new();

#[entry]
fn main() -> ! {
    rtt_init_print!();

    // Get peripherals
    let mut pac = pac::Peripherals::take().unwrap();

    // Set up watchdog driver
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure clocks (125 MHz)
    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    rprintln!(
        "System clock configured: {} Hz",
        clocks.system_clock.freq().to_Hz()
    );

    // Set up the Single Cycle IO (for GPIO access)
    let sio = Sio::new(pac.SIO);

    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let leds = PinOutputs::new(
        pins.gpio13.into_push_pull_output(),
        pins.gpio11.into_push_pull_output(),
        pins.gpio12.into_push_pull_output(),
        false,
    );
    // Button to ground, internal pull-up
    let button = pins.gpio5.into_pull_up_input();

    let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let clock: &'static HardwareTimer =
        cortex_m::singleton!(: HardwareTimer = HardwareTimer::new(timer)).unwrap();

    ALARM.install(timer.alarm_0().unwrap());
    CONTROLLER.init(SequenceController::new(leds, clock, RttConsole));

    // SAFETY: the handler only touches state behind critical sections
    unsafe {
        pac::NVIC::unmask(pac::Interrupt::TIMER_IRQ_0);
    }

    let debouncer = BlockingDebouncer::new(button, timer, SETTLE_MS);
    let mut main_loop = ButtonLoop::new(debouncer, &ALARM, &CONTROLLER);
    main_loop.announce_ready();

    loop {
        main_loop.tick();
        timer.delay_ms(POLL_INTERVAL_MS);
    }
}

#[interrupt]
fn TIMER_IRQ_0() {
    ALARM.clear();
    service_alarm(&CONTROLLER, &ALARM);
}
