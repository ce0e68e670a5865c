//! Hardware Abstraction Module
//!
//! This module handles the low-level configuration of the RP2350 peripherals.
//! It encapsulates the setup of Clocks, PLLs, the alarm Timer and GPIOs,
//! exposing a `Hardware` struct to the main application.
//!
//! Pin map (all inputs active-low with internal pull-ups):
//!
//! | GPIO  | Function                         |
//! | ----- | -------------------------------- |
//! | 2     | On/off button (edge interrupt)   |
//! | 3     | Power status LED                 |
//! | 4     | Slow winding                     |
//! | 5     | Fast winding                     |
//! | 6     | Motor zero sensor (edge)         |
//! | 7     | Motor half-point sensor (edge)   |
//! | 8     | Mode toggle position 1 (interval)|
//! | 9     | Mode toggle position 2 (fast)    |
//! | 10-17 | Interval switch positions 1-8    |

use embedded_hal::digital::OutputPin;
use hal::fugit::MicrosDurationU32;
use hal::gpio::bank0::{Gpio2, Gpio3, Gpio4, Gpio5, Gpio6, Gpio7, Gpio8, Gpio9};
use hal::gpio::{DynPinId, FunctionSio, Interrupt, Pin, PullDown, PullUp, SioInput, SioOutput};
use hal::pac;
use hal::timer::{Alarm, Alarm0, Alarm1, CopyableTimer0};
use rp235x_hal as hal;

use wiper_control::WiperMotor;

/// External crystal frequency used by the Raspberry Pi Pico 2.
const XTAL_FREQ_HZ: u32 = 12_000_000u32;

/// Millisecond clock period. Must match `wiper_control::timebase::TICK_PERIOD_MS`.
pub const MILLIS_PERIOD: MicrosDurationU32 = MicrosDurationU32::millis(1);
/// Interval countdown period.
pub const SECOND_PERIOD: MicrosDurationU32 = MicrosDurationU32::secs(1);

type Output<I> = Pin<I, FunctionSio<SioOutput>, PullDown>;
type Input<I> = Pin<I, FunctionSio<SioInput>, PullUp>;

pub type StatusLed = Output<Gpio3>;
pub type SlowWinding = Output<Gpio4>;
pub type FastWinding = Output<Gpio5>;
pub type ButtonPin = Input<Gpio2>;
pub type ZeroSensor = Input<Gpio6>;
pub type HalfSensor = Input<Gpio7>;
pub type ToggleInterval = Input<Gpio8>;
pub type ToggleFast = Input<Gpio9>;
pub type PositionPin = Input<DynPinId>;

pub type Motor = WiperMotor<SlowWinding, FastWinding>;

/// Pins serviced from the GPIO bank interrupt.
pub struct EdgeInputs {
    pub button: ButtonPin,
    pub zero: ZeroSensor,
    pub half: HalfSensor,
    pub led: StatusLed,
}

/// Level-sensed selector switches, sampled by the main loop.
pub struct Switches {
    pub toggle_interval: ToggleInterval,
    pub toggle_fast: ToggleFast,
    pub positions: [PositionPin; 8],
}

/// The two periodic tick sources.
pub struct Alarms {
    pub millis: Alarm0<CopyableTimer0>,
    pub second: Alarm1<CopyableTimer0>,
}

pub struct Hardware {
    pub motor: Motor,
    pub edges: EdgeInputs,
    pub switches: Switches,
    pub alarms: Alarms,
}

/// Initializes the entire hardware stack.
///
/// This function:
/// 1.  Takes ownership of the raw PAC peripherals.
/// 2.  Configures the Watchdog and Clocks.
/// 3.  Configures GPIO pins: winding outputs released, LED off, inputs pulled up.
/// 4.  Enables falling-edge interrupts on the button and motor sensors.
/// 5.  Arms the 1 ms and 1 s alarms.
///
/// Interrupts are left masked in the NVIC; see [`unmask_interrupts`].
pub fn init() -> Hardware {
    // 1. Take ownership of raw peripherals
    let mut pac = pac::Peripherals::take().unwrap();
    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);

    // 2. Configure Clocks
    let clocks = hal::clocks::init_clocks_and_plls(
        XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .unwrap();

    // 3. Configure GPIOs
    let sio = hal::Sio::new(pac.SIO);
    let pins = hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let mut led = pins.gpio3.into_push_pull_output();
    let _ = led.set_low();
    let motor = WiperMotor::new(
        pins.gpio4.into_push_pull_output(),
        pins.gpio5.into_push_pull_output(),
    );

    let mut button = pins.gpio2.into_pull_up_input();
    let mut zero = pins.gpio6.into_pull_up_input();
    let mut half = pins.gpio7.into_pull_up_input();

    let switches = Switches {
        toggle_interval: pins.gpio8.into_pull_up_input(),
        toggle_fast: pins.gpio9.into_pull_up_input(),
        positions: [
            pins.gpio10.into_pull_up_input().into_dyn_pin(),
            pins.gpio11.into_pull_up_input().into_dyn_pin(),
            pins.gpio12.into_pull_up_input().into_dyn_pin(),
            pins.gpio13.into_pull_up_input().into_dyn_pin(),
            pins.gpio14.into_pull_up_input().into_dyn_pin(),
            pins.gpio15.into_pull_up_input().into_dyn_pin(),
            pins.gpio16.into_pull_up_input().into_dyn_pin(),
            pins.gpio17.into_pull_up_input().into_dyn_pin(),
        ],
    };

    // 4. Edge interrupts. Press and sensor edges pull the line low.
    enable_edge_interrupt(&mut button);
    enable_edge_interrupt(&mut zero);
    enable_edge_interrupt(&mut half);

    // 5. Configure Timer alarms
    let mut timer = hal::Timer::new_timer0(pac.TIMER0, &mut pac.RESETS, &clocks);
    let mut millis = timer.alarm_0().unwrap();
    let mut second = timer.alarm_1().unwrap();
    let _ = millis.schedule(MILLIS_PERIOD);
    millis.enable_interrupt();
    let _ = second.schedule(SECOND_PERIOD);
    second.enable_interrupt();

    Hardware {
        motor,
        edges: EdgeInputs {
            button,
            zero,
            half,
            led,
        },
        switches,
        alarms: Alarms { millis, second },
    }
}

fn enable_edge_interrupt<I: hal::gpio::PinId>(pin: &mut Input<I>) {
    pin.clear_interrupt(Interrupt::EdgeLow);
    pin.set_interrupt_enabled(Interrupt::EdgeLow, true);
}

/// Unmask the GPIO bank and alarm interrupts in the NVIC.
///
/// # Safety
///
/// All state touched by the interrupt handlers must have been published.
pub unsafe fn unmask_interrupts() {
    unsafe {
        cortex_m::peripheral::NVIC::unmask(pac::Interrupt::TIMER0_IRQ_0);
        cortex_m::peripheral::NVIC::unmask(pac::Interrupt::TIMER0_IRQ_1);
        cortex_m::peripheral::NVIC::unmask(pac::Interrupt::IO_IRQ_BANK0);
    }
}
