//! Wiper Mode State Machine
//!
//! One state per [`WiperMode`]. The main loop feeds a `Poll` event with the
//! freshly sampled switches on every iteration while the device is on; the
//! zero sensor interrupt feeds `ZeroCrossing`. Handlers only update the
//! context; the owner applies `ctx.drive` to the motor after each dispatch.

use typed_fsm::{state_machine, Transition};

use crate::button::PowerState;
use crate::motor::MotorDrive;
use crate::switches::{Seconds, WiperMode};
use crate::timebase::Countdown;
use crate::zero_cross;

// FSM Context
pub struct WiperContext {
    pub drive: MotorDrive,    // Winding to assert after this dispatch
    pub countdown: Countdown, // Seconds until the next interval sweep
}

impl WiperContext {
    pub const fn new() -> Self {
        Self {
            drive: MotorDrive::Stopped,
            countdown: Countdown::new(),
        }
    }

    /// Drive decision for one loop iteration in `mode`.
    fn run(&mut self, mode: WiperMode, interval: Seconds) {
        match mode {
            WiperMode::Interval => {
                // Interval sweeps are always slow. A running sweep is left
                // alone; the zero edge ends it.
                if self.countdown.reload(interval) {
                    info!("interval sweep, next in {=u8} s", self.countdown.remaining());
                    self.drive = MotorDrive::Slow;
                }
            }
            WiperMode::Slow => self.drive = MotorDrive::Slow,
            WiperMode::Fast => self.drive = MotorDrive::Fast,
        }
    }

    fn zero_crossing(&mut self, power: PowerState, mode: WiperMode) {
        if zero_cross::must_stop(power, mode) {
            if self.drive != MotorDrive::Stopped {
                info!("parked at zero");
            }
            self.drive = MotorDrive::Stopped;
        }
    }
}

impl Default for WiperContext {
    fn default() -> Self {
        Self::new()
    }
}

// FSM Events
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WiperEvent {
    /// Main loop iteration with the device on.
    Poll { mode: WiperMode, interval: Seconds },
    /// Motor reached its zero position.
    ZeroCrossing { power: PowerState },
}

// State Machine Definition
state_machine! {
    Name: WiperFsm,
    Context: WiperContext,
    Event: WiperEvent,
    States: {
        // State: continuous slow sweeping (boot default)
        Slow => {
            entry: |_ctx| {
                info!("mode: slow");
            }
            process: |ctx, evt| {
                match evt {
                    WiperEvent::Poll { mode, interval } => {
                        ctx.run(*mode, *interval);
                        match mode {
                            WiperMode::Slow => Transition::None,
                            WiperMode::Fast => Transition::To(WiperFsm::Fast),
                            WiperMode::Interval => Transition::To(WiperFsm::Interval),
                        }
                    }
                    WiperEvent::ZeroCrossing { power } => {
                        ctx.zero_crossing(*power, WiperMode::Slow);
                        Transition::None
                    }
                }
            }
        },

        // State: continuous fast sweeping
        Fast => {
            entry: |_ctx| {
                info!("mode: fast");
            }
            process: |ctx, evt| {
                match evt {
                    WiperEvent::Poll { mode, interval } => {
                        ctx.run(*mode, *interval);
                        match mode {
                            WiperMode::Fast => Transition::None,
                            WiperMode::Slow => Transition::To(WiperFsm::Slow),
                            WiperMode::Interval => Transition::To(WiperFsm::Interval),
                        }
                    }
                    WiperEvent::ZeroCrossing { power } => {
                        ctx.zero_crossing(*power, WiperMode::Fast);
                        Transition::None
                    }
                }
            }
        },

        // State: one slow sweep per interval, stopped at zero in between
        Interval => {
            entry: |_ctx| {
                info!("mode: interval");
            }
            process: |ctx, evt| {
                match evt {
                    WiperEvent::Poll { mode, interval } => {
                        ctx.run(*mode, *interval);
                        match mode {
                            WiperMode::Interval => Transition::None,
                            WiperMode::Slow => Transition::To(WiperFsm::Slow),
                            WiperMode::Fast => Transition::To(WiperFsm::Fast),
                        }
                    }
                    WiperEvent::ZeroCrossing { power } => {
                        ctx.zero_crossing(*power, WiperMode::Interval);
                        Transition::None
                    }
                }
            }
        }
    }
}

impl WiperFsm {
    /// The wiper mode this state stands for.
    pub fn mode(&self) -> WiperMode {
        match self {
            WiperFsm::Slow => WiperMode::Slow,
            WiperFsm::Fast => WiperMode::Fast,
            WiperFsm::Interval => WiperMode::Interval,
        }
    }
}
