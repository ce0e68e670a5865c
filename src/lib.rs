//! SPDX-License-Identifier: MIT OR Apache-2.0
//!
//! # Windshield Wiper Controller
//!
//! Control logic for a two-winding wiper motor driven by an on/off button,
//! a two-position mode toggle and an 8-position interval switch.
//!
//! - **Timebase:** millisecond clock and the 1 Hz interval countdown (`timebase.rs`).
//! - **Button:** debounced power toggle (`button.rs`).
//! - **Switches:** mode and interval readers (`switches.rs`).
//! - **Motor:** mutually exclusive winding outputs (`motor.rs`).
//! - **Zero crossing:** stop decision at the motor's park position (`zero_cross.rs`).
//! - **FSM:** typed wiper mode state machine (`wiper_fsm.rs`) and its owner (`controller.rs`).
//!
//! Everything here is target independent. Board setup and the interrupt
//! handlers live in the firmware binary.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod button;
pub mod controller;
pub mod motor;
pub mod switches;
pub mod timebase;
pub mod wiper_fsm;
pub mod zero_cross;

#[cfg(test)]
mod testing;

pub use button::{PowerButton, PowerState, DEBOUNCE_WINDOW_MS};
pub use controller::WiperController;
pub use motor::{MotorDrive, WiperMotor};
pub use switches::{read_interval, read_wiper_mode, Seconds, WiperMode, INTERVAL_SECONDS};
pub use timebase::{Countdown, Millis, Timebase};

#[cfg(test)]
mod tests {
    //! End-to-end scenarios across button, timebase and controller.

    use super::*;
    use crate::testing::{FakePin, Journal};

    struct Rig {
        clock: Timebase,
        button: PowerButton,
        wiper: WiperController<FakePin, FakePin>,
        slow: FakePin,
        fast: FakePin,
    }

    impl Rig {
        fn new() -> Self {
            let journal = Journal::default();
            let slow = FakePin::new("slow", &journal);
            let fast = FakePin::new("fast", &journal);
            let wiper = WiperController::new(WiperMotor::new(slow.clone(), fast.clone()));
            Self {
                clock: Timebase::new(),
                button: PowerButton::new(),
                wiper,
                slow,
                fast,
            }
        }

        /// Advance the clock by `ms`, delivering the 1 Hz tick on every full second.
        fn advance(&mut self, ms: u32) {
            for _ in 0..ms {
                let second = critical_section::with(|cs| {
                    self.clock.tick(cs);
                    self.clock.now(cs).0 % 1000 == 0
                });
                if second {
                    self.wiper.second_tick();
                }
            }
        }

        fn press(&self) -> Option<PowerState> {
            critical_section::with(|cs| self.button.on_edge(cs, self.clock.now(cs)))
        }

        fn poll(&mut self, mode: WiperMode, interval: Seconds) {
            let power = critical_section::with(|cs| self.button.power(cs));
            self.wiper.poll(power, mode, interval);
        }

        fn zero_crossing(&mut self) {
            let power = critical_section::with(|cs| self.button.power(cs));
            self.wiper.zero_crossing(power);
        }

        fn windings(&self) -> (bool, bool) {
            (self.slow.is_set(), self.fast.is_set())
        }
    }

    #[test]
    fn interval_sweep_cycle() {
        let mut rig = Rig::new();
        let interval = switches::interval_from_levels([true, false, false, false, false, false, false, false]);
        assert_eq!(interval, 3);

        assert_eq!(rig.press(), Some(PowerState::On));
        rig.poll(WiperMode::Interval, interval);
        assert_eq!(rig.wiper.interval_remaining(), 3);
        assert_eq!(rig.windings(), (true, false));

        // Loop keeps polling during the sweep without restarting it.
        for _ in 0..10 {
            rig.advance(150);
            rig.poll(WiperMode::Interval, interval);
        }
        assert_eq!(rig.windings(), (true, false));

        // Sweep complete at 1500 ms.
        rig.zero_crossing();
        assert_eq!(rig.windings(), (false, false));
        assert_eq!(rig.wiper.motor().drive(), MotorDrive::Stopped);

        for _ in 0..14 {
            rig.advance(100);
            rig.poll(WiperMode::Interval, interval);
            assert_eq!(rig.windings(), (false, false));
        }
        assert_eq!(rig.wiper.interval_remaining(), 1);

        // t = 3000 ms: countdown hits zero, next sweep starts.
        rig.advance(100);
        assert_eq!(rig.wiper.interval_remaining(), 0);
        rig.poll(WiperMode::Interval, interval);
        assert_eq!(rig.wiper.interval_remaining(), 3);
        assert_eq!(rig.windings(), (true, false));
    }

    #[test]
    fn power_off_mid_sweep_parks_at_zero() {
        let mut rig = Rig::new();
        assert_eq!(rig.press(), Some(PowerState::On));
        rig.poll(WiperMode::Fast, 24);
        assert_eq!(rig.windings(), (false, true));

        rig.advance(400);
        assert_eq!(rig.press(), Some(PowerState::Off));

        // Loop still runs, but the controller is idle while off.
        rig.poll(WiperMode::Fast, 24);
        rig.advance(300);
        assert_eq!(rig.windings(), (false, true));

        rig.zero_crossing();
        assert_eq!(rig.windings(), (false, false));

        rig.poll(WiperMode::Fast, 24);
        assert_eq!(rig.windings(), (false, false));
    }

    #[test]
    fn bounce_does_not_toggle_power() {
        let mut rig = Rig::new();
        assert_eq!(rig.press(), Some(PowerState::On));
        for _ in 0..20 {
            rig.advance(5);
            assert_eq!(rig.press(), None);
        }
        rig.poll(WiperMode::Slow, 24);
        assert_eq!(rig.windings(), (true, false));
    }
}
