//! Motor Driver
//!
//! Two-winding wiper motor. At most one winding is ever asserted: each drive
//! operation releases the other winding before energizing its own.

use embedded_hal::digital::OutputPin;

/// Winding currently commanded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(all(feature = "defmt", not(test)), derive(defmt::Format))]
pub enum MotorDrive {
    #[default]
    Stopped,
    Slow,
    Fast,
}

pub struct WiperMotor<S, F> {
    slow: S,
    fast: F,
    drive: MotorDrive,
}

impl<S: OutputPin, F: OutputPin> WiperMotor<S, F> {
    /// Take the winding outputs. Both are released immediately.
    pub fn new(slow: S, fast: F) -> Self {
        let mut motor = Self {
            slow,
            fast,
            drive: MotorDrive::Stopped,
        };
        motor.stop();
        motor
    }

    pub fn drive_slow(&mut self) {
        let _ = self.fast.set_low();
        let _ = self.slow.set_high();
        self.drive = MotorDrive::Slow;
    }

    pub fn drive_fast(&mut self) {
        let _ = self.slow.set_low();
        let _ = self.fast.set_high();
        self.drive = MotorDrive::Fast;
    }

    pub fn stop(&mut self) {
        let _ = self.slow.set_low();
        let _ = self.fast.set_low();
        self.drive = MotorDrive::Stopped;
    }

    /// Assert the outputs for `drive`. Re-asserting the current drive is allowed.
    pub fn apply(&mut self, drive: MotorDrive) {
        match drive {
            MotorDrive::Stopped => self.stop(),
            MotorDrive::Slow => self.drive_slow(),
            MotorDrive::Fast => self.drive_fast(),
        }
    }

    #[inline]
    pub fn drive(&self) -> MotorDrive {
        self.drive
    }
}
