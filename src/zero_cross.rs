//! Zero-Crossing Synchronizer
//!
//! The motor only stops at its mechanical zero (park) position. Turning the
//! device off mid-sweep leaves the motor running until the next zero edge,
//! and in interval mode each zero edge marks the end of the single sweep.
//! The sensor's half-point edge carries no decision and is only acknowledged
//! by the interrupt handler.

use crate::button::PowerState;
use crate::switches::WiperMode;

/// Whether the motor has to stop at this zero edge.
#[inline]
pub fn must_stop(power: PowerState, mode: WiperMode) -> bool {
    match (power, mode) {
        (PowerState::Off, _) => true,
        (PowerState::On, WiperMode::Interval) => true,
        (PowerState::On, WiperMode::Slow | WiperMode::Fast) => false,
    }
}
