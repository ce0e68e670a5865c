//! Switch Readers
//!
//! Stateless mapping from the mode toggle and the 8-position interval switch
//! to a [`WiperMode`] and an interval length. All switch inputs are
//! active-low (closed contact pulls the pin to ground).

use embedded_hal::digital::InputPin;

/// Interval lengths in whole seconds.
pub type Seconds = u8;

/// Pause between sweeps for interval switch positions 1 to 8.
pub const INTERVAL_SECONDS: [Seconds; 8] = [3, 6, 9, 12, 15, 18, 21, 24];

/// Longest interval, also used when no position reads as selected.
pub const MAX_INTERVAL_SECS: Seconds = INTERVAL_SECONDS[INTERVAL_SECONDS.len() - 1];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(all(feature = "defmt", not(test)), derive(defmt::Format))]
pub enum WiperMode {
    /// Single slow sweeps separated by the selected pause.
    Interval,
    /// Continuous slow sweeping.
    #[default]
    Slow,
    /// Continuous fast sweeping.
    Fast,
}

/// Sample a switch contact. A read error counts as "not asserted".
#[inline]
fn asserted<P: InputPin>(pin: &mut P) -> bool {
    pin.is_low().unwrap_or(false)
}

/// Mode toggle precedence: position 1 selects interval, position 2 selects fast.
pub fn wiper_mode_from_levels(toggle_1: bool, toggle_2: bool) -> WiperMode {
    if toggle_1 {
        WiperMode::Interval
    } else if toggle_2 {
        WiperMode::Fast
    } else {
        WiperMode::Slow
    }
}

/// Scan the positions from 8 down to 1; the first asserted one wins.
pub fn interval_from_levels(positions: [bool; 8]) -> Seconds {
    positions
        .iter()
        .zip(INTERVAL_SECONDS.iter())
        .rev()
        .find(|(asserted, _)| **asserted)
        .map(|(_, secs)| *secs)
        .unwrap_or(MAX_INTERVAL_SECS)
}

/// Read the two mode toggle contacts.
pub fn read_wiper_mode<A: InputPin, B: InputPin>(toggle_1: &mut A, toggle_2: &mut B) -> WiperMode {
    wiper_mode_from_levels(asserted(toggle_1), asserted(toggle_2))
}

/// Read the interval switch. `positions[0]` is position 1.
pub fn read_interval<P: InputPin>(positions: &mut [P; 8]) -> Seconds {
    let mut levels = [false; 8];
    for (level, pin) in levels.iter_mut().zip(positions.iter_mut()) {
        *level = asserted(pin);
    }
    interval_from_levels(levels)
}
