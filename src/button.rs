//! Debounced Button Monitor
//!
//! The on/off button raises an interrupt on every press edge, contact bounce
//! included. An edge is accepted as a real press only once
//! [`DEBOUNCE_WINDOW_MS`] have passed since the previous accepted press;
//! each accepted press toggles the device power state.

use core::cell::Cell;
use critical_section::{CriticalSection, Mutex};

use crate::timebase::Millis;

/// Minimum time between two accepted presses.
pub const DEBOUNCE_WINDOW_MS: u32 = 250;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(all(feature = "defmt", not(test)), derive(defmt::Format))]
pub enum PowerState {
    #[default]
    Off,
    On,
}

impl PowerState {
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            PowerState::Off => PowerState::On,
            PowerState::On => PowerState::Off,
        }
    }

    #[inline]
    pub fn is_on(self) -> bool {
        self == PowerState::On
    }
}

pub struct PowerButton {
    power: Mutex<Cell<PowerState>>,
    /// Clock at the last accepted press. `None` until the first press.
    last_press: Mutex<Cell<Option<Millis>>>,
}

impl PowerButton {
    pub const fn new() -> Self {
        Self {
            power: Mutex::new(Cell::new(PowerState::Off)),
            last_press: Mutex::new(Cell::new(None)),
        }
    }

    #[inline]
    pub fn power(&self, cs: CriticalSection<'_>) -> PowerState {
        self.power.borrow(cs).get()
    }

    /// Button edge handler.
    ///
    /// Returns the new power state if the edge was accepted, `None` if it was
    /// discarded as bounce. The caller mirrors the returned state on the
    /// status indicator and then clears the pin's pending interrupt.
    pub fn on_edge(&self, cs: CriticalSection<'_>, now: Millis) -> Option<PowerState> {
        let last_press = self.last_press.borrow(cs);
        if let Some(prev) = last_press.get() {
            let elapsed = now - prev;
            if elapsed < DEBOUNCE_WINDOW_MS {
                debug!("button bounce ignored ({=u32} ms)", elapsed);
                return None;
            }
        }
        last_press.set(Some(now));

        let power = self.power.borrow(cs);
        let new_state = power.get().toggled();
        power.set(new_state);
        info!("power {}", new_state);
        Some(new_state)
    }
}

impl Default for PowerButton {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: &PowerButton, ms: u32) -> Option<PowerState> {
        critical_section::with(|cs| button.on_edge(cs, Millis(ms)))
    }

    fn power(button: &PowerButton) -> PowerState {
        critical_section::with(|cs| button.power(cs))
    }

    #[test]
    fn boots_off_and_first_press_is_accepted() {
        let button = PowerButton::new();
        assert_eq!(power(&button), PowerState::Off);
        assert_eq!(press(&button, 0), Some(PowerState::On));
        assert_eq!(power(&button), PowerState::On);
    }

    #[test]
    fn edges_inside_window_are_bounce() {
        let button = PowerButton::new();
        assert_eq!(press(&button, 1000), Some(PowerState::On));
        for t in [1000, 1001, 1010, 1100, 1249] {
            assert_eq!(press(&button, t), None);
        }
        assert_eq!(power(&button), PowerState::On);

        // Window counts from the accepted press, not from the bounce.
        assert_eq!(press(&button, 1250), Some(PowerState::Off));
        assert_eq!(power(&button), PowerState::Off);
    }

    #[test]
    fn toggles_back_and_forth() {
        let button = PowerButton::new();
        let mut expected = PowerState::Off;
        for i in 0..6 {
            expected = expected.toggled();
            assert_eq!(press(&button, i * 300), Some(expected));
        }
        assert_eq!(power(&button), PowerState::Off);
    }

    #[test]
    fn window_survives_clock_wrap() {
        let button = PowerButton::new();
        let accepted = u32::MAX - 100;
        assert_eq!(press(&button, accepted), Some(PowerState::On));

        // 101 ms and 149 ms later, across the wrap.
        assert_eq!(press(&button, 0), None);
        assert_eq!(press(&button, 48), None);

        // 250 ms later.
        assert_eq!(press(&button, 149), Some(PowerState::Off));
    }
}
