//! Timebase
//!
//! A free-running millisecond clock advanced by the periodic tick interrupt,
//! and the seconds countdown used to space out interval sweeps.

use core::cell::Cell;
use critical_section::{CriticalSection, Mutex};

use crate::switches::{Seconds, MAX_INTERVAL_SECS};

/// Clock increment per millisecond tick interrupt.
pub const TICK_PERIOD_MS: u32 = 1;

/// Milliseconds since boot. Wraps at `u32::MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(all(feature = "defmt", not(test)), derive(defmt::Format))]
pub struct Millis(pub u32);

impl Millis {
    pub const fn new() -> Self {
        Millis(0)
    }

    #[inline]
    pub const fn wrapping_add(self, ms: u32) -> Self {
        Millis(self.0.wrapping_add(ms))
    }
}

impl core::ops::Sub for Millis {
    type Output = u32;

    /// Elapsed milliseconds from `other` to `self`, correct across a wrap.
    #[inline]
    fn sub(self, other: Self) -> u32 {
        self.0.wrapping_sub(other.0)
    }
}

/// The millisecond clock shared between the tick interrupt and everyone else.
pub struct Timebase {
    millis: Mutex<Cell<Millis>>,
}

impl Timebase {
    pub const fn new() -> Self {
        Self {
            millis: Mutex::new(Cell::new(Millis::new())),
        }
    }

    /// Millisecond tick handler. Must only be called from the tick interrupt.
    #[inline]
    pub fn tick(&self, cs: CriticalSection<'_>) {
        let millis = self.millis.borrow(cs);
        millis.set(millis.get().wrapping_add(TICK_PERIOD_MS));
    }

    #[inline]
    pub fn now(&self, cs: CriticalSection<'_>) -> Millis {
        self.millis.borrow(cs).get()
    }
}

impl Default for Timebase {
    fn default() -> Self {
        Self::new()
    }
}

/// Seconds left until the next interval sweep may start.
///
/// Only [`Countdown::tick`] makes it smaller, and it never goes below zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Countdown(Seconds);

impl Countdown {
    pub const fn new() -> Self {
        Countdown(0)
    }

    /// 1 Hz tick handler.
    #[inline]
    pub fn tick(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    #[inline]
    pub fn is_elapsed(&self) -> bool {
        self.0 == 0
    }

    /// Start a new wait. Ignored unless the previous one has fully elapsed.
    pub fn reload(&mut self, secs: Seconds) -> bool {
        if !self.is_elapsed() {
            return false;
        }
        self.0 = secs.min(MAX_INTERVAL_SECS);
        true
    }

    #[inline]
    pub fn remaining(&self) -> Seconds {
        self.0
    }
}
