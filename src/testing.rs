//! Fake GPIO lines for host tests.

use core::convert::Infallible;
use std::{cell::Cell, cell::RefCell, rc::Rc, vec::Vec};

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Ordered record of every output write across all pins sharing it.
#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<(&'static str, bool)>>>);

impl Journal {
    pub fn entries(&self) -> Vec<(&'static str, bool)> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// A GPIO line. Clones share the same level, so a test can keep a handle
/// after moving the pin into the code under test.
#[derive(Clone)]
pub struct FakePin {
    name: &'static str,
    level: Rc<Cell<bool>>,
    journal: Journal,
}

impl FakePin {
    pub fn new(name: &'static str, journal: &Journal) -> Self {
        Self {
            name,
            level: Rc::new(Cell::new(false)),
            journal: journal.clone(),
        }
    }

    /// Current output level.
    pub fn is_set(&self) -> bool {
        self.level.get()
    }

    /// Force the input level seen by the code under test.
    pub fn drive(&mut self, high: bool) {
        self.level.set(high);
    }
}

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.level.set(false);
        self.journal.0.borrow_mut().push((self.name, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.level.set(true);
        self.journal.0.borrow_mut().push((self.name, true));
        Ok(())
    }
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level.get())
    }
}
