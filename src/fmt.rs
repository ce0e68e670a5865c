//! Logging macros.
//!
//! With the `defmt` feature these forward to `defmt` (transported over RTT by
//! the firmware binary). Without it, and inside host unit tests, they expand
//! to nothing so the control logic links on any target.

#[cfg(all(feature = "defmt", not(test)))]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { ::defmt::info!($($arg)*) };
}

#[cfg(all(feature = "defmt", not(test)))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => { ::defmt::debug!($($arg)*) };
}

#[cfg(not(all(feature = "defmt", not(test))))]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {};
}

#[cfg(not(all(feature = "defmt", not(test))))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}
