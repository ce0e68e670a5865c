//! SPDX-License-Identifier: MIT OR Apache-2.0
//!
//! # Windshield Wiper Controller Firmware
//!
//! Interrupt-driven wiper control:
//! - **Hardware Module:** HAL setup, pin map and tick alarms (`hardware.rs`).
//! - **Control Library:** button debounce, timebase, switch readers, motor
//!   driver and the typed wiper FSM (`wiper_control` crate).
//!
//! Interrupt handlers publish into the shared state below; the main loop
//! samples the switches and runs one controller step per iteration.
//!
//! Target: Raspberry Pi Pico 2 (RP2350).

#![no_std]
#![no_main]

// --- Imports ---
use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal::digital::OutputPin;
#[cfg(feature = "defmt")]
use {defmt_rtt as _, panic_probe as _};
#[cfg(not(feature = "defmt"))]
use panic_halt as _;

use wiper_control::{info, read_interval, read_wiper_mode, PowerButton, PowerState, Timebase, WiperController};

// --- Modules ---
mod hardware;
use hardware::{Alarms, EdgeInputs, FastWinding, SlowWinding, MILLIS_PERIOD, SECOND_PERIOD};

// --- HAL Selection ---
use rp235x_hal as hal;
use hal::entry;
use hal::gpio::Interrupt::EdgeLow;
use hal::timer::Alarm;

// Select appropriate interrupt macro based on chip architecture
use rp235x_hal::pac::interrupt;

// --- Bootloader Configuration ---

#[unsafe(link_section = ".start_block")]
#[used]
pub static IMAGE_DEF: hal::block::ImageDef = hal::block::ImageDef::secure_exe();

// --- Shared State ---

type Wiper = WiperController<SlowWinding, FastWinding>;

// Millisecond clock and power button state
static CLOCK: Timebase = Timebase::new();
static BUTTON: PowerButton = PowerButton::new();

// Wiper FSM with its motor, and the resources owned by the ISRs
static WIPER: Mutex<RefCell<Option<Wiper>>> = Mutex::new(RefCell::new(None));
static EDGE_INPUTS: Mutex<RefCell<Option<EdgeInputs>>> = Mutex::new(RefCell::new(None));
static ALARMS: Mutex<RefCell<Option<Alarms>>> = Mutex::new(RefCell::new(None));

/// Entry point.
#[entry]
fn main() -> ! {
    info!("Program start");

    // 1. Initialize Hardware Stack (Clocks, GPIO, Timer)
    let hw = hardware::init();
    let mut switches = hw.switches;

    // 2. Initialize Application State (FSM), motor parked
    let wiper = WiperController::new(hw.motor);

    // 3. Publish to Global State (for ISR access)
    critical_section::with(|cs| {
        WIPER.borrow_ref_mut(cs).replace(wiper);
        EDGE_INPUTS.borrow_ref_mut(cs).replace(hw.edges);
        ALARMS.borrow_ref_mut(cs).replace(hw.alarms);
    });

    // SAFETY: Everything the handlers touch has been published above.
    unsafe { hardware::unmask_interrupts() };

    // 4. Main Control Loop
    loop {
        let power = critical_section::with(|cs| BUTTON.power(cs));
        if power == PowerState::Off {
            // Idle until the next interrupt; a zero edge may still park the motor.
            cortex_m::asm::wfi();
            continue;
        }

        let mode = read_wiper_mode(&mut switches.toggle_interval, &mut switches.toggle_fast);
        let interval = read_interval(&mut switches.positions);

        // Decide and drive in one critical section, so a zero edge that
        // arrives meanwhile is handled after this step, never overwritten by it.
        critical_section::with(|cs| {
            let power = BUTTON.power(cs);
            if let Some(wiper) = WIPER.borrow_ref_mut(cs).as_mut() {
                wiper.poll(power, mode, interval);
            }
        });
    }
}

// --- Interrupt Handlers ---

/// Millisecond tick.
#[allow(non_snake_case)]
#[interrupt]
fn TIMER0_IRQ_0() {
    critical_section::with(|cs| {
        if let Some(alarms) = ALARMS.borrow_ref_mut(cs).as_mut() {
            alarms.millis.clear_interrupt();
            let _ = alarms.millis.schedule(MILLIS_PERIOD);
        }
        CLOCK.tick(cs);
    });
}

/// Interval countdown tick (1 Hz).
#[allow(non_snake_case)]
#[interrupt]
fn TIMER0_IRQ_1() {
    critical_section::with(|cs| {
        if let Some(alarms) = ALARMS.borrow_ref_mut(cs).as_mut() {
            alarms.second.clear_interrupt();
            let _ = alarms.second.schedule(SECOND_PERIOD);
        }
        if let Some(wiper) = WIPER.borrow_ref_mut(cs).as_mut() {
            wiper.second_tick();
        }
    });
}

/// Button press and motor position edges.
#[allow(non_snake_case)]
#[interrupt]
fn IO_IRQ_BANK0() {
    critical_section::with(|cs| {
        let mut inputs = EDGE_INPUTS.borrow_ref_mut(cs);
        let Some(inputs) = inputs.as_mut() else {
            return;
        };

        if inputs.button.interrupt_status(EdgeLow) {
            if let Some(power) = BUTTON.on_edge(cs, CLOCK.now(cs)) {
                let _ = match power {
                    PowerState::On => inputs.led.set_high(),
                    PowerState::Off => inputs.led.set_low(),
                };
            }
            inputs.button.clear_interrupt(EdgeLow);
        }

        if inputs.zero.interrupt_status(EdgeLow) {
            let power = BUTTON.power(cs);
            if let Some(wiper) = WIPER.borrow_ref_mut(cs).as_mut() {
                wiper.zero_crossing(power);
            }
            inputs.zero.clear_interrupt(EdgeLow);
        }

        if inputs.half.interrupt_status(EdgeLow) {
            // Half-point edge is reserved; acknowledge only.
            inputs.half.clear_interrupt(EdgeLow);
        }
    });
}

// --- Metadata ---

#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [hal::binary_info::EntryAddr; 4] = [
    hal::binary_info::rp_cargo_bin_name!(),
    hal::binary_info::rp_cargo_version!(),
    hal::binary_info::rp_program_description!(c"Windshield Wiper Controller"),
    hal::binary_info::rp_program_build_attribute!()
];
