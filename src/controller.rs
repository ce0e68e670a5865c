//! Wiper Mode Controller
//!
//! Owns the mode state machine together with the motor it drives. Every
//! entry point dispatches into the FSM and then asserts the resulting
//! winding state, so a caller holding the controller inside one critical
//! section never exposes a half-made decision to an interrupt.

use embedded_hal::digital::OutputPin;

use crate::button::PowerState;
use crate::motor::WiperMotor;
use crate::switches::{Seconds, WiperMode};
use crate::wiper_fsm::{WiperContext, WiperEvent, WiperFsm};

pub struct WiperController<S, F> {
    fsm: WiperFsm,
    ctx: WiperContext,
    motor: WiperMotor<S, F>,
}

impl<S: OutputPin, F: OutputPin> WiperController<S, F> {
    pub fn new(mut motor: WiperMotor<S, F>) -> Self {
        let mut ctx = WiperContext::new();
        let mut fsm = WiperFsm::Slow;
        fsm.init(&mut ctx);
        motor.apply(ctx.drive);
        Self { fsm, ctx, motor }
    }

    fn dispatch(&mut self, event: WiperEvent) {
        self.fsm.dispatch(&mut self.ctx, &event);
        self.motor.apply(self.ctx.drive);
    }

    /// One main loop iteration. Does nothing while the device is off; the
    /// motor then runs on until the next zero crossing parks it.
    pub fn poll(&mut self, power: PowerState, mode: WiperMode, interval: Seconds) {
        if !power.is_on() {
            return;
        }
        self.dispatch(WiperEvent::Poll { mode, interval });
    }

    /// Zero position sensor edge.
    pub fn zero_crossing(&mut self, power: PowerState) {
        self.dispatch(WiperEvent::ZeroCrossing { power });
    }

    /// 1 Hz timer tick.
    #[inline]
    pub fn second_tick(&mut self) {
        self.ctx.countdown.tick();
    }

    #[inline]
    pub fn mode(&self) -> WiperMode {
        self.fsm.mode()
    }

    #[inline]
    pub fn interval_remaining(&self) -> Seconds {
        self.ctx.countdown.remaining()
    }

    #[inline]
    pub fn motor(&self) -> &WiperMotor<S, F> {
        &self.motor
    }
}
