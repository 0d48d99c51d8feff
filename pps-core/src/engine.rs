//! The tick-counting state machine behind the PPS output.
//!
//! Two execution contexts touch an engine: the timer interrupt calls
//! [`PulseEngine::on_tick`] once per compare match, the idle loop calls
//! [`PulseEngine::poll`] as often as it gets around to it. The engine itself
//! is just state plus arithmetic; keeping the two calls from tearing the
//! 16-bit counter is the caller's job (the firmware wraps the engine in
//! `avr_device::interrupt::Mutex` and polls inside `interrupt::free`).

use crate::config::PulseConfig;

/// Progress through the current pulse period.
///
/// `tick_count` counts interrupts up from 0; reaching
/// `interrupts_per_pulse` wraps it back to 0 and produces the rising edge.
/// The falling edge is due once `duty_ticks` interrupts have elapsed since
/// the rising edge, i.e. the first time `poll` observes
/// `tick_count >= duty_ticks`.
pub struct PulseEngine {
    tick_count: u16,
    interrupts_per_pulse: u16,
    duty_ticks: u16,
    output_asserted: bool,
}

impl PulseEngine {
    /// Create an engine at the start of a period with the output deasserted.
    ///
    /// The first rising edge is reported after a full period of ticks, so the
    /// output stays low until the timer has demonstrably run for one second.
    pub const fn new(config: PulseConfig) -> Self {
        Self {
            tick_count: 0,
            interrupts_per_pulse: config.interrupts_per_pulse(),
            duty_ticks: config.duty_ticks(),
            output_asserted: false,
        }
    }

    /// Advance one tick. Returns `true` exactly at each period boundary; the
    /// caller must then drive the output pin high.
    ///
    /// Interrupt context; never blocks.
    pub fn on_tick(&mut self) -> bool {
        self.tick_count += 1;
        if self.tick_count == self.interrupts_per_pulse {
            self.tick_count = 0;
            self.output_asserted = true;
            true
        } else {
            false
        }
    }

    /// Check whether the falling edge is due. Returns `true` at most once per
    /// period; the caller must then drive the output pin low.
    ///
    /// `>=` rather than `==`, so a poll cadence slower than the tick rate
    /// delays the falling edge instead of losing it. With `duty_ticks` equal
    /// to the full period the threshold is never reached (`tick_count` wraps
    /// before touching it) and the output stays asserted throughout.
    pub fn poll(&mut self) -> bool {
        if self.output_asserted && self.tick_count >= self.duty_ticks {
            self.output_asserted = false;
            true
        } else {
            false
        }
    }

    /// Whether the engine currently holds the output asserted.
    pub fn output_asserted(&self) -> bool {
        self.output_asserted
    }
}
