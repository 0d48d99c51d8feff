//! Divisor parameters and their validation.
//!
//! The oscillator frequency must be reproduced exactly by the divisor chain:
//!
//! ```text
//! oscillator_hz = clock_divider * timer_prescaler * ticks_per_interrupt * interrupts_per_pulse
//! ```
//!
//! Anything else means the pulse period is not exactly one second, so the
//! configuration is rejected before the timer interrupt is ever armed.
//! [`Params::validate`] is a `const fn`: the firmware evaluates it in a
//! `const` item and an invalid configuration fails the build.

/// Smallest accepted compare value. Below this the interrupt rate gets close
/// enough to the interrupt latency that ticks start slipping.
pub const MIN_TICKS_PER_INTERRUPT: u16 = 32;

/// Largest compare value an 8-bit counting register can hold.
pub const MAX_TICKS_PER_INTERRUPT: u16 = 255;

/// The fuse-level clock divider (CKDIV8).
///
/// Reprogramming it is a separate out-of-band step, so it is treated as fixed
/// at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockDivider {
    Div1,
    Div8,
}

impl ClockDivider {
    pub const fn divisor(self) -> u32 {
        match self {
            Self::Div1 => 1,
            Self::Div8 => 8,
        }
    }
}

/// A timer prescaler the hardware actually supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prescaler {
    Div1,
    Div8,
    Div64,
    Div256,
    Div1024,
}

impl Prescaler {
    /// Map a raw divisor to a supported prescaler.
    pub const fn from_divisor(divisor: u16) -> Option<Self> {
        match divisor {
            1 => Some(Self::Div1),
            8 => Some(Self::Div8),
            64 => Some(Self::Div64),
            256 => Some(Self::Div256),
            1024 => Some(Self::Div1024),
            _ => None,
        }
    }

    pub const fn divisor(self) -> u32 {
        match self {
            Self::Div1 => 1,
            Self::Div8 => 8,
            Self::Div64 => 64,
            Self::Div256 => 256,
            Self::Div1024 => 1024,
        }
    }
}

/// Reasons a parameter set is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `timer_prescaler` is not one of the hardware's supported divisors.
    UnsupportedPrescaler,
    /// `ticks_per_interrupt` does not fit
    /// [`MIN_TICKS_PER_INTERRUPT`]`..=`[`MAX_TICKS_PER_INTERRUPT`].
    TicksPerInterruptOutOfRange,
    /// `interrupts_per_pulse` is zero.
    IntervalCountOutOfRange,
    /// `duty_ticks` is zero or exceeds `interrupts_per_pulse`.
    DutyOutOfRange,
    /// The divisor product does not reconstruct `oscillator_hz` exactly.
    FrequencyMismatch,
}

/// Raw divisor parameters as chosen by the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    /// External oscillator frequency in Hz.
    pub oscillator_hz: u32,
    /// Fuse-level divider applied before the timer sees the clock.
    pub clock_divider: ClockDivider,
    /// Raw timer prescaler divisor, e.g. 8 or 64.
    pub timer_prescaler: u16,
    /// Hardware clock ticks between compare-match interrupts.
    pub ticks_per_interrupt: u16,
    /// Compare-match interrupts per output period.
    pub interrupts_per_pulse: u16,
    /// Interrupts for which the output stays asserted, within one period.
    pub duty_ticks: u16,
}

impl Params {
    /// Check every constraint and produce a [`PulseConfig`] fit to arm the
    /// engine with.
    pub const fn validate(self) -> Result<PulseConfig, ConfigError> {
        let prescaler = match Prescaler::from_divisor(self.timer_prescaler) {
            Some(prescaler) => prescaler,
            None => return Err(ConfigError::UnsupportedPrescaler),
        };

        if self.ticks_per_interrupt < MIN_TICKS_PER_INTERRUPT
            || self.ticks_per_interrupt > MAX_TICKS_PER_INTERRUPT
        {
            return Err(ConfigError::TicksPerInterruptOutOfRange);
        }

        if self.interrupts_per_pulse == 0 {
            return Err(ConfigError::IntervalCountOutOfRange);
        }

        if self.duty_ticks == 0 || self.duty_ticks > self.interrupts_per_pulse {
            return Err(ConfigError::DutyOutOfRange);
        }

        // 8 * 1024 * 255 * 65535 overflows u32, so compare in u64.
        let product = self.clock_divider.divisor() as u64
            * prescaler.divisor() as u64
            * self.ticks_per_interrupt as u64
            * self.interrupts_per_pulse as u64;

        if product != self.oscillator_hz as u64 {
            return Err(ConfigError::FrequencyMismatch);
        }

        Ok(PulseConfig {
            prescaler,
            ticks_per_interrupt: self.ticks_per_interrupt as u8,
            interrupts_per_pulse: self.interrupts_per_pulse,
            duty_ticks: self.duty_ticks,
        })
    }
}

/// A parameter set that passed validation. Immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseConfig {
    prescaler: Prescaler,
    ticks_per_interrupt: u8,
    interrupts_per_pulse: u16,
    duty_ticks: u16,
}

impl PulseConfig {
    pub const fn prescaler(&self) -> Prescaler {
        self.prescaler
    }

    /// Hardware clock ticks per compare-match interrupt. The compare register
    /// is programmed with this value minus one.
    pub const fn ticks_per_interrupt(&self) -> u8 {
        self.ticks_per_interrupt
    }

    pub const fn interrupts_per_pulse(&self) -> u16 {
        self.interrupts_per_pulse
    }

    pub const fn duty_ticks(&self) -> u16 {
        self.duty_ticks
    }
}
