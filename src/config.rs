//! Compile-time tunables.
//!
//! Nothing here changes at runtime. Boards pick their values by editing the
//! constants and rebuilding.

use embassy_time::Duration;

/// Number of driven outputs (1..=8)
pub const CHANNELS: usize = 4;

/// Length of one automaton step
pub const STEP_DURATION: Duration = Duration::from_millis(20);

/// How long the outputs stay active after a wake
pub const ACTIVE_DURATION: Duration = Duration::from_secs(10);

/// PWM carrier frequency in Hz (full 256-step periods per second)
pub const CARRIER_HZ: u32 = 30;

/// Resolution of one PWM period
pub const PWM_STEPS: u32 = 256;

/// CPU clock of the reference board
pub const CPU_HZ: u32 = 1_000_000;

/// Cycles the carrier tick handler needs in the worst case.
///
/// A compare interval shorter than this would let ticks pile up.
pub const MIN_CARRIER_CYCLES: u32 = 98;

/// Timing of the active window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleConfig {
    /// Wait between two automaton steps
    pub step: Duration,
    /// Nominal length of the active window
    pub active: Duration,
}

impl CycleConfig {
    pub const DEFAULT: Self = Self::new(STEP_DURATION, ACTIVE_DURATION);

    /// # Panics
    ///
    /// Panics if `step` is shorter than a millisecond.
    pub const fn new(step: Duration, active: Duration) -> Self {
        assert!(step.as_millis() > 0, "step duration must be at least 1 ms");
        Self { step, active }
    }

    /// Number of steps in one active window: `floor(active / step)` in ms.
    ///
    /// The window is a count of fixed waits, not a deadline: time spent
    /// stepping the channels stretches it.
    #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
    pub const fn steps_per_window(&self) -> u32 {
        let steps = self.active.as_millis() / self.step.as_millis();
        if steps > u32::MAX as u64 {
            u32::MAX
        } else {
            steps as u32
        }
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Carrier timer setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarrierTiming {
    /// CPU cycles between two carrier ticks (timer compare increment)
    pub interval_cycles: u32,
}

impl CarrierTiming {
    /// Compare interval for a CPU clock, without checking the budget.
    pub const fn for_cpu(cpu_hz: u32) -> Self {
        Self {
            interval_cycles: cpu_hz / (CARRIER_HZ * PWM_STEPS),
        }
    }

    /// Like [`CarrierTiming::for_cpu`], but `None` if the interval is shorter
    /// than [`MIN_CARRIER_CYCLES`].
    pub const fn checked(cpu_hz: u32) -> Option<Self> {
        let timing = Self::for_cpu(cpu_hz);
        if timing.interval_cycles < MIN_CARRIER_CYCLES {
            None
        } else {
            Some(timing)
        }
    }

    /// Wall-clock length of one carrier tick
    #[allow(clippy::cast_lossless)]
    pub const fn tick_period() -> Duration {
        Duration::from_micros(1_000_000 / (CARRIER_HZ * PWM_STEPS) as u64)
    }
}

/// Carrier timing of the reference board
pub const CARRIER: CarrierTiming = match CarrierTiming::checked(CPU_HZ) {
    Some(timing) => timing,
    None => panic!("CPU clock too slow for the carrier frequency"),
};

const _: () = assert!(CHANNELS >= 1 && CHANNELS <= crate::pwm::MAX_CHANNELS);
const _: () = assert!(CycleConfig::DEFAULT.steps_per_window() > 0);
