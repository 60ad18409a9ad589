//! Activity cycle sequencing.
//!
//! The controller sleeps until the wake latch fires, then runs a fixed
//! number of automaton steps with the PWM engine enabled, then shuts the
//! outputs off and goes back to sleep:
//!
//! ```text
//! Sleeping --wake--> Active --step budget exhausted--> Sleeping
//! ```
//!
//! The wake trigger stays masked for the whole active window, so motion
//! during a window neither extends nor restarts it.
//!
//! # Usage
//!
//! ```ignore
//! static PWM: PwmEngine<CHANNELS> = PwmEngine::new();
//! static WAKE: WakeSignal = WakeSignal::new();
//!
//! // carrier timer interrupt: PWM.on_carrier_tick(&mut port);
//! // wake interrupt:          WAKE.signal();
//!
//! let mut controller = ActivityCycleController::new(
//!     &FLICKER, SplitMix::default(), &PWM, &WAKE, CycleConfig::DEFAULT,
//! );
//! controller.run(&mut board);
//! ```

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::Board;
use crate::channel::ChannelBank;
use crate::config::CycleConfig;
use crate::pwm::{PwmEngine, channel_mask};
use crate::random::RandomSource;
use crate::table::TransitionTable;
use crate::wake::WakeSignal;

/// Phase of the activity cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityPhase {
    /// Outputs off, waiting for a wake
    #[default]
    Sleeping,
    /// Channels stepping, PWM running
    Active,
}

/// Top-level sequencer driving channels and the PWM engine.
pub struct ActivityCycleController<'a, R: RandomSource, const N: usize> {
    // Shared with interrupt handlers
    pwm: &'a PwmEngine<N>,
    wake: &'a WakeSignal,
    config: CycleConfig,

    // Internal state
    channels: ChannelBank<'a, N>,
    rng: R,
    phase: ActivityPhase,
}

impl<'a, R: RandomSource, const N: usize> ActivityCycleController<'a, R, N> {
    /// Create a sleeping controller with every channel at the table's start.
    pub fn new(
        table: &'a TransitionTable,
        rng: R,
        pwm: &'a PwmEngine<N>,
        wake: &'a WakeSignal,
        config: CycleConfig,
    ) -> Self {
        Self {
            pwm,
            wake,
            config,
            channels: ChannelBank::new(table),
            rng,
            phase: ActivityPhase::Sleeping,
        }
    }

    pub const fn phase(&self) -> ActivityPhase {
        self.phase
    }

    pub const fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub const fn channels(&self) -> &ChannelBank<'a, N> {
        &self.channels
    }

    pub const fn rng(&self) -> &R {
        &self.rng
    }

    /// Prepare the outputs: configure the used lines and drive them low.
    pub fn init<B: Board + ?Sized>(&mut self, board: &mut B) {
        board.configure_outputs(channel_mask::<N>());
        self.pwm.disable();
        board.write(0);
    }

    /// Arm the wake trigger and block until it fires.
    ///
    /// Any wake latched before this call is discarded.
    pub fn sleep_until_wake<B: Board + ?Sized>(&mut self, board: &mut B) {
        self.phase = ActivityPhase::Sleeping;

        #[cfg(feature = "esp32-log")]
        println!("flicker: sleeping");

        self.wake.arm();
        self.wake.wait(|| board.wait_for_interrupt());
    }

    /// Run one active window and shut the outputs off afterwards.
    ///
    /// Returns the number of steps taken.
    pub fn run_active_window<B: Board + ?Sized>(&mut self, board: &mut B) -> u32 {
        self.wake.disarm();
        self.phase = ActivityPhase::Active;
        self.pwm.enable();

        let steps = self.config.steps_per_window();

        #[cfg(feature = "esp32-log")]
        println!("flicker: awake, running {} steps", steps);

        for _ in 0..steps {
            let levels = self.channels.step(&mut self.rng);
            self.pwm.set_levels(&levels);
            board.delay(self.config.step);
        }

        self.pwm.disable();
        board.write(0);
        self.phase = ActivityPhase::Sleeping;

        #[cfg(feature = "esp32-log")]
        println!("flicker: window complete, outputs off");

        steps
    }

    /// Sleep until woken, then run one active window.
    pub fn run_cycle<B: Board + ?Sized>(&mut self, board: &mut B) -> u32 {
        self.sleep_until_wake(board);
        self.run_active_window(board)
    }

    /// Main loop: never returns.
    pub fn run<B: Board + ?Sized>(&mut self, board: &mut B) -> ! {
        self.init(board);
        loop {
            self.run_cycle(board);
        }
    }
}
