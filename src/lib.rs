#![no_std]

pub mod channel;
pub mod config;
pub mod controller;
pub mod pwm;
pub mod random;
pub mod table;
pub mod wake;

pub use channel::{Channel, ChannelBank};
pub use config::{CarrierTiming, CycleConfig};
pub use controller::{ActivityCycleController, ActivityPhase};
pub use pwm::{MAX_CHANNELS, PwmEngine, channel_mask};
pub use random::{DEFAULT_SEED, RandomSource, SplitMix};
pub use table::{FLICKER, State, StateId, Successor, TableError, TransitionTable};
pub use wake::WakeSignal;

pub use embassy_time::Duration;

/// Digital output lines
///
/// Bit `i` of every written word drives line `i`.
pub trait OutputPort {
    /// Write all lines at once
    fn write(&mut self, bits: u8);
}

/// Hardware the activity cycle needs besides the output lines.
///
/// Implement this trait to support different hardware platforms.
pub trait Board: OutputPort {
    /// Switch the lines in `mask` to outputs
    fn configure_outputs(&mut self, mask: u8);

    /// Enter the low-power wait; return once any interrupt is pending.
    ///
    /// Called inside a critical section with interrupts masked, so the
    /// wake interrupt runs only after this returns.
    fn wait_for_interrupt(&mut self);

    /// Busy or cooperative wait between two automaton steps
    fn delay(&mut self, duration: Duration) {
        embassy_time::block_for(duration);
    }
}
