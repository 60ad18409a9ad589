//! Per-output automaton cursors.
//!
//! A [`Channel`] only remembers which state it is in. The table it walks is
//! shared, so a bank of channels is just an array of state indices plus a
//! reference to the table. Channels never influence each other: each one
//! takes its own draw on every step.

use crate::random::RandomSource;
use crate::table::{DRAW_RANGE, StateId, TransitionTable};

/// One output lane's position in the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    current: StateId,
}

impl Channel {
    /// Create a channel parked in `start`.
    pub const fn new(start: StateId) -> Self {
        Self { current: start }
    }

    /// Current state
    pub const fn current(&self) -> StateId {
        self.current
    }

    /// Take one step through `table`.
    ///
    /// Consumes exactly one byte from `rng`, reduced to `0..100`. If the
    /// table has no edge for the draw the channel keeps its state. Returns
    /// the brightness of the (possibly unchanged) current state.
    pub fn advance<R: RandomSource + ?Sized>(
        &mut self,
        table: &TransitionTable,
        rng: &mut R,
    ) -> u8 {
        let draw = rng.next_byte() % DRAW_RANGE;
        if let Some(next) = table.select_next(self.current, draw) {
            self.current = next;
        }
        table.brightness(self.current)
    }
}

/// Fixed set of channels walking one shared table.
///
/// Channels are set to the table's start state once, here, and are never
/// reset afterwards.
#[derive(Debug, Clone)]
pub struct ChannelBank<'a, const N: usize> {
    table: &'a TransitionTable,
    channels: [Channel; N],
}

impl<'a, const N: usize> ChannelBank<'a, N> {
    pub fn new(table: &'a TransitionTable) -> Self {
        Self {
            table,
            channels: [Channel::new(table.start()); N],
        }
    }

    /// Shared automaton
    pub const fn table(&self) -> &'a TransitionTable {
        self.table
    }

    pub const fn channels(&self) -> &[Channel; N] {
        &self.channels
    }

    /// Current state of every channel
    pub fn states(&self) -> [StateId; N] {
        self.channels.map(|channel| channel.current())
    }

    /// Current brightness of every channel, without stepping
    pub fn levels(&self) -> [u8; N] {
        self.channels
            .map(|channel| self.table.brightness(channel.current()))
    }

    /// Advance every channel once, in index order.
    ///
    /// Returns the resulting brightness per channel.
    pub fn step<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> [u8; N] {
        let mut levels = [0; N];
        for (level, channel) in levels.iter_mut().zip(self.channels.iter_mut()) {
            *level = channel.advance(self.table, rng);
        }
        levels
    }
}
