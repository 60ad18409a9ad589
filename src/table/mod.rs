//! Brightness automaton
//!
//! States live in a fixed, immutable table and reference each other by
//! index. Every channel walks the same table, so it is shared read-only.
//! Each state carries a brightness and an ordered list of weighted edges;
//! the next state is picked with a roulette-wheel draw over the edge weights.

mod flicker;

pub use flicker::{
    DOWN0, DOWN1, DOWN2, DOWN3, DOWN4, DOWN5, DOWN6, FLICKER, OFF, ON, UP0, UP1, UP2, UP3,
    UP4, UP5, UP6,
};

use heapless::Vec;

/// Total weight every draw is taken from (draws are in `0..DRAW_RANGE`).
pub const DRAW_RANGE: u8 = 100;

/// Largest number of states a table can hold (indices are `u8`).
pub const MAX_STATES: usize = 256;

/// Index of a state inside a [`TransitionTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u8);

impl StateId {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Weighted edge to another state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Successor {
    /// Relative likelihood on the 0-100 scale
    pub weight: u8,
    /// Target state
    pub target: StateId,
}

impl Successor {
    pub const fn new(weight: u8, target: StateId) -> Self {
        Self { weight, target }
    }
}

/// Automaton node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    /// Human readable name, used in logs
    pub name: &'static str,
    /// Output brightness while the channel sits in this state
    pub brightness: u8,
    /// Outgoing edges, evaluated in declaration order
    pub successors: &'static [Successor],
}

impl State {
    pub const fn new(
        name: &'static str,
        brightness: u8,
        successors: &'static [Successor],
    ) -> Self {
        Self {
            name,
            brightness,
            successors,
        }
    }

    /// Sum of all outgoing edge weights
    pub fn total_weight(&self) -> u16 {
        self.successors
            .iter()
            .map(|successor| u16::from(successor.weight))
            .sum()
    }
}

/// Reasons a table is rejected at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// The table has no states at all
    Empty,
    /// More states than a `StateId` can address
    TooManyStates,
    /// The start state is not part of the table
    StartOutOfRange,
    /// An edge points past the end of the table
    DanglingSuccessor { state: StateId, edge: usize },
    /// Edge weights of a state add up to more than [`DRAW_RANGE`]
    Overweight { state: StateId, total: u16 },
}

/// Shared, immutable Markov automaton
#[derive(Debug, Clone, Copy)]
pub struct TransitionTable {
    states: &'static [State],
    start: StateId,
}

impl TransitionTable {
    /// Create a table from a static state list.
    ///
    /// # Panics
    ///
    /// Panics if [`TransitionTable::validate`] rejects the table. Used in a
    /// `static` or `const` initializer this turns into a build error.
    pub const fn new(states: &'static [State], start: StateId) -> Self {
        match Self::try_new(states, start) {
            Ok(table) => table,
            Err(TableError::Empty) => panic!("transition table has no states"),
            Err(TableError::TooManyStates) => panic!("transition table has too many states"),
            Err(TableError::StartOutOfRange) => panic!("start state is not in the table"),
            Err(TableError::DanglingSuccessor { .. }) => {
                panic!("successor points outside the transition table")
            }
            Err(TableError::Overweight { .. }) => {
                panic!("successor weights of a state exceed 100")
            }
        }
    }

    /// Create a table, reporting why it is invalid instead of panicking.
    pub const fn try_new(states: &'static [State], start: StateId) -> Result<Self, TableError> {
        let table = Self { states, start };
        match table.validate() {
            Ok(()) => Ok(table),
            Err(err) => Err(err),
        }
    }

    /// Check that every edge points into the table and no state is overweight.
    ///
    /// Weights that add up to less than [`DRAW_RANGE`] are accepted: draws
    /// past the total leave the channel where it is.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn validate(&self) -> Result<(), TableError> {
        let count = self.states.len();
        if count == 0 {
            return Err(TableError::Empty);
        }
        if count > MAX_STATES {
            return Err(TableError::TooManyStates);
        }
        if self.start.index() >= count {
            return Err(TableError::StartOutOfRange);
        }

        let mut i = 0;
        while i < count {
            let successors = self.states[i].successors;
            let mut total: u16 = 0;
            let mut edge = 0;
            while edge < successors.len() {
                let successor = successors[edge];
                if successor.target.index() >= count {
                    return Err(TableError::DanglingSuccessor {
                        state: StateId::new(i as u8),
                        edge,
                    });
                }
                total += successor.weight as u16;
                edge += 1;
            }
            if total > DRAW_RANGE as u16 {
                return Err(TableError::Overweight {
                    state: StateId::new(i as u8),
                    total,
                });
            }
            i += 1;
        }
        Ok(())
    }

    /// State every channel starts in
    pub const fn start(&self) -> StateId {
        self.start
    }

    /// Number of states
    pub const fn len(&self) -> usize {
        self.states.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// All states in index order
    pub const fn states(&self) -> &'static [State] {
        self.states
    }

    /// Look up a state, `None` if `id` is not part of this table.
    pub fn state(&self, id: StateId) -> Option<&'static State> {
        let states = self.states;
        states.get(id.index())
    }

    /// Brightness of a state. Ids outside the table read as dark.
    pub fn brightness(&self, id: StateId) -> u8 {
        self.state(id).map_or(0, |state| state.brightness)
    }

    /// Pick the successor of `state` for a draw in `0..DRAW_RANGE`.
    ///
    /// Walks the edges in order keeping a running weight sum and returns the
    /// first edge whose sum reaches `draw`. Returns `None` when no prefix
    /// sum reaches it (weights below 100): the caller stays put. An id
    /// outside the table has no edges and stalls the same way.
    pub fn select_next(&self, state: StateId, draw: u8) -> Option<StateId> {
        let mut sum: u16 = 0;
        for successor in self.state(state)?.successors {
            sum += u16::from(successor.weight);
            if sum >= u16::from(draw) {
                return Some(successor.target);
            }
        }
        None
    }

    /// States whose edge weights do not reach [`DRAW_RANGE`].
    ///
    /// Channels in these states stall for high draws. Only the first `CAP`
    /// matches are returned.
    #[allow(clippy::cast_possible_truncation)]
    pub fn underweight_states<const CAP: usize>(&self) -> Vec<StateId, CAP> {
        let mut found = Vec::new();
        for (index, state) in self.states.iter().enumerate() {
            if state.total_weight() < u16::from(DRAW_RANGE) {
                let _ = found.push(StateId::new(index as u8));
            }
        }
        found
    }
}
