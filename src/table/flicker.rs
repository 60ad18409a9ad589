//! Flicker automaton
//!
//! A circular chain `OFF -> UP0..UP6 -> ON -> DOWN0..DOWN6 -> OFF`.
//! Every ramp state mostly keeps its direction (90) and sometimes jumps to
//! the mirrored step of the opposite ramp (10), which gives a biased random
//! walk: smooth fades with the occasional reversal. `ON` holds or starts
//! decaying with even odds.
//!
//! Ramp levels double each step to roughly follow the eye's response.

use super::{State, StateId, Successor, TransitionTable};

pub const OFF: StateId = StateId(0);
pub const UP0: StateId = StateId(1);
pub const UP1: StateId = StateId(2);
pub const UP2: StateId = StateId(3);
pub const UP3: StateId = StateId(4);
pub const UP4: StateId = StateId(5);
pub const UP5: StateId = StateId(6);
pub const UP6: StateId = StateId(7);
pub const ON: StateId = StateId(8);
pub const DOWN0: StateId = StateId(9);
pub const DOWN1: StateId = StateId(10);
pub const DOWN2: StateId = StateId(11);
pub const DOWN3: StateId = StateId(12);
pub const DOWN4: StateId = StateId(13);
pub const DOWN5: StateId = StateId(14);
pub const DOWN6: StateId = StateId(15);

const KEEP: u8 = 90;
const REVERSE: u8 = 10;
const SPLIT: u8 = 50;

const STATES: [State; 16] = [
    State {
        name: "OFF",
        brightness: 0,
        successors: &[
            Successor { weight: KEEP, target: OFF },
            Successor { weight: REVERSE, target: UP0 },
        ],
    },
    State {
        name: "UP0",
        brightness: 1,
        successors: &[
            Successor { weight: KEEP, target: UP1 },
            Successor { weight: REVERSE, target: DOWN6 },
        ],
    },
    State {
        name: "UP1",
        brightness: 4,
        successors: &[
            Successor { weight: KEEP, target: UP2 },
            Successor { weight: REVERSE, target: DOWN5 },
        ],
    },
    State {
        name: "UP2",
        brightness: 8,
        successors: &[
            Successor { weight: KEEP, target: UP3 },
            Successor { weight: REVERSE, target: DOWN4 },
        ],
    },
    State {
        name: "UP3",
        brightness: 16,
        successors: &[
            Successor { weight: KEEP, target: UP4 },
            Successor { weight: REVERSE, target: DOWN3 },
        ],
    },
    State {
        name: "UP4",
        brightness: 32,
        successors: &[
            Successor { weight: KEEP, target: UP5 },
            Successor { weight: REVERSE, target: DOWN2 },
        ],
    },
    State {
        name: "UP5",
        brightness: 64,
        successors: &[
            Successor { weight: KEEP, target: UP6 },
            Successor { weight: REVERSE, target: DOWN1 },
        ],
    },
    State {
        name: "UP6",
        brightness: 128,
        successors: &[
            Successor { weight: KEEP, target: ON },
            Successor { weight: REVERSE, target: DOWN0 },
        ],
    },
    State {
        name: "ON",
        brightness: 255,
        successors: &[
            Successor { weight: SPLIT, target: ON },
            Successor { weight: SPLIT, target: DOWN0 },
        ],
    },
    State {
        name: "DOWN0",
        brightness: 128,
        successors: &[
            Successor { weight: KEEP, target: DOWN1 },
            Successor { weight: REVERSE, target: UP6 },
        ],
    },
    State {
        name: "DOWN1",
        brightness: 64,
        successors: &[
            Successor { weight: KEEP, target: DOWN2 },
            Successor { weight: REVERSE, target: UP5 },
        ],
    },
    State {
        name: "DOWN2",
        brightness: 32,
        successors: &[
            Successor { weight: KEEP, target: DOWN3 },
            Successor { weight: REVERSE, target: UP4 },
        ],
    },
    State {
        name: "DOWN3",
        brightness: 16,
        successors: &[
            Successor { weight: KEEP, target: DOWN4 },
            Successor { weight: REVERSE, target: UP3 },
        ],
    },
    State {
        name: "DOWN4",
        brightness: 8,
        successors: &[
            Successor { weight: KEEP, target: DOWN5 },
            Successor { weight: REVERSE, target: UP2 },
        ],
    },
    State {
        name: "DOWN5",
        brightness: 4,
        successors: &[
            Successor { weight: KEEP, target: DOWN6 },
            Successor { weight: REVERSE, target: UP1 },
        ],
    },
    State {
        name: "DOWN6",
        brightness: 1,
        successors: &[
            Successor { weight: KEEP, target: OFF },
            Successor { weight: REVERSE, target: UP0 },
        ],
    },
];

/// The flicker automaton, starting dark
pub static FLICKER: TransitionTable = TransitionTable::new(&STATES, OFF);
