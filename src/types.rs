//! This module defines the value types shared by the simulator: tape symbols, actions,
//! instructions, states, and the error type returned by table lookups.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The state every machine starts in. State numbering is 1-based.
pub const INITIAL_STATE: usize = 1;
/// The default step budget used by bounded runs and the command line.
pub const DEFAULT_MAX_STEPS: usize = 10000;

/// A single tape cell. Cells that were never written read as `Zero`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bit {
    /// An erased cell.
    #[default]
    Zero,
    /// A printed cell.
    One,
}

impl Bit {
    /// Returns `true` for a printed cell.
    pub fn is_one(self) -> bool {
        self == Bit::One
    }

    /// The character used when rendering this cell.
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }

    /// Parses a `'0'` or `'1'` character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> Self {
        bit.is_one()
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The action performed by a single step of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
    /// Write a `One` under the head.
    Print,
    /// Write a `Zero` under the head.
    Erase,
    /// Stop the machine.
    Halt,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Left => "L",
            Action::Right => "R",
            Action::Print => "P",
            Action::Erase => "E",
            Action::Halt => "H",
        };
        f.write_str(name)
    }
}

/// An action paired with the state the machine moves to afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    /// What the machine does on this step.
    pub action: Action,
    /// The 1-based state entered after the action. Consumed even by `Halt`.
    pub next_state: usize,
}

impl Instruction {
    pub fn new(action: Action, next_state: usize) -> Self {
        Self { action, next_state }
    }
}

impl From<(Action, usize)> for Instruction {
    fn from((action, next_state): (Action, usize)) -> Self {
        Self::new(action, next_state)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.action, self.next_state)
    }
}

/// A row of the transition table: one instruction per readable symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Instruction used when the head reads `Zero`.
    pub on_zero: Instruction,
    /// Instruction used when the head reads `One`.
    pub on_one: Instruction,
}

impl State {
    /// Creates a state from explicit instructions. Accepts anything convertible into
    /// an `Instruction`, so `(Action, usize)` tuples work too.
    pub fn new(on_zero: impl Into<Instruction>, on_one: impl Into<Instruction>) -> Self {
        Self {
            on_zero: on_zero.into(),
            on_one: on_one.into(),
        }
    }

    /// A state that halts on both symbols and loops back to itself.
    pub fn halting(self_index: usize) -> Self {
        let halt = Instruction::new(Action::Halt, self_index);
        Self {
            on_zero: halt,
            on_one: halt,
        }
    }

    /// Selects the instruction for the symbol under the head.
    pub fn instruction(&self, bit: Bit) -> Instruction {
        match bit {
            Bit::Zero => self.on_zero,
            Bit::One => self.on_one,
        }
    }

    /// Both instructions of this state, zero first.
    pub fn instructions(&self) -> [(Bit, Instruction); 2] {
        [(Bit::Zero, self.on_zero), (Bit::One, self.on_one)]
    }
}

/// Represents the errors the simulator can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TuringMachineError {
    /// A transition led to a state index outside `1..=size`.
    #[error("Invalid state: {state} (table has {size} states)")]
    InvalidState { state: usize, size: usize },
    /// No built-in program carries the requested name.
    #[error("Unknown program: {0}")]
    UnknownProgram(String),
    /// A static check of a transition table failed.
    #[error("Table validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serialization() {
        let left_json = serde_json::to_string(&Action::Left).unwrap();
        assert_eq!(left_json, "\"Left\"");

        let halt: Action = serde_json::from_str("\"Halt\"").unwrap();
        assert_eq!(halt, Action::Halt);
    }

    #[test]
    fn test_instruction_from_tuple() {
        let instruction: Instruction = (Action::Right, 3).into();

        assert_eq!(instruction.action, Action::Right);
        assert_eq!(instruction.next_state, 3);
        assert_eq!(instruction.to_string(), "R -> 3");
    }

    #[test]
    fn test_halting_state_loops_to_itself() {
        let state = State::halting(4);

        for bit in [Bit::Zero, Bit::One] {
            assert_eq!(state.instruction(bit), Instruction::new(Action::Halt, 4));
        }
    }

    #[test]
    fn test_state_selects_by_symbol() {
        let state = State::new((Action::Print, 2), (Action::Right, 1));

        assert_eq!(state.instruction(Bit::Zero).action, Action::Print);
        assert_eq!(state.instruction(Bit::One).action, Action::Right);
    }

    #[test]
    fn test_bit_conversions() {
        assert_eq!(Bit::from(true), Bit::One);
        assert_eq!(Bit::from(false), Bit::Zero);
        assert!(bool::from(Bit::One));
        assert_eq!(Bit::from_char('1'), Some(Bit::One));
        assert_eq!(Bit::from_char('x'), None);
        assert_eq!(Bit::default(), Bit::Zero);
    }

    #[test]
    fn test_error_display() {
        let error = TuringMachineError::InvalidState { state: 2, size: 1 };

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Invalid state"));
        assert!(error_msg.contains('2'));
    }
}
