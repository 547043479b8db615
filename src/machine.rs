//! This module defines the `TransitionTable`, the immutable 1-indexed lookup table that
//! drives a machine. Tables are never validated on construction; a reference to a
//! missing state fails only when an instance actually looks it up.

use crate::types::{Bit, Instruction, State, TuringMachineError};
use serde::{Deserialize, Serialize};

/// An ordered list of states. The first element is state 1.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTable {
    states: Vec<State>,
}

impl TransitionTable {
    /// Creates a table from its states, in order.
    pub fn new(states: Vec<State>) -> Self {
        Self { states }
    }

    /// Returns the instruction for `state_id` reading `bit`.
    ///
    /// # Returns
    ///
    /// * `Ok(Instruction)` if `state_id` is within `1..=len()`.
    /// * `Err(TuringMachineError::InvalidState)` otherwise.
    pub fn lookup(&self, state_id: usize, bit: Bit) -> Result<Instruction, TuringMachineError> {
        self.get(state_id)
            .map(|state| state.instruction(bit))
            .ok_or(TuringMachineError::InvalidState {
                state: state_id,
                size: self.states.len(),
            })
    }

    /// Returns the state with the 1-based id `state_id`, if it exists.
    pub fn get(&self, state_id: usize) -> Option<&State> {
        state_id
            .checked_sub(1)
            .and_then(|index| self.states.get(index))
    }

    /// The number of states in the table.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterates over `(state_id, state)` pairs with 1-based ids.
    pub fn states(&self) -> impl Iterator<Item = (usize, &State)> {
        self.states.iter().enumerate().map(|(i, state)| (i + 1, state))
    }

    /// The number of instructions across all states.
    pub fn instruction_count(&self) -> usize {
        self.states.len() * 2
    }
}

impl FromIterator<State> for TransitionTable {
    fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Action;

    fn two_state_table() -> TransitionTable {
        TransitionTable::new(vec![
            State::new((Action::Print, 2), (Action::Halt, 1)),
            State::halting(2),
        ])
    }

    #[test]
    fn test_lookup_is_one_based() {
        let table = two_state_table();

        assert_eq!(
            table.lookup(1, Bit::Zero),
            Ok(Instruction::new(Action::Print, 2))
        );
        assert_eq!(
            table.lookup(2, Bit::One),
            Ok(Instruction::new(Action::Halt, 2))
        );
    }

    #[test]
    fn test_lookup_rejects_zero_and_overflow() {
        let table = two_state_table();

        assert_eq!(
            table.lookup(0, Bit::Zero),
            Err(TuringMachineError::InvalidState { state: 0, size: 2 })
        );
        assert_eq!(
            table.lookup(3, Bit::One),
            Err(TuringMachineError::InvalidState { state: 3, size: 2 })
        );
    }

    #[test]
    fn test_dangling_reference_is_accepted_on_construction() {
        let table = TransitionTable::new(vec![State::new((Action::Right, 7), (Action::Right, 7))]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(1, Bit::Zero).unwrap().next_state, 7);
    }

    #[test]
    fn test_states_iterate_with_ids() {
        let table: TransitionTable = (1..=3).map(State::halting).collect();

        let ids: Vec<usize> = table.states().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(table.instruction_count(), 6);
        assert!(TransitionTable::default().is_empty());
    }
}
