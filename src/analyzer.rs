//! This module provides static checks for transition tables. Instances never run these
//! checks themselves: a bad reference only fails when it is reached. The analyzer lets
//! callers find such problems up front.

use crate::machine::TransitionTable;
use crate::types::{Action, Bit, TuringMachineError, INITIAL_STATE};
use std::collections::BTreeSet;

/// Represents the problems that can be found in a transition table.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The table has no states, so state 1 does not exist.
    EmptyTable,
    /// Instructions referencing states outside the table, as `state[symbol] -> next`.
    UndefinedNextStates(Vec<String>),
    /// States that cannot be reached from state 1.
    UnreachableStates(Vec<usize>),
    /// No `Halt` instruction can be reached from state 1, so the machine never halts.
    NoReachableHalt,
}

impl From<AnalysisError> for TuringMachineError {
    /// Converts an `AnalysisError` into a `TuringMachineError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::EmptyTable => {
                TuringMachineError::ValidationError("Table has no states".to_string())
            }
            AnalysisError::UndefinedNextStates(transitions) => TuringMachineError::ValidationError(
                format!("Transitions reference undefined states: {:?}", transitions),
            ),
            AnalysisError::UnreachableStates(states) => TuringMachineError::ValidationError(
                format!("Unreachable states detected: {:?}", states),
            ),
            AnalysisError::NoReachableHalt => TuringMachineError::ValidationError(
                "No halting instruction is reachable from the initial state".to_string(),
            ),
        }
    }
}

/// Analyzes a transition table and returns the first problem found.
///
/// # Returns
///
/// * `Ok(())` if no problems are found.
/// * `Err(TuringMachineError::ValidationError)` describing the first problem.
pub fn analyze(table: &TransitionTable) -> Result<(), TuringMachineError> {
    match findings(table).into_iter().next() {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

/// Runs every check and collects all problems, in check order.
pub fn findings(table: &TransitionTable) -> Vec<AnalysisError> {
    [
        check_structure,
        check_undefined_next_states,
        check_unreachable_states,
        check_halting,
    ]
    .iter()
    .filter_map(|f| f(table).err())
    .collect()
}

fn check_structure(table: &TransitionTable) -> Result<(), AnalysisError> {
    if table.is_empty() {
        return Err(AnalysisError::EmptyTable);
    }
    Ok(())
}

/// Checks that every `next_state` is within `1..=len()`. Halting instructions are
/// included: their next state is still entered when the machine stops.
fn check_undefined_next_states(table: &TransitionTable) -> Result<(), AnalysisError> {
    let undefined: Vec<String> = table
        .states()
        .flat_map(|(id, state)| {
            state
                .instructions()
                .into_iter()
                .map(move |(bit, instruction)| (id, bit, instruction))
        })
        .filter(|(_, _, instruction)| table.get(instruction.next_state).is_none())
        .map(|(id, bit, instruction)| format!("{}[{}] -> {}", id, bit, instruction.next_state))
        .collect();

    if !undefined.is_empty() {
        return Err(AnalysisError::UndefinedNextStates(undefined));
    }

    Ok(())
}

/// Collects the states reachable from the initial state by following non-halting
/// instructions.
fn reachable_states(table: &TransitionTable) -> BTreeSet<usize> {
    let mut reachable = BTreeSet::new();
    let mut pending = vec![INITIAL_STATE];

    while let Some(id) = pending.pop() {
        let Some(state) = table.get(id) else {
            continue;
        };
        if !reachable.insert(id) {
            continue;
        }
        for (_, instruction) in state.instructions() {
            if instruction.action != Action::Halt && !reachable.contains(&instruction.next_state)
            {
                pending.push(instruction.next_state);
            }
        }
    }

    reachable
}

fn check_unreachable_states(table: &TransitionTable) -> Result<(), AnalysisError> {
    let reachable = reachable_states(table);
    let unreachable: Vec<usize> = table
        .states()
        .map(|(id, _)| id)
        .filter(|id| !reachable.contains(id))
        .collect();

    if !unreachable.is_empty() {
        return Err(AnalysisError::UnreachableStates(unreachable));
    }

    Ok(())
}

fn check_halting(table: &TransitionTable) -> Result<(), AnalysisError> {
    let halts = reachable_states(table).into_iter().any(|id| {
        table.get(id).is_some_and(|state| {
            [Bit::Zero, Bit::One]
                .into_iter()
                .any(|bit| state.instruction(bit).action == Action::Halt)
        })
    });

    if !halts {
        return Err(AnalysisError::NoReachableHalt);
    }

    Ok(())
}
