//! This module provides a small library of built-in machines, shared as read-only tables.

use crate::instance::Instance;
use crate::machine::TransitionTable;
use crate::types::{Action, State, TuringMachineError};
use std::sync::Arc;

/// A named built-in machine.
#[derive(Debug, Clone)]
pub struct Program {
    pub name: &'static str,
    pub description: &'static str,
    /// The number of unary arguments the machine expects.
    pub arity: usize,
    pub table: Arc<TransitionTable>,
}

impl Program {
    /// Creates an instance of this program over the unary argument list `args`.
    pub fn instance(&self, args: &[usize]) -> Instance {
        Instance::from_unary_runs(Arc::clone(&self.table), args)
    }
}

/// Unary `n -> n + 1`. Walks right over the argument, prints one more cell, then
/// returns the head to the first cell of the result.
fn successor() -> TransitionTable {
    TransitionTable::new(vec![
        State::new((Action::Print, 2), (Action::Right, 1)),
        State::new((Action::Right, 3), (Action::Left, 2)),
        State::halting(3),
    ])
}

/// Unary `a, b -> a + b`. Fills the separator, erases the last cell of `b`, then
/// returns the head to the first cell of the result.
fn addition() -> TransitionTable {
    TransitionTable::new(vec![
        State::new((Action::Print, 2), (Action::Right, 1)),
        State::new((Action::Left, 3), (Action::Right, 2)),
        State::new((Action::Halt, 3), (Action::Erase, 4)),
        State::new((Action::Left, 5), (Action::Halt, 4)),
        State::new((Action::Right, 6), (Action::Left, 5)),
        State::halting(6),
    ])
}

/// Moves right forever.
fn runaway() -> TransitionTable {
    TransitionTable::new(vec![State::new((Action::Right, 1), (Action::Right, 1))])
}

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Program> = vec![
        Program {
            name: "successor",
            description: "Unary successor: n -> n + 1",
            arity: 1,
            table: Arc::new(successor()),
        },
        Program {
            name: "addition",
            description: "Unary addition: a, b -> a + b",
            arity: 2,
            table: Arc::new(addition()),
        },
        Program {
            name: "runaway",
            description: "Moves right forever and never halts",
            arity: 0,
            table: Arc::new(runaway()),
        },
    ];
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Program, TuringMachineError> {
        PROGRAMS.get(index).cloned().ok_or_else(|| {
            TuringMachineError::UnknownProgram(format!("program index {} out of range", index))
        })
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<Program, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name == name)
            .cloned()
            .ok_or_else(|| TuringMachineError::UnknownProgram(name.to_string()))
    }

    /// List all program names
    pub fn list_program_names() -> Vec<&'static str> {
        PROGRAMS.iter().map(|program| program.name).collect()
    }

    /// Search programs by name or description, case-insensitively
    pub fn search_programs(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();

        PROGRAMS
            .iter()
            .enumerate()
            .filter(|(_, program)| {
                program.name.to_lowercase().contains(&query)
                    || program.description.to_lowercase().contains(&query)
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        let program = Self::get_program_by_index(index)?;

        Ok(ProgramInfo {
            index,
            name: program.name,
            description: program.description,
            arity: program.arity,
            state_count: program.table.len(),
            instruction_count: program.table.instruction_count(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: &'static str,
    pub description: &'static str,
    pub arity: usize,
    pub state_count: usize,
    pub instruction_count: usize,
}
