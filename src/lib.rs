//! This crate provides the core logic for a binary single-tape Turing machine simulator.
//! It includes modules for building transition tables, an unbounded two-way tape,
//! executing machine instances, analyzing tables, and a few predefined programs.

pub mod analyzer;
pub mod encoder;
pub mod instance;
pub mod machine;
pub mod programs;
pub mod tape;
pub mod types;

/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the unary encoding functions from the encoder module.
pub use encoder::{decode, encode};
/// Re-exports the execution types from the instance module.
pub use instance::{Instance, Outcome, Snapshot};
/// Re-exports the `TransitionTable` struct from the machine module.
pub use machine::TransitionTable;
/// Re-exports `Program`, `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{Program, ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the value and error types from the types module.
pub use types::{
    Action, Bit, Instruction, State, TuringMachineError, DEFAULT_MAX_STEPS, INITIAL_STATE,
};
