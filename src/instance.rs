//! This module defines `Instance`, a running machine: a shared transition table coupled
//! with a privately owned tape, a head position, a current state, and a halted flag.

use crate::encoder;
use crate::machine::TransitionTable;
use crate::tape::Tape;
use crate::types::{Action, TuringMachineError, INITIAL_STATE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// How a bounded run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The machine executed a `Halt` instruction.
    Halted { steps: usize },
    /// The step budget ran out before the machine halted.
    StepLimit { steps: usize },
}

/// A serializable picture of an instance at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: usize,
    pub position: i64,
    pub halted: bool,
    pub steps: usize,
    pub start: i64,
    pub end: i64,
    pub tape: String,
    pub values: Vec<usize>,
}

/// A single-tape machine being executed.
///
/// The table is shared and read-only, so several instances may run the same table
/// (on separate threads if needed). The tape belongs to the instance alone.
#[derive(Debug, Clone)]
pub struct Instance {
    table: Arc<TransitionTable>,
    tape: Tape,
    initial: Tape,
    position: i64,
    state: usize,
    halted: bool,
    steps: usize,
}

impl Instance {
    /// Creates an instance in state 1 with the head at position 0.
    ///
    /// The instance works on its own copy of `tape`; the caller's tape is never touched.
    pub fn new(table: impl Into<Arc<TransitionTable>>, tape: &Tape) -> Self {
        Self {
            table: table.into(),
            tape: tape.copy(),
            initial: tape.copy(),
            position: 0,
            state: INITIAL_STATE,
            halted: false,
            steps: 0,
        }
    }

    /// Creates an instance whose tape holds `bits` from position 0.
    pub fn from_bits(table: impl Into<Arc<TransitionTable>>, bits: &[bool]) -> Self {
        Self::new(table, &Tape::from_bits(bits))
    }

    /// Creates an instance whose tape holds the unary argument list `runs`.
    pub fn from_unary_runs(table: impl Into<Arc<TransitionTable>>, runs: &[usize]) -> Self {
        Self::new(table, &Tape::from_unary_runs(runs))
    }

    /// Executes a single step.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if the machine advanced (including the step that halts it).
    /// * `Ok(false)` if the machine had already halted; nothing changes.
    /// * `Err(TuringMachineError::InvalidState)` if the current state is not in the table.
    pub fn step(&mut self) -> Result<bool, TuringMachineError> {
        if self.halted {
            return Ok(false);
        }

        let symbol = self.tape.read(self.position);
        let instruction = self.table.lookup(self.state, symbol)?;

        trace!(
            step = self.steps,
            state = self.state,
            position = self.position,
            %symbol,
            action = %instruction.action,
            next_state = instruction.next_state,
            "step"
        );

        // The next state is taken even when halting; `display` shows it.
        self.state = instruction.next_state;

        match instruction.action {
            Action::Halt => self.halted = true,
            Action::Left => self.position -= 1,
            Action::Right => self.position += 1,
            Action::Print => self.tape.print(self.position),
            Action::Erase => self.tape.erase(self.position),
        }

        if matches!(instruction.action, Action::Left | Action::Right)
            && !self.tape.contains(self.position)
        {
            self.tape.erase(self.position);
        }

        self.steps += 1;

        if self.halted {
            debug!(
                steps = self.steps,
                state = self.state,
                position = self.position,
                "machine halted"
            );
        }

        Ok(true)
    }

    /// Runs until the machine halts. Never returns for a machine that does not halt;
    /// use [`Instance::run_for`] to impose a step budget.
    pub fn run(&mut self) -> Result<(), TuringMachineError> {
        while !self.halted {
            self.step()?;
        }
        Ok(())
    }

    /// Runs for at most `max_steps` steps.
    pub fn run_for(&mut self, max_steps: usize) -> Result<Outcome, TuringMachineError> {
        let mut taken = 0;
        while !self.halted && taken < max_steps {
            self.step()?;
            taken += 1;
        }

        if self.halted {
            Ok(Outcome::Halted { steps: self.steps })
        } else {
            debug!(max_steps, steps = self.steps, "step budget exhausted");
            Ok(Outcome::StepLimit { steps: self.steps })
        }
    }

    /// Restores the tape the instance was created with, state 1, and position 0.
    pub fn reset(&mut self) {
        self.tape = self.initial.copy();
        self.position = 0;
        self.state = INITIAL_STATE;
        self.halted = false;
        self.steps = 0;
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn state(&self) -> usize {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// The number of steps that advanced the machine, including the halting step.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Decodes the unary value starting under the head: the number of consecutive
    /// ones from the head position rightwards.
    pub fn value_at_head(&self) -> usize {
        (self.position..)
            .take_while(|&pos| self.tape.read(pos).is_one())
            .count()
    }

    /// Decodes every run of ones on the materialized tape, left to right.
    pub fn all_values(&self) -> Vec<usize> {
        encoder::decode(self.tape.cells())
    }

    /// Renders the tape with a `[state]` marker after the head's cell, followed by
    /// ` HALT!` once the machine has halted.
    pub fn display(&self) -> String {
        self.to_string()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            position: self.position,
            halted: self.halted,
            steps: self.steps,
            start: self.tape.start(),
            end: self.tape.end(),
            tape: self.tape.to_display_string(),
            values: self.all_values(),
        }
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first = self.tape.start().min(self.position);
        let last = self.tape.end().max(self.position + 1);

        for pos in first..last {
            write!(f, "{}", self.tape.read(pos))?;
            if pos == self.position {
                write!(f, "[{}]", self.state)?;
            }
        }

        if self.halted {
            f.write_str(" HALT!")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Bit, State};

    fn print_then_halt() -> TransitionTable {
        TransitionTable::new(vec![
            State::new((Action::Print, 2), (Action::Halt, 1)),
            State::halting(2),
        ])
    }

    fn shuttle() -> TransitionTable {
        TransitionTable::new(vec![State::new((Action::Right, 1), (Action::Right, 1))])
    }

    #[test]
    fn test_instance_creation() {
        let instance = Instance::from_bits(print_then_halt(), &[true, false]);

        assert_eq!(instance.state(), 1);
        assert_eq!(instance.position(), 0);
        assert!(!instance.is_halted());
        assert_eq!(instance.steps(), 0);
        assert_eq!(instance.tape().to_display_string(), "10");
    }

    #[test]
    fn test_instance_does_not_touch_callers_tape() {
        let tape = Tape::from_bits(&[false]);
        let mut instance = Instance::new(print_then_halt(), &tape);

        instance.run().unwrap();

        assert_eq!(instance.tape().to_display_string(), "1");
        assert_eq!(tape.to_display_string(), "0");
    }

    #[test]
    fn test_print_then_halt() {
        let mut instance = Instance::from_bits(print_then_halt(), &[false]);

        assert_eq!(instance.step(), Ok(true));
        assert_eq!(instance.tape().read(0), Bit::One);
        assert_eq!(instance.state(), 2);
        assert!(!instance.is_halted());

        assert_eq!(instance.step(), Ok(true));
        assert!(instance.is_halted());
        assert_eq!(instance.tape().to_display_string(), "1");
    }

    #[test]
    fn test_halt_still_takes_next_state() {
        let table = TransitionTable::new(vec![
            State::new((Action::Halt, 2), (Action::Halt, 2)),
            State::halting(2),
        ]);
        let mut instance = Instance::from_bits(table, &[false]);

        instance.step().unwrap();

        assert!(instance.is_halted());
        assert_eq!(instance.state(), 2);
        assert_eq!(instance.position(), 0);
    }

    #[test]
    fn test_step_after_halt_is_noop() {
        let mut instance = Instance::from_bits(print_then_halt(), &[true]);
        instance.run().unwrap();

        let before = instance.snapshot();
        for _ in 0..3 {
            assert_eq!(instance.step(), Ok(false));
        }
        assert_eq!(instance.snapshot(), before);
    }

    #[test]
    fn test_moves_materialize_visited_cells() {
        let table = TransitionTable::new(vec![
            State::new((Action::Left, 2), (Action::Left, 2)),
            State::new((Action::Left, 3), (Action::Left, 3)),
            State::halting(3),
        ]);
        let mut instance = Instance::new(table, &Tape::new());

        instance.run().unwrap();

        assert_eq!(instance.position(), -2);
        assert_eq!(instance.tape().start(), -2);
        assert_eq!(instance.tape().end(), 0);
        assert_eq!(instance.tape().to_display_string(), "00");
    }

    #[test]
    fn test_run_for_stops_at_budget() {
        let mut instance = Instance::new(shuttle(), &Tape::new());

        assert_eq!(instance.run_for(5), Ok(Outcome::StepLimit { steps: 5 }));
        assert_eq!(instance.position(), 5);
        assert_eq!(instance.tape().end(), 6);
    }

    #[test]
    fn test_run_for_reports_halt() {
        let mut instance = Instance::from_bits(print_then_halt(), &[false]);

        assert_eq!(instance.run_for(100), Ok(Outcome::Halted { steps: 2 }));
    }

    #[test]
    fn test_reset() {
        let mut instance = Instance::from_bits(print_then_halt(), &[false]);
        instance.run().unwrap();

        instance.reset();

        assert_eq!(instance.state(), 1);
        assert_eq!(instance.position(), 0);
        assert!(!instance.is_halted());
        assert_eq!(instance.steps(), 0);
        assert_eq!(instance.tape().to_display_string(), "0");
    }

    #[test]
    fn test_value_at_head() {
        let instance = Instance::from_unary_runs(shuttle(), &[3, 2]);
        assert_eq!(instance.value_at_head(), 3);

        let instance = Instance::from_bits(shuttle(), &[true, true]);
        assert_eq!(instance.value_at_head(), 2);

        let instance = Instance::new(shuttle(), &Tape::new());
        assert_eq!(instance.value_at_head(), 0);
    }

    #[test]
    fn test_display() {
        let mut instance = Instance::from_bits(print_then_halt(), &[false, true]);
        assert_eq!(instance.display(), "0[1]1");

        instance.run().unwrap();
        assert_eq!(instance.display(), "1[2]1 HALT!");
    }

    #[test]
    fn test_display_head_outside_tape() {
        let instance = Instance::new(shuttle(), &Tape::new());
        assert_eq!(instance.display(), "0[1]");
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut instance = Instance::from_unary_runs(shuttle(), &[2]);
        instance.run_for(1).unwrap();

        let json = serde_json::to_value(instance.snapshot()).unwrap();
        assert_eq!(json["position"], 1);
        assert_eq!(json["tape"], "110");
        assert_eq!(json["values"], serde_json::json!([2]));
    }
}
