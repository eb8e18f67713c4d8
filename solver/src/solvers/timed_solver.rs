use crate::sat_solver::*;
use crate::{ClauseSet, MaxSatSolution};
use std::time::{Instant, Duration};

/// A wrapper for another solver which exposes time performance
/// measurement
pub struct TimedSolver<S> {
    solver: S,
}

impl<S: Solver> Solver for TimedSolver<S> {
    fn solve(&self, formula: &ClauseSet) -> MaxSatSolution {
        self.solver.solve(formula)
    }
}

impl<S: InterruptibleSolver> InterruptibleSolver for TimedSolver<S> {
    fn solve_until(&self, formula: &ClauseSet, deadline: Option<Instant>) -> MaxSatSolution {
        self.solver.solve_until(formula, deadline)
    }
}

impl<S> TimedSolver<S> {
    /// Wraps a solver in a `TimedSolver`
    pub fn new(solver: S) -> Self {
        TimedSolver{solver}
    }
}

impl<S: Solver> TimedSolver<S> {
    /// Solves a given formula but measures wall-clock time additionally
    pub fn solve_timed(&self, formula: &ClauseSet) -> (Duration, MaxSatSolution) {
        let start = Instant::now();
        let solution = self.solver.solve(formula);
        let duration = start.elapsed();
        (duration, solution)
    }
}
