use std::time::Instant;
use auto_impl::auto_impl;
use crate::{ClauseSet, MaxSatSolution};

/// Anything that can find a weight-maximising assignment of a formula
#[auto_impl(&, Box)]
pub trait Solver {
    fn solve(&self, formula: &ClauseSet) -> MaxSatSolution;
}

/// A solver that can give up at a deadline, reporting the best
/// assignment found so far.
#[auto_impl(&, Box)]
pub trait InterruptibleSolver: Solver {
    fn solve_until(&self, formula: &ClauseSet, deadline: Option<Instant>) -> MaxSatSolution;
}
