use std::time::{Duration, Instant};
use crate::sat_solver::*;
use crate::{ClauseSet, MaxSatSolution};

/// Gives the wrapped solver at most `max_duration` per formula.
/// Running out of time yields the best assignment found so far.
pub struct TimeLimitedSolver<S: InterruptibleSolver> {
    max_duration: Duration,
    solver: S,
}

impl<S: InterruptibleSolver> TimeLimitedSolver<S> {
    pub fn new(solver: S, max_duration: Duration) -> TimeLimitedSolver<S> {
        TimeLimitedSolver {
            solver,
            max_duration,
        }
    }
}

impl<S: InterruptibleSolver> Solver for TimeLimitedSolver<S> {
    fn solve(&self, formula: &ClauseSet) -> MaxSatSolution {
        self.solve_until(formula, None)
    }
}

impl<S: InterruptibleSolver> InterruptibleSolver for TimeLimitedSolver<S> {
    /// Uses whichever comes first, the given deadline or the time limit
    fn solve_until(&self, formula: &ClauseSet, deadline: Option<Instant>) -> MaxSatSolution {
        let limit = Instant::now().checked_add(self.max_duration);
        let deadline = match (deadline, limit) {
            (Some(deadline), Some(limit)) => Some(deadline.min(limit)),
            (deadline, limit) => deadline.or(limit),
        };
        self.solver.solve_until(formula, deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BacktrackingSolver, TimedSolver};

    #[test]
    fn zero_limit_interrupts_search() {
        let formula = ClauseSet::with_default_names(3, vec![], vec![]).unwrap();
        let solver = TimeLimitedSolver::new(BacktrackingSolver::default(), Duration::from_secs(0));
        assert_eq!(solver.solve(&formula), MaxSatSolution::Unknown);
    }

    #[test]
    fn generous_limit_changes_nothing() {
        let formula = ClauseSet::with_default_names(3, vec![], vec![]).unwrap();
        let solver = TimedSolver::new(TimeLimitedSolver::new(BacktrackingSolver::default(), Duration::from_secs(60)));
        let (_, solution) = solver.solve_timed(&formula);
        assert_eq!(solution, MaxSatSolution::Optimum { valuation: vec![false; 3], weight: 0 });
    }
}
