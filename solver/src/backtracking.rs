use std::time::Instant;

use crate::assignment::Assignment;
use crate::branching_strategy::Heuristics;
use crate::constraint_index::ConstraintIndex;
use crate::log::targets;
use crate::sat_solver::{InterruptibleSolver, Solver};
use crate::{ClauseSet, MaxSatSolution, Valuation, Weight};

/// Depth-first backtracking search for a weight-maximising assignment.
///
/// Every assignment is checked only against the hard clauses mentioning
/// the assigned variable. The search stops early once an assignment
/// satisfies every soft clause, since nothing can beat it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BacktrackingSolver {
    heuristics: Heuristics,
}

/// Counters collected during one search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Recursive calls, including the root
    pub nodes: u64,
    pub consistency_checks: u64,
    pub backtracks: u64,
    /// Times the incumbent was replaced by a heavier assignment
    pub improvements: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    /// The incumbent reached the maximum possible weight
    Optimal,
    /// The deadline passed
    Interrupted,
}

struct Search<'f> {
    index: ConstraintIndex<'f>,
    heuristics: Heuristics,
    max_weight: Weight,
    deadline: Option<Instant>,
    incumbent: Option<(Valuation, Weight)>,
    stats: SearchStats,
}

impl BacktrackingSolver {
    pub fn new(heuristics: Heuristics) -> BacktrackingSolver {
        BacktrackingSolver { heuristics }
    }

    /// Runs the search and also reports its counters
    pub fn search(&self, formula: &ClauseSet, deadline: Option<Instant>) -> (MaxSatSolution, SearchStats) {
        let search = Search {
            index: ConstraintIndex::new(formula),
            heuristics: self.heuristics,
            max_weight: formula.max_weight(),
            deadline,
            incumbent: None,
            stats: SearchStats::default(),
        };
        search.run()
    }
}

impl Solver for BacktrackingSolver {
    fn solve(&self, formula: &ClauseSet) -> MaxSatSolution {
        self.solve_until(formula, None)
    }
}

impl InterruptibleSolver for BacktrackingSolver {
    fn solve_until(&self, formula: &ClauseSet, deadline: Option<Instant>) -> MaxSatSolution {
        self.search(formula, deadline).0
    }
}

impl<'f> Search<'f> {
    fn run(mut self) -> (MaxSatSolution, SearchStats) {
        let num_variables = self.index.formula().num_variables();
        log::debug!(target: targets::SEARCH, "Searching {} variables with {:?}, max weight {}",
            num_variables, self.heuristics, self.max_weight);

        let mut assignment = Assignment::new(num_variables);
        let flow = self.backtrack(&mut assignment);
        debug_assert!(assignment.unassigned().count() == num_variables, "assignment leaked out of the search");

        log::debug!(target: targets::SEARCH, "Finished with {:?}: {:?}", flow, self.stats);
        let solution = match (flow, self.incumbent) {
            (Flow::Interrupted, Some((valuation, weight))) => MaxSatSolution::Satisfiable { valuation, weight },
            (Flow::Interrupted, None) => MaxSatSolution::Unknown,
            (_, Some((valuation, weight))) => MaxSatSolution::Optimum { valuation, weight },
            (_, None) => MaxSatSolution::Unsatisfiable,
        };
        (solution, self.stats)
    }

    fn backtrack(&mut self, assignment: &mut Assignment) -> Flow {
        self.stats.nodes += 1;
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                log::debug!(target: targets::SEARCH, "Deadline passed after {} nodes", self.stats.nodes);
                return Flow::Interrupted;
            }
        }

        if assignment.is_complete() {
            return self.complete(assignment);
        }

        let var = match self.heuristics.variables.pick_branching_variable(&self.index, assignment) {
            Some(var) => var,
            None => return Flow::Continue,
        };
        let values = self.heuristics.values.order_values(&self.index, assignment, var);
        log::trace!(target: targets::HEURISTICS, "Branching on {} trying {:?}", var, values);

        for value in values.iter().copied() {
            let mut scope = assignment.assign_scoped(var, value);
            self.stats.consistency_checks += 1;
            if !self.index.holds_locally(&scope, var) {
                continue;
            }
            match self.backtrack(&mut scope) {
                Flow::Continue => self.stats.backtracks += 1,
                stop => return stop,
            }
        }
        Flow::Continue
    }

    /// Handles a complete assignment: rejects it if some hard clause
    /// fails, otherwise offers it as the new incumbent.
    fn complete(&mut self, assignment: &Assignment) -> Flow {
        let formula = self.index.formula();
        if !formula.are_all_satisfied(assignment) {
            return Flow::Continue;
        }

        let weight = formula.calculate_weight(assignment);
        let improves = match &self.incumbent {
            Some((_, best)) => weight > *best,
            None => true,
        };
        if improves {
            if let Some(valuation) = assignment.to_valuation() {
                log::trace!(target: targets::SEARCH, "New incumbent with weight {}", weight);
                self.stats.improvements += 1;
                self.incumbent = Some((valuation, weight));
            }
        }

        if weight == self.max_weight {
            log::debug!(target: targets::SEARCH, "Reached maximum weight {}, stopping early", weight);
            Flow::Optimal
        } else {
            Flow::Continue
        }
    }
}
