use std::time::Instant;
use crate::sat_solver::*;
use crate::assignment::Assignment;
use crate::{ClauseSet, MaxSatSolution, Valuation, Weight};

/// A MAX-SAT solver that naively checks all possible valuations,
/// counting upwards from all-false.
pub enum Bruteforce {
    Bruteforce,
}

impl Solver for Bruteforce {
    fn solve(&self, formula: &ClauseSet) -> MaxSatSolution {
        self.solve_until(formula, None)
    }
}

impl InterruptibleSolver for Bruteforce {
    fn solve_until(&self, formula: &ClauseSet, deadline: Option<Instant>) -> MaxSatSolution {
        let mut valuation = vec![false; formula.num_variables()];
        let mut best: Option<(Valuation, Weight)> = None;
        let max_weight = formula.max_weight();

        loop {
            if deadline.map_or(false, |deadline| Instant::now() >= deadline) {
                return match best {
                    Some((valuation, weight)) => MaxSatSolution::Satisfiable { valuation, weight },
                    None => MaxSatSolution::Unknown,
                };
            }

            let assignment: Assignment = valuation.iter().copied().collect();
            if formula.are_all_satisfied(&assignment) {
                let weight = formula.calculate_weight(&assignment);
                if best.as_ref().map_or(true, |(_, best)| weight > *best) {
                    best = Some((valuation.clone(), weight));
                }
                if weight == max_weight {
                    break;
                }
            }

            if !increment(&mut valuation) {
                break;
            }
        }

        match best {
            Some((valuation, weight)) => MaxSatSolution::Optimum { valuation, weight },
            None => MaxSatSolution::Unsatisfiable,
        }
    }
}

/// Moves to the next valuation, where the last variable changes fastest.
/// Returns `false` after wrapping around.
fn increment(valuation: &mut Valuation) -> bool {
    for bit in valuation.iter_mut().rev() {
        // set current bit; done unless it carries
        *bit = !*bit;
        if *bit {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CNFClause, CNFVar, SoftClause};

    #[test]
    fn counts_through_all_valuations() {
        let mut valuation = vec![false, false];
        let mut seen = vec![valuation.clone()];
        while increment(&mut valuation) {
            seen.push(valuation.clone());
        }
        assert_eq!(seen, vec![
            vec![false, false],
            vec![false, true],
            vec![true, false],
            vec![true, true],
        ]);
        assert_eq!(valuation, vec![false, false]);
    }

    #[test]
    fn finds_heaviest_valuation() {
        let formula = ClauseSet::with_default_names(
            2,
            vec![vec![CNFVar::pos(0), CNFVar::pos(1)].into_iter().collect()],
            vec![
                SoftClause::new(CNFClause::single(CNFVar::neg(0)), 2),
                SoftClause::new(CNFClause::single(CNFVar::neg(1)), 3),
            ],
        ).unwrap();
        assert_eq!(
            Bruteforce::Bruteforce.solve(&formula),
            MaxSatSolution::Optimum { valuation: vec![true, false], weight: 3 }
        );
    }
}
