use itertools::Itertools;
use crate::assignment::Assignment;
use crate::cnf::VarId;
use crate::constraint_index::ConstraintIndex;
use crate::error::ConfigError;

/// How the next branching variable is chosen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariableOrdering {
    /// Fewest values that pass the local consistency check (MRV)
    MinimumRemainingValues,
    /// Mentioned by the most hard clauses (MCV)
    MostConstraining,
    /// First unassigned variable in index order
    FirstUnassigned,
}

/// In which order the two truth values are tried
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueOrdering {
    /// Fewest violated hard clauses first (LCV)
    LeastConstraining,
    /// `false`, then `true`
    DomainOrder,
}

/// Ordering heuristics of the backtracking search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Heuristics {
    pub variables: VariableOrdering,
    pub values: ValueOrdering,
}

const DOMAIN: [bool; 2] = [false, true];

impl Default for Heuristics {
    fn default() -> Self {
        Heuristics {
            variables: VariableOrdering::FirstUnassigned,
            values: ValueOrdering::DomainOrder,
        }
    }
}

impl Heuristics {
    pub fn new(variables: VariableOrdering, values: ValueOrdering) -> Heuristics {
        Heuristics { variables, values }
    }

    /// Builds heuristics from independent on/off switches. MRV and MCV
    /// both pick the branching variable, so asking for both is an error.
    pub fn from_flags(mrv: bool, mcv: bool, lcv: bool) -> Result<Heuristics, ConfigError> {
        let variables = match (mrv, mcv) {
            (true, true) => return Err(ConfigError::ConflictingVariableOrdering),
            (true, false) => VariableOrdering::MinimumRemainingValues,
            (false, true) => VariableOrdering::MostConstraining,
            (false, false) => VariableOrdering::FirstUnassigned,
        };
        let values = if lcv { ValueOrdering::LeastConstraining } else { ValueOrdering::DomainOrder };
        Ok(Heuristics { variables, values })
    }

    pub fn uses_mrv(&self) -> bool {
        self.variables == VariableOrdering::MinimumRemainingValues
    }

    pub fn uses_mcv(&self) -> bool {
        self.variables == VariableOrdering::MostConstraining
    }

    pub fn uses_lcv(&self) -> bool {
        self.values == ValueOrdering::LeastConstraining
    }
}

impl VariableOrdering {
    /// Picks the next variable to branch on, or `None` once the
    /// assignment is complete. Ties go to the lowest index.
    pub fn pick_branching_variable(&self, index: &ConstraintIndex<'_>, assignment: &mut Assignment) -> Option<VarId> {
        match self {
            VariableOrdering::FirstUnassigned => assignment.unassigned().next(),
            VariableOrdering::MostConstraining => {
                // max_by_key would keep the last maximum
                assignment.unassigned()
                    .min_by_key(|&var| std::cmp::Reverse(index.degree(var)))
            },
            VariableOrdering::MinimumRemainingValues => {
                let unassigned: Vec<VarId> = assignment.unassigned().collect();
                unassigned.into_iter()
                    .min_by_key(|&var| remaining_values(index, assignment, var))
            },
        }
    }
}

fn remaining_values(index: &ConstraintIndex<'_>, assignment: &mut Assignment, var: VarId) -> usize {
    DOMAIN.iter()
        .filter(|&&value| index.is_consistent(assignment, var, value))
        .count()
}

impl ValueOrdering {
    /// Order in which the values of `var` are tried
    pub fn order_values(&self, index: &ConstraintIndex<'_>, assignment: &mut Assignment, var: VarId) -> [bool; 2] {
        match self {
            ValueOrdering::DomainOrder => DOMAIN,
            ValueOrdering::LeastConstraining => {
                let sorted = DOMAIN.iter()
                    .map(|&value| (value, index.violations(assignment, var, value)))
                    .sorted_by_key(|&(_, violations)| violations)
                    .map(|(value, _)| value)
                    .collect::<Vec<bool>>();
                [sorted[0], sorted[1]]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::{CNFVar, ClauseSet, CNFClause};

    fn clause(literals: &[CNFVar]) -> CNFClause {
        literals.iter().copied().collect()
    }

    #[test]
    fn conflicting_flags_are_rejected() {
        assert_eq!(Heuristics::from_flags(true, true, false), Err(ConfigError::ConflictingVariableOrdering));
        assert_eq!(
            Heuristics::from_flags(false, true, true),
            Ok(Heuristics::new(VariableOrdering::MostConstraining, ValueOrdering::LeastConstraining))
        );
        assert_eq!(Heuristics::from_flags(false, false, false), Ok(Heuristics::default()));
    }

    #[test]
    fn most_constraining_prefers_high_degree_then_low_index() {
        let formula = ClauseSet::with_default_names(3, vec![
            clause(&[CNFVar::pos(1), CNFVar::pos(2)]),
            clause(&[CNFVar::neg(1), CNFVar::neg(2)]),
            clause(&[CNFVar::pos(0)]),
        ], vec![]).unwrap();
        let index = ConstraintIndex::new(&formula);
        let mut assignment = Assignment::new(3);

        let picked = VariableOrdering::MostConstraining.pick_branching_variable(&index, &mut assignment);
        assert_eq!(picked, Some(1));

        assignment.assign(1, true);
        let picked = VariableOrdering::MostConstraining.pick_branching_variable(&index, &mut assignment);
        assert_eq!(picked, Some(2));
    }

    #[test]
    fn minimum_remaining_values_prefers_forced_variables() {
        let formula = ClauseSet::with_default_names(3, vec![
            clause(&[CNFVar::pos(0), CNFVar::pos(1)]),
            clause(&[CNFVar::neg(2)]),
        ], vec![]).unwrap();
        let index = ConstraintIndex::new(&formula);
        let mut assignment = Assignment::new(3);

        let picked = VariableOrdering::MinimumRemainingValues.pick_branching_variable(&index, &mut assignment);
        assert_eq!(picked, Some(2));
        assert_eq!(assignment, Assignment::new(3));
    }

    #[test]
    fn first_unassigned_follows_index_order() {
        let formula = ClauseSet::with_default_names(2, vec![], vec![]).unwrap();
        let index = ConstraintIndex::new(&formula);
        let mut assignment = Assignment::new(2);
        assignment.assign(0, false);
        assert_eq!(VariableOrdering::FirstUnassigned.pick_branching_variable(&index, &mut assignment), Some(1));
        assignment.assign(1, false);
        assert_eq!(VariableOrdering::FirstUnassigned.pick_branching_variable(&index, &mut assignment), None);
    }

    #[test]
    fn least_constraining_tries_harmless_value_first() {
        let formula = ClauseSet::with_default_names(2, vec![
            clause(&[CNFVar::pos(0)]),
            clause(&[CNFVar::pos(0), CNFVar::pos(1)]),
        ], vec![]).unwrap();
        let index = ConstraintIndex::new(&formula);
        let mut assignment = Assignment::new(2);

        assert_eq!(ValueOrdering::LeastConstraining.order_values(&index, &mut assignment, 0), [true, false]);
        // ties keep the domain order
        assert_eq!(ValueOrdering::LeastConstraining.order_values(&index, &mut assignment, 1), [false, true]);
        assert_eq!(ValueOrdering::DomainOrder.order_values(&index, &mut assignment, 0), [false, true]);
    }
}
