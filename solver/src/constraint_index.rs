use crate::assignment::Assignment;
use crate::cnf::{CNFClause, ClauseSet, VarId};

type ClauseId = usize;

/// Maps every variable to the hard clauses mentioning it, in either
/// polarity, so that a fresh assignment only re-checks those clauses.
#[derive(Clone, Debug)]
pub struct ConstraintIndex<'f> {
    formula: &'f ClauseSet,
    occurrences: Vec<Vec<ClauseId>>,
}

impl<'f> ConstraintIndex<'f> {
    pub fn new(formula: &'f ClauseSet) -> ConstraintIndex<'f> {
        let mut occurrences = vec![Vec::new(); formula.num_variables()];
        for (id, clause) in formula.hard_clauses().iter().enumerate() {
            for literal in &clause.vars {
                let occ: &mut Vec<ClauseId> = &mut occurrences[literal.id];
                // literals of one clause are visited together
                if occ.last() != Some(&id) {
                    occ.push(id);
                }
            }
        }
        ConstraintIndex { formula, occurrences }
    }

    pub fn formula(&self) -> &'f ClauseSet {
        self.formula
    }

    /// Hard clauses that mention `var`
    pub fn constraints(&self, var: VarId) -> impl Iterator<Item = &'f CNFClause> + '_ {
        let clauses = self.formula.hard_clauses();
        self.occurrences[var].iter().map(move |&id| &clauses[id])
    }

    /// Number of hard clauses that mention `var`
    pub fn degree(&self, var: VarId) -> usize {
        self.occurrences[var].len()
    }

    /// Whether all constraints on `var` still hold once it has been assigned
    pub fn holds_locally(&self, assignment: &Assignment, var: VarId) -> bool {
        debug_assert!(assignment.is_assigned(var));
        self.constraints(var)
            .all(|clause| self.formula.evaluate_clause(clause, assignment))
    }

    /// Trial-assigns `value` and checks the constraints on `var`
    pub fn is_consistent(&self, assignment: &mut Assignment, var: VarId, value: bool) -> bool {
        let scope = assignment.assign_scoped(var, value);
        self.holds_locally(&scope, var)
    }

    /// Trial-assigns `value` and counts the constraints on `var` it violates
    pub fn violations(&self, assignment: &mut Assignment, var: VarId, value: bool) -> usize {
        let scope = assignment.assign_scoped(var, value);
        self.constraints(var)
            .filter(|clause| !self.formula.evaluate_clause(clause, &scope))
            .count()
    }
}
