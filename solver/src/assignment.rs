use std::ops::{Deref, DerefMut};
use crate::cnf::{CNFVar, VarId};

/// Complete valuation, indexed by variable
pub type Valuation = Vec<bool>;

/// Partial assignment built up during search.
///
/// Only variables are stored; the value of a negated literal is derived
/// from its variable, so a literal and its negation are always assigned
/// together and always hold opposite values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<Option<bool>>,
    num_assigned: usize,
}

impl Assignment {
    /// Creates an empty assignment over `num_variables` variables
    pub fn new(num_variables: usize) -> Assignment {
        Assignment {
            values: vec![None; num_variables],
            num_assigned: 0,
        }
    }

    /// Value of a literal, `None` while its variable is unassigned
    pub fn literal_value(&self, literal: CNFVar) -> Option<bool> {
        self.values[literal.id].map(|value| value == literal.sign)
    }

    pub fn is_assigned(&self, var: VarId) -> bool {
        self.values[var].is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.num_assigned == self.values.len()
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    pub fn assign(&mut self, var: VarId, value: bool) {
        if self.values[var].replace(value).is_none() {
            self.num_assigned += 1;
        }
    }

    pub fn unassign(&mut self, var: VarId) {
        if self.values[var].take().is_some() {
            self.num_assigned -= 1;
        }
    }

    /// Assigns `var` until the returned guard is dropped
    pub fn assign_scoped(&mut self, var: VarId, value: bool) -> AssignGuard<'_> {
        debug_assert!(!self.is_assigned(var), "variable {} assigned twice", var);
        self.assign(var, value);
        AssignGuard { assignment: self, var }
    }

    /// Unassigned variables in index order
    pub fn unassigned(&self) -> impl Iterator<Item = VarId> + '_ {
        self.values.iter()
            .enumerate()
            .filter_map(|(var, value)| match value {
                None => Some(var),
                Some(_) => None,
            })
    }

    /// Snapshot of a complete assignment
    pub fn to_valuation(&self) -> Option<Valuation> {
        self.values.iter().copied().collect()
    }
}

impl std::iter::FromIterator<bool> for Assignment {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let values: Vec<Option<bool>> = iter.into_iter().map(Some).collect();
        Assignment {
            num_assigned: values.len(),
            values,
        }
    }
}

/// Keeps one variable assigned for as long as it lives.
pub struct AssignGuard<'a> {
    assignment: &'a mut Assignment,
    var: VarId,
}

impl Deref for AssignGuard<'_> {
    type Target = Assignment;

    fn deref(&self) -> &Assignment {
        &*self.assignment
    }
}

impl DerefMut for AssignGuard<'_> {
    fn deref_mut(&mut self) -> &mut Assignment {
        &mut *self.assignment
    }
}

impl Drop for AssignGuard<'_> {
    fn drop(&mut self) {
        self.assignment.unassign(self.var);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_follows_variable() {
        let mut assignment = Assignment::new(1);
        assert_eq!(assignment.literal_value(CNFVar::pos(0)), None);
        assert_eq!(assignment.literal_value(CNFVar::neg(0)), None);

        assignment.assign(0, true);
        assert_eq!(assignment.literal_value(CNFVar::pos(0)), Some(true));
        assert_eq!(assignment.literal_value(CNFVar::neg(0)), Some(false));

        assignment.unassign(0);
        assert_eq!(assignment.literal_value(CNFVar::pos(0)), None);
        assert_eq!(assignment.literal_value(CNFVar::neg(0)), None);
    }

    #[test]
    fn guard_restores_on_drop() {
        let mut assignment = Assignment::new(3);
        assignment.assign(2, false);
        let before = assignment.clone();
        {
            let mut outer = assignment.assign_scoped(0, true);
            let inner = outer.assign_scoped(1, false);
            assert!(inner.is_complete());
        }
        assert_eq!(assignment, before);
    }

    #[test]
    fn guard_restores_on_unwind() {
        let mut assignment = Assignment::new(2);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = assignment.assign_scoped(1, true);
            panic!("search aborted");
        }));
        assert!(result.is_err());
        assert_eq!(assignment, Assignment::new(2));
    }

    #[test]
    fn valuation_only_when_complete() {
        let mut assignment = Assignment::new(2);
        assignment.assign(0, true);
        assert_eq!(assignment.to_valuation(), None);
        assert_eq!(assignment.unassigned().collect::<Vec<_>>(), vec![1]);
        assignment.assign(1, false);
        assert_eq!(assignment.to_valuation(), Some(vec![true, false]));
    }
}
