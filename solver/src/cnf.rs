use std::fmt;
use std::iter::FromIterator;
use itertools::Itertools;

use rayon::prelude::*;
use dimacs::parse_dimacs;

use crate::assignment::Assignment;
use crate::error::{FormulaError, ParseError};

/// Type used for referencing logical variables
pub type VarId = usize;

/// Weight carried by a soft clause
pub type Weight = u64;

/// Representation of a weighted formula: hard clauses that have to hold
/// and soft clauses that contribute their weight when they hold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClauseSet {
    /// Display names, indexed by variable
    names: Vec<String>,
    hard: Vec<CNFClause>,
    soft: Vec<SoftClause>,
}

/// Representation of a clause (disjunction of literals)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CNFClause {
    /// Vector of inner literals
    pub vars: Vec<CNFVar>,
}

/// A clause paired with the weight it contributes when satisfied
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoftClause {
    pub clause: CNFClause,
    pub weight: Weight,
}

/// Literal: a variable reference with a polarity bit
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Ord, Eq, Hash)]
pub struct CNFVar {
    /// Identifier of a variable
    pub id: VarId,
    /// Literal is negated iff `sign == false`
    pub sign: bool,
}

impl ClauseSet {
    /// Creates a formula after checking that every literal names one of
    /// the given variables and that the soft weights fit in a [`Weight`]
    /// when added up.
    pub fn new(names: Vec<String>, hard: Vec<CNFClause>, soft: Vec<SoftClause>) -> Result<ClauseSet, FormulaError> {
        let num_variables = names.len();
        let out_of_range = hard.iter()
            .chain(soft.iter().map(|soft| &soft.clause))
            .flat_map(|clause| clause.vars.iter())
            .find(|literal| literal.id >= num_variables);
        if let Some(literal) = out_of_range {
            return Err(FormulaError::UnknownVariable { id: literal.id, num_variables });
        }

        if total_weight(&soft).is_none() {
            return Err(FormulaError::WeightOverflow);
        }
        Ok(ClauseSet { names, hard, soft })
    }

    /// Skips the range check for callers that only draw literals from
    /// `0..names.len()`
    pub(crate) fn from_trusted_parts(names: Vec<String>, hard: Vec<CNFClause>, soft: Vec<SoftClause>) -> ClauseSet {
        debug_assert!(hard.iter()
            .chain(soft.iter().map(|soft| &soft.clause))
            .all(|clause| clause.vars.iter().all(|literal| literal.id < names.len())));
        debug_assert!(total_weight(&soft).is_some());
        ClauseSet { names, hard, soft }
    }

    /// Creates a formula over `num_variables` variables named `X1..Xn`
    pub fn with_default_names(num_variables: usize, hard: Vec<CNFClause>, soft: Vec<SoftClause>) -> Result<ClauseSet, FormulaError> {
        ClauseSet::new(default_names(num_variables), hard, soft)
    }

    pub fn num_variables(&self) -> usize {
        self.names.len()
    }

    /// Display name of a variable
    pub fn name(&self, var: VarId) -> &str {
        &self.names[var]
    }

    pub fn hard_clauses(&self) -> &[CNFClause] {
        &self.hard
    }

    pub fn soft_clauses(&self) -> &[SoftClause] {
        &self.soft
    }

    /// The best weight any assignment could reach: all soft clauses satisfied
    pub fn max_weight(&self) -> Weight {
        self.soft.iter().map(|soft| soft.weight).sum()
    }

    /// A clause holds unless every literal in it is assigned false;
    /// unassigned literals count as potentially satisfying.
    pub fn evaluate_clause(&self, clause: &CNFClause, assignment: &Assignment) -> bool {
        clause.vars.iter()
            .any(|literal| assignment.literal_value(*literal) != Some(false))
    }

    /// Sums up the weights of all soft clauses that hold. Never exceeds
    /// [`ClauseSet::max_weight`], which fits by construction.
    pub fn calculate_weight(&self, assignment: &Assignment) -> Weight {
        self.soft.par_iter()
            .filter(|soft| self.evaluate_clause(&soft.clause, assignment))
            .map(|soft| soft.weight)
            .sum()
    }

    /// Checks whether every hard clause holds
    pub fn are_all_satisfied(&self, assignment: &Assignment) -> bool {
        self.hard.par_iter()
            .all(|clause| self.evaluate_clause(clause, assignment))
    }

    /// Parse DIMACS string into a formula with hard clauses only
    pub fn from_dimacs(input: &str) -> Result<ClauseSet, ParseError> {
        let inst = parse_dimacs(input);

        match inst {
            Ok(dimacs::Instance::Cnf{num_vars, clauses}) => {
                let hard = clauses.iter()
                    .map(|clause|
                         clause.lits().iter()
                         .map(|lit|
                              CNFVar {
                                  id: lit.var().to_u64() as VarId - 1,
                                  sign: lit.sign() == dimacs::Sign::Pos
                              }
                         ).collect()
                    ).collect();
                Ok(ClauseSet::with_default_names(num_vars as usize, hard, Vec::new())?)
            },
            Ok(_) => Err(ParseError::UnsupportedDimacs),
            Err(err) => Err(ParseError::Dimacs(format!("{:?}", err))),
        }
    }
}

/// Sum of all soft weights, `None` past `Weight::MAX`
fn total_weight(soft: &[SoftClause]) -> Option<Weight> {
    soft.iter().try_fold(0 as Weight, |total, soft| total.checked_add(soft.weight))
}

/// Names `X1..Xn` used whenever the input carries no names of its own
pub fn default_names(num_variables: usize) -> Vec<String> {
    (1..=num_variables).map(|i| format!("X{}", i)).collect()
}

impl CNFClause {
    /// Creates an empty CNF clause
    pub fn new() -> CNFClause {
        CNFClause{vars: vec![]}
    }

    /// Creates a CNF clause containing a single literal
    pub fn single(var: CNFVar) -> CNFClause {
        CNFClause{vars: vec![var]}
    }

    /// Adds a single literal into the clause
    pub fn push(&mut self, v: CNFVar) {
        self.vars.push(v)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl FromIterator<CNFVar> for CNFClause {
    fn from_iter<I: IntoIterator<Item=CNFVar>>(iter: I) -> Self {
        CNFClause{vars: iter.into_iter().collect()}
    }
}

impl IntoIterator for CNFClause {
    type Item = CNFVar;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.into_iter()
    }
}

impl SoftClause {
    pub fn new(clause: CNFClause, weight: Weight) -> SoftClause {
        SoftClause { clause, weight }
    }
}

impl CNFVar {
    /// Creates literal with given identifier and positivity
    pub fn new(id: VarId, sign: bool) -> CNFVar {
        CNFVar{id, sign}
    }

    /// Creates a positive literal with given identifier
    pub fn pos(id: VarId) -> CNFVar {
        CNFVar{id, sign: true}
    }

    /// Creates a negative literal with given identifier
    pub fn neg(id: VarId) -> CNFVar {
        CNFVar{id, sign: false}
    }

    /// Converts to signed DIMACS integer (identifiers are shifted by one)
    ///
    /// **NOTE** it is not integer-overflow friendly.
    pub fn to_i32(&self) -> i32 {
        let id = self.id as i32 + 1;
        if self.sign { id } else { -id }
    }
}

/// Writes the formula back in the weighted clause-file format
impl fmt::Display for ClauseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} {}", self.names.len(), self.hard.len(), self.soft.len())?;
        let literal = |lit: &CNFVar| format!("{}{}", if lit.sign { "" } else { "~" }, self.names[lit.id]);
        for clause in &self.hard {
            writeln!(f, "{}", clause.vars.iter().map(literal).join(" "))?;
        }
        for soft in &self.soft {
            writeln!(f, "{} {} {}", crate::parser::SOFT_CLAUSE_MARKER,
                soft.clause.vars.iter().map(literal).join(" "), soft.weight)?;
        }
        Ok(())
    }
}

impl fmt::Display for CNFClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.vars.iter().join(" v "))
    }
}

impl fmt::Display for CNFVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formula() -> ClauseSet {
        ClauseSet::with_default_names(
            2,
            vec![vec![CNFVar::pos(0), CNFVar::pos(1)].into_iter().collect()],
            vec![
                SoftClause::new(CNFClause::single(CNFVar::neg(0)), 5),
                SoftClause::new(CNFClause::single(CNFVar::neg(1)), 3),
            ],
        ).unwrap()
    }

    #[test]
    fn unassigned_literals_are_optimistic() {
        let formula = formula();
        let mut assignment = Assignment::new(2);
        assert!(formula.evaluate_clause(&formula.hard_clauses()[0], &assignment));

        assignment.assign(0, false);
        assert!(formula.evaluate_clause(&formula.hard_clauses()[0], &assignment));

        assignment.assign(1, false);
        assert!(!formula.evaluate_clause(&formula.hard_clauses()[0], &assignment));
    }

    #[test]
    fn empty_clause_never_holds() {
        let formula = formula();
        assert!(!formula.evaluate_clause(&CNFClause::new(), &Assignment::new(2)));
    }

    #[test]
    fn weight_counts_each_satisfied_soft_clause_once() {
        let formula = formula();
        let assignment: Assignment = vec![false, true].into_iter().collect();
        assert_eq!(formula.calculate_weight(&assignment), 5);
        assert!(formula.are_all_satisfied(&assignment));

        let assignment: Assignment = vec![false, false].into_iter().collect();
        assert_eq!(formula.calculate_weight(&assignment), 8);
        assert!(!formula.are_all_satisfied(&assignment));
    }

    #[test]
    fn max_weight_sums_all_soft_clauses() {
        assert_eq!(formula().max_weight(), 8);
    }

    #[test]
    fn rejects_unknown_variables() {
        let result = ClauseSet::with_default_names(1, vec![CNFClause::single(CNFVar::pos(1))], vec![]);
        assert_eq!(result, Err(FormulaError::UnknownVariable { id: 1, num_variables: 1 }));
    }

    #[test]
    fn rejects_weights_adding_up_past_the_limit() {
        let soft = vec![
            SoftClause::new(CNFClause::single(CNFVar::pos(0)), Weight::MAX),
            SoftClause::new(CNFClause::single(CNFVar::neg(0)), 1),
        ];
        assert_eq!(ClauseSet::with_default_names(1, vec![], soft), Err(FormulaError::WeightOverflow));

        let soft = vec![
            SoftClause::new(CNFClause::single(CNFVar::pos(0)), Weight::MAX - 1),
            SoftClause::new(CNFClause::single(CNFVar::neg(0)), 1),
        ];
        assert_eq!(ClauseSet::with_default_names(1, vec![], soft).map(|f| f.max_weight()), Ok(Weight::MAX));
    }

    #[test]
    fn loads_dimacs_as_hard_clauses() {
        let formula = ClauseSet::from_dimacs("p cnf 3 2\n1 -3 0\n2 0\n").unwrap();
        assert_eq!(formula.num_variables(), 3);
        assert_eq!(formula.hard_clauses()[0].vars, vec![CNFVar::pos(0), CNFVar::neg(2)]);
        assert!(formula.soft_clauses().is_empty());
        assert_eq!(formula.name(2), "X3");
    }

    #[test]
    fn displays_in_clause_file_format() {
        assert_eq!(
            formula().to_string(),
            "2 1 2\nX1 X2\nSOFT_CLAUSE ~X1 5\nSOFT_CLAUSE ~X2 3\n"
        );
    }
}
