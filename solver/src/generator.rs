use rand::Rng;
use rand::seq::SliceRandom;
use itertools::Itertools;

use crate::cnf::{default_names, CNFClause, CNFVar, ClauseSet, SoftClause, VarId, Weight};
use crate::error::ConfigError;
use crate::log::targets;

/// Shape of a random weighted formula
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorParams {
    pub num_variables: usize,
    pub num_hard_clauses: usize,
    pub num_soft_clauses: usize,
    /// Soft weights are drawn from `1..=max_weight`
    pub max_weight: Weight,
    /// Upper bound of random literal draws per clause
    pub max_clause_len: usize,
}

impl GeneratorParams {
    pub fn new(num_variables: usize, num_hard_clauses: usize, num_soft_clauses: usize, max_weight: Weight) -> GeneratorParams {
        GeneratorParams {
            num_variables,
            num_hard_clauses,
            num_soft_clauses,
            max_weight,
            max_clause_len: 15,
        }
    }

    /// Rejects shapes whose output would not read back: variables with no
    /// clause to appear in, clauses with no variable to draw from, and
    /// weights that could add up past `Weight::MAX`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let num_clauses = self.num_hard_clauses + self.num_soft_clauses;
        if self.num_variables > 0 && num_clauses == 0 {
            return Err(ConfigError::VariablesWithoutClauses { num_variables: self.num_variables });
        }
        if self.num_variables == 0 && num_clauses > 0 {
            return Err(ConfigError::ClausesWithoutVariables { num_clauses });
        }
        if (self.num_soft_clauses as Weight).checked_mul(self.max_weight.max(1)).is_none() {
            return Err(ConfigError::GeneratorWeightOverflow);
        }
        Ok(())
    }
}

/// Creates a random formula. Every variable shows up in at least one
/// clause: a hard one when there are any, a soft one otherwise.
/// Repeated literals within a clause collapse into one.
pub fn generate<R: Rng + ?Sized>(params: &GeneratorParams, rng: &mut R) -> Result<ClauseSet, ConfigError> {
    params.validate()?;

    let variables: Vec<VarId> = (0..params.num_variables).collect();
    let mut hard = vec![Vec::new(); params.num_hard_clauses];
    let mut soft = vec![Vec::new(); params.num_soft_clauses];

    let anchors = if hard.is_empty() { &mut soft } else { &mut hard };
    for &var in &variables {
        let clause = rng.gen_range(0, anchors.len());
        anchors[clause].push(random_literal(var, rng));
    }

    for clause in hard.iter_mut().chain(soft.iter_mut()) {
        clause.extend(random_literals(&variables, params.max_clause_len, rng));
    }

    let hard: Vec<CNFClause> = hard.into_iter()
        .map(|literals| literals.into_iter().unique().collect())
        .collect();
    let soft: Vec<SoftClause> = soft.into_iter()
        .map(|literals| {
            let clause = literals.into_iter().unique().collect();
            SoftClause::new(clause, rng.gen_range(0, params.max_weight.max(1)) + 1)
        })
        .collect();

    log::debug!(target: targets::GENERATOR, "Generated {} variables, {} hard and {} soft clauses",
        params.num_variables, hard.len(), soft.len());

    Ok(ClauseSet::from_trusted_parts(default_names(params.num_variables), hard, soft))
}

fn random_literal<R: Rng + ?Sized>(var: VarId, rng: &mut R) -> CNFVar {
    CNFVar::new(var, rng.gen_bool(0.5))
}

fn random_literals<R: Rng + ?Sized>(variables: &[VarId], max_len: usize, rng: &mut R) -> Vec<CNFVar> {
    if variables.is_empty() {
        return Vec::new();
    }
    let len = rng.gen_range(1, max_len.max(1) + 1);
    (0..len)
        .filter_map(|_| {
            let var = *variables.choose(rng)?;
            Some(random_literal(var, rng))
        })
        .unique()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn mentioned(clauses: impl Iterator<Item = CNFClause>) -> usize {
        clauses.flat_map(|clause| clause.vars.into_iter().map(|literal| literal.id))
            .unique()
            .count()
    }

    #[test]
    fn mentions_every_variable() {
        let mut rng = StdRng::seed_from_u64(7);
        let formula = generate(&GeneratorParams::new(20, 5, 3, 10), &mut rng).unwrap();
        assert_eq!(mentioned(formula.hard_clauses().iter().cloned()), 20);
        assert_eq!(formula.hard_clauses().len(), 5);
        assert_eq!(formula.soft_clauses().len(), 3);
        assert!(formula.soft_clauses().iter().all(|soft| (1..=10).contains(&soft.weight)));
    }

    #[test]
    fn soft_clauses_carry_the_variables_without_hard_clauses() {
        let mut rng = StdRng::seed_from_u64(11);
        let formula = generate(&GeneratorParams::new(10, 0, 2, 5), &mut rng).unwrap();
        assert!(formula.hard_clauses().is_empty());
        assert_eq!(mentioned(formula.soft_clauses().iter().map(|soft| soft.clause.clone())), 10);
    }

    #[test]
    fn same_seed_same_formula() {
        let params = GeneratorParams::new(8, 4, 4, 5);
        let first = generate(&params, &mut StdRng::seed_from_u64(42));
        let second = generate(&params, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn output_parses_back() {
        let shapes = [(12, 6, 6), (12, 0, 4), (12, 4, 0), (10, 0, 1), (0, 0, 0)];
        for (shape, &(variables, hard, soft)) in shapes.iter().enumerate() {
            let first_seed = shape as u64 * 100;
            for seed in first_seed..first_seed + 20 {
                let params = GeneratorParams::new(variables, hard, soft, 9);
                let formula = generate(&params, &mut StdRng::seed_from_u64(seed)).unwrap();
                assert_eq!(crate::parser::parse(&formula.to_string()), Ok(formula));
            }
        }
    }

    #[test]
    fn rejects_shapes_that_cannot_read_back() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            generate(&GeneratorParams::new(10, 0, 0, 5), &mut rng),
            Err(ConfigError::VariablesWithoutClauses { num_variables: 10 })
        );
        assert_eq!(
            generate(&GeneratorParams::new(0, 2, 1, 5), &mut rng),
            Err(ConfigError::ClausesWithoutVariables { num_clauses: 3 })
        );
        assert_eq!(
            generate(&GeneratorParams::new(2, 1, 2, Weight::MAX), &mut rng),
            Err(ConfigError::GeneratorWeightOverflow)
        );
    }
}
