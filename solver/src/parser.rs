//! Reader for the weighted clause-file format:
//!
//! ```text
//! 3 2 1
//! X1 ~X2
//! X2 X3
//! SOFT_CLAUSE ~X1 ~X3 4
//! ```
//!
//! The header declares the number of variables, hard clauses and soft
//! clauses. Each further line is a hard clause, or a soft clause when it
//! starts with `SOFT_CLAUSE`, in which case its last token is the weight.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::cnf::{CNFClause, CNFVar, ClauseSet, SoftClause, Weight};
use crate::error::ParseError;
use crate::log::targets;

type IndexSet<V> = indexmap::IndexSet<V, std::hash::BuildHasherDefault<rustc_hash::FxHasher>>;

/// First token of every soft clause line
pub const SOFT_CLAUSE_MARKER: &str = "SOFT_CLAUSE";

/// Literal prefix marking negation
pub const NEGATION: char = '~';

/// A literal as written: the variable name and its polarity
type RawLiteral<'a> = (&'a str, bool);

/// Parses a formula in the weighted clause-file format
pub fn parse(input: &str) -> Result<ClauseSet, ParseError> {
    let mut lines = input.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (_, header) = lines.next().ok_or(ParseError::MissingHeader)?;
    let (num_vars, num_hard, num_soft) = parse_header(header)?;

    let mut names: IndexSet<&str> = IndexSet::default();
    let mut hard: Vec<Vec<RawLiteral>> = Vec::new();
    let mut soft: Vec<(Vec<RawLiteral>, Weight)> = Vec::new();

    for (line, text) in lines {
        let mut tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens[0] == SOFT_CLAUSE_MARKER {
            tokens.remove(0);
            let weight_token = tokens.pop().ok_or(ParseError::EmptySoftClause { line })?;
            let weight = weight_token.parse::<Weight>()
                .map_err(|_| ParseError::MalformedWeight { line, token: weight_token.to_string() })?;
            let literals = parse_literals(&tokens, line, &mut names)?;
            if literals.is_empty() {
                return Err(ParseError::EmptySoftClause { line });
            }
            soft.push((literals, weight));
        } else {
            hard.push(parse_literals(&tokens, line, &mut names)?);
        }
    }

    if hard.len() != num_hard {
        return Err(ParseError::HardClauseCount { declared: num_hard, found: hard.len() });
    }
    if soft.len() != num_soft {
        return Err(ParseError::SoftClauseCount { declared: num_soft, found: soft.len() });
    }
    if names.len() != num_vars {
        return Err(ParseError::VariableCount { declared: num_vars, found: names.len() });
    }

    names.sort_by(|a, b| natural_order(a, b));
    let to_clause = |literals: Vec<RawLiteral>| -> CNFClause {
        literals.into_iter()
            .filter_map(|(name, sign)| names.get_full(name).map(|(id, _)| CNFVar::new(id, sign)))
            .collect()
    };
    let hard: Vec<CNFClause> = hard.into_iter().map(|literals| to_clause(literals)).collect();
    let soft: Vec<SoftClause> = soft.into_iter()
        .map(|(literals, weight)| SoftClause::new(to_clause(literals), weight))
        .collect();

    log::debug!(target: targets::PARSER, "Parsed {} variables, {} hard and {} soft clauses",
        names.len(), hard.len(), soft.len());
    let names = names.into_iter().map(String::from).collect();
    Ok(ClauseSet::new(names, hard, soft)?)
}

impl FromStr for ClauseSet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

fn parse_header(header: &str) -> Result<(usize, usize, usize), ParseError> {
    let malformed = || ParseError::MalformedHeader(header.to_string());
    let numbers = header.split_whitespace()
        .map(|token| token.parse::<usize>())
        .collect::<Result<Vec<usize>, _>>()
        .map_err(|_| malformed())?;
    match numbers.as_slice() {
        [vars, hard, soft] => Ok((*vars, *hard, *soft)),
        _ => Err(malformed()),
    }
}

/// Interns the variable names of a clause line. Purely numeric tokens
/// are placeholders and carry no literal, negated or not.
fn parse_literals<'a>(tokens: &[&'a str], line: usize, names: &mut IndexSet<&'a str>) -> Result<Vec<RawLiteral<'a>>, ParseError> {
    let mut literals = Vec::with_capacity(tokens.len());
    for &token in tokens {
        let (name, sign) = match token.strip_prefix(NEGATION) {
            Some(name) => (name, false),
            None => (token, true),
        };
        if name.is_empty() || name.starts_with(NEGATION) {
            return Err(ParseError::MalformedLiteral { line, token: token.to_string() });
        }
        if name.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        names.insert(name);
        literals.push((name, sign));
    }
    Ok(literals)
}

/// Orders `X2` before `X10`: by alphabetic prefix, then numeric suffix,
/// then plain text.
fn natural_order(a: &str, b: &str) -> Ordering {
    fn split(name: &str) -> (&str, Option<u64>) {
        let digits = name.len() - name.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        let (prefix, suffix) = name.split_at(name.len() - digits);
        (prefix, suffix.parse().ok())
    }
    split(a).cmp(&split(b)).then_with(|| a.cmp(b))
}
