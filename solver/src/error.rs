use std::fmt;
use crate::cnf::{VarId, Weight};

/// Reasons a clause file or DIMACS instance is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input has no header line at all
    MissingHeader,
    /// The header is not three non-negative integers
    MalformedHeader(String),
    /// A soft clause line does not end with a non-negative integer
    MalformedWeight { line: usize, token: String },
    /// A soft clause line has a marker and weight but no literals
    EmptySoftClause { line: usize },
    /// A literal token is empty after stripping the negation prefix
    MalformedLiteral { line: usize, token: String },
    HardClauseCount { declared: usize, found: usize },
    SoftClauseCount { declared: usize, found: usize },
    VariableCount { declared: usize, found: usize },
    Dimacs(String),
    /// DIMACS input that is not in `p cnf` form
    UnsupportedDimacs,
    Formula(FormulaError),
}

/// Inconsistencies in a formula built directly from clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaError {
    UnknownVariable { id: VarId, num_variables: usize },
    /// The soft weights add up to more than a `Weight` can hold
    WeightOverflow,
}

/// Solver configurations that cannot be honoured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Minimum-remaining-values and most-constraining-variable both requested
    ConflictingVariableOrdering,
    /// Generator asked for variables but no clause to put them in
    VariablesWithoutClauses { num_variables: usize },
    /// Generator asked for clauses but no variables to fill them with
    ClausesWithoutVariables { num_clauses: usize },
    /// Generated soft weights could add up past `Weight::MAX`
    GeneratorWeightOverflow,
}

impl From<FormulaError> for ParseError {
    fn from(value: FormulaError) -> Self {
        ParseError::Formula(value)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingHeader => write!(f, "missing header line"),
            ParseError::MalformedHeader(line) =>
                write!(f, "expected `<variables> <hard clauses> <soft clauses>`, found `{}`", line),
            ParseError::MalformedWeight { line, token } =>
                write!(f, "line {}: `{}` is not a valid weight", line, token),
            ParseError::EmptySoftClause { line } =>
                write!(f, "line {}: soft clause without literals", line),
            ParseError::MalformedLiteral { line, token } =>
                write!(f, "line {}: `{}` is not a valid literal", line, token),
            ParseError::HardClauseCount { declared, found } =>
                write!(f, "{} hard clauses declared, {} found", declared, found),
            ParseError::SoftClauseCount { declared, found } =>
                write!(f, "{} soft clauses declared, {} found", declared, found),
            ParseError::VariableCount { declared, found } =>
                write!(f, "{} variables declared, {} found", declared, found),
            ParseError::Dimacs(reason) => write!(f, "DIMACS parse error: {}", reason),
            ParseError::UnsupportedDimacs => write!(f, "only CNF formulae are supported"),
            ParseError::Formula(err) => write!(f, "{}", err),
        }
    }
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaError::UnknownVariable { id, num_variables } =>
                write!(f, "literal references variable {} of {}", id, num_variables),
            FormulaError::WeightOverflow =>
                write!(f, "soft clause weights add up to more than {}", Weight::MAX),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ConflictingVariableOrdering =>
                write!(f, "MRV and MCV cannot be used together"),
            ConfigError::VariablesWithoutClauses { num_variables } =>
                write!(f, "{} variables need at least one clause to appear in", num_variables),
            ConfigError::ClausesWithoutVariables { num_clauses } =>
                write!(f, "{} clauses need at least one variable", num_clauses),
            ConfigError::GeneratorWeightOverflow =>
                write!(f, "soft clause weights could add up to more than {}", Weight::MAX),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Formula(err) => Some(err),
            _ => None,
        }
    }
}

impl std::error::Error for FormulaError {}

impl std::error::Error for ConfigError {}
