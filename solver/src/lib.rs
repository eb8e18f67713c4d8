/// The weighted formula: hard clauses, soft clauses and their evaluation
pub mod cnf;
/// Partial assignments with scoped assign/unassign
pub mod assignment;
/// The Solver traits which have to be implemented by each solver
pub mod sat_solver;
/// Module that specifies the output of a solver
mod sat_solution;
/// Hard clauses indexed by the variables they mention
pub mod constraint_index;
/// Variable and value ordering heuristics for the [`BacktrackingSolver`].
pub mod branching_strategy;
/// Module that contains the backtracking branch-and-bound solver
mod backtracking;
pub mod bruteforce;
/// Wrappers adding time measurement and time limits to a solver.
pub mod solvers;
/// Reader for the weighted clause-file format
pub mod parser;
/// Random formulae for testing and benchmarking
pub mod generator;
pub mod error;
pub mod log;

pub use cnf::{CNFClause, CNFVar, ClauseSet, SoftClause, VarId, Weight};
pub use assignment::{Assignment, Valuation};
pub use sat_solver::{InterruptibleSolver, Solver};
pub use sat_solution::{MaxSatSolution, NamedSolution};
pub use branching_strategy::{Heuristics, ValueOrdering, VariableOrdering};
pub use backtracking::{BacktrackingSolver, SearchStats};
pub use bruteforce::Bruteforce;
pub use solvers::{TimeLimitedSolver, TimedSolver};
pub use generator::{generate, GeneratorParams};
pub use error::{ConfigError, FormulaError, ParseError};
