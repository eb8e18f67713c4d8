mod time_limited_solver;
mod timed_solver;

pub use time_limited_solver::TimeLimitedSolver;
pub use timed_solver::TimedSolver;
