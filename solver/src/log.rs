/// Targets for `log` calls, so output can be narrowed with e.g.
/// `RUST_LOG=search=debug`.
pub mod targets {
    pub const SEARCH: &str = "search";
    pub const HEURISTICS: &str = "heuristics";
    pub const PARSER: &str = "parser";
    pub const GENERATOR: &str = "generator";
}
