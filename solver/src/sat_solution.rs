use std::fmt::{self, Write as FmtWrite};
use crate::{ClauseSet, Valuation, Weight};

const MAX_LITERALS_PER_LINE: usize = 8;

/// Outcome of a MAX-SAT search
#[derive(Clone, PartialEq, Eq)]
pub enum MaxSatSolution {
    /// The search ran to completion; no assignment is heavier
    Optimum { valuation: Valuation, weight: Weight },
    /// The search was interrupted; this is the best assignment seen
    Satisfiable { valuation: Valuation, weight: Weight },
    /// No assignment satisfies the hard clauses
    Unsatisfiable,
    /// The search was interrupted before any assignment was found
    Unknown,
}

impl MaxSatSolution {
    pub fn is_optimum(&self) -> bool {
        match self {
            MaxSatSolution::Optimum { .. } => true,
            _                              => false,
        }
    }

    /// Whether some assignment satisfying all hard clauses was found
    pub fn is_sat(&self) -> bool {
        self.valuation().is_some()
    }

    pub fn is_unsat(&self) -> bool {
        match self {
            MaxSatSolution::Unsatisfiable => true,
            _                             => false,
        }
    }

    pub fn is_unknown(&self) -> bool {
        match self {
            MaxSatSolution::Unknown => true,
            _                       => false,
        }
    }

    pub fn weight(&self) -> Option<Weight> {
        match self {
            MaxSatSolution::Optimum { weight, .. }
            | MaxSatSolution::Satisfiable { weight, .. } => Some(*weight),
            _ => None,
        }
    }

    pub fn valuation(&self) -> Option<&Valuation> {
        match self {
            MaxSatSolution::Optimum { valuation, .. }
            | MaxSatSolution::Satisfiable { valuation, .. } => Some(valuation),
            _ => None,
        }
    }

    /// Splits into the best assignment (if any) and its weight
    pub fn into_parts(self) -> (Option<Valuation>, Weight) {
        match self {
            MaxSatSolution::Optimum { valuation, weight }
            | MaxSatSolution::Satisfiable { valuation, weight } => (Some(valuation), weight),
            _ => (None, 0),
        }
    }

    /// Lists every variable by name, `X1 = true` per line, in index order
    pub fn display_with<'a>(&'a self, formula: &'a ClauseSet) -> NamedSolution<'a> {
        NamedSolution { solution: self, formula }
    }

    /// Renders the solution the way MaxSAT evaluations expect it:
    /// the cost of falsified soft clauses, a status line and value lines.
    pub fn to_competition_format(&self, formula: &ClauseSet) -> String {
        let mut out = String::new();
        if let Some(weight) = self.weight() {
            out.push_str(&format!("o {}\n", formula.max_weight() - weight));
        }
        out.push_str(match self {
            MaxSatSolution::Optimum { .. }     => "s OPTIMUM FOUND\n",
            MaxSatSolution::Satisfiable { .. } => "s SATISFIABLE\n",
            MaxSatSolution::Unsatisfiable      => "s UNSATISFIABLE\n",
            MaxSatSolution::Unknown            => "s UNKNOWN\n",
        });
        if let Some(valuation) = self.valuation() {
            let mut iter = valuation.iter().enumerate().peekable();
            while iter.peek().is_some() {
                out.push('v');
                for (id, sign) in iter.by_ref().take(MAX_LITERALS_PER_LINE) {
                    // writing to a String cannot fail
                    let _ = write!(&mut out, " {}{}", if *sign { "" } else { "-" }, id + 1);
                }
                out.push('\n');
            }
        }
        out
    }
}

/// Solution paired with the formula that names its variables
pub struct NamedSolution<'a> {
    solution: &'a MaxSatSolution,
    formula: &'a ClauseSet,
}

impl fmt::Display for NamedSolution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.solution.valuation() {
            None => write!(f, "No solution found."),
            Some(valuation) => {
                for (var, value) in valuation.iter().enumerate() {
                    writeln!(f, "{} = {}", self.formula.name(var), value)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for MaxSatSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for MaxSatSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxSatSolution::Unsatisfiable => write!(f, "Unsatisfiable"),
            MaxSatSolution::Unknown => write!(f, "Unknown"),
            MaxSatSolution::Optimum { valuation, weight }
            | MaxSatSolution::Satisfiable { valuation, weight } => {
                let status = if self.is_optimum() { "Optimum" } else { "Satisfiable" };
                write!(f, "{} (weight {}):", status, weight)?;
                for (id, sign) in valuation.iter().enumerate() {
                    write!(f, " {}{}", if *sign { "" } else { "-" }, id + 1)?;
                }
                Ok(())
            }
        }
    }
}
