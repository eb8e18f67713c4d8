mod config;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use config::{Config, GenerateConfig, SolveConfig};
use itertools::Itertools;
use maxsat::{
    BacktrackingSolver, ClauseSet, GeneratorParams, Heuristics, MaxSatSolution, TimeLimitedSolver,
    TimedSolver,
};
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;
use std::error::Error;
use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::PathBuf;
use std::process::exit;
use std::time::Duration;

const STDIN_NAME: &str = "<stdin>";

fn make_config() -> Result<Config, Box<dyn Error>> {
    let matches = App::new("weighted-sat")
        .version("1.0")
        .author("Alex&Korbi&Radek inc.")
        .about("Satisfies all your hard constraints and as many of your wishes as possible")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("solve")
                .about("Finds the heaviest assignment satisfying all hard clauses")
                .arg(
                    Arg::with_name("input")
                        .multiple(true)
                        .help("Input files; standard input when none are given"),
                )
                .arg(
                    Arg::with_name("mrv")
                        .long("mrv")
                        .conflicts_with("mcv")
                        .help("Branch on the variable with the fewest consistent values (MRV)"),
                )
                .arg(
                    Arg::with_name("mcv")
                        .long("mcv")
                        .help("Branch on the variable in the most hard clauses (MCV)"),
                )
                .arg(
                    Arg::with_name("lcv")
                        .long("lcv")
                        .help("Try the value violating the fewest hard clauses first (LCV)"),
                )
                .arg(
                    Arg::with_name("dimacs")
                        .long("dimacs")
                        .help("Read DIMACS CNF input (hard clauses only)"),
                )
                .arg(
                    Arg::with_name("time")
                        .short("t")
                        .long("time")
                        .takes_value(true)
                        .help("Timeout for a single instance in seconds"),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .help("File name for output in MaxSAT evaluation format"),
                )
                .arg(
                    Arg::with_name("return_code")
                        .long("return-code")
                        .short("r")
                        .help("Will return 1 if every input is satisfiable and 0 if not (useful for scripting)")
                        .takes_value(false),
                ),
        )
        .subcommand(
            SubCommand::with_name("generate")
                .about("Writes a random formula in the weighted clause-file format")
                .arg(Arg::with_name("variables").required(true).help("Number of variables"))
                .arg(Arg::with_name("hard").required(true).help("Number of hard clauses"))
                .arg(Arg::with_name("soft").required(true).help("Number of soft clauses"))
                .arg(Arg::with_name("max_weight").required(true).help("Largest soft clause weight"))
                .arg(
                    Arg::with_name("seed")
                        .long("seed")
                        .takes_value(true)
                        .help("Seed for reproducible formulae"),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .help("Output file"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("solve", Some(matches)) => Ok(Config::Solve(solve_config(matches)?)),
        ("generate", Some(matches)) => Ok(Config::Generate(generate_config(matches)?)),
        _ => unreachable!(), // already handled by clap
    }
}

fn solve_config(matches: &ArgMatches) -> Result<SolveConfig, Box<dyn Error>> {
    let heuristics = Heuristics::from_flags(
        matches.is_present("mrv"),
        matches.is_present("mcv"),
        matches.is_present("lcv"),
    )?;
    let max_duration = match matches.value_of("time") {
        Some(secs) => Some(Duration::from_secs(secs.parse()?)),
        None => None,
    };

    Ok(SolveConfig {
        inputs: matches.values_of("input")
            .map(|files| files.map(PathBuf::from).collect())
            .unwrap_or_default(),
        dimacs: matches.is_present("dimacs"),
        heuristics,
        max_duration,
        output: matches.value_of("output").map(PathBuf::from),
        return_code: matches.is_present("return_code"),
    })
}

fn generate_config(matches: &ArgMatches) -> Result<GenerateConfig, Box<dyn Error>> {
    let number = |name: &str| -> Result<usize, Box<dyn Error>> {
        Ok(matches.value_of(name).unwrap_or_default().parse()?)
    };
    let params = GeneratorParams::new(
        number("variables")?,
        number("hard")?,
        number("soft")?,
        number("max_weight")? as u64,
    );
    let seed = match matches.value_of("seed") {
        Some(seed) => Some(seed.parse()?),
        None => None,
    };

    Ok(GenerateConfig {
        params,
        seed,
        output: matches.value_of("output").map(PathBuf::from),
    })
}

fn get_input(handle: &mut impl Read) -> io::Result<String> {
    let mut buffer = String::new();
    handle.read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Reads and parses every input; a malformed one only loses its own formula
fn load_formulae(config: &SolveConfig) -> io::Result<Vec<(String, Result<ClauseSet, maxsat::ParseError>)>> {
    let sources = if config.inputs.is_empty() {
        println!("No input file specified. Reading from standard input...");
        vec![(STDIN_NAME.to_string(), get_input(&mut io::stdin())?)]
    } else {
        config.inputs.iter()
            .map(|path| Ok((path.display().to_string(), get_input(&mut File::open(path)?)?)))
            .collect::<io::Result<Vec<_>>>()?
    };

    Ok(sources.into_iter()
        .map(|(name, text)| {
            let formula = if config.dimacs { ClauseSet::from_dimacs(&text) } else { maxsat::parser::parse(&text) };
            (name, formula)
        })
        .collect())
}

fn report(name: &str, formula: &ClauseSet, duration: Duration, solution: &MaxSatSolution, heuristics: &Heuristics) -> String {
    let header = match solution {
        MaxSatSolution::Optimum { weight, .. } => format!("Maximum weight:\n{}", weight),
        MaxSatSolution::Satisfiable { weight, .. } => format!("Best weight before the time limit:\n{}", weight),
        MaxSatSolution::Unsatisfiable | MaxSatSolution::Unknown => return format!("{}\n{}\n", name, solution.display_with(formula)),
    };
    format!(
        "{}\n{}\nExecution time: {:.4}\n\nMCV: {}\nMRV: {}\nLCV: {}\n\n{}",
        name,
        header,
        duration.as_secs_f64(),
        heuristics.uses_mcv(),
        heuristics.uses_mrv(),
        heuristics.uses_lcv(),
        solution.display_with(formula),
    )
}

fn solve(config: SolveConfig) -> Result<(), Box<dyn Error>> {
    let formulae = load_formulae(&config)?;
    let solver = TimedSolver::new(TimeLimitedSolver::new(
        BacktrackingSolver::new(config.heuristics),
        config.max_duration.unwrap_or(Duration::MAX),
    ));

    let results: Vec<_> = formulae
        .into_par_iter()
        .map(|(name, formula)| {
            let solved = formula.map(|formula| {
                log::info!("Solving {}", name);
                let (duration, solution) = solver.solve_timed(&formula);
                (formula, duration, solution)
            });
            (name, solved)
        })
        .collect();

    let mut competition_output = Vec::new();
    let mut outcomes = Vec::with_capacity(results.len());
    for (name, solved) in &results {
        match solved {
            Err(err) => {
                eprintln!("{}: Wrong format! {}", name, err);
                outcomes.push(None);
            },
            Ok((formula, duration, solution)) => {
                println!("{}", report(name, formula, *duration, solution, &config.heuristics));
                competition_output.push(format!("c {}\n{}", name, solution.to_competition_format(formula)));
                outcomes.push(Some(solution));
            },
        }
    }

    if let Some(path) = config.output {
        std::fs::write(path, competition_output.iter().join(""))?;
    }

    match exit_code(config.return_code, &outcomes) {
        0 => Ok(()),
        code => exit(code),
    }
}

/// With `-r`, 1 when every input parsed and is satisfiable; 0 otherwise.
/// Malformed inputs are `None`.
fn exit_code(return_code: bool, outcomes: &[Option<&MaxSatSolution>]) -> i32 {
    let all_sat = outcomes.iter().all(|outcome| outcome.map_or(false, MaxSatSolution::is_sat));
    if return_code && all_sat { 1 } else { 0 }
}

fn generate(config: GenerateConfig) -> Result<(), Box<dyn Error>> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let formula = maxsat::generate(&config.params, &mut rng)?;

    match config.output {
        Some(path) => {
            std::fs::write(&path, formula.to_string())?;
            println!("Test case generated and saved as {}", path.display());
        },
        None => print!("{}", formula),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    match make_config()? {
        Config::Solve(config) => solve(config),
        Config::Generate(config) => generate(config),
    }
}
