extern crate maxsat;

use criterion::{criterion_group, criterion_main, Criterion};
use maxsat::{BacktrackingSolver, ClauseSet, GeneratorParams, Heuristics, Solver, ValueOrdering, VariableOrdering};
use rand::{rngs::StdRng, SeedableRng};

const SEED: u64 = 0x5eed;

fn load_formulae(params: GeneratorParams, count: usize) -> Vec<(String, ClauseSet)> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..count)
        .map(|i| (format!("random-{}", i), maxsat::generate(&params, &mut rng).unwrap()))
        .collect()
}

fn create_group_for_solver(c: &mut Criterion, name: &str, solver: impl Solver, formulae: &[(String, ClauseSet)]) {
    let mut group = c.benchmark_group(name);

    for (name, formula) in formulae {
        group.bench_function(name.as_str(), |b| b.iter(|| solver.solve(formula)));
    }

    group.finish()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut params = GeneratorParams::new(14, 10, 12, 20);
    params.max_clause_len = 4;
    let formulae = load_formulae(params, 4);

    let strategies = [
        ("First unassigned", VariableOrdering::FirstUnassigned),
        ("MCV", VariableOrdering::MostConstraining),
        ("MRV", VariableOrdering::MinimumRemainingValues),
    ];
    for (name, variables) in strategies.iter() {
        create_group_for_solver(c, name,
            BacktrackingSolver::new(Heuristics::new(*variables, ValueOrdering::DomainOrder)), &formulae);
        create_group_for_solver(c, &format!("{} + LCV", name),
            BacktrackingSolver::new(Heuristics::new(*variables, ValueOrdering::LeastConstraining)), &formulae);
    }
}

criterion_group!{
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = criterion_benchmark
}
criterion_main!(benches);
