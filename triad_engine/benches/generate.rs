// Benchmarks for eligible-set enumeration and full pattern generation.
//
// Both are tiny (at most 27 cells), so these mainly guard against
// accidental quadratic behavior in coverage refills on long chains.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use triad_engine::{EligibleSet, GeneratorConstraints, PatternEngine, PatternRequest, PhraseType};
use triad_prng::TriadRng;

fn bench_enumerate(c: &mut Criterion) {
    let constraints = GeneratorConstraints::full_kit();
    c.bench_function("enumerate_full_kit", |b| {
        b.iter(|| EligibleSet::enumerate(black_box(&constraints)))
    });
}

fn bench_generate(c: &mut Criterion) {
    let mut engine = PatternEngine::new();
    let genre = engine.genre("metal").unwrap();
    let single = PatternRequest::new(genre.clone()).with_coverage(true);
    let chain = PatternRequest::new(genre)
        .with_coverage(true)
        .with_phrase(PhraseType::Chain)
        .with_chain_cells(64);
    let mut rng = TriadRng::new(42);

    c.bench_function("generate_single_coverage", |b| {
        b.iter(|| engine.generate_next_with_rng(black_box(&single), &mut rng))
    });
    c.bench_function("generate_chain_64_coverage", |b| {
        b.iter(|| engine.generate_next_with_rng(black_box(&chain), &mut rng))
    });
}

criterion_group!(benches, bench_enumerate, bench_generate);
criterion_main!(benches);
