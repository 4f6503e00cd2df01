// Triad practice generator: CLI entry point.
//
// Prints a run of generated sticking patterns for one genre, with accented
// strokes upper-cased in the sticking row.
//
// Usage:
//   cargo run -p triad_engine -- [--genre ID] [--phrase single|two|chain]
//     [--chain N] [--repeats N] [--accent off|cell|N] [--seed N]
//     [--count N] [--coverage] [--json]
//
// Diagnostics go through tracing; set RUST_LOG=triad_engine=debug to watch
// coverage rebuilds.

use tracing_subscriber::EnvFilter;
use triad_engine::accent::AccentRule;
use triad_engine::genre::PhraseType;
use triad_engine::orchestration::OrchestrationPreset;
use triad_engine::pattern::{Pattern, PatternRequest};
use triad_engine::{Limb, PatternEngine};
use triad_prng::TriadRng;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("triad_engine=info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let genre_id: String = parse_flag(&args, "--genre").unwrap_or_else(|| "rudiments".to_string());
    let count: usize = parse_flag(&args, "--count").unwrap_or(8);
    let seed: Option<u64> = parse_flag(&args, "--seed");
    let coverage = args.iter().any(|a| a == "--coverage");
    let json = args.iter().any(|a| a == "--json");

    let mut engine = PatternEngine::new();
    let genre = match engine.genre(&genre_id) {
        Ok(g) => g,
        Err(e) => {
            let known: Vec<&str> = engine.genres().ids().collect();
            eprintln!("{e}. Known genres: {}", known.join(", "));
            std::process::exit(1);
        }
    };

    let mut request = PatternRequest::new(genre).with_coverage(coverage);
    if let Some(p) = parse_flag::<String>(&args, "--phrase") {
        match PhraseType::from_tag(&p) {
            Some(p) => request = request.with_phrase(p),
            None => eprintln!("Unknown phrase type '{p}'. Using genre default."),
        }
    }
    if let Some(n) = parse_flag(&args, "--chain") {
        request = request.with_chain_cells(n);
    }
    if let Some(n) = parse_flag(&args, "--repeats") {
        request = request.with_repeats(n);
    }
    if let Some(a) = parse_flag::<String>(&args, "--accent") {
        match AccentRule::from_flag(&a) {
            Some(a) => request = request.with_accent(a),
            None => eprintln!("Unknown accent '{a}'. Using genre default."),
        }
    }

    // One stream for the whole run so a seeded run is reproducible end to end.
    let mut rng = match seed {
        Some(s) => TriadRng::new(s),
        None => TriadRng::from_entropy(),
    };

    if !json {
        let name = engine
            .genres()
            .get(&genre_id)
            .map(|g| g.name.as_str())
            .unwrap_or(&genre_id);
        println!("=== Triad Practice: {name} ===");
        if let Some(s) = seed {
            println!("Seed: {s}");
        }
        println!();
    }

    for i in 0..count {
        let result = engine.generate_next_with_rng(&request, &mut rng);
        if json {
            match serde_json::to_string(&result.pattern) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    eprintln!("Error serializing pattern: {e}");
                    std::process::exit(1);
                }
            }
        } else {
            print_pattern(i + 1, &result.pattern);
            println!("    coverage: {} left", result.coverage.remaining().len());
        }
    }
}

fn print_pattern(n: usize, pattern: &Pattern) {
    println!("[{n}] {}", pattern.id());
    let sticking: String = pattern
        .phrase()
        .iter()
        .flat_map(|c| c.limbs())
        .enumerate()
        .map(|(i, limb)| {
            let g = limb.glyph();
            if pattern.is_accented(i) { g } else { g.to_ascii_lowercase() }
        })
        .collect();
    println!("    sticking: {sticking}");
    if let Some(orch) = OrchestrationPreset::builtin(pattern.orchestration()) {
        let voices: Vec<String> = Limb::ALL
            .iter()
            .map(|&l| format!("{}={}", l.glyph(), orch.voice(l)))
            .collect();
        println!("    voices:   {}", voices.join(" "));
    }
    let counts = pattern.limb_counts();
    println!("    strokes:  R{} L{} K{}", counts.right, counts.left, counts.kick);
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
