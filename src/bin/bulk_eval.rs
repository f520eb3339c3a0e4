use clap::Parser;
use queens_solver::engine::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use queens_solver::heuristics::{GlobalThreats, Heuristic, LocalThreats};
use queens_solver::solver::{BeamSearch, Solver, TabuSearch};
use queens_solver::stats::BulkRunner;
use std::cmp::Ordering;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Board size for the random initial placements
    #[clap(short = 'n', long, default_value_t = 8)]
    size: usize,

    /// Iterations per solver/heuristic combination
    #[clap(short, long, default_value_t = 100)]
    iterations: u64,

    /// Parameter override applied to every solver; solver defaults when omitted
    #[clap(short, long)]
    param: Option<i64>,

    /// Base seed; each combination offsets it so runs stay reproducible
    #[clap(long, default_value_t = 0)]
    seed: u64,
}

struct ComboSummary {
    label: String,
    pass_rate: f64,
    mean_duration: Option<Duration>,
    mean_generated: Option<f64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&args.size) {
        eprintln!(
            "Board size must be between {} and {}, got {}",
            MIN_BOARD_SIZE, MAX_BOARD_SIZE, args.size
        );
        std::process::exit(2);
    }

    let solvers: Vec<Box<dyn Solver>> = vec![Box::new(BeamSearch::new()), Box::new(TabuSearch::new())];
    let heuristics: Vec<Box<dyn Heuristic>> = vec![Box::new(LocalThreats), Box::new(GlobalThreats)];

    println!(
        "Running {} iterations per combination on {}x{} boards...",
        args.iterations, args.size, args.size
    );

    let mut summaries: Vec<ComboSummary> = Vec::new();
    let mut combo_index = 0u64;

    for solver in &solvers {
        for heuristic in &heuristics {
            let mut param = solver.default_param();
            if let Some(value) = args.param {
                param
                    .set_value(value)
                    .expect("solver parameter out of range");
            }

            let mut runner = BulkRunner::new(args.size, args.seed.wrapping_add(combo_index));
            combo_index += 1;

            for _ in 0..args.iterations {
                runner.run_iteration(solver.as_ref(), &param, heuristic.as_ref());
            }

            let label = format!("{} / {}", solver.name(), heuristic.name());
            println!(
                "  {:<32} passed {:>4} of {}",
                label,
                runner.passed(),
                runner.iterations()
            );

            summaries.push(ComboSummary {
                label,
                pass_rate: runner.passed() as f64 / runner.iterations() as f64,
                mean_duration: runner.mean_duration(),
                mean_generated: runner.mean_generated(),
            });
        }
    }

    // Best-performing combination first.
    summaries.sort_by(|a, b| {
        b.pass_rate
            .partial_cmp(&a.pass_rate)
            .unwrap_or(Ordering::Equal)
    });

    println!("\n--- Pass Rates ---");
    for summary in summaries {
        match (summary.mean_duration, summary.mean_generated) {
            (Some(duration), Some(generated)) => println!(
                "{:<32} {:>5.1}%  (mean {:?}, mean states {:.0})",
                summary.label,
                summary.pass_rate * 100.0,
                duration,
                generated
            ),
            _ => println!(
                "{:<32} {:>5.1}%  (no passing runs)",
                summary.label,
                summary.pass_rate * 100.0
            ),
        }
    }
}
