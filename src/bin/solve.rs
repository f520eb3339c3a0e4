use clap::{Parser, ValueEnum};
use queens_solver::engine::{Placement, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use queens_solver::heuristics::{GlobalThreats, Heuristic, LocalThreats};
use queens_solver::solver::{BeamSearch, Solver, TabuSearch};
use queens_solver::utils::placement_from_str;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SolverKind {
    Beam,
    Tabu,
}

impl SolverKind {
    fn build(self) -> Box<dyn Solver> {
        match self {
            SolverKind::Beam => Box::new(BeamSearch::new()),
            SolverKind::Tabu => Box::new(TabuSearch::new()),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeuristicKind {
    Local,
    Global,
}

impl HeuristicKind {
    fn build(self) -> Box<dyn Heuristic> {
        match self {
            HeuristicKind::Local => Box::new(LocalThreats),
            HeuristicKind::Global => Box::new(GlobalThreats),
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Board size (one queen per column)
    #[clap(short = 'n', long, default_value_t = 8)]
    size: usize,

    /// Search algorithm
    #[clap(short, long, value_enum, default_value = "beam")]
    solver: SolverKind,

    /// Heuristic used to score candidate states
    #[clap(long, value_enum, default_value = "global")]
    heuristic: HeuristicKind,

    /// Solver parameter (beam width or tabu capacity); solver default when omitted
    #[clap(short, long)]
    param: Option<i64>,

    /// Seed for the random initial placement and the beam seeding step
    #[clap(long)]
    seed: Option<u64>,

    /// Starting placement as row indices, e.g. "1,3,0,2"; overrides --size
    #[clap(long)]
    placement: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let solver = args.solver.build();
    let heuristic = args.heuristic.build();

    let mut param = solver.default_param();
    if let Some(value) = args.param {
        param
            .set_value(value)
            .expect("solver parameter out of range");
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = SmallRng::seed_from_u64(seed);

    let initial = match &args.placement {
        Some(text) => placement_from_str(text).expect("invalid starting placement"),
        None => {
            if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&args.size) {
                eprintln!(
                    "Board size must be between {} and {}, got {}",
                    MIN_BOARD_SIZE, MAX_BOARD_SIZE, args.size
                );
                std::process::exit(2);
            }
            Placement::random(args.size, &mut rng)
        }
    };

    println!(
        "{} ({} = {}), {} heuristic, seed {}\n",
        solver.name(),
        param.name(),
        param.value(),
        heuristic.name(),
        seed
    );
    println!(
        "Initial placement (score {}):\n{}\n",
        heuristic.evaluate_board(&initial),
        initial
    );

    let solution = solver.solve(&initial, &param, heuristic.as_ref(), &mut rng);

    match &solution.placement {
        Some(placement) => println!("Solved:\n{}\n", placement),
        None => println!("Did not converge.\n"),
    }
    println!("Elapsed: {:?}", solution.elapsed);
    println!("Generated states: {}", solution.generated_states);
}
