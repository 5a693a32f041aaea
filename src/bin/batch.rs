use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use lookahead_2048::game::{self, Game, GameOutcome};
use lookahead_2048::search::{SearchConfig, StrategyKind};

#[derive(Debug, Parser)]
#[command(name = "batch", about = "Run every 2048 lookahead strategy repeatedly and compare scores")]
struct Args {
    /// Games to play per strategy
    #[arg(short = 'n', long, default_value_t = 10)]
    runs: u64,

    /// Base seed; run i of every strategy uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Plies to look ahead
    #[arg(long, default_value_t = lookahead_2048::search::DEFAULT_MAX_DEPTH)]
    depth: usize,

    /// Per-game move cap
    #[arg(long)]
    max_moves: Option<u64>,

    /// Only run these strategies (bfs, dfs, astar); astar expands to every heuristic
    #[arg(long, value_delimiter = ',')]
    only: Vec<StrategyKind>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Suppress the progress bar
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Serialize)]
struct StrategyReport {
    strategy: String,
    runs: Vec<GameOutcome>,
    average_score: f64,
    min_score: u64,
    max_score: u64,
}

impl StrategyReport {
    fn new(kind: StrategyKind, runs: Vec<GameOutcome>) -> Self {
        let scores = runs.iter().map(|o| o.score);
        let total: u64 = scores.clone().sum();
        StrategyReport {
            strategy: kind.to_string(),
            average_score: if runs.is_empty() { 0.0 } else { total as f64 / runs.len() as f64 },
            min_score: scores.clone().min().unwrap_or(0),
            max_score: scores.max().unwrap_or(0),
            runs,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let kinds = selected_kinds(&args.only);
    let cfg = SearchConfig { max_depth: args.depth };

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(args.runs * kinds.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} games ({eta}) {msg}")?
                .progress_chars("=>-"),
        );
        pb
    };

    let start = Instant::now();
    let reports: Vec<StrategyReport> = kinds
        .iter()
        .map(|&kind| {
            pb.set_message(kind.to_string());
            let runs: Vec<GameOutcome> = (0..args.runs)
                .into_par_iter()
                .map(|i| {
                    let outcome = run_single_game(kind, cfg, args.seed.wrapping_add(i), args.max_moves);
                    pb.inc(1);
                    outcome
                })
                .collect();
            StrategyReport::new(kind, runs)
        })
        .collect();
    pb.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_report(&reports);
        eprintln!("Finished {} games in {:.1}s", args.runs * kinds.len() as u64, start.elapsed().as_secs_f64());
    }
    Ok(())
}

/// Requested kinds in first-seen order, each at most once; `astar` stands for every heuristic.
fn selected_kinds(only: &[StrategyKind]) -> Vec<StrategyKind> {
    if only.is_empty() {
        return StrategyKind::all();
    }
    let mut kinds = Vec::new();
    for &requested in only {
        let expanded: Vec<StrategyKind> = match requested {
            StrategyKind::AStar(_) => {
                StrategyKind::all().into_iter().filter(|k| matches!(k, StrategyKind::AStar(_))).collect()
            }
            other => vec![other],
        };
        for kind in expanded {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
    }
    kinds
}

fn run_single_game(kind: StrategyKind, cfg: SearchConfig, seed: u64, max_moves: Option<u64>) -> GameOutcome {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new(&mut rng);
    let mut strategy = kind.build(cfg);
    game::play(&mut game, strategy.as_mut(), &mut rng, max_moves)
}

fn print_report(reports: &[StrategyReport]) {
    println!("All Results:");
    for report in reports {
        for (i, run) in report.runs.iter().enumerate() {
            println!(
                "{} - Run {}: Final Score = {} ({} moves, highest tile {}, {:?})",
                report.strategy,
                i + 1,
                run.score,
                run.moves,
                run.highest_tile,
                run.end
            );
        }
    }
    println!("\nAverage Scores:");
    for report in reports {
        println!(
            "{}: Average Score = {:.2} (min {}, max {})",
            report.strategy, report.average_score, report.min_score, report.max_score
        );
    }
}
