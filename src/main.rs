use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

use lookahead_2048::game::{self, Game};
use lookahead_2048::search::{Heuristic, SearchConfig, StrategyKind};

#[derive(Debug, Parser)]
#[command(name = "lookahead-2048", version, about = "Watch one lookahead strategy play 2048")]
struct Args {
    /// Strategy to play with: bfs, dfs or astar
    #[arg(short, long, default_value = "bfs")]
    strategy: StrategyKind,

    /// Heuristic for astar: empty_tiles, max_tile, monotonicity or clustering
    #[arg(long, default_value_t = Heuristic::EmptyTiles)]
    heuristic: Heuristic,

    /// Plies to look ahead
    #[arg(long, default_value_t = lookahead_2048::search::DEFAULT_MAX_DEPTH)]
    depth: usize,

    /// Seed the tile spawner for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many moves
    #[arg(long)]
    max_moves: Option<u64>,

    /// Only print the final result
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let kind = args.strategy.with_heuristic(args.heuristic);
    let mut strategy = kind.build(SearchConfig { max_depth: args.depth });
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut game = Game::new(&mut rng);
    if !args.quiet {
        println!("{}", game.board());
    }
    let outcome = game::play_with(&mut game, strategy.as_mut(), &mut rng, args.max_moves, |dir, g| {
        if !args.quiet {
            println!("{dir} -> score {}{}", g.score(), g.board());
        }
    });
    println!(
        "{kind}: final score {} after {} moves (highest tile {}, {:?})",
        outcome.score, outcome.moves, outcome.highest_tile, outcome.end
    );
    Ok(())
}
