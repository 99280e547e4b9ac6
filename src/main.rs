use std::fmt::Display;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ttt_solver::min_max::cache::{Cache, HashMapCache, NullCache};
use ttt_solver::min_max::stats::SearchStats;
use ttt_solver::min_max::{pick_best, to_score_board};
use ttt_solver::{Board, Mark, Roles, ScoredMove, SearchError, Searcher};

/// Prints the optimal move for the automated player on a tic-tac-toe board.
#[derive(Parser, Debug)]
#[command(name = "ttt-solver", version, about, long_about = None)]
struct Cli {
    /// Nine cells in row-major order, e.g. `X.O/.X./...` (`.` or a digit is empty)
    board: String,

    /// Mark played by the automated player
    #[arg(short, long, default_value = "X")]
    maximizer: Mark,

    /// Also print the score of every legal move
    #[arg(short, long)]
    scores: bool,

    /// Keep a transposition cache during the search
    #[arg(long)]
    cache: bool,
}

struct Report {
    best: ScoredMove,
    scored: Vec<ScoredMove>,
    stats: SearchStats,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut board: Board = cli.board.parse()
        .with_context(|| format!("invalid board '{}'", cli.board))?;
    let roles = Roles::with_maximizer(cli.maximizer);

    println!("{board}");
    println!();
    let outcome = roles.outcome(&board);
    println!("outcome: {outcome}");

    let report = if cli.cache {
        search(Searcher::with(HashMapCache::<Board>::default(), SearchStats::default()), &mut board, roles)?
    } else {
        search(Searcher::with(NullCache, SearchStats::default()), &mut board, roles)?
    };
    info!(stats = ?report.stats, "searched {} moves", report.scored.len());

    // positions are shown 1-9
    println!("best move for {}: {} (score {})", roles.maximizer(), report.best.min_max_move + 1, report.best.score);
    if cli.scores {
        println!();
        let scores = to_score_board(&report.scored)
            .map(|score| score.map_or_else(|| "-".to_string(), |score| score.to_string()));
        print_3_by_3(&scores);
    }
    Ok(())
}

fn search<C: Cache<Board>>(mut searcher: Searcher<C, SearchStats>, board: &mut Board, roles: Roles) -> Result<Report> {
    let scored = searcher.score_possible_moves(board, roles).context("search failed")?;
    let best = pick_best(&scored)
        .ok_or_else(|| SearchError::GameOver(roles.outcome(board)))
        .context("search failed")?;
    Ok(Report { best, scored, stats: *searcher.stats() })
}

fn print_3_by_3<E: Display>(scored_board: &[E; 9]) {
    println!("{:>3} {:>3} {:>3}", scored_board[0], scored_board[1], scored_board[2]);
    println!("{:>3} {:>3} {:>3}", scored_board[3], scored_board[4], scored_board[5]);
    println!("{:>3} {:>3} {:>3}", scored_board[6], scored_board[7], scored_board[8]);
}
