use clap::{Parser, Subcommand};
use jobhunt_quest::{
    config::{Settings, StoreBackend},
    leaderboard::{open_leaderboard, Leaderboard},
    models::{Availability, LeaderboardEntry, RankStanding, ScoreSummary},
    RankEvaluator, ScoreAggregator, Session,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "jobhunt-quest")]
#[clap(about = "Turn job-hunting activity into points, ranks and rewards", long_about = None)]
struct Cli {
    /// Settings file layered over the built-in defaults
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the actions that earn points
    Actions,

    /// Score this period's activity
    Score {
        /// Action count, e.g. `--set interview=2` (repeatable)
        #[clap(short, long = "set", value_name = "KEY=COUNT")]
        set: Vec<String>,
    },

    /// Draw from the reward gacha
    Gacha {
        /// Number of draws
        #[clap(short, long, default_value = "1")]
        draws: u32,

        /// Seed for a reproducible draw
        #[clap(long)]
        seed: Option<u64>,
    },

    /// Read or submit to the leaderboard
    Leaderboard {
        /// Store backend (memory, sqlite, sheet); overrides settings
        #[clap(long)]
        store: Option<String>,

        #[clap(subcommand)]
        action: LeaderboardCommand,
    },
}

#[derive(Subcommand)]
enum LeaderboardCommand {
    /// Show the full leaderboard
    Show,

    /// Score the given activity and append it under a name
    Submit {
        /// Display name
        #[clap(short, long)]
        name: String,

        /// Action count, e.g. `--set interview=2` (repeatable)
        #[clap(short, long = "set", value_name = "KEY=COUNT")]
        set: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let (settings, from_defaults) = match &cli.config {
        Some(path) => (Settings::from_file(path)?, false),
        None => match Settings::new() {
            Ok(settings) => (settings, false),
            Err(_) => (Settings::default(), true),
        },
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.app.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if from_defaults {
        info!("Using default settings");
    }

    // Validate settings
    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    let evaluator = RankEvaluator::new(settings.ladder()?);

    match cli.command {
        Commands::Actions => {
            println!("\n=== Actions ===");
            for action in settings.catalog()?.iter() {
                println!("  {:<18} {} ({} pt)", action.key, action.label, action.points);
            }
        }

        Commands::Score { set } => {
            let session = build_session(&settings, &set)?;
            print_score(session.summary(), &session.rank(&evaluator));
        }

        Commands::Gacha { draws, seed } => {
            let machine = settings.gacha_machine()?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let mut session = build_session(&settings, &[])?;
            println!("\n=== Gacha ===");
            for _ in 0..draws {
                let pull = session.draw(&machine, &mut rng);
                println!("🎁 [{}] {}: {}", pull.item.rarity, pull.item.name, pull.item.flavor);
            }

            println!("\nRecent pulls:");
            for pull in session.history().recent(settings.gacha.display_limit) {
                println!(
                    "  {} [{}] {}",
                    pull.drawn_at.format("%H:%M:%S"),
                    pull.item.rarity,
                    pull.item.name
                );
            }
        }

        Commands::Leaderboard { store, action } => {
            let backend = match store {
                Some(name) => StoreBackend::from_str(&name)
                    .ok_or_else(|| anyhow::anyhow!("Invalid store backend: {}", name))?,
                None => settings.leaderboard.backend,
            };
            let board = open_leaderboard(backend, &settings.leaderboard).await;

            match action {
                LeaderboardCommand::Show => {
                    print_leaderboard(&board).await;
                }
                LeaderboardCommand::Submit { name, set } => {
                    let session = build_session(&settings, &set)?;
                    let entry = LeaderboardEntry::new(&name, session.total());

                    match board.submit(entry).await {
                        Ok(entry) => {
                            println!("\n✅ Submitted {} with {} pt", entry.name, entry.score);
                            print_leaderboard(&board).await;
                        }
                        Err(e) => {
                            error!("Leaderboard submission failed: {}", e);
                            println!("\n❌ Could not submit your score: {}", e);
                            println!("Your score was not recorded. Please try again later.");
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn build_session(settings: &Settings, pairs: &[String]) -> anyhow::Result<Session> {
    let aggregator = ScoreAggregator::new(settings.catalog()?);
    let mut session = Session::new(aggregator, settings.scoring.max_count);

    for pair in pairs {
        let (key, requested) = parse_count(pair)?;
        let stored = session.set_count(&key, requested)?;
        if stored < requested {
            warn!("Count for {} clamped from {} to {}", key, requested, stored);
        }
    }

    Ok(session)
}

fn parse_count(pair: &str) -> anyhow::Result<(String, u32)> {
    let (key, count) = pair
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Expected KEY=COUNT, got {:?}", pair))?;
    let count = count
        .trim()
        .parse::<u32>()
        .map_err(|e| anyhow::anyhow!("Invalid count for {}: {}", key, e))?;
    Ok((key.trim().to_string(), count))
}

fn print_score(summary: &ScoreSummary, standing: &RankStanding) {
    let tier = &standing.tier;

    println!("\n=== Job Hunt Quest ===");
    println!("Rank: {} ({})  [{}]", tier.name, tier.title, tier.color);
    println!("  {}", tier.comment);
    println!("Points this period: {} pt", summary.total);

    println!("\nBreakdown:");
    if summary.breakdown.is_empty() {
        println!("  Log some activity with --set KEY=COUNT to see where your points come from.");
    } else {
        let shares = summary.breakdown.shares();
        for (entry, (_, share)) in summary.breakdown.iter().zip(shares) {
            println!(
                "  {:<24} x{:<3} {:>5} pt  {:>5.1}%",
                entry.label,
                entry.count,
                entry.points,
                share * 100.0
            );
        }
    }

    let ranked = summary.breakdown.ranked();
    if let Some(top) = ranked.first() {
        println!("\nWhere the points came from:");
        for entry in &ranked {
            let fraction = entry.points as f64 / top.points as f64;
            println!("  {:<24} {} {}", entry.label, points_bar(fraction, 20), entry.points);
        }
    }

    println!("\nProgress:");
    match &standing.progress {
        Some(progress) => {
            println!(
                "  {} {:>3.0}%",
                progress_bar(progress.fraction, 20),
                progress.fraction * 100.0
            );
            println!(
                "  {} pt to {} ({} pt)",
                progress.points_needed, progress.next_name, progress.next_threshold
            );
        }
        None => println!("  {} Top rank reached!", progress_bar(1.0, 20)),
    }
}

fn progress_bar(fraction: f64, width: usize) -> String {
    format!("[{}]", points_bar_with_track(fraction, width, '░'))
}

fn points_bar(fraction: f64, width: usize) -> String {
    points_bar_with_track(fraction, width, ' ')
}

fn points_bar_with_track(fraction: f64, width: usize, track: char) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), track.to_string().repeat(width - filled))
}

async fn print_leaderboard(board: &Leaderboard) {
    let standings = board.standings().await;

    println!("\n=== Leaderboard ({}) ===", board.backend_name());
    if let Availability::Unavailable(reason) = &standings.availability {
        println!("⚠️  Leaderboard is unreachable right now: {}", reason);
        return;
    }

    if standings.is_empty() {
        println!("No entries yet. Be the first!");
        return;
    }

    for row in &standings.rows {
        let score = row
            .score
            .map(|s| format!("{}", s))
            .unwrap_or_else(|| "-".to_string());
        println!("  {:>3}. {:<20} {:>8}", row.rank, row.name, score);
    }
}
