//! Streakd - Steam achievement streak tracker. Main entry point.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use streakd_domain::{Achievement, AppId, CompletionOutcome, SteamId, StreakStatus};
use streakd_engine::app::App;
use streakd_engine::infrastructure::clock::{SystemClock, SystemRandom};
use streakd_engine::infrastructure::ports::RandomPort;
use streakd_engine::infrastructure::persistence::SqliteUserStore;
use streakd_engine::infrastructure::steam::SteamClient;

/// App ids of well-known games, used when `challenge` is run without a game.
const POPULAR_APP_IDS: [u32; 10] = [620, 292030, 367520, 504230, 413150, 440, 730, 570, 550, 105600];

#[derive(Parser)]
#[command(name = "streakd", about = "Steam achievement streak tracker", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every achievement a game defines.
    Catalog {
        #[arg(long)]
        app_id: AppId,
    },
    /// Pick a random achievement to attempt; a random popular game if none given.
    Challenge {
        #[arg(long)]
        app_id: Option<AppId>,
    },
    /// Pick a random achievement the player has already unlocked in a game.
    Unlocked {
        #[arg(long)]
        steam_id: SteamId,
        #[arg(long)]
        app_id: AppId,
    },
    /// Record a confirmed achievement completion and advance the streak.
    Complete {
        #[arg(long)]
        steam_id: SteamId,
        /// Display name hint, used only when the record is first created.
        #[arg(long)]
        name: Option<String>,
    },
    /// Show streak statistics.
    Status {
        #[arg(long)]
        steam_id: SteamId,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "streakd_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let source = SteamClient::from_env()
        .map_err(|_| anyhow::anyhow!("STEAM_API_KEY is not set (add it to .env)"))?;
    let db_path = std::env::var("STREAK_DB").unwrap_or_else(|_| "streaks.db".into());

    let store = Arc::new(SqliteUserStore::new(&db_path).await?);
    let source = Arc::new(source);
    let random = Arc::new(SystemRandom::new());
    let app = App::new(store, source, Arc::new(SystemClock::new()), random.clone());

    match cli.command {
        Command::Catalog { app_id } => {
            let catalog = app.achievements.catalog(app_id).await?;
            if catalog.is_empty() {
                println!("No achievements found for app {app_id}.");
                return Ok(());
            }
            println!("Achievements for app {app_id} ({} total):", catalog.len());
            for (i, achievement) in catalog.iter().enumerate() {
                println!("{}. {}", i + 1, achievement.display_name);
                if !achievement.description.is_empty() {
                    println!("   {}", achievement.description);
                }
            }
        }
        Command::Challenge { app_id } => {
            let app_id = match app_id {
                Some(id) => id,
                None => {
                    let pick = POPULAR_APP_IDS[random.pick_index(POPULAR_APP_IDS.len())];
                    let id = AppId::new(pick)?;
                    println!("Randomly selected game with app id {id}.");
                    id
                }
            };
            match app.achievements.pick_random(app_id, None).await? {
                Some(achievement) => print_achievement("Your challenge", &achievement),
                None => println!("No achievements found for app {app_id}."),
            }
        }
        Command::Unlocked { steam_id, app_id } => {
            match app.achievements.pick_random(app_id, Some(&steam_id)).await? {
                Some(achievement) => print_achievement("Random unlocked achievement", &achievement),
                None => println!("No unlocked achievements found for this player."),
            }
        }
        Command::Complete { steam_id, name } => {
            app.streak
                .get_or_create
                .execute(&steam_id, name.as_deref())
                .await?;
            let result = app.streak.record_completion.execute(&steam_id).await?;

            match result.outcome {
                CompletionOutcome::FirstCompletion => {
                    println!("Congratulations, you've completed your first achievement!");
                    println!("Current streak: 1 day");
                }
                CompletionOutcome::AlreadyCompletedToday { hours_since } => {
                    println!("Achievement completed!");
                    println!("Already completed one today ({hours_since:.1} hours ago).");
                    println!(
                        "Current streak remains {} days. Come back tomorrow to continue it.",
                        result.record.current_streak
                    );
                }
                CompletionOutcome::StreakExtended { current, longest } => {
                    println!("Achievement completed!");
                    println!("Streak increased to {current} days (longest: {longest}).");
                }
                CompletionOutcome::StreakReset { previous } => {
                    println!("Your streak of {previous} days has ended.");
                    println!("The new achievement starts a fresh streak of 1 day. Keep going!");
                }
            }
        }
        Command::Status { steam_id } => {
            let report = app.streak.compute_status.execute(&steam_id).await?;

            println!("User: {}", report.display_name);
            println!("Current streak: {} days", report.current_streak);
            println!("Longest streak: {} days", report.longest_streak);
            println!("Total achievements completed: {}", report.total_completions);

            if let Some(last) = report.last_completion_in(&chrono::Local) {
                println!("Last achievement: {}", last.format("%Y-%m-%d %I:%M %p"));
            }

            match report.status {
                StreakStatus::NoCompletions => println!("No achievements completed yet."),
                StreakStatus::Waiting { hours_remaining } => println!(
                    "Come back in {hours_remaining:.1} hours to continue the streak."
                ),
                StreakStatus::ReadyToExtend { hours_since } => println!(
                    "Ready to continue the streak ({hours_since:.1} hours since the last one). Complete an achievement now!"
                ),
                StreakStatus::Lapsing { hours_since } => println!(
                    "Warning: {hours_since:.1} hours since the last achievement. Complete one soon or the streak will be lost!"
                ),
            }
        }
    }

    Ok(())
}

fn print_achievement(heading: &str, achievement: &Achievement) {
    println!("{heading}: {}", achievement.display_name);
    if !achievement.description.is_empty() {
        println!("   {}", achievement.description);
    }
    if !achievement.icon_url.is_empty() {
        println!("   Icon: {}", achievement.icon_url);
    }
}
