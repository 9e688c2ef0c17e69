//! geoquiz — terminal driver for the geography quiz engine.
//!
//! Map clicks are simulated by typing region keys (e.g. `DE-BY`) or marker
//! coordinates (`x,y`). Statistics and settings persist between runs.

use std::io::{self, BufRead, Write as _};
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geoquiz_core::{
    storage, AnswerTarget, FileStorage, GameMode, Point, Settings, SessionController, Statistics,
    StatisticsTracker,
};

#[derive(Parser)]
#[command(name = "geoquiz", version, about = "Geography quiz for the German map")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz session
    Play {
        /// Quiz mode
        #[arg(long, value_enum, default_value = "regions")]
        mode: ModeArg,
    },
    /// Show aggregated statistics
    Stats,
    /// Reset all statistics to first-run defaults
    ResetStats,
    /// Show or change settings
    Settings {
        /// Enable or disable the per-question timer
        #[arg(long)]
        timer_enabled: Option<bool>,

        /// Timer duration in seconds (1-300)
        #[arg(long)]
        timer_duration: Option<u32>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Regions,
    Places,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Regions => GameMode::Regions,
            ModeArg::Places => GameMode::Places,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut store = FileStorage::new(data_dir()?).context("opening data directory")?;

    match cli.command {
        Commands::Play { mode } => play(mode.into(), &mut store),
        Commands::Stats => {
            print_statistics(&load_statistics(&store));
            Ok(())
        }
        Commands::ResetStats => {
            let mut tracker = StatisticsTracker::from_saved(load_statistics(&store));
            tracker.reset();
            if !storage::save(&mut store, storage::STATISTICS_KEY, tracker.statistics()) {
                return Err(anyhow!("failed to reset statistics"));
            }
            println!("Statistics reset.");
            Ok(())
        }
        Commands::Settings {
            timer_enabled,
            timer_duration,
        } => update_settings(&mut store, timer_enabled, timer_duration),
    }
}

fn data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| anyhow!("no data directory available"))?;
    Ok(base.join("geoquiz"))
}

fn load_statistics(store: &FileStorage) -> Statistics {
    storage::load(
        store,
        storage::STATISTICS_KEY,
        Statistics::default(),
        Some(Statistics::is_valid),
    )
}

fn load_settings(store: &FileStorage) -> Settings {
    storage::load(
        store,
        storage::SETTINGS_KEY,
        Settings::default(),
        Some(Settings::is_valid),
    )
}

fn play(mode: GameMode, store: &mut FileStorage) -> anyhow::Result<()> {
    let settings = load_settings(store);
    if settings.timer_enabled {
        println!(
            "(timer configured for {}s per question; not enforced in the terminal)",
            settings.timer_duration_secs
        );
    }

    let mut controller = SessionController::new();
    controller.start_new_session(mode);
    if !controller.is_session_active() {
        println!("No questions available for this mode.");
        return Ok(());
    }

    let total = controller
        .state()
        .current_session
        .as_ref()
        .map_or(0, |s| s.total_questions);
    println!("Starting a {} session with {total} questions.", mode.as_str());
    println!("Answer with a region key (e.g. DE-BY) or coordinates (e.g. 510,130); 'q' quits.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut asked = 0usize;

    while controller.is_session_active() {
        let prompt = current_prompt(&controller, &mut asked, total);
        print!("{prompt}");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            break; // stdin closed
        };
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") {
            break;
        }

        if controller.state().awaiting_capital_input {
            controller.submit_capital_answer(input);
        } else if let Some(point) = parse_point(input) {
            controller.submit_location_answer(None, Some(point));
        } else {
            controller.submit_location_answer(Some(input), None);
        }
        print_feedback(&controller);
    }

    controller.end_session();
    let Some(session) = controller.take_completed_session() else {
        return Ok(());
    };
    println!(
        "\nSession over: {} points across {} questions.",
        session.score, session.total_questions
    );

    let mut tracker = StatisticsTracker::from_saved(load_statistics(store));
    tracker.record_session(&session);
    if !storage::save(store, storage::STATISTICS_KEY, tracker.statistics()) {
        tracing::warn!("statistics could not be saved");
    }
    print_statistics(tracker.statistics());
    Ok(())
}

fn current_prompt(controller: &SessionController, asked: &mut usize, total: usize) -> String {
    let state = controller.state();
    let Some(question) = state.current_question.as_ref() else {
        return String::new();
    };
    if state.awaiting_capital_input {
        return format!("  Capital of {}? ", question.location.name);
    }
    *asked += 1;
    match &question.location.target {
        AnswerTarget::Region { .. } => {
            format!("[{asked}/{total}] Where is {}? ", question.location.name)
        }
        AnswerTarget::Point { .. } => format!(
            "[{asked}/{total}] Where is {}? (x,y) ",
            question.location.name
        ),
    }
}

fn print_feedback(controller: &SessionController) {
    let state = controller.state();
    if state.awaiting_capital_input {
        return; // location feedback comes after the capital answer
    }
    match (state.last_answer_correct, state.correct_location.as_ref()) {
        (Some(true), _) => println!("  ✓ correct (score: {})", controller.score()),
        (Some(false), Some(location)) => println!(
            "  ✗ wrong — that was {} ({})",
            location.name,
            location.region_keys().join(", ")
        ),
        _ => {}
    }
}

fn parse_point(input: &str) -> Option<Point> {
    let (x, y) = input.split_once(',')?;
    Some(Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn print_statistics(stats: &Statistics) {
    println!("\nTotal sessions: {}", stats.total_sessions);
    for (mode, mode_stats) in &stats.by_mode {
        println!(
            "  {:<8} played {:>3}  questions {:>4}  correct {:>4}  rate {:>5.1}%  best {}",
            mode.as_str(),
            mode_stats.sessions_played,
            mode_stats.total_questions,
            mode_stats.correct_answers,
            mode_stats.success_rate,
            mode_stats.best_score,
        );
    }
    if !stats.weak_areas.is_empty() {
        println!("Weak areas (last session):");
        for area in &stats.weak_areas {
            println!("  {:<24} {:>5.1}%", area.location_name, area.success_rate);
        }
    }
}

fn update_settings(
    store: &mut FileStorage,
    timer_enabled: Option<bool>,
    timer_duration: Option<u32>,
) -> anyhow::Result<()> {
    let mut settings = load_settings(store);
    if let Some(enabled) = timer_enabled {
        settings.timer_enabled = enabled;
    }
    if let Some(duration) = timer_duration {
        settings.timer_duration_secs = duration;
    }
    if !settings.is_valid() {
        return Err(anyhow!("timer duration must be between 1 and 300 seconds"));
    }
    if !storage::save(store, storage::SETTINGS_KEY, &settings) {
        return Err(anyhow!("failed to save settings"));
    }
    println!(
        "timer: {} ({}s)",
        if settings.timer_enabled { "on" } else { "off" },
        settings.timer_duration_secs
    );
    Ok(())
}
