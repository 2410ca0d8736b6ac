use anyhow::{Context, Result, bail};
use backend_client::{BackendClient, NewTask};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Config;
use core_types::{Commit, TaskDifficulty};
use github_client::{
    BackendTokenProvider, CommitSource, GitHubClient, StaticTokenProvider, TokenProvider,
};
use indicatif::{ProgressBar, ProgressStyle};
use profile_store::{ProfileStore, StoreError};
use std::sync::Arc;
use std::time::Duration;
use streak::{ActivityCalendar, StreakEngine, StreakReport};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the CodeQuest command-line application.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if present.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config().context("Failed to load configuration")?;
    let mut store = ProfileStore::new(config.store.path.clone());
    store.hydrate().context("Failed to hydrate the profile store")?;

    // Execute the appropriate command
    match cli.command {
        Commands::Login(args) => handle_login(args, &config, &mut store).await?,
        Commands::Logout => handle_logout(&mut store)?,
        Commands::Streak(args) => handle_streak(args, &config, &mut store).await?,
        Commands::Calendar(args) => handle_calendar(args, &config, &store).await?,
        Commands::History(args) => handle_history(args, &config, &store).await?,
        Commands::Sync => handle_sync(&config, &mut store).await?,
        Commands::Tasks(args) => handle_tasks(args, &config, &store).await?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Gamified task tracking with GitHub contribution streaks.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the CodeQuest backend and store the session.
    Login(LoginArgs),
    /// Discard the stored session and profile.
    Logout,
    /// Fetch commits from GitHub and compute the contribution streak locally.
    Streak(StreakArgs),
    /// Render the contribution calendar for the trailing window.
    Calendar(CalendarArgs),
    /// List recent commits.
    History(HistoryArgs),
    /// Ask the backend to recompute and persist the streak server-side.
    Sync,
    /// Manage quest tasks.
    Tasks(TasksArgs),
}

#[derive(Parser)]
struct LoginArgs {
    /// The account email.
    #[arg(long)]
    email: String,

    /// The account password.
    #[arg(long)]
    password: String,
}

#[derive(Parser)]
struct StreakArgs {
    /// GitHub login to compute the streak for. Defaults to the linked account.
    #[arg(long)]
    user: Option<String>,
}

#[derive(Parser)]
struct CalendarArgs {
    /// GitHub login to render the calendar for. Defaults to the linked account.
    #[arg(long)]
    user: Option<String>,

    /// The window size in days, ending today.
    #[arg(long, default_value_t = 365)]
    days: u32,
}

#[derive(Parser)]
struct HistoryArgs {
    /// GitHub login to list commits for. Defaults to the linked account.
    #[arg(long)]
    user: Option<String>,

    /// The maximum number of commits to show.
    #[arg(long, default_value_t = 10)]
    limit: usize,
}

#[derive(Parser)]
struct TasksArgs {
    #[command(subcommand)]
    command: TasksCommand,
}

#[derive(Subcommand)]
enum TasksCommand {
    /// List all tasks, soonest due first.
    List,
    /// Create a new task.
    Add(AddTaskArgs),
    /// Mark a task complete.
    Complete {
        /// The task id.
        id: String,
    },
}

#[derive(Parser)]
struct AddTaskArgs {
    /// The task title.
    #[arg(long)]
    title: String,

    /// The due date (format: YYYY-MM-DD). Must not be in the past.
    #[arg(long)]
    due: NaiveDate,

    /// The task difficulty: easy, medium or hard.
    #[arg(long, default_value = "easy")]
    difficulty: TaskDifficulty,
}

// ==============================================================================
// Command Handlers
// ==============================================================================

async fn handle_login(args: LoginArgs, config: &Config, store: &mut ProfileStore) -> Result<()> {
    let client = BackendClient::new(&config.backend, None);
    let session = client
        .login(&args.email, &args.password)
        .await
        .context("Login failed")?;

    store.set_session_token(session.token)?;
    store.set_profile(session.user.clone())?;

    println!(
        "Logged in as {} (level {}, {} XP).",
        session.user.display_name, session.user.level, session.user.total_experience
    );
    Ok(())
}

fn handle_logout(store: &mut ProfileStore) -> Result<()> {
    store.clear()?;
    println!("Logged out; stored profile cleared.");
    Ok(())
}

async fn handle_streak(args: StreakArgs, config: &Config, store: &mut ProfileStore) -> Result<()> {
    let commits = fetch_commits(config, store, args.user, config.github.lookback_days).await?;

    let today = Utc::now().date_naive();
    let report = StreakEngine::new().compute(&commits, today);

    print_streak_report(&report);
    write_back_streak(store, &report)?;
    Ok(())
}

async fn handle_calendar(args: CalendarArgs, config: &Config, store: &ProfileStore) -> Result<()> {
    let commits = fetch_commits(config, store, args.user, args.days).await?;

    let today = Utc::now().date_naive();
    let calendar = ActivityCalendar::build(&commits, today, args.days);

    print_calendar_grid(&calendar);

    let mut table = Table::new();
    table.set_header(vec!["Active Days", "Total Pushes", "Max Daily Pushes"]);
    table.add_row(vec![
        calendar.active_days().to_string(),
        calendar.total_pushes().to_string(),
        calendar.max_daily_pushes().to_string(),
    ]);
    println!("{table}");
    Ok(())
}

async fn handle_history(args: HistoryArgs, config: &Config, store: &ProfileStore) -> Result<()> {
    let commits = fetch_commits(config, store, args.user, config.github.lookback_days).await?;

    let mut table = Table::new();
    table.set_header(vec!["Date", "Repository", "Message"]);
    for commit in commits.iter().take(args.limit) {
        let repository = commit
            .repository
            .as_ref()
            .map(|r| r.full_name.clone())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            commit.author.date.clone(),
            repository,
            first_line(&commit.message, 60),
        ]);
    }
    println!("{table}");
    Ok(())
}

async fn handle_sync(config: &Config, store: &mut ProfileStore) -> Result<()> {
    let session = store.session_token()?.map(str::to_string);
    let client = BackendClient::new(&config.backend, session);
    let report = client
        .refresh_streak()
        .await
        .context("Server-side streak refresh failed")?;

    print_streak_report(&report);
    write_back_streak(store, &report)?;
    Ok(())
}

async fn handle_tasks(args: TasksArgs, config: &Config, store: &ProfileStore) -> Result<()> {
    let session = store.session_token()?.map(str::to_string);
    let client = BackendClient::new(&config.backend, session);

    match args.command {
        TasksCommand::List => {
            let mut tasks = client.fetch_tasks().await.context("Failed to fetch tasks")?;
            tasks.sort_by_key(|t| t.due_date);

            let mut table = Table::new();
            table.set_header(vec!["Id", "Due", "Difficulty", "Done", "Title"]);
            for task in &tasks {
                table.add_row(vec![
                    task.id.clone(),
                    task.due_date.to_string(),
                    task.difficulty.as_str().to_string(),
                    if task.is_completed { "yes" } else { "no" }.to_string(),
                    task.title.clone(),
                ]);
            }
            println!("{table}");
        }
        TasksCommand::Add(add) => {
            // Reject past due dates before hitting the backend.
            if add.due < Utc::now().date_naive() {
                bail!("Due date cannot be in the past");
            }
            let task = client
                .create_task(&NewTask {
                    title: add.title,
                    due_date: add.due,
                    difficulty: add.difficulty,
                })
                .await
                .context("Failed to add task")?;
            println!("Added task {} (due {}).", task.id, task.due_date);
        }
        TasksCommand::Complete { id } => {
            client
                .complete_task(&id)
                .await
                .context("Failed to update task")?;
            println!("Task {id} marked complete.");
        }
    }
    Ok(())
}

// ==============================================================================
// Shared Helpers
// ==============================================================================

/// Resolves the GitHub login and fetches the commit history behind a spinner.
async fn fetch_commits(
    config: &Config,
    store: &ProfileStore,
    user_override: Option<String>,
    lookback_days: u32,
) -> Result<Vec<Commit>> {
    let username = resolve_username(store, user_override)?;
    let session = store.session_token()?.map(str::to_string);

    // A personal access token in the environment bypasses the backend exchange.
    let token_provider: Arc<dyn TokenProvider> = match std::env::var("CODEQUEST_GITHUB_TOKEN") {
        Ok(token) if !token.is_empty() => Arc::new(StaticTokenProvider::new(token)),
        _ => Arc::new(BackendTokenProvider::new(&config.backend, session)),
    };
    let client = GitHubClient::new(&config.github, token_provider);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Fetching commits for {username}..."));

    let result = client.fetch_commits(&username, lookback_days).await;
    match &result {
        Ok(commits) => spinner.finish_with_message(format!("Fetched {} commits.", commits.len())),
        Err(_) => spinner.finish_and_clear(),
    }

    result.context("Failed to fetch commits from GitHub")
}

/// Picks the GitHub login: an explicit `--user` wins, else the linked account.
fn resolve_username(store: &ProfileStore, user_override: Option<String>) -> Result<String> {
    if let Some(user) = user_override {
        return Ok(user);
    }
    match store.profile()? {
        Some(profile) => match profile.github.login() {
            Some(login) => Ok(login.to_string()),
            None => bail!("No GitHub account is linked to this user; pass --user <login>."),
        },
        None => bail!("Not logged in; run `codequest login` or pass --user <login>."),
    }
}

fn print_streak_report(report: &StreakReport) {
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        "Current streak".to_string(),
        format!("{} days", report.current_streak),
    ]);
    table.add_row(vec![
        "Longest streak".to_string(),
        format!("{} days", report.longest_streak),
    ]);
    table.add_row(vec![
        "Active days".to_string(),
        report.total_contributions.to_string(),
    ]);
    table.add_row(vec![
        "Last active day".to_string(),
        report
            .last_commit_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "never".to_string()),
    ]);
    println!("{table}");
}

/// Persists the freshly computed streak into the stored profile, mirroring
/// how the streak widget pushes it into the user store. Not being logged in
/// is fine; the metrics were still printed.
fn write_back_streak(store: &mut ProfileStore, report: &StreakReport) -> Result<()> {
    match store.update_streak(report.current_streak) {
        Ok(()) => {
            tracing::info!(streak = report.current_streak, "Stored profile updated.");
            Ok(())
        }
        Err(StoreError::NoProfile) => {
            tracing::debug!("No stored profile; skipping streak write-back.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Renders the GitHub-style intensity grid: one column per week, one row per
/// weekday, oldest week first.
fn print_calendar_grid(calendar: &ActivityCalendar) {
    const LEVELS: [char; 5] = ['·', '░', '▒', '▓', '█'];

    let weeks: Vec<_> = calendar.days.chunks(7).collect();
    for row in 0..7 {
        let line: String = weeks
            .iter()
            .map(|week| {
                week.get(row)
                    .map(|day| LEVELS[usize::from(day.intensity())])
                    .unwrap_or(' ')
            })
            .collect();
        println!("{line}");
    }
    println!("Less {} More", LEVELS.iter().collect::<String>());
}

fn first_line(message: &str, max_len: usize) -> String {
    let line = message.lines().next().unwrap_or_default();
    if line.chars().count() > max_len {
        let truncated: String = line.chars().take(max_len).collect();
        format!("{truncated}…")
    } else {
        line.to_string()
    }
}
