use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use spendwise::cli::{
    handle_budget_command, handle_dashboard_command, handle_expense_command,
    handle_export_command, handle_health_command, handle_login_command, handle_report_command,
    today,
};
use spendwise::client::memory::{MemoryStore, DEMO_PASSWORD, DEMO_USERNAME};
use spendwise::client::{HttpRecordStore, RecordStore};
use spendwise::config::{Settings, SpendwisePaths};
use spendwise::models::Bucketing;
use spendwise::services::{AuthService, Backend};

const PASSWORD_ENV: &str = "SPENDWISE_PASSWORD";

#[derive(Parser)]
#[command(
    name = "spendwise",
    version,
    about = "Track expenses, monthly budgets and spending reports",
    long_about = "SpendWise is a command-line personal finance tracker. It records \
                  expenses and monthly category budgets in a SpendWise record store \
                  and turns them into dashboards, trend reports and exports."
)]
struct Cli {
    /// Base URL of the record store API
    #[arg(long, global = true, env = "SPENDWISE_API_URL")]
    api_url: Option<String>,

    /// Username to log in with
    #[arg(short, long, global = true, env = "SPENDWISE_USERNAME")]
    username: Option<String>,

    /// Use an in-memory store with sample data instead of the API
    #[arg(long, global = true)]
    demo: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check credentials and show the user profile
    Login {
        /// Do not remember the username in the settings file
        #[arg(long)]
        no_save: bool,
    },

    /// Check that the record store is reachable
    Health,

    /// Expense management commands
    #[command(subcommand)]
    Expense(spendwise::cli::ExpenseCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(spendwise::cli::BudgetCommands),

    /// Show the dashboard
    Dashboard {
        /// Trend bucket size: day, week or month
        #[arg(short, long, default_value = "month")]
        bucket: Bucketing,
    },

    /// Show spending charts
    Report {
        /// Trend bucket size: day, week or month
        #[arg(short, long, default_value = "month")]
        bucket: Bucketing,
    },

    /// Export expenses or the spending report
    #[command(subcommand)]
    Export(spendwise::cli::ExportCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = SpendwisePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(api_url) = &cli.api_url {
        settings.api_base_url = api_url.clone();
    }

    init_logging(&settings, cli.verbose);

    let Some(command) = cli.command else {
        println!("SpendWise - expense tracking from the command line");
        println!();
        println!("Run 'spendwise --help' for usage information.");
        println!("Run 'spendwise --demo dashboard' to try it with sample data.");
        return Ok(());
    };

    match command {
        Commands::Config => {
            println!("SpendWise Configuration");
            println!("=======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  API base URL:    {}", settings.api_base_url);
            println!(
                "  Username:        {}",
                settings.username.as_deref().unwrap_or("(not set)")
            );
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Recent count:    {}", settings.recent_count);
            println!("  Trend months:    {}", settings.trend_months);
            println!("  Request timeout: {}s", settings.request_timeout_secs);
            println!("  Log level:       {}", settings.log_level);
            return Ok(());
        }
        Commands::Health => {
            let store = open_store(cli.demo, &settings)?;
            handle_health_command(store.as_ref())?;
            return Ok(());
        }
        _ => {}
    }

    let mut backend = Backend::new(open_store(cli.demo, &settings)?);
    let (username, password) = credentials(cli.demo, cli.username.as_deref(), &settings)?;
    let profile = AuthService::new(&mut backend)
        .login(&username, &password)
        .with_context(|| format!("Login failed for {}", username))?;
    debug!(username = %profile.username, "session opened");

    let today = today();
    match command {
        Commands::Login { no_save } => {
            handle_login_command(&profile, &paths, &mut settings, !no_save && !cli.demo)?;
        }
        Commands::Expense(cmd) => handle_expense_command(&mut backend, &settings, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&mut backend, &settings, cmd)?,
        Commands::Dashboard { bucket } => {
            handle_dashboard_command(&mut backend, &settings, bucket, today)?
        }
        Commands::Report { bucket } => handle_report_command(&mut backend, &settings, bucket, today)?,
        Commands::Export(cmd) => handle_export_command(&mut backend, &settings, cmd, today)?,
        Commands::Config | Commands::Health => {}
    }

    AuthService::new(&mut backend).logout();
    Ok(())
}

fn open_store(demo: bool, settings: &Settings) -> Result<Box<dyn RecordStore>> {
    if demo {
        debug!("using in-memory demo store");
        return Ok(Box::new(MemoryStore::demo()));
    }

    let store = HttpRecordStore::new(&settings.api_base_url, settings.request_timeout())?;
    debug!(base_url = %store.base_url(), "using record store");
    Ok(Box::new(store))
}

/// Username from flag, environment or settings; password from the
/// environment or a hidden prompt
fn credentials(
    demo: bool,
    username: Option<&str>,
    settings: &Settings,
) -> Result<(String, Zeroizing<String>)> {
    let password_env = std::env::var(PASSWORD_ENV).ok().map(Zeroizing::new);

    if demo {
        let username = username.unwrap_or(DEMO_USERNAME).to_string();
        let password = password_env.unwrap_or_else(|| Zeroizing::new(DEMO_PASSWORD.to_string()));
        return Ok((username, password));
    }

    let Some(username) = username.map(str::to_string).or_else(|| settings.username.clone()) else {
        bail!("No username given; pass --username or set SPENDWISE_USERNAME");
    };

    let password = match password_env {
        Some(password) => password,
        None => Zeroizing::new(
            rpassword::prompt_password(format!("Password for {}: ", username))
                .context("Failed to read password")?,
        ),
    };

    Ok((username, password))
}

fn init_logging(settings: &Settings, verbose: bool) {
    let default_level = if verbose { "debug" } else { settings.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("spendwise={}", default_level)))
        .unwrap_or_else(|_| EnvFilter::new("spendwise=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
