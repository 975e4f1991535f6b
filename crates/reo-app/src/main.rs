use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use atty::Stream;
use clap::{ArgGroup, Parser};
use reo_config::Config;
use reo_config::ui::Theme;
use reo_core::external::{ProcessRunner, ToolRunner};
use reo_core::pipeline::Response;
use reo_core::state::LookupSession;
use reo_core::types::MarkupFlavor;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod doctor;
pub mod events;
pub mod io;
pub mod profile;
pub mod state;
pub mod ui;


use self::controller::AppController;
use self::state::AppState;

/// How long running lookups get to finish after Ctrl+C
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

#[derive(Parser, Debug)]
#[command(name = "reo", about = "Look up English words in WordNet", version)]
#[command(group(ArgGroup::new("mode").args(["check", "adversion", "dark", "light"])))]
pub struct Cli {
    /// Basic dependency checks.
    #[arg(short, long)]
    check: bool,

    /// Advanced version info.
    #[arg(short = 'd', long)]
    adversion: bool,

    /// Use dark colours.
    #[arg(long)]
    dark: bool,

    /// Use light colours.
    #[arg(long)]
    light: bool,

    /// Make it scream louder.
    #[arg(short, long)]
    verbose: bool,

    /// Settings profile to load.
    #[arg(long, default_value = "main")]
    profile: String,

    /// Print Pango markup instead of plain text.
    #[arg(long)]
    markup: bool,

    /// Look these words up once and exit.
    term: Vec<String>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if self.dark {
            config.ui.theme = Theme::Dark;
        } else if self.light {
            config.ui.theme = Theme::Light;
        }
    }

    fn flavor(&self) -> MarkupFlavor {
        if self.markup {
            MarkupFlavor::Pango
        } else {
            MarkupFlavor::Plain
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Config {
    let mut config = match profile::reo_root() {
        Ok(root) => {
            if let Err(e) = profile::init_user_config(&root) {
                tracing::warn!("Could not prepare {}: {}", root.display(), e);
            }
            profile::load_or_default(&root, &cli.profile)
        }
        Err(e) => {
            tracing::error!("{:#}, custom definitions are disabled", e);
            Config::new()
        }
    };
    cli.apply(&mut config);
    config
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli);
    let runner: Arc<dyn ToolRunner> = Arc::new(ProcessRunner);

    if cli.check {
        doctor::run_check(runner.as_ref(), &config).await;
        return Ok(ExitCode::SUCCESS);
    }

    let state = Arc::new(AppState::new(config, runner.clone(), cli.flavor()));

    if cli.adversion {
        let config = state.config.read().await;
        println!(
            "{}",
            doctor::advanced_version(runner.as_ref(), &config, &state.pipeline).await
        );
        return Ok(ExitCode::SUCCESS);
    }

    if !cli.term.is_empty() {
        return one_shot(&state, &cli.term.join(" ")).await;
    }

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(atty::is(Stream::Stdout));

    tokio::select! {
        result = signal::ctrl_c() => {
            result?;
            tracing::info!("Shutdown requested");
        }
        _ = controller.stopped() => {
            tracing::info!("Console closed");
        }
    }
    controller.shutdown();
    controller::drain(tasks, SHUTDOWN_GRACE).await;

    Ok(ExitCode::SUCCESS)
}

async fn one_shot(state: &AppState, text: &str) -> anyhow::Result<ExitCode> {
    let report = state
        .pipeline
        .search(text, state.scheme, state.flavor, LookupSession::new())
        .await;

    match report.outcome {
        Ok(Response::Show { markup, .. }) => {
            println!("{markup}");
            Ok(ExitCode::SUCCESS)
        }
        Ok(Response::Unchanged | Response::Terminate) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            if let Some(dialog) = e.dialog() {
                eprintln!("{}", ui::format_dialog(&dialog));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
