//! userfetch — random user profile CLI.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use userfetch::config;
use userfetch::constants;
use userfetch::env;
use userfetch::logging;
use userfetch::service;
use userfetch::source;
use userfetch::throttle;

use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tokio::io::BufReader;
use tokio::sync::oneshot;
use tracing::{debug, info};

use cli::args::{Cli, Command, FetchArgs, OutputFormat, ShowArgs};
use config::Config;
use env::Env;
use service::{RandomIdPicker, ThrottledTrigger, UserFetchService, session};
use source::HttpUserSource;
use throttle::Throttle;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Command::Version = cli.command {
        return run_version();
    }

    let work_dir = std::env::current_dir().ok();
    let mut config = Config::load(cli.config.as_deref(), work_dir.as_deref(), &Env::real())
        .context("failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate().context("invalid configuration")?;

    logging::init(&config.logging.level).context("failed to initialize logging")?;
    debug!(?config, "configuration loaded");

    let service = Arc::new(build_service(&config)?);
    let throttle = Throttle::from_config(&config.throttle);
    let format = cli.format;

    match cli.command {
        Command::Fetch(args) => run_fetch(args, service, throttle, format).await,
        Command::Show(args) => run_show(args, &service, format).await,
        Command::Interactive => run_interactive(service, throttle, format).await,
        Command::Version => run_version(),
    }
}

/// Wire the HTTP source and random id draw into a fetch service.
fn build_service(config: &Config) -> Result<UserFetchService> {
    let source = HttpUserSource::new(config.source.base_url.clone())
        .context("failed to build HTTP client")?;
    let picker = RandomIdPicker::new(config.source.max_user_id);
    Ok(UserFetchService::new(Arc::new(source), Arc::new(picker)))
}

/// Print detailed version and build information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    println!("{}   {}", "endpoint:".dimmed(), constants::DEFAULT_BASE_URL);
    Ok(())
}

/// Click the throttled trigger `count` times and render what got published.
async fn run_fetch(
    args: FetchArgs,
    service: Arc<UserFetchService>,
    throttle: Throttle,
    format: OutputFormat,
) -> Result<()> {
    let trigger = ThrottledTrigger::new(service, throttle);
    let interval = Duration::from_millis(args.interval_ms);

    let mut pending = Vec::new();
    for click in 1..=args.count {
        if click > 1 && !interval.is_zero() {
            tokio::time::sleep(interval).await;
        }
        match trigger.fire() {
            Some(handle) => pending.push(handle),
            None => debug!(click, "click dropped by throttle"),
        }
    }
    info!(clicks = args.count, accepted = pending.len(), "trigger finished");

    for handle in pending {
        handle.await.context("fetch task failed")?;
    }

    let current = trigger.service().current();
    let Some(user) = current else {
        bail!("no user was fetched (see log output for details)");
    };
    println!("{}", format.render(Some(user.as_ref())).trim_end());
    Ok(())
}

/// Resolve one id, surfacing fetch failures to the caller.
async fn run_show(args: ShowArgs, service: &UserFetchService, format: OutputFormat) -> Result<()> {
    let resolution = service
        .resolve(args.id)
        .await
        .with_context(|| format!("failed to fetch user {}", args.id))?;
    println!("{}", format.render(Some(resolution.user().as_ref())).trim_end());
    Ok(())
}

/// Line-driven widget session.
///
/// Every stdin line clicks the trigger; a watcher task re-renders whenever
/// the published record changes. On EOF or quit the session waits for the
/// accepted fetches, then lets the watcher render the final record.
async fn run_interactive(
    service: Arc<UserFetchService>,
    throttle: Throttle,
    format: OutputFormat,
) -> Result<()> {
    use colored::Colorize;

    cli::print_header();

    let mut published = service.subscribe();
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
    let watcher = tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                changed = published.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let user = published.borrow_and_update().clone();
                    println!("{}", format.render(user.as_deref()).trim_end());
                }
                _ = &mut stop_rx => break,
            }
        }
    });

    let trigger = ThrottledTrigger::new(Arc::clone(&service), throttle);
    let input = BufReader::new(tokio::io::stdin());
    let report = session::drive(&trigger, input, || {
        eprintln!("  {}", "throttled, try again".dimmed());
    })
    .await
    .context("failed to read stdin")?;
    debug!(?report, "interactive session ended");

    let _ = stop_tx.send(());
    watcher.await.context("display task failed")?;
    cli::print_cache_summary(service.cache_stats(), &service.cached_ids());
    Ok(())
}
