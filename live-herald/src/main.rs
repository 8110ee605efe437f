mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use live_probe::{LiveProbe, ProbeError, TwitchProbe, create_client_builder};
use live_herald::compose::MessageComposer;
use live_herald::config::HeraldConfig;
use live_herald::logging;
use live_herald::monitor::{StreamDetector, StreamMonitor};
use live_herald::notification::{
    ConsoleChannel, NotificationService, TwitterChannel, WebhookChannel,
};
use live_herald::roster::load_roster;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::cli::{Args, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = HeraldConfig::load(args.config.as_deref())?;
    config.apply_env();
    apply_overrides(&mut config, &args);

    let log_guard = logging::init_logging(config.log_dir.as_deref())?;

    let shutdown = CancellationToken::new();
    log_guard.start_retention_cleanup(shutdown.clone());

    let result = match args.command.clone().unwrap_or(Commands::Run) {
        Commands::Run => run(config, &args, shutdown.clone()).await,
        Commands::CheckRoster => check_roster(&config),
        Commands::Verify { channel } => verify(config, &channel, args.dry_run).await,
    };

    shutdown.cancel();
    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}

fn apply_overrides(config: &mut HeraldConfig, args: &Args) {
    if let Some(roster) = &args.roster {
        config.roster_path = roster.clone();
    }
    if let Some(dir) = &args.log_dir {
        config.log_dir = Some(dir.clone());
    }
    if let Some(max_chars) = args.max_chars {
        config.max_message_chars = max_chars;
    }
}

async fn run(config: HeraldConfig, args: &Args, shutdown: CancellationToken) -> anyhow::Result<()> {
    config.validate(args.dry_run)?;

    let channels = load_roster(&config.roster_path)?;
    info!(
        count = channels.len(),
        path = %config.roster_path.display(),
        "Loaded roster"
    );

    let client = create_client_builder(Some(config.request_timeout()))
        .build()
        .context("Failed to build HTTP client")?;

    let probe = TwitchProbe::new(client.clone(), config.twitch.probe_config());
    let detector = StreamDetector::new(Arc::new(probe), config.request_timeout());
    let composer = MessageComposer::new(config.composer_config());
    let notifier = build_notifier(&config, client, args.dry_run);

    let mut monitor = StreamMonitor::new(
        channels,
        detector,
        composer,
        notifier,
        config.monitor_config(),
    );

    if args.once {
        let report = monitor.run_cycle(&shutdown).await;
        info!(?report, "Single cycle finished");
        return Ok(());
    }

    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown requested");
                ctrl_c.cancel();
            }
            Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
        }
    });

    monitor.run(shutdown).await;
    Ok(())
}

fn build_notifier(
    config: &HeraldConfig,
    client: reqwest::Client,
    dry_run: bool,
) -> NotificationService {
    let mut notifier = NotificationService::default();

    if dry_run {
        notifier.add_channel(Box::new(ConsoleChannel));
        return notifier;
    }

    if config.twitter.enabled {
        notifier.add_channel(Box::new(TwitterChannel::new(
            config.twitter.clone(),
            client.clone(),
        )));
    }
    if let Some(webhook) = &config.webhook {
        notifier.add_channel(Box::new(WebhookChannel::new(webhook.clone(), client)));
    }

    notifier
}

fn check_roster(config: &HeraldConfig) -> anyhow::Result<()> {
    let channels = load_roster(&config.roster_path)?;

    println!(
        "{} channel(s) in {}",
        channels.len(),
        config.roster_path.display()
    );
    for channel in &channels {
        println!(
            "  {} ({}) -> {}",
            channel.display_name,
            channel.channel_id,
            channel.resolved_handle()
        );
    }

    Ok(())
}

async fn verify(config: HeraldConfig, channel: &str, dry_run: bool) -> anyhow::Result<()> {
    let client = create_client_builder(Some(config.request_timeout()))
        .build()
        .context("Failed to build HTTP client")?;

    let mut failures = 0;

    let probe = TwitchProbe::new(client.clone(), config.twitch.probe_config());
    match probe.check(channel).await {
        Ok(status) => println!("twitch: ok ({channel} is {status})"),
        Err(ProbeError::ChannelNotFound) => println!("twitch: ok ({channel} not found)"),
        Err(e) => {
            failures += 1;
            println!("twitch: FAILED: {e}");
        }
    }

    let notifier = build_notifier(&config, client, dry_run);
    if !notifier.has_enabled_channel() {
        println!("no notification channel enabled");
    }
    for (name, result) in notifier.verify_all().await {
        match result {
            Ok(()) => println!("{name}: ok"),
            Err(e) => {
                failures += 1;
                println!("{name}: FAILED: {e}");
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} check(s) failed");
    }
    Ok(())
}
