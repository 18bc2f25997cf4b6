pub mod api;
pub mod clients;
pub mod config;
pub mod db;
pub mod entities;
pub mod ingest;
pub mod models;
pub mod scheduler;
pub mod services;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
pub use config::Config;
use scheduler::Scheduler;
use state::SharedState;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    config.validate()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "daemon" | "-d" | "--daemon" => run_daemon(config).await,

        "import" => {
            if args.len() < 3 {
                println!("Usage: coursio import <playlist url>");
                println!("Example: coursio import \"https://www.youtube.com/playlist?list=PL...\"");
                return Ok(());
            }
            cmd_import(config, &args[2]).await
        }

        "list" | "ls" | "l" => cmd_list(config).await,

        "sync" | "s" => {
            if args.len() < 3 {
                println!("Usage: coursio sync <playlist_id | all>");
                println!("Use 'coursio list' to see IDs");
                return Ok(());
            }
            cmd_sync(config, &args[2]).await
        }

        "autosync" => {
            if args.len() < 4 {
                println!("Usage: coursio autosync <playlist_id> <on|off>");
                return Ok(());
            }
            cmd_autosync(config, &args[2], &args[3]).await
        }

        "init" | "--init" => {
            Config::create_default_if_missing()?;
            println!("✓ Config file created. Edit config.toml and run again.");
            Ok(())
        }

        "help" | "-h" | "--help" => {
            print_help();
            Ok(())
        }

        other => {
            println!("Unknown command: {other}");
            print_help();
            Ok(())
        }
    }
}

fn print_help() {
    println!("Coursio - import YouTube playlists as courses");
    println!();
    println!("Usage: coursio <command>");
    println!();
    println!("Commands:");
    println!("  daemon              Run the HTTP server and background scheduler");
    println!("  import <url>        Import a playlist by URL");
    println!("  list                List imported playlists");
    println!("  sync <id|all>       Sync one playlist, or sweep all auto-sync ones");
    println!("  autosync <id> <on|off>  Toggle unattended daily sync for a playlist");
    println!("  init                Create a default config.toml");
}

async fn run_daemon(config: Config) -> anyhow::Result<()> {
    let port = config.server.port;
    let scheduler_config = config.scheduler.clone();

    let shared = Arc::new(SharedState::new(config).await?);

    let scheduler = Arc::new(Scheduler::new(shared.clone(), scheduler_config));
    let scheduler_handle = {
        let scheduler = scheduler.clone();
        tokio::spawn(async move {
            if let Err(e) = scheduler.start().await {
                error!("Scheduler stopped with error: {e}");
            }
        })
    };

    let app_state = api::create_app_state(shared);
    let router = api::router(app_state).await;

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Coursio listening on http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.stop().await;
    scheduler_handle.abort();

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutdown signal received");
}

async fn cmd_import(config: Config, url: &str) -> anyhow::Result<()> {
    let shared = SharedState::new(config).await?;

    match shared.import_service.import_url(url).await {
        Ok(course) => {
            println!(
                "✓ Imported '{}' as /{} ({} videos)",
                course.playlist.title,
                course.playlist.slug,
                course.videos.len()
            );
            Ok(())
        }
        Err(e) => anyhow::bail!("Import failed: {e}"),
    }
}

async fn cmd_list(config: Config) -> anyhow::Result<()> {
    let shared = SharedState::new(config).await?;

    let playlists = shared.store.list_playlists().await?;
    let counts = shared.store.video_counts_by_playlist().await?;

    if playlists.is_empty() {
        println!("No playlists imported yet. Use 'coursio import <url>'.");
        return Ok(());
    }

    for playlist in playlists {
        let count = counts.get(&playlist.id).copied().unwrap_or(0);
        println!(
            "[{}] {} (/{}) - {} videos{}{}",
            playlist.id,
            playlist.title,
            playlist.slug,
            count,
            if playlist.auto_sync { ", auto-sync" } else { "" },
            playlist
                .last_synced_at
                .map(|t| format!(", last synced {t}"))
                .unwrap_or_default()
        );
    }

    Ok(())
}

async fn cmd_sync(config: Config, target: &str) -> anyhow::Result<()> {
    let shared = SharedState::new(config).await?;

    if target == "all" {
        let stats = shared.sync_service.sync_all_auto().await?;
        println!(
            "✓ Swept {} playlists: {} videos added, {} failed",
            stats.playlists, stats.added, stats.failed
        );
        return Ok(());
    }

    let id: i32 = target
        .parse()
        .with_context(|| format!("Invalid playlist ID: {target}"))?;

    match shared.sync_service.sync_playlist(id).await {
        Ok(added) => {
            println!("✓ Synced playlist {id}: {added} new videos");
            Ok(())
        }
        Err(e) => anyhow::bail!("Sync failed: {e}"),
    }
}

async fn cmd_autosync(config: Config, id_str: &str, toggle: &str) -> anyhow::Result<()> {
    let enabled = match toggle {
        "on" | "true" => true,
        "off" | "false" => false,
        other => anyhow::bail!("Expected 'on' or 'off', got '{other}'"),
    };

    let id: i32 = id_str
        .parse()
        .with_context(|| format!("Invalid playlist ID: {id_str}"))?;

    let shared = SharedState::new(config).await?;
    shared.sync_service.set_auto_sync(id, enabled).await?;

    println!(
        "✓ Auto-sync {} for playlist {id}",
        if enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}
