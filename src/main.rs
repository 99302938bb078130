use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

use quotebook::app::{build_http_client, App, AppEvent};
use quotebook::config::Config;
use quotebook::quotes::{LoadSource, QuoteBook};
use quotebook::storage::{Database, DatabaseError};
use quotebook::sync::{SyncAgent, SyncOutcome, SyncSettings};
use quotebook::ui;

/// Get the config directory path (~/.config/quotebook/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("quotebook"))
}

fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir).context("Failed to create config directory")?;
        println!("Created config directory: {}", config_dir.display());
    }

    // User-only access on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match std::fs::metadata(config_dir) {
            Ok(metadata) => {
                let mut perms = metadata.permissions();
                perms.set_mode(0o700);
                if let Err(e) = std::fs::set_permissions(config_dir, perms) {
                    tracing::warn!(
                        path = %config_dir.display(),
                        error = %e,
                        "Failed to set config directory permissions to 0700"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = %config_dir.display(),
                    error = %e,
                    "Failed to read config directory metadata"
                );
            }
        }
    }
    Ok(())
}

/// Remove the database file and its SQLite sidecars.
fn reset_database(db_path: &Path) -> Result<()> {
    for suffix in ["", "-wal", "-shm"] {
        let path = PathBuf::from(format!("{}{}", db_path.display(), suffix));
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to delete {}", path.display()))?;
        }
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "quotebook", about = "Terminal quote reader with category filters and server sync")]
struct Args {
    /// Reset database (delete and recreate with the built-in quotes)
    #[arg(long)]
    reset_db: bool,

    /// Import quotes from a JSON file, then exit
    #[arg(long, value_name = "FILE")]
    import: Option<PathBuf>,

    /// Export all quotes to a JSON file, then exit
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Run a single sync against the server, then exit
    #[arg(long)]
    sync_once: bool,

    /// Start without the periodic sync timer
    #[arg(long)]
    no_sync: bool,
}

impl Args {
    fn is_one_shot(&self) -> bool {
        self.import.is_some() || self.export.is_some() || self.sync_once
    }
}

/// Run the non-interactive actions in order: import, export, sync.
async fn run_one_shot(args: &Args, book: &mut QuoteBook, config: &Config) -> Result<()> {
    if let Some(import_file) = &args.import {
        let count = book
            .import_file(import_file)
            .await
            .with_context(|| format!("Failed to import {}", import_file.display()))?;
        println!("Imported {} quotes from {}", count, import_file.display());
    }

    if let Some(export_file) = &args.export {
        let count = book.export_to(export_file)?;
        println!("Exported {} quotes to {}", count, export_file.display());
    }

    if args.sync_once {
        let settings = SyncSettings::from_config(config).context("Invalid sync settings")?;
        let client = build_http_client(settings.timeout)?;
        let endpoint = settings.endpoint.clone();
        let agent = SyncAgent::new(client, settings);

        match agent.sync_tick(book).await {
            SyncOutcome::Completed(report) => println!(
                "Synced with {}: {} fetched, {} new",
                endpoint,
                report.fetched,
                report.added.len()
            ),
            SyncOutcome::Failed(e) => println!("Sync with {} failed: {}", endpoint, e),
            SyncOutcome::Skipped => println!("Sync skipped: already in progress"),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never land in the TUI's alternate screen.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_dir = get_config_dir()?;
    ensure_config_dir(&config_dir)?;

    let mut config =
        Config::load(&config_dir.join("config.toml")).context("Failed to load config.toml")?;
    if args.no_sync {
        config.sync_enabled = false;
    }

    let db_path = config_dir.join("quotes.db");
    if args.reset_db {
        reset_database(&db_path)?;
        println!("Database reset.");
    }

    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = match Database::open(db_path_str).await {
        Ok(db) => db,
        Err(DatabaseError::InstanceLocked) => {
            eprintln!(
                "Error: Another instance of quotebook appears to be running. Please close it and try again."
            );
            std::process::exit(1);
        }
        Err(e) => {
            return Err(anyhow::anyhow!("Failed to open database: {}", e));
        }
    };

    let mut book = QuoteBook::load(db.clone())
        .await
        .context("Failed to load quotes")?;

    if args.is_one_shot() {
        let result = run_one_shot(&args, &mut book, &config).await;
        db.close().await;
        return result;
    }

    let source = book.source();
    let mut app =
        App::new(book, config, config_dir).context("Failed to create application")?;
    app.restore_session().await;
    if source == LoadSource::RecoveredFromCorrupt {
        app.set_status("Stored quotes were unreadable; showing built-in quotes");
    }

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);
    let result = ui::run(&mut app, event_tx, event_rx).await;

    drop(app);
    db.close().await;
    result?;

    println!("Goodbye!");
    Ok(())
}
