use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::anyhow;
use crossterm::event::KeyEventKind;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

mod app;
mod auth;
mod config;
mod db;
mod error;
mod models;
mod pages;
mod router;
mod session;
mod storage;
mod tui;

use app::App;
use config::Config;
use db::Repository;
use error::Result;
use session::Namespace;
use storage::Storage;
use tui::{draw, handle_key_event};

/// Command line options. Everything else comes from the config file.
#[derive(Debug, Default)]
struct Args {
    page: Option<String>,
    db: Option<String>,
    export: Option<(String, PathBuf)>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--page" => {
                let page = iter.next().ok_or_else(|| anyhow!("--page needs a path"))?;
                parsed.page = Some(page.clone());
            }
            "--db" => {
                let db = iter.next().ok_or_else(|| anyhow!("--db needs a path"))?;
                parsed.db = Some(db.clone());
            }
            "--export-csv" => {
                let (Some(email), Some(path)) = (iter.next(), iter.next()) else {
                    return Err(anyhow!("--export-csv needs <email> <path>").into());
                };
                parsed.export = Some((email.clone(), PathBuf::from(path)));
            }
            other => return Err(anyhow!("Unknown argument: {other}").into()),
        }
    }

    Ok(parsed)
}

/// Writes one user's logs as CSV without starting the TUI.
async fn export_headless(config: &Config, email: &str, path: &Path) -> Result<usize> {
    let repository = Repository::new(&config.db_path).await?;
    let storage = Storage::new(repository);

    let account = auth::find_by_email(&storage, email)
        .await
        .map_err(|e| anyhow!(e.to_string()))?
        .ok_or_else(|| anyhow!("No such user: {email}"))?;

    pages::logs::export_csv(&storage, &Namespace::user(&account.id), path).await
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (only show warnings and errors by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let args = parse_args(&args)?;

    // Load configuration
    let mut config = Config::load()?;
    if let Some(db) = args.db {
        config.db_path = db;
    }

    // If an export was requested, write the file and exit
    if let Some((email, path)) = args.export {
        let count = export_headless(&config, &email, &path).await?;
        println!("Exported {} logs to {:?}", count, path);
        return Ok(());
    }

    // Initialize app
    let mut app = App::new(&config, args.page.as_deref().unwrap_or("/")).await?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        tracing::error!("App exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = handle_key_event(key, app.input_mode()) {
                        let should_quit = app.handle_action(action).await?;
                        if should_quit {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::logs::LogForm;
    use crate::session::Session;
    use tempfile::TempDir;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("reva")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args() {
        let args = parse_args(&argv(&["--page", "#/logs", "--db", "x.db"])).unwrap();
        assert_eq!(args.page.as_deref(), Some("#/logs"));
        assert_eq!(args.db.as_deref(), Some("x.db"));
        assert!(args.export.is_none());

        assert!(parse_args(&argv(&["--export-csv", "a@b.c"])).is_err());
        assert!(parse_args(&argv(&["--bogus"])).is_err());
    }

    #[tokio::test]
    async fn test_export_headless() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            db_path: temp_dir.path().join("test.db").to_string_lossy().to_string(),
            export_dir: temp_dir.path().to_string_lossy().to_string(),
            trend_points: 30,
        };

        {
            let storage = Storage::new(Repository::new(&config.db_path).await.unwrap());
            let mut session = Session::default();
            let account = auth::register(&storage, &mut session, "Ada", "ada@example.com", "pw")
                .await
                .unwrap();
            let entry = LogForm::default().validate().unwrap();
            pages::logs::save(&storage, &Namespace::user(&account.id), entry)
                .await
                .unwrap();
        }

        let path = temp_dir.path().join("out.csv");
        let count = export_headless(&config, "ADA@example.com", &path).await.unwrap();
        assert_eq!(count, 1);
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("date,mood"));

        assert!(export_headless(&config, "nobody@example.com", &path).await.is_err());
    }
}
