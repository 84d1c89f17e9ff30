mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{StorageRequest, StorageResponse, UiEvent};
use crate::state::storage::{LoadingState, StorageWorker};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{error, info};
use std::io::Stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let document = match parse_cli_args(std::env::args().skip(1)) {
        Ok(CliCommand::Run { document }) => document,
        Ok(CliCommand::Help) => {
            println!("{}", usage_text());
            return Ok(());
        }
        Ok(CliCommand::Version) => {
            println!("dynasty-tui {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            std::process::exit(2);
        }
    };

    better_panic::install();

    let settings = AppSettings::load(document);
    tui_logger::init_logger(settings.log_level)?;
    tui_logger::set_default_level(settings.log_level);
    info!("using dynasty document {}", settings.document_path.display());

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    let storage_paths = settings.storage_paths();
    let load_teams = settings.teams_path.is_some();
    let app = Arc::new(Mutex::new(App::new(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (storage_req_tx, storage_req_rx) = mpsc::channel::<StorageRequest>(100);
    let (storage_resp_tx, storage_resp_rx) = mpsc::channel::<StorageResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Storage thread
    let storage_worker = StorageWorker::new(storage_paths, storage_req_rx, storage_resp_tx);
    let storage_task = tokio::spawn(storage_worker.run());

    if load_teams {
        let _ = storage_req_tx.send(StorageRequest::LoadTeams).await;
    }
    // Trigger document load on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, storage_req_tx, storage_resp_rx).await;

    input_handler.abort();
    storage_task.abort();

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum CliCommand {
    Run { document: Option<PathBuf> },
    Help,
    Version,
}

fn parse_cli_args(mut args: impl Iterator<Item = String>) -> Result<CliCommand, String> {
    let Some(arg) = args.next() else {
        return Ok(CliCommand::Run { document: None });
    };

    let command = match arg.as_str() {
        "-h" | "--help" => CliCommand::Help,
        "-V" | "--version" => CliCommand::Version,
        flag if flag.starts_with('-') => return Err(format!("Unknown argument: {flag}")),
        path => CliCommand::Run { document: Some(PathBuf::from(path)) },
    };

    match args.next() {
        Some(extra) => Err(format!("Unexpected argument: {extra}")),
        None => Ok(command),
    }
}

fn usage_text() -> &'static str {
    "dynasty-tui - 12-team college football playoff bracket for a dynasty save

Usage:
  dynasty-tui [DOCUMENT]
  dynasty-tui --help
  dynasty-tui --version

Environment:
  DYNASTY_DOCUMENT   Dynasty document path (default dynasty.json)
  DYNASTY_IMPORT     Bulk import batch path (default <document>.import.json)
  DYNASTY_TEAMS      Optional team directory JSON
  DYNASTY_LOG        Log level shown in the Logs tab (default error)"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    storage_requests: mpsc::Sender<StorageRequest>,
    mut storage_responses: mpsc::Receiver<StorageResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &storage_requests).await;
                if should_redraw && !loading.is_loading {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = storage_responses.recv() => {
                let should_redraw =
                    handle_storage_response(response, &app, &storage_requests, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            else => break,
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    storage_requests: &mpsc::Sender<StorageRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let _ = storage_requests.send(StorageRequest::LoadDocument).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, storage_requests).await;
            true
        }
        UiEvent::Resize => true,
    }
}

async fn handle_storage_response(
    response: StorageResponse,
    app: &Arc<Mutex<App>>,
    storage_requests: &mpsc::Sender<StorageRequest>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        StorageResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            return true;
        }
        StorageResponse::DocumentLoaded { document, created } => {
            let mut guard = app.lock().await;
            guard.on_document_loaded(*document, created);
        }
        StorageResponse::TeamsLoaded { directory } => {
            let mut guard = app.lock().await;
            guard.on_teams_loaded(directory);
        }
        StorageResponse::ImportLoaded { batch } => {
            let mut guard = app.lock().await;
            let merged = guard.on_import_loaded(batch);
            drop(guard);
            // An import is persisted as one write of the whole document.
            if let Some(document) = merged {
                let _ = storage_requests
                    .send(StorageRequest::SaveDocument { document: Box::new(document) })
                    .await;
            }
        }
        StorageResponse::DocumentSaved { saved_at } => {
            let mut guard = app.lock().await;
            guard.on_document_saved(saved_at);
        }
        StorageResponse::Error { message } => {
            error!("Storage error: {message}");
            let mut guard = app.lock().await;
            guard.on_error(message);
        }
    }
    !loading.is_loading
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

/// Best effort: also runs from the panic hook, where there is nobody left to
/// report a failure to.
pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliCommand, String> {
        parse_cli_args(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn no_arguments_uses_configured_document() {
        assert_eq!(parse(&[]), Ok(CliCommand::Run { document: None }));
    }

    #[test]
    fn positional_argument_is_the_document() {
        assert_eq!(
            parse(&["saves/osu.json"]),
            Ok(CliCommand::Run { document: Some(PathBuf::from("saves/osu.json")) })
        );
    }

    #[test]
    fn help_and_version_flags() {
        assert_eq!(parse(&["--help"]), Ok(CliCommand::Help));
        assert_eq!(parse(&["-V"]), Ok(CliCommand::Version));
    }

    #[test]
    fn unknown_flags_and_extra_arguments_are_rejected() {
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["a.json", "b.json"]).is_err());
    }
}
