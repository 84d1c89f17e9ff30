use crate::app::{App, MenuItem};
use crate::state::messages::StorageRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    storage_requests: &mpsc::Sender<StorageRequest>,
) {
    let mut guard = app.lock().await;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Bracket),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Road),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Logs),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Bracket navigation
        (MenuItem::Bracket, Char('l') | KeyCode::Right, _) => guard.bracket_next_round(),
        (MenuItem::Bracket, Char('h') | KeyCode::Left, _) => guard.bracket_prev_round(),
        (MenuItem::Bracket, Char('j') | KeyCode::Down, _) => guard.bracket_game_down(),
        (MenuItem::Bracket, Char('k') | KeyCode::Up, _) => guard.bracket_game_up(),

        // Seasons
        (_, Char('['), _) => guard.previous_year(),
        (_, Char(']'), _) => guard.next_year(),

        // Storage
        (_, Char('i'), _) => {
            drop(guard);
            let _ = storage_requests.send(StorageRequest::LoadImport).await;
        }
        (_, Char('s'), _) => {
            if let Some(document) = guard.save_request() {
                drop(guard);
                let _ = storage_requests
                    .send(StorageRequest::SaveDocument { document: Box::new(document) })
                    .await;
            }
        }

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),

        _ => {}
    }
}
