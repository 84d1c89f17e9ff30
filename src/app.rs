use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use chrono::{DateTime, Local, Utc};
use dynasty_playoff::PlayoffDocument;
use dynasty_playoff::directory::StaticTeamDirectory;
use dynasty_playoff::import::ImportBatch;
use log::{info, warn};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Bracket,
    Road,
    Logs,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        Self { state: AppState::new(), settings }
    }

    // -----------------------------------------------------------------------
    // Storage response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_document_loaded(&mut self, document: PlayoffDocument, created: bool) {
        self.state.last_error = None;
        self.state.bracket.load(document, Utc::now());
        self.state.status = Some(if created {
            format!("new dynasty, will save to {}", self.settings.document_path.display())
        } else {
            format!("loaded {}", self.settings.document_path.display())
        });
    }

    pub fn on_teams_loaded(&mut self, directory: StaticTeamDirectory) {
        self.state.teams = directory;
    }

    /// Merge the batch in memory. Returns the document to persist, or `None`
    /// when nothing changed.
    pub fn on_import_loaded(&mut self, batch: ImportBatch) -> Option<PlayoffDocument> {
        if self.state.bracket.document.is_none() {
            self.on_error("import ignored: the dynasty document has not loaded".to_string());
            return None;
        }
        let touched = self.state.bracket.apply_import(&batch);
        if touched.is_empty() {
            warn!("import for {} carried no rounds", batch.year);
            self.state.status = Some(format!("import for {} had no rounds", batch.year));
            return None;
        }

        let labels: Vec<&str> = touched.iter().map(|r| r.label()).collect();
        info!("import merged {} for {}", labels.join(", "), batch.year);
        self.state.last_error = None;
        self.state.status = Some(format!("imported {} ({})", labels.join(", "), batch.year));
        self.state.bracket.document.clone()
    }

    pub fn on_document_saved(&mut self, saved_at: DateTime<Utc>) {
        self.state.bracket.mark_saved(saved_at);
        self.state.last_saved_at = Some(saved_at.with_timezone(&Local).format("%H:%M").to_string());
        self.state.status = Some("saved".to_string());
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    /// The document to hand to the storage worker for an explicit save.
    pub fn save_request(&mut self) -> Option<PlayoffDocument> {
        let document = self.state.bracket.document.clone();
        if document.is_none() {
            self.on_error("nothing to save yet".to_string());
        }
        document
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Bracket navigation, delegated to BracketState
    // -----------------------------------------------------------------------

    pub fn bracket_next_round(&mut self) {
        self.state.bracket.navigate_round_next();
    }

    pub fn bracket_prev_round(&mut self) {
        self.state.bracket.navigate_round_prev();
    }

    pub fn bracket_game_down(&mut self) {
        self.state.bracket.navigate_game_down();
    }

    pub fn bracket_game_up(&mut self) {
        self.state.bracket.navigate_game_up();
    }

    pub fn previous_year(&mut self) {
        self.state.bracket.cycle_year(false);
    }

    pub fn next_year(&mut self) {
        self.state.bracket.cycle_year(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynasty_playoff::RoundName;
    use dynasty_playoff::import::RawGame;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn app() -> App {
        App::new(AppSettings::load(Some("test-dynasty.json".into())))
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut app = app();
        app.update_tab(MenuItem::Road);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Road);
    }

    #[test]
    fn import_before_load_is_an_error() {
        let mut app = app();
        assert!(app.on_import_loaded(ImportBatch::default()).is_none());
        assert!(app.state.last_error.is_some());
        assert!(app.save_request().is_none());
    }

    #[test]
    fn import_hands_back_document_to_save() {
        let mut app = app();
        app.on_document_loaded(PlayoffDocument { user_team: Some("OSU".into()), ..Default::default() }, true);
        assert!(app.state.status.as_deref().is_some_and(|s| s.starts_with("new dynasty")));

        let row: RawGame = serde_json::from_value(json!({"team1": "OSU", "team2": "ND", "team1Score": 34, "team2Score": 23})).unwrap();
        let batch = ImportBatch { year: 2024, rounds: BTreeMap::from([(RoundName::Championship, vec![row])]) };
        let document = app.on_import_loaded(batch).unwrap();
        assert_eq!(document.round(2024, RoundName::Championship)[0].winner.as_deref(), Some("OSU"));
        assert!(app.state.bracket.dirty);

        app.on_document_saved(Utc::now());
        assert!(!app.state.bracket.dirty);
        assert!(app.state.last_saved_at.is_some());
    }
}
