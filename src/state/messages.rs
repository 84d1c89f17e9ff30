use crate::state::storage::LoadingState;
use chrono::{DateTime, Utc};
use crossterm::event::KeyEvent;
use dynasty_playoff::PlayoffDocument;
use dynasty_playoff::directory::StaticTeamDirectory;
use dynasty_playoff::import::ImportBatch;

#[derive(Debug, Clone)]
pub enum StorageRequest {
    LoadDocument,
    LoadTeams,
    LoadImport,
    /// Write the whole document in one go.
    SaveDocument { document: Box<PlayoffDocument> },
}

#[derive(Debug)]
pub enum StorageResponse {
    LoadingStateChanged { loading_state: LoadingState },
    /// `created` is set when no file existed and an empty dynasty was started.
    DocumentLoaded { document: Box<PlayoffDocument>, created: bool },
    TeamsLoaded { directory: StaticTeamDirectory },
    ImportLoaded { batch: ImportBatch },
    DocumentSaved { saved_at: DateTime<Utc> },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
