use crate::state::messages::{StorageRequest, StorageResponse};
use anyhow::Context;
use chrono::Utc;
use dynasty_playoff::PlayoffDocument;
use dynasty_playoff::directory::StaticTeamDirectory;
use dynasty_playoff::import::ImportBatch;
use log::{debug, error, info};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Where the worker reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub document: PathBuf,
    pub import: PathBuf,
    pub teams: Option<PathBuf>,
}

/// Owns all file I/O. Requests are handled one at a time in arrival order.
pub struct StorageWorker {
    paths: StoragePaths,
    requests: mpsc::Receiver<StorageRequest>,
    responses: mpsc::Sender<StorageResponse>,
    is_loading: Arc<AtomicBool>,
}

impl StorageWorker {
    pub fn new(
        paths: StoragePaths,
        requests: mpsc::Receiver<StorageRequest>,
        responses: mpsc::Sender<StorageResponse>,
    ) -> Self {
        Self {
            paths,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = match request {
                StorageRequest::LoadDocument => self.handle_load_document().await,
                StorageRequest::LoadTeams => self.handle_load_teams().await,
                StorageRequest::LoadImport => self.handle_load_import().await,
                StorageRequest::SaveDocument { document } => self.handle_save_document(*document).await,
            };

            debug!("storage request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| StorageResponse::Error {
                message: format!("{err:#}"),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send storage response: {e}");
                break;
            }
        }
    }

    async fn handle_load_document(&self) -> anyhow::Result<StorageResponse> {
        let path = &self.paths.document;
        debug!("loading dynasty document from {}", path.display());
        let Some(content) = read_optional(path).await? else {
            info!("{} does not exist yet, starting an empty dynasty", path.display());
            return Ok(StorageResponse::DocumentLoaded {
                document: Box::default(),
                created: true,
            });
        };
        let document = PlayoffDocument::from_json(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(StorageResponse::DocumentLoaded { document: Box::new(document), created: false })
    }

    async fn handle_load_teams(&self) -> anyhow::Result<StorageResponse> {
        let Some(path) = &self.paths.teams else {
            return Ok(StorageResponse::TeamsLoaded { directory: StaticTeamDirectory::default() });
        };
        debug!("loading team directory from {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let directory = StaticTeamDirectory::from_json(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        info!("loaded {} teams", directory.len());
        Ok(StorageResponse::TeamsLoaded { directory })
    }

    async fn handle_load_import(&self) -> anyhow::Result<StorageResponse> {
        let path = &self.paths.import;
        debug!("loading import batch from {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let batch = ImportBatch::from_json(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(StorageResponse::ImportLoaded { batch })
    }

    /// Stamps and writes the document through a sibling temp file so a failed
    /// write never truncates the previous save.
    async fn handle_save_document(&self, mut document: PlayoffDocument) -> anyhow::Result<StorageResponse> {
        let path = &self.paths.document;
        let saved_at = Utc::now();
        document.stamp(saved_at);
        let payload = document.to_json_pretty()?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let staging = staging_path(path);
        tokio::fs::write(&staging, payload)
            .await
            .with_context(|| format!("writing {}", staging.display()))?;
        tokio::fs::rename(&staging, path)
            .await
            .with_context(|| format!("replacing {}", path.display()))?;

        info!("saved dynasty to {}", path.display());
        Ok(StorageResponse::DocumentSaved { saved_at })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(StorageResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(StorageResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(StorageResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

/// `Ok(None)` when the file simply isn't there yet.
async fn read_optional(path: &Path) -> anyhow::Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynasty_playoff::{Game, RoundName};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dynasty-tui-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn spawn_worker(paths: StoragePaths) -> (mpsc::Sender<StorageRequest>, mpsc::Receiver<StorageResponse>) {
        let (req_tx, req_rx) = mpsc::channel(8);
        let (resp_tx, resp_rx) = mpsc::channel(64);
        tokio::spawn(StorageWorker::new(paths, req_rx, resp_tx).run());
        (req_tx, resp_rx)
    }

    async fn next_answer(responses: &mut mpsc::Receiver<StorageResponse>) -> StorageResponse {
        loop {
            match responses.recv().await.unwrap() {
                StorageResponse::LoadingStateChanged { .. } => continue,
                other => return other,
            }
        }
    }

    #[test]
    fn staging_path_sits_next_to_document() {
        assert_eq!(staging_path(Path::new("saves/dynasty.json")), PathBuf::from("saves/dynasty.json.tmp"));
    }

    #[tokio::test]
    async fn missing_document_starts_empty_dynasty() {
        let dir = scratch_dir("missing");
        let paths = StoragePaths {
            document: dir.join("dynasty.json"),
            import: dir.join("dynasty.import.json"),
            teams: None,
        };
        let (requests, mut responses) = spawn_worker(paths);

        requests.send(StorageRequest::LoadDocument).await.unwrap();
        match next_answer(&mut responses).await {
            StorageResponse::DocumentLoaded { document, created } => {
                assert!(created);
                assert!(document.years().is_empty());
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn saved_document_loads_back() {
        let dir = scratch_dir("roundtrip");
        let paths = StoragePaths {
            document: dir.join("nested").join("dynasty.json"),
            import: dir.join("dynasty.import.json"),
            teams: None,
        };
        let (requests, mut responses) = spawn_worker(paths);

        let mut document = PlayoffDocument { user_team: Some("OSU".into()), ..Default::default() };
        document
            .record_game(2024, RoundName::Championship, Game::new("OSU", "ND").with_scores(34, 23))
            .unwrap();
        requests
            .send(StorageRequest::SaveDocument { document: Box::new(document.clone()) })
            .await
            .unwrap();
        assert!(matches!(next_answer(&mut responses).await, StorageResponse::DocumentSaved { .. }));

        requests.send(StorageRequest::LoadDocument).await.unwrap();
        match next_answer(&mut responses).await {
            StorageResponse::DocumentLoaded { document: loaded, created } => {
                assert!(!created);
                assert!(loaded.updated_at.is_some());
                assert_eq!(loaded.round(2024, RoundName::Championship), document.round(2024, RoundName::Championship));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreadable_import_is_reported_as_error() {
        let dir = scratch_dir("import");
        let import = dir.join("dynasty.import.json");
        std::fs::write(&import, "{\"year\": \"soon\"}").unwrap();
        let paths = StoragePaths { document: dir.join("dynasty.json"), import, teams: None };
        let (requests, mut responses) = spawn_worker(paths);

        requests.send(StorageRequest::LoadImport).await.unwrap();
        match next_answer(&mut responses).await {
            StorageResponse::Error { message } => assert!(message.contains("parsing"), "{message}"),
            other => panic!("unexpected response: {other:?}"),
        }
    }
}
