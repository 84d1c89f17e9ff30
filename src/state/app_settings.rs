use crate::state::storage::StoragePaths;
use log::LevelFilter;
use std::path::{Path, PathBuf};

pub const DEFAULT_DOCUMENT: &str = "dynasty.json";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: LevelFilter,
    pub document_path: PathBuf,
    pub import_path: PathBuf,
    pub teams_path: Option<PathBuf>,
}

impl AppSettings {
    /// A document path given on the command line wins over `DYNASTY_DOCUMENT`.
    pub fn load(cli_document: Option<PathBuf>) -> Self {
        Self::from_lookup(cli_document, |key| std::env::var(key).ok())
    }

    fn from_lookup(cli_document: Option<PathBuf>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let document_path = cli_document
            .or_else(|| var("DYNASTY_DOCUMENT").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCUMENT));
        let import_path = var("DYNASTY_IMPORT")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_import_path(&document_path));
        let log_level = var("DYNASTY_LOG")
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Error);

        Self {
            full_screen: false,
            log_level,
            document_path,
            import_path,
            teams_path: var("DYNASTY_TEAMS").map(PathBuf::from),
        }
    }

    pub fn storage_paths(&self) -> StoragePaths {
        StoragePaths {
            document: self.document_path.clone(),
            import: self.import_path.clone(),
            teams: self.teams_path.clone(),
        }
    }
}

/// `saves/dynasty.json` imports from `saves/dynasty.import.json`.
fn default_import_path(document: &Path) -> PathBuf {
    let stem = document
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dynasty");
    document.with_file_name(format!("{stem}.import.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(cli: Option<&str>, env: &[(&str, &str)]) -> AppSettings {
        let env: HashMap<String, String> = env.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_lookup(cli.map(PathBuf::from), |key| env.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let s = settings(None, &[]);
        assert_eq!(s.document_path, PathBuf::from("dynasty.json"));
        assert_eq!(s.import_path, PathBuf::from("dynasty.import.json"));
        assert_eq!(s.teams_path, None);
        assert_eq!(s.log_level, LevelFilter::Error);
        assert!(!s.full_screen);
    }

    #[test]
    fn cli_document_beats_environment() {
        let s = settings(Some("saves/osu.json"), &[("DYNASTY_DOCUMENT", "other.json")]);
        assert_eq!(s.document_path, PathBuf::from("saves/osu.json"));
        assert_eq!(s.import_path, PathBuf::from("saves/osu.import.json"));
    }

    #[test]
    fn environment_overrides() {
        let s = settings(
            None,
            &[
                ("DYNASTY_DOCUMENT", "d.json"),
                ("DYNASTY_IMPORT", "sheet.json"),
                ("DYNASTY_TEAMS", "teams.json"),
                ("DYNASTY_LOG", "Debug"),
            ],
        );
        assert_eq!(s.document_path, PathBuf::from("d.json"));
        assert_eq!(s.import_path, PathBuf::from("sheet.json"));
        assert_eq!(s.teams_path, Some(PathBuf::from("teams.json")));
        assert_eq!(s.log_level, LevelFilter::Debug);
    }

    #[test]
    fn blank_or_bogus_values_fall_back() {
        let s = settings(None, &[("DYNASTY_DOCUMENT", "  "), ("DYNASTY_LOG", "chatty")]);
        assert_eq!(s.document_path, PathBuf::from(DEFAULT_DOCUMENT));
        assert_eq!(s.log_level, LevelFilter::Error);
    }
}
