//! Read-only team metadata, injected wherever names are displayed.

use crate::error::{PlayoffError, PlayoffResult};
use crate::TeamId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInfo {
    pub name: String,       // "Ohio State"
    #[serde(default)]
    pub mascot: String,     // "Buckeyes"
    #[serde(default)]
    pub abbrev: String,     // "OSU"
    #[serde(default)]
    pub color: Option<String>, // hex
}

pub trait TeamDirectory {
    fn lookup(&self, id: &str) -> Option<&TeamInfo>;

    /// Display name, falling back to the raw id for unknown teams.
    fn display_name(&self, id: &str) -> String {
        self.lookup(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| id.to_owned())
    }

    fn short_name(&self, id: &str) -> String {
        self.lookup(id)
            .map(|t| t.abbrev.as_str())
            .filter(|a| !a.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| id.to_owned())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticTeamDirectory {
    teams: HashMap<TeamId, TeamInfo>,
}

impl StaticTeamDirectory {
    pub fn from_json(content: &str) -> PlayoffResult<Self> {
        serde_json::from_str(content).map_err(|e| PlayoffError::Parsing(e, "team directory".into()))
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

impl TeamDirectory for StaticTeamDirectory {
    fn lookup(&self, id: &str) -> Option<&TeamInfo> {
        self.teams.get(id)
    }
}
