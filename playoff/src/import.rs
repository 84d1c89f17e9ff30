//! Wire types for bulk round imports.
//! Rows come out of spreadsheets, so scores and seeds may arrive as numbers,
//! numeric strings, blanks or not at all.
use crate::error::{PlayoffError, PlayoffResult};
use crate::{Game, RoundName, Seed};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawGame {
    #[serde(default)]
    pub team1: String,
    #[serde(default)]
    pub team2: String,
    #[serde(default)]
    pub team1_score: Value,
    #[serde(default)]
    pub team2_score: Value,
    /// Ignored on import: the winner is always recomputed from the scores.
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub bowl_name: Option<String>,
    #[serde(default)]
    pub seed1: Value,
    #[serde(default)]
    pub seed2: Value,
}

/// One bulk-import action: any subset of a season's rounds.
#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq)]
pub struct ImportBatch {
    pub year: u16,
    #[serde(default)]
    pub rounds: BTreeMap<RoundName, Vec<RawGame>>,
}

impl ImportBatch {
    pub fn from_json(content: &str) -> PlayoffResult<Self> {
        serde_json::from_str(content).map_err(|e| PlayoffError::Parsing(e, "import batch".into()))
    }
}

impl RawGame {
    /// Map a spreadsheet row to a domain game with coerced scores and no
    /// winner. Rows missing either team are dropped.
    pub fn to_game(&self) -> Option<Game> {
        let (team1, team2) = (self.team1.trim(), self.team2.trim());
        if team1.is_empty() || team2.is_empty() {
            warn!("dropping imported row with a blank team: {:?} vs {:?}", self.team1, self.team2);
            return None;
        }
        let bowl_name = self
            .bowl_name
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_owned);
        Some(Game {
            team1: team1.to_owned(),
            team2: team2.to_owned(),
            team1_score: coerce_score(&self.team1_score),
            team2_score: coerce_score(&self.team2_score),
            winner: None,
            bowl_name,
            seed1: coerce_seed(&self.seed1),
            seed2: coerce_seed(&self.seed2),
        })
    }
}

/// Non-negative whole numbers pass through, fractional values truncate
/// toward zero, numeric strings are trimmed and parsed by the same rules.
/// Anything else is no score.
pub fn coerce_score(value: &Value) -> Option<u16> {
    let n = match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }?;
    u16::try_from(n).ok()
}

fn coerce_seed(value: &Value) -> Option<Seed> {
    coerce_score(value)
        .and_then(|n| Seed::try_from(n).ok())
        .filter(|s| crate::topology::is_valid_seed(*s))
}

fn truncate(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0).then(|| f.trunc() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scores_coerce_from_numbers_and_strings() {
        assert_eq!(coerce_score(&json!(31)), Some(31));
        assert_eq!(coerce_score(&json!("24")), Some(24));
        assert_eq!(coerce_score(&json!(" 7 ")), Some(7));
        assert_eq!(coerce_score(&json!(17.9)), Some(17));
        assert_eq!(coerce_score(&json!("21.5")), Some(21));
        assert_eq!(coerce_score(&json!(0)), Some(0));
    }

    #[test]
    fn unusable_scores_become_none() {
        assert_eq!(coerce_score(&json!(null)), None);
        assert_eq!(coerce_score(&json!("")), None);
        assert_eq!(coerce_score(&json!("   ")), None);
        assert_eq!(coerce_score(&json!("TBD")), None);
        assert_eq!(coerce_score(&json!(-3)), None);
        assert_eq!(coerce_score(&json!(true)), None);
        assert_eq!(coerce_score(&json!(70000)), None);
    }

    #[test]
    fn raw_row_maps_to_undecided_game() {
        let raw: RawGame = serde_json::from_value(json!({
            "team1": " OSU ",
            "team2": "UGA",
            "team1Score": "28",
            "team2Score": 14,
            "winner": "UGA",
            "bowlName": "Peach Bowl",
            "seed1": "2"
        }))
        .unwrap();
        let game = raw.to_game().unwrap();
        assert_eq!(game.team1, "OSU");
        assert_eq!(game.team1_score, Some(28));
        assert_eq!(game.team2_score, Some(14));
        assert_eq!(game.winner, None, "winner is derived later, never copied");
        assert_eq!(game.bowl_name.as_deref(), Some("Peach Bowl"));
        assert_eq!(game.seed1, Some(2));
        assert_eq!(game.seed2, None);
    }

    #[test]
    fn rows_with_blank_teams_are_dropped() {
        let raw = RawGame { team1: "OSU".into(), team2: "  ".into(), ..Default::default() };
        assert!(raw.to_game().is_none());
    }

    #[test]
    fn out_of_range_seeds_are_dropped() {
        let raw = RawGame {
            team1: "A".into(),
            team2: "B".into(),
            seed1: json!(13),
            seed2: json!("12"),
            ..Default::default()
        };
        let game = raw.to_game().unwrap();
        assert_eq!((game.seed1, game.seed2), (None, Some(12)));
    }

    #[test]
    fn batch_parses_round_keys() {
        let batch = ImportBatch::from_json(
            r#"{"year": 2025, "rounds": {"quarterfinals": [{"team1": "A", "team2": "B"}], "semifinals": []}}"#,
        )
        .unwrap();
        assert_eq!(batch.year, 2025);
        assert_eq!(batch.rounds.len(), 2);
        assert_eq!(batch.rounds[&RoundName::Quarterfinals][0].team2, "B");

        let err = ImportBatch::from_json(r#"{"year": 2025, "rounds": {"bowls": []}}"#).unwrap_err();
        assert!(matches!(err, PlayoffError::Parsing(_, _)));
    }
}
