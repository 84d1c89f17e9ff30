//! The persisted dynasty document: seeds and the four round arrays, each
//! keyed by season year.
//!
//! Everything here is plain data plus the few write paths that keep it
//! consistent. Bracket questions go through [`PlayoffDocument::resolver`].

use crate::error::{PlayoffError, PlayoffResult};
use crate::import::{ImportBatch, RawGame};
use crate::merge;
use crate::resolver::{PlayoffTask, Resolver};
use crate::{Game, RoundName, SeedAssignment, TeamId};
use chrono::{DateTime, Datelike, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

static NO_SEEDS: SeedAssignment = SeedAssignment::new();

type YearMap<T> = BTreeMap<u16, T>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayoffDocument {
    #[serde(default)]
    pub user_team: Option<TeamId>,
    #[serde(default)]
    pub cfp_seeds_by_year: YearMap<SeedAssignment>,
    #[serde(default)]
    pub first_round: YearMap<Vec<Game>>,
    #[serde(default)]
    pub quarterfinals: YearMap<Vec<Game>>,
    #[serde(default)]
    pub semifinals: YearMap<Vec<Game>>,
    #[serde(default)]
    pub championship: YearMap<Vec<Game>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The season being viewed and the team the user coaches. Passed explicitly
/// to everything that needs "current" state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynastyContext {
    pub year: u16,
    pub user_team: TeamId,
}

impl DynastyContext {
    pub fn new(year: u16, user_team: impl Into<TeamId>) -> Self {
        Self { year, user_team: user_team.into() }
    }

    /// The newest season in the document, or `fallback_year` for a fresh one.
    pub fn for_document(document: &PlayoffDocument, fallback_year: u16) -> Self {
        Self {
            year: document.latest_year().unwrap_or(fallback_year),
            user_team: document.user_team.clone().unwrap_or_default(),
        }
    }

    pub fn next_task(&self, document: &PlayoffDocument) -> PlayoffTask {
        document.resolver(self.year).next_task(&self.user_team)
    }
}

impl PlayoffDocument {
    pub fn from_json(content: &str) -> PlayoffResult<Self> {
        serde_json::from_str(content).map_err(|e| PlayoffError::Parsing(e, "playoff document".into()))
    }

    pub fn to_json_pretty(&self) -> PlayoffResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PlayoffError::Parsing(e, "playoff document".into()))
    }

    fn rounds(&self, round: RoundName) -> &YearMap<Vec<Game>> {
        match round {
            RoundName::FirstRound => &self.first_round,
            RoundName::Quarterfinals => &self.quarterfinals,
            RoundName::Semifinals => &self.semifinals,
            RoundName::Championship => &self.championship,
        }
    }

    fn rounds_mut(&mut self, round: RoundName) -> &mut YearMap<Vec<Game>> {
        match round {
            RoundName::FirstRound => &mut self.first_round,
            RoundName::Quarterfinals => &mut self.quarterfinals,
            RoundName::Semifinals => &mut self.semifinals,
            RoundName::Championship => &mut self.championship,
        }
    }

    /// Every season that has seeds or any round entry, oldest first.
    pub fn years(&self) -> Vec<u16> {
        let mut years: BTreeSet<u16> = self.cfp_seeds_by_year.keys().copied().collect();
        for round in RoundName::ALL {
            years.extend(self.rounds(round).keys().copied());
        }
        years.into_iter().collect()
    }

    pub fn latest_year(&self) -> Option<u16> {
        self.years().last().copied()
    }

    /// Create the empty round arrays for a new season. Existing data is kept.
    pub fn start_season(&mut self, year: u16) {
        for round in RoundName::ALL {
            self.rounds_mut(round).entry(year).or_default();
        }
    }

    pub fn seeds(&self, year: u16) -> Option<&SeedAssignment> {
        self.cfp_seeds_by_year.get(&year)
    }

    pub fn has_games(&self, year: u16) -> bool {
        RoundName::ALL.iter().any(|r| !self.round(year, *r).is_empty())
    }

    /// Seeds can be edited freely until the season's first game is stored.
    pub fn set_seeds(&mut self, year: u16, seeds: SeedAssignment) -> PlayoffResult<()> {
        if self.seeds(year) == Some(&seeds) {
            return Ok(());
        }
        if self.has_games(year) {
            return Err(PlayoffError::SeedsLocked(year));
        }
        info!("setting {} seeds for {year}", seeds.len());
        self.cfp_seeds_by_year.insert(year, seeds);
        self.start_season(year);
        Ok(())
    }

    pub fn round(&self, year: u16, round: RoundName) -> &[Game] {
        self.rounds(round).get(&year).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn replace_round(&mut self, year: u16, round: RoundName, games: Vec<Game>) {
        self.rounds_mut(round).insert(year, games);
    }

    /// Record one hand-entered game. The stored round is untouched on error.
    pub fn record_game(&mut self, year: u16, round: RoundName, game: Game) -> PlayoffResult<()> {
        let games = merge::record_game(self.round(year, round), game, round)?;
        debug!("{} for {year} now holds {} games", round.label(), games.len());
        self.replace_round(year, round, games);
        Ok(())
    }

    /// Merge one imported round, protecting `protected_team`'s stored game.
    pub fn import_round(
        &mut self,
        year: u16,
        round: RoundName,
        imported: &[RawGame],
        protected_team: &str,
    ) -> &[Game] {
        let merged = merge::merge_round(self.round(year, round), imported, protected_team);
        if merged.len() > round.capacity() {
            warn!(
                "{} for {year} holds {} games after import, more than the {} it should",
                round.label(),
                merged.len(),
                round.capacity()
            );
        }
        self.replace_round(year, round, merged);
        self.round(year, round)
    }

    /// Apply a bulk import: one merge per round the batch carries. Rounds it
    /// leaves out are not touched. Returns the rounds that were merged.
    pub fn apply_import(&mut self, batch: &ImportBatch, protected_team: &str) -> Vec<RoundName> {
        let mut touched = Vec::with_capacity(batch.rounds.len());
        for (round, imported) in &batch.rounds {
            let stored = self.import_round(batch.year, *round, imported, protected_team).len();
            info!("imported {} for {}: {stored} games", round.label(), batch.year);
            touched.push(*round);
        }
        touched
    }

    /// A read-only bracket view over one season.
    pub fn resolver(&self, year: u16) -> Resolver<'_> {
        let seeds = self.seeds(year).unwrap_or(&NO_SEEDS);
        Resolver::from_rounds(seeds, RoundName::ALL.map(|r| self.round(year, r)))
    }

    pub fn stamp(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}

/// The season a date belongs to. The playoff runs into January, so January
/// and February still count as the previous fall's season.
pub fn default_season_year(now: DateTime<Utc>) -> u16 {
    let year = if now.month() <= 2 { now.year() - 1 } else { now.year() };
    u16::try_from(year).unwrap_or_default()
}
