use crate::app::MenuItem;
use chrono::{DateTime, Utc};
use dynasty_playoff::directory::StaticTeamDirectory;
use dynasty_playoff::import::ImportBatch;
use dynasty_playoff::store::default_season_year;
use dynasty_playoff::{BracketSlot, DynastyContext, PlayoffDocument, PlayoffTask, Resolver, RoundName};

// ---------------------------------------------------------------------------
// Bracket / season state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct BracketState {
    pub document: Option<PlayoffDocument>,
    /// Season on screen and the user's team.
    pub ctx: DynastyContext,
    /// The round the user has navigated to.
    pub view_round: RoundName,
    /// Selected slot index within `view_round`.
    pub selected_game: usize,
    /// In-memory changes not yet confirmed written.
    pub dirty: bool,
}

impl BracketState {
    /// Store a freshly loaded document and jump to its newest season.
    pub fn load(&mut self, document: PlayoffDocument, now: DateTime<Utc>) {
        self.ctx = DynastyContext::for_document(&document, default_season_year(now));
        self.view_round = detect_active_round(&document, self.ctx.year);
        self.selected_game = 0;
        self.dirty = false;
        self.document = Some(document);
    }

    pub fn resolver(&self) -> Option<Resolver<'_>> {
        self.document.as_ref().map(|d| d.resolver(self.ctx.year))
    }

    pub fn slots(&self) -> Vec<BracketSlot<'_>> {
        self.resolver()
            .map(|r| r.slots(self.view_round))
            .unwrap_or_default()
    }

    /// `None` until a document is loaded and names the user's team.
    pub fn next_task(&self) -> Option<PlayoffTask> {
        let document = self.document.as_ref()?;
        if self.ctx.user_team.is_empty() {
            return None;
        }
        Some(self.ctx.next_task(document))
    }

    pub fn navigate_round_next(&mut self) {
        if let Some(next) = self.view_round.next() {
            self.view_round = next;
            self.selected_game = 0;
        }
    }

    pub fn navigate_round_prev(&mut self) {
        if let Some(prev) = self.view_round.prev() {
            self.view_round = prev;
            self.selected_game = 0;
        }
    }

    pub fn navigate_game_down(&mut self) {
        let max = self.view_round.capacity().saturating_sub(1);
        if self.selected_game < max {
            self.selected_game += 1;
        }
    }

    pub fn navigate_game_up(&mut self) {
        self.selected_game = self.selected_game.saturating_sub(1);
    }

    /// Seasons in the document plus the one on screen, oldest first.
    pub fn years(&self) -> Vec<u16> {
        let mut years = self.document.as_ref().map(PlayoffDocument::years).unwrap_or_default();
        if !years.contains(&self.ctx.year) {
            years.push(self.ctx.year);
            years.sort_unstable();
        }
        years
    }

    pub fn cycle_year(&mut self, forward: bool) {
        let years = self.years();
        let Some(idx) = years.iter().position(|y| *y == self.ctx.year) else {
            return;
        };
        let target = if forward {
            years.get(idx + 1)
        } else {
            idx.checked_sub(1).and_then(|i| years.get(i))
        };
        if let Some(&year) = target {
            self.show_year(year);
        }
    }

    /// Merge a bulk import into the document, protecting the user's games.
    /// Returns the rounds that were merged.
    pub fn apply_import(&mut self, batch: &ImportBatch) -> Vec<RoundName> {
        let Some(document) = self.document.as_mut() else {
            return Vec::new();
        };
        let touched = document.apply_import(batch, &self.ctx.user_team);
        if !touched.is_empty() {
            self.dirty = true;
            self.show_year(batch.year);
        }
        touched
    }

    pub fn mark_saved(&mut self, saved_at: DateTime<Utc>) {
        if let Some(document) = self.document.as_mut() {
            document.stamp(saved_at);
        }
        self.dirty = false;
    }

    fn show_year(&mut self, year: u16) {
        self.ctx.year = year;
        self.view_round = self
            .document
            .as_ref()
            .map(|d| detect_active_round(d, year))
            .unwrap_or_default();
        self.selected_game = 0;
    }
}

/// The first round that is not yet full of decided games.
fn detect_active_round(document: &PlayoffDocument, year: u16) -> RoundName {
    RoundName::ALL
        .into_iter()
        .find(|round| {
            let games = document.round(year, *round);
            games.len() < round.capacity() || games.iter().any(|g| !g.is_decided())
        })
        .unwrap_or(RoundName::Championship)
}

// ---------------------------------------------------------------------------
// Top-level app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub bracket: BracketState,
    pub teams: StaticTeamDirectory,
    pub last_error: Option<String>,
    pub status: Option<String>,
    /// Local wall-clock time of the last successful save, "HH:MM".
    pub last_saved_at: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dynasty_playoff::import::RawGame;
    use dynasty_playoff::{Game, SeedAssignment};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn seeds() -> SeedAssignment {
        SeedAssignment::from_pairs((1..=12).map(|s| (s, format!("T{s}")))).unwrap()
    }

    fn loaded(document: PlayoffDocument) -> BracketState {
        let mut state = BracketState::default();
        state.load(document, Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap());
        state
    }

    fn finished_first_round() -> Vec<Game> {
        [(5, 12), (6, 11), (7, 10), (8, 9)]
            .into_iter()
            .map(|(a, b)| Game::first_round(a, format!("T{a}"), b, format!("T{b}")).with_scores(30, 20))
            .collect()
    }

    #[test]
    fn empty_document_opens_on_current_season() {
        let state = loaded(PlayoffDocument::default());
        assert_eq!(state.ctx.year, 2024);
        assert_eq!(state.view_round, RoundName::FirstRound);
        assert_eq!(state.next_task(), None, "no user team yet");
        assert_eq!(state.slots().len(), 4);
    }

    #[test]
    fn load_jumps_to_first_unfinished_round() {
        let mut document = PlayoffDocument { user_team: Some("T8".into()), ..Default::default() };
        document.set_seeds(2023, seeds()).unwrap();
        document.replace_round(2023, RoundName::FirstRound, finished_first_round());

        let state = loaded(document);
        assert_eq!(state.ctx.year, 2023);
        assert_eq!(state.view_round, RoundName::Quarterfinals);
        assert!(matches!(
            state.next_task(),
            Some(PlayoffTask::Play { round: RoundName::Quarterfinals, .. })
        ));
    }

    #[test]
    fn game_selection_stays_inside_round() {
        let mut state = loaded(PlayoffDocument::default());
        for _ in 0..10 {
            state.navigate_game_down();
        }
        assert_eq!(state.selected_game, 3);

        state.navigate_round_next();
        state.navigate_round_next();
        assert_eq!(state.view_round, RoundName::Semifinals);
        assert_eq!(state.selected_game, 0);
        state.navigate_game_down();
        state.navigate_game_down();
        assert_eq!(state.selected_game, 1);

        state.navigate_round_next();
        state.navigate_round_next();
        assert_eq!(state.view_round, RoundName::Championship);
        state.navigate_game_up();
        assert_eq!(state.selected_game, 0);
    }

    #[test]
    fn year_cycling_walks_known_seasons() {
        let mut document = PlayoffDocument::default();
        document.set_seeds(2022, seeds()).unwrap();
        document.set_seeds(2024, seeds()).unwrap();
        let mut state = loaded(document);
        assert_eq!(state.ctx.year, 2024);

        state.cycle_year(true);
        assert_eq!(state.ctx.year, 2024, "already at the newest season");
        state.cycle_year(false);
        assert_eq!(state.ctx.year, 2022);
        state.cycle_year(false);
        assert_eq!(state.ctx.year, 2022);
    }

    #[test]
    fn import_marks_dirty_and_shows_imported_season() {
        let mut document = PlayoffDocument { user_team: Some("T1".into()), ..Default::default() };
        document.set_seeds(2024, seeds()).unwrap();
        document.set_seeds(2025, seeds()).unwrap();
        let mut state = loaded(document);
        assert_eq!(state.ctx.year, 2025);

        let row: RawGame = serde_json::from_value(json!({"team1": "T5", "team2": "T12", "team1Score": 21, "team2Score": "7"})).unwrap();
        let batch = ImportBatch { year: 2024, rounds: BTreeMap::from([(RoundName::FirstRound, vec![row])]) };

        assert_eq!(state.apply_import(&batch), vec![RoundName::FirstRound]);
        assert!(state.dirty);
        assert_eq!(state.ctx.year, 2024);
        let resolver = state.resolver().unwrap();
        assert_eq!(resolver.first_round_winner(5, 12), Some("T5"));

        state.mark_saved(Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap());
        assert!(!state.dirty);
        assert!(state.document.as_ref().unwrap().updated_at.is_some());
    }

    #[test]
    fn import_without_document_is_ignored() {
        let mut state = BracketState::default();
        let batch = ImportBatch { year: 2024, rounds: BTreeMap::from([(RoundName::Semifinals, vec![])]) };
        assert!(state.apply_import(&batch).is_empty());
        assert!(!state.dirty);
    }
}
