pub mod directory;
pub mod error;
pub mod import;
pub mod matcher;
pub mod merge;
pub mod resolver;
pub mod store;
pub mod topology;

pub use error::{PlayoffError, PlayoffResult};
pub use resolver::{BracketSlot, PlayoffTask, Resolver};
pub use store::{DynastyContext, PlayoffDocument};
pub use topology::Bowl;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type TeamId = String;
pub type Seed = u8;

// ---------------------------------------------------------------------------
// Domain types: the JSON shape the document store holds
// ---------------------------------------------------------------------------

/// One playoff game. The team pair is unordered for identity; order only
/// matters for display and for lining scores up with teams.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub team1: TeamId,
    pub team2: TeamId,
    #[serde(default)]
    pub team1_score: Option<u16>,
    #[serde(default)]
    pub team2_score: Option<u16>,
    #[serde(default)]
    pub winner: Option<TeamId>,
    #[serde(default)]
    pub bowl_name: Option<String>,
    /// First Round only: the seeds that produced team1/team2 at entry time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed1: Option<Seed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed2: Option<Seed>,
}

impl Game {
    pub fn new(team1: impl Into<TeamId>, team2: impl Into<TeamId>) -> Self {
        Self { team1: team1.into(), team2: team2.into(), ..Self::default() }
    }

    pub fn first_round(
        seed1: Seed,
        team1: impl Into<TeamId>,
        seed2: Seed,
        team2: impl Into<TeamId>,
    ) -> Self {
        Self {
            seed1: Some(seed1),
            seed2: Some(seed2),
            ..Self::new(team1, team2)
        }
    }

    /// Record a final score. The winner is always derived here, never taken
    /// from the caller; equal scores leave the game without a winner.
    pub fn with_scores(mut self, team1_score: u16, team2_score: u16) -> Self {
        self.team1_score = Some(team1_score);
        self.team2_score = Some(team2_score);
        self.winner = self.derived_winner().map(str::to_owned);
        self
    }

    pub fn in_bowl(mut self, bowl: Bowl) -> Self {
        self.bowl_name = Some(bowl.name().to_owned());
        self
    }

    pub fn bowl(&self) -> Option<Bowl> {
        self.bowl_name.as_deref().and_then(Bowl::from_name)
    }

    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }

    pub fn has_both_scores(&self) -> bool {
        self.team1_score.is_some() && self.team2_score.is_some()
    }

    /// The team with the strictly higher score, recomputed from the scores.
    pub fn derived_winner(&self) -> Option<&str> {
        let (s1, s2) = self.team1_score.zip(self.team2_score)?;
        match s1.cmp(&s2) {
            std::cmp::Ordering::Greater => Some(self.team1.as_str()),
            std::cmp::Ordering::Less => Some(self.team2.as_str()),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The stored winner, trusted only while both scores are present and it
    /// still names one of the two teams.
    pub fn winner(&self) -> Option<&str> {
        if !self.has_both_scores() {
            return None;
        }
        let winner = self.winner.as_deref()?;
        self.involves(winner).then_some(winner)
    }

    pub fn is_decided(&self) -> bool {
        self.winner().is_some()
    }

    pub fn loser(&self) -> Option<&str> {
        let winner = self.winner()?;
        self.opponent_of(winner)
    }

    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        if self.team1 == team {
            Some(self.team2.as_str())
        } else if self.team2 == team {
            Some(self.team1.as_str())
        } else {
            None
        }
    }

    pub fn score_for(&self, team: &str) -> Option<u16> {
        if self.team1 == team {
            self.team1_score
        } else if self.team2 == team {
            self.team2_score
        } else {
            None
        }
    }

    /// The First Round seed recorded next to `team`, by position.
    pub fn seed_for(&self, team: &str) -> Option<Seed> {
        if self.team1 == team {
            self.seed1
        } else if self.team2 == team {
            self.seed2
        } else {
            None
        }
    }
}

/// Round names double as the document's fixed round-array keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundName {
    #[default]
    FirstRound,
    Quarterfinals,
    Semifinals,
    Championship,
}

impl RoundName {
    pub const ALL: [RoundName; 4] = [
        RoundName::FirstRound,
        RoundName::Quarterfinals,
        RoundName::Semifinals,
        RoundName::Championship,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RoundName::FirstRound => "firstRound",
            RoundName::Quarterfinals => "quarterfinals",
            RoundName::Semifinals => "semifinals",
            RoundName::Championship => "championship",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoundName::FirstRound => "First Round",
            RoundName::Quarterfinals => "Quarterfinals",
            RoundName::Semifinals => "Semifinals",
            RoundName::Championship => "Championship",
        }
    }

    /// Maximum number of games the round can hold.
    pub fn capacity(&self) -> usize {
        match self {
            RoundName::FirstRound | RoundName::Quarterfinals => 4,
            RoundName::Semifinals => 2,
            RoundName::Championship => 1,
        }
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            RoundName::FirstRound => None,
            RoundName::Quarterfinals => Some(RoundName::FirstRound),
            RoundName::Semifinals => Some(RoundName::Quarterfinals),
            RoundName::Championship => Some(RoundName::Semifinals),
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            RoundName::FirstRound => Some(RoundName::Quarterfinals),
            RoundName::Quarterfinals => Some(RoundName::Semifinals),
            RoundName::Semifinals => Some(RoundName::Championship),
            RoundName::Championship => None,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.key() == key)
    }
}

/// The four round arrays of one season.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundResults {
    pub first_round: Vec<Game>,
    pub quarterfinals: Vec<Game>,
    pub semifinals: Vec<Game>,
    pub championship: Vec<Game>,
}

impl RoundResults {
    pub fn get(&self, round: RoundName) -> &[Game] {
        match round {
            RoundName::FirstRound => &self.first_round,
            RoundName::Quarterfinals => &self.quarterfinals,
            RoundName::Semifinals => &self.semifinals,
            RoundName::Championship => &self.championship,
        }
    }

    pub fn get_mut(&mut self, round: RoundName) -> &mut Vec<Game> {
        match round {
            RoundName::FirstRound => &mut self.first_round,
            RoundName::Quarterfinals => &mut self.quarterfinals,
            RoundName::Semifinals => &mut self.semifinals,
            RoundName::Championship => &mut self.championship,
        }
    }

    pub fn is_empty(&self) -> bool {
        RoundName::ALL.iter().all(|r| self.get(*r).is_empty())
    }
}

/// Seed number (1–12) → team for one season. At most one team per seed and
/// one seed per team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Seed, TeamId>", into = "BTreeMap<Seed, TeamId>")]
pub struct SeedAssignment(BTreeMap<Seed, TeamId>);

impl SeedAssignment {
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn from_pairs<I, T>(pairs: I) -> PlayoffResult<Self>
    where
        I: IntoIterator<Item = (Seed, T)>,
        T: Into<TeamId>,
    {
        let mut seeds = Self::new();
        for (seed, team) in pairs {
            seeds.assign(seed, team)?;
        }
        Ok(seeds)
    }

    pub fn assign(&mut self, seed: Seed, team: impl Into<TeamId>) -> PlayoffResult<()> {
        if !topology::is_valid_seed(seed) {
            return Err(PlayoffError::InvalidSeed(seed));
        }
        let team = team.into();
        if team.trim().is_empty() {
            return Err(PlayoffError::MissingTeam);
        }
        if let Some(held) = self.seed_of(&team)
            && held != seed
        {
            return Err(PlayoffError::DuplicateTeam { team, seed: held });
        }
        self.0.insert(seed, team);
        Ok(())
    }

    pub fn team(&self, seed: Seed) -> Option<&str> {
        self.0.get(&seed).map(String::as_str)
    }

    pub fn seed_of(&self, team: &str) -> Option<Seed> {
        self.0.iter().find(|(_, t)| t.as_str() == team).map(|(s, _)| *s)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<BTreeMap<Seed, TeamId>> for SeedAssignment {
    type Error = PlayoffError;

    fn try_from(map: BTreeMap<Seed, TeamId>) -> Result<Self, Self::Error> {
        Self::from_pairs(map)
    }
}

impl From<SeedAssignment> for BTreeMap<Seed, TeamId> {
    fn from(seeds: SeedAssignment) -> Self {
        seeds.0
    }
}
