use crate::{RoundName, Seed, TeamId};
use std::fmt;

pub type PlayoffResult<T> = Result<T, PlayoffError>;

#[derive(Debug)]
pub enum PlayoffError {
    InvalidSeed(u8),
    DuplicateTeam { team: TeamId, seed: Seed },
    SeedsLocked(u16),
    MissingTeam,
    TiedScore { team1: TeamId, team2: TeamId, score: u16 },
    WinnerMismatch { winner: TeamId, team1: TeamId, team2: TeamId },
    RoundFull { round: RoundName, capacity: usize },
    Parsing(serde_json::Error, String),
}

impl fmt::Display for PlayoffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayoffError::InvalidSeed(seed) => write!(f, "Invalid seed {seed}: seeds run 1 through 12"),
            PlayoffError::DuplicateTeam { team, seed } => {
                write!(f, "Team {team} already holds seed {seed}")
            }
            PlayoffError::SeedsLocked(year) => {
                write!(f, "Seeds for {year} are locked: playoff games already reference them")
            }
            PlayoffError::MissingTeam => write!(f, "Game is missing a team"),
            PlayoffError::TiedScore { team1, team2, score } => {
                write!(f, "{team1} vs {team2} is tied {score}-{score}: a playoff game needs a winner")
            }
            PlayoffError::WinnerMismatch { winner, team1, team2 } => {
                write!(f, "Winner {winner} did not play in {team1} vs {team2}")
            }
            PlayoffError::RoundFull { round, capacity } => {
                write!(f, "{} already has {capacity} games", round.label())
            }
            PlayoffError::Parsing(e, what) => write!(f, "Parse error for {what}: {e}"),
        }
    }
}

impl std::error::Error for PlayoffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlayoffError::Parsing(e, _) => Some(e),
            _ => None,
        }
    }
}
