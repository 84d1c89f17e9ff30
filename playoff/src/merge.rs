//! Folding new results into a stored round array.
//!
//! Bulk imports replace the whole round, except that the user's own game
//! (the "protected" game) is carried over when the import leaves it out.
//! Single entries replace or append one game.

use crate::error::{PlayoffError, PlayoffResult};
use crate::import::RawGame;
use crate::matcher::{find_involving, position_of_matchup};
use crate::{Game, RoundName};
use log::{debug, warn};

/// Coerce and re-derive every imported row. Duplicate team pairs keep the
/// first row's position and the last row's content.
pub fn sanitize(imported: &[RawGame]) -> Vec<Game> {
    let mut games: Vec<Game> = Vec::with_capacity(imported.len());
    for game in imported.iter().filter_map(RawGame::to_game).map(settle) {
        match position_of_matchup(&games, &game.team1, &game.team2) {
            Some(idx) => {
                debug!("import lists {} vs {} twice, keeping the later row", game.team1, game.team2);
                games[idx] = game;
            }
            None => games.push(game),
        }
    }
    games
}

/// Derive the winner from the scores. A tied row keeps its scores and stays
/// undecided.
fn settle(mut game: Game) -> Game {
    if let (Some(s1), Some(s2)) = (game.team1_score, game.team2_score)
        && s1 == s2
    {
        warn!("{} vs {} imported tied {s1}-{s2}, leaving it undecided", game.team1, game.team2);
    }
    game.winner = game.derived_winner().map(str::to_owned);
    game
}

/// Merge a freshly imported round over the stored one.
///
/// The import is authoritative for every game. If it already carries a
/// game for `protected_team` it is returned as sanitized; otherwise the
/// stored protected game, if any, is appended unchanged.
pub fn merge_round(existing: &[Game], imported: &[RawGame], protected_team: &str) -> Vec<Game> {
    let mut merged = sanitize(imported);

    if find_involving(&merged, protected_team).is_some() {
        debug!("import includes {protected_team}'s game, taking it as-is");
        return merged;
    }

    if let Some(own) = find_involving(existing, protected_team) {
        debug!("carrying {protected_team}'s game ({} vs {}) over the import", own.team1, own.team2);
        merged.push(own.clone());
    }

    merged
}

/// Record one game entered by hand: replaces the stored game with the same
/// team pair, or appends while the round has room.
pub fn record_game(existing: &[Game], game: Game, round: RoundName) -> PlayoffResult<Vec<Game>> {
    let game = validate_entry(game)?;
    let mut games = existing.to_vec();
    match position_of_matchup(&games, &game.team1, &game.team2) {
        Some(idx) => games[idx] = game,
        None if games.len() >= round.capacity() => {
            return Err(PlayoffError::RoundFull { round, capacity: round.capacity() });
        }
        None => games.push(game),
    }
    Ok(games)
}

/// Hand-entered games are held to a stricter standard than imports: a tie
/// or a winner outside the pair is rejected rather than repaired.
fn validate_entry(mut game: Game) -> PlayoffResult<Game> {
    game.team1 = game.team1.trim().to_owned();
    game.team2 = game.team2.trim().to_owned();
    if game.team1.is_empty() || game.team2.is_empty() {
        return Err(PlayoffError::MissingTeam);
    }

    if let Some(claimed) = game.winner.as_deref()
        && !game.involves(claimed)
    {
        return Err(PlayoffError::WinnerMismatch {
            winner: claimed.to_owned(),
            team1: game.team1,
            team2: game.team2,
        });
    }

    if let (Some(s1), Some(s2)) = (game.team1_score, game.team2_score)
        && s1 == s2
    {
        return Err(PlayoffError::TiedScore { team1: game.team1, team2: game.team2, score: s1 });
    }

    game.winner = game.derived_winner().map(str::to_owned);
    Ok(game)
}
