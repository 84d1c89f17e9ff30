//! Game identity: a game is its unordered team pair. Scores, winner and
//! bowl never take part in equality, so `(A, B)` and `(B, A)` are one game.

use crate::{Game, Seed, TeamId};

/// Unordered pair of teams, stored sorted so derived `Eq`/`Hash` ignore order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Matchup {
    first: TeamId,
    second: TeamId,
}

impl Matchup {
    pub fn new(a: impl Into<TeamId>, b: impl Into<TeamId>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn of(game: &Game) -> Self {
        Self::new(game.team1.as_str(), game.team2.as_str())
    }

    pub fn contains(&self, team: &str) -> bool {
        self.first == team || self.second == team
    }

    pub fn teams(&self) -> (&str, &str) {
        (&self.first, &self.second)
    }
}

/// What to look for in a round. Team queries compare the unordered
/// `{team1, team2}`; seed queries compare the First Round `{seed1, seed2}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query<'q> {
    Team(&'q str),
    Teams(&'q str, &'q str),
    Seed(Seed),
    Seeds(Seed, Seed),
}

impl Query<'_> {
    pub fn matches(&self, game: &Game) -> bool {
        match *self {
            Query::Team(team) => game.involves(team),
            Query::Teams(a, b) => {
                (game.team1 == a && game.team2 == b) || (game.team1 == b && game.team2 == a)
            }
            Query::Seed(seed) => game.seed1 == Some(seed) || game.seed2 == Some(seed),
            Query::Seeds(a, b) => {
                let pair = (game.seed1, game.seed2);
                pair == (Some(a), Some(b)) || pair == (Some(b), Some(a))
            }
        }
    }
}

/// First game in the round satisfying the query.
pub fn find_game<'a>(games: &'a [Game], query: Query<'_>) -> Option<&'a Game> {
    games.iter().find(|g| query.matches(g))
}

pub fn position(games: &[Game], query: Query<'_>) -> Option<usize> {
    games.iter().position(|g| query.matches(g))
}

pub fn find_involving<'a>(games: &'a [Game], team: &str) -> Option<&'a Game> {
    find_game(games, Query::Team(team))
}

pub fn find_matchup<'a>(games: &'a [Game], a: &str, b: &str) -> Option<&'a Game> {
    find_game(games, Query::Teams(a, b))
}

pub fn position_of_matchup(games: &[Game], a: &str, b: &str) -> Option<usize> {
    position(games, Query::Teams(a, b))
}

pub fn find_seed_pairing(games: &[Game], a: Seed, b: Seed) -> Option<&Game> {
    find_game(games, Query::Seeds(a, b))
}

/// Dedup/merge equality: same unordered team pair.
pub fn same_game(a: &Game, b: &Game) -> bool {
    Query::Teams(&a.team1, &a.team2).matches(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round() -> Vec<Game> {
        vec![
            Game::first_round(5, "TEX", 12, "BSU").with_scores(38, 24),
            Game::first_round(6, "PSU", 11, "SMU"),
            Game::first_round(10, "IND", 7, "ND").with_scores(17, 27),
        ]
    }

    #[test]
    fn matchup_ignores_order() {
        assert_eq!(Matchup::new("A", "B"), Matchup::new("B", "A"));
        assert_ne!(Matchup::new("A", "B"), Matchup::new("A", "C"));
        assert!(Matchup::new("B", "A").contains("A"));
        assert_eq!(Matchup::new("Z", "A").teams(), ("A", "Z"));
    }

    #[test]
    fn team_lookup_is_order_independent() {
        let games = round();
        let found = find_matchup(&games, "BSU", "TEX").expect("stored as (TEX, BSU)");
        assert_eq!(found.team1, "TEX");
        assert!(find_matchup(&games, "TEX", "SMU").is_none());
        assert_eq!(position_of_matchup(&games, "ND", "IND"), Some(2));
    }

    #[test]
    fn seed_lookup_is_order_independent() {
        let games = round();
        let found = find_seed_pairing(&games, 7, 10).expect("stored as (10, 7)");
        assert_eq!(found.team2, "ND");
        assert!(find_seed_pairing(&games, 8, 9).is_none());
        assert_eq!(position(&games, Query::Seed(11)), Some(1));
    }

    #[test]
    fn involving_returns_first_hit() {
        let games = round();
        assert_eq!(find_involving(&games, "SMU").map(|g| g.team1.as_str()), Some("PSU"));
        assert!(find_involving(&games, "OSU").is_none());
    }

    #[test]
    fn identity_ignores_scores_and_bowl() {
        let a = Game::new("OSU", "UGA").with_scores(28, 14);
        let b = Game::new("UGA", "OSU").in_bowl(crate::Bowl::Peach);
        assert!(same_game(&a, &b));
        assert!(!same_game(&a, &Game::new("OSU", "TEX")));
    }
}
