//! Opponent and winner derivation over a season's seeds and whatever round
//! results exist so far.
//!
//! Everything here is a pure read over borrowed data: table lookups plus a
//! linear scan of at most four games. Missing upstream data is never an
//! error; the answer is simply `None` until it becomes knowable.

use crate::matcher::{find_involving, find_matchup, find_seed_pairing};
use crate::topology::{self, Bowl};
use crate::{Game, RoundName, RoundResults, Seed, SeedAssignment, TeamId};

#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    seeds: &'a SeedAssignment,
    /// Round arrays indexed like `RoundName::ALL`.
    rounds: [&'a [Game]; 4],
}

/// What the user's team has to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayoffTask {
    /// No seeds recorded for the season yet.
    AwaitingSeeds,
    NotInPlayoff,
    Play { round: RoundName, opponent: TeamId, bowl: Option<Bowl> },
    /// The team is in the round but its opponent is still being decided.
    AwaitingOpponent { round: RoundName, bowl: Option<Bowl> },
    Eliminated { round: RoundName },
    Champion,
}

/// One matchup position in the bracket, as far as it can be derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketSlot<'a> {
    pub round: RoundName,
    pub bowl: Option<Bowl>,
    pub top: Option<(Option<Seed>, &'a str)>,
    pub bottom: Option<(Option<Seed>, &'a str)>,
    /// The recorded game for this slot, if one exists.
    pub game: Option<&'a Game>,
}

impl<'a> Resolver<'a> {
    pub fn new(seeds: &'a SeedAssignment, results: &'a RoundResults) -> Self {
        Self::from_rounds(
            seeds,
            [
                &results.first_round,
                &results.quarterfinals,
                &results.semifinals,
                &results.championship,
            ],
        )
    }

    pub fn from_rounds(seeds: &'a SeedAssignment, rounds: [&'a [Game]; 4]) -> Self {
        Self { seeds, rounds }
    }

    pub fn seeds(&self) -> &'a SeedAssignment {
        self.seeds
    }

    pub fn round(&self, round: RoundName) -> &'a [Game] {
        self.rounds[round as usize]
    }

    pub fn seed_of(&self, team: &str) -> Option<Seed> {
        self.seeds.seed_of(team)
    }

    // -----------------------------------------------------------------------
    // First Round
    // -----------------------------------------------------------------------

    /// The recorded game for a First Round pairing. Matched on the stored
    /// seed pair first, then on the seeded teams for rows that carry no seeds.
    pub fn first_round_game(&self, a: Seed, b: Seed) -> Option<&'a Game> {
        if topology::first_round_opponent(a) != Some(b) {
            return None;
        }
        let games = self.round(RoundName::FirstRound);
        find_seed_pairing(games, a, b).or_else(|| {
            let (team_a, team_b) = (self.seeds.team(a)?, self.seeds.team(b)?);
            find_matchup(games, team_a, team_b)
        })
    }

    pub fn first_round_winner(&self, a: Seed, b: Seed) -> Option<&'a str> {
        self.first_round_game(a, b)?.winner()
    }

    /// Which of the two seeds won. The winner is mapped through the seed
    /// assignment, so a row whose seed columns got out of step with its team
    /// columns still resolves correctly.
    pub fn winning_seed(&self, a: Seed, b: Seed) -> Option<Seed> {
        let game = self.first_round_game(a, b)?;
        let winner = game.winner()?;
        if self.seeds.team(a) == Some(winner) {
            return Some(a);
        }
        if self.seeds.team(b) == Some(winner) {
            return Some(b);
        }
        game.seed_for(winner).filter(|s| *s == a || *s == b)
    }

    // -----------------------------------------------------------------------
    // Quarterfinals
    // -----------------------------------------------------------------------

    pub fn is_in_quarterfinal(&self, seed: Seed) -> bool {
        if topology::is_bye(seed) {
            return true;
        }
        topology::first_round_opponent(seed)
            .is_some_and(|other| self.winning_seed(seed, other) == Some(seed))
    }

    pub fn quarterfinal_bowl(&self, seed: Seed) -> Option<Bowl> {
        if !self.is_in_quarterfinal(seed) {
            return None;
        }
        topology::quarterfinal_bowl_for_seed(seed)
    }

    /// Hosts face the winner of their feeding pairing; First Round winners
    /// face the host, whose identity is fixed by the seeds.
    pub fn quarterfinal_opponent(&self, seed: Seed) -> Option<&'a str> {
        let slot = topology::quarterfinal_slot_for_seed(seed)?;
        if slot.host == seed {
            self.first_round_winner(slot.pairing.0, slot.pairing.1)
        } else if self.is_in_quarterfinal(seed) {
            self.seeds.team(slot.host)
        } else {
            None
        }
    }

    /// The recorded game played in a quarterfinal bowl. The host always plays
    /// there, so the host's team finds it even when `bowlName` is blank.
    pub fn quarterfinal_game(&self, bowl: Bowl) -> Option<&'a Game> {
        let slot = topology::quarterfinal_slot(bowl)?;
        let games = self.round(RoundName::Quarterfinals);
        self.seeds
            .team(slot.host)
            .and_then(|host| find_involving(games, host))
            .or_else(|| games.iter().find(|g| g.bowl() == Some(bowl)))
    }

    pub fn quarterfinal_winner(&self, bowl: Bowl) -> Option<&'a str> {
        self.quarterfinal_game(bowl)?.winner()
    }

    // -----------------------------------------------------------------------
    // Semifinals
    // -----------------------------------------------------------------------

    pub fn is_in_semifinal(&self, seed: Seed) -> bool {
        self.won_own_game(seed, RoundName::Quarterfinals) && self.is_in_quarterfinal(seed)
    }

    pub fn semifinal_bowl(&self, seed: Seed) -> Option<Bowl> {
        if !self.is_in_semifinal(seed) {
            return None;
        }
        topology::semifinal_bowl_for_seed(seed)
    }

    pub fn semifinal_opponent(&self, seed: Seed) -> Option<&'a str> {
        if !self.is_in_semifinal(seed) {
            return None;
        }
        let bowl = topology::quarterfinal_slot_for_seed(seed)?.bowl;
        self.quarterfinal_winner(topology::sibling_quarterfinal(bowl)?)
    }

    /// The recorded game of a semifinal bowl, by `bowlName` or else by any
    /// participant whose seed belongs to that half of the bracket.
    pub fn semifinal_game(&self, bowl: Bowl) -> Option<&'a Game> {
        let games = self.round(RoundName::Semifinals);
        if let Some(game) = games.iter().find(|g| g.bowl() == Some(bowl)) {
            return Some(game);
        }
        let group = topology::bowl_seed_group(bowl)?;
        games.iter().find(|g| {
            [g.team1.as_str(), g.team2.as_str()]
                .into_iter()
                .filter_map(|team| self.seeds.seed_of(team))
                .any(|seed| group.contains(&seed))
        })
    }

    pub fn semifinal_winner(&self, bowl: Bowl) -> Option<&'a str> {
        self.semifinal_game(bowl)?.winner()
    }

    // -----------------------------------------------------------------------
    // Championship
    // -----------------------------------------------------------------------

    pub fn is_in_championship(&self, seed: Seed) -> bool {
        self.won_own_game(seed, RoundName::Semifinals) && self.is_in_semifinal(seed)
    }

    pub fn championship_opponent(&self, seed: Seed) -> Option<&'a str> {
        if !self.is_in_championship(seed) {
            return None;
        }
        let own = topology::semifinal_bowl_for_seed(seed)?;
        self.semifinal_winner(topology::other_semifinal(own)?)
    }

    /// The title game between the two semifinal winners. Until both are
    /// known, any recorded game involving a known finalist, else the first.
    pub fn championship_game(&self) -> Option<&'a Game> {
        let games = self.round(RoundName::Championship);
        match (self.semifinal_winner(Bowl::Peach), self.semifinal_winner(Bowl::Fiesta)) {
            (Some(peach), Some(fiesta)) => find_matchup(games, peach, fiesta),
            (Some(finalist), None) | (None, Some(finalist)) => {
                find_involving(games, finalist).or_else(|| games.first())
            }
            (None, None) => games.first(),
        }
    }

    pub fn champion(&self) -> Option<&'a str> {
        self.championship_game()?.winner()
    }

    fn won_own_game(&self, seed: Seed, round: RoundName) -> bool {
        let Some(team) = self.seeds.team(seed) else {
            return false;
        };
        find_involving(self.round(round), team).and_then(Game::winner) == Some(team)
    }

    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    /// Walk the bracket for `team` and report the next actionable step.
    pub fn next_task(&self, team: &str) -> PlayoffTask {
        if self.seeds.is_empty() {
            return PlayoffTask::AwaitingSeeds;
        }
        let Some(seed) = self.seeds.seed_of(team) else {
            return PlayoffTask::NotInPlayoff;
        };

        if let Some(other) = topology::first_round_opponent(seed) {
            let game = self.first_round_game(seed, other);
            match game.and_then(Game::winner) {
                Some(winner) if winner == team => {}
                Some(_) => return PlayoffTask::Eliminated { round: RoundName::FirstRound },
                None => {
                    return pending(RoundName::FirstRound, self.seeds.team(other), None);
                }
            }
        }

        let qf_bowl = topology::quarterfinal_bowl_for_seed(seed);
        let sf_bowl = topology::semifinal_bowl_for_seed(seed);
        let later_rounds = [
            (RoundName::Quarterfinals, self.quarterfinal_opponent(seed), qf_bowl),
            (RoundName::Semifinals, self.semifinal_opponent(seed), sf_bowl),
            (RoundName::Championship, self.championship_opponent(seed), Some(Bowl::National)),
        ];

        for (round, opponent, bowl) in later_rounds {
            match find_involving(self.round(round), team).and_then(Game::winner) {
                Some(winner) if winner == team => continue,
                Some(_) => return PlayoffTask::Eliminated { round },
                None => return pending(round, opponent, bowl),
            }
        }

        PlayoffTask::Champion
    }

    /// Derived matchup positions for one round, in bracket order.
    pub fn slots(&self, round: RoundName) -> Vec<BracketSlot<'a>> {
        match round {
            RoundName::FirstRound => topology::FIRST_ROUND_PAIRINGS
                .iter()
                .map(|&(a, b)| BracketSlot {
                    round,
                    bowl: None,
                    top: self.seeds.team(a).map(|t| (Some(a), t)),
                    bottom: self.seeds.team(b).map(|t| (Some(b), t)),
                    game: self.first_round_game(a, b),
                })
                .collect(),
            RoundName::Quarterfinals => topology::QUARTERFINALS
                .iter()
                .map(|slot| {
                    let (a, b) = slot.pairing;
                    BracketSlot {
                        round,
                        bowl: Some(slot.bowl),
                        top: self.seeds.team(slot.host).map(|t| (Some(slot.host), t)),
                        bottom: self
                            .first_round_winner(a, b)
                            .map(|t| (self.winning_seed(a, b), t)),
                        game: self.quarterfinal_game(slot.bowl),
                    }
                })
                .collect(),
            RoundName::Semifinals => topology::SEMIFINALS
                .iter()
                .map(|&(bowl, [upper, lower])| BracketSlot {
                    round,
                    bowl: Some(bowl),
                    top: self.seeded(self.quarterfinal_winner(upper)),
                    bottom: self.seeded(self.quarterfinal_winner(lower)),
                    game: self.semifinal_game(bowl),
                })
                .collect(),
            RoundName::Championship => vec![BracketSlot {
                round,
                bowl: Some(Bowl::National),
                top: self.seeded(self.semifinal_winner(Bowl::Peach)),
                bottom: self.seeded(self.semifinal_winner(Bowl::Fiesta)),
                game: self.championship_game(),
            }],
        }
    }

    fn seeded(&self, team: Option<&'a str>) -> Option<(Option<Seed>, &'a str)> {
        team.map(|t| (self.seeds.seed_of(t), t))
    }
}

fn pending(round: RoundName, opponent: Option<&str>, bowl: Option<Bowl>) -> PlayoffTask {
    match opponent {
        Some(opponent) => PlayoffTask::Play { round, opponent: opponent.to_owned(), bowl },
        None => PlayoffTask::AwaitingOpponent { round, bowl },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Seed n is played by team "Tn".
    fn numbered_seeds() -> SeedAssignment {
        SeedAssignment::from_pairs((1..=12).map(|s| (s, format!("T{s}")))).unwrap()
    }

    fn fr(a: Seed, b: Seed, score_a: u16, score_b: u16) -> Game {
        Game::first_round(a, format!("T{a}"), b, format!("T{b}")).with_scores(score_a, score_b)
    }

    fn game(a: Seed, b: Seed, score_a: u16, score_b: u16) -> Game {
        Game::new(format!("T{a}"), format!("T{b}")).with_scores(score_a, score_b)
    }

    #[test]
    fn first_round_winner_waits_for_both_scores() {
        let seeds = numbered_seeds();
        for (a, b) in topology::FIRST_ROUND_PAIRINGS {
            let mut results = RoundResults::default();
            let resolver = Resolver::new(&seeds, &results);
            assert_eq!(resolver.first_round_winner(a, b), None, "unrecorded ({a},{b})");

            let mut partial = Game::first_round(a, format!("T{a}"), b, format!("T{b}"));
            partial.team1_score = Some(21);
            results.first_round = vec![partial];
            let resolver = Resolver::new(&seeds, &results);
            assert_eq!(resolver.first_round_winner(a, b), None, "one score ({a},{b})");
            let host = topology::quarterfinal_slot_for_seed(a).unwrap().host;
            assert_eq!(resolver.quarterfinal_opponent(host), None, "host {host} waits on ({a},{b})");

            results.first_round = vec![fr(a, b, 14, 35)];
            let resolver = Resolver::new(&seeds, &results);
            let expected = format!("T{b}");
            assert_eq!(resolver.first_round_winner(a, b), Some(expected.as_str()));
            assert_eq!(resolver.first_round_winner(b, a), Some(expected.as_str()));
        }
    }

    #[test]
    fn first_round_lookup_rejects_non_pairings() {
        let seeds = numbered_seeds();
        let results = RoundResults { first_round: vec![fr(5, 12, 30, 20)], ..Default::default() };
        let resolver = Resolver::new(&seeds, &results);
        assert_eq!(resolver.first_round_winner(5, 11), None);
        assert_eq!(resolver.first_round_winner(1, 4), None);
    }

    #[test]
    fn first_round_rows_without_seeds_match_by_team() {
        let seeds = numbered_seeds();
        let results = RoundResults { first_round: vec![game(9, 8, 31, 28)], ..Default::default() };
        let resolver = Resolver::new(&seeds, &results);
        assert_eq!(resolver.first_round_winner(8, 9), Some("T9"));
        assert_eq!(resolver.winning_seed(8, 9), Some(9));
    }

    #[test]
    fn winning_seed_follows_teams_not_seed_columns() {
        let seeds = numbered_seeds();
        // Seed columns swapped relative to the team columns.
        let swapped = Game::first_round(11, "T6", 6, "T11").with_scores(10, 24);
        let results = RoundResults { first_round: vec![swapped], ..Default::default() };
        let resolver = Resolver::new(&seeds, &results);
        assert_eq!(resolver.winning_seed(6, 11), Some(11));
        assert!(resolver.is_in_quarterfinal(11));
        assert!(!resolver.is_in_quarterfinal(6));
    }

    #[test]
    fn bye_seeds_are_always_in_the_quarterfinal() {
        let seeds = numbered_seeds();
        let results = RoundResults::default();
        let resolver = Resolver::new(&seeds, &results);
        for seed in 1..=4 {
            assert!(resolver.is_in_quarterfinal(seed));
        }
        for seed in 5..=12 {
            assert!(!resolver.is_in_quarterfinal(seed), "seed {seed} has not played");
        }
    }

    #[test]
    fn first_round_winners_enter_the_quarterfinal() {
        let seeds = numbered_seeds();
        let results = RoundResults {
            first_round: vec![fr(5, 12, 30, 20), fr(6, 11, 17, 24)],
            ..Default::default()
        };
        let resolver = Resolver::new(&seeds, &results);
        assert!(resolver.is_in_quarterfinal(5));
        assert!(!resolver.is_in_quarterfinal(12));
        assert!(resolver.is_in_quarterfinal(11));
        assert!(!resolver.is_in_quarterfinal(6));
        assert!(!resolver.is_in_quarterfinal(7));
        assert_eq!(resolver.quarterfinal_bowl(11), Some(Bowl::Rose));
        assert_eq!(resolver.quarterfinal_bowl(6), None);
    }

    #[test]
    fn lettered_first_round_scenario() {
        let seeds = SeedAssignment::from_pairs([
            (1, "A"),
            (4, "B"),
            (5, "C"),
            (12, "D"),
            (8, "E"),
            (9, "F"),
        ])
        .unwrap();
        let results = RoundResults {
            first_round: vec![Game::first_round(5, "C", 12, "D").with_scores(30, 20)],
            ..Default::default()
        };
        let resolver = Resolver::new(&seeds, &results);

        assert_eq!(resolver.first_round_winner(5, 12), Some("C"));
        assert_eq!(resolver.winning_seed(5, 12), Some(5));
        assert_eq!(resolver.quarterfinal_opponent(4), Some("C"));
        assert_eq!(resolver.quarterfinal_opponent(5), Some("B"));
        assert_eq!(resolver.quarterfinal_bowl(4), Some(Bowl::Sugar));
        assert_eq!(resolver.quarterfinal_opponent(12), None);
        // (8,9) has not played, so the Orange Bowl host is still waiting.
        assert_eq!(resolver.quarterfinal_opponent(1), None);
        assert_eq!(resolver.quarterfinal_opponent(8), None);
    }

    #[test]
    fn semifinal_opponent_needs_both_quarterfinals() {
        let seeds = numbered_seeds();
        let mut results = RoundResults {
            first_round: vec![fr(5, 12, 30, 20), fr(8, 9, 21, 24)],
            quarterfinals: vec![game(4, 5, 20, 27).in_bowl(Bowl::Sugar)],
            ..Default::default()
        };
        let resolver = Resolver::new(&seeds, &results);
        assert!(resolver.is_in_semifinal(5));
        assert!(!resolver.is_in_semifinal(4));
        assert_eq!(resolver.semifinal_bowl(5), Some(Bowl::Peach));
        assert_eq!(resolver.semifinal_opponent(5), None, "Orange Bowl not played");
        assert_eq!(resolver.semifinal_opponent(4), None, "host lost");

        results.quarterfinals.push(game(1, 9, 35, 3));
        let resolver = Resolver::new(&seeds, &results);
        assert_eq!(resolver.semifinal_opponent(5), Some("T1"));
        assert_eq!(resolver.semifinal_opponent(1), Some("T5"));
        assert_eq!(resolver.semifinal_opponent(9), None);
        assert_eq!(resolver.quarterfinal_winner(Bowl::Orange), Some("T1"));
    }

    #[test]
    fn quarterfinal_game_found_by_bowl_when_host_unseeded() {
        let seeds = SeedAssignment::from_pairs([(5, "T5"), (12, "T12")]).unwrap();
        let results = RoundResults {
            quarterfinals: vec![Game::new("X", "T5").with_scores(3, 10).in_bowl(Bowl::Sugar)],
            ..Default::default()
        };
        let resolver = Resolver::new(&seeds, &results);
        assert_eq!(resolver.quarterfinal_winner(Bowl::Sugar), Some("T5"));
        assert_eq!(resolver.quarterfinal_winner(Bowl::Rose), None);
    }

    #[test]
    fn championship_opponent_comes_from_the_other_half() {
        let seeds = numbered_seeds();
        let mut results = RoundResults {
            first_round: vec![fr(5, 12, 30, 20), fr(8, 9, 21, 24), fr(6, 11, 28, 7), fr(7, 10, 13, 10)],
            quarterfinals: vec![
                game(4, 5, 20, 27),
                game(1, 9, 35, 3),
                game(3, 6, 14, 17),
                game(2, 7, 31, 30),
            ],
            semifinals: vec![game(1, 5, 24, 21)],
            ..Default::default()
        };
        let resolver = Resolver::new(&seeds, &results);
        assert!(resolver.is_in_championship(1));
        assert_eq!(resolver.championship_opponent(1), None, "Fiesta not played");
        assert_eq!(resolver.semifinal_opponent(2), Some("T6"));

        results.semifinals.push(game(6, 2, 10, 38));
        let resolver = Resolver::new(&seeds, &results);
        assert_eq!(resolver.championship_opponent(1), Some("T2"));
        assert_eq!(resolver.championship_opponent(2), Some("T1"));
        assert_eq!(resolver.championship_opponent(5), None);
        assert_eq!(resolver.semifinal_winner(Bowl::Fiesta), Some("T2"));
        assert_eq!(resolver.champion(), None);

        results.championship.push(game(2, 1, 20, 34));
        let resolver = Resolver::new(&seeds, &results);
        assert_eq!(resolver.champion(), Some("T1"));
    }

    #[test]
    fn champion_comes_from_the_finalists_game() {
        let seeds = numbered_seeds();
        let results = RoundResults {
            first_round: vec![fr(8, 9, 30, 29), fr(5, 12, 24, 23)],
            quarterfinals: vec![game(1, 8, 28, 14), game(4, 5, 17, 10), game(3, 6, 20, 10)],
            semifinals: vec![game(1, 4, 21, 20), game(2, 3, 9, 13)],
            // A stray import row listed ahead of the real title game.
            championship: vec![game(7, 10, 20, 10), game(3, 1, 7, 42)],
        };
        let resolver = Resolver::new(&seeds, &results);
        assert_eq!(resolver.champion(), Some("T1"));
        assert_eq!(resolver.next_task("T1"), PlayoffTask::Champion);

        let slots = resolver.slots(RoundName::Championship);
        let title = slots[0].game.unwrap();
        assert!(title.involves("T1") && title.involves("T3"));
    }

    #[test]
    fn championship_game_before_finalists_are_known() {
        let seeds = numbered_seeds();
        let mut results = RoundResults {
            semifinals: vec![game(1, 4, 21, 20)],
            championship: vec![game(7, 10, 20, 10), game(3, 1, 7, 42)],
            ..Default::default()
        };
        let resolver = Resolver::new(&seeds, &results);
        assert!(resolver.championship_game().unwrap().involves("T1"), "known finalist picks its game");

        results.semifinals.clear();
        let resolver = Resolver::new(&seeds, &results);
        assert!(resolver.championship_game().unwrap().involves("T7"));
    }

    #[test]
    fn untrusted_winner_blocks_progress() {
        let seeds = numbered_seeds();
        let mut bad = fr(5, 12, 30, 20);
        bad.winner = Some("T7".into());
        let results = RoundResults { first_round: vec![bad], ..Default::default() };
        let resolver = Resolver::new(&seeds, &results);
        assert_eq!(resolver.first_round_winner(5, 12), None);
        assert_eq!(resolver.winning_seed(5, 12), None);
        assert_eq!(resolver.quarterfinal_opponent(4), None);
    }

    #[test]
    fn answers_are_deterministic() {
        let seeds = numbered_seeds();
        let results = RoundResults {
            first_round: vec![fr(7, 10, 20, 27)],
            ..Default::default()
        };
        let resolver = Resolver::new(&seeds, &results);
        for seed in 1..=12 {
            assert_eq!(resolver.quarterfinal_opponent(seed), resolver.quarterfinal_opponent(seed));
            assert_eq!(resolver.semifinal_opponent(seed), resolver.semifinal_opponent(seed));
        }
        assert_eq!(resolver.quarterfinal_opponent(2), Some("T10"));
    }

    #[test]
    fn next_task_walks_the_bracket() {
        let seeds = numbered_seeds();
        let mut results = RoundResults::default();

        let empty = SeedAssignment::new();
        assert_eq!(Resolver::new(&empty, &results).next_task("T5"), PlayoffTask::AwaitingSeeds);
        let resolver = Resolver::new(&seeds, &results);
        assert_eq!(resolver.next_task("T99"), PlayoffTask::NotInPlayoff);
        assert_eq!(
            resolver.next_task("T5"),
            PlayoffTask::Play { round: RoundName::FirstRound, opponent: "T12".into(), bowl: None }
        );
        assert_eq!(
            resolver.next_task("T4"),
            PlayoffTask::AwaitingOpponent { round: RoundName::Quarterfinals, bowl: Some(Bowl::Sugar) }
        );

        results.first_round.push(fr(5, 12, 30, 20));
        let resolver = Resolver::new(&seeds, &results);
        assert_eq!(
            resolver.next_task("T5"),
            PlayoffTask::Play {
                round: RoundName::Quarterfinals,
                opponent: "T4".into(),
                bowl: Some(Bowl::Sugar)
            }
        );
        assert_eq!(resolver.next_task("T12"), PlayoffTask::Eliminated { round: RoundName::FirstRound });

        results.quarterfinals.push(game(4, 5, 20, 27));
        let resolver = Resolver::new(&seeds, &results);
        assert_eq!(
            resolver.next_task("T5"),
            PlayoffTask::AwaitingOpponent { round: RoundName::Semifinals, bowl: Some(Bowl::Peach) }
        );
        assert_eq!(resolver.next_task("T4"), PlayoffTask::Eliminated { round: RoundName::Quarterfinals });
    }

    #[test]
    fn next_task_reaches_champion() {
        let seeds = numbered_seeds();
        let results = RoundResults {
            first_round: vec![fr(8, 9, 30, 29), fr(5, 12, 24, 23)],
            quarterfinals: vec![game(1, 8, 28, 14), game(4, 5, 17, 10), game(3, 6, 20, 10)],
            semifinals: vec![game(1, 4, 21, 20), game(2, 3, 9, 13)],
            championship: vec![game(3, 1, 7, 42)],
        };
        let resolver = Resolver::new(&seeds, &results);
        assert_eq!(resolver.next_task("T1"), PlayoffTask::Champion);
        assert_eq!(resolver.next_task("T3"), PlayoffTask::Eliminated { round: RoundName::Championship });
    }

    #[test]
    fn slots_fill_in_as_rounds_complete() {
        let seeds = numbered_seeds();
        let results = RoundResults {
            first_round: vec![fr(5, 12, 30, 20)],
            ..Default::default()
        };
        let resolver = Resolver::new(&seeds, &results);

        let first = resolver.slots(RoundName::FirstRound);
        assert_eq!(first.len(), 4);
        assert_eq!(first[0].top, Some((Some(5), "T5")));
        assert!(first[0].game.is_some());
        assert!(first[1].game.is_none());

        let quarters = resolver.slots(RoundName::Quarterfinals);
        assert_eq!(quarters[0].bowl, Some(Bowl::Sugar));
        assert_eq!(quarters[0].top, Some((Some(4), "T4")));
        assert_eq!(quarters[0].bottom, Some((Some(5), "T5")));
        assert_eq!(quarters[1].bottom, None, "Orange Bowl challenger is TBD");

        let semis = resolver.slots(RoundName::Semifinals);
        assert_eq!(semis.iter().map(|s| s.bowl).collect::<Vec<_>>(), vec![Some(Bowl::Peach), Some(Bowl::Fiesta)]);
        assert!(semis.iter().all(|s| s.top.is_none() && s.bottom.is_none()));

        let title = resolver.slots(RoundName::Championship);
        assert_eq!(title.len(), 1);
        assert_eq!(title[0].bowl, Some(Bowl::National));
    }
}
