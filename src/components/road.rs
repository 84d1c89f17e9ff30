//! The user team's path through the bracket, as text rows.

use dynasty_playoff::directory::TeamDirectory;
use dynasty_playoff::matcher::find_involving;
use dynasty_playoff::topology::{self, Bowl};
use dynasty_playoff::{PlayoffTask, Resolver, RoundName, Seed};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadRow {
    pub round: RoundName,
    pub bowl: Option<Bowl>,
    /// "vs Oregon (1)", "Bye" or "TBD".
    pub matchup: String,
    /// "W 41-21", "L 28-31" or empty while undecided.
    pub result: String,
}

/// One row per round the team has reached. Empty when the team is unseeded.
pub fn road_rows<D: TeamDirectory>(resolver: &Resolver<'_>, team: &str, directory: &D) -> Vec<RoadRow> {
    let Some(seed) = resolver.seed_of(team) else {
        return Vec::new();
    };

    let mut rows = Vec::with_capacity(4);
    if topology::is_bye(seed) {
        rows.push(RoadRow {
            round: RoundName::FirstRound,
            bowl: None,
            matchup: "Bye".to_string(),
            result: String::new(),
        });
    } else {
        let opponent = topology::first_round_opponent(seed).and_then(|s| resolver.seeds().team(s));
        rows.push(row(resolver, RoundName::FirstRound, None, team, opponent, directory));
    }

    if resolver.is_in_quarterfinal(seed) {
        let bowl = resolver.quarterfinal_bowl(seed);
        rows.push(row(resolver, RoundName::Quarterfinals, bowl, team, resolver.quarterfinal_opponent(seed), directory));
    }
    if resolver.is_in_semifinal(seed) {
        let bowl = resolver.semifinal_bowl(seed);
        rows.push(row(resolver, RoundName::Semifinals, bowl, team, resolver.semifinal_opponent(seed), directory));
    }
    if resolver.is_in_championship(seed) {
        rows.push(row(
            resolver,
            RoundName::Championship,
            Some(Bowl::National),
            team,
            resolver.championship_opponent(seed),
            directory,
        ));
    }
    rows
}

fn row<D: TeamDirectory>(
    resolver: &Resolver<'_>,
    round: RoundName,
    bowl: Option<Bowl>,
    team: &str,
    opponent: Option<&str>,
    directory: &D,
) -> RoadRow {
    let matchup = match opponent {
        Some(opponent) => format!("vs {}{}", directory.display_name(opponent), seed_suffix(resolver.seed_of(opponent))),
        None => "vs TBD".to_string(),
    };
    let result = find_involving(resolver.round(round), team)
        .filter(|g| g.is_decided())
        .and_then(|g| {
            let own = g.score_for(team)?;
            let other = g.score_for(g.opponent_of(team)?)?;
            let mark = if g.winner() == Some(team) { 'W' } else { 'L' };
            Some(format!("{mark} {own}-{other}"))
        })
        .unwrap_or_default();
    RoadRow { round, bowl, matchup, result }
}

fn seed_suffix(seed: Option<Seed>) -> String {
    seed.map(|s| format!(" ({s})")).unwrap_or_default()
}

/// One sentence describing what the user has to do next.
pub fn task_text<D: TeamDirectory>(task: &PlayoffTask, directory: &D) -> String {
    match task {
        PlayoffTask::AwaitingSeeds => "Seeds have not been set for this season".to_string(),
        PlayoffTask::NotInPlayoff => "Not in the playoff field this season".to_string(),
        PlayoffTask::Play { round, opponent, bowl } => {
            let venue = bowl.map(|b| b.name()).unwrap_or(round.label());
            format!("Play {} in the {venue}", directory.display_name(opponent))
        }
        PlayoffTask::AwaitingOpponent { round, bowl } => {
            let venue = bowl.map(|b| b.name()).unwrap_or(round.label());
            format!("Waiting on the {venue} opponent")
        }
        PlayoffTask::Eliminated { round } => format!("Eliminated in the {}", round.label()),
        PlayoffTask::Champion => "National champions".to_string(),
    }
}
