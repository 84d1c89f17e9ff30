//! Fixed shape of the 12-team bracket.
//!
//! Seeds 5–12 play a First Round game as `(seed, 17 - seed)`. Each winner
//! travels to a bowl hosted by one of the four bye seeds; the four bowl
//! winners pair off into two semifinal bowls and then the championship.
//!
//! ```text
//!  (5,12) @ 4  Sugar  ┐
//!                     ├ Peach  ┐
//!  (8,9)  @ 1  Orange ┘        │
//!                              ├ National Championship
//!  (6,11) @ 3  Rose   ┐        │
//!                     ├ Fiesta ┘
//!  (7,10) @ 2  Cotton ┘
//! ```

use crate::{RoundName, Seed};
use serde::{Deserialize, Serialize};

pub const FIELD_SIZE: Seed = 12;
const BYE_COUNT: Seed = 4;
/// First Round opponents always sum to this.
const PAIRING_SUM: Seed = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bowl {
    #[serde(rename = "Sugar Bowl")]
    Sugar,
    #[serde(rename = "Orange Bowl")]
    Orange,
    #[serde(rename = "Rose Bowl")]
    Rose,
    #[serde(rename = "Cotton Bowl")]
    Cotton,
    #[serde(rename = "Peach Bowl")]
    Peach,
    #[serde(rename = "Fiesta Bowl")]
    Fiesta,
    #[serde(rename = "National Championship")]
    National,
}

impl Bowl {
    pub const ALL: [Bowl; 7] = [
        Bowl::Sugar,
        Bowl::Orange,
        Bowl::Rose,
        Bowl::Cotton,
        Bowl::Peach,
        Bowl::Fiesta,
        Bowl::National,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Bowl::Sugar => "Sugar Bowl",
            Bowl::Orange => "Orange Bowl",
            Bowl::Rose => "Rose Bowl",
            Bowl::Cotton => "Cotton Bowl",
            Bowl::Peach => "Peach Bowl",
            Bowl::Fiesta => "Fiesta Bowl",
            Bowl::National => "National Championship",
        }
    }

    /// Accepts "Sugar Bowl", "sugar bowl" or plain "Sugar".
    pub fn from_name(name: &str) -> Option<Self> {
        let needle = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|b| {
            let full = b.name().to_lowercase();
            full == needle || full.strip_suffix(" bowl") == Some(needle.as_str())
        })
    }

    pub fn round(&self) -> RoundName {
        match self {
            Bowl::Sugar | Bowl::Orange | Bowl::Rose | Bowl::Cotton => RoundName::Quarterfinals,
            Bowl::Peach | Bowl::Fiesta => RoundName::Semifinals,
            Bowl::National => RoundName::Championship,
        }
    }
}

/// One quarterfinal bowl: the bye seed hosting it and the First Round
/// pairing whose winner travels there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuarterfinalSlot {
    pub bowl: Bowl,
    pub host: Seed,
    pub pairing: (Seed, Seed),
}

impl QuarterfinalSlot {
    pub fn contains(&self, seed: Seed) -> bool {
        self.host == seed || self.pairing.0 == seed || self.pairing.1 == seed
    }
}

/// In bracket order: the first two feed the Peach, the last two the Fiesta.
pub const QUARTERFINALS: [QuarterfinalSlot; 4] = [
    QuarterfinalSlot { bowl: Bowl::Sugar, host: 4, pairing: (5, 12) },
    QuarterfinalSlot { bowl: Bowl::Orange, host: 1, pairing: (8, 9) },
    QuarterfinalSlot { bowl: Bowl::Rose, host: 3, pairing: (6, 11) },
    QuarterfinalSlot { bowl: Bowl::Cotton, host: 2, pairing: (7, 10) },
];

pub const SEMIFINALS: [(Bowl, [Bowl; 2]); 2] = [
    (Bowl::Peach, [Bowl::Sugar, Bowl::Orange]),
    (Bowl::Fiesta, [Bowl::Rose, Bowl::Cotton]),
];

pub const FIRST_ROUND_PAIRINGS: [(Seed, Seed); 4] = [(5, 12), (6, 11), (7, 10), (8, 9)];

pub fn is_valid_seed(seed: Seed) -> bool {
    (1..=FIELD_SIZE).contains(&seed)
}

pub fn is_bye(seed: Seed) -> bool {
    (1..=BYE_COUNT).contains(&seed)
}

pub fn first_round_opponent(seed: Seed) -> Option<Seed> {
    (is_valid_seed(seed) && !is_bye(seed)).then(|| PAIRING_SUM - seed)
}

/// The First Round pairing containing `seed`, higher seed first.
pub fn first_round_pairing(seed: Seed) -> Option<(Seed, Seed)> {
    let other = first_round_opponent(seed)?;
    Some((seed.min(other), seed.max(other)))
}

pub fn quarterfinal_slot(bowl: Bowl) -> Option<&'static QuarterfinalSlot> {
    QUARTERFINALS.iter().find(|slot| slot.bowl == bowl)
}

/// The quarterfinal bowl a seed plays in, whether as host or as the
/// winner of its First Round pairing.
pub fn quarterfinal_slot_for_seed(seed: Seed) -> Option<&'static QuarterfinalSlot> {
    QUARTERFINALS.iter().find(|slot| slot.contains(seed))
}

pub fn quarterfinal_bowl_for_seed(seed: Seed) -> Option<Bowl> {
    quarterfinal_slot_for_seed(seed).map(|slot| slot.bowl)
}

pub fn semifinal_bowl(quarterfinal: Bowl) -> Option<Bowl> {
    SEMIFINALS
        .iter()
        .find(|(_, feeders)| feeders.contains(&quarterfinal))
        .map(|(bowl, _)| *bowl)
}

pub fn semifinal_feeders(semifinal: Bowl) -> Option<[Bowl; 2]> {
    SEMIFINALS
        .iter()
        .find(|(bowl, _)| *bowl == semifinal)
        .map(|(_, feeders)| *feeders)
}

pub fn semifinal_bowl_for_seed(seed: Seed) -> Option<Bowl> {
    semifinal_bowl(quarterfinal_slot_for_seed(seed)?.bowl)
}

/// The other quarterfinal feeding the same semifinal.
pub fn sibling_quarterfinal(quarterfinal: Bowl) -> Option<Bowl> {
    let feeders = semifinal_feeders(semifinal_bowl(quarterfinal)?)?;
    feeders.into_iter().find(|b| *b != quarterfinal)
}

pub fn other_semifinal(semifinal: Bowl) -> Option<Bowl> {
    semifinal_feeders(semifinal)?;
    SEMIFINALS.iter().map(|(bowl, _)| *bowl).find(|bowl| *bowl != semifinal)
}

/// Every seed that can reach the given semifinal bowl, ascending.
pub fn bowl_seed_group(semifinal: Bowl) -> Option<Vec<Seed>> {
    let feeders = semifinal_feeders(semifinal)?;
    let mut seeds: Vec<Seed> = feeders
        .iter()
        .filter_map(|bowl| quarterfinal_slot(*bowl))
        .flat_map(|slot| [slot.host, slot.pairing.0, slot.pairing.1])
        .collect();
    seeds.sort_unstable();
    Some(seeds)
}
