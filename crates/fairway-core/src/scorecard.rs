use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::course::{BACK_NINE, Course, FRONT_NINE};
use crate::game::GameSettings;
use crate::handicap::{HandicapParams, resolve_net_score};
use crate::round::{Participant, PlayerScore, RoundType, TeamScore};
use crate::team;

/// Gross and net score on one hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleTally {
    pub gross: i32,
    pub net: i32,
}

/// Derived per-hole scores for one side: a player, or a team after folding.
///
/// Only holes with a real score appear. Never stored; rebuilt from gross
/// scores whenever it is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    holes: BTreeMap<u8, HoleTally>,
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hole: u8, tally: HoleTally) {
        self.holes.insert(hole, tally);
    }

    pub fn get(&self, hole: u8) -> Option<HoleTally> {
        self.holes.get(&hole).copied()
    }

    pub fn net(&self, hole: u8) -> Option<i32> {
        self.get(hole).map(|t| t.net)
    }

    pub fn contains(&self, hole: u8) -> bool {
        self.holes.contains_key(&hole)
    }

    /// Scored holes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, HoleTally)> + '_ {
        self.holes.iter().map(|(&h, &t)| (h, t))
    }

    pub fn len(&self) -> usize {
        self.holes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holes.is_empty()
    }

    /// Highest hole number with a score.
    pub fn last_hole(&self) -> Option<u8> {
        self.holes.keys().next_back().copied()
    }

    pub fn total_gross(&self) -> i32 {
        self.holes.values().map(|t| t.gross).sum()
    }

    pub fn total_net(&self) -> i32 {
        self.holes.values().map(|t| t.net).sum()
    }

    /// Copy restricted to the holes in `range`.
    pub fn restrict(&self, range: RangeInclusive<u8>) -> Self {
        if range.is_empty() {
            return Self::new();
        }
        Self {
            holes: self
                .holes
                .range(range)
                .map(|(&h, &t)| (h, t))
                .collect(),
        }
    }

    pub fn front_nine(&self) -> Self {
        self.restrict(FRONT_NINE)
    }

    pub fn back_nine(&self) -> Self {
        self.restrict(BACK_NINE)
    }

    /// Per hole, the lowest gross and the lowest net across `cards`, each
    /// taken independently. Holes no card has scored are left out.
    pub fn best_ball<'a>(cards: impl IntoIterator<Item = &'a Scorecard>) -> Self {
        let mut out = Self::new();
        for card in cards {
            for (hole, tally) in card.iter() {
                out.holes
                    .entry(hole)
                    .and_modify(|best| {
                        best.gross = best.gross.min(tally.gross);
                        best.net = best.net.min(tally.net);
                    })
                    .or_insert(tally);
            }
        }
        out
    }

    /// Each card cut down to the holes every card in `cards` has scored, so
    /// totals compare like with like mid-round.
    pub fn common_holes(cards: &[Scorecard]) -> Vec<Scorecard> {
        let Some((first, rest)) = cards.split_first() else {
            return Vec::new();
        };
        let shared: Vec<u8> = first
            .holes
            .keys()
            .copied()
            .filter(|&h| rest.iter().all(|c| c.contains(h)))
            .collect();
        cards
            .iter()
            .map(|card| Self {
                holes: shared
                    .iter()
                    .filter_map(|&h| card.get(h).map(|t| (h, t)))
                    .collect(),
            })
            .collect()
    }

    /// Per hole, the sum of every card's gross and net. Only holes every card
    /// has scored are kept.
    pub fn aggregate<'a>(cards: impl IntoIterator<Item = &'a Scorecard>) -> Self {
        let cards: Vec<&Scorecard> = cards.into_iter().collect();
        let Some((first, rest)) = cards.split_first() else {
            return Self::new();
        };
        let mut out = Self::new();
        for (hole, tally) in first.iter() {
            let sum = rest.iter().try_fold(tally, |acc, card| {
                card.get(hole).map(|t| HoleTally {
                    gross: acc.gross + t.gross,
                    net: acc.net + t.net,
                })
            });
            if let Some(sum) = sum {
                out.holes.insert(hole, sum);
            }
        }
        out
    }
}

/// What is needed to turn raw gross scores into scorecards for one round.
#[derive(Debug, Clone)]
pub struct ScoringContext<'a> {
    pub course: &'a Course,
    pub params: Option<HandicapParams>,
    pub range: RangeInclusive<u8>,
}

impl<'a> ScoringContext<'a> {
    pub fn new(settings: &'a GameSettings, round_type: RoundType) -> Self {
        Self {
            course: &settings.course,
            params: settings.handicap_params(),
            range: round_type.hole_range(),
        }
    }

    pub fn course_handicap(&self, handicap_index: f64) -> Option<i32> {
        self.params.map(|p| p.course_handicap(handicap_index))
    }

    /// Scorecard at a fixed course handicap. Entries outside the round, on
    /// holes the course does not have, or not yet entered are skipped.
    pub fn card_with_handicap(&self, score: &PlayerScore, course_handicap: Option<i32>) -> Scorecard {
        let mut card = Scorecard::new();
        for entry in &score.holes {
            if !entry.is_entered() || !self.range.contains(&entry.hole_number) {
                continue;
            }
            let Some(hole) = self.course.hole(entry.hole_number) else {
                tracing::debug!(
                    player_id = score.player.id,
                    hole = entry.hole_number,
                    "Ignoring score for a hole the course does not have"
                );
                continue;
            };
            let Ok(gross) = i32::try_from(entry.gross_score) else {
                tracing::debug!(
                    player_id = score.player.id,
                    hole = entry.hole_number,
                    gross = entry.gross_score,
                    "Ignoring gross score too large to tally"
                );
                continue;
            };
            card.insert(
                entry.hole_number,
                HoleTally {
                    gross,
                    net: resolve_net_score(gross, course_handicap, hole.handicap_rank),
                },
            );
        }
        card
    }

    pub fn player_card(&self, score: &PlayerScore) -> Scorecard {
        self.card_with_handicap(score, self.course_handicap(score.player.handicap_index))
    }

    pub fn team_card(&self, score: &TeamScore) -> Scorecard {
        team::team_card(self, score)
    }

    pub fn participant_card(&self, participant: &Participant) -> Scorecard {
        match participant {
            Participant::Player(p) => self.player_card(p),
            Participant::Team(t) => self.team_card(t),
        }
    }
}
