use std::ops::RangeInclusive;

use serde::Serialize;

use fairway_core::format_trait::{Payout, SettlementContext, SettlementFormat};
use fairway_core::game::GameFormat;
use fairway_core::scorecard::Scorecard;

/// Holes won by each of two sides over a stretch of holes.
///
/// Only holes both sides have scored are compared; a lower net wins the
/// hole, equal nets halve it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchTally {
    pub holes_won: [u8; 2],
    pub halved: u8,
    /// Holes in the match.
    pub length: u8,
}

impl MatchTally {
    pub fn compute(a: &Scorecard, b: &Scorecard, range: RangeInclusive<u8>) -> Self {
        Self::through(a, b, range, u8::MAX)
    }

    /// Tally counting only holes up to and including `last_hole`. The match
    /// length is still the whole range.
    pub fn through(a: &Scorecard, b: &Scorecard, range: RangeInclusive<u8>, last_hole: u8) -> Self {
        let mut tally = Self {
            length: u8::try_from(range.clone().count()).unwrap_or(u8::MAX),
            ..Self::default()
        };
        for hole in range.filter(|&h| h <= last_hole) {
            let (Some(x), Some(y)) = (a.net(hole), b.net(hole)) else {
                continue;
            };
            match x.cmp(&y) {
                std::cmp::Ordering::Less => tally.holes_won[0] += 1,
                std::cmp::Ordering::Greater => tally.holes_won[1] += 1,
                std::cmp::Ordering::Equal => tally.halved += 1,
            }
        }
        tally
    }

    pub fn played(&self) -> u8 {
        self.holes_won[0] + self.holes_won[1] + self.halved
    }

    pub fn remaining(&self) -> u8 {
        self.length.saturating_sub(self.played())
    }

    /// Positive when side 0 leads.
    pub fn margin(&self) -> i32 {
        i32::from(self.holes_won[0]) - i32::from(self.holes_won[1])
    }

    /// Holes up for whoever leads.
    pub fn up(&self) -> u8 {
        self.margin().unsigned_abs() as u8
    }

    pub fn leader(&self) -> Option<usize> {
        match self.margin() {
            m if m > 0 => Some(0),
            m if m < 0 => Some(1),
            _ => None,
        }
    }

    /// Decided once the lead exceeds the holes left, or every hole is played.
    pub fn is_decided(&self) -> bool {
        self.up() > self.remaining() || self.played() >= self.length
    }

    /// Scoreboard text: "All Square", "2 UP", or "3 & 2" for a match closed
    /// out early.
    pub fn describe(&self) -> String {
        let up = self.up();
        if up == 0 {
            "All Square".to_string()
        } else if self.is_decided() && self.remaining() > 0 {
            format!("{up} & {}", self.remaining())
        } else {
            format!("{up} UP")
        }
    }
}

/// Two-sided hole-by-hole match. Pays only once the match is decided.
pub struct MatchPlay;

impl SettlementFormat for MatchPlay {
    fn format(&self) -> GameFormat {
        GameFormat::MatchPlay
    }

    fn settle(&self, ctx: &SettlementContext<'_>) -> Payout {
        let [a, b, rest @ ..] = ctx.cards.as_slice() else {
            tracing::debug!(
                participants = ctx.participant_count(),
                "Match play needs two sides, leaving winnings unchanged"
            );
            return Payout::Unchanged;
        };
        if !rest.is_empty() {
            tracing::debug!(
                participants = ctx.participant_count(),
                "Match play settles the first two sides only"
            );
        }

        let tally = MatchTally::compute(a, b, ctx.hole_range());
        if !tally.is_decided() {
            return Payout::Unchanged;
        }

        let mut winnings = vec![0.0; ctx.participant_count()];
        if let Some(leader) = tally.leader() {
            winnings[leader] = ctx.bet_amount;
            winnings[1 - leader] = -ctx.bet_amount;
        }
        Payout::Winnings(winnings)
    }
}
