//! Read-only views of a round in progress. Nothing here writes winnings.

use serde::Serialize;

use fairway_core::config::SettlementConfig;
use fairway_core::course::Course;
use fairway_core::format_trait::SettlementContext;
use fairway_core::game::GameSettings;
use fairway_core::round::{ParticipantId, Round, RoundType};
use fairway_core::scorecard::Scorecard;

use crate::match_play::MatchTally;
use crate::nassau::{NassauState, nassau_sides};
use crate::skins::SkinsLedger;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchStatus {
    pub leader: Option<ParticipantId>,
    pub up: u8,
    pub holes_played: u8,
    pub holes_remaining: u8,
    pub complete: bool,
    /// "All Square", "2 UP" or "3 & 2".
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkinsStanding {
    pub participant: ParticipantId,
    pub name: String,
    pub winnings: f64,
    pub holes_won: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkinsStatus {
    pub standings: Vec<SkinsStanding>,
    pub carry_over_holes: u8,
    pub carry_over_amount: f64,
    /// What one hole is worth: bet times participant count.
    pub pot_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NassauBetStatus {
    pub label: String,
    pub first_hole: u8,
    pub last_hole: u8,
    /// Side 0 is the first participant (or first half of the field).
    pub leader: Option<usize>,
    pub up: u8,
    pub complete: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NassauStatus {
    pub bets: Vec<NassauBetStatus>,
    /// Bets currently won minus bets lost, per side.
    pub side_units: [i32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based index after a stable sort on net total; ties are not collapsed.
    pub position: usize,
    pub participant: ParticipantId,
    pub name: String,
    pub gross: i32,
    pub net: i32,
    pub holes_played: usize,
    /// Net total against par for the holes played.
    pub net_to_par: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundProgress {
    pub holes_completed: u8,
    pub expected_holes: u8,
    pub is_completed: bool,
}

/// Derives status views for one round from its current scores.
pub struct StatusReporter<'a> {
    course: &'a Course,
    round: &'a Round,
    ctx: SettlementContext<'a>,
}

impl<'a> StatusReporter<'a> {
    pub fn new(settings: &'a GameSettings, round: &'a Round, config: &'a SettlementConfig) -> Self {
        Self {
            course: &settings.course,
            round,
            ctx: SettlementContext::new(settings, round, config),
        }
    }

    /// The derived scorecard of each participant, in participant order.
    pub fn cards(&self) -> &[Scorecard] {
        &self.ctx.cards
    }

    /// Standing between the first two participants. `None` with fewer than two.
    pub fn match_play(&self) -> Option<MatchStatus> {
        let [a, b, ..] = self.ctx.cards.as_slice() else {
            return None;
        };
        let tally = MatchTally::compute(a, b, self.ctx.hole_range());
        Some(MatchStatus {
            leader: tally.leader().map(|i| self.round.participants[i].id()),
            up: tally.up(),
            holes_played: tally.played(),
            holes_remaining: tally.remaining(),
            complete: tally.is_decided(),
            text: tally.describe(),
        })
    }

    pub fn skins(&self) -> SkinsStatus {
        let ledger = SkinsLedger::replay(
            &self.ctx.cards,
            self.ctx.hole_range(),
            self.ctx.bet_amount,
            self.ctx.config.skins.carry_over,
        );
        let standings = self
            .round
            .participants
            .iter()
            .zip(ledger.winnings.iter().zip(&ledger.holes_won))
            .map(|(p, (&winnings, &holes_won))| SkinsStanding {
                participant: p.id(),
                name: p.name().to_string(),
                winnings,
                holes_won,
            })
            .collect();
        SkinsStatus {
            standings,
            carry_over_holes: ledger.carried_holes,
            carry_over_amount: ledger.carry_over,
            pot_size: self.ctx.bet_amount * self.ctx.participant_count() as f64,
        }
    }

    /// Every Nassau bet including presses. `None` unless the round is a full
    /// eighteen with two sides.
    pub fn nassau(&self) -> Option<NassauStatus> {
        if self.ctx.round_type != RoundType::Full18 {
            return None;
        }
        let (a, b) = nassau_sides(&self.ctx.cards)?;
        let state = NassauState::replay(&a, &b, self.ctx.press_requests, &self.ctx.config.nassau);
        let bets = state
            .bets
            .iter()
            .map(|bet| NassauBetStatus {
                label: bet.label(),
                first_hole: bet.first_hole,
                last_hole: bet.last_hole,
                leader: bet.tally.leader(),
                up: bet.tally.up(),
                complete: bet.tally.is_decided(),
                text: bet.tally.describe(),
            })
            .collect();
        Some(NassauStatus {
            bets,
            side_units: state.side_units(),
        })
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<LeaderboardEntry> = self
            .round
            .participants
            .iter()
            .zip(&self.ctx.cards)
            .map(|(p, card)| {
                let par: i32 = card
                    .iter()
                    .filter_map(|(hole, _)| self.course.hole(hole))
                    .map(|h| i32::from(h.par))
                    .sum();
                LeaderboardEntry {
                    position: 0,
                    participant: p.id(),
                    name: p.name().to_string(),
                    gross: card.total_gross(),
                    net: card.total_net(),
                    holes_played: card.len(),
                    net_to_par: card.total_net() - par,
                }
            })
            .collect();
        entries.sort_by_key(|e| e.net);
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.position = i + 1;
        }
        entries
    }

    pub fn progress(&self) -> RoundProgress {
        RoundProgress {
            holes_completed: self.round.holes_played(),
            expected_holes: self.round.round_type.expected_holes(),
            is_completed: self.round.is_completed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairway_core::game::GameFormat;
    use fairway_core::round::NassauBet;
    use fairway_core::test_helpers::{individual_round, settings};

    const PAR_ROW: [u32; 18] = [4, 4, 3, 5, 4, 4, 3, 4, 5, 4, 3, 5, 4, 4, 4, 3, 5, 4];

    #[test]
    fn match_status_reads_like_a_scoreboard() {
        let mut p1 = PAR_ROW[..5].to_vec();
        p1[0] -= 1;
        p1[3] -= 1;
        let round = individual_round(RoundType::Full18, 10.0, &[&p1, &PAR_ROW[..5]]);
        let s = settings(GameFormat::MatchPlay);
        let config = SettlementConfig::default();
        let status = StatusReporter::new(&s, &round, &config).match_play().unwrap();

        assert_eq!(status.leader, Some(ParticipantId::Player(1)));
        assert_eq!(status.up, 2);
        assert_eq!(status.holes_played, 5);
        assert_eq!(status.holes_remaining, 13);
        assert!(!status.complete);
        assert_eq!(status.text, "2 UP");
    }

    #[test]
    fn match_status_needs_two_sides() {
        let round = individual_round(RoundType::Full18, 10.0, &[&PAR_ROW]);
        let s = settings(GameFormat::MatchPlay);
        let config = SettlementConfig::default();
        assert!(StatusReporter::new(&s, &round, &config).match_play().is_none());
    }

    #[test]
    fn skins_status_shows_pot_and_carry() {
        let round = individual_round(RoundType::Full18, 10.0, &[&[3, 4], &[4, 4], &[4, 4]]);
        let s = settings(GameFormat::Skins);
        let config = SettlementConfig::default();
        let status = StatusReporter::new(&s, &round, &config).skins();

        assert_eq!(status.pot_size, 30.0);
        assert_eq!(status.carry_over_holes, 1);
        assert_eq!(status.carry_over_amount, 30.0);
        assert_eq!(status.standings[0].holes_won, 1);
        assert_eq!(status.standings[0].winnings, 20.0);
        assert_eq!(status.standings[2].name, "Player3");
    }

    #[test]
    fn nassau_status_lists_presses() {
        let mut p1 = PAR_ROW.to_vec();
        p1[0] -= 1;
        p1[1] -= 1;
        let mut round = individual_round(RoundType::Full18, 10.0, &[&p1, &PAR_ROW]);
        round.request_press(NassauBet::Front, 3);
        let s = settings(GameFormat::Nassau);
        let config = SettlementConfig::default();
        let status = StatusReporter::new(&s, &round, &config).nassau().unwrap();

        let labels: Vec<&str> = status.bets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Front 9", "Back 9", "Overall", "Front 9 press from 3"]);
        assert_eq!(status.bets[0].text, "2 UP");
        assert_eq!(status.bets[1].text, "All Square");
        assert_eq!(status.bets[3].leader, None);
        assert_eq!(status.side_units, [2, -2]);
    }

    #[test]
    fn nassau_status_needs_a_full_round() {
        let round = individual_round(RoundType::Front9, 10.0, &[&PAR_ROW[..9], &PAR_ROW[..9]]);
        let s = settings(GameFormat::Nassau);
        let config = SettlementConfig::default();
        assert!(StatusReporter::new(&s, &round, &config).nassau().is_none());
    }

    #[test]
    fn leaderboard_is_a_stable_sort_on_net() {
        let round = individual_round(RoundType::Front9, 10.0, &[&[5, 5], &[4, 4], &[5, 5]]);
        let s = settings(GameFormat::StrokePlay);
        let config = SettlementConfig::default();
        let board = StatusReporter::new(&s, &round, &config).leaderboard();

        let order: Vec<ParticipantId> = board.iter().map(|e| e.participant).collect();
        assert_eq!(
            order,
            vec![
                ParticipantId::Player(2),
                ParticipantId::Player(1),
                ParticipantId::Player(3),
            ]
        );
        let positions: Vec<usize> = board.iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
        // Holes 1 and 2 are both par 4.
        assert_eq!(board[0].net_to_par, 0);
        assert_eq!(board[1].net_to_par, 2);
        assert_eq!(board[0].holes_played, 2);
    }

    #[test]
    fn progress_follows_the_first_card() {
        let round = individual_round(RoundType::Front9, 10.0, &[&[4, 4, 3], &[4, 4]]);
        let s = settings(GameFormat::StrokePlay);
        let config = SettlementConfig::default();
        let progress = StatusReporter::new(&s, &round, &config).progress();

        assert_eq!(
            progress,
            RoundProgress {
                holes_completed: 3,
                expected_holes: 9,
                is_completed: false,
            }
        );
    }

    #[test]
    fn progress_on_an_oversized_custom_range() {
        let round = individual_round(
            RoundType::Custom { first: 0, last: 255 },
            10.0,
            &[&[4, 4], &[4, 4]],
        );
        let s = settings(GameFormat::StrokePlay);
        let config = SettlementConfig::default();
        let progress = StatusReporter::new(&s, &round, &config).progress();

        assert_eq!(progress.holes_completed, 2);
        assert_eq!(progress.expected_holes, 18);
        assert!(!progress.is_completed);
    }

    #[test]
    fn status_does_not_touch_winnings() {
        let mut round = individual_round(RoundType::Full18, 10.0, &[&[3], &[4]]);
        round.set_manual_winnings(ParticipantId::Player(1), 7.0);
        let before = round.clone();
        let s = settings(GameFormat::Skins);
        let config = SettlementConfig::default();
        let reporter = StatusReporter::new(&s, &round, &config);
        reporter.skins();
        reporter.leaderboard();
        assert_eq!(reporter.cards().len(), 2);
        assert_eq!(round, before);
    }
}
