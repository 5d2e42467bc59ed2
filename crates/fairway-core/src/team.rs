//! Folding member scores into one team score per hole.

use crate::handicap::{
    best_course_handicap, resolve_net_score, team_course_handicap, worst_course_handicap,
};
use crate::round::{HandicapAllowance, TeamScore, TeamScoringType};
use crate::scorecard::{HoleTally, ScoringContext, Scorecard};

/// Fold member cards under a scoring type.
///
/// Scramble is scored exactly like best ball; individual shots are not
/// tracked. Alternate shot reads the first listed member's card.
pub fn fold(scoring_type: TeamScoringType, members: &[Scorecard]) -> Scorecard {
    match scoring_type {
        TeamScoringType::BestBall | TeamScoringType::Scramble => Scorecard::best_ball(members),
        TeamScoringType::Aggregate => Scorecard::aggregate(members),
        TeamScoringType::AlternateShot => members.first().cloned().unwrap_or_default(),
    }
}

/// Course handicap a team plays off under a shared allowance. `None` for
/// [`HandicapAllowance::Individual`] or when it cannot be resolved.
pub fn team_allowance(ctx: &ScoringContext<'_>, score: &TeamScore) -> Option<i32> {
    let params = ctx.params.as_ref()?;
    let indexes: Vec<f64> = score
        .members
        .iter()
        .map(|m| m.player.handicap_index)
        .collect();
    match score.team.allowance {
        HandicapAllowance::Individual => None,
        HandicapAllowance::Average => team_course_handicap(&indexes, params),
        HandicapAllowance::Lowest => best_course_handicap(&indexes, params),
        HandicapAllowance::Highest => worst_course_handicap(&indexes, params),
    }
}

/// The team's derived scorecard for the round.
pub fn team_card(ctx: &ScoringContext<'_>, score: &TeamScore) -> Scorecard {
    let scoring_type = score.team.scoring_type;
    if score.team.allowance == HandicapAllowance::Individual {
        let members: Vec<Scorecard> = score.members.iter().map(|m| ctx.player_card(m)).collect();
        return fold(scoring_type, &members);
    }

    // Shared allowance: fold gross only, then apply the team's strokes once.
    let gross_only: Vec<Scorecard> = score
        .members
        .iter()
        .map(|m| ctx.card_with_handicap(m, None))
        .collect();
    let folded = fold(scoring_type, &gross_only);
    let team_handicap = team_allowance(ctx, score);

    let mut card = Scorecard::new();
    for (hole, tally) in folded.iter() {
        let net = match ctx.course.hole(hole) {
            Some(h) => resolve_net_score(tally.gross, team_handicap, h.handicap_rank),
            None => tally.gross,
        };
        card.insert(
            hole,
            HoleTally {
                gross: tally.gross,
                net,
            },
        );
    }
    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{Course, Hole, Tee, TeeRating};
    use crate::handicap::HandicapParams;
    use crate::player::Player;
    use crate::round::{PlayerScore, Team};

    fn course() -> Course {
        Course {
            name: "Test".to_string(),
            holes: (1..=18)
                .map(|n| Hole {
                    number: n,
                    par: 4,
                    handicap_rank: n,
                })
                .collect(),
            tees: vec![Tee {
                name: "White".to_string(),
                mens: Some(TeeRating {
                    rating: 72.0,
                    slope: 113,
                }),
                womens: None,
            }],
        }
    }

    fn ctx(course: &Course) -> ScoringContext<'_> {
        ScoringContext {
            course,
            params: Some(HandicapParams {
                rating: 72.0,
                slope: 113,
                par: 72,
            }),
            range: 1..=18,
        }
    }

    fn member(id: u64, index: f64, scores: &[(u8, u32)]) -> PlayerScore {
        let mut ps = PlayerScore::new(Player::new(id, format!("P{id}"), index));
        for &(hole, gross) in scores {
            ps.record(hole, gross);
        }
        ps
    }

    fn team(scoring_type: TeamScoringType, allowance: HandicapAllowance) -> TeamScore {
        TeamScore {
            team: Team {
                id: 1,
                name: "Team".to_string(),
                scoring_type,
                allowance,
            },
            members: vec![
                // Course handicap 2: strokes on holes 1 and 2.
                member(1, 2.0, &[(1, 5), (2, 4), (3, 4)]),
                member(2, 0.0, &[(1, 4), (2, 5)]),
            ],
            winnings: 0.0,
        }
    }

    #[test]
    fn best_ball_uses_member_nets() {
        let course = course();
        let card = team_card(&ctx(&course), &team(TeamScoringType::BestBall, HandicapAllowance::Individual));
        assert_eq!(card.get(1), Some(HoleTally { gross: 4, net: 4 }));
        assert_eq!(card.get(2), Some(HoleTally { gross: 4, net: 3 }));
        assert_eq!(card.get(3), Some(HoleTally { gross: 4, net: 4 }));
        assert_eq!(card.total_net(), 11);
    }

    #[test]
    fn scramble_matches_best_ball() {
        let course = course();
        let c = ctx(&course);
        assert_eq!(
            team_card(&c, &team(TeamScoringType::Scramble, HandicapAllowance::Individual)),
            team_card(&c, &team(TeamScoringType::BestBall, HandicapAllowance::Individual)),
        );
    }

    #[test]
    fn aggregate_sums_members() {
        let course = course();
        let card = team_card(&ctx(&course), &team(TeamScoringType::Aggregate, HandicapAllowance::Individual));
        // Hole 3 is left out: only one member scored it.
        assert_eq!(card.len(), 2);
        assert_eq!(card.total_gross(), 18);
        assert_eq!(card.total_net(), 16);
    }

    #[test]
    fn alternate_shot_reads_first_member() {
        let course = course();
        let card = team_card(&ctx(&course), &team(TeamScoringType::AlternateShot, HandicapAllowance::Individual));
        assert_eq!(card.total_gross(), 13);
        assert_eq!(card.total_net(), 11);
    }

    #[test]
    fn shared_allowance_applies_team_strokes_once() {
        let course = course();
        let c = ctx(&course);
        // Average index 1.0 -> course handicap 1: one stroke on hole 1 only.
        let card = team_card(&c, &team(TeamScoringType::BestBall, HandicapAllowance::Average));
        assert_eq!(card.get(1), Some(HoleTally { gross: 4, net: 3 }));
        assert_eq!(card.get(2), Some(HoleTally { gross: 4, net: 4 }));

        let t = team(TeamScoringType::BestBall, HandicapAllowance::Highest);
        assert_eq!(team_allowance(&c, &t), Some(2));
        let t = team(TeamScoringType::BestBall, HandicapAllowance::Lowest);
        assert_eq!(team_allowance(&c, &t), Some(0));
    }

    #[test]
    fn empty_team_has_empty_card() {
        let course = course();
        let mut t = team(TeamScoringType::AlternateShot, HandicapAllowance::Individual);
        t.members.clear();
        assert!(team_card(&ctx(&course), &t).is_empty());
    }
}
