//! Course handicap and per-hole stroke allocation.
//!
//! A course handicap below 18 gives one stroke on each hole whose handicap
//! rank is at or below it. At 18 and above every hole gets one stroke, and the
//! `course_handicap - 18` hardest holes get a second.

use serde::{Deserialize, Serialize};

/// Slope of a course of standard difficulty.
pub const STANDARD_SLOPE: f64 = 113.0;

/// Course handicap at which every hole receives a stroke.
pub const STROKES_PER_ROUND: i32 = 18;

/// The rating, slope and par needed to turn a handicap index into a
/// course handicap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandicapParams {
    pub rating: f64,
    pub slope: u16,
    pub par: u8,
}

impl HandicapParams {
    pub fn course_handicap(&self, handicap_index: f64) -> i32 {
        course_handicap(handicap_index, self.rating, self.slope, self.par)
    }
}

/// `round(index * slope / 113 + (rating - par))`, rounded half away from zero.
///
/// Not clamped: plus players come out negative.
pub fn course_handicap(handicap_index: f64, rating: f64, slope: u16, par: u8) -> i32 {
    (handicap_index * f64::from(slope) / STANDARD_SLOPE + (rating - f64::from(par))).round() as i32
}

/// Course handicap for a team from the mean of its members' indexes.
pub fn team_course_handicap(indexes: &[f64], params: &HandicapParams) -> Option<i32> {
    if indexes.is_empty() {
        return None;
    }
    let mean = indexes.iter().sum::<f64>() / indexes.len() as f64;
    Some(params.course_handicap(mean))
}

/// Lowest individual course handicap among the members.
pub fn best_course_handicap(indexes: &[f64], params: &HandicapParams) -> Option<i32> {
    indexes.iter().map(|&i| params.course_handicap(i)).min()
}

/// Highest individual course handicap among the members.
pub fn worst_course_handicap(indexes: &[f64], params: &HandicapParams) -> Option<i32> {
    indexes.iter().map(|&i| params.course_handicap(i)).max()
}

/// Strokes received on a hole of the given difficulty rank: 0, 1 or 2.
pub fn strokes_received_on_hole(course_handicap: i32, hole_handicap_rank: u8) -> u8 {
    let rank = i32::from(hole_handicap_rank);
    if course_handicap < STROKES_PER_ROUND {
        u8::from(rank <= course_handicap)
    } else if rank <= course_handicap - STROKES_PER_ROUND {
        2
    } else {
        1
    }
}

pub fn net_score(gross_score: i32, strokes_received: u8) -> i32 {
    gross_score - i32::from(strokes_received)
}

/// Net score for a hole, or gross when the course handicap is unknown.
pub fn resolve_net_score(gross_score: i32, course_handicap: Option<i32>, hole_handicap_rank: u8) -> i32 {
    match course_handicap {
        Some(ch) => net_score(gross_score, strokes_received_on_hole(ch, hole_handicap_rank)),
        None => gross_score,
    }
}
