use std::collections::HashSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Number of holes on a regulation course.
pub const HOLE_COUNT: u8 = 18;

/// Every hole number a score may reference.
pub const ALL_HOLES: RangeInclusive<u8> = 1..=HOLE_COUNT;
/// Holes 1 through 9.
pub const FRONT_NINE: RangeInclusive<u8> = 1..=9;
/// Holes 10 through 18.
pub const BACK_NINE: RangeInclusive<u8> = 10..=HOLE_COUNT;

/// Slope ratings outside this range are not issued by rating authorities.
pub const SLOPE_RANGE: RangeInclusive<u16> = 55..=155;

/// A single hole's static reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hole {
    pub number: u8,
    pub par: u8,
    /// Difficulty rank used for stroke allocation (1 = hardest).
    pub handicap_rank: u8,
}

/// Which rating column of a tee applies to a player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// Course rating and slope for one gender off one tee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeeRating {
    pub rating: f64,
    pub slope: u16,
}

/// A set of tee markers with their gender-specific ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tee {
    pub name: String,
    #[serde(default)]
    pub mens: Option<TeeRating>,
    #[serde(default)]
    pub womens: Option<TeeRating>,
}

impl Tee {
    pub fn rating_for(&self, gender: Gender) -> Option<TeeRating> {
        match gender {
            Gender::Male => self.mens,
            Gender::Female => self.womens,
        }
    }
}

/// An 18-hole course with its tees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub holes: Vec<Hole>,
    pub tees: Vec<Tee>,
}

impl Course {
    pub fn hole(&self, number: u8) -> Option<&Hole> {
        self.holes.iter().find(|h| h.number == number)
    }

    pub fn tee(&self, name: &str) -> Option<&Tee> {
        self.tees.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Total par over all holes. `None` if it does not fit a `u8`.
    pub fn par(&self) -> Option<u8> {
        self.par_for(ALL_HOLES)
    }

    /// Total par over the holes in `range`. `None` if it does not fit a `u8`,
    /// which only a malformed layout can produce.
    pub fn par_for(&self, range: RangeInclusive<u8>) -> Option<u8> {
        let total: u32 = self
            .holes
            .iter()
            .filter(|h| range.contains(&h.number))
            .map(|h| u32::from(h.par))
            .sum();
        u8::try_from(total).ok()
    }

    /// Check the course is a well-formed 18-hole layout.
    pub fn validate(&self) -> Result<(), CourseError> {
        if self.holes.len() != HOLE_COUNT as usize {
            return Err(CourseError::HoleCount(self.holes.len()));
        }

        let mut numbers = HashSet::new();
        let mut ranks = HashSet::new();
        for hole in &self.holes {
            if !ALL_HOLES.contains(&hole.number) || !numbers.insert(hole.number) {
                return Err(CourseError::HoleNumber(hole.number));
            }
            if !(3..=5).contains(&hole.par) {
                return Err(CourseError::Par {
                    hole: hole.number,
                    par: hole.par,
                });
            }
            if !ALL_HOLES.contains(&hole.handicap_rank) || !ranks.insert(hole.handicap_rank) {
                return Err(CourseError::HandicapRank {
                    hole: hole.number,
                    rank: hole.handicap_rank,
                });
            }
        }

        if self.tees.is_empty() {
            return Err(CourseError::NoTees);
        }
        for tee in &self.tees {
            for rating in [tee.mens, tee.womens].into_iter().flatten() {
                if !SLOPE_RANGE.contains(&rating.slope) {
                    return Err(CourseError::Slope {
                        tee: tee.name.clone(),
                        slope: rating.slope,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Reasons a course fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseError {
    HoleCount(usize),
    HoleNumber(u8),
    Par { hole: u8, par: u8 },
    HandicapRank { hole: u8, rank: u8 },
    NoTees,
    Slope { tee: String, slope: u16 },
}

impl std::fmt::Display for CourseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HoleCount(n) => write!(f, "course has {n} holes, expected {HOLE_COUNT}"),
            Self::HoleNumber(n) => write!(f, "hole number {n} is out of range or duplicated"),
            Self::Par { hole, par } => write!(f, "hole {hole} has par {par}, expected 3..=5"),
            Self::HandicapRank { hole, rank } => {
                write!(f, "hole {hole} has handicap rank {rank}, out of range or duplicated")
            },
            Self::NoTees => write!(f, "course has no tees"),
            Self::Slope { tee, slope } => {
                write!(f, "tee {tee} has slope {slope}, expected 55..=155")
            },
        }
    }
}

impl std::error::Error for CourseError {}
