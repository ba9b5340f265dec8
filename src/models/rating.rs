//! Book rating scores

use crate::error::AppError;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// A single score between one and five stars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score(u8);

impl Score {
    pub fn new(value: u8) -> Result<Self, AppError> {
        if (MIN_SCORE..=MAX_SCORE).contains(&value) {
            Ok(Score(value))
        } else {
            Err(AppError::Validation(format!(
                "Rating must be between {} and {}",
                MIN_SCORE, MAX_SCORE
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn stars(self) -> String {
        "*".repeat(self.0 as usize)
    }
}

impl TryFrom<u8> for Score {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Score::new(value)
    }
}

/// Fold one more score into a running average over `raters` previous scores
pub fn running_average(average: f64, raters: i64, score: Score) -> f64 {
    let raters = raters.max(0) as f64;
    (average * raters + f64::from(score.value())) / (raters + 1.0)
}
