//! Defect scoring and grading.
//!
//! The backend grades both model results itself; this table is only used to
//! grade the raw detector output, which arrives without a grade. It must stay
//! identical to the backend's table or the comparison row drifts.

use crate::model::{Detection, Grade};

/// Points per defect class. Unknown classes score nothing.
pub fn score_of(class_name: &str) -> u32 {
    match class_name {
        "hole" | "tear" => 100,
        "stain" => 50,
        "pilling" => 20,
        "none" => 0,
        // legacy detector vocabulary
        "damage" => 100,
        "attach" => 20,
        "pollution" => 50,
        _ => 0,
    }
}

impl Grade {
    pub fn from_score(total_score: u32) -> Self {
        match total_score {
            0..=19 => Grade::S,
            20..=49 => Grade::A,
            50..=99 => Grade::B,
            _ => Grade::F,
        }
    }
}

/// Legend shown next to every total score.
pub const GRADE_LEGEND: &str = "S: 0-19 | A: 20-49 | B: 50-99 | F: 100+";

pub fn total_score<'a, I>(detections: I) -> u32
where
    I: IntoIterator<Item = &'a Detection>,
{
    detections
        .into_iter()
        .map(|d| score_of(&d.class_name))
        .fold(0u32, u32::saturating_add)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCard {
    pub total_score: u32,
    pub grade: Grade,
}

pub fn grade_detections<'a, I>(detections: I) -> ScoreCard
where
    I: IntoIterator<Item = &'a Detection>,
{
    let total_score = total_score(detections);
    ScoreCard {
        total_score,
        grade: Grade::from_score(total_score),
    }
}
