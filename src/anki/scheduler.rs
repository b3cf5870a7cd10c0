use crate::core::{
    utils::{
        MS_PER_DAY,
        MS_PER_MINUTE,
    },
    FavoriteItem,
    Grade,
};

use super::fsrs::{
    Fsrs,
    MemoryState,
    SchedulingResult,
};

/// Learning steps. Raw FSRS intervals are too coarse for first-exposure
/// learning, so short same-day steps override the model until the card
/// enters the multi-day review cycle.
const AGAIN_STEP_MS: i64 = MS_PER_MINUTE;
const HARD_STEP_MS: i64 = 3 * MS_PER_MINUTE;
const GOOD_NEW_STEP_MS: i64 = 10 * MS_PER_MINUTE;

/// The fields of a card that rating changes. Produced by
/// [`next_review_state`] and written back by the persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewUpdate {
    pub stability: f64,
    pub difficulty: f64,
    pub due: i64,
    pub last_review: i64,
}

impl ReviewUpdate {
    pub fn apply_to(&self, item: &FavoriteItem) -> FavoriteItem {
        FavoriteItem {
            stability: self.stability,
            difficulty: self.difficulty,
            due: self.due,
            last_review: Some(self.last_review),
            ..item.clone()
        }
    }
}

fn model_result(item: &FavoriteItem, grade: Grade, now: i64) -> SchedulingResult {
    let fsrs = Fsrs::default();
    match item.last_review {
        None => fsrs.new_card(grade),
        Some(last_review) => {
            let elapsed_days = (now - last_review) as f64 / MS_PER_DAY as f64;
            fsrs.grade_card(
                MemoryState {
                    difficulty: item.difficulty,
                    stability: item.stability,
                },
                elapsed_days,
                grade,
            )
        }
    }
}

/// Pure scheduling transform: the card's next memory state and due date
/// for a given grade at time `now` (epoch milliseconds).
///
/// `Again` and `Hard` always reschedule within minutes, as does `Good` on a
/// never-reviewed card. Everything else follows the model's interval.
/// Deterministic in `(item, grade, now)`, so the same function serves both
/// the button previews and the actual commit.
pub fn next_review_state(item: &FavoriteItem, grade: Grade, now: i64) -> ReviewUpdate {
    let result = model_result(item, grade, now);

    let interval_ms = match grade {
        Grade::Again => AGAIN_STEP_MS,
        Grade::Hard => HARD_STEP_MS,
        Grade::Good if item.is_new() => GOOD_NEW_STEP_MS,
        _ => result.interval_days as i64 * MS_PER_DAY,
    };

    ReviewUpdate {
        stability: result.stability,
        difficulty: result.difficulty,
        due: now + interval_ms,
        last_review: now,
    }
}

/// Hypothetical model interval (in days) per rating button, for UI display
/// ("Good: 4d"). Non-mutating; learning-step overrides are not applied here
/// because the buttons show the long-term schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewIntervals {
    pub again: u32,
    pub hard: u32,
    pub good: u32,
    pub easy: u32,
}

pub fn preview_intervals(item: &FavoriteItem, now: i64) -> PreviewIntervals {
    let days = |grade| model_result(item, grade, now).interval_days;
    PreviewIntervals {
        again: days(Grade::Again),
        hard: days(Grade::Hard),
        good: days(Grade::Good),
        easy: days(Grade::Easy),
    }
}
