//! FSRS-4.5 memory model. Pure math over `(difficulty, stability)` pairs;
//! calendar concerns (learning steps, due timestamps) live in the scheduler.

use crate::core::Grade;

/// Default FSRS-4.5 weights.
const WEIGHTS: [f64; 17] = [
    0.4872, 1.4003, 3.7145, 13.8206, 5.1618, 1.2298, 0.8975, 0.031, 1.6474, 0.1367, 1.0461,
    2.1072, 0.0793, 0.3246, 1.587, 0.2272, 2.8755,
];

const DECAY: f64 = -0.5;
// FACTOR is chosen so that retrievability(interval, stability) == 0.9.
const FACTOR: f64 = 19.0 / 81.0;

/// The part of a card the model cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryState {
    pub difficulty: f64,
    pub stability: f64,
}

/// Output of grading: the next memory state plus the model-computed
/// interval until the next review.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulingResult {
    pub difficulty: f64,
    pub stability: f64,
    pub interval_days: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct Fsrs {
    weights: [f64; 17],
    request_retention: f64,
    max_interval_days: u32,
}

impl Default for Fsrs {
    fn default() -> Self {
        Fsrs {
            weights: WEIGHTS,
            request_retention: 0.9,
            max_interval_days: 36500,
        }
    }
}

fn grade_number(grade: Grade) -> f64 {
    match grade {
        Grade::Again => 1.0,
        Grade::Hard => 2.0,
        Grade::Good => 3.0,
        Grade::Easy => 4.0,
    }
}

impl Fsrs {
    /// Probability of recall after `elapsed_days` for a card with the given
    /// stability. Equals `request_retention` when `elapsed_days == stability`
    /// under the default parameters.
    pub fn retrievability(&self, elapsed_days: f64, stability: f64) -> f64 {
        (1.0 + FACTOR * elapsed_days / stability).powf(DECAY)
    }

    /// First review of a card that has no memory state yet.
    pub fn new_card(&self, grade: Grade) -> SchedulingResult {
        let stability = self.initial_stability(grade);
        let difficulty = self.initial_difficulty(grade);
        SchedulingResult {
            difficulty,
            stability,
            interval_days: self.interval_days(stability),
        }
    }

    /// Review of a card with existing memory state, `elapsed_days` after its
    /// last review.
    pub fn grade_card(
        &self,
        state: MemoryState,
        elapsed_days: f64,
        grade: Grade,
    ) -> SchedulingResult {
        let elapsed = elapsed_days.max(0.0);
        let retrievability = self.retrievability(elapsed, state.stability);

        let difficulty = self.next_difficulty(state.difficulty, grade);
        let stability = match grade {
            Grade::Again => self.forget_stability(state, retrievability),
            _ => self.recall_stability(state, retrievability, grade),
        };

        SchedulingResult {
            difficulty,
            stability,
            interval_days: self.interval_days(stability),
        }
    }

    /// Interval (whole days) at which retrievability decays to the requested
    /// retention, clamped to `1..=max_interval_days`.
    pub fn interval_days(&self, stability: f64) -> u32 {
        let raw = stability / FACTOR * (self.request_retention.powf(1.0 / DECAY) - 1.0);
        (raw.round() as i64).clamp(1, self.max_interval_days as i64) as u32
    }

    fn initial_stability(&self, grade: Grade) -> f64 {
        self.weights[grade_number(grade) as usize - 1]
    }

    fn initial_difficulty(&self, grade: Grade) -> f64 {
        let w = &self.weights;
        (w[4] - (grade_number(grade) - 3.0) * w[5]).clamp(1.0, 10.0)
    }

    /// Mean-reverting difficulty update, pulled toward the difficulty a
    /// brand-new Easy card would get.
    fn next_difficulty(&self, difficulty: f64, grade: Grade) -> f64 {
        let w = &self.weights;
        let target = self.initial_difficulty(Grade::Easy);
        let updated = difficulty - w[6] * (grade_number(grade) - 3.0);
        (w[7] * target + (1.0 - w[7]) * updated).clamp(1.0, 10.0)
    }

    fn recall_stability(&self, state: MemoryState, retrievability: f64, grade: Grade) -> f64 {
        let w = &self.weights;
        let hard_penalty = if grade == Grade::Hard { w[15] } else { 1.0 };
        let easy_bonus = if grade == Grade::Easy { w[16] } else { 1.0 };

        state.stability
            * (1.0
                + w[8].exp()
                    * (11.0 - state.difficulty)
                    * state.stability.powf(-w[9])
                    * ((w[10] * (1.0 - retrievability)).exp() - 1.0)
                    * hard_penalty
                    * easy_bonus)
    }

    /// Post-lapse stability. Never exceeds the stability the card had before
    /// the lapse.
    fn forget_stability(&self, state: MemoryState, retrievability: f64) -> f64 {
        let w = &self.weights;
        let relearned = w[11]
            * state.difficulty.powf(-w[12])
            * ((state.stability + 1.0).powf(w[13]) - 1.0)
            * (w[14] * (1.0 - retrievability)).exp();
        relearned.min(state.stability)
    }
}
