// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The review scheduler.
//!
//! Given a card, a rating and the current time, computes the card's new
//! stability, difficulty and state, and the date of its next review. The
//! interval formula inverts the forgetting curve, so that on the due date
//! the predicted recall probability equals the requested retention.

use crate::fsrs::DIFFICULTY_BASE;
use crate::fsrs::DIFFICULTY_EXP;
use crate::fsrs::Difficulty;
use crate::fsrs::EASY_BONUS;
use crate::fsrs::FORGET_DIFFICULTY_EXP;
use crate::fsrs::FORGET_SCALE;
use crate::fsrs::HARD_PENALTY;
use crate::fsrs::INITIAL_STABILITY_AGAIN;
use crate::fsrs::INITIAL_STABILITY_EASY;
use crate::fsrs::INITIAL_STABILITY_GOOD;
use crate::fsrs::INITIAL_STABILITY_HARD;
use crate::fsrs::Parameters;
use crate::fsrs::RETENTION_SENSITIVITY;
use crate::fsrs::STABILITY_DECAY;
use crate::fsrs::STABILITY_EXP;
use crate::fsrs::Stability;
use crate::fsrs::clamp;
use crate::fsrs::clamp_difficulty;
use crate::types::card::Card;
use crate::types::card_state::CardState;
use crate::types::rating::Rating;
use crate::types::timestamp::Timestamp;

/// The minimum review interval in days.
const MIN_INTERVAL: f64 = 1.0;

pub struct Scheduler {
    params: Parameters,
}

impl Scheduler {
    pub fn new(params: Parameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Review a card. Returns the updated card; the input is untouched.
    pub fn review(&self, card: Card, rating: Rating, now: Timestamp) -> Card {
        let mut card = card;
        card.last_review = Some(now);
        card.reps += 1;

        let next_state = card.state.after(rating);
        match (card.state, rating) {
            (CardState::New, _) => {
                card.difficulty = self.initial_difficulty(rating);
                card.stability = self.initial_stability(rating);
            }
            (_, Rating::Again) => {
                card.lapses += 1;
                card.stability = self.forget_stability(card.difficulty, card.stability);
                card.difficulty = self.next_difficulty(card.difficulty, rating);
            }
            (_, Rating::Hard | Rating::Good | Rating::Easy) => {
                card.stability = self.recall_stability(card.difficulty, card.stability, rating);
                card.difficulty = self.next_difficulty(card.difficulty, rating);
            }
        }
        card.state = next_state;

        let interval = self.interval(card.stability);
        card.due = now.plus_days(interval);
        card
    }

    /// The interval in whole days after which recall probability drops to
    /// the requested retention, clamped to `[1, maximum_interval]`.
    pub fn interval(&self, s: Stability) -> u32 {
        let r = self.params.request_retention;
        let days = (s * 9.0 * (1.0 / r - 1.0)).round();
        // NaN clamps to the minimum.
        clamp(days, MIN_INTERVAL, f64::from(self.params.maximum_interval)) as u32
    }

    fn initial_difficulty(&self, rating: Rating) -> Difficulty {
        let w = &self.params.weights;
        let g = rating.as_f64();
        clamp_difficulty(w[DIFFICULTY_BASE] - f64::exp(w[DIFFICULTY_EXP] * (g - 1.0)) + 1.0)
    }

    fn initial_stability(&self, rating: Rating) -> Stability {
        let w = &self.params.weights;
        match rating {
            Rating::Again => w[INITIAL_STABILITY_AGAIN],
            Rating::Hard => w[INITIAL_STABILITY_HARD],
            Rating::Good => w[INITIAL_STABILITY_GOOD],
            Rating::Easy => w[INITIAL_STABILITY_EASY],
        }
    }

    fn next_difficulty(&self, d: Difficulty, rating: Rating) -> Difficulty {
        let w = &self.params.weights;
        let g = rating.as_f64();
        clamp_difficulty(d - w[DIFFICULTY_BASE] * (f64::exp(w[DIFFICULTY_EXP] * (g - 3.0)) - 1.0))
    }

    fn recall_stability(&self, d: Difficulty, s: Stability, rating: Rating) -> Stability {
        let w = &self.params.weights;
        // A stored stability of zero or less would make `s.powf(-w9)` blow up.
        let s = if s <= 0.0 {
            self.initial_stability(rating)
        } else {
            s
        };
        let hard_penalty = if rating == Rating::Hard {
            w[HARD_PENALTY]
        } else {
            1.0
        };
        let easy_bonus = if rating == Rating::Easy {
            w[EASY_BONUS]
        } else {
            1.0
        };
        let retention_term =
            f64::exp(w[RETENTION_SENSITIVITY] * (1.0 - self.params.request_retention)) - 1.0;
        s * (1.0
            + f64::exp(w[STABILITY_EXP])
                * (11.0 - d)
                * s.powf(-w[STABILITY_DECAY])
                * retention_term
                * hard_penalty
                * easy_bonus)
    }

    fn forget_stability(&self, d: Difficulty, s: Stability) -> Stability {
        let w = &self.params.weights;
        w[FORGET_SCALE]
            * d.powf(-w[FORGET_DIFFICULTY_EXP])
            * ((s + 1.0).powf(w[STABILITY_EXP]) - 1.0)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Parameters::default())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::error::Fallible;
    use crate::fsrs::DEFAULT_WEIGHTS;
    use crate::fsrs::MAX_DIFFICULTY;
    use crate::fsrs::MAX_MAXIMUM_INTERVAL;
    use crate::fsrs::MIN_DIFFICULTY;
    use crate::fsrs::WEIGHT_COUNT;
    use crate::fsrs::Weights;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn now() -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap())
    }

    fn reviewed(stability: Stability, difficulty: Difficulty, state: CardState) -> Card {
        Card {
            due: now(),
            stability,
            difficulty,
            reps: 3,
            lapses: 1,
            state,
            last_review: Some(now()),
        }
    }

    fn days_scheduled(card: &Card, from: Timestamp) -> i64 {
        from.days_until(card.due)
    }

    #[test]
    fn test_first_read_good() {
        let scheduler = Scheduler::default();
        let card = scheduler.review(Card::new(now()), Rating::Good, now());
        assert!((card.difficulty - 5.3146).abs() < 1e-3);
        assert!(approx_eq(card.stability, 3.1262));
        assert_eq!(card.state, CardState::Review);
        assert_eq!(card.reps, 1);
        assert_eq!(card.lapses, 0);
        assert_eq!(card.last_review, Some(now()));
        assert_eq!(card.due, now().plus_days(3));
    }

    #[test]
    fn test_first_read_again() {
        let scheduler = Scheduler::default();
        let card = scheduler.review(Card::new(now()), Rating::Again, now());
        assert!(approx_eq(card.difficulty, 7.2102));
        assert!(approx_eq(card.stability, 0.4072));
        assert_eq!(card.state, CardState::Learning);
        assert_eq!(card.lapses, 0);
        assert_eq!(card.due, now().plus_days(1));
    }

    #[test]
    fn test_first_read_hard_and_easy() {
        let scheduler = Scheduler::default();
        let hard = scheduler.review(Card::new(now()), Rating::Hard, now());
        assert!(approx_eq(hard.stability, 1.1829));
        assert!((hard.difficulty - 6.5085).abs() < 1e-3);
        assert_eq!(hard.due, now().plus_days(1));
        let easy = scheduler.review(Card::new(now()), Rating::Easy, now());
        assert!(approx_eq(easy.stability, 15.4722));
        assert!((easy.difficulty - 3.2829).abs() < 1e-3);
        assert_eq!(easy.due, now().plus_days(15));
    }

    #[test]
    fn test_lapse() {
        let scheduler = Scheduler::default();
        let card = reviewed(5.0, 6.0, CardState::Review);
        let next = scheduler.review(card, Rating::Again, now());
        let w = DEFAULT_WEIGHTS;
        let expected = w[FORGET_SCALE]
            * 6f64.powf(-w[FORGET_DIFFICULTY_EXP])
            * (6f64.powf(w[STABILITY_EXP]) - 1.0);
        assert!(approx_eq(next.stability, expected));
        // 6 - w4 * (e^(-2 * w5) - 1) exceeds the ceiling.
        assert_eq!(next.difficulty, MAX_DIFFICULTY);
        assert_eq!(next.state, CardState::Relearn);
        assert_eq!(next.lapses, card.lapses + 1);
        assert_eq!(next.reps, card.reps + 1);
        assert_eq!(days_scheduled(&next, now()), 17);
    }

    #[test]
    fn test_recall_good() {
        let scheduler = Scheduler::default();
        let next = scheduler.review(reviewed(5.0, 6.0, CardState::Review), Rating::Good, now());
        assert!((next.stability - 16.2187).abs() < 1e-3);
        // Good leaves difficulty unchanged.
        assert!(approx_eq(next.difficulty, 6.0));
        assert_eq!(next.state, CardState::Review);
        assert_eq!(next.lapses, 1);
        assert_eq!(days_scheduled(&next, now()), 16);
    }

    #[test]
    fn test_recall_hard_and_easy_modifiers() {
        let scheduler = Scheduler::default();
        let card = reviewed(5.0, 6.0, CardState::Review);
        let hard = scheduler.review(card, Rating::Hard, now());
        assert!((hard.stability - 6.0691).abs() < 1e-3);
        assert!((hard.difficulty - 8.9730).abs() < 1e-3);
        let easy = scheduler.review(card, Rating::Easy, now());
        assert!((easy.stability - 8.3376).abs() < 1e-3);
        assert_eq!(easy.difficulty, MIN_DIFFICULTY);
    }

    #[test]
    fn test_relearn_and_learning_return_to_review() {
        let scheduler = Scheduler::default();
        for state in [CardState::Learning, CardState::Relearn] {
            let next = scheduler.review(reviewed(0.4, 7.0, state), Rating::Good, now());
            assert_eq!(next.state, CardState::Review);
        }
    }

    #[test]
    fn test_again_from_learning_and_relearn() {
        let scheduler = Scheduler::default();
        let w = DEFAULT_WEIGHTS;
        for state in [CardState::Learning, CardState::Relearn] {
            let card = reviewed(0.4, 7.0, state);
            let next = scheduler.review(card, Rating::Again, now());
            let expected = w[FORGET_SCALE]
                * 7f64.powf(-w[FORGET_DIFFICULTY_EXP])
                * (1.4f64.powf(w[STABILITY_EXP]) - 1.0);
            assert!(approx_eq(next.stability, expected));
            assert_eq!(next.difficulty, MAX_DIFFICULTY);
            assert_eq!(next.state, CardState::Relearn);
            assert_eq!(next.lapses, card.lapses + 1);
            assert_eq!(next.reps, card.reps + 1);
            assert_eq!(days_scheduled(&next, now()), 1);
        }
    }

    #[test]
    fn test_zero_stability_guard() {
        let scheduler = Scheduler::default();
        for stability in [0.0, -1.0, -100.0] {
            for rating in [Rating::Hard, Rating::Good, Rating::Easy] {
                let next =
                    scheduler.review(reviewed(stability, 6.0, CardState::Review), rating, now());
                assert!(next.stability.is_finite());
                assert!(next.stability > 0.0);
            }
        }
        // Falls back to the initial stability for the rating.
        let next = scheduler.review(reviewed(0.0, 6.0, CardState::Review), Rating::Good, now());
        assert!((next.stability - 10.6681).abs() < 1e-3);
    }

    #[test]
    fn test_deterministic() {
        let scheduler = Scheduler::default();
        let card = reviewed(2.5, 4.0, CardState::Review);
        for rating in Rating::ALL {
            let a = scheduler.review(card, rating, now());
            let b = scheduler.review(card, rating, now());
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_bounds_over_reachable_cards() {
        let scheduler = Scheduler::default();
        let max = i64::from(scheduler.params().maximum_interval);
        for first in Rating::ALL {
            let mut time = now();
            let mut card = scheduler.review(Card::new(time), first, time);
            for step in 0..40 {
                let rating = Rating::ALL[(step * 7 + first.as_u8() as usize) % 4];
                time = card.due;
                card = scheduler.review(card, rating, time);
                assert!(card.difficulty >= MIN_DIFFICULTY && card.difficulty <= MAX_DIFFICULTY);
                assert!(card.stability.is_finite() && card.stability >= 0.0);
                let days = days_scheduled(&card, time);
                assert!((1..=max).contains(&days), "interval out of bounds: {days}");
            }
        }
    }

    #[test]
    fn test_repeated_good() {
        let scheduler = Scheduler::default();
        let mut time = now();
        let mut card = Card::new(time);
        for i in 0..20 {
            card = scheduler.review(card, Rating::Good, time);
            assert_eq!(card.state, CardState::Review);
            assert_eq!(card.reps, i + 1);
            assert!(card.stability.is_finite() && card.stability >= 0.0);
            assert!(card.difficulty >= MIN_DIFFICULTY && card.difficulty <= MAX_DIFFICULTY);
            time = card.due;
        }
    }

    #[test]
    fn test_interval_is_capped() {
        let scheduler = Scheduler::default();
        assert_eq!(scheduler.interval(0.0), 1);
        assert_eq!(scheduler.interval(0.4), 1);
        assert_eq!(scheduler.interval(3.1262), 3);
        assert_eq!(scheduler.interval(10_000.0), 365);
        assert_eq!(scheduler.interval(f64::NAN), 1);
    }

    #[test]
    fn test_custom_parameters() -> Fallible<()> {
        let mut values = [1.0; WEIGHT_COUNT];
        values[INITIAL_STABILITY_GOOD] = 50.0;
        let params = Parameters::new(0.9, 30, Weights::from_slice(&values)?)?;
        let scheduler = Scheduler::new(params);
        let card = scheduler.review(Card::new(now()), Rating::Good, now());
        assert!(approx_eq(card.stability, 50.0));
        assert_eq!(days_scheduled(&card, now()), 30);
        Ok(())
    }

    #[test]
    fn test_largest_maximum_interval() -> Fallible<()> {
        let mut values: Vec<f64> = (0..WEIGHT_COUNT).map(|i| DEFAULT_WEIGHTS[i]).collect();
        values[INITIAL_STABILITY_EASY] = 1e12;
        let weights = Weights::from_slice(&values)?;
        assert!(Parameters::new(0.9, u32::MAX, weights).is_err());

        let params = Parameters::new(0.9, MAX_MAXIMUM_INTERVAL, weights)?;
        let scheduler = Scheduler::new(params);
        let card = scheduler.review(Card::new(now()), Rating::Easy, now());
        assert_eq!(card.due, now().plus_days(MAX_MAXIMUM_INTERVAL));
        assert_eq!(scheduler.interval(f64::MAX), MAX_MAXIMUM_INTERVAL);
        Ok(())
    }

    #[test]
    fn test_input_not_mutated() {
        let scheduler = Scheduler::default();
        let card = Card::new(now());
        let _ = scheduler.review(card, Rating::Good, now());
        assert_eq!(card, Card::new(now()));
    }
}
