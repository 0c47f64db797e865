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

//! The memory model: the weight table and the numeric helpers the scheduler
//! is built from.

use std::ops::Index;

use crate::error::Fallible;
use crate::error::fail;

/// Stability: the number of days until recall probability decays to the
/// target retention.
pub type Stability = f64;

/// Difficulty: how hard a topic is to remember, in [1, 10].
pub type Difficulty = f64;

pub const MIN_DIFFICULTY: Difficulty = 1.0;
pub const MAX_DIFFICULTY: Difficulty = 10.0;

pub const WEIGHT_COUNT: usize = 17;

// Indices into the weight vector.
pub const INITIAL_STABILITY_AGAIN: usize = 0;
pub const INITIAL_STABILITY_HARD: usize = 1;
pub const INITIAL_STABILITY_GOOD: usize = 2;
pub const INITIAL_STABILITY_EASY: usize = 3;
pub const DIFFICULTY_BASE: usize = 4;
pub const DIFFICULTY_EXP: usize = 5;
pub const FORGET_SCALE: usize = 6;
pub const FORGET_DIFFICULTY_EXP: usize = 7;
pub const STABILITY_EXP: usize = 8;
pub const STABILITY_DECAY: usize = 9;
pub const RETENTION_SENSITIVITY: usize = 10;
pub const HARD_PENALTY: usize = 12;
pub const EASY_BONUS: usize = 13;

/// The default weights. Indices 11 and 14–16 are carried for shape only.
pub const DEFAULT_WEIGHTS: Weights = Weights([
    0.4072, 1.1829, 3.1262, 15.4722, // initial stability, one per rating
    7.2102, 0.5316, // difficulty
    1.0651, 0.0234, // forgetting
    1.616, 0.1544, 1.0824, // recall
    1.9813, // unused
    0.0953, 0.2975, // hard penalty, easy bonus
    2.2261, 0.2553, 0.6368, // unused
]);

pub const DEFAULT_REQUEST_RETENTION: f64 = 0.9;

pub const DEFAULT_MAXIMUM_INTERVAL: u32 = 365;

/// The largest configurable maximum interval: a hundred years.
pub const MAX_MAXIMUM_INTERVAL: u32 = 36500;

/// The calibrated weight vector.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Weights([f64; WEIGHT_COUNT]);

impl Weights {
    /// Build a weight vector from a slice, which must have exactly
    /// [`WEIGHT_COUNT`] entries, all finite.
    pub fn from_slice(values: &[f64]) -> Fallible<Self> {
        let array: [f64; WEIGHT_COUNT] = match values.try_into() {
            Ok(array) => array,
            Err(_) => {
                return fail(format!(
                    "expected {WEIGHT_COUNT} weights, got {}.",
                    values.len()
                ));
            }
        };
        if array.iter().any(|w| !w.is_finite()) {
            return fail("weights must be finite numbers.");
        }
        Ok(Self(array))
    }
}

impl Index<usize> for Weights {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl Default for Weights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

/// Scheduler configuration. Built once and never mutated.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Parameters {
    /// The recall probability we aim for on the due date.
    pub request_retention: f64,
    /// The longest interval, in days, between two reviews.
    pub maximum_interval: u32,
    pub weights: Weights,
}

impl Parameters {
    pub fn new(request_retention: f64, maximum_interval: u32, weights: Weights) -> Fallible<Self> {
        if !(request_retention > 0.0 && request_retention < 1.0) {
            return fail(format!(
                "request retention must be between 0 and 1 (exclusive), got {request_retention}."
            ));
        }
        if maximum_interval == 0 || maximum_interval > MAX_MAXIMUM_INTERVAL {
            return fail(format!(
                "maximum interval must be between 1 and {MAX_MAXIMUM_INTERVAL} days, got {maximum_interval}."
            ));
        }
        Ok(Self {
            request_retention,
            maximum_interval,
            weights,
        })
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            request_retention: DEFAULT_REQUEST_RETENTION,
            maximum_interval: DEFAULT_MAXIMUM_INTERVAL,
            weights: DEFAULT_WEIGHTS,
        }
    }
}

pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    x.max(lo).min(hi)
}

pub fn clamp_difficulty(d: Difficulty) -> Difficulty {
    clamp(d, MIN_DIFFICULTY, MAX_DIFFICULTY)
}
