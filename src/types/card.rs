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

use serde::Serialize;

use crate::fsrs::Difficulty;
use crate::fsrs::Stability;
use crate::types::card_state::CardState;
use crate::types::timestamp::Timestamp;

/// The memory state of one topic.
#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// When the topic is next eligible for review.
    pub due: Timestamp,
    pub stability: Stability,
    pub difficulty: Difficulty,
    /// Completed reviews, including the first read.
    pub reps: u32,
    /// Times the card was rated `Again` after leaving `New`.
    pub lapses: u32,
    pub state: CardState,
    pub last_review: Option<Timestamp>,
}

impl Card {
    /// A fresh card for a newly discovered topic, due immediately.
    pub fn new(now: Timestamp) -> Self {
        Self {
            due: now,
            stability: 0.0,
            difficulty: 0.0,
            reps: 0,
            lapses: 0,
            state: CardState::New,
            last_review: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.state == CardState::New
    }

    pub fn is_due_by(&self, cutoff: Timestamp) -> bool {
        self.due <= cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card() {
        let now = Timestamp::now();
        let card = Card::new(now);
        assert!(card.is_new());
        assert_eq!(card.due, now);
        assert_eq!(card.stability, 0.0);
        assert_eq!(card.difficulty, 0.0);
        assert_eq!(card.reps, 0);
        assert_eq!(card.lapses, 0);
        assert_eq!(card.last_review, None);
        assert!(card.is_due_by(now));
        assert!(card.is_due_by(now.plus_days(1)));
    }
}
