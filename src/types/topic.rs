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

use crate::types::card::Card;
use crate::types::timestamp::Timestamp;
use crate::types::topic_id::TopicId;

/// A note in the wiki that is tracked for review.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    /// Path to the note, relative to the wiki root.
    pub file: String,
    pub tags: Vec<String>,
    pub card: Card,
    pub created: Timestamp,
}

impl Topic {
    pub fn new(title: String, file: String, tags: Vec<String>, now: Timestamp) -> Self {
        Self {
            id: TopicId::derive(&file, &title),
            title,
            file,
            tags,
            card: Card::new(now),
            created: now,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn tag_list(&self) -> String {
        self.tags.join(", ")
    }
}
