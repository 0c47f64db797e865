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

use std::collections::HashMap;

use serde::Serialize;

use crate::error::Fallible;
use crate::types::rating::Rating;
use crate::types::review::ReviewKind;
use crate::types::timestamp::Timestamp;
use crate::types::topic::Topic;
use crate::types::topic_id::TopicId;
use crate::wiki::Wiki;

pub fn export_command() -> Fallible<()> {
    let wiki = Wiki::load()?;
    let export: Export = get_export(&wiki)?;
    let json: String = serde_json::to_string_pretty(&export)?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export {
    topics: Vec<Topic>,
    reviews: Vec<ReviewExport>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewExport {
    topic_id: TopicId,
    title: Option<String>,
    reviewed_at: Timestamp,
    rating: Rating,
    kind: ReviewKind,
}

fn get_export(wiki: &Wiki) -> Fallible<Export> {
    let topics: Vec<Topic> = wiki.db.all_topics()?;
    let titles: HashMap<TopicId, &str> = topics
        .iter()
        .map(|t| (t.id, t.title.as_str()))
        .collect();
    let reviews: Vec<ReviewExport> = wiki
        .db
        .all_reviews()?
        .into_iter()
        .map(|log| ReviewExport {
            topic_id: log.topic_id,
            title: titles.get(&log.topic_id).map(|t| t.to_string()),
            reviewed_at: log.reviewed_at,
            rating: log.rating,
            kind: log.kind,
        })
        .collect();
    Ok(Export { topics, reviews })
}
