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

use crate::cmd::rating_or_prompt;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::rating::Rating;
use crate::types::review::ReviewKind;
use crate::types::review::ReviewLog;
use crate::types::timestamp::Timestamp;
use crate::types::topic::Topic;
use crate::wiki::Wiki;

const CHOICES: [&str; 4] = [
    "Again (forgot)",
    "Hard (struggled)",
    "Good (recalled)",
    "Easy (effortless)",
];

pub fn review_topic(
    wiki: &mut Wiki,
    title: &str,
    rating: Rating,
    now: Timestamp,
) -> Fallible<Topic> {
    let topic = wiki.db.require_topic(title)?;
    if topic.card.is_new() {
        return fail(format!(
            "topic not yet read, use 'recall read \"{title}\"' first"
        ));
    }
    apply_rating(wiki, topic, rating, ReviewKind::Review, now)
}

/// Run the scheduler on the topic's card and persist the result together
/// with a log entry.
pub fn apply_rating(
    wiki: &mut Wiki,
    mut topic: Topic,
    rating: Rating,
    kind: ReviewKind,
    now: Timestamp,
) -> Fallible<Topic> {
    let card = wiki.scheduler.review(topic.card, rating, now);
    log::debug!(
        "{} rated {}: S={:.4} D={:.4} state={} due={}",
        topic.title,
        rating.as_str(),
        card.stability,
        card.difficulty,
        card.state.as_str(),
        card.due.into_inner().to_rfc3339()
    );
    let entry = ReviewLog {
        topic_id: topic.id,
        reviewed_at: now,
        rating,
        kind,
    };
    wiki.db.record_review(&card, &entry)?;
    topic.card = card;
    Ok(topic)
}

pub fn review_command(title: String, rating: Option<u8>) -> Fallible<()> {
    let mut wiki = Wiki::load()?;
    // Fail on unknown or unread topics before prompting.
    let topic = wiki.db.require_topic(&title)?;
    if topic.card.is_new() {
        return fail(format!(
            "topic not yet read, use 'recall read \"{title}\"' first"
        ));
    }
    let question = format!("How well do you remember \"{title}\"?");
    let rating = rating_or_prompt(rating, &question, &CHOICES)?;
    let now = Timestamp::now();
    let topic = review_topic(&mut wiki, &title, rating, now)?;
    println!(
        "\nReviewed: {} ({}). Next review: {} ({} days)",
        topic.title,
        rating.as_str(),
        topic.card.due.display_date(),
        now.days_until(topic.card.due)
    );
    Ok(())
}
