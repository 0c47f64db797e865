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
use crate::cmd::review::apply_rating;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::rating::Rating;
use crate::types::review::ReviewKind;
use crate::types::timestamp::Timestamp;
use crate::types::topic::Topic;
use crate::wiki::Wiki;

const CHOICES: [&str; 4] = [
    "Didn't understand",
    "Partially understood",
    "Understood well",
    "Mastered",
];

/// Record the first read of a topic. The understanding rating goes through
/// the scheduler like any other rating on a new card.
pub fn read_topic(
    wiki: &mut Wiki,
    title: &str,
    rating: Rating,
    now: Timestamp,
) -> Fallible<Topic> {
    let topic = wiki.db.require_topic(title)?;
    if !topic.card.is_new() {
        return fail("topic already read, use 'recall review' instead");
    }
    apply_rating(wiki, topic, rating, ReviewKind::FirstRead, now)
}

pub fn read_command(title: String, rating: Option<u8>) -> Fallible<()> {
    let mut wiki = Wiki::load()?;
    let topic = wiki.db.require_topic(&title)?;
    if !topic.card.is_new() {
        return fail("topic already read, use 'recall review' instead");
    }
    let question = format!("How well did you understand \"{title}\"?");
    let rating = rating_or_prompt(rating, &question, &CHOICES)?;
    let now = Timestamp::now();
    let topic = read_topic(&mut wiki, &title, rating, now)?;
    println!(
        "\nRead: {} ({}). First review: {} ({} days)",
        topic.title,
        rating.understanding(),
        topic.card.due.display_date(),
        now.days_until(topic.card.due)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::scan::scan_wiki;
    use crate::helper::create_test_wiki;
    use crate::helper::test_time;
    use crate::types::card_state::CardState;

    #[test]
    fn test_read_good() -> Fallible<()> {
        let (_dir, mut wiki) = create_test_wiki()?;
        scan_wiki(&mut wiki, test_time())?;
        let now = test_time();
        let topic = read_topic(&mut wiki, "Docker Networking", Rating::Good, now)?;
        assert_eq!(topic.card.state, CardState::Review);
        assert_eq!(topic.card.reps, 1);
        assert_eq!(topic.card.lapses, 0);
        assert_eq!(topic.card.due, now.plus_days(3));
        assert_eq!(topic.card.last_review, Some(now));

        let history = wiki.db.review_history(topic.id)?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, ReviewKind::FirstRead);
        assert_eq!(history[0].rating, Rating::Good);
        Ok(())
    }

    #[test]
    fn test_read_again_stays_in_learning() -> Fallible<()> {
        let (_dir, mut wiki) = create_test_wiki()?;
        scan_wiki(&mut wiki, test_time())?;
        let now = test_time();
        let topic = read_topic(&mut wiki, "pods", Rating::Again, now)?;
        assert_eq!(topic.card.state, CardState::Learning);
        assert_eq!(topic.card.due, now.plus_days(1));
        Ok(())
    }

    #[test]
    fn test_read_twice_fails() -> Fallible<()> {
        let (_dir, mut wiki) = create_test_wiki()?;
        scan_wiki(&mut wiki, test_time())?;
        read_topic(&mut wiki, "pods", Rating::Good, test_time())?;
        let result = read_topic(&mut wiki, "pods", Rating::Good, test_time());
        let err = result.err().map(|e| e.to_string());
        assert_eq!(
            err,
            Some("error: topic already read, use 'recall review' instead".to_string())
        );
        assert_eq!(wiki.db.all_reviews()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_read_unknown_topic() -> Fallible<()> {
        let (_dir, mut wiki) = create_test_wiki()?;
        let result = read_topic(&mut wiki, "Nonexistent", Rating::Good, test_time());
        let err = result.err().map(|e| e.to_string());
        assert_eq!(err, Some("error: topic not found: Nonexistent".to_string()));
        Ok(())
    }
}
