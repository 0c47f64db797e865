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

use crate::error::Fallible;
use crate::output::Table;
use crate::wiki::Wiki;

/// One row per tracked topic: title, tags, and the date it was first read.
fn overview_table(wiki: &Wiki) -> Fallible<Option<Table>> {
    let topics = wiki.db.all_topics()?;
    if topics.is_empty() {
        return Ok(None);
    }
    let mut table = Table::new(&["Topic", "Tags", "Read Date"]);
    for topic in topics {
        let read_date = if topic.card.is_new() {
            "-".to_string()
        } else {
            wiki.db
                .review_history(topic.id)?
                .first()
                .map(|log| log.reviewed_at.display_date())
                .unwrap_or_else(|| "-".to_string())
        };
        table.add_row(vec![topic.title.clone(), topic.tag_list(), read_date]);
    }
    Ok(Some(table))
}

/// Every log entry for one topic, oldest first.
fn topic_table(wiki: &Wiki, title: &str) -> Fallible<Option<Table>> {
    let topic = wiki.db.require_topic(title)?;
    let history = wiki.db.review_history(topic.id)?;
    if history.is_empty() {
        return Ok(None);
    }
    let mut table = Table::new(&["Date", "Type", "Rating"]);
    for log in history {
        table.add_row(vec![
            log.reviewed_at.display_date(),
            log.kind.label().to_string(),
            log.rating_label().to_string(),
        ]);
    }
    Ok(Some(table))
}

pub fn history_command(title: Option<String>) -> Fallible<()> {
    let wiki = Wiki::load()?;
    match title {
        None => match overview_table(&wiki)? {
            Some(table) => table.print()?,
            None => println!("No topics tracked yet."),
        },
        Some(title) => match topic_table(&wiki, &title)? {
            Some(table) => {
                println!("History for: {title}\n");
                table.print()?;
            }
            None => println!("No history for: {title}"),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::read::read_topic;
    use crate::cmd::review::review_topic;
    use crate::cmd::scan::scan_wiki;
    use crate::helper::create_test_wiki;
    use crate::helper::test_time;
    use crate::types::rating::Rating;

    fn render(table: &Table) -> Fallible<String> {
        let mut out = Vec::new();
        table.render(&mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn test_overview() -> Fallible<()> {
        let (_dir, mut wiki) = create_test_wiki()?;
        assert!(overview_table(&wiki)?.is_none());

        let now = test_time();
        scan_wiki(&mut wiki, now)?;
        read_topic(&mut wiki, "pods", Rating::Good, now)?;
        let table = overview_table(&wiki)?;
        let text = match table {
            Some(table) => render(&table)?,
            None => panic!("expected a table"),
        };
        assert!(text.contains("| TOPIC "));
        let pods_row = format!("| pods              | k8s, devops    | {}", now.display_date());
        assert!(text.contains(&pods_row));
        assert!(text.contains("| Docker Networking | devops, docker | -"));
        Ok(())
    }

    #[test]
    fn test_topic_history() -> Fallible<()> {
        let (_dir, mut wiki) = create_test_wiki()?;
        let now = test_time();
        scan_wiki(&mut wiki, now)?;
        assert!(topic_table(&wiki, "pods")?.is_none());

        read_topic(&mut wiki, "pods", Rating::Hard, now)?;
        review_topic(&mut wiki, "pods", Rating::Easy, now.plus_days(1))?;
        let text = match topic_table(&wiki, "pods")? {
            Some(table) => render(&table)?,
            None => panic!("expected a table"),
        };
        assert!(text.contains("| First read | partially understood |"));
        assert!(text.contains("| Review     | Easy                 |"));
        Ok(())
    }

    #[test]
    fn test_history_of_unknown_topic() -> Fallible<()> {
        let (_dir, wiki) = create_test_wiki()?;
        assert!(topic_table(&wiki, "nope").is_err());
        Ok(())
    }
}
