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

use crate::cmd::today_cutoff;
use crate::cmd::week_cutoff;
use crate::error::Fallible;
use crate::output::Table;
use crate::types::timestamp::Timestamp;
use crate::types::topic::Topic;
use crate::wiki::Wiki;

pub struct DueSummary {
    pub total: usize,
    pub due_today: usize,
    pub due_this_week: usize,
}

pub fn due_summary(topics: &[Topic], now: Timestamp) -> DueSummary {
    let today = today_cutoff(now);
    let week = week_cutoff(now);
    DueSummary {
        total: topics.len(),
        due_today: topics.iter().filter(|t| t.card.is_due_by(today)).count(),
        due_this_week: topics.iter().filter(|t| t.card.is_due_by(week)).count(),
    }
}

/// Topics due by the end of today, or of the coming week, optionally
/// restricted to a tag. Most overdue first.
pub fn due_list(
    wiki: &Wiki,
    week: bool,
    tag: Option<&str>,
    now: Timestamp,
) -> Fallible<Vec<Topic>> {
    let cutoff = if week {
        week_cutoff(now)
    } else {
        today_cutoff(now)
    };
    let mut topics: Vec<Topic> = wiki
        .db
        .due_topics(cutoff)?
        .into_iter()
        .filter(|t| tag.is_none_or(|tag| t.has_tag(tag)))
        .collect();
    topics.sort_by_key(|t| t.card.due);
    Ok(topics)
}

/// How far away a due date is, in words.
pub fn due_label(now: Timestamp, due: Timestamp) -> String {
    let days = now.days_until(due);
    match days {
        0 => "today".to_string(),
        1 => "in 1 day".to_string(),
        -1 => "1 day overdue".to_string(),
        d if d > 0 => format!("in {d} days"),
        d => format!("{} days overdue", -d),
    }
}

pub fn action_label(topic: &Topic) -> &'static str {
    if topic.card.is_new() { "read" } else { "review" }
}

pub fn due_command(week: bool, tag: Option<String>) -> Fallible<()> {
    let wiki = Wiki::load()?;
    let now = Timestamp::now();
    let summary = due_summary(&wiki.db.all_topics()?, now);
    println!(
        "Topics: {} | Due today: {} | Due this week: {}\n",
        summary.total, summary.due_today, summary.due_this_week
    );
    let topics = due_list(&wiki, week, tag.as_deref(), now)?;
    if topics.is_empty() {
        println!("Nothing due.");
        return Ok(());
    }
    let mut table = Table::new(&["Title", "Due", "Action"]);
    for topic in &topics {
        table.add_row(vec![
            topic.title.clone(),
            due_label(now, topic.card.due),
            action_label(topic).to_string(),
        ]);
    }
    table.print()?;
    Ok(())
}
