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

use std::io::Write;

use crate::cmd::due::due_summary;
use crate::cmd::today_cutoff;
use crate::error::Fallible;
use crate::types::timestamp::Timestamp;
use crate::types::topic::Topic;
use crate::wiki::Wiki;

fn write_status<W: Write>(writer: &mut W, topics: &[Topic], now: Timestamp) -> Fallible<()> {
    let summary = due_summary(topics, now);
    writeln!(writer, "Recall Status")?;
    writeln!(writer, "{}", "-".repeat(40))?;
    writeln!(writer, "Total topics:    {}", summary.total)?;
    writeln!(writer, "Due today:       {}", summary.due_today)?;
    writeln!(writer, "Due this week:   {}", summary.due_this_week)?;
    let today = today_cutoff(now);
    let due: Vec<&Topic> = topics.iter().filter(|t| t.card.is_due_by(today)).collect();
    if !due.is_empty() {
        writeln!(writer, "\nDue Today:")?;
        for topic in due {
            writeln!(writer, "  - {} [{}]", topic.title, topic.tag_list())?;
        }
    }
    Ok(())
}

pub fn status_command() -> Fallible<()> {
    let wiki = Wiki::load()?;
    let topics = wiki.db.all_topics()?;
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    write_status(&mut lock, &topics, Timestamp::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::read::read_topic;
    use crate::cmd::scan::scan_wiki;
    use crate::helper::create_test_wiki;
    use crate::helper::test_time;
    use crate::types::rating::Rating;

    #[test]
    fn test_status() -> Fallible<()> {
        let (_dir, mut wiki) = create_test_wiki()?;
        let now = test_time();
        scan_wiki(&mut wiki, now)?;
        read_topic(&mut wiki, "Docker Networking", Rating::Good, now)?;
        let topics = wiki.db.all_topics()?;
        let mut out = Vec::new();
        write_status(&mut out, &topics, now)?;
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Total topics:    2\n"));
        assert!(text.contains("Due today:       1\n"));
        assert!(text.contains("Due this week:   2\n"));
        assert!(text.ends_with("\nDue Today:\n  - pods [k8s, devops]\n"));
        Ok(())
    }

    #[test]
    fn test_status_of_empty_wiki() -> Fallible<()> {
        let mut out = Vec::new();
        write_status(&mut out, &[], test_time())?;
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Total topics:    0\n"));
        assert!(!text.contains("Due Today:"));
        Ok(())
    }
}
