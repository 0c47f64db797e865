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

use std::collections::HashSet;
use std::path::Path;

use crate::error::Fallible;
use crate::parser::scan_directory;
use crate::types::timestamp::Timestamp;
use crate::types::topic::Topic;
use crate::wiki::Wiki;

pub struct ScanReport {
    pub scanned: usize,
    pub added: Vec<Topic>,
    pub updated: Vec<Topic>,
    /// Titles of tracked topics that were not found in the wiki.
    pub orphans: Vec<String>,
}

/// Bring the database in line with the wiki: track new topics, and refresh
/// the tags and path of known ones. Topics are matched by title. Orphans are
/// reported, not removed.
pub fn scan_wiki(wiki: &mut Wiki, now: Timestamp) -> Fallible<ScanReport> {
    let parsed = scan_directory(&wiki.directory)?;
    let mut found: HashSet<String> = HashSet::new();
    let mut added = Vec::new();
    let mut updated = Vec::new();
    for topic in parsed.iter() {
        found.insert(topic.title.clone());
        let file = relative_path(&wiki.directory, &topic.file);
        match wiki.db.get_topic_by_title(&topic.title)? {
            None => {
                let new = wiki.db.add_topic(&topic.title, &file, &topic.tags, now)?;
                added.push(new);
            }
            Some(mut existing) => {
                let mut changed = false;
                if existing.tags != topic.tags {
                    wiki.db.set_tags(existing.id, &topic.tags)?;
                    existing.tags = topic.tags.clone();
                    changed = true;
                }
                if existing.file != file {
                    log::debug!("{} moved from {} to {file}.", existing.title, existing.file);
                    wiki.db.set_file(existing.id, &file)?;
                    existing.file = file;
                    changed = true;
                }
                if changed {
                    updated.push(existing);
                }
            }
        }
    }
    let orphans: Vec<String> = wiki
        .db
        .all_topics()?
        .into_iter()
        .filter(|t| !found.contains(&t.title))
        .map(|t| t.title)
        .collect();
    log::debug!(
        "Scanned {} topics: {} added, {} updated, {} orphaned.",
        parsed.len(),
        added.len(),
        updated.len(),
        orphans.len()
    );
    Ok(ScanReport {
        scanned: parsed.len(),
        added,
        updated,
        orphans,
    })
}

fn relative_path(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn scan_command() -> Fallible<()> {
    let mut wiki = Wiki::load()?;
    let report = scan_wiki(&mut wiki, Timestamp::now())?;
    for topic in &report.added {
        println!("  + {} [{}]", topic.title, topic.tag_list());
    }
    for topic in &report.updated {
        println!("  ~ {} [{}]", topic.title, topic.tag_list());
    }
    println!(
        "\nScanned: {} topics | Added: {} | Updated: {}",
        report.scanned,
        report.added.len(),
        report.updated.len()
    );
    if !report.orphans.is_empty() {
        println!("\nOrphaned topics ({}):", report.orphans.len());
        for title in &report.orphans {
            println!("  ? {title}");
        }
        println!("\nUse 'recall remove <title>' to clean up.");
    }
    Ok(())
}
