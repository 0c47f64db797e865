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

use std::fs::read;
use std::path::Path;
use std::path::PathBuf;

use pulldown_cmark::Event;
use pulldown_cmark::Parser;
use pulldown_cmark::Tag;
use pulldown_cmark::TagEnd;
use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;
use walkdir::DirEntry;
use walkdir::WalkDir;

use crate::error::ErrorReport;
use crate::error::Fallible;

const FRONTMATTER_DELIMITER: &str = "---";

/// A note that asked to be reviewed.
#[derive(Debug, PartialEq)]
pub struct ParsedTopic {
    pub title: String,
    /// The absolute path to the note.
    pub file: PathBuf,
    pub tags: Vec<String>,
}

#[derive(Deserialize, Default)]
struct Frontmatter {
    id: Option<String>,
    tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "yaml_bool")]
    review: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

/// A boolean that also accepts the YAML 1.1 spellings `yes`, `no`, `on`
/// and `off`.
fn yaml_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let flag: Option<Flag> = Option::deserialize(deserializer)?;
    let value = match flag {
        None => None,
        Some(Flag::Bool(b)) => Some(b),
        Some(Flag::Text(text)) => match text.trim().to_lowercase().as_str() {
            "yes" | "on" | "true" => Some(true),
            "no" | "off" | "false" => Some(false),
            _ => return Err(D::Error::custom(format!("expected a boolean, got {text:?}"))),
        },
    };
    Ok(value)
}

/// Split a note into its YAML frontmatter and body. Returns `None` if the
/// note does not start with a frontmatter block.
pub fn split_frontmatter(content: &str) -> Option<(String, String)> {
    let mut lines = content.lines();
    if lines.next() != Some(FRONTMATTER_DELIMITER) {
        return None;
    }
    let mut yaml = String::new();
    for line in lines.by_ref() {
        if line == FRONTMATTER_DELIMITER {
            break;
        }
        yaml.push_str(line);
        yaml.push('\n');
    }
    let body: Vec<&str> = lines.collect();
    Some((yaml, body.join("\n")))
}

/// Parse a note. Returns `None` unless it has frontmatter with
/// `review: true`.
pub fn parse_topic(path: &Path, content: &str) -> Fallible<Option<ParsedTopic>> {
    let Some((yaml, body)) = split_frontmatter(content) else {
        return Ok(None);
    };
    let frontmatter: Frontmatter = if yaml.trim().is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(&yaml).map_err(|e| {
            ErrorReport::new(format!("invalid frontmatter in {}: {e}", path.display()))
        })?
    };
    if frontmatter.review != Some(true) {
        return Ok(None);
    }
    let title = match frontmatter.id.filter(|id| !id.trim().is_empty()) {
        Some(id) => id,
        None => {
            let stem = title_from_filename(path);
            if stem.is_empty() {
                first_heading(&body).unwrap_or_default()
            } else {
                stem
            }
        }
    };
    Ok(Some(ParsedTopic {
        title,
        file: path.to_path_buf(),
        tags: frontmatter.tags.unwrap_or_default(),
    }))
}

/// Notes that are not valid UTF-8 are read lossily.
pub fn scan_file(path: &Path) -> Fallible<Option<ParsedTopic>> {
    let bytes = read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    parse_topic(path, &content)
}

/// Find every reviewable note under `directory`, skipping hidden
/// directories.
pub fn scan_directory(directory: &Path) -> Fallible<Vec<ParsedTopic>> {
    let mut topics = Vec::new();
    for entry in walk_notes(directory) {
        let entry = entry?;
        let path = entry.path();
        if is_note(&entry) {
            if let Some(topic) = scan_file(path)? {
                log::debug!("Found topic {:?} in {}.", topic.title, path.display());
                topics.push(topic);
            }
        }
    }
    Ok(topics)
}

/// Walk a wiki in file name order, not descending into hidden directories.
pub fn walk_notes(directory: &Path) -> impl Iterator<Item = walkdir::Result<DirEntry>> {
    WalkDir::new(directory)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(e.depth() > 0 && e.file_type().is_dir() && is_hidden(e)))
}

pub fn is_note(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(".md")
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// The file name without its `.md` extension.
pub fn title_from_filename(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    match name.strip_suffix(".md") {
        Some(stem) => stem.to_string(),
        None => name,
    }
}

fn first_heading(markdown: &str) -> Option<String> {
    let mut in_heading = false;
    let mut text = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { .. }) => in_heading = true,
            Event::End(TagEnd::Heading(_)) => {
                let title = text.trim().to_string();
                if !title.is_empty() {
                    return Some(title);
                }
                in_heading = false;
                text.clear();
            }
            Event::Text(t) | Event::Code(t) if in_heading => text.push_str(&t),
            _ => {}
        }
    }
    None
}
