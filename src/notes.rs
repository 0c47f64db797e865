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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use pulldown_cmark::Event;
use pulldown_cmark::Parser;
use pulldown_cmark::Tag;

use crate::error::Fallible;
use crate::error::fail;
use crate::parser::is_note;
use crate::parser::split_frontmatter;
use crate::parser::title_from_filename;
use crate::parser::walk_notes;

/// The body of a note, without its frontmatter.
pub fn note_body(content: &str) -> String {
    match split_frontmatter(content) {
        Some((_, body)) => body.trim().to_string(),
        None => content.trim().to_string(),
    }
}

pub fn read_notes(path: &Path) -> Fallible<String> {
    let content = read_to_string(path)?;
    Ok(note_body(&content))
}

/// The destination of the first link in a markdown document.
pub fn first_link(markdown: &str) -> Option<String> {
    Parser::new(markdown).find_map(|event| match event {
        Event::Start(Tag::Link { dest_url, .. }) => {
            let url = dest_url.trim();
            if url.is_empty() {
                None
            } else {
                Some(url.to_string())
            }
        }
        _ => None,
    })
}

/// Find the note whose file name matches a title, ignoring case. Returns
/// `None` if there is no match, and an error if several notes match.
pub fn find_topic_file(wiki: &Path, title: &str) -> Fallible<Option<PathBuf>> {
    let wanted = title.trim().to_lowercase();
    let mut matches: Vec<PathBuf> = Vec::new();
    for entry in walk_notes(wiki) {
        let entry = entry?;
        if is_note(&entry) && title_from_filename(entry.path()).to_lowercase() == wanted {
            matches.push(entry.path().to_path_buf());
        }
    }
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        _ => fail(format!("multiple files matched title: {}", title.trim())),
    }
}
