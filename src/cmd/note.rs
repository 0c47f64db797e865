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

use std::path::Path;
use std::path::PathBuf;

use crate::error::Fallible;
use crate::error::fail;
use crate::notes::find_topic_file;
use crate::notes::read_notes;
use crate::wiki::configured_wiki_path;

/// The note file for a title, or an error if there is none.
pub fn locate_note(wiki: &Path, title: &str) -> Fallible<PathBuf> {
    match find_topic_file(wiki, title)? {
        Some(path) => Ok(path),
        None => fail(format!("topic not found: {title}")),
    }
}

pub fn note_text(wiki: &Path, title: &str) -> Fallible<String> {
    let path = locate_note(wiki, title)?;
    let notes = read_notes(&path)?;
    if notes.is_empty() {
        return fail(format!("no notes found in topic: {title}"));
    }
    Ok(notes)
}

pub fn note_command(title: String) -> Fallible<()> {
    let wiki = configured_wiki_path()?;
    let notes = note_text(&wiki, &title)?;
    println!("Notes: {title}\n\n{notes}");
    Ok(())
}
