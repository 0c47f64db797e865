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

use crate::cmd::note::locate_note;
use crate::error::Fallible;
use crate::error::fail;
use crate::notes::first_link;
use crate::wiki::configured_wiki_path;

/// The first link in a topic's note.
pub fn topic_link(wiki: &Path, title: &str) -> Fallible<String> {
    let path = locate_note(wiki, title)?;
    let content = std::fs::read_to_string(&path)?;
    match first_link(&content) {
        Some(link) => Ok(link),
        None => fail(format!("no link found in topic: {title}")),
    }
}

pub fn open_command(title: String) -> Fallible<()> {
    let wiki = configured_wiki_path()?;
    let link = topic_link(&wiki, &title)?;
    open::that(&link)?;
    println!("Opening {link}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_test_wiki;

    #[test]
    fn test_topic_link() -> Fallible<()> {
        let (dir, _wiki) = create_test_wiki()?;
        assert_eq!(
            topic_link(dir.path(), "pods")?,
            "https://kubernetes.io/docs/concepts/workloads/pods/"
        );
        let err = topic_link(dir.path(), "docker").err().map(|e| e.to_string());
        assert_eq!(err, Some("error: no link found in topic: docker".to_string()));
        Ok(())
    }
}
