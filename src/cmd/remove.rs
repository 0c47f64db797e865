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
use crate::types::topic::Topic;
use crate::wiki::Wiki;

/// Stop tracking a topic. The note itself is left alone.
pub fn remove_topic(wiki: &mut Wiki, title: &str) -> Fallible<Topic> {
    let topic = wiki.db.require_topic(title)?;
    wiki.db.remove_topic(topic.id)?;
    log::debug!("Removed topic {} ({title}).", topic.id);
    Ok(topic)
}

pub fn remove_command(title: String) -> Fallible<()> {
    let mut wiki = Wiki::load()?;
    let topic = remove_topic(&mut wiki, &title)?;
    println!("Removed: {}", topic.title);
    Ok(())
}
