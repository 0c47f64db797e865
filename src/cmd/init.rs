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

use crate::config::Config;
use crate::config::expand_home;
use crate::error::Fallible;
use crate::error::fail;

/// Point the configuration at a wiki. Scheduler overrides already in the
/// file are kept.
pub fn init_wiki(config_path: &Path, wiki_path: &str) -> Fallible<PathBuf> {
    let wiki = expand_home(wiki_path);
    if !wiki.exists() {
        return fail(format!("wiki path does not exist: {}", wiki.display()));
    }
    let mut config = Config::load(config_path)?;
    config.wiki_path = Some(wiki.clone());
    config.save(config_path)?;
    log::debug!("Saved configuration to {}.", config_path.display());
    Ok(wiki)
}

pub fn init_command(wiki_path: String) -> Fallible<()> {
    let wiki = init_wiki(&Config::default_path()?, &wiki_path)?;
    println!("Initialized recall with wiki: {}", wiki.display());
    Ok(())
}
