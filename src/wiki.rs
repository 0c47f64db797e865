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

use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::db::Database;
use crate::error::Fallible;
use crate::error::fail;
use crate::fsrs::Parameters;
use crate::scheduler::Scheduler;

/// Everything a command needs: the wiki, its database, and a scheduler.
pub struct Wiki {
    pub directory: PathBuf,
    pub db: Database,
    pub scheduler: Scheduler,
}

impl Wiki {
    /// Open the wiki named in the user's configuration file.
    pub fn load() -> Fallible<Self> {
        let config = Config::load(&Config::default_path()?)?;
        Self::from_config(&config)
    }

    pub fn from_config(config: &Config) -> Fallible<Self> {
        let directory = config.wiki_path()?;
        let params = config.parameters()?;
        Self::open(directory, params)
    }

    pub fn open(directory: PathBuf, params: Parameters) -> Fallible<Self> {
        if !directory.exists() {
            return fail(format!(
                "wiki path does not exist: {}",
                directory.display()
            ));
        }
        let db = {
            log::debug!("Opening database...");
            let start = Instant::now();
            let db = Database::open_wiki(&directory)?;
            let duration = start.elapsed().as_millis();
            log::debug!("Database opened in {duration}ms.");
            db
        };
        let scheduler = Scheduler::new(params);
        log::debug!(
            "Scheduling with retention {} and a maximum interval of {} days.",
            scheduler.params().request_retention,
            scheduler.params().maximum_interval
        );
        Ok(Self {
            directory,
            db,
            scheduler,
        })
    }
}

/// The wiki directory from the user's configuration, without opening the
/// database.
pub fn configured_wiki_path() -> Fallible<PathBuf> {
    let config = Config::load(&Config::default_path()?)?;
    config.wiki_path()
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_open_non_existent_directory() {
        let result = Wiki::open(PathBuf::from("./derpherp"), Parameters::default());
        assert!(result.is_err());
        let err = result.err().map(|e| e.to_string());
        assert_eq!(
            err,
            Some("error: wiki path does not exist: ./derpherp".to_string())
        );
    }

    #[test]
    fn test_from_config_without_wiki_path() {
        let result = Wiki::from_config(&Config::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_from_config() -> Fallible<()> {
        let dir = tempdir()?;
        let config = Config {
            wiki_path: Some(dir.path().to_path_buf()),
            scheduler: None,
        };
        let wiki = Wiki::from_config(&config)?;
        assert_eq!(wiki.directory, dir.path());
        assert!(wiki.db.all_topics()?.is_empty());
        Ok(())
    }
}
