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

use std::fs::create_dir_all;
use std::fs::write;

use chrono::TimeZone;
use chrono::Utc;
use tempfile::TempDir;
use tempfile::tempdir;

use crate::error::Fallible;
use crate::fsrs::Parameters;
use crate::types::timestamp::Timestamp;
use crate::wiki::Wiki;

/// A fixed point in time for tests.
pub fn test_time() -> Timestamp {
    Timestamp::new(Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap())
}

/// Create a temporary wiki with a few notes:
///
/// - `docker.md`: reviewable, id "Docker Networking", tags devops and docker.
/// - `k8s/pods.md`: reviewable, tags k8s and devops, with a link.
/// - `journal.md`: not reviewable.
/// - `.archive/old.md`: reviewable, but in a hidden directory.
pub fn create_test_wiki() -> Fallible<(TempDir, Wiki)> {
    let dir = tempdir()?;
    let root = dir.path();
    create_dir_all(root.join("k8s"))?;
    create_dir_all(root.join(".archive"))?;
    write(
        root.join("docker.md"),
        "---\nid: Docker Networking\ntags: [devops, docker]\nreview: true\n---\n# Docker Networking\n\nBridge networks.\n",
    )?;
    write(
        root.join("k8s").join("pods.md"),
        "---\ntags: [k8s, devops]\nreview: true\n---\n# Pods\n\nRead [the pod docs](https://kubernetes.io/docs/concepts/workloads/pods/).\n",
    )?;
    write(root.join("journal.md"), "# Journal\n\nNothing to review.\n")?;
    write(
        root.join(".archive").join("old.md"),
        "---\nreview: true\n---\n",
    )?;
    let wiki = Wiki::open(root.to_path_buf(), Parameters::default())?;
    Ok((dir, wiki))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_wiki() -> Fallible<()> {
        let (dir, wiki) = create_test_wiki()?;
        assert_eq!(wiki.directory, dir.path());
        assert!(dir.path().join("k8s").join("pods.md").exists());
        Ok(())
    }
}
