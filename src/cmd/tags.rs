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

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::Fallible;
use crate::wiki::Wiki;

fn write_tags<W: Write>(writer: &mut W, counts: &BTreeMap<String, usize>) -> Fallible<()> {
    if counts.is_empty() {
        writeln!(writer, "No tags found.")?;
        return Ok(());
    }
    writeln!(writer, "Tags:")?;
    for (tag, count) in counts {
        writeln!(writer, "  #{tag} ({count})")?;
    }
    Ok(())
}

pub fn tags_command() -> Fallible<()> {
    let wiki = Wiki::load()?;
    let counts = wiki.db.tag_counts()?;
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    write_tags(&mut lock, &counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::scan::scan_wiki;
    use crate::helper::create_test_wiki;
    use crate::helper::test_time;

    #[test]
    fn test_tags() -> Fallible<()> {
        let (_dir, mut wiki) = create_test_wiki()?;
        scan_wiki(&mut wiki, test_time())?;
        let mut out = Vec::new();
        write_tags(&mut out, &wiki.db.tag_counts()?)?;
        assert_eq!(
            String::from_utf8_lossy(&out),
            "Tags:\n  #devops (2)\n  #docker (1)\n  #k8s (1)\n"
        );
        Ok(())
    }

    #[test]
    fn test_no_tags() -> Fallible<()> {
        let mut out = Vec::new();
        write_tags(&mut out, &BTreeMap::new())?;
        assert_eq!(String::from_utf8_lossy(&out), "No tags found.\n");
        Ok(())
    }
}
