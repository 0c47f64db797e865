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

use clap::Parser;

use crate::cmd::due::due_command;
use crate::cmd::edit::edit_command;
use crate::cmd::export::export_command;
use crate::cmd::history::history_command;
use crate::cmd::init::init_command;
use crate::cmd::note::note_command;
use crate::cmd::open::open_command;
use crate::cmd::read::read_command;
use crate::cmd::remove::remove_command;
use crate::cmd::review::review_command;
use crate::cmd::scan::scan_command;
use crate::cmd::status::status_command;
use crate::cmd::tags::tags_command;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Point recall at your wiki.
    Init {
        /// Path to the wiki directory. A leading `~` is expanded.
        wiki_path: String,
    },
    /// Find reviewable topics in the wiki.
    Scan,
    /// Record the first read of a topic.
    Read {
        title: String,
        /// Understanding, from 1 (didn't understand) to 4 (mastered).
        #[arg(long)]
        rating: Option<u8>,
    },
    /// Review a topic you have already read.
    Review {
        title: String,
        /// Rating, from 1 (Again) to 4 (Easy).
        #[arg(long)]
        rating: Option<u8>,
    },
    /// List topics that are due.
    Due {
        /// Include topics due in the next seven days.
        #[arg(long)]
        week: bool,
        /// Only show topics with this tag.
        #[arg(long)]
        tag: Option<String>,
    },
    /// Show an overview of the review schedule.
    Status,
    /// Show reading and review history.
    History {
        /// Show the full history of this topic.
        title: Option<String>,
    },
    /// List tags with topic counts.
    Tags,
    /// Stop tracking a topic.
    Remove { title: String },
    /// Print the notes for a topic.
    Note { title: String },
    /// Open a topic in $EDITOR.
    Edit { title: String },
    /// Open the first link in a topic.
    Open { title: String },
    /// Export topics and review history as JSON.
    Export,
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Init { wiki_path } => init_command(wiki_path),
        Command::Scan => scan_command(),
        Command::Read { title, rating } => read_command(title, rating),
        Command::Review { title, rating } => review_command(title, rating),
        Command::Due { week, tag } => due_command(week, tag),
        Command::Status => status_command(),
        Command::History { title } => history_command(title),
        Command::Tags => tags_command(),
        Command::Remove { title } => remove_command(title),
        Command::Note { title } => note_command(title),
        Command::Edit { title } => edit_command(title),
        Command::Open { title } => open_command(title),
        Command::Export => export_command(),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_definition() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_parse_review() {
        let cli =
            Command::try_parse_from(["recall", "review", "Docker Networking", "--rating", "3"]);
        match cli {
            Ok(Command::Review { title, rating }) => {
                assert_eq!(title, "Docker Networking");
                assert_eq!(rating, Some(3));
            }
            _ => panic!("expected a review command"),
        }
    }

    #[test]
    fn test_parse_due() {
        let cli = Command::try_parse_from(["recall", "due", "--week", "--tag", "k8s"]);
        match cli {
            Ok(Command::Due { week, tag }) => {
                assert!(week);
                assert_eq!(tag.as_deref(), Some("k8s"));
            }
            _ => panic!("expected a due command"),
        }
    }
}
