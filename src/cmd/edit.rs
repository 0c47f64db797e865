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

use std::env;
use std::process::Command;

use crate::cmd::note::locate_note;
use crate::error::Fallible;
use crate::error::fail;
use crate::wiki::configured_wiki_path;

const DEFAULT_EDITOR: &str = "nvim";

fn editor_from(value: Option<String>) -> String {
    match value.map(|v| v.trim().to_string()) {
        Some(editor) if !editor.is_empty() => editor,
        _ => DEFAULT_EDITOR.to_string(),
    }
}

pub fn edit_command(title: String) -> Fallible<()> {
    let wiki = configured_wiki_path()?;
    let path = locate_note(&wiki, &title)?;
    let editor = editor_from(env::var("EDITOR").ok());
    log::debug!("Running {editor} on {}.", path.display());
    let status = Command::new(&editor).arg(&path).status()?;
    if !status.success() {
        return fail(format!("{editor} exited with {status}"));
    }
    println!("Editing {}", path.display());
    Ok(())
}
