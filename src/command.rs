// Copyright 2026 Beckon Authors
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

//! Command processor: wraps the matcher and formats a localized message.

use crate::lexicon::Language;
use crate::matcher::find_matching_files;
use crate::model::CommandResult;
use crate::model::FileRecord;

/// Process one utterance against the catalog. Pure: no I/O, no mutation.
/// "No match" is a normal `success = false` result, never an error.
pub fn process_command(
    utterance: &str,
    files: &[FileRecord],
    language: Language,
) -> CommandResult {
    let matches = find_matching_files(files, utterance, language);
    if matches.is_empty() {
        return CommandResult {
            success: false,
            message: no_match_message(language, utterance),
            matches,
            selected: None,
        };
    }

    let selected = matches[0].clone();
    let message = opened_message(language, &selected.file.name);
    CommandResult {
        success: true,
        message,
        matches,
        selected: Some(selected),
    }
}

// Failure keeps the raw utterance so the user sees what was heard.
fn no_match_message(language: Language, utterance: &str) -> String {
    match language {
        Language::Zh => format!("未找到匹配的文件：\"{utterance}\""),
        Language::En => format!("No matching file found: \"{utterance}\""),
    }
}

fn opened_message(language: Language, name: &str) -> String {
    match language {
        Language::Zh => format!("已打开文件：{name}"),
        Language::En => format!("Opened file: {name}"),
    }
}
