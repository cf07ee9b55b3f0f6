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

//! The voice-command-to-file matching engine.
//!
//! An utterance is normalized, a single leading action verb is stripped, and
//! every file is scored with six additive signals against the remaining
//! target description. Files scoring zero are excluded; the rest come back
//! sorted by score, descending, with ties keeping catalog order.

use std::cmp::Ordering;

use serde_json::Value;
use serde_json::json;

use crate::lexicon::Language;
use crate::lexicon::Lexicon;
use crate::model::FileRecord;
use crate::model::FileType;
use crate::model::MatchCandidate;
use crate::model::MatchReason;
use crate::model::SignalBreakdown;
use crate::similarity::similarity;

const NAME_EXACT_BONUS: f64 = 100.0;
const KEYWORD_EXACT_BONUS: f64 = 90.0;
const NAME_WORD_BONUS: f64 = 30.0;
const KEYWORD_WORD_BONUS: f64 = 25.0;
const TYPE_WORD_BONUS: f64 = 20.0;
const FUZZY_THRESHOLD: f64 = 0.6;
const NAME_FUZZY_WEIGHT: f64 = 15.0;
const KEYWORD_FUZZY_WEIGHT: f64 = 10.0;

/// Rank `files` against `utterance`. Total over every input: a blank
/// utterance or an empty catalog yields an empty result, never an error.
pub fn find_matching_files(
    files: &[FileRecord],
    utterance: &str,
    language: Language,
) -> Vec<MatchCandidate> {
    let normalized = utterance.trim().to_lowercase();
    if normalized.is_empty() || files.is_empty() {
        return Vec::new();
    }
    let target = strip_action_word(&normalized, language);
    let lexicon = Lexicon::for_language(language);

    let mut matches = Vec::new();
    for file in files {
        let signals = score_file(file, &target, lexicon);
        let score = signals.total();
        if score > 0.0 {
            matches.push(MatchCandidate {
                file: file.clone(),
                score,
                reason: MatchReason::from_score(score),
                signals,
            });
        }
    }

    // sort_by is stable, so tied scores keep catalog order.
    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    matches
}

/// The utterance with one leading action verb removed, lowercased and
/// trimmed. Exposed for `--explain` output.
pub fn target_description(utterance: &str, language: Language) -> String {
    strip_action_word(&utterance.trim().to_lowercase(), language)
}

fn strip_action_word(normalized: &str, language: Language) -> String {
    for &action in Lexicon::for_language(language).action_words() {
        if let Some(rest) = normalized.strip_prefix(action)
            && rest.starts_with(char::is_whitespace)
        {
            return rest.trim_start().to_string();
        }
    }
    normalized.to_string()
}

/// Score one file against a target description.
///
/// An empty target is not special-cased: the substring signals fire for every
/// file, since every string contains the empty string. Callers that want the
/// documented blank-utterance behavior guard before stripping, as
/// [`find_matching_files`] does.
pub fn score_file(file: &FileRecord, target: &str, lexicon: &Lexicon) -> SignalBreakdown {
    let name = file.name.to_lowercase();
    let keywords = file.keywords.to_lowercase();
    let mut signals = SignalBreakdown::default();

    if name.contains(target) {
        signals.name_exact = NAME_EXACT_BONUS;
    }
    if keywords.contains(target) {
        signals.keyword_exact = KEYWORD_EXACT_BONUS;
    }

    for word in target.split_whitespace() {
        if word.chars().count() <= 1 {
            continue;
        }
        if name.contains(word) {
            signals.name_words += NAME_WORD_BONUS;
        }
        if keywords.contains(word) {
            signals.keyword_words += KEYWORD_WORD_BONUS;
        }
    }

    let kind = FileType::from_mime(&file.mime_type);
    for type_word in lexicon.type_words(kind) {
        if target.contains(type_word) {
            signals.type_words += TYPE_WORD_BONUS;
        }
    }

    let name_similarity = similarity(target, &name);
    if name_similarity > FUZZY_THRESHOLD {
        signals.name_fuzzy = name_similarity * NAME_FUZZY_WEIGHT;
    }
    let keyword_similarity = similarity(target, &keywords);
    if keyword_similarity > FUZZY_THRESHOLD {
        signals.keyword_fuzzy = keyword_similarity * KEYWORD_FUZZY_WEIGHT;
    }

    signals
}

impl MatchCandidate {
    pub fn to_json(&self, explain: bool) -> Value {
        let mut obj = serde_json::Map::new();
        obj.insert("score".into(), json!(self.score));
        obj.insert("reason".into(), json!(self.reason.as_label()));
        if explain {
            obj.insert("signals".into(), self.signals.to_json());
        }
        obj.insert(
            "file".into(),
            serde_json::to_value(&self.file).unwrap_or(Value::Null),
        );
        Value::Object(obj)
    }
}

impl SignalBreakdown {
    fn to_json(&self) -> Value {
        let mut obj = serde_json::Map::new();
        let entries = [
            ("name_exact", self.name_exact),
            ("keyword_exact", self.keyword_exact),
            ("name_words", self.name_words),
            ("keyword_words", self.keyword_words),
            ("type_words", self.type_words),
            ("name_fuzzy", self.name_fuzzy),
            ("keyword_fuzzy", self.keyword_fuzzy),
        ];
        for (key, value) in entries {
            if value > 0.0 {
                obj.insert(key.into(), json!(value));
            }
        }
        Value::Object(obj)
    }
}
