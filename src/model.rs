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

//! Shared domain types used across the manifest, matcher, and command layers.

use serde::Deserialize;
use serde::Serialize;

/// One cataloged file available for voice selection. Immutable except for
/// `keywords`, which the `label` command may rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    #[serde(default)]
    pub keywords: String,
    pub upload_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Image,
    Pdf,
    Presentation,
    Other,
}

impl FileType {
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            FileType::Image
        } else if mime.contains("pdf") {
            FileType::Pdf
        } else if mime.contains("presentation") || mime.contains("powerpoint") {
            FileType::Presentation
        } else {
            FileType::Other
        }
    }

    pub fn as_label(self) -> &'static str {
        match self {
            FileType::Image => "image",
            FileType::Pdf => "pdf",
            FileType::Presentation => "presentation",
            FileType::Other => "other",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            FileType::Image => "🖼️",
            FileType::Pdf => "📄",
            FileType::Presentation => "📊",
            FileType::Other => "📁",
        }
    }
}

/// Coarse classification of match strength, thresholded from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchReason {
    Exact,
    High,
    Medium,
    Low,
}

impl MatchReason {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            MatchReason::Exact
        } else if score >= 50.0 {
            MatchReason::High
        } else if score >= 20.0 {
            MatchReason::Medium
        } else {
            MatchReason::Low
        }
    }

    pub fn as_label(self) -> &'static str {
        match self {
            MatchReason::Exact => "exact",
            MatchReason::High => "high",
            MatchReason::Medium => "medium",
            MatchReason::Low => "low",
        }
    }
}

/// Per-signal score contributions, kept for `--explain` output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalBreakdown {
    pub name_exact: f64,
    pub keyword_exact: f64,
    pub name_words: f64,
    pub keyword_words: f64,
    pub type_words: f64,
    pub name_fuzzy: f64,
    pub keyword_fuzzy: f64,
}

impl SignalBreakdown {
    pub fn total(&self) -> f64 {
        self.name_exact
            + self.keyword_exact
            + self.name_words
            + self.keyword_words
            + self.type_words
            + self.name_fuzzy
            + self.keyword_fuzzy
    }
}

/// A file record annotated with transient match metadata. Valid only for the
/// lifetime of one query; never written back to the manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    pub file: FileRecord,
    pub score: f64,
    pub reason: MatchReason,
    pub signals: SignalBreakdown,
}

/// Outcome of processing one utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandResult {
    pub success: bool,
    pub message: String,
    pub matches: Vec<MatchCandidate>,
    pub selected: Option<MatchCandidate>,
}

/// Human-readable size with 1024-based units, up to two decimals.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = (bytes.ilog2() / 10).min(UNITS.len() as u32 - 1);
    let value = bytes as f64 / f64::powi(1024.0, exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent as usize])
}
