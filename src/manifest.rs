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

//! The manifest is the catalog of file records the matcher runs against: a
//! JSON file listing name, MIME type, size, keywords, and upload time per
//! record. The matcher itself never touches the filesystem; this module is
//! the glue that feeds it.

use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;
use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use walkdir::WalkDir;

use crate::model::FileRecord;

pub const MANIFEST_VERSION: u32 = 1;

const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

const ALLOWED_MIME_TYPES: [&str; 7] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    pub files: Vec<FileRecord>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

impl Manifest {
    pub fn new() -> Self {
        Self {
            version: MANIFEST_VERSION,
            files: Vec::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read manifest {}", path.display()))?;
        let manifest: Manifest = serde_json::from_str(&text)
            .with_context(|| format!("parse manifest {}", path.display()))?;
        if manifest.version != MANIFEST_VERSION {
            anyhow::bail!(
                "unsupported manifest version {} (expected {})",
                manifest.version,
                MANIFEST_VERSION
            );
        }
        Ok(manifest)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        std::fs::write(path, text).with_context(|| format!("write manifest {}", path.display()))
    }

    /// Look a record up by id first, then by name.
    pub fn find(&self, target: &str) -> Option<&FileRecord> {
        self.files
            .iter()
            .find(|f| f.id == target)
            .or_else(|| self.files.iter().find(|f| f.name == target))
    }

    pub fn remove(&mut self, target: &str) -> usize {
        let before = self.files.len();
        self.files.retain(|f| f.id != target && f.name != target);
        before - self.files.len()
    }

    /// Set a record's keyword label. Non-empty labels must be unique across
    /// the catalog so each label names exactly one file when spoken.
    pub fn set_keywords(&mut self, target: &str, keywords: &str) -> Result<()> {
        let keywords = keywords.trim();
        let record = self
            .find(target)
            .with_context(|| format!("no record matches '{target}'"))?;
        let id = record.id.clone();
        if !keywords.is_empty()
            && let Some(other) = self
                .files
                .iter()
                .find(|f| f.id != id && f.keywords == keywords)
        {
            anyhow::bail!(
                "keywords '{}' already used by {}",
                keywords,
                other.name
            );
        }
        for file in &mut self.files {
            if file.id == id {
                file.keywords = keywords.to_string();
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    pub glob: Option<String>,
    pub keywords: Option<String>,
    pub ignore: Vec<String>,
}

#[derive(Debug, Default)]
pub struct AddReport {
    pub files_added: usize,
    pub warnings: Vec<String>,
}

/// Catalog files from disk into the manifest. Content is never read or
/// copied; only metadata is recorded.
pub fn add_paths(manifest: &mut Manifest, paths: Vec<PathBuf>, opts: AddOptions) -> Result<AddReport> {
    let include_set = build_globset(opts.glob.as_deref())?;
    let ignore_set = build_ignore_set(&opts.ignore)?;

    let mut report = AddReport::default();
    for path in resolve_paths(paths) {
        if path.is_file() {
            add_file(manifest, &path, &include_set, &ignore_set, &opts, &mut report)?;
        } else if path.is_dir() {
            for entry in WalkDir::new(&path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() {
                    add_file(
                        manifest,
                        entry.path(),
                        &include_set,
                        &ignore_set,
                        &opts,
                        &mut report,
                    )?;
                }
            }
        }
    }
    Ok(report)
}

fn resolve_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    }
}

fn build_globset(pattern: Option<&str>) -> Result<Option<GlobSet>> {
    if let Some(pat) = pattern {
        let mut builder = GlobSetBuilder::new();
        builder.add(Glob::new(pat)?);
        Ok(Some(builder.build()?))
    } else {
        Ok(None)
    }
}

fn build_ignore_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(Glob::new(pat)?);
    }
    Ok(builder.build()?)
}

fn add_file(
    manifest: &mut Manifest,
    path: &Path,
    include_set: &Option<GlobSet>,
    ignore_set: &GlobSet,
    opts: &AddOptions,
    report: &mut AddReport,
) -> Result<()> {
    let path_str = path.to_string_lossy();
    if !ignore_set.is_empty() && ignore_set.is_match(path) {
        return Ok(());
    }
    if let Some(set) = include_set
        && !set.is_match(path)
    {
        return Ok(());
    }

    let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
        return Ok(());
    };
    if manifest.files.iter().any(|f| f.name == name) {
        report
            .warnings
            .push(format!("skip already cataloged name: {name}"));
        return Ok(());
    }

    let mime_type = mime_from_extension(path);
    if !ALLOWED_MIME_TYPES.contains(&mime_type) {
        report
            .warnings
            .push(format!("skip unsupported file type: {path_str}"));
        return Ok(());
    }

    let metadata = std::fs::metadata(path).with_context(|| format!("metadata {path_str}"))?;
    if metadata.len() > MAX_UPLOAD_BYTES {
        report
            .warnings
            .push(format!("skip file over 50MB: {path_str}"));
        return Ok(());
    }

    let upload_time = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("format upload time")?;
    let record = FileRecord {
        id: record_id(&name, metadata.len(), &upload_time),
        name,
        mime_type: mime_type.to_string(),
        size_bytes: metadata.len(),
        keywords: opts.keywords.clone().unwrap_or_default(),
        upload_time,
    };
    manifest.files.push(record);
    report.files_added += 1;
    Ok(())
}

pub fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        _ => "application/octet-stream",
    }
}

fn record_id(name: &str, size: u64, upload_time: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update([0u8]);
    hasher.update(size.to_le_bytes());
    hasher.update([0u8]);
    hasher.update(upload_time.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..8])
}
