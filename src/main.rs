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

mod cli;
mod command;
mod config;
mod lexicon;
mod manifest;
mod matcher;
mod model;
mod output;
mod similarity;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context as _;
use anyhow::Result;
use clap::CommandFactory;
use clap::Parser;
use clap_complete::Shell;

use crate::cli::Cli;
use crate::cli::Commands;
use crate::config::ConfigCtx;
use crate::lexicon::Language;
use crate::manifest::Manifest;
use crate::model::FileType;
use crate::model::format_size;
use crate::output::JsonResponse;
use crate::output::StatsOut;
use crate::output::print_json;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Init { path } => cmd_init(path),
        Commands::Add(args) => handle_result(
            cmd_add(args.paths, args.glob, args.keywords, args.ignore, args.json),
            args.json,
        ),
        Commands::Rm(args) => handle_result(cmd_rm(args.targets, args.json), args.json),
        Commands::Label(args) => handle_result(
            cmd_label(args.target, args.keywords, args.json),
            args.json,
        ),
        Commands::Match(args) => handle_result(
            cmd_match(args.utterance, args.lang, args.k, args.explain, args.json),
            args.json,
        ),
        Commands::Run(args) => {
            handle_result(cmd_run(args.utterance, args.lang, args.json), args.json)
        }
        Commands::Ls { json } => handle_result(cmd_ls(json), json),
        Commands::Stats { json } => handle_result(cmd_stats(json), json),
        Commands::Completions { shell } => cmd_completions(shell),
    }
}

fn handle_result(result: Result<()>, json: bool) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err) => {
            if json {
                let resp = JsonResponse::error("error", &err.to_string());
                print_json(&resp)?;
                Ok(())
            } else {
                Err(err)
            }
        }
    }
}

fn cmd_init(path: Option<PathBuf>) -> Result<()> {
    let root = path.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&root).with_context(|| format!("create dir {root:?}"))?;

    let config = config::load_global_config()?;
    let manifest_path = root.join(&config.manifest_path);
    if manifest_path.exists() {
        anyhow::bail!("manifest already exists at {}", manifest_path.display());
    }

    Manifest::new().save(&manifest_path)?;
    println!("Initialized Beckon manifest at {}", manifest_path.display());
    Ok(())
}

fn cmd_add(
    paths: Vec<PathBuf>,
    glob: Option<String>,
    keywords: Option<String>,
    ignore: Vec<String>,
    json: bool,
) -> Result<()> {
    let ctx = ConfigCtx::load_from_cwd()?;
    let manifest_path = ctx.manifest_path();
    let mut manifest = Manifest::load(&manifest_path)?;

    let opts = manifest::AddOptions {
        glob,
        keywords,
        ignore,
    };
    let report = manifest::add_paths(&mut manifest, paths, opts)?;
    manifest.save(&manifest_path)?;

    if json {
        let resp = JsonResponse::ok()
            .with_stats(StatsOut {
                took_ms: 0,
                total_hits: report.files_added as i64,
                file_count: Some(manifest.files.len() as i64),
                catalog_bytes: None,
            })
            .with_warnings(report.warnings);
        print_json(&resp)?;
    } else {
        println!("Added {} files", report.files_added);
        for warn in report.warnings {
            eprintln!("warning: {warn}");
        }
    }

    Ok(())
}

fn cmd_rm(targets: Vec<String>, json: bool) -> Result<()> {
    let ctx = ConfigCtx::load_from_cwd()?;
    let manifest_path = ctx.manifest_path();
    let mut manifest = Manifest::load(&manifest_path)?;

    let mut removed = 0usize;
    for target in targets {
        removed += manifest.remove(&target);
    }
    manifest.save(&manifest_path)?;

    if json {
        let resp = JsonResponse::ok().with_stats(StatsOut {
            took_ms: 0,
            total_hits: removed as i64,
            file_count: Some(manifest.files.len() as i64),
            catalog_bytes: None,
        });
        print_json(&resp)?;
    } else {
        println!("Removed {removed} records");
    }
    Ok(())
}

fn cmd_label(target: String, keywords: String, json: bool) -> Result<()> {
    let ctx = ConfigCtx::load_from_cwd()?;
    let manifest_path = ctx.manifest_path();
    let mut manifest = Manifest::load(&manifest_path)?;

    manifest.set_keywords(&target, &keywords)?;
    manifest.save(&manifest_path)?;

    if json {
        print_json(&JsonResponse::ok())?;
    } else {
        println!("Labeled {target}");
    }
    Ok(())
}

fn cmd_match(
    utterance: String,
    lang: Option<String>,
    k: Option<usize>,
    explain: bool,
    json: bool,
) -> Result<()> {
    let ctx = ConfigCtx::load_from_cwd()?;
    let manifest = Manifest::load(&ctx.manifest_path())?;
    let language = Language::from_tag(lang.as_deref().unwrap_or(&ctx.config.language));

    let started = Instant::now();
    let mut matches = matcher::find_matching_files(&manifest.files, &utterance, language);
    if let Some(k) = k {
        matches.truncate(k);
    }

    if json {
        let target = matcher::target_description(&utterance, language);
        let resp = JsonResponse::ok()
            .with_query(&utterance, language.as_tag(), &target)
            .with_results(matches.iter().map(|m| m.to_json(explain)).collect())
            .with_stats(StatsOut {
                took_ms: started.elapsed().as_millis() as i64,
                total_hits: matches.len() as i64,
                file_count: Some(manifest.files.len() as i64),
                catalog_bytes: None,
            });
        print_json(&resp)?;
    } else {
        for m in &matches {
            if explain {
                println!("{:.1}\t{}\t{}", m.score, m.reason.as_label(), m.file.name);
            } else {
                println!("{}\t{}", m.reason.as_label(), m.file.name);
            }
        }
    }

    Ok(())
}

fn cmd_run(utterance: String, lang: Option<String>, json: bool) -> Result<()> {
    let ctx = ConfigCtx::load_from_cwd()?;
    let manifest = Manifest::load(&ctx.manifest_path())?;
    let language = Language::from_tag(lang.as_deref().unwrap_or(&ctx.config.language));

    let started = Instant::now();
    let result = command::process_command(&utterance, &manifest.files, language);

    if json {
        let target = matcher::target_description(&utterance, language);
        let mut resp = JsonResponse::ok()
            .with_query(&utterance, language.as_tag(), &target)
            .with_outcome(result.success, &result.message)
            .with_results(result.matches.iter().map(|m| m.to_json(false)).collect())
            .with_stats(StatsOut {
                took_ms: started.elapsed().as_millis() as i64,
                total_hits: result.matches.len() as i64,
                file_count: Some(manifest.files.len() as i64),
                catalog_bytes: None,
            });
        if let Some(selected) = &result.selected {
            resp = resp.with_selected(selected.to_json(false));
        }
        print_json(&resp)?;
    } else {
        println!("{}", result.message);
    }

    Ok(())
}

fn cmd_ls(json: bool) -> Result<()> {
    let ctx = ConfigCtx::load_from_cwd()?;
    let manifest = Manifest::load(&ctx.manifest_path())?;

    if json {
        let results = manifest
            .files
            .iter()
            .map(|f| serde_json::to_value(f).unwrap_or(serde_json::Value::Null))
            .collect();
        let resp = JsonResponse::ok()
            .with_results(results)
            .with_stats(StatsOut {
                took_ms: 0,
                total_hits: manifest.files.len() as i64,
                file_count: Some(manifest.files.len() as i64),
                catalog_bytes: None,
            });
        print_json(&resp)?;
    } else {
        for file in &manifest.files {
            let kind = FileType::from_mime(&file.mime_type);
            println!(
                "{}  {}\t{}\t{}\t{}",
                kind.icon(),
                file.name,
                kind.as_label(),
                format_size(file.size_bytes),
                file.keywords
            );
        }
    }
    Ok(())
}

fn cmd_stats(json: bool) -> Result<()> {
    let ctx = ConfigCtx::load_from_cwd()?;
    let manifest_path = ctx.manifest_path();
    let manifest = Manifest::load(&manifest_path)?;
    let catalog_bytes = std::fs::metadata(&manifest_path).map(|m| m.len()).ok();
    let total_size: u64 = manifest.files.iter().map(|f| f.size_bytes).sum();

    if json {
        let resp = JsonResponse::ok().with_stats(StatsOut {
            took_ms: 0,
            total_hits: 0,
            file_count: Some(manifest.files.len() as i64),
            catalog_bytes,
        });
        print_json(&resp)?;
    } else {
        println!("Files: {}", manifest.files.len());
        println!("Total size: {}", format_size(total_size));
        println!("Manifest: {}", manifest_path.display());
        println!("Language: {}", ctx.config.language);
    }

    Ok(())
}

fn cmd_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "beckon", &mut std::io::stdout());
    Ok(())
}
