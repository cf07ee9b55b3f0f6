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

use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(name = "beckon", version, about = "Voice-command file launcher")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new file manifest
    Init {
        /// Path to the manifest directory
        path: Option<PathBuf>,
    },

    /// Catalog files into the manifest
    Add(AddArgs),

    /// Remove records from the manifest
    Rm(RmArgs),

    /// Set the keyword label on a record
    Label(LabelArgs),

    /// Rank cataloged files against an utterance
    Match(MatchArgs),

    /// Process a voice command and report the result
    Run(RunArgs),

    /// List cataloged records
    Ls {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Show stats
    Stats {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate for
        shell: Shell,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Files or directories to catalog
    pub paths: Vec<PathBuf>,

    /// Glob to include
    #[arg(long)]
    pub glob: Option<String>,

    /// Initial keyword label for added records
    #[arg(long)]
    pub keywords: Option<String>,

    /// Ignore globs
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Record ids or names to remove
    pub targets: Vec<String>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Record id or name
    pub target: String,

    /// Keyword label (empty clears it)
    pub keywords: String,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Utterance text
    pub utterance: String,

    /// Language tag (en or zh; unrecognized tags fall back to en)
    #[arg(long)]
    pub lang: Option<String>,

    /// Keep only the top-k results
    #[arg(long)]
    pub k: Option<usize>,

    /// Include per-signal score breakdown
    #[arg(long)]
    pub explain: bool,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Utterance text
    pub utterance: String,

    /// Language tag (en or zh; unrecognized tags fall back to en)
    #[arg(long)]
    pub lang: Option<String>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}
