//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use render_core::MANIFEST_FILE;
use render_fs::FileMode;

/// Render deployment-managed configuration files from templates
#[derive(Parser, Debug)]
#[command(name = "render")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// A template and the values it is rendered with
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SourceArgs {
    /// Template file containing `{{path}}` placeholders
    pub template: PathBuf,

    /// Values file (TOML, JSON or YAML); later files override earlier ones
    #[arg(short = 'V', long = "values", value_name = "FILE")]
    pub values: Vec<PathBuf>,

    /// Override a value, e.g. `--set component.db.password=tiger`
    #[arg(long = "set", value_name = "PATH=VALUE")]
    pub set: Vec<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Render a template
    ///
    /// Prints the rendering to stdout unless an output file is given.
    /// Fails without output when any placeholder cannot be resolved.
    Render {
        #[command(flatten)]
        source: SourceArgs,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Permissions of the written file (octal)
        #[arg(long, default_value = "600")]
        mode: FileMode,
    },

    /// Check whether a target matches its rendering
    ///
    /// Exits non-zero when the target is missing or has drifted.
    Check {
        #[command(flatten)]
        source: SourceArgs,

        /// Rendered file to check
        #[arg(short = 'o', long)]
        target: PathBuf,

        /// Expected permissions (octal)
        #[arg(long, default_value = "600")]
        mode: FileMode,
    },

    /// Show how a target differs from its rendering
    Diff {
        #[command(flatten)]
        source: SourceArgs,

        /// Rendered file to compare against
        #[arg(short = 'o', long)]
        target: PathBuf,

        /// Expected permissions (octal)
        #[arg(long, default_value = "600")]
        mode: FileMode,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List the placeholder paths a template references
    Placeholders {
        /// Template file
        template: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Render and write every file listed in a manifest
    ///
    /// All files are rendered before any is written.
    Apply {
        /// Manifest file
        #[arg(short, long, default_value = MANIFEST_FILE)]
        manifest: PathBuf,

        /// Override a value for every file
        #[arg(long = "set", value_name = "PATH=VALUE")]
        set: Vec<String>,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Render PostfixAdmin's config.local.php from a settings file
    Postfixadmin {
        /// Settings file (TOML, JSON or YAML)
        #[arg(short = 'c', long)]
        settings: PathBuf,

        /// Where to write config.local.php
        #[arg(short = 'o', long)]
        target: PathBuf,

        /// doveadm binary, overriding the settings file
        #[arg(long, env = "RENDER_DOVEADM")]
        doveadm: Option<PathBuf>,

        /// Permissions of the written file (octal)
        #[arg(long, default_value = "600")]
        mode: FileMode,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
}
