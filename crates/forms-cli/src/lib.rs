//! Formkit command line
//!
//! `formkit check` validates a form, `formkit fmt` rewrites a document in
//! canonical form and `formkit json` dumps the decoded questions.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod commands;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use forms_editor::EditorConfig;
use std::io::Write;
use std::path::PathBuf;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "FORMKIT_LOG";

/// Command definition
#[must_use]
pub fn cli() -> Command {
    let file = || {
        Arg::new("file")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("Form document to read")
    };

    Command::new("formkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Check and format form documents")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Editor config (TOML)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("check")
                .about("Validate questions and report errors")
                .arg(file())
                .arg(
                    Arg::new("payload")
                        .long("payload")
                        .action(ArgAction::SetTrue)
                        .help("Read a JSON form payload instead of a bare document"),
                ),
        )
        .subcommand(
            Command::new("fmt")
                .about("Rewrite a document in canonical form")
                .arg(file())
                .arg(
                    Arg::new("write")
                        .long("write")
                        .action(ArgAction::SetTrue)
                        .help("Write the result back to the file"),
                ),
        )
        .subcommand(
            Command::new("json")
                .about("Print the decoded document as JSON")
                .arg(file()),
        )
}

/// Run a parsed command line; returns the process exit code
pub fn run(matches: &ArgMatches, out: &mut impl Write) -> anyhow::Result<i32> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EditorConfig::default(),
    };

    match matches.subcommand() {
        Some(("check", args)) => {
            let valid = commands::check::run(file_arg(args)?, args.get_flag("payload"), config, out)?;
            Ok(if valid { 0 } else { 1 })
        }
        Some(("fmt", args)) => {
            commands::fmt::run(file_arg(args)?, args.get_flag("write"), out)?;
            Ok(0)
        }
        Some(("json", args)) => {
            commands::json::run(file_arg(args)?, out)?;
            Ok(0)
        }
        _ => Ok(2),
    }
}

fn file_arg(args: &ArgMatches) -> anyhow::Result<&PathBuf> {
    args.get_one::<PathBuf>("file").context("missing file argument")
}
