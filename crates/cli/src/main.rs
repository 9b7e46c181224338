mod render;

use std::fs;
use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use f10cfg_core::{parse_tree, parse_with_profile, to_pretty_json, tree_to_pretty_json};
use f10cfg_diagnostics as diag;
use f10cfg_profile::{Profile, load_profile_from_str};
use tracing_subscriber::EnvFilter;

use crate::render::{Format, report_config_error};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "f10cfg",
    version,
    about = "Parse and check Force10 FTOS running-configs"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Log parser progress to stderr (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Parse a running-config and print the model.
    Parse {
        /// Config file, or "-" for stdin.
        file: String,
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Check a running-config without printing the model.
    Check {
        /// Config file, or "-" for stdin.
        file: String,
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Print the lexed section tree.
    Tree {
        /// Config file, or "-" for stdin.
        file: String,
    },

    /// Explain a diagnostic ID (e.g. FTOS1201).
    Explain { id: String },
}

#[derive(Args, Debug)]
struct ProfileArgs {
    /// Device profile JSON with the expected passthrough sections.
    #[arg(long, conflicts_with = "permissive")]
    profile: Option<String>,

    /// Skip completeness checks.
    #[arg(long)]
    permissive: bool,
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    let result = match cli.cmd {
        Cmd::Parse { file, profile } => cmd_parse(&file, &profile, format),
        Cmd::Check { file, profile } => cmd_check(&file, &profile, format),
        Cmd::Tree { file } => cmd_tree(&file, format),
        Cmd::Explain { id } => cmd_explain(&id, format),
    };

    match (result, format) {
        (Err(err), Format::Json) => {
            let out = serde_json::json!({
                "success": false,
                "error": "command_failed",
                "message": format!("{err:#}"),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            process::exit(1);
        }
        (result, _) => result,
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_parse(file: &str, args: &ProfileArgs, format: Format) -> Result<()> {
    let input = read_input(file)?;
    let profile = resolve_profile(args)?;

    match parse_with_profile(&input, profile) {
        Ok(config) => {
            match format {
                Format::Json => {
                    let out = serde_json::json!({ "ok": true, "config": config });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                Format::Pretty => println!("{}", to_pretty_json(&config)),
            }
            Ok(())
        }
        Err(err) => {
            report_config_error(&input, file, &err, format);
            process::exit(1);
        }
    }
}

fn cmd_check(file: &str, args: &ProfileArgs, format: Format) -> Result<()> {
    let input = read_input(file)?;
    let profile = resolve_profile(args)?;

    match parse_with_profile(&input, profile) {
        Ok(config) => {
            match format {
                Format::Json => {
                    let out = serde_json::json!({
                        "ok": true,
                        "interfaces": config.interfaces.len(),
                        "vlans": config.vlans.len(),
                    });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                Format::Pretty => eprintln!("config ok: {file}"),
            }
            Ok(())
        }
        Err(err) => {
            report_config_error(&input, file, &err, format);
            process::exit(1);
        }
    }
}

fn cmd_tree(file: &str, format: Format) -> Result<()> {
    let input = read_input(file)?;
    let tree = parse_tree(&input);
    match format {
        Format::Json => println!("{}", serde_json::to_string(&tree)?),
        Format::Pretty => println!("{}", tree_to_pretty_json(&tree)),
    }
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "explanation": diag::explain(id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Explanation is the expected output: stdout, not stderr.
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Read the whole input from a file, or from stdin when `file` is `-`.
fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        return Ok(input);
    }
    fs::read_to_string(file).with_context(|| format!("failed to read {file}"))
}

/// `--permissive`, `--profile PATH`, or the canonical Force10 profile.
fn resolve_profile(args: &ProfileArgs) -> Result<Profile> {
    if args.permissive {
        return Ok(Profile::permissive());
    }
    let Some(path) = &args.profile else {
        return Ok(Profile::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("failed to read profile {path}"))?;
    let profile =
        load_profile_from_str(&text).with_context(|| format!("invalid profile {path}"))?;
    tracing::debug!(profile = %profile.id, "loaded profile");
    Ok(profile)
}
