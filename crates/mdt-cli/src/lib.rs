//! `mdt` command-line front end
//!
//! Reads repository trees (JSON), simulator config (TOML) and UAM manifests
//! (JSON) from disk, runs the library and prints pretty JSON to stdout. Logs go
//! to stderr, filtered by `MDT_LOG`.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod input;

pub use input::InputError;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use input::{parse_target, read_config, read_manifest, read_tree};
use mdt_atlas::{
    compute_instruction_diagnostics, compute_next_steps, compute_simulator_insights, detect_tool,
    extra_instruction_files, format_insights_summary, simulate_with_config, NextStepsInput,
    RepoSource, SimulationInput, SimulatorConfig, ToolId, ToolIdError,
};
use mdt_compile::{compile_uam_v1, AdapterRegistry, CompileError};
use mdt_uam::{uam_v1_json_schema, UamError, UamTarget};
use serde::Serialize;
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit code for bad tool ids, invalid manifests and malformed arguments
pub const CALLER_ERROR_EXIT: u8 = 2;

fn tool_arg() -> Arg {
    Arg::new("tool")
        .long("tool")
        .required(true)
        .help("Tool id (github-copilot, copilot-cli, codex-cli, claude-code, gemini-cli, cursor)")
}

fn tree_arg() -> Arg {
    Arg::new("tree")
        .long("tree")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Repository tree JSON: {\"files\": [...]} or an array of paths")
}

fn cwd_arg() -> Arg {
    Arg::new("cwd")
        .long("cwd")
        .default_value("")
        .help("Working directory, repo-relative")
}

/// Build the `mdt` command
#[must_use]
pub fn command() -> Command {
    Command::new("mdt")
        .version(VERSION)
        .about("Agent instruction file simulator and UAM compiler")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("simulate")
                .about("List the instruction files a tool loads")
                .arg(tool_arg())
                .arg(tree_arg())
                .arg(cwd_arg())
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("Simulator thresholds (TOML)"),
                ),
        )
        .subcommand(
            Command::new("insights")
                .about("Expected, found and missing instruction files")
                .arg(tool_arg())
                .arg(tree_arg())
                .arg(cwd_arg()),
        )
        .subcommand(
            Command::new("diagnose")
                .about("Layout problems for one tool")
                .arg(tool_arg())
                .arg(tree_arg())
                .arg(cwd_arg()),
        )
        .subcommand(
            Command::new("detect")
                .about("Guess the tool a repository is set up for")
                .arg(tree_arg()),
        )
        .subcommand(
            Command::new("next-steps")
                .about("Ordered, actionable guidance")
                .arg(tool_arg())
                .arg(tree_arg())
                .arg(cwd_arg())
                .arg(
                    Arg::new("source")
                        .long("source")
                        .default_value("folder")
                        .value_parser(["folder", "manual"])
                        .help("How the tree was provided"),
                )
                .arg(
                    Arg::new("stale")
                        .long("stale")
                        .action(ArgAction::SetTrue)
                        .help("Inputs changed since the last run"),
                ),
        )
        .subcommand(
            Command::new("compile")
                .about("Compile a UAM v1 manifest into tool instruction files")
                .arg(
                    Arg::new("manifest")
                        .long("manifest")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("UAM v1 manifest (JSON)"),
                )
                .arg(
                    Arg::new("target")
                        .long("target")
                        .action(ArgAction::Append)
                        .help("Target as <id> or <id>@<version>; defaults to the manifest's targets"),
                ),
        )
        .subcommand(Command::new("schema").about("Print the UAM v1 JSON schema"))
}

/// Install the stderr subscriber, filtered by `MDT_LOG` (default `warn`)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("MDT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    // Already installed when called twice
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Whether `err` stems from bad caller input rather than I/O
#[must_use]
pub fn is_caller_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause.is::<ToolIdError>()
            || cause.is::<UamError>()
            || cause.is::<CompileError>()
            || cause.is::<InputError>()
            || cause.is::<toml::de::Error>()
    })
}

fn write_json(out: &mut dyn Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to serialize output")?;
    writeln!(out).context("failed to write output")?;
    Ok(())
}

fn tool(args: &ArgMatches) -> Result<ToolId> {
    let raw = args.get_one::<String>("tool").map_or("", String::as_str);
    Ok(raw.parse::<ToolId>()?)
}

fn path_arg<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a PathBuf> {
    args.get_one::<PathBuf>(name)
        .with_context(|| format!("missing --{name}"))
}

fn cwd(args: &ArgMatches) -> &str {
    args.get_one::<String>("cwd").map_or("", String::as_str)
}

/// Run a parsed command, writing JSON to `out`
///
/// # Errors
/// Unreadable inputs, unknown tool ids, invalid manifests or target specs.
/// Use [`is_caller_error`] to pick the exit code.
pub fn run(matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    match matches.subcommand() {
        Some(("simulate", args)) => {
            let tool = tool(args)?;
            let tree = read_tree(path_arg(args, "tree")?)?;
            let config = read_config(args.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
            let input = SimulationInput::new(tool, &tree, cwd(args));
            write_json(out, &simulate_with_config(&input, &config))
        }
        Some(("insights", args)) => {
            let tool = tool(args)?;
            let tree = read_tree(path_arg(args, "tree")?)?;
            let input = SimulationInput::new(tool, &tree, cwd(args));
            let insights = compute_simulator_insights(&input);
            let shadowed = simulate_with_config(&input, &SimulatorConfig::default())
                .shadowed
                .len();
            let summary = format_insights_summary(&insights, shadowed);
            write_json(out, &json!({ "insights": insights, "summary": summary }))
        }
        Some(("diagnose", args)) => {
            let tool = tool(args)?;
            let tree = read_tree(path_arg(args, "tree")?)?;
            let input = SimulationInput::new(tool, &tree, cwd(args));
            write_json(out, &compute_instruction_diagnostics(&input))
        }
        Some(("detect", args)) => {
            let tree = read_tree(path_arg(args, "tree")?)?;
            let paths: Vec<&str> = tree.files.iter().map(|file| file.path.as_str()).collect();
            write_json(out, &detect_tool(paths.as_slice()))
        }
        Some(("next-steps", args)) => {
            let tool = tool(args)?;
            let tree = read_tree(path_arg(args, "tree")?)?;
            let input = SimulationInput::new(tool, &tree, cwd(args));
            let result = simulate_with_config(&input, &SimulatorConfig::default());
            let diagnostics = compute_instruction_diagnostics(&input);
            let insights = compute_simulator_insights(&input);
            let extra_files = extra_instruction_files(tool, &tree);
            let repo_source = match args.get_one::<String>("source").map(String::as_str) {
                Some("manual") => RepoSource::Manual,
                _ => RepoSource::Folder,
            };

            let steps = compute_next_steps(&NextStepsInput {
                tool,
                repo_source,
                repo_file_count: tree.len(),
                is_stale: args.get_flag("stale"),
                diagnostics: &diagnostics,
                warnings: &result.warnings,
                insights: &insights,
                extra_files: &extra_files,
                scan_error: None,
                truncated: false,
            });
            write_json(out, &steps)
        }
        Some(("compile", args)) => {
            let manifest = read_manifest(path_arg(args, "manifest")?)?;
            let targets: Vec<UamTarget> = match args.get_many::<String>("target") {
                Some(specs) => specs
                    .map(|spec| parse_target(spec))
                    .collect::<Result<_, _>>()?,
                None => manifest.targets.clone(),
            };
            debug!(targets = targets.len(), "compiling manifest");
            let result = compile_uam_v1(&manifest, &targets, &AdapterRegistry::with_defaults())?;
            write_json(out, &result)
        }
        Some(("schema", _)) => write_json(out, &uam_v1_json_schema()?),
        _ => Ok(()),
    }
}
