mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use fcmkit_core::FsProject;
use fcmkit_core::pipeline::run_hook;
use fcmkit_core::settings::{Hook, HookSettings};
use fcmkit_types::report::ToolInfo;
use fs_err as fs;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "fcmkit",
    version,
    about = "Install-time patcher for the iOS platform of a Cordova Firebase messaging plugin."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ensure LD_RUNPATH_SEARCH_PATHS in the Xcode project.
    AfterPluginInstall(HookArgs),
    /// Apply plugin variables to the plists and patch the Podfile.
    AfterPrepare(HookArgs),
    /// Run both hooks in sequence.
    Run(HookArgs),
}

#[derive(Debug, Parser)]
struct HookArgs {
    /// Cordova project root (default: current directory).
    #[arg(long, default_value = ".")]
    project_root: Utf8PathBuf,

    /// App name (default: app_name in fcmkit.toml, then <name> in config.xml).
    #[arg(long)]
    app_name: Option<String>,

    /// Plugin variable as KEY=VALUE. Repeatable; overrides every other source.
    #[arg(long = "var", value_name = "KEY=VALUE")]
    vars: Vec<String>,

    /// Compute every change without writing, and print the patch.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Write the run report as JSON to this path.
    #[arg(long)]
    report: Option<Utf8PathBuf>,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::AfterPluginInstall(args) => cmd_hook(Hook::AfterPluginInstall, args),
        Command::AfterPrepare(args) => cmd_hook(Hook::AfterPrepare, args),
        Command::Run(args) => cmd_hook(Hook::All, args),
    }
}

fn cmd_hook(hook: Hook, args: HookArgs) -> anyhow::Result<()> {
    let project_root = args.project_root;

    // Load config file and merge with CLI arguments
    let file_config =
        config::load_or_default(&project_root).context("load fcmkit.toml config")?;
    let cli_vars = config::parse_var_flags(&args.vars)?;
    let merged = ConfigMerger::new(file_config).merge_hook_args(args.app_name, cli_vars);

    debug!(
        "merged config: app_name={:?}, variables={:?}",
        merged.app_name, merged.variables
    );
    for key in merged.unknown_variables() {
        warn!("unknown plugin variable {key}, no hook reads it");
    }

    let settings = HookSettings {
        app_name: merged.app_name,
        variables: merged.variables,
        dry_run: args.dry_run,
    };
    let io = FsProject::new(project_root.clone());

    let run = run_hook(hook, &settings, &io, tool_info())
        .with_context(|| format!("run {:?} hook in {}", hook, project_root))?;

    if args.dry_run {
        print!("{}", run.patch);
    }

    if let Some(path) = &args.report {
        write_json(path, &run.report)?;
        info!("wrote report to {}", path);
    }

    let counts = &run.report.verdict.counts;
    info!(
        "{} file(s) {}, {} warning(s)",
        run.report.files.len(),
        if args.dry_run { "would be written" } else { "written" },
        counts.warnings
    );
    if run.report.pod_install_required {
        info!("run `pod install` in platforms/ios to pick up the Podfile changes");
    }
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Utf8Path, v: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent))?;
    }
    let s = serde_json::to_string_pretty(v).context("serialize json")?;
    fs::write(path, s).with_context(|| format!("write {}", path))?;
    Ok(())
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "fcmkit".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
