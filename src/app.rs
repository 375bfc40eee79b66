//! Application orchestrator.
//! Loads/merges config, initializes logging, validates the start directory,
//! takes the tree lock for live runs and walks the tree.

use anyhow::Result;
use tracing::{debug, error, info};

use replmv::cli::Args;
use replmv::output::{self as out, ConsoleReporter};
use replmv::{
    CONFIG_ENV, Config, LoadResult, WalkError, WalkStats, acquire_tree_lock, default_config_path,
    load_or_init, walk,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    // Load config, or write a template on first use (before logging init)
    let mut cfg = match load_or_init()? {
        LoadResult::Loaded(cfg, _) => cfg,
        LoadResult::Missing(path) => {
            out::print_warn(&format!(
                "{CONFIG_ENV} points to '{}', which does not exist; using defaults.",
                path.display()
            ));
            Config::default()
        }
        LoadResult::CreatedTemplate(path) => {
            out::print_success(&format!(
                "A template replmv config was written to: {}",
                path.display()
            ));
            if args.start_dir.is_none() {
                out::print_info("Edit the file to set `start_dir` and review the <table> rules, then re-run this command. To use a different location set REPLMV_CONFIG.");
                return Ok(());
            }
            Config::default()
        }
    };

    // CLI wins
    args.apply_overrides(&mut cfg);

    // Hold the guard until we return so the file appender flushes.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    debug!("Starting replmv: {:?}", args);

    let start = cfg.validate()?;
    let settings = cfg.walk_settings()?;

    let _lock = if cfg.dry_run {
        None
    } else {
        Some(acquire_tree_lock(&start).map_err(|e| {
            error!(path = %start.display(), error = %e, "Could not lock start directory");
            e
        })?)
    };

    let mut reporter = ConsoleReporter::new();
    match walk(&settings, &start, &mut reporter) {
        Ok(stats) => {
            summarize(&stats, cfg.dry_run);
            Ok(())
        }
        Err(e) => {
            let code = e.code();
            match &e {
                WalkError::DepthExceeded { path, depth, max } => {
                    error!(code, kind = "depth_exceeded", path = %path.display(), depth, max, "Walk aborted")
                }
            }
            out::print_error(&e.to_string());
            Err(e.into())
        }
    }
}

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
        out::print_info(&format!(
            "To override, unset {CONFIG_ENV} or set it to another file."
        ));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default replmv config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info(
                    "No config file exists there yet. Run without --print-config to create a template.",
                );
            }
        }
        Err(e) => {
            out::print_error(&format!("Could not determine a default config path: {e}"));
        }
    }
}

fn summarize(stats: &WalkStats, dry_run: bool) {
    info!(?stats, dry_run, "Walk finished");
    let verb = if dry_run { "planned" } else { "renamed" };
    let changed = if dry_run { stats.planned } else { stats.renamed };
    let msg = format!(
        "{} entries in {} directories, {changed} {verb}",
        stats.entries_seen, stats.dirs_visited
    );
    match stats.problems() {
        0 => out::print_success(&msg),
        n => out::print_warn(&format!("{msg}, {n} problems (see ERR: lines)")),
    }
}
