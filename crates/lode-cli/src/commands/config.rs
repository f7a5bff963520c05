//! `lode config`: print the bundler configuration for a command and mode.

use lode_config::{BuildConfig, BuildContext, Command, OverridesLoader, Overrides, SsrEntry, plan};
use serde_json::Value;
use tracing::{debug, info};

use crate::cli::ConfigArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};

/// Execute the config command.
///
/// Overrides are layered file, then environment, then flags; the result is
/// synthesized and printed as JSON on stdout.
pub fn execute(args: ConfigArgs) -> Result<()> {
    let ctx = build_context(&args)?;

    let mut loader = OverridesLoader::new(ctx.cwd());
    if let Some(path) = &args.config {
        loader = loader.with_config_file(utils::absolute(path)?);
    }
    let mut overrides = loader.load()?;
    apply_flags(&mut overrides, &args);

    let mode = args
        .mode
        .as_deref()
        .unwrap_or_else(|| args.command.default_mode());
    let config = plan(&ctx, Command::from(args.command), mode, &overrides);
    info!(
        build_target = %config.target,
        build_mode = %config.build_mode,
        out_dir = %config.out_dir,
        "synthesized bundler configuration"
    );

    let value = if args.options {
        options_value(&config)?
    } else {
        config.bundler_value()?
    };
    println!("{}", utils::render_json(&value, args.pretty)?);
    Ok(())
}

fn build_context(args: &ConfigArgs) -> Result<BuildContext> {
    let Some(cwd) = &args.cwd else {
        return Ok(BuildContext::probe()?);
    };
    let cwd = utils::absolute(cwd)?;
    if !cwd.is_dir() {
        return Err(CliError::FileNotFound(cwd));
    }
    debug!(cwd = %cwd.display(), "using explicit project directory");
    Ok(BuildContext::new(cwd))
}

/// Flags override every other source.
fn apply_flags(overrides: &mut Overrides, args: &ConfigArgs) {
    if let Some(target) = args.target {
        overrides.target = Some(target);
    }
    if let Some(strategy) = args.entry_strategy {
        overrides.entry_strategy = Some(strategy);
    }
    if let Some(out_dir) = &args.out_dir {
        overrides.build.out_dir = Some(out_dir.clone());
    }
    if let Some(entry) = &args.ssr_entry {
        overrides.build.ssr = Some(SsrEntry::Entry(entry.clone()));
    }
}

/// Resolved build options without the bundler section.
fn options_value(config: &BuildConfig) -> Result<Value> {
    let mut value = config.to_value()?;
    if let Value::Object(map) = &mut value {
        map.remove("bundler");
    }
    Ok(value)
}
