//! `lode graph`: compile a manifest into its bundle graph.

use std::fs;

use lode_graph::{GraphOptions, Manifest, compile_with};
use tracing::{info, warn};

use crate::cli::GraphArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the graph command.
///
/// Prints the graph (or the manifest with the graph embedded) to stdout, or
/// writes it to `--output`.
pub fn execute(args: GraphArgs) -> Result<()> {
    let path = utils::absolute(&args.manifest)?;
    if !path.is_file() {
        return Err(CliError::FileNotFound(path));
    }

    let mut manifest = Manifest::from_path(&path)?;
    if manifest.is_empty() {
        warn!(manifest = %path.display(), "manifest has no bundles");
    }

    let options = GraphOptions::default().with_dynamic_imports(args.dynamic_imports);
    let value = if args.embed {
        manifest.embed_bundle_graph(&options);
        manifest.to_value()?
    } else {
        serde_json::to_value(compile_with(&manifest, &options))?
    };
    info!(
        bundles = manifest.len(),
        total_size = manifest.total_size(),
        "compiled bundle graph"
    );

    let text = utils::render_json(&value, args.pretty)?;
    match &args.output {
        Some(output) => {
            let output = utils::absolute(output)?;
            fs::write(&output, format!("{text}\n"))?;
            ui::success(&format!("Wrote {}", output.display()));
        }
        None => println!("{text}"),
    }
    Ok(())
}
