//! Configuration synthesis.
//!
//! A [`Draft`] accumulates the build configuration while a fixed, ordered list
//! of steps runs over it. Each step only fills what earlier steps left unset,
//! so precedence is exactly the order of [`STEPS`].

use tracing::{debug, instrument};

use crate::bundler::{
    BuildSection, BundlerConfig, DynamicImportVarsOptions, EsbuildOptions, EsbuildSetting, Minify,
    OptimizeDeps, OutputFormat, OutputOptions, OutputSpec, ResolveSection, RollupOptions,
    SsrSection,
};
use crate::config::BuildConfig;
use crate::context::BuildContext;
use crate::framework;
use crate::overrides::{InputSpec, Overrides};
use crate::paths::{join_path, resolve_path};
use crate::target::{BuildTarget, ResolvedTarget};

type Step = fn(&mut Draft<'_>);

/// Synthesis steps, in precedence order.
const STEPS: &[(&str, Step)] = &[
    ("out_dir", apply_out_dir),
    ("input", apply_input),
    ("output_names", apply_output_names),
    ("dynamic_import_vars", apply_dynamic_import_vars),
    ("ssr", apply_ssr_flags),
    ("optimize_deps", apply_optimize_deps),
    ("esbuild", apply_esbuild),
    ("lib", apply_lib),
    ("resolve", apply_resolve),
];

/// Produces [`BuildConfig`]s for one build context.
#[derive(Debug, Clone)]
pub struct Synthesizer<'a> {
    ctx: &'a BuildContext,
}

impl<'a> Synthesizer<'a> {
    pub fn new(ctx: &'a BuildContext) -> Self {
        Self { ctx }
    }

    /// Run every step over a fresh draft.
    #[instrument(skip_all, fields(target = %resolved.target, mode = %resolved.build_mode))]
    pub fn synthesize(&self, resolved: &ResolvedTarget, overrides: &Overrides) -> BuildConfig {
        let mut draft = Draft::new(self.ctx, resolved, overrides);
        for (name, step) in STEPS {
            step(&mut draft);
            debug!(step = name, "applied synthesis step");
        }
        draft.finish()
    }
}

/// Convenience wrapper around [`Synthesizer::synthesize`].
pub fn synthesize(
    ctx: &BuildContext,
    resolved: &ResolvedTarget,
    overrides: &Overrides,
) -> BuildConfig {
    Synthesizer::new(ctx).synthesize(resolved, overrides)
}

struct Draft<'a> {
    ctx: &'a BuildContext,
    resolved: &'a ResolvedTarget,
    overrides: &'a Overrides,

    root_dir: String,
    src_dir: String,
    assets_dir: Option<String>,

    out_dir: Option<String>,
    input: Vec<String>,
    rollup_input: Option<InputSpec>,
    outputs: Option<OutputSpec<OutputOptions>>,
    dynamic_import_vars_exclude: Vec<String>,
    ssr: Option<bool>,
    public_dir: Option<bool>,
    minify: Option<Minify>,
    optimize_deps: Option<OptimizeDeps>,
    esbuild: Option<EsbuildSetting>,
    conditions: Vec<String>,
}

impl<'a> Draft<'a> {
    fn new(ctx: &'a BuildContext, resolved: &'a ResolvedTarget, overrides: &'a Overrides) -> Self {
        let root_dir = resolve_path(ctx.cwd(), overrides.root.as_deref().unwrap_or("."));
        let src_dir = resolve_path(&root_dir, overrides.src_dir.as_deref().unwrap_or("src"));
        let assets_dir = usable_assets_dir(resolved.target, overrides.build.assets_dir.as_deref());

        Self {
            ctx,
            resolved,
            overrides,
            root_dir,
            src_dir,
            assets_dir,
            out_dir: None,
            input: Vec::new(),
            rollup_input: None,
            outputs: None,
            dynamic_import_vars_exclude: Vec::new(),
            ssr: None,
            public_dir: None,
            minify: None,
            optimize_deps: None,
            esbuild: None,
            conditions: Vec::new(),
        }
    }

    fn target(&self) -> BuildTarget {
        self.resolved.target
    }

    fn out_dir(&self) -> String {
        self.out_dir
            .clone()
            .unwrap_or_else(|| resolve_path(&self.root_dir, self.target().default_out_dir()))
    }

    fn finish(self) -> BuildConfig {
        let out_dir = self.out_dir();

        // Client output is served below the public base path.
        let build_out_dir = match (self.target(), non_empty(self.overrides.base.as_deref())) {
            (BuildTarget::Client, Some(base)) => join_path(&out_dir, base),
            _ => out_dir.clone(),
        };

        let rollup_input = self
            .rollup_input
            .unwrap_or_else(|| InputSpec::Many(self.input.clone()));
        let outputs = self
            .outputs
            .unwrap_or_else(|| OutputSpec::Single(OutputOptions::default()));

        let bundler = BundlerConfig {
            build: BuildSection {
                out_dir: build_out_dir,
                ssr: self.ssr,
                minify: self.minify,
                module_preload: false,
                css_code_split: false,
                dynamic_import_vars_options: DynamicImportVarsOptions {
                    exclude: self.dynamic_import_vars_exclude,
                },
                rollup_options: RollupOptions {
                    input: rollup_input,
                    output: outputs,
                    preserve_entry_signatures: "exports-only".to_string(),
                },
            },
            ssr: SsrSection {
                no_external: to_strings(framework::SSR_NO_EXTERNAL),
            },
            esbuild: self.esbuild.unwrap_or(EsbuildSetting::Disabled),
            optimize_deps: self.optimize_deps.unwrap_or_else(|| OptimizeDeps {
                include: None,
                exclude: to_strings(framework::OPTIMIZE_DEPS_EXCLUDE),
            }),
            public_dir: self.public_dir,
            resolve: ResolveSection {
                conditions: self.conditions,
                dedupe: to_strings(framework::DEDUPE),
            },
            env_prefix: to_strings(framework::ENV_PREFIX),
        };

        BuildConfig {
            command: self.resolved.command,
            target: self.resolved.target,
            build_mode: self.resolved.build_mode,
            entry_strategy: self.resolved.entry_strategy,
            debug: self.overrides.debug,
            resolve_framework_build: self.overrides.resolve_framework_build.unwrap_or(true),
            root_dir: self.root_dir,
            src_dir: self.src_dir,
            assets_dir: self.assets_dir,
            input: self.input,
            out_dir,
            bundler,
        }
    }
}

fn apply_out_dir(draft: &mut Draft<'_>) {
    let o = draft.overrides;
    let requested = match draft.target() {
        BuildTarget::Ssr => non_empty(o.ssr.out_dir.as_deref()).or(non_empty(o.build.out_dir.as_deref())),
        BuildTarget::Client => {
            non_empty(o.client.out_dir.as_deref()).or(non_empty(o.build.out_dir.as_deref()))
        }
        BuildTarget::Lib => non_empty(o.build.out_dir.as_deref()),
    };
    let out_dir = resolve_path(
        &draft.root_dir,
        requested.unwrap_or(draft.target().default_out_dir()),
    );
    debug!(%out_dir, "resolved output directory");
    draft.out_dir = Some(out_dir);
}

fn apply_input(draft: &mut Draft<'_>) {
    let o = draft.overrides;
    let src = draft.src_dir.as_str();

    let requested: Option<Vec<String>> = match draft.target() {
        BuildTarget::Ssr => o
            .build
            .ssr
            .as_ref()
            .and_then(|ssr| ssr.entry())
            .map(|entry| vec![entry.to_string()])
            .or_else(|| non_empty_input(o.ssr.input.as_ref())),
        BuildTarget::Client => non_empty_input(o.client.input.as_ref()),
        BuildTarget::Lib => non_empty_input(o.build.lib.as_ref().and_then(|lib| lib.entry.as_ref())),
    };
    let raw = requested.unwrap_or_else(|| {
        let entry = match draft.target() {
            BuildTarget::Ssr => framework::SSR_ENTRY,
            BuildTarget::Client => framework::CLIENT_ENTRY,
            BuildTarget::Lib => framework::LIB_ENTRY,
        };
        vec![join_path(src, entry)]
    });

    let mut input: Vec<String> = Vec::with_capacity(raw.len());
    for entry in raw {
        let entry = if framework::is_module_alias(&entry) {
            entry
        } else {
            resolve_path(&draft.root_dir, &entry)
        };
        if !input.contains(&entry) {
            input.push(entry);
        }
    }
    draft.input = input;

    if draft.resolved.dev_server {
        let dev_input = match non_empty(o.client.dev_input.as_deref()) {
            Some(path) => resolve_path(draft.ctx.cwd(), path),
            None => join_path(src, framework::CLIENT_DEV_ENTRY),
        };
        debug!(%dev_input, "dev server entry replaces client inputs");
        draft.rollup_input = Some(InputSpec::One(dev_input));
    }
}

fn apply_output_names(draft: &mut Draft<'_>) {
    let out_dir = draft.out_dir();
    let target = draft.target();
    let production = draft.resolved.build_mode.is_production();
    let prefix = draft
        .assets_dir
        .as_ref()
        .map(|dir| format!("{}/", dir))
        .unwrap_or_default();

    let normalize = |mut output: OutputOptions| {
        if output.asset_file_names.is_none() {
            output.asset_file_names = Some(format!("{}{}", prefix, framework::ASSET_FILE_NAMES));
        }
        if target == BuildTarget::Client {
            let chunk_names = if production {
                framework::PROD_CHUNK_FILE_NAMES
            } else {
                framework::DEV_CHUNK_FILE_NAMES
            };
            output
                .entry_file_names
                .get_or_insert_with(|| format!("{}{}", prefix, chunk_names));
            output
                .chunk_file_names
                .get_or_insert_with(|| format!("{}{}", prefix, chunk_names));
            output.format = Some(OutputFormat::Es);
        }
        if output.format == Some(OutputFormat::Cjs) && output.exports.is_none() {
            output.exports = Some("auto".to_string());
        }
        output.dir = Some(out_dir.clone());
        output
    };

    let outputs = match draft.overrides.build.rollup_options.output.clone() {
        None => OutputSpec::Single(OutputOptions::default()),
        Some(OutputSpec::Many(outputs)) if outputs.is_empty() => {
            OutputSpec::Many(vec![OutputOptions::default()])
        }
        Some(outputs) => outputs,
    };
    draft.outputs = Some(outputs.map(normalize));
}

fn apply_dynamic_import_vars(draft: &mut Draft<'_>) {
    // Dynamic import path variables are rewritten by the framework transform.
    draft.dynamic_import_vars_exclude = to_strings(framework::DYNAMIC_IMPORT_VARS_EXCLUDE);
}

fn apply_ssr_flags(draft: &mut Draft<'_>) {
    if draft.target() != BuildTarget::Ssr || !draft.resolved.is_build() {
        return;
    }
    draft.ssr = Some(true);
    draft.public_dir = Some(false);
    if draft.overrides.build.minify.is_none() && draft.resolved.build_mode.is_production() {
        draft.minify = Some(Minify::esbuild());
    }
}

fn apply_optimize_deps(draft: &mut Draft<'_>) {
    let requested = &draft.overrides.optimize_deps;

    let mut exclude = to_strings(framework::OPTIMIZE_DEPS_EXCLUDE);
    for id in &requested.exclude {
        if !exclude.contains(id) {
            exclude.push(id.clone());
        }
    }

    let include = requested.include.as_ref().map(|include| {
        include
            .iter()
            .filter(|id| !exclude.contains(id))
            .cloned()
            .collect::<Vec<_>>()
    });

    draft.optimize_deps = Some(OptimizeDeps { include, exclude });
}

fn apply_esbuild(draft: &mut Draft<'_>) {
    draft.esbuild = Some(if draft.resolved.is_build() {
        EsbuildSetting::Options(EsbuildOptions {
            log_level: "error".to_string(),
            jsx: "automatic".to_string(),
        })
    } else {
        EsbuildSetting::Disabled
    });
}

fn apply_lib(draft: &mut Draft<'_>) {
    if draft.target() == BuildTarget::Lib {
        draft.minify.get_or_insert(Minify::Flag(false));
    }
}

fn apply_resolve(draft: &mut Draft<'_>) {
    if draft.target() == BuildTarget::Client && draft.resolved.build_mode.is_production() {
        draft.conditions = vec!["min".to_string()];
    }
}

/// Assets directory to prefix client file names with, if any.
fn usable_assets_dir(target: BuildTarget, assets_dir: Option<&str>) -> Option<String> {
    if target != BuildTarget::Client {
        return None;
    }
    let dir = assets_dir?.replace('\\', "/");
    let dir = dir.trim_matches('/');
    if dir.is_empty() || dir == "." || framework::RESERVED_ASSETS_DIRS.contains(&dir) {
        return None;
    }
    Some(dir.to_string())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty_input(input: Option<&InputSpec>) -> Option<Vec<String>> {
    input
        .filter(|spec| !spec.is_empty())
        .map(|spec| spec.to_vec().into_iter().filter(|p| !p.trim().is_empty()).collect())
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
