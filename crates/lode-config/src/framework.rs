//! Module ids owned by the framework runtime.
//!
//! These are resolved by the framework's own transform and must never be
//! pre-bundled or externalized by the host bundler.

pub const CORE_ID: &str = "@qwik.dev/core";
pub const CORE_SERVER_ID: &str = "@qwik.dev/core/server";
pub const JSX_RUNTIME_ID: &str = "@qwik.dev/core/jsx-runtime";
pub const JSX_DEV_RUNTIME_ID: &str = "@qwik.dev/core/jsx-dev-runtime";
pub const BUILD_ID: &str = "@qwik.dev/core/build";
pub const CLIENT_MANIFEST_ID: &str = "@qwik-client-manifest";
pub const ROUTER_ID: &str = "@qwik.dev/city";

/// Dependency pre-bundling exclusions, in emission order.
pub const OPTIMIZE_DEPS_EXCLUDE: &[&str] = &[
    "@vite/client",
    "@vite/env",
    "node-fetch",
    "undici",
    CORE_ID,
    CORE_SERVER_ID,
    JSX_RUNTIME_ID,
    JSX_DEV_RUNTIME_ID,
    BUILD_ID,
    CLIENT_MANIFEST_ID,
    ROUTER_ID,
];

/// Packages that must be bundled into the SSR output.
pub const SSR_NO_EXTERNAL: &[&str] = &[CORE_ID, CORE_SERVER_ID, BUILD_ID, ROUTER_ID];

/// Packages the resolver must load exactly once.
pub const DEDUPE: &[&str] = &[CORE_ID, JSX_RUNTIME_ID, JSX_DEV_RUNTIME_ID];

pub const ENV_PREFIX: &[&str] = &["VITE_", "PUBLIC_"];

/// Asset directories owned by other tools.
pub const RESERVED_ASSETS_DIRS: &[&str] = &["_astro"];

pub const CLIENT_ENTRY: &str = "root";
pub const CLIENT_DEV_ENTRY: &str = "entry.dev";
pub const SSR_ENTRY: &str = "entry.ssr";
pub const LIB_ENTRY: &str = "index.ts";

pub const ASSET_FILE_NAMES: &str = "assets/[hash]-[name].[ext]";
pub const PROD_CHUNK_FILE_NAMES: &str = "build/q-[hash].js";
pub const DEV_CHUNK_FILE_NAMES: &str = "build/[name].js";

/// Regex sources matching every dynamic import path variable.
pub const DYNAMIC_IMPORT_VARS_EXCLUDE: &[&str] = &["."];

/// Whether `id` is a bare specifier or alias rather than a file path.
pub fn is_module_alias(id: &str) -> bool {
    id.starts_with('@') || id.starts_with('~') || id.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_are_not_paths() {
        assert!(is_module_alias("@app/entry"));
        assert!(is_module_alias("~/entry"));
        assert!(is_module_alias("#entry"));
        assert!(!is_module_alias("./src/entry.ssr"));
    }

    #[test]
    fn exclusions_cover_framework_ids() {
        for id in [CORE_ID, BUILD_ID, CLIENT_MANIFEST_ID] {
            assert!(OPTIMIZE_DEPS_EXCLUDE.contains(&id));
        }
    }
}
