use lode_config::{BuildTarget, EntryStrategy};

/// Parse an explicit build target.
///
/// Accepts `client`, `ssr` (or `server`) and `lib` (or `library`), in any case.
///
/// # Errors
///
/// Returns an error message naming the unknown target.
pub fn parse_target(s: &str) -> Result<BuildTarget, String> {
    s.trim().parse()
}

/// Parse an entry strategy name (`segment`, `smart`, `hoist`, `inline`, `single`).
///
/// # Errors
///
/// Returns an error message naming the unknown strategy.
pub fn parse_entry_strategy(s: &str) -> Result<EntryStrategy, String> {
    s.trim().parse()
}
