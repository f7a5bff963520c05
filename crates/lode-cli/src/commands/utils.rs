use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::Result;

/// Resolve a user-supplied path against the process working directory.
pub(crate) fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

pub(crate) fn render_json(value: &Value, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_compact_and_pretty() {
        let value = json!({ "a": [1, 2] });
        assert_eq!(render_json(&value, false).unwrap(), r#"{"a":[1,2]}"#);
        assert!(render_json(&value, true).unwrap().contains('\n'));
    }

    #[test]
    fn absolute_keeps_absolute_paths() {
        let dir = tempfile::TempDir::new().unwrap();
        assert_eq!(absolute(dir.path()).unwrap(), dir.path());
        assert!(absolute(Path::new("relative")).unwrap().is_absolute());
    }
}
