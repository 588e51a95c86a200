//! Project root resolution

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::compdb::make_absolute_path;

/// Resolve the `--root` argument to an absolute path. Without one the
/// current working directory is the project root.
pub fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    let cwd = env::current_dir().context("could not determine the current directory")?;
    Ok(match root {
        Some(root) => make_absolute_path(&cwd, root),
        None => cwd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_root_is_cwd() {
        assert_eq!(resolve_root(None).unwrap(), env::current_dir().unwrap());
    }

    #[test]
    fn test_absolute_root_is_normalized() {
        let root = resolve_root(Some(Path::new("/tmp/proj/../other/"))).unwrap();
        assert_eq!(root, PathBuf::from("/tmp/other"));
    }

    #[test]
    fn test_relative_root_joins_cwd() {
        let root = resolve_root(Some(Path::new("sub/dir"))).unwrap();
        assert_eq!(root, env::current_dir().unwrap().join("sub/dir"));
    }
}
