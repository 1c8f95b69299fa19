//! Path normalization utilities
//!
//! Stylesheet references and identifiers are always rendered with '/' as
//! separator. Resolution is purely lexical: nothing here touches the
//! filesystem.

use path_clean::PathClean;
use std::path::{Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Normalize an identifier string to use '/' as separator
pub fn normalize_id(id: &str) -> String {
    id.replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Resolve `path` against `base`, collapsing `.` and `..` lexically.
/// Absolute paths ignore `base`; `..` at the filesystem root is dropped.
pub fn resolve_from(base: &Path, path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        candidate.clean()
    } else {
        base.join(candidate).clean()
    }
}

/// Make `path` absolute against the process working directory.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.clean())
    } else {
        Ok(std::env::current_dir()?.join(path).clean())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        let path = Path::new("src/main.css");
        assert_eq!(normalize_path(path), "src/main.css");
    }

    #[test]
    fn test_normalize_id_backslashes() {
        assert_eq!(
            normalize_id(r"C:\proj\App.vue?vue&type=style"),
            "C:/proj/App.vue?vue&type=style"
        );
    }

    #[test]
    fn test_make_relative() {
        let root = Path::new("/project");
        let path = Path::new("/project/src/index.css");
        assert_eq!(make_relative(path, root), Some("src/index.css".to_string()));
    }

    #[test]
    fn test_make_relative_not_under_root() {
        let root = Path::new("/project");
        let path = Path::new("/other/file.css");
        assert_eq!(make_relative(path, root), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_relative_dot() {
        let resolved = resolve_from(Path::new("/proj"), "./src/index.css");
        assert_eq!(normalize_path(&resolved), "/proj/src/index.css");
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_parent_segments() {
        let resolved = resolve_from(Path::new("/proj/app"), "../shared/./theme.css");
        assert_eq!(normalize_path(&resolved), "/proj/shared/theme.css");
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_absolute_ignores_base() {
        let resolved = resolve_from(Path::new("/proj"), "/styles/main.css");
        assert_eq!(normalize_path(&resolved), "/styles/main.css");
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_parent_past_root() {
        let resolved = resolve_from(Path::new("/proj"), "/../a.css");
        assert_eq!(normalize_path(&resolved), "/a.css");
        let resolved = resolve_from(Path::new("/"), "../../a.css");
        assert_eq!(normalize_path(&resolved), "/a.css");
    }

    #[test]
    fn test_resolve_relative_base_keeps_leading_parent() {
        let resolved = resolve_from(Path::new("rel"), "../../a/./b");
        assert_eq!(normalize_path(&resolved), "../a/b");
    }

    #[test]
    fn test_absolutize_relative() {
        let abs = absolutize(Path::new("some/dir")).unwrap();
        assert!(abs.is_absolute());
        assert!(normalize_path(&abs).ends_with("some/dir"));
    }
}
