//! Lexical path utilities.
//!
//! Nothing here touches the filesystem: paths are folded textually so the
//! results are deterministic for files that don't exist (yet).

use std::path::{Component, Path, PathBuf};

/// Folds `.` and `..` components without consulting the filesystem.
///
/// Leading `..` components of a relative path are preserved; `..` directly
/// under the root of an absolute path is dropped.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize(Path::new("./src/../lib/x.ts")), PathBuf::from("lib/x.ts"));
/// ```
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}

/// Expresses `path` relative to `root`, the way `path.relative` does in
/// Node: `root` itself maps to the empty path and paths outside `root` gain
/// leading `..` components.
///
/// Relative `path`s are taken to be relative to `root`.
#[must_use]
pub fn relative_to(root: &Path, path: &Path) -> PathBuf {
    let root = normalize(root);
    let target = normalize(&root.join(path));

    // Mixed absolute/relative inputs share nothing; keep the target as given.
    if root.has_root() != target.has_root() {
        return target;
    }

    let root_parts: Vec<Component<'_>> = root.components().collect();
    let target_parts: Vec<Component<'_>> = target.components().collect();

    let common = root_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..root_parts.len() {
        out.push("..");
    }
    for part in &target_parts[common..] {
        out.push(part.as_os_str());
    }
    out
}
