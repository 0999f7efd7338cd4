use std::path::PathBuf;

/// Resolves the project root the server runs in.
///
/// An explicit path (normally from the CLI) wins; a relative one is anchored
/// at the current directory. Without an explicit path the current directory
/// itself is the root. Returns `None` when no root can be determined, which
/// the supervisor reports as a missing workspace.
pub fn find_project_root(explicit: Option<PathBuf>) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok();
    match explicit {
        Some(path) if path.is_absolute() => Some(path),
        Some(path) => cwd.map(|base| base.join(path)),
        None => cwd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn explicit_absolute_root_is_kept() {
        let root = find_project_root(Some(PathBuf::from("/proj"))).unwrap();
        assert_eq!(root, Path::new("/proj"));
    }

    #[test]
    fn explicit_relative_root_is_anchored_at_cwd() {
        let root = find_project_root(Some(PathBuf::from("datapacks"))).unwrap();

        assert!(root.is_absolute());
        assert!(root.ends_with("datapacks"));
    }

    #[test]
    fn defaults_to_current_dir() {
        let root = find_project_root(None).unwrap();
        assert_eq!(root, std::env::current_dir().unwrap());
    }
}
