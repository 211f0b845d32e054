//! Spec source tree scanning

use std::ffi::OsStr;
use std::path::Path;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::SpecMatcher;
use crate::error::{SpecsError, SpecsResult};
use crate::models::TestFile;

/// Cheap probe: does at least one `*.<extension>` file exist under `spec_root`?
///
/// Stops at the first hit. Missing or unreadable trees count as "no".
pub fn applies_to(spec_root: impl AsRef<Path>, extension: &str) -> bool {
    WalkDir::new(spec_root.as_ref())
        .into_iter()
        .filter_map(Result::ok)
        .any(|entry| is_file(&entry) && entry.path().extension() == Some(OsStr::new(extension)))
}

/// Regular file, or a symlink that resolves to one
fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

/// Enumerate spec files under `spec_root` in lexicographic order.
///
/// A missing root yields no tests. Any unreadable directory aborts discovery,
/// including a root that is a dangling symlink.
pub fn discover(spec_root: impl AsRef<Path>, matcher: &SpecMatcher) -> SpecsResult<Vec<TestFile>> {
    let spec_root = spec_root.as_ref();
    if std::fs::symlink_metadata(spec_root).is_err() {
        debug!("Spec root {} does not exist", spec_root.display());
        return Ok(Vec::new());
    }

    let mut tests = Vec::new();
    for entry in WalkDir::new(spec_root).sort_by_file_name() {
        let entry = entry.map_err(|source| SpecsError::Discovery {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| spec_root.to_path_buf()),
            source,
        })?;

        if is_file(&entry) && matcher.matches(entry.path()) {
            debug!("Discovered {}", entry.path().display());
            tests.push(TestFile::new(entry.into_path()));
        }
    }

    Ok(tests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "object X").unwrap();
    }

    fn matcher() -> SpecMatcher {
        SpecMatcher::default_patterns().unwrap()
    }

    #[test]
    fn test_probe_empty_tree() {
        let dir = tempdir().unwrap();
        assert!(!applies_to(dir.path(), "scala"));
        assert!(!applies_to(dir.path().join("missing"), "scala"));
    }

    #[test]
    fn test_probe_ignores_other_extensions() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "a/README.md");
        assert!(!applies_to(dir.path(), "scala"));
    }

    #[test]
    fn test_probe_any_scala_file() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "a/b/Helper.scala");
        assert!(applies_to(dir.path(), "scala"));

        for i in 0..20 {
            touch(dir.path(), &format!("c/Gen{i}Spec.scala"));
        }
        assert!(applies_to(dir.path(), "scala"));
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "b/ZSpec.scala");
        touch(dir.path(), "a/CSpec.scala");
        touch(dir.path(), "a/Helper.scala");
        touch(dir.path(), "ASpec.scala");
        touch(dir.path(), "a/b/DSpec.scala");

        let found: Vec<_> = discover(dir.path(), &matcher())
            .unwrap()
            .into_iter()
            .map(|t| t.path().strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        let expected: Vec<std::path::PathBuf> = vec![
            "ASpec.scala".into(),
            "a/CSpec.scala".into(),
            "a/b/DSpec.scala".into(),
            "b/ZSpec.scala".into(),
        ];
        assert_eq!(found, expected);
    }

    #[test]
    fn test_discover_is_idempotent() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "x/OneSpec.scala");
        touch(dir.path(), "y/TwoSpec.scala");
        touch(dir.path(), "ThreeSpec.scala");

        let first = discover(dir.path(), &matcher()).unwrap();
        let second = discover(dir.path(), &matcher()).unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_discover_missing_root() {
        let dir = tempdir().unwrap();
        let tests = discover(dir.path().join("src/spec/scala"), &matcher()).unwrap();
        assert!(tests.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_unreadable_directory_is_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        touch(dir.path(), "locked/ASpec.scala");
        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores permission bits, so this half only runs unprivileged
        let readable = fs::read_dir(&locked).is_ok();
        let result = discover(dir.path(), &matcher());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if !readable {
            assert!(matches!(result, Err(SpecsError::Discovery { .. })));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_dangling_root_is_fatal() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("scala");
        std::os::unix::fs::symlink(dir.path().join("gone"), &root).unwrap();

        match discover(&root, &matcher()) {
            Err(SpecsError::Discovery { path, .. }) => assert_eq!(path, root),
            other => panic!("expected discovery error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_follows_file_symlinks() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "shared/Common.scala");
        touch(dir.path(), "root/a/RealSpec.scala");
        std::os::unix::fs::symlink(
            dir.path().join("shared/Common.scala"),
            dir.path().join("root/a/LinkedSpec.scala"),
        )
        .unwrap();

        let names: Vec<_> = discover(dir.path().join("root"), &matcher())
            .unwrap()
            .iter()
            .map(TestFile::file_name)
            .collect();
        assert_eq!(names, vec!["LinkedSpec.scala", "RealSpec.scala"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_applies_to_follows_file_symlinks() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "shared/Common.scala");
        fs::create_dir_all(dir.path().join("root/a")).unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("shared/Common.scala"),
            dir.path().join("root/a/LinkedSpec.scala"),
        )
        .unwrap();

        assert!(applies_to(dir.path().join("root"), "scala"));

        // dangling links do not count
        let empty = dir.path().join("empty");
        fs::create_dir_all(&empty).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.scala"), empty.join("GoneSpec.scala"))
            .unwrap();
        assert!(!applies_to(&empty, "scala"));
    }
}
