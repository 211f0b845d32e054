//! Path to unit identifier mapping

use std::path::{Component, Path};

use crate::error::{SpecsError, SpecsResult};
use crate::models::TestUnit;

/// Separator between namespace segments of a unit identifier
const NAMESPACE_SEPARATOR: &str = ".";

/// Map a spec file under `source_root` to its fully-qualified unit.
///
/// `src/spec/scala/a/b/CSpec.scala` under `src/spec/scala` becomes `a.b.CSpec`.
pub fn resolve(path: impl AsRef<Path>, source_root: impl AsRef<Path>) -> SpecsResult<TestUnit> {
    let path = path.as_ref();
    let relative = path
        .strip_prefix(source_root.as_ref())
        .map_err(|_| SpecsError::resolution(path, "not under the spec source root"))?;

    let stem = relative
        .file_stem()
        .ok_or_else(|| SpecsError::resolution(path, "no file name"))?;

    let mut segments = Vec::new();
    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            match component {
                Component::Normal(part) => segments.push(part),
                _ => return Err(SpecsError::resolution(path, "unexpected path component")),
            }
        }
    }
    segments.push(stem);

    let segments = segments
        .into_iter()
        .map(|segment| {
            let segment = segment
                .to_str()
                .ok_or_else(|| SpecsError::resolution(path, "path is not valid UTF-8"))?;
            if segment.is_empty() {
                return Err(SpecsError::resolution(path, "empty path segment"));
            }
            if segment.contains(NAMESPACE_SEPARATOR) {
                return Err(SpecsError::resolution(
                    path,
                    format!("segment '{segment}' contains '{NAMESPACE_SEPARATOR}'"),
                ));
            }
            Ok(segment)
        })
        .collect::<SpecsResult<Vec<_>>>()?;

    Ok(TestUnit::new(segments.join(NAMESPACE_SEPARATOR)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_unit() {
        let unit = resolve("src/spec/lang/a/b/CSpec.ext", "src/spec/lang").unwrap();
        assert_eq!(unit, "a.b.CSpec");
    }

    #[test]
    fn test_top_level_unit() {
        let unit = resolve("/p/src/spec/scala/FooSpec.scala", "/p/src/spec/scala").unwrap();
        assert_eq!(unit, "FooSpec");
    }

    #[test]
    fn test_root_with_trailing_separator() {
        let unit = resolve("src/spec/scala/x/YSpec.scala", "src/spec/scala/").unwrap();
        assert_eq!(unit, "x.YSpec");
    }

    #[test]
    fn test_outside_root() {
        let err = resolve("src/main/scala/a/ASpec.scala", "src/spec/scala").unwrap_err();
        assert!(matches!(err, SpecsError::Resolution { .. }));
    }

    #[test]
    fn test_double_extension_rejected() {
        assert!(resolve("src/spec/scala/a/ASpec.test.scala", "src/spec/scala").is_err());
    }

    #[test]
    fn test_dotted_directory_rejected() {
        assert!(resolve("src/spec/scala/a.b/ASpec.scala", "src/spec/scala").is_err());
    }

    #[test]
    fn test_root_itself_rejected() {
        assert!(resolve("src/spec/scala", "src/spec/scala").is_err());
    }
}
