// crates/fp_mesh/src/patch_type.rs

//! 改写已有 blockMeshDict 中指定 patch 的 `type` 条目
//!
//! 只识别 patch 名称独占一行、下一非空行以 `{` 开头的写法。

use std::path::Path;

use fp_config::{is_dict_word, ConfigError};

use crate::error::{MeshError, MeshResult};

/// 在文本中改写 patch 类型，返回新文本与是否发生改写
pub fn rewrite_patch_type(text: &str, patch: &str, patch_type: &str) -> (String, bool) {
    let mut in_patch = false;
    let mut seen_name = false;
    let mut changed = false;
    let mut out = String::with_capacity(text.len());

    for line in text.split_inclusive('\n') {
        let stripped = line.trim();

        if !in_patch {
            if stripped == patch {
                seen_name = true;
            } else if seen_name && stripped.starts_with('{') {
                in_patch = true;
                seen_name = false;
            } else if !stripped.is_empty() {
                seen_name = false;
            }
        }

        if in_patch && stripped.starts_with("type") {
            let indent = &line[..line.find("type").unwrap_or(0)];
            let ending = if line.ends_with("\r\n") {
                "\r\n"
            } else if line.ends_with('\n') {
                "\n"
            } else {
                ""
            };
            out.push_str(indent);
            out.push_str("type ");
            out.push_str(patch_type);
            out.push(';');
            out.push_str(ending);
            changed = true;
        } else {
            out.push_str(line);
        }

        if in_patch && stripped.starts_with('}') {
            in_patch = false;
        }
    }

    (out, changed)
}

/// 改写文件中的 patch 类型
///
/// 文件未包含该 patch 的 `type` 条目时返回 [`MeshError::PatchNotFound`]，文件保持不变。
pub fn enforce_patch_type(path: &Path, patch: &str, patch_type: &str) -> MeshResult<()> {
    if !is_dict_word(patch_type) {
        let reason = "patch types must be non-empty words";
        return Err(ConfigError::invalid("patch_type", patch_type, reason).into());
    }

    let text = std::fs::read_to_string(path)?;
    let (updated, changed) = rewrite_patch_type(&text, patch, patch_type);

    if !changed {
        return Err(MeshError::PatchNotFound {
            patch: patch.to_string(),
            patch_type: patch_type.to_string(),
            path: path.to_path_buf(),
        });
    }

    if updated != text {
        std::fs::write(path, updated)?;
        tracing::debug!("Patch '{}' set to type '{}' in {}", patch, patch_type, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "boundary\n(\n    inlet\n    {\n        type patch;\n        faces ((0 1 2 3));\n    }\n    symmetryPlane\n    {\n        type patch;\n        faces ((4 5 6 7));\n    }\n);\n";

    #[test]
    fn test_rewrite_only_named_patch() {
        let (out, changed) = rewrite_patch_type(SAMPLE, "symmetryPlane", "symmetry");
        assert!(changed);
        assert!(out.contains("    inlet\n    {\n        type patch;"));
        assert!(out.contains("    symmetryPlane\n    {\n        type symmetry;"));
        assert_eq!(out.lines().count(), SAMPLE.lines().count());
    }

    #[test]
    fn test_missing_patch_is_reported() {
        let (out, changed) = rewrite_patch_type(SAMPLE, "outlet", "patch");
        assert!(!changed);
        assert_eq!(out, SAMPLE);
    }

    #[test]
    fn test_enforce_on_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blockMeshDict");
        std::fs::write(&path, SAMPLE).unwrap();

        enforce_patch_type(&path, "inlet", "wall").unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("    inlet\n    {\n        type wall;"));

        let err = enforce_patch_type(&path, "nope", "wall").unwrap_err();
        assert!(matches!(err, MeshError::PatchNotFound { .. }));

        let err = enforce_patch_type(&path, "inlet", "wall; }").unwrap_err();
        assert!(matches!(err, MeshError::Config(_)));
        assert!(std::fs::read_to_string(&path).unwrap().contains("type wall;\n"));
    }
}
