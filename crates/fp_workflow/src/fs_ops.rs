// crates/fp_workflow/src/fs_ops.rs

//! 文件系统操作
//!
//! 语义与 `rm -rf`、`mkdir -p`、`cp -r src/. dst` 一致：
//! 删除不存在的目录视为成功，创建已存在的目录视为成功，复制时覆盖同名文件。

use std::io;
use std::path::Path;

/// 递归删除目录，返回是否确实删除了内容
pub fn remove_dir(path: &Path) -> io::Result<bool> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => {
            std::fs::remove_dir_all(path)?;
            Ok(true)
        }
        Ok(_) => {
            std::fs::remove_file(path)?;
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// 递归创建目录
pub fn create_dir(path: &Path) -> io::Result<()> {
    std::fs::create_dir_all(path)
}

/// 将 `from` 目录下的全部内容递归复制到 `to`，返回复制的文件数
///
/// `to` 不存在时自动创建；`from` 不存在或不是目录时返回 `NotFound`，
/// `to` 位于 `from` 之内时返回 `InvalidInput`。符号链接按链接本身复制。
pub fn copy_dir_contents(from: &Path, to: &Path) -> io::Result<usize> {
    if !from.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("template directory not found: {}", from.display()),
        ));
    }
    if to.starts_with(from) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} lies inside the template {}", to.display(), from.display()),
        ));
    }

    std::fs::create_dir_all(to)?;

    let mut copied = 0;
    for entry in std::fs::read_dir(from)? {
        let entry = entry?;
        let src = entry.path();
        let dst = to.join(entry.file_name());

        let file_type = entry.file_type()?;
        if file_type.is_symlink() {
            copy_symlink(&src, &dst)?;
            copied += 1;
        } else if file_type.is_dir() {
            copied += copy_dir_contents(&src, &dst)?;
        } else {
            std::fs::copy(&src, &dst)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// 复制符号链接本身，覆盖已有目标
#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    let target = std::fs::read_link(src)?;
    remove_dir(dst)?;
    std::os::unix::fs::symlink(target, dst)
}

/// 无符号链接语义的平台上复制链接指向的内容
#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    if src.is_dir() {
        copy_dir_contents(src, dst).map(|_| ())
    } else {
        std::fs::copy(src, dst).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_missing_dir_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!remove_dir(&dir.path().join("constant/polyMesh")).unwrap());
    }

    #[test]
    fn test_remove_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mesh = dir.path().join("constant/polyMesh");
        std::fs::create_dir_all(&mesh).unwrap();
        std::fs::write(mesh.join("points"), "()").unwrap();

        assert!(remove_dir(&mesh).unwrap());
        assert!(!mesh.exists());
        assert!(dir.path().join("constant").exists());
    }

    #[test]
    fn test_create_existing_dir_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("0");
        create_dir(&state).unwrap();
        create_dir(&state).unwrap();
        assert!(state.is_dir());
    }

    #[test]
    fn test_copy_nested_contents() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("0.orig");
        std::fs::create_dir_all(template.join("include")).unwrap();
        std::fs::write(template.join("U"), "uniform (0 0 0)").unwrap();
        std::fs::write(template.join("include/boundary"), "inlet {}").unwrap();

        let state = dir.path().join("0");
        std::fs::create_dir_all(&state).unwrap();
        std::fs::write(state.join("U"), "stale").unwrap();

        let copied = copy_dir_contents(&template, &state).unwrap();
        assert_eq!(copied, 2);
        assert_eq!(std::fs::read_to_string(state.join("U")).unwrap(), "uniform (0 0 0)");
        assert!(state.join("include/boundary").is_file());
    }

    #[test]
    fn test_copy_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_dir_contents(&dir.path().join("0.orig"), &dir.path().join("0")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_copy_into_template_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("0.orig");
        std::fs::create_dir_all(&template).unwrap();
        std::fs::write(template.join("U"), "uniform (0 0 0)").unwrap();

        let err = copy_dir_contents(&template, &template.join("0")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(!template.join("0").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_keeps_directory_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let shared = dir.path().join("shared");
        std::fs::create_dir_all(&shared).unwrap();
        std::fs::write(shared.join("T"), "uniform 300").unwrap();

        let template = dir.path().join("0.orig");
        std::fs::create_dir_all(&template).unwrap();
        std::os::unix::fs::symlink(&shared, template.join("include")).unwrap();

        let state = dir.path().join("0");
        assert_eq!(copy_dir_contents(&template, &state).unwrap(), 1);
        // 再次复制覆盖已有链接
        assert_eq!(copy_dir_contents(&template, &state).unwrap(), 1);

        let link = state.join("include");
        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_link(&link).unwrap(), shared);
        assert!(link.join("T").is_file());
    }
}
