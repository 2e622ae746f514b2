use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Read a file to string, replacing invalid UTF-8 sequences with the replacement character.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_to_string_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Lexically normalize a path: drop `.` components and fold `..` into its parent.
///
/// Does not touch the filesystem, so symlinks are not resolved. A `..` that
/// would climb above the root of an absolute path is dropped.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Find a readable file for `target`.
///
/// Tries, in order: `target` itself, `target` with each extension appended
/// (`./util` + `.ts`), then `target/index` with each extension when `target`
/// is a directory. Extensions include their leading dot.
#[must_use]
pub fn probe_file(target: &Path, extensions: &[String]) -> Option<PathBuf> {
    if target.is_file() {
        return Some(target.to_path_buf());
    }

    for ext in extensions {
        let with_ext = append_extension(target, ext);
        if with_ext.is_file() {
            return Some(with_ext);
        }
    }

    if target.is_dir() {
        for ext in extensions {
            let index = target.join(format!("index{ext}"));
            if index.is_file() {
                return Some(index);
            }
        }
    }

    None
}

/// Append `ext` to the final path component without replacing an existing extension.
fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(ext);
    PathBuf::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn exts() -> Vec<String> {
        vec![".ts".to_string(), ".js".to_string()]
    }

    #[test]
    fn test_read_to_string_lossy_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x48, 0x65, 0x6c, 0x6c, 0x6f, 0x80, 0x81])
            .unwrap();
        file.flush().unwrap();

        let content = read_to_string_lossy(file.path()).unwrap();
        assert!(content.starts_with("Hello"));
        assert!(content.contains('\u{FFFD}'));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/abs/path/to/../src/./index.ts")),
            PathBuf::from("/abs/path/src/index.ts")
        );
        assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize_path(Path::new("a/../../b")), PathBuf::from("../b"));
    }

    #[test]
    fn test_probe_exact_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("util.ts");
        fs::write(&file, "export {}").unwrap();

        assert_eq!(probe_file(&file, &exts()), Some(file));
    }

    #[test]
    fn test_probe_appends_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("util.js"), "").unwrap();
        fs::write(dir.path().join("util.ts"), "").unwrap();

        // Extension order decides
        assert_eq!(
            probe_file(&dir.path().join("util"), &exts()),
            Some(dir.path().join("util.ts"))
        );
    }

    #[test]
    fn test_probe_keeps_existing_dot() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("button.vue.ts"), "").unwrap();

        assert_eq!(
            probe_file(&dir.path().join("button.vue"), &exts()),
            Some(dir.path().join("button.vue.ts"))
        );
    }

    #[test]
    fn test_probe_directory_index() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("index.js"), "").unwrap();

        assert_eq!(probe_file(&src, &exts()), Some(src.join("index.js")));
    }

    #[test]
    fn test_probe_missing() {
        let dir = tempdir().unwrap();
        assert!(probe_file(&dir.path().join("nope"), &exts()).is_none());
        // A directory without an index file is not a module
        assert!(probe_file(dir.path(), &exts()).is_none());
    }
}
