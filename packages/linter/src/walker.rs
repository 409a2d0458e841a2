//! Directory traversal for input documents.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Check if a path has the given extension (without the dot).
#[must_use]
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

/// Find all documents with `extension` below `root`, sorted by file name.
///
/// Unreadable directories show up as `Err` items and do not stop the walk.
/// A `root` that is itself a matching file yields just that file.
pub fn find_documents<'a>(
    root: &Path,
    extension: &'a str,
) -> impl Iterator<Item = Result<PathBuf>> + 'a {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => {
                (entry.file_type().is_file() && has_extension(entry.path(), extension))
                    .then(|| Ok(entry.into_path()))
            }
            Err(e) => Some(Err(e.into())),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("m1/index.cnxml"), "cnxml"));
        assert!(!has_extension(Path::new("m1/index.cnxml.bak"), "cnxml"));
        assert!(!has_extension(Path::new("m1/cnxml"), "cnxml"));
    }

    #[test]
    fn test_find_documents_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b/nested")).unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("b/nested/z.cnxml"), "<document/>").unwrap();
        fs::write(dir.path().join("b/index.cnxml"), "<document/>").unwrap();
        fs::write(dir.path().join("a/index.cnxml"), "<document/>").unwrap();
        fs::write(dir.path().join("a/notes.txt"), "skip").unwrap();

        let found: Vec<PathBuf> = find_documents(dir.path(), "cnxml")
            .map(|r| r.unwrap().strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            found,
            vec![
                PathBuf::from("a/index.cnxml"),
                PathBuf::from("b/index.cnxml"),
                PathBuf::from("b/nested/z.cnxml"),
            ]
        );
    }

    #[test]
    fn test_find_documents_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("only.cnxml");
        fs::write(&file, "<document/>").unwrap();

        let found: Vec<PathBuf> = find_documents(&file, "cnxml").map(|r| r.unwrap()).collect();
        assert_eq!(found, vec![file]);
    }

    #[test]
    fn test_find_documents_missing_root() {
        let results: Vec<_> = find_documents(Path::new("/nonexistent/dir"), "cnxml").collect();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
