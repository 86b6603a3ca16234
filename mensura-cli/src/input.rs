//! Collecting input documents from files and directories

use mensura::Result;
use mensura_plugin::ContentKind;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One file to process, with the path it takes under the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub source: PathBuf,
    pub relative: PathBuf,
    pub kind: ContentKind,
}

/// Expand files and directories into documents, directories walked recursively
///
/// Files given directly keep only their file name as relative path; files found
/// in a directory keep their path below that directory.
pub fn collect(paths: &[PathBuf]) -> Result<Vec<Document>> {
    let mut documents = Vec::new();

    for path in paths {
        if path.is_dir() {
            walk(path, path, &mut documents)?;
        } else {
            let relative = path.file_name().map(PathBuf::from).unwrap_or_else(|| path.clone());
            documents.push(document(path.clone(), relative));
        }
    }

    Ok(documents)
}

/// Symlinked directories are skipped; symlinked files are kept
fn walk(root: &Path, dir: &Path, documents: &mut Vec<Document>) -> Result<()> {
    let mut entries: Vec<(PathBuf, fs::FileType)> = fs::read_dir(dir)?
        .map(|entry| entry.and_then(|e| Ok((e.path(), e.file_type()?))))
        .collect::<std::io::Result<_>>()?;
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (path, file_type) in entries {
        if file_type.is_dir() {
            walk(root, &path, documents)?;
        } else if file_type.is_symlink() && path.is_dir() {
            debug!(path = %path.display(), "skipping symlinked directory");
        } else {
            let relative = path.strip_prefix(root).map(Path::to_path_buf).unwrap_or_else(|_| path.clone());
            documents.push(document(path, relative));
        }
    }
    Ok(())
}

fn document(source: PathBuf, relative: PathBuf) -> Document {
    let kind = ContentKind::from_path(&source);
    Document { source, relative, kind }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mensura-input-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("posts/2024")).unwrap();
        dir
    }

    #[test]
    fn test_collect_walks_directories() {
        let dir = scratch_dir("walk");
        fs::write(dir.join("index.md"), "# hi").unwrap();
        fs::write(dir.join("posts/2024/run.md"), "{unit: 5 km}").unwrap();
        fs::write(dir.join("posts/logo.png"), [0u8, 1, 2]).unwrap();

        let docs = collect(&[dir.clone()]).unwrap();
        let relative: Vec<_> = docs.iter().map(|d| d.relative.clone()).collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("index.md"),
                PathBuf::from("posts/2024/run.md"),
                PathBuf::from("posts/logo.png"),
            ]
        );
        assert_eq!(docs[2].kind, ContentKind::Static);
        assert_eq!(docs[1].kind, ContentKind::Article);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_collect_single_file() {
        let dir = scratch_dir("single");
        let file = dir.join("posts/2024/run.md");
        fs::write(&file, "x").unwrap();

        let docs = collect(&[file.clone()]).unwrap();
        assert_eq!(docs, vec![Document { source: file, relative: PathBuf::from("run.md"), kind: ContentKind::Article }]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_skips_symlinked_directories() {
        use std::os::unix::fs::symlink;

        let dir = scratch_dir("symlink");
        fs::write(dir.join("index.md"), "# hi").unwrap();
        fs::write(dir.join("posts/2024/run.md"), "{unit: 5 km}").unwrap();
        symlink(&dir, dir.join("posts/loop")).unwrap();
        symlink(dir.join("index.md"), dir.join("alias.md")).unwrap();

        let docs = collect(&[dir.clone()]).unwrap();
        let relative: Vec<_> = docs.iter().map(|d| d.relative.clone()).collect();
        assert_eq!(
            relative,
            vec![PathBuf::from("alias.md"), PathBuf::from("index.md"), PathBuf::from("posts/2024/run.md")]
        );

        fs::remove_dir_all(&dir).unwrap();
    }
}
