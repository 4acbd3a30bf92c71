use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Lazily walks a corpus directory tree, yielding one base path per
/// document. Documents are located by their name-annotation files
/// (`<base>.name`); the paired free-text file is `<base>.onf`.
///
/// No ordering is guaranteed across documents.
pub struct CorpusWalker {
    pending_dirs: Vec<PathBuf>,
    entries: Option<fs::ReadDir>,
}

impl CorpusWalker {
    /// Starts a walk at `root`.
    ///
    /// # Errors
    ///
    /// Fails immediately if `root` cannot be read; a missing corpus
    /// directory is a configuration error, not an empty corpus.
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        let entries = fs::read_dir(root.as_ref())?;
        Ok(Self {
            pending_dirs: Vec::new(),
            entries: Some(entries),
        })
    }
}

impl Iterator for CorpusWalker {
    type Item = io::Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(entries) = self.entries.as_mut() else {
                let dir = self.pending_dirs.pop()?;
                match fs::read_dir(&dir) {
                    Ok(rd) => {
                        self.entries = Some(rd);
                        continue;
                    }
                    Err(e) => return Some(Err(e)),
                }
            };

            match entries.next() {
                None => {
                    self.entries = None;
                }
                Some(Err(e)) => return Some(Err(e)),
                Some(Ok(entry)) => {
                    let path = entry.path();
                    if path.is_dir() {
                        self.pending_dirs.push(path);
                    } else if path.extension().is_some_and(|ext| ext == "name") {
                        return Some(Ok(path.with_extension("")));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs::File;

    #[test]
    fn finds_name_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("bn").join("abc");
        fs::create_dir_all(&nested).unwrap();

        File::create(dir.path().join("doc1.name")).unwrap();
        File::create(dir.path().join("doc1.onf")).unwrap();
        File::create(nested.join("doc2.name")).unwrap();
        File::create(nested.join("ignore.txt")).unwrap();

        let bases: BTreeSet<PathBuf> = CorpusWalker::new(dir.path())
            .unwrap()
            .collect::<io::Result<_>>()
            .unwrap();

        let expected: BTreeSet<PathBuf> =
            [dir.path().join("doc1"), nested.join("doc2")].into_iter().collect();
        assert_eq!(bases, expected);
    }

    #[test]
    fn missing_root_fails_fast() {
        assert!(CorpusWalker::new("/nonexistent/corpus/root").is_err());
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let found: Vec<_> = CorpusWalker::new(dir.path()).unwrap().collect();
        assert!(found.is_empty());
    }
}
