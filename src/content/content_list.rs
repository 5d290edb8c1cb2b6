use std::{fs, io};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use spdlog::warn;

pub const CONTENT_EXTENSION: &str = "md";
pub const INDEX_FILE: &str = "index.md";

/// A content file and the identifier derived from its location.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPath {
    pub slug: String,
    pub path: PathBuf,
}

/// Enumerates the records of one content directory.
///
/// A record is either a `<slug>.md` file or a `<slug>/index.md` bundle.
pub struct ContentList {
    pub root_dir: PathBuf,
    pub index_file: String,
}

impl ContentList {
    pub fn new(root_dir: &Path) -> Self {
        ContentList {
            root_dir: root_dir.to_path_buf(),
            index_file: INDEX_FILE.to_string(),
        }
    }

    /// Content files sorted by path. A missing directory has no content.
    pub fn retrieve(&self) -> io::Result<Vec<ContentPath>> {
        let mut paths = self.retrieve_files()?;
        paths.extend(self.retrieve_dirs()?);
        paths.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(paths)
    }

    /// Latest modification time across the directory, its files and bundles.
    pub fn last_modified(&self) -> io::Result<Option<SystemTime>> {
        let dir_meta = match fs::metadata(&self.root_dir) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        let mut latest = dir_meta.modified()?;
        for entry in fs::read_dir(&self.root_dir)? {
            let Ok(entry) = entry else { continue };
            let Ok(meta) = entry.metadata() else { continue };

            if meta.is_file() && Self::is_content_file(&entry.path()) {
                latest = latest.max(meta.modified()?);
            } else if meta.is_dir() {
                let index = entry.path().join(&self.index_file);
                if let Ok(index_meta) = fs::metadata(&index) {
                    latest = latest.max(meta.modified()?).max(index_meta.modified()?);
                }
            }
        }
        Ok(Some(latest))
    }

    fn read_dir(&self) -> io::Result<Option<fs::ReadDir>> {
        match fs::read_dir(&self.root_dir) {
            Ok(entries) => Ok(Some(entries)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn retrieve_files(&self) -> io::Result<Vec<ContentPath>> {
        let mut files = vec![];
        let Some(entries) = self.read_dir()? else {
            return Ok(files);
        };

        for entry in entries.flatten() {
            let Ok(file_type) = entry.file_type() else { continue };
            if !file_type.is_file() {
                continue;
            }
            let path = entry.path();
            if !Self::is_content_file(&path) {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(slug) => files.push(ContentPath {
                    slug: slug.to_string(),
                    path: path.clone(),
                }),
                None => warn!("Skipping {}: file name is not valid UTF-8", path.display()),
            }
        }
        Ok(files)
    }

    fn retrieve_dirs(&self) -> io::Result<Vec<ContentPath>> {
        let mut bundles = vec![];
        let Some(entries) = self.read_dir()? else {
            return Ok(bundles);
        };

        for entry in entries.flatten() {
            let Ok(file_type) = entry.file_type() else { continue };
            if !file_type.is_dir() {
                continue;
            }
            let index = entry.path().join(&self.index_file);
            if !index.is_file() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(slug) => bundles.push(ContentPath {
                    slug: slug.to_string(),
                    path: index,
                }),
                None => warn!("Skipping {}: directory name is not valid UTF-8", entry.path().display()),
            }
        }
        Ok(bundles)
    }

    fn is_content_file(path: &Path) -> bool {
        let hidden = path.file_name()
            .map(|n| n.to_string_lossy().starts_with('.'))
            .unwrap_or(true);
        !hidden && path.extension().and_then(|e| e.to_str()) == Some(CONTENT_EXTENSION)
    }
}
