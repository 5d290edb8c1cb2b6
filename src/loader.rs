use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::content::content_file::RawContentFile;
use crate::content::content_list::{ContentList, ContentPath};
use crate::content::markup::render_markdown;
use crate::error::{ContentError, ContentResult};
use crate::record::ContentRecord;

/// Records loaded from one directory plus the files that failed.
pub struct LoadOutcome<T> {
    pub records: Vec<Arc<T>>,
    pub failures: Vec<ContentError>,
}

impl<T> LoadOutcome<T> {
    pub fn checked(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

/// Content files and bundles in `dir`, sorted by path.
pub fn list_content_files(dir: &Path) -> ContentResult<Vec<ContentPath>> {
    ContentList::new(dir).retrieve()
        .map_err(|e| ContentError::io(dir, e))
}

/// Runs one raw file through validation, markup conversion and transformation.
pub fn load_record<T: ContentRecord>(raw: RawContentFile) -> ContentResult<T> {
    let front_matter = match T::validate(&raw.front_matter) {
        Ok(fm) => fm,
        Err(errors) => return Err(ContentError::SchemaValidation {
            content_type: T::CONTENT_TYPE,
            path: raw.file_path,
            errors,
        }),
    };
    let html = render_markdown(&raw.file_path, &raw.body)?;
    Ok(T::from_parts(raw.slug, front_matter, raw.body, html))
}

/// Loads every file in `dir`. A file that fails lands in `failures` and never
/// stops the others; only failing to list the directory is an error.
pub fn load_dir<T: ContentRecord>(dir: &Path) -> ContentResult<LoadOutcome<T>> {
    let paths = list_content_files(dir)?;

    let mut seen = HashSet::new();
    let mut outcome = LoadOutcome {
        records: Vec::with_capacity(paths.len()),
        failures: vec![],
    };

    for content_path in paths {
        if !seen.insert(content_path.slug.clone()) {
            outcome.failures.push(ContentError::DuplicateSlug {
                content_type: T::CONTENT_TYPE,
                slug: content_path.slug,
                path: content_path.path,
            });
            continue;
        }

        let loaded = RawContentFile::from_file(&content_path).and_then(load_record::<T>);
        match loaded {
            Ok(record) => outcome.records.push(Arc::new(record)),
            Err(e) => outcome.failures.push(e),
        }
    }

    Ok(outcome)
}
