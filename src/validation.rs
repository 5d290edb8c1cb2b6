use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use spdlog::info;

use crate::content::{ContentDirs, ContentType};
use crate::error::{ContentError, FieldError};
use crate::loader::{load_dir, LoadOutcome};
use crate::record::{ContentRecord, Post, Service, Testimonial};

/// One failing file in a [`ValidationReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub content_type: ContentType,
    pub path: PathBuf,
    pub message: String,
    pub field_errors: Vec<FieldError>,
}

impl ReportEntry {
    fn from_error(content_type: ContentType, error: &ContentError) -> Self {
        ReportEntry {
            content_type,
            path: error.path().clone(),
            message: error.to_string(),
            field_errors: error.field_errors().to_vec(),
        }
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.content_type, self.path.display())?;
        if self.field_errors.is_empty() {
            write!(f, "\n    {}", self.message)?;
        }
        for error in self.field_errors.iter() {
            write!(f, "\n    {}", error)?;
        }
        Ok(())
    }
}

/// Every failing file across all content types.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub checked: usize,
    pub failures: Vec<ReportEntry>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures_for(&self, content_type: ContentType) -> impl Iterator<Item = &ReportEntry> {
        self.failures.iter().filter(move |f| f.content_type == content_type)
    }

    fn add<T: ContentRecord>(&mut self, outcome: LoadOutcome<T>) {
        self.checked += outcome.checked();
        self.failures.extend(outcome.failures.iter().map(|e| ReportEntry::from_error(T::CONTENT_TYPE, e)));
    }

    fn add_dir_error(&mut self, content_type: ContentType, error: &ContentError) {
        self.failures.push(ReportEntry::from_error(content_type, error));
    }
}

/// Checks every content file of every type, bypassing the cache.
///
/// Unlike a collection rebuild nothing is skipped: each failing file gets an
/// entry, and an unreadable directory is reported rather than aborting.
pub fn validate_all(dirs: &ContentDirs) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_type::<Post>(dirs, &mut report);
    validate_type::<Service>(dirs, &mut report);
    validate_type::<Testimonial>(dirs, &mut report);

    info!("Validated {} content files, {} failing", report.checked, report.failures.len());
    report
}

fn validate_type<T: ContentRecord>(dirs: &ContentDirs, report: &mut ValidationReport) {
    match load_dir::<T>(dirs.dir(T::CONTENT_TYPE)) {
        Ok(outcome) => report.add(outcome),
        Err(e) => report.add_dir_error(T::CONTENT_TYPE, &e),
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Checked {} files, {} failing", self.checked, self.failures.len())?;
        for entry in self.failures.iter() {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::test_data::{testimonial_md, POST_BAD_DATE_MD, POST_DATA_MD, SERVICE_PHOTO_MD};

    use super::*;

    #[test]
    fn test_report_lists_each_failing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = ContentDirs::from_root(tmp.path());
        fs::create_dir_all(&dirs.posts).unwrap();
        fs::create_dir_all(&dirs.services).unwrap();
        fs::create_dir_all(&dirs.testimonials).unwrap();
        fs::write(dirs.posts.join("good.md"), POST_DATA_MD).unwrap();
        fs::write(dirs.posts.join("bad-date.md"), POST_BAD_DATE_MD).unwrap();
        fs::write(dirs.services.join("photography.md"), SERVICE_PHOTO_MD).unwrap();
        fs::write(dirs.testimonials.join("priya.md"), testimonial_md("6")).unwrap();
        fs::write(dirs.testimonials.join("sam.md"), testimonial_md("5")).unwrap();

        let report = validate_all(&dirs);
        assert!(!report.is_ok());
        assert_eq!(report.checked, 5);
        assert_eq!(report.failures.len(), 2);

        let posts: Vec<&ReportEntry> = report.failures_for(ContentType::Post).collect();
        assert_eq!(posts.len(), 1);
        assert!(posts[0].path.ends_with("bad-date.md"));
        assert_eq!(posts[0].field_errors[0].field, "date");

        let testimonials: Vec<&ReportEntry> = report.failures_for(ContentType::Testimonial).collect();
        assert_eq!(testimonials.len(), 1);
        assert_eq!(testimonials[0].field_errors[0].field, "rating");

        let text = report.to_string();
        assert!(text.contains("Checked 5 files, 2 failing"));
        assert!(text.contains("rating: must be between 1 and 5"));
    }

    #[test]
    fn test_empty_store_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let report = validate_all(&ContentDirs::from_root(tmp.path()));
        assert!(report.is_ok());
        assert_eq!(report.checked, 0);
    }
}
