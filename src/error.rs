use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::content::ContentType;

/// A single problem found in one front-matter field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("schema validation failed for {content_type} file {}: {}", .path.display(), join_errors(.errors))]
    SchemaValidation {
        content_type: ContentType,
        path: PathBuf,
        errors: Vec<FieldError>,
    },

    #[error("content processing failed for {}: {reason}", .path.display())]
    Processing { path: PathBuf, reason: String },

    #[error("invalid front matter in {}: {reason}", .path.display())]
    FrontMatter { path: PathBuf, reason: String },

    #[error("duplicate {content_type} identifier `{slug}` in {}", .path.display())]
    DuplicateSlug {
        content_type: ContentType,
        slug: String,
        path: PathBuf,
    },

    #[error("IO error when reading `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ContentError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ContentError::Io {
            path: path.into(),
            source,
        }
    }

    /// File the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            ContentError::SchemaValidation { path, .. }
            | ContentError::Processing { path, .. }
            | ContentError::FrontMatter { path, .. }
            | ContentError::DuplicateSlug { path, .. }
            | ContentError::Io { path, .. } => path,
        }
    }

    /// Field-level problems, empty for anything but a schema failure.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ContentError::SchemaValidation { errors, .. } => errors,
            _ => &[],
        }
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type ContentResult<T> = Result<T, ContentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display_lists_every_field() {
        let err = ContentError::SchemaValidation {
            content_type: ContentType::Testimonial,
            path: PathBuf::from("content/testimonials/jane.md"),
            errors: vec![
                FieldError::new("rating", "must be between 1 and 5"),
                FieldError::new("author", "is required"),
            ],
        };
        let display = format!("{err}");
        assert!(display.contains("schema validation failed"));
        assert!(display.contains("testimonial"));
        assert!(display.contains("jane.md"));
        assert!(display.contains("rating: must be between 1 and 5"));
        assert!(display.contains("author: is required"));
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error;

        let err = ContentError::io("content/blog", io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(format!("{err}").contains("content/blog"));
        assert!(err.source().is_some());
        assert!(err.field_errors().is_empty());
    }
}
