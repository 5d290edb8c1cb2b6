use std::fs;
use std::path::PathBuf;

use crate::content::content_list::ContentPath;
use crate::content::front_matter::{split_front_matter, FrontMatter};
use crate::error::{ContentError, ContentResult};

/// A content file as read from the store, before validation.
#[derive(Debug, Clone)]
pub struct RawContentFile {
    pub slug: String,
    pub file_path: PathBuf,
    pub front_matter: FrontMatter,
    pub body: String,
}

impl RawContentFile {
    pub fn from_file(content_path: &ContentPath) -> ContentResult<RawContentFile> {
        let raw = fs::read_to_string(&content_path.path)
            .map_err(|e| ContentError::io(&content_path.path, e))?;
        Self::from_string(content_path.slug.clone(), content_path.path.clone(), &raw)
    }

    pub fn from_string(slug: String, file_path: PathBuf, raw: &str) -> ContentResult<RawContentFile> {
        let (front_matter, body) = match split_front_matter(raw) {
            Ok(x) => x,
            Err(reason) => return Err(ContentError::FrontMatter { path: file_path, reason }),
        };

        Ok(RawContentFile {
            slug,
            file_path,
            front_matter,
            body: body.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::test_data::POST_DATA_MD;

    use super::*;

    #[test]
    fn test_from_string() {
        let file = RawContentFile::from_string(
            "spring-cleaning-checklist".to_string(),
            PathBuf::from("content/blog/spring-cleaning-checklist.md"),
            POST_DATA_MD,
        ).unwrap();
        assert_eq!(file.slug, "spring-cleaning-checklist");
        assert_eq!(file.front_matter.get("author"), Some(&json!("Dana Reyes")));
        assert!(file.body.starts_with("Spring is the best time"));
    }

    #[test]
    fn test_bad_front_matter_is_a_file_error() {
        let err = RawContentFile::from_string(
            "broken".to_string(),
            PathBuf::from("content/blog/broken.md"),
            "---\ntitle: x\n",
        ).unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
        assert_eq!(err.path(), &PathBuf::from("content/blog/broken.md"));
    }

    #[test]
    fn test_from_file() -> std::io::Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("hello.md");
        fs::write(&path, "---\ntitle: Hello\n---\nWorld\n")?;
        let file = RawContentFile::from_file(&ContentPath { slug: "hello".to_string(), path }).unwrap();
        assert_eq!(file.front_matter.get("title"), Some(&json!("Hello")));
        assert_eq!(file.body, "World\n");
        Ok(())
    }
}
