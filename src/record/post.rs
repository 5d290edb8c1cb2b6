use std::cmp::Ordering;
use std::fmt;
use std::fmt::Formatter;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::content::ContentType;
use crate::content::front_matter::FrontMatter;
use crate::error::FieldError;
use crate::query::Queryable;
use crate::record::ContentRecord;
use crate::schema::PostFrontMatter;
use crate::text_utils::reading_minutes;

/// Estimated reading time, shown as `"4 min read"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingTime(pub u32);

impl ReadingTime {
    pub fn from_text(text: &str) -> Self {
        ReadingTime(reading_minutes(text))
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ReadingTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} min read", self.0)
    }
}

impl Serialize for ReadingTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub date: NaiveDate,
    pub updated: Option<NaiveDate>,
    pub author: String,
    pub excerpt: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub image: Option<String>,
    pub reading_time: ReadingTime,
    #[serde(skip)]
    pub body: String,
    pub html: String,
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "slug={}, date={}, author={}, {}\ntitle={}",
               self.slug,
               self.date,
               self.author,
               self.reading_time,
               self.title,
        )
    }
}

impl ContentRecord for Post {
    const CONTENT_TYPE: ContentType = ContentType::Post;

    type FrontMatter = PostFrontMatter;

    fn validate(front_matter: &FrontMatter) -> Result<PostFrontMatter, Vec<FieldError>> {
        PostFrontMatter::validate(front_matter)
    }

    fn from_parts(slug: String, fm: PostFrontMatter, body: String, html: String) -> Self {
        let reading_time = ReadingTime::from_text(&body);
        Post {
            slug,
            title: fm.title,
            date: fm.date,
            updated: fm.updated,
            author: fm.author,
            excerpt: fm.excerpt,
            categories: fm.categories,
            tags: fm.tags,
            featured: fm.featured,
            image: fm.image,
            reading_time,
            body,
            html,
        }
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    /// Newest first.
    fn sort_cmp(&self, other: &Self) -> Ordering {
        other.date.cmp(&self.date)
            .then_with(|| self.slug.cmp(&other.slug))
    }
}

impl Queryable for Post {
    fn categories(&self) -> Option<&[String]> {
        Some(&self.categories)
    }

    fn tags(&self) -> Option<&[String]> {
        Some(&self.tags)
    }

    fn featured(&self) -> bool {
        self.featured
    }

    fn author(&self) -> Option<&str> {
        Some(&self.author)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.excerpt.as_str(), self.body.as_str(), self.author.as_str()];
        fields.extend(self.categories.iter().map(String::as_str));
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_minimal_post_round_trip() {
        let fm = json!({
            "title": "Hello",
            "date": "2024-05-01",
            "author": "Dana",
            "excerpt": "A short intro",
        });
        let validated = Post::validate(fm.as_object().unwrap()).unwrap();
        let post = Post::from_parts("hello-world".to_string(), validated, "Just a few words.".to_string(), "<p>Just a few words.</p>".to_string());
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.reading_time.minutes(), 1);
        assert_eq!(post.reading_time.to_string(), "1 min read");
    }

    #[test]
    fn test_reading_time_from_raw_body() {
        let fm = PostFrontMatter {
            title: "Long read".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            author: "Dana".to_string(),
            excerpt: "Long".to_string(),
            categories: vec![],
            tags: vec![],
            featured: false,
            image: None,
            updated: None,
        };
        let body = "word ".repeat(650);
        let post = Post::from_parts("long-read".to_string(), fm, body, String::new());
        assert_eq!(post.reading_time, ReadingTime(4));
        assert_eq!(post.to_string(), "slug=long-read, date=2024-01-01, author=Dana, 4 min read\ntitle=Long read");
    }

    #[test]
    fn test_serialized_reading_time() {
        let value = serde_json::to_value(ReadingTime(3)).unwrap();
        assert_eq!(value, json!("3 min read"));
    }
}
