use chrono::NaiveDate;
use serde::Serialize;

use crate::content::front_matter::FrontMatter;
use crate::schema::{FieldReader, SchemaResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostFrontMatter {
    pub title: String,
    pub date: NaiveDate,
    pub author: String,
    pub excerpt: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub image: Option<String>,
    pub updated: Option<NaiveDate>,
}

impl PostFrontMatter {
    pub fn validate(front_matter: &FrontMatter) -> SchemaResult<PostFrontMatter> {
        let mut r = FieldReader::new(front_matter);

        let title = r.required_string("title");
        let date = r.required_date("date");
        let author = r.required_string("author");
        let excerpt = r.required_string("excerpt");
        let categories = r.string_list("categories");
        let tags = r.string_list("tags");
        let featured = r.bool_or("featured", false);
        let image = r.optional_string("image");
        let updated = r.optional_date("updated");

        r.finish(|| PostFrontMatter {
            title,
            date,
            author,
            excerpt,
            categories,
            tags,
            featured,
            image,
            updated,
        })
    }
}
