use serde::Serialize;

use crate::content::front_matter::FrontMatter;
use crate::schema::{FieldReader, SchemaResult};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestimonialFrontMatter {
    pub author: String,
    pub position: String,
    pub company: Option<String>,
    pub image: Option<String>,
    pub content: String,
    pub rating: u8,
    pub order: u32,
    pub featured: bool,
    /// Slugs of the services this testimonial talks about.
    pub services: Vec<String>,
}

impl TestimonialFrontMatter {
    pub fn validate(front_matter: &FrontMatter) -> SchemaResult<TestimonialFrontMatter> {
        let mut r = FieldReader::new(front_matter);

        let author = r.required_string("author");
        let position = r.required_string("position");
        let company = r.optional_string("company");
        let image = r.optional_string("image");
        let content = r.required_string("content");
        let rating = r.required_int("rating", MIN_RATING as i64, MAX_RATING as i64) as u8;
        let order = r.required_int("order", 0, u32::MAX as i64) as u32;
        let featured = r.bool_or("featured", false);
        let services = r.string_list("services");

        r.finish(|| TestimonialFrontMatter {
            author,
            position,
            company,
            image,
            content,
            rating,
            order,
            featured,
            services,
        })
    }
}
