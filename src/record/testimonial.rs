use std::cmp::Ordering;

use serde::Serialize;

use crate::content::ContentType;
use crate::content::front_matter::FrontMatter;
use crate::error::FieldError;
use crate::query::Queryable;
use crate::record::ContentRecord;
use crate::schema::TestimonialFrontMatter;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Testimonial {
    /// Identifier taken from the file name.
    pub id: String,
    pub author: String,
    pub position: String,
    pub company: Option<String>,
    pub image: Option<String>,
    pub content: String,
    pub rating: u8,
    pub order: u32,
    pub featured: bool,
    pub services: Vec<String>,
    #[serde(skip)]
    pub body: String,
    pub html: String,
}

impl ContentRecord for Testimonial {
    const CONTENT_TYPE: ContentType = ContentType::Testimonial;

    type FrontMatter = TestimonialFrontMatter;

    fn validate(front_matter: &FrontMatter) -> Result<TestimonialFrontMatter, Vec<FieldError>> {
        TestimonialFrontMatter::validate(front_matter)
    }

    fn from_parts(id: String, fm: TestimonialFrontMatter, body: String, html: String) -> Self {
        Testimonial {
            id,
            author: fm.author,
            position: fm.position,
            company: fm.company,
            image: fm.image,
            content: fm.content,
            rating: fm.rating,
            order: fm.order,
            featured: fm.featured,
            services: fm.services,
            body,
            html,
        }
    }

    fn slug(&self) -> &str {
        &self.id
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.order.cmp(&other.order)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl Queryable for Testimonial {
    fn featured(&self) -> bool {
        self.featured
    }

    fn author(&self) -> Option<&str> {
        Some(&self.author)
    }

    fn rating(&self) -> Option<u8> {
        Some(self.rating)
    }

    fn services(&self) -> Option<&[String]> {
        Some(&self.services)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.author.as_str(), self.position.as_str(), self.content.as_str(), self.body.as_str()];
        if let Some(ref company) = self.company {
            fields.push(company);
        }
        fields
    }
}
