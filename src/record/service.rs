use std::cmp::Ordering;

use serde::Serialize;

use crate::content::ContentType;
use crate::content::front_matter::FrontMatter;
use crate::error::FieldError;
use crate::query::Queryable;
use crate::record::ContentRecord;
use crate::schema::{Pricing, ServiceFrontMatter};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub slug: String,
    pub title: String,
    pub short_description: String,
    pub featured_image: String,
    pub icon: String,
    pub order: u32,
    pub features: Vec<String>,
    pub benefits: Vec<String>,
    pub pricing: Option<Pricing>,
    pub featured: bool,
    #[serde(skip)]
    pub body: String,
    pub html: String,
}

impl ContentRecord for Service {
    const CONTENT_TYPE: ContentType = ContentType::Service;

    type FrontMatter = ServiceFrontMatter;

    fn validate(front_matter: &FrontMatter) -> Result<ServiceFrontMatter, Vec<FieldError>> {
        ServiceFrontMatter::validate(front_matter)
    }

    fn from_parts(slug: String, fm: ServiceFrontMatter, body: String, html: String) -> Self {
        Service {
            slug,
            title: fm.title,
            short_description: fm.short_description,
            featured_image: fm.featured_image,
            icon: fm.icon,
            order: fm.order,
            features: fm.features,
            benefits: fm.benefits,
            pricing: fm.pricing,
            featured: fm.featured,
            body,
            html,
        }
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.order.cmp(&other.order)
            .then_with(|| self.slug.cmp(&other.slug))
    }
}

impl Queryable for Service {
    fn featured(&self) -> bool {
        self.featured
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.short_description.as_str(), self.body.as_str()];
        fields.extend(self.features.iter().map(String::as_str));
        fields.extend(self.benefits.iter().map(String::as_str));
        fields
    }
}
