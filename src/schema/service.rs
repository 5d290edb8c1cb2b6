use serde::Serialize;

use crate::content::front_matter::FrontMatter;
use crate::schema::{FieldReader, SchemaResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pricing {
    pub starting_price: f64,
    pub currency: String,
    pub billing_period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceFrontMatter {
    pub title: String,
    pub short_description: String,
    pub featured_image: String,
    pub icon: String,
    pub order: u32,
    pub features: Vec<String>,
    pub benefits: Vec<String>,
    pub pricing: Option<Pricing>,
    /// Explicit flag; never inferred from `order`.
    pub featured: bool,
}

impl ServiceFrontMatter {
    pub fn validate(front_matter: &FrontMatter) -> SchemaResult<ServiceFrontMatter> {
        let mut r = FieldReader::new(front_matter);

        let title = r.required_string("title");
        let short_description = r.required_string("short_description");
        let featured_image = r.required_string("featured_image");
        let icon = r.required_string("icon");
        let order = r.required_int("order", 0, u32::MAX as i64) as u32;
        let features = r.string_list("features");
        let benefits = r.string_list("benefits");
        let pricing = r.optional_table("pricing", |p| Pricing {
            starting_price: p.required_number("starting_price", 0.0),
            currency: p.required_string("currency"),
            billing_period: p.required_string("billing_period"),
        });
        let featured = r.bool_or("featured", false);

        r.finish(|| ServiceFrontMatter {
            title,
            short_description,
            featured_image,
            icon,
            order,
            features,
            benefits,
            pricing,
            featured,
        })
    }
}
