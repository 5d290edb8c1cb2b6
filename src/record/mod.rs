use std::cmp::Ordering;
use std::ops::Deref;
use std::sync::Arc;

use serde::Serialize;

use crate::content::ContentType;
use crate::content::front_matter::FrontMatter;
use crate::error::FieldError;
use crate::query::Queryable;

pub mod post;
pub mod service;
pub mod testimonial;

pub use post::{Post, ReadingTime};
pub use service::Service;
pub use testimonial::Testimonial;

/// A typed record built from one content file.
///
/// Records are immutable once built; the cache hands them out as `Arc<T>`.
pub trait ContentRecord: Queryable + Sized + Send + Sync + 'static {
    const CONTENT_TYPE: ContentType;

    type FrontMatter;

    fn validate(front_matter: &FrontMatter) -> Result<Self::FrontMatter, Vec<FieldError>>;

    /// Merges validated front matter, identifier and body. Pure and infallible.
    fn from_parts(slug: String, front_matter: Self::FrontMatter, body: String, html: String) -> Self;

    fn slug(&self) -> &str;

    /// The fixed listing order for this type.
    fn sort_cmp(&self, other: &Self) -> Ordering;
}

/// Records of one type in their listing order.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Collection<T> {
    items: Vec<Arc<T>>,
}

impl<T: ContentRecord> Collection<T> {
    pub fn new(mut items: Vec<Arc<T>>) -> Self {
        items.sort_by(|a, b| a.sort_cmp(b));
        Collection { items }
    }

    pub fn find(&self, slug: &str) -> Option<&Arc<T>> {
        self.items.iter().find(|item| item.slug() == slug)
    }
}

impl<T> Collection<T> {
    pub fn empty() -> Self {
        Collection { items: vec![] }
    }
}

impl<T> Deref for Collection<T> {
    type Target = [Arc<T>];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T: PartialEq> PartialEq for Collection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}
