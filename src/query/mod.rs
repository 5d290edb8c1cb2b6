//! Read-only views over a cached collection.
//!
//! Nothing here mutates a collection: every operation takes a slice of shared
//! records and returns new handles to the ones that qualify. Sorting is fixed
//! per content type and already applied by [`Collection`](crate::record::Collection).

use std::collections::HashMap;
use std::sync::Arc;

use crate::paginator::paginate;

pub mod filter;
pub mod search;

pub use filter::Filter;
pub use search::matches_search;

/// Attributes the query engine can look at. `None` means the record type does
/// not carry that attribute at all.
pub trait Queryable {
    fn categories(&self) -> Option<&[String]> {
        None
    }

    fn tags(&self) -> Option<&[String]> {
        None
    }

    fn featured(&self) -> bool;

    fn author(&self) -> Option<&str> {
        None
    }

    fn rating(&self) -> Option<u8> {
        None
    }

    fn services(&self) -> Option<&[String]> {
        None
    }

    fn search_fields(&self) -> Vec<&str>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filter: Filter,
    pub search: Option<String>,
    pub offset: usize,
    pub limit: usize,
}

#[derive(Debug)]
pub struct QueryResult<T> {
    pub items: Vec<Arc<T>>,
    /// Matches before pagination.
    pub total: usize,
}

impl Query {
    pub fn new() -> Self {
        Query::default()
    }

    pub fn category(mut self, category: &str) -> Self {
        self.filter.category = Some(category.to_string());
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.filter.tag = Some(tag.to_string());
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.filter.featured = Some(featured);
        self
    }

    pub fn author(mut self, author: &str) -> Self {
        self.filter.author = Some(author.to_string());
        self
    }

    pub fn min_rating(mut self, rating: u8) -> Self {
        self.filter.min_rating = Some(rating);
        self
    }

    pub fn service(mut self, service: &str) -> Self {
        self.filter.service = Some(service.to_string());
        self
    }

    pub fn search(mut self, text: &str) -> Self {
        self.search = Some(text.to_string());
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Filter, then search, then paginate. The collection order is kept.
    pub fn run<T: Queryable>(&self, items: &[Arc<T>]) -> QueryResult<T> {
        let matched: Vec<Arc<T>> = items.iter()
            .filter(|item| self.filter.matches::<T>(item))
            .filter(|item| match self.search {
                Some(ref text) => matches_search::<T>(item, text),
                None => true,
            })
            .cloned()
            .collect();

        let total = matched.len();
        let items = paginate(&matched, self.offset, self.limit).to_vec();
        QueryResult { items, total }
    }
}

pub fn filter<T: Queryable>(items: &[Arc<T>], filter: &Filter) -> Vec<Arc<T>> {
    items.iter()
        .filter(|item| filter.matches::<T>(item))
        .cloned()
        .collect()
}

pub fn search<T: Queryable>(items: &[Arc<T>], text: &str) -> Vec<Arc<T>> {
    items.iter()
        .filter(|item| matches_search::<T>(item, text))
        .cloned()
        .collect()
}

/// Counts how often each value occurs, most frequent first, ties by name.
pub fn tally<'a, I>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value.as_str()).or_insert(0) += 1;
    }

    let mut list: Vec<(String, usize)> = counts.into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    list.sort_by(|(ka, va), (kb, vb)| vb.cmp(va).then_with(|| ka.cmp(kb)));
    list
}
