use std::path::Path;
use std::sync::Arc;

use crate::content::{ContentDirs, ContentType};
use crate::content_cache::{CacheStatus, CachedContent, ContentCache, Expire};
use crate::error::ContentResult;
use crate::query::{self, Filter, Query, QueryResult};
use crate::record::{Collection, Post, Service, Testimonial};
use crate::validation::{validate_all, ValidationReport};

/// Entry point for the rest of the site: cached collections plus the usual
/// lookups pages need.
pub struct ContentRepository {
    cache: ContentCache,
}

impl ContentRepository {
    pub fn new(dirs: ContentDirs, expire: Expire) -> Self {
        ContentRepository {
            cache: ContentCache::new(dirs, expire),
        }
    }

    pub fn from_root(root: &Path) -> Self {
        Self::new(ContentDirs::from_root(root), Expire::default())
    }

    pub fn with_cache(cache: ContentCache) -> Self {
        ContentRepository { cache }
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    pub fn posts(&self) -> ContentResult<Arc<Collection<Post>>> {
        self.cache.get::<Post>()
    }

    pub fn services(&self) -> ContentResult<Arc<Collection<Service>>> {
        self.cache.get::<Service>()
    }

    pub fn testimonials(&self) -> ContentResult<Arc<Collection<Testimonial>>> {
        self.cache.get::<Testimonial>()
    }

    pub fn query<T: CachedContent>(&self, query: &Query) -> ContentResult<QueryResult<T>> {
        let collection = self.cache.get::<T>()?;
        Ok(query.run::<T>(&collection))
    }

    pub fn post_by_slug(&self, slug: &str) -> ContentResult<Option<Arc<Post>>> {
        Ok(self.posts()?.find(slug).cloned())
    }

    pub fn service_by_slug(&self, slug: &str) -> ContentResult<Option<Arc<Service>>> {
        Ok(self.services()?.find(slug).cloned())
    }

    pub fn testimonial_by_id(&self, id: &str) -> ContentResult<Option<Arc<Testimonial>>> {
        Ok(self.testimonials()?.find(id).cloned())
    }

    pub fn featured_posts(&self) -> ContentResult<Vec<Arc<Post>>> {
        self.filtered::<Post>(Filter { featured: Some(true), ..Default::default() })
    }

    pub fn featured_services(&self) -> ContentResult<Vec<Arc<Service>>> {
        self.filtered::<Service>(Filter { featured: Some(true), ..Default::default() })
    }

    pub fn featured_testimonials(&self) -> ContentResult<Vec<Arc<Testimonial>>> {
        self.filtered::<Testimonial>(Filter { featured: Some(true), ..Default::default() })
    }

    pub fn posts_by_category(&self, category: &str) -> ContentResult<Vec<Arc<Post>>> {
        self.filtered::<Post>(Filter { category: Some(category.to_string()), ..Default::default() })
    }

    pub fn posts_by_tag(&self, tag: &str) -> ContentResult<Vec<Arc<Post>>> {
        self.filtered::<Post>(Filter { tag: Some(tag.to_string()), ..Default::default() })
    }

    pub fn high_rated_testimonials(&self, min_rating: u8) -> ContentResult<Vec<Arc<Testimonial>>> {
        self.filtered::<Testimonial>(Filter { min_rating: Some(min_rating), ..Default::default() })
    }

    pub fn testimonials_for_service(&self, service: &str) -> ContentResult<Vec<Arc<Testimonial>>> {
        self.filtered::<Testimonial>(Filter { service: Some(service.to_string()), ..Default::default() })
    }

    pub fn search_posts(&self, text: &str) -> ContentResult<Vec<Arc<Post>>> {
        Ok(query::search::<Post>(&self.posts()?, text))
    }

    /// Posts sharing a category or tag with `slug`, most overlap first.
    pub fn related_posts(&self, slug: &str, limit: usize) -> ContentResult<Vec<Arc<Post>>> {
        let posts = self.posts()?;
        let Some(current) = posts.find(slug) else {
            return Ok(vec![]);
        };

        let overlap = |other: &Arc<Post>| {
            let shared_categories = other.categories.iter().filter(|c| current.categories.contains(c)).count();
            let shared_tags = other.tags.iter().filter(|t| current.tags.contains(t)).count();
            shared_categories + shared_tags
        };

        let mut related: Vec<(usize, &Arc<Post>)> = posts.iter()
            .filter(|p| p.slug != current.slug)
            .map(|p| (overlap(p), p))
            .filter(|(score, _)| *score > 0)
            .collect();
        // stable sort keeps collection order (newest first) among equal scores
        related.sort_by(|a, b| b.0.cmp(&a.0));

        let related = related.into_iter().map(|(_, p)| p.clone());
        Ok(match limit {
            0 => related.collect(),
            x => related.take(x).collect(),
        })
    }

    pub fn categories(&self) -> ContentResult<Vec<(String, usize)>> {
        let posts = self.posts()?;
        Ok(query::tally(posts.iter().flat_map(|p| p.categories.iter())))
    }

    pub fn tags(&self) -> ContentResult<Vec<(String, usize)>> {
        let posts = self.posts()?;
        Ok(query::tally(posts.iter().flat_map(|p| p.tags.iter())))
    }

    /// Checks every file of every type without touching the cache.
    pub fn validate_all(&self) -> ValidationReport {
        validate_all(self.cache.dirs())
    }

    pub fn invalidate(&self, content_type: ContentType) {
        self.cache.invalidate(content_type)
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all()
    }

    pub fn status(&self, content_type: ContentType) -> CacheStatus {
        self.cache.status(content_type)
    }

    fn filtered<T: CachedContent>(&self, filter: Filter) -> ContentResult<Vec<Arc<T>>> {
        let collection = self.cache.get::<T>()?;
        Ok(query::filter::<T>(&collection, &filter))
    }
}
