use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use chrono::{DateTime, Duration, Utc};
use spdlog::{debug, info, warn};

use crate::content::content_list::ContentList;
use crate::content::{ContentDirs, ContentType};
use crate::error::{ContentError, ContentResult};
use crate::loader::load_dir;
use crate::record::{Collection, ContentRecord, Post, Service, Testimonial};

pub const DEFAULT_FRESHNESS_SECS: i64 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expire {
    /// Only file changes invalidate an entry.
    Never,
    After(Duration),
}

impl Default for Expire {
    fn default() -> Self {
        Expire::After(Duration::seconds(DEFAULT_FRESHNESS_SECS))
    }
}

/// The last collection built for one content type.
pub struct CacheEntry<T> {
    pub collection: Arc<Collection<T>>,
    pub computed_at: DateTime<Utc>,
    /// Latest modification time seen in the directory when this was built.
    pub max_modified: Option<SystemTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheStatus {
    pub content_type: ContentType,
    pub populated: bool,
    pub last_rebuild: Option<DateTime<Utc>>,
    pub rebuilds: u64,
    pub records: usize,
}

pub struct CacheSlot<T> {
    entry: RwLock<Option<Arc<CacheEntry<T>>>>,
    rebuild_lock: Mutex<()>,
    rebuilds: AtomicU64,
}

impl<T> CacheSlot<T> {
    fn new() -> Self {
        CacheSlot {
            entry: RwLock::new(None),
            rebuild_lock: Mutex::new(()),
            rebuilds: AtomicU64::new(0),
        }
    }

    fn current(&self) -> Option<Arc<CacheEntry<T>>> {
        self.entry.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn replace(&self, entry: Option<Arc<CacheEntry<T>>>) {
        *self.entry.write().unwrap_or_else(PoisonError::into_inner) = entry;
    }
}

/// Content types the cache keeps a slot for.
pub trait CachedContent: ContentRecord {
    fn slot(cache: &ContentCache) -> &CacheSlot<Self>;
}

impl CachedContent for Post {
    fn slot(cache: &ContentCache) -> &CacheSlot<Self> {
        &cache.posts
    }
}

impl CachedContent for Service {
    fn slot(cache: &ContentCache) -> &CacheSlot<Self> {
        &cache.services
    }
}

impl CachedContent for Testimonial {
    fn slot(cache: &ContentCache) -> &CacheSlot<Self> {
        &cache.testimonials
    }
}

/// Per-type collection cache.
///
/// An entry is rebuilt when it is older than the freshness window or when any
/// file in its directory changed after the entry was built. Each type has its
/// own rebuild lock, so concurrent callers wait for one rebuild instead of
/// running their own.
pub struct ContentCache {
    dirs: ContentDirs,
    expire: Expire,
    enabled: bool,
    posts: CacheSlot<Post>,
    services: CacheSlot<Service>,
    testimonials: CacheSlot<Testimonial>,
}

impl ContentCache {
    pub fn new(dirs: ContentDirs, expire: Expire) -> Self {
        ContentCache {
            dirs,
            expire,
            enabled: true,
            posts: CacheSlot::new(),
            services: CacheSlot::new(),
            testimonials: CacheSlot::new(),
        }
    }

    /// Rebuilds on every call. Useful while writing content.
    pub fn non_caching(dirs: ContentDirs) -> Self {
        ContentCache {
            enabled: false,
            ..Self::new(dirs, Expire::Never)
        }
    }

    pub fn dirs(&self) -> &ContentDirs {
        &self.dirs
    }

    pub fn get<T: CachedContent>(&self) -> ContentResult<Arc<Collection<T>>> {
        let slot = T::slot(self);
        let dir = self.dirs.dir(T::CONTENT_TYPE);

        let observed = Self::last_modified(dir)?;
        if let Some(entry) = self.fresh_entry(slot, observed) {
            debug!("Cache hit for {} ({} records)", T::CONTENT_TYPE, entry.collection.len());
            return Ok(entry.collection.clone());
        }

        let _guard = slot.rebuild_lock.lock().unwrap_or_else(PoisonError::into_inner);

        // Someone else may have rebuilt while we waited
        let observed = Self::last_modified(dir)?;
        if let Some(entry) = self.fresh_entry(slot, observed) {
            return Ok(entry.collection.clone());
        }

        let entry = Arc::new(Self::rebuild::<T>(dir, observed)?);
        let collection = entry.collection.clone();
        if self.enabled {
            slot.replace(Some(entry));
        }
        slot.rebuilds.fetch_add(1, Ordering::Relaxed);
        Ok(collection)
    }

    pub fn invalidate(&self, content_type: ContentType) {
        info!("Invalidating {} cache", content_type);
        match content_type {
            ContentType::Post => self.posts.replace(None),
            ContentType::Service => self.services.replace(None),
            ContentType::Testimonial => self.testimonials.replace(None),
        }
    }

    pub fn invalidate_all(&self) {
        for content_type in ContentType::ALL {
            self.invalidate(content_type);
        }
    }

    pub fn status(&self, content_type: ContentType) -> CacheStatus {
        match content_type {
            ContentType::Post => Self::slot_status(content_type, &self.posts),
            ContentType::Service => Self::slot_status(content_type, &self.services),
            ContentType::Testimonial => Self::slot_status(content_type, &self.testimonials),
        }
    }

    fn slot_status<T>(content_type: ContentType, slot: &CacheSlot<T>) -> CacheStatus {
        let entry = slot.current();
        CacheStatus {
            content_type,
            populated: entry.is_some(),
            last_rebuild: entry.as_ref().map(|e| e.computed_at),
            rebuilds: slot.rebuilds.load(Ordering::Relaxed),
            records: entry.as_ref().map(|e| e.collection.len()).unwrap_or(0),
        }
    }

    fn fresh_entry<T>(&self, slot: &CacheSlot<T>, observed: Option<SystemTime>) -> Option<Arc<CacheEntry<T>>> {
        let entry = slot.current()?;

        if let Expire::After(duration) = self.expire {
            if Utc::now() - entry.computed_at >= duration {
                return None;
            }
        }
        let changed = match (observed, entry.max_modified) {
            (Some(now), Some(then)) => now > then,
            (None, None) => false,
            // directory appeared or vanished
            _ => true,
        };
        if changed {
            return None;
        }
        Some(entry)
    }

    fn last_modified(dir: &Path) -> ContentResult<Option<SystemTime>> {
        ContentList::new(dir).last_modified()
            .map_err(|e| ContentError::io(dir, e))
    }

    fn rebuild<T: ContentRecord>(dir: &Path, observed: Option<SystemTime>) -> ContentResult<CacheEntry<T>> {
        let computed_at = Utc::now();
        let outcome = load_dir::<T>(dir)?;

        for failure in outcome.failures.iter() {
            warn!("Skipping {} file: {}", T::CONTENT_TYPE, failure);
        }
        info!("Rebuilt {} collection from {}: {} records, {} skipped",
            T::CONTENT_TYPE, dir.display(), outcome.records.len(), outcome.failures.len());

        Ok(CacheEntry {
            collection: Arc::new(Collection::new(outcome.records)),
            computed_at,
            max_modified: observed,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration as StdDuration;

    use crate::test_data::{POST_DATA_MD, SERVICE_DESIGN_MD, SERVICE_PHOTO_MD};

    use super::*;

    fn setup() -> (tempfile::TempDir, ContentDirs) {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = ContentDirs::from_root(tmp.path());
        fs::create_dir_all(&dirs.posts).unwrap();
        fs::create_dir_all(&dirs.services).unwrap();
        (tmp, dirs)
    }

    fn touch(path: &Path, secs_ahead: u64) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() + StdDuration::from_secs(secs_ahead)).unwrap();
    }

    #[test]
    fn test_starts_empty() {
        let (_tmp, dirs) = setup();
        let cache = ContentCache::new(dirs, Expire::default());
        let status = cache.status(ContentType::Post);
        assert!(!status.populated);
        assert_eq!(status.last_rebuild, None);
        assert_eq!(status.rebuilds, 0);
    }

    #[test]
    fn test_second_get_is_served_from_cache() {
        let (_tmp, dirs) = setup();
        fs::write(dirs.posts.join("spring.md"), POST_DATA_MD).unwrap();
        let cache = ContentCache::new(dirs, Expire::default());

        let first = cache.get::<Post>().unwrap();
        let second = cache.get::<Post>().unwrap();
        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);

        let status = cache.status(ContentType::Post);
        assert!(status.populated);
        assert!(status.last_rebuild.is_some());
        assert_eq!(status.rebuilds, 1);
        assert_eq!(status.records, 1);
    }

    #[test]
    fn test_touching_a_file_forces_rebuild() {
        let (_tmp, dirs) = setup();
        let path = dirs.posts.join("spring.md");
        fs::write(&path, POST_DATA_MD).unwrap();
        let cache = ContentCache::new(dirs, Expire::Never);

        let first = cache.get::<Post>().unwrap();
        assert_eq!(first[0].title, "Spring Cleaning Checklist");

        fs::write(&path, POST_DATA_MD.replace("Spring Cleaning Checklist", "Spring Deep Clean")).unwrap();
        touch(&path, 10);

        let second = cache.get::<Post>().unwrap();
        assert_eq!(second[0].title, "Spring Deep Clean");
        assert_eq!(cache.status(ContentType::Post).rebuilds, 2);
    }

    #[test]
    fn test_concurrent_cold_gets_share_one_rebuild() {
        let (_tmp, dirs) = setup();
        fs::write(dirs.posts.join("spring.md"), POST_DATA_MD).unwrap();
        let cache = ContentCache::new(dirs, Expire::default());
        let barrier = Barrier::new(8);

        let collections: Vec<Arc<Collection<Post>>> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| {
                    barrier.wait();
                    cache.get::<Post>().unwrap()
                }))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(cache.status(ContentType::Post).rebuilds, 1);
        for collection in collections.iter() {
            assert!(Arc::ptr_eq(collection, &collections[0]));
        }
    }

    #[test]
    fn test_freshness_window_expires() {
        let (_tmp, dirs) = setup();
        fs::write(dirs.posts.join("spring.md"), POST_DATA_MD).unwrap();
        let cache = ContentCache::new(dirs, Expire::After(Duration::milliseconds(100)));

        let first = cache.get::<Post>().unwrap();
        thread::sleep(StdDuration::from_millis(200));
        let second = cache.get::<Post>().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
        assert_eq!(cache.status(ContentType::Post).rebuilds, 2);
    }

    #[test]
    fn test_invalidate() {
        let (_tmp, dirs) = setup();
        fs::write(dirs.services.join("photography.md"), SERVICE_PHOTO_MD).unwrap();
        let cache = ContentCache::new(dirs, Expire::default());

        cache.get::<Service>().unwrap();
        cache.get::<Post>().unwrap();
        cache.invalidate(ContentType::Service);
        assert!(!cache.status(ContentType::Service).populated);
        assert!(cache.status(ContentType::Post).populated);

        cache.get::<Service>().unwrap();
        assert_eq!(cache.status(ContentType::Service).rebuilds, 2);

        cache.invalidate_all();
        for content_type in ContentType::ALL {
            assert!(!cache.status(content_type).populated);
        }
    }

    #[test]
    fn test_services_in_order() {
        let (_tmp, dirs) = setup();
        // photography has order 1, web-design has order 0
        fs::write(dirs.services.join("a-photography.md"), SERVICE_PHOTO_MD).unwrap();
        fs::write(dirs.services.join("z-web-design.md"), SERVICE_DESIGN_MD).unwrap();
        let cache = ContentCache::new(dirs, Expire::default());

        let services = cache.get::<Service>().unwrap();
        let orders: Vec<u32> = services.iter().map(|s| s.order).collect();
        assert_eq!(orders, [0, 1]);
        assert_eq!(services[0].slug, "z-web-design");
    }

    #[test]
    fn test_missing_dir_is_empty_collection() {
        let (_tmp, dirs) = setup();
        let cache = ContentCache::new(dirs, Expire::default());
        let testimonials = cache.get::<Testimonial>().unwrap();
        assert!(testimonials.is_empty());
        assert!(cache.status(ContentType::Testimonial).populated);
    }

    #[test]
    fn test_new_file_is_picked_up() {
        let (_tmp, dirs) = setup();
        let cache = ContentCache::new(dirs.clone(), Expire::Never);
        assert!(cache.get::<Service>().unwrap().is_empty());

        let path = dirs.services.join("web-design.md");
        fs::write(&path, SERVICE_DESIGN_MD).unwrap();
        touch(&path, 10);
        assert_eq!(cache.get::<Service>().unwrap().len(), 1);
    }

    #[test]
    fn test_non_caching() {
        let (_tmp, dirs) = setup();
        let cache = ContentCache::non_caching(dirs);
        cache.get::<Post>().unwrap();
        cache.get::<Post>().unwrap();
        let status = cache.status(ContentType::Post);
        assert!(!status.populated);
        assert_eq!(status.rebuilds, 2);
    }
}
