use crate::query::Queryable;

/// Record filters. Every filter that is set must match (logical AND).
///
/// A filter on an attribute the record type does not have, such as a minimum
/// rating on a blog post, matches nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub featured: Option<bool>,
    /// Case-insensitive substring of the author name.
    pub author: Option<String>,
    pub min_rating: Option<u8>,
    /// Slug of a related service.
    pub service: Option<String>,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        *self == Filter::default()
    }

    pub fn matches<T: Queryable + ?Sized>(&self, record: &T) -> bool {
        if let Some(ref category) = self.category {
            if !contains_ignore_case(record.categories(), category) {
                return false;
            }
        }
        if let Some(ref tag) = self.tag {
            if !contains_ignore_case(record.tags(), tag) {
                return false;
            }
        }
        if let Some(featured) = self.featured {
            if record.featured() != featured {
                return false;
            }
        }
        if let Some(ref author) = self.author {
            let needle = author.to_lowercase();
            match record.author() {
                Some(name) if name.to_lowercase().contains(&needle) => {}
                _ => return false,
            }
        }
        if let Some(min_rating) = self.min_rating {
            match record.rating() {
                Some(rating) if rating >= min_rating => {}
                _ => return false,
            }
        }
        if let Some(ref service) = self.service {
            if !contains_ignore_case(record.services(), service) {
                return false;
            }
        }
        true
    }
}

fn contains_ignore_case(values: Option<&[String]>, wanted: &str) -> bool {
    let wanted = wanted.to_lowercase();
    values
        .map(|values| values.iter().any(|v| v.to_lowercase() == wanted))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use crate::test_data::{post, service, testimonial};

    use super::*;

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = Filter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&post("a", (2024, 1, 1), &[], &[])));
        assert!(filter.matches(&service("b", 0)));
    }

    #[test]
    fn test_category_and_tag_are_conjunctive() {
        let both = post("both", (2024, 1, 1), &["Home"], &["cleaning"]);
        let category_only = post("category-only", (2024, 1, 1), &["Home"], &["garden"]);
        let tag_only = post("tag-only", (2024, 1, 1), &["Office"], &["cleaning"]);

        let filter = Filter {
            category: Some("home".to_string()),
            tag: Some("Cleaning".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&both));
        assert!(!filter.matches(&category_only));
        assert!(!filter.matches(&tag_only));
    }

    #[test]
    fn test_author_substring() {
        let filter = Filter { author: Some("REYES".to_string()), ..Default::default() };
        assert!(filter.matches(&post("a", (2024, 1, 1), &[], &[])));
        let filter = Filter { author: Some("smith".to_string()), ..Default::default() };
        assert!(!filter.matches(&post("a", (2024, 1, 1), &[], &[])));
    }

    #[test]
    fn test_rating_and_service() {
        let t = testimonial("t1", "Sam", 4, &["photography"]);
        assert!(Filter { min_rating: Some(4), ..Default::default() }.matches(&t));
        assert!(!Filter { min_rating: Some(5), ..Default::default() }.matches(&t));
        assert!(Filter { service: Some("photography".to_string()), ..Default::default() }.matches(&t));
        assert!(!Filter { service: Some("web-design".to_string()), ..Default::default() }.matches(&t));
    }

    #[test]
    fn test_inapplicable_filter_matches_nothing() {
        let filter = Filter { min_rating: Some(1), ..Default::default() };
        assert!(!filter.matches(&post("a", (2024, 1, 1), &[], &[])));
        let filter = Filter { category: Some("Home".to_string()), ..Default::default() };
        assert!(!filter.matches(&service("b", 0)));
    }
}
