use crate::query::Queryable;

/// Case-insensitive substring search across the record's searchable fields.
/// The query is matched as given, surrounding spaces included. An empty query
/// matches every record.
pub fn matches_search<T: Queryable + ?Sized>(record: &T, query: &str) -> bool {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use crate::test_data::{post, service, testimonial};

    use super::*;

    #[test]
    fn test_partial_word_any_case() {
        let mut s = service("photography", 0);
        s.title = "Photography Services".to_string();
        assert!(matches_search(&s, "photo"));
        assert!(matches_search(&s, "PHOTO"));
        assert!(matches_search(&s, "graphy serv"));
        assert!(!matches_search(&s, "video"));
    }

    #[test]
    fn test_spaces_are_part_of_the_query() {
        let mut s = service("lenses", 0);
        s.title = "Telephoto Lens Rental".to_string();
        assert!(matches_search(&s, "photo"));
        assert!(!matches_search(&s, " photo"));
        assert!(matches_search(&s, " lens "));
    }

    #[test]
    fn test_post_fields() {
        let mut p = post("deep-clean", (2024, 1, 1), &["Home"], &["checklist"]);
        p.body = "Scrub the grout first.".to_string();
        assert!(matches_search(&p, "grout"));
        assert!(matches_search(&p, "home"));
        assert!(matches_search(&p, "CHECK"));
        assert!(matches_search(&p, "reyes"));
        assert!(matches_search(&p, "about deep"));
        assert!(!matches_search(&p, "garden"));
    }

    #[test]
    fn test_testimonial_company() {
        let mut t = testimonial("t1", "Sam Lee", 5, &[]);
        assert!(!matches_search(&t, "bakery"));
        t.company = Some("Bloom Bakery".to_string());
        assert!(matches_search(&t, "bakery"));
        assert!(matches_search(&t, "sam"));
    }

    #[test]
    fn test_empty_query() {
        assert!(matches_search(&service("x", 0), ""));
    }
}
