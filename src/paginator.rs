/// Offset/limit window over a list. A zero offset or limit means "not set".
pub fn paginate<T>(items: &[T], offset: usize, limit: usize) -> &[T] {
    if offset >= items.len() {
        return if offset == 0 { items } else { &[] };
    }
    let rest = &items[offset..];
    match limit {
        0 => rest,
        x => &rest[..x.min(rest.len())],
    }
}

/// 1-based page access over a list.
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: u32,
    page_count: u32,
}

impl<'a, T> Paginator<'a, T> {
    pub fn from(items: &'a [T], page_size: u32) -> Self {
        let page_count = match (items.len() as u32, page_size) {
            (0, _) => 0,
            (_, 0) => 1,
            (count, size) => (count - 1) / size + 1,
        };
        Paginator { items, page_size, page_count }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Pages past the last one are empty.
    pub fn get_page(&self, page: u32) -> Result<&'a [T], String> {
        match page {
            0 => return Err("Page has to be greater than 0".to_string()),
            x if x > self.page_count => return Ok(&[]),
            _ => {}
        };

        let offset = ((page - 1) * self.page_size) as usize;
        Ok(paginate(self.items, offset, self.page_size as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages() {
        let items: Vec<u32> = (1..=7).collect();
        let paginator = Paginator::from(&items, 3);
        assert_eq!(paginator.page_count(), 3);
        assert_eq!(paginator.get_page(1), Ok([1, 2, 3].as_slice()));
        assert_eq!(paginator.get_page(3), Ok([7].as_slice()));
        assert_eq!(paginator.get_page(0), Err("Page has to be greater than 0".to_string()));
        assert_eq!(paginator.get_page(4), Ok([].as_slice()));

        let single = Paginator::from(&items, 0);
        assert_eq!(single.get_page(1).map(|p| p.len()), Ok(7));
    }

    #[test]
    fn test_empty() {
        let items: Vec<u32> = vec![];
        let paginator = Paginator::from(&items, 3);
        assert_eq!(paginator.page_count(), 0);
        assert!(paginator.get_page(1).unwrap().is_empty());
        assert!(paginate(&items, 0, 0).is_empty());
        assert!(paginate(&items, 2, 2).is_empty());
    }

    #[test]
    fn test_offset_limit() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(paginate(&items, 0, 0), &[1, 2, 3, 4, 5]);
        assert_eq!(paginate(&items, 0, 2), &[1, 2]);
        assert_eq!(paginate(&items, 2, 2), &[3, 4]);
        assert_eq!(paginate(&items, 4, 2), &[5]);
        assert_eq!(paginate(&items, 3, 0), &[4, 5]);
        assert!(paginate(&items, 5, 2).is_empty());
        assert!(paginate(&items, 50, 0).is_empty());
    }

    #[test]
    fn test_pages_partition_the_list() {
        let items: Vec<u32> = (0..7).collect();
        let mut seen = vec![];
        let mut offset = 0;
        loop {
            let page = paginate(&items, offset, 2);
            if page.is_empty() {
                break;
            }
            seen.extend_from_slice(page);
            offset += 2;
        }
        assert_eq!(seen, items);
    }
}
