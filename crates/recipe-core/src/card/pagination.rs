use std::ops::Range;

/// Indices of the lines on `page`, clipped to `total`.
pub fn page_range(page: usize, page_size: usize, total: usize) -> Range<usize> {
    let start = page.saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    start..end
}

pub fn can_go_back(page: usize) -> bool {
    page > 0
}

pub fn can_go_forward(page: usize, page_size: usize, total: usize) -> bool {
    (page + 1).saturating_mul(page_size) < total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_range_clips() {
        assert_eq!(page_range(0, 10, 25), 0..10);
        assert_eq!(page_range(2, 10, 25), 20..25);
        assert_eq!(page_range(3, 10, 25), 25..25);
        assert_eq!(page_range(0, 8, 0), 0..0);
    }

    #[test]
    fn test_forward_guard_exact_boundary() {
        assert!(can_go_forward(0, 10, 11));
        assert!(!can_go_forward(0, 10, 10));
        assert!(!can_go_forward(1, 10, 20));
        assert!(can_go_forward(1, 8, 17));
    }

    #[test]
    fn test_back_guard() {
        assert!(!can_go_back(0));
        assert!(can_go_back(1));
    }
}
