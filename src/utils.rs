// src/utils.rs
// Small helpers shared by the search and the call builder

use chrono::Utc;
use std::cmp::Ordering;

/// Inserts `add` into `items`, which is kept sorted by `comparator` and holds at most
/// `max_size` elements.
///
/// Returns the element that did not fit: the evicted last element, or `add` itself
/// when the list is full and `add` does not rank ahead of the current last element.
pub fn sorted_insert<T, F>(items: &mut Vec<T>, add: T, max_size: usize, comparator: F) -> Option<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    debug_assert!(max_size > 0, "max_size must be positive");
    debug_assert!(items.len() <= max_size, "list is over max size");

    if items.is_empty() {
        items.push(add);
        return None;
    }

    let full = items.len() == max_size;
    if full {
        if let Some(last) = items.last() {
            if comparator(last, &add) != Ordering::Greater {
                return Some(add);
            }
        }
    }

    // after every element that ranks ahead of or equal to `add`
    let index = items.partition_point(|x| comparator(x, &add) != Ordering::Greater);
    items.insert(index, add);
    if full {
        items.pop()
    } else {
        None
    }
}

/// Current unix time in seconds.
pub fn current_unix_seconds() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    #[test]
    fn test_sorted_insert_keeps_order_and_bound() {
        let mut items = Vec::new();
        assert_eq!(sorted_insert(&mut items, 3, 3, cmp), None);
        assert_eq!(sorted_insert(&mut items, 1, 3, cmp), None);
        assert_eq!(sorted_insert(&mut items, 2, 3, cmp), None);
        assert_eq!(items, vec![1, 2, 3]);

        assert_eq!(sorted_insert(&mut items, 0, 3, cmp), Some(3));
        assert_eq!(items, vec![0, 1, 2]);

        assert_eq!(sorted_insert(&mut items, 5, 3, cmp), Some(5));
        assert_eq!(sorted_insert(&mut items, 2, 3, cmp), Some(2));
        assert_eq!(items, vec![0, 1, 2]);
    }

    #[test]
    fn test_sorted_insert_equal_elements_go_after() {
        let mut items = vec![(1, 'a'), (2, 'a')];
        let by_key = |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0);
        sorted_insert(&mut items, (1, 'b'), 4, by_key);
        assert_eq!(items, vec![(1, 'a'), (1, 'b'), (2, 'a')]);
    }

    #[test]
    fn test_max_size_one() {
        let mut items = Vec::new();
        sorted_insert(&mut items, 4, 1, cmp);
        assert_eq!(sorted_insert(&mut items, 2, 1, cmp), Some(4));
        assert_eq!(items, vec![2]);
    }

    #[test]
    fn test_current_unix_seconds_is_recent() {
        // 2020-01-01
        assert!(current_unix_seconds() > 1_577_836_800);
    }
}
