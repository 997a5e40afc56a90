//! Reusable list query: search, filter, sort, paginate.
//!
//! # Responsibility
//! - Give every list view one pipeline instead of a hand-written copy each.
//! - Keep paging arithmetic in one place.
//!
//! # Invariants
//! - A blank search term matches every record.
//! - Sorting is stable; equal records keep their source order.
//! - A page never holds more than `page_size` items; pages past the end are
//!   empty.

use std::cmp::Ordering;

/// Records that expose text fields for case-insensitive substring search.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;

    fn matches_term(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Orients an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Active sort column and direction of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: Copy + PartialEq> SortState<K> {
    pub fn new(key: K, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Column header click: the current ascending key flips to descending,
    /// anything else sorts ascending by `key`.
    pub fn request(&mut self, key: K) {
        self.direction = if self.key == key && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.key = key;
    }
}

type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;
type Comparator<'a, T> = Box<dyn Fn(&T, &T) -> Ordering + 'a>;

/// Search term, equality predicates and optional ordering over one record type.
pub struct ListQuery<'a, T> {
    search: String,
    predicates: Vec<Predicate<'a, T>>,
    comparator: Option<Comparator<'a, T>>,
}

impl<T> Default for ListQuery<'_, T> {
    fn default() -> Self {
        Self {
            search: String::new(),
            predicates: Vec::new(),
            comparator: None,
        }
    }
}

impl<'a, T: Searchable + Clone> ListQuery<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn filter(mut self, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Adds `predicate` only when `enabled`; used for "all" filter options.
    pub fn filter_if(self, enabled: bool, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        if enabled {
            self.filter(predicate)
        } else {
            self
        }
    }

    /// Sorts by an ascending comparator oriented by `direction`.
    pub fn sort_by(
        mut self,
        compare: impl Fn(&T, &T) -> Ordering + 'a,
        direction: SortDirection,
    ) -> Self {
        self.comparator = Some(Box::new(move |a, b| direction.apply(compare(a, b))));
        self
    }

    pub fn matches(&self, item: &T) -> bool {
        item.matches_term(&self.search) && self.predicates.iter().all(|keep| keep(item))
    }

    /// Matching records, sorted when a comparator is set.
    pub fn apply(&self, items: &[T]) -> Vec<T> {
        let mut matched = items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect::<Vec<_>>();
        if let Some(compare) = &self.comparator {
            matched.sort_by(|a, b| compare(a, b));
        }
        matched
    }
}

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    /// Page 0 is read as page 1 and a zero size as 1.
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn first(page_size: usize) -> Self {
        Self::new(1, page_size)
    }

    fn offset(self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// One page of a derived list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn paginate(all: Vec<T>, request: PageRequest) -> Self {
        let request = PageRequest::new(request.page, request.page_size);
        let total_items = all.len();
        let total_pages = total_items.div_ceil(request.page_size);
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(request.page_size)
            .collect();
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total_items,
            total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// `"<first>-<last> of <total>"`; `"0-0 of <total>"` for an empty page.
    pub fn range_label(&self) -> String {
        if self.items.is_empty() {
            return format!("0-0 of {}", self.total_items);
        }
        let first = self.page.saturating_sub(1) * self.page_size + 1;
        let last = first + self.items.len() - 1;
        format!("{first}-{last} of {}", self.total_items)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Sliding window of page numbers centred on `current` where possible.
pub fn visible_page_numbers(current: usize, total: usize, window: usize) -> Vec<usize> {
    if total == 0 || window == 0 {
        return Vec::new();
    }
    if total <= window {
        return (1..=total).collect();
    }
    let current = current.clamp(1, total);
    let mut start = current.saturating_sub(window / 2).max(1);
    let mut end = start + window - 1;
    if end > total {
        end = total;
        start = total + 1 - window;
    }
    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::{visible_page_numbers, Page, PageRequest, SortDirection, SortState};

    #[test]
    fn window_slides_and_clamps() {
        assert_eq!(visible_page_numbers(1, 3, 5), vec![1, 2, 3]);
        assert_eq!(visible_page_numbers(2, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(visible_page_numbers(6, 10, 5), vec![4, 5, 6, 7, 8]);
        assert_eq!(visible_page_numbers(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert!(visible_page_numbers(1, 0, 5).is_empty());
    }

    #[test]
    fn range_label_treats_hand_built_page_zero_as_first() {
        let page = Page {
            items: vec!["a", "b"],
            page: 0,
            page_size: 5,
            total_items: 2,
            total_pages: 1,
        };
        assert_eq!(page.range_label(), "1-2 of 2");
    }

    #[test]
    fn sort_request_toggles_only_current_ascending_key() {
        let mut state = SortState::new("date", SortDirection::Descending);
        state.request("date");
        assert_eq!(state.direction, SortDirection::Ascending);
        state.request("date");
        assert_eq!(state.direction, SortDirection::Descending);
        state.request("amount");
        assert_eq!(state, SortState::new("amount", SortDirection::Ascending));
    }

    #[test]
    fn range_label_for_partial_last_page() {
        let page = Page::paginate((1..=12).collect::<Vec<_>>(), PageRequest::new(3, 5));
        assert_eq!(page.items, vec![11, 12]);
        assert_eq!(page.range_label(), "11-12 of 12");
        assert!(!page.has_next());
    }
}
