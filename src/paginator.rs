//! Page-index state machine for the auction list
//!
//! The paginator only knows how many items exist and how many fit on a page.
//! Which items those are is the caller's business; when the caller swaps the
//! underlying dataset it must call [`Paginator::replace_dataset`] (or
//! [`Paginator::reset`]) so the index never points past the new data.

use crossterm::event::{KeyCode, KeyEvent};
use std::ops::Range;

/// Number of pages needed to show `total_items` at `page_size` items per page
pub fn compute_page_count(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// One-based, inclusive `(start, end)` item numbers shown on page `index`.
///
/// Returns `None` when there are no pages or `index` is past the last one.
pub fn compute_visible_range(
    index: usize,
    page_size: usize,
    total_items: usize,
) -> Option<(usize, usize)> {
    let page_count = compute_page_count(total_items, page_size);
    if page_count == 0 || index >= page_count {
        return None;
    }

    let start = index * page_size + 1;
    let end = if index + 1 == page_count {
        total_items
    } else {
        (index + 1) * page_size
    };
    Some((start, end))
}

/// The four navigation controls shown next to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    First,
    Previous,
    Next,
    Last,
}

impl NavAction {
    pub const ALL: [NavAction; 4] = [
        NavAction::First,
        NavAction::Previous,
        NavAction::Next,
        NavAction::Last,
    ];

    /// Accessible label for the control
    pub fn label(self) -> &'static str {
        match self {
            NavAction::First => "First page",
            NavAction::Previous => "Previous page",
            NavAction::Next => "Next page",
            NavAction::Last => "Last page",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            NavAction::First => "«",
            NavAction::Previous => "‹",
            NavAction::Next => "›",
            NavAction::Last => "»",
        }
    }
}

/// A navigation control together with its enabled state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControl {
    pub action: NavAction,
    pub enabled: bool,
}

type PageChangeHandler = Box<dyn FnMut(usize) + Send>;

pub struct Paginator {
    items_per_page: usize,
    data_size: usize,
    index: usize,
    on_page_change: Option<PageChangeHandler>,
}

impl Paginator {
    pub fn new(items_per_page: usize, data_size: usize) -> Self {
        Self {
            items_per_page: items_per_page.max(1),
            data_size,
            index: 0,
            on_page_change: None,
        }
    }

    /// Register the callback invoked with every accepted page index
    pub fn with_on_page_change(mut self, handler: impl FnMut(usize) + Send + 'static) -> Self {
        self.on_page_change = Some(Box::new(handler));
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn page_count(&self) -> usize {
        compute_page_count(self.data_size, self.items_per_page)
    }

    pub fn visible_range(&self) -> Option<(usize, usize)> {
        compute_visible_range(self.index, self.items_per_page, self.data_size)
    }

    /// Zero-based slice bounds of the current page into the dataset
    pub fn page_bounds(&self) -> Range<usize> {
        match self.visible_range() {
            Some((start, end)) => (start - 1)..end,
            None => 0..0,
        }
    }

    /// Tracker text, e.g. `26 - 50 of 101`
    pub fn tracker_text(&self) -> String {
        match self.visible_range() {
            Some((start, end)) => format!("{} - {} of {}", start, end, self.data_size),
            None => format!("0 - 0 of {}", self.data_size),
        }
    }

    /// Move to `requested` if it names an existing page.
    ///
    /// Out-of-range requests leave the state untouched and return `None`.
    pub fn go_to(&mut self, requested: usize) -> Option<usize> {
        if requested >= self.page_count() {
            return None;
        }

        self.index = requested;
        tracing::debug!("Paginator moved to page {}", requested);
        if let Some(handler) = self.on_page_change.as_mut() {
            handler(requested);
        }
        Some(requested)
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Swap in a new dataset of `data_size` items; always lands on page 0
    pub fn replace_dataset(&mut self, data_size: usize) {
        self.data_size = data_size;
        self.reset();
    }

    pub fn is_enabled(&self, action: NavAction) -> bool {
        match action {
            NavAction::First | NavAction::Previous => self.index > 0,
            NavAction::Next | NavAction::Last => self.index + 1 < self.page_count(),
        }
    }

    pub fn controls(&self) -> [NavControl; 4] {
        NavAction::ALL.map(|action| NavControl {
            action,
            enabled: self.is_enabled(action),
        })
    }

    /// Trigger a navigation control. Disabled controls are no-ops.
    pub fn apply(&mut self, action: NavAction) -> Option<usize> {
        if !self.is_enabled(action) {
            return None;
        }

        let target = match action {
            NavAction::First => 0,
            NavAction::Previous => self.index - 1,
            NavAction::Next => self.index + 1,
            NavAction::Last => self.page_count() - 1,
        };
        self.go_to(target)
    }

    pub fn first(&mut self) -> Option<usize> {
        self.apply(NavAction::First)
    }

    pub fn previous(&mut self) -> Option<usize> {
        self.apply(NavAction::Previous)
    }

    pub fn next(&mut self) -> Option<usize> {
        self.apply(NavAction::Next)
    }

    pub fn last(&mut self) -> Option<usize> {
        self.apply(NavAction::Last)
    }

    /// Left/Right arrows page backwards/forwards.
    ///
    /// Returns `true` when the key belongs to the paginator, whether or not
    /// the page actually changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left => {
                self.previous();
                true
            }
            KeyCode::Right => {
                self.next();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use proptest::prelude::*;
    use std::sync::{Arc, Mutex};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_page_count() {
        assert_eq!(compute_page_count(0, 25), 0);
        assert_eq!(compute_page_count(1, 25), 1);
        assert_eq!(compute_page_count(25, 25), 1);
        assert_eq!(compute_page_count(26, 25), 2);
        assert_eq!(compute_page_count(101, 25), 5);
    }

    #[test]
    fn test_last_page_of_101_items() {
        let mut paginator = Paginator::new(25, 101);
        assert_eq!(paginator.page_count(), 5);

        assert_eq!(paginator.go_to(4), Some(4));
        assert_eq!(paginator.visible_range(), Some((101, 101)));
        assert_eq!(paginator.tracker_text(), "101 - 101 of 101");
        assert_eq!(paginator.page_bounds(), 100..101);
    }

    #[test]
    fn test_middle_page_range() {
        let mut paginator = Paginator::new(25, 101);
        paginator.go_to(1);
        assert_eq!(paginator.visible_range(), Some((26, 50)));
        assert_eq!(paginator.tracker_text(), "26 - 50 of 101");
    }

    #[test]
    fn test_empty_dataset_disables_everything() {
        let mut paginator = Paginator::new(25, 0);
        assert_eq!(paginator.page_count(), 0);
        assert_eq!(paginator.visible_range(), None);
        assert!(paginator.controls().iter().all(|c| !c.enabled));
        assert_eq!(paginator.go_to(0), None);
        assert_eq!(paginator.tracker_text(), "0 - 0 of 0");
        assert_eq!(paginator.page_bounds(), 0..0);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let mut paginator =
            Paginator::new(10, 30).with_on_page_change(move |i| sink.lock().unwrap().push(i));

        assert_eq!(paginator.go_to(3), None);
        assert_eq!(paginator.index(), 0);
        assert_eq!(paginator.go_to(2), Some(2));
        assert_eq!(paginator.index(), 2);
        assert_eq!(*calls.lock().unwrap(), vec![2]);
    }

    #[test]
    fn test_boundary_controls() {
        let mut paginator = Paginator::new(10, 30);
        let enabled = |p: &Paginator| p.controls().map(|c| c.enabled);

        assert_eq!(enabled(&paginator), [false, false, true, true]);
        paginator.next();
        assert_eq!(enabled(&paginator), [true, true, true, true]);
        paginator.last();
        assert_eq!(paginator.index(), 2);
        assert_eq!(enabled(&paginator), [true, true, false, false]);
        assert_eq!(paginator.next(), None);
        paginator.first();
        assert_eq!(paginator.index(), 0);
    }

    #[test]
    fn test_previous_at_start_is_idempotent() {
        let calls = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&calls);
        let mut paginator =
            Paginator::new(10, 30).with_on_page_change(move |_| *sink.lock().unwrap() += 1);

        for _ in 0..5 {
            assert_eq!(paginator.previous(), None);
            assert_eq!(paginator.first(), None);
        }
        assert_eq!(paginator.index(), 0);
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_replace_dataset_resets() {
        let mut paginator = Paginator::new(10, 100);
        paginator.last();
        assert_eq!(paginator.index(), 9);

        paginator.replace_dataset(15);
        assert_eq!(paginator.index(), 0);
        assert_eq!(paginator.page_count(), 2);
    }

    #[test]
    fn test_arrow_keys() {
        let mut paginator = Paginator::new(10, 30);

        assert!(paginator.handle_key(key(KeyCode::Right)));
        assert_eq!(paginator.index(), 1);
        assert!(paginator.handle_key(key(KeyCode::Left)));
        assert_eq!(paginator.index(), 0);
        assert!(paginator.handle_key(key(KeyCode::Left)));
        assert_eq!(paginator.index(), 0);

        assert!(!paginator.handle_key(key(KeyCode::Up)));
        assert!(!paginator.handle_key(key(KeyCode::Char('l'))));
        assert_eq!(paginator.index(), 0);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = NavAction::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(labels, ["First page", "Previous page", "Next page", "Last page"]);
    }

    proptest! {
        #[test]
        fn page_count_is_monotonic(total in 0usize..10_000, extra in 0usize..500, size in 1usize..200) {
            prop_assert!(compute_page_count(total, size) <= compute_page_count(total + extra, size));
        }

        #[test]
        fn visible_range_is_ordered(total in 1usize..5_000, size in 1usize..100, pick in any::<prop::sample::Index>()) {
            let pages = compute_page_count(total, size);
            let index = pick.index(pages);
            let (start, end) = compute_visible_range(index, size, total).unwrap();
            prop_assert!(start <= end);
            prop_assert!(end <= total);
        }

        #[test]
        fn reset_always_returns_to_zero(total in 0usize..5_000, size in 1usize..100, target in 0usize..200) {
            let mut paginator = Paginator::new(size, total);
            paginator.go_to(target);
            paginator.reset();
            prop_assert_eq!(paginator.index(), 0);
        }
    }
}
