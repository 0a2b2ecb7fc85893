//! Ordered collection of captured media plus the current selection.

use crate::model::MediaItem;

/// Most-recent-first list of media with at most one item selected.
/// Navigation is clamped at both ends rather than wrapping, so repeated
/// swipes park on the first or last item instead of cycling.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gallery {
    items: Vec<MediaItem>,
    selected: Option<usize>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn selected(&self) -> Option<&MediaItem> {
        self.selected.and_then(|i| self.items.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Insert a fresh capture at the head. An existing selection keeps
    /// pointing at the same item.
    pub fn prepend(&mut self, item: MediaItem) {
        self.items.insert(0, item);
        if let Some(i) = self.selected.as_mut() {
            *i += 1;
        }
    }

    /// Replace the whole list from a new listing. The selection survives
    /// when the selected item still exists, otherwise it is dropped.
    pub fn replace(&mut self, items: Vec<MediaItem>) {
        let keep = self.selected().map(|item| item.id.clone());
        self.items = items;
        self.selected = keep.and_then(|id| self.position_of(&id));
    }

    pub fn select(&mut self, id: &str) -> bool {
        match self.position_of(id) {
            Some(i) => {
                self.selected = Some(i);
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Step toward older items, stopping at the last one.
    pub fn next(&mut self) {
        if let Some(i) = self.selected {
            if i + 1 < self.items.len() {
                self.selected = Some(i + 1);
            }
        }
    }

    /// Step toward newer items, stopping at the first one.
    pub fn prev(&mut self) {
        if let Some(i) = self.selected {
            if i > 0 {
                self.selected = Some(i - 1);
            }
        }
    }

    pub fn has_next(&self) -> bool {
        matches!(self.selected, Some(i) if i + 1 < self.items.len())
    }

    pub fn has_prev(&self) -> bool {
        matches!(self.selected, Some(i) if i > 0)
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery_of(names: &[&str]) -> Gallery {
        let mut gallery = Gallery::new();
        let mut items: Vec<MediaItem> = names.iter().map(|n| MediaItem::native(n)).collect();
        items.reverse();
        for item in items {
            gallery.prepend(item);
        }
        gallery
    }

    #[test]
    fn prepend_puts_the_newest_item_first() {
        let mut gallery = Gallery::new();
        gallery.prepend(MediaItem::native("a.jpg"));
        gallery.prepend(MediaItem::native("b.jpg"));
        let ids: Vec<&str> = gallery.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["b.jpg", "a.jpg"]);
    }

    #[test]
    fn select_next_prev_round_trips() {
        let mut gallery = gallery_of(&["a.jpg", "b.jpg", "c.jpg"]);
        assert!(gallery.select("b.jpg"));
        gallery.next();
        gallery.prev();
        assert_eq!(gallery.selected().map(|i| i.id.as_str()), Some("b.jpg"));
    }

    #[test]
    fn next_clamps_at_the_last_item() {
        let mut gallery = gallery_of(&["a.jpg", "b.jpg", "c.jpg"]);
        gallery.select("c.jpg");
        gallery.next();
        gallery.next();
        assert_eq!(gallery.selected().map(|i| i.id.as_str()), Some("c.jpg"));
        assert!(!gallery.has_next());
    }

    #[test]
    fn prev_clamps_at_the_first_item() {
        let mut gallery = gallery_of(&["a.jpg", "b.jpg"]);
        gallery.select("a.jpg");
        gallery.prev();
        assert_eq!(gallery.selected().map(|i| i.id.as_str()), Some("a.jpg"));
        assert!(!gallery.has_prev());
    }

    #[test]
    fn navigation_without_a_selection_is_inert() {
        let mut gallery = gallery_of(&["a.jpg"]);
        gallery.next();
        gallery.prev();
        assert_eq!(gallery.selected(), None);
    }

    #[test]
    fn selecting_an_unknown_id_fails_and_keeps_state() {
        let mut gallery = gallery_of(&["a.jpg"]);
        gallery.select("a.jpg");
        assert!(!gallery.select("missing.jpg"));
        assert_eq!(gallery.selected().map(|i| i.id.as_str()), Some("a.jpg"));
    }

    #[test]
    fn prepend_keeps_the_selected_item_selected() {
        let mut gallery = gallery_of(&["a.jpg", "b.jpg"]);
        gallery.select("a.jpg");
        gallery.prepend(MediaItem::native("fresh.jpg"));
        assert_eq!(gallery.selected().map(|i| i.id.as_str()), Some("a.jpg"));
        assert_eq!(gallery.selected_index(), Some(1));
    }

    #[test]
    fn replace_retains_selection_when_the_item_survives() {
        let mut gallery = gallery_of(&["a.jpg", "b.jpg", "c.jpg"]);
        gallery.select("b.jpg");
        gallery.replace(vec![
            MediaItem::native("new.jpg"),
            MediaItem::native("b.jpg"),
        ]);
        assert_eq!(gallery.selected().map(|i| i.id.as_str()), Some("b.jpg"));
        assert_eq!(gallery.selected_index(), Some(1));
    }

    #[test]
    fn replace_drops_selection_when_the_item_is_gone() {
        let mut gallery = gallery_of(&["a.jpg", "b.jpg"]);
        gallery.select("b.jpg");
        gallery.replace(vec![MediaItem::native("other.jpg")]);
        assert_eq!(gallery.selected(), None);
    }
}
