use crate::{SharedString, class::Class};
use dioxus::prelude::*;

/// An entry of a menu model: an interactive item or a separator rule.
#[derive(Clone, PartialEq)]
pub enum MenuEntry {
    /// An interactive menu item, possibly carrying a nested submenu.
    Item(MenuItem),
    /// A non-interactive rule between groups of items.
    Separator,
}

impl MenuEntry {
    /// Returns the inner item for an `Item` entry.
    #[inline]
    pub fn as_item(&self) -> Option<&MenuItem> {
        match self {
            Self::Item(item) => Some(item),
            Self::Separator => None,
        }
    }

    /// Returns `true` if the entry can take keyboard focus.
    #[inline]
    pub(crate) fn is_focusable(&self) -> bool {
        self.as_item().is_some_and(|item| !item.disabled)
    }
}

impl From<MenuItem> for MenuEntry {
    #[inline]
    fn from(item: MenuItem) -> Self {
        Self::Item(item)
    }
}

/// A single item of a menu model.
#[derive(Clone, Default, PartialEq)]
pub struct MenuItem {
    /// The text shown in the item row.
    pub label: SharedString,
    /// An icon-font class rendered before the label; empty for no icon.
    pub icon: SharedString,
    /// The nested submenu entries; an empty list makes the item a leaf.
    pub items: Vec<MenuEntry>,
    /// A flag to suppress all interaction with the item.
    pub disabled: bool,
    /// The navigation target of the item trigger; empty for none.
    pub url: SharedString,
    /// An event handler to be called when the item is selected.
    pub on_select: Option<EventHandler<MenuSelectEvent>>,
    /// An extra class for the item row.
    pub class: Class,
    /// An inline style for the item row.
    pub style: SharedString,
}

impl MenuItem {
    /// Creates a new instance with the given label.
    #[inline]
    pub fn new(label: impl Into<SharedString>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Sets the icon-font class.
    #[inline]
    pub fn with_icon(mut self, icon: impl Into<SharedString>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Sets the nested submenu entries.
    #[inline]
    pub fn with_items(mut self, items: Vec<MenuEntry>) -> Self {
        self.items = items;
        self
    }

    /// Sets the navigation target.
    #[inline]
    pub fn with_url(mut self, url: impl Into<SharedString>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets an extra class for the item row.
    #[inline]
    pub fn with_class(mut self, class: impl Into<Class>) -> Self {
        self.class = class.into();
        self
    }

    /// Sets an inline style for the item row.
    #[inline]
    pub fn with_style(mut self, style: impl Into<SharedString>) -> Self {
        self.style = style.into();
        self
    }

    /// Sets the handler called when the item is selected.
    #[inline]
    pub fn with_on_select(mut self, handler: impl FnMut(MenuSelectEvent) + 'static) -> Self {
        self.on_select = Some(EventHandler::new(handler));
        self
    }

    /// Disables the item.
    #[inline]
    pub fn disable(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Returns `true` if the item owns a submenu.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.items.is_empty()
    }
}

/// The payload passed to an item's `on_select` handler.
#[derive(Clone)]
pub struct MenuSelectEvent {
    /// The originating mouse event.
    pub event: MouseEvent,
    /// The item that was selected.
    pub item: MenuItem,
}

/// Returns the index of the first entry that can take keyboard focus.
pub(crate) fn first_focusable(entries: &[MenuEntry]) -> Option<usize> {
    entries.iter().position(MenuEntry::is_focusable)
}

/// Returns the index of the next focusable entry after `index`,
/// or `None` at the end of the list.
pub(crate) fn next_focusable(entries: &[MenuEntry], index: usize) -> Option<usize> {
    entries
        .iter()
        .enumerate()
        .skip(index + 1)
        .find(|(_, entry)| entry.is_focusable())
        .map(|(position, _)| position)
}

/// Returns the index of the previous focusable entry before `index`,
/// or `None` at the start of the list.
pub(crate) fn prev_focusable(entries: &[MenuEntry], index: usize) -> Option<usize> {
    entries
        .iter()
        .enumerate()
        .take(index)
        .rev()
        .find(|(_, entry)| entry.is_focusable())
        .map(|(position, _)| position)
}

#[cfg(test)]
mod tests {
    use super::{MenuEntry, MenuItem, first_focusable, next_focusable, prev_focusable};

    fn sample_entries() -> Vec<MenuEntry> {
        vec![
            MenuItem::new("New").into(),
            MenuEntry::Separator,
            MenuItem::new("Open").disable().into(),
            MenuItem::new("Save").into(),
        ]
    }

    #[test]
    fn it_skips_separators_and_disabled_items() {
        let entries = sample_entries();
        assert_eq!(first_focusable(&entries), Some(0));
        assert_eq!(next_focusable(&entries, 0), Some(3));
        assert_eq!(prev_focusable(&entries, 3), Some(0));
    }

    #[test]
    fn it_stops_at_list_boundaries() {
        let entries = sample_entries();
        assert_eq!(next_focusable(&entries, 3), None);
        assert_eq!(prev_focusable(&entries, 0), None);
        assert_eq!(first_focusable(&[MenuEntry::Separator]), None);
    }

    #[test]
    fn it_treats_empty_submenus_as_leaves() {
        assert!(!MenuItem::new("Help").has_children());
        assert!(!MenuItem::new("Help").with_items(Vec::new()).has_children());
        let parent = MenuItem::new("File").with_items(vec![MenuItem::new("New").into()]);
        assert!(parent.has_children());
    }
}
