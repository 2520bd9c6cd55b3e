use super::model::MenuItem;
use dioxus::prelude::*;

/// An externally held handle driving a popup menu.
///
/// The handle is usually stored in a signal by the caller, whose trigger
/// element toggles it while the [`TieredMenu`](super::TieredMenu) component
/// watches it and runs the show/hide transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TieredMenuState {
    /// A flag to indicate whether the menu is requested to be visible.
    visible: bool,
    /// The id of the anchor element recorded when the menu was shown.
    anchor: Option<String>,
}

impl TieredMenuState {
    /// Creates a new instance.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the menu, recording the given element as the anchor
    /// that the popup overlay is positioned against.
    #[inline]
    pub fn show(&mut self, anchor_id: impl Into<String>) {
        self.anchor = Some(anchor_id.into());
        self.visible = true;
    }

    /// Hides the menu. The anchor is kept until the exit transition
    /// has completed so that scroll dismissal can keep tracking it.
    #[inline]
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Toggles the menu between shown and hidden.
    #[inline]
    pub fn toggle(&mut self, anchor_id: impl Into<String>) {
        if self.visible {
            self.hide();
        } else {
            self.show(anchor_id);
        }
    }

    /// Returns `true` if the menu is requested to be visible.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the id of the anchor element recorded by the last show.
    #[inline]
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Clears the recorded anchor.
    #[inline]
    pub(crate) fn clear_anchor(&mut self) {
        self.anchor = None;
    }
}

/// The presentation phase of the popup overlay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OverlayPhase {
    /// The overlay is not mounted.
    #[default]
    Hidden,
    /// The overlay is mounted and runs the enter transition.
    Entering,
    /// The overlay is fully shown with its dismissal listeners bound.
    Visible,
    /// The overlay is still mounted and runs the exit transition.
    Exiting,
}

impl OverlayPhase {
    /// Returns `true` if the overlay occupies the tree in this phase.
    #[inline]
    pub(crate) fn is_mounted(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// The overlay phase paired with an epoch so that transition timers
/// belonging to a superseded show or hide request are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct OverlayLifecycle {
    phase: OverlayPhase,
    epoch: u32,
}

impl OverlayLifecycle {
    /// Creates a new instance in the hidden phase.
    #[inline]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the current phase.
    #[inline]
    pub(crate) fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// Returns the epoch of the current transition.
    #[inline]
    pub(crate) fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Starts the enter transition and returns its epoch,
    /// or `None` if the overlay is already showing.
    pub(crate) fn request_show(&mut self) -> Option<u32> {
        match self.phase {
            OverlayPhase::Hidden | OverlayPhase::Exiting => {
                self.phase = OverlayPhase::Entering;
                self.epoch = self.epoch.wrapping_add(1);
                Some(self.epoch)
            }
            OverlayPhase::Entering | OverlayPhase::Visible => None,
        }
    }

    /// Starts the exit transition and returns its epoch,
    /// or `None` if the overlay is already leaving or gone.
    pub(crate) fn request_hide(&mut self) -> Option<u32> {
        match self.phase {
            OverlayPhase::Entering | OverlayPhase::Visible => {
                self.phase = OverlayPhase::Exiting;
                self.epoch = self.epoch.wrapping_add(1);
                Some(self.epoch)
            }
            OverlayPhase::Hidden | OverlayPhase::Exiting => None,
        }
    }

    /// Completes the enter transition for the given epoch.
    /// Returns `false` if the transition has been superseded.
    pub(crate) fn finish_enter(&mut self, epoch: u32) -> bool {
        if self.phase == OverlayPhase::Entering && self.epoch == epoch {
            self.phase = OverlayPhase::Visible;
            true
        } else {
            false
        }
    }

    /// Completes the exit transition for the given epoch.
    /// Returns `false` if the transition has been superseded.
    pub(crate) fn finish_exit(&mut self, epoch: u32) -> bool {
        if self.phase == OverlayPhase::Exiting && self.epoch == epoch {
            self.phase = OverlayPhase::Hidden;
            true
        } else {
            false
        }
    }
}

/// The horizontal direction that nested submenu levels fly out to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FlyoutDirection {
    /// The direction has not been measured for the current show-cycle.
    #[default]
    Unresolved,
    /// Submenus open towards the left edge of the viewport.
    Left,
    /// Submenus open towards the right edge of the viewport.
    Right,
}

impl FlyoutDirection {
    /// Returns `true` if submenus open towards the left edge.
    #[inline]
    pub fn is_left(self) -> bool {
        matches!(self, Self::Left)
    }

    /// Returns `true` if the direction has been measured.
    #[inline]
    pub fn is_resolved(self) -> bool {
        !matches!(self, Self::Unresolved)
    }
}

/// Resolves the flyout direction from a position probe, discarding
/// measurements that belong to a superseded show-cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct DirectionResolver {
    direction: FlyoutDirection,
    epoch: u32,
}

impl DirectionResolver {
    /// Creates a new instance with an unresolved direction.
    #[inline]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the resolved direction.
    #[inline]
    pub(crate) fn direction(&self) -> FlyoutDirection {
        self.direction
    }

    /// Returns the epoch of the pending measurement.
    #[inline]
    pub(crate) fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Invalidates the direction so that it gets measured again,
    /// and returns the epoch of the new measurement.
    pub(crate) fn recompute(&mut self) -> u32 {
        self.direction = FlyoutDirection::Unresolved;
        self.epoch = self.epoch.wrapping_add(1);
        self.epoch
    }

    /// Applies a measurement taken for the given epoch: submenus open
    /// to the right when the menu sits in the left half of the viewport.
    /// Returns `false` if the measurement was stale and got discarded.
    pub(crate) fn resolve(&mut self, epoch: u32, left: f64, viewport_width: f64) -> bool {
        if self.epoch != epoch || self.direction.is_resolved() {
            return false;
        }
        self.direction = if left < viewport_width / 2.0 {
            FlyoutDirection::Right
        } else {
            FlyoutDirection::Left
        };
        true
    }
}

/// Returns `true` if hovering an item at a level expands its submenu.
/// Nested levels always expand on hover; the root level only does so
/// in popup mode or once a sibling has been activated by a click.
#[inline]
pub(crate) fn hover_selects(root: bool, popup: bool, level_has_active: bool) -> bool {
    if root { popup || level_has_active } else { true }
}

/// How a click on a menu item is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClickBehavior {
    /// The item is disabled: no state change and no callbacks.
    Ignore,
    /// The item owns a submenu: toggle its expansion.
    ToggleSubmenu,
    /// The item is a leaf: select it and collapse the whole tree.
    Leaf,
}

/// Classifies a click on the given item.
#[inline]
pub(crate) fn classify_click(item: &MenuItem) -> ClickBehavior {
    if item.disabled {
        ClickBehavior::Ignore
    } else if item.has_children() {
        ClickBehavior::ToggleSubmenu
    } else {
        ClickBehavior::Leaf
    }
}

/// The menu operation bound to a key pressed on an item trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuKey {
    /// Focus the next focusable sibling.
    NextItem,
    /// Focus the previous focusable sibling.
    PrevItem,
    /// Expand the submenu of the focused item.
    ExpandItem,
    /// Collapse the level and return focus to the owning item.
    CollapseLevel,
    /// A key the menu does not handle.
    Other,
}

/// Maps a key press to a menu operation.
pub(crate) fn classify_key(key: &Key) -> MenuKey {
    match key {
        Key::ArrowDown => MenuKey::NextItem,
        Key::ArrowUp => MenuKey::PrevItem,
        Key::ArrowRight => MenuKey::ExpandItem,
        Key::ArrowLeft | Key::Escape => MenuKey::CollapseLevel,
        _ => MenuKey::Other,
    }
}

/// Returns the active index after clicking the item at `index`:
/// a second click on the active item collapses it, while clicking
/// a sibling replaces the previously active one.
#[inline]
pub(crate) fn toggled_active(active: Option<usize>, index: usize) -> Option<usize> {
    if active == Some(index) { None } else { Some(index) }
}

#[cfg(test)]
mod tests {
    use super::{
        ClickBehavior, DirectionResolver, FlyoutDirection, MenuKey, OverlayLifecycle,
        OverlayPhase, TieredMenuState, classify_click, classify_key, hover_selects,
        toggled_active,
    };
    use crate::menu::model::MenuItem;
    use dioxus::prelude::Key;

    #[test]
    fn it_toggles_popup_visibility() {
        let mut state = TieredMenuState::new();
        assert!(!state.is_visible());
        assert_eq!(state.anchor(), None);

        state.toggle("menu-trigger");
        assert!(state.is_visible());
        assert_eq!(state.anchor(), Some("menu-trigger"));

        state.toggle("menu-trigger");
        assert!(!state.is_visible());
        assert_eq!(state.anchor(), Some("menu-trigger"));

        state.clear_anchor();
        assert_eq!(state.anchor(), None);
    }

    #[test]
    fn it_runs_show_and_hide_transitions() {
        let mut lifecycle = OverlayLifecycle::new();
        assert_eq!(lifecycle.phase(), OverlayPhase::Hidden);
        assert!(!lifecycle.phase().is_mounted());

        let enter = lifecycle.request_show().unwrap();
        assert_eq!(lifecycle.phase(), OverlayPhase::Entering);
        assert!(lifecycle.request_show().is_none());
        assert!(lifecycle.finish_enter(enter));
        assert_eq!(lifecycle.phase(), OverlayPhase::Visible);

        let exit = lifecycle.request_hide().unwrap();
        assert_eq!(lifecycle.phase(), OverlayPhase::Exiting);
        assert!(lifecycle.request_hide().is_none());
        assert!(lifecycle.finish_exit(exit));
        assert_eq!(lifecycle.phase(), OverlayPhase::Hidden);
    }

    #[test]
    fn it_ignores_superseded_transition_timers() {
        let mut lifecycle = OverlayLifecycle::new();
        let enter = lifecycle.request_show().unwrap();
        let exit = lifecycle.request_hide().unwrap();

        // The enter timer fires after the hide request took over.
        assert!(!lifecycle.finish_enter(enter));
        assert_eq!(lifecycle.phase(), OverlayPhase::Exiting);

        let reenter = lifecycle.request_show().unwrap();
        assert!(!lifecycle.finish_exit(exit));
        assert_eq!(lifecycle.phase(), OverlayPhase::Entering);
        assert!(lifecycle.finish_enter(reenter));
        assert_eq!(lifecycle.phase(), OverlayPhase::Visible);
    }

    #[test]
    fn it_resolves_the_flyout_direction() {
        let mut resolver = DirectionResolver::new();
        assert!(!resolver.direction().is_resolved());

        let epoch = resolver.recompute();
        assert!(resolver.resolve(epoch, 100.0, 1000.0));
        assert_eq!(resolver.direction(), FlyoutDirection::Right);

        let epoch = resolver.recompute();
        assert!(resolver.resolve(epoch, 800.0, 1000.0));
        assert_eq!(resolver.direction(), FlyoutDirection::Left);
        assert!(resolver.direction().is_left());
    }

    #[test]
    fn it_discards_stale_probe_measurements() {
        let mut resolver = DirectionResolver::new();
        let stale = resolver.recompute();
        let epoch = resolver.recompute();

        assert!(!resolver.resolve(stale, 800.0, 1000.0));
        assert!(!resolver.direction().is_resolved());

        assert!(resolver.resolve(epoch, 100.0, 1000.0));
        assert_eq!(resolver.direction(), FlyoutDirection::Right);
        assert!(!resolver.resolve(epoch, 800.0, 1000.0));
        assert_eq!(resolver.direction(), FlyoutDirection::Right);
    }

    #[test]
    fn it_gates_root_hover_activation() {
        assert!(!hover_selects(true, false, false));
        assert!(hover_selects(true, false, true));
        assert!(hover_selects(true, true, false));
        assert!(hover_selects(false, false, false));
    }

    #[test]
    fn it_classifies_item_clicks() {
        let leaf = MenuItem::new("Quit");
        assert_eq!(classify_click(&leaf), ClickBehavior::Leaf);

        let parent = MenuItem::new("File").with_items(vec![MenuItem::new("New").into()]);
        assert_eq!(classify_click(&parent), ClickBehavior::ToggleSubmenu);
        assert_eq!(classify_click(&parent.clone().disable()), ClickBehavior::Ignore);
    }

    #[test]
    fn it_maps_navigation_keys() {
        assert_eq!(classify_key(&Key::ArrowDown), MenuKey::NextItem);
        assert_eq!(classify_key(&Key::ArrowUp), MenuKey::PrevItem);
        assert_eq!(classify_key(&Key::ArrowRight), MenuKey::ExpandItem);
        assert_eq!(classify_key(&Key::ArrowLeft), MenuKey::CollapseLevel);
        assert_eq!(classify_key(&Key::Escape), MenuKey::CollapseLevel);
        assert_eq!(classify_key(&Key::Enter), MenuKey::Other);
        assert_eq!(classify_key(&Key::Character("a".to_owned())), MenuKey::Other);
    }

    #[test]
    fn it_replaces_the_active_sibling() {
        assert_eq!(toggled_active(None, 2), Some(2));
        assert_eq!(toggled_active(Some(1), 2), Some(2));
        assert_eq!(toggled_active(Some(2), 2), None);
    }
}
