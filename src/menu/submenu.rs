use super::{
    model::{self, MenuEntry, MenuSelectEvent},
    state::{self, ClickBehavior, FlyoutDirection, MenuKey},
};
use crate::dom;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::fa_solid_icons::FaAngleRight};
use std::time::Duration;

/// Delay before focus moves into a submenu opened with the right arrow
/// key, giving the nested level a chance to mount.
const SUBMENU_FOCUS_DELAY: Duration = Duration::from_millis(50);

/// One level of a tiered menu: a menubar at the root and a flyout list
/// for nested levels, expanding at most one submenu at a time.
pub fn TieredMenuSub(props: TieredMenuSubProps) -> Element {
    let mut active_index = use_signal(|| None::<usize>);
    let list_id = if props.root {
        format!("{}-list", props.menu_id)
    } else {
        format!("{}-list-{}", props.menu_id, props.path)
    };

    // Each level clears its own active item when a click lands outside
    // of its subtree.
    let outside_click = use_hook(|| {
        dom::listen_outside_click(&list_id, move || {
            if active_index.peek().is_some() {
                active_index.set(None);
            }
        })
    });
    use_drop(move || outside_click.unbind());

    let root = props.root;
    let popup = props.popup;
    let direction = props.direction;
    let list_class = if root { "menu-list" } else { "submenu-list" };
    let list_role = if root { "menubar" } else { "menu" };
    let orientation = if root { "horizontal" } else { "vertical" };
    let flyout_style = if direction.is_left() {
        "right: 100%"
    } else {
        "left: 100%"
    };

    // Collapses this level and lets ancestors collapse theirs in turn.
    let on_leaf_click = props.on_leaf_click;
    let mut leaf_chain = move || {
        if active_index.peek().is_some() {
            active_index.set(None);
        }
        on_leaf_click.call(());
    };

    rsx! {
        ul {
            id: "{list_id}",
            class: "{list_class}",
            role: "{list_role}",
            aria_orientation: "{orientation}",
            style: if !root { "{flyout_style}" },
            {props.model.iter().enumerate().map(|(index, entry)| {
                match entry {
                    MenuEntry::Separator => rsx! {
                        li { key: "{index}", class: "menu-separator", role: "separator" }
                    },
                    MenuEntry::Item(item) => {
                        let item_path = join_path(&props.path, index);
                        let trigger_id = trigger_dom_id(&props.menu_id, &item_path);
                        let has_children = item.has_children();
                        let is_active = active_index() == Some(index);
                        let disabled = item.disabled;

                        let hover = move |event: MouseEvent| {
                            if disabled {
                                event.prevent_default();
                                return;
                            }
                            if state::hover_selects(root, popup, active_index.peek().is_some()) {
                                active_index.set(Some(index));
                            }
                        };

                        let click_item = item.clone();
                        let click_path = item_path.clone();
                        let click_menu_id = props.menu_id.clone();
                        let click = move |event: MouseEvent| {
                            let behavior = state::classify_click(&click_item);
                            if behavior == ClickBehavior::Ignore {
                                event.prevent_default();
                                return;
                            }
                            if click_item.url.is_empty() {
                                event.prevent_default();
                            }
                            if let Some(handler) = click_item.on_select.as_ref() {
                                handler.call(MenuSelectEvent {
                                    event: event.clone(),
                                    item: click_item.clone(),
                                });
                            }
                            let mut expanded = false;
                            if behavior == ClickBehavior::ToggleSubmenu {
                                let next = state::toggled_active(*active_index.peek(), index);
                                expanded = next.is_some();
                                active_index.set(next);
                            }
                            let point = event.client_coordinates();
                            if point.x == 0.0 && point.y == 0.0 {
                                // A keyboard-triggered click carries no pointer
                                // position; move focus into the opened submenu.
                                if expanded {
                                    focus_first_child(
                                        &click_menu_id,
                                        &click_path,
                                        &click_item.items,
                                        Duration::ZERO,
                                    );
                                }
                            } else if behavior == ClickBehavior::Leaf {
                                leaf_chain();
                            }
                        };

                        let key_item = item.clone();
                        let key_entries = props.model.clone();
                        let key_menu_id = props.menu_id.clone();
                        let key_level_path = props.path.clone();
                        let key_item_path = item_path.clone();
                        let on_collapse = props.on_collapse;
                        let keydown = move |event: KeyboardEvent| {
                            match state::classify_key(&event.key()) {
                                MenuKey::NextItem => {
                                    event.prevent_default();
                                    if let Some(next) = model::next_focusable(&key_entries, index) {
                                        let path = join_path(&key_level_path, next);
                                        dom::focus_element(&trigger_dom_id(&key_menu_id, &path));
                                    }
                                }
                                MenuKey::PrevItem => {
                                    event.prevent_default();
                                    if let Some(prev) = model::prev_focusable(&key_entries, index) {
                                        let path = join_path(&key_level_path, prev);
                                        dom::focus_element(&trigger_dom_id(&key_menu_id, &path));
                                    }
                                }
                                MenuKey::ExpandItem => {
                                    event.prevent_default();
                                    if key_item.has_children() {
                                        active_index.set(Some(index));
                                        focus_first_child(
                                            &key_menu_id,
                                            &key_item_path,
                                            &key_item.items,
                                            SUBMENU_FOCUS_DELAY,
                                        );
                                    }
                                }
                                MenuKey::CollapseLevel => {
                                    if let Some(handler) = on_collapse {
                                        event.prevent_default();
                                        handler.call(());
                                    }
                                }
                                MenuKey::Other => {}
                            }
                        };

                        let collapse_trigger = trigger_id.clone();
                        rsx! {
                            li {
                                key: "{index}",
                                role: "none",
                                class: "menu-item",
                                class: if is_active { "is-active" },
                                class: if !item.class.is_empty() { "{item.class}" },
                                style: if !item.style.is_empty() { "{item.style}" },
                                onmouseenter: hover,
                                a {
                                    id: "{trigger_id}",
                                    class: "menu-item-link",
                                    class: if disabled { "is-disabled" },
                                    role: "menuitem",
                                    tabindex: if !disabled { "0" },
                                    aria_haspopup: if has_children { "true" },
                                    aria_expanded: if has_children { "{is_active}" },
                                    aria_disabled: if disabled { "true" },
                                    href: if !item.url.is_empty() { "{item.url}" },
                                    onclick: click,
                                    onkeydown: keydown,
                                    if !item.icon.is_empty() {
                                        span { class: "menu-item-icon {item.icon}" }
                                    }
                                    span { class: "menu-item-label", "{item.label}" }
                                    if has_children {
                                        span {
                                            class: "submenu-indicator",
                                            Icon { icon: FaAngleRight, width: 14, height: 14 }
                                        }
                                    }
                                }
                                if has_children && is_active {
                                    TieredMenuSub {
                                        menu_id: props.menu_id.clone(),
                                        path: item_path.clone(),
                                        model: item.items.clone(),
                                        popup,
                                        direction,
                                        on_leaf_click: move |_| leaf_chain(),
                                        on_collapse: move |_| {
                                            active_index.set(None);
                                            dom::focus_element(&collapse_trigger);
                                        },
                                    }
                                }
                            }
                        }
                    }
                }
            })}
        }
    }
}

/// The [`TieredMenuSub`] properties struct for the configuration of one
/// menu level.
#[derive(Clone, PartialEq, Props)]
pub struct TieredMenuSubProps {
    /// The id of the owning menu widget, the root of its DOM id scheme.
    #[props(into)]
    pub menu_id: String,
    /// The index path of the item owning this level; empty at the root.
    #[props(into, default)]
    pub path: String,
    /// The menu entries rendered at this level.
    #[props(default)]
    pub model: Vec<MenuEntry>,
    /// A flag to render this level as the horizontal root menubar.
    #[props(default)]
    pub root: bool,
    /// A flag to indicate that the widget operates as a popup overlay.
    #[props(default)]
    pub popup: bool,
    /// The flyout direction shared by all nested levels.
    #[props(default)]
    pub direction: FlyoutDirection,
    /// An event handler to be called when a leaf item got clicked,
    /// after the level has collapsed itself.
    pub on_leaf_click: EventHandler<()>,
    /// An event handler to be called when the level asks the parent to
    /// collapse it and take back focus.
    pub on_collapse: Option<EventHandler<()>>,
}

/// Focuses the first focusable item of a freshly opened submenu once it
/// has had a chance to mount.
fn focus_first_child(menu_id: &str, parent_path: &str, entries: &[MenuEntry], delay: Duration) {
    if let Some(first) = model::first_focusable(entries) {
        let target = trigger_dom_id(menu_id, &join_path(parent_path, first));
        spawn(async move {
            tokio::time::sleep(delay).await;
            dom::focus_element(&target);
        });
    }
}

/// Appends an index to a level path.
fn join_path(path: &str, index: usize) -> String {
    if path.is_empty() {
        index.to_string()
    } else {
        format!("{path}-{index}")
    }
}

/// Builds the DOM id of an item trigger from its index path.
fn trigger_dom_id(menu_id: &str, item_path: &str) -> String {
    format!("{menu_id}-menuitem-{item_path}")
}

#[cfg(test)]
mod tests {
    use super::{join_path, trigger_dom_id};

    #[test]
    fn it_builds_trigger_ids_from_index_paths() {
        assert_eq!(join_path("", 2), "2");
        assert_eq!(join_path("2", 0), "2-0");
        assert_eq!(trigger_dom_id("tiered-menu-1", "2-0"), "tiered-menu-1-menuitem-2-0");
    }
}
