use super::{
    model::MenuEntry,
    state::{DirectionResolver, OverlayLifecycle, OverlayPhase, TieredMenuState},
    submenu::TieredMenuSub,
};
use crate::{
    SharedString,
    class::Class,
    dom::{self, ListenerHandle},
};
use dioxus::prelude::*;
use std::time::Duration;
use uuid::Uuid;

/// The stacking baseline for popup overlays.
const OVERLAY_Z_INDEX: i32 = 1000;

/// Duration of the enter transition of the popup overlay.
const ENTER_TRANSITION: Duration = Duration::from_millis(120);

/// Duration of the exit transition of the popup overlay.
const EXIT_TRANSITION: Duration = Duration::from_millis(100);

/// A hierarchical menu displaying nested submenus in flyout levels,
/// rendered inline or as a popup overlay anchored to a trigger element.
pub fn TieredMenu(props: TieredMenuProps) -> Element {
    let menu_id = use_hook(|| {
        props
            .id
            .clone()
            .unwrap_or_else(|| format!("tiered-menu-{}", Uuid::new_v4()))
    });
    let popup = props.popup;
    let state = props.state;
    let on_show = props.on_show;
    let on_hide = props.on_hide;
    let mut lifecycle = use_signal(OverlayLifecycle::new);
    let mut resolver = use_signal(DirectionResolver::new);
    let mut listeners = use_signal(|| None::<OverlayListeners>);

    // Watches the externally held handle and drives the transitions.
    // The flyout direction is invalidated on every show so that it gets
    // measured again before the overlay becomes visible.
    use_effect(move || {
        if !popup {
            return;
        }
        let Some(mut state) = state else { return };
        if state.read().is_visible() {
            let shown = lifecycle.write().request_show();
            if shown.is_some() {
                resolver.write().recompute();
            }
        } else {
            let hidden = lifecycle.write().request_hide();
            if let Some(epoch) = hidden {
                if let Some(handler) = on_hide {
                    handler.call(());
                }
                spawn(async move {
                    tokio::time::sleep(EXIT_TRANSITION).await;
                    if lifecycle.write().finish_exit(epoch) {
                        resolver.write().recompute();
                        state.write().clear_anchor();
                    }
                });
            }
        }
    });

    // Binds the dismissal listeners once the overlay is fully visible
    // and releases them as soon as it starts leaving.
    let container_id = menu_id.clone();
    use_effect(move || {
        let phase = lifecycle.read().phase();
        if phase == OverlayPhase::Visible {
            if listeners.peek().is_none() {
                let anchor = state
                    .and_then(|state| state.peek().anchor().map(String::from))
                    .unwrap_or_default();
                let dismiss = move || {
                    if let Some(mut state) = state {
                        state.write().hide();
                    }
                };
                listeners.set(Some(OverlayListeners::bind(&container_id, &anchor, dismiss)));
            }
        } else if listeners.peek().is_some() {
            if let Some(bound) = listeners.take() {
                bound.release();
            }
        }
    });

    use_drop(move || {
        if let Some(bound) = listeners.take() {
            bound.release();
        }
    });

    let phase = lifecycle.read().phase();
    let direction = resolver.read().direction();
    if popup && !phase.is_mounted() {
        return rsx! {};
    }

    // An invisible probe measured before the first visible render of a
    // show-cycle determines which side submenus fly out to.
    if !direction.is_resolved() {
        let probe_id = format!("{menu_id}-probe");
        let mount_id = probe_id.clone();
        let epoch = resolver.peek().epoch();
        return rsx! {
            span {
                id: "{probe_id}",
                onmounted: move |_| {
                    let probe_id = mount_id.clone();
                    spawn(async move {
                        let (left, width) = dom::measure_offset(&probe_id).await.unwrap_or((0.0, 1.0));
                        resolver.write().resolve(epoch, left, width);
                    });
                },
            }
        };
    }

    let mut container_style = match overlay_z_index(props.auto_z_index, props.z_index) {
        Some(z_index) if popup => format!("z-index: {z_index};"),
        _ => String::new(),
    };
    if !props.style.is_empty() {
        if !container_style.is_empty() {
            container_style.push(' ');
        }
        container_style.push_str(&props.style);
    }

    let append_to = props.append_to.clone();
    let mount_container_id = menu_id.clone();
    rsx! {
        div {
            id: "{menu_id}",
            class: "{props.class}",
            class: if popup { "is-overlay" },
            class: if phase == OverlayPhase::Entering { "is-entering" },
            class: if phase == OverlayPhase::Exiting { "is-exiting" },
            style: if !container_style.is_empty() { "{container_style}" },
            "data-test-id": if !props.data_test_id.is_empty() { "{props.data_test_id}" },
            onmounted: move |_| {
                if !append_to.is_empty() {
                    dom::reparent_into(&mount_container_id, &append_to);
                }
                if !popup {
                    return;
                }
                if let Some(state) = state {
                    if let Some(anchor) = state.peek().anchor() {
                        dom::position_overlay(&mount_container_id, anchor);
                    }
                }
                if lifecycle.peek().phase() == OverlayPhase::Entering {
                    if let Some(handler) = on_show {
                        handler.call(());
                    }
                    let epoch = lifecycle.peek().epoch();
                    spawn(async move {
                        tokio::time::sleep(ENTER_TRANSITION).await;
                        lifecycle.write().finish_enter(epoch);
                    });
                }
            },
            TieredMenuSub {
                menu_id: menu_id.clone(),
                model: props.model.clone(),
                root: true,
                popup,
                direction,
                on_leaf_click: move |_| {
                    if popup {
                        if let Some(mut state) = state {
                            state.write().hide();
                        }
                    }
                },
            }
        }
    }
}

/// The [`TieredMenu`] properties struct for the configuration of the
/// component.
#[derive(Clone, PartialEq, Props)]
pub struct TieredMenuProps {
    /// An optional id for the widget; a unique id is generated if omitted.
    #[props(into)]
    pub id: Option<String>,
    /// The menu entries rendered at the root level.
    #[props(default)]
    pub model: Vec<MenuEntry>,
    /// A flag to operate as a popup overlay instead of an inline menubar.
    #[props(default)]
    pub popup: bool,
    /// The externally held handle driving a popup menu.
    pub state: Option<Signal<TieredMenuState>>,
    /// The class attribute for the component.
    #[props(into, default = "tiered-menu")]
    pub class: Class,
    /// An inline style for the root container.
    #[props(into, default)]
    pub style: SharedString,
    /// A flag to assign a stacking index to the popup overlay.
    #[props(default = true)]
    pub auto_z_index: bool,
    /// A stacking index for the popup overlay; `0` selects one above
    /// the baseline.
    #[props(default)]
    pub z_index: i32,
    /// The id of an element (or `body`) the overlay is moved into when
    /// it mounts.
    #[props(into, default)]
    pub append_to: SharedString,
    /// An event handler to be called when the popup overlay has been
    /// shown.
    pub on_show: Option<EventHandler<()>>,
    /// An event handler to be called when the popup overlay starts
    /// hiding.
    pub on_hide: Option<EventHandler<()>>,
    /// An optional test identifier attached to the root element.
    #[props(into, default)]
    pub data_test_id: SharedString,
}

/// The document and window listeners held while the overlay is visible.
#[derive(Clone)]
struct OverlayListeners {
    outside_click: ListenerHandle,
    resize: ListenerHandle,
    scroll: ListenerHandle,
}

impl OverlayListeners {
    /// Binds the listeners dismissing the overlay on outside clicks,
    /// window resizes, and scrolling around the anchor element.
    fn bind(
        container_id: &str,
        anchor_id: &str,
        on_dismiss: impl FnMut() + Clone + 'static,
    ) -> Self {
        Self {
            outside_click: dom::listen_outside_click(container_id, on_dismiss.clone()),
            resize: dom::listen_resize(container_id, on_dismiss.clone()),
            scroll: dom::listen_anchor_scroll(container_id, anchor_id, on_dismiss),
        }
    }

    /// Releases all listeners.
    fn release(&self) {
        self.outside_click.unbind();
        self.resize.unbind();
        self.scroll.unbind();
    }
}

/// Returns the stacking index applied to the popup overlay.
fn overlay_z_index(auto_z_index: bool, z_index: i32) -> Option<i32> {
    if !auto_z_index {
        return None;
    }
    Some(if z_index != 0 {
        z_index
    } else {
        OVERLAY_Z_INDEX + 1
    })
}
