use dioxus::prelude::*;
use dioxus_tiered_menu::prelude::*;

fn render_to_string(app: fn() -> Element) -> String {
    let mut vdom = VirtualDom::new(app);
    vdom.rebuild_in_place();
    dioxus_ssr::render(&vdom)
}

fn file_menu() -> Vec<MenuEntry> {
    vec![
        MenuItem::new("File")
            .with_items(vec![MenuItem::new("New").into(), MenuItem::new("Open").into()])
            .into(),
        MenuItem::new("Help").into(),
    ]
}

#[test]
fn it_renders_inactive_submenus_lazily() {
    fn app() -> Element {
        rsx! {
            TieredMenuSub {
                menu_id: "demo",
                model: file_menu(),
                root: true,
                direction: FlyoutDirection::Right,
                on_leaf_click: move |_| {},
            }
        }
    }

    let html = render_to_string(app);
    assert!(html.contains(r#"role="menubar""#));
    assert!(html.contains("File"));
    assert!(html.contains("Help"));
    assert!(html.contains(r#"aria-haspopup="true""#));
    assert!(html.contains(r#"aria-expanded="false""#));

    // The collapsed "File" submenu must not be in the tree at all.
    assert!(!html.contains(r#"role="menu""#));
    assert!(!html.contains("New"));
    assert!(!html.contains("Open"));
}

#[test]
fn it_renders_an_empty_model_as_an_empty_list() {
    fn app() -> Element {
        rsx! {
            TieredMenuSub { menu_id: "demo", root: true, on_leaf_click: move |_| {} }
        }
    }

    let html = render_to_string(app);
    assert!(html.contains(r#"role="menubar""#));
    assert!(!html.contains("<li"));
}

#[test]
fn it_renders_separators_and_disabled_items() {
    fn app() -> Element {
        rsx! {
            TieredMenuSub {
                menu_id: "demo",
                model: vec![
                    MenuItem::new("New").with_class(["menu-item-new", "is-featured"]).into(),
                    MenuEntry::Separator,
                    MenuItem::new("Save").with_class(vec!["menu-item-save"]).into(),
                    MenuItem::new("Quit")
                        .with_class(Class::check("is-danger", true))
                        .disable()
                        .into(),
                ],
                root: true,
                on_leaf_click: move |_| {},
            }
        }
    }

    let html = render_to_string(app);
    assert!(html.contains(r#"role="separator""#));
    assert!(html.contains(r#"aria-disabled="true""#));
    assert!(html.contains("is-disabled"));
    assert!(html.contains(r#"tabindex="0""#));
    assert!(html.contains("menu-item-new is-featured"));
    assert!(html.contains("menu-item-save"));
    assert!(html.contains("is-danger"));
}

#[test]
fn it_offsets_nested_levels_by_the_flyout_direction() {
    fn left() -> Element {
        rsx! {
            TieredMenuSub {
                menu_id: "demo",
                path: "0",
                model: vec![MenuItem::new("New").into()],
                direction: FlyoutDirection::Left,
                on_leaf_click: move |_| {},
            }
        }
    }
    fn right() -> Element {
        rsx! {
            TieredMenuSub {
                menu_id: "demo",
                path: "0",
                model: vec![MenuItem::new("New").into()],
                direction: FlyoutDirection::Right,
                on_leaf_click: move |_| {},
            }
        }
    }

    let html = render_to_string(left);
    assert!(html.contains(r#"role="menu""#));
    assert!(html.contains(r#"aria-orientation="vertical""#));
    assert!(html.contains("right: 100%"));

    let html = render_to_string(right);
    assert!(html.contains("left: 100%"));
}

#[test]
fn it_keeps_a_hidden_popup_unmounted() {
    fn app() -> Element {
        let state = use_signal(TieredMenuState::new);
        rsx! {
            TieredMenu { popup: true, state, model: file_menu() }
        }
    }

    let html = render_to_string(app);
    assert!(!html.contains("menubar"));
    assert!(!html.contains("File"));
}

#[test]
fn it_ignores_the_handle_in_inline_mode() {
    fn handle_hidden() -> Element {
        let state = use_signal(TieredMenuState::new);
        rsx! {
            TieredMenu { id: "demo", state, model: file_menu() }
        }
    }
    fn handle_shown() -> Element {
        let state = use_signal(|| {
            let mut state = TieredMenuState::new();
            state.toggle("menu-trigger");
            state
        });
        rsx! {
            TieredMenu { id: "demo", state, model: file_menu() }
        }
    }

    // An inline menu is permanently visible; toggling the handle must
    // not change what it renders.
    assert_eq!(render_to_string(handle_shown), render_to_string(handle_hidden));
}

#[test]
fn it_measures_the_flyout_direction_before_first_render() {
    fn app() -> Element {
        rsx! {
            TieredMenu { id: "demo", model: file_menu() }
        }
    }

    // An inline menu mounts its position probe first; the list appears
    // only after the probe has resolved the direction.
    let html = render_to_string(app);
    assert!(html.contains("demo-probe"));
    assert!(!html.contains("menubar"));
}
