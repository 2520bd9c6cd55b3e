//! Browser interop built on [`document::eval`].
//!
//! The menu relies on a few facilities the virtual DOM does not cover:
//! absolute positioning against an anchor element, focus transfer,
//! geometry probes, and document or window event listeners with an
//! explicit release. Each listener registers an `AbortController` in a
//! `window`-level registry so that a rebind or a release from Rust can
//! always reach it, even after the owning component has re-rendered.

use dioxus::{document, prelude::*};

/// The name of the JS-side listener registry attached to `window`.
const LISTENER_REGISTRY: &str = "__tieredMenuListeners";

/// Moves keyboard focus to the element with the given id, if present.
pub fn focus_element(id: &str) {
    let script = format!("document.getElementById({id:?})?.focus();");
    spawn(async move {
        if let Err(err) = document::eval(&script).await {
            tracing::error!("fail to focus the element: {err}");
        }
    });
}

/// Measures the left offset of the element with the given id together
/// with the width of the document body, in CSS pixels.
pub async fn measure_offset(id: &str) -> Option<(f64, f64)> {
    let script = format!(
        "const el = document.getElementById({id:?});\n\
         dioxus.send([el ? el.getBoundingClientRect().left : 0, document.body.offsetWidth]);"
    );
    let mut eval = document::eval(&script);
    match eval.recv::<(f64, f64)>().await {
        Ok(measurement) => Some(measurement),
        Err(err) => {
            tracing::error!("fail to measure the element offset: {err}");
            None
        }
    }
}

/// Positions the element as an absolute overlay below its anchor,
/// flipping above the anchor when the viewport bottom would cut it off
/// and clamping it to the viewport on the horizontal axis.
pub fn position_overlay(id: &str, anchor_id: &str) {
    let script = format!(
        "const el = document.getElementById({id:?});\n\
         const anchor = document.getElementById({anchor_id:?});\n\
         if (el && anchor) {{\n\
             const rect = anchor.getBoundingClientRect();\n\
             let top = rect.top + rect.height;\n\
             let left = rect.left;\n\
             if (top + el.offsetHeight > window.innerHeight) {{\n\
                 top = Math.max(0, rect.top - el.offsetHeight);\n\
             }}\n\
             if (left + el.offsetWidth > window.innerWidth) {{\n\
                 left = Math.max(0, window.innerWidth - el.offsetWidth);\n\
             }}\n\
             el.style.position = 'absolute';\n\
             el.style.top = top + window.scrollY + 'px';\n\
             el.style.left = left + window.scrollX + 'px';\n\
         }}"
    );
    spawn(async move {
        if let Err(err) = document::eval(&script).await {
            tracing::error!("fail to position the overlay: {err}");
        }
    });
}

/// Moves the element into the given container, either `body` or the id
/// of another element.
pub fn reparent_into(id: &str, target: &str) {
    let script = format!(
        "const el = document.getElementById({id:?});\n\
         const target = {target:?} === 'body' ? document.body : document.getElementById({target:?});\n\
         if (el && target && el.parentElement !== target) {{ target.appendChild(el); }}"
    );
    spawn(async move {
        if let Err(err) = document::eval(&script).await {
            tracing::error!("fail to reparent the element: {err}");
        }
    });
}

/// A handle to a document or window listener installed through
/// [`document::eval`]. Dropping the handle does not release the
/// listener; call [`unbind`](Self::unbind) for that.
#[derive(Clone)]
pub struct ListenerHandle {
    key: String,
    task: Task,
}

impl ListenerHandle {
    /// Cancels the receiving task and aborts the JS-side listener.
    pub fn unbind(&self) {
        self.task.cancel();
        let script = format!(
            "window.{LISTENER_REGISTRY}?.[{key:?}]?.abort();\n\
             if (window.{LISTENER_REGISTRY}) {{ delete window.{LISTENER_REGISTRY}[{key:?}]; }}",
            key = self.key,
        );
        // Unbinding usually happens while the owning scope is being
        // dropped, where a scope-local task would be cancelled unrun.
        spawn_forever(async move {
            if let Err(err) = document::eval(&script).await {
                tracing::warn!("fail to release a listener: {err}");
            }
        });
    }
}

/// Spawns a task streaming events from the given registration script.
fn listen(key: String, script: String, mut on_event: impl FnMut() + 'static) -> ListenerHandle {
    let task = spawn(async move {
        let mut eval = document::eval(&script);
        while eval.recv::<bool>().await.is_ok() {
            on_event();
        }
    });
    ListenerHandle { key, task }
}

/// Builds a script that registers a single abortable event listener.
fn registration_script(key: &str, target: &str, event: &str, body: &str) -> String {
    format!(
        "window.{LISTENER_REGISTRY} = window.{LISTENER_REGISTRY} || {{}};\n\
         window.{LISTENER_REGISTRY}[{key:?}]?.abort();\n\
         const controller = new AbortController();\n\
         window.{LISTENER_REGISTRY}[{key:?}] = controller;\n\
         {target}.addEventListener({event:?}, (event) => {{\n\
             {body}\n\
         }}, {{ signal: controller.signal }});"
    )
}

/// Installs a document click listener reporting clicks that land
/// outside the element with the given id.
pub fn listen_outside_click(
    element_id: &str,
    on_outside_click: impl FnMut() + 'static,
) -> ListenerHandle {
    let key = format!("{element_id}:click");
    let body = format!(
        "const el = document.getElementById({element_id:?});\n\
         if (el && !el.contains(event.target)) {{ dioxus.send(true); }}"
    );
    let script = registration_script(&key, "document", "click", &body);
    listen(key, script, on_outside_click)
}

/// Installs a window resize listener keyed by the given element id.
pub fn listen_resize(element_id: &str, on_resize: impl FnMut() + 'static) -> ListenerHandle {
    let key = format!("{element_id}:resize");
    let script = registration_script(&key, "window", "resize", "dioxus.send(true);");
    listen(key, script, on_resize)
}

/// Installs scroll listeners on the scrollable ancestors of the anchor
/// element and on the window itself, keyed by the given element id.
pub fn listen_anchor_scroll(
    element_id: &str,
    anchor_id: &str,
    on_scroll: impl FnMut() + 'static,
) -> ListenerHandle {
    let key = format!("{element_id}:scroll");
    let script = format!(
        "window.{LISTENER_REGISTRY} = window.{LISTENER_REGISTRY} || {{}};\n\
         window.{LISTENER_REGISTRY}[{key:?}]?.abort();\n\
         const controller = new AbortController();\n\
         window.{LISTENER_REGISTRY}[{key:?}] = controller;\n\
         const options = {{ signal: controller.signal }};\n\
         const anchor = document.getElementById({anchor_id:?});\n\
         let node = anchor ? anchor.parentElement : null;\n\
         while (node) {{\n\
             const style = getComputedStyle(node);\n\
             if (/(auto|scroll)/.test(style.overflow + style.overflowX + style.overflowY)) {{\n\
                 node.addEventListener('scroll', () => dioxus.send(true), options);\n\
             }}\n\
             node = node.parentElement;\n\
         }}\n\
         window.addEventListener('scroll', () => dioxus.send(true), options);"
    );
    listen(key, script, on_scroll)
}
