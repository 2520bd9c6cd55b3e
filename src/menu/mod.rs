//! Tiered menus with nested flyout submenus.

mod model;
mod state;
mod submenu;
mod tiered;

pub use model::{MenuEntry, MenuItem, MenuSelectEvent};
pub use state::{FlyoutDirection, TieredMenuState};
pub use submenu::{TieredMenuSub, TieredMenuSubProps};
pub use tiered::{TieredMenu, TieredMenuProps};
