//! Re-exports of components and common types.

pub use crate::{
    SharedString,
    class::Class,
    menu::{
        FlyoutDirection, MenuEntry, MenuItem, MenuSelectEvent, TieredMenu, TieredMenuProps,
        TieredMenuState, TieredMenuSub, TieredMenuSubProps,
    },
};
