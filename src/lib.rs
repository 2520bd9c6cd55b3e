#![doc = include_str!("../README.md")]
#![allow(non_snake_case)]
#![forbid(unsafe_code)]

pub mod class;
pub mod dom;
pub mod menu;
pub mod prelude;

/// An allocation-optimized string.
pub type SharedString = std::borrow::Cow<'static, str>;
