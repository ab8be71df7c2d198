//! Lazily evaluated placeholder tags
//!
//! A [`Tag`] pairs a placeholder token with a function producing its value
//! from a context. Replacers bind a fixed tag list to a collection of
//! templates once, then render the templates for a concrete context on
//! demand. A tag is evaluated only when a bound template references its
//! placeholder, and at most once per render call.

pub mod replacer;
pub mod tag;

pub use replacer::{resolve, TagReplacer, WrappedTagReplacer};
pub use tag::{Tag, DEFAULT_FALLBACK};
