//! Language tag parsing module
//!
//! This module turns BCP 47 / POSIX style locale identifiers into a [`LocaleTag`].
//! The main entry point is the `parse_locale_tag` function.

mod locale_tag;

pub use locale_tag::{LocaleTag, parse_locale_tag};
