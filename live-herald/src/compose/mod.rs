//! Announcement text composition.
//!
//! Turns a channel that just went live into the text of an announcement:
//! resolves the handle and a short category tag, picks one of the
//! [`Template`] variants at random, and keeps the result within the
//! configured length.

mod category;
mod composer;
mod templates;

pub use category::{EMPTY_CATEGORY_LABEL, short_category};
pub use composer::{Composed, ComposerConfig, MessageComposer};
pub use templates::{Template, TemplateVars};
