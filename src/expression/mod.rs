//! Reference-expression syntax: `@{…}` tokens embedded in free text.
//!
//! Three independent pieces: the composer (is the user mid-token, and
//! what have they typed so far), the balanced-brace validator (advisory,
//! whole-text), and the template splitter (literal/reference parts for
//! preview and validation).

pub mod braces;
pub mod composer;
pub mod template;

pub use braces::{BraceError, validate_braces};
pub use composer::{Composer, Composition, accept_suggestion, composition_at};
pub use template::{TemplatePart, contains_reference, references, split_template};
