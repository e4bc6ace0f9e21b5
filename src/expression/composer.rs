//! In-progress expression detection and suggestion acceptance.
//!
//! Offsets are byte offsets into the text; callers keep the cursor on a
//! char boundary (the canvas passes through the input element's own
//! offsets, which satisfy this for the ASCII token syntax).

/// An unterminated `@{` before the cursor: the user is composing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    /// Byte offset of the `@` that opened the expression.
    pub trigger_offset: usize,
    /// Text between the `@{` and the cursor — the live search query.
    pub query: String,
}

/// Detect whether the cursor sits inside an unterminated `@{`.
///
/// Some iff the text before the cursor contains an `@{` with no `}`
/// between it and the cursor.
pub fn composition_at(text: &str, cursor: usize) -> Option<Composition> {
    let before = text.get(..cursor)?;
    let trigger_offset = before.rfind("@{")?;
    let after_trigger = &before[trigger_offset + 2..];

    if after_trigger.contains('}') {
        return None;
    }

    Some(Composition {
        trigger_offset,
        query: after_trigger.to_string(),
    })
}

/// Replace the in-progress token with an accepted suggestion.
///
/// Splices `token` over `[trigger_offset, cursor)` and returns the new
/// text plus the cursor position immediately after the inserted token —
/// not at end-of-field. `None` when the cursor is not in a composition.
pub fn accept_suggestion(text: &str, cursor: usize, token: &str) -> Option<(String, usize)> {
    let composition = composition_at(text, cursor)?;
    let before = &text[..composition.trigger_offset];
    let after = &text[cursor..];

    let new_cursor = before.len() + token.len();
    let new_text = format!("{before}{token}{after}");
    Some((new_text, new_cursor))
}

/// Stateful wrapper driven by keystrokes. Mirrors the editor widget's
/// behavior: Escape hides the suggestion list until the next input change;
/// accepting a suggestion ends the composition outright.
#[derive(Debug, Default)]
pub struct Composer {
    composition: Option<Composition>,
    suppressed: bool,
}

impl Composer {
    pub fn new() -> Self {
        Composer::default()
    }

    /// Recompute on every input change. Clears an Escape suppression.
    pub fn update(&mut self, text: &str, cursor: usize) -> Option<&Composition> {
        self.composition = composition_at(text, cursor);
        self.suppressed = false;
        self.active()
    }

    /// The current composition, unless Escape suppressed it.
    pub fn active(&self) -> Option<&Composition> {
        if self.suppressed {
            None
        } else {
            self.composition.as_ref()
        }
    }

    pub fn is_composing(&self) -> bool {
        self.active().is_some()
    }

    /// Escape key: composing → idle without touching the text.
    pub fn escape(&mut self) {
        self.suppressed = true;
    }

    /// Accept a suggestion; returns the spliced text and new cursor.
    pub fn accept(&mut self, text: &str, cursor: usize, token: &str) -> Option<(String, usize)> {
        let result = accept_suggestion(text, cursor, token)?;
        self.composition = None;
        self.suppressed = false;
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_unterminated_trigger() {
        let c = composition_at("foo @{us", 8).unwrap();
        assert_eq!(c.trigger_offset, 4);
        assert_eq!(c.query, "us");
    }

    #[test]
    fn closed_expression_is_idle() {
        assert!(composition_at("foo @{user.id}", 14).is_none());
    }

    #[test]
    fn text_without_trigger_is_idle() {
        assert!(composition_at("plain text", 5).is_none());
    }

    #[test]
    fn only_text_before_cursor_counts() {
        // The `@{` after the cursor must not trigger composition.
        assert!(composition_at("abc @{x", 3).is_none());
    }

    #[test]
    fn accept_splices_token_and_positions_cursor() {
        let (text, cursor) = accept_suggestion("foo @{us", 8, "@{user.id}").unwrap();
        assert_eq!(text, "foo @{user.id}");
        assert_eq!(cursor, 14);
    }

    #[test]
    fn accept_preserves_trailing_text() {
        let (text, cursor) = accept_suggestion("a @{or and more", 5, "@{order.id}").unwrap();
        assert_eq!(text, "a @{order.id} and more");
        assert_eq!(cursor, 13);
    }

    #[test]
    fn escape_suppresses_until_next_update() {
        let mut composer = Composer::new();
        composer.update("@{fo", 4);
        assert!(composer.is_composing());

        composer.escape();
        assert!(!composer.is_composing());

        composer.update("@{foo", 5);
        assert!(composer.is_composing());
    }

    #[test]
    fn accept_ends_composition() {
        let mut composer = Composer::new();
        composer.update("@{fo", 4);
        let (text, _) = composer.accept("@{fo", 4, "@{foo.bar}").unwrap();
        assert_eq!(text, "@{foo.bar}");
        assert!(!composer.is_composing());
    }
}
