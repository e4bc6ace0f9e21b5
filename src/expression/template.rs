//! Split mixed literal/reference text into parts.

/// One piece of a template string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Lit(String),
    /// The token's inner text, e.g. `node-1.orderId` for `@{node-1.orderId}`.
    Ref(String),
}

pub fn contains_reference(text: &str) -> bool {
    text.contains("@{")
}

/// Split text into literal and reference parts.
///
/// A trailing `@{` with no closing brace is kept as a literal rather than
/// dropped; the brace validator reports it separately.
pub fn split_template(text: &str) -> Vec<TemplatePart> {
    let mut parts = Vec::new();
    let mut remaining = text;

    while let Some(start) = remaining.find("@{") {
        if start > 0 {
            parts.push(TemplatePart::Lit(remaining[..start].to_string()));
        }

        let after_open = &remaining[start + 2..];
        match after_open.find('}') {
            Some(end) => {
                parts.push(TemplatePart::Ref(after_open[..end].to_string()));
                remaining = &after_open[end + 1..];
            }
            None => {
                parts.push(TemplatePart::Lit(remaining[start..].to_string()));
                return parts;
            }
        }
    }

    if !remaining.is_empty() {
        parts.push(TemplatePart::Lit(remaining.to_string()));
    }

    parts
}

/// Inner texts of every well-formed reference in the text, in order.
pub fn references(text: &str) -> Vec<String> {
    split_template(text)
        .into_iter()
        .filter_map(|part| match part {
            TemplatePart::Ref(inner) => Some(inner),
            TemplatePart::Lit(_) => None,
        })
        .collect()
}
