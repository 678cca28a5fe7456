//! Pull the JSON payload out of markdown fences and surrounding prose.

const FENCE: &str = "```";

/// Narrow `text` down to the span most likely to hold the JSON object.
///
/// 1. Trim, then drop a leading ```` ``` ```` fence (with an optional `json`
///    tag) and its matching trailing fence.
/// 2. Drop any leftover leading/trailing ```` ``` ```` run.
/// 3. Slice from the first `{` to the **last** `}` inclusive. The span is
///    greedy: two objects separated by noise come back as a single slice.
///
/// When there is no `{ ... }` pair the (fence-stripped) text is returned as is.
pub fn extract_json(text: &str) -> &str {
    let mut s = text.trim();

    if let Some(rest) = s.strip_prefix(FENCE) {
        let rest = strip_json_tag(rest).trim_start();
        let rest = rest.strip_suffix(FENCE).unwrap_or(rest);
        s = rest.trim();
    }

    if let Some(rest) = s.strip_prefix(FENCE) {
        s = rest.trim();
    }
    if let Some(rest) = s.strip_suffix(FENCE) {
        s = rest.trim();
    }

    match (s.find('{'), s.rfind('}')) {
        (Some(open), Some(close)) if close > open => &s[open..=close],
        _ => s,
    }
}

fn strip_json_tag(s: &str) -> &str {
    match s.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &s[4..],
        _ => s,
    }
}
