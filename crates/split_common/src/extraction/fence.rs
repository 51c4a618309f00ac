//! Strip markdown code fences some models wrap around JSON.

/// Return the text inside a surrounding ```` ```lang ... ``` ```` fence, or
/// the trimmed input when it is not fenced.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };

    // Optional language tag on the opening line, e.g. ```json
    let tag_len = inner
        .find(|c: char| !c.is_alphanumeric() && c != '_')
        .unwrap_or(inner.len());
    let body = inner[tag_len..].trim();

    if body.is_empty() {
        trimmed
    } else {
        body
    }
}
