//! Contact link normalization
//!
//! Providers enter a free-text contact field: an email address, a phone
//! number, or a URL. Rendering turns it into something clickable.

/// Normalize a free-text contact field into a link target.
///
/// - empty input becomes `"#"` (inert anchor)
/// - anything containing `@` becomes a `mailto:` link
/// - a `+` anywhere, or a leading digit, is treated as a phone number
///   and rewritten to a WhatsApp link with all non-digits stripped
/// - everything else passes through unchanged (assumed to be a URL)
pub fn normalize_link(raw: &str) -> String {
    if raw.is_empty() {
        return "#".to_string();
    }

    if raw.contains('@') {
        return format!("mailto:{raw}");
    }

    let phone_like = raw.contains('+')
        || raw.chars().next().is_some_and(|c| c.is_ascii_digit());
    if phone_like {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        return format!("https://wa.me/{digits}");
    }

    raw.to_string()
}
