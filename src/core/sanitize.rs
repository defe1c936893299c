// src/core/sanitize.rs

/// Collapse whitespace runs into single spaces and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Turn a page label ("Sig. str.", "Time format:") into a column-safe key ("sig_str", "time_format").
pub fn field_key(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_us = false;
    for ch in label.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            last_us = false;
        } else if (ch.is_whitespace() || ch == '_' || ch == '-' || ch == '/') && !last_us {
            out.push('_');
            last_us = true;
        }
    }
    out.trim_matches('_').to_string()
}

/// Remove a leading label (case-insensitive) and the colon after it: "Reach: 76\"" → "76\"".
pub fn strip_label<'a>(text: &'a str, label: &str) -> &'a str {
    let t = text.trim_start();
    let cut = label.len().min(t.len());
    if t.is_char_boundary(cut) && t[..cut].eq_ignore_ascii_case(label) {
        t[cut..].trim_start_matches(':').trim()
    } else {
        t.trim()
    }
}

/// Placeholder values the site prints for "no data".
pub fn is_blank(s: &str) -> bool {
    let t = s.trim();
    t.is_empty() || t.chars().all(|c| c == '-')
}
