// src/core/html.rs
// Small helpers over `scraper` that every page parser uses.

use scraper::{ElementRef, Selector};

use super::sanitize::normalize_ws;

/// All text below `el`, whitespace-normalized.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Text of the first match under `scope`, if any and non-empty.
pub fn select_text(scope: ElementRef<'_>, sel: &Selector) -> Option<String> {
    scope
        .select(sel)
        .next()
        .map(text_of)
        .filter(|t| !t.is_empty())
}

/// Texts of every match under `scope`, in document order.
pub fn select_texts(scope: ElementRef<'_>, sel: &Selector) -> Vec<String> {
    scope.select(sel).map(text_of).collect()
}

/// Attribute of the first match under `scope`.
pub fn select_attr(scope: ElementRef<'_>, sel: &Selector, attr: &str) -> Option<String> {
    scope
        .select(sel)
        .next()
        .and_then(|e| e.value().attr(attr))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Next sibling that is an element (skips whitespace text nodes).
pub fn next_element_sibling(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Does the element's class attribute contain `class` as a whole token?
pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value()
        .attr("class")
        .is_some_and(|c| c.split_ascii_whitespace().any(|t| t == class))
}
