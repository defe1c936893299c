// src/specs/fighter.rs
//! Parser for a fighter profile (`/fighter-details/<id>`).
//!
//! Physical attributes sit in the small info box, one `li` per attribute with an
//! `i.b-list__box-item-title` label. Career statistics live in a second box with
//! the same markup, so the box is selected by its width modifier.

use scraper::Html;

use crate::core::html::text_of;
use crate::core::sanitize::{field_key, is_blank, strip_label};
use crate::model::RawFields;

/// Attributes copied into fight-detail records, in column order.
pub const ATTRIBUTES: [&str; 5] = ["height", "weight", "reach", "stance", "dob"];

/// Physical attributes of one fighter. Placeholders ("--") are absent.
pub fn parse_doc(html_doc: &str) -> RawFields {
    let doc = Html::parse_document(html_doc);
    let mut f = RawFields::new();

    let items = selector!("div.b-list__info-box_style_small-width li.b-list__box-list-item");
    for item in doc.select(items) {
        let Some(title) = item.select(selector!("i.b-list__box-item-title")).next().map(text_of) else {
            continue;
        };
        let key = field_key(&title);
        if !ATTRIBUTES.contains(&key.as_str()) {
            continue;
        }
        let whole = text_of(item);
        let value = clean(&key, strip_label(&whole, title.trim_end_matches(':')));
        if !is_blank(&value) {
            f.insert(key, value);
        }
    }
    f
}

fn clean(key: &str, value: &str) -> String {
    match key {
        "weight" => value.replace("lbs.", "").trim().to_string(),
        "reach" => value.replace('"', "").trim().to_string(),
        _ => value.trim().to_string(),
    }
}
