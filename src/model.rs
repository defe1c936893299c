// src/model.rs
//
// Shapes shared by the parsers, the normalizer and the store.
//
// - RawFields: flat name → text mapping straight out of a page parser.
// - Record: one normalized row, ordered, ready for a DataSet.
// - EventListing / FightListing: typed rows of the two listing pages.

use std::collections::BTreeMap;

/// Flat field mapping produced by one page parser. A missing key means the
/// element was absent on the page.
pub type RawFields = BTreeMap<String, String>;

/// One of the two participants of a fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Red, Side::Blue];

    pub fn prefix(self) -> &'static str {
        match self {
            Side::Red => "red",
            Side::Blue => "blue",
        }
    }

    /// Page order: the first fighter listed is red.
    pub fn from_index(i: usize) -> Side {
        if i == 0 { Side::Red } else { Side::Blue }
    }

    pub fn parse(s: &str) -> Option<Side> {
        match s {
            "red" => Some(Side::Red),
            "blue" => Some(Side::Blue),
            _ => None,
        }
    }
}

/// A normalized row: named cells in insertion order.
/// Setting an existing name replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    cells: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cells.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(k, _)| *k == name) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((name, value)),
        }
    }

    /// Set only when a value is present.
    pub fn set_opt(&mut self, name: &str, value: Option<&str>) {
        if let Some(v) = value {
            self.set(name, v);
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reorder cells: `leading` names first (those present), the rest sorted by name.
    pub fn with_leading(mut self, leading: &[&str]) -> Self {
        let mut out = Vec::with_capacity(self.cells.len());
        for &name in leading {
            if let Some(pos) = self.cells.iter().position(|(k, _)| k == name) {
                out.push(self.cells.remove(pos));
            }
        }
        self.cells.sort_by(|a, b| a.0.cmp(&b.0));
        out.append(&mut self.cells);
        Self { cells: out }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut r = Record::new();
        for (k, v) in iter {
            r.set(k, v);
        }
        r
    }
}

/// One row of the completed/upcoming events listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventListing {
    pub event_link: String,
    pub event_name: String,
    pub event_date: Option<String>,
    pub event_location: Option<String>,
    /// The next scheduled event sits in the first, specially styled row.
    pub upcoming: bool,
}

/// One fight row of an event page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FightListing {
    pub fight_link: String,
    pub fighter1: Option<String>,
    pub fighter2: Option<String>,
    pub weight_class: Option<String>,
    pub method: Option<String>,
    /// Page columns with no fixed slot above (round, time, …).
    pub extra: BTreeMap<String, String>,
}
