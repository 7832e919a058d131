use std::str::FromStr;

use serde::Deserialize;

/// A freshly resolved movie, before it has an id or any user input.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub description: String,
    pub image_url: String,
}

/// Validated user input from the edit form.
#[derive(Clone, Debug, PartialEq)]
pub struct RatingUpdate {
    pub rating: f64,
    pub review: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    /// Parsed id, `None` when it is absent, blank or not an integer.
    pub fn parsed<T: FromStr>(&self) -> Option<T> {
        self.id.as_deref().map(str::trim).and_then(|s| s.parse().ok())
    }

    pub fn is_blank(&self) -> bool {
        self.id.as_deref().map(str::trim).is_none_or(str::is_empty)
    }

    pub fn raw(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}
