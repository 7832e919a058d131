use std::collections::BTreeMap;

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::models::RatingUpdate;

pub const REQUIRED: &str = "This field is required.";
pub const NOT_A_NUMBER: &str = "Rating must be a number, e.g. 7.5";

/// Inline messages keyed by form field name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn merge(&mut self, errors: ValidationErrors) {
        for (field, errs) in errors.field_errors() {
            for err in errs {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                self.add(&field.to_string(), message);
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AddMovieForm {
    #[serde(default)]
    pub movie_title: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Validate)]
struct TitleInput {
    #[validate(length(max = 250, message = "Title must be at most 250 characters."))]
    movie_title: String,
}

impl AddMovieForm {
    /// Returns the trimmed search title.
    pub fn validate(&self) -> Result<String, FormErrors> {
        let mut errors = FormErrors::default();
        let title = self.movie_title.trim();
        if title.is_empty() {
            errors.add("movie_title", REQUIRED);
            return Err(errors);
        }

        let input = TitleInput { movie_title: title.to_string() };
        if let Err(e) = input.validate() {
            errors.merge(e);
            return Err(errors);
        }
        Ok(input.movie_title)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EditMovieForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Validate)]
struct RatingInput {
    #[validate(range(min = 0.0, max = 10.0, message = "Rating must be between 0 and 10."))]
    rating: f64,
    #[validate(length(max = 250, message = "Review must be at most 250 characters."))]
    review: Option<String>,
}

impl EditMovieForm {
    pub fn validate(&self) -> Result<RatingUpdate, FormErrors> {
        let mut errors = FormErrors::default();

        let raw = self.rating.trim();
        let rating = if raw.is_empty() {
            errors.add("rating", REQUIRED);
            None
        } else {
            match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => Some(value),
                _ => {
                    errors.add("rating", NOT_A_NUMBER);
                    None
                },
            }
        };

        let review = Some(self.review.trim()).filter(|r| !r.is_empty()).map(str::to_string);

        // range is checked only on a parsed value, length always
        let input = RatingInput { rating: rating.unwrap_or_default(), review };
        if let Err(e) = input.validate() {
            errors.merge(e);
        }

        match rating {
            Some(rating) if errors.is_empty() => Ok(RatingUpdate { rating, review: input.review }),
            _ => Err(errors),
        }
    }
}
