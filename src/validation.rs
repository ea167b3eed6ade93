use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{FieldError, Film, FilmFields, Genre, Rating};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2023;
pub const MIN_DURATION: i32 = 1;
pub const MAX_DURATION: i32 = 1265;

static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z\s\-']+$").expect("film title regex should compile")
});

/// Field name and display label, in form order.
pub const FIELDS: [(&str, &str); 5] = [
    ("title", "Film title"),
    ("year_released", "Year film was released"),
    ("rating", "Film rating"),
    ("duration", "Length of film (mins)"),
    ("genre", "Film genre"),
];

/// Raw add/edit form input, kept as submitted so it can be echoed back.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Validate)]
#[serde(default)]
pub struct FilmForm {
    #[validate(
        regex(path = *TITLE_PATTERN, message = "Invalid film name"),
        length(min = 1, max = 150, message = "Invalid film name length")
    )]
    pub title: String,
    #[validate(custom(function = "validate_year"))]
    pub year_released: String,
    #[validate(custom(function = "validate_rating"))]
    pub rating: String,
    #[validate(custom(function = "validate_duration"))]
    pub duration: String,
    #[validate(custom(function = "validate_genre"))]
    pub genre: String,
}

impl From<&Film> for FilmForm {
    fn from(film: &Film) -> Self {
        Self {
            title: film.title.clone(),
            year_released: film.year_released.to_string(),
            rating: film.rating.as_str().to_string(),
            duration: film.duration.to_string(),
            genre: film.genre.as_str().to_string(),
        }
    }
}

impl FilmForm {
    /// Checks every field and returns the typed values, or every failing
    /// field's messages in form order.
    pub fn validated(&self) -> Result<FilmFields, Vec<FieldError>> {
        if let Err(errors) = self.validate() {
            return Err(field_errors(&errors));
        }

        let year_released = self.year_released.trim().parse().ok();
        let duration = self.duration.trim().parse().ok();
        let rating = Rating::parse(&self.rating);
        let genre = Genre::parse(&self.genre);

        match (year_released, rating, duration, genre) {
            (Some(year_released), Some(rating), Some(duration), Some(genre)) => Ok(FilmFields {
                title: self.title.clone(),
                year_released,
                rating,
                duration,
                genre,
            }),
            _ => Err(vec![FieldError {
                field: "form",
                label: "Film",
                message: "Invalid form data".to_string(),
            }]),
        }
    }
}

fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    let mut out = Vec::new();

    for (field, label) in FIELDS {
        let Some(errs) = by_field.get(field) else {
            continue;
        };
        for err in errs.iter() {
            let message = match &err.message {
                Some(message) => message.to_string(),
                None => err.code.to_string(),
            };
            out.push(FieldError { field, label, message });
        }
    }

    out
}

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_bounded(value: &str, min: i32, max: i32) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(failure("required", "This field is required."));
    }
    let n: i32 = value.parse().map_err(|_| failure("integer", "Not a valid integer value"))?;
    if !(min..=max).contains(&n) {
        return Err(failure("range", "Invalid range"));
    }
    Ok(())
}

fn validate_year(value: &str) -> Result<(), ValidationError> {
    validate_bounded(value, MIN_YEAR, MAX_YEAR)
}

fn validate_duration(value: &str) -> Result<(), ValidationError> {
    validate_bounded(value, MIN_DURATION, MAX_DURATION)
}

fn validate_choice(value: &str, known: bool) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(failure("required", "This field is required."));
    }
    if !known {
        return Err(failure("choice", "Not a valid choice"));
    }
    Ok(())
}

fn validate_rating(value: &str) -> Result<(), ValidationError> {
    validate_choice(value, Rating::parse(value).is_some())
}

fn validate_genre(value: &str) -> Result<(), ValidationError> {
    validate_choice(value, Genre::parse(value).is_some())
}
