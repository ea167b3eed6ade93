use std::fmt;

use serde::Deserialize;

use crate::{entities::film, validation::FilmForm};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rating {
    G,
    U,
    Pg,
    TwelveA,
    Fifteen,
    Eighteen,
    R,
}

impl Rating {
    pub const ALL: [Rating; 7] = [
        Rating::G,
        Rating::U,
        Rating::Pg,
        Rating::TwelveA,
        Rating::Fifteen,
        Rating::Eighteen,
        Rating::R,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rating::G => "G",
            Rating::U => "U",
            Rating::Pg => "PG",
            Rating::TwelveA => "12A",
            Rating::Fifteen => "15",
            Rating::Eighteen => "18",
            Rating::R => "R",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Genre {
    Action,
    Animation,
    Comedy,
    Crime,
    Drama,
    Fantasy,
    Fighting,
    Musical,
    Period,
    RomCom,
    SciFi,
    Thriller,
    War,
}

impl Genre {
    pub const ALL: [Genre; 13] = [
        Genre::Action,
        Genre::Animation,
        Genre::Comedy,
        Genre::Crime,
        Genre::Drama,
        Genre::Fantasy,
        Genre::Fighting,
        Genre::Musical,
        Genre::Period,
        Genre::RomCom,
        Genre::SciFi,
        Genre::Thriller,
        Genre::War,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Animation => "Animation",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::Fighting => "Fighting",
            Genre::Musical => "Musical",
            Genre::Period => "Period",
            Genre::RomCom => "Rom-Com",
            Genre::SciFi => "Sci-Fi",
            Genre::Thriller => "Thriller",
            Genre::War => "War",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == value)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every business field of a film, i.e. a film record without its id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FilmFields {
    pub title: String,
    pub year_released: i32,
    pub rating: Rating,
    pub duration: i32,
    pub genre: Genre,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Film {
    pub id: i32,
    pub title: String,
    pub year_released: i32,
    pub rating: Rating,
    pub duration: i32,
    pub genre: Genre,
}

impl Film {
    pub fn from_fields(id: i32, fields: FilmFields) -> Self {
        Self {
            id,
            title: fields.title,
            year_released: fields.year_released,
            rating: fields.rating,
            duration: fields.duration,
            genre: fields.genre,
        }
    }
}

impl TryFrom<film::Model> for Film {
    type Error = anyhow::Error;

    fn try_from(row: film::Model) -> Result<Self, Self::Error> {
        let rating = Rating::parse(&row.rating)
            .ok_or_else(|| anyhow::anyhow!("film {} has unknown rating {:?}", row.id, row.rating))?;
        let genre = Genre::parse(&row.genre)
            .ok_or_else(|| anyhow::anyhow!("film {} has unknown genre {:?}", row.id, row.genre))?;

        Ok(Self {
            id: row.id,
            title: row.title,
            year_released: row.year_released,
            rating,
            duration: row.duration,
            genre,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    #[serde(default)]
    pub id_field: String,
    #[serde(flatten)]
    pub form: FilmForm,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub choice: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub id_field: String,
    #[serde(default)]
    pub purpose: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub label: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error in {}: {}", self.label, self.message)
    }
}

/// Result of a single add or edit submission.
#[derive(Clone, Debug)]
pub enum Submission {
    Persisted(Film),
    Rejected { errors: Vec<FieldError>, input: FilmForm },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Choice {
    Edit,
    Delete,
}

impl Choice {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "edit" => Some(Choice::Edit),
            "delete" => Some(Choice::Delete),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_and_genre_labels_parse_back() {
        assert_eq!(Rating::parse("12A"), Some(Rating::TwelveA));
        assert_eq!(Rating::parse("pg"), None);
        assert_eq!(Genre::parse("Rom-Com"), Some(Genre::RomCom));
        assert_eq!(Genre::parse("Horror"), None);
    }

    #[test]
    fn row_with_unknown_genre_is_rejected() {
        let row = film::Model {
            id: 4,
            title: "Alien".to_string(),
            year_released: 1979,
            rating: "15".to_string(),
            duration: 117,
            genre: "Horror".to_string(),
        };
        let err = Film::try_from(row).unwrap_err();
        assert!(err.to_string().contains("unknown genre"));
    }
}
