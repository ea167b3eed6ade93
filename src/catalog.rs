use crate::{
    error::{AppError, AppResult},
    models::{Film, Genre},
    store::FilmStore,
};

pub async fn list_genres(store: &FilmStore) -> AppResult<Vec<Genre>> {
    let genres = store.distinct_genres().await?;
    tracing::debug!(count = genres.len(), "listed genres");
    Ok(genres)
}

/// Unknown genre names yield an empty list rather than an error.
pub async fn list_by_genre(store: &FilmStore, genre: &str) -> AppResult<Vec<Film>> {
    let Some(genre) = Genre::parse(genre) else {
        tracing::debug!(genre, "unknown genre");
        return Ok(Vec::new());
    };

    let films = store.by_genre(genre).await?;
    tracing::debug!(%genre, count = films.len(), "listed films by genre");
    Ok(films)
}

pub async fn list_by_title_range(store: &FilmStore, letters: &str) -> AppResult<Vec<Film>> {
    let (low, high) = parse_range(letters)?;
    let films = store.by_title_range(low, high).await?;
    tracing::debug!(%low, %high, count = films.len(), "listed films by title range");
    Ok(films)
}

pub async fn get_for_edit(store: &FilmStore, id: i32) -> AppResult<Option<Film>> {
    store.by_id(id).await
}

/// Exactly two ASCII letters, the first not sorting after the second.
pub fn parse_range(letters: &str) -> AppResult<(char, char)> {
    let mut chars = letters.chars();
    let (Some(low), Some(high), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(AppError::BadRequest(format!(
            "title range must be exactly two letters, got {letters:?}"
        )));
    };

    if !low.is_ascii_alphabetic() || !high.is_ascii_alphabetic() {
        return Err(AppError::BadRequest(format!("title range {letters:?} must be letters")));
    }
    if low > high {
        return Err(AppError::BadRequest(format!(
            "title range {letters:?} starts after it ends"
        )));
    }

    Ok((low, high))
}
