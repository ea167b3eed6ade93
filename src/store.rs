use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    sea_query::{Alias, Expr, Func},
};

use crate::{
    entities::film,
    error::AppResult,
    models::{Film, FilmFields, Genre},
};

/// Owns every read and write against the `films` table.
#[derive(Clone)]
pub struct FilmStore {
    db: DatabaseConnection,
}

impl FilmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn by_genre(&self, genre: Genre) -> AppResult<Vec<Film>> {
        let rows = film::Entity::find()
            .filter(film::Column::Genre.eq(genre.as_str()))
            .order_by_asc(film::Column::Title)
            .all(&self.db)
            .await?;

        into_films(rows)
    }

    pub async fn by_id(&self, id: i32) -> AppResult<Option<Film>> {
        let row = film::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Film::try_from).transpose()?)
    }

    /// Distinct genres present among stored films, in genre order.
    pub async fn distinct_genres(&self) -> AppResult<Vec<Genre>> {
        let values: Vec<String> = film::Entity::find()
            .select_only()
            .column(film::Column::Genre)
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await?;

        let mut genres: Vec<Genre> = values
            .iter()
            .filter_map(|value| {
                let genre = Genre::parse(value);
                if genre.is_none() {
                    tracing::warn!(genre = %value, "skipping unknown stored genre");
                }
                genre
            })
            .collect();
        genres.sort();
        Ok(genres)
    }

    /// Films whose title starts with a character in `low..=high`, compared
    /// byte-wise, ordered by title.
    pub async fn by_title_range(&self, low: char, high: char) -> AppResult<Vec<Film>> {
        let first_char = Func::cust(Alias::new("substr"))
            .arg(Expr::col(film::Column::Title))
            .arg(1)
            .arg(1);

        let rows = film::Entity::find()
            .filter(Expr::expr(first_char).between(low.to_string(), high.to_string()))
            .order_by_asc(film::Column::Title)
            .all(&self.db)
            .await?;

        into_films(rows)
    }

    pub async fn insert(&self, fields: FilmFields) -> AppResult<Film> {
        let model = film::ActiveModel {
            id: Default::default(),
            title: Set(fields.title.clone()),
            year_released: Set(fields.year_released),
            rating: Set(fields.rating.as_str().to_string()),
            duration: Set(fields.duration),
            genre: Set(fields.genre.as_str().to_string()),
        };

        let res = film::Entity::insert(model).exec(&self.db).await?;
        Ok(Film::from_fields(res.last_insert_id, fields))
    }

    /// Overwrites every business field of `id`. Returns false when no such film exists.
    pub async fn update(&self, id: i32, fields: &FilmFields) -> AppResult<bool> {
        let res = film::Entity::update_many()
            .col_expr(film::Column::Title, Expr::value(fields.title.clone()))
            .col_expr(film::Column::YearReleased, Expr::value(fields.year_released))
            .col_expr(film::Column::Rating, Expr::value(fields.rating.as_str()))
            .col_expr(film::Column::Duration, Expr::value(fields.duration))
            .col_expr(film::Column::Genre, Expr::value(fields.genre.as_str()))
            .filter(film::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(res.rows_affected > 0)
    }

    /// Returns false when no such film exists.
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let res = film::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

fn into_films(rows: Vec<film::Model>) -> AppResult<Vec<Film>> {
    Ok(rows.into_iter().map(Film::try_from).collect::<anyhow::Result<_>>()?)
}

#[cfg(test)]
pub(crate) async fn memory_store() -> FilmStore {
    let mut options = sea_orm::ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = crate::db::connect_and_migrate(options).await.unwrap();
    FilmStore::new(db)
}

#[cfg(test)]
pub(crate) fn fields(title: &str, genre: Genre) -> FilmFields {
    FilmFields {
        title: title.to_string(),
        year_released: 1986,
        rating: crate::models::Rating::Fifteen,
        duration: 120,
        genre,
    }
}
