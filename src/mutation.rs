use crate::{
    catalog,
    error::{AppError, AppResult},
    models::{Film, Submission},
    store::FilmStore,
    validation::FilmForm,
};

/// Purpose value the delete form must carry.
pub const DELETE_PURPOSE: &str = "delete";

pub async fn add(store: &FilmStore, form: FilmForm) -> AppResult<Submission> {
    let fields = match form.validated() {
        Ok(fields) => fields,
        Err(errors) => {
            tracing::warn!(errors = errors.len(), "rejected new film");
            return Ok(Submission::Rejected { errors, input: form });
        }
    };

    let film = store.insert(fields).await?;
    tracing::info!(id = film.id, title = %film.title, "added film");
    Ok(Submission::Persisted(film))
}

pub async fn edit(store: &FilmStore, id: i32, form: FilmForm) -> AppResult<Submission> {
    if catalog::get_for_edit(store, id).await?.is_none() {
        return Err(not_found(id));
    }

    let fields = match form.validated() {
        Ok(fields) => fields,
        Err(errors) => {
            tracing::warn!(id, errors = errors.len(), "rejected film update");
            return Ok(Submission::Rejected { errors, input: form });
        }
    };

    if !store.update(id, &fields).await? {
        return Err(not_found(id));
    }

    tracing::info!(id, title = %fields.title, "updated film");
    Ok(Submission::Persisted(Film::from_fields(id, fields)))
}

/// Removes the film; `purpose` must be `delete` since the same form path also
/// serves edits.
pub async fn delete(store: &FilmStore, id: i32, purpose: &str) -> AppResult<Film> {
    if purpose != DELETE_PURPOSE {
        return Err(AppError::FlowMisuse(format!(
            "unsupported purpose {purpose:?} for deleting a film"
        )));
    }

    let film = catalog::get_for_edit(store, id).await?.ok_or_else(|| not_found(id))?;
    if !store.delete(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(id, title = %film.title, "deleted film");
    Ok(film)
}

pub fn parse_id(raw: &str) -> AppResult<i32> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid film id {raw:?}")))
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("no film with id {id}"))
}
