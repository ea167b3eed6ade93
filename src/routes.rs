use std::sync::Arc;

use axum::{
    extract::{Form, Path, State},
    response::Html,
};

use crate::{
    AppState, catalog,
    error::{AppError, AppResult},
    models::{Choice, DeleteRequest, EditRequest, SelectRequest, Submission},
    mutation, templates,
    validation::FilmForm,
};

pub async fn index(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let genres = catalog::list_genres(&state.store).await?;
    Ok(Html(templates::index_page(&genres)))
}

pub async fn inventory(
    State(state): State<Arc<AppState>>,
    Path(genre): Path<String>,
) -> AppResult<Html<String>> {
    let films = catalog::list_by_genre(&state.store, &genre).await?;
    Ok(Html(templates::inventory_page(&genre, &films)))
}

pub async fn add_form() -> Html<String> {
    Html(templates::add_page(&FilmForm::default(), &[], None))
}

pub async fn add_record(
    State(state): State<Arc<AppState>>,
    Form(form): Form<FilmForm>,
) -> AppResult<Html<String>> {
    let body = match mutation::add(&state.store, form).await? {
        Submission::Persisted(film) => {
            let message = format!("The data for the film, {} has been submitted.", film.title);
            templates::add_page(&FilmForm::default(), &[], Some(&message))
        }
        Submission::Rejected { errors, input } => templates::add_page(&input, &errors, None),
    };
    Ok(Html(body))
}

pub async fn select_record(
    State(state): State<Arc<AppState>>,
    Path(letters): Path<String>,
) -> AppResult<Html<String>> {
    let films = catalog::list_by_title_range(&state.store, &letters).await?;
    Ok(Html(templates::select_page(&letters, &films)))
}

pub async fn edit_or_delete(
    State(state): State<Arc<AppState>>,
    Form(req): Form<SelectRequest>,
) -> AppResult<Html<String>> {
    let id = mutation::parse_id(&req.id)?;
    let choice = Choice::parse(&req.choice)
        .ok_or_else(|| AppError::FlowMisuse(format!("unsupported choice {:?}", req.choice)))?;

    let film = catalog::get_for_edit(&state.store, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no film with id {id}")))?;

    let body = match choice {
        Choice::Edit => templates::edit_page(film.id, &FilmForm::from(&film), &[]),
        Choice::Delete => templates::delete_page(&film),
    };
    Ok(Html(body))
}

pub async fn edit_result(
    State(state): State<Arc<AppState>>,
    Form(req): Form<EditRequest>,
) -> AppResult<Html<String>> {
    let id = mutation::parse_id(&req.id_field)?;

    let body = match mutation::edit(&state.store, id, req.form).await? {
        Submission::Persisted(film) => templates::result_page(&format!(
            "The data for the film, {} has been updated.",
            film.title
        )),
        Submission::Rejected { errors, input } => templates::edit_page(id, &input, &errors),
    };
    Ok(Html(body))
}

pub async fn delete_result(
    State(state): State<Arc<AppState>>,
    Form(req): Form<DeleteRequest>,
) -> AppResult<Html<String>> {
    let id = mutation::parse_id(&req.id_field)?;
    let film = mutation::delete(&state.store, id, &req.purpose).await?;
    Ok(Html(templates::result_page(&format!(
        "The film {} has been deleted from the database.",
        film.title
    ))))
}

pub async fn not_found() -> AppError {
    AppError::NotFound("The requested URL was not found on the server.".to_string())
}

pub async fn method_not_allowed() -> AppError {
    AppError::FlowMisuse("The method is not allowed for the requested URL.".to_string())
}
