mod catalog;
mod config;
mod db;
mod entities;
mod error;
mod models;
mod mutation;
mod routes;
mod store;
mod templates;
mod validation;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{config::Config, store::FilmStore};

#[derive(Clone)]
pub struct AppState {
    pub store: FilmStore,
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/inventory/{genre}", get(routes::inventory))
        .route("/add_record", get(routes::add_form).post(routes::add_record))
        .route("/select_record/{letters}", get(routes::select_record))
        .route("/edit_or_delete", post(routes::edit_or_delete))
        .route("/edit_result", post(routes::edit_result))
        .route("/delete_result", post(routes::delete_result))
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::method_not_allowed)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,filmflix=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(config.database_url.as_str()).await?;
    let state = Arc::new(AppState { store: FilmStore::new(db) });

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, database = %config.database_url, "listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use crate::{
        models::Genre,
        store::{fields, memory_store},
    };

    async fn test_app() -> (Router, FilmStore) {
        let store = memory_store().await;
        let app = app(Arc::new(AppState { store: store.clone() }));
        (app, store)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn index_lists_stored_genres() {
        let (app, store) = test_app().await;
        store.insert(fields("Alien", Genre::SciFi)).await.unwrap();

        let (status, body) = send(app, get_req("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("/inventory/Sci-Fi"));
    }

    #[tokio::test]
    async fn inventory_sorts_titles() {
        let (app, store) = test_app().await;
        store.insert(fields("Zed", Genre::SciFi)).await.unwrap();
        store.insert(fields("Alien", Genre::SciFi)).await.unwrap();

        let (status, body) = send(app, get_req("/inventory/Sci-Fi")).await;
        assert_eq!(status, StatusCode::OK);
        let alien = body.find("Alien").unwrap();
        let zed = body.find("Zed").unwrap();
        assert!(alien < zed);
    }

    #[tokio::test]
    async fn add_record_persists_and_confirms() {
        let (app, store) = test_app().await;

        let (status, body) = send(
            app,
            post_form(
                "/add_record",
                "title=Alien&year_released=1979&rating=15&duration=117&genre=Sci-Fi",
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("The data for the film, Alien has been submitted."));
        assert_eq!(store.by_genre(Genre::SciFi).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn add_record_rerenders_form_with_every_error() {
        let (app, store) = test_app().await;

        let (status, body) = send(
            app,
            post_form("/add_record", "title=Alien3&year_released=2024&rating=15&duration=117"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Error in Film title: Invalid film name"));
        assert!(body.contains("Error in Year film was released: Invalid range"));
        assert!(body.contains("Error in Film genre: This field is required."));
        assert!(body.contains(r#"value="Alien3""#));
        assert!(store.distinct_genres().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn select_record_rejects_malformed_range() {
        let (app, _) = test_app().await;
        let (status, _) = send(app, get_req("/select_record/ZA")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn edit_or_delete_renders_prefilled_edit_form() {
        let (app, store) = test_app().await;
        let film = store.insert(fields("Heat", Genre::Crime)).await.unwrap();

        let (status, body) =
            send(app, post_form("/edit_or_delete", &format!("id={}&choice=edit", film.id))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"value="Heat""#));
        assert!(body.contains(r#"action="/edit_result""#));
    }

    #[tokio::test]
    async fn edit_or_delete_of_missing_film_is_not_found() {
        let (app, _) = test_app().await;
        let (status, body) = send(app, post_form("/edit_or_delete", "id=5&choice=delete")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page not found (Error 404)"));
    }

    #[tokio::test]
    async fn edit_result_updates_record() {
        let (app, store) = test_app().await;
        let film = store.insert(fields("Heat", Genre::Crime)).await.unwrap();

        let body = format!(
            "id_field={}&title=New+Title&year_released=1995&rating=15&duration=170&genre=Crime",
            film.id
        );
        let (status, page) = send(app, post_form("/edit_result", &body)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("The data for the film, New Title has been updated."));
        assert_eq!(store.by_id(film.id).await.unwrap().unwrap().title, "New Title");
    }

    #[tokio::test]
    async fn delete_result_removes_record() {
        let (app, store) = test_app().await;
        let film = store.insert(fields("Heat", Genre::Crime)).await.unwrap();

        let (status, page) = send(
            app,
            post_form("/delete_result", &format!("id_field={}&purpose=delete", film.id)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("The film Heat has been deleted from the database."));
        assert!(store.by_id(film.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_result_with_edit_purpose_is_rejected() {
        let (app, store) = test_app().await;
        let film = store.insert(fields("Heat", Genre::Crime)).await.unwrap();

        let (status, page) = send(
            app,
            post_form("/delete_result", &format!("id_field={}&purpose=edit", film.id)),
        )
        .await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert!(page.contains("The form was not submitted (Error 405)"));
        assert!(store.by_id(film.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unknown_path_and_wrong_method_get_error_pages() {
        let (app, _) = test_app().await;

        let (status, _) = send(app.clone(), get_req("/nowhere")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, page) = send(app, get_req("/delete_result")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert!(page.contains("405 Error - Form Not Submitted"));
    }
}
