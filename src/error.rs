use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    FlowMisuse(String),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Store(#[from] sea_orm::DbErr),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::FlowMisuse(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn page_text(&self) -> (&'static str, &'static str) {
        match self {
            AppError::NotFound(_) => ("404 Error - Page Not Found", "Page not found (Error 404)"),
            AppError::FlowMisuse(_) => {
                ("405 Error - Form Not Submitted", "The form was not submitted (Error 405)")
            }
            AppError::BadRequest(_) => ("400 Error - Bad Request", "Bad request (Error 400)"),
            AppError::Store(_) | AppError::Internal(_) => {
                ("500 Error - Internal Server Error", "Internal server error (500)")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(%status, error = %self, "request rejected");
        }

        let (title, heading) = self.page_text();
        let body = crate::templates::error_page(title, heading, &self.to_string());
        (status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_error_class_has_its_own_status() {
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::FlowMisuse("x".into()).status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::from(sea_orm::DbErr::Custom("disk full".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_fault_surfaces_raw_error_text() {
        let err = AppError::from(sea_orm::DbErr::Custom("disk full".into()));
        assert!(err.to_string().contains("disk full"));
    }
}
