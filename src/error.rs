use axum::{
    http::{StatusCode, header},
    response::IntoResponse,
};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum CentroError {
    #[error("{0}")]
    DatabaseError(#[from] SqlxError),

    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("unsupported database url scheme: {0}")]
    UnsupportedScheme(String),

    #[error("database did not report a generated id")]
    MissingInsertId,
}

impl CentroError {
    /// Text sent to the client in a 500 body.
    ///
    /// Currently the raw error message, driver text included.
    pub fn public_text(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for CentroError {
    fn into_response(self) -> axum::response::Response {
        let body = self.public_text();
        error!(error = %body, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}
