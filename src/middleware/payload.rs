use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Request body decoded by `content-type`: urlencoded forms with `Form`,
/// JSON with `Json`. Any other body is ignored and decoded as `{}`, so
/// every field is absent and left for the database to reject.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

enum BodyKind {
    Form,
    Json,
    Other,
}

fn body_kind(req: &Request) -> BodyKind {
    let Some(ct) = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return BodyKind::Other;
    };
    let mime = ct.split(';').next().unwrap_or_default().trim();
    if mime.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
        BodyKind::Form
    } else if mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json") {
        BodyKind::Json
    } else {
        BodyKind::Other
    }
}

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send + 'static,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::Form => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                Ok(Payload(value))
            }
            BodyKind::Json => {
                let Json(value) = Json::<T>::from_request(req, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                Ok(Payload(value))
            }
            BodyKind::Other => serde_json::from_value(Value::Object(Default::default()))
                .map(Payload)
                .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()).into_response()),
        }
    }
}
