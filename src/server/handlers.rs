//! HTTP handlers for the confirmation endpoint and the form page

use super::host::{FormHost, ServerHost};
use crate::core::error::{ApiError, ApiResult};
use crate::core::user::ConfUser;
use crate::form::{PageView, collect_values};
use axum::{
    Form, Json,
    extract::{FromRequest, Request, State},
    http::header,
    response::Html,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

/// Body of a confirmation request
///
/// Accepts JSON or a url-encoded form. A body in any other content type is
/// treated as empty, which then fails email validation.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ConfirmRequest {
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

impl<S> FromRequest<S> for ConfirmRequest
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<Self>::from_request(req, state)
                .await
                .map_err(|e| ApiError::InvalidBody {
                    message: e.body_text(),
                })?;
            Ok(body)
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(body) = Form::<Self>::from_request(req, state)
                .await
                .map_err(|e| ApiError::InvalidBody {
                    message: e.body_text(),
                })?;
            Ok(body)
        } else {
            Ok(Self::default())
        }
    }
}

/// POST /api/confirm
pub async fn confirm(
    State(host): State<Arc<ServerHost>>,
    request: ConfirmRequest,
) -> ApiResult<Json<ConfUser>> {
    let email = request.email.unwrap_or_default();
    let name = request.name.unwrap_or_default();

    let user = host.registration.confirm(&email, &name).await?;
    Ok(Json(user))
}

/// Any method other than POST on /api/confirm
pub async fn method_unknown() -> ApiError {
    ApiError::MethodUnknown
}

/// GET /
pub async fn show_form(State(form): State<Arc<FormHost>>) -> ApiResult<Html<String>> {
    form.render(&PageView::default())
}

/// POST /
pub async fn submit_form(
    State(form): State<Arc<FormHost>>,
    Form(raw): Form<HashMap<String, String>>,
) -> ApiResult<Html<String>> {
    let values = collect_values(form.provider.schema(), &raw);
    let view = form.submit(values).await;
    form.render(&view)
}

/// GET /health and /healthz
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "confreg"
    }))
}
