// src/middleware/json.rs

use axum::{
    extract::{FromRef, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
};

// Corpo JSON cuja rejeição sai como 400 no formato {error, details}
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_headers(req.headers());

        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                let app_state = AppState::from_ref(state);
                Err(AppError::InvalidBody(rejection.body_text())
                    .to_api_error(&locale, &app_state.i18n_store))
            }
        }
    }
}
