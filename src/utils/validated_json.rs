use axum::{Json, extract::FromRequest, extract::Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::{Error, Result};

/// JSON extractor that runs `validator` rules after deserialization.
/// Both deserialization and validation failures answer 400.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
