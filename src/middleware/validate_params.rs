use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::types::DbId;

/// Required-field policy for a request body.
///
/// A field counts as sent when its key is present, whatever the value
/// (`0`, `""` and `null` all count). Type checks happen afterwards.
#[derive(Debug, Clone, Copy)]
pub struct RequiredParams {
    fields: &'static [&'static str],
    at_least_one: bool,
}

impl RequiredParams {
    /// Every field must be sent
    pub const fn all(fields: &'static [&'static str]) -> Self {
        Self {
            fields,
            at_least_one: false,
        }
    }

    /// Any non-empty subset of the fields is enough
    pub const fn at_least_one(fields: &'static [&'static str]) -> Self {
        Self {
            fields,
            at_least_one: true,
        }
    }

    /// Declared fields absent from `body`, in declaration order
    pub fn not_sent(&self, body: &Map<String, Value>) -> Vec<&'static str> {
        self.fields
            .iter()
            .copied()
            .filter(|field| !body.contains_key(*field))
            .collect()
    }

    pub fn check(&self, body: &Map<String, Value>) -> Result<(), ApiError> {
        let missing = self.not_sent(body);

        let failed = if self.at_least_one {
            missing.len() == self.fields.len()
        } else {
            !missing.is_empty()
        };
        if !failed {
            return Ok(());
        }

        let message = if self.at_least_one {
            format!("At least one of these parameters is required: {}", missing.join(", "))
        } else {
            format!("Missing required parameters: {}", missing.join(", "))
        };
        Err(ApiError::missing_parameters(
            message,
            missing.into_iter().map(String::from).collect(),
        ))
    }
}

/// JSON object request body. An empty body reads as `{}` so the required
/// parameter check, not the parser, reports what is missing.
#[derive(Debug)]
pub struct JsonBody(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_parameter(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(Map::new()));
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(JsonBody(map)),
            Ok(_) => Err(ApiError::invalid_parameter("Request body must be a JSON object")),
            Err(e) => Err(ApiError::invalid_parameter(format!("Malformed JSON body: {}", e))),
        }
    }
}

/// Integer field, `None` when not sent
pub fn integer_param(body: &Map<String, Value>, name: &str) -> Result<Option<DbId>, ApiError> {
    let Some(value) = body.get(name) else {
        return Ok(None);
    };

    value
        .as_i64()
        .and_then(|n| DbId::try_from(n).ok())
        .map(Some)
        .ok_or_else(|| ApiError::invalid_parameter(format!("\"{}\" must be an integer", name)))
}

/// Strictly positive integer field, `None` when not sent
pub fn positive_param(body: &Map<String, Value>, name: &str) -> Result<Option<i32>, ApiError> {
    match integer_param(body, name) {
        Ok(Some(n)) if n <= 0 => Err(ApiError::invalid_parameter(format!(
            "\"{}\" must be a positive integer",
            name
        ))),
        Err(_) => Err(ApiError::invalid_parameter(format!(
            "\"{}\" must be a positive integer",
            name
        ))),
        other => other,
    }
}
