use crate::domain::DomainError;
use crate::presentation::http_handlers::error_to_response;
use actix_multipart::Multipart;
use actix_web::{dev, error, web, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Largest accepted request body, whatever its encoding.
pub const BODY_LIMIT: usize = 2 * 1024 * 1024;

const MULTIPART_FORM: &str = "multipart/form-data";

/// Request body accepted as JSON, as an urlencoded form or as text-only
/// `multipart/form-data`.
///
/// A body that fits none of them is answered with the fixed client error
/// instead of actix's own rejection text.
pub struct Payload<T>(pub T);

impl<T> Payload<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Turns any extraction failure into the plain `Undefined input` reply.
fn reject(err: actix_web::Error) -> actix_web::Error {
    tracing::debug!("Rejected request input: {}", err);
    let response = error_to_response(DomainError::InvalidInput(err.to_string()));
    error::InternalError::from_response(err, response).into()
}

impl<T> FromRequest for Payload<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut dev::Payload) -> Self::Future {
        if req.content_type() == MULTIPART_FORM {
            let multipart = Multipart::new(req.headers(), payload.take());
            return Box::pin(async move {
                read_multipart(multipart)
                    .await
                    .map(Payload)
                    .map_err(reject)
            });
        }

        let extract = web::Either::<web::Json<T>, web::Form<T>>::from_request(req, payload);

        Box::pin(async move {
            match extract.await {
                Ok(web::Either::Left(json)) => Ok(Payload(json.into_inner())),
                Ok(web::Either::Right(form)) => Ok(Payload(form.into_inner())),
                Err(err) => Err(reject(err.into())),
            }
        })
    }
}

/// Collects text fields into a string map, the same shape a form decodes to.
async fn read_multipart<T: DeserializeOwned>(
    mut multipart: Multipart,
) -> Result<T, actix_web::Error> {
    let mut fields = Map::new();
    let mut total = 0usize;

    while let Some(field) = multipart.next().await {
        let mut field = field?;

        let is_file = field
            .content_disposition()
            .is_some_and(|cd| cd.get_filename().is_some());
        if is_file {
            return Err(error::ErrorBadRequest("file fields are not accepted"));
        }
        let Some(name) = field.name().map(str::to_owned) else {
            return Err(error::ErrorBadRequest("multipart field without a name"));
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            total += chunk.len();
            if total > BODY_LIMIT {
                return Err(error::ErrorPayloadTooLarge("multipart body too large"));
            }
            bytes.extend_from_slice(&chunk);
        }

        let text = String::from_utf8(bytes).map_err(error::ErrorBadRequest)?;
        fields.insert(name, Value::String(text));
    }

    serde_json::from_value(Value::Object(fields)).map_err(error::ErrorBadRequest)
}
