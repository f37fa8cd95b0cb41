use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::web::error::ApiError;

/// JSON body extractor that reports the exact path of the value that failed to deserialize.
///
/// Size limit, content type and syntax checks come from the app's `JsonConfig`; the typed
/// decode runs afterwards so the error location is taken from the deserializer itself.
pub struct ValidJson<T>(pub T);

impl<T> ValidJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: DeserializeOwned + 'static> FromRequest for ValidJson<T> {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Json::<Value>::from_request(req, payload);
        let path = req.path().to_string();

        Box::pin(async move {
            let value = body.await?.into_inner();
            serde_path_to_error::deserialize(value)
                .map(ValidJson)
                .map_err(|e| {
                    let err = ApiError::from(e);
                    warn!("Rejected request to {}: {}", path, err);
                    err.into()
                })
        })
    }
}
