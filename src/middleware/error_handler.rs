use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpResponse};
use futures::future::{ok, Ready};
use rust_i18n::t;
use std::future::Future;
use std::pin::Pin;

use crate::error::{AppError, ErrorBody};

/// Ensures every failed request renders as the JSON `{ error, details? }`
/// envelope. `AppError` already does so through `ResponseError`; responses
/// built from other errors (payload extraction, bad query strings) get their
/// body replaced here so the surface stays uniform.
pub struct ErrorHandlerMiddleware;

impl<S, B> Transform<S, ServiceRequest> for ErrorHandlerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = ActixError;
    type Transform = ErrorHandlerService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ErrorHandlerService { service })
    }
}

pub struct ErrorHandlerService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ErrorHandlerService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = ActixError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(
        &self,
        ctx: &mut core::task::Context<'_>,
    ) -> core::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().clone();
        let uri = req.uri().clone();

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = match fut.await {
                Ok(res) => res,
                Err(err) => {
                    log::warn!("request failed: {} {} - {}", method, uri, err);
                    return Err(err);
                }
            };

            // Responses built from an error keep it attached; `AppError`
            // already rendered the envelope, everything else gets rewrapped.
            let envelope = match res.response().error() {
                Some(err) => {
                    log::warn!("request failed: {} {} - {}", method, uri, err);
                    if err.as_error::<AppError>().is_some() {
                        None
                    } else {
                        Some(envelope_response(err))
                    }
                }
                None => None,
            };

            Ok(match envelope {
                Some(response) => res.into_response(response),
                None => res.map_into_boxed_body(),
            })
        })
    }
}

fn envelope_response(err: &ActixError) -> HttpResponse {
    let status = err.as_response_error().status_code();
    let error = if status == StatusCode::BAD_REQUEST {
        t!("errors.invalid_request").into_owned()
    } else {
        t!("errors.internal").into_owned()
    };
    HttpResponse::build(status).json(ErrorBody {
        error,
        details: Some(serde_json::Value::String(err.to_string())),
    })
}

pub fn error_handler() -> ErrorHandlerMiddleware {
    ErrorHandlerMiddleware
}
