use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;
use futures::future::{ok, Ready};
use std::future::Future;
use std::pin::Pin;

use crate::error::AppError;

/// Environment variable holding the expected bearer token. When unset the
/// middleware passes every request through; identity management itself is
/// delegated to the hosting deployment.
pub const ACCESS_TOKEN_ENV: &str = "API_ACCESS_TOKEN";

pub struct Authentication;

impl<S, B> Transform<S, ServiceRequest> for Authentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Transform = AuthenticationMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthenticationMiddleware { service })
    }
}

pub struct AuthenticationMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(
        &self,
        ctx: &mut core::task::Context<'_>,
    ) -> core::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let expected = match std::env::var(ACCESS_TOKEN_ENV) {
            Ok(token) if !token.is_empty() => token,
            _ => {
                let fut = self.service.call(req);
                return Box::pin(async move { fut.await.map(|res| res.map_into_boxed_body()) });
            }
        };

        let supplied = req
            .headers()
            .get("Authorization")
            .and_then(|header| header.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "));

        match supplied {
            Some(token) if token == expected => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(|res| res.map_into_boxed_body()) })
            }
            // Rejections render immediately so the envelope survives the
            // rest of the middleware chain.
            _ => Box::pin(async move { Ok(req.error_response(AppError::Unauthorized)) }),
        }
    }
}
