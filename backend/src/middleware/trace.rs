//! Request tracing middleware.
//!
//! Every request runs inside a [`TraceId`] scope, so errors built while it
//! is served carry the identifier. The identifier is echoed in the
//! `Trace-Id` response header and one `info` line is logged per request.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{error, info};

use crate::domain::TraceId;

/// Name of the correlation header read from requests and set on responses.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Middleware factory.
///
/// ```
/// use actix_web::App;
/// use market_board::middleware::Trace;
///
/// let _app = App::new().wrap(Trace);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let incoming = req
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok());
        let trace_id = TraceId::from_header_or_generate(incoming);
        let method = req.method().clone();
        let path = req.path().to_owned();
        let started = Instant::now();
        let fut = self.service.call(req);

        Box::pin(TraceId::scope(trace_id, async move {
            let result = fut.await;
            let elapsed_ms = started.elapsed().as_millis();
            match result {
                Ok(mut res) => {
                    info!(
                        trace_id = %trace_id,
                        %method,
                        path = %path,
                        status = res.status().as_u16(),
                        elapsed_ms,
                        "request completed"
                    );
                    set_trace_header(&mut res, trace_id);
                    Ok(res)
                }
                Err(err) => {
                    error!(
                        trace_id = %trace_id,
                        %method,
                        path = %path,
                        elapsed_ms,
                        error = %err,
                        "request failed"
                    );
                    Err(err)
                }
            }
        }))
    }
}

fn set_trace_header<B>(res: &mut ServiceResponse<B>, trace_id: TraceId) {
    match HeaderValue::from_str(&trace_id.to_string()) {
        Ok(value) => {
            res.headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(error) => {
            error!(%error, trace_id = %trace_id, "failed to encode trace identifier header");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiResult, Error as DomainError};
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    async fn call(req: test::TestRequest) -> ServiceResponse<actix_web::body::BoxBody> {
        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .route(
                    "/",
                    web::get().to(|| async {
                        let id = TraceId::current().map(|id| id.to_string()).unwrap_or_default();
                        HttpResponse::Ok().body(id)
                    }),
                )
                .route(
                    "/fail",
                    web::get().to(|| async {
                        ApiResult::<HttpResponse>::Err(DomainError::invalid_request("bad"))
                    }),
                ),
        )
        .await;
        test::call_service(&app, req.to_request()).await
    }

    fn header(res: &ServiceResponse<actix_web::body::BoxBody>) -> String {
        res.headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("ascii header")
            .to_owned()
    }

    #[rstest]
    #[actix_web::test]
    async fn handler_sees_the_header_value() {
        let res = call(test::TestRequest::get().uri("/")).await;
        let trace_id = header(&res);
        let body = test::read_body(res).await;
        assert_eq!(body, trace_id.as_bytes());
    }

    #[rstest]
    #[actix_web::test]
    async fn client_supplied_uuid_is_reused() {
        let supplied = "1b4e28ba-2fa1-4d2b-883f-0016d3cca427";
        let res = call(
            test::TestRequest::get()
                .uri("/")
                .insert_header((TRACE_ID_HEADER, supplied)),
        )
        .await;
        assert_eq!(header(&res), supplied);
    }

    #[rstest]
    #[actix_web::test]
    async fn error_body_carries_the_same_trace_id() {
        let res = call(test::TestRequest::get().uri("/fail")).await;
        let trace_id = header(&res);
        let body: DomainError = test::read_body_json(res).await;
        assert_eq!(body.trace_id(), Some(trace_id.as_str()));
    }
}
