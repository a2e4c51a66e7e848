//! Shared helpers for the HTTP behaviour tests.
//!
//! Apps are assembled exactly like the server does, minus Swagger UI, over a
//! fresh in-memory store per test. The Diesel adapter suites use
//! [`embedded_postgres`] instead.

#![allow(dead_code, reason = "each test binary uses a different subset")]

pub mod embedded_postgres;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::Value;

use market_board::inbound::http::state::HttpState;
use market_board::middleware::{TRACE_ID_HEADER, Trace};
use market_board::outbound::memory::MemoryStore;
use market_board::server::configure_api;

/// Application wired to an empty in-memory store.
pub fn app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    app_with(&MemoryStore::new())
}

/// Application sharing `store`, so tests can seed it through the ports.
pub fn app_with(store: &MemoryStore) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let state = HttpState::in_memory(store);
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure_api)
}

/// Response captured as status, trace header, and JSON body.
///
/// An empty body is reported as `Value::Null`.
#[derive(Debug)]
pub struct Captured {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: Value,
}

/// Send `req` and capture the response.
pub async fn send<S, R, B>(app: &S, req: R) -> Captured
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(app, req).await;
    let status = res.status();
    let trace_id = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is JSON")
    };
    Captured {
        status,
        trace_id,
        body,
    }
}

/// Ids of a JSON array of records, in response order.
pub fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|item| item["id"].as_i64().expect("numeric id"))
        .collect()
}
