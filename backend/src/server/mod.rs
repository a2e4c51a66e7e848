//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::articles::{
    create_article, delete_article, get_article, list_articles, update_article,
};
use crate::inbound::http::comments::{
    create_article_comment, create_product_comment, delete_comment, delete_product_comment,
    list_article_comments, list_comments, list_comments_of_product, list_product_comments,
    update_comment, update_product_comment,
};
use crate::inbound::http::error::configure_extractors;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::products::{
    create_product, delete_product, get_product, list_products, update_product,
};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;

/// Register extractor error handlers and every resource route.
///
/// Shared by [`build_app`] and the integration tests.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    configure_extractors(cfg);
    cfg.service(create_article)
        .service(list_articles)
        .service(get_article)
        .service(update_article)
        .service(delete_article)
        .service(create_article_comment)
        .service(list_article_comments)
        .service(list_comments)
        .service(update_comment)
        .service(delete_comment)
        .service(create_product)
        .service(list_products)
        .service(get_product)
        .service(update_product)
        .service(delete_product)
        .service(create_product_comment)
        .service(list_comments_of_product)
        .service(list_product_comments)
        .service(update_product_comment)
        .service(delete_product_comment);
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
