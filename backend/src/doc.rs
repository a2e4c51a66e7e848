//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every resource handler, the health probes, and the
//! [`ErrorSchema`]/[`ErrorCodeSchema`] wrappers that describe domain errors
//! without coupling the domain to utoipa. The document is served by Swagger
//! UI in debug builds and printed by the `openapi-dump` binary.

use crate::inbound::http::articles::{
    ArticleResponse, CreateArticleRequest, PatchArticleRequest,
};
use crate::inbound::http::comments::{CommentResponse, CreateCommentRequest, PatchCommentRequest};
use crate::inbound::http::products::{
    CreateProductRequest, PatchProductRequest, ProductListResponse, ProductResponse,
    ProductSummary,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Market board API",
        description = "Bulletin board articles, marketplace products, and their comments."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::articles::create_article,
        crate::inbound::http::articles::list_articles,
        crate::inbound::http::articles::get_article,
        crate::inbound::http::articles::update_article,
        crate::inbound::http::articles::delete_article,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::comments::create_article_comment,
        crate::inbound::http::comments::list_article_comments,
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::comments::update_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::comments::create_product_comment,
        crate::inbound::http::comments::list_comments_of_product,
        crate::inbound::http::comments::list_product_comments,
        crate::inbound::http::comments::update_product_comment,
        crate::inbound::http::comments::delete_product_comment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ArticleResponse,
        CreateArticleRequest,
        PatchArticleRequest,
        ProductResponse,
        ProductSummary,
        ProductListResponse,
        CreateProductRequest,
        PatchProductRequest,
        CommentResponse,
        CreateCommentRequest,
        PatchCommentRequest,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "articles", description = "Bulletin board articles"),
        (name = "products", description = "Marketplace products"),
        (name = "comments", description = "Comments on articles and products"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
