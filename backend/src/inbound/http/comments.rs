//! Comment HTTP handlers for both comment families.
//!
//! ```text
//! POST   /article/{id}/comment
//! GET    /article/{id}/comment
//! GET    /comment
//! PATCH  /comment/{id}
//! DELETE /comment/{id}
//! POST   /product/{id}/comment
//! GET    /product/{id}/comment
//! GET    /productcomment
//! PATCH  /productcomment/{id}
//! DELETE /productcomment/{id}
//! ```
//!
//! Every route is a thin wrapper that fixes the comment family and defers to
//! one of the shared operations below.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use pagination::CursorParams;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    ArticleId, Comment, CommentDraft, CommentId, CommentKind, CommentListRequest, CommentParent,
    CommentPatch, CommentScope, Error, ProductId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request payload for creating a comment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    /// Comment text, must not be blank.
    pub content: String,
}

/// Partial update for a comment.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatchCommentRequest {
    /// Replacement text, must not be blank.
    pub content: Option<String>,
}

/// Comment representation. Exactly one owner id is present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    /// Store-assigned id, unique within the comment family.
    pub id: i64,
    /// Comment text.
    pub content: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
    /// Owning article, for article comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_id: Option<i64>,
    /// Owning product, for product comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        let (article_id, product_id) = match comment.parent {
            CommentParent::Article(id) => (Some(id.get()), None),
            CommentParent::Product(id) => (None, Some(id.get())),
        };
        Self {
            id: comment.id.get(),
            content: comment.content,
            created_at: comment.created_at,
            article_id,
            product_id,
        }
    }
}

/// Cursor query parameters for comment listings.
///
/// Collected from the raw query pairs; the first value of a repeated key wins.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CommentListParams {
    /// Id of the last comment already seen; results start after it.
    pub cursor: Option<String>,
    /// Comments to return (default 5, max 100).
    pub limit: Option<String>,
}

impl FromIterator<(String, String)> for CommentListParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "cursor" => &mut params.cursor,
                "limit" => &mut params.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

impl CommentListParams {
    fn into_request(self, scope: CommentScope) -> CommentListRequest {
        let window = CursorParams {
            cursor: self.cursor,
            limit: self.limit,
        }
        .window::<CommentId>();
        CommentListRequest { scope, window }
    }
}

fn comment_not_found(kind: CommentKind, id: CommentId) -> Error {
    Error::not_found(format!("{} {id} not found", kind.label()))
}

async fn create_for(
    state: &HttpState,
    parent: CommentParent,
    payload: CreateCommentRequest,
) -> ApiResult<HttpResponse> {
    let draft = CommentDraft::new(payload.content)?;
    let comment = state.comments.create(parent, &draft).await?;
    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

async fn list_in(
    state: &HttpState,
    scope: CommentScope,
    params: web::Query<Vec<(String, String)>>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    let request = params
        .into_inner()
        .into_iter()
        .collect::<CommentListParams>()
        .into_request(scope);
    let comments = state.comments.list(&request).await?;
    Ok(web::Json(
        comments.into_iter().map(CommentResponse::from).collect(),
    ))
}

async fn update_in(
    state: &HttpState,
    kind: CommentKind,
    id: CommentId,
    payload: PatchCommentRequest,
) -> ApiResult<web::Json<CommentResponse>> {
    let patch = CommentPatch::new(payload.content)?;
    let comment = state
        .comments
        .update(kind, id, &patch)
        .await?
        .ok_or_else(|| comment_not_found(kind, id))?;
    Ok(web::Json(CommentResponse::from(comment)))
}

async fn delete_in(state: &HttpState, kind: CommentKind, id: CommentId) -> ApiResult<HttpResponse> {
    if !state.comments.delete(kind, id).await? {
        return Err(comment_not_found(kind, id));
    }
    Ok(HttpResponse::NoContent().finish())
}

/// Comment on an article.
#[utoipa::path(
    post,
    path = "/article/{id}/comment",
    params(("id" = i64, Path, description = "Article id")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Article not found")
    ),
    tags = ["comments"],
    operation_id = "createArticleComment"
)]
#[post("/article/{id}/comment")]
pub async fn create_article_comment(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<CreateCommentRequest>,
) -> ApiResult<HttpResponse> {
    let parent = CommentParent::Article(ArticleId::new(path.into_inner()));
    create_for(&state, parent, payload.into_inner()).await
}

/// Comments on one article, newest first.
#[utoipa::path(
    get,
    path = "/article/{id}/comment",
    params(("id" = i64, Path, description = "Article id"), CommentListParams),
    responses(
        (status = 200, description = "Comments after the cursor", body = [CommentResponse]),
        (status = 400, description = "Invalid id", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "listArticleComments"
)]
#[get("/article/{id}/comment")]
pub async fn list_article_comments(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    params: web::Query<Vec<(String, String)>>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    let scope = CommentScope::Parent(CommentParent::Article(ArticleId::new(path.into_inner())));
    list_in(&state, scope, params).await
}

/// Every article comment, newest first.
#[utoipa::path(
    get,
    path = "/comment",
    params(CommentListParams),
    responses(
        (status = 200, description = "Comments after the cursor", body = [CommentResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "listComments"
)]
#[get("/comment")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    params: web::Query<Vec<(String, String)>>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    list_in(&state, CommentScope::All(CommentKind::Article), params).await
}

#[utoipa::path(
    patch,
    path = "/comment/{id}",
    params(("id" = i64, Path, description = "Comment id")),
    request_body = PatchCommentRequest,
    responses(
        (status = 200, description = "Updated comment", body = CommentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Comment not found")
    ),
    tags = ["comments"],
    operation_id = "updateComment"
)]
#[patch("/comment/{id}")]
pub async fn update_comment(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<PatchCommentRequest>,
) -> ApiResult<web::Json<CommentResponse>> {
    let id = CommentId::new(path.into_inner());
    update_in(&state, CommentKind::Article, id, payload.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/comment/{id}",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Comment not found")
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/comment/{id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    delete_in(&state, CommentKind::Article, CommentId::new(path.into_inner())).await
}

/// Comment on a product.
#[utoipa::path(
    post,
    path = "/product/{id}/comment",
    params(("id" = i64, Path, description = "Product id")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Product not found")
    ),
    tags = ["comments"],
    operation_id = "createProductComment"
)]
#[post("/product/{id}/comment")]
pub async fn create_product_comment(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<CreateCommentRequest>,
) -> ApiResult<HttpResponse> {
    let parent = CommentParent::Product(ProductId::new(path.into_inner()));
    create_for(&state, parent, payload.into_inner()).await
}

/// Comments on one product, newest first.
#[utoipa::path(
    get,
    path = "/product/{id}/comment",
    params(("id" = i64, Path, description = "Product id"), CommentListParams),
    responses(
        (status = 200, description = "Comments after the cursor", body = [CommentResponse]),
        (status = 400, description = "Invalid id", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "listProductCommentsOfProduct"
)]
#[get("/product/{id}/comment")]
pub async fn list_comments_of_product(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    params: web::Query<Vec<(String, String)>>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    let scope = CommentScope::Parent(CommentParent::Product(ProductId::new(path.into_inner())));
    list_in(&state, scope, params).await
}

/// Every product comment, newest first.
#[utoipa::path(
    get,
    path = "/productcomment",
    params(CommentListParams),
    responses(
        (status = 200, description = "Comments after the cursor", body = [CommentResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "listProductComments"
)]
#[get("/productcomment")]
pub async fn list_product_comments(
    state: web::Data<HttpState>,
    params: web::Query<Vec<(String, String)>>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    list_in(&state, CommentScope::All(CommentKind::Product), params).await
}

#[utoipa::path(
    patch,
    path = "/productcomment/{id}",
    params(("id" = i64, Path, description = "Product comment id")),
    request_body = PatchCommentRequest,
    responses(
        (status = 200, description = "Updated comment", body = CommentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Comment not found")
    ),
    tags = ["comments"],
    operation_id = "updateProductComment"
)]
#[patch("/productcomment/{id}")]
pub async fn update_product_comment(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<PatchCommentRequest>,
) -> ApiResult<web::Json<CommentResponse>> {
    let id = CommentId::new(path.into_inner());
    update_in(&state, CommentKind::Product, id, payload.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/productcomment/{id}",
    params(("id" = i64, Path, description = "Product comment id")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Comment not found")
    ),
    tags = ["comments"],
    operation_id = "deleteProductComment"
)]
#[delete("/productcomment/{id}")]
pub async fn delete_product_comment(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    delete_in(&state, CommentKind::Product, CommentId::new(path.into_inner())).await
}

#[cfg(test)]
#[path = "comments_tests.rs"]
mod tests;
