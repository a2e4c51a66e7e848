//! Article HTTP handlers.
//!
//! ```text
//! POST   /article
//! GET    /article
//! GET    /article/{id}
//! PATCH  /article/{id}
//! DELETE /article/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use pagination::PageParams;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Article, ArticleDraft, ArticleId, ArticleListQuery, ArticleOrder, ArticlePatch, Error,
    Keyword,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request payload for creating an article.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    /// Headline, must not be blank.
    pub title: String,
    /// Body text, must not be blank.
    pub content: String,
}

/// Partial update for an article. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatchArticleRequest {
    /// Replacement headline, must not be blank.
    pub title: Option<String>,
    /// Replacement body text, must not be blank.
    pub content: Option<String>,
}

/// Article as returned by every article endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    /// Store-assigned id.
    pub id: i64,
    /// Headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// When the article was posted.
    pub created_at: DateTime<Utc>,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.get(),
            title: article.title,
            content: article.content,
            created_at: article.created_at,
        }
    }
}

/// Query parameters for the article listing.
///
/// Values are kept as strings; anything unusable falls back to its default.
/// Built from the raw query pairs so a repeated key keeps its first value
/// instead of failing extraction.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ArticleListParams {
    /// 1-based page number (default 1).
    pub page: Option<String>,
    /// Records per page (default 10, max 100).
    pub page_size: Option<String>,
    /// Records to skip; takes precedence over `page`.
    pub offset: Option<String>,
    /// Records to take; takes precedence over `pageSize`.
    pub limit: Option<String>,
    /// `recent` (default) or `oldest`.
    pub order: Option<String>,
    /// Case-sensitive substring matched against title and content.
    pub keyword: Option<String>,
}

impl FromIterator<(String, String)> for ArticleListParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "pageSize" => &mut params.page_size,
                "offset" => &mut params.offset,
                "limit" => &mut params.limit,
                "order" => &mut params.order,
                "keyword" => &mut params.keyword,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

impl From<ArticleListParams> for ArticleListQuery {
    fn from(params: ArticleListParams) -> Self {
        let window = PageParams {
            page: params.page,
            page_size: params.page_size,
            offset: params.offset,
            limit: params.limit,
        }
        .window();
        Self {
            keyword: Keyword::new(params.keyword),
            order: ArticleOrder::from_keyword(params.order.as_deref()),
            window,
        }
    }
}

fn article_not_found(id: ArticleId) -> Error {
    Error::not_found(format!("article {id} not found"))
}

/// Create an article.
#[utoipa::path(
    post,
    path = "/article",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article created", body = ArticleResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["articles"],
    operation_id = "createArticle"
)]
#[post("/article")]
pub async fn create_article(
    state: web::Data<HttpState>,
    payload: web::Json<CreateArticleRequest>,
) -> ApiResult<HttpResponse> {
    let CreateArticleRequest { title, content } = payload.into_inner();
    let draft = ArticleDraft::new(title, content)?;
    let article = state.articles.create(&draft).await?;
    Ok(HttpResponse::Created().json(ArticleResponse::from(article)))
}

/// List articles, one page at a time.
#[utoipa::path(
    get,
    path = "/article",
    params(ArticleListParams),
    responses(
        (status = 200, description = "Articles in the requested window", body = [ArticleResponse]),
        (status = 400, description = "Invalid query", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["articles"],
    operation_id = "listArticles"
)]
#[get("/article")]
pub async fn list_articles(
    state: web::Data<HttpState>,
    params: web::Query<Vec<(String, String)>>,
) -> ApiResult<web::Json<Vec<ArticleResponse>>> {
    let params: ArticleListParams = params.into_inner().into_iter().collect();
    let query = ArticleListQuery::from(params);
    let articles = state.articles.list(&query).await?;
    Ok(web::Json(
        articles.into_iter().map(ArticleResponse::from).collect(),
    ))
}

/// Fetch one article.
#[utoipa::path(
    get,
    path = "/article/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article", body = ArticleResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Article not found")
    ),
    tags = ["articles"],
    operation_id = "getArticle"
)]
#[get("/article/{id}")]
pub async fn get_article(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ArticleResponse>> {
    let id = ArticleId::new(path.into_inner());
    let article = state
        .articles
        .find_by_id(id)
        .await?
        .ok_or_else(|| article_not_found(id))?;
    Ok(web::Json(ArticleResponse::from(article)))
}

/// Update some fields of an article.
#[utoipa::path(
    patch,
    path = "/article/{id}",
    params(("id" = i64, Path, description = "Article id")),
    request_body = PatchArticleRequest,
    responses(
        (status = 200, description = "Updated article", body = ArticleResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Article not found")
    ),
    tags = ["articles"],
    operation_id = "updateArticle"
)]
#[patch("/article/{id}")]
pub async fn update_article(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<PatchArticleRequest>,
) -> ApiResult<web::Json<ArticleResponse>> {
    let id = ArticleId::new(path.into_inner());
    let PatchArticleRequest { title, content } = payload.into_inner();
    let patch = ArticlePatch::new(title, content)?;
    let article = state
        .articles
        .update(id, &patch)
        .await?
        .ok_or_else(|| article_not_found(id))?;
    Ok(web::Json(ArticleResponse::from(article)))
}

/// Delete an article and its comments.
#[utoipa::path(
    delete,
    path = "/article/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 204, description = "Article deleted"),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Article not found")
    ),
    tags = ["articles"],
    operation_id = "deleteArticle"
)]
#[delete("/article/{id}")]
pub async fn delete_article(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = ArticleId::new(path.into_inner());
    if !state.articles.delete(id).await? {
        return Err(article_not_found(id));
    }
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test as actix_test};
    use mockall::predicate::eq;
    use pagination::PageWindow;
    use rstest::rstest;

    use crate::domain::ports::{
        MockArticleRepository, MockCommentRepository, MockProductRepository, PersistenceError,
    };

    fn state_with(articles: MockArticleRepository) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(articles),
            Arc::new(MockProductRepository::new()),
            Arc::new(MockCommentRepository::new()),
        ))
    }

    #[rstest]
    fn list_params_build_the_query() {
        let params = ArticleListParams {
            page: Some("2".to_owned()),
            page_size: Some("5".to_owned()),
            order: Some("oldest".to_owned()),
            keyword: Some("bike".to_owned()),
            ..ArticleListParams::default()
        };
        let query = ArticleListQuery::from(params);
        assert_eq!(query.window, PageWindow::from_offset(5, 5));
        assert_eq!(query.order, ArticleOrder::Oldest);
        assert_eq!(query.keyword.as_deref(), Some("bike"));
    }

    #[rstest]
    fn repeated_keys_keep_their_first_value() {
        let pairs = [("page", "1"), ("page", "2"), ("sort", "x"), ("pageSize", "3")];
        let params: ArticleListParams = pairs
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value.to_owned()))
            .collect();
        assert_eq!(params.page.as_deref(), Some("1"));
        assert_eq!(params.page_size.as_deref(), Some("3"));
        assert_eq!(params.order, None);
    }

    #[rstest]
    #[actix_web::test]
    async fn store_failure_is_a_server_error() {
        let mut articles = MockArticleRepository::new();
        articles
            .expect_find_by_id()
            .with(eq(ArticleId::new(7)))
            .times(1)
            .return_once(|_| Err(PersistenceError::connection("refused")));
        let app = actix_test::init_service(App::new().app_data(state_with(articles)).service(get_article))
            .await;

        let req = actix_test::TestRequest::get().uri("/article/7").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Error = actix_test::read_body_json(res).await;
        assert_eq!(body.message(), "store connection failed: refused");
    }

    #[rstest]
    #[actix_web::test]
    async fn blank_title_never_reaches_the_store() {
        let mut articles = MockArticleRepository::new();
        articles.expect_create().never();
        let app =
            actix_test::init_service(App::new().app_data(state_with(articles)).service(create_article))
                .await;

        let req = actix_test::TestRequest::post()
            .uri("/article")
            .set_json(serde_json::json!({ "title": "  ", "content": "body" }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn invalid_window_argument_is_a_bad_request() {
        let mut articles = MockArticleRepository::new();
        articles
            .expect_list()
            .times(1)
            .return_once(|_| Err(PersistenceError::invalid_argument("offset exceeds the supported range")));
        let app =
            actix_test::init_service(App::new().app_data(state_with(articles)).service(list_articles))
                .await;

        let req = actix_test::TestRequest::get()
            .uri("/article?offset=18446744073709551615")
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
