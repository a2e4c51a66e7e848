//! Product HTTP handlers.
//!
//! ```text
//! POST   /products
//! GET    /products
//! GET    /products/{id}
//! PATCH  /products/{id}
//! DELETE /products/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use pagination::PageParams;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Error, Keyword, Product, ProductDraft, ProductId, ProductListQuery, ProductOrder, ProductPage,
    ProductPatch,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request payload for listing a product.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    /// Item name, must not be blank.
    pub name: String,
    /// Condition and pickup details, must not be blank.
    pub description: String,
    /// Asking price, zero or more.
    pub price: i64,
    /// Optional search tags; each must be non-blank.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Partial update for a product. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatchProductRequest {
    /// Replacement name, must not be blank.
    pub name: Option<String>,
    /// Replacement description, must not be blank.
    pub description: Option<String>,
    /// Replacement price, zero or more.
    pub price: Option<i64>,
    /// Replacement tag list; each must be non-blank.
    pub tags: Option<Vec<String>>,
}

/// Full product representation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    /// Store-assigned id.
    pub id: i64,
    /// Item name.
    pub name: String,
    /// Condition and pickup details.
    pub description: String,
    /// Asking price.
    pub price: i64,
    /// Search tags.
    pub tags: Vec<String>,
    /// Number of users who favourited the item.
    pub favorite_count: i32,
    /// When the item was listed.
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.get(),
            name: product.name,
            description: product.description,
            price: product.price,
            tags: product.tags,
            favorite_count: product.favorite_count,
            created_at: product.created_at,
        }
    }
}

/// Product as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    /// Store-assigned id.
    pub id: i64,
    /// Item name.
    pub name: String,
    /// Asking price.
    pub price: i64,
    /// Number of users who favourited the item.
    pub favorite_count: i32,
    /// When the item was listed.
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductSummary {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.get(),
            name: product.name,
            price: product.price,
            favorite_count: product.favorite_count,
            created_at: product.created_at,
        }
    }
}

/// One page of products plus the number of matches across all pages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    /// Products matching the keyword, ignoring the window.
    pub total_count: u64,
    /// Products inside the window.
    pub products: Vec<ProductSummary>,
}

impl From<ProductPage> for ProductListResponse {
    fn from(page: ProductPage) -> Self {
        Self {
            total_count: page.total_count,
            products: page.products.into_iter().map(ProductSummary::from).collect(),
        }
    }
}

/// Query parameters for the product listing.
///
/// Collected from the raw query pairs; the first value of a repeated key wins.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ProductListParams {
    /// 1-based page number (default 1).
    pub page: Option<String>,
    /// Records per page (default 10, max 100).
    pub page_size: Option<String>,
    /// Records to skip; takes precedence over `page`.
    pub offset: Option<String>,
    /// Records to take; takes precedence over `pageSize`.
    pub limit: Option<String>,
    /// `recent` (default) or `favorite`.
    pub order: Option<String>,
    /// Case-sensitive substring matched against name and description.
    pub keyword: Option<String>,
}

impl FromIterator<(String, String)> for ProductListParams {
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

impl From<ProductListParams> for ProductListQuery {
    fn from(params: ProductListParams) -> Self {
        let window = PageParams {
            page: params.page,
            page_size: params.page_size,
            offset: params.offset,
            limit: params.limit,
        }
        .window();
        Self {
            keyword: Keyword::new(params.keyword),
            order: ProductOrder::from_keyword(params.order.as_deref()),
            window,
        }
    }
}

fn product_not_found(id: ProductId) -> Error {
    Error::not_found(format!("product {id} not found"))
}

/// Create a product listing.
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    payload: web::Json<CreateProductRequest>,
) -> ApiResult<HttpResponse> {
    let CreateProductRequest {
        name,
        description,
        price,
        tags,
    } = payload.into_inner();
    let draft = ProductDraft::new(name, description, price, tags)?;
    let product = state.products.create(&draft).await?;
    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

/// List products with the total match count.
#[utoipa::path(
    get,
    path = "/products",
    params(ProductListParams),
    responses(
        (status = 200, description = "Products in the requested window", body = ProductListResponse),
        (status = 400, description = "Invalid query", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    params: web::Query<Vec<(String, String)>>,
) -> ApiResult<web::Json<ProductListResponse>> {
    let params: ProductListParams = params.into_inner().into_iter().collect();
    let query = ProductListQuery::from(params);
    let page = state.products.list(&query).await?;
    Ok(web::Json(ProductListResponse::from(page)))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Product not found")
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ProductResponse>> {
    let id = ProductId::new(path.into_inner());
    let product = state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(|| product_not_found(id))?;
    Ok(web::Json(ProductResponse::from(product)))
}

#[utoipa::path(
    patch,
    path = "/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    request_body = PatchProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Product not found")
    ),
    tags = ["products"],
    operation_id = "updateProduct"
)]
#[patch("/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<PatchProductRequest>,
) -> ApiResult<web::Json<ProductResponse>> {
    let id = ProductId::new(path.into_inner());
    let PatchProductRequest {
        name,
        description,
        price,
        tags,
    } = payload.into_inner();
    let patch = ProductPatch::new(name, description, price, tags)?;
    let product = state
        .products
        .update(id, &patch)
        .await?
        .ok_or_else(|| product_not_found(id))?;
    Ok(web::Json(ProductResponse::from(product)))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Product not found")
    ),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[delete("/products/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = ProductId::new(path.into_inner());
    if !state.products.delete(id).await? {
        return Err(product_not_found(id));
    }
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "products_tests.rs"]
mod tests;
