//! Secondhand marketplace products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::text::RequiredText;

/// Store-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation errors raised while building product drafts and patches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductValidationError {
    /// `name` was blank.
    #[error("name must not be empty")]
    EmptyName,
    /// `description` was blank.
    #[error("description must not be empty")]
    EmptyDescription,
    /// `price` was below zero.
    #[error("price must not be negative, got {price}")]
    NegativePrice {
        /// Rejected value.
        price: i64,
    },
    /// One of the `tags` was blank.
    #[error("tags[{index}] must not be empty")]
    EmptyTag {
        /// Position of the blank tag.
        index: usize,
    },
}

impl ProductValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyDescription => "description",
            Self::NegativePrice { .. } => "price",
            Self::EmptyTag { .. } => "tags",
        }
    }
}

/// A persisted product listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: ProductId,
    /// Listing title.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Asking price in whole currency units.
    pub price: i64,
    /// Search tags in submission order.
    pub tags: Vec<String>,
    /// Number of users who marked the product as a favourite.
    pub favorite_count: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Apply a partial update, keeping fields the patch leaves out.
    #[must_use]
    pub fn merge(self, patch: ProductPatch) -> Self {
        let ProductPatch {
            name,
            description,
            price,
            tags,
        } = patch;
        Self {
            name: name.map_or(self.name, RequiredText::into_inner),
            description: description.map_or(self.description, RequiredText::into_inner),
            price: price.map_or(self.price, Price::get),
            tags: tags.map_or(self.tags, Tags::into_inner),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Price(i64);

impl Price {
    fn new(price: i64) -> Result<Self, ProductValidationError> {
        if price < 0 {
            return Err(ProductValidationError::NegativePrice { price });
        }
        Ok(Self(price))
    }

    const fn get(self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Tags(Vec<String>);

impl Tags {
    fn new(tags: Vec<String>) -> Result<Self, ProductValidationError> {
        if let Some(index) = tags.iter().position(|tag| tag.trim().is_empty()) {
            return Err(ProductValidationError::EmptyTag { index });
        }
        Ok(Self(tags))
    }

    fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// Validated input for a new product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    name: RequiredText,
    description: RequiredText,
    price: Price,
    tags: Tags,
}

impl ProductDraft {
    /// Validate the fields of a new product. Absent tags become an empty list.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: i64,
        tags: Option<Vec<String>>,
    ) -> Result<Self, ProductValidationError> {
        Ok(Self {
            name: RequiredText::new(name).map_err(|_| ProductValidationError::EmptyName)?,
            description: RequiredText::new(description)
                .map_err(|_| ProductValidationError::EmptyDescription)?,
            price: Price::new(price)?,
            tags: Tags::new(tags.unwrap_or_default())?,
        })
    }

    /// Listing title.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Asking price.
    #[must_use]
    pub const fn price(&self) -> i64 {
        self.price.get()
    }

    /// Search tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        self.tags.0.as_slice()
    }
}

/// Validated partial update for a product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    name: Option<RequiredText>,
    description: Option<RequiredText>,
    price: Option<Price>,
    tags: Option<Tags>,
}

impl ProductPatch {
    /// Validate the fields present in a partial update.
    pub fn new(
        name: Option<String>,
        description: Option<String>,
        price: Option<i64>,
        tags: Option<Vec<String>>,
    ) -> Result<Self, ProductValidationError> {
        Ok(Self {
            name: name
                .map(RequiredText::new)
                .transpose()
                .map_err(|_| ProductValidationError::EmptyName)?,
            description: description
                .map(RequiredText::new)
                .transpose()
                .map_err(|_| ProductValidationError::EmptyDescription)?,
            price: price.map(Price::new).transpose()?,
            tags: tags.map(Tags::new).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn product() -> Product {
        Product {
            id: ProductId::new(9),
            name: "Road bike".to_owned(),
            description: "54cm frame".to_owned(),
            price: 120_000,
            tags: vec!["bike".to_owned()],
            favorite_count: 3,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[rstest]
    fn draft_defaults_tags_to_empty() {
        let draft = ProductDraft::new("Lamp", "Desk lamp", 0, None).expect("valid draft");
        assert!(draft.tags().is_empty());
        assert_eq!(draft.price(), 0);
    }

    #[rstest]
    #[case("", "d", 1, None, ProductValidationError::EmptyName)]
    #[case("n", " ", 1, None, ProductValidationError::EmptyDescription)]
    #[case("n", "d", -1, None, ProductValidationError::NegativePrice { price: -1 })]
    #[case(
        "n",
        "d",
        1,
        Some(vec!["ok".to_owned(), String::new()]),
        ProductValidationError::EmptyTag { index: 1 }
    )]
    fn draft_rejects_invalid_fields(
        #[case] name: &str,
        #[case] description: &str,
        #[case] price: i64,
        #[case] tags: Option<Vec<String>>,
        #[case] expected: ProductValidationError,
    ) {
        assert_eq!(ProductDraft::new(name, description, price, tags), Err(expected));
    }

    #[rstest]
    fn patch_keeps_counter_and_timestamp(product: Product) {
        let patch = ProductPatch::new(None, None, Some(99_000), Some(Vec::new())).expect("valid");
        let merged = product.clone().merge(patch);
        assert_eq!(merged.price, 99_000);
        assert!(merged.tags.is_empty());
        assert_eq!(merged.name, product.name);
        assert_eq!(merged.favorite_count, product.favorite_count);
        assert_eq!(merged.created_at, product.created_at);
    }

    #[rstest]
    fn patch_rejects_negative_price() {
        let result = ProductPatch::new(None, None, Some(-5), None);
        assert_eq!(result, Err(ProductValidationError::NegativePrice { price: -5 }));
    }
}
