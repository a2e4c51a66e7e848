//! Bulletin board articles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::text::{RequiredText, TextError};

/// Store-assigned article identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(i64);

impl ArticleId {
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

impl std::fmt::Display for ArticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation errors raised while building article drafts and patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArticleValidationError {
    /// `title` was blank.
    #[error("title must not be empty")]
    EmptyTitle,
    /// `content` was blank.
    #[error("content must not be empty")]
    EmptyContent,
}

impl ArticleValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyContent => "content",
        }
    }
}

/// A persisted article.
///
/// `id` and `created_at` are assigned by the store and never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Store-assigned identifier.
    pub id: ArticleId,
    /// Headline shown in listings.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Article {
    /// Apply a partial update, keeping fields the patch leaves out.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use market_board::domain::{Article, ArticleId, ArticlePatch};
    ///
    /// let article = Article {
    ///     id: ArticleId::new(1),
    ///     title: "Selling a bike".into(),
    ///     content: "Barely used".into(),
    ///     created_at: Utc::now(),
    /// };
    /// let patch = ArticlePatch::new(Some("Bike sold".into()), None).expect("valid patch");
    /// let merged = article.clone().merge(patch);
    /// assert_eq!(merged.title, "Bike sold");
    /// assert_eq!(merged.content, article.content);
    /// ```
    #[must_use]
    pub fn merge(self, patch: ArticlePatch) -> Self {
        Self {
            title: patch.title.map_or(self.title, RequiredText::into_inner),
            content: patch.content.map_or(self.content, RequiredText::into_inner),
            ..self
        }
    }
}

/// Validated input for a new article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    title: RequiredText,
    content: RequiredText,
}

impl ArticleDraft {
    /// Validate the fields of a new article.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, ArticleValidationError> {
        Ok(Self {
            title: RequiredText::new(title).map_err(title_error)?,
            content: RequiredText::new(content).map_err(content_error)?,
        })
    }

    /// Article headline.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Article body.
    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }
}

/// Validated partial update for an article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePatch {
    title: Option<RequiredText>,
    content: Option<RequiredText>,
}

impl ArticlePatch {
    /// Validate the fields present in a partial update.
    pub fn new(
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Self, ArticleValidationError> {
        Ok(Self {
            title: title.map(RequiredText::new).transpose().map_err(title_error)?,
            content: content
                .map(RequiredText::new)
                .transpose()
                .map_err(content_error)?,
        })
    }
}

fn title_error(_: TextError) -> ArticleValidationError {
    ArticleValidationError::EmptyTitle
}

fn content_error(_: TextError) -> ArticleValidationError {
    ArticleValidationError::EmptyContent
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn article() -> Article {
        Article {
            id: ArticleId::new(4),
            title: "Free sofa".to_owned(),
            content: "Pick up this weekend".to_owned(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[rstest]
    #[case("", "body", ArticleValidationError::EmptyTitle)]
    #[case("title", "  ", ArticleValidationError::EmptyContent)]
    fn draft_rejects_blank_fields(
        #[case] title: &str,
        #[case] content: &str,
        #[case] expected: ArticleValidationError,
    ) {
        assert_eq!(ArticleDraft::new(title, content), Err(expected));
    }

    #[rstest]
    fn empty_patch_keeps_record(article: Article) {
        let merged = article.clone().merge(ArticlePatch::default());
        assert_eq!(merged, article);
    }

    #[rstest]
    fn patch_replaces_only_present_fields(article: Article) {
        let patch = ArticlePatch::new(None, Some("Gone, thanks".to_owned())).expect("valid patch");
        let merged = article.clone().merge(patch);
        assert_eq!(merged.title, article.title);
        assert_eq!(merged.content, "Gone, thanks");
        assert_eq!(merged.created_at, article.created_at);
    }

    #[rstest]
    fn patch_rejects_blank_title() {
        let result = ArticlePatch::new(Some(String::new()), None);
        assert_eq!(result, Err(ArticleValidationError::EmptyTitle));
    }
}
