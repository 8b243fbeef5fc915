//! Edit form buffer and the tag transform

use thiserror::Error;

use crate::api::{Quote, QuoteDraft};

/// Reasons a form cannot be submitted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Author is required")]
    MissingAuthor,
    #[error("Quote text is required")]
    MissingText,
}

/// Form input fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Author,
    Tags,
    QuoteText,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Author => Self::Tags,
            Self::Tags => Self::QuoteText,
            Self::QuoteText => Self::Author,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Author => Self::QuoteText,
            Self::Tags => Self::Author,
            Self::QuoteText => Self::Tags,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Author => "Author",
            Self::Tags => "Tags (comma-separated)",
            Self::QuoteText => "Quote",
        }
    }
}

/// Transient edit state. Tags are kept as the raw comma-delimited text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormBuffer {
    pub author: String,
    pub tags: String,
    pub quote_text: String,
}

impl FormBuffer {
    pub fn new(
        author: impl Into<String>,
        tags: impl Into<String>,
        quote_text: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            tags: tags.into(),
            quote_text: quote_text.into(),
        }
    }

    /// Buffer pre-filled from an existing quote
    pub fn from_quote(quote: &Quote) -> Self {
        Self {
            author: quote.author.clone(),
            tags: quote.tags_joined(),
            quote_text: quote.quote_text.clone(),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Author => &self.author,
            FormField::Tags => &self.tags,
            FormField::QuoteText => &self.quote_text,
        }
    }

    pub fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Author => &mut self.author,
            FormField::Tags => &mut self.tags,
            FormField::QuoteText => &mut self.quote_text,
        }
    }

    pub fn clear(&mut self) {
        self.author.clear();
        self.tags.clear();
        self.quote_text.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.author.is_empty() && self.tags.is_empty() && self.quote_text.is_empty()
    }

    /// Builds the submission body. Author and quote text go out as typed;
    /// only emptiness is checked.
    ///
    /// The remote collection accepts blank fields. Refusing them here is a
    /// client-side rule on top of that contract.
    pub fn to_draft(&self) -> Result<QuoteDraft, FormError> {
        if self.author.trim().is_empty() {
            return Err(FormError::MissingAuthor);
        }
        if self.quote_text.trim().is_empty() {
            return Err(FormError::MissingText);
        }

        Ok(QuoteDraft {
            author: self.author.clone(),
            tags: split_tags(&self.tags),
            quote_text: self.quote_text.clone(),
        })
    }
}

/// Splits on every comma and trims each piece.
///
/// Empty segments are kept as empty tags, so the result always has one more
/// element than the input has commas.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(|tag| tag.trim().to_string()).collect()
}
