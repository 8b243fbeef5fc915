//! Application state types and enums

use crate::api::{Quote, QuoteId};

/// Pane that receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Search,
    #[default]
    Table,
    Form,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Self::Search => Self::Table,
            Self::Table => Self::Form,
            Self::Form => Self::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Search => Self::Form,
            Self::Table => Self::Search,
            Self::Form => Self::Table,
        }
    }
}

/// Modal dialog on top of the main screen
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    None,
    DeleteConfirm(DeleteConfirmDialog),
    Error(String),
}

/// Delete confirmation dialog data
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteConfirmDialog {
    pub id: QuoteId,
    pub author: String,
    pub excerpt: String,
}

impl DeleteConfirmDialog {
    const EXCERPT_CHARS: usize = 40;

    pub fn for_quote(quote: &Quote) -> Self {
        let mut excerpt: String = quote.quote_text.chars().take(Self::EXCERPT_CHARS).collect();
        if quote.quote_text.chars().count() > Self::EXCERPT_CHARS {
            excerpt.push('…');
        }
        Self {
            id: quote.id.clone(),
            author: quote.author.clone(),
            excerpt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycle() {
        let focus = Focus::Search;
        assert_eq!(focus.next(), Focus::Table);
        assert_eq!(focus.next().next(), Focus::Form);
        assert_eq!(focus.next().next().next(), Focus::Search);
        assert_eq!(Focus::Table.prev(), Focus::Search);
    }

    #[test]
    fn test_delete_dialog_truncates_long_text() {
        let quote = Quote {
            id: QuoteId::new("9"),
            author: "Austen".to_string(),
            tags: vec![],
            quote_text: "It is a truth universally acknowledged, that a single man in possession of a good fortune, must be in want of a wife.".to_string(),
        };
        let dialog = DeleteConfirmDialog::for_quote(&quote);

        assert_eq!(dialog.id, QuoteId::new("9"));
        assert!(dialog.excerpt.ends_with('…'));
        assert_eq!(dialog.excerpt.chars().count(), 41);
    }
}
