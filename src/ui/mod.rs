//! TUI components and widgets

pub mod dialogs;
pub mod screens;
pub mod widgets;

pub use dialogs::{render_delete_confirm_dialog, render_error_dialog};
pub use screens::{render_form, render_quote_table, render_search_bar};
pub use widgets::{centered_rect, cursor_span, field_style, key_hint, pane_border_style};
