//! Main screen panes: search bar, quote table, edit form

use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::api::{Quote, QuoteId};
use crate::ui::{cursor_span, field_style, key_hint, pane_border_style};
use crate::viewmodel::{FormBuffer, FormField, Listing};

/// Render the search-by-author input
pub fn render_search_bar(frame: &mut Frame, area: Rect, term: &str, focused: bool) {
    let line = Line::from(vec![
        Span::styled("Author: ", field_style(focused)),
        Span::raw(term.to_string()),
        cursor_span(focused),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .border_style(pane_border_style(focused)),
    );

    frame.render_widget(paragraph, area);
}

fn table_title(listing: &Listing, count: usize) -> String {
    match listing {
        Listing::All => format!(" Quotes ({}) ", count),
        Listing::Search(term) => format!(" Quotes by \"{}\" ({}) ", term, count),
    }
}

/// Render the quote table
pub fn render_quote_table(
    frame: &mut Frame,
    area: Rect,
    quotes: &[Quote],
    listing: &Listing,
    table_state: &mut TableState,
    focused: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(table_title(listing, quotes.len()))
        .border_style(pane_border_style(focused));

    if quotes.is_empty() {
        let empty_msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No quotes",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(
                [key_hint("A", "to add one"), key_hint("R", "to reload")].concat(),
            ),
        ])
        .block(block);
        frame.render_widget(empty_msg, area);
        return;
    }

    let header = Row::new(vec!["Author", "Tags", "Quote"]).style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = quotes
        .iter()
        .map(|quote| {
            Row::new(vec![
                Cell::from(quote.author.clone()),
                Cell::from(Span::styled(
                    quote.tags_joined(),
                    Style::default().fg(Color::Cyan),
                )),
                Cell::from(quote.quote_text.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("▶ ");

    frame.render_stateful_widget(table, area, table_state);
}

/// Render the add/update form. `focused_field` is `None` when the form does not have focus.
pub fn render_form(
    frame: &mut Frame,
    area: Rect,
    form: &FormBuffer,
    focused_field: Option<FormField>,
    editing: Option<&QuoteId>,
    error: Option<&str>,
) {
    let title = match editing {
        Some(id) => format!(" Update Quote {} ", id),
        None => " Add Quote ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(pane_border_style(focused_field.is_some()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Author
        Constraint::Length(1), // Tags
        Constraint::Min(1),    // Quote
        Constraint::Length(1), // Hint
    ])
    .split(inner.inner(Margin::new(1, 0)));

    let fields = [FormField::Author, FormField::Tags, FormField::QuoteText];
    for (field, chunk) in fields.into_iter().zip(chunks.iter()) {
        let focused = focused_field == Some(field);
        let line = Line::from(vec![
            Span::styled(format!("{}: ", field.label()), field_style(focused)),
            Span::raw(form.value(field).to_string()),
            cursor_span(focused),
        ]);
        frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: false }), *chunk);
    }

    let hint = if let Some(error) = error {
        Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        ))
    } else if focused_field.is_some() {
        let submit = if editing.is_some() { "Update" } else { "Add" };
        Line::from(
            [
                key_hint("Tab", "Next"),
                key_hint("Enter", submit),
                key_hint("Esc", "Back"),
            ]
            .concat(),
        )
    } else {
        Line::from(Span::styled(
            "Press A to add, E to edit the selected quote",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(hint), chunks[3]);
}
