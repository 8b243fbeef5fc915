//! Application module

mod handlers;
pub mod state;

pub use state::{DeleteConfirmDialog, Dialog, Focus};

use anyhow::Result;
use log::info;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, TableState},
    Frame,
};

use crate::ui::{
    key_hint, render_delete_confirm_dialog, render_error_dialog, render_form, render_quote_table,
    render_search_bar,
};
use crate::viewmodel::{FormField, SyncEvent, ViewModel};

/// Main application state
pub struct App {
    pub vm: ViewModel,
    pub should_quit: bool,
    pub dialog: Dialog,
    pub focus: Focus,

    // Table state
    pub table_state: TableState,

    // Form state
    pub form_field: FormField,
    pub form_error: Option<String>,

    // Last confirmation shown in the header
    pub status: Option<String>,
}

impl App {
    /// Creates the app and requests the initial listing
    pub fn new(vm: ViewModel) -> Self {
        let mut app = Self::with_view_model(vm);
        app.vm.load_all();
        app
    }

    /// Create app without issuing any request (for testing)
    pub fn with_view_model(vm: ViewModel) -> Self {
        Self {
            vm,
            should_quit: false,
            dialog: Dialog::None,
            focus: Focus::Table,
            table_state: TableState::default(),
            form_field: FormField::Author,
            form_error: None,
            status: None,
        }
    }

    /// Main application loop
    pub fn run(&mut self, terminal: &mut ratatui::DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            let events = self.vm.poll();
            self.apply_sync_events(events);

            terminal.draw(|frame| self.render(frame))?;

            self.handle_events()?;
        }
        info!("Quitting");
        Ok(())
    }

    /// Reflect view-model changes in the UI
    pub fn apply_sync_events(&mut self, events: Vec<SyncEvent>) {
        for event in events {
            match event {
                SyncEvent::Refreshed { .. } => {
                    self.clamp_selection();
                }
                SyncEvent::Created => {
                    self.status = Some("Quote added".to_string());
                    self.form_field = FormField::Author;
                }
                SyncEvent::Updated { id } => {
                    self.status = Some(format!("Quote {} updated", id));
                }
                SyncEvent::Removed { id } => {
                    self.status = Some(format!("Quote {} deleted", id));
                }
                SyncEvent::Failed { op, error } => {
                    self.status = None;
                    self.dialog = Dialog::Error(format!(
                        "Failed to {} ({}): {}",
                        op.label(),
                        error.kind(),
                        error
                    ));
                }
            }
        }
    }

    /// Keep the selection inside the current list
    fn clamp_selection(&mut self) {
        let len = self.vm.quotes().len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        match self.table_state.selected() {
            Some(selected) if selected >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            _ => {}
        }
    }

    /// Render the application
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search
            Constraint::Min(5),    // Quotes
            Constraint::Length(8), // Form
            Constraint::Length(3), // Footer
        ])
        .split(area);

        self.render_header(frame, chunks[0]);
        render_search_bar(
            frame,
            chunks[1],
            &self.vm.search_term,
            self.focus == Focus::Search,
        );
        render_quote_table(
            frame,
            chunks[2],
            self.vm.quotes(),
            self.vm.listing(),
            &mut self.table_state,
            self.focus == Focus::Table,
        );
        render_form(
            frame,
            chunks[3],
            &self.vm.form,
            (self.focus == Focus::Form).then_some(self.form_field),
            self.vm.editing(),
            self.form_error.as_deref(),
        );
        self.render_footer(frame, chunks[4]);

        match &self.dialog {
            Dialog::None => {}
            Dialog::DeleteConfirm(dialog) => {
                render_delete_confirm_dialog(frame, dialog);
            }
            Dialog::Error(msg) => {
                render_error_dialog(frame, msg);
            }
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let version = env!("CARGO_PKG_VERSION");
        let title = format!(" quotedeck v{} ", version);

        let mut spans = vec![
            Span::styled(
                title,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("— "),
            Span::styled(
                self.vm.client().base_url().to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ];

        if let Some((text, color)) = self.sync_status() {
            spans.push(Span::styled(text, Style::default().fg(color)));
        }

        if let Some(ref status) = self.status {
            spans.push(Span::styled(
                format!("  {}", status),
                Style::default().fg(Color::Green),
            ));
        }

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

        frame.render_widget(header, area);
    }

    /// Pending requests, then the last failure, then the last refresh time
    fn sync_status(&self) -> Option<(String, Color)> {
        if self.vm.is_busy() {
            return Some((
                format!("  ⟳ {} pending", self.vm.in_flight()),
                Color::Magenta,
            ));
        }
        if let Some(error) = self.vm.last_error() {
            return Some((format!("  last request {}", error.kind()), Color::Red));
        }
        self.vm.last_refreshed().map(|refreshed| {
            (
                format!("  updated {}", refreshed.format("%H:%M:%S")),
                Color::DarkGray,
            )
        })
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hints = match self.focus {
            Focus::Search => [
                key_hint("Enter", "Search"),
                key_hint("Esc", "Clear"),
                key_hint("Tab", "Table"),
            ]
            .concat(),
            Focus::Table => [
                key_hint("↑↓", "Nav"),
                key_hint("/", "Search"),
                key_hint("A", "Add"),
                key_hint("E", "Edit"),
                key_hint("D", "Del"),
                key_hint("R", "Reload"),
                key_hint("Q", "Quit"),
            ]
            .concat(),
            Focus::Form => {
                let submit = if self.vm.editing().is_some() {
                    "Update"
                } else {
                    "Add"
                };
                [
                    key_hint("Tab", "Next"),
                    key_hint("Enter", submit),
                    key_hint("Esc", "Back"),
                ]
                .concat()
            }
        };

        let footer = Paragraph::new(Line::from(hints)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Keyboard ")
                .border_style(Style::default().fg(Color::DarkGray)),
        );

        frame.render_widget(footer, area);
    }
}
