//! Event handling for the application

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::time::Duration;

use super::{App, DeleteConfirmDialog, Dialog, Focus};
use crate::viewmodel::FormField;

impl App {
    /// Handle input events
    pub(super) fn handle_events(&mut self) -> Result<()> {
        // Short timeout while requests are out so completions show up promptly
        let poll_timeout = if self.vm.is_busy() {
            Duration::from_millis(20)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    self.handle_key(key.code);
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, code: KeyCode) {
        match &self.dialog {
            Dialog::None => self.handle_key_normal(code),
            Dialog::DeleteConfirm(_) => self.handle_key_delete_confirm(code),
            Dialog::Error(_) => self.handle_key_error(code),
        }
    }

    fn handle_key_normal(&mut self, code: KeyCode) {
        match self.focus {
            Focus::Search => self.handle_key_search(code),
            Focus::Table => self.handle_key_table(code),
            Focus::Form => self.handle_key_form(code),
        }
    }

    fn handle_key_search(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                self.vm.submit_search();
                self.focus = Focus::Table;
            }
            KeyCode::Esc => {
                if self.vm.search_term.is_empty() {
                    self.focus = Focus::Table;
                } else {
                    self.vm.clear_search();
                }
            }
            KeyCode::Tab => {
                self.focus = Focus::Search.next();
            }
            KeyCode::BackTab => {
                self.focus = Focus::Search.prev();
            }
            KeyCode::Backspace => {
                self.vm.search_term.pop();
            }
            KeyCode::Char(c) => {
                self.vm.search_term.push(c);
            }
            _ => {}
        }
    }

    fn handle_key_table(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous_quote();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next_quote();
            }
            KeyCode::Home => {
                if !self.vm.quotes().is_empty() {
                    self.table_state.select(Some(0));
                }
            }
            KeyCode::End => {
                if !self.vm.quotes().is_empty() {
                    self.table_state.select(Some(self.vm.quotes().len() - 1));
                }
            }
            KeyCode::Tab => {
                self.focus = Focus::Table.next();
            }
            KeyCode::BackTab | KeyCode::Char('/') => {
                self.focus = Focus::Search;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.status = None;
                self.vm.load_all();
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('n') | KeyCode::Char('N') => {
                if self.vm.editing().is_some() {
                    self.vm.cancel_edit();
                }
                self.form_field = FormField::Author;
                self.form_error = None;
                self.focus = Focus::Form;
            }
            KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Char('u') | KeyCode::Char('U') => {
                self.edit_selected_quote();
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
                if let Some(quote) = self.selected_quote() {
                    self.dialog = Dialog::DeleteConfirm(DeleteConfirmDialog::for_quote(quote));
                }
            }
            _ => {}
        }
    }

    fn handle_key_form(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                if self.vm.editing().is_some() {
                    self.vm.cancel_edit();
                }
                self.form_error = None;
                self.focus = Focus::Table;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.form_field = self.form_field.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form_field = self.form_field.prev();
            }
            KeyCode::Enter => {
                self.status = None;
                match self.vm.submit_form() {
                    Ok(()) => self.form_error = None,
                    Err(e) => self.form_error = Some(e.to_string()),
                }
            }
            KeyCode::Backspace => {
                self.vm.form.value_mut(self.form_field).pop();
                self.form_error = None;
            }
            KeyCode::Char(c) => {
                self.vm.form.value_mut(self.form_field).push(c);
                self.form_error = None;
            }
            _ => {}
        }
    }

    fn handle_key_delete_confirm(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if let Dialog::DeleteConfirm(ref dialog) = self.dialog {
                    let id = dialog.id.clone();
                    self.status = None;
                    self.vm.remove(id);
                }
                self.dialog = Dialog::None;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.dialog = Dialog::None;
            }
            _ => {}
        }
    }

    fn handle_key_error(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter | KeyCode::Esc => {
                self.dialog = Dialog::None;
            }
            _ => {}
        }
    }

    fn selected_quote(&self) -> Option<&crate::api::Quote> {
        self.table_state
            .selected()
            .and_then(|i| self.vm.quotes().get(i))
    }

    fn edit_selected_quote(&mut self) {
        let Some(quote) = self.selected_quote().cloned() else {
            return;
        };
        self.vm.edit(&quote);
        self.form_field = FormField::Author;
        self.form_error = None;
        self.focus = Focus::Form;
    }

    pub(super) fn select_next_quote(&mut self) {
        let len = self.vm.quotes().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub(super) fn select_previous_quote(&mut self) {
        let len = self.vm.quotes().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }
}
