//! View-model: mirrors the remote quotes collection into UI state
//!
//! Requests run on a tokio runtime and report back over a channel. Nothing is
//! applied until [`ViewModel::poll`] (or [`ViewModel::settle`]) is called on the
//! owning thread, so the state never changes underneath a render.

pub mod form;
pub mod request;

pub use form::{split_tags, FormBuffer, FormError, FormField};
pub use request::{RequestToken, TokenIssuer};

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use tokio::runtime::Handle;

use crate::api::{ApiError, ApiResult, Quote, QuoteDraft, QuoteId, QuotesClient};

/// User-visible operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadAll,
    Search,
    Create,
    Update,
    Remove,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Self::LoadAll => "load quotes",
            Self::Search => "search",
            Self::Create => "add quote",
            Self::Update => "update quote",
            Self::Remove => "delete quote",
        }
    }
}

/// What the current list is showing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Listing {
    #[default]
    All,
    Search(String),
}

/// Something that changed while applying completions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    Refreshed { count: usize },
    Created,
    Updated { id: QuoteId },
    Removed { id: QuoteId },
    Failed { op: Operation, error: ApiError },
}

#[derive(Debug, Clone)]
enum Mutation {
    Create(QuoteDraft),
    Update(QuoteId, QuoteDraft),
    Remove(QuoteId),
}

impl Mutation {
    fn operation(&self) -> Operation {
        match self {
            Self::Create(_) => Operation::Create,
            Self::Update(..) => Operation::Update,
            Self::Remove(_) => Operation::Remove,
        }
    }
}

enum Completion {
    List {
        token: RequestToken,
        listing: Listing,
        result: ApiResult<Vec<Quote>>,
    },
    Mutation {
        mutation: Mutation,
        result: ApiResult<()>,
    },
}

/// UI state for the quotes screen plus the machinery that keeps it in step
/// with the remote collection
pub struct ViewModel {
    client: QuotesClient,
    runtime: Handle,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,

    quotes: Vec<Quote>,
    listing: Listing,
    pub form: FormBuffer,
    pub search_term: String,
    editing: Option<QuoteId>,

    tokens: TokenIssuer,
    in_flight: usize,
    last_error: Option<ApiError>,
    last_refreshed: Option<DateTime<Local>>,
}

impl ViewModel {
    /// Creates an empty view-model. Nothing is fetched until `load_all` is called.
    pub fn new(client: QuotesClient, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client,
            runtime,
            tx,
            rx,
            quotes: Vec::new(),
            listing: Listing::All,
            form: FormBuffer::default(),
            search_term: String::new(),
            editing: None,
            tokens: TokenIssuer::default(),
            in_flight: 0,
            last_error: None,
            last_refreshed: None,
        }
    }

    pub fn client(&self) -> &QuotesClient {
        &self.client
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Id of the quote the form is editing, if any
    pub fn editing(&self) -> Option<&QuoteId> {
        self.editing.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Local>> {
        self.last_refreshed
    }

    /// Fetch the whole collection
    pub fn load_all(&mut self) {
        self.spawn_list(Listing::All);
    }

    /// Ask the server for quotes by author. A blank term loads everything.
    pub fn search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        if self.search_term.trim().is_empty() {
            self.load_all();
        } else {
            self.spawn_list(Listing::Search(self.search_term.clone()));
        }
    }

    /// Search with the current search term
    pub fn submit_search(&mut self) {
        let term = self.search_term.clone();
        self.search(term);
    }

    pub fn clear_search(&mut self) {
        self.search_term.clear();
        self.load_all();
    }

    /// Submit the form as a new quote. The form is cleared once the server accepts it.
    pub fn create(&mut self) -> Result<(), FormError> {
        let draft = self.form.to_draft()?;
        self.spawn_mutation(Mutation::Create(draft));
        Ok(())
    }

    /// Submit the form as the new content of quote `id`
    pub fn update(&mut self, id: QuoteId) -> Result<(), FormError> {
        let draft = self.form.to_draft()?;
        self.spawn_mutation(Mutation::Update(id, draft));
        Ok(())
    }

    pub fn remove(&mut self, id: QuoteId) {
        self.spawn_mutation(Mutation::Remove(id));
    }

    /// Load `quote` into the form and make it the update target
    pub fn edit(&mut self, quote: &Quote) {
        self.form = FormBuffer::from_quote(quote);
        self.editing = Some(quote.id.clone());
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form.clear();
    }

    /// Create, or update the quote being edited
    pub fn submit_form(&mut self) -> Result<(), FormError> {
        match self.editing.clone() {
            Some(id) => self.update(id),
            None => self.create(),
        }
    }

    /// Apply every completion that has arrived, without blocking
    pub fn poll(&mut self) -> Vec<SyncEvent> {
        let mut events = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            if let Some(event) = self.apply(completion) {
                events.push(event);
            }
        }
        events
    }

    /// Block until nothing is in flight or `timeout` passes, applying
    /// completions (and the refreshes they trigger) as they arrive
    pub fn settle(&mut self, timeout: Duration) -> Vec<SyncEvent> {
        // No deadline when `timeout` reaches past what Instant can represent
        let deadline = Instant::now().checked_add(timeout);
        let mut events = Vec::new();

        while self.in_flight > 0 {
            let received = match deadline {
                Some(deadline) => self
                    .rx
                    .recv_timeout(deadline.saturating_duration_since(Instant::now())),
                None => self.rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };
            match received {
                Ok(completion) => {
                    if let Some(event) = self.apply(completion) {
                        events.push(event);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    warn!(
                        "Gave up waiting after {:?} with {} request(s) in flight",
                        timeout, self.in_flight
                    );
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        events
    }

    #[cfg(test)]
    pub(crate) fn set_quotes_for_test(&mut self, quotes: Vec<Quote>) {
        self.quotes = quotes;
    }

    #[cfg(test)]
    pub(crate) fn set_last_error_for_test(&mut self, error: ApiError) {
        self.last_error = Some(error);
    }

    fn spawn_list(&mut self, listing: Listing) {
        let token = self.tokens.issue();
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.in_flight += 1;
        debug!("Issuing list request {:?} for {:?}", token, listing);

        self.runtime.spawn(async move {
            let result = match &listing {
                Listing::All => client.list().await,
                Listing::Search(term) => client.search(term).await,
            };
            if tx
                .send(Completion::List {
                    token,
                    listing,
                    result,
                })
                .is_err()
            {
                warn!("Dropped list response {:?}: receiver gone", token);
            }
        });
    }

    fn spawn_mutation(&mut self, mutation: Mutation) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.in_flight += 1;
        info!("Issuing {}", mutation.operation().label());

        self.runtime.spawn(async move {
            let result = match &mutation {
                Mutation::Create(draft) => client.create(draft).await,
                Mutation::Update(id, draft) => client.update(id, draft).await,
                Mutation::Remove(id) => client.delete(id).await,
            };
            if tx.send(Completion::Mutation { mutation, result }).is_err() {
                warn!("Dropped mutation response: receiver gone");
            }
        });
    }

    fn apply(&mut self, completion: Completion) -> Option<SyncEvent> {
        self.in_flight = self.in_flight.saturating_sub(1);

        match completion {
            Completion::List {
                token,
                listing,
                result,
            } => {
                let op = match listing {
                    Listing::All => Operation::LoadAll,
                    Listing::Search(_) => Operation::Search,
                };
                if !self.tokens.is_current(token) {
                    debug!("Discarding superseded list response {:?}", token);
                    return None;
                }
                match result {
                    Ok(quotes) => {
                        let count = quotes.len();
                        self.quotes = quotes;
                        self.listing = listing;
                        self.last_refreshed = Some(Local::now());
                        self.last_error = None;
                        info!("Loaded {} quote(s)", count);
                        Some(SyncEvent::Refreshed { count })
                    }
                    Err(error) => Some(self.fail(op, error)),
                }
            }
            Completion::Mutation { mutation, result } => {
                let op = mutation.operation();
                if let Err(error) = result {
                    return Some(self.fail(op, error));
                }

                self.last_error = None;
                let event = match mutation {
                    Mutation::Create(draft) => {
                        // Leave the form alone if the user has moved on to
                        // editing a row or typing another quote
                        if self.editing.is_none() && self.form.to_draft().as_ref() == Ok(&draft) {
                            self.form.clear();
                        }
                        SyncEvent::Created
                    }
                    Mutation::Update(id, _) => SyncEvent::Updated { id },
                    Mutation::Remove(id) => {
                        if self.editing.as_ref() == Some(&id) {
                            self.editing = None;
                        }
                        SyncEvent::Removed { id }
                    }
                };
                self.load_all();
                Some(event)
            }
        }
    }

    fn fail(&mut self, op: Operation, error: ApiError) -> SyncEvent {
        warn!("Failed to {}: {}", op.label(), error);
        self.last_error = Some(error.clone());
        SyncEvent::Failed { op, error }
    }
}
