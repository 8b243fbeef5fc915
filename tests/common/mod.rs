use std::sync::{Arc, Mutex};
use std::time::Duration;

use quotedeck::api::{Quote, QuoteDraft, QuoteId, QuotesClient};
use quotedeck::viewmodel::ViewModel;
use tokio::runtime::Runtime;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// How long tests wait for requests to settle
pub const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Specification for a quote seeded into the fake service
pub struct QuoteSpec {
    pub author: &'static str,
    pub tags: Vec<&'static str>,
    pub text: &'static str,
}

impl QuoteSpec {
    /// Create a quote specification with no tags
    pub fn new(author: &'static str, text: &'static str) -> Self {
        Self {
            author,
            tags: Vec::new(),
            text,
        }
    }

    /// Set tags
    pub fn tags(mut self, tags: &[&'static str]) -> Self {
        self.tags = tags.to_vec();
        self
    }
}

#[derive(Default)]
struct Store {
    quotes: Vec<Quote>,
    next_id: u64,
}

impl Store {
    fn insert(&mut self, draft: QuoteDraft) -> QuoteId {
        self.next_id += 1;
        let id = QuoteId::new(format!("q{}", self.next_id));
        self.quotes.push(Quote {
            id: id.clone(),
            author: draft.author,
            tags: draft.tags,
            quote_text: draft.quote_text,
        });
        id
    }
}

/// In-memory quotes service behind a wiremock server.
///
/// Search matches authors case-insensitively by substring.
#[derive(Clone, Default)]
pub struct FakeQuoteService {
    store: Arc<Mutex<Store>>,
}

impl FakeQuoteService {
    pub fn with_quotes(specs: Vec<QuoteSpec>) -> Self {
        let service = Self::default();
        {
            let mut store = service.store.lock().unwrap();
            for spec in specs {
                store.insert(QuoteDraft {
                    author: spec.author.to_string(),
                    tags: spec.tags.iter().map(|t| t.to_string()).collect(),
                    quote_text: spec.text.to_string(),
                });
            }
        }
        service
    }

    /// Current server-side contents
    pub fn snapshot(&self) -> Vec<Quote> {
        self.store.lock().unwrap().quotes.clone()
    }

    fn handle(&self, request: &Request) -> ResponseTemplate {
        let segments: Vec<&str> = request
            .url
            .path_segments()
            .map(|s| s.collect())
            .unwrap_or_default();
        let mut store = self.store.lock().unwrap();

        match (request.method.as_str(), segments.as_slice()) {
            ("GET", ["quotes"]) => ResponseTemplate::new(200).set_body_json(&store.quotes),
            ("GET", ["quotes", "search"]) => {
                let term = request
                    .url
                    .query_pairs()
                    .find(|(k, _)| k == "author")
                    .map(|(_, v)| v.to_lowercase())
                    .unwrap_or_default();
                let matches: Vec<&Quote> = store
                    .quotes
                    .iter()
                    .filter(|q| q.author.to_lowercase().contains(&term))
                    .collect();
                ResponseTemplate::new(200).set_body_json(&matches)
            }
            ("POST", ["quotes"]) => match request.body_json::<Vec<QuoteDraft>>() {
                Ok(drafts) => {
                    for draft in drafts {
                        store.insert(draft);
                    }
                    ResponseTemplate::new(201)
                }
                Err(_) => ResponseTemplate::new(400),
            },
            ("PUT", ["quotes", id]) => {
                let Ok(draft) = request.body_json::<QuoteDraft>() else {
                    return ResponseTemplate::new(400);
                };
                match store.quotes.iter_mut().find(|q| q.id.as_str() == *id) {
                    Some(quote) => {
                        quote.author = draft.author;
                        quote.tags = draft.tags;
                        quote.quote_text = draft.quote_text;
                        ResponseTemplate::new(200)
                    }
                    None => ResponseTemplate::new(404),
                }
            }
            ("DELETE", ["quotes", id]) => {
                let before = store.quotes.len();
                store.quotes.retain(|q| q.id.as_str() != *id);
                if store.quotes.len() < before {
                    ResponseTemplate::new(204)
                } else {
                    ResponseTemplate::new(404)
                }
            }
            _ => ResponseTemplate::new(404),
        }
    }
}

impl Respond for FakeQuoteService {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.handle(request)
    }
}

/// Runtime plus mock server for one test
pub struct TestEnv {
    pub server: MockServer,
    pub rt: Runtime,
}

impl TestEnv {
    /// Start an empty mock server; mount mocks on `server` yourself
    pub fn start() -> Self {
        let rt = Runtime::new().expect("Failed to create runtime");
        let server = rt.block_on(MockServer::start());
        Self { server, rt }
    }

    /// Start a mock server backed by `service`
    pub fn with_service(service: &FakeQuoteService) -> Self {
        let env = Self::start();
        env.mount(Mock::given(any()).respond_with(service.clone()));
        env
    }

    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    pub fn collection_url(&self) -> String {
        format!("{}/quotes", self.server.uri())
    }

    pub fn view_model(&self) -> ViewModel {
        let client = QuotesClient::new(&self.collection_url(), Duration::from_secs(2))
            .expect("Failed to build client");
        ViewModel::new(client, self.rt.handle().clone())
    }

    /// Requests the server has seen, in arrival order
    #[allow(dead_code)]
    pub fn received(&self) -> Vec<Request> {
        self.rt
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }
}
