//! Remote quotes resource: client, schemas, errors

pub mod client;
pub mod error;
pub mod model;

pub use client::QuotesClient;
pub use error::{ApiError, ApiResult};
pub use model::{Quote, QuoteDraft, QuoteId};
