//! Request tokens for list-replacing requests

/// Identifies one issued list request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Hands out increasing tokens and remembers the latest one.
/// Only the response carrying the latest token may replace the list.
#[derive(Debug, Default)]
pub struct TokenIssuer {
    issued: u64,
}

impl TokenIssuer {
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }
}
