//! Endpoint groups.

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;

/// A namespace of endpoints sharing a route segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group identifier, also its route segment.
    pub name: String,
    /// Trailing `#` comment, trimmed.
    pub comment: String,
    /// Endpoints in declaration order.
    pub endpoints: Vec<Endpoint>,
    /// 1-based source line, `0` when built by hand.
    pub line: usize,
}

impl Group {
    /// Creates an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: String::new(),
            endpoints: Vec::new(),
            line: 0,
        }
    }

    /// Looks up an endpoint by its dotted name.
    pub fn endpoint(&self, name: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|ep| ep.name == name)
    }
}
