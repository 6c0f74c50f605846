// Routes module - route records, ordering rules and the table sorter

pub mod loader;
pub mod ordering;
pub mod parser;
pub mod sorter;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One IPv4 routing table entry as shown in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub address: String, // network address, no mask
    pub mask: String,    // e.g. "/24"
    pub gateway: String,
    pub interface: String,
}

impl Route {
    pub fn new(
        address: impl Into<String>,
        mask: impl Into<String>,
        gateway: impl Into<String>,
        interface: impl Into<String>,
    ) -> Self {
        Route {
            id: Uuid::new_v4(),
            address: address.into(),
            mask: mask.into(),
            gateway: gateway.into(),
            interface: interface.into(),
        }
    }

    /// Destination column text: address and mask with no separator.
    pub fn destination(&self) -> String {
        format!("{}{}", self.address, self.mask)
    }
}

/// Snapshot of the table returned by the JSON API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub hostname: String,
    pub timestamp: String,
    pub sort: sorter::SortState,
    pub routes: Vec<Route>,
}

pub fn get_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}
