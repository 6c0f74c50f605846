// Static route data loader with load-time validation

use serde::Deserialize;
use std::path::Path;
use uuid::Uuid;

use super::ordering::to_ordinal;
use super::Route;
use crate::error::{AppError, AppResult};

/// Route entry as stored in the data file. `id` may be omitted.
#[derive(Debug, Deserialize)]
struct RouteRecord {
    #[serde(default)]
    id: Option<Uuid>,
    address: String,
    mask: String,
    gateway: String,
    interface: String,
}

pub fn load_routes(path: &Path) -> AppResult<Vec<Route>> {
    tracing::debug!("Reading routes from {}", path.display());
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::RouteData(format!("{}: {}", path.display(), e)))?;
    parse_routes(&content)
}

/// Parse a JSON array of routes and reject malformed entries.
pub fn parse_routes(json_str: &str) -> AppResult<Vec<Route>> {
    let records: Vec<RouteRecord> = serde_json::from_str(json_str)?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            validate_ipv4(index, "address", &record.address)?;
            validate_mask(index, &record.mask)?;
            validate_ipv4(index, "gateway", &record.gateway)?;

            Ok(Route {
                id: record.id.unwrap_or_else(Uuid::new_v4),
                address: record.address,
                mask: record.mask,
                gateway: record.gateway,
                interface: record.interface,
            })
        })
        .collect()
}

fn validate_ipv4(index: usize, field: &'static str, value: &str) -> AppResult<()> {
    match to_ordinal(value) {
        Some(_) => Ok(()),
        None => Err(AppError::InvalidRoute {
            index,
            field,
            value: value.to_string(),
            reason: "not a dotted-decimal IPv4 address",
        }),
    }
}

fn validate_mask(index: usize, mask: &str) -> AppResult<()> {
    let prefix_len = mask
        .strip_prefix('/')
        .filter(|bits| !bits.is_empty() && bits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|bits| bits.parse::<u8>().ok());

    match prefix_len {
        Some(len) if len <= 32 => Ok(()),
        _ => Err(AppError::InvalidRoute {
            index,
            field: "mask",
            value: mask.to_string(),
            reason: "expected /0 to /32",
        }),
    }
}
