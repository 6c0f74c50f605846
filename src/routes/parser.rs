// Host routing table import (IPv4 entries only)

use super::ordering::to_ordinal;
use super::Route;
use crate::error::{AppError, AppResult};

pub fn get_system_routes() -> AppResult<Vec<Route>> {
    #[cfg(target_os = "linux")]
    return get_system_routes_linux();

    #[cfg(not(target_os = "linux"))]
    return Err(AppError::UnsupportedPlatform(std::env::consts::OS.to_string()));
}

#[cfg(target_os = "linux")]
fn get_system_routes_linux() -> AppResult<Vec<Route>> {
    use std::process::Command;

    // Try using `ip -json route show` first
    let output = Command::new("ip")
        .args(["-4", "-json", "route", "show"])
        .output()
        .map_err(|e| AppError::CommandExecution(format!("ip: {}", e)))?;

    if output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        return parse_ip_json(&stdout);
    }
    tracing::debug!("ip -json failed, falling back to plain output");

    let output = Command::new("ip")
        .args(["-4", "route", "show"])
        .output()
        .map_err(|e| AppError::CommandExecution(format!("ip: {}", e)))?;

    if !output.status.success() {
        return Err(AppError::RoutingTableParse(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_ip_route(&stdout))
}

/// Parse JSON output from `ip -json route show`
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub fn parse_ip_json(json_str: &str) -> AppResult<Vec<Route>> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(json_str)
        .map_err(|e| AppError::RoutingTableParse(format!("invalid JSON: {}", e)))?;

    let routes = entries
        .iter()
        .filter_map(|entry| {
            // unreachable, blackhole, prohibit and friends carry no next hop
            let route_type = entry.get("type").and_then(|v| v.as_str());
            if route_type.is_some_and(|t| t != "unicast") {
                tracing::debug!("Skipping {} route", route_type.unwrap_or_default());
                return None;
            }

            let destination = entry.get("dst").and_then(|v| v.as_str()).unwrap_or("default");
            let gateway = entry.get("gateway").and_then(|v| v.as_str());
            let interface = entry.get("dev").and_then(|v| v.as_str()).unwrap_or("unknown");
            to_route(destination, gateway, interface)
        })
        .collect();

    Ok(routes)
}

/// Parse non-JSON output from `ip route show`
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub fn parse_ip_route(output: &str) -> Vec<Route> {
    let mut routes = Vec::new();

    for line in output.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(destination) = parts.first().copied() else {
            continue;
        };

        let mut gateway = None;
        let mut interface = "unknown";

        let mut i = 1;
        while i < parts.len() {
            match (parts[i], parts.get(i + 1)) {
                ("via", Some(gw)) => {
                    gateway = Some(*gw);
                    i += 2;
                }
                ("dev", Some(iface)) => {
                    interface = *iface;
                    i += 2;
                }
                _ => i += 1,
            }
        }

        if let Some(route) = to_route(destination, gateway, interface) {
            routes.push(route);
        } else {
            tracing::debug!("Skipping non-IPv4 route: {}", line);
        }
    }

    routes
}

/// Build a table row from a kernel destination; `None` for non-IPv4 entries.
fn to_route(destination: &str, gateway: Option<&str>, interface: &str) -> Option<Route> {
    let (address, mask) = split_destination(destination)?;
    let gateway = match gateway {
        Some(gw) if to_ordinal(gw).is_some() => gw,
        Some(_) => return None,
        None => "0.0.0.0",
    };

    Some(Route::new(address, mask, gateway, interface))
}

fn split_destination(destination: &str) -> Option<(&str, String)> {
    if destination == "default" {
        return Some(("0.0.0.0", "/0".to_string()));
    }

    let (address, mask) = match destination.split_once('/') {
        Some((address, bits)) => {
            let bits: u8 = bits.parse().ok().filter(|b| *b <= 32)?;
            (address, format!("/{}", bits))
        }
        None => (destination, "/32".to_string()),
    };

    to_ordinal(address).map(|_| (address, mask))
}
