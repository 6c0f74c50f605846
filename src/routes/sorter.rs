// Route sorter - sort state reducer and column ordering

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::ordering::{compare, compare_interfaces, strip_mask};
use super::Route;
use crate::error::AppError;

/// Sortable table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Address,
    Gateway,
    Interface,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Address, SortKey::Gateway, SortKey::Interface];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Address => "address",
            SortKey::Gateway => "gateway",
            SortKey::Interface => "interface",
        }
    }

    /// Compare two routes on this column, ascending.
    pub fn compare(&self, a: &Route, b: &Route) -> Ordering {
        match self {
            SortKey::Address => compare(
                strip_mask(&a.destination()),
                strip_mask(&b.destination()),
            ),
            SortKey::Gateway => compare(&a.gateway, &b.gateway),
            SortKey::Interface => compare_interfaces(&a.interface, &b.interface),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "address" => Ok(SortKey::Address),
            "gateway" => Ok(SortKey::Gateway),
            "interface" => Ok(SortKey::Interface),
            other => Err(AppError::InvalidSortKey(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Active column and direction. `key == None` means no sort applied yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortEvent {
    /// Header click on a column
    Request(SortKey),
}

impl SortState {
    /// Next state after `event`: the same column flips direction, another
    /// column starts ascending.
    pub fn reduce(self, event: SortEvent) -> SortState {
        match event {
            SortEvent::Request(key) if self.key == Some(key) => SortState {
                key: Some(key),
                direction: self.direction.flipped(),
            },
            SortEvent::Request(key) => SortState {
                key: Some(key),
                direction: SortDirection::Ascending,
            },
        }
    }
}

/// Sort `routes` for a click on `key` given the previous state.
///
/// Returns a new vector holding the same routes and the updated state. The
/// sort is stable, so ties keep their input order in both directions.
pub fn sort_routes(routes: &[Route], key: SortKey, previous: SortState) -> (Vec<Route>, SortState) {
    let state = previous.reduce(SortEvent::Request(key));

    let mut sorted = routes.to_vec();
    sorted.sort_by(|a, b| state.direction.apply(key.compare(a, b)));

    (sorted, state)
}

/// The displayed routes together with the sort state that produced them.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    state: SortState,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        RouteTable {
            routes,
            state: SortState::default(),
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn state(&self) -> SortState {
        self.state
    }

    /// Re-sort the current display order for a click on `key`.
    pub fn apply(&mut self, key: SortKey) -> SortState {
        let (routes, state) = sort_routes(&self.routes, key, self.state);
        self.routes = routes;
        self.state = state;
        state
    }
}
