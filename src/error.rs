// Error types for the route table sorter

use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid route #{index}: {field} {value:?} ({reason})")]
    InvalidRoute {
        index: usize,
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Failed to load route data: {0}")]
    RouteData(String),

    #[error("Failed to parse routing table: {0}")]
    RoutingTableParse(String),

    #[error("Failed to execute command: {0}")]
    CommandExecution(String),

    #[error("Unsupported platform: {0}")]
    #[cfg_attr(target_os = "linux", allow(dead_code))]
    UnsupportedPlatform(String),

    #[error("Unknown sort key: {0}")]
    InvalidSortKey(String),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Convert error to user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidRoute { index, field, .. } => {
                format!("Route #{} has an invalid {}. Fix the route data file.", index, field)
            }
            AppError::RouteData(_) => {
                "Failed to read route data. Check the routes file path and format.".to_string()
            }
            AppError::RoutingTableParse(_) => {
                "Failed to read routing table. Please ensure you have proper permissions.".to_string()
            }
            AppError::CommandExecution(cmd) => {
                format!("Failed to execute command. Make sure {} is installed.", cmd)
            }
            AppError::UnsupportedPlatform(_) => {
                "Reading the system routing table is only supported on Linux. Use a routes file instead.".to_string()
            }
            AppError::InvalidSortKey(key) => {
                format!("Cannot sort by '{}'. Use address, gateway or interface.", key)
            }
            AppError::Serialization(_) => {
                "Data format error. The routes file is not valid JSON.".to_string()
            }
        }
    }

    /// Machine-readable code used in API error responses
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidRoute { .. } => "InvalidRoute",
            AppError::RouteData(_) => "RouteData",
            AppError::RoutingTableParse(_) => "RoutingTableParse",
            AppError::CommandExecution(_) => "CommandExecution",
            AppError::UnsupportedPlatform(_) => "UnsupportedPlatform",
            AppError::InvalidSortKey(_) => "InvalidSortKey",
            AppError::Serialization(_) => "Serialization",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_route_display() {
        let err = AppError::InvalidRoute {
            index: 3,
            field: "gateway",
            value: "10.0.0".to_string(),
            reason: "not a dotted-decimal IPv4 address",
        };
        assert_eq!(
            err.to_string(),
            "Invalid route #3: gateway \"10.0.0\" (not a dotted-decimal IPv4 address)"
        );
        assert!(err.user_message().contains("gateway"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::InvalidSortKey("x".to_string()).code(), "InvalidSortKey");
        assert_eq!(
            AppError::UnsupportedPlatform("windows".to_string()).code(),
            "UnsupportedPlatform"
        );
    }
}
