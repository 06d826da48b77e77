//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/transactions/{id}', use [format_endpoint].

/// The route for creating and listing transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for getting or deleting a single transaction.
pub const TRANSACTION: &str = "/transactions/{id}";
/// The route for the income and expense summary of a month.
pub const SUMMARY: &str = "/summary/{month}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// Endpoints with more than one parameter are not supported.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    match (endpoint_path.find('{'), endpoint_path.find('}')) {
        (Some(start), Some(end)) if start < end => format!(
            "{}{id}{}",
            &endpoint_path[..start],
            &endpoint_path[end + 1..]
        ),
        _ => endpoint_path.to_owned(),
    }
}
