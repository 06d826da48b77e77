//! Responses for paths that do not refer to anything.

use std::str::FromStr;

use axum::http::Uri;

use crate::Error;

/// The fallback route handler, responds with a JSON 404 body.
pub async fn get_404_not_found(uri: Uri) -> Error {
    Error::NotFound(uri.path().to_owned())
}

/// Parse a path segment that must be an unsigned integer, e.g. an ID.
///
/// Signs, whitespace, and anything else that is not an ASCII digit are rejected.
///
/// # Errors
///
/// Returns an [Error::NotFound] for the path of `uri` if `segment` is not an
/// unsigned integer that fits in `T`.
pub(crate) fn parse_path_number<T: FromStr>(segment: &str, uri: &Uri) -> Result<T, Error> {
    check_path_number(segment, uri)?;

    segment
        .parse()
        .map_err(|_| Error::NotFound(uri.path().to_owned()))
}

/// Parse a path segment that must be an unsigned integer, clamping values
/// that do not fit in an `i64` to `i64::MAX`.
///
/// Used where the range of the number is checked afterwards, so that an
/// overlong number is reported as out of range rather than as a missing resource.
///
/// # Errors
///
/// Returns an [Error::NotFound] for the path of `uri` if `segment` is not an
/// unsigned integer.
pub(crate) fn parse_saturating_path_number(segment: &str, uri: &Uri) -> Result<i64, Error> {
    check_path_number(segment, uri)?;

    // Only overflow can fail once every byte is a digit.
    Ok(segment.parse().unwrap_or(i64::MAX))
}

fn check_path_number(segment: &str, uri: &Uri) -> Result<(), Error> {
    if segment.is_empty() || !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(Error::NotFound(uri.path().to_owned()));
    }

    Ok(())
}
