use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use common::storage::ObjectKey;
use tokio::io::AsyncReadExt;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

/// Upload keys embed a timestamp and are never rewritten in place.
const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

#[derive(Debug, PartialEq, Eq)]
enum RangeRequest {
    Full,
    Partial { start: u64, end: u64 },
    Unsatisfiable,
}

/// Interpret a `Range` header against an object of `size` bytes.
///
/// Only single `bytes=` ranges are honored; anything else is served in full.
fn parse_range(header: Option<&str>, size: u64) -> RangeRequest {
    let Some(ranges) = header.and_then(|h| h.trim().strip_prefix("bytes=")) else {
        return RangeRequest::Full;
    };
    if ranges.contains(',') {
        return RangeRequest::Full;
    }
    let Some((first, last)) = ranges.split_once('-') else {
        return RangeRequest::Full;
    };
    let (first, last) = (first.trim(), last.trim());

    let (start, end) = match (first.is_empty(), last.is_empty()) {
        // bytes=-N: the final N bytes.
        (true, false) => match last.parse::<u64>() {
            Ok(0) => return RangeRequest::Unsatisfiable,
            Ok(n) => (size.saturating_sub(n), size.saturating_sub(1)),
            Err(_) => return RangeRequest::Full,
        },
        // bytes=N-: from N to the end.
        (false, true) => match first.parse::<u64>() {
            Ok(start) => (start, size.saturating_sub(1)),
            Err(_) => return RangeRequest::Full,
        },
        (false, false) => match (first.parse::<u64>(), last.parse::<u64>()) {
            (Ok(start), Ok(end)) if start <= end => (start, end.min(size.saturating_sub(1))),
            (Ok(_), Ok(_)) => return RangeRequest::Unsatisfiable,
            _ => return RangeRequest::Full,
        },
        (true, true) => return RangeRequest::Full,
    };

    if size == 0 || start >= size {
        return RangeRequest::Unsatisfiable;
    }
    RangeRequest::Partial { start, end }
}

/// Serve an uploaded object. Supports single byte ranges so browsers can seek.
#[instrument(skip(state, headers))]
pub async fn serve_media(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let key =
        ObjectKey::parse(&raw_key).map_err(|_| AppError::NotFound("File not found".into()))?;

    let size = state.store.size(&key).await?;
    let content_type = mime_guess::from_path(key.as_str())
        .first_or_octet_stream()
        .to_string();

    let range = parse_range(
        headers.get(header::RANGE).and_then(|v| v.to_str().ok()),
        size,
    );

    let builder = Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::ACCEPT_RANGES, "bytes")
        .header(header::CACHE_CONTROL, CACHE_CONTROL);

    let response = match range {
        RangeRequest::Unsatisfiable => {
            return Ok((
                StatusCode::RANGE_NOT_SATISFIABLE,
                [(header::CONTENT_RANGE, format!("bytes */{size}"))],
            )
                .into_response());
        }
        RangeRequest::Full => {
            let reader = state.store.get_stream(&key).await?;
            builder
                .status(StatusCode::OK)
                .header(header::CONTENT_LENGTH, size.to_string())
                .body(Body::from_stream(ReaderStream::new(reader)))
        }
        RangeRequest::Partial { start, end } => {
            let mut reader = state.store.get_stream(&key).await?;
            tokio::io::copy(&mut (&mut reader).take(start), &mut tokio::io::sink())
                .await
                .map_err(|e| AppError::Storage(format!("Failed to seek object: {e}")))?;
            let len = end - start + 1;
            builder
                .status(StatusCode::PARTIAL_CONTENT)
                .header(header::CONTENT_LENGTH, len.to_string())
                .header(header::CONTENT_RANGE, format!("bytes {start}-{end}/{size}"))
                .body(Body::from_stream(ReaderStream::new(reader.take(len))))
        }
    };

    response.map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}
