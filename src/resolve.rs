use http::{header, Method, Request};
use tracing::{debug, warn};

use crate::range::{parse_range, ByteRange, RangeRequest};
use crate::store::ObjectStore;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// The result of `resolve`.
///
/// Covers all the possible 'normal' scenarios encountered when mapping a
/// request onto the object store.
pub enum ResolveResult<S> {
    /// The request was not a `GET` or `HEAD` request.
    MethodNotMatched,
    /// The requested object does not exist, or the key was empty.
    NotFound,
    /// A `Range` header was present but cannot be satisfied.
    UnsatisfiableRange,
    /// The requested object was found.
    Found(ResolvedObject<S>),
}

/// An object ready to be served, with its negotiated byte range.
pub struct ResolvedObject<S> {
    /// Byte stream over the requested bytes. `None` for `HEAD` requests,
    /// which serve headers only.
    pub stream: Option<S>,
    /// Total object size in bytes.
    pub size: u64,
    /// Content type of the object.
    pub content_type: String,
    /// The satisfiable range that was requested, if any.
    pub range: Option<ByteRange>,
}

/// Resolve the request by looking the object up in the given store.
///
/// The URL path with its leading slash stripped is the object key, used
/// verbatim; the store sees exactly what the transport delivered. Store
/// failures are logged and treated as absent objects, so they surface to
/// the client as 404 rather than an opaque server error.
pub async fn resolve<S: ObjectStore, B>(store: &S, req: &Request<B>) -> ResolveResult<S::Stream> {
    // Handle only `GET`/`HEAD`.
    match *req.method() {
        Method::HEAD | Method::GET => {}
        _ => {
            return ResolveResult::MethodNotMatched;
        }
    }
    let is_head = *req.method() == Method::HEAD;

    let path = req.uri().path();
    let key = path.strip_prefix('/').unwrap_or(path);
    if key.is_empty() {
        return ResolveResult::NotFound;
    }

    let metadata = match store.head(key).await {
        Ok(Some(metadata)) => metadata,
        Ok(None) => {
            debug!(key, "object not found");
            return ResolveResult::NotFound;
        }
        Err(err) => {
            warn!(key, error = %err, "store head failed");
            return ResolveResult::NotFound;
        }
    };

    let range_header = req
        .headers()
        .get(header::RANGE)
        .and_then(|value| value.to_str().ok());
    let range = match parse_range(range_header, metadata.size) {
        RangeRequest::None => None,
        RangeRequest::Satisfiable(range) => Some(range),
        RangeRequest::Unsatisfiable => {
            debug!(key, "unsatisfiable range");
            return ResolveResult::UnsatisfiableRange;
        }
    };

    let stream = if is_head {
        None
    } else {
        match store.get(key, range).await {
            Ok(Some(stream)) => Some(stream),
            Ok(None) => {
                // The object can vanish between `head` and `get`.
                debug!(key, "object disappeared before read");
                return ResolveResult::NotFound;
            }
            Err(err) => {
                warn!(key, error = %err, "store get failed");
                return ResolveResult::NotFound;
            }
        }
    };

    ResolveResult::Found(ResolvedObject {
        stream,
        size: metadata.size,
        content_type: metadata
            .content_type
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_owned()),
        range,
    })
}
