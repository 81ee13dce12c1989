use http::response::Builder as HttpResponseBuilder;
use http::{header, Response, Result, StatusCode};

use crate::disposition::{resolve_disposition, DispositionOverrides};
use crate::error_page::build_error_response;
use crate::resolve::{ResolveResult, ResolvedObject};
use crate::util::Body;

/// Utility to build the default response for a resolved request.
#[derive(Clone, Debug, Default)]
pub struct ResponseBuilder {
    /// MIME overrides consulted when picking the `Content-Disposition`.
    pub overrides: DispositionOverrides,
}

impl ResponseBuilder {
    /// Create a new response builder with a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given MIME overrides when picking the `Content-Disposition`.
    pub fn overrides(&mut self, value: DispositionOverrides) -> &mut Self {
        self.overrides = value;
        self
    }

    /// Build a response for the given `resolve` result.
    pub fn build<S>(&self, result: ResolveResult<S>) -> Result<Response<Body<S>>> {
        match result {
            ResolveResult::MethodNotMatched => {
                build_error_response(StatusCode::METHOD_NOT_ALLOWED, None)
            }
            ResolveResult::NotFound => build_error_response(StatusCode::NOT_FOUND, None),
            ResolveResult::UnsatisfiableRange => {
                build_error_response(StatusCode::RANGE_NOT_SATISFIABLE, None)
            }
            ResolveResult::Found(object) => self.build_object(object),
        }
    }

    fn build_object<S>(&self, object: ResolvedObject<S>) -> Result<Response<Body<S>>> {
        let ResolvedObject {
            stream,
            size,
            content_type,
            range,
        } = object;

        let mut res = HttpResponseBuilder::new().header(header::ACCEPT_RANGES, "bytes");

        // The disposition is decided on the content type as stored, before
        // any charset parameter is appended.
        let disposition = resolve_disposition(&content_type, &self.overrides);
        res = res.header(header::CONTENT_DISPOSITION, disposition.as_str());

        // `text/*` types without an explicit charset are served as UTF-8.
        let content_type = if content_type.starts_with("text/") && !content_type.contains("charset")
        {
            format!("{content_type}; charset=utf-8")
        } else {
            content_type
        };
        res = res.header(header::CONTENT_TYPE, content_type);

        res = match range {
            Some(range) => res
                .status(StatusCode::PARTIAL_CONTENT)
                .header(
                    header::CONTENT_RANGE,
                    format!("bytes {}-{}/{}", range.start, range.end, size),
                )
                .header(header::CONTENT_LENGTH, range.length()),
            None => res
                .status(StatusCode::OK)
                .header(header::CONTENT_LENGTH, size),
        };

        res.body(match stream {
            Some(stream) => Body::Stream(stream),
            None => Body::Empty,
        })
    }
}
