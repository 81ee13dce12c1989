use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use http::{Request, Response, Result};
use hyper::service::Service;

use crate::disposition::DispositionOverrides;
use crate::resolve::resolve;
use crate::response_builder::ResponseBuilder;
use crate::store::{FsStore, ObjectStore};
use crate::util::Body;

/// High-level interface for serving store objects.
///
/// This struct serves objects from a single [`ObjectStore`]. The request
/// URL path, with its leading slash stripped, is used verbatim as the
/// object key, and the object (or the requested byte range of it) is
/// streamed back with the appropriate headers.
///
/// This struct allows direct access to its fields, but these fields are
/// typically initialized by the accessors, using the builder pattern. The
/// fields are basically a bunch of settings that determine the response
/// details.
///
/// This struct also implements the `hyper::service::Service` trait, which
/// simply wraps `Gateway::serve`.
pub struct Gateway<S = FsStore> {
    /// The store objects are served from.
    pub store: Arc<S>,
    /// MIME overrides consulted when picking the `Content-Disposition`.
    pub overrides: DispositionOverrides,
}

// Derived `Clone` would require `S: Clone`.
impl<S> Clone for Gateway<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            overrides: self.overrides.clone(),
        }
    }
}

impl<S: ObjectStore> Gateway<S> {
    /// Create a new instance of `Gateway` backed by the given store.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            overrides: DispositionOverrides::default(),
        }
    }

    /// Use the given MIME overrides when picking the `Content-Disposition`.
    pub fn overrides(&mut self, value: DispositionOverrides) -> &mut Self {
        self.overrides = value;
        self
    }

    /// Serve a request.
    pub async fn serve<B>(&self, request: Request<B>) -> Result<Response<Body<S::Stream>>> {
        let result = resolve(self.store.as_ref(), &request).await;
        ResponseBuilder::new()
            .overrides(self.overrides.clone())
            .build(result)
    }
}

impl Gateway<FsStore> {
    /// Create a new instance of `Gateway` serving a local directory.
    ///
    /// If `Path::new("")` is given, objects are served from the current
    /// directory.
    pub fn from_dir(root: impl Into<PathBuf>) -> Self {
        Self::new(FsStore::new(root))
    }
}

impl<S, B> Service<Request<B>> for Gateway<S>
where
    S: ObjectStore + Send + Sync + 'static,
    B: Send + Sync + 'static,
{
    type Response = Response<Body<S::Stream>>;
    type Error = http::Error;
    type Future = Pin<Box<dyn Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, request: Request<B>) -> Self::Future {
        let this = self.clone();
        Box::pin(async move { this.serve(request).await })
    }
}
