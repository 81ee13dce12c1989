#![crate_name = "hyper_blobserve"]
#![deny(missing_docs)]

//! Blob store object serving for [Hyper 1.0](https://github.com/hyperium/hyper).
//!
//! This library exports a high-level interface `Gateway` for serving objects
//! out of a backing blob store, and lower-level interfaces for more control
//! over responses. It maps a request URL path to an object key, negotiates
//! `Range` requests against the object size, picks an inline-or-attachment
//! `Content-Disposition`, and streams the object (or a byte slice of it)
//! back to the client.
//!
//! ## Basic usage
//!
//! The `Gateway` type is essentially a struct containing a store and some
//! settings, and a `serve` method to handle the request. It follows the
//! builder pattern, and also implements the `hyper::Service` trait. It can
//! be used as:
//!
//! ```rust
//! use hyper_blobserve::{Gateway, MemoryStore};
//!
//! // Instance of `Gateway` containing the store and configuration.
//! let mut store = MemoryStore::new();
//! store.insert("foo/bar.txt", &b"hello world"[..]);
//! let gateway = Gateway::new(store);
//!
//! // A dummy request, but normally obtained from Hyper.
//! let request = http::Request::get("/foo/bar.txt")
//!     .body(())
//!     .unwrap();
//!
//! // Serve the request. Returns a future for an `http::Response`.
//! let response_future = gateway.serve(request);
//! # drop(response_future);
//! ```
//!
//! Typically, you'd store the `Gateway` instance somewhere, such as in your
//! own `hyper::Service` implementation.
//!
//! ## Advanced usage
//!
//! The `Gateway` type is a simple wrapper for `resolve` and
//! `ResponseBuilder`. You can achieve the same by doing something similar
//! to the following:
//!
//! ```rust
//! use hyper_blobserve::{resolve, MemoryStore, ResponseBuilder};
//!
//! #[tokio::main]
//! async fn main() {
//!     // The store to serve objects from.
//!     let mut store = MemoryStore::new();
//!     store.insert("foo/bar.txt", &b"hello world"[..]);
//!
//!     // A dummy request, but normally obtained from Hyper.
//!     let request = http::Request::get("/foo/bar.txt")
//!         .body(())
//!         .unwrap();
//!
//!     // First, resolve the request against the store. Returns a
//!     // `ResolveResult`.
//!     let result = resolve(&store, &request).await;
//!
//!     // Then, build a response based on the result.
//!     // The `ResponseBuilder` is typically a short-lived, per-request
//!     // instance.
//!     let response = ResponseBuilder::new()
//!         .build(result)
//!         .unwrap();
//! # drop(response);
//! }
//! ```
//!
//! The `resolve` function checks the request method, derives the object key
//! from the path, and queries the store, returning a `ResolveResult` enum
//! that determines what kind of response should be sent. The
//! `ResponseBuilder` is then used to create a default response. It holds
//! the disposition override settings, and can be constructed using the
//! builder pattern.
//!
//! It's useful to sit between these two steps to implement custom error
//! pages, for example. Your custom logic can override specific cases of
//! `ResolveResult`, and fall back to the default behavior using
//! `ResponseBuilder` if necessary.
//!
//! The store itself is abstracted behind the `ObjectStore` trait, with two
//! built-in implementations: `FsStore`, serving a local directory through
//! `tokio::fs`, and `MemoryStore`, an in-memory store useful in tests.
//! Implement the trait to serve objects out of your own backing store.
//!
//! Finally, there's `ReaderStream`, which the built-in stores use to stream
//! object bytes. This is a struct wrapping an `AsyncRead + AsyncSeek`
//! handle and implementing a `futures::Stream` that produces `Bytes`,
//! optionally limited to a byte range. It can be used for streaming in a
//! custom store implementation.

mod disposition;
mod error_page;
mod range;
mod resolve;
mod response_builder;
mod service;
mod store;
mod util;

pub use crate::disposition::*;
pub use crate::error_page::*;
pub use crate::range::*;
pub use crate::resolve::*;
pub use crate::response_builder::*;
pub use crate::service::*;
pub use crate::store::*;
pub use crate::util::{Body, ReaderStream};
