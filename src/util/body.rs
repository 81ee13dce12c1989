use std::{
    io::Error as IoError,
    pin::Pin,
    task::{ready, Context, Poll},
};

use bytes::Bytes;
use futures_util::stream::Stream;
use hyper::body::Frame;
use tokio::fs::File;

use crate::util::ReaderStream;

/// Hyper body implementation for the various kinds of gateway responses.
pub enum Body<S = ReaderStream<File>> {
    /// No response body, as for `HEAD` requests.
    Empty,
    /// A one-shot in-memory document, as for error pages.
    Page(Option<Bytes>),
    /// A byte stream produced by the object store.
    Stream(S),
}

impl<S> Body<S> {
    pub(crate) fn page(html: String) -> Self {
        Body::Page(Some(Bytes::from(html)))
    }
}

impl<S> hyper::body::Body for Body<S>
where
    S: Stream<Item = Result<Bytes, IoError>> + Unpin,
{
    type Data = Bytes;
    type Error = IoError;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Bytes>, IoError>>> {
        let opt = ready!(match *self {
            Body::Empty => return Poll::Ready(None),
            Body::Page(ref mut page) => {
                return Poll::Ready(page.take().map(|data| Ok(Frame::data(data))))
            }
            Body::Stream(ref mut stream) => Pin::new(stream).poll_next(cx),
        });
        Poll::Ready(opt.map(|res| res.map(Frame::data)))
    }
}
