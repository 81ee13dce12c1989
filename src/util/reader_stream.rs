use std::{
    cmp::min,
    io::{Error as IoError, SeekFrom},
    mem::MaybeUninit,
    pin::Pin,
    task::{Context, Poll},
};

use bytes::Bytes;
use futures_util::stream::Stream;
use tokio::{
    fs::File,
    io::{AsyncRead, AsyncSeek, ReadBuf},
};

use crate::range::ByteRange;

const BUF_SIZE: usize = 8 * 1024;

#[derive(PartialEq, Eq)]
enum SeekState {
    /// A seek to the given offset is required before the first read.
    Seek(u64),
    /// The seek was started but has not completed.
    Seeking,
    /// Positioned; reads may proceed.
    Reading,
}

/// Wraps an `AsyncRead + AsyncSeek`, like a tokio `File`, and implements a
/// stream of `Bytes` reading either the whole handle or a byte range of it.
///
/// This is what store backends hand to the response body: the transport
/// pulls chunks one at a time, so an object is never buffered whole.
pub struct ReaderStream<R = File> {
    reader: R,
    buf: Box<[MaybeUninit<u8>; BUF_SIZE]>,
    remaining: u64,
    seek_state: SeekState,
}

impl<R> ReaderStream<R> {
    /// Create a new stream over the full contents of the reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Box::new([MaybeUninit::uninit(); BUF_SIZE]),
            remaining: u64::MAX,
            seek_state: SeekState::Reading,
        }
    }

    /// Create a new stream over the given byte range of the reader.
    ///
    /// The reader is positioned at `range.start` before the first read, and
    /// the stream ends after `range.length()` bytes.
    pub fn with_range(reader: R, range: ByteRange) -> Self {
        Self {
            reader,
            buf: Box::new([MaybeUninit::uninit(); BUF_SIZE]),
            remaining: range.length(),
            seek_state: SeekState::Seek(range.start),
        }
    }
}

impl<R> Stream for ReaderStream<R>
where
    R: AsyncRead + AsyncSeek + Unpin,
{
    type Item = Result<Bytes, IoError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context) -> Poll<Option<Self::Item>> {
        let Self {
            ref mut reader,
            ref mut buf,
            ref mut remaining,
            ref mut seek_state,
        } = *self;

        if let SeekState::Seek(offset) = *seek_state {
            *seek_state = SeekState::Seeking;
            if let Err(e) = Pin::new(&mut *reader).start_seek(SeekFrom::Start(offset)) {
                return Poll::Ready(Some(Err(e)));
            }
        }
        if *seek_state == SeekState::Seeking {
            match Pin::new(&mut *reader).poll_complete(cx) {
                Poll::Ready(Ok(..)) => *seek_state = SeekState::Reading,
                Poll::Ready(Err(e)) => return Poll::Ready(Some(Err(e))),
                Poll::Pending => return Poll::Pending,
            }
        }

        let max_read_length = min(*remaining, buf.len() as u64) as usize;
        let mut read_buf = ReadBuf::uninit(&mut buf[..max_read_length]);
        match Pin::new(reader).poll_read(cx, &mut read_buf) {
            Poll::Ready(Ok(())) => {
                let filled = read_buf.filled();
                *remaining -= filled.len() as u64;
                if filled.is_empty() {
                    Poll::Ready(None)
                } else {
                    Poll::Ready(Some(Ok(Bytes::copy_from_slice(filled))))
                }
            }
            Poll::Ready(Err(e)) => Poll::Ready(Some(Err(e))),
            Poll::Pending => Poll::Pending,
        }
    }
}
