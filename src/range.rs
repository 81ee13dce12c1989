//! Parsing of the HTTP `Range` request header against a known object size.

/// An inclusive byte range within an object.
///
/// Invariant: `start <= end`, and both lie within the object the range was
/// validated against. Values are only constructed by [`parse_range`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte position, zero-based.
    pub start: u64,
    /// Last byte position, inclusive.
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered by the range.
    pub fn length(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Outcome of parsing a `Range` request header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeRequest {
    /// No range was requested; the full object should be served.
    None,
    /// A single satisfiable range, validated against the object size.
    Satisfiable(ByteRange),
    /// A range was requested but cannot be satisfied; the caller must
    /// respond with 416, not fall back to the full object.
    Unsatisfiable,
}

/// Parse a `Range` header value of the form `bytes=<start>-[<end>]`.
///
/// A missing header, or one without the `bytes=` prefix, means no range was
/// requested. A missing `<end>` selects everything from `<start>` to the end
/// of the object, and an `<end>` past the object is clamped to the last
/// byte. Multiple comma-separated ranges are rejected as unsatisfiable
/// rather than served partially.
pub fn parse_range(header: Option<&str>, total_length: u64) -> RangeRequest {
    let Some(header) = header else {
        return RangeRequest::None;
    };
    let Some(spec) = header.strip_prefix("bytes=") else {
        return RangeRequest::None;
    };

    if spec.contains(',') {
        return RangeRequest::Unsatisfiable;
    }

    let Some((start, end)) = spec.split_once('-') else {
        return RangeRequest::Unsatisfiable;
    };

    let Ok(start) = start.trim().parse::<u64>() else {
        return RangeRequest::Unsatisfiable;
    };
    if start >= total_length {
        return RangeRequest::Unsatisfiable;
    }

    let end = end.trim();
    let end = if end.is_empty() {
        total_length - 1
    } else {
        match end.parse::<u64>() {
            Ok(end) => end.min(total_length - 1),
            Err(_) => return RangeRequest::Unsatisfiable,
        }
    };

    if end < start {
        return RangeRequest::Unsatisfiable;
    }

    RangeRequest::Satisfiable(ByteRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_header_means_no_range() {
        assert_eq!(parse_range(None, 100), RangeRequest::None);
        assert_eq!(parse_range(Some(""), 100), RangeRequest::None);
    }

    #[test]
    fn other_units_are_ignored() {
        assert_eq!(parse_range(Some("items=0-5"), 100), RangeRequest::None);
    }

    #[test]
    fn bounded_range() {
        assert_eq!(
            parse_range(Some("bytes=100-199"), 1000),
            RangeRequest::Satisfiable(ByteRange { start: 100, end: 199 })
        );
    }

    #[test]
    fn open_ended_range_runs_to_last_byte() {
        assert_eq!(
            parse_range(Some("bytes=0-"), 1000),
            RangeRequest::Satisfiable(ByteRange { start: 0, end: 999 })
        );
    }

    #[test]
    fn end_past_object_is_clamped() {
        assert_eq!(
            parse_range(Some("bytes=0-999"), 10),
            RangeRequest::Satisfiable(ByteRange { start: 0, end: 9 })
        );
    }

    #[test]
    fn inverted_range_is_unsatisfiable() {
        assert_eq!(parse_range(Some("bytes=5-2"), 10), RangeRequest::Unsatisfiable);
    }

    #[test]
    fn start_at_object_length_is_unsatisfiable() {
        assert_eq!(parse_range(Some("bytes=10-"), 10), RangeRequest::Unsatisfiable);
        assert_eq!(parse_range(Some("bytes=2000-3000"), 1000), RangeRequest::Unsatisfiable);
    }

    #[test]
    fn garbage_offsets_are_unsatisfiable() {
        assert_eq!(parse_range(Some("bytes=a-b"), 10), RangeRequest::Unsatisfiable);
        assert_eq!(parse_range(Some("bytes=-"), 10), RangeRequest::Unsatisfiable);
        assert_eq!(parse_range(Some("bytes=-500"), 1000), RangeRequest::Unsatisfiable);
        assert_eq!(parse_range(Some("bytes=0"), 10), RangeRequest::Unsatisfiable);
    }

    #[test]
    fn multiple_ranges_are_rejected_whole() {
        assert_eq!(
            parse_range(Some("bytes=0-10,20-30"), 100),
            RangeRequest::Unsatisfiable
        );
    }

    #[test]
    fn empty_object_satisfies_nothing() {
        assert_eq!(parse_range(Some("bytes=0-"), 0), RangeRequest::Unsatisfiable);
    }

    #[test]
    fn single_byte_range() {
        let RangeRequest::Satisfiable(range) = parse_range(Some("bytes=9-9"), 10) else {
            panic!("expected a satisfiable range");
        };
        assert_eq!(range.length(), 1);
    }
}
