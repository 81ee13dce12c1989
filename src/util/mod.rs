mod body;
mod reader_stream;

pub use self::body::*;
pub use self::reader_stream::*;
