use thiserror::Error;

/// Envelope codec error types.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Input ended before all fixed-width fields were read.
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// IO error from the underlying reader/writer.
    #[error(transparent)]
    Io(std::io::Error),
}

impl From<std::io::Error> for CodecError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEnd
        } else {
            Self::Io(e)
        }
    }
}
