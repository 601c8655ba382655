use thiserror::Error;

/// Errors returned when parsing a frame written as text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameTextError {
    #[error("frame text is empty")]
    Empty,
    #[error("`{token}` is not a hexadecimal byte string")]
    InvalidHex { token: String },
    #[error("hex token `{token}` has an odd number of digits")]
    OddHexLength { token: String },
    #[error("`{token}` is not an 8-digit binary octet")]
    InvalidBinary { token: String },
}
