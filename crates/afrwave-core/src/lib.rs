//! Caller-side helpers around the frame decoders: text notation for
//! frames and a scanner for raw captures.

pub mod error;
pub mod frame_text;
pub mod scanner;

pub use error::FrameTextError;
pub use frame_text::{format_hex, FrameNotation};
pub use scanner::FrameScanner;
