//! Decoders for frames emitted by Innovate wideband AFR controllers.

pub mod bits;
pub mod lc1;

pub use lc1::{Lc1Convertor, Lc1Reading, Rejection, FRAME_LEN, MAX_AFR};

/// Converts one raw device frame into the float consumed by loggers.
///
/// Implementations never fail: malformed input maps to a sentinel value
/// chosen by the device protocol.
pub trait DataConvertor: Send + Sync {
    fn convert(&self, bytes: &[u8]) -> f64;

    /// Short device name, e.g. `"LC-1"`.
    fn name(&self) -> &'static str;
}
