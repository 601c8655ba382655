//! Innovate LC-1 wideband controller frames.
//!
//! An LC-1 response is a two byte MTS header followed by a four byte
//! payload:
//!
//! ```text
//! byte 0   1x11xx1x   header
//! byte 1   1xxxxxxx   header
//! byte 2   010xxx1x   type tag, function bits, air factor bit 7
//! byte 3   0xxxxxxx   air factor bits 0..6
//! byte 4   00xxxxxx   lambda bits 7..12
//! byte 5   0xxxxxxx   lambda bits 0..6
//! ```
//!
//! Bits of byte 2 select between a normal reading (`0100001x` or
//! `0100011x`) and a device error report (`0101101x`). Anything else that
//! still carries the LC-1 tag is treated as an overrun.

use serde::{Deserialize, Serialize};

use crate::bits::{match_ones, match_zeroes};
use crate::DataConvertor;

/// Highest AFR the sensor can physically report. Larger values are clamped.
pub const MAX_AFR: f64 = 20.33;

/// Number of bytes inspected in a frame.
pub const FRAME_LEN: usize = 6;

/// `010xxx1x` on byte 2.
pub const LC1_ONES: u8 = 66;
pub const LC1_ZEROES: u8 = 160;

/// `1x11xx1x 1xxxxxxx` on bytes 0 and 1.
pub const HEADER0_ONES: u8 = 178;
pub const HEADER1_ONES: u8 = 128;

/// `0101101x` on byte 2.
pub const ERROR_ONES: u8 = 90;
pub const ERROR_ZEROES: u8 = 164;

/// `0100001x` on byte 2.
pub const OK_ONES: u8 = 66;
pub const OK_ZEROES: u8 = 188;

/// `0100011x` on byte 2.
pub const OK_ALT_ONES: u8 = 70;
pub const OK_ALT_ZEROES: u8 = 184;

/// Why a frame was not recognised as an LC-1 response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    TooShort { len: usize },
    NotLc1 { tag: u8 },
    BadHeader { header: [u8; 2] },
}

/// Result of decoding one LC-1 frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Lc1Reading {
    /// Air/fuel ratio, already clamped to [`MAX_AFR`].
    Afr(f64),
    /// Lambda payload of a device error report. Always non-negative.
    Error(i32),
    /// Tagged as LC-1 but neither a reading nor an error report.
    Overrun,
    Unrecognized(Rejection),
}

impl Lc1Reading {
    /// Projects the reading onto the single float consumed by loggers:
    /// negative for device errors, `0.0` for unrecognized frames and
    /// [`MAX_AFR`] for overruns.
    pub fn to_legacy(&self) -> f64 {
        match *self {
            Lc1Reading::Afr(afr) => afr,
            Lc1Reading::Error(lambda) => f64::from(-lambda),
            Lc1Reading::Overrun => MAX_AFR,
            Lc1Reading::Unrecognized(_) => 0.0,
        }
    }

    /// An error report with a zero payload projects to `0.0`, the same
    /// value as an unrecognized frame.
    pub fn is_error_collision(&self) -> bool {
        matches!(self, Lc1Reading::Error(0))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Lc1Reading::Error(_))
    }
}

impl From<Lc1Reading> for f64 {
    fn from(reading: Lc1Reading) -> Self {
        reading.to_legacy()
    }
}

/// Convertor for LC-1 frames.
///
/// Stateless: one instance can be shared between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lc1Convertor;

impl Lc1Convertor {
    pub fn new() -> Self {
        Self
    }

    /// Classifies `bytes`, checking length, type tag and header before
    /// looking at the error and reading patterns. Only the first
    /// [`FRAME_LEN`] bytes are inspected.
    pub fn decode(&self, bytes: &[u8]) -> Lc1Reading {
        log::trace!("Converting LC-1 bytes: {}", hex::encode_upper(bytes));

        if let Err(rejection) = check_frame(bytes) {
            log::error!(
                "LC-1 unrecognized response ({rejection:?}): {}",
                hex::encode_upper(bytes)
            );
            return Lc1Reading::Unrecognized(rejection);
        }

        if is_error(bytes) {
            let error = lambda(bytes);
            log::warn!(
                "LC-1 error: {} --> {}",
                hex::encode_upper(bytes),
                -i32::from(error)
            );
            return Lc1Reading::Error(i32::from(error));
        }

        if is_ok(bytes) {
            let afr = afr(bytes);
            log::trace!("LC-1 AFR: {afr}");
            return Lc1Reading::Afr(afr.min(MAX_AFR));
        }

        // seen when the controller overruns its output
        log::trace!(
            "LC-1 response out of range (overrun?): {}",
            hex::encode_upper(bytes)
        );
        Lc1Reading::Overrun
    }

    /// Decodes `bytes` and returns the legacy float encoding.
    pub fn convert(&self, bytes: &[u8]) -> f64 {
        self.decode(bytes).to_legacy()
    }
}

impl DataConvertor for Lc1Convertor {
    fn convert(&self, bytes: &[u8]) -> f64 {
        Lc1Convertor::convert(self, bytes)
    }

    fn name(&self) -> &'static str {
        "LC-1"
    }
}

/// Decodes `bytes` with a default [`Lc1Convertor`].
pub fn decode(bytes: &[u8]) -> Lc1Reading {
    Lc1Convertor.decode(bytes)
}

fn check_frame(bytes: &[u8]) -> Result<(), Rejection> {
    if bytes.len() < FRAME_LEN {
        return Err(Rejection::TooShort { len: bytes.len() });
    }
    if !is_lc1(bytes[2]) {
        return Err(Rejection::NotLc1 { tag: bytes[2] });
    }
    if !is_header_valid(bytes[0], bytes[1]) {
        return Err(Rejection::BadHeader {
            header: [bytes[0], bytes[1]],
        });
    }
    Ok(())
}

fn is_lc1(tag: u8) -> bool {
    match_ones(tag, LC1_ONES) && match_zeroes(tag, LC1_ZEROES)
}

fn is_header_valid(b0: u8, b1: u8) -> bool {
    match_ones(b0, HEADER0_ONES) && match_ones(b1, HEADER1_ONES)
}

fn is_error(bytes: &[u8]) -> bool {
    match_ones(bytes[2], ERROR_ONES) && match_zeroes(bytes[2], ERROR_ZEROES)
}

fn is_ok(bytes: &[u8]) -> bool {
    (match_ones(bytes[2], OK_ONES) && match_zeroes(bytes[2], OK_ZEROES))
        || (match_ones(bytes[2], OK_ALT_ONES) && match_zeroes(bytes[2], OK_ALT_ZEROES))
}

/// `((b4 & 0x3F) << 7) | b5`.
///
/// # Panics
///
/// Panics if `bytes` is shorter than [`FRAME_LEN`].
pub fn lambda(bytes: &[u8]) -> u16 {
    (u16::from(bytes[4] & 0x3F) << 7) | u16::from(bytes[5])
}

/// `((b2 & 1) << 7) | b3`.
///
/// # Panics
///
/// Panics if `bytes` is shorter than [`FRAME_LEN`].
pub fn air_factor(bytes: &[u8]) -> u16 {
    (u16::from(bytes[2] & 1) << 7) | u16::from(bytes[3])
}

fn afr(bytes: &[u8]) -> f64 {
    let product = (u32::from(lambda(bytes)) + 500) * u32::from(air_factor(bytes));
    f64::from(product) / 10000.0
}
