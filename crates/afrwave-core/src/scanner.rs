use afrwave_decode::bits::match_ones;
use afrwave_decode::lc1::{FRAME_LEN, HEADER0_ONES, HEADER1_ONES};

/// Cuts header-aligned frame windows out of a raw byte stream.
///
/// Bytes are buffered across calls to [`FrameScanner::push`], so a frame
/// split over two reads is still returned once complete.
#[derive(Debug, Default)]
pub struct FrameScanner {
    pending: Vec<u8>,
    discarded: usize,
}

impl FrameScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `bytes` and returns every complete window found so far.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<Vec<u8>> {
        self.pending.extend_from_slice(bytes);

        let mut frames = Vec::new();
        loop {
            match find_header(&self.pending) {
                Some(pos) => {
                    self.discard(pos);
                    if self.pending.len() < FRAME_LEN {
                        break;
                    }
                    frames.push(self.pending.drain(..FRAME_LEN).collect());
                }
                None => {
                    // the last byte may be the first half of a header
                    let keep = match self.pending.last() {
                        Some(&b) if match_ones(b, HEADER0_ONES) => 1,
                        _ => 0,
                    };
                    self.discard(self.pending.len() - keep);
                    break;
                }
            }
        }
        frames
    }

    /// Bytes waiting for the rest of their frame.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Total bytes skipped while looking for a header.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    pub fn reset(&mut self) {
        self.pending.clear();
        self.discarded = 0;
    }

    fn discard(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        log::trace!(
            "skipping {count} byte(s) before header: {}",
            crate::format_hex(&self.pending[..count])
        );
        self.pending.drain(..count);
        self.discarded += count;
    }
}

fn find_header(bytes: &[u8]) -> Option<usize> {
    bytes
        .windows(2)
        .position(|w| match_ones(w[0], HEADER0_ONES) && match_ones(w[1], HEADER1_ONES))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: [u8; 6] = [0xB2, 0x82, 0x43, 0x13, 0x17, 0x2F];

    #[test]
    fn returns_back_to_back_frames() {
        let mut scanner = FrameScanner::new();
        let mut stream = SAMPLE.to_vec();
        stream.extend_from_slice(&SAMPLE);

        let frames = scanner.push(&stream);
        assert_eq!(frames, vec![SAMPLE.to_vec(), SAMPLE.to_vec()]);
        assert!(scanner.pending().is_empty());
        assert_eq!(scanner.discarded(), 0);
    }

    #[test]
    fn skips_noise_before_header() {
        let mut scanner = FrameScanner::new();
        let mut stream = vec![0x13, 0x17, 0x2F];
        stream.extend_from_slice(&SAMPLE);

        assert_eq!(scanner.push(&stream), vec![SAMPLE.to_vec()]);
        assert_eq!(scanner.discarded(), 3);
    }

    #[test]
    fn joins_frame_split_across_reads() {
        let mut scanner = FrameScanner::new();
        assert!(scanner.push(&SAMPLE[..1]).is_empty());
        assert_eq!(scanner.pending(), &SAMPLE[..1]);
        assert!(scanner.push(&SAMPLE[1..4]).is_empty());
        assert_eq!(scanner.push(&SAMPLE[4..]), vec![SAMPLE.to_vec()]);
    }

    #[test]
    fn drops_buffer_without_header() {
        let mut scanner = FrameScanner::new();
        assert!(scanner.push(&[0x01, 0x02, 0x03, 0x04]).is_empty());
        assert!(scanner.pending().is_empty());
        assert_eq!(scanner.discarded(), 4);

        scanner.reset();
        assert_eq!(scanner.discarded(), 0);
    }
}
