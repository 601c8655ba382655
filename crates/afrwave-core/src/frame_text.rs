use crate::error::FrameTextError;

/// How a frame is written out as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameNotation {
    #[default]
    Auto,
    Hex,
    Binary,
}

impl std::str::FromStr for FrameNotation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "hex" => Self::Hex,
            "binary" | "bin" => Self::Binary,
            _ => Self::Auto,
        })
    }
}

impl FrameNotation {
    /// Parses `text` into raw bytes.
    ///
    /// Tokens are separated by whitespace or commas and may carry a `0x` or
    /// `0b` prefix. A hex token can hold several bytes (`B28243`); a binary
    /// token is always one octet.
    pub fn parse(&self, text: &str) -> Result<Vec<u8>, FrameTextError> {
        let tokens: Vec<&str> = text
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            return Err(FrameTextError::Empty);
        }

        match self.resolve(&tokens) {
            Self::Binary => tokens.iter().map(|t| parse_octet(t)).collect(),
            _ => {
                let mut bytes = Vec::with_capacity(tokens.len());
                for token in tokens {
                    bytes.extend(parse_hex(token)?);
                }
                Ok(bytes)
            }
        }
    }

    fn resolve(&self, tokens: &[&str]) -> Self {
        match self {
            Self::Auto if tokens.iter().all(|t| is_octet(t)) => Self::Binary,
            Self::Auto => Self::Hex,
            other => *other,
        }
    }
}

/// Renders bytes as `B2 82 43 ...`.
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_binary_prefix(token: &str) -> &str {
    token
        .strip_prefix("0b")
        .or_else(|| token.strip_prefix("0B"))
        .unwrap_or(token)
}

fn is_octet(token: &str) -> bool {
    let digits = strip_binary_prefix(token);
    digits.len() == 8 && digits.bytes().all(|b| b == b'0' || b == b'1')
}

fn parse_octet(token: &str) -> Result<u8, FrameTextError> {
    if !is_octet(token) {
        return Err(FrameTextError::InvalidBinary {
            token: token.to_string(),
        });
    }
    u8::from_str_radix(strip_binary_prefix(token), 2).map_err(|_| FrameTextError::InvalidBinary {
        token: token.to_string(),
    })
}

fn parse_hex(token: &str) -> Result<Vec<u8>, FrameTextError> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    hex::decode(digits).map_err(|e| match e {
        hex::FromHexError::OddLength => FrameTextError::OddHexLength {
            token: token.to_string(),
        },
        _ => FrameTextError::InvalidHex {
            token: token.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const SAMPLE: [u8; 6] = [0xB2, 0x82, 0x43, 0x13, 0x17, 0x2F];

    #[test]
    fn auto_detects_binary_octets() {
        let text = "10110010 10000010 01000011 00010011 00010111 00101111";
        assert_eq!(FrameNotation::Auto.parse(text).unwrap(), SAMPLE.to_vec());
    }

    #[test]
    fn auto_falls_back_to_hex() {
        assert_eq!(
            FrameNotation::Auto.parse("B2 82 43 13 17 2F").unwrap(),
            SAMPLE.to_vec()
        );
        assert_eq!(
            FrameNotation::Auto.parse("0xB2,0x82, 0x43 13172F").unwrap(),
            SAMPLE.to_vec()
        );
    }

    #[test]
    fn forced_hex_reads_eight_digit_tokens_as_four_bytes() {
        assert_eq!(
            FrameNotation::Hex.parse("10110010").unwrap(),
            vec![0x10, 0x11, 0x00, 0x10]
        );
    }

    #[test]
    fn binary_rejects_short_tokens() {
        assert_matches!(
            FrameNotation::Binary.parse("1011 10000010"),
            Err(FrameTextError::InvalidBinary { token }) if token == "1011"
        );
    }

    #[rstest]
    #[case("  , ", FrameTextError::Empty)]
    #[case("B2 8", FrameTextError::OddHexLength { token: "8".into() })]
    #[case("0xB2 0x8", FrameTextError::OddHexLength { token: "0x8".into() })]
    #[case("B2 ZZ", FrameTextError::InvalidHex { token: "ZZ".into() })]
    fn hex_errors(#[case] text: &str, #[case] expected: FrameTextError) {
        assert_eq!(FrameNotation::Hex.parse(text), Err(expected));
    }

    #[rstest]
    #[case("hex", FrameNotation::Hex)]
    #[case("HEX", FrameNotation::Hex)]
    #[case("binary", FrameNotation::Binary)]
    #[case("bin", FrameNotation::Binary)]
    #[case("auto", FrameNotation::Auto)]
    #[case("whatever", FrameNotation::Auto)]
    fn notation_from_str_is_lenient(#[case] name: &str, #[case] expected: FrameNotation) {
        assert_eq!(name.parse(), Ok(expected));
    }

    #[test]
    fn formats_hex_with_spaces() {
        assert_eq!(format_hex(&SAMPLE), "B2 82 43 13 17 2F");
        assert_eq!(format_hex(&[]), "");
    }
}
