//! Debugger argument parsing: decimal (signed) or `#`-prefixed hex, masked
//! to 16 bits (spec.md §4.H).

use comet::Word;
use util::ParseError;

pub fn parse_word(text: &str) -> Result<Word, ParseError> {
    let err = || ParseError {
        value: text.to_string(),
        kind: "address/value",
    };

    if let Some(hex) = text.strip_prefix('#') {
        return u32::from_str_radix(hex, 16)
            .map(|v| v as Word)
            .map_err(|_| err());
    }

    text.parse::<i32>().map(|v| v as Word).map_err(|_| err())
}

pub fn parse_index(text: &str) -> Result<usize, ParseError> {
    text.parse::<usize>().map_err(|_| ParseError {
        value: text.to_string(),
        kind: "breakpoint index",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_and_hex() {
        assert_eq!(parse_word("42").unwrap(), 42);
        assert_eq!(parse_word("-1").unwrap(), 0xFFFF);
        assert_eq!(parse_word("#FF00").unwrap(), 0xFF00);
        assert_eq!(parse_word("#ff00").unwrap(), 0xFF00);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_word("hello").is_err());
        assert!(parse_word("#zz").is_err());
    }
}
