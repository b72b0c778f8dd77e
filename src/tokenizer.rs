use std::str::SplitWhitespace;

/// Whitespace token reader over an in-memory extrinsics text.
///
/// Callers ask for the start of a record with [`TokenReader::next_token`] and
/// treat `None` as a clean end of input. Inside a record they use
/// [`TokenReader::next_f64`], which reports an end of input as a mid-record
/// failure instead.
pub struct TokenReader<'a> {
    tokens: SplitWhitespace<'a>,
    consumed: usize,
}

/// Failure while reading a numeric token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenError {
    End,
    NotANumber(String),
}

impl<'a> TokenReader<'a> {
    pub fn new(text: &'a str) -> TokenReader<'a> {
        TokenReader {
            tokens: text.split_whitespace(),
            consumed: 0,
        }
    }

    pub fn next_token(&mut self) -> Option<&'a str> {
        let token = self.tokens.next()?;
        self.consumed += 1;
        Some(token)
    }

    pub fn next_f64(&mut self) -> Result<f64, TokenError> {
        let token = self.next_token().ok_or(TokenError::End)?;
        token
            .parse::<f64>()
            .map_err(|_| TokenError::NotANumber(token.to_string()))
    }

    /// Number of tokens handed out so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Counts the tokens not yet read, consuming them.
    pub fn drain(&mut self) -> usize {
        let rest = self.tokens.by_ref().count();
        self.consumed += rest;
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_is_distinct_from_bad_number() {
        let mut reader = TokenReader::new("  1.5\n\tabc ");
        assert_eq!(reader.next_f64(), Ok(1.5));
        assert_eq!(reader.next_f64(), Err(TokenError::NotANumber("abc".to_string())));
        assert_eq!(reader.next_f64(), Err(TokenError::End));
        assert_eq!(reader.next_token(), None);
        assert_eq!(reader.consumed(), 2);
    }
}
