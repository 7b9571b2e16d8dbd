//! Strict JSON lexer
//!
//! Tokenizes one JSON text per RFC 8259. No comments, no trailing garbage
//! tolerance; leniency belongs to callers, not the lexer.

use crate::error::{Error, ErrorKind, Result, Span};
use crate::lexer::cursor::Cursor;
use crate::lexer::token::{Token, TokenKind};

/// JSON lexer producing tokens with source spans
#[derive(Clone, Debug)]
pub struct JsonLexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> JsonLexer<'a> {
    /// Create a new JSON lexer from input bytes
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Token> {
        self.cursor.skip_whitespace();

        let start = self.cursor.position();

        let kind = match self.cursor.current() {
            None => TokenKind::Eof,
            Some(b) => match b {
                b'{' => {
                    self.cursor.advance();
                    TokenKind::LeftBrace
                }
                b'}' => {
                    self.cursor.advance();
                    TokenKind::RightBrace
                }
                b'[' => {
                    self.cursor.advance();
                    TokenKind::LeftBracket
                }
                b']' => {
                    self.cursor.advance();
                    TokenKind::RightBracket
                }
                b':' => {
                    self.cursor.advance();
                    TokenKind::Colon
                }
                b',' => {
                    self.cursor.advance();
                    TokenKind::Comma
                }
                b'"' => self.lex_string()?,
                b'n' => self.lex_keyword(b"null", TokenKind::Null)?,
                b't' => self.lex_keyword(b"true", TokenKind::True)?,
                b'f' => self.lex_keyword(b"false", TokenKind::False)?,
                b'-' | b'0'..=b'9' => self.lex_number()?,
                _ => return Err(self.error_here(ErrorKind::InvalidToken)),
            },
        };

        let end = self.cursor.position();
        Ok(Token::new(kind, Span::new(start, end)))
    }

    fn error_here(&self, kind: ErrorKind) -> Error {
        let pos = self.cursor.position();
        Error::at(kind, pos.offset, pos.line, pos.col)
    }

    /// Lex a string literal
    fn lex_string(&mut self) -> Result<TokenKind> {
        // Consume opening quote
        self.cursor.advance();

        let mut result = String::new();

        loop {
            match self.cursor.current() {
                None => return Err(self.error_here(ErrorKind::UnterminatedString)),
                Some(b'"') => {
                    self.cursor.advance();
                    break;
                }
                Some(b'\\') => {
                    self.cursor.advance();
                    let Some(escape) = self.cursor.current() else {
                        return Err(self.error_here(ErrorKind::InvalidEscapeSequence));
                    };
                    match escape {
                        b'"' => result.push('"'),
                        b'\\' => result.push('\\'),
                        b'/' => result.push('/'),
                        b'b' => result.push('\x08'),
                        b'f' => result.push('\x0C'),
                        b'n' => result.push('\n'),
                        b'r' => result.push('\r'),
                        b't' => result.push('\t'),
                        b'u' => {
                            self.cursor.advance();
                            let decoded = self.lex_unicode_escape()?;
                            result.push(decoded);
                            continue;
                        }
                        _ => return Err(self.error_here(ErrorKind::InvalidEscapeSequence)),
                    }
                    self.cursor.advance();
                }
                // Unescaped control characters are not legal in JSON strings
                Some(b) if b < 0x20 => {
                    return Err(self.error_here(ErrorKind::InvalidToken));
                }
                Some(b) if b < 0x80 => {
                    result.push(char::from(b));
                    self.cursor.advance();
                }
                Some(_) => self.push_utf8_sequence(&mut result)?,
            }
        }

        Ok(TokenKind::String(result))
    }

    /// Copy one multi-byte UTF-8 sequence through unchanged
    fn push_utf8_sequence(&mut self, result: &mut String) -> Result<()> {
        let len = match self.cursor.current() {
            Some(b) if b & 0b1110_0000 == 0b1100_0000 => 2,
            Some(b) if b & 0b1111_0000 == 0b1110_0000 => 3,
            Some(b) if b & 0b1111_1000 == 0b1111_0000 => 4,
            _ => return Err(self.error_here(ErrorKind::InvalidToken)),
        };

        let bytes = self
            .cursor
            .peek_bytes(len)
            .ok_or_else(|| self.error_here(ErrorKind::UnterminatedString))?;
        let seq =
            std::str::from_utf8(bytes).map_err(|_| self.error_here(ErrorKind::InvalidToken))?;

        result.push_str(seq);
        self.cursor.advance_by(len);
        Ok(())
    }

    /// Lex a unicode escape, combining surrogate pairs
    fn lex_unicode_escape(&mut self) -> Result<char> {
        let start_pos = self.cursor.position();
        let unicode_error = || {
            Error::at(
                ErrorKind::InvalidUnicodeEscape,
                start_pos.offset,
                start_pos.line,
                start_pos.col,
            )
        };

        let code = self.lex_hex4()?;

        // High surrogates must be followed by a \uXXXX low surrogate;
        // the pair combines into one supplementary-plane character.
        if (0xD800..=0xDBFF).contains(&code) {
            if self.cursor.peek_bytes(2) != Some(b"\\u") {
                return Err(unicode_error());
            }
            self.cursor.advance_by(2);
            let low = self.lex_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(unicode_error());
            }
            let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(combined).ok_or_else(unicode_error);
        }

        char::from_u32(code).ok_or_else(unicode_error)
    }

    /// Lex four hex digits
    fn lex_hex4(&mut self) -> Result<u32> {
        let mut code: u32 = 0;

        for _ in 0..4 {
            let digit = match self.cursor.current() {
                Some(b @ b'0'..=b'9') => u32::from(b - b'0'),
                Some(b @ b'a'..=b'f') => u32::from(b - b'a') + 10,
                Some(b @ b'A'..=b'F') => u32::from(b - b'A') + 10,
                _ => return Err(self.error_here(ErrorKind::InvalidUnicodeEscape)),
            };
            code = code * 16 + digit;
            self.cursor.advance();
        }

        Ok(code)
    }

    /// Lex a keyword literal (null, true, false)
    fn lex_keyword(&mut self, keyword: &[u8], kind: TokenKind) -> Result<TokenKind> {
        if self.cursor.peek_bytes(keyword.len()) == Some(keyword) {
            self.cursor.advance_by(keyword.len());
            Ok(kind)
        } else {
            Err(self.error_here(ErrorKind::InvalidToken))
        }
    }

    /// Lex a number literal
    fn lex_number(&mut self) -> Result<TokenKind> {
        let start = self.cursor.pos();

        // Optional minus sign
        if self.cursor.current() == Some(b'-') {
            self.cursor.advance();
        }

        // Integer part: a lone zero or a nonzero-led digit run
        match self.cursor.current() {
            Some(b'0') => {
                self.cursor.advance();
            }
            Some(b'1'..=b'9') => {
                self.cursor.advance();
                while let Some(b'0'..=b'9') = self.cursor.current() {
                    self.cursor.advance();
                }
            }
            _ => return Err(self.error_here(ErrorKind::InvalidNumber)),
        }

        // Optional fraction part
        if self.cursor.current() == Some(b'.') {
            self.cursor.advance();
            if !matches!(self.cursor.current(), Some(b'0'..=b'9')) {
                return Err(self.error_here(ErrorKind::InvalidNumber));
            }
            while let Some(b'0'..=b'9') = self.cursor.current() {
                self.cursor.advance();
            }
        }

        // Optional exponent part
        if matches!(self.cursor.current(), Some(b'e' | b'E')) {
            self.cursor.advance();
            if matches!(self.cursor.current(), Some(b'+' | b'-')) {
                self.cursor.advance();
            }
            if !matches!(self.cursor.current(), Some(b'0'..=b'9')) {
                return Err(self.error_here(ErrorKind::InvalidNumber));
            }
            while let Some(b'0'..=b'9') = self.cursor.current() {
                self.cursor.advance();
            }
        }

        let num_str = std::str::from_utf8(self.cursor.slice_from(start))
            .map_err(|_| self.error_here(ErrorKind::InvalidNumber))?;
        let num = num_str
            .parse::<f64>()
            .map_err(|_| self.error_here(ErrorKind::InvalidNumber))?;

        Ok(TokenKind::Number(num))
    }
}

impl<'a> Iterator for JsonLexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) => {
                if token.kind == TokenKind::Eof {
                    None
                } else {
                    Some(Ok(token))
                }
            }
            Err(e) => Some(Err(e)),
        }
    }
}
