//! Token scanner for assembly display names.
//!
//! Display names are a comma-delimited `key=value` format with its own quoting and
//! escaping rules. The scanner produces one token at a time - the simple name, a
//! property key, or a property value - leaving the delimiter (`,` or `=`) for the
//! parser to consume, so that the grammar lives in one place
//! ([`parser`](crate::display::parser)) and the character-level rules live here.
//!
//! # Scanning Rules
//!
//! - ASCII whitespace (space, tab, CR, LF) is skipped before a token and trimmed from
//!   the end of an unquoted token. Unicode whitespace and format characters are
//!   ordinary content.
//! - A token may be wrapped in one matching pair of unescaped `'` or `"` quotes;
//!   quoted content is preserved verbatim, including the other quote kind, commas,
//!   equals signs, and boundary whitespace. Only whitespace may follow the closing
//!   quote before the next delimiter.
//! - A quote character in the middle of an unquoted token is an error.
//! - Backslash escapes are processed inside and outside quotes:
//!   `\,` `\=` `\'` `\"` `\\` `\/` yield the literal character, `\t` `\r` `\n` yield
//!   the control character, and `\uXXXX;` (4-6 hex digits, then a semicolon) yields
//!   the code point. Escaped whitespace is never trimmed.

use crate::Result;

/// Maximum number of hex digits in a `\uXXXX;` escape.
const MAX_UNICODE_ESCAPE_DIGITS: u32 = 6;

/// Minimum number of hex digits in a `\uXXXX;` escape.
const MIN_UNICODE_ESCAPE_DIGITS: u32 = 4;

/// A scanned token plus whether it was quoted in the source.
///
/// Quoting matters to the parser in one place: an empty or whitespace-only token is a
/// parse error when unquoted but legitimate content when quoted.
#[derive(Debug)]
pub(crate) struct Token {
    /// The token text with quotes stripped, escapes resolved, and (for unquoted
    /// tokens) boundary whitespace trimmed.
    pub text: String,
    /// Whether the token was wrapped in quotes.
    pub quoted: bool,
}

/// Cursor over a display-name string.
///
/// The scanner never backtracks; each [`scan_token`](Scanner::scan_token) call leaves
/// the position on the delimiter (or at the end), and the parser advances past
/// delimiters with [`try_consume`](Scanner::try_consume).
pub(crate) struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

/// ASCII whitespace per the display-name grammar. Unicode whitespace is content.
fn is_display_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_quote(c: char) -> bool {
    matches!(c, '\'' | '"')
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// The next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    /// Consume and return the next character.
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skip ASCII whitespace.
    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_display_whitespace) {
            self.pos += 1;
        }
    }

    /// Whether the cursor has reached the end of the input.
    pub(crate) fn at_end(&self) -> bool {
        self.pos == self.text.len()
    }

    /// Consume `expected` if it is the next character.
    pub(crate) fn try_consume(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Scan one token, stopping before the next unquoted, unescaped `,` or `=`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`](crate::Error::Malformed) for an unterminated
    /// quote, non-whitespace trailing a closing quote, a stray quote inside an
    /// unquoted token, or any invalid escape sequence.
    pub(crate) fn scan_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        match self.peek() {
            Some(c) if is_quote(c) => {
                self.pos += c.len_utf8();
                self.scan_quoted(c)
            }
            _ => self.scan_unquoted(),
        }
    }

    fn scan_quoted(&mut self, quote: char) -> Result<Token> {
        let mut buffer = String::new();
        loop {
            let Some(c) = self.bump() else {
                return Err(malformed_error!("Unterminated quoted token"));
            };
            if c == quote {
                break;
            }
            if c == '\\' {
                buffer.push(self.scan_escape()?);
            } else {
                buffer.push(c);
            }
        }

        // Only whitespace may separate the closing quote from the next delimiter.
        self.skip_whitespace();
        match self.peek() {
            None | Some(',') | Some('=') => Ok(Token {
                text: buffer,
                quoted: true,
            }),
            Some(c) => Err(malformed_error!(
                "Unexpected character '{}' after quoted token",
                c
            )),
        }
    }

    fn scan_unquoted(&mut self) -> Result<Token> {
        let mut buffer = String::new();
        // Byte length of `buffer` up to the last character that survives trimming.
        // Escaped whitespace counts as significant; literal trailing whitespace does
        // not.
        let mut significant_len = 0;

        loop {
            match self.peek() {
                None | Some(',') | Some('=') => break,
                Some(c) if is_quote(c) => {
                    return Err(malformed_error!(
                        "Stray quote inside unquoted token"
                    ));
                }
                Some('\\') => {
                    self.pos += 1;
                    buffer.push(self.scan_escape()?);
                    significant_len = buffer.len();
                }
                Some(c) => {
                    self.pos += c.len_utf8();
                    buffer.push(c);
                    if !is_display_whitespace(c) {
                        significant_len = buffer.len();
                    }
                }
            }
        }

        buffer.truncate(significant_len);
        Ok(Token {
            text: buffer,
            quoted: false,
        })
    }

    /// Resolve one escape sequence; the backslash is already consumed.
    fn scan_escape(&mut self) -> Result<char> {
        let Some(c) = self.bump() else {
            return Err(malformed_error!("Dangling escape at end of input"));
        };
        match c {
            ',' | '=' | '\'' | '"' | '\\' | '/' => Ok(c),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            'n' => Ok('\n'),
            'u' => self.scan_unicode_escape(),
            other => Err(malformed_error!("Invalid escape sequence '\\{}'", other)),
        }
    }

    /// Resolve the `XXXX;` tail of a `\uXXXX;` escape.
    fn scan_unicode_escape(&mut self) -> Result<char> {
        let mut value: u32 = 0;
        let mut digits = 0;
        loop {
            let Some(c) = self.bump() else {
                return Err(malformed_error!("Unterminated unicode escape"));
            };
            if c == ';' {
                break;
            }
            let Some(digit) = c.to_digit(16) else {
                return Err(malformed_error!(
                    "Invalid character '{}' in unicode escape",
                    c
                ));
            };
            digits += 1;
            if digits > MAX_UNICODE_ESCAPE_DIGITS {
                return Err(malformed_error!("Unicode escape has too many digits"));
            }
            value = value * 16 + digit;
        }

        if digits < MIN_UNICODE_ESCAPE_DIGITS {
            return Err(malformed_error!("Unicode escape has too few digits"));
        }
        if value == 0 {
            // NUL is banned from identities outright; the escape form must not
            // smuggle one past the whole-string check.
            return Err(malformed_error!("Unicode escape names NUL"));
        }
        if value > 0x0010_FFFF {
            return Err(malformed_error!(
                "Unicode escape value {:#x} exceeds U+10FFFF",
                value
            ));
        }
        // Rejects surrogate code points, which a Rust string cannot carry.
        char::from_u32(value)
            .ok_or_else(|| malformed_error!("Unicode escape names a surrogate code point"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Result<Token> {
        Scanner::new(text).scan_token()
    }

    fn scan_ok(text: &str) -> String {
        scan(text).unwrap().text
    }

    #[test]
    fn test_plain_token() {
        assert_eq!(scan_ok("mscorlib"), "mscorlib");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(scan_ok("  mscorlib \t "), "mscorlib");
        assert_eq!(scan_ok("\r\n mscorlib"), "mscorlib");
    }

    #[test]
    fn test_interior_whitespace_preserved() {
        assert_eq!(scan_ok("My Assembly"), "My Assembly");
    }

    #[test]
    fn test_unicode_whitespace_is_content() {
        // U+00A0 NO-BREAK SPACE is not in the ASCII trim set.
        assert_eq!(scan_ok("\u{00A0}name\u{00A0}"), "\u{00A0}name\u{00A0}");
    }

    #[test]
    fn test_token_stops_at_comma_and_equals() {
        let mut scanner = Scanner::new("name, Version=1");
        assert_eq!(scanner.scan_token().unwrap().text, "name");
        assert!(scanner.try_consume(','));
        assert_eq!(scanner.scan_token().unwrap().text, "Version");
        assert!(scanner.try_consume('='));
        assert_eq!(scanner.scan_token().unwrap().text, "1");
        assert!(scanner.at_end());
    }

    #[test]
    fn test_escaped_comma() {
        assert_eq!(scan_ok("\\,"), ",");
        assert_eq!(scan_ok("a\\,b"), "a,b");
    }

    #[test]
    fn test_escaped_equals_and_slash() {
        assert_eq!(scan_ok("a\\=b"), "a=b");
        assert_eq!(scan_ok("a\\/b"), "a/b");
    }

    #[test]
    fn test_escaped_quotes_and_backslash() {
        assert_eq!(scan_ok("\\'"), "'");
        assert_eq!(scan_ok("\\\""), "\"");
        assert_eq!(scan_ok("\\\\"), "\\");
    }

    #[test]
    fn test_control_character_escapes() {
        assert_eq!(scan_ok("a\\tb"), "a\tb");
        assert_eq!(scan_ok("a\\rb"), "a\rb");
        assert_eq!(scan_ok("a\\nb"), "a\nb");
    }

    #[test]
    fn test_invalid_escapes() {
        assert!(scan("a\\vb").is_err());
        assert!(scan("a\\ b").is_err());
        assert!(scan("a\\ab").is_err());
        assert!(scan("trailing\\").is_err());
    }

    #[test]
    fn test_unicode_escape_basic() {
        assert_eq!(scan_ok("a\\u0020;b"), "a b");
        assert_eq!(scan_ok("\\u0041;"), "A");
    }

    #[test]
    fn test_unicode_escape_beyond_bmp() {
        // 5 and 6 digit forms, including a supplementary-plane code point.
        assert_eq!(scan_ok("\\u1F600;"), "\u{1F600}");
        assert_eq!(scan_ok("\\u01F600;"), "\u{1F600}");
    }

    #[test]
    fn test_unicode_escape_trailing_space_not_trimmed() {
        // An escaped space is significant even at the end of the token.
        assert_eq!(scan_ok("a\\u0020;"), "a ");
        assert_eq!(scan_ok("a\\t"), "a\t");
    }

    #[test]
    fn test_unicode_escape_invalid() {
        // Too few digits
        assert!(scan("\\u41;").is_err());
        // Too many digits
        assert!(scan("\\u0000041;").is_err());
        // Missing terminator
        assert!(scan("\\u0041").is_err());
        // Not hex
        assert!(scan("\\u00zz;").is_err());
        // Above U+10FFFF
        assert!(scan("\\u110000;").is_err());
        // Surrogate code point
        assert!(scan("\\uD800;").is_err());
        // NUL
        assert!(scan("\\u0000;").is_err());
    }

    #[test]
    fn test_quoted_token_preserves_whitespace() {
        assert_eq!(scan_ok("'    a    '"), "    a    ");
        assert_eq!(scan_ok("\"  x  \""), "  x  ");
    }

    #[test]
    fn test_quoted_token_allows_delimiters_and_other_quote() {
        assert_eq!(scan_ok("'a,b=c'"), "a,b=c");
        assert_eq!(scan_ok("'say \"hi\"'"), "say \"hi\"");
        assert_eq!(scan_ok("\"it's\""), "it's");
    }

    #[test]
    fn test_quoted_token_processes_escapes() {
        assert_eq!(scan_ok("'a\\tb'"), "a\tb");
        assert_eq!(scan_ok("'a\\'b'"), "a'b");
    }

    #[test]
    fn test_quoted_token_followed_by_delimiter() {
        let mut scanner = Scanner::new("'name'  , Version=1");
        assert_eq!(scanner.scan_token().unwrap().text, "name");
        assert!(scanner.try_consume(','));
    }

    #[test]
    fn test_quoted_token_trailing_garbage() {
        assert!(scan("'name'x").is_err());
    }

    #[test]
    fn test_unterminated_quote() {
        assert!(scan("'name").is_err());
        assert!(scan("\"name'").is_err());
    }

    #[test]
    fn test_stray_quote_in_unquoted_token() {
        assert!(scan("na'me").is_err());
        assert!(scan("na\"me").is_err());
    }

    #[test]
    fn test_empty_and_whitespace_only_tokens() {
        let token = scan("   ").unwrap();
        assert_eq!(token.text, "");
        assert!(!token.quoted);

        let token = scan("''").unwrap();
        assert_eq!(token.text, "");
        assert!(token.quoted);

        let token = scan("'   '").unwrap();
        assert_eq!(token.text, "   ");
        assert!(token.quoted);
    }
}
