//! Display-name parsing.
//!
//! Drives the scanner over the `SimpleName[, key=value]*` grammar and
//! assembles the result into an [`AssemblyIdentity`] plus the
//! [`AssemblyIdentityParts`] bitset recording which fields the text supplied.
//!
//! # Recognized Properties
//!
//! `Version`, `Culture` (alias `Language`), `PublicKey`, `PublicKeyToken`,
//! `Retargetable`, and `ContentType`, matched case-insensitively. Unrecognized
//! properties are tolerated and reported through
//! [`AssemblyIdentityParts::UNKNOWN`]; they never fail the parse as long as the
//! clause is syntactically well-formed (`key=value`).
//!
//! # Wildcards and Duplicates
//!
//! A property value of `*` leaves the field unspecified: the property is remembered
//! for duplicate detection but contributes no presence flag. Duplicate recognized
//! properties fail the whole parse, including a duplicate following a wildcard
//! (`Culture=*, Culture=en` is rejected).

use crate::{
    display::lexer::Scanner,
    identity::{
        normalize_culture,
        strongname::{compute_public_key_token, HashAlgorithm, PUBLIC_KEY_TOKEN_SIZE},
        AssemblyContentType, AssemblyIdentity, AssemblyIdentityParts, AssemblyVersion,
        NEUTRAL_CULTURE,
    },
    Error, Result,
};

/// Spelling accepted (next to `null`) for an explicitly empty key or token.
const NULL_VALUE: &str = "null";

/// Parse an assembly display name into an identity and its presence bitset.
///
/// Absent fields default to version `0.0.0.0`, the neutral culture, no key material,
/// not retargetable, and [`AssemblyContentType::Default`]. The returned
/// [`AssemblyIdentityParts`] records which fields were actually written; comparison
/// must consult it rather than the defaulted values.
///
/// # Arguments
///
/// * `text` - The display name, e.g.
///   `"System.Data, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"`
///
/// # Errors
///
/// Returns [`Error::Empty`] for an empty input string and [`Error::Malformed`] for
/// any violation of the grammar: bad escapes, unterminated quotes, a clause without
/// `=`, duplicate properties, invalid version/key/token/retargetable/content-type
/// values, a NUL character anywhere, or a whitespace-only unquoted name.
///
/// # Examples
///
/// ```rust
/// use asmbind::{display::parse_display_name, AssemblyIdentityParts};
///
/// let (identity, parts) =
///     parse_display_name("Example, Version=1.2, PublicKeyToken=null").unwrap();
/// assert_eq!(identity.name(), "Example");
/// assert!(parts.contains(AssemblyIdentityParts::VERSION_MINOR));
/// assert!(!parts.contains(AssemblyIdentityParts::VERSION_BUILD));
/// assert!(!identity.is_strong_name());
/// ```
pub fn parse_display_name(text: &str) -> Result<(AssemblyIdentity, AssemblyIdentityParts)> {
    if text.is_empty() {
        return Err(Error::Empty);
    }
    if text.contains('\0') {
        return Err(malformed_error!("Display name contains a NUL character"));
    }

    let mut scanner = Scanner::new(text);

    let name = scanner.scan_token()?;
    if name.text.is_empty() {
        // Covers both truly empty names and whitespace-only unquoted names, which
        // trim to nothing. A quoted whitespace-only name survives as content.
        return Err(malformed_error!("Assembly name is missing"));
    }

    let mut state = ParseState::default();

    while !scanner.at_end() {
        if !scanner.try_consume(',') {
            return Err(malformed_error!("Expected ',' before the next property"));
        }

        let key = scanner.scan_token()?;
        if key.text.is_empty() {
            return Err(malformed_error!("Property name is missing"));
        }
        if !scanner.try_consume('=') {
            return Err(malformed_error!("Property '{}' has no value", key.text));
        }
        let value = scanner.scan_token()?.text;

        state.apply(&key.text, value)?;
    }

    state.finish(name.text)
}

/// Accumulates property clauses and performs the cross-field validation that can only
/// run once the whole name has been read.
struct ParseState {
    parts: AssemblyIdentityParts,
    /// Properties encountered so far, including wildcard-valued ones that set no
    /// presence flag. Drives duplicate detection.
    seen: AssemblyIdentityParts,
    version: AssemblyVersion,
    culture: String,
    public_key: Option<Vec<u8>>,
    public_key_token: Option<Vec<u8>>,
    is_retargetable: bool,
    content_type: AssemblyContentType,
}

impl Default for ParseState {
    fn default() -> Self {
        Self {
            parts: AssemblyIdentityParts::empty(),
            seen: AssemblyIdentityParts::empty(),
            version: AssemblyVersion::ZERO,
            culture: String::new(),
            public_key: None,
            public_key_token: None,
            is_retargetable: false,
            content_type: AssemblyContentType::Default,
        }
    }
}

impl ParseState {
    fn apply(&mut self, key: &str, value: String) -> Result<()> {
        match key.to_lowercase().as_str() {
            "version" => {
                self.mark_seen(AssemblyIdentityParts::VERSION, key)?;
                self.require_value(key, &value)?;
                if value != "*" {
                    let (version, version_parts) = AssemblyVersion::parse_with_parts(&value)?;
                    self.version = version;
                    self.parts |= version_parts;
                }
            }
            "culture" | "language" => {
                self.mark_seen(AssemblyIdentityParts::CULTURE, key)?;
                self.require_value(key, &value)?;
                if value != "*" {
                    self.culture = normalize_culture(Some(&value));
                    self.parts |= AssemblyIdentityParts::CULTURE;
                }
            }
            "publickeytoken" => {
                self.mark_seen(AssemblyIdentityParts::PUBLIC_KEY_TOKEN, key)?;
                self.require_value(key, &value)?;
                if value != "*" {
                    self.public_key_token = Some(parse_token_value(&value)?);
                    self.parts |= AssemblyIdentityParts::PUBLIC_KEY_TOKEN;
                }
            }
            "publickey" => {
                self.mark_seen(AssemblyIdentityParts::PUBLIC_KEY, key)?;
                self.require_value(key, &value)?;
                if value != "*" {
                    self.public_key = Some(parse_key_value(&value)?);
                    self.parts |= AssemblyIdentityParts::PUBLIC_KEY;
                }
            }
            "retargetable" => {
                self.mark_seen(AssemblyIdentityParts::RETARGETABILITY, key)?;
                self.require_value(key, &value)?;
                if value.eq_ignore_ascii_case("yes") {
                    self.is_retargetable = true;
                    self.parts |= AssemblyIdentityParts::RETARGETABILITY;
                } else if value.eq_ignore_ascii_case("no") {
                    self.is_retargetable = false;
                    self.parts |= AssemblyIdentityParts::RETARGETABILITY;
                } else if value != "*" {
                    return Err(malformed_error!(
                        "Invalid Retargetable value '{}'",
                        value
                    ));
                }
            }
            "contenttype" => {
                self.mark_seen(AssemblyIdentityParts::CONTENT_TYPE, key)?;
                self.require_value(key, &value)?;
                if value.eq_ignore_ascii_case("windowsruntime") {
                    self.content_type = AssemblyContentType::WindowsRuntime;
                    self.parts |= AssemblyIdentityParts::CONTENT_TYPE;
                } else if value != "*" {
                    // "Default" must be expressed by omission, never written out.
                    return Err(malformed_error!("Invalid ContentType value '{}'", value));
                }
            }
            _ => {
                self.parts |= AssemblyIdentityParts::UNKNOWN;
            }
        }
        Ok(())
    }

    /// Record `flags` as encountered, failing on a repeat of the same property.
    fn mark_seen(&mut self, flags: AssemblyIdentityParts, key: &str) -> Result<()> {
        if self.seen.intersects(flags) {
            return Err(malformed_error!("Duplicate property '{}'", key));
        }
        self.seen |= flags;
        Ok(())
    }

    /// Recognized properties must carry a value; only unknown ones may be empty.
    fn require_value(&self, key: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(malformed_error!("Property '{}' has an empty value", key));
        }
        Ok(())
    }

    fn finish(self, name: String) -> Result<(AssemblyIdentity, AssemblyIdentityParts)> {
        if self.is_retargetable && self.content_type == AssemblyContentType::WindowsRuntime {
            return Err(malformed_error!(
                "Retargetable=Yes cannot be combined with ContentType=WindowsRuntime"
            ));
        }

        let (material, has_public_key) = match (self.public_key, self.public_key_token) {
            (Some(key), Some(token)) => {
                let derived = if key.is_empty() {
                    Vec::new()
                } else {
                    compute_public_key_token(&key, HashAlgorithm::Sha1)
                };
                if derived != token {
                    return Err(malformed_error!(
                        "PublicKeyToken does not match the supplied PublicKey"
                    ));
                }
                let has_key = !key.is_empty();
                (key, has_key)
            }
            (Some(key), None) => {
                let has_key = !key.is_empty();
                (key, has_key)
            }
            (None, Some(token)) => (token, false),
            (None, None) => (Vec::new(), false),
        };

        let identity = AssemblyIdentity::new_unchecked(
            name,
            self.version,
            self.culture,
            material,
            has_public_key,
            self.is_retargetable,
            self.content_type,
        );

        Ok((identity, AssemblyIdentityParts::NAME | self.parts))
    }
}

/// Parse a `PublicKeyToken` value: `null`/`neutral` for an explicitly empty token, or
/// exactly 16 hex characters.
fn parse_token_value(value: &str) -> Result<Vec<u8>> {
    if value.eq_ignore_ascii_case(NULL_VALUE) || value.eq_ignore_ascii_case(NEUTRAL_CULTURE) {
        return Ok(Vec::new());
    }
    if value.len() != PUBLIC_KEY_TOKEN_SIZE * 2 {
        return Err(malformed_error!(
            "PublicKeyToken must be {} hex characters, got '{}'",
            PUBLIC_KEY_TOKEN_SIZE * 2,
            value
        ));
    }
    hex::decode(value).map_err(|e| malformed_error!("Invalid PublicKeyToken '{}': {}", value, e))
}

/// Parse a `PublicKey` value: `null`/`neutral` for an explicitly empty key, or an
/// even-length hex string of any byte length other than one.
fn parse_key_value(value: &str) -> Result<Vec<u8>> {
    if value.eq_ignore_ascii_case(NULL_VALUE) || value.eq_ignore_ascii_case(NEUTRAL_CULTURE) {
        return Ok(Vec::new());
    }
    let bytes = hex::decode(value)
        .map_err(|e| malformed_error!("Invalid PublicKey '{}': {}", value, e))?;
    if bytes.len() == 1 {
        return Err(malformed_error!("PublicKey cannot be a single byte"));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<(AssemblyIdentity, AssemblyIdentityParts)> {
        parse_display_name(text)
    }

    fn parse_ok(text: &str) -> (AssemblyIdentity, AssemblyIdentityParts) {
        parse(text).unwrap()
    }

    #[test]
    fn test_simple_name_only() {
        let (identity, parts) = parse_ok("MyAssembly");
        assert_eq!(identity.name(), "MyAssembly");
        assert_eq!(parts, AssemblyIdentityParts::NAME);
        assert_eq!(identity.version(), AssemblyVersion::ZERO);
        assert!(identity.is_neutral_culture());
        assert!(!identity.is_strong_name());
    }

    #[test]
    fn test_full_display_name() {
        let (identity, parts) = parse_ok(
            "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
        );
        assert_eq!(identity.name(), "mscorlib");
        assert_eq!(identity.version(), AssemblyVersion::new(4, 0, 0, 0));
        assert!(identity.is_neutral_culture());
        assert_eq!(hex::encode(identity.public_key_token()), "b77a5c561934e089");
        assert!(parts.is_full_name());
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let (identity, parts) =
            parse_ok("a, VERSION=1.0, culture=EN-us, publickeytoken=NULL");
        assert_eq!(identity.version(), AssemblyVersion::new(1, 0, 0, 0));
        assert_eq!(identity.culture(), "EN-us");
        assert!(parts.contains(AssemblyIdentityParts::PUBLIC_KEY_TOKEN));
    }

    #[test]
    fn test_language_is_culture_alias() {
        let (identity, parts) = parse_ok("a, Language=fr-FR");
        assert_eq!(identity.culture(), "fr-FR");
        assert!(parts.contains(AssemblyIdentityParts::CULTURE));
    }

    #[test]
    fn test_culture_neutral_normalizes_to_empty() {
        let (identity, parts) = parse_ok("a, Culture=Neutral");
        assert!(identity.is_neutral_culture());
        assert!(parts.contains(AssemblyIdentityParts::CULTURE));
    }

    #[test]
    fn test_culture_wildcard_leaves_field_unspecified() {
        let (identity, parts) = parse_ok("a, Culture=*");
        assert!(identity.is_neutral_culture());
        assert!(!parts.contains(AssemblyIdentityParts::CULTURE));
    }

    #[test]
    fn test_duplicate_properties_fail() {
        assert!(parse("a, Version=1.0, Version=2.0").is_err());
        assert!(parse("a, Culture=neutral, Culture=en").is_err());
        assert!(parse("a, Culture=en, Language=fr").is_err());
        assert!(parse("a, PublicKeyToken=null, PublicKeyToken=null").is_err());
        assert!(parse("a, Retargetable=Yes, Retargetable=Yes").is_err());
    }

    #[test]
    fn test_duplicate_after_wildcard_fails() {
        assert!(parse("a, Culture=*, Culture=en").is_err());
        assert!(parse("a, Version=*, Version=1.0").is_err());
    }

    #[test]
    fn test_version_wildcard_unspecified() {
        let (identity, parts) = parse_ok("a, Version=*");
        assert_eq!(identity.version(), AssemblyVersion::ZERO);
        assert!(!parts.intersects(AssemblyIdentityParts::VERSION));
    }

    #[test]
    fn test_version_partial_flags() {
        let (_, parts) = parse_ok("a, Version=1.2");
        assert!(parts
            .contains(AssemblyIdentityParts::VERSION_MAJOR | AssemblyIdentityParts::VERSION_MINOR));
        assert!(!parts.contains(AssemblyIdentityParts::VERSION_BUILD));
    }

    #[test]
    fn test_token_null_is_explicitly_empty() {
        let (identity, parts) = parse_ok("a, PublicKeyToken=null");
        assert!(!identity.is_strong_name());
        assert!(parts.contains(AssemblyIdentityParts::PUBLIC_KEY_TOKEN));

        let (identity, _) = parse_ok("a, PublicKeyToken=NEUTRAL");
        assert!(!identity.is_strong_name());
    }

    #[test]
    fn test_token_wildcard_sets_no_flag() {
        let (_, parts) = parse_ok("a, PublicKeyToken=*");
        assert!(!parts.contains(AssemblyIdentityParts::PUBLIC_KEY_TOKEN));
    }

    #[test]
    fn test_token_requires_exactly_sixteen_hex_chars() {
        assert!(parse("a, PublicKeyToken=b77a5c561934e0").is_err());
        assert!(parse("a, PublicKeyToken=b77a5c561934e08900").is_err());
        assert!(parse("a, PublicKeyToken=b77a5c561934e08z").is_err());

        let (identity, _) = parse_ok("a, PublicKeyToken=B77A5C561934E089");
        assert_eq!(hex::encode(identity.public_key_token()), "b77a5c561934e089");
    }

    #[test]
    fn test_public_key_rules() {
        // The ECMA standard public key.
        let (identity, parts) =
            parse_ok("a, PublicKey=00000000000000000400000000000000");
        assert!(identity.has_public_key());
        assert!(parts.contains(AssemblyIdentityParts::PUBLIC_KEY));
        assert_eq!(hex::encode(identity.public_key_token()), "b77a5c561934e089");

        // Odd-length hex
        assert!(parse("a, PublicKey=000").is_err());
        // Single-byte key
        assert!(parse("a, PublicKey=00").is_err());
        // Wildcard leaves it unspecified
        let (_, parts) = parse_ok("a, PublicKey=*");
        assert!(!parts.contains(AssemblyIdentityParts::PUBLIC_KEY));
    }

    #[test]
    fn test_key_and_matching_token_accepted() {
        let (identity, parts) = parse_ok(
            "a, PublicKey=00000000000000000400000000000000, PublicKeyToken=b77a5c561934e089",
        );
        assert!(identity.has_public_key());
        assert!(parts.contains(AssemblyIdentityParts::PUBLIC_KEY));
        assert!(parts.contains(AssemblyIdentityParts::PUBLIC_KEY_TOKEN));
    }

    #[test]
    fn test_key_and_mismatched_token_rejected() {
        assert!(parse(
            "a, PublicKey=00000000000000000400000000000000, PublicKeyToken=0123456789abcdef"
        )
        .is_err());
    }

    #[test]
    fn test_retargetable_values() {
        let (identity, parts) = parse_ok("a, Retargetable=Yes");
        assert!(identity.is_retargetable());
        assert!(parts.contains(AssemblyIdentityParts::RETARGETABILITY));

        let (identity, parts) = parse_ok("a, Retargetable=NO");
        assert!(!identity.is_retargetable());
        assert!(parts.contains(AssemblyIdentityParts::RETARGETABILITY));

        let (_, parts) = parse_ok("a, Retargetable=*");
        assert!(!parts.contains(AssemblyIdentityParts::RETARGETABILITY));

        assert!(parse("a, Retargetable=true").is_err());
    }

    #[test]
    fn test_content_type_values() {
        let (identity, parts) = parse_ok("a, ContentType=WindowsRuntime");
        assert_eq!(identity.content_type(), AssemblyContentType::WindowsRuntime);
        assert!(parts.contains(AssemblyIdentityParts::CONTENT_TYPE));

        let (_, parts) = parse_ok("a, ContentType=*");
        assert!(!parts.contains(AssemblyIdentityParts::CONTENT_TYPE));

        // "Default" must be omitted, not written.
        assert!(parse("a, ContentType=Default").is_err());
        assert!(parse("a, ContentType=Other").is_err());
    }

    #[test]
    fn test_retargetable_winrt_mutually_exclusive() {
        assert!(parse("a, Retargetable=Yes, ContentType=WindowsRuntime").is_err());
        assert!(parse("a, ContentType=WindowsRuntime, Retargetable=Yes").is_err());
        // Retargetable=No is compatible.
        assert!(parse("a, ContentType=WindowsRuntime, Retargetable=No").is_ok());
    }

    #[test]
    fn test_unknown_properties_tolerated() {
        let (identity, parts) = parse_ok("a, Custom=anything, Version=1.0");
        assert_eq!(identity.version(), AssemblyVersion::new(1, 0, 0, 0));
        assert!(parts.contains(AssemblyIdentityParts::UNKNOWN));

        // Even with an empty value.
        let (_, parts) = parse_ok("a, Custom=");
        assert!(parts.contains(AssemblyIdentityParts::UNKNOWN));
    }

    #[test]
    fn test_clause_without_equals_is_hard_error() {
        assert!(parse("a, Custom").is_err());
        assert!(parse("a, Version").is_err());
        assert!(parse("a,").is_err());
    }

    #[test]
    fn test_recognized_property_with_empty_value_fails() {
        assert!(parse("a, Version=").is_err());
        assert!(parse("a, Culture=").is_err());
        assert!(parse("a, PublicKeyToken=").is_err());
    }

    #[test]
    fn test_nul_anywhere_fails() {
        assert!(parse("a\0b").is_err());
        assert!(parse("a, Version=1.0\0").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse(""), Err(Error::Empty)));
    }

    #[test]
    fn test_whitespace_only_name_fails_unless_quoted() {
        assert!(parse("   ").is_err());
        assert!(parse("  , Version=1.0").is_err());

        let (identity, _) = parse_ok("'   ', Version=1.0");
        assert_eq!(identity.name(), "   ");
    }

    #[test]
    fn test_quoted_name_with_delimiters() {
        let (identity, _) = parse_ok("'My, Strange=Name', Version=1.0");
        assert_eq!(identity.name(), "My, Strange=Name");
    }

    #[test]
    fn test_escaped_name() {
        let (identity, _) = parse_ok("\\,");
        assert_eq!(identity.name(), ",");

        let (identity, _) = parse_ok("a\\u0020;b");
        assert_eq!(identity.name(), "a b");
    }

    #[test]
    fn test_whitespace_around_clauses_trimmed() {
        let (identity, _) =
            parse_ok("  name \t,  Version = 1.2.3.4 ,\r\n Culture = en-US  ");
        assert_eq!(identity.name(), "name");
        assert_eq!(identity.version(), AssemblyVersion::new(1, 2, 3, 4));
        assert_eq!(identity.culture(), "en-US");
    }

    #[test]
    fn test_quoted_values() {
        let (identity, _) = parse_ok("a, Culture='en-US'");
        assert_eq!(identity.culture(), "en-US");
    }

    #[test]
    fn test_winrt_version_sentinel_everything() {
        let (identity, _) =
            parse_ok("Windows, Version=255.255.255.255, ContentType=WindowsRuntime");
        assert_eq!(identity.version(), AssemblyVersion::new(255, 255, 255, 255));
        assert_eq!(identity.content_type(), AssemblyContentType::WindowsRuntime);
    }
}
