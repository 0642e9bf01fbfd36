//! Integration tests for display-name parsing and serialization.
//!
//! Exercises the full grammar end to end: quoting, escaping, wildcards, presence
//! flags, and the round-trip property that parsing a rendered display name
//! reproduces an equal identity.

use asmbind::prelude::*;

fn parse(text: &str) -> (AssemblyIdentity, AssemblyIdentityParts) {
    AssemblyIdentity::parse_display_name(text).unwrap()
}

/// The ECMA standard public key; its SHA-1 token is b77a5c561934e089.
const ECMA_KEY_HEX: &str = "00000000000000000400000000000000";

#[test]
fn full_display_name_sets_full_parts() {
    let (identity, parts) = parse(
        "System.Data, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
    );
    assert!(parts.is_full_name());
    assert_eq!(identity.name(), "System.Data");
    assert_eq!(identity.version(), AssemblyVersion::new(4, 0, 0, 0));
    assert!(identity.is_strong_name());
}

#[test]
fn simple_name_sets_exactly_name() {
    let (_, parts) = parse("System.Data");
    assert_eq!(parts, AssemblyIdentityParts::NAME);
}

#[test]
fn token_roundtrip() {
    let (identity, _) = parse(
        "My.Lib, Version=1.2.3.4, Culture=fr-FR, PublicKeyToken=b03f5f7f11d50a3a, \
         Retargetable=Yes",
    );
    let rendered = identity.display_name();
    let (reparsed, parts) = parse(rendered);
    assert_eq!(identity, reparsed);
    assert!(parts.is_full_name());
    assert!(parts.contains(AssemblyIdentityParts::RETARGETABILITY));
}

#[test]
fn full_key_roundtrip() {
    let (identity, _) = parse(&format!(
        "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKey={ECMA_KEY_HEX}"
    ));
    assert!(identity.has_public_key());

    let rendered = identity.full_key_display_name();
    assert!(rendered.contains("PublicKey="));
    let (reparsed, parts) = parse(&rendered);
    assert!(reparsed.has_public_key());
    assert!(parts.contains(AssemblyIdentityParts::PUBLIC_KEY));
    assert_eq!(identity, reparsed);

    // The token rendering of the same identity parses back equal as well, since
    // equality is token-based.
    let (from_token, _) = parse(identity.display_name());
    assert_eq!(identity, from_token);
}

#[test]
fn winrt_roundtrip() {
    let (identity, _) = parse(
        "Component, Version=1.0.0.0, Culture=neutral, PublicKeyToken=null, \
         ContentType=WindowsRuntime",
    );
    assert_eq!(identity.content_type(), AssemblyContentType::WindowsRuntime);
    let (reparsed, parts) = parse(identity.display_name());
    assert_eq!(identity, reparsed);
    assert!(parts.contains(AssemblyIdentityParts::CONTENT_TYPE));
}

#[test]
fn escaped_name_roundtrip() {
    let names = [
        "My, Lib",
        "a=b",
        "quote'inside",
        "both\"kinds'here",
        "back\\slash",
        "tab\there",
        "new\nline",
        "  padded  ",
        "unicode \u{00E9}\u{4E16} content",
    ];
    for name in names {
        let identity = AssemblyIdentity::new(
            name,
            AssemblyVersion::new(1, 0, 0, 0),
            None,
            Vec::new(),
            false,
            false,
            AssemblyContentType::Default,
        );
        let (reparsed, _) = parse(identity.display_name());
        assert_eq!(reparsed.name(), name, "name failed to round-trip: {name:?}");
    }
}

#[test]
fn escaped_culture_roundtrip() {
    let identity = AssemblyIdentity::new(
        "Lib",
        AssemblyVersion::new(1, 0, 0, 0),
        Some("odd, culture"),
        Vec::new(),
        false,
        false,
        AssemblyContentType::Default,
    );
    let (reparsed, _) = parse(identity.display_name());
    assert_eq!(reparsed.culture(), "odd, culture");
}

#[test]
fn escape_literals_from_the_grammar() {
    // "\," parses to a one-character name.
    let (identity, _) = parse("\\,");
    assert_eq!(identity.name(), ",");

    // Quotes preserve interior whitespace.
    let (identity, _) = parse("'    a    '");
    assert_eq!(identity.name(), "    a    ");

    // \uXXXX; escapes decode to the code point.
    let (identity, _) = parse("a\\u0020;b");
    assert_eq!(identity.name(), "a b");
}

#[test]
fn duplicate_version_clause_fails() {
    assert!(
        AssemblyIdentity::parse_display_name("Lib, Version=1.0.0.0, Version=1.0.0.0").is_err()
    );
}

#[test]
fn version_wildcards_and_presence() {
    let (identity, parts) = parse("Lib, Version=1.*");
    assert_eq!(identity.version(), AssemblyVersion::new(1, 0, 0, 0));
    assert!(parts.contains(AssemblyIdentityParts::VERSION_MAJOR));
    assert!(parts.contains(AssemblyIdentityParts::VERSION_MINOR));
    assert!(!parts.contains(AssemblyIdentityParts::VERSION_BUILD));

    let (_, parts) = parse("Lib, Version=*");
    assert!(!parts.intersects(AssemblyIdentityParts::VERSION));
}

#[test]
fn explicit_defaults_still_set_presence_flags() {
    // Explicitly writing out the default values constrains the reference, and the
    // flags must say so.
    let (identity, parts) =
        parse("Lib, Version=0.0.0.0, Culture=neutral, PublicKeyToken=null");
    assert!(parts.is_full_name());
    assert_eq!(identity.version(), AssemblyVersion::ZERO);
    assert!(identity.is_neutral_culture());
    assert!(!identity.is_strong_name());
}

#[test]
fn wildcard_everything_is_name_only() {
    let (_, parts) = parse(
        "Lib, Version=*, Culture=*, PublicKeyToken=*, Retargetable=*, ContentType=*",
    );
    assert_eq!(parts, AssemblyIdentityParts::NAME);
}

#[test]
fn from_str_impl_parses() {
    let identity: AssemblyIdentity = "System, Version=4.0.0.0".parse().unwrap();
    assert_eq!(identity.name(), "System");
}

#[test]
fn display_impl_matches_display_name() {
    let (identity, _) = parse("Lib, Version=2.0.0.0");
    assert_eq!(identity.to_string(), identity.display_name());
}

#[test]
fn parse_failures_are_errors_not_defaults() {
    let bad = [
        "",
        "   ",
        "Lib, Version=1.0.0.0.0",
        "Lib, Version=65535",
        "Lib, PublicKeyToken=123",
        "Lib, PublicKey=aa",
        "Lib, Retargetable=maybe",
        "Lib, ContentType=Default",
        "Lib, NoEquals",
        "Lib, =value",
        "Lib,, Version=1.0",
        "'unterminated",
        "stray'quote",
        "bad\\escape\\q",
        "nul\0name",
    ];
    for text in bad {
        assert!(
            AssemblyIdentity::parse_display_name(text).is_err(),
            "expected parse failure for {text:?}"
        );
    }
}

#[test]
fn key_with_matching_token_verified() {
    let ok = format!(
        "Lib, PublicKey={ECMA_KEY_HEX}, PublicKeyToken=b77a5c561934e089"
    );
    assert!(AssemblyIdentity::parse_display_name(&ok).is_ok());

    let bad = format!(
        "Lib, PublicKey={ECMA_KEY_HEX}, PublicKeyToken=ffffffffffffffff"
    );
    assert!(AssemblyIdentity::parse_display_name(&bad).is_err());
}

#[test]
fn reference_parse_matches_identity_parse() {
    let text = "System, Version=2.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089";
    let reference = AssemblyReference::parse(text).unwrap();
    let (identity, parts) = parse(text);
    assert_eq!(reference.identity(), &identity);
    assert_eq!(reference.parts(), parts);
    assert!(reference.is_full());
}
