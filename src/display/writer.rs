//! Display-name serialization.
//!
//! The inverse of [`parser`](super::parser): renders an [`AssemblyIdentity`] back to
//! display-name text, applying the escaping rules of the grammar in reverse so that
//! parsing the output reproduces an equal identity.
//!
//! The rendered form always carries `Version`, `Culture` (spelled `neutral` for the
//! invariant culture) and one key clause - `PublicKeyToken=<hex|null>` or, on request,
//! `PublicKey=<hex>` - and appends `Retargetable=Yes` / `ContentType=WindowsRuntime`
//! only when set.

use std::fmt::Write as _;

use crate::identity::{AssemblyContentType, AssemblyIdentity, NEUTRAL_CULTURE};

/// Render `identity` as display-name text.
///
/// With `full_key` set the key clause is `PublicKey=<hex>` over the full key material;
/// callers must ensure the identity actually holds a full key in that case.
pub(crate) fn build_display_name(identity: &AssemblyIdentity, full_key: bool) -> String {
    // Typical rendered shape:
    // "Name, Version=x.x.x.x, Culture=neutral, PublicKeyToken=xxxxxxxxxxxxxxxx"
    let mut result = String::with_capacity(identity.name().len() + 80);

    append_escaped(&mut result, identity.name());

    let _ = write!(result, ", Version={}", identity.version());

    result.push_str(", Culture=");
    if identity.is_neutral_culture() {
        result.push_str(NEUTRAL_CULTURE);
    } else {
        append_escaped(&mut result, identity.culture());
    }

    if full_key {
        let _ = write!(
            result,
            ", PublicKey={}",
            hex::encode(identity.public_key_or_token())
        );
    } else {
        result.push_str(", PublicKeyToken=");
        let token = identity.public_key_token();
        if token.is_empty() {
            result.push_str("null");
        } else {
            result.push_str(&hex::encode(token));
        }
    }

    if identity.is_retargetable() {
        result.push_str(", Retargetable=Yes");
    }
    if identity.content_type() == AssemblyContentType::WindowsRuntime {
        result.push_str(", ContentType=WindowsRuntime");
    }

    result
}

/// Append `element` with delimiters and quotes escaped.
///
/// An element that starts or ends with ASCII whitespace is additionally wrapped in
/// double quotes; without them the parser would trim the boundary whitespace away.
fn append_escaped(result: &mut String, element: &str) {
    let needs_quoting = element
        .chars()
        .next()
        .zip(element.chars().next_back())
        .is_some_and(|(first, last)| is_boundary_whitespace(first) || is_boundary_whitespace(last));

    if needs_quoting {
        result.push('"');
    }
    for c in element.chars() {
        match c {
            ',' | '=' | '\\' | '\'' | '"' => {
                result.push('\\');
                result.push(c);
            }
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    if needs_quoting {
        result.push('"');
    }
}

fn is_boundary_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}
