//! Possibly-partial assembly references.
//!
//! A reference is an assembly identity as written in a consumer's dependency
//! declaration. Unlike a definition it may be partial: any of version, culture, or key
//! material can be left unspecified, and an unspecified field matches anything during
//! comparison. [`AssemblyReference`] pairs the parsed identity with the
//! [`AssemblyIdentityParts`] bitset that records what the reference actually
//! constrained.

use crate::{
    identity::{AssemblyIdentity, AssemblyIdentityParts},
    Result,
};

/// An assembly reference, possibly partial.
///
/// Construct from display-name text with [`parse`](Self::parse) (the parts then
/// reflect exactly what the text supplied) or from an already-built
/// [`AssemblyIdentity`] with [`from_identity`](Self::from_identity) (the reference is
/// then fully specified).
///
/// # Examples
///
/// ```rust
/// use asmbind::AssemblyReference;
///
/// let partial = AssemblyReference::parse("System.Xml, Version=2.0").unwrap();
/// assert!(partial.is_partial());
///
/// let full = AssemblyReference::parse(
///     "System.Xml, Version=2.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
/// )
/// .unwrap();
/// assert!(full.is_full());
/// ```
#[derive(Debug, Clone)]
pub struct AssemblyReference {
    identity: AssemblyIdentity,
    parts: AssemblyIdentityParts,
}

impl AssemblyReference {
    /// Parse a reference from display-name text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`](crate::Error::Malformed) (or
    /// [`Error::Empty`](crate::Error::Empty)) when the text violates the display-name
    /// grammar. A malformed reference is always a hard error for the caller; it is
    /// never treated as an identity that merely fails to match.
    pub fn parse(text: &str) -> Result<Self> {
        let (identity, parts) = AssemblyIdentity::parse_display_name(text)?;
        Ok(Self { identity, parts })
    }

    /// Wrap a fully-constructed identity as a reference with every field specified.
    #[must_use]
    pub fn from_identity(identity: AssemblyIdentity) -> Self {
        Self {
            identity,
            parts: AssemblyIdentityParts::NAME
                | AssemblyIdentityParts::VERSION
                | AssemblyIdentityParts::CULTURE
                | AssemblyIdentityParts::PUBLIC_KEY_TOKEN,
        }
    }

    /// The parsed identity with unspecified fields at their defaults.
    #[must_use]
    pub fn identity(&self) -> &AssemblyIdentity {
        &self.identity
    }

    /// Which fields the reference actually specified.
    #[must_use]
    pub fn parts(&self) -> AssemblyIdentityParts {
        self.parts
    }

    /// `true` when name, all four version components, culture, and key material are
    /// all specified.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.parts.is_full_name()
    }

    /// `true` when at least one field is left unspecified. Partial references are
    /// valid only as comparison references, never as definitions.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.is_full()
    }
}

impl From<AssemblyIdentity> for AssemblyReference {
    fn from(identity: AssemblyIdentity) -> Self {
        Self::from_identity(identity)
    }
}
