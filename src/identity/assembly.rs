//! Canonical assembly identity representation.
//!
//! This module provides [`AssemblyIdentity`], the structured form of a .NET assembly
//! name: simple name, four-part version, culture, strong-name key material,
//! retargetability, and content type. It is the unit the comparison engine operates on
//! and the product of display-name parsing.
//!
//! # Identity Components
//!
//! .NET assemblies are uniquely identified by the combination of:
//! - **Simple Name**: The primary assembly name (e.g., "mscorlib", "System.Core")
//! - **Version**: Four-part version number for binding and compatibility
//! - **Culture**: Localization culture (empty for culture-neutral assemblies)
//! - **Strong Name**: The full public key or its 8-byte token
//! - **Content Type**: Ordinary .NET assembly vs Windows Runtime component
//!
//! # Construction Paths
//!
//! Two constructors with deliberately different failure contracts exist:
//!
//! - [`AssemblyIdentity::new`] - strict; invalid field combinations are caller bugs and
//!   panic. Use when the fields come from code.
//! - [`AssemblyIdentity::try_new`] - tolerant; returns [`Err`] and additionally permits
//!   an empty name and the `0xFFFF` version sentinel found in raw metadata. Use when
//!   the fields come from deserialized data.
//!
//! Untrusted *text* goes through [`AssemblyIdentity::parse_display_name`] instead,
//! which never panics.
//!
//! # Thread Safety
//!
//! [`AssemblyIdentity`] is immutable after construction and implements [`Send`] and
//! [`Sync`]. The lazily derived public-key token and display name are memoized through
//! [`OnceLock`]; both are pure functions of immutable fields, so redundant computation
//! on a race is harmless and no locking beyond the cell itself is involved.

use std::{fmt, str::FromStr, sync::OnceLock};

use crate::{
    display,
    identity::{
        parts::AssemblyIdentityParts,
        strongname::{compute_public_key_token, HashAlgorithm, PUBLIC_KEY_TOKEN_SIZE},
        version::AssemblyVersion,
    },
    Error, Result,
};

/// Display-name spelling of the invariant culture.
pub(crate) const NEUTRAL_CULTURE: &str = "neutral";

/// Content type of an assembly.
///
/// Windows Runtime components carry metadata-only WinRT types and follow
/// substantially different binding rules: they never participate in framework version
/// unification or retargeting, and a WinRT reference never matches a non-WinRT
/// definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AssemblyContentType {
    /// Ordinary .NET assembly.
    #[default]
    Default,
    /// Windows Runtime metadata component (`.winmd`).
    WindowsRuntime,
}

/// Canonical identity of a .NET assembly.
///
/// An immutable value type holding the parsed or constructed identity fields plus two
/// lazily memoized derivations (public-key token and token-form display name).
///
/// # Equality Semantics
///
/// Two identities are equal when their simple names (ordinal, case-sensitive),
/// versions, cultures (ASCII case-insensitive, neutral-normalized), public-key
/// *tokens*, content types, and retargetable flags all match. Comparing tokens rather
/// than raw key material means an identity built from a full public key equals the
/// identity built from that key's derived token, and the two hash identically - a
/// requirement for using mixed-provenance identities as map keys.
///
/// The memoized caches are excluded from equality and hashing.
///
/// # Examples
///
/// ```rust
/// use asmbind::{AssemblyContentType, AssemblyIdentity, AssemblyVersion};
///
/// let identity = AssemblyIdentity::new(
///     "System.Core",
///     AssemblyVersion::new(4, 0, 0, 0),
///     None,
///     hex::decode("b77a5c561934e089").unwrap(),
///     false,
///     false,
///     AssemblyContentType::Default,
/// );
///
/// assert!(identity.is_strong_name());
/// assert_eq!(
///     identity.display_name(),
///     "System.Core, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AssemblyIdentity {
    /// Simple assembly name.
    name: String,

    /// Four-part version number.
    version: AssemblyVersion,

    /// Culture name, normalized: empty string means culture-invariant ("neutral").
    culture: String,

    /// Full public key or 8-byte token, disambiguated by `has_public_key`.
    public_key_or_token: Vec<u8>,

    /// Whether `public_key_or_token` holds a full public key.
    has_public_key: bool,

    /// Whether a reference with this identity may be retargeted at bind time.
    is_retargetable: bool,

    /// Ordinary assembly vs Windows Runtime component.
    content_type: AssemblyContentType,

    /// Memoized public-key token, populated on first access when `has_public_key`.
    lazy_token: OnceLock<Vec<u8>>,

    /// Memoized token-form display name.
    lazy_display_name: OnceLock<String>,
}

impl AssemblyIdentity {
    /// Create a new assembly identity, panicking on invalid field combinations.
    ///
    /// Field validation failures on this path indicate caller bugs, not bad data, and
    /// fail fast. Use [`try_new`](Self::try_new) for deserialized fields and
    /// [`parse_display_name`](Self::parse_display_name) for untrusted text.
    ///
    /// The culture is normalized at construction: `None` and any casing of `"neutral"`
    /// both produce the invariant culture (stored as the empty string).
    ///
    /// # Arguments
    ///
    /// * `name` - Simple assembly name; non-empty, no NUL characters
    /// * `version` - Four-part version; components must not be `0xFFFF`
    /// * `culture` - Culture name, or `None` for culture-neutral
    /// * `public_key_or_token` - Full key, 8-byte token, or empty for weak names
    /// * `has_public_key` - Whether the previous argument is a full key
    /// * `is_retargetable` - Retargetable reference flag
    /// * `content_type` - Ordinary assembly vs Windows Runtime
    ///
    /// # Panics
    ///
    /// Panics if the name is empty or contains NUL, a version component is the
    /// reserved `0xFFFF` sentinel, `has_public_key` is set with empty key material,
    /// token material is present but not exactly 8 bytes, or `is_retargetable` is
    /// combined with [`AssemblyContentType::WindowsRuntime`].
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        version: AssemblyVersion,
        culture: Option<&str>,
        public_key_or_token: Vec<u8>,
        has_public_key: bool,
        is_retargetable: bool,
        content_type: AssemblyContentType,
    ) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "assembly name must not be empty");
        assert!(
            !name.contains('\0'),
            "assembly name must not contain NUL characters"
        );
        assert!(
            Self::version_in_range(version),
            "version components must not be the reserved 0xFFFF sentinel"
        );
        Self::assert_key_shape(&public_key_or_token, has_public_key);
        assert!(
            !(is_retargetable && content_type == AssemblyContentType::WindowsRuntime),
            "Windows Runtime assemblies cannot be retargetable"
        );

        Self::new_unchecked(
            name,
            version,
            normalize_culture(culture),
            public_key_or_token,
            has_public_key,
            is_retargetable,
            content_type,
        )
    }

    /// Create an assembly identity from deserialized fields, returning an error
    /// instead of panicking.
    ///
    /// This path is tolerant where raw metadata is known to be sloppy: the name may be
    /// empty, version components may carry the `0xFFFF` "unspecified" sentinel, and a
    /// retargetable flag combined with a Windows Runtime content type is coerced to
    /// non-retargetable rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] if the name contains NUL, `has_public_key` is set
    /// with empty key material, or token material is present but not exactly 8 bytes -
    /// shapes that would corrupt comparison semantics rather than merely carry odd
    /// values.
    pub fn try_new(
        name: impl Into<String>,
        version: AssemblyVersion,
        culture: Option<&str>,
        public_key_or_token: Vec<u8>,
        has_public_key: bool,
        is_retargetable: bool,
        content_type: AssemblyContentType,
    ) -> Result<Self> {
        let name = name.into();
        if name.contains('\0') {
            return Err(malformed_error!("Assembly name contains NUL"));
        }
        if has_public_key && public_key_or_token.is_empty() {
            return Err(malformed_error!("Public key flagged but no key bytes present"));
        }
        if !has_public_key
            && !public_key_or_token.is_empty()
            && public_key_or_token.len() != PUBLIC_KEY_TOKEN_SIZE
        {
            return Err(malformed_error!(
                "Public key token must be {} bytes, got {}",
                PUBLIC_KEY_TOKEN_SIZE,
                public_key_or_token.len()
            ));
        }

        let is_retargetable =
            is_retargetable && content_type != AssemblyContentType::WindowsRuntime;

        Ok(Self::new_unchecked(
            name,
            version,
            normalize_culture(culture),
            public_key_or_token,
            has_public_key,
            is_retargetable,
            content_type,
        ))
    }

    /// Construct without validation. Callers guarantee the invariants hold and the
    /// culture is already normalized.
    pub(crate) fn new_unchecked(
        name: String,
        version: AssemblyVersion,
        culture: String,
        public_key_or_token: Vec<u8>,
        has_public_key: bool,
        is_retargetable: bool,
        content_type: AssemblyContentType,
    ) -> Self {
        Self {
            name,
            version,
            culture,
            public_key_or_token,
            has_public_key,
            is_retargetable,
            content_type,
            lazy_token: OnceLock::new(),
            lazy_display_name: OnceLock::new(),
        }
    }

    /// Parse an assembly identity from display-name text.
    ///
    /// Accepts the standard display-name grammar with quoting and escaping (see the
    /// [`display`] module) and returns the identity together with the
    /// [`AssemblyIdentityParts`] bitset recording which fields the text actually
    /// supplied. Absent fields default to version `0.0.0.0`, neutral culture, no key,
    /// not retargetable, and [`AssemblyContentType::Default`] - consult the bitset, not
    /// the defaulted values, when deciding whether a field was constrained.
    ///
    /// # Arguments
    ///
    /// * `text` - Assembly display name, e.g.
    ///   `"mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] for any violation of the display-name grammar;
    /// malformed text is never silently defaulted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use asmbind::{AssemblyIdentity, AssemblyIdentityParts};
    ///
    /// let (identity, parts) = AssemblyIdentity::parse_display_name("System.Xml").unwrap();
    /// assert_eq!(identity.name(), "System.Xml");
    /// assert_eq!(parts, AssemblyIdentityParts::NAME);
    /// ```
    pub fn parse_display_name(text: &str) -> Result<(Self, AssemblyIdentityParts)> {
        display::parser::parse_display_name(text)
    }

    /// The simple assembly name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The four-part version number.
    #[must_use]
    pub fn version(&self) -> AssemblyVersion {
        self.version
    }

    /// The normalized culture name; empty for culture-invariant assemblies.
    #[must_use]
    pub fn culture(&self) -> &str {
        &self.culture
    }

    /// `true` when this assembly is culture-invariant.
    #[must_use]
    pub fn is_neutral_culture(&self) -> bool {
        self.culture.is_empty()
    }

    /// The raw key material: a full public key when [`has_public_key`](Self::has_public_key)
    /// is set, otherwise an 8-byte token (or empty for weak names).
    #[must_use]
    pub fn public_key_or_token(&self) -> &[u8] {
        &self.public_key_or_token
    }

    /// Whether the key material is a full public key rather than a token.
    #[must_use]
    pub fn has_public_key(&self) -> bool {
        self.has_public_key
    }

    /// The full public key, when present.
    #[must_use]
    pub fn public_key(&self) -> Option<&[u8]> {
        self.has_public_key
            .then_some(self.public_key_or_token.as_slice())
    }

    /// The 8-byte public-key token, deriving and memoizing it from the full key on
    /// first access.
    ///
    /// Identities built from a token return it directly; identities built from a full
    /// key compute the token with the CLR SHA-1 algorithm once and cache it. Weak
    /// names return an empty slice.
    #[must_use]
    pub fn public_key_token(&self) -> &[u8] {
        if !self.has_public_key {
            return &self.public_key_or_token;
        }
        self.lazy_token.get_or_init(|| {
            compute_public_key_token(&self.public_key_or_token, HashAlgorithm::Sha1)
        })
    }

    /// Whether a reference with this identity may be retargeted at bind time.
    #[must_use]
    pub fn is_retargetable(&self) -> bool {
        self.is_retargetable
    }

    /// Ordinary assembly vs Windows Runtime component.
    #[must_use]
    pub fn content_type(&self) -> AssemblyContentType {
        self.content_type
    }

    /// `true` when this identity carries any strong-name key material (a full public
    /// key or a non-empty token).
    #[must_use]
    pub fn is_strong_name(&self) -> bool {
        !self.public_key_or_token.is_empty()
    }

    /// The token-form display name, rendered once and memoized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use asmbind::{AssemblyContentType, AssemblyIdentity, AssemblyVersion};
    ///
    /// let identity = AssemblyIdentity::new(
    ///     "MyLibrary",
    ///     AssemblyVersion::new(1, 2, 3, 4),
    ///     Some("en-US"),
    ///     Vec::new(),
    ///     false,
    ///     false,
    ///     AssemblyContentType::Default,
    /// );
    /// assert_eq!(
    ///     identity.display_name(),
    ///     "MyLibrary, Version=1.2.3.4, Culture=en-US, PublicKeyToken=null"
    /// );
    /// ```
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.lazy_display_name
            .get_or_init(|| display::writer::build_display_name(self, false))
    }

    /// The display name carrying the full `PublicKey=` instead of the token.
    ///
    /// Rendered per call; unlike [`display_name`](Self::display_name) this form is not
    /// cached.
    ///
    /// # Panics
    ///
    /// Panics when the identity holds no full public key
    /// ([`has_public_key`](Self::has_public_key) is `false`) - requesting the full-key
    /// rendering of a token-only identity is a caller bug.
    #[must_use]
    pub fn full_key_display_name(&self) -> String {
        assert!(
            self.has_public_key,
            "full-key display name requires a full public key"
        );
        display::writer::build_display_name(self, true)
    }

    /// Version components may be anything except the reserved sentinel.
    fn version_in_range(version: AssemblyVersion) -> bool {
        version.major != AssemblyVersion::UNSPECIFIED_COMPONENT
            && version.minor != AssemblyVersion::UNSPECIFIED_COMPONENT
            && version.build != AssemblyVersion::UNSPECIFIED_COMPONENT
            && version.revision != AssemblyVersion::UNSPECIFIED_COMPONENT
    }

    fn assert_key_shape(material: &[u8], has_public_key: bool) {
        if has_public_key {
            assert!(
                !material.is_empty(),
                "a public key flagged as present must not be empty"
            );
        } else {
            assert!(
                material.is_empty() || material.len() == PUBLIC_KEY_TOKEN_SIZE,
                "a public key token must be exactly {} bytes",
                PUBLIC_KEY_TOKEN_SIZE
            );
        }
    }
}

/// Normalize a culture: `None` and any casing of `"neutral"` become the invariant
/// culture (empty string).
pub(crate) fn normalize_culture(culture: Option<&str>) -> String {
    match culture {
        None => String::new(),
        Some(c) if c.eq_ignore_ascii_case(NEUTRAL_CULTURE) => String::new(),
        Some(c) => c.to_string(),
    }
}

/// Culture equality: ASCII case-insensitive over normalized culture names.
pub(crate) fn cultures_equal(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

impl PartialEq for AssemblyIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.version == other.version
            && cultures_equal(&self.culture, &other.culture)
            && self.public_key_token() == other.public_key_token()
            && self.content_type == other.content_type
            && self.is_retargetable == other.is_retargetable
        // Note: raw key material is deliberately not compared. Identities built from a
        // full key and from its derived token must be equal.
    }
}

impl Eq for AssemblyIdentity {}

impl std::hash::Hash for AssemblyIdentity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.version.hash(state);
        for c in self.culture.chars() {
            c.to_ascii_lowercase().hash(state);
        }
        self.public_key_token().hash(state);
        // Hashing the token (never the raw key) keeps full-key and token-only
        // representations of the same identity in one hash bucket.
    }
}

impl fmt::Display for AssemblyIdentity {
    /// Format assembly identity as its token-form display name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for AssemblyIdentity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_display_name(s).map(|(identity, _)| identity)
    }
}
