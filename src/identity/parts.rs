//! Presence tracking for parsed assembly identity fields.
//!
//! A display name may omit almost every field. Omission is not the same as an explicit
//! default: a reference that never mentions `Culture` matches any culture during
//! comparison, while `Culture=neutral` constrains the definition to the invariant
//! culture. [`AssemblyIdentityParts`] records which fields were actually written in the
//! text, so that callers (most importantly the comparer) can distinguish "constrained to
//! the default value" from "left unspecified".

use bitflags::bitflags;

bitflags! {
    /// Identifies which fields of an assembly identity were explicitly specified in a
    /// display name.
    ///
    /// Produced alongside every parsed identity. The four version components carry
    /// individual flags because a version string may specify only a prefix of them
    /// (`Version=1.2` sets major and minor only) or use wildcards.
    ///
    /// A parse result with only [`NAME`](AssemblyIdentityParts::NAME) set denotes the
    /// weakest possible partial reference (simple-name-only).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AssemblyIdentityParts: u32 {
        /// The simple name was specified (always set by a successful parse)
        const NAME = 1;
        /// The major version component was specified
        const VERSION_MAJOR = 1 << 1;
        /// The minor version component was specified
        const VERSION_MINOR = 1 << 2;
        /// The build version component was specified
        const VERSION_BUILD = 1 << 3;
        /// The revision version component was specified
        const VERSION_REVISION = 1 << 4;
        /// All four version components were specified
        const VERSION = Self::VERSION_MAJOR.bits()
            | Self::VERSION_MINOR.bits()
            | Self::VERSION_BUILD.bits()
            | Self::VERSION_REVISION.bits();
        /// The culture was specified (including an explicit `Culture=neutral`)
        const CULTURE = 1 << 5;
        /// The full public key was specified
        const PUBLIC_KEY = 1 << 6;
        /// The public key token was specified (including an explicit `PublicKeyToken=null`)
        const PUBLIC_KEY_TOKEN = 1 << 7;
        /// Either form of key material was specified
        const PUBLIC_KEY_OR_TOKEN = Self::PUBLIC_KEY.bits() | Self::PUBLIC_KEY_TOKEN.bits();
        /// The retargetable flag was specified
        const RETARGETABILITY = 1 << 8;
        /// The content type was specified
        const CONTENT_TYPE = 1 << 9;
        /// At least one unrecognized `key=value` clause was present
        const UNKNOWN = 1 << 10;
    }
}

impl AssemblyIdentityParts {
    /// Returns `true` if these parts describe a full identity.
    ///
    /// A full identity specifies at minimum the simple name, all four version
    /// components, the culture, and one form of key material. Anything less is a
    /// partial identity, valid only as a comparison reference and never as a
    /// definition.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use asmbind::AssemblyIdentityParts;
    ///
    /// let full = AssemblyIdentityParts::NAME
    ///     | AssemblyIdentityParts::VERSION
    ///     | AssemblyIdentityParts::CULTURE
    ///     | AssemblyIdentityParts::PUBLIC_KEY_TOKEN;
    /// assert!(full.is_full_name());
    /// assert!(!AssemblyIdentityParts::NAME.is_full_name());
    /// ```
    #[must_use]
    pub fn is_full_name(self) -> bool {
        let required = Self::NAME | Self::VERSION | Self::CULTURE;
        self.contains(required) && self.intersects(Self::PUBLIC_KEY_OR_TOKEN)
    }

    /// Returns `true` if any version component was specified.
    #[must_use]
    pub fn has_any_version(self) -> bool {
        self.intersects(Self::VERSION)
    }

    /// Returns `true` if key material was specified in either form.
    #[must_use]
    pub fn has_key_or_token(self) -> bool {
        self.intersects(Self::PUBLIC_KEY_OR_TOKEN)
    }
}
