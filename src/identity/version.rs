//! Four-part version numbering for .NET assemblies.
//!
//! Implements the standard .NET assembly versioning scheme with four 16-bit components.
//! Assembly binding treats versions as opaque ordered tuples; this module provides the
//! parsing, packing, and comparison primitives the rest of the crate builds on.
//!
//! Two parsing entry points exist with deliberately different contracts:
//!
//! - [`AssemblyVersion::parse`] - strict parsing for trusted contexts; every supplied
//!   component must be a plain decimal number.
//! - [`AssemblyVersion::parse_with_parts`] - display-name parsing, tolerating missing
//!   components, empty components, and wildcard (`*`) placeholders used in partial
//!   references, while reporting exactly which components the text supplied via
//!   [`AssemblyIdentityParts`].
//!
//! The distinction matters during comparison: `Version=2` and `Version=2.0.0.0` produce
//! the same component values but constrain a definition differently.

use std::{fmt, str::FromStr};

use crate::{identity::parts::AssemblyIdentityParts, Error, Result};

/// Number of bits each version component occupies in the packed representation.
const BITS_PER_COMPONENT: u32 = 16;

/// Four-part version numbering for .NET assemblies.
///
/// # Version Components
///
/// - **Major**: Significant API changes, potentially breaking compatibility
/// - **Minor**: Feature additions, maintaining backward compatibility
/// - **Build**: Bug fixes, patches, and minor improvements
/// - **Revision**: Emergency fixes and hotfixes
///
/// # Component Range
///
/// Each component occupies 16 bits. The value `65535` (`0xFFFF`) is reserved as the
/// metadata "unspecified" sentinel ([`UNSPECIFIED_COMPONENT`](Self::UNSPECIFIED_COMPONENT))
/// and is rejected by both text parsers; the largest component a display name can carry
/// is `65534`.
///
/// # Version Comparison
///
/// Versions are compared component-wise in order: major, minor, build, revision. The
/// packed [`u64`] form ([`pack`](Self::pack)) preserves this ordering, making packed
/// values directly comparable.
///
/// # Examples
///
/// ```rust
/// use asmbind::AssemblyVersion;
///
/// let version = AssemblyVersion::new(4, 0, 30319, 42000);
/// assert_eq!(version.to_string(), "4.0.30319.42000");
///
/// let parsed = AssemblyVersion::parse("2.0.0.0").unwrap();
/// assert!(parsed < version);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssemblyVersion {
    /// Major version component.
    pub major: u16,
    /// Minor version component.
    pub minor: u16,
    /// Build version component.
    pub build: u16,
    /// Revision version component.
    pub revision: u16,
}

impl AssemblyVersion {
    /// The all-zero version (`0.0.0.0`), used as the default when a display name omits
    /// the version entirely.
    ///
    /// Callers that need to distinguish "written as 0.0.0.0" from "omitted" must consult
    /// the [`AssemblyIdentityParts`] bitset returned by
    /// [`parse_with_parts`](Self::parse_with_parts) rather than this value.
    pub const ZERO: Self = Self {
        major: 0,
        minor: 0,
        build: 0,
        revision: 0,
    };

    /// Reserved per-component sentinel meaning "unspecified" in raw assembly metadata.
    ///
    /// Display-name text may never carry this value; it is accepted only by the
    /// tolerant identity constructor for metadata round-tripping.
    pub const UNSPECIFIED_COMPONENT: u16 = u16::MAX;

    /// Create a new assembly version with the specified components.
    ///
    /// # Arguments
    ///
    /// * `major` - Major version component
    /// * `minor` - Minor version component
    /// * `build` - Build version component
    /// * `revision` - Revision version component
    #[must_use]
    pub const fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Pack the four components into a single `u64` for efficient equality and ordering
    /// comparisons.
    ///
    /// The major component occupies the most significant 16 bits, so packed values
    /// order identically to their unpacked counterparts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use asmbind::AssemblyVersion;
    ///
    /// let version = AssemblyVersion::new(1, 2, 3, 4);
    /// assert_eq!(version.pack(), 0x0001_0002_0003_0004);
    /// assert_eq!(AssemblyVersion::unpack(version.pack()), version);
    /// ```
    #[must_use]
    pub const fn pack(self) -> u64 {
        ((self.major as u64) << 48)
            | ((self.minor as u64) << 32)
            | ((self.build as u64) << 16)
            | (self.revision as u64)
    }

    /// Reconstruct a version from its packed `u64` representation.
    #[must_use]
    pub const fn unpack(packed: u64) -> Self {
        Self {
            major: (packed >> 48) as u16,
            minor: (packed >> 32) as u16,
            build: (packed >> 16) as u16,
            revision: packed as u16,
        }
    }

    /// The `(major, minor)` prefix of this version.
    ///
    /// Framework version unification compares this prefix only; build and revision are
    /// ignored when deciding whether a reference unifies to a platform assembly.
    #[must_use]
    pub const fn major_minor(self) -> (u16, u16) {
        (self.major, self.minor)
    }

    /// Parse an assembly version from a strict string representation.
    ///
    /// Supports one to four dot-separated decimal components; omitted trailing
    /// components default to 0. Wildcards and empty components are rejected; use
    /// [`parse_with_parts`](Self::parse_with_parts) for display-name version clauses.
    ///
    /// # Arguments
    ///
    /// * `version_str` - Version string to parse
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] if the string is empty, has more than four
    /// components, or any component is not a decimal number in `[0, 65534]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use asmbind::AssemblyVersion;
    ///
    /// let full = AssemblyVersion::parse("1.2.3.4").unwrap();
    /// assert_eq!(full, AssemblyVersion::new(1, 2, 3, 4));
    ///
    /// let partial = AssemblyVersion::parse("2.0").unwrap();
    /// assert_eq!(partial, AssemblyVersion::new(2, 0, 0, 0));
    ///
    /// assert!(AssemblyVersion::parse("1.*").is_err());
    /// ```
    pub fn parse(version_str: &str) -> Result<Self> {
        let segments: Vec<&str> = version_str.split('.').collect();

        if version_str.is_empty() || segments.len() > 4 {
            return Err(malformed_error!("Invalid version format: {}", version_str));
        }

        let mut components = [0u16; 4];
        for (i, segment) in segments.iter().enumerate() {
            let value = segment
                .parse::<u16>()
                .map_err(|_| malformed_error!("Invalid version component: {}", segment))?;
            if value == Self::UNSPECIFIED_COMPONENT {
                return Err(malformed_error!(
                    "Version component {} is reserved",
                    Self::UNSPECIFIED_COMPONENT
                ));
            }
            components[i] = value;
        }

        Ok(Self::new(
            components[0],
            components[1],
            components[2],
            components[3],
        ))
    }

    /// Parse a display-name version clause, reporting which components were supplied.
    ///
    /// Display-name references may constrain only a prefix of the version, leave
    /// components empty, or use the wildcard `*`:
    ///
    /// - An empty component packs as 0 and sets **no** presence flag, so `".."` parses
    ///   to `0.0.0.0` with an empty bitset while `"0.0.0.0"` parses to the same value
    ///   with all four flags set.
    /// - A wildcard component packs as 0 but sets its presence flag, so `"1.*"`
    ///   constrains major and minor.
    /// - A decimal component must be in `[0, 65534]`; digits mixed with `*`, embedded
    ///   whitespace, or a fifth component are errors.
    ///
    /// # Arguments
    ///
    /// * `text` - The version clause value, already stripped of surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] for more than four components or any component that
    /// is not empty, a lone `*`, or an in-range decimal number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use asmbind::{AssemblyIdentityParts, AssemblyVersion};
    ///
    /// let (version, parts) = AssemblyVersion::parse_with_parts("1.*.2.*").unwrap();
    /// assert_eq!(version, AssemblyVersion::new(1, 0, 2, 0));
    /// assert_eq!(parts, AssemblyIdentityParts::VERSION);
    ///
    /// let (version, parts) = AssemblyVersion::parse_with_parts("...").unwrap();
    /// assert_eq!(version, AssemblyVersion::ZERO);
    /// assert!(parts.is_empty());
    /// ```
    pub fn parse_with_parts(text: &str) -> Result<(Self, AssemblyIdentityParts)> {
        let mut parts = AssemblyIdentityParts::empty();
        let mut packed = 0u64;
        let mut count = 0u32;

        for segment in text.split('.') {
            if count == 4 {
                return Err(malformed_error!(
                    "Version has more than four components: {}",
                    text
                ));
            }

            let mut value = 0u64;
            if segment == "*" {
                parts |= Self::component_flag(count);
            } else if !segment.is_empty() {
                for byte in segment.bytes() {
                    if !byte.is_ascii_digit() {
                        return Err(malformed_error!(
                            "Invalid version component: {}",
                            segment
                        ));
                    }
                    value = value * 10 + u64::from(byte - b'0');
                    if value >= u64::from(Self::UNSPECIFIED_COMPONENT) {
                        return Err(malformed_error!(
                            "Version component out of range: {}",
                            segment
                        ));
                    }
                }
                parts |= Self::component_flag(count);
            }

            packed = (packed << BITS_PER_COMPONENT) | value;
            count += 1;
        }

        packed <<= BITS_PER_COMPONENT * (4 - count);
        Ok((Self::unpack(packed), parts))
    }

    /// The presence flag for the version component at `index` (0 = major).
    fn component_flag(index: u32) -> AssemblyIdentityParts {
        AssemblyIdentityParts::from_bits_truncate(
            AssemblyIdentityParts::VERSION_MAJOR.bits() << index,
        )
    }
}

impl fmt::Display for AssemblyVersion {
    /// Format assembly version as standard dotted notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl FromStr for AssemblyVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_new() {
        let version = AssemblyVersion::new(1, 2, 3, 4);
        assert_eq!(version.major, 1);
        assert_eq!(version.minor, 2);
        assert_eq!(version.build, 3);
        assert_eq!(version.revision, 4);
    }

    #[test]
    fn test_version_pack_unpack_roundtrip() {
        let samples = [
            AssemblyVersion::ZERO,
            AssemblyVersion::new(1, 2, 3, 4),
            AssemblyVersion::new(4, 0, 30319, 42000),
            AssemblyVersion::new(65534, 65534, 65534, 65534),
        ];
        for version in samples {
            assert_eq!(AssemblyVersion::unpack(version.pack()), version);
        }
    }

    #[test]
    fn test_version_packed_ordering_matches_component_ordering() {
        let low = AssemblyVersion::new(1, 9, 9, 9);
        let high = AssemblyVersion::new(2, 0, 0, 0);
        assert!(low < high);
        assert!(low.pack() < high.pack());
    }

    #[test]
    fn test_version_parse_strict_full() {
        let version = AssemblyVersion::parse("4.0.0.0").unwrap();
        assert_eq!(version, AssemblyVersion::new(4, 0, 0, 0));
    }

    #[test]
    fn test_version_parse_strict_partial() {
        assert_eq!(
            AssemblyVersion::parse("1.2.3").unwrap(),
            AssemblyVersion::new(1, 2, 3, 0)
        );
        assert_eq!(
            AssemblyVersion::parse("1.2").unwrap(),
            AssemblyVersion::new(1, 2, 0, 0)
        );
        assert_eq!(
            AssemblyVersion::parse("1").unwrap(),
            AssemblyVersion::new(1, 0, 0, 0)
        );
    }

    #[test]
    fn test_version_parse_strict_invalid() {
        assert!(AssemblyVersion::parse("").is_err());
        assert!(AssemblyVersion::parse("1.2.3.4.5").is_err());
        assert!(AssemblyVersion::parse("1.2.abc.4").is_err());
        assert!(AssemblyVersion::parse("1.2.99999.4").is_err());
        assert!(AssemblyVersion::parse("1.*").is_err());
        assert!(AssemblyVersion::parse("65535").is_err());
    }

    #[test]
    fn test_parse_with_parts_all_components() {
        let (version, parts) = AssemblyVersion::parse_with_parts("1.2.3.4").unwrap();
        assert_eq!(version, AssemblyVersion::new(1, 2, 3, 4));
        assert_eq!(parts, AssemblyIdentityParts::VERSION);
    }

    #[test]
    fn test_parse_with_parts_prefix_only() {
        let (version, parts) = AssemblyVersion::parse_with_parts("1.2").unwrap();
        assert_eq!(version, AssemblyVersion::new(1, 2, 0, 0));
        assert_eq!(
            parts,
            AssemblyIdentityParts::VERSION_MAJOR | AssemblyIdentityParts::VERSION_MINOR
        );
    }

    #[test]
    fn test_parse_with_parts_empty_components_set_no_flags() {
        let (version, parts) = AssemblyVersion::parse_with_parts(".").unwrap();
        assert_eq!(version, AssemblyVersion::ZERO);
        assert!(parts.is_empty());

        let (version, parts) = AssemblyVersion::parse_with_parts("...").unwrap();
        assert_eq!(version, AssemblyVersion::ZERO);
        assert!(parts.is_empty());
    }

    #[test]
    fn test_parse_with_parts_leading_empty_component() {
        // ".5" - major is implied zero without a flag, minor is written.
        let (version, parts) = AssemblyVersion::parse_with_parts(".5").unwrap();
        assert_eq!(version, AssemblyVersion::new(0, 5, 0, 0));
        assert_eq!(parts, AssemblyIdentityParts::VERSION_MINOR);
    }

    #[test]
    fn test_parse_with_parts_explicit_zero_vs_implied_zero() {
        let (_, explicit) = AssemblyVersion::parse_with_parts("0.0.0.0").unwrap();
        assert_eq!(explicit, AssemblyIdentityParts::VERSION);

        let (_, implied) = AssemblyVersion::parse_with_parts("...").unwrap();
        assert!(implied.is_empty());
    }

    #[test]
    fn test_parse_with_parts_wildcards() {
        let (version, parts) = AssemblyVersion::parse_with_parts("1.*.2.*").unwrap();
        assert_eq!(version, AssemblyVersion::new(1, 0, 2, 0));
        assert_eq!(parts, AssemblyIdentityParts::VERSION);

        let (version, parts) = AssemblyVersion::parse_with_parts("*").unwrap();
        assert_eq!(version, AssemblyVersion::ZERO);
        assert_eq!(parts, AssemblyIdentityParts::VERSION_MAJOR);
    }

    #[test]
    fn test_parse_with_parts_rejects_malformed_segments() {
        // Whitespace inside a segment
        assert!(AssemblyVersion::parse_with_parts("1. 2").is_err());
        // Digits mixed with wildcard
        assert!(AssemblyVersion::parse_with_parts("1*").is_err());
        assert!(AssemblyVersion::parse_with_parts("*1").is_err());
        // Double wildcard
        assert!(AssemblyVersion::parse_with_parts("**").is_err());
        // Too many components
        assert!(AssemblyVersion::parse_with_parts("1.2.3.4.5").is_err());
        assert!(AssemblyVersion::parse_with_parts("....").is_err());
        // Component at the reserved sentinel
        assert!(AssemblyVersion::parse_with_parts("65535").is_err());
        // Negative numbers
        assert!(AssemblyVersion::parse_with_parts("-1").is_err());
    }

    #[test]
    fn test_parse_with_parts_accepts_max_component() {
        let (version, _) = AssemblyVersion::parse_with_parts("65534").unwrap();
        assert_eq!(version.major, 65534);
    }

    #[test]
    fn test_version_display() {
        assert_eq!(AssemblyVersion::new(4, 0, 0, 0).to_string(), "4.0.0.0");
        assert_eq!(AssemblyVersion::new(1, 2, 3, 4).to_string(), "1.2.3.4");
    }

    #[test]
    fn test_version_from_str() {
        let version: AssemblyVersion = "4.0.0.0".parse().unwrap();
        assert_eq!(version, AssemblyVersion::new(4, 0, 0, 0));
    }
}
