//! The assembly identity comparison engine.
//!
//! Given a *reference* (possibly partial) and a *definition* (always full), the
//! comparer decides whether they denote the same assembly under the desktop binding
//! rules: ordinal name matching, wildcard semantics for unspecified reference fields,
//! retargetable-reference redirects, portable-profile remapping, framework version
//! unification, and the Windows Runtime content-type restrictions.
//!
//! The engine is a pure function of its inputs plus three immutable tables
//! ([`FrameworkTables`]) and a per-application [`AssemblyPortabilityPolicy`]. It never
//! fails on well-formed inputs; every comparison terminates in one of the three
//! [`ComparisonResult`] values. The only error path is a syntactically invalid
//! reference string, rejected by
//! [`compare_display_name`](AssemblyIdentityComparer::compare_display_name) before
//! comparison begins.
//!
//! # Matching Walkthrough
//!
//! 1. Two `mscorlib`-named identities of the same content type are always equivalent.
//! 2. The reference's effective name and token are computed: a retargetable reference
//!    whose name and token match a redirect entry is rewritten to the redirect target,
//!    and a portable-profile reference is rewritten to its platform counterpart unless
//!    policy suppresses it. Windows Runtime references skip both remaps.
//! 3. Names must match ordinally, content types exactly.
//! 4. Culture and key material match wildcard-style when the reference left them
//!    unspecified, exactly otherwise.
//! 5. Versions match exactly, by weak-name tolerance, or through framework
//!    unification - the latter reported via
//!    [`ComparisonOutcome::unification_applied`].
//!
//! # Thread Safety
//!
//! A comparer is immutable after construction; one instance may serve concurrent
//! comparisons from multiple threads without locking.

use std::sync::Arc;

use crate::{
    comparer::{
        frameworks::FrameworkTables, portability::AssemblyPortabilityPolicy,
        reference::AssemblyReference,
    },
    identity::{cultures_equal, AssemblyContentType, AssemblyIdentity, AssemblyIdentityParts},
    Result,
};

/// Simple name that short-circuits comparison entirely.
const MSCORLIB: &str = "mscorlib";

/// Verdict of comparing a reference against a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonResult {
    /// The identities denote different assemblies.
    NotEquivalent,
    /// The identities denote the same strong-named assembly up to its version, and the
    /// caller asked for versions to be ignored.
    EquivalentIgnoringVersion,
    /// The identities denote the same assembly.
    Equivalent,
}

/// Result record of a comparison: the verdict plus whether framework version
/// unification was applied to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonOutcome {
    /// The comparison verdict.
    pub result: ComparisonResult,
    /// `true` when the verdict is [`ComparisonResult::Equivalent`] by virtue of the
    /// framework unification table rather than exact version equality.
    pub unification_applied: bool,
}

impl ComparisonOutcome {
    const NOT_EQUIVALENT: Self = Self {
        result: ComparisonResult::NotEquivalent,
        unification_applied: false,
    };

    const EQUIVALENT: Self = Self {
        result: ComparisonResult::Equivalent,
        unification_applied: false,
    };

    const EQUIVALENT_IGNORING_VERSION: Self = Self {
        result: ComparisonResult::EquivalentIgnoringVersion,
        unification_applied: false,
    };

    const UNIFIED: Self = Self {
        result: ComparisonResult::Equivalent,
        unification_applied: true,
    };

    /// `true` for any verdict other than [`ComparisonResult::NotEquivalent`].
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.result != ComparisonResult::NotEquivalent
    }
}

/// The comparison engine.
///
/// Holds the application's [`AssemblyPortabilityPolicy`] and a shared reference to the
/// static [`FrameworkTables`]. The default comparer uses an empty policy (portability
/// enabled everywhere) and the built-in desktop tables.
///
/// # Examples
///
/// ```rust
/// use asmbind::{AssemblyIdentityComparer, ComparisonResult};
///
/// let comparer = AssemblyIdentityComparer::default();
/// let (definition, _) = asmbind::AssemblyIdentity::parse_display_name(
///     "System.Net, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b03f5f7f11d50a3a",
/// )?;
///
/// let outcome = comparer.compare_display_name(
///     "System.Net, Version=2.0.0.0, Culture=neutral, PublicKeyToken=b03f5f7f11d50a3a",
///     &definition,
///     false,
/// )?;
/// assert_eq!(outcome.result, ComparisonResult::Equivalent);
/// assert!(outcome.unification_applied);
/// # Ok::<(), asmbind::Error>(())
/// ```
#[derive(Debug)]
pub struct AssemblyIdentityComparer {
    policy: AssemblyPortabilityPolicy,
    tables: Arc<FrameworkTables>,
}

impl Default for AssemblyIdentityComparer {
    fn default() -> Self {
        Self::new(AssemblyPortabilityPolicy::new())
    }
}

impl AssemblyIdentityComparer {
    /// Create a comparer over the built-in desktop tables with the given policy.
    #[must_use]
    pub fn new(policy: AssemblyPortabilityPolicy) -> Self {
        Self {
            policy,
            tables: FrameworkTables::desktop(),
        }
    }

    /// Create a comparer over custom tables, for hosts with their own unification or
    /// retargeting configuration (and for tests).
    #[must_use]
    pub fn with_tables(policy: AssemblyPortabilityPolicy, tables: Arc<FrameworkTables>) -> Self {
        Self { policy, tables }
    }

    /// Parse `reference` and compare it against `definition`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`](crate::Error::Malformed) (or
    /// [`Error::Empty`](crate::Error::Empty)) when the reference text is
    /// syntactically invalid. A malformed reference is a hard error, never silently
    /// reported as [`ComparisonResult::NotEquivalent`].
    pub fn compare_display_name(
        &self,
        reference: &str,
        definition: &AssemblyIdentity,
        ignore_version: bool,
    ) -> Result<ComparisonOutcome> {
        let reference = AssemblyReference::parse(reference)?;
        Ok(self.compare(&reference, definition, ignore_version))
    }

    /// Compare a reference against a definition.
    ///
    /// # Arguments
    ///
    /// * `reference` - The (possibly partial) reference
    /// * `definition` - The full identity of the candidate assembly
    /// * `ignore_version` - Suppress version checking; a strong-named match is then
    ///   reported as [`ComparisonResult::EquivalentIgnoringVersion`]
    #[must_use]
    pub fn compare(
        &self,
        reference: &AssemblyReference,
        definition: &AssemblyIdentity,
        ignore_version: bool,
    ) -> ComparisonOutcome {
        let parts = reference.parts();
        let ref_id = reference.identity();

        // Any mscorlib matches any other mscorlib, no matter the version, culture, or
        // key - unless exactly one side is a Windows Runtime identity, which falls
        // through to the ordinary rules (and fails on content type there).
        if ref_id.name() == MSCORLIB
            && definition.name() == MSCORLIB
            && ref_id.content_type() == definition.content_type()
        {
            return ComparisonOutcome::EQUIVALENT;
        }

        // Compute the effective reference name and token: retargetable redirects and
        // portable-profile pairs may rewrite both before any field is compared.
        // Windows Runtime identities take part in neither.
        let mut effective_name = ref_id.name();
        let mut effective_token: &[u8] = ref_id.public_key_token();

        if ref_id.content_type() == AssemblyContentType::Default {
            if ref_id.is_retargetable() {
                if let Some(redirect) = self.tables.retarget(effective_name) {
                    if !parts.has_key_or_token() {
                        // A retargetable reference that pins no key is necessarily
                        // partial (full references always carry key material), and a
                        // partial retargetable reference cannot be redirected safely.
                        return ComparisonOutcome::NOT_EQUIVALENT;
                    }
                    if effective_token == redirect.source_token.as_slice() {
                        effective_name = &redirect.target_name;
                        effective_token = &redirect.target_token;
                    }
                    // A specified token that differs from the redirect source leaves
                    // the reference as an ordinary, non-redirected one.
                }
            }

            if let Some(pair) = self.tables.portability_pair(effective_name, effective_token) {
                if !self.policy.is_suppressed(&hex::encode(effective_token)) {
                    effective_name = &pair.platform_name;
                    effective_token = &pair.platform_token;
                }
            }
        }

        if effective_name != definition.name() {
            return ComparisonOutcome::NOT_EQUIVALENT;
        }

        if ref_id.content_type() != definition.content_type() {
            return ComparisonOutcome::NOT_EQUIVALENT;
        }

        if parts.contains(AssemblyIdentityParts::CULTURE)
            && !cultures_equal(ref_id.culture(), definition.culture())
        {
            return ComparisonOutcome::NOT_EQUIVALENT;
        }

        let key_specified = parts.has_key_or_token();
        if key_specified && effective_token != definition.public_key_token() {
            // Covers both a token mismatch and a weak/strong asymmetry; a pair of
            // empty tokens compares equal here.
            return ComparisonOutcome::NOT_EQUIVALENT;
        }

        // Name, content type, culture, and key all agree; versions decide.
        //
        // When the reference specified a key its token equals the definition's, so the
        // definition's strongness speaks for both sides; when it left the key
        // unspecified, the weak-name tolerance only applies if the definition itself
        // is weak.
        let strong = definition.is_strong_name();

        if ignore_version {
            return if strong {
                ComparisonOutcome::EQUIVALENT_IGNORING_VERSION
            } else {
                ComparisonOutcome::EQUIVALENT
            };
        }

        if !parts.has_any_version() {
            return ComparisonOutcome::EQUIVALENT;
        }

        if ref_id.version() == definition.version() {
            return ComparisonOutcome::EQUIVALENT;
        }

        if !strong {
            // Partial weak references tolerate any version; full weak references
            // require exact equality but still get a shot at platform unification.
            if !parts.is_full_name() {
                return ComparisonOutcome::EQUIVALENT;
            }
            return self.unify(ref_id, definition);
        }

        self.unify(ref_id, definition)
    }

    /// Attempt framework version unification of `ref_id` against `definition`.
    ///
    /// Only the major and minor components participate. The reference version must
    /// not exceed the platform version recorded for the definition's simple name, nor
    /// the actual definition version. Windows Runtime definitions never unify even
    /// when their simple name appears in the table.
    fn unify(
        &self,
        ref_id: &AssemblyIdentity,
        definition: &AssemblyIdentity,
    ) -> ComparisonOutcome {
        if definition.content_type() == AssemblyContentType::WindowsRuntime {
            return ComparisonOutcome::NOT_EQUIVALENT;
        }

        let Some(platform_version) = self.tables.framework_version(definition.name()) else {
            return ComparisonOutcome::NOT_EQUIVALENT;
        };

        let reference = ref_id.version().major_minor();
        if reference > platform_version.major_minor() {
            return ComparisonOutcome::NOT_EQUIVALENT;
        }
        if reference <= definition.version().major_minor() {
            return ComparisonOutcome::UNIFIED;
        }
        ComparisonOutcome::NOT_EQUIVALENT
    }
}
