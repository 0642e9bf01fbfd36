//! Assembly identity comparison and binding policy.
//!
//! This module decides whether a *reference* (a dependency declaration, possibly
//! partial) and a *definition* (the authoritative identity of an actual assembly)
//! refer to the same assembly, under the versioning, culture, strong-name,
//! retargeting, and portability rules of the desktop binder.
//!
//! # Key Components
//!
//! - [`AssemblyIdentityComparer`] - The comparison engine
//! - [`AssemblyReference`] - A possibly-partial reference plus its presence bitset
//! - [`ComparisonResult`] / [`ComparisonOutcome`] - Verdict and unification flag
//! - [`AssemblyPortabilityPolicy`] - Per-token portability overrides
//! - [`FrameworkTables`] - Static unification / retargeting / portability tables
//!
//! # Example
//!
//! ```rust
//! use asmbind::{AssemblyIdentity, AssemblyIdentityComparer, ComparisonResult};
//!
//! let comparer = AssemblyIdentityComparer::default();
//! let (definition, _) = AssemblyIdentity::parse_display_name(
//!     "System.Core, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
//! )?;
//!
//! // A partial reference matches via wildcard fields and version unification.
//! let outcome = comparer.compare_display_name("System.Core", &definition, false)?;
//! assert_eq!(outcome.result, ComparisonResult::Equivalent);
//! # Ok::<(), asmbind::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! Everything here is immutable after construction. One comparer, one policy, and the
//! shared [`FrameworkTables`] may serve concurrent comparisons without locking.

pub use engine::{AssemblyIdentityComparer, ComparisonOutcome, ComparisonResult};
pub use frameworks::{
    FrameworkTables, PortabilityPair, RetargetRedirect, COMPACT_FRAMEWORK_TOKEN, ECMA_TOKEN,
    FRAMEWORK_TOKEN, SILVERLIGHT_LIBRARY_TOKEN, SILVERLIGHT_PLATFORM_TOKEN,
};
pub use portability::AssemblyPortabilityPolicy;
pub use reference::AssemblyReference;

mod engine;
mod frameworks;
mod portability;
mod reference;
