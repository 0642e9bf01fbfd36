//! Assembly identity model for .NET binding and resolution.
//!
//! This module provides the canonical structured representation of an assembly
//! identity, the presence bitset that distinguishes partial references from full
//! definitions, four-part version handling, and strong-name token derivation.
//!
//! # ECMA-335 References
//!
//! This module implements identity concepts defined in the ECMA-335 specification:
//! - **Section II.6.1**: Overview of assemblies - identity components
//! - **Section II.6.2.1**: Assembly versioning - four-part version semantics
//! - **Section II.6.2.1.3**: PublicKeyToken - token derivation from the public key
//! - **Section II.6.3**: Referencing assemblies - reference vs definition identities
//!
//! See: <https://ecma-international.org/publications-and-standards/standards/ecma-335/>
//!
//! # Key Components
//!
//! - [`AssemblyIdentity`] - Immutable canonical identity (name, version, culture, key
//!   material, retargetability, content type)
//! - [`AssemblyContentType`] - Ordinary assembly vs Windows Runtime component
//! - [`AssemblyIdentityParts`] - Which fields a display name actually supplied
//! - [`AssemblyVersion`] - Four-part version with packing and wildcard-aware parsing
//! - [`strongname`] - Public-key token derivation (SHA-1 / MD5)
//!
//! # Thread Safety
//!
//! All types in this module are immutable after construction and implement [`Send`]
//! and [`Sync`]. Identities serve as keys in shared collections and may be compared
//! concurrently without synchronization.

pub use assembly::{AssemblyContentType, AssemblyIdentity};
pub use parts::AssemblyIdentityParts;
pub use version::AssemblyVersion;

pub(crate) use assembly::{cultures_equal, normalize_culture, NEUTRAL_CULTURE};

mod assembly;
mod parts;
pub mod strongname;
mod version;
