// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(clippy::too_many_arguments)]

//! # asmbind
//!
//! [![Crates.io](https://img.shields.io/crates/v/asmbind.svg)](https://crates.io/crates/asmbind)
//! [![Documentation](https://docs.rs/asmbind/badge.svg)](https://docs.rs/asmbind)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/asmbind/blob/main/LICENSE-APACHE)
//!
//! Assembly identity parsing and binding comparison for .NET assemblies. Built in pure
//! Rust, `asmbind` parses strong- and weak-name display strings into canonical
//! identities and decides whether a reference and a definition denote the same
//! assembly under the desktop binder's rules - without requiring Windows or the .NET
//! runtime.
//!
//! ## Features
//!
//! - **📛 Full display-name grammar** - quoting, escaping (`\,` `\uXXXX;` ...),
//!   wildcards, partial references, and bit-exact round-tripping
//! - **🔍 Presence tracking** - every parse reports exactly which fields the text
//!   supplied, so wildcard comparison semantics are never guessed
//! - **⚖️ Binding comparison** - exact matching, weak-name version tolerance,
//!   framework version unification, retargetable redirects, portable-profile
//!   remapping, and Windows Runtime content-type rules
//! - **🔐 Strong names** - SHA-1 (and MD5) public-key token derivation per ECMA-335,
//!   memoized per identity
//! - **🛡️ Memory safe** - pure Rust with comprehensive, typed error handling
//!
//! ## Quick Start
//!
//! Add `asmbind` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! asmbind = "0.2"
//! ```
//!
//! ### Using the Prelude
//!
//! ```rust
//! use asmbind::prelude::*;
//!
//! let (definition, _) = AssemblyIdentity::parse_display_name(
//!     "System.Net, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b03f5f7f11d50a3a",
//! )?;
//!
//! let comparer = AssemblyIdentityComparer::default();
//! let outcome = comparer.compare_display_name(
//!     "System.Net, Version=2.0.0.0, Culture=neutral, PublicKeyToken=b03f5f7f11d50a3a",
//!     &definition,
//!     false,
//! )?;
//!
//! assert_eq!(outcome.result, ComparisonResult::Equivalent);
//! assert!(outcome.unification_applied);
//! # Ok::<(), asmbind::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `asmbind` is organized into three modules:
//!
//! - [`identity`] - The canonical [`AssemblyIdentity`] value type, the
//!   [`AssemblyIdentityParts`] presence bitset, four-part versions, and strong-name
//!   token derivation
//! - [`display`] - The display-name text format: lexing, parsing, and serialization
//! - [`comparer`] - The comparison engine, static framework tables, and the
//!   portability policy
//!
//! ### References vs Definitions
//!
//! A *reference* is an identity as written in a dependency declaration; it may be
//! partial (missing version, culture, or key). A *definition* is the full identity of
//! an actual assembly. The comparer takes a reference (with its presence bitset) and
//! a definition, and produces a [`ComparisonOutcome`]: one of three verdicts plus a
//! flag recording whether framework version unification was applied.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result). Malformed display
//! names are always surfaced as [`Error::Malformed`] - never silently defaulted and
//! never reported as a failed match:
//!
//! ```rust
//! use asmbind::{AssemblyIdentity, Error};
//!
//! match AssemblyIdentity::parse_display_name("Lib, PublicKeyToken=tooshort") {
//!     Ok(_) => unreachable!(),
//!     Err(Error::Malformed { message, .. }) => println!("rejected: {message}"),
//!     Err(e) => println!("other error: {e}"),
//! }
//! ```
//!
//! Strict constructors ([`AssemblyIdentity::new`]) panic on invalid field
//! combinations instead - those are caller bugs, not data errors - while
//! [`AssemblyIdentity::try_new`] covers the tolerant deserialization path.
//!
//! ## Thread Safety
//!
//! Identities, references, comparers, policies, and the static framework tables are
//! all immutable after construction and freely shareable across threads. Lazily
//! derived fields (public-key token, display name) memoize idempotently.

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use asmbind::prelude::*;
///
/// let comparer = AssemblyIdentityComparer::default();
/// let (definition, _) = AssemblyIdentity::parse_display_name("Example")?;
/// assert!(comparer.compare_display_name("Example", &definition, false)?.is_match());
/// # Ok::<(), asmbind::Error>(())
/// ```
pub mod prelude;

/// Assembly identity model: canonical identities, presence bitsets, versions, and
/// strong-name token derivation.
///
/// # Key Types
///
/// - [`identity::AssemblyIdentity`] - Immutable canonical identity
/// - [`identity::AssemblyIdentityParts`] - Which fields a display name supplied
/// - [`identity::AssemblyVersion`] - Four-part version with `u64` packing
/// - [`identity::AssemblyContentType`] - Ordinary assembly vs Windows Runtime
///
/// # Example
///
/// ```rust
/// use asmbind::identity::{AssemblyContentType, AssemblyIdentity, AssemblyVersion};
///
/// let identity = AssemblyIdentity::new(
///     "MyLibrary",
///     AssemblyVersion::new(1, 0, 0, 0),
///     None,
///     Vec::new(),
///     false,
///     false,
///     AssemblyContentType::Default,
/// );
/// assert_eq!(
///     identity.display_name(),
///     "MyLibrary, Version=1.0.0.0, Culture=neutral, PublicKeyToken=null"
/// );
/// ```
pub mod identity;

/// The assembly display-name text format: parsing and serialization with the full
/// quoting and escaping grammar.
///
/// # Example
///
/// ```rust
/// use asmbind::display::parse_display_name;
///
/// let (identity, _) = parse_display_name("'My, Odd=Name', Version=1.0")?;
/// assert_eq!(identity.name(), "My, Odd=Name");
/// # Ok::<(), asmbind::Error>(())
/// ```
pub mod display;

/// Assembly identity comparison: the engine, static framework tables, and the
/// portability policy.
///
/// # Key Types
///
/// - [`comparer::AssemblyIdentityComparer`] - The comparison engine
/// - [`comparer::AssemblyReference`] - A possibly-partial reference
/// - [`comparer::ComparisonOutcome`] - Verdict plus unification flag
/// - [`comparer::AssemblyPortabilityPolicy`] - Per-token portability overrides
pub mod comparer;

/// `asmbind` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always
/// [`Error`]. This is used consistently throughout the crate for all fallible
/// operations.
///
/// # Examples
///
/// ```rust
/// use asmbind::{AssemblyIdentity, Result};
///
/// fn parse(text: &str) -> Result<AssemblyIdentity> {
///     AssemblyIdentity::parse_display_name(text).map(|(identity, _)| identity)
/// }
/// # assert!(parse("Example").is_ok());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `asmbind` Error type
///
/// The main error type for all operations in this crate. Provides detailed error
/// information for display-name parsing, tolerant identity construction, and
/// portability policy loading.
pub use error::Error;

pub use comparer::{
    AssemblyIdentityComparer, AssemblyPortabilityPolicy, AssemblyReference, ComparisonOutcome,
    ComparisonResult,
};
pub use identity::{
    AssemblyContentType, AssemblyIdentity, AssemblyIdentityParts, AssemblyVersion,
};
