//! # asmbind Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and
//! traits of the crate. Import it with a glob to bring identity parsing and
//! comparison into scope in one line:
//!
//! ```rust
//! use asmbind::prelude::*;
//!
//! let (identity, parts) = AssemblyIdentity::parse_display_name(
//!     "System.Xml, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
//! )?;
//! assert!(parts.is_full_name());
//!
//! let comparer = AssemblyIdentityComparer::default();
//! let outcome = comparer.compare_display_name("System.Xml", &identity, false)?;
//! assert!(outcome.is_match());
//! # Ok::<(), asmbind::Error>(())
//! ```

pub use crate::{
    comparer::{
        AssemblyIdentityComparer, AssemblyPortabilityPolicy, AssemblyReference,
        ComparisonOutcome, ComparisonResult, FrameworkTables,
    },
    display::parse_display_name,
    identity::{
        AssemblyContentType, AssemblyIdentity, AssemblyIdentityParts, AssemblyVersion,
    },
    Error, Result,
};
