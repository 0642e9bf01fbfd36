//! Assembly display-name text format.
//!
//! The display name is the sole wire format for assembly identities:
//!
//! ```text
//! SimpleName[, Version=V][, Culture=C][, PublicKeyToken=T|PublicKey=K][, Retargetable=Yes|No][, ContentType=WindowsRuntime]
//! ```
//!
//! This module owns both directions of the format: [`parse_display_name`] turns text
//! into an [`AssemblyIdentity`](crate::AssemblyIdentity) plus the presence bitset, and
//! the (crate-internal) writer renders identities back, applying the same escaping
//! rules in reverse. Parsing and rendering round-trip: for any identity,
//! `parse_display_name(display_name)` reproduces an equal identity.
//!
//! # Module Structure
//!
//! - `lexer` (internal) - character-level scanning: quoting, escaping, trimming
//! - [`parser`] - the `key=value` clause grammar and field validation
//! - `writer` (internal) - serialization with escaping and quoting
//!
//! # Examples
//!
//! ```rust
//! use asmbind::display::parse_display_name;
//!
//! let (identity, parts) = parse_display_name(
//!     "System.Core, Version=3.5.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
//! )?;
//! assert_eq!(identity.name(), "System.Core");
//! assert!(parts.is_full_name());
//! # Ok::<(), asmbind::Error>(())
//! ```

pub use parser::parse_display_name;

mod lexer;
pub mod parser;
pub(crate) mod writer;
