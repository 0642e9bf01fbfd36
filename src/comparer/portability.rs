//! Portability suppression policy.
//!
//! Portable-profile references normally bind against the matching desktop platform
//! assembly (see [`FrameworkTables`](crate::comparer::FrameworkTables)). An
//! application can opt out of that behavior per public-key-token family through its
//! configuration file:
//!
//! ```xml
//! <configuration>
//!   <runtime>
//!     <assemblyBinding xmlns="urn:schemas-microsoft-com:asm.v1">
//!       <supportPortability PKT="7cec85d7bea7798e" enable="false"/>
//!     </assemblyBinding>
//!   </runtime>
//! </configuration>
//! ```
//!
//! [`AssemblyPortabilityPolicy`] is the already-parsed form of those overrides: a map
//! from token to enabled flag. Absence of an entry means portability is enabled
//! (default-permissive). How the map was obtained is the caller's business; the
//! [`from_app_config`](AssemblyPortabilityPolicy::from_app_config) loader is provided
//! for the common configuration-file shape.

use std::collections::HashMap;

use quick_xml::{events::Event, Reader};

use crate::{identity::strongname::PUBLIC_KEY_TOKEN_SIZE, Result};

/// Configuration element carrying a portability override.
const SUPPORT_PORTABILITY: &[u8] = b"supportPortability";

/// Per-token portability overrides, consulted by the comparer before applying a
/// portable-profile remap.
///
/// Lookup is case-insensitive over the hex token. Entries applied later override
/// earlier ones for the same token (last-write-wins in document order).
///
/// # Thread Safety
///
/// The policy is immutable once populated and is freely shared across concurrent
/// comparisons without locking.
///
/// # Examples
///
/// ```rust
/// use asmbind::AssemblyPortabilityPolicy;
///
/// let mut policy = AssemblyPortabilityPolicy::new();
/// assert!(!policy.is_suppressed("7cec85d7bea7798e"));
///
/// policy.set("7CEC85D7BEA7798E", false);
/// assert!(policy.is_suppressed("7cec85d7bea7798e"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssemblyPortabilityPolicy {
    /// Token (lowercase hex) to enabled flag.
    entries: HashMap<String, bool>,
}

impl AssemblyPortabilityPolicy {
    /// A policy with no overrides: portability enabled for every token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an override for `token_hex`. A later call for the same token replaces
    /// the earlier value.
    pub fn set(&mut self, token_hex: &str, enabled: bool) {
        self.entries.insert(token_hex.to_ascii_lowercase(), enabled);
    }

    /// Whether portability is suppressed for `token_hex`.
    ///
    /// Returns `false` (portability enabled) when no override exists for the token.
    #[must_use]
    pub fn is_suppressed(&self, token_hex: &str) -> bool {
        self.entries
            .get(&token_hex.to_ascii_lowercase())
            .is_some_and(|enabled| !enabled)
    }

    /// Load a policy from application-configuration XML.
    ///
    /// Scans the document for `supportPortability` elements wherever they appear and
    /// applies them in document order. The `PKT` attribute is required and must be a
    /// 16-character hex token; `enable` is optional and defaults to `true`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PolicyXml`](crate::Error::PolicyXml) for XML syntax errors
    /// and [`Error::Malformed`](crate::Error::Malformed) for a missing or invalid
    /// `PKT` attribute or an `enable` value that is not `true`/`false`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use asmbind::AssemblyPortabilityPolicy;
    ///
    /// let policy = AssemblyPortabilityPolicy::from_app_config(
    ///     r#"<configuration><runtime>
    ///          <supportPortability PKT="31bf3856ad364e35" enable="false"/>
    ///        </runtime></configuration>"#,
    /// )
    /// .unwrap();
    /// assert!(policy.is_suppressed("31bf3856ad364e35"));
    /// assert!(!policy.is_suppressed("7cec85d7bea7798e"));
    /// ```
    pub fn from_app_config(xml: &str) -> Result<Self> {
        let mut policy = Self::new();
        let mut reader = Reader::from_str(xml);

        loop {
            match reader.read_event().map_err(crate::Error::PolicyXml)? {
                Event::Start(element) | Event::Empty(element) => {
                    if element.local_name().as_ref() != SUPPORT_PORTABILITY {
                        continue;
                    }

                    let mut token: Option<String> = None;
                    let mut enabled = true;
                    for attribute in element.attributes() {
                        let attribute = attribute.map_err(|e| {
                            malformed_error!("Invalid supportPortability attribute: {}", e)
                        })?;
                        match attribute.key.as_ref() {
                            b"PKT" => {
                                token =
                                    Some(String::from_utf8_lossy(&attribute.value).into_owned());
                            }
                            b"enable" => {
                                enabled = parse_enable(&String::from_utf8_lossy(
                                    &attribute.value,
                                ))?;
                            }
                            _ => {}
                        }
                    }

                    let Some(token) = token else {
                        return Err(malformed_error!(
                            "supportPortability element is missing the PKT attribute"
                        ));
                    };
                    validate_token(&token)?;
                    policy.set(&token, enabled);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(policy)
    }
}

fn parse_enable(value: &str) -> Result<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(malformed_error!("Invalid enable value '{}'", value))
    }
}

fn validate_token(token: &str) -> Result<()> {
    if token.len() != PUBLIC_KEY_TOKEN_SIZE * 2
        || !token.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return Err(malformed_error!("Invalid PKT value '{}'", token));
    }
    Ok(())
}
