//! Static framework binding tables.
//!
//! The desktop runtime ships three small, fixed tables that the comparison engine
//! consults:
//!
//! - **Framework unification**: well-known framework assembly simple names with the
//!   platform version they unify to. A strong-named reference whose version is at or
//!   below the platform version binds to the platform's copy instead of failing on an
//!   exact-version mismatch.
//! - **Retargetable redirects**: (source name, source token) pairs redirected to a
//!   desktop assembly, used for `Retargetable=Yes` references originating from the
//!   Compact Framework and Silverlight.
//! - **Portability pairs**: (name, portable token) pairs mapped to the desktop
//!   platform token, used to bind portable-profile references against desktop
//!   assemblies unless an [`AssemblyPortabilityPolicy`](crate::AssemblyPortabilityPolicy)
//!   suppresses it for the token family.
//!
//! All three tables are immutable associative data built once on first use and shared
//! by reference; custom tables can be constructed with [`FrameworkTables::empty`] and
//! the `add_*` methods and injected into a comparer for testing.

use std::{
    collections::HashMap,
    sync::{Arc, OnceLock},
};

use crate::identity::AssemblyVersion;

/// Public key token of ECMA / CLR platform assemblies (`mscorlib`, `System`, ...).
pub const ECMA_TOKEN: [u8; 8] = [0xb7, 0x7a, 0x5c, 0x56, 0x19, 0x34, 0xe0, 0x89];

/// Public key token of the extended framework assemblies (`System.Drawing`,
/// `System.Web.Services`, ...).
pub const FRAMEWORK_TOKEN: [u8; 8] = [0xb0, 0x3f, 0x5f, 0x7f, 0x11, 0xd5, 0x0a, 0x3a];

/// Public key token of the Silverlight platform assemblies.
pub const SILVERLIGHT_PLATFORM_TOKEN: [u8; 8] = [0x7c, 0xec, 0x85, 0xd7, 0xbe, 0xa7, 0x79, 0x8e];

/// Public key token of the Silverlight library assemblies.
pub const SILVERLIGHT_LIBRARY_TOKEN: [u8; 8] = [0x31, 0xbf, 0x38, 0x56, 0xad, 0x36, 0x4e, 0x35];

/// Public key token of the Compact Framework assemblies.
pub const COMPACT_FRAMEWORK_TOKEN: [u8; 8] = [0x96, 0x9d, 0xb8, 0x05, 0x3d, 0x33, 0x22, 0xac];

/// The desktop platform version every unified framework assembly carries.
const PLATFORM_VERSION: AssemblyVersion = AssemblyVersion::new(4, 0, 0, 0);

/// Framework assembly simple names that participate in platform version unification.
const FRAMEWORK_ASSEMBLIES: &[&str] = &[
    "mscorlib",
    "Microsoft.CSharp",
    "Microsoft.VisualBasic",
    "System",
    "System.ComponentModel.Composition",
    "System.Configuration",
    "System.Core",
    "System.Data",
    "System.Data.DataSetExtensions",
    "System.Drawing",
    "System.IO.Compression",
    "System.Net",
    "System.Net.Http",
    "System.Numerics",
    "System.Numerics.Vectors",
    "System.Runtime",
    "System.Runtime.Handles",
    "System.Runtime.InteropServices",
    "System.Runtime.Serialization",
    "System.ServiceModel",
    "System.Transactions",
    "System.Web.Services",
    "System.Windows.Forms",
    "System.Xml",
    "System.Xml.Linq",
    "WindowsBase",
];

/// A retargetable-reference redirect: a reference to `source_name` signed with
/// `source_token` is rewritten to `target_name`/`target_token` before matching.
#[derive(Debug, Clone)]
pub struct RetargetRedirect {
    /// Simple name the retargetable reference carries.
    pub source_name: String,
    /// Token the reference must carry for the redirect to apply.
    pub source_token: Vec<u8>,
    /// Simple name of the desktop assembly the reference is redirected to.
    pub target_name: String,
    /// Token of the desktop assembly.
    pub target_token: Vec<u8>,
}

/// A portable-profile / platform assembly pair: a reference to `name` signed with
/// `portable_token` may bind to `platform_name`/`platform_token`.
#[derive(Debug, Clone)]
pub struct PortabilityPair {
    /// Simple name of the portable-profile assembly.
    pub name: String,
    /// Token of the portable-profile assembly.
    pub portable_token: Vec<u8>,
    /// Simple name of the platform assembly (usually identical to `name`).
    pub platform_name: String,
    /// Token of the platform assembly.
    pub platform_token: Vec<u8>,
}

/// The three static binding tables, bundled for injection into a comparer.
///
/// # Thread Safety
///
/// Instances are immutable once shared; [`FrameworkTables::desktop`] hands out one
/// process-wide [`Arc`] that concurrent comparers use without locking.
#[derive(Debug, Default)]
pub struct FrameworkTables {
    unification: HashMap<String, AssemblyVersion>,
    retargets: HashMap<String, RetargetRedirect>,
    portability: Vec<PortabilityPair>,
}

impl FrameworkTables {
    /// The built-in desktop framework tables, constructed on first use and shared.
    pub fn desktop() -> Arc<Self> {
        static DESKTOP: OnceLock<Arc<FrameworkTables>> = OnceLock::new();
        DESKTOP.get_or_init(|| Arc::new(Self::build_desktop())).clone()
    }

    /// An empty table set, the starting point for custom tables in tests.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register `name` as a framework assembly unifying to `platform_version`.
    pub fn add_framework_assembly(
        &mut self,
        name: impl Into<String>,
        platform_version: AssemblyVersion,
    ) {
        self.unification.insert(name.into(), platform_version);
    }

    /// Register a retargetable redirect, keyed by its source simple name.
    pub fn add_retarget(&mut self, redirect: RetargetRedirect) {
        self.retargets
            .insert(redirect.source_name.clone(), redirect);
    }

    /// Register a portable-profile / platform pair.
    pub fn add_portability_pair(&mut self, pair: PortabilityPair) {
        self.portability.push(pair);
    }

    /// The platform version `name` unifies to, when `name` is a framework assembly.
    #[must_use]
    pub fn framework_version(&self, name: &str) -> Option<AssemblyVersion> {
        self.unification.get(name).copied()
    }

    /// The redirect for retargetable references named `name`, if any.
    #[must_use]
    pub fn retarget(&self, name: &str) -> Option<&RetargetRedirect> {
        self.retargets.get(name)
    }

    /// The portability pair matching `(name, token)`, if any.
    #[must_use]
    pub fn portability_pair(&self, name: &str, token: &[u8]) -> Option<&PortabilityPair> {
        self.portability
            .iter()
            .find(|pair| pair.name == name && pair.portable_token == token)
    }

    fn build_desktop() -> Self {
        let mut tables = Self::empty();

        for name in FRAMEWORK_ASSEMBLIES {
            tables.add_framework_assembly(*name, PLATFORM_VERSION);
        }

        // Compact Framework assemblies retargeting to their desktop counterparts.
        // Entries follow the runtime's retargeting configuration: ECMA-keyed core
        // assemblies redirect to the ECMA token, the extended set to the framework
        // token. The DataGrid assembly folds into System.Windows.Forms.
        let compact = [
            ("mscorlib", ECMA_TOKEN),
            ("System", ECMA_TOKEN),
            ("System.Data", ECMA_TOKEN),
            ("System.Drawing", FRAMEWORK_TOKEN),
            ("System.Web.Services", FRAMEWORK_TOKEN),
            ("System.Windows.Forms", ECMA_TOKEN),
            ("System.Xml", ECMA_TOKEN),
            ("Microsoft.VisualBasic", FRAMEWORK_TOKEN),
        ];
        for (name, target_token) in compact {
            tables.add_retarget(RetargetRedirect {
                source_name: name.to_string(),
                source_token: COMPACT_FRAMEWORK_TOKEN.to_vec(),
                target_name: name.to_string(),
                target_token: target_token.to_vec(),
            });
        }
        tables.add_retarget(RetargetRedirect {
            source_name: "System.Windows.Forms.DataGrid".to_string(),
            source_token: COMPACT_FRAMEWORK_TOKEN.to_vec(),
            target_name: "System.Windows.Forms".to_string(),
            target_token: ECMA_TOKEN.to_vec(),
        });

        // Silverlight platform assemblies binding portably against the desktop.
        let platform_portable = [
            ("mscorlib", ECMA_TOKEN),
            ("System", ECMA_TOKEN),
            ("System.Core", ECMA_TOKEN),
            ("System.Net", FRAMEWORK_TOKEN),
            ("System.Runtime.Serialization", ECMA_TOKEN),
            ("System.Windows.Forms", ECMA_TOKEN),
            ("System.Xml", ECMA_TOKEN),
        ];
        for (name, platform_token) in platform_portable {
            tables.add_portability_pair(PortabilityPair {
                name: name.to_string(),
                portable_token: SILVERLIGHT_PLATFORM_TOKEN.to_vec(),
                platform_name: name.to_string(),
                platform_token: platform_token.to_vec(),
            });
        }

        // Silverlight library assemblies carry their own token family.
        let library_portable = [
            ("System.ServiceModel.Web", FRAMEWORK_TOKEN),
            ("System.Xml.Linq", FRAMEWORK_TOKEN),
            ("System.Xml.Serialization", FRAMEWORK_TOKEN),
        ];
        for (name, platform_token) in library_portable {
            tables.add_portability_pair(PortabilityPair {
                name: name.to_string(),
                portable_token: SILVERLIGHT_LIBRARY_TOKEN.to_vec(),
                platform_name: name.to_string(),
                platform_token: platform_token.to_vec(),
            });
        }

        tables
    }
}
