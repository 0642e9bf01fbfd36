use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all possible error conditions that can occur while parsing assembly
/// display names, constructing identities from untrusted data, and loading portability
/// policy documents. Each variant provides specific context about the failure mode to
/// enable appropriate error handling.
///
/// Comparison itself never fails for well-formed inputs: every comparison terminates in a
/// [`ComparisonResult`](crate::comparer::ComparisonResult). The only error path on that
/// route is a syntactically invalid reference string, rejected before comparison begins.
///
/// # Error Categories
///
/// ## Text Parsing Errors
/// - [`Error::Malformed`] - Invalid display-name text (bad escape, unterminated quote,
///   duplicate key, invalid version/key/token value, ...)
/// - [`Error::Empty`] - Empty input provided
///
/// ## Policy Loading Errors
/// - [`Error::PolicyXml`] - XML syntax errors from the quick-xml crate while reading an
///   application configuration document
///
/// # Examples
///
/// ```rust
/// use asmbind::{AssemblyIdentity, Error};
///
/// match AssemblyIdentity::parse_display_name("Example, Version=1.0.0.0, Version=2.0.0.0") {
///     Ok(_) => println!("parsed"),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed display name: {} ({}:{})", message, file, line);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The display name or policy document is damaged and could not be parsed.
    ///
    /// This error indicates that the input text does not conform to the assembly
    /// display-name grammar (or, for policy loading, the expected configuration shape).
    /// The error includes the source location where the malformation was detected for
    /// debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Provided input was empty.
    ///
    /// This error occurs when an empty string or buffer is provided where an assembly
    /// display name or configuration document was expected.
    #[error("Provided input was empty")]
    Empty,

    /// XML syntax error from the quick-xml crate during policy loading.
    ///
    /// The quick-xml crate is used to read application-configuration documents that
    /// carry portability overrides. This error wraps any failure from that layer.
    #[error("{0}")]
    PolicyXml(#[from] quick_xml::Error),

    /// Generic error for miscellaneous failures.
    ///
    /// Used for errors that don't fit into other categories or for wrapping external
    /// failures with additional context.
    #[error("{0}")]
    Error(String),
}
