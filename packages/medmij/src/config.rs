//! Configuration constants for the zorgaanbiederslijst client.

/// XML namespace of the zorgaanbiederslijst, release 2.
///
/// Every element of the list document is qualified with this namespace,
/// and the embedded schema is bound to it.
pub const ZORGAANBIEDERSLIJST_NAMESPACE: &str =
    "xmlns://afsprakenstelsel.medmij.nl/zorgaanbiederslijst/release2/";

/// Default URL of the published zorgaanbiederslijst.
///
/// The list is served by the MedMij stelselnode. Deployments against the
/// acceptance environment pass their own URL via the CLI `--url` flag.
pub const DEFAULT_LIJST_URL: &str =
    "https://stelselnode.medmij.nl/zorgaanbiederslijst/Zorgaanbiederslijst.xml";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Maximum HTTP response size in bytes (10 MB).
///
/// The published list is well under a megabyte; anything larger than this
/// limit is treated as a broken response rather than downloaded into memory.
pub const MAX_RESPONSE_SIZE: u64 = 10 * 1024 * 1024;

/// Suffix that marks a zorgaanbiedernaam as a MedMij registry member.
pub const ZORGAANBIEDERNAAM_SUFFIX: &str = "@medmij";

/// Check whether a name follows the MedMij naming convention.
///
/// Names on the list end with `@medmij` by convention. The parser does not
/// enforce this; the helper exists for callers that want to warn about
/// lookups which can never match.
///
/// # Examples
/// ```
/// use medmij::config::is_medmij_naam;
///
/// assert!(is_medmij_naam("umcharderwijk@medmij"));
/// assert!(!is_medmij_naam("umcharderwijk"));
/// ```
pub fn is_medmij_naam(naam: &str) -> bool {
    naam.ends_with(ZORGAANBIEDERNAAM_SUFFIX)
}
