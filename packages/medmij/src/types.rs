//! Core data types for the zorgaanbiederslijst.
//!
//! These types are constructed once during parsing and never mutated
//! afterwards. They carry no references back to the document they came
//! from, so a parsed collection is safe to share between threads.

use std::collections::BTreeMap;

use serde::Serialize;
use url::Url;

/// Een gegevensdienst zoals beschreven op <https://afsprakenstelsel.medmij.nl/>.
///
/// A data service offered by a zorgaanbieder, exposing the OAuth endpoints
/// a client needs to start an authorization flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gegevensdienst {
    /// Id of the gegevensdienst, unique within its zorgaanbieder.
    pub id: String,

    /// Name of the zorgaanbieder offering this gegevensdienst.
    ///
    /// Ends with `@medmij` by convention.
    pub zorgaanbiedernaam: String,

    /// OAuth authorization endpoint of this gegevensdienst.
    pub authorization_endpoint_uri: Url,

    /// OAuth token endpoint of this gegevensdienst.
    pub token_endpoint_uri: Url,
}

/// Een zorgaanbieder (care offerer) on the lijst.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zorgaanbieder {
    /// Name of the zorgaanbieder, unique across the whole lijst.
    pub naam: String,

    /// Gegevensdiensten keyed by their id.
    pub gegevensdiensten: BTreeMap<String, Gegevensdienst>,
}

impl Zorgaanbieder {
    /// Get the gegevensdienst with the given id, if present.
    #[must_use]
    pub fn gegevensdienst(&self, id: &str) -> Option<&Gegevensdienst> {
        self.gegevensdiensten.get(id)
    }
}
