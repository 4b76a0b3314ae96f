//! The zorgaanbiederslijst: validate, parse and query the provider registry.
//!
//! A list document goes through three stages: XML syntax parsing, schema
//! validation against the embedded XSD, and the tree walk that builds the
//! collection. Any failure aborts the whole operation; a caller either gets
//! a complete collection or none at all.

use std::collections::btree_map;
use std::collections::BTreeMap;

use reqwest::blocking::Client;
use roxmltree::{Document, Node};
use serde::Serialize;
use url::Url;

use crate::error::{MedMijError, Result};
use crate::http::{bytes_to_string, download_bytes};
use crate::schema::zorgaanbiederslijst_schema;
use crate::types::{Gegevensdienst, Zorgaanbieder};
use crate::xml::{find_descendants, get_text, required_child, single_descendant};

const NS: &str = crate::config::ZORGAANBIEDERSLIJST_NAMESPACE;

const ZORGAANBIEDER: &str = "Zorgaanbieder";
const ZORGAANBIEDERNAAM: &str = "Zorgaanbiedernaam";
const GEGEVENSDIENST: &str = "Gegevensdienst";
const GEGEVENSDIENST_ID: &str = "GegevensdienstId";
const AUTHORIZATION_ENDPOINT_URI: &str = "AuthorizationEndpointuri";
const TOKEN_ENDPOINT_URI: &str = "TokenEndpointuri";

/// De zorgaanbiederslijst as an immutable, name-indexed collection.
///
/// Constructed once from document text via [`from_xml_data`]; after
/// construction no mutation is possible, so shared references may be used
/// from any number of threads without locking.
///
/// [`from_xml_data`]: ZorgaanbiedersCollection::from_xml_data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ZorgaanbiedersCollection {
    zorgaanbieders: BTreeMap<String, Zorgaanbieder>,
}

impl ZorgaanbiedersCollection {
    /// Parse and validate a zorgaanbiederslijst from XML text.
    ///
    /// # Arguments
    /// * `xml_data` - The full list document as XML text
    ///
    /// # Errors
    /// * `MedMijError::XmlSyntax` when the text is not well-formed XML
    /// * `MedMijError::SchemaValidation` when the document does not conform
    ///   to the zorgaanbiederslijst schema
    /// * `MedMijError::MalformedEntry` when a gegevensdienst does not
    ///   contain exactly one authorization and one token endpoint URI
    /// * `MedMijError::InvalidEndpointUri` when an endpoint value is not an
    ///   absolute URI
    pub fn from_xml_data(xml_data: &str) -> Result<Self> {
        let doc = Document::parse(xml_data)?;
        zorgaanbiederslijst_schema().validate(&doc)?;
        Self::parse(&doc)
    }

    /// Get the zorgaanbieder with the given name.
    ///
    /// # Errors
    /// Returns `MedMijError::ZorgaanbiederNotFound` when no zorgaanbieder
    /// with that name is on the lijst.
    pub fn get_by_name(&self, naam: &str) -> Result<&Zorgaanbieder> {
        self.zorgaanbieders
            .get(naam)
            .ok_or_else(|| MedMijError::ZorgaanbiederNotFound(naam.to_string()))
    }

    /// Iterate over all zorgaanbieders.
    ///
    /// Order is deterministic (sorted by name) and stable across repeated
    /// iteration.
    pub fn iter(&self) -> impl Iterator<Item = &Zorgaanbieder> {
        self.zorgaanbieders.values()
    }

    /// Number of zorgaanbieders on the lijst.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zorgaanbieders.len()
    }

    /// Whether the lijst contains no zorgaanbieders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zorgaanbieders.is_empty()
    }

    fn parse(doc: &Document<'_>) -> Result<Self> {
        let mut zorgaanbieders = BTreeMap::new();
        for node in find_descendants(doc.root_element(), NS, ZORGAANBIEDER) {
            let zorgaanbieder = parse_zorgaanbieder(node)?;
            // Last occurrence in document order wins on duplicate names.
            zorgaanbieders.insert(zorgaanbieder.naam.clone(), zorgaanbieder);
        }
        Ok(Self { zorgaanbieders })
    }
}

impl<'a> IntoIterator for &'a ZorgaanbiedersCollection {
    type Item = &'a Zorgaanbieder;
    type IntoIter = btree_map::Values<'a, String, Zorgaanbieder>;

    fn into_iter(self) -> Self::IntoIter {
        self.zorgaanbieders.values()
    }
}

fn parse_zorgaanbieder(node: Node<'_, '_>) -> Result<Zorgaanbieder> {
    let naam = get_text(required_child(node, NS, ZORGAANBIEDERNAAM)?);

    let mut gegevensdiensten = BTreeMap::new();
    for dienst in find_descendants(node, NS, GEGEVENSDIENST) {
        let gegevensdienst = parse_gegevensdienst(dienst, &naam)?;
        // Last occurrence wins on duplicate ids within a zorgaanbieder.
        gegevensdiensten.insert(gegevensdienst.id.clone(), gegevensdienst);
    }

    Ok(Zorgaanbieder {
        naam,
        gegevensdiensten,
    })
}

fn parse_gegevensdienst(node: Node<'_, '_>, zorgaanbiedernaam: &str) -> Result<Gegevensdienst> {
    let id = get_text(required_child(node, NS, GEGEVENSDIENST_ID)?);
    let authorization_endpoint_uri = parse_endpoint(node, AUTHORIZATION_ENDPOINT_URI)?;
    let token_endpoint_uri = parse_endpoint(node, TOKEN_ENDPOINT_URI)?;

    Ok(Gegevensdienst {
        id,
        zorgaanbiedernaam: zorgaanbiedernaam.to_string(),
        authorization_endpoint_uri,
        token_endpoint_uri,
    })
}

/// Select the single endpoint-URI descendant and parse its text.
///
/// The schema leaves room for extension elements inside a gegevensdienst,
/// so the exactly-one cardinality is re-checked here at selection time.
fn parse_endpoint(node: Node<'_, '_>, element: &'static str) -> Result<Url> {
    let uri_node = single_descendant(node, NS, element)?;
    let value = get_text(uri_node);
    Url::parse(&value).map_err(|source| MedMijError::InvalidEndpointUri {
        element: element.to_string(),
        value,
        source,
    })
}

/// Download the zorgaanbiederslijst XML from a URL.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL the lijst is published at
///
/// # Returns
/// Raw XML content as a string
pub fn download_zorgaanbiederslijst_xml(client: &Client, url: &str) -> Result<String> {
    let bytes = download_bytes(client, url).map_err(|e| {
        if let MedMijError::Http(source) = e {
            MedMijError::LijstDownload {
                url: url.to_string(),
                source,
            }
        } else {
            e
        }
    })?;

    Ok(bytes_to_string(&bytes, "zorgaanbiederslijst"))
}

/// Download, validate and parse the zorgaanbiederslijst.
///
/// This is a convenience function that downloads the list XML and parses
/// it into a [`ZorgaanbiedersCollection`].
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL the lijst is published at
pub fn download_zorgaanbiederslijst(
    client: &Client,
    url: &str,
) -> Result<ZorgaanbiedersCollection> {
    let xml = download_zorgaanbiederslijst_xml(client, url)?;
    ZorgaanbiedersCollection::from_xml_data(&xml)
}
