//! MedMij zorgaanbiederslijst - validate, parse and query the Dutch
//! healthcare provider registry.
//!
//! The zorgaanbiederslijst is the published XML registry of healthcare
//! providers ("zorgaanbieders") participating in the MedMij afsprakenstelsel.
//! Each zorgaanbieder offers one or more data services
//! ("gegevensdiensten") with the OAuth endpoints a client needs to start an
//! authorization flow.
//!
//! This crate validates a list document against the registry schema, parses
//! it into an immutable collection and exposes name-based lookup over the
//! result. Downloading the published list is a separate, optional layer; the
//! parse pipeline itself performs no I/O.
//!
//! # Example
//!
//! ```
//! use medmij::ZorgaanbiedersCollection;
//!
//! let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <Zorgaanbiederslijst xmlns="xmlns://afsprakenstelsel.medmij.nl/zorgaanbiederslijst/release2/">
//!   <Zorgaanbieders>
//!     <Zorgaanbieder>
//!       <Zorgaanbiedernaam>umcharderwijk@medmij</Zorgaanbiedernaam>
//!       <Gegevensdiensten>
//!         <Gegevensdienst>
//!           <GegevensdienstId>4</GegevensdienstId>
//!           <AuthorizationEndpoint>
//!             <AuthorizationEndpointuri>https://medmij.za982.xisbridge.net/oauth/authorize</AuthorizationEndpointuri>
//!           </AuthorizationEndpoint>
//!           <TokenEndpoint>
//!             <TokenEndpointuri>https://medmij.za982.xisbridge.net/oauth/token</TokenEndpointuri>
//!           </TokenEndpoint>
//!         </Gegevensdienst>
//!       </Gegevensdiensten>
//!     </Zorgaanbieder>
//!   </Zorgaanbieders>
//! </Zorgaanbiederslijst>"#;
//!
//! let lijst = ZorgaanbiedersCollection::from_xml_data(xml)?;
//! let zorgaanbieder = lijst.get_by_name("umcharderwijk@medmij")?;
//! assert_eq!(zorgaanbieder.gegevensdiensten.len(), 1);
//! # Ok::<(), medmij::MedMijError>(())
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Namespace, URLs and other constants
//! - [`error`]: Error types and Result alias
//! - [`schema`]: Embedded XSD compilation and document validation
//! - [`types`]: Core data types (Zorgaanbieder, Gegevensdienst)
//! - [`zorgaanbiederslijst`]: The parsed, name-indexed collection
//! - [`xml`]: Namespace-aware DOM helpers
//! - [`http`]: HTTP client for downloading the published lijst
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod schema;
pub mod types;
pub mod xml;
pub mod zorgaanbiederslijst;

// Re-export commonly used items
pub use error::{MedMijError, Result};
pub use types::{Gegevensdienst, Zorgaanbieder};
pub use zorgaanbiederslijst::{
    download_zorgaanbiederslijst, download_zorgaanbiederslijst_xml, ZorgaanbiedersCollection,
};
