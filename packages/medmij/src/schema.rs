//! Schema validation for the zorgaanbiederslijst.
//!
//! The registry schema ships with the crate as an embedded XSD resource and
//! is compiled once, process-wide, on first use. Validation happens before
//! any parsing: a document that does not conform never reaches the parser.
//!
//! The compiler covers the XSD subset the registry schema uses: element
//! declarations with inline complex types, sequences with occurrence
//! bounds, the built-in `xs:string`/`xs:anyURI` types, and a trailing lax
//! `xs:any` extension slot. Anything else is rejected when the schema is
//! compiled, not silently skipped.

use std::sync::LazyLock;

use roxmltree::{Document, Node};

use crate::config::ZORGAANBIEDERSLIJST_NAMESPACE;
use crate::error::{MedMijError, Result};
use crate::xml::{element_children, has_qname};

const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

#[allow(clippy::expect_used)] // Embedded schema resource that is guaranteed to compile
static ZORGAANBIEDERSLIJST_SCHEMA: LazyLock<SchemaSet> = LazyLock::new(|| {
    SchemaSet::from_xsd(
        include_str!("../resources/Zorgaanbiederslijst.xsd"),
        ZORGAANBIEDERSLIJST_NAMESPACE,
    )
    .expect("valid embedded schema")
});

/// The compiled zorgaanbiederslijst schema.
///
/// Compiled from the embedded resource on first use and shared by all
/// validation calls; the set is immutable after compilation and safe to
/// use from concurrent threads.
pub fn zorgaanbiederslijst_schema() -> &'static SchemaSet {
    &ZORGAANBIEDERSLIJST_SCHEMA
}

/// Built-in simple types used by the registry schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimpleType {
    String,
    AnyUri,
}

/// Occurrence bound of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Occurs {
    Bounded(u32),
    Unbounded,
}

/// One element declaration with its content model.
#[derive(Debug)]
struct ElementDecl {
    name: String,
    min_occurs: u32,
    max_occurs: Occurs,
    content: Content,
}

#[derive(Debug)]
enum Content {
    Simple(SimpleType),
    Sequence(Vec<Particle>),
}

#[derive(Debug)]
enum Particle {
    Element(ElementDecl),
    /// Lax wildcard; the remaining children pass unvalidated.
    Any,
}

/// A compiled schema bound to one target namespace.
#[derive(Debug)]
pub struct SchemaSet {
    target_namespace: String,
    roots: Vec<ElementDecl>,
}

impl SchemaSet {
    /// Compile a schema from XSD text.
    ///
    /// # Arguments
    /// * `xsd` - The schema definition text
    /// * `target_namespace` - Namespace the schema must be bound to
    ///
    /// # Errors
    /// Returns `MedMijError::SchemaDefinition` when the text is not a
    /// schema for the given namespace or uses constructs outside the
    /// supported subset.
    pub fn from_xsd(xsd: &str, target_namespace: &str) -> Result<Self> {
        let doc = Document::parse(xsd).map_err(|e| MedMijError::SchemaDefinition {
            reason: format!("schema is not well-formed XML: {e}"),
        })?;

        let schema = doc.root_element();
        if !has_qname(schema, XSD_NAMESPACE, "schema") {
            return Err(definition_error("root element is not <xs:schema>"));
        }

        match schema.attribute("targetNamespace") {
            Some(ns) if ns == target_namespace => {}
            Some(ns) => {
                return Err(definition_error(&format!(
                    "schema targets namespace '{ns}', expected '{target_namespace}'"
                )))
            }
            None => return Err(definition_error("schema has no targetNamespace")),
        }

        let mut roots = Vec::new();
        for child in element_children(schema) {
            if has_qname(child, XSD_NAMESPACE, "annotation") {
                continue;
            }
            if !has_qname(child, XSD_NAMESPACE, "element") {
                return Err(unsupported(child));
            }
            roots.push(parse_element_decl(child)?);
        }
        if roots.is_empty() {
            return Err(definition_error("schema declares no global elements"));
        }

        Ok(Self {
            target_namespace: target_namespace.to_string(),
            roots,
        })
    }

    /// Validate a parsed document against this schema.
    ///
    /// Checks that the root element carries an expected qualified name
    /// within the target namespace and that the whole tree conforms to the
    /// declared content model.
    ///
    /// # Errors
    /// Returns `MedMijError::SchemaValidation` on the first non-conformance
    /// found.
    pub fn validate(&self, doc: &Document<'_>) -> Result<()> {
        let root = doc.root_element();
        let decl = self
            .roots
            .iter()
            .find(|d| has_qname(root, &self.target_namespace, &d.name))
            .ok_or_else(|| validation_error(&format!(
                "unexpected root element <{}>",
                root.tag_name().name()
            )))?;
        self.validate_element(root, decl)
    }

    fn validate_element(&self, node: Node<'_, '_>, decl: &ElementDecl) -> Result<()> {
        match &decl.content {
            Content::Simple(_) => {
                if element_children(node).next().is_some() {
                    return Err(validation_error(&format!(
                        "element <{}> must not contain child elements",
                        decl.name
                    )));
                }
                Ok(())
            }
            Content::Sequence(particles) => self.validate_sequence(node, particles),
        }
    }

    fn validate_sequence(&self, node: Node<'_, '_>, particles: &[Particle]) -> Result<()> {
        let children: Vec<Node<'_, '_>> = element_children(node).collect();
        let mut idx = 0;

        for particle in particles {
            match particle {
                Particle::Element(decl) => {
                    let mut count = 0u32;
                    while idx < children.len()
                        && has_qname(children[idx], &self.target_namespace, &decl.name)
                        && below_max(count, decl.max_occurs)
                    {
                        self.validate_element(children[idx], decl)?;
                        idx += 1;
                        count += 1;
                    }
                    if count < decl.min_occurs {
                        return Err(validation_error(&format!(
                            "missing required element <{}> in <{}>",
                            decl.name,
                            node.tag_name().name()
                        )));
                    }
                }
                // Lax wildcard at the end of the sequence.
                Particle::Any => idx = children.len(),
            }
        }

        if idx < children.len() {
            return Err(validation_error(&format!(
                "unexpected element <{}> in <{}>",
                children[idx].tag_name().name(),
                node.tag_name().name()
            )));
        }
        Ok(())
    }
}

fn below_max(count: u32, max: Occurs) -> bool {
    match max {
        Occurs::Bounded(n) => count < n,
        Occurs::Unbounded => true,
    }
}

fn definition_error(reason: &str) -> MedMijError {
    MedMijError::SchemaDefinition {
        reason: reason.to_string(),
    }
}

fn validation_error(reason: &str) -> MedMijError {
    MedMijError::SchemaValidation {
        reason: reason.to_string(),
    }
}

fn unsupported(node: Node<'_, '_>) -> MedMijError {
    definition_error(&format!(
        "unsupported schema construct <{}>",
        node.tag_name().name()
    ))
}

/// Parse one `xs:element` declaration.
fn parse_element_decl(node: Node<'_, '_>) -> Result<ElementDecl> {
    let name = node
        .attribute("name")
        .ok_or_else(|| definition_error("element declaration without name"))?
        .to_string();

    let min_occurs = parse_occurs_attr(node, "minOccurs")?.unwrap_or(Occurs::Bounded(1));
    let max_occurs = parse_occurs_attr(node, "maxOccurs")?.unwrap_or(Occurs::Bounded(1));
    let Occurs::Bounded(min_occurs) = min_occurs else {
        return Err(definition_error(&format!(
            "minOccurs of <{name}> cannot be unbounded"
        )));
    };

    let content = if let Some(type_name) = node.attribute("type") {
        Content::Simple(resolve_simple_type(node, type_name)?)
    } else {
        let complex = element_children(node)
            .find(|c| has_qname(*c, XSD_NAMESPACE, "complexType"))
            .ok_or_else(|| {
                definition_error(&format!("element <{name}> has neither type nor complexType"))
            })?;
        Content::Sequence(parse_complex_type(complex, &name)?)
    };

    Ok(ElementDecl {
        name,
        min_occurs,
        max_occurs,
        content,
    })
}

/// Parse an inline `xs:complexType`, which must hold a single `xs:sequence`.
fn parse_complex_type(node: Node<'_, '_>, element_name: &str) -> Result<Vec<Particle>> {
    let sequence = element_children(node).next().ok_or_else(|| {
        definition_error(&format!("complexType of <{element_name}> is empty"))
    })?;
    if !has_qname(sequence, XSD_NAMESPACE, "sequence") {
        return Err(unsupported(sequence));
    }

    let mut particles = Vec::new();
    for child in element_children(sequence) {
        if matches!(particles.last(), Some(Particle::Any)) {
            return Err(definition_error("xs:any must be the last particle"));
        }
        if has_qname(child, XSD_NAMESPACE, "element") {
            particles.push(Particle::Element(parse_element_decl(child)?));
        } else if has_qname(child, XSD_NAMESPACE, "any") {
            if child.attribute("processContents") != Some("lax") {
                return Err(definition_error("only lax xs:any is supported"));
            }
            particles.push(Particle::Any);
        } else {
            return Err(unsupported(child));
        }
    }
    Ok(particles)
}

/// Parse a minOccurs/maxOccurs attribute.
fn parse_occurs_attr(node: Node<'_, '_>, attr: &str) -> Result<Option<Occurs>> {
    match node.attribute(attr) {
        None => Ok(None),
        Some("unbounded") => Ok(Some(Occurs::Unbounded)),
        Some(value) => {
            let n = value.parse::<u32>().map_err(|_| {
                definition_error(&format!("invalid {attr} value '{value}'"))
            })?;
            Ok(Some(Occurs::Bounded(n)))
        }
    }
}

/// Resolve a `type` attribute to a supported built-in simple type.
fn resolve_simple_type(node: Node<'_, '_>, type_name: &str) -> Result<SimpleType> {
    let (prefix, local) = match type_name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, type_name),
    };
    if node.lookup_namespace_uri(prefix) != Some(XSD_NAMESPACE) {
        return Err(definition_error(&format!("unknown type '{type_name}'")));
    }
    match local {
        "string" => Ok(SimpleType::String),
        "anyURI" => Ok(SimpleType::AnyUri),
        other => Err(definition_error(&format!(
            "unsupported built-in type 'xs:{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_LIJST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Zorgaanbiederslijst xmlns="xmlns://afsprakenstelsel.medmij.nl/zorgaanbiederslijst/release2/">
  <Zorgaanbieders>
    <Zorgaanbieder>
      <Zorgaanbiedernaam>umcharderwijk@medmij</Zorgaanbiedernaam>
      <Gegevensdiensten>
        <Gegevensdienst>
          <GegevensdienstId>4</GegevensdienstId>
          <AuthorizationEndpoint>
            <AuthorizationEndpointuri>https://medmij.za982.xisbridge.net/oauth/authorize</AuthorizationEndpointuri>
          </AuthorizationEndpoint>
          <TokenEndpoint>
            <TokenEndpointuri>https://medmij.za982.xisbridge.net/oauth/token</TokenEndpointuri>
          </TokenEndpoint>
        </Gegevensdienst>
      </Gegevensdiensten>
    </Zorgaanbieder>
  </Zorgaanbieders>
</Zorgaanbiederslijst>"#;

    fn parse(xml: &str) -> Document<'_> {
        Document::parse(xml).expect("well-formed test document")
    }

    #[test]
    fn test_embedded_schema_compiles() {
        let schema = zorgaanbiederslijst_schema();
        assert_eq!(schema.target_namespace, ZORGAANBIEDERSLIJST_NAMESPACE);
        assert_eq!(schema.roots.len(), 1);
        assert_eq!(schema.roots[0].name, "Zorgaanbiederslijst");
    }

    #[test]
    fn test_validate_valid_document() {
        let doc = parse(VALID_LIJST);
        assert!(zorgaanbiederslijst_schema().validate(&doc).is_ok());
    }

    #[test]
    fn test_validate_empty_lijst() {
        let doc = parse(
            r#"<Zorgaanbiederslijst xmlns="xmlns://afsprakenstelsel.medmij.nl/zorgaanbiederslijst/release2/">
  <Zorgaanbieders/>
</Zorgaanbiederslijst>"#,
        );
        assert!(zorgaanbiederslijst_schema().validate(&doc).is_ok());
    }

    #[test]
    fn test_validate_tijdstempel_optional() {
        let doc = parse(
            r#"<Zorgaanbiederslijst xmlns="xmlns://afsprakenstelsel.medmij.nl/zorgaanbiederslijst/release2/">
  <Tijdstempel>2019-07-01T12:00:00Z</Tijdstempel>
  <Zorgaanbieders/>
</Zorgaanbiederslijst>"#,
        );
        assert!(zorgaanbiederslijst_schema().validate(&doc).is_ok());
    }

    #[test]
    fn test_validate_wrong_root() {
        let doc = parse(
            r#"<Zorgaanbieder xmlns="xmlns://afsprakenstelsel.medmij.nl/zorgaanbiederslijst/release2/"/>"#,
        );
        let err = zorgaanbiederslijst_schema().validate(&doc).unwrap_err();
        match err {
            MedMijError::SchemaValidation { reason } => {
                assert!(reason.contains("unexpected root element"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_missing_namespace() {
        let doc = parse("<Zorgaanbiederslijst><Zorgaanbieders/></Zorgaanbiederslijst>");
        assert!(zorgaanbiederslijst_schema().validate(&doc).is_err());
    }

    #[test]
    fn test_validate_missing_naam() {
        let doc = parse(
            r#"<Zorgaanbiederslijst xmlns="xmlns://afsprakenstelsel.medmij.nl/zorgaanbiederslijst/release2/">
  <Zorgaanbieders>
    <Zorgaanbieder>
      <Gegevensdiensten/>
    </Zorgaanbieder>
  </Zorgaanbieders>
</Zorgaanbiederslijst>"#,
        );
        let err = zorgaanbiederslijst_schema().validate(&doc).unwrap_err();
        match err {
            MedMijError::SchemaValidation { reason } => {
                assert!(reason.contains("Zorgaanbiedernaam"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_unexpected_element() {
        let doc = parse(
            r#"<Zorgaanbiederslijst xmlns="xmlns://afsprakenstelsel.medmij.nl/zorgaanbiederslijst/release2/">
  <Zorgaanbieders/>
  <Onbekend/>
</Zorgaanbiederslijst>"#,
        );
        let err = zorgaanbiederslijst_schema().validate(&doc).unwrap_err();
        match err {
            MedMijError::SchemaValidation { reason } => {
                assert!(reason.contains("Onbekend"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_extension_slot_is_lax() {
        // Elements after TokenEndpoint fall into the xs:any extension slot.
        let doc = parse(
            r#"<Zorgaanbiederslijst xmlns="xmlns://afsprakenstelsel.medmij.nl/zorgaanbiederslijst/release2/">
  <Zorgaanbieders>
    <Zorgaanbieder>
      <Zorgaanbiedernaam>x@medmij</Zorgaanbiedernaam>
      <Gegevensdiensten>
        <Gegevensdienst>
          <GegevensdienstId>1</GegevensdienstId>
          <AuthorizationEndpoint>
            <AuthorizationEndpointuri>https://x.example/a</AuthorizationEndpointuri>
          </AuthorizationEndpoint>
          <TokenEndpoint>
            <TokenEndpointuri>https://x.example/t</TokenEndpointuri>
          </TokenEndpoint>
          <Weergavenaam>Huisartsenpraktijk X</Weergavenaam>
        </Gegevensdienst>
      </Gegevensdiensten>
    </Zorgaanbieder>
  </Zorgaanbieders>
</Zorgaanbiederslijst>"#,
        );
        assert!(zorgaanbiederslijst_schema().validate(&doc).is_ok());
    }

    #[test]
    fn test_validate_simple_element_with_children() {
        let doc = parse(
            r#"<Zorgaanbiederslijst xmlns="xmlns://afsprakenstelsel.medmij.nl/zorgaanbiederslijst/release2/">
  <Tijdstempel><Diep/></Tijdstempel>
  <Zorgaanbieders/>
</Zorgaanbiederslijst>"#,
        );
        assert!(zorgaanbiederslijst_schema().validate(&doc).is_err());
    }

    #[test]
    fn test_from_xsd_rejects_choice() {
        let xsd = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:t">
  <xs:element name="Root">
    <xs:complexType>
      <xs:choice><xs:element name="A" type="xs:string"/></xs:choice>
    </xs:complexType>
  </xs:element>
</xs:schema>"#;
        let err = SchemaSet::from_xsd(xsd, "urn:t").unwrap_err();
        match err {
            MedMijError::SchemaDefinition { reason } => assert!(reason.contains("choice")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_xsd_rejects_wrong_namespace() {
        let xsd = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:anders">
  <xs:element name="Root" type="xs:string"/>
</xs:schema>"#;
        assert!(SchemaSet::from_xsd(xsd, "urn:t").is_err());
    }
}
