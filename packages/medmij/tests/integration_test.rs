//! End-to-end integration tests for the zorgaanbiederslijst pipeline.
//!
//! Tests the complete pipeline from XML text to indexed collection using a
//! fixture list document with the realistic release2 nesting.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;

use medmij::ZorgaanbiedersCollection;

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("zorgaanbiederslijst")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn parse_fixture() -> ZorgaanbiedersCollection {
    let xml = load_fixture("Zorgaanbiederslijst.xml");
    ZorgaanbiedersCollection::from_xml_data(&xml).expect("fixture lijst parses")
}

#[test]
fn test_fixture_parses_all_zorgaanbieders() {
    let lijst = parse_fixture();
    assert_eq!(lijst.len(), 3);

    let namen: Vec<&str> = lijst.iter().map(|z| z.naam.as_str()).collect();
    assert!(namen.contains(&"umcharderwijk@medmij"));
    assert!(namen.contains(&"radiologencentrum-oost@medmij"));
    assert!(namen.contains(&"huisartsenpraktijk-de-brink@medmij"));
}

#[test]
fn test_fixture_endpoints_match_document() {
    let lijst = parse_fixture();

    let umc = lijst.get_by_name("umcharderwijk@medmij").expect("present");
    let dienst = umc.gegevensdienst("4").expect("gegevensdienst 4");
    assert_eq!(dienst.zorgaanbiedernaam, "umcharderwijk@medmij");
    assert_eq!(
        dienst.authorization_endpoint_uri.as_str(),
        "https://medmij.za982.xisbridge.net/oauth/authorize"
    );
    assert_eq!(
        dienst.token_endpoint_uri.as_str(),
        "https://medmij.za982.xisbridge.net/oauth/token"
    );
}

#[test]
fn test_fixture_multiple_gegevensdiensten() {
    let lijst = parse_fixture();

    let rco = lijst
        .get_by_name("radiologencentrum-oost@medmij")
        .expect("present");
    assert_eq!(rco.gegevensdiensten.len(), 2);
    assert!(rco.gegevensdienst("28").is_some());
    assert!(rco.gegevensdienst("42").is_some());
}

#[test]
fn test_fixture_extension_elements_are_ignored() {
    // De Brink carries a Weergavenaam in the extension slot; it must not
    // affect parsing of the known elements.
    let lijst = parse_fixture();

    let brink = lijst
        .get_by_name("huisartsenpraktijk-de-brink@medmij")
        .expect("present");
    assert_eq!(brink.gegevensdiensten.len(), 1);
}

#[test]
fn test_enumeration_matches_lookup() {
    let lijst = parse_fixture();

    for zorgaanbieder in &lijst {
        let opgezocht = lijst.get_by_name(&zorgaanbieder.naam).expect("present");
        assert_eq!(opgezocht, zorgaanbieder);
    }
}

#[test]
fn test_invalid_fixture_is_rejected() {
    let xml = load_fixture("Ongeldig.xml");
    let err = ZorgaanbiedersCollection::from_xml_data(&xml).unwrap_err();
    assert!(matches!(err, medmij::MedMijError::SchemaValidation { .. }));
}

#[test]
fn test_json_projection() {
    let lijst = parse_fixture();

    let json = serde_json::to_value(&lijst).expect("serializes");
    let umc = &json["umcharderwijk@medmij"];
    assert_eq!(umc["naam"], "umcharderwijk@medmij");
    assert_eq!(
        umc["gegevensdiensten"]["4"]["authorization_endpoint_uri"],
        "https://medmij.za982.xisbridge.net/oauth/authorize"
    );
}

#[test]
fn test_collection_clone_equals_original() {
    let lijst = parse_fixture();
    let kopie = lijst.clone();
    assert_eq!(lijst, kopie);
}
