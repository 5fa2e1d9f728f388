//! End-to-end tests: fixture decks through parse, validate and serialize.

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;

use mcdeck::{
    copy, equals, parse_deck, parse_named, serialize, validate_deck, Boundary, Cell, CheckKind,
    Deck, DeckError, EntityKind, EntityRef, Material, Region, Surface, SurfaceKind,
};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(path).unwrap()
}

fn pincell() -> Deck {
    parse_named(&fixture("pincell.i"), "pincell.i").unwrap()
}

#[test]
fn test_pincell_parses() {
    let deck = pincell();

    assert_eq!(deck.title, "Simple PWR pincell");
    assert_eq!(deck.cells.ids().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    assert_eq!(deck.surfaces.ids().collect::<Vec<_>>(), vec![1, 2, 3, 4, 10]);
    assert_eq!(deck.materials().ids().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(deck.settings().len(), 5);

    // `&` continuation
    assert_eq!(deck.cell(3).unwrap().importance("n"), Some(1.0));
    // indented continuation
    assert_eq!(deck.material(1).unwrap().entries.len(), 3);

    let box_body = deck.surface(10).unwrap();
    assert_eq!(box_body.kind, SurfaceKind::RectangularPrism);
    assert_eq!(box_body.transform, Some(1));
    assert_eq!(box_body.coefficients.len(), 6);
    assert_eq!(deck.surface(3).unwrap().boundary, Boundary::Reflective);

    assert_eq!(
        deck.cell(4).unwrap().geometry,
        Region::Complement(Box::new(Region::negative(10)))
    );
    assert!(deck.cell(2).unwrap().is_void());
}

#[test]
fn test_pincell_validates() {
    let result = validate_deck(&pincell());
    assert!(result.is_valid(), "{:?}", result.into_vec());
}

#[test]
fn test_round_trip() {
    let deck = pincell();
    let text = serialize(&deck).unwrap();
    let back = parse_deck(&text).unwrap();

    assert!(equals(&back, &deck));
    assert_eq!(back, deck);
}

#[test]
fn test_serialize_is_idempotent() {
    let once = serialize(&pincell()).unwrap();
    let twice = serialize(&parse_deck(&once).unwrap()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_scenario_deck() {
    let text = "title\n1 1 -0.5 1 imp:n=1\n\n1 so 5.0\n\nm1 1001 1.0\n";
    let deck = parse_deck(text).unwrap();

    let mut expected = Deck::new("title");
    expected
        .add_cell(Cell::new(1, 1, -0.5, Region::positive(1)).with_param("imp:n", 1.0))
        .unwrap();
    expected.add_surface(Surface::sphere_at_origin(1, 5.0)).unwrap();
    expected
        .add_material(Material::new(1).with_entry("1001", 1.0))
        .unwrap();

    assert_eq!(deck, expected);
    assert!(validate_deck(&deck).is_valid());
    assert_eq!(
        serialize(&deck).unwrap(),
        "title\n1 1 -0.5 1 imp:n=1\n\n1 so 5\n\nm1 1001 1\n"
    );
}

#[test]
fn test_dangling_surface_reference() {
    let mut deck = parse_deck(&fixture("dangling.i")).unwrap();

    let result = validate_deck(&deck);
    assert_eq!(result.len(), 1);
    let diagnostic = result.iter().next().unwrap();
    assert_eq!(diagnostic.kind, CheckKind::MissingSurface);
    assert_eq!(diagnostic.entity, EntityRef::cell(2));
    assert_eq!(diagnostic.reference, Some(EntityRef::surface(99)));
    assert!(diagnostic.message.contains("99"));

    deck.add_surface(Surface::new(99, SurfaceKind::PlaneZ, [10.0]))
        .unwrap();
    assert!(validate_deck(&deck).is_valid());
}

#[test]
fn test_broken_deck_reports_every_card() {
    let errors = parse_named(&fixture("broken.i"), "broken.i").unwrap_err();

    assert_eq!(errors.len(), 3);
    assert_eq!(errors.to_string(), "3 error(s) while parsing broken.i");
    let lines: Vec<Option<usize>> = errors.iter().map(DeckError::line).collect();
    assert_eq!(lines, vec![Some(2), Some(3), Some(6)]);
    assert!(errors.iter().all(|e| matches!(e, DeckError::CardParse { .. })));
}

#[test]
fn test_duplicate_insertion_leaves_deck_unchanged() {
    let mut deck = pincell();
    let before = copy(&deck);

    let err = deck
        .add_surface(Surface::sphere_at_origin(10, 1.0))
        .unwrap_err();
    assert_eq!(
        err,
        DeckError::DuplicateId {
            kind: EntityKind::Surface,
            id: 10
        }
    );
    assert_eq!(deck, before);
}

#[test]
fn test_copy_is_independent() {
    let original = pincell();
    let mut copied = copy(&original);
    assert!(equals(&original, &copied));

    copied.cell_mut(1).unwrap().geometry = Region::negative(2);
    copied.surface_mut(1).unwrap().coefficients.clear();
    copied.title.push_str(" (modified)");

    assert!(!equals(&original, &copied));
    assert_eq!(original, pincell());
}

#[test]
fn test_renumber_keeps_deck_valid() {
    let mut deck = pincell();
    let map = deck.renumber();

    assert_eq!(map.surfaces.get(&10), Some(&5));
    assert_eq!(deck.surfaces.ids().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    assert_eq!(
        deck.cell(4).unwrap().geometry,
        Region::Complement(Box::new(Region::negative(5)))
    );
    assert!(validate_deck(&deck).is_valid());

    let text = serialize(&deck).unwrap();
    assert_eq!(parse_deck(&text).unwrap(), deck);
}

#[test]
fn test_json_model() {
    let deck = pincell();

    insta::assert_json_snapshot!(deck.surface(3).unwrap(), @r#"
    {
      "id": 3,
      "kind": "pz",
      "coefficients": [
        100.0
      ],
      "transform": null,
      "boundary": "reflective"
    }
    "#);

    let json = serde_json::to_string(&deck).unwrap();
    let back: Deck = serde_json::from_str(&json).unwrap();
    assert_eq!(back, deck);
}
