use super::*;

#[test]
fn test_new_clamps_negative_values() {
    let geometry = SectionGeometry::new(-12.0, -3.0);
    assert_eq!(geometry.position, 0.0);
    assert_eq!(geometry.height, 0.0);
}

#[test]
fn test_bottom_adds_height() {
    let geometry = SectionGeometry::new(100.0, 250.0);
    assert_eq!(geometry.bottom(), 350.0);
}

#[test]
fn test_from_measurements_drops_non_finite_entries() {
    let map = GeometryMap::from_measurements(vec![
        (SectionId::from("general"), SectionGeometry::new(0.0, 300.0)),
        (
            SectionId::from("payment"),
            SectionGeometry {
                position: f64::INFINITY,
                height: 10.0,
            },
        ),
        (
            SectionId::from("history"),
            SectionGeometry {
                position: 400.0,
                height: f64::NAN,
            },
        ),
    ]);

    assert_eq!(map.len(), 1);
    assert!(map.contains("general"));
    assert!(!map.contains("payment"));
    assert!(!map.contains("history"));
}

#[test]
fn test_unmeasured_lookup_returns_none() {
    let map = GeometryMap::new().with("general", 0.0, 300.0);
    assert_eq!(map.get("general"), Some(SectionGeometry::new(0.0, 300.0)));
    assert_eq!(map.get("payment"), None);
}

#[test]
fn test_new_map_is_empty() {
    assert!(GeometryMap::new().is_empty());
}
