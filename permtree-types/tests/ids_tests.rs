use permtree_types::PermissionId;
use std::collections::HashSet;
use std::str::FromStr;

#[test]
fn permission_id_roundtrips_raw_value() {
    let id = PermissionId::new(42);
    assert_eq!(id.get(), 42);
    assert_eq!(PermissionId::from(42), id);
}

#[test]
fn permission_id_display_and_parse() {
    let id = PermissionId::new(1001);
    assert_eq!(id.to_string(), "1001");
    assert_eq!(PermissionId::from_str("1001").unwrap(), id);
    assert_eq!(PermissionId::from_str(" 1001 ").unwrap(), id);
}

#[test]
fn permission_id_parse_invalid() {
    assert!(PermissionId::from_str("not-a-number").is_err());
    assert!(PermissionId::from_str("-3").is_err());
}

#[test]
fn permission_id_orders_numerically() {
    let mut ids = vec![PermissionId::new(10), PermissionId::new(2), PermissionId::new(7)];
    ids.sort();
    assert_eq!(ids, vec![PermissionId::new(2), PermissionId::new(7), PermissionId::new(10)]);
}

#[test]
fn permission_id_hash_and_eq() {
    let mut set = HashSet::new();
    set.insert(PermissionId::new(5));
    set.insert(PermissionId::new(5));
    assert_eq!(set.len(), 1);
}

#[test]
fn permission_id_serializes_transparently() {
    let json = serde_json::to_string(&PermissionId::new(9)).unwrap();
    assert_eq!(json, "9");
    let back: PermissionId = serde_json::from_str("9").unwrap();
    assert_eq!(back, PermissionId::new(9));
}
