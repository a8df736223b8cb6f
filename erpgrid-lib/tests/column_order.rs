use erpgrid_lib::column::ColumnOrder;
use erpgrid_lib::{Capability, ColumnDescriptor, ColumnRegistry, GridError};

fn registry() -> ColumnRegistry {
    ColumnRegistry::new(vec![
        ColumnDescriptor::new("orderNo", "Order #"),
        ColumnDescriptor::new("clientId", "Client").groupable(),
        ColumnDescriptor::new("salesman", "Salesman").groupable(),
        ColumnDescriptor::new("amount", "Amount"),
    ])
    .unwrap()
}

#[test]
fn test_starts_in_declaration_order() {
    let order = ColumnOrder::new(&registry());
    assert_eq!(order.order(), &["orderNo", "clientId", "salesman", "amount"]);
    assert!(order.grouping().is_empty());
}

#[test]
fn test_reorder_accepts_permutation() {
    let mut order = ColumnOrder::new(&registry());
    order
        .reorder(&["amount", "orderNo", "salesman", "clientId"])
        .unwrap();
    assert_eq!(
        order.visible_keys().collect::<Vec<_>>(),
        vec!["amount", "orderNo", "salesman", "clientId"]
    );
}

#[test]
fn test_reorder_rejects_non_permutations_without_change() {
    let mut order = ColumnOrder::new(&registry());
    let before = order.order().to_vec();

    let err = order
        .reorder(&["orderNo", "orderNo", "salesman", "amount"])
        .unwrap_err();
    assert_eq!(
        err,
        GridError::InvalidPermutation {
            missing: vec!["clientId".into()],
            unexpected: vec![],
            duplicated: vec!["orderNo".into()],
        }
    );

    let err = order.reorder(&["orderNo", "clientId", "salesman"]).unwrap_err();
    assert!(matches!(err, GridError::InvalidPermutation { .. }));

    let err = order
        .reorder(&["orderNo", "clientId", "salesman", "amount", "discount"])
        .unwrap_err();
    assert_eq!(
        err,
        GridError::InvalidPermutation {
            missing: vec![],
            unexpected: vec!["discount".into()],
            duplicated: vec![],
        }
    );

    assert_eq!(order.order(), before.as_slice());
}

#[test]
fn test_grouping_zone() {
    let mut order = ColumnOrder::new(&registry());
    assert!(order.move_to_grouping_zone("clientId").unwrap());
    assert!(order.move_to_grouping_zone("salesman").unwrap());
    // Already grouped: no-op
    assert!(!order.move_to_grouping_zone("clientId").unwrap());

    assert_eq!(order.grouping().keys(), &["clientId", "salesman"]);
    assert_eq!(
        order.visible_keys().collect::<Vec<_>>(),
        vec!["orderNo", "amount"]
    );

    assert_eq!(
        order.move_to_grouping_zone("amount").unwrap_err(),
        GridError::unsupported("amount", Capability::Group)
    );
    assert_eq!(
        order.move_to_grouping_zone("nope").unwrap_err(),
        GridError::UnknownColumn("nope".into())
    );
}

#[test]
fn test_reset_restores_order_and_clears_grouping() {
    let mut order = ColumnOrder::new(&registry());
    order
        .reorder(&["amount", "salesman", "clientId", "orderNo"])
        .unwrap();
    order.move_to_grouping_zone("clientId").unwrap();
    order.reset();
    assert_eq!(order.order(), &["orderNo", "clientId", "salesman", "amount"]);
    assert!(order.grouping().is_empty());
}
