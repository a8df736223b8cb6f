use erpgrid_lib::engine::{apply_filters, distinct_values};
use erpgrid_lib::state::{ColumnFilter, FilterState};
use erpgrid_lib::{ColumnDescriptor, ColumnRegistry, FilterKind, GridError, GridRow, Row, Value};

fn registry() -> ColumnRegistry {
    ColumnRegistry::new(vec![
        ColumnDescriptor::new("orderNo", "Order #"),
        ColumnDescriptor::new("clientName", "Client").filterable(),
        ColumnDescriptor::new("status", "Status").filter_kind(FilterKind::SetMembership),
        ColumnDescriptor::new("quantity", "Qty").custom_filter(|value, min| {
            value.compare(min) != std::cmp::Ordering::Less
        }),
    ])
    .unwrap()
}

fn rows() -> Vec<Row> {
    vec![
        Row::new("1")
            .set("orderNo", "SO-1001")
            .set("clientName", "JAIPUR SYNTEX LIMITED")
            .set("status", "Pending")
            .set("quantity", 120i64),
        Row::new("2")
            .set("orderNo", "SO-1002")
            .set("clientName", "C.M. TEXTILES PVT. LTD.")
            .set("status", "Shipped")
            .set("quantity", 40i64),
        Row::new("3")
            .set("orderNo", "SO-1003")
            .set("clientName", "Sangam Syntex")
            .set("status", "Shipped")
            .set("quantity", 75i64),
    ]
}

fn ids(rows: &[&Row]) -> Vec<String> {
    rows.iter().map(|r| r.id().to_string()).collect()
}

#[test]
fn test_global_filter_case_insensitive_substring() {
    let rows = vec![
        Row::new("1").set("clientName", "JAIPUR SYNTEX LIMITED"),
        Row::new("2").set("clientName", "C.M. TEXTILES PVT. LTD."),
    ];
    let filters = FilterState::new().with_global("syn");
    let kept = apply_filters(&rows, &filters, &registry()).unwrap();
    assert_eq!(ids(&kept), vec!["1"]);
}

#[test]
fn test_global_filter_ignores_non_filterable_columns() {
    let rows = rows();
    // orderNo is not filterable
    let filters = FilterState::new().with_global("SO-1002");
    let kept = apply_filters(&rows, &filters, &registry()).unwrap();
    assert!(kept.is_empty());
}

#[test]
fn test_global_filter_matches_any_filterable_column() {
    let rows = rows();
    let filters = FilterState::new().with_global("shipped");
    let kept = apply_filters(&rows, &filters, &registry()).unwrap();
    assert_eq!(ids(&kept), vec!["2", "3"]);
}

#[test]
fn test_empty_global_filter_passes_all() {
    let rows = rows();
    let kept = apply_filters(&rows, &FilterState::new(), &registry()).unwrap();
    assert_eq!(ids(&kept), vec!["1", "2", "3"]);
}

#[test]
fn test_set_membership() {
    let rows = rows();
    let filters = FilterState::new().with_column("status", ColumnFilter::values(["Shipped"]));
    let kept = apply_filters(&rows, &filters, &registry()).unwrap();
    assert_eq!(ids(&kept), vec!["2", "3"]);

    let empty: Vec<Value> = Vec::new();
    let filters = FilterState::new().with_column("status", ColumnFilter::Values(empty));
    let kept = apply_filters(&rows, &filters, &registry()).unwrap();
    assert_eq!(kept.len(), 3);
}

#[test]
fn test_custom_predicate() {
    let rows = rows();
    let filters = FilterState::new().with_column("quantity", ColumnFilter::custom(75i64));
    let kept = apply_filters(&rows, &filters, &registry()).unwrap();
    assert_eq!(ids(&kept), vec!["1", "3"]);
}

#[test]
fn test_column_filters_combine_with_and() {
    let rows = rows();
    let filters = FilterState::new()
        .with_global("syntex")
        .with_column("status", ColumnFilter::values(["Shipped"]))
        .with_column("quantity", ColumnFilter::custom(50i64));
    let kept = apply_filters(&rows, &filters, &registry()).unwrap();
    assert_eq!(ids(&kept), vec!["3"]);
}

#[test]
fn test_text_column_filter() {
    let rows = rows();
    let filters = FilterState::new().with_column("clientName", ColumnFilter::text("textiles"));
    let kept = apply_filters(&rows, &filters, &registry()).unwrap();
    assert_eq!(ids(&kept), vec!["2"]);
}

#[test]
fn test_empty_rows() {
    let rows: Vec<Row> = Vec::new();
    let filters = FilterState::new().with_global("anything");
    assert!(apply_filters(&rows, &filters, &registry()).unwrap().is_empty());
}

#[test]
fn test_invalid_column_filters_rejected() {
    let rows = rows();

    let filters = FilterState::new().with_column("nope", ColumnFilter::text("x"));
    assert_eq!(
        apply_filters(&rows, &filters, &registry()).unwrap_err(),
        GridError::UnknownColumn("nope".into())
    );

    let filters = FilterState::new().with_column("orderNo", ColumnFilter::text("x"));
    assert!(matches!(
        apply_filters(&rows, &filters, &registry()).unwrap_err(),
        GridError::Unsupported { .. }
    ));

    let registry = ColumnRegistry::new(vec![
        ColumnDescriptor::new("quantity", "Qty").filter_kind(FilterKind::Custom),
    ])
    .unwrap();
    let filters = FilterState::new().with_column("quantity", ColumnFilter::custom(1i64));
    assert_eq!(
        apply_filters(&rows, &filters, &registry).unwrap_err(),
        GridError::MissingPredicate("quantity".into())
    );
}

#[test]
fn test_filter_variant_must_match_filter_kind() {
    let rows = rows();
    let cases = [
        ("clientName", ColumnFilter::custom(1i64), FilterKind::TextSubstring),
        ("clientName", ColumnFilter::values(["Sangam Syntex"]), FilterKind::TextSubstring),
        ("status", ColumnFilter::text("ship"), FilterKind::SetMembership),
        ("quantity", ColumnFilter::values([75i64]), FilterKind::Custom),
    ];
    for (key, filter, kind) in cases {
        let filters = FilterState::new().with_column(key, filter);
        assert_eq!(
            apply_filters(&rows, &filters, &registry()).unwrap_err(),
            GridError::FilterKindMismatch {
                column: key.into(),
                kind,
            }
        );
    }
}

#[test]
#[should_panic(expected = "broken predicate")]
fn test_predicate_panics_propagate() {
    let registry = ColumnRegistry::new(vec![
        ColumnDescriptor::new("x", "X").custom_filter(|_, _| panic!("broken predicate")),
    ])
    .unwrap();
    let rows = vec![Row::new("1").set("x", 1i64)];
    let filters = FilterState::new().with_column("x", ColumnFilter::custom(Value::Null));
    let _ = apply_filters(&rows, &filters, &registry);
}

#[test]
fn test_distinct_values_first_appearance() {
    let rows = rows();
    assert_eq!(
        distinct_values(&rows, "status"),
        vec![Value::from("Pending"), Value::from("Shipped")]
    );
}
