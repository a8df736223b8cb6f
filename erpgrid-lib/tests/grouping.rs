use erpgrid_lib::engine::{ViewNode, apply_grouping};
use erpgrid_lib::state::GroupingState;
use erpgrid_lib::{GridRow, Row, Value};

fn describe(nodes: &[ViewNode<'_, Row>]) -> Vec<String> {
    nodes
        .iter()
        .map(|node| match node {
            ViewNode::GroupHeader(h) => format!(
                "{}{}({})",
                "  ".repeat(h.depth),
                h.value().to_text(),
                h.member_count
            ),
            ViewNode::Row { row, .. } => format!("row {}", row.id()),
        })
        .collect()
}

#[test]
fn test_groups_follow_sorted_adjacency() {
    let rows = vec![
        Row::new("1").set("clientId", "A"),
        Row::new("2").set("clientId", "A"),
        Row::new("3").set("clientId", "B"),
        Row::new("4").set("clientId", "A"),
    ];
    let view = apply_grouping(&rows, &GroupingState::from_keys(["clientId"]));

    assert_eq!(
        view.top_level_groups(),
        vec![
            (Value::from("A"), 2),
            (Value::from("B"), 1),
            (Value::from("A"), 1),
        ]
    );

    let nodes: Vec<_> = view.iter().collect();
    assert_eq!(
        describe(&nodes),
        vec!["A(2)", "row 1", "row 2", "B(1)", "row 3", "A(1)", "row 4"]
    );
}

#[test]
fn test_empty_grouping_is_flat() {
    let rows = vec![Row::new("1"), Row::new("2")];
    let view = apply_grouping(&rows, &GroupingState::new());
    let nodes: Vec<_> = view.iter().collect();
    assert_eq!(describe(&nodes), vec!["row 1", "row 2"]);
}

#[test]
fn test_nested_grouping() {
    let rows = vec![
        Row::new("1").set("region", "North").set("city", "Delhi"),
        Row::new("2").set("region", "North").set("city", "Delhi"),
        Row::new("3").set("region", "North").set("city", "Agra"),
        Row::new("4").set("region", "West").set("city", "Surat"),
    ];
    let view = apply_grouping(&rows, &GroupingState::from_keys(["region", "city"]));
    let nodes: Vec<_> = view.iter().collect();
    assert_eq!(
        describe(&nodes),
        vec![
            "North(3)",
            "  Delhi(2)",
            "row 1",
            "row 2",
            "  Agra(1)",
            "row 3",
            "West(1)",
            "  Surat(1)",
            "row 4",
        ]
    );

    let header = nodes[1].header().unwrap();
    assert_eq!(header.column(), "city");
    assert_eq!(
        header.path,
        vec![
            ("region".to_string(), Value::from("North")),
            ("city".to_string(), Value::from("Delhi")),
        ]
    );
}

#[test]
fn test_window_repeats_headers_with_full_counts() {
    let rows = vec![
        Row::new("1").set("status", "Pending"),
        Row::new("2").set("status", "Pending"),
        Row::new("3").set("status", "Pending"),
        Row::new("4").set("status", "Shipped"),
    ];
    let view = apply_grouping(&rows, &GroupingState::from_keys(["status"]));

    let page: Vec<_> = view.window(2..4).collect();
    assert_eq!(
        describe(&page),
        vec!["Pending(3)", "row 3", "Shipped(1)", "row 4"]
    );
    assert_eq!(page[0].header().unwrap().first_index, 0);

    let rows_only: Vec<usize> = page
        .iter()
        .filter_map(|n| match n {
            ViewNode::Row { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(rows_only, vec![2, 3]);
}

#[test]
fn test_numeric_variants_share_a_group() {
    let rows = vec![
        Row::new("1").set("qty", 1i32),
        Row::new("2").set("qty", 1i64),
    ];
    let view = apply_grouping(&rows, &GroupingState::from_keys(["qty"]));
    assert_eq!(view.top_level_groups().len(), 1);
}
