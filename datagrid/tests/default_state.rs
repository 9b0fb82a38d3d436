//! Tests for default sorting and filtering state.

use std::thread;

use datagrid::codec::{decode, encode};
use datagrid::{Column, Grid, GridError, StateMap};

fn order_of(grid: &Grid) -> Vec<(String, String)> {
    decode(&grid.default_order())
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_add_default_sorting_keeps_existing_entries() {
    let grid = Grid::builder().default_order("age=d").build();
    let column = grid.add_column("name", Column::new()).unwrap();

    column.add_default_sorting("ASC").unwrap();

    assert_eq!(
        order_of(&grid),
        vec![
            ("age".to_string(), "d".to_string()),
            ("name".to_string(), "a".to_string())
        ]
    );
}

#[test]
fn test_sorting_codes() {
    let grid = Grid::new();
    let column = grid.add_column("name", Column::new()).unwrap();

    column.add_default_sorting("DESC").unwrap();
    assert_eq!(grid.default_order(), "name=d");
    column.add_default_sorting("a").unwrap();
    assert_eq!(grid.default_order(), "name=a");
    column.add_default_sorting("Desc").unwrap();
    assert_eq!(grid.default_order(), "name=d");
}

#[test]
fn test_invalid_sorting_leaves_state() {
    let grid = Grid::builder().default_order("name=a").build();
    let column = grid.add_column("name", Column::new()).unwrap();

    let err = column.add_default_sorting("xyz").unwrap_err();
    let GridError::InvalidArgument(message) = err else {
        panic!("expected invalid argument");
    };
    assert!(message.contains("ASC, DESC, A, D"));
    assert_eq!(grid.default_order(), "name=a");
}

#[test]
fn test_remove_default_sorting_twice() {
    let grid = Grid::builder().default_order("name=a&age=d").build();
    let column = grid.add_column("name", Column::new()).unwrap();

    column.remove_default_sorting().unwrap();
    assert_eq!(grid.default_order(), "age=d");
    column.remove_default_sorting().unwrap();
    assert_eq!(grid.default_order(), "age=d");
}

#[test]
fn test_default_filtering() {
    let grid = Grid::new();
    let status = grid.add_column("status", Column::new()).unwrap();
    let city = grid.add_column("city", Column::new()).unwrap();

    status.add_default_filtering("open").unwrap();
    city.add_default_filtering("New York").unwrap();
    assert_eq!(grid.default_filters(), "status=open&city=New+York");

    status.add_default_filtering("").unwrap();
    assert_eq!(decode(&grid.default_filters()).get("status"), Some(""));

    status.remove_default_filtering().unwrap();
    status.remove_default_filtering().unwrap();
    assert_eq!(grid.default_filters(), "city=New+York");
}

#[test]
fn test_fluent_chain() {
    let grid = Grid::new();
    let column = grid.add_column("name", Column::new()).unwrap();
    column
        .add_default_sorting("D")
        .and_then(|c| c.add_default_filtering("smith"))
        .unwrap();

    let snapshot = grid.snapshot();
    assert_eq!(snapshot.default_order.get("name"), Some("d"));
    assert_eq!(snapshot.default_filters.get("name"), Some("smith"));
}

#[test]
fn test_seeded_state_from_url() {
    let grid = Grid::builder()
        .default_filters("title=Hello+World%21&owner=Zo%C3%AB")
        .build();
    let owner = grid.add_column("owner", Column::new()).unwrap();
    owner.remove_default_filtering().unwrap();
    assert_eq!(grid.default_filters(), "title=Hello+World%21");
}

#[test]
fn test_encode_decode_properties() {
    let map: StateMap = [("name", "a"), ("first name", "d"), ("q", "a&b=c")]
        .into_iter()
        .collect();
    let encoded = encode(&map);
    assert_eq!(decode(&encoded), map);
    assert_eq!(encode(&decode(&encoded)), encoded);
}

#[test]
fn test_concurrent_updates_do_not_clobber() {
    let grid = Grid::new();
    let columns: Vec<Column> = (0..8)
        .map(|i| grid.add_column(&format!("col{}", i), Column::new()).unwrap())
        .collect();

    thread::scope(|scope| {
        for column in &columns {
            scope.spawn(move || {
                for _ in 0..50 {
                    column.add_default_sorting("asc").unwrap();
                    column.add_default_filtering("x").unwrap();
                }
            });
        }
    });

    let snapshot = grid.snapshot();
    assert_eq!(snapshot.default_order.len(), 8);
    assert_eq!(snapshot.default_filters.len(), 8);
    for i in 0..8 {
        assert_eq!(snapshot.default_order.get(&format!("col{}", i)), Some("a"));
    }
}
