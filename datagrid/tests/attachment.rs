//! Tests for binding columns to grids.

use std::thread;

use datagrid::{AttachmentMonitor, Caption, Column, Grid, GridError, HtmlElement, SortDirection};

fn bracket_grid() -> Grid {
    Grid::builder()
        .translator(|text: &str| format!("[{}]", text))
        .build()
}

#[test]
fn test_owner_absent_until_inserted() {
    let column = Column::new();
    assert!(column.try_owner().is_none());
    assert!(!column.is_attached());

    let grid = Grid::new();
    let column = grid.add_column("name", column).unwrap();
    for _ in 0..3 {
        assert_eq!(column.try_owner().map(|g| g.id()), Some(grid.id()));
        assert_eq!(column.owner().unwrap().id(), grid.id());
    }
    assert_eq!(column.name().as_deref(), Some("name"));
}

#[test]
fn test_caption_falls_back_to_translated_name() {
    let grid = bracket_grid();
    let column = grid.add_column("created", Column::new()).unwrap();
    assert_eq!(column.caption().unwrap(), Caption::Text("[created]".into()));
}

#[test]
fn test_explicit_caption_is_kept() {
    let grid = bracket_grid();
    let column = grid.add_column("created", Column::captioned("Created at")).unwrap();
    assert_eq!(column.caption().unwrap().as_text(), "[Created at]");
}

#[test]
fn test_html_caption_translates_title() {
    let grid = bracket_grid();
    let caption = HtmlElement::el("abbr")
        .with_attr("title", "Identifier")
        .with_text("ID");
    let column = grid.add_column("id", Column::captioned(caption)).unwrap();

    let Caption::Html(el) = column.caption().unwrap() else {
        panic!("expected rich caption");
    };
    assert_eq!(el.title(), Some("[Identifier]"));
    assert_eq!(el.text(), "ID");
    // Stored caption is untouched.
    let Some(Caption::Html(raw)) = column.raw_caption() else {
        panic!("expected rich caption");
    };
    assert_eq!(raw.title(), Some("Identifier"));
}

#[test]
fn test_html_caption_without_title_translates_text() {
    let grid = bracket_grid();
    let column = grid
        .add_column("id", Column::captioned(HtmlElement::el("b").with_text("ID")))
        .unwrap();
    assert_eq!(column.caption().unwrap().as_text(), "[ID]");
}

#[test]
fn test_reattach_same_grid_is_noop() {
    let grid = Grid::new();
    let column = grid.add_column("name", Column::new()).unwrap();
    column.set_caption("Full name");

    column.on_attached(&grid).unwrap();
    let again = grid.add_column("name", column.clone()).unwrap();

    assert_eq!(again.id(), column.id());
    assert_eq!(grid.columns().len(), 1);
    assert_eq!(column.caption().unwrap().as_text(), "Full name");
}

#[test]
fn test_attach_to_second_grid_fails() {
    let first = Grid::new();
    let second = Grid::new();
    let column = first.add_column("name", Column::new()).unwrap();

    let err = second.add_column("name", column.clone()).unwrap_err();
    assert!(matches!(err, GridError::AlreadyAttached { .. }));
    assert!(second.columns().is_empty());
    assert!(matches!(
        column.on_attached(&second),
        Err(GridError::AlreadyAttached { .. })
    ));
    assert_eq!(column.owner().unwrap().id(), first.id());
}

#[test]
fn test_same_column_under_new_name_fails() {
    let grid = Grid::new();
    let column = grid.add_column("name", Column::new()).unwrap();
    assert!(grid.add_column("alias", column).is_err());
    assert!(grid.column("alias").is_none());
}

#[test]
fn test_duplicate_name_rejected() {
    let grid = Grid::new();
    grid.add_column("name", Column::new()).unwrap();
    assert_eq!(
        grid.add_column("name", Column::new()).unwrap_err(),
        GridError::DuplicateColumn("name".into())
    );
}

#[test]
fn test_order_link() {
    let grid = Grid::builder()
        .config(datagrid::GridConfig::default().with_base_path("/users"))
        .build();
    let column = grid.add_column("name", Column::new()).unwrap();
    assert_eq!(
        column.order_link(Some(SortDirection::Descending)).unwrap(),
        "/users?do=order&by=name&dir=d"
    );
    assert_eq!(column.order_link(None).unwrap(), "/users?do=order&by=name");
}

#[test]
fn test_dropped_grid_detaches_owner() {
    let column = {
        let grid = Grid::new();
        grid.add_column("name", Column::new()).unwrap()
    };
    assert!(column.is_attached());
    assert_eq!(column.owner().unwrap_err(), GridError::NotAttached);
}

#[test]
fn test_unnamed_column_cannot_self_attach() {
    let grid = Grid::new();
    let column = Column::new();

    assert_eq!(column.on_attached(&grid).unwrap_err(), GridError::NotAttached);
    assert!(!column.is_attached());
    assert!(column.try_owner().is_none());

    let column = grid.add_column("status", column).unwrap();
    assert_eq!(column.caption().unwrap().as_text(), "status");
    column.add_default_sorting("ASC").unwrap();
    assert_eq!(grid.default_order(), "status=a");
    assert_eq!(grid.columns().len(), 1);
}

#[test]
fn test_rejected_insert_keeps_name() {
    let first = Grid::new();
    let second = Grid::new();
    let column = first.add_column("a", Column::new()).unwrap();
    column.add_text_filter().unwrap();

    let err = second.add_column("b", column.clone()).unwrap_err();
    assert!(matches!(err, GridError::AlreadyAttached { .. }));
    assert_eq!(column.name().as_deref(), Some("a"));
    assert_eq!(column.filters().column(), "a");
    assert_eq!(first.column("a").map(|c| c.id()), Some(column.id()));
    assert!(second.column("b").is_none());
}

#[test]
fn test_concurrent_insert_binds_once() {
    for _ in 0..50 {
        let first = Grid::new();
        let second = Grid::new();
        let column = Column::new();

        let (a, b) = thread::scope(|s| {
            let a = s.spawn(|| first.add_column("a", column.clone()).is_ok());
            let b = s.spawn(|| second.add_column("b", column.clone()).is_ok());
            (a.join().unwrap(), b.join().unwrap())
        });

        assert!(a ^ b);
        let (winner, name) = if a { (&first, "a") } else { (&second, "b") };
        assert_eq!(column.name().as_deref(), Some(name));
        assert_eq!(column.owner().unwrap().id(), winner.id());
        assert_eq!(first.columns().len() + second.columns().len(), 1);
    }
}
