//! Builds a small grid, configures columns and prints the resulting state.
//!
//! Run with: `cargo run -p datagrid --example default_state`

use std::fs::File;

use datagrid::{Column, Grid, GridConfig};
use log::LevelFilter;
use serde_json::json;
use simplelog::{Config, WriteLogger};

fn main() -> datagrid::Result<()> {
    if let Ok(log_file) = File::create("datagrid-example.log") {
        let _ = WriteLogger::init(LevelFilter::Trace, Config::default(), log_file);
    }

    let grid = Grid::builder()
        .config(GridConfig::default().with_base_path("/tasks"))
        .translator(|text: &str| match text {
            "title" => "Title".to_string(),
            "status" => "Status".to_string(),
            other => other.to_string(),
        })
        // Seeded from the incoming request.
        .default_order("created=d")
        .build();

    let title = grid.add_column("title", Column::text())?;
    title.set_max_length(16)?;
    title.add_default_sorting("asc")?;
    title.add_filter()?;

    let status = grid.add_column("status", Column::new())?;
    status
        .add_selectbox_filter(["open", "closed"], true, true)?
        .translate_items(false);
    status.add_default_filtering("open")?;

    for column in grid.columns() {
        println!(
            "{:<8} caption={} link={}",
            column.name().unwrap_or_default(),
            column.caption()?,
            column.order_link(None)?
        );
    }
    println!(
        "title cell: {}",
        title.format_content(&json!("A rather long task title"), None)
    );
    println!("default order:   {}", grid.default_order());
    println!("default filters: {}", grid.default_filters());
    println!(
        "state: {}",
        serde_json::to_string(&grid.snapshot()).unwrap_or_default()
    );
    Ok(())
}
