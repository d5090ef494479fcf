use learn_db::dataset::TABLES;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DatasetTable {
    name: &'static str,
    rows: usize,
    columns: &'static [&'static str],
}

/// Handle `sqlearn dataset`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let tables: Vec<DatasetTable> = TABLES
        .iter()
        .map(|table| DatasetTable {
            name: table.name,
            rows: table.rows,
            columns: table.columns,
        })
        .collect();
    output(&tables, flags.format)
}
