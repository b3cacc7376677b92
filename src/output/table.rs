//
//  upcloud-api
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! Table rendering with `comfy_table`, plus helpers that color resource
//! states and format sizes for terminal output.
//!
//! ## Example
//!
//! ```rust,ignore
//! use upcloud_api::output::TableBuilder;
//!
//! TableBuilder::new()
//!     .headers(["UUID", "HOSTNAME", "STATE"])
//!     .row(["00af", "web-1", "started"])
//!     .print();
//! ```

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Creates an empty table with the default style.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Fluent builder over [`comfy_table::Table`].
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Sets the header row; headers are cyan when color is enabled.
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            let cells: Vec<Cell> = headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect();
            self.table.set_header(cells);
        } else {
            self.table.set_header(headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        self.table.add_row(row);
        self
    }

    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            let row: Vec<String> = row.into_iter().map(Into::into).collect();
            self.table.add_row(row);
        }
        self
    }

    pub fn print(self) {
        println!("{}", self.table);
    }

    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Colors a server, storage or import state.
///
/// | Color | States |
/// |-------|--------|
/// | green | `started`, `online`, `completed` |
/// | yellow | `maintenance`, `cloning`, `backuping`, `syncing`, `pending`, `preparing`, `running` |
/// | red | `error`, `failed`, `cancelled`, `cancelling` |
/// | dim | `stopped` |
pub fn format_state(state: &str, color: bool) -> String {
    if !color {
        return state.to_string();
    }

    use console::style;
    match state {
        "started" | "online" | "completed" => style(state).green().to_string(),
        "maintenance" | "cloning" | "backuping" | "syncing" | "pending" | "preparing"
        | "running" => style(state).yellow().to_string(),
        "error" | "failed" | "cancelled" | "cancelling" => style(state).red().to_string(),
        "stopped" => style(state).dim().to_string(),
        _ => state.to_string(),
    }
}

/// Formats a byte count with binary units.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Renders an empty string as `-`.
pub fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_state_plain() {
        assert_eq!(format_state("started", false), "started");
        assert_eq!(format_state("whatever", true), "whatever");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(10 * 1024 * 1024 * 1024), "10.0 GiB");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(""), "-");
        assert_eq!(or_dash("fi-hel1"), "fi-hel1");
    }

    #[test]
    fn test_builder_rows() {
        let table = TableBuilder::new()
            .color(false)
            .headers(["A", "B"])
            .row(["1", "2"])
            .rows([["3", "4"]])
            .build();
        assert_eq!(table.row_iter().count(), 2);
    }
}
