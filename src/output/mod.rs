//
//  upcloud-api
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Renders command results either as tables for interactive use or as
//! pretty-printed JSON for scripting (`--json`).
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: The available output formats
//! - [`OutputWriter`]: Main entry point for writing formatted output
//! - [`TableRow`]: Types listed one per table row
//! - [`TableOutput`]: Types printed as a single detail view
//!
//! ## Example
//!
//! ```rust,ignore
//! use upcloud_api::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write_list(&servers)?;
//! writer.write_success("Server stopped");
//! ```

mod table;

pub use table::*;

use serde::Serialize;

/// Output formats supported by `upctl`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// A value listed as one row of a table.
pub trait TableRow {
    /// Column headers, in row order.
    fn headers() -> &'static [&'static str];

    /// Cell values for this value.
    fn row(&self, color: bool) -> Vec<String>;
}

/// A value printed as a detail view.
pub trait TableOutput {
    /// Prints the value in human-readable form.
    fn print_table(&self, color: bool);
}

/// Writes command results in the selected format.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Chooses JSON when `json` is set, tables otherwise.
    pub fn from_flag(json: bool) -> Self {
        Self::new(if json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        })
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a single value.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a list of values, as a table or a JSON array.
    pub fn write_list<T: Serialize + TableRow>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(values)?),
            OutputFormat::Table => {
                if values.is_empty() {
                    println!("No results");
                    return Ok(());
                }
                render_list(values, self.color).print();
            }
        }
        Ok(())
    }

    /// Prints a success message to stderr, so JSON on stdout stays clean.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("✓").green().bold(), msg);
        } else {
            eprintln!("{}", msg);
        }
    }
}

fn render_list<T: TableRow>(values: &[T], color: bool) -> TableBuilder {
    TableBuilder::new()
        .color(color)
        .headers(T::headers().iter().copied())
        .rows(values.iter().map(|v| v.row(color)))
}
