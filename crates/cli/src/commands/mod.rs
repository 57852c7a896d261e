//! CLI command implementations.

pub mod inventory;
pub mod warehouses;

use std::io::{self, Write};

use binscope_core::IdError;
use binscope_dashboard::shiphero::{PaginationSettings, ShipHeroClient, ShipHeroError};
use secrecy::SecretString;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// `ShipHero` request failed.
    #[error("ShipHero error: {0}")]
    ShipHero(#[from] ShipHeroError),

    /// Invalid customer or warehouse ID.
    #[error("{0}")]
    InvalidId(#[from] IdError),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON rendering failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Client, credentials and limits shared by every command.
pub struct Context {
    pub client: ShipHeroClient,
    pub token: SecretString,
    pub settings: PaginationSettings,
}

/// Write rows as left-aligned, space-separated columns.
///
/// Each column is as wide as its widest cell (header included).
pub fn write_table<W: Write>(out: &mut W, header: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &widths, header.iter().copied())?;
    for row in rows {
        write_row(out, &widths, row.iter().map(String::as_str))?;
    }
    Ok(())
}

fn write_row<'a, W: Write>(
    out: &mut W,
    widths: &[usize],
    cells: impl Iterator<Item = &'a str>,
) -> io::Result<()> {
    let line = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}
