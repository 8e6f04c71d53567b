//! Tab-separated card lists.
//!
//! Each data row is `name, quantity, color, cost[, text]`; the first line is a
//! header and is skipped, blank lines are ignored. Rows are fed to
//! [`Catalog::supply`] one card type at a time.

use std::fs;
use std::path::Path;

use crate::core::CatalogError;
use crate::zones::Catalog;

use super::building::Color;

/// The standard district list, compiled into the binary.
pub const DEFAULT_CARDS: &str = include_str!("../../data/cards.tsv");

/// Parse a card list into an unshuffled catalog.
pub fn parse_tsv(input: &str) -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::new();

    for (idx, raw) in input.lines().enumerate().skip(1) {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let mut fields = raw.split('\t');
        let name = next_field(&mut fields, line, "name")?;
        let quantity: usize = parse_number(next_field(&mut fields, line, "quantity")?, line, "quantity")?;
        let color: Color = next_field(&mut fields, line, "color")?
            .parse()
            .map_err(|err: super::building::UnknownColor| CatalogError::UnknownColor { line, value: err.0 })?;
        let cost: u32 = parse_number(next_field(&mut fields, line, "cost")?, line, "cost")?;
        let text = fields.next().unwrap_or("").trim();

        if cost == 0 {
            return Err(CatalogError::ZeroCost { line });
        }

        catalog.supply(name, color, cost, text, quantity);
    }

    Ok(catalog)
}

/// Read and parse a card list from disk.
pub fn load_tsv(path: &Path) -> Result<Catalog, CatalogError> {
    let input = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tsv(&input)
}

/// The embedded default catalog.
pub fn default_catalog() -> Result<Catalog, CatalogError> {
    parse_tsv(DEFAULT_CARDS)
}

fn next_field<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    line: usize,
    field: &'static str,
) -> Result<&'a str, CatalogError> {
    match fields.next().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(CatalogError::MissingField { line, field }),
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, line: usize, field: &'static str) -> Result<T, CatalogError> {
    value.parse().map_err(|_| CatalogError::BadNumber {
        line,
        field,
        value: value.to_string(),
    })
}
