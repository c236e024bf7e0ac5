//! Turning command-line filter arguments into controller calls.

use anyhow::{Context, Result, bail};
use ledgerview_lib::controller::{Direction, TableController};
use ledgerview_lib::filter::{DateRange, FilterValue};

use crate::cli::ViewArgs;

/// A parsed filter argument.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterArg {
    pub key: String,
    pub value: FilterValue,
}

fn split_pair(raw: &str) -> Result<(&str, &str)> {
    let (key, value) = raw
        .split_once('=')
        .with_context(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    if key.trim().is_empty() {
        bail!("missing filter key in '{}'", raw);
    }
    Ok((key.trim(), value))
}

pub fn parse_scalar(raw: &str) -> Result<FilterArg> {
    let (key, value) = split_pair(raw)?;
    Ok(FilterArg {
        key: key.to_string(),
        value: FilterValue::scalar(value.trim()),
    })
}

pub fn parse_select(raw: &str) -> Result<FilterArg> {
    let (key, value) = split_pair(raw)?;
    let values = value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty());
    Ok(FilterArg {
        key: key.to_string(),
        value: FilterValue::multi(values),
    })
}

/// `KEY=START..END`. Bounds that are not dates are kept as invalid so the
/// range matches nothing, the same way a bad date picker value behaves.
pub fn parse_range(raw: &str) -> Result<FilterArg> {
    let (key, value) = split_pair(raw)?;
    let (start, end) = value
        .split_once("..")
        .with_context(|| format!("expected START..END in '{}'", raw))?;
    Ok(FilterArg {
        key: key.to_string(),
        value: FilterValue::Range(DateRange::parse(start, end)),
    })
}

pub fn parse_sort(raw: &str) -> Result<(String, Direction)> {
    match raw.split_once(':') {
        Some((column, dir)) => {
            let direction = Direction::parse(dir)
                .with_context(|| format!("unknown sort direction '{}'", dir))?;
            Ok((column.to_string(), direction))
        }
        None => Ok((raw.to_string(), Direction::Asc)),
    }
}

/// Applies every filter, search, sort and page argument to the controller.
pub fn apply(table: &mut TableController, args: &ViewArgs) -> Result<()> {
    let parsed = args
        .filters
        .iter()
        .map(|f| parse_scalar(f))
        .chain(args.selects.iter().map(|s| parse_select(s)))
        .chain(args.ranges.iter().map(|r| parse_range(r)))
        .collect::<Result<Vec<_>>>()?;

    for arg in parsed {
        log::debug!("Applying filter {} = {:?}", arg.key, arg.value);
        table.on_filter_change(arg.key, arg.value);
    }

    if let Some(search) = &args.search {
        table.on_search_change(search.as_str());
    }

    if let Some(sort) = &args.sort {
        let (column, direction) = parse_sort(sort)?;
        if !table.on_sort(&column, direction) {
            bail!("column '{}' does not exist or is not sortable", column);
        }
    }

    table.set_page(args.page);
    Ok(())
}
