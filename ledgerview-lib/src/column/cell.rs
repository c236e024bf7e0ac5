//! Cell display nodes and built-in renderers.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use crate::model::Value;

/// Visual tone for badge cells (status pills, approval states).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Success,
    Warning,
    Danger,
    Info,
}

/// A rendered table cell.
///
/// This is the presentation-level node a renderer produces. Hosts decide how
/// to draw each variant; [`Cell::plain_text`] gives text-only hosts a flat
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    /// Nothing to show (absent or null value).
    #[default]
    Empty,
    /// Plain text.
    Text(String),
    /// A short label drawn as a coloured pill.
    Badge { label: String, tone: Tone },
    /// A label pointing at another screen or document.
    Link { label: String, target: String },
}

impl Cell {
    /// Creates a text cell, or [`Cell::Empty`] when the text is blank.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(text)
        }
    }

    /// Creates a badge cell.
    pub fn badge(label: impl Into<String>, tone: Tone) -> Self {
        Cell::Badge {
            label: label.into(),
            tone,
        }
    }

    /// Creates a link cell.
    pub fn link(label: impl Into<String>, target: impl Into<String>) -> Self {
        Cell::Link {
            label: label.into(),
            target: target.into(),
        }
    }

    /// Returns `true` for [`Cell::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Flattens the cell to the text a terminal or export would show.
    pub fn plain_text(&self) -> &str {
        match self {
            Cell::Empty => "",
            Cell::Text(text) => text,
            Cell::Badge { label, .. } | Cell::Link { label, .. } => label,
        }
    }
}

/// Function turning a resolved value into a cell.
///
/// Renderers only ever see a shared reference, so they cannot alter the
/// record they are drawing.
pub type Renderer = Arc<dyn Fn(&Value) -> Cell + Send + Sync>;

/// Default renderer: the value's text, lists joined with `", "`.
pub fn text() -> Renderer {
    Arc::new(|value| Cell::text(display_text(value)))
}

/// Renders numbers rounded to `scale` decimal places (`1234.5` → `1234.50`).
///
/// Non-numeric values fall back to their text.
pub fn amount(scale: u32) -> Renderer {
    Arc::new(move |value| match value.as_decimal() {
        Some(d) => Cell::Text(format_amount(d, scale)),
        None => Cell::text(display_text(value)),
    })
}

/// Renders values that parse as dates using a chrono format string.
///
/// Values that are not dates render as their raw text so that a bad field
/// is still visible to the operator.
pub fn date(format: impl Into<String>) -> Renderer {
    let format = format.into();
    Arc::new(move |value| match value.as_date() {
        Some(d) => Cell::Text(d.format(&format).to_string()),
        None => Cell::text(display_text(value)),
    })
}

/// Renders booleans (and `"true"`/`"false"` strings) as `Yes`/`No`.
pub fn yes_no() -> Renderer {
    Arc::new(|value| match truthiness(value) {
        Some(true) => Cell::Text("Yes".to_string()),
        Some(false) => Cell::Text("No".to_string()),
        None => Cell::text(display_text(value)),
    })
}

/// Renders the value as a badge, picking the tone from `tones`.
///
/// Lookup is case-insensitive; unknown values get [`Tone::Neutral`].
pub fn badge(tones: HashMap<String, Tone>) -> Renderer {
    let tones: HashMap<String, Tone> = tones
        .into_iter()
        .map(|(k, v)| (k.to_lowercase(), v))
        .collect();
    Arc::new(move |value| {
        let label = display_text(value);
        if label.is_empty() {
            return Cell::Empty;
        }
        let tone = tones
            .get(&label.to_lowercase())
            .copied()
            .unwrap_or_default();
        Cell::Badge { label, tone }
    })
}

fn display_text(value: &Value) -> String {
    match value {
        Value::List(items) => items
            .iter()
            .filter_map(Value::to_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_text().unwrap_or_default(),
    }
}

fn truthiness(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn format_amount(d: Decimal, scale: u32) -> String {
    let mut rounded = d.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    rounded.to_string()
}
