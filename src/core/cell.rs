//! Type-directed fallback rendering for cells without a custom renderer.

use serde_json::Value;

/// Glyph shown for boolean `true`.
pub const CHECK_GLYPH: &str = "✓";
/// Glyph shown for boolean `false`.
pub const XMARK_GLYPH: &str = "✗";
/// Copy for missing values when the column does not allow nulls.
pub const NONE_PLACEHOLDER: &str = "None";

/// Content of a rendered cell.
///
/// The variants carry enough intent for the front-end to style them: glyphs
/// get the success/error tone, the placeholder renders italic and dim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    Text(String),
    /// Boolean rendered as a check or xmark glyph.
    Glyph(bool),
    /// Italic "None" placeholder for absent values.
    Placeholder,
    /// Absent value in an `allow_null` column: renders as nothing.
    Blank,
}

impl CellContent {
    /// The text the cell occupies on screen, also used for width measuring.
    pub fn display(&self) -> &str {
        match self {
            CellContent::Text(s) => s,
            CellContent::Glyph(true) => CHECK_GLYPH,
            CellContent::Glyph(false) => XMARK_GLYPH,
            CellContent::Placeholder => NONE_PLACEHOLDER,
            CellContent::Blank => "",
        }
    }
}

/// Render a raw value with the generic fallback rules:
/// arrays join with `", "`, booleans become glyphs, null/undefined/empty
/// string become the "None" placeholder unless the column allows nulls,
/// everything else displays verbatim.
pub fn fallback_cell(value: Option<&Value>, allow_null: bool) -> CellContent {
    let absent = |allow_null: bool| {
        if allow_null {
            CellContent::Blank
        } else {
            CellContent::Placeholder
        }
    };
    match value {
        None | Some(Value::Null) => absent(allow_null),
        Some(Value::String(s)) if s.is_empty() => absent(allow_null),
        Some(Value::Bool(b)) => CellContent::Glyph(*b),
        Some(Value::Array(items)) => {
            let joined = items.iter().map(value_text).collect::<Vec<_>>().join(", ");
            CellContent::Text(joined)
        }
        Some(Value::String(s)) => CellContent::Text(s.clone()),
        Some(other) => CellContent::Text(other.to_string()),
    }
}

/// Display text for a single value, without JSON string quoting.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
