pub mod builtin;
pub mod schema;

use crate::error::ItauccError;
use crate::extraction::Region;
use crate::model::Field;
use schema::{LinePatternDef, StatementLayout};
use std::collections::HashSet;
use std::path::Path;

/// Load a layout from a JSON file.
pub fn load_layout(path: &Path) -> Result<StatementLayout, ItauccError> {
    let content = std::fs::read_to_string(path).map_err(|e| ItauccError::LayoutLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_layout(&content, path)
}

/// Parse a layout from a JSON string.
pub fn parse_layout(json: &str, source: &Path) -> Result<StatementLayout, ItauccError> {
    let layout: StatementLayout =
        serde_json::from_str(json).map_err(|e| ItauccError::LayoutLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Parse a layout from a JSON string (no file path context).
pub fn parse_layout_str(json: &str) -> Result<StatementLayout, ItauccError> {
    let layout: StatementLayout = serde_json::from_str(json).map_err(ItauccError::Json)?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Validate that a layout is well-formed.
pub fn validate_layout(layout: &StatementLayout) -> Result<(), ItauccError> {
    if layout.name.trim().is_empty() {
        return Err(ItauccError::LayoutInvalid("name must not be empty".into()));
    }

    validate_region(&layout.issue_date, "issue_date")?;
    if let Some(ref surcharge) = layout.surcharge {
        if surcharge.description.trim().is_empty() {
            return Err(ItauccError::LayoutInvalid(
                "surcharge description must not be empty".into(),
            ));
        }
        validate_region(&surcharge.region, "surcharge")?;
    }

    if layout.patterns.is_empty() {
        return Err(ItauccError::LayoutInvalid(
            "patterns must not be empty".into(),
        ));
    }

    let mut names = HashSet::new();
    for pattern in &layout.patterns {
        let name = pattern.name();
        if name.trim().is_empty() {
            return Err(ItauccError::LayoutInvalid(
                "pattern name must not be empty".into(),
            ));
        }
        if !names.insert(name) {
            return Err(ItauccError::LayoutInvalid(format!(
                "duplicate pattern name '{}'",
                name
            )));
        }
        validate_pattern(pattern)?;
    }

    Ok(())
}

fn validate_pattern(pattern: &LinePatternDef) -> Result<(), ItauccError> {
    let name = pattern.name();

    match pattern {
        LinePatternDef::FixedColumns { columns, .. } => {
            if columns.is_empty() {
                return Err(ItauccError::LayoutInvalid(format!(
                    "pattern '{}' has no columns",
                    name
                )));
            }
            if let Some(col) = columns.iter().find(|c| c.width() == 0) {
                return Err(ItauccError::LayoutInvalid(format!(
                    "pattern '{}' has a zero-width column ({})",
                    name,
                    col.field().map(|f| f.as_str()).unwrap_or("gap")
                )));
            }
        }
        LinePatternDef::Labeled {
            label,
            amounts,
            amount_pattern,
            ..
        } => {
            if label.trim().is_empty() {
                return Err(ItauccError::LayoutInvalid(format!(
                    "pattern '{}' has an empty label",
                    name
                )));
            }
            if amounts.contains(&Field::Description) {
                return Err(ItauccError::LayoutInvalid(format!(
                    "pattern '{}' captures its label as description; it cannot also be an amount",
                    name
                )));
            }
            if amount_pattern.is_empty() {
                return Err(ItauccError::LayoutInvalid(format!(
                    "pattern '{}' has an empty amount_pattern",
                    name
                )));
            }
        }
    }

    let fields = pattern.fields();
    let mut seen = HashSet::new();
    for field in &fields {
        if !seen.insert(*field) {
            return Err(ItauccError::LayoutInvalid(format!(
                "pattern '{}' captures '{}' more than once",
                name, field
            )));
        }
    }

    if !seen.contains(&Field::Description) {
        return Err(ItauccError::LayoutInvalid(format!(
            "pattern '{}' does not capture a description",
            name
        )));
    }
    if !fields.iter().any(|f| f.is_amount()) {
        return Err(ItauccError::LayoutInvalid(format!(
            "pattern '{}' captures neither local_amount nor foreign_amount",
            name
        )));
    }

    Ok(())
}

fn validate_region(region: &Region, what: &str) -> Result<(), ItauccError> {
    if region.page == 0 {
        return Err(ItauccError::LayoutInvalid(format!(
            "{} region: pages are numbered from 1",
            what
        )));
    }
    let b = &region.bbox;
    if !(b.x_min < b.x_max && b.y_min < b.y_max) {
        return Err(ItauccError::LayoutInvalid(format!(
            "{} region: bbox must have x_min < x_max and y_min < y_max",
            what
        )));
    }
    if region.tolerance < 0.0 || region.tolerance.is_nan() {
        return Err(ItauccError::LayoutInvalid(format!(
            "{} region: tolerance must not be negative",
            what
        )));
    }
    Ok(())
}
