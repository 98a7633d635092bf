use crate::error::ItauccError;
use crate::layout::schema::StatementLayout;

const ITAU_VISA_JSON: &str = include_str!("../../../../layouts/itau-visa.json");

/// Available predefined layouts.
pub const PRESETS: &[&str] = &["itau-visa"];

/// Preset used when none is named.
pub const DEFAULT_PRESET: &str = "itau-visa";

/// Load a predefined layout by name.
pub fn load_preset(name: &str) -> Result<StatementLayout, ItauccError> {
    match name {
        "itau-visa" => {
            let layout: StatementLayout = serde_json::from_str(ITAU_VISA_JSON)?;
            Ok(layout)
        }
        _ => Err(ItauccError::LayoutInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::schema::{ColumnDef, LinePatternDef};
    use crate::layout::validate_layout;
    use crate::model::Field;

    #[test]
    fn test_load_itau_visa_preset() {
        let layout = load_preset("itau-visa").unwrap();
        assert_eq!(layout.patterns.len(), 2);
        assert_eq!(layout.patterns[0].name(), "transaction");
        assert_eq!(layout.patterns[1].name(), "life_insurance");
        assert_eq!(layout.issue_date.page, 1);
        assert!(layout.surcharge.is_some());
        validate_layout(&layout).unwrap();
    }

    #[test]
    fn test_transaction_column_widths() {
        let layout = load_preset("itau-visa").unwrap();
        let LinePatternDef::FixedColumns { columns, .. } = &layout.patterns[0] else {
            panic!("expected fixed columns");
        };
        let slices: Vec<(Field, usize)> = columns
            .iter()
            .filter_map(|c| c.field().map(|f| (f, c.width())))
            .collect();
        assert_eq!(
            slices,
            vec![
                (Field::Day, 2),
                (Field::Month, 2),
                (Field::Year, 2),
                (Field::Card, 4),
                (Field::Description, 35),
                (Field::Installments, 5),
                (Field::OriginAmount, 25),
                (Field::LocalAmount, 14),
                (Field::ForeignAmount, 14),
            ]
        );
        assert!(matches!(
            columns.last(),
            Some(ColumnDef::Text { optional: true, .. })
        ));
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("santander").is_err());
    }

    #[test]
    fn test_every_preset_loads() {
        for name in PRESETS {
            assert!(load_preset(name).is_ok(), "preset {name} failed to load");
        }
        assert!(PRESETS.contains(&DEFAULT_PRESET));
    }
}
