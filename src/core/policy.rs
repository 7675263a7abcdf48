use crate::domain::model::InputRow;
use crate::domain::ports::{RowValidator, ValidationPolicy};
use crate::utils::error::{ImportError, Result};

/// Accepts every row, including negative loads and fractions above one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveRowValidator;

impl RowValidator for PermissiveRowValidator {
    fn validate_row(&self, _row: usize, _input: &InputRow) -> Result<()> {
        Ok(())
    }
}

/// Finite values, fractions in [0, 1], loads >= 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundedRowValidator;

impl BoundedRowValidator {
    fn invalid(row: usize, column: &str, reason: String) -> ImportError {
        ImportError::InvalidRow {
            row,
            column: column.to_string(),
            reason,
        }
    }
}

impl RowValidator for BoundedRowValidator {
    fn validate_row(&self, row: usize, input: &InputRow) -> Result<()> {
        let fields = [
            ("chw_supply_temp_f", input.chw_supply_temp_f),
            ("chw_flow_fraction", input.chw_flow_fraction),
            ("chw_load_w", input.chw_load_w),
            ("hw_supply_temp_f", input.hw_supply_temp_f),
            ("hw_flow_fraction", input.hw_flow_fraction),
            ("hw_load_w", input.hw_load_w),
        ];
        for (column, value) in fields {
            if !value.is_finite() {
                return Err(Self::invalid(row, column, format!("{} is not finite", value)));
            }
        }

        for (column, value) in [
            ("chw_flow_fraction", input.chw_flow_fraction),
            ("hw_flow_fraction", input.hw_flow_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Self::invalid(
                    row,
                    column,
                    format!("fraction {} is outside [0, 1]", value),
                ));
            }
        }

        for (column, value) in [("chw_load_w", input.chw_load_w), ("hw_load_w", input.hw_load_w)] {
            if value < 0.0 {
                return Err(Self::invalid(row, column, format!("load {} W is negative", value)));
            }
        }

        Ok(())
    }
}

pub fn row_validator(policy: ValidationPolicy) -> Box<dyn RowValidator> {
    match policy {
        ValidationPolicy::Permissive => Box::new(PermissiveRowValidator),
        ValidationPolicy::Bounded => Box::new(BoundedRowValidator),
    }
}

pub fn validate_rows(validator: &dyn RowValidator, rows: &[InputRow]) -> Result<()> {
    rows.iter()
        .enumerate()
        .try_for_each(|(i, row)| validator.validate_row(i, row))
}

/// Strict mode fails on a count mismatch; otherwise the mismatch is only logged.
pub fn check_row_count(actual: usize, expected: usize, strict: bool) -> Result<()> {
    if actual == expected {
        return Ok(());
    }
    if strict {
        return Err(ImportError::RowCount { expected, actual });
    }
    tracing::warn!(
        "⚠️ Expected {} rows but found {}; series will have {} points",
        expected,
        actual,
        actual
    );
    Ok(())
}
