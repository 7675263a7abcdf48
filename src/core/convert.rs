use crate::domain::model::{InputRow, ProfileColumn};

pub fn to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// The six output columns after unit conversion, one value per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertedColumns {
    pub chw_supply_temp_c: Vec<f64>,
    pub hw_supply_temp_c: Vec<f64>,
    pub chw_flow_fraction: Vec<f64>,
    pub hw_flow_fraction: Vec<f64>,
    pub chw_load_w: Vec<f64>,
    pub hw_load_w: Vec<f64>,
}

impl ConvertedColumns {
    pub fn from_rows(rows: &[InputRow]) -> Self {
        let mut columns = Self::with_capacity(rows.len());
        for row in rows {
            columns.chw_supply_temp_c.push(to_celsius(row.chw_supply_temp_f));
            columns.hw_supply_temp_c.push(to_celsius(row.hw_supply_temp_f));
            // 流量比例與負載已是目標單位
            columns.chw_flow_fraction.push(row.chw_flow_fraction);
            columns.hw_flow_fraction.push(row.hw_flow_fraction);
            columns.chw_load_w.push(row.chw_load_w);
            columns.hw_load_w.push(row.hw_load_w);
        }
        columns
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            chw_supply_temp_c: Vec::with_capacity(capacity),
            hw_supply_temp_c: Vec::with_capacity(capacity),
            chw_flow_fraction: Vec::with_capacity(capacity),
            hw_flow_fraction: Vec::with_capacity(capacity),
            chw_load_w: Vec::with_capacity(capacity),
            hw_load_w: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.chw_supply_temp_c.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chw_supply_temp_c.is_empty()
    }

    /// Moves out the values for one column.
    pub fn take(&mut self, column: ProfileColumn) -> Vec<f64> {
        let values = match column {
            ProfileColumn::ChwSupplyTemp => &mut self.chw_supply_temp_c,
            ProfileColumn::HwSupplyTemp => &mut self.hw_supply_temp_c,
            ProfileColumn::ChwFlowFraction => &mut self.chw_flow_fraction,
            ProfileColumn::HwFlowFraction => &mut self.hw_flow_fraction,
            ProfileColumn::ChwLoad => &mut self.chw_load_w,
            ProfileColumn::HwLoad => &mut self.hw_load_w,
        };
        std::mem::take(values)
    }
}
