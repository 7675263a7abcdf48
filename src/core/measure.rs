//! Identity and argument surface of the load profile import measure.

use crate::utils::error::{ImportError, Result};
use crate::utils::validation::validate_file_name;
use serde::Serialize;
use std::collections::HashMap;

pub const MEASURE_NAME: &str = "Import_8760_LoadProfilePlant_HW_CHW";

pub const FILE_NAME_ARGUMENT: &str = "file_name";

pub fn description() -> &'static str {
    "This measure imports 8760 chilled water and hot water demand profiles for use in the \
     LoadProfilePlant. The source is a csv file with seven columns titles: timestep, \
     chw_supply_temp_f, chw_flow_fraction, chw_load_w, hw_supply_temp_f, hw_flow_fraction, hw_load_w."
}

// Column names match the header the reader requires.
pub fn modeler_description() -> &'static str {
    "This measure imports 8760 chilled water and hot water demand profiles for use in the \
     LoadProfilePlant. The source is a csv file with seven columns titles: timestep, \
     chw_supply_temp_f, chw_flow_fraction, chw_load_w, hw_supply_temp_f, hw_flow_fraction, hw_load_w."
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeasureArgument {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

pub fn arguments() -> Vec<MeasureArgument> {
    vec![MeasureArgument {
        name: FILE_NAME_ARGUMENT,
        display_name: "File Name",
        description: "This is the name of the file containing the schedules to be loaded.",
        required: true,
    }]
}

/// 檢查使用者參數：必填參數都要存在，且 file_name 不可為空
pub fn validate_user_arguments(user_arguments: &HashMap<String, String>) -> Result<String> {
    for argument in arguments().iter().filter(|a| a.required) {
        if !user_arguments.contains_key(argument.name) {
            return Err(ImportError::MissingConfigError {
                field: argument.name.to_string(),
            });
        }
    }

    let file_name = user_arguments
        .get(FILE_NAME_ARGUMENT)
        .map(String::as_str)
        .unwrap_or_default();
    validate_file_name(file_name)
}
