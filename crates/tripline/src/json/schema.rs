use schemars::schema_for;

use crate::{output::TripOutput, params::TripParams};

pub fn generate_output_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(TripOutput))
}

pub fn generate_params_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(TripParams))
}
