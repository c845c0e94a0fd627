//! JSON schema export

use crate::error::UamError;
use crate::types::UamV1;
use schemars::schema::RootSchema;
use schemars::schema_for;

/// JSON schema for [`UamV1`]
#[must_use]
pub fn uam_v1_schema() -> RootSchema {
    schema_for!(UamV1)
}

/// JSON schema for [`UamV1`] as a JSON value
///
/// # Errors
/// Only if the schema fails to serialize.
pub fn uam_v1_json_schema() -> Result<serde_json::Value, UamError> {
    Ok(serde_json::to_value(uam_v1_schema())?)
}
