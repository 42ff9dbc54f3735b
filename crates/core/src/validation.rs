//! Argument and payload checks shared by the services.

use std::borrow::Cow;

use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::models::ProjectInput;
use crate::types::DbId;

const ID_MUST_BE_POSITIVE: &str = "Id value must be greater than 0.";

/// Reject identifiers that can never name a row.
pub fn ensure_valid_id(id: DbId) -> Result<(), CoreError> {
    if id <= 0 {
        return Err(CoreError::InvalidArgument(ID_MUST_BE_POSITIVE.to_string()));
    }
    Ok(())
}

/// Unwrap a required payload, naming it in the error when absent.
pub fn require<T>(input: Option<T>, name: &'static str) -> Result<T, CoreError> {
    input.ok_or(CoreError::NullArgument(name))
}

/// Run the payload's declared constraint checks.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input.validate().map_err(CoreError::from)
}

/// Schema-level check for [`ProjectInput`]: a project must complete after it starts.
pub fn validate_project_schedule(input: &ProjectInput) -> Result<(), ValidationError> {
    if input.start_date >= input.complete_date {
        let mut err = ValidationError::new("schedule");
        err.message = Some(Cow::Borrowed(
            "Complete date must be greater than start date.",
        ));
        return Err(err);
    }
    Ok(())
}
