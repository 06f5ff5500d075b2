//! Validation for catalog input (script and worker registration).
//!
//! Pure functions shared by the API handlers. Lives in `core` to keep the
//! zero-internal-dependency constraint.

use crate::error::CoreError;

/// Maximum length of a script or worker name.
const MAX_NAME_LEN: usize = 128;

/// Maximum length of a worker location (host or address).
const MAX_LOCATION_LEN: usize = 255;

/// Maximum size of a compose bundle, in bytes.
const MAX_BUNDLE_BYTES: usize = 512 * 1024;

/// Validate a script or worker name.
///
/// Rules:
/// - Must not be empty.
/// - Must not exceed `MAX_NAME_LEN` characters.
/// - Must contain only alphanumeric, hyphen, underscore, or dot characters.
///
/// Script names double as directory names on the worker side, so the
/// charset is deliberately conservative.
pub fn validate_name(kind: &'static str, name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::Validation(format!(
            "{kind} name must not be empty"
        )));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{kind} name must not exceed {MAX_NAME_LEN} characters"
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(CoreError::Validation(format!(
            "{kind} name may only contain alphanumeric, '-', '_', and '.' characters"
        )));
    }
    Ok(())
}

/// Validate a worker location (hostname or IP address).
///
/// The location is interpolated into the agent URL as
/// `http://{location}:{port}/...`, so it must not carry a scheme, port,
/// or path of its own.
pub fn validate_location(location: &str) -> Result<(), CoreError> {
    if location.is_empty() {
        return Err(CoreError::Validation(
            "Worker location must not be empty".to_string(),
        ));
    }
    if location.len() > MAX_LOCATION_LEN {
        return Err(CoreError::Validation(format!(
            "Worker location must not exceed {MAX_LOCATION_LEN} characters"
        )));
    }
    if location.contains("://") || location.contains(':') || location.contains('/') {
        return Err(CoreError::Validation(
            "Worker location must be a bare host or address (no scheme, port, or path)"
                .to_string(),
        ));
    }
    Ok(())
}

/// Validate compose bundle content.
pub fn validate_bundle(content: &str) -> Result<(), CoreError> {
    if content.is_empty() {
        return Err(CoreError::Validation(
            "Script content must not be empty".to_string(),
        ));
    }
    if content.len() > MAX_BUNDLE_BYTES {
        return Err(CoreError::Validation(format!(
            "Script content must not exceed {MAX_BUNDLE_BYTES} bytes"
        )));
    }
    Ok(())
}
