//! Centralized validation and helper functions.

/// Maximum number of samples allowed in a single manifest (DOS protection)
pub const MAX_SAMPLES: usize = 100_000;

/// Longest sample name usable as an output file stem
pub const MAX_FILENAME_LENGTH: usize = 200;

/// Check if adding another sample would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new sample.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_sample_limit(count: usize) -> Option<String> {
    if count >= MAX_SAMPLES {
        Some(format!(
            "Too many samples: adding another would exceed maximum of {MAX_SAMPLES}"
        ))
    } else {
        None
    }
}

/// Errors for sample names that cannot become file names
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Sample name too long: exceeds {MAX_FILENAME_LENGTH} characters")]
    FilenameTooLong,
    #[error("Invalid sample name: contains path separators or control characters")]
    InvalidFilename,
    #[error("Empty sample name provided")]
    EmptyFilename,
}

/// Validate a sample name for use as an output file stem.
///
/// Sample names come from user manifests and are joined onto the output
/// directory, so anything that could escape it is rejected:
/// - Empty or overlong names
/// - Path separators and `..`
/// - Control characters, including null bytes
/// - Leading dots (hidden files)
///
/// # Errors
///
/// Returns `ValidationError::EmptyFilename` if the name is empty,
/// `ValidationError::FilenameTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidFilename` if it contains invalid characters.
pub fn validate_sample_filename(name: &str) -> Result<&str, ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    if name.len() > MAX_FILENAME_LENGTH {
        return Err(ValidationError::FilenameTooLong);
    }

    if name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(ValidationError::InvalidFilename);
    }

    if name.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFilename);
    }

    if name.starts_with('.') {
        return Err(ValidationError::InvalidFilename);
    }

    Ok(name)
}
