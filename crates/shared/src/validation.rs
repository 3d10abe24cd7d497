//! Field validators shared by request DTOs.

use validator::ValidationError;

/// Maximum length of a staff username.
const MAX_USERNAME_LEN: usize = 32;

/// Maximum length of an icon identifier (e.g. `fa-scroll`, `shield_check`).
const MAX_ICON_LEN: usize = 64;

/// Maximum length of a section or package description.
const MAX_DESCRIPTION_LEN: usize = 2000;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Rejects empty or whitespace-only text.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("blank", "Value must not be blank"))
    } else {
        Ok(())
    }
}

/// Usernames: 1 to 32 characters, no whitespace.
pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.chars().count() > MAX_USERNAME_LEN {
        return Err(error(
            "username_length",
            "Username must be between 1 and 32 characters",
        ));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(error("username_whitespace", "Username must not contain spaces"));
    }
    Ok(())
}

/// Icon identifiers are short ASCII tokens made of letters, digits, `-` and `_`.
pub fn validate_icon(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() > MAX_ICON_LEN
        || !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(error(
            "icon_format",
            "Icon must be letters, digits, '-' or '_' (max 64)",
        ));
    }
    Ok(())
}

/// Images are either absolute http(s) URLs or site-relative paths.
pub fn validate_image_ref(value: &str) -> Result<(), ValidationError> {
    if value.is_empty()
        || value.starts_with("https://")
        || value.starts_with("http://")
        || value.starts_with('/')
    {
        Ok(())
    } else {
        Err(error(
            "image_ref",
            "Image must be an http(s) URL or a path starting with '/'",
        ))
    }
}

/// Descriptions: at most 2000 characters.
pub fn validate_description(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > MAX_DESCRIPTION_LEN {
        Err(error(
            "description_length",
            "Description must be at most 2000 characters",
        ))
    } else {
        Ok(())
    }
}

/// Applies `check` to the new value of a sparse-update field.
///
/// Absent (`None`) and explicit `null` (`Some(None)`) always pass.
pub fn validate_patch_value(
    value: &Option<Option<String>>,
    check: fn(&str) -> Result<(), ValidationError>,
) -> Result<(), ValidationError> {
    match value {
        Some(Some(v)) => check(v),
        _ => Ok(()),
    }
}
