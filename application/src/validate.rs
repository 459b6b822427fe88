use error_stack::Report;

use kernel::KernelError;

/// Trims `value` and checks it is non-empty and at most `max` characters.
pub(crate) fn required_text(
    value: &str,
    field: &str,
    max: usize,
) -> error_stack::Result<String, KernelError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(
            Report::new(KernelError::Validation).attach_printable(format!("{field} is required."))
        );
    }
    if trimmed.chars().count() > max {
        return Err(Report::new(KernelError::Validation)
            .attach_printable(format!("{field} must be at most {max} characters.")));
    }
    Ok(trimmed.to_string())
}
