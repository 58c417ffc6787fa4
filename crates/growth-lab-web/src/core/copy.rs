//! Hardcoded page copy (single locale).

/// Blocking alert shown when a required field is empty.
pub const REQUIRED_FIELDS_ALERT: &str = "Пожалуйста, заполните все обязательные поля (отмечены *)";
/// Submit button markup while the fake request is in flight.
pub const SUBMIT_SENDING_HTML: &str = r#"<span class="loading-spinner"></span> Отправка..."#;
/// Submit button text once the request is "accepted".
pub const SUBMIT_ACCEPTED: &str = "✓ Заявка принята";
/// Copy button markup after a clipboard write.
pub const COPY_DONE_HTML: &str = r#"<span class="check-icon">✓</span> Скопировано"#;
/// Copy button text after the legacy fallback.
pub const COPY_FALLBACK_DONE: &str = "Скопировано!";
/// Service card link while collapsed.
pub const SERVICE_MORE: &str = "Подробнее →";
/// Service card link while expanded.
pub const SERVICE_LESS: &str = "Скрыть";
/// Benefit icon while expanded.
pub const EXPANDED_ICON: &str = "−";
/// Benefit icon while collapsed.
pub const COLLAPSED_ICON: &str = "+";
