//! Field-level checks shared by the validators and the repositories.
//!
//! Each check returns the first violated rule as a localized message.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidateEmail;

/// Maximum length (in characters) of name-like fields.
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum length (in characters) of relation type labels.
pub const MAX_LABEL_LENGTH: usize = 50;

const COLOR_CODE_PATTERN: &str = r"^#[0-9A-Fa-f]{6}$";

static COLOR_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(COLOR_CODE_PATTERN).expect("valid regex"));

/// Required name field: non-blank and at most [`MAX_NAME_LENGTH`] characters.
pub fn check_name(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field}を入力してください"));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "{field}は{MAX_NAME_LENGTH}文字以内で入力してください"
        ));
    }
    Ok(())
}

/// Same as [`check_name`], skipped when the field is absent (partial updates).
pub fn check_optional_name(value: Option<&str>, field: &str) -> Result<(), String> {
    value.map_or(Ok(()), |v| check_name(v, field))
}

/// Optional short label such as a relation or role type.
pub fn check_short_label(value: Option<&str>, field: &str) -> Result<(), String> {
    let Some(value) = value else {
        return Ok(());
    };
    if value.trim().is_empty() {
        return Err(format!("{field}を入力してください"));
    }
    if value.chars().count() > MAX_LABEL_LENGTH {
        return Err(format!(
            "{field}は{MAX_LABEL_LENGTH}文字以内で入力してください"
        ));
    }
    Ok(())
}

/// Required email address.
pub fn check_email(value: &str) -> Result<(), String> {
    check_name(value, "メールアドレス")?;
    if !value.trim().to_string().validate_email() {
        return Err("メールアドレスの形式が正しくありません".to_string());
    }
    Ok(())
}

/// Numeric field that must be zero or greater. `NaN` is rejected.
pub fn check_non_negative<T>(value: Option<T>, field: &str) -> Result<(), String>
where
    T: PartialOrd + Default + Copy,
{
    match value {
        Some(v) if !(v >= T::default()) => Err(format!("{field}は0以上で入力してください")),
        _ => Ok(()),
    }
}

/// Integer field that must be one or greater.
pub fn check_positive(value: Option<i32>, field: &str) -> Result<(), String> {
    match value {
        Some(v) if v < 1 => Err(format!("{field}は1以上で入力してください")),
        _ => Ok(()),
    }
}

/// Optional `#RRGGBB` color code.
pub fn check_color_code(value: Option<&str>) -> Result<(), String> {
    match value {
        Some(v) if !COLOR_CODE_RE.is_match(v) => {
            Err("カラーコードは#RRGGBB形式で入力してください".to_string())
        }
        _ => Ok(()),
    }
}
