//! Admin Name Value Object
//!
//! 管理者アカウントのログイン識別子。
//!
//! ## 設計方針
//! - ASCII文字のみ許可（a-z, 0-9, _ - .）
//! - 大文字入力は受け付けるが、保存形は小文字
//! - NFKC正規化 → 検証 → 小文字化 の順で処理
//!
//! ## 不変条件
//! - 長さ: 3〜32文字（正規化後）
//! - 先頭・末尾: 英数字
//! - 空白禁止

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use kernel::error::app_error::{AppError, AppResult};

/// Minimum length for admin name (in characters)
pub const ADMIN_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for admin name (in characters)
pub const ADMIN_NAME_MAX_LENGTH: usize = 32;

/// Allowed special characters in admin name
const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '-', '.'];

/// Admin login name, normalized to lowercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdminName(String);

impl AdminName {
    /// Create a new admin name with validation
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = raw.as_ref().trim().nfkc().collect();
        let lowered = normalized.to_lowercase();

        let char_count = lowered.chars().count();
        if !(ADMIN_NAME_MIN_LENGTH..=ADMIN_NAME_MAX_LENGTH).contains(&char_count) {
            return Err(AppError::bad_request(format!(
                "Admin name must be {ADMIN_NAME_MIN_LENGTH}-{ADMIN_NAME_MAX_LENGTH} characters"
            )));
        }

        let valid_chars = lowered
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || ALLOWED_SPECIAL_CHARS.contains(&c));
        if !valid_chars {
            return Err(AppError::bad_request(
                "Admin name may contain only a-z, 0-9, underscore, hyphen, dot",
            ));
        }

        let first = lowered.chars().next().unwrap_or(' ');
        let last = lowered.chars().last().unwrap_or(' ');
        if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
            return Err(AppError::bad_request(
                "Admin name must start and end with a letter or digit",
            ));
        }

        Ok(Self(lowered))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdminName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AdminName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
