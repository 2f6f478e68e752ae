use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.@+-]+$").expect("Invalid username regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^09[0-9]{9}$").expect("Invalid phone number regex"));

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}]+(?:-[\p{L}\p{N}]+)*$").expect("Invalid slug regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：3 <= x <= 150
    let len = username.chars().count();
    if !(3..=150).contains(&len) {
        return Err("Username length must be between 3 and 150 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username may contain only letters, digits and @ . + - _");
    }
    Ok(())
}

/// 手机号：11 位数字，以 09 开头
pub fn validate_phone_number(phone: &str) -> Result<(), &'static str> {
    if !phone.starts_with("09") {
        return Err("Phone number must start with 09");
    }
    if !PHONE_RE.is_match(phone) {
        return Err("Phone number must be 11 digits");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 至少 8 个字符，且不能是常见弱密码。
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

/// 检查必填的文本字段
pub fn require_fields(fields: &[(&'static str, &str)]) -> Result<(), String> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("Missing required fields: {}", missing.join(", ")))
    }
}

/// 由标题生成 URL 片段，保留各语言的字母与数字
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.trim().chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

pub fn validate_slug(slug: &str) -> Result<(), &'static str> {
    if slug.is_empty() || slug.chars().count() > 200 {
        return Err("Slug must be between 1 and 200 characters");
    }
    if !SLUG_RE.is_match(slug) {
        return Err("Slug may contain only letters, digits and single hyphens");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username() {
        assert!(validate_username("ali_rezaei").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_phone_number() {
        assert!(validate_phone_number("09121234567").is_ok());
        assert_eq!(
            validate_phone_number("08121234567"),
            Err("Phone number must start with 09")
        );
        assert!(validate_phone_number("0912123456").is_err());
        assert!(validate_phone_number("0912123456a").is_err());
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("PASSWORD");
        assert!(!result.is_valid);
        assert!(validate_password("correct-horse").is_valid);
    }

    #[test]
    fn test_require_fields() {
        assert!(require_fields(&[("title", "x"), ("content", "y")]).is_ok());
        let err = require_fields(&[("title", " "), ("content", "y"), ("subject", "")])
            .unwrap_err();
        assert_eq!(err, "Missing required fields: title, subject");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("  Hello, Rust World! "), "hello-rust-world");
        assert_eq!(slugify("آموزش برنامه نویسی"), "آموزش-برنامه-نویسی");
        assert_eq!(slugify("!!!"), "");
        assert!(validate_slug(&slugify("Intro to C++ 2024")).is_ok());
        assert!(validate_slug("bad--slug").is_err());
    }
}
