use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid code regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 教研室与课程代码：1-32 位字母、数字、下划线或连字符
pub fn validate_code(code: &str) -> Result<(), &'static str> {
    if code.is_empty() || code.len() > 32 {
        return Err("Code length must be between 1 and 32 characters");
    }
    if !CODE_RE.is_match(code) {
        return Err("Code must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

/// 个人信息的基本校验
pub fn validate_personal_data(
    data: &crate::models::persons::entities::PersonalData,
) -> Result<(), &'static str> {
    if data.full_name.trim().is_empty() {
        return Err("Full name must not be empty");
    }
    if data.ci.trim().is_empty() {
        return Err("National ID must not be empty");
    }
    if !(0..=150).contains(&data.age) {
        return Err("Age must be between 0 and 150");
    }
    Ok(())
}

/// 注册密码：至少 8 个字符，包含字母与数字
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic())
        || !password.chars().any(|c| c.is_ascii_digit())
    {
        return Err("Password must contain letters and digits");
    }
    Ok(())
}
