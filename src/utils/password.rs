use crate::config::AppConfig;
use crate::errors::RecordsError;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

/// 生成用户级随机盐（16 字节，十六进制编码）
pub fn generate_salt() -> String {
    let bytes: [u8; 16] = rand::random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// 使用用户盐哈希密码
pub fn hash_password(password: &str, salt: &str) -> Result<String, RecordsError> {
    let config = AppConfig::get();
    let params = Params::new(
        config.argon2.memory_cost,
        config.argon2.time_cost,
        config.argon2.parallelism,
        None,
    )
    .map_err(|e| RecordsError::internal(format!("Argon2 参数错误: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    // 十六进制字符都在 B64 字母表内，可直接作为 argon2 盐
    let salt = SaltString::from_b64(salt)
        .map_err(|e| RecordsError::internal(format!("盐格式错误: {e}")))?;
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| RecordsError::internal(format!("密码哈希失败: {e}")))?;
    Ok(hash.to_string())
}

/// 验证密码，盐必须与哈希中记录的一致
pub fn verify_password(password: &str, salt: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => {
            parsed_hash.salt.map(|s| s.as_str()) == Some(salt)
                && Argon2::default()
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok()
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salt_shape() {
        let salt = generate_salt();
        assert_eq!(salt.len(), 32);
        assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(salt, generate_salt());
    }

    #[test]
    fn test_hash_and_verify() {
        let salt = generate_salt();
        let hash = hash_password("V-12345678", &salt).unwrap();
        assert_ne!(hash, "V-12345678");
        assert!(verify_password("V-12345678", &salt, &hash));
        assert!(!verify_password("V-12345679", &salt, &hash));
    }

    #[test]
    fn test_wrong_salt_rejected() {
        let salt = generate_salt();
        let hash = hash_password("secret", &salt).unwrap();
        assert!(!verify_password("secret", &generate_salt(), &hash));
        assert!(!verify_password("secret", &salt, "not-a-hash"));
    }

    #[test]
    fn test_malformed_salt_is_internal_error() {
        let err = hash_password("secret", "").unwrap_err();
        assert!(matches!(err, RecordsError::Internal(_)));
    }
}
