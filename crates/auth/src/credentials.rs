use subtle::ConstantTimeEq;

/// The single configured admin login.
#[derive(Clone)]
pub struct AdminCredentials {
    email: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Email compares case-insensitively; the password in constant time.
    pub fn verify(&self, email: &str, password: &str) -> bool {
        let email_ok = self.email.eq_ignore_ascii_case(email.trim());
        let password_ok: bool = self.password.as_bytes().ct_eq(password.as_bytes()).into();
        email_ok & password_ok
    }
}

impl core::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_matches_email_loosely_and_password_exactly() {
        let creds = AdminCredentials::new("admin@example.com", "s3cret");
        assert!(creds.verify(" Admin@Example.com ", "s3cret"));
        assert!(!creds.verify("admin@example.com", "S3cret"));
        assert!(!creds.verify("admin@example.com", "s3cret "));
        assert!(!creds.verify("other@example.com", "s3cret"));
    }

    #[test]
    fn debug_redacts_password() {
        let creds = AdminCredentials::new("admin@example.com", "s3cret");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("[redacted]"));
    }
}
