// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

//! Registration service: validation, uniqueness, and persistence.
//!
//! Uniqueness is decided by the store's write transaction; the advisory
//! existence checks here only provide a fast-path rejection with a
//! field-specific message. A race that slips past them still surfaces as
//! a conflict, never an internal error.

use chrono::Utc;

use crate::chain::is_valid_wallet_address;
use crate::models::Registration;
use crate::storage::{StoreError, WaitlistDb};

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("invalid wallet address format")]
    InvalidWallet,

    #[error("invalid email format")]
    InvalidEmail,

    #[error("Wallet address already registered")]
    WalletTaken,

    #[error("Email already registered")]
    EmailTaken,

    #[error(transparent)]
    Store(StoreError),
}

/// Syntactic email check.
///
/// Accepts `local@domain` with a dotted domain; deliberately stricter
/// than RFC 5321 in the ways that matter for a signup form.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 254 {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || domain.contains("..")
    {
        return false;
    }
    local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
        && domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

/// Canonical email form: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Waitlist registration over the embedded store.
pub struct RegistrationService<'a> {
    db: &'a WaitlistDb,
}

impl<'a> RegistrationService<'a> {
    pub fn new(db: &'a WaitlistDb) -> Self {
        Self { db }
    }

    /// Register a wallet/email pair.
    ///
    /// Validates both fields at the boundary, then inserts with a
    /// server-assigned timestamp. Returns the record exactly as stored.
    pub fn register(
        &self,
        wallet_address: &str,
        email: &str,
    ) -> Result<Registration, RegistrationError> {
        let wallet_address = wallet_address.trim();
        if !is_valid_wallet_address(wallet_address) {
            return Err(RegistrationError::InvalidWallet);
        }

        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(RegistrationError::InvalidEmail);
        }

        // Advisory fast path for a field-specific conflict message.
        if self
            .db
            .wallet_exists(wallet_address)
            .map_err(RegistrationError::Store)?
        {
            return Err(RegistrationError::WalletTaken);
        }
        if self
            .db
            .email_exists(&email)
            .map_err(RegistrationError::Store)?
        {
            return Err(RegistrationError::EmailTaken);
        }

        let registration = Registration {
            wallet_address: wallet_address.to_string(),
            email,
            created_at: Utc::now(),
        };

        // The insert transaction is authoritative; a duplicate raced in
        // between the checks above still maps to a conflict.
        match self.db.insert(&registration) {
            Ok(()) => Ok(registration),
            Err(StoreError::WalletExists) => Err(RegistrationError::WalletTaken),
            Err(StoreError::EmailExists) => Err(RegistrationError::EmailTaken),
            Err(e) => Err(RegistrationError::Store(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLET: &str = "11111111111111111111111111111111";
    const OTHER_WALLET: &str = "22222222222222222222222222222222";

    fn test_db() -> WaitlistDb {
        let path =
            std::env::temp_dir().join(format!("test-registration-{}.redb", uuid::Uuid::new_v4()));
        WaitlistDb::open(&path).expect("open test db")
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));

        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plain"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("a@b..com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a b@c.com"));
    }

    #[test]
    fn register_returns_stored_record() {
        let db = test_db();
        let service = RegistrationService::new(&db);

        let registration = service.register(WALLET, "A@B.com").unwrap();
        assert_eq!(registration.wallet_address, WALLET);
        assert_eq!(registration.email, "a@b.com");

        let stored = db.get_by_wallet(WALLET).unwrap().unwrap();
        assert_eq!(stored, registration);
    }

    #[test]
    fn malformed_wallet_is_rejected() {
        let db = test_db();
        let service = RegistrationService::new(&db);

        let err = service.register("short", "a@b.com").unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidWallet));
        assert_eq!(db.count().unwrap(), 0);
    }

    #[test]
    fn malformed_email_is_rejected() {
        let db = test_db();
        let service = RegistrationService::new(&db);

        let err = service.register(WALLET, "not-an-email").unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidEmail));
        assert_eq!(db.count().unwrap(), 0);
    }

    #[test]
    fn duplicate_wallet_conflicts() {
        let db = test_db();
        let service = RegistrationService::new(&db);
        service.register(WALLET, "a@b.com").unwrap();

        let err = service.register(WALLET, "other@b.com").unwrap_err();
        assert!(matches!(err, RegistrationError::WalletTaken));
    }

    #[test]
    fn duplicate_email_with_different_wallet_conflicts() {
        let db = test_db();
        let service = RegistrationService::new(&db);
        service.register(WALLET, "a@b.com").unwrap();

        let err = service.register(OTHER_WALLET, "a@b.com").unwrap_err();
        assert!(matches!(err, RegistrationError::EmailTaken));
    }

    #[test]
    fn email_uniqueness_is_case_insensitive() {
        let db = test_db();
        let service = RegistrationService::new(&db);
        service.register(WALLET, "a@b.com").unwrap();

        let err = service.register(OTHER_WALLET, "A@B.COM").unwrap_err();
        assert!(matches!(err, RegistrationError::EmailTaken));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let db = test_db();
        let service = RegistrationService::new(&db);

        let registration = service
            .register(&format!("  {WALLET}  "), " a@b.com ")
            .unwrap();
        assert_eq!(registration.wallet_address, WALLET);
        assert_eq!(registration.email, "a@b.com");
    }
}
