//! Short code generation and validation utilities.
//!
//! Codes are exactly [`SHORT_CODE_LENGTH`] characters drawn uniformly from the
//! 62-character [`SHORT_CODE_ALPHABET`], which gives 62^6 (about 5.68e10)
//! possible codes. Randomness comes from the operating system CSPRNG.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Characters a short code may contain: digits, uppercase, lowercase.
pub const SHORT_CODE_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Number of characters in every generated short code.
pub const SHORT_CODE_LENGTH: usize = 6;

/// Random bytes at or above this value are discarded.
///
/// 248 is the largest multiple of 62 that fits in a byte, so `byte % 62` over
/// the accepted range hits every alphabet index equally often.
const REJECTION_THRESHOLD: u8 = 248;

/// Random bytes fetched per entropy call.
const ENTROPY_CHUNK: usize = 16;

/// Compiled regex for short codes accepted at the HTTP boundary.
static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z]{6}$").unwrap());

/// Source of candidate short codes.
///
/// The allocation service draws one candidate per attempt through this trait,
/// which lets tests force collisions deterministically.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces one candidate short code.
    fn generate(&self) -> String;
}

/// Production generator backed by the operating system CSPRNG.
///
/// Stateless and safe to share across tasks; `getrandom` needs no locking.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code()
    }
}

/// Generates a cryptographically secure random short code.
///
/// # Panics
///
/// Panics if the system random number generator fails. Losing the entropy
/// source is treated as fatal for the process.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    let mut code = String::with_capacity(SHORT_CODE_LENGTH);
    let mut buffer = [0u8; ENTROPY_CHUNK];

    while code.len() < SHORT_CODE_LENGTH {
        getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

        for &byte in buffer.iter().filter(|&&b| b < REJECTION_THRESHOLD) {
            if code.len() == SHORT_CODE_LENGTH {
                break;
            }
            let index = usize::from(byte) % SHORT_CODE_ALPHABET.len();
            code.push(char::from(SHORT_CODE_ALPHABET[index]));
        }
    }

    code
}

/// Returns true if `code` has the exact shape of a short code.
pub fn is_valid_short_code(code: &str) -> bool {
    SHORT_CODE_REGEX.is_match(code)
}

/// Validates a short code presented for resolution.
///
/// # Errors
///
/// Returns [`AppError::Validation`] unless the code is exactly 6 characters
/// from `[0-9A-Za-z]`.
pub fn validate_short_code(code: &str) -> Result<(), AppError> {
    if is_valid_short_code(code) {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "Short code must be exactly 6 alphanumeric characters",
            json!({ "code": code }),
        ))
    }
}
