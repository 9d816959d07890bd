// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery confirmation codes.
//!
//! A 6-digit code is generated when the order is created and is the sole
//! credential for the onway → delivered transition. The customer reads it
//! to the driver at the door.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Errors from confirmation code parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodeError {
    #[error("confirmation code must be exactly {expected} digits, got {got}")]
    WrongLength { expected: usize, got: usize },
    #[error("confirmation code must contain only digits")]
    NonDigit,
}

/// A 6-digit delivery confirmation code.
///
/// Immutable once set. Comparison is exact string equality after trimming
/// the entered text; no numeric interpretation is applied, so leading
/// zeros are significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfirmCode(SmolStr);

impl ConfirmCode {
    pub const LEN: usize = 6;

    /// Generate a fresh random code (order-creation time).
    pub fn generate() -> Self {
        Self(SmolStr::new(nanoid::nanoid!(6, &DIGITS)))
    }

    /// Parse entered text into a code: trims surrounding whitespace and
    /// requires exactly six ASCII digits.
    pub fn parse(entered: &str) -> Result<Self, CodeError> {
        let trimmed = entered.trim();
        if trimmed.len() != Self::LEN {
            return Err(CodeError::WrongLength { expected: Self::LEN, got: trimmed.len() });
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(CodeError::NonDigit);
        }
        Ok(Self(SmolStr::new(trimmed)))
    }

    /// Whether entered text matches this code (trim, then exact equality).
    pub fn matches(&self, entered: &str) -> bool {
        entered.trim() == self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConfirmCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ConfirmCode {
    fn from(s: &str) -> Self {
        Self(SmolStr::new(s))
    }
}

impl From<String> for ConfirmCode {
    fn from(s: String) -> Self {
        Self(SmolStr::new(&s))
    }
}

#[cfg(test)]
#[path = "code_tests.rs"]
mod tests;
