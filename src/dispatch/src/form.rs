//! Raw form input and its conversion into a request

use client::SearchRequest;
use config::SearchDefaults;
use error::{Result, SearchError};
use serde::{Deserialize, Serialize};

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query";

/// The three input fields exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchForm {
    pub query: String,
    pub top_k: String,
    pub threshold: String,
}

impl SearchForm {
    pub fn new(
        query: impl Into<String>,
        top_k: impl Into<String>,
        threshold: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            top_k: top_k.into(),
            threshold: threshold.into(),
        }
    }

    /// Numeric fields keep their leading number and drop the rest (`"3.7"` -> 3,
    /// `"10 results"` -> 10). A field with no leading number takes the
    /// configured default. Bounds are not checked.
    pub fn to_request(&self, defaults: &SearchDefaults) -> Result<SearchRequest> {
        if self.query.is_empty() {
            return Err(SearchError::validation(EMPTY_QUERY_MESSAGE));
        }

        let top_k = parse_leading_int(&self.top_k).unwrap_or_else(|| {
            if !self.top_k.trim().is_empty() {
                tracing::warn!(top_k = %self.top_k, "no number in top_k, using default");
            }
            defaults.default_top_k
        });

        let threshold = parse_leading_float(&self.threshold).unwrap_or_else(|| {
            if !self.threshold.trim().is_empty() {
                tracing::warn!(threshold = %self.threshold, "no number in threshold, using default");
            }
            defaults.default_threshold
        });

        Ok(SearchRequest {
            text: self.query.clone(),
            top_k,
            threshold,
        })
    }
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

/// Leading integer of `s`, in decimal or `0x` hex. Saturates at the i64 range.
fn parse_leading_int(s: &str) -> Option<i64> {
    let (negative, rest) = split_sign(s.trim_start());

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        seen = true;
        value = value.saturating_mul(radix as i64).saturating_add(d as i64);
    }

    if !seen {
        return None;
    }
    Some(if negative { value.saturating_neg() } else { value })
}

/// Longest leading decimal literal of `s` (`"0.3abc"` -> 0.3, `"1e-2x"` -> 0.01).
/// Non-finite values are rejected since JSON cannot carry them.
fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'-' | b'+') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
