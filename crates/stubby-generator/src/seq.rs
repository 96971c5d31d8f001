use crate::Generator;
use std::sync::atomic::{AtomicU64, Ordering};
use stubby_core::Identifier;

const DIGITS: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DEFAULT_WIDTH: usize = 4;

/// A sequential generator: a fixed prefix followed by a base62 counter.
///
/// Produces "wh0000", "wh0001", ... "wh000Z", "wh0010" and so on. The counter is
/// left-padded with `0` up to four digits and grows past that as needed, so
/// a single instance never repeats itself.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

fn encode_base62(mut value: u64) -> String {
    let mut digits = Vec::new();
    loop {
        digits.push(DIGITS[(value % 62) as usize]);
        value /= 62;
        if value == 0 {
            break;
        }
    }
    while digits.len() < DEFAULT_WIDTH {
        digits.push(b'0');
    }
    digits.iter().rev().map(|&b| b as char).collect()
}

impl Generator for SeqGenerator {
    type Output = Identifier;

    fn generate(&self) -> Self::Output {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        Identifier::new(format!("{}{}", self.prefix, encode_base62(count)))
    }
}
