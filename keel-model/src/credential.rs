use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A password held in memory that is wiped when dropped or cleared.
///
/// `Debug` and `Display` never print the contents.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SecureCredential {
    data: String,
}

impl SecureCredential {
    pub fn new(data: String) -> Self {
        Self { data }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Borrow the secret. Do not hold the reference past the credential's
    /// lifetime; the backing memory is zeroed on drop.
    pub fn expose(&self) -> &str {
        &self.data
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Length in user-perceived characters (Unicode scalar values).
    pub fn char_count(&self) -> usize {
        self.data.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Zero the contents in place, leaving an empty credential.
    pub fn clear(&mut self) {
        self.data.zeroize();
    }
}

impl From<String> for SecureCredential {
    fn from(data: String) -> Self {
        Self::new(data)
    }
}

impl From<&str> for SecureCredential {
    fn from(data: &str) -> Self {
        Self::new(data.to_owned())
    }
}

impl fmt::Debug for SecureCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureCredential")
            .field("len", &self.len())
            .field("data", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for SecureCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[SecureCredential: {} bytes]", self.len())
    }
}

impl PartialEq for SecureCredential {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.data.as_bytes(), other.data.as_bytes());
        if a.len() != b.len() {
            return false;
        }
        // Fold over every byte so equal-length comparisons take the same path.
        a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
    }
}

impl Eq for SecureCredential {}
