use std::fmt;
use zeroize::Zeroize;

/// A sensitive string that must never be logged, cloned, or serialized.
///
/// 敏感字符串：
/// - 不可 Clone
/// - 不可 Serialize / Deserialize
/// - 不可 Debug / Display 输出真实内容
/// - Drop 时清零内存
pub struct SecretString {
    inner: String,
}

impl SecretString {
    /// Create a new SecretString.
    ///
    /// 创建一个敏感字符串。
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// An empty secret, the value of a password field nobody has typed into yet.
    pub fn empty() -> Self {
        Self {
            inner: String::new(),
        }
    }

    /// Borrow the inner secret as &str.
    ///
    /// 只允许通过借用方式读取。
    pub fn expose(&self) -> &str {
        &self.inner
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Explicit copy for handing the secret to a request payload.
    pub fn duplicate(&self) -> Self {
        Self::new(self.inner.clone())
    }

    /// Compare two secrets without exposing either of them to the caller.
    pub fn matches(&self, other: &SecretString) -> bool {
        self.inner == other.inner
    }
}

/* ===========================
 * Trait implementations
 * ===========================
 */

impl Default for SecretString {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inner.is_empty() {
            f.write_str("[EMPTY]")
        } else {
            f.write_str("[REDACTED]")
        }
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}
