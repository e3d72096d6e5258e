use std::fmt;

/// Target operating systems, named the way `GOOS` spells them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Darwin,
  Windows,
}

impl Os {
  /// Returns the `GOOS` identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Darwin => "darwin",
      Self::Windows => "windows",
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
