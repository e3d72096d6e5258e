use std::fmt;

/// CPU architectures, named the way `GOARCH` spells them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
  I386,
  Amd64,
}

impl Arch {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::I386 => "386",
      Self::Amd64 => "amd64",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
