//! Per-page fetch state
//!
//! A page starts `Idle`, the pending HTTP request is its loading phase, and it
//! settles into `Ready` or `Failed`. A failed page always carries the link that
//! re-issues the request.

#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
  Idle,
  Ready(T),
  Failed { message: String, retry_href: String },
}

impl<T> PageState<T> {
  pub fn failed(message: impl Into<String>, retry_href: impl Into<String>) -> Self {
    Self::Failed { message: message.into(), retry_href: retry_href.into() }
  }

  pub fn ready(&self) -> Option<&T> {
    match self {
      Self::Ready(data) => Some(data),
      _ => None,
    }
  }

  pub fn error(&self) -> Option<&str> {
    match self {
      Self::Failed { message, .. } => Some(message),
      _ => None,
    }
  }

  pub fn retry_href(&self) -> Option<&str> {
    match self {
      Self::Failed { retry_href, .. } => Some(retry_href),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_accessors() {
    let idle: PageState<u8> = PageState::Idle;
    assert_eq!(idle, PageState::Idle);
    assert!(idle.ready().is_none());
    assert!(idle.error().is_none());

    let ready = PageState::Ready(3);
    assert_eq!(ready.ready(), Some(&3));

    let failed: PageState<u8> = PageState::failed("Backend is unreachable", "/destinations");
    assert_eq!(failed.error(), Some("Backend is unreachable"));
    assert_eq!(failed.retry_href(), Some("/destinations"));
  }
}
