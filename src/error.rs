use core::fmt;

/// Driver error, generic over the transport's error type.
///
/// Every bring-up step and write chunk surfaces its first error upward
/// unchanged; the driver never retries. Buffer-geometry violations are
/// debug assertions, not an `Error` variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// A required collaborator (transport or supply line) failed its
    /// readiness check before any command was issued.
    NotReady,
    /// A bus write failed mid-sequence. The panel may be partially
    /// configured or partially updated; the caller must re-run bring-up
    /// or rewrite the region.
    Transport(E),
    /// The requested capability variant (pixel format, orientation) is
    /// fixed at build time and cannot be changed.
    NotSupported,
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::Transport(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotReady => write!(f, "required device not ready"),
            Error::Transport(e) => write!(f, "bus transfer failed: {e:?}"),
            Error::NotSupported => write!(f, "not supported"),
        }
    }
}
