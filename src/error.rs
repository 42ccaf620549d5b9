use core::fmt;

/// Failures surfaced by [`SpiMaster`](crate::SpiMaster).
///
/// The engine itself has no failure modes; everything here originates in the
/// port implementation and is passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Reading or writing a port word failed.
    Port(E),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Port(e) => write!(f, "port access failed: {:?}", e),
        }
    }
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::Port(e)
    }
}
