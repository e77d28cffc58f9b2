use std::collections::TryReserveError;

/// Represents errors that can occur while mutating a container
#[derive(Debug)]
pub enum Error {
    /// The allocator could not satisfy a reservation
    Alloc(TryReserveError),

    /// Index is past the end of a vector (index, length)
    OutOfBounds { index: usize, len: usize },

    /// Bit lies outside the bitset's inclusive universe (bit, max)
    OutOfUniverse { bit: usize, max: usize },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChainCollectionsError: {self:?}")
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Alloc(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(value: TryReserveError) -> Self {
        Self::Alloc(value)
    }
}

/// Container result
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_error_keeps_source() {
        let mut v: Vec<u64> = Vec::new();
        let err = v.try_reserve_exact(usize::MAX).unwrap_err();
        let e = Error::from(err);
        assert!(matches!(e, Error::Alloc(_)));
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn display_names_variant() {
        let e = Error::OutOfBounds { index: 3, len: 1 };
        let s = e.to_string();
        assert!(s.contains("OutOfBounds"), "{s}");
        assert!(std::error::Error::source(&e).is_none());
    }
}
