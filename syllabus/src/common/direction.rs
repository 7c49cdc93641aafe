use std::fmt::Display;

/// Specifies the sort direction of an indexed value.
///
/// # Purpose
/// Decides whether the encoded bytes of a value sort in the same order as the
/// value itself (`Ascending`) or in reverse (`Descending`). Each field of an
/// index carries its own direction, so a composite key may mix both.
///
/// # Variants
/// - `Ascending`: smaller values produce smaller keys
/// - `Descending`: smaller values produce larger keys
///
/// # Characteristics
/// - **Copy**: Can be copied instead of cloned
/// - **Closed**: Exactly two directions exist; encoders and decoders match on
///   this enum exhaustively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Sort in ascending order (smallest to largest)
    Ascending,
    /// Sort in descending order (largest to smallest)
    Descending,
}

impl Direction {
    #[inline]
    pub fn is_asc(&self) -> bool {
        *self == Direction::Ascending
    }

    /// Returns the opposite direction.
    #[inline]
    pub fn reverse(&self) -> Direction {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Ascending => write!(f, "asc"),
            Direction::Descending => write!(f, "desc"),
        }
    }
}
