use core::fmt;

/// Which pair of shapes disagreed in a [`Error::ShapeMismatch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    /// Two compared trials carry different numbers of objective values.
    Objectives,
    /// A trial's value count differs from the number of directions.
    Directions,
    /// The penalty vector length differs from the number of matrix rows.
    Penalty,
    /// An objective matrix row is narrower or wider than the first row.
    Row,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            Self::Objectives => "objective values",
            Self::Directions => "values vs directions",
            Self::Penalty => "penalty vs objective rows",
            Self::Row => "objective matrix row",
        };
        f.write_str(what)
    }
}

/// Errors returned by front extraction and ranking.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when inputs that must agree in length do not.
    ///
    /// Fatal to the call: no partial result is produced.
    #[error("shape mismatch ({kind}): expected {expected}, got {got}")]
    ShapeMismatch {
        /// Which shapes disagreed.
        kind: ShapeKind,
        /// The length required by the other operand.
        expected: usize,
        /// The length actually supplied.
        got: usize,
    },
}

impl Error {
    pub(crate) fn shape(kind: ShapeKind, expected: usize, got: usize) -> Self {
        Self::ShapeMismatch {
            kind,
            expected,
            got,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
