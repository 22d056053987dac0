use std::fmt;

/// Which request input was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Root,
    ScaleType,
}

impl InputField {
    pub fn name(&self) -> &'static str {
        match self {
            InputField::Root => "root",
            InputField::ScaleType => "scale",
        }
    }
}

/// Rejected scale request. Every variant is a caller mistake, never a crash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input was absent or blank.
    MissingInput(InputField),
    /// Root spelling is not in the pitch table (the offending input).
    UnrecognizedRoot(String),
    /// Scale identifier is not one of the supported formulas.
    UnsupportedScaleType(String),
}

impl ValidationError {
    /// Short machine-readable kind, stable across releases.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingInput(_) => "missing_input",
            Self::UnrecognizedRoot(_) => "unrecognized_root",
            Self::UnsupportedScaleType(_) => "unsupported_scale_type",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput(field) => write!(f, "Missing {}.", field.name()),
            Self::UnrecognizedRoot(root) => write!(f, "Unrecognized root note '{}'.", root),
            Self::UnsupportedScaleType(scale) => write!(f, "Unsupported scale type '{}'.", scale),
        }
    }
}

impl std::error::Error for ValidationError {}
