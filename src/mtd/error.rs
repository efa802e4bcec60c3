/// Errors raised while assembling an MTD section.
///
/// Every variant is a violation of the caller's input contract. Assembly is
/// all-or-nothing: when one of these is returned no partial section exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MtdError {
    /// A mandatory parameter is absent or empty
    #[error("Missing required parameter: {0}")]
    MissingRequired(String),

    /// A collection is neither broadcastable nor of the expected entity count
    #[error("Length mismatch for '{parameter}': expected {expected}, found {found}")]
    LengthMismatch {
        /// Name of the offending parameter
        parameter: String,
        /// Entity count the parameter had to match
        expected: usize,
        /// Length that was actually supplied
        found: usize,
    },

    /// One parameter of a co-required pair was supplied without the other
    #[error("'{present}' was supplied without '{missing}'")]
    PairedParameterViolation {
        /// The parameter that was supplied
        present: String,
        /// Its partner that was not
        missing: String,
    },

    /// A value outside of a closed set of accepted values
    #[error("Invalid value '{value}' for '{parameter}', expected one of: {allowed}")]
    InvalidEnumValue {
        /// Name of the offending parameter
        parameter: String,
        /// The rejected value
        value: String,
        /// Comma separated list of accepted values
        allowed: String,
    },

    /// An assay resolved to no ms_run at all (1-based assay index)
    #[error("assay[{assay}] has no ms_run_ref")]
    MissingReference {
        /// 1-based index of the assay
        assay: usize,
    },

    /// A parameter that is documented but not implemented
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),
}

/// Field-less discriminant of [`MtdError`], for callers that branch on cause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`MtdError::MissingRequired`]
    MissingRequired,
    /// See [`MtdError::LengthMismatch`]
    LengthMismatch,
    /// See [`MtdError::PairedParameterViolation`]
    PairedParameterViolation,
    /// See [`MtdError::InvalidEnumValue`]
    InvalidEnumValue,
    /// See [`MtdError::MissingReference`]
    MissingReference,
    /// See [`MtdError::UnsupportedFeature`]
    UnsupportedFeature,
}

impl MtdError {
    /// The kind of contract violation this error reports
    pub fn kind(&self) -> ErrorKind {
        match self {
            MtdError::MissingRequired(_) => ErrorKind::MissingRequired,
            MtdError::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            MtdError::PairedParameterViolation { .. } => ErrorKind::PairedParameterViolation,
            MtdError::InvalidEnumValue { .. } => ErrorKind::InvalidEnumValue,
            MtdError::MissingReference { .. } => ErrorKind::MissingReference,
            MtdError::UnsupportedFeature(_) => ErrorKind::UnsupportedFeature,
        }
    }

    pub(crate) fn length_mismatch(parameter: impl Into<String>, expected: usize, found: usize) -> Self {
        MtdError::LengthMismatch {
            parameter: parameter.into(),
            expected,
            found,
        }
    }

    pub(crate) fn paired(present: impl Into<String>, missing: impl Into<String>) -> Self {
        MtdError::PairedParameterViolation {
            present: present.into(),
            missing: missing.into(),
        }
    }
}
