use super::Error;
use crate::Diagnostic;

/// A record shape, its configuration, or a contract it is bound against
/// cannot be compiled into a plan.
///
/// Every problem found while analyzing the shape is collected before this
/// error is raised, so the caller sees all of them at once.
#[derive(Debug)]
pub(super) struct InvalidRecordError {
    type_name: Box<str>,
    diagnostics: Vec<Diagnostic>,
}

impl std::error::Error for InvalidRecordError {}

impl core::fmt::Display for InvalidRecordError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid record `{}`: ", self.type_name)?;

        for (i, diagnostic) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            core::fmt::Display::fmt(diagnostic, f)?;
        }

        Ok(())
    }
}

impl Error {
    /// Creates an invalid record error carrying every diagnostic found.
    pub fn invalid_record(type_name: impl Into<String>, diagnostics: Vec<Diagnostic>) -> Error {
        debug_assert!(!diagnostics.is_empty());

        Error::from(super::ErrorKind::InvalidRecord(InvalidRecordError {
            type_name: type_name.into().into(),
            diagnostics,
        }))
    }

    /// Returns `true` if this error is an invalid record error.
    pub fn is_invalid_record(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidRecord(_))
    }

    /// Returns the diagnostics carried by an invalid record error, or an
    /// empty slice for every other kind of error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self.kind() {
            super::ErrorKind::InvalidRecord(err) => &err.diagnostics,
            _ => &[],
        }
    }
}
