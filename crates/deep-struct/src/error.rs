use thiserror::Error;

/// Errors raised while navigating a wrapped value.
///
/// Scalar inference never produces one of these: every failed strategy falls
/// through to the next and the last one keeps the text as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavError {
    /// The member is not a present key, not a `?`/`=` form, and not a
    /// native capability of the wrapped value.
    #[error("undefined accessor `{member}` for {target}")]
    UndefinedAccessor {
        member: String,
        target: &'static str,
    },

    #[error("wrong number of arguments for `{member}` (given {given}, expected {expected})")]
    ArityMismatch {
        member: String,
        expected: usize,
        given: usize,
    },

    /// `index` is the index as requested, negative indices included.
    #[error("index {index} out of range for {len} element(s)")]
    IndexOutOfRange { index: i64, len: usize },
}

pub type Result<T> = std::result::Result<T, NavError>;

/// Fails with [`NavError::ArityMismatch`] unless `given == expected`.
pub(crate) fn check_arity(member: &str, expected: usize, given: usize) -> Result<()> {
    if given != expected {
        return Err(NavError::ArityMismatch {
            member: member.to_string(),
            expected,
            given,
        });
    }
    Ok(())
}
