//! Utility macros used internally by the binders.

/// Returns early with an error if a condition is not met.
///
/// Works like `assert!`, but returns `Err($error)` instead of panicking.
///
/// # Example
///
/// ```ignore
/// ensure!(!name.is_empty(), BindError::invalid_key(key, "missing property name"));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
