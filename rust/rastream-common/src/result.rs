pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Returns an `InvalidArgument` error from the enclosing function when the
/// condition does not hold.
///
/// ```
/// fn check(count: i64) -> rastream_common::Result<()> {
///     rastream_common::verify_arg!(count, count >= 0);
///     Ok(())
/// }
/// assert!(check(-1).unwrap_err().is_invalid_arg());
/// ```
#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidArgument {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;

    fn checked_count(count: i64) -> crate::Result<usize> {
        verify_arg!(count, count >= 0);
        Ok(count as usize)
    }

    #[test]
    fn test_verify_arg() {
        assert_eq!(checked_count(42).unwrap(), 42);
        let err = checked_count(-5).unwrap_err();
        match err.kind() {
            ErrorKind::InvalidArgument { name, message } => {
                assert_eq!(name, "count");
                assert_eq!(message, "count >= 0");
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }
}
