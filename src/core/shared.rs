/// Configuration structs with a canonical default.
pub trait ConfigType {
    fn default() -> Self;
}

/// An array holding fewer values than its header counts call for.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{array} holds {found} values, expected at least {expected}")]
pub struct SizeErr {
    pub array: &'static str,
    pub expected: usize,
    pub found: usize,
}

impl SizeErr {
    pub(crate) fn check(array: &'static str, expected: usize, found: usize) -> Result<(), SizeErr> {
        if found < expected {
            Err(SizeErr { array, expected, found })
        } else {
            Ok(())
        }
    }
}
