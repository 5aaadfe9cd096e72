/// Header-domain violations shared by the `.node`/`.ele` readers and writers.
#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderErr {
    #[error("number of boundary markers must be 0 or 1, found {0}")]
    BoundaryMarkerCount(u32),
    #[error("dimension must be 2 or 3, found {0}")]
    Dimension(u32),
    #[error("number of tetrahedra must be greater than 0")]
    EmptyElements,
    #[error("number of points must be greater than 0")]
    EmptyPoints,
    #[error("{field} must be greater than or equal to 0, found {value}")]
    Negative { field: &'static str, value: i64 },
    #[error("nodes per tetrahedron must be 4 (corners only) or 10 (corners and edges), found {0}")]
    NodesPerElement(u32),
    #[error("{field} does not fit in 32 bits: {value}")]
    TooLarge { field: &'static str, value: i64 },
}

/// Converts a raw header integer into a 32-bit count.
pub(crate) fn to_count(field: &'static str, value: i64) -> Result<u32, HeaderErr> {
    if value < 0 {
        return Err(HeaderErr::Negative { field, value });
    }
    u32::try_from(value).map_err(|_| HeaderErr::TooLarge { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_conversion() {
        assert_eq!(to_count("number of attributes", 3), Ok(3));
        assert_eq!(
            to_count("number of attributes", -1),
            Err(HeaderErr::Negative { field: "number of attributes", value: -1 })
        );
        assert!(matches!(
            to_count("number of points", 1 << 40),
            Err(HeaderErr::TooLarge { .. })
        ));
    }

    #[test]
    fn messages_name_the_constraint() {
        assert_eq!(
            HeaderErr::Dimension(4).to_string(),
            "dimension must be 2 or 3, found 4"
        );
        assert!(HeaderErr::NodesPerElement(6).to_string().contains("4 (corners only) or 10"));
    }
}
