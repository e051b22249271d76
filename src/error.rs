pub type TileboardResult<T> = Result<T, TileboardError>;

#[derive(thiserror::Error, Debug)]
pub enum TileboardError {
    #[error("malformed notation: {0}")]
    Notation(String),

    #[error("coordinate out of range: {0}")]
    Coordinate(String),

    #[error("asset not found: {0}")]
    Asset(String),

    #[error("canvas too large: {0}")]
    Dimension(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TileboardError {
    pub fn notation(msg: impl Into<String>) -> Self {
        Self::Notation(msg.into())
    }

    pub fn coordinate(msg: impl Into<String>) -> Self {
        Self::Coordinate(msg.into())
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    pub fn dimension(msg: impl Into<String>) -> Self {
        Self::Dimension(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            TileboardError::notation("x")
                .to_string()
                .contains("malformed notation:")
        );
        assert!(
            TileboardError::coordinate("x")
                .to_string()
                .contains("coordinate out of range:")
        );
        assert!(
            TileboardError::asset("x")
                .to_string()
                .contains("asset not found:")
        );
        assert!(
            TileboardError::dimension("x")
                .to_string()
                .contains("canvas too large:")
        );
        assert!(
            TileboardError::config("x")
                .to_string()
                .contains("configuration error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = TileboardError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
