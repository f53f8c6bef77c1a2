pub type TilestackResult<T> = Result<T, TilestackError>;

/// Every failure a tile render can surface. All variants are configuration
/// or input errors; none are retried internally, and any of them aborts the
/// whole tile rather than producing a partial image.
#[derive(thiserror::Error, Debug)]
pub enum TilestackError {
    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("degenerate tone curve: {0}")]
    DegenerateCurve(String),

    #[error("unsupported adjustment: \"{0}\"")]
    UnsupportedAdjustment(String),

    #[error("unsupported blend mode: \"{0}\"")]
    UnsupportedBlendMode(String),

    #[error("layer specifies src, color and mask together: {0}")]
    ConflictingLayerSpec(String),

    #[error("layer specifies only a mask: \"{0}\"")]
    MaskWithoutContent(String),

    #[error("layer specifies none of src, color or mask")]
    EmptyLayerSpec,

    #[error("source unavailable: \"{0}\"")]
    SourceUnavailable(String),

    #[error("invalid stack configuration: {0}")]
    InvalidStack(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TilestackError {
    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColor(msg.into())
    }

    pub fn invalid_stack(msg: impl Into<String>) -> Self {
        Self::InvalidStack(msg.into())
    }

    pub fn source_unavailable(name: impl Into<String>) -> Self {
        Self::SourceUnavailable(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            TilestackError::invalid_color("x")
                .to_string()
                .contains("invalid color:")
        );
        assert!(
            TilestackError::invalid_stack("x")
                .to_string()
                .contains("invalid stack configuration:")
        );
        assert!(
            TilestackError::source_unavailable("base")
                .to_string()
                .contains("source unavailable:")
        );
        assert!(
            TilestackError::UnsupportedBlendMode("soft light".to_string())
                .to_string()
                .contains("unsupported blend mode:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = TilestackError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
