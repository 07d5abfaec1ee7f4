/// Convenience result type used across the crate.
pub type DinoResult<T> = Result<T, DinoError>;

/// Top-level error taxonomy.
#[derive(thiserror::Error, Debug)]
pub enum DinoError {
    /// Invalid caller-provided data or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while fetching contribution data.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Errors while rendering SVG or GIF output.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while collecting stats or patching the README.
    #[error("patch error: {0}")]
    Patch(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DinoError {
    /// Build a [`DinoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DinoError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`DinoError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DinoError::Patch`] value.
    pub fn patch(msg: impl Into<String>) -> Self {
        Self::Patch(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_category_prefix() {
        assert_eq!(
            DinoError::fetch("timed out").to_string(),
            "fetch error: timed out"
        );
        assert_eq!(
            DinoError::patch("marker missing").to_string(),
            "patch error: marker missing"
        );
    }

    #[test]
    fn anyhow_converts_transparently() {
        let err: DinoError = anyhow::anyhow!("disk full").into();
        assert_eq!(err.to_string(), "disk full");
    }
}
