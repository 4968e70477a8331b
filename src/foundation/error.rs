use crate::roster::schema::SchemaErrors;

pub type ReelResult<T> = Result<T, ReelError>;

#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("roster schema error:\n{0}")]
    Schema(#[from] SchemaErrors),

    #[error("animation error: {0}")]
    Animation(String),

    #[error("evaluation error: {0}")]
    Evaluation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error("io error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ReelError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            ReelError::animation("x")
                .to_string()
                .contains("animation error:")
        );
        assert!(
            ReelError::evaluation("x")
                .to_string()
                .contains("evaluation error:")
        );
        assert!(ReelError::serde("x").to_string().contains("serialization"));
    }

    #[test]
    fn io_preserves_path_and_source() {
        let err = ReelError::io("roster.json", std::io::Error::other("boom"));
        let s = err.to_string();
        assert!(s.contains("roster.json"));
        assert!(s.contains("boom"));
    }
}
