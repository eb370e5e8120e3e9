use thiserror::Error;

use crate::{config::ConfigError, platform::PlatformError, renderer::RenderError, world::GridError};

/// Anything that can stop a demo before or during its frame loop.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("renderer: {0}")]
    Render(#[from] RenderError),

    #[error("platform: {0}")]
    Platform(#[from] PlatformError),

    #[error("grid: {0}")]
    Grid(#[from] GridError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_convert_with_question_mark() {
        fn upload() -> Result<(), DemoError> {
            Err(RenderError::Volume(GridError::Empty))?
        }
        let err = upload().unwrap_err();
        assert!(matches!(err, DemoError::Render(RenderError::Volume(GridError::Empty))));
        assert!(err.to_string().starts_with("renderer: volume upload rejected"));
    }
}
