use media_gallery::ConfigError;
use std::fmt;

/// Central error types for the Photos app
#[derive(Debug)]
pub enum AppError {
    /// Gallery config could not be read or parsed
    Config(ConfigError),
    /// Filesystem error
    Filesystem(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

/// User-friendly error messages for UI
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(_) => {
                "The gallery settings could not be read. Defaults are used instead.".to_string()
            }
            AppError::Filesystem(_) => {
                "Error accessing files. Please check app permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let parse = media_gallery::GalleryConfig::from_toml("fetch_limit = [").unwrap_err();
        let err = AppError::from(parse);
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error"));
        assert!(err.user_message().contains("Defaults"));
    }

    #[test]
    fn test_io_error_converts() {
        let err = AppError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.to_string(), "Filesystem error: denied");
    }
}
