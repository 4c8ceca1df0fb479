//! Application error type.
//!
//! A single error type with an embedded process exit code keeps `main` trivial
//! and gives every failure a human-readable message. Conventions:
//!
//! - `2` — configuration/usage errors (missing env vars, bad flags)
//! - `3` — fetch/data errors (request failed, bad payload)
//! - `4` — runtime errors (terminal, rendering, file output)

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Configuration/usage error (exit code 2).
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// Fetch/data error (exit code 3).
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    /// Runtime/render error (exit code 4).
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
