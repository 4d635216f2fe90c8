use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server refused the like (status 400), e.g. liking one's own post.
    RequestRejected,
    /// The response or the page did not have the expected shape.
    Processing,
    /// Reading or writing replay files.
    Storage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeError {
    pub kind: ErrorKind,
    pub message: String,
}

impl LikeError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::RequestRejected,
            message: message.into(),
        }
    }

    pub fn processing(err: impl fmt::Display) -> Self {
        Self {
            kind: ErrorKind::Processing,
            message: err.to_string(),
        }
    }

    pub fn missing(selector: &str) -> Self {
        Self::processing(format!("no element matches `{selector}`"))
    }

    pub fn storage(err: impl fmt::Display) -> Self {
        Self {
            kind: ErrorKind::Storage,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for LikeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::RequestRejected => write!(f, "request rejected: {}", self.message),
            ErrorKind::Processing => write!(f, "error processing response: {}", self.message),
            ErrorKind::Storage => write!(f, "storage error: {}", self.message),
        }
    }
}

impl std::error::Error for LikeError {}

impl From<serde_json::Error> for LikeError {
    fn from(err: serde_json::Error) -> Self {
        Self::processing(err)
    }
}

impl From<std::io::Error> for LikeError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(err)
    }
}
