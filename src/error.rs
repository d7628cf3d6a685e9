/// Failure categories surfaced by the pipeline.
///
/// Every kind is fatal; the kind only decides the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Catalog or color file does not exist.
    FileNotFound,
    /// Non-numeric, out-of-range or ragged input rows.
    MalformedInput,
    /// Inconsistent settings (threshold order, band/color count mismatch, ...).
    Configuration,
    /// A per-cohort statistic was requested for a cohort with no members.
    EmptyCohort,
    /// Writing an output file failed.
    Io,
    /// The plotting backend failed to draw or encode a figure.
    Render,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::FileNotFound | ErrorKind::MalformedInput | ErrorKind::Io => 2,
            ErrorKind::Configuration => 3,
            ErrorKind::EmptyCohort => 4,
            ErrorKind::Render => 5,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn file_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::FileNotFound, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedInput, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn empty_cohort(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptyCohort, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Render, message)
    }

    /// Map a failed `File::open` to `FileNotFound` or `Io` depending on the cause.
    pub fn from_open(what: &str, path: &std::path::Path, err: std::io::Error) -> Self {
        let message = format!("Failed to open {what} '{}': {err}", path.display());
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::file_not_found(message)
        } else {
            Self::io(message)
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
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
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
