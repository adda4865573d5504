pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Failure classes of a single add/edit workflow run. None of these are
/// retried; they surface to the caller immediately.
#[derive(Debug, PartialEq)]
pub enum NoteError {
    /// Network or authentication failure while establishing the session.
    ConnectionError(String),
    /// The given identifier does not resolve to a message in the folder.
    NotFoundError(String),
    /// The transient editing resource could not be created or read back.
    StagingError(String),
    /// The edited content trimmed down to nothing. Treated as the operator
    /// cancelling the workflow, not as a defect.
    EmptyEdit,
    /// Append or flag-update failure on the remote store.
    WriteError(String),
}

impl NoteError {
    /// Process exit code the binary maps this error to.
    pub fn exit_code(&self) -> i32 {
        match self {
            NoteError::ConnectionError(_) => 2,
            NoteError::NotFoundError(_) => 3,
            NoteError::StagingError(_) => 4,
            NoteError::EmptyEdit => 5,
            NoteError::WriteError(_) => 6,
        }
    }
}

impl std::fmt::Display for NoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteError::ConnectionError(e) => write!(f, "could not connect to the mail server: {}", e),
            NoteError::NotFoundError(e) => write!(f, "note not found: {}", e),
            NoteError::StagingError(e) => write!(f, "could not stage note for editing: {}", e),
            NoteError::EmptyEdit => write!(f, "edited note is empty, nothing was saved"),
            NoteError::WriteError(e) => write!(f, "could not write note to the mail server: {}", e),
        }
    }
}

impl std::error::Error for NoteError {}

#[derive(Debug, PartialEq)]
pub enum ProfileError {
    /// A required config entry is neither in the config file nor supplied
    /// as a command line flag.
    NotFound(String),
    /// A config entry is present but unusable (e.g. a non-numeric port).
    Invalid(String),
}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileError::NotFound(e) => {
                write!(f, "could not find entry in config file for key: \"{}\"", e)
            }
            ProfileError::Invalid(e) => write!(f, "invalid config entry: {}", e),
        }
    }
}

impl std::error::Error for ProfileError {}
