use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by the LeaseUp crates carries one of these kinds.
/// Each kind maps to a stable error code usable by callers, tests and any
/// application layer that wraps the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    InvalidStatus,
    InvalidDateRange,

    // Store constraints
    NotFound,
    /// Unique or primary-key violation (duplicate username, email, id, lease request link)
    Conflict,
    /// Foreign-key violation (row references a parent that does not exist)
    InvalidReference,
    /// NOT NULL / CHECK violations and migration checksum drift
    ConstraintViolation,

    // Credentials
    Credential,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidStatus => "ERR_INVALID_STATUS",
            ExErrorKind::InvalidDateRange => "ERR_INVALID_DATE_RANGE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Conflict => "ERR_CONFLICT",
            ExErrorKind::InvalidReference => "ERR_INVALID_REFERENCE",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Credential => "ERR_CREDENTIAL",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context (operation, table,
/// row id) for programmatic handling and a human-readable message.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<String>,
    entity_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity (table) context
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity (table) context, if any
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        match (&self.entity, &self.entity_id) {
            (Some(entity), Some(id)) => write!(f, " ({} {})", entity, id)?,
            (Some(entity), None) => write!(f, " ({})", entity)?,
            (None, Some(id)) => write!(f, " (entity_id: {})", id)?,
            (None, None) => {}
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain validation failures raised before anything touches the store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LeaseUpError {
    /// Status text outside the closed vocabulary of its column
    #[error("Invalid {field} status: {value:?}")]
    InvalidStatus { field: &'static str, value: String },

    /// Date range whose end precedes its start
    #[error("End date {end} is before start date {start}")]
    InvalidDateRange { start: String, end: String },

    /// Monetary amount that is negative or not finite
    #[error("Invalid {field}: {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    /// Required text field is empty or whitespace-only
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    /// Password shorter than the minimum length
    #[error("Password must be at least {min_len} characters")]
    PasswordTooShort { min_len: usize },

    /// Password hashing or verification failure
    #[error("Credential error: {reason}")]
    Credential { reason: String },
}

impl From<LeaseUpError> for ExError {
    fn from(err: LeaseUpError) -> Self {
        let message = err.to_string();
        match err {
            LeaseUpError::InvalidStatus { field, .. } => ExError::new(ExErrorKind::InvalidStatus)
                .with_entity(field)
                .with_message(message),

            LeaseUpError::InvalidDateRange { .. } => {
                ExError::new(ExErrorKind::InvalidDateRange).with_message(message)
            }

            LeaseUpError::InvalidAmount { .. }
            | LeaseUpError::EmptyField { .. }
            | LeaseUpError::PasswordTooShort { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            LeaseUpError::Credential { .. } => ExError::new(ExErrorKind::Credential)
                .with_op("credentials")
                .with_message(message),
        }
    }
}
