use crate::diff::Side;
use thiserror::Error;

/// Result type alias using DiffError
pub type Result<T> = std::result::Result<T, DiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and reporting at the library boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Introspection
    /// A type-introspection call received no type
    NullType,
    /// A type declares more than one type-level key block
    MultipleKeyDeclarations,
    /// A value does not expose a consistent member shape
    InvalidShape,

    // Reconciliation
    /// Two elements on one side of a keyed sequence share a key
    DuplicateKey,

    // Configuration
    InvalidConfig,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NullType => "ERR_NULL_TYPE",
            ExErrorKind::MultipleKeyDeclarations => "ERR_MULTIPLE_KEY_DECLARATIONS",
            ExErrorKind::InvalidShape => "ERR_INVALID_SHAPE",
            ExErrorKind::DuplicateKey => "ERR_DUPLICATE_KEY",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
        }
    }
}

/// Canonical structured error type
///
/// Carries a stable classification plus the context a caller needs to
/// locate the offending type, member or key.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    type_name: Option<String>,
    member: Option<String>,
    key: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            type_name: None,
            member: None,
            key: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add type name context
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Add member name context
    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }

    /// Add rendered key context
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
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

    /// Get the type name context, if any
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Get the member name context, if any
    pub fn member(&self) -> Option<&str> {
        self.member.as_deref()
    }

    /// Get the rendered key context, if any
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
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
        write!(f, "[{}] {}", self.code(), self.message)?;

        if let Some(op) = &self.op {
            write!(f, " (op: {})", op)?;
        }
        if let Some(type_name) = &self.type_name {
            write!(f, " (type: {})", type_name)?;
        }
        if let Some(member) = &self.member {
            write!(f, " (member: {})", member)?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }

        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for comparison operations
///
/// Every variant is fatal to the comparison that raised it. Errors are
/// returned to the caller and never folded into the variance output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiffError {
    /// A type-introspection call received no type
    #[error("No type was supplied to {op}")]
    NullType { op: String },

    /// A type declares more than one type-level key declaration
    #[error("Type {type_name} declares {count} key declarations; at most one is allowed")]
    MultipleKeyDeclarations { type_name: String, count: usize },

    /// Two elements on one side of a keyed sequence share the same key
    #[error("Sequence of {type_name} contains more than one element with key {key} on the {side} side")]
    DuplicateKey {
        type_name: String,
        key: String,
        side: Side,
    },

    /// A value does not expose a consistent member shape
    ///
    /// `member` names the offending member when the problem is local to one.
    #[error("Invalid shape for {type_name}: {reason}")]
    InvalidShape {
        type_name: String,
        member: Option<String>,
        reason: String,
    },

    /// Comparer configuration could not be parsed
    #[error("Invalid comparer configuration: {message}")]
    InvalidConfig { message: String },
}

impl DiffError {
    /// Classification of this error in the canonical taxonomy
    pub fn kind(&self) -> ExErrorKind {
        match self {
            DiffError::NullType { .. } => ExErrorKind::NullType,
            DiffError::MultipleKeyDeclarations { .. } => ExErrorKind::MultipleKeyDeclarations,
            DiffError::DuplicateKey { .. } => ExErrorKind::DuplicateKey,
            DiffError::InvalidShape { .. } => ExErrorKind::InvalidShape,
            DiffError::InvalidConfig { .. } => ExErrorKind::InvalidConfig,
        }
    }

    pub(crate) fn invalid_shape(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        DiffError::InvalidShape {
            type_name: type_name.into(),
            member: None,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_member(
        type_name: impl Into<String>,
        member: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DiffError::InvalidShape {
            type_name: type_name.into(),
            member: Some(member.into()),
            reason: reason.into(),
        }
    }
}

/// Conversion from DiffError to the canonical ExError
impl From<DiffError> for ExError {
    fn from(err: DiffError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        match err {
            DiffError::NullType { op } => ExError::new(kind).with_op(op).with_message(message),

            DiffError::MultipleKeyDeclarations { type_name, .. } => ExError::new(kind)
                .with_op("resolve_descriptor")
                .with_type_name(type_name)
                .with_message(message),

            DiffError::DuplicateKey { type_name, key, .. } => ExError::new(kind)
                .with_op("reconcile")
                .with_type_name(type_name)
                .with_key(key)
                .with_message(message),

            DiffError::InvalidShape { type_name, member, .. } => {
                let ex = ExError::new(kind)
                    .with_type_name(type_name)
                    .with_message(message);
                match member {
                    Some(member) => ex.with_member(member),
                    None => ex,
                }
            }

            DiffError::InvalidConfig { .. } => ExError::new(kind)
                .with_op("load_config")
                .with_message(message),
        }
    }
}
