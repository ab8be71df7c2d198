use authhook_core_types::DispatchId;
use thiserror::Error;

/// Result type alias using AuthHookError
pub type Result<T> = std::result::Result<T, AuthHookError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and operator-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Configuration
    InvalidInput,
    InvalidConfig,
    InvalidCommand,

    // Descriptor tree
    InvalidDescriptor,
    PreconditionViolation,
    NotFound,

    // Integration/IO
    Io,
    Serialization,
    ExternalService,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::InvalidCommand => "ERR_INVALID_COMMAND",
            ExErrorKind::InvalidDescriptor => "ERR_INVALID_DESCRIPTOR",
            ExErrorKind::PreconditionViolation => "ERR_PRECONDITION_VIOLATION",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and context
/// (operation, offending entity, dispatch correlation) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<String>,
    dispatch_id: Option<DispatchId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            dispatch_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the offending entity (config section entry, command label, path)
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Add dispatch correlation context
    pub fn with_dispatch_id(mut self, dispatch_id: DispatchId) -> Self {
        self.dispatch_id = Some(dispatch_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
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

    /// Get the entity context, if any
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Get the dispatch id, if any
    pub fn dispatch_id(&self) -> Option<&DispatchId> {
        self.dispatch_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
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
        if let Some(entity) = &self.entity {
            write!(f, " (entity: {})", entity)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for AuthHook operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthHookError {
    // ===== Configuration Errors =====
    /// The command configuration could not be read
    #[error("Failed to read command configuration {path}: {reason}")]
    ConfigRead { path: String, reason: String },

    /// The command configuration is not valid YAML or has the wrong shape
    #[error("Malformed command configuration: {reason}")]
    ConfigParse { reason: String },

    /// The command configuration names a section that does not exist
    #[error("Unknown command configuration section: {section}")]
    UnknownSection { section: String },

    /// A single command entry failed validation
    #[error("Invalid command '{name}' in {section}: {reason}")]
    InvalidCommand {
        section: String,
        name: String,
        reason: String,
    },

    // ===== Descriptor Tree Errors =====
    /// A descriptor was declared without any label
    #[error("Command descriptor has no labels")]
    EmptyLabels,

    /// A label is empty or contains whitespace
    #[error("Invalid command label '{label}'")]
    InvalidLabel { label: String },

    /// The same label was declared twice on one descriptor
    #[error("Duplicate label '{label}' on command descriptor")]
    DuplicateLabel { label: String },

    /// A child was attached to a descriptor with more than one label
    #[error("Parent command {parent_labels:?} must have exactly one label to carry children")]
    MultiLabelParent { parent_labels: Vec<String> },

    /// A descriptor id does not belong to the tree
    #[error("Unknown command descriptor id: {id}")]
    UnknownDescriptor { id: usize },

    // ===== Execution Errors =====
    /// The execution channel rejected or failed a resolved command
    #[error("Command execution failed for '{command}': {reason}")]
    ExecutionFailed { command: String, reason: String },

    // ===== Internal Errors =====
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<AuthHookError> for ExError {
    fn from(err: AuthHookError) -> Self {
        match err {
            AuthHookError::ConfigRead { path, reason } => ExError::new(ExErrorKind::Io)
                .with_op("read_config")
                .with_entity(path)
                .with_message(reason),

            AuthHookError::ConfigParse { reason } => ExError::new(ExErrorKind::Serialization)
                .with_op("parse_config")
                .with_message(reason),

            AuthHookError::UnknownSection { section } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("parse_config")
                .with_entity(section)
                .with_message("Unknown section"),

            AuthHookError::InvalidCommand {
                section,
                name,
                reason,
            } => ExError::new(ExErrorKind::InvalidCommand)
                .with_op("validate_config")
                .with_entity(format!("{}.{}", section, name))
                .with_message(reason),

            AuthHookError::EmptyLabels => ExError::new(ExErrorKind::InvalidDescriptor)
                .with_op("build_descriptor_tree")
                .with_message("Descriptor has no labels"),

            AuthHookError::InvalidLabel { label } => ExError::new(ExErrorKind::InvalidDescriptor)
                .with_op("build_descriptor_tree")
                .with_entity(label)
                .with_message("Label is empty or contains whitespace"),

            AuthHookError::DuplicateLabel { label } => {
                ExError::new(ExErrorKind::InvalidDescriptor)
                    .with_op("build_descriptor_tree")
                    .with_entity(label)
                    .with_message("Duplicate label")
            }

            AuthHookError::MultiLabelParent { parent_labels } => {
                ExError::new(ExErrorKind::PreconditionViolation)
                    .with_op("build_descriptor_tree")
                    .with_entity(parent_labels.join(","))
                    .with_message("Parent of a nested command must have exactly one label")
            }

            AuthHookError::UnknownDescriptor { id } => ExError::new(ExErrorKind::NotFound)
                .with_op("build_descriptor_tree")
                .with_entity(id.to_string())
                .with_message("Descriptor id not found"),

            AuthHookError::ExecutionFailed { command, reason } => {
                ExError::new(ExErrorKind::ExternalService)
                    .with_op("execute_command")
                    .with_entity(command)
                    .with_message(reason)
            }

            AuthHookError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}
