//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_DISPATCH_ID: &str = "dispatch_id";

// Dispatch context
pub const FIELD_LIFECYCLE: &str = "lifecycle";
pub const FIELD_PLAYER: &str = "player";
pub const FIELD_EXECUTOR: &str = "executor";
pub const FIELD_COMMAND_COUNT: &str = "command_count";
pub const FIELD_REVISION: &str = "revision";
pub const FIELD_ADDRESS: &str = "address";
pub const FIELD_INDEX: &str = "index";
pub const FIELD_FAILED_COUNT: &str = "failed_count";

// Configuration source
pub const FIELD_PATH: &str = "path";
pub const FIELD_DIGEST: &str = "digest";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";
pub const FIELD_ENTITY: &str = "entity";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
/// A step failed but the operation continued
pub const EVENT_FAILURE: &str = "failure";

// Canonical operation names
pub const OP_DISPATCH: &str = "dispatch_commands";
pub const OP_RELOAD: &str = "reload_commands";
pub const OP_LOAD_CONFIG: &str = "load_command_config";
