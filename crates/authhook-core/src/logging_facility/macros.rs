//! Operation logging macros
//!
//! Every operation (dispatch, reload, config load) reports through these, so
//! its events carry the same `component`, `op` and `event` keys from
//! [`crate::schema`]. Extra fields are appended as written at the call site.
//! Failure events also carry the error's kind, code, dispatch id and entity.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use authhook_core::log_op_start;
/// log_op_start!("dispatch_commands");
/// log_op_start!("dispatch_commands", lifecycle = "join");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            { $crate::schema::FIELD_COMPONENT } = module_path!(),
            { $crate::schema::FIELD_OP } = $op,
            { $crate::schema::FIELD_EVENT } = $crate::schema::EVENT_START,
            $($($field)*)?
        )
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use authhook_core::log_op_end;
/// log_op_end!("dispatch_commands", duration_ms = 42);
/// log_op_end!("dispatch_commands", duration_ms = 42, command_count = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            { $crate::schema::FIELD_COMPONENT } = module_path!(),
            { $crate::schema::FIELD_OP } = $op,
            { $crate::schema::FIELD_EVENT } = $crate::schema::EVENT_END,
            { $crate::schema::FIELD_DURATION_MS } = $duration,
            $($($field)*)?
        )
    };
}

/// Log an operation that ended with an error
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError).
///
/// # Example
///
/// ```
/// # use authhook_core::{log_op_error, errors::AuthHookError};
/// let err = AuthHookError::ConfigParse { reason: "bad indent".to_string() };
/// log_op_error!("reload_commands", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_failure!(
            tracing::Level::ERROR,
            $op,
            $crate::schema::EVENT_END_ERROR,
            $err,
            [{ $crate::schema::FIELD_DURATION_MS } = $duration, $($($field)*)?]
        )
    };
}

/// Log a recoverable failure inside a running operation
///
/// The operation carries on; no end event is implied.
///
/// # Example
///
/// ```
/// # use authhook_core::{log_op_warn, errors::AuthHookError};
/// let err = AuthHookError::ExecutionFailed {
///     command: "say hi".to_string(),
///     reason: "unknown command".to_string(),
/// };
/// log_op_warn!("dispatch_commands", err, index = 0);
/// ```
#[macro_export]
macro_rules! log_op_warn {
    ($op:expr, $err:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_failure!(
            tracing::Level::WARN,
            $op,
            $crate::schema::EVENT_FAILURE,
            $err,
            [$($($field)*)?]
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_failure {
    ($level:expr, $op:expr, $event:expr, $err:expr, [$($field:tt)*]) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::event!(
            $level,
            { $crate::schema::FIELD_COMPONENT } = module_path!(),
            { $crate::schema::FIELD_OP } = $op,
            { $crate::schema::FIELD_EVENT } = $event,
            { $crate::schema::FIELD_ERR_KIND } = ?ex_err.kind(),
            { $crate::schema::FIELD_ERR_CODE } = ex_err.code(),
            { $crate::schema::FIELD_DISPATCH_ID } = ex_err.dispatch_id().map(|id| id.as_str()),
            { $crate::schema::FIELD_ENTITY } = ex_err.entity(),
            message = %ex_err,
            $($field)*
        )
    }};
}
