//! Canonical logging macros
//!
//! Comparisons run inside test suites at high frequency, so start and end
//! events go out at debug level. Errors stay at error level and carry the
//! stable code of the converted `ExError`.

/// Log the start of a comparison or report
///
/// Trailing `field = value` pairs are passed through to the event; the
/// engine uses them for `left_type`/`right_type` and the report's `what`.
///
/// # Example
///
/// ```
/// # use deepeq_core::log_op_start;
/// log_op_start!("difference", left_type = "Vec<i32>", right_type = "Vec<i32>");
/// log_op_start!("side_by_side", what = "response body");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = deepeq_core_types::schema::EVENT_START,
            $($($field)*)?
        );
    };
}

/// Log the successful end of a comparison or report
///
/// # Example
///
/// ```
/// # use deepeq_core::log_op_end;
/// log_op_end!("difference", duration_ms = 3, has_diff = true);
/// log_op_end!("side_by_side", duration_ms = 1, what = "payload", equal = false);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = deepeq_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        );
    };
}

/// Log a failed comparison or report
///
/// The error is converted into an `ExError`; the event carries its kind,
/// stable code and message.
///
/// # Example
///
/// ```
/// # use deepeq_core::{log_op_error, diff::Side, errors::DeepEqError};
/// let err = DeepEqError::InvalidHandle { side: Side::Left };
/// log_op_error!("side_by_side", err, duration_ms = 0, what = "payload");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = deepeq_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.message = ex_err.message(),
            $($($field)*)?
        );
    }};
}
