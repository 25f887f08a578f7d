//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_COMPARISON_ID: &str = "comparison_id";

// Comparison subjects
pub const FIELD_TYPE_NAME: &str = "type_name";
pub const FIELD_MEMBER: &str = "member";
pub const FIELD_LABEL: &str = "label";

// Collection sizes
pub const FIELD_VARIANCE_COUNT: &str = "variance_count";
pub const FIELD_LEFT_LEN: &str = "left_len";
pub const FIELD_RIGHT_LEN: &str = "right_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
