/// Decoding of the X-ChromeLogger-Data header into console log entries
use crate::error::DecodeError;
use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard alphabet with optional padding, matching what `atob` accepts
const HEADER_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Console method a log entry is replayed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogType {
    Log,
    Warn,
    Error,
    Group,
    Info,
    GroupEnd,
    GroupCollapsed,
    Table,
}

impl LogType {
    pub const ALL: [LogType; 8] = [
        LogType::Log,
        LogType::Warn,
        LogType::Error,
        LogType::Group,
        LogType::Info,
        LogType::GroupEnd,
        LogType::GroupCollapsed,
        LogType::Table,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogType::Log => "log",
            LogType::Warn => "warn",
            LogType::Error => "error",
            LogType::Group => "group",
            LogType::Info => "info",
            LogType::GroupEnd => "groupEnd",
            LogType::GroupCollapsed => "groupCollapsed",
            LogType::Table => "table",
        }
    }

    /// Exact, case-sensitive match on the wire name
    pub fn parse(name: &str) -> Option<LogType> {
        LogType::ALL.into_iter().find(|log_type| log_type.as_str() == name)
    }

    /// Row type column to log type; anything unknown or missing is `log`
    fn from_row_type(value: Option<&Value>) -> LogType {
        value
            .and_then(Value::as_str)
            .and_then(LogType::parse)
            .unwrap_or(LogType::Log)
    }
}

/// One console call, as sent to the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub log_type: LogType,
    pub log_info: Value,
}

impl LogEntry {
    pub fn new(log_type: LogType, log_info: impl Into<Value>) -> LogEntry {
        LogEntry {
            log_type,
            log_info: log_info.into(),
        }
    }
}

/// Reply the content script sends back for a delivered batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryAck {
    pub response: String,
}

impl DeliveryAck {
    pub fn done() -> DeliveryAck {
        DeliveryAck {
            response: "done".to_string(),
        }
    }
}

/// Decode one raw header value
///
/// Algorithm:
/// 1. base64-decode (whitespace around the value is ignored, padding optional)
/// 2. Parse as JSON; no `rows` field means no entries
/// 3. For every row `[columns, backtrace, type]`, pick the log type
/// 4. Emit one entry per column, skipping empty strings
///
/// Order is rows first, then columns. group/groupEnd nesting depends on it.
/// Any malformed part fails the whole value; there are no partial results.
pub fn decode(raw_header_value: &str) -> Result<Vec<LogEntry>, DecodeError> {
    let bytes = HEADER_BASE64.decode(raw_header_value.trim())?;
    let envelope: Value = serde_json::from_slice(&bytes)?;

    let rows = match envelope.get("rows") {
        Some(rows) => rows,
        None => return Ok(Vec::new()),
    };

    let rows = rows
        .as_array()
        .ok_or_else(|| DecodeError::Envelope("`rows` is not an array".to_string()))?;

    let mut entries = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let row = row
            .as_array()
            .ok_or_else(|| DecodeError::Envelope(format!("row {} is not an array", index)))?;

        let columns = row
            .first()
            .and_then(Value::as_array)
            .ok_or_else(|| DecodeError::Envelope(format!("row {} has no column list", index)))?;

        let log_type = LogType::from_row_type(row.get(2));

        entries.extend(
            columns
                .iter()
                .filter(|column| !is_empty_string(column))
                .map(|column| LogEntry {
                    log_type,
                    log_info: column.clone(),
                }),
        );
    }

    Ok(entries)
}

fn is_empty_string(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.is_empty())
}
