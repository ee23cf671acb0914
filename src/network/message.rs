use std::fmt;
use std::str::FromStr;

use crate::tracking::ScaledPosition;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageParseError {
    #[error("Expected 5 comma-separated fields, got {0}")]
    FieldCount(usize),

    #[error("Field {field} is not a valid integer: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// One tracker position as sent to the lighting console.
///
/// Wire form: `<x>,0,<y>,<channel>,<label>`. The second field is a fixed
/// zero the console reads as the depth axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub x: i32,
    pub y: i32,
    pub channel: u32,
    pub label: String,
}

impl OutboundMessage {
    pub fn new(position: ScaledPosition, channel: u32, label: impl Into<String>) -> Self {
        Self {
            x: position.x,
            y: position.y,
            channel,
            label: label.into(),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for OutboundMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},0,{},{},{}", self.x, self.y, self.channel, self.label)
    }
}

impl FromStr for OutboundMessage {
    type Err = MessageParseError;

    /// The label is everything after the fourth comma, commas included.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim_end().splitn(5, ',').collect();
        if fields.len() != 5 {
            return Err(MessageParseError::FieldCount(fields.len()));
        }

        fn number<T: FromStr>(field: &'static str, value: &str) -> Result<T, MessageParseError> {
            value
                .trim()
                .parse()
                .map_err(|_| MessageParseError::InvalidNumber {
                    field,
                    value: value.to_string(),
                })
        }

        let x = number("x", fields[0])?;
        let _depth: i32 = number("depth", fields[1])?;
        let y = number("y", fields[2])?;
        let channel = number("channel", fields[3])?;

        Ok(Self {
            x,
            y,
            channel,
            label: fields[4].to_string(),
        })
    }
}
