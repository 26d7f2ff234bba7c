//! Wire form of inbound proximity reports.
//!
//! The physical transport delivers one report per message as
//! `"<CubeId>:<TagId>"`; an empty suffix after the colon means the
//! sender currently senses no right-hand neighbor.

use lexicube_registry::{CubeId, TagId};
use serde::{Deserialize, Serialize};

/// Result type for wire parsing.
pub type Result<T> = std::result::Result<T, WireError>;

/// Errors raised while decoding inbound reports.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The report did not match `"<CubeId>:<TagId>"`.
    #[error("malformed proximity report: {0:?}")]
    MalformedReport(String),
}

/// One inbound report of a cube's currently sensed right-hand neighbor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProximityEvent {
    /// The reporting cube.
    pub sender: CubeId,
    /// The sensed tag, or `None` when no cube is adjacent.
    pub tag: Option<TagId>,
}

impl ProximityEvent {
    /// Build an event from already-parsed parts.
    pub fn new(sender: CubeId, tag: Option<TagId>) -> Self {
        Self { sender, tag }
    }
}

/// Parse the `"<CubeId>:<TagId>"` report form.
pub fn parse_report(raw: &str) -> Result<ProximityEvent> {
    let Some((sender, tag)) = raw.split_once(':') else {
        return Err(WireError::MalformedReport(raw.to_string()));
    };
    if sender.is_empty() {
        return Err(WireError::MalformedReport(raw.to_string()));
    }
    let tag = if tag.is_empty() {
        None
    } else {
        Some(TagId::new(tag))
    };
    Ok(ProximityEvent::new(CubeId::new(sender), tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_with_tag() {
        let event = parse_report("BLOCK_0:TAG_1").unwrap();
        assert_eq!(event.sender, CubeId::new("BLOCK_0"));
        assert_eq!(event.tag, Some(TagId::new("TAG_1")));
    }

    #[test]
    fn report_without_neighbor() {
        let event = parse_report("BLOCK_0:").unwrap();
        assert_eq!(event.sender, CubeId::new("BLOCK_0"));
        assert_eq!(event.tag, None);
    }

    #[test]
    fn missing_colon_is_malformed() {
        assert!(matches!(
            parse_report("BLOCK_0"),
            Err(WireError::MalformedReport(_))
        ));
    }

    #[test]
    fn empty_sender_is_malformed() {
        assert!(matches!(
            parse_report(":TAG_1"),
            Err(WireError::MalformedReport(_))
        ));
    }
}
