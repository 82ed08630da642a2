use std::fmt::{Display, Formatter};

use strategist_core::{EnvelopeMeta, ProviderId, ValidationError};
use uuid::Uuid;

/// Request identifier (UUID v4) stamped on every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Envelope metadata for one command invocation.
pub fn envelope_meta(
    source_chain: Vec<ProviderId>,
    latency_ms: u64,
    warnings: Vec<String>,
) -> Result<EnvelopeMeta, ValidationError> {
    let mut meta = EnvelopeMeta::new(RequestId::new_v4().to_string(), source_chain, latency_ms)?;
    for warning in warnings {
        meta.push_warning(warning);
    }
    Ok(meta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_hyphenated_uuids() {
        let id = RequestId::new_v4().to_string();
        assert_eq!(id.len(), 36);
        assert_eq!(id.matches('-').count(), 4);
        assert_ne!(id, RequestId::new_v4().to_string());
    }

    #[test]
    fn carries_warnings_in_order() {
        let meta = envelope_meta(
            vec![ProviderId::Finnhub, ProviderId::Fixed],
            12,
            vec![String::from("first"), String::from("second")],
        )
        .expect("meta");

        assert_eq!(meta.warnings, vec!["first", "second"]);
        assert_eq!(meta.schema_version, "v1.0.0");
    }
}
