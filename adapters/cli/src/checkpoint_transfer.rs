use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use thiserror::Error;
use tilerun_core::CheckpointSnapshot;

const SNAPSHOT_DOMAIN: &str = "tilerun";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded snapshot payload.
pub(crate) const SNAPSHOT_HEADER: &str = "tilerun:v1";
/// Delimiter used to separate the prefix, version and payload.
const FIELD_DELIMITER: char = ':';

/// Encodes a checkpoint snapshot into a single-line string suitable for copy and paste.
pub(crate) fn encode(snapshot: &CheckpointSnapshot) -> Result<String, CheckpointTransferError> {
    let json = serde_json::to_vec(snapshot).map_err(CheckpointTransferError::Serialize)?;
    let encoded = STANDARD_NO_PAD.encode(json);
    Ok(format!("{SNAPSHOT_HEADER}{FIELD_DELIMITER}{encoded}"))
}

/// Decodes a checkpoint snapshot from its string representation.
pub(crate) fn decode(value: &str) -> Result<CheckpointSnapshot, CheckpointTransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CheckpointTransferError::EmptyPayload);
    }

    let mut parts = trimmed.splitn(3, FIELD_DELIMITER);
    let domain = parts.next().unwrap_or_default();
    let version = parts.next().ok_or(CheckpointTransferError::MissingVersion)?;
    let payload = parts.next().ok_or(CheckpointTransferError::MissingPayload)?;

    if domain != SNAPSHOT_DOMAIN {
        return Err(CheckpointTransferError::InvalidPrefix(domain.to_owned()));
    }
    if version != SNAPSHOT_VERSION {
        return Err(CheckpointTransferError::UnsupportedVersion(
            version.to_owned(),
        ));
    }

    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(CheckpointTransferError::InvalidEncoding)?;
    serde_json::from_slice(&bytes).map_err(CheckpointTransferError::InvalidPayload)
}

/// Errors that can occur while transferring checkpoint strings.
#[derive(Debug, Error)]
pub(crate) enum CheckpointTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("checkpoint string was empty")]
    EmptyPayload,
    /// The encoded snapshot did not contain a version segment.
    #[error("checkpoint string is missing the version")]
    MissingVersion,
    /// The encoded snapshot did not include the payload segment.
    #[error("checkpoint string is missing the payload")]
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    #[error("checkpoint prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    #[error("checkpoint version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode checkpoint payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The decoded payload could not be deserialised.
    #[error("could not parse checkpoint payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
    /// The snapshot could not be serialised.
    #[error("could not serialise checkpoint: {0}")]
    Serialize(#[source] serde_json::Error),
}
