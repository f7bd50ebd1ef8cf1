use thiserror::Error;

/**
    Errors from decoding the opaque playback access token.
*/
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    #[error("invalid token JSON: {0}")]
    InvalidJson(String),

    #[error("playback descriptor has no usable videoId")]
    MissingVideoId,
}

/**
    Errors from scanning a manifest document for its protection header.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    #[error("manifest has no <cenc:pssh> element")]
    PsshNotFound,
}

/**
    Errors from assembling a content key.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentKeyError {
    #[error("key ID must be 16 bytes, got {0}")]
    InvalidKidLength(usize),

    #[error("key bytes must not be empty")]
    EmptyKey,
}
