use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TokenError;

/**
    The decoded playback access token.

    The on-wire token is base64 over a JSON object with exactly these four
    fields. `playback_info` is itself a base64-encoded JSON document; it is
    kept in its encoded form here because the license envelope forwards it
    unchanged, and only [`AccessToken::video_id`] unwraps it.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    /// One-time password authorizing this playback.
    pub otp: String,
    /// Nested base64 playback descriptor (contains the video id).
    pub playback_info: String,
    /// Reference URL of the embedding page.
    pub href: String,
    /// Streaming technology tag (`dash` for this flow).
    pub tech: String,
}

impl AccessToken {
    /**
        Decode a base64 token into its constituent fields.

        The token is decoded once per run; everything downstream reads the
        decoded fields.
    */
    pub fn decode(token: &str) -> Result<Self, TokenError> {
        let raw = BASE64
            .decode(token.trim())
            .map_err(|e| TokenError::InvalidBase64(e.to_string()))?;
        serde_json::from_slice(&raw).map_err(|e| TokenError::InvalidJson(e.to_string()))
    }

    /**
        Re-encode the four fields into the on-wire token form.

        Inverse of [`AccessToken::decode`] for tokens built from compact
        four-field JSON, which is what the service issues.
    */
    pub fn encode(&self) -> String {
        let json = serde_json::to_string(self).expect("token fields are plain strings");
        BASE64.encode(json)
    }

    /**
        Unwrap the nested playback descriptor and return its `videoId`.

        The service emits the id as either a JSON string or a JSON number;
        both are normalized to the string form used in request paths.
    */
    pub fn video_id(&self) -> Result<String, TokenError> {
        let raw = BASE64
            .decode(self.playback_info.as_bytes())
            .map_err(|e| TokenError::InvalidBase64(e.to_string()))?;
        let info: Value =
            serde_json::from_slice(&raw).map_err(|e| TokenError::InvalidJson(e.to_string()))?;
        match info.get("videoId") {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            _ => Err(TokenError::MissingVideoId),
        }
    }
}
