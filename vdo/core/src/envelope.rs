use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;

use crate::token::AccessToken;

/**
    The on-wire license request envelope.

    The omit-empty rule and the field order are part of the wire format the
    license server expects: a field appears in the serialized JSON exactly
    when its value is non-empty, and present fields always serialize in the
    order `otp, playbackInfo, href, tech, licenseRequest`.
*/
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseChallenge {
    #[serde(skip_serializing_if = "String::is_empty")]
    otp: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    playback_info: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    href: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    tech: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    license_request: String,
}

impl LicenseChallenge {
    /**
        Wrap a raw CDM challenge together with the token-derived fields.
    */
    pub fn new(token: &AccessToken, challenge: &[u8]) -> Self {
        LicenseChallenge {
            otp: token.otp.clone(),
            playback_info: token.playback_info.clone(),
            href: token.href.clone(),
            tech: token.tech.clone(),
            license_request: BASE64.encode(challenge),
        }
    }

    /**
        Serialize to the double-encoded wire form: compact JSON first, then
        base64 over the whole JSON text.
    */
    pub fn to_base64(&self) -> String {
        let json = serde_json::to_string(self).expect("envelope fields are plain strings");
        BASE64.encode(json)
    }
}
