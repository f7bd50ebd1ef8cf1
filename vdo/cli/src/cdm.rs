use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use vdo_core::{ContentKey, KeyType};

/**
    Capability interface over the external Widevine CDM.

    The orchestrator only ever talks to these two traits. The real
    cryptography lives in the `drm-widevine` crate behind [`WidevineCdm`];
    tests substitute a scripted double.
*/
pub trait Cdm {
    type Session: CdmSession;

    /// Open a fresh session. One session per run, used strictly
    /// sequentially.
    fn open(&self) -> Result<Self::Session>;
}

/**
    One license exchange. The value owns the underlying session, so dropping
    it on any exit path releases the CDM's resources.
*/
pub trait CdmSession {
    /// Install the CDM's built-in privacy certificate; challenges built
    /// afterwards encrypt the client identification.
    fn set_privacy_certificate(&mut self) -> Result<()>;

    /// Build the license challenge for a base64 PSSH box.
    fn build_challenge(&mut self, pssh_b64: &str) -> Result<Vec<u8>>;

    /// Feed the license server's response blob into the session and return
    /// every key it unwrapped.
    fn ingest_license(&mut self, license_b64: &str) -> Result<Vec<ContentKey>>;
}

/**
    Production adapter over the `drm-widevine` implementation.
*/
pub struct WidevineCdm {
    device: drm_widevine::Device,
}

impl WidevineCdm {
    /**
        Parse a .wvd device file into a CDM ready to open sessions.
    */
    pub fn from_wvd(wvd_data: &[u8]) -> Result<Self> {
        let device =
            drm_widevine::Device::from_bytes(wvd_data).context("failed to parse WVD file")?;
        eprintln!(
            "Loaded device: {} {}",
            device.device_type, device.security_level
        );
        Ok(WidevineCdm { device })
    }
}

impl Cdm for WidevineCdm {
    type Session = WidevineSession;

    fn open(&self) -> Result<WidevineSession> {
        Ok(WidevineSession {
            session: drm_widevine::Session::new(self.device.clone()),
        })
    }
}

pub struct WidevineSession {
    session: drm_widevine::Session,
}

impl CdmSession for WidevineSession {
    fn set_privacy_certificate(&mut self) -> Result<()> {
        self.session
            .set_service_certificate_common()
            .context("failed to set privacy certificate")
    }

    fn build_challenge(&mut self, pssh_b64: &str) -> Result<Vec<u8>> {
        let pssh =
            drm_widevine::PsshBox::from_base64(pssh_b64).context("failed to parse PSSH box")?;
        self.session
            .build_license_challenge(&pssh, drm_widevine::LicenseType::Streaming)
            .context("failed to build license challenge")
    }

    fn ingest_license(&mut self, license_b64: &str) -> Result<Vec<ContentKey>> {
        let raw = BASE64
            .decode(license_b64.trim())
            .context("license blob is not valid base64")?;
        let keys = self
            .session
            .parse_license_response(&raw)
            .context("failed to parse license response")?;
        keys.iter()
            .map(|k| {
                ContentKey::new(k.kid(), k.key(), convert_key_type(k.key_type()))
                    .map_err(anyhow::Error::from)
            })
            .collect()
    }
}

fn convert_key_type(t: drm_widevine::KeyType) -> KeyType {
    match t {
        drm_widevine::KeyType::Signing => KeyType::Signing,
        drm_widevine::KeyType::Content => KeyType::Content,
        drm_widevine::KeyType::KeyControl => KeyType::KeyControl,
        drm_widevine::KeyType::OperatorSession => KeyType::OperatorSession,
        drm_widevine::KeyType::Entitlement => KeyType::Entitlement,
        drm_widevine::KeyType::OemContent => KeyType::OemContent,
    }
}
