use anyhow::{Context, Result};

use vdo_core::{AccessToken, ContentKey, LicenseChallenge, extract_pssh};

use crate::cdm::{Cdm, CdmSession};
use crate::service::VdoClient;

/// Fixed-width frame around the key listing.
const SEPARATOR: &str =
    "********************************************************************************";

/**
    The outcome of a successful license exchange.
*/
pub struct KeyReport {
    /// Every key the license delivered, content and otherwise.
    pub keys: Vec<ContentKey>,
    /// Resolved DASH manifest URL.
    pub manifest_url: String,
}

/**
    Run the license exchange end to end and collect the unwrapped keys.

    Strictly sequential; the first failure aborts the run. The CDM session
    opened here is owned by this frame and dropped on every exit path,
    ordinary or error, which releases the emulator's resources.
*/
pub async fn fetch_keys(
    token_b64: &str,
    client: &VdoClient,
    cdm: &impl Cdm,
) -> Result<KeyReport> {
    let token = AccessToken::decode(token_b64).context("failed to decode access token")?;
    let video_id = token.video_id().context("failed to extract video id")?;
    eprintln!("Video id: {video_id}");

    let manifest_url = client.fetch_manifest_url(&video_id).await?;
    eprintln!("Manifest: {manifest_url}");

    let manifest = client.fetch_manifest(&manifest_url).await?;
    let pssh = extract_pssh(&manifest)?;

    let mut session = cdm.open()?;
    session.set_privacy_certificate()?;

    let challenge = session.build_challenge(pssh)?;
    eprintln!("Built challenge ({} bytes)", challenge.len());

    let envelope = LicenseChallenge::new(&token, &challenge).to_base64();
    let license = client
        .request_license(&envelope, &manifest_url, &token.href)
        .await?;
    eprintln!("Received license ({} bytes)", license.len());

    let keys = session.ingest_license(&license)?;
    eprintln!("Extracted {} key(s)", keys.len());

    Ok(KeyReport { keys, manifest_url })
}

/**
    Format the CONTENT keys and the manifest URL, framed by separator lines.

    One line per content key as `[CONTENT] kid_hex:key_hex`; keys of other
    types are not printed.
*/
pub fn render_report(report: &KeyReport) -> String {
    let mut out = String::new();
    out.push_str(SEPARATOR);
    out.push('\n');
    for key in report.keys.iter().filter(|k| k.is_content()) {
        out.push_str(&format!("{key:?}\n"));
    }
    out.push_str(&format!("[  MPD  ] {}\n", report.manifest_url));
    out.push_str(SEPARATOR);
    out.push('\n');
    out
}
