use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Url;
use serde::Deserialize;
use serde_json::json;

/// Desktop Chrome user-agent the service expects from its web player.
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/105.0.0.0 Safari/537.36";

/**
    Remote endpoint configuration.

    The defaults are the production VdoCipher endpoints; tests point the
    bases at a local server instead.
*/
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the metadata API (`{meta_base}/api/meta/{video_id}`).
    pub meta_base: String,
    /// License endpoint the challenge envelope is POSTed to.
    pub license_url: String,
    /// Origin/referer advertised to the metadata API.
    pub site_origin: String,
    /// User-agent sent with every request.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            meta_base: "https://dev.vdocipher.com".to_owned(),
            license_url: "https://license.vdocipher.com/auth".to_owned(),
            site_origin: "https://dev.vdocipher.com/".to_owned(),
            user_agent: DESKTOP_USER_AGENT.to_owned(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MetaResponse {
    dash: DashMeta,
}

#[derive(Debug, Deserialize)]
struct DashMeta {
    manifest: String,
}

#[derive(Debug, Deserialize)]
struct LicenseResponse {
    license: String,
}

/**
    Blocking-free HTTP client for the metadata and license endpoints.
*/
pub struct VdoClient {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl VdoClient {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(VdoClient { http, config })
    }

    /**
        Resolve the DASH manifest URL for a video id.

        The metadata API enforces origin-based access control, so the request
        carries the configured site origin and a desktop user-agent.
    */
    pub async fn fetch_manifest_url(&self, video_id: &str) -> Result<String> {
        let url = format!("{}/api/meta/{}", self.config.meta_base, video_id);
        let response = self
            .http
            .get(&url)
            .header("user-agent", &self.config.user_agent)
            .header("origin", &self.config.site_origin)
            .header("referer", &self.config.site_origin)
            .send()
            .await
            .context("failed to fetch video metadata")?;
        let status = response.status();
        if !status.is_success() {
            bail!("metadata endpoint returned HTTP {status}");
        }
        let meta: MetaResponse = response
            .json()
            .await
            .context("metadata response has no dash.manifest field")?;
        Ok(meta.dash.manifest)
    }

    /**
        Fetch the manifest document itself. No special headers required.
    */
    pub async fn fetch_manifest(&self, manifest_url: &str) -> Result<String> {
        let response = self
            .http
            .get(manifest_url)
            .send()
            .await
            .context("failed to fetch manifest")?;
        let status = response.status();
        if !status.is_success() {
            bail!("manifest fetch returned HTTP {status}");
        }
        response
            .text()
            .await
            .context("failed to read manifest body")
    }

    /**
        POST the double-encoded challenge envelope and return the license
        blob.

        `origin` and `referer` derive from the manifest's origin, and the
        token's reference URL travels in the service's `vdo-ref` header.
    */
    pub async fn request_license(
        &self,
        envelope_b64: &str,
        manifest_url: &str,
        reference: &str,
    ) -> Result<String> {
        let origin = origin_for(manifest_url)?;
        let response = self
            .http
            .post(&self.config.license_url)
            .header("user-agent", &self.config.user_agent)
            .header("origin", &origin)
            .header("referer", &origin)
            .header("vdo-ref", reference)
            .json(&json!({ "token": envelope_b64 }))
            .send()
            .await
            .context("license request failed")?;
        let status = response.status();
        if !status.is_success() {
            bail!("license server returned HTTP {status}");
        }
        let license: LicenseResponse = response
            .json()
            .await
            .context("license response has no license field")?;
        Ok(license.license)
    }
}

/**
    `scheme://hostname/` for a URL: scheme and host only, no port, no path.
*/
pub fn origin_for(url: &str) -> Result<String> {
    let parsed = Url::parse(url).context("invalid manifest URL")?;
    let host = parsed.host_str().context("manifest URL has no host")?;
    Ok(format!("{}://{}/", parsed.scheme(), host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_strips_port_and_path() {
        assert_eq!(
            origin_for("https://cdn.example.com:8443/path/manifest.mpd").unwrap(),
            "https://cdn.example.com/"
        );
    }

    #[test]
    fn origin_keeps_scheme_and_host() {
        assert_eq!(
            origin_for("http://cdn.example.com/manifest.mpd").unwrap(),
            "http://cdn.example.com/"
        );
    }

    #[test]
    fn origin_rejects_relative_urls() {
        assert!(origin_for("manifest.mpd").is_err());
    }
}
