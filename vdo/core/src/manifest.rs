use regex::Regex;

use crate::error::ManifestError;

/// Literal element match, as the service serves it: no attributes, no
/// namespace resolution, `.` stops at newlines.
const PSSH_PATTERN: &str = "<cenc:pssh>(.*?)</cenc:pssh>";

/**
    Extract the body of the first `cenc:pssh` element from manifest text.

    The manifest is treated as unstructured text on purpose: this flow only
    needs the base64 payload of the first protection header, in exactly the
    shape the service emits it. Swapping in a structured XML parse later only
    requires changing this function.
*/
pub fn extract_pssh(manifest: &str) -> Result<&str, ManifestError> {
    let re = Regex::new(PSSH_PATTERN).expect("pattern is valid");
    re.captures(manifest)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(ManifestError::PsshNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_embedded_element() {
        let manifest = concat!(
            r#"<?xml version="1.0"?><MPD><Period><AdaptationSet>"#,
            r#"<ContentProtection schemeIdUri="urn:uuid:edef8ba9-79d6-4ace-a3c8-27dcd51d21ed">"#,
            "<cenc:pssh>QUJD</cenc:pssh>",
            "</ContentProtection></AdaptationSet></Period></MPD>",
        );
        assert_eq!(extract_pssh(manifest).unwrap(), "QUJD");
    }

    #[test]
    fn extracts_first_of_several() {
        let manifest = "<cenc:pssh>Zmlyc3Q=</cenc:pssh><cenc:pssh>c2Vjb25k</cenc:pssh>";
        assert_eq!(extract_pssh(manifest).unwrap(), "Zmlyc3Q=");
    }

    #[test]
    fn works_in_multiline_documents() {
        let manifest = "<MPD>\n  <cenc:pssh>QUJD</cenc:pssh>\n</MPD>\n";
        assert_eq!(extract_pssh(manifest).unwrap(), "QUJD");
    }

    #[test]
    fn missing_element_is_an_error() {
        let manifest = "<MPD><Period></Period></MPD>";
        assert_eq!(extract_pssh(manifest), Err(ManifestError::PsshNotFound));
    }

    #[test]
    fn attributed_tag_does_not_match() {
        // The contract is the literal tag pair; an attributed opening tag is
        // a different document shape and must not silently half-match.
        let manifest = r#"<cenc:pssh xmlns:cenc="urn:mpeg:cenc:2013">QUJD</cenc:pssh>"#;
        assert_eq!(extract_pssh(manifest), Err(ManifestError::PsshNotFound));
    }

    #[test]
    fn empty_element_yields_empty_payload() {
        assert_eq!(extract_pssh("<cenc:pssh></cenc:pssh>").unwrap(), "");
    }
}
