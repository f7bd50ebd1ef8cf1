use core::fmt;

use crate::error::ContentKeyError;

/**
    Key type from the license's key containers.
    Ref: license_protocol.proto, License.KeyContainer.KeyType enum.

    Only CONTENT keys end up in the printed report; the other types are
    carried through so callers can see what the license actually delivered.
*/
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Signing = 1,
    Content = 2,
    KeyControl = 3,
    OperatorSession = 4,
    Entitlement = 5,
    OemContent = 6,
}

impl KeyType {
    pub const fn from_u8(u: u8) -> Option<Self> {
        match u {
            1 => Some(Self::Signing),
            2 => Some(Self::Content),
            3 => Some(Self::KeyControl),
            4 => Some(Self::OperatorSession),
            5 => Some(Self::Entitlement),
            6 => Some(Self::OemContent),
            _ => None,
        }
    }

    pub const fn to_name(self) -> &'static str {
        match self {
            Self::Signing => "SIGNING",
            Self::Content => "CONTENT",
            Self::KeyControl => "KEY_CONTROL",
            Self::OperatorSession => "OPERATOR_SESSION",
            Self::Entitlement => "ENTITLEMENT",
            Self::OemContent => "OEM_CONTENT",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

/**
    A decryption key unwrapped from a license response.

    `Display` prints `kid_hex:key_hex`; `Debug` prints the same pair prefixed
    with the key type, e.g. `[CONTENT] kid_hex:key_hex`.
*/
#[derive(Clone, PartialEq, Eq)]
pub struct ContentKey {
    kid: [u8; 16],
    key: Vec<u8>,
    key_type: KeyType,
}

impl ContentKey {
    /**
        Create a new key from a 16-byte key ID and non-empty key bytes.
    */
    pub fn new(
        kid: impl AsRef<[u8]>,
        key: impl AsRef<[u8]>,
        key_type: KeyType,
    ) -> Result<Self, ContentKeyError> {
        let kid_bytes: &[u8] = kid.as_ref();
        let kid: [u8; 16] = kid_bytes
            .try_into()
            .map_err(|_| ContentKeyError::InvalidKidLength(kid_bytes.len()))?;
        let key: &[u8] = key.as_ref();
        if key.is_empty() {
            return Err(ContentKeyError::EmptyKey);
        }
        Ok(Self {
            kid,
            key: key.to_vec(),
            key_type,
        })
    }

    /**
        16-byte key identifier.
    */
    pub fn kid(&self) -> [u8; 16] {
        self.kid
    }

    /**
        Decrypted key bytes. Typically 16 bytes for AES-128 content, but the
        protocol does not constrain key length.
    */
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /**
        Key type (content, signing, etc.).
    */
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /**
        Returns `true` for keys of type [`KeyType::Content`].
    */
    pub fn is_content(&self) -> bool {
        self.key_type == KeyType::Content
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", hex::encode(self.kid), hex::encode(&self.key))
    }
}

impl fmt::Debug for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}:{}",
            self.key_type,
            hex::encode(self.kid),
            hex::encode(&self.key),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn sample_key() -> ContentKey {
        ContentKey::new(
            hex!("00000000000000000000000000000001"),
            vec![0xab, 0xcd, 0xef, 0x01],
            KeyType::Content,
        )
        .unwrap()
    }

    #[test]
    fn accessors_return_correct_values() {
        let key = sample_key();
        assert_eq!(key.kid(), hex!("00000000000000000000000000000001"));
        assert_eq!(key.key(), &[0xab, 0xcd, 0xef, 0x01]);
        assert_eq!(key.key_type(), KeyType::Content);
        assert!(key.is_content());
    }

    #[test]
    fn signing_key_is_not_content() {
        let key = ContentKey::new([0; 16], vec![0x01], KeyType::Signing).unwrap();
        assert!(!key.is_content());
    }

    #[test]
    fn invalid_kid_length_rejected() {
        let err = ContentKey::new([0; 15], vec![0x01], KeyType::Content).unwrap_err();
        assert_eq!(err, ContentKeyError::InvalidKidLength(15));
        let err = ContentKey::new([0; 17], vec![0x01], KeyType::Content).unwrap_err();
        assert_eq!(err, ContentKeyError::InvalidKidLength(17));
    }

    #[test]
    fn empty_key_rejected() {
        let err = ContentKey::new([0; 16], vec![], KeyType::Content).unwrap_err();
        assert_eq!(err, ContentKeyError::EmptyKey);
    }

    #[test]
    fn display_is_kid_colon_key() {
        assert_eq!(
            sample_key().to_string(),
            "00000000000000000000000000000001:abcdef01"
        );
    }

    #[test]
    fn debug_prefixes_the_key_type() {
        assert_eq!(
            format!("{:?}", sample_key()),
            "[CONTENT] 00000000000000000000000000000001:abcdef01"
        );
        let signing = ContentKey::new([0xFF; 16], vec![0x00], KeyType::Signing).unwrap();
        assert!(format!("{signing:?}").starts_with("[SIGNING]"));
    }

    #[test]
    fn key_type_round_trips_through_u8() {
        for raw in 1u8..=6 {
            let kt = KeyType::from_u8(raw).unwrap();
            assert_eq!(kt as u32, raw as u32);
        }
        assert_eq!(KeyType::from_u8(0), None);
        assert_eq!(KeyType::from_u8(7), None);
    }
}
