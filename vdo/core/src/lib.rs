#![allow(clippy::doc_overindented_list_items)]

mod envelope;
mod error;
mod keys;
mod manifest;
mod token;

pub use self::envelope::LicenseChallenge;
pub use self::error::{ContentKeyError, ManifestError, TokenError};
pub use self::keys::{ContentKey, KeyType};
pub use self::manifest::extract_pssh;
pub use self::token::AccessToken;
