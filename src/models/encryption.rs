use secrecy::SecretString;
use serde::Serialize;

use crate::models::secret::serialize_secret;

/// Request body for setting the master passphrase for the first time.
#[derive(Debug, Clone, Serialize)]
pub struct PassphraseCreate {
    #[serde(serialize_with = "serialize_secret")]
    pub new_passphrase: SecretString,
}

/// Request body for changing the master passphrase.
#[derive(Debug, Clone, Serialize)]
pub struct PassphraseModify {
    #[serde(serialize_with = "serialize_secret")]
    pub new_passphrase: SecretString,
    #[serde(serialize_with = "serialize_secret")]
    pub old_passphrase: SecretString,
}

/// Request body for unlocking the controller after a restart.
#[derive(Debug, Clone, Serialize)]
pub struct PassphraseEnter {
    #[serde(serialize_with = "serialize_secret")]
    pub passphrase: SecretString,
}
