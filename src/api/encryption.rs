use secrecy::SecretString;

use super::RcReply;
use crate::models::encryption::{PassphraseCreate, PassphraseEnter, PassphraseModify};
use crate::{endpoints, LinstorClient, LinstorResult, RequestParams};

/// Manages the controller's master passphrase.
#[derive(Debug, Clone)]
pub struct EncryptionHandler {
    client: LinstorClient,
}

impl EncryptionHandler {
    pub(crate) fn new(client: LinstorClient) -> Self {
        Self { client }
    }

    /// Sets the master passphrase on a controller that has none yet.
    pub async fn create_passphrase(&self, passphrase: SecretString) -> LinstorResult<RcReply> {
        let body = PassphraseCreate {
            new_passphrase: passphrase,
        };
        self.client
            .post(endpoints::ENCRYPTION_PASSPHRASE, RequestParams::new().body(&body)?)
            .await
    }

    pub async fn modify_passphrase(
        &self,
        old_passphrase: SecretString,
        new_passphrase: SecretString,
    ) -> LinstorResult<RcReply> {
        let body = PassphraseModify {
            new_passphrase,
            old_passphrase,
        };
        self.client
            .put(endpoints::ENCRYPTION_PASSPHRASE, RequestParams::new().body(&body)?)
            .await
    }

    /// Unlocks encrypted volumes after a controller restart.
    pub async fn enter_passphrase(&self, passphrase: SecretString) -> LinstorResult<RcReply> {
        let body = PassphraseEnter { passphrase };
        self.client
            .patch(endpoints::ENCRYPTION_PASSPHRASE, RequestParams::new().body(&body)?)
            .await
    }
}
