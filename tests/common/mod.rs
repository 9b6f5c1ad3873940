use std::sync::{Arc, Mutex};

use linstor_client::LinstorClient;
use serde_json::{json, Value};

/// Bodies received by a [`Recorder`] notifier, in order.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct Recorder {
    seen: Arc<Mutex<Vec<Value>>>,
}

#[allow(dead_code)]
impl Recorder {
    pub fn bodies(&self) -> Vec<Value> {
        self.seen.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

/// Client pointing at the mock server, with default exclusions.
#[allow(dead_code)]
pub fn setup_test_client(mock_server_uri: &str) -> LinstorClient {
    LinstorClient::builder()
        .controller_url(mock_server_uri)
        .build()
        .expect("Failed to build LinstorClient")
}

/// Client whose notifier records every inspected body.
#[allow(dead_code)]
pub fn setup_recording_client(mock_server_uri: &str) -> (LinstorClient, Recorder) {
    let recorder = Recorder::default();
    let sink = Arc::clone(&recorder.seen);
    let client = LinstorClient::builder()
        .controller_url(mock_server_uri)
        .notifier(Arc::new(move |body: &Value| {
            sink.lock().unwrap().push(body.clone())
        }))
        .build()
        .expect("Failed to build LinstorClient");
    (client, recorder)
}

#[allow(dead_code)]
pub fn rc_ok(message: &str) -> Value {
    json!({ "ret_code": 1, "message": message })
}

#[allow(dead_code)]
pub fn rc_err(message: &str) -> Value {
    json!({ "ret_code": -4611686018427387904_i64, "message": message })
}
