//! Shared endpoint stub for client tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use urnreg_core::{RegistryEndpoint, RemoteError, Result, ops};

/// A scripted endpoint that records every call it receives.
///
/// `login` replies are served from a queue (the last entry repeats);
/// every other operation acknowledges with a small JSON object. One
/// operation name can be scripted to fail.
pub struct RecordingEndpoint {
    calls: Mutex<Vec<(String, Vec<Value>)>>,
    login_replies: Mutex<VecDeque<Value>>,
    fail: Option<&'static str>,
}

impl RecordingEndpoint {
    pub fn new() -> Self {
        Self::with_login_replies([json!("T1")])
    }

    pub fn with_login_replies(replies: impl IntoIterator<Item = Value>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            login_replies: Mutex::new(replies.into_iter().collect()),
            fail: None,
        }
    }

    /// Script `operation` to fail with a remote fault.
    pub fn failing(operation: &'static str) -> Self {
        Self {
            fail: Some(operation),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RegistryEndpoint for RecordingEndpoint {
    async fn invoke(&self, operation: &str, args: Vec<Value>) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((operation.to_string(), args));

        if self.fail == Some(operation) {
            return Err(RemoteError::fault("ServiceUnavailable", "scripted failure").into());
        }

        if operation == ops::LOGIN {
            let mut replies = self.login_replies.lock().unwrap();
            let reply = if replies.len() > 1 {
                replies.pop_front().unwrap_or(Value::Null)
            } else {
                replies.front().cloned().unwrap_or(Value::Null)
            };
            return Ok(reply);
        }

        Ok(json!({ "ok": operation }))
    }
}
