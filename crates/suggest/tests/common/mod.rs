//! Shared test doubles for the suggestion integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use signup_suggest::lookup::{AddressLookup, AddressQuery, AddressSuggestion, LookupError};

/// What the fake service does for a given query.
#[derive(Clone)]
pub enum Reply {
    Values { delay: Duration, values: Vec<String> },
    Fail { delay: Duration },
}

impl Reply {
    pub fn values(values: &[&str]) -> Self {
        Self::delayed(Duration::ZERO, values)
    }

    pub fn delayed(delay: Duration, values: &[&str]) -> Self {
        Self::Values {
            delay,
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn fail() -> Self {
        Self::Fail {
            delay: Duration::ZERO,
        }
    }
}

/// Scripted address lookup that records every request it receives.
///
/// Queries without a scripted reply resolve to an empty list.
#[derive(Default)]
pub struct ScriptedLookup {
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<AddressQuery>>,
}

impl ScriptedLookup {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(self: &Arc<Self>, query: &str, reply: Reply) -> Arc<Self> {
        self.replies
            .lock()
            .unwrap()
            .insert(query.to_string(), reply);
        Arc::clone(self)
    }

    pub fn calls(&self) -> Vec<AddressQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.query).collect()
    }
}

#[async_trait]
impl AddressLookup for ScriptedLookup {
    async fn suggest(&self, query: &AddressQuery) -> Result<Vec<AddressSuggestion>, LookupError> {
        self.calls.lock().unwrap().push(query.clone());
        let reply = self.replies.lock().unwrap().get(&query.query).cloned();

        match reply {
            None => Ok(Vec::new()),
            Some(Reply::Values { delay, values }) => {
                pause(delay).await;
                Ok(values
                    .into_iter()
                    .map(|value| AddressSuggestion {
                        unrestricted_value: format!("101000, {value}"),
                        value,
                    })
                    .collect())
            }
            Some(Reply::Fail { delay }) => {
                pause(delay).await;
                Err(LookupError::Unavailable("network error".into()))
            }
        }
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Let every ready task run without advancing the paused clock.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
