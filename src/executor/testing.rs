//! In-memory query executor for sampler and runner tests

use crate::{dns::QueryExecutor, models::QueryOutcome};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

enum Script {
    Always(QueryOutcome),
    /// Consumed front to back; exhausted scripts time out
    Sequence(VecDeque<QueryOutcome>),
}

impl Script {
    fn next(&mut self) -> QueryOutcome {
        match self {
            Script::Always(outcome) => *outcome,
            Script::Sequence(queue) => queue.pop_front().unwrap_or(QueryOutcome::Timeout),
        }
    }
}

/// Replays scripted outcomes, optionally per server address, and records every call
pub struct ScriptedExecutor {
    default: Mutex<Script>,
    per_server: Mutex<HashMap<String, Script>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedExecutor {
    fn with_default(default: Script) -> Self {
        Self {
            default: Mutex::new(default),
            per_server: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn always(outcome: QueryOutcome) -> Self {
        Self::with_default(Script::Always(outcome))
    }

    pub fn sequence(outcomes: Vec<QueryOutcome>) -> Self {
        Self::with_default(Script::Sequence(outcomes.into()))
    }

    pub fn server_always(self, address: &str, outcome: QueryOutcome) -> Self {
        self.per_server.lock().unwrap().insert(address.to_string(), Script::Always(outcome));
        self
    }

    pub fn server_sequence(self, address: &str, outcomes: Vec<QueryOutcome>) -> Self {
        self.per_server.lock().unwrap().insert(address.to_string(), Script::Sequence(outcomes.into()));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// `(server, domain)` pairs in call order
    pub fn log(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn execute(&self, server: &str, domain: &str, _timeout: Duration) -> QueryOutcome {
        self.calls.lock().unwrap().push((server.to_string(), domain.to_string()));

        let mut per_server = self.per_server.lock().unwrap();
        match per_server.get_mut(server) {
            Some(script) => script.next(),
            None => self.default.lock().unwrap().next(),
        }
    }
}
