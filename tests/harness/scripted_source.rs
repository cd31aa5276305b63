use std::collections::VecDeque;

use async_trait::async_trait;
use spreadcast::error::{Error, Result};
use spreadcast::port::inbound::feed::PayloadSource;

enum Step {
    Payload(String),
    Unreadable,
}

/// Payload source that replays a fixed script, then ends.
#[derive(Default)]
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    hold_open: bool,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, payload: impl Into<String>) -> Self {
        self.steps.push_back(Step::Payload(payload.into()));
        self
    }

    pub fn push_unreadable(mut self) -> Self {
        self.steps.push_back(Step::Unreadable);
        self
    }

    /// Stay subscribed after the script runs out instead of ending.
    pub fn hold_open(mut self) -> Self {
        self.hold_open = true;
        self
    }
}

#[async_trait]
impl PayloadSource for ScriptedSource {
    async fn next_payload(&mut self) -> Option<Result<String>> {
        match self.steps.pop_front() {
            Some(Step::Payload(payload)) => Some(Ok(payload)),
            Some(Step::Unreadable) => Some(Err(Error::Parse("invalid UTF-8".into()))),
            None if self.hold_open => std::future::pending().await,
            None => None,
        }
    }

    fn channel(&self) -> &str {
        "scripted"
    }
}
