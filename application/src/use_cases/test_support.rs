//! Mock adapters shared by the use case tests

use crate::batch::SlotSubmitter;
use crate::ports::group_directory::{DirectoryError, GroupDirectory};
use crate::ports::prompt_channel::{DeliveryError, PromptChannel, PromptDelivery};
use crate::ports::text_oracle::{GenerationRequest, OracleError, TextOracle};
use async_trait::async_trait;
use confluence_domain::{ConsensusResult, GroupId, Participant, ParticipantId};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

pub(crate) fn member(name: &str) -> Participant {
    Participant::new(format!("id-{name}"), name)
}

// === Group directory ===

pub(crate) struct StaticDirectory {
    groups: HashMap<GroupId, Vec<Participant>>,
    lookup_delay: Duration,
}

impl StaticDirectory {
    pub(crate) fn new(group: &str, names: &[&str]) -> Self {
        let members = names.iter().map(|name| member(name)).collect();
        Self {
            groups: HashMap::from([(GroupId::new(group), members)]),
            lookup_delay: Duration::ZERO,
        }
    }

    /// Make every member lookup take `secs` seconds
    pub(crate) fn slow(mut self, secs: u64) -> Self {
        self.lookup_delay = Duration::from_secs(secs);
        self
    }
}

#[async_trait]
impl GroupDirectory for StaticDirectory {
    async fn members(&self, group: &GroupId) -> Result<Vec<Participant>, DirectoryError> {
        tokio::time::sleep(self.lookup_delay).await;
        self.groups
            .get(group)
            .cloned()
            .ok_or_else(|| DirectoryError::UnknownGroup(group.clone()))
    }
}

// === Prompt channel ===

/// Delivers prompts and plays back scripted answers after a delay
#[derive(Default)]
pub(crate) struct ScriptedChannel {
    unreachable: HashSet<ParticipantId>,
    answers: HashMap<ParticipantId, (Duration, String)>,
    pub(crate) delivered: Mutex<Vec<(ParticipantId, bool)>>,
    pub(crate) submitters: Mutex<HashMap<ParticipantId, SlotSubmitter>>,
    pub(crate) consensus_sent: Mutex<Vec<ParticipantId>>,
}

impl ScriptedChannel {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn answering(mut self, name: &str, after_secs: u64, text: &str) -> Self {
        self.answers.insert(
            member(name).id,
            (Duration::from_secs(after_secs), text.to_string()),
        );
        self
    }

    pub(crate) fn unreachable(mut self, name: &str) -> Self {
        self.unreachable.insert(member(name).id);
        self
    }

    pub(crate) fn submitter(&self, name: &str) -> Option<SlotSubmitter> {
        self.submitters.lock().unwrap().get(&member(name).id).cloned()
    }

    fn record(&self, delivery: PromptDelivery, to_invoker: bool) -> Result<(), DeliveryError> {
        let id = delivery.participant().id.clone();
        if self.unreachable.contains(&id) {
            return Err(DeliveryError::Unreachable(id.to_string()));
        }
        self.delivered.lock().unwrap().push((id.clone(), to_invoker));

        let submitter = delivery.into_submitter();
        if let Some((delay, text)) = self.answers.get(&id).cloned() {
            let submitter = submitter.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = submitter.submit(text);
            });
        }
        self.submitters.lock().unwrap().insert(id, submitter);
        Ok(())
    }
}

#[async_trait]
impl PromptChannel for ScriptedChannel {
    async fn deliver(&self, delivery: PromptDelivery) -> Result<(), DeliveryError> {
        self.record(delivery, false)
    }

    async fn deliver_to_invoker(&self, delivery: PromptDelivery) -> Result<(), DeliveryError> {
        self.record(delivery, true)
    }

    async fn send_consensus(
        &self,
        participant: &Participant,
        _result: &ConsensusResult,
    ) -> Result<(), DeliveryError> {
        if self.unreachable.contains(&participant.id) {
            return Err(DeliveryError::Unreachable(participant.id.to_string()));
        }
        self.consensus_sent
            .lock()
            .unwrap()
            .push(participant.id.clone());
        Ok(())
    }
}

// === Oracle ===

/// Records every request; answers "summary N" or fails when told to
#[derive(Default)]
pub(crate) struct MockOracle {
    fail: bool,
    pub(crate) calls: Mutex<Vec<GenerationRequest>>,
}

impl MockOracle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextOracle for MockOracle {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, OracleError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(request.clone());
        if self.fail {
            return Err(OracleError::RequestFailed {
                status: 500,
                message: "upstream unavailable".to_string(),
            });
        }
        Ok(format!("  summary {}  ", calls.len()))
    }
}
