//! Ask Group use case
//!
//! Orchestrates the full flow: access check, participant resolution,
//! prompt dispatch, response collection and, for two or more answers,
//! consensus summarization.

use super::collect_responses::ResponseCollector;
use super::dispatch_prompts::PromptDispatcher;
use super::resolve_participants::ParticipantResolver;
use super::summarize_consensus::SummarizeConsensusUseCase;
use crate::batch::BatchDeadline;
use crate::config::BehaviorConfig;
use crate::ports::batch_logger::{BatchEvent, BatchEventLogger, NoBatchLogger};
use crate::ports::group_directory::{DirectoryError, GroupDirectory};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::prompt_channel::PromptChannel;
use crate::ports::role_store::{RoleStore, RoleStoreError};
use crate::ports::text_oracle::{OracleError, TextOracle};
use confluence_domain::{
    AccessDenied, AccessPolicy, CollectedAnswer, CollectionOutcome, CollectionReport,
    ConsensusRequest, ConsensusResult, DomainError, GroupId, Invoker, Participant,
    Question, parse_target_names,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end an ask-group invocation
#[derive(Error, Debug)]
pub enum AskGroupError {
    #[error("{0}")]
    InvalidInput(#[from] DomainError),

    #[error("Access denied: {0}")]
    AccessDenied(#[from] AccessDenied),

    #[error("Could not resolve participants: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Could not read the required role: {0}")]
    RoleStore(#[from] RoleStoreError),

    #[error("Consensus summary failed: {0}")]
    Oracle(#[from] OracleError),
}

/// Input for the AskGroup use case
#[derive(Debug, Clone)]
pub struct AskGroupInput {
    pub group: GroupId,
    pub invoker: Invoker,
    pub question: String,
    /// Display names to ask; `None` asks the whole group
    pub target_names: Option<Vec<String>>,
    /// Answer window; `None` uses the configured default
    pub timeout_minutes: Option<u32>,
}

impl AskGroupInput {
    pub fn new(group: impl Into<GroupId>, invoker: Invoker, question: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            invoker,
            question: question.into(),
            target_names: None,
            timeout_minutes: None,
        }
    }

    /// Restrict the batch to the names in a free-form target string
    pub fn with_target(mut self, target: &str) -> Self {
        self.target_names = parse_target_names(target);
        self
    }

    pub fn with_target_names(mut self, names: Vec<String>) -> Self {
        self.target_names = Some(names);
        self
    }

    pub fn with_timeout_minutes(mut self, minutes: u32) -> Self {
        self.timeout_minutes = Some(minutes);
        self
    }
}

/// How an invocation ended
#[derive(Debug, Clone)]
pub enum AskGroupOutcome {
    /// Nobody answered; the oracle was not called
    NoResponses {
        question: Question,
        report: CollectionReport,
    },
    /// One answer, returned verbatim; the oracle was not called
    SingleResponse {
        question: Question,
        answer: CollectedAnswer,
        report: CollectionReport,
    },
    /// Two or more answers summarized into a consensus
    Consensus {
        request: ConsensusRequest,
        result: ConsensusResult,
        report: CollectionReport,
    },
}

impl AskGroupOutcome {
    pub fn question(&self) -> &Question {
        match self {
            AskGroupOutcome::NoResponses { question, .. }
            | AskGroupOutcome::SingleResponse { question, .. } => question,
            AskGroupOutcome::Consensus { request, .. } => request.question(),
        }
    }

    pub fn report(&self) -> &CollectionReport {
        match self {
            AskGroupOutcome::NoResponses { report, .. }
            | AskGroupOutcome::SingleResponse { report, .. }
            | AskGroupOutcome::Consensus { report, .. } => report,
        }
    }
}

/// Use case for asking a group and summarizing their answers
pub struct AskGroupUseCase<D, C, O, R>
where
    D: GroupDirectory + 'static,
    C: PromptChannel + 'static,
    O: TextOracle + 'static,
    R: RoleStore + 'static,
{
    resolver: ParticipantResolver<D>,
    dispatcher: PromptDispatcher<C>,
    collector: ResponseCollector,
    summarizer: SummarizeConsensusUseCase<O>,
    channel: Arc<C>,
    role_store: Arc<R>,
    config: BehaviorConfig,
    logger: Arc<dyn BatchEventLogger>,
}

impl<D, C, O, R> AskGroupUseCase<D, C, O, R>
where
    D: GroupDirectory + 'static,
    C: PromptChannel + 'static,
    O: TextOracle + 'static,
    R: RoleStore + 'static,
{
    pub fn new(
        directory: Arc<D>,
        channel: Arc<C>,
        oracle: Arc<O>,
        role_store: Arc<R>,
        config: BehaviorConfig,
    ) -> Self {
        Self {
            resolver: ParticipantResolver::new(directory),
            dispatcher: PromptDispatcher::new(Arc::clone(&channel)),
            collector: ResponseCollector::new(config.grace),
            summarizer: SummarizeConsensusUseCase::new(oracle, config.summary),
            channel,
            role_store,
            config,
            logger: Arc::new(NoBatchLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn BatchEventLogger>) -> Self {
        self.dispatcher = self.dispatcher.with_logger(Arc::clone(&logger));
        self.logger = logger;
        self
    }

    /// The summarizer, for user-triggered redo
    pub fn summarizer(&self) -> &SummarizeConsensusUseCase<O> {
        &self.summarizer
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: AskGroupInput) -> Result<AskGroupOutcome, AskGroupError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: AskGroupInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<AskGroupOutcome, AskGroupError> {
        let question = Question::try_new(input.question)?;
        let timeout = input
            .timeout_minutes
            .unwrap_or(self.config.default_timeout_minutes);
        let deadline = BatchDeadline::start(timeout)?;

        let required = self.role_store.required_role(&input.group).await?;
        if let Err(denied) = AccessPolicy::check_ask(required.as_ref(), &input.invoker) {
            warn!(
                "{} may not ask group {}: {}",
                input.invoker.participant, input.group, denied
            );
            return Err(denied.into());
        }

        let participants = self
            .resolver
            .resolve(
                &input.group,
                &input.invoker.participant,
                input.target_names.as_deref(),
            )
            .await?;

        info!(
            "Asking {} participants of {} (timeout {} minutes)",
            participants.len(),
            input.group,
            timeout
        );
        self.logger.log(BatchEvent::new(
            "batch_started",
            json!({
                "group": input.group,
                "invoker": input.invoker.participant.id,
                "question": question.content(),
                "participants": participants.len(),
                "deadline": deadline.deadline().ends_at().to_rfc3339(),
            }),
        ));

        let batch = self
            .dispatcher
            .dispatch(
                &question,
                deadline,
                &participants,
                &input.invoker.participant.id,
                progress,
            )
            .await;
        let report = self.collector.collect(batch, progress).await;
        self.log_completion(&report);

        match report.outcome().clone() {
            CollectionOutcome::NoResponses => {
                info!("No responses to summarize");
                Ok(AskGroupOutcome::NoResponses { question, report })
            }
            CollectionOutcome::SingleResponse(answer) => {
                info!("Single response; skipping summary");
                Ok(AskGroupOutcome::SingleResponse {
                    question,
                    answer,
                    report,
                })
            }
            CollectionOutcome::Multiple(answers) => {
                let request = ConsensusRequest::from_collected(question, &answers);

                progress.on_summary_start();
                let result = match self.summarizer.summarize(&request).await {
                    Ok(result) => {
                        progress.on_summary_complete(true);
                        result
                    }
                    Err(e) => {
                        progress.on_summary_complete(false);
                        return Err(e.into());
                    }
                };
                self.logger.log(BatchEvent::new(
                    "summary_generated",
                    json!({ "answers": answers.len(), "summary": result.summary }),
                ));

                self.share_consensus(&participants, &result).await;

                Ok(AskGroupOutcome::Consensus {
                    request,
                    result,
                    report,
                })
            }
        }
    }

    /// Send the consensus to every participant; failures are ignored
    async fn share_consensus(&self, participants: &[Participant], result: &ConsensusResult) {
        for participant in participants {
            if let Err(e) = self.channel.send_consensus(participant, result).await {
                debug!("Could not send consensus to {}: {}", participant, e);
            }
        }
    }

    fn log_completion(&self, report: &CollectionReport) {
        for slot in report.slots() {
            self.logger.log(BatchEvent::new(
                "slot_resolved",
                json!({
                    "slot": slot.id().index(),
                    "participant": slot.participant().id,
                    "state": slot.state().as_str(),
                }),
            ));
        }
        self.logger.log(BatchEvent::new(
            "batch_completed",
            json!({
                "answered": report.answered_count(),
                "timed_out": report.timed_out_count(),
                "delivery_failed": report.delivery_failed_count(),
            }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::role_store::InMemoryRoleStore;
    use crate::use_cases::test_support::{MockOracle, ScriptedChannel, StaticDirectory, member};
    use confluence_domain::RoleId;
    use std::sync::Mutex;

    type UseCase = AskGroupUseCase<StaticDirectory, ScriptedChannel, MockOracle, InMemoryRoleStore>;

    struct Harness {
        channel: Arc<ScriptedChannel>,
        oracle: Arc<MockOracle>,
        use_case: UseCase,
    }

    fn directory() -> StaticDirectory {
        StaticDirectory::new("g", &["alice", "bob", "carol"])
    }

    fn harness_with(channel: ScriptedChannel, oracle: MockOracle, roles: InMemoryRoleStore) -> Harness {
        harness_on(directory(), channel, oracle, roles)
    }

    fn harness_on(
        directory: StaticDirectory,
        channel: ScriptedChannel,
        oracle: MockOracle,
        roles: InMemoryRoleStore,
    ) -> Harness {
        let channel = Arc::new(channel);
        let oracle = Arc::new(oracle);
        let use_case = AskGroupUseCase::new(
            Arc::new(directory),
            Arc::clone(&channel),
            Arc::clone(&oracle),
            Arc::new(roles),
            BehaviorConfig::default(),
        );
        Harness {
            channel,
            oracle,
            use_case,
        }
    }

    fn harness(channel: ScriptedChannel) -> Harness {
        harness_with(channel, MockOracle::new(), InMemoryRoleStore::new())
    }

    fn input() -> AskGroupInput {
        AskGroupInput::new("g", Invoker::new(member("alice")), "Friday social?")
            .with_timeout_minutes(1)
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_responses_skips_oracle() {
        let h = harness(ScriptedChannel::new());

        let outcome = h.use_case.execute(input()).await.unwrap();

        assert!(matches!(outcome, AskGroupOutcome::NoResponses { .. }));
        assert_eq!(outcome.report().timed_out_count(), 3);
        assert_eq!(h.oracle.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_response_returned_verbatim() {
        let h = harness(ScriptedChannel::new().answering("bob", 10, "  Yes, count me in  "));

        let outcome = h.use_case.execute(input()).await.unwrap();

        match outcome {
            AskGroupOutcome::SingleResponse { answer, .. } => {
                assert_eq!(answer.text, "  Yes, count me in  ");
                assert_eq!(answer.participant, member("bob"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(h.oracle.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_answers_summarized_once_in_dispatch_order() {
        let h = harness(
            ScriptedChannel::new()
                .answering("carol", 5, "B")
                .answering("alice", 40, "A"),
        );

        let outcome = h.use_case.execute(input()).await.unwrap();

        match &outcome {
            AskGroupOutcome::Consensus { request, result, .. } => {
                assert_eq!(request.answers(), ["A", "B"]);
                assert_eq!(result.summary, "summary 1");
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(h.oracle.call_count(), 1);
        let calls = h.oracle.calls.lock().unwrap().clone();
        assert!(calls[0].user_content.contains("Responses:\nA\n\nB\n\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_redo_issues_identical_second_call() {
        let h = harness(
            ScriptedChannel::new()
                .answering("alice", 1, "A")
                .answering("bob", 2, "B"),
        );

        let outcome = h.use_case.execute(input()).await.unwrap();
        let AskGroupOutcome::Consensus { request, .. } = outcome else {
            panic!("expected consensus");
        };
        let redo = h.use_case.summarizer().redo(&request).await.unwrap();

        assert_eq!(redo.summary, "summary 2");
        let calls = h.oracle.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_consensus_shared_with_participants() {
        let h = harness(
            ScriptedChannel::new()
                .unreachable("carol")
                .answering("alice", 1, "A")
                .answering("bob", 2, "B"),
        );

        h.use_case.execute(input()).await.unwrap();

        let sent = h.channel.consensus_sent.lock().unwrap().clone();
        assert_eq!(sent, vec![member("alice").id, member("bob").id]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_oracle_failure_is_fatal() {
        let h = harness_with(
            ScriptedChannel::new()
                .answering("alice", 1, "A")
                .answering("bob", 2, "B"),
            MockOracle::failing(),
            InMemoryRoleStore::new(),
        );

        let err = h.use_case.execute(input()).await.unwrap_err();

        assert!(matches!(err, AskGroupError::Oracle(_)));
        assert_eq!(h.oracle.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_access_denied_before_dispatch() {
        let h = harness_with(
            ScriptedChannel::new(),
            MockOracle::new(),
            InMemoryRoleStore::new().with_role("g", "voters"),
        );

        let err = h.use_case.execute(input()).await.unwrap_err();

        assert!(matches!(
            err,
            AskGroupError::AccessDenied(AccessDenied::MissingRole(ref role)) if role.as_str() == "voters"
        ));
        assert!(h.channel.delivered.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_required_role_held_allows_dispatch() {
        let h = harness_with(
            ScriptedChannel::new().answering("bob", 1, "B"),
            MockOracle::new(),
            InMemoryRoleStore::new().with_role("g", "voters"),
        );
        let invoker = Invoker::new(member("alice")).with_roles([RoleId::new("voters")]);
        let input = AskGroupInput::new("g", invoker, "Friday social?").with_timeout_minutes(1);

        let outcome = h.use_case.execute(input).await.unwrap();

        assert!(matches!(outcome, AskGroupOutcome::SingleResponse { .. }));
        assert_eq!(h.channel.delivered.lock().unwrap().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_question_rejected() {
        let h = harness(ScriptedChannel::new());
        let input = AskGroupInput::new("g", Invoker::new(member("alice")), "   ");

        let err = h.use_case.execute(input).await.unwrap_err();

        assert!(matches!(err, AskGroupError::InvalidInput(_)));
        assert!(h.channel.delivered.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_target_string_limits_batch() {
        let h = harness(ScriptedChannel::new());
        let input = input().with_target("@carol nobody");

        let outcome = h.use_case.execute(input).await.unwrap();

        let ids: Vec<_> = outcome
            .report()
            .slots()
            .iter()
            .map(|s| s.participant().display_name.clone())
            .collect();
        assert_eq!(ids, vec!["carol", "alice"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_timeout_applies() {
        let h = harness(ScriptedChannel::new());
        let input = AskGroupInput::new("g", Invoker::new(member("alice")), "Friday social?");
        let start = tokio::time::Instant::now();

        h.use_case.execute(input).await.unwrap();

        assert_eq!(start.elapsed(), std::time::Duration::from_secs(45 * 60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_resolution_does_not_extend_deadline() {
        let h = harness_on(
            directory().slow(20),
            ScriptedChannel::new(),
            MockOracle::new(),
            InMemoryRoleStore::new(),
        );
        let grace = BehaviorConfig::default().grace;
        let start = tokio::time::Instant::now();

        let outcome = h.use_case.execute(input()).await.unwrap();

        let elapsed = start.elapsed();
        assert!(elapsed <= std::time::Duration::from_secs(60) + grace);
        assert_eq!(elapsed, std::time::Duration::from_secs(60));
        assert_eq!(outcome.report().timed_out_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_answer_after_printed_end_rejected() {
        // Prompts go out 20s in, so bob answers at 65s and carol at 50s
        let h = harness_on(
            directory().slow(20),
            ScriptedChannel::new()
                .answering("bob", 45, "late")
                .answering("carol", 30, "on time"),
            MockOracle::new(),
            InMemoryRoleStore::new(),
        );

        let outcome = h.use_case.execute(input()).await.unwrap();

        match &outcome {
            AskGroupOutcome::SingleResponse { answer, .. } => {
                assert_eq!(answer.text, "on time");
                assert_eq!(answer.participant, member("carol"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(
            outcome.report().slots()[1].state(),
            &confluence_domain::SlotState::TimedOut
        );
        let bob = h.channel.submitter("bob").unwrap();
        assert_eq!(bob.submit("late"), Err(crate::SubmitError::Closed));
    }

    struct RecordingLogger(Mutex<Vec<&'static str>>);

    impl BatchEventLogger for RecordingLogger {
        fn log(&self, event: BatchEvent) {
            self.0.lock().unwrap().push(event.event_type);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_events_logged() {
        let logger = Arc::new(RecordingLogger(Mutex::new(Vec::new())));
        let h = harness(
            ScriptedChannel::new()
                .unreachable("carol")
                .answering("bob", 1, "B"),
        );
        let use_case = h.use_case.with_logger(logger.clone());

        use_case.execute(input()).await.unwrap();

        let events = logger.0.lock().unwrap().clone();
        assert_eq!(events.first(), Some(&"batch_started"));
        assert!(events.contains(&"delivery_failed"));
        assert_eq!(events.iter().filter(|e| **e == "slot_resolved").count(), 3);
        assert_eq!(events.last(), Some(&"batch_completed"));
    }
}
