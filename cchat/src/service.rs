//! Turn orchestration over the completion client, the capability runtime,
//! and the ledger.

use std::sync::Arc;
use std::time::{Instant, SystemTime};

use cledger::LedgerBackend;
use cprovider::{
    Message, ModelProvider, ModelRequest, OutputItem, Role, TokenUsage, ToolCall,
};
use ctooling::{CapabilityCall, CapabilityContext, CapabilityRuntime, ToolCatalog};

use crate::prompt::build_system_instruction;
use crate::{ChatError, ChatPolicy, NoopTurnHooks, TurnHooks, TurnRequest, TurnResult};

/// Upper bound on capability rounds within a single turn. The wrap-up
/// completion carries no tools, so the model cannot chain calls past it.
pub const MAX_CAPABILITY_ROUNDS: usize = 1;

#[derive(Clone)]
pub struct ConciergeService {
    provider: Arc<dyn ModelProvider>,
    ledger: Arc<dyn LedgerBackend>,
    capabilities: Arc<dyn CapabilityRuntime>,
    catalog: ToolCatalog,
    policy: ChatPolicy,
    hooks: Arc<dyn TurnHooks>,
}

impl ConciergeService {
    pub fn builder(
        provider: Arc<dyn ModelProvider>,
        ledger: Arc<dyn LedgerBackend>,
        capabilities: Arc<dyn CapabilityRuntime>,
    ) -> ConciergeServiceBuilder {
        ConciergeServiceBuilder::new(provider, ledger, capabilities)
    }

    /// Processes one `(user, message)` pair into one reply.
    ///
    /// The inbound message is persisted as soon as it is appended to the
    /// history, so a turn that fails later never silently drops guest
    /// input; everything produced after that point is persisted before
    /// the reply is returned.
    pub async fn run_turn(&self, request: TurnRequest) -> Result<TurnResult, ChatError> {
        if request.user_id.as_str().trim().is_empty() {
            return Err(ChatError::invalid_request("user_id must not be empty"));
        }

        let user_id = request.user_id.clone();
        self.hooks.on_turn_start(&user_id);
        let started = Instant::now();

        let result = self.process_turn(request).await;
        let elapsed = started.elapsed();
        match &result {
            Ok(turn) => self.hooks.on_turn_success(&user_id, turn, elapsed),
            Err(error) => self.hooks.on_turn_failure(&user_id, error, elapsed),
        }

        result
    }

    async fn process_turn(&self, request: TurnRequest) -> Result<TurnResult, ChatError> {
        let user_id = request.user_id;
        let user = self
            .ledger
            .upsert_user(&user_id, SystemTime::now())
            .await?;
        let mut history = self.ledger.load_conversation(&user_id).await?;

        let user_message = Message::new(Role::User, request.message);
        history.push(user_message.clone());
        self.ledger
            .append_conversation_messages(&user_id, vec![user_message])
            .await?;

        let system_instruction = build_system_instruction(&user);

        let first_request =
            self.completion_request(Some(&system_instruction), &history, true)?;
        let response = self.provider.complete(first_request).await?;
        let mut usage = response.usage;
        let (content, tool_calls) = collect_output(response.output);

        let mut capability = None;
        let mut rounds_left = MAX_CAPABILITY_ROUNDS;
        let mut reply = content;
        let mut pending_call = tool_calls.into_iter().next();

        while let Some(tool_call) = pending_call.take() {
            if rounds_left == 0 {
                break;
            }
            rounds_left -= 1;

            let call = CapabilityCall::parse(&tool_call)?;
            capability = Some(call.name().to_string());
            self.hooks.on_capability_requested(&user_id, call.name());

            let context = CapabilityContext::new(user_id.clone());
            let outcome = self.capabilities.execute(call.clone(), context).await?;

            let mut call_text = reply;
            if let Some(booking_id) = &outcome.created_booking {
                // The id reaches the transcript even if the model drops it.
                call_text.push_str(&format!(" Your booking ID is {booking_id}."));
            }

            let call_message = Message::assistant_tool_call(call_text, tool_call);
            let result_message = Message::tool_result(call.name(), outcome.output);
            history.push(call_message.clone());
            history.push(result_message.clone());
            self.ledger
                .append_conversation_messages(&user_id, vec![call_message, result_message])
                .await?;

            let wrap_up = self.completion_request(None, &history, false)?;
            let response = self.provider.complete(wrap_up).await?;
            usage = add_usage(usage, response.usage);
            let (content, more_calls) = collect_output(response.output);
            reply = content;
            pending_call = more_calls.into_iter().next();
        }

        let final_message = Message::new(Role::Assistant, reply.clone());
        self.ledger
            .append_conversation_messages(&user_id, vec![final_message])
            .await?;

        Ok(TurnResult {
            user_id,
            reply,
            capability,
            usage,
        })
    }

    fn completion_request(
        &self,
        system_instruction: Option<&str>,
        history: &[Message],
        offer_tools: bool,
    ) -> Result<ModelRequest, ChatError> {
        let mut messages = Vec::new();
        if let Some(instruction) = system_instruction {
            messages.push(Message::new(Role::System, instruction));
        }
        messages.extend(self.policy.retention.apply(history));

        let mut builder = ModelRequest::builder(self.policy.model.clone()).messages(messages);
        if let Some(temperature) = self.policy.temperature {
            builder = builder.temperature(temperature);
        }
        if let Some(max_tokens) = self.policy.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }
        if offer_tools {
            builder = builder.tools(self.catalog.definitions());
        }

        builder.build().map_err(ChatError::from)
    }
}

pub struct ConciergeServiceBuilder {
    provider: Arc<dyn ModelProvider>,
    ledger: Arc<dyn LedgerBackend>,
    capabilities: Arc<dyn CapabilityRuntime>,
    catalog: ToolCatalog,
    policy: ChatPolicy,
    hooks: Arc<dyn TurnHooks>,
}

impl ConciergeServiceBuilder {
    pub fn new(
        provider: Arc<dyn ModelProvider>,
        ledger: Arc<dyn LedgerBackend>,
        capabilities: Arc<dyn CapabilityRuntime>,
    ) -> Self {
        Self {
            provider,
            ledger,
            capabilities,
            catalog: ToolCatalog::standard(),
            policy: ChatPolicy::default(),
            hooks: Arc::new(NoopTurnHooks),
        }
    }

    pub fn catalog(mut self, catalog: ToolCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn policy(mut self, policy: ChatPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn TurnHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn build(self) -> ConciergeService {
        ConciergeService {
            provider: self.provider,
            ledger: self.ledger,
            capabilities: self.capabilities,
            catalog: self.catalog,
            policy: self.policy,
            hooks: self.hooks,
        }
    }
}

fn collect_output(items: Vec<OutputItem>) -> (String, Vec<ToolCall>) {
    let mut text = String::new();
    let mut tool_calls = Vec::new();

    for item in items {
        match item {
            OutputItem::Message(message) => {
                if message.role == Role::Assistant {
                    text.push_str(&message.content);
                }
            }
            OutputItem::ToolCall(call) => tool_calls.push(call),
        }
    }

    (text, tool_calls)
}

fn add_usage(a: TokenUsage, b: TokenUsage) -> TokenUsage {
    TokenUsage {
        input_tokens: a.input_tokens + b.input_tokens,
        output_tokens: a.output_tokens + b.output_tokens,
        total_tokens: a.total_tokens + b.total_tokens,
    }
}
