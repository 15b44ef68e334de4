//! # Handler chain
//!
//! Runs a sequence of handlers for each message. Every handler gets `before` in order (any `false`
//! stops the chain with [`HandlerResponse::Stop`]); then `handle` runs in order until one returns
//! Stop or Reply; then `after` runs in reverse order with the final response.

use dbot_core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Ordered list of handlers shared by all incoming messages.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler; handlers run in insertion order.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handler names in run order.
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Runs before (all) → handle (until Stop/Reply) → after (reverse). Returns the response that
    /// ended the handle phase, or Continue when no handler claimed the message.
    #[instrument(skip(self, message), fields(user_id = message.user.id, message_type = %message.message_type))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(
            chat_id = message.chat.id,
            message_id = %message.id,
            handlers = self.handlers.len(),
            "step: handler_chain started"
        );

        for h in &self.handlers {
            let name = h.name();
            if !h.before(message).await? {
                info!(handler = %name, "step: before returned false, chain stopped");
                return Ok(HandlerResponse::Stop);
            }
            debug!(handler = %name, "step: handler before done");
        }

        let mut final_response = HandlerResponse::Continue;
        for h in &self.handlers {
            let name = h.name();
            let response = h.handle(message).await?;
            let reply_len = match &response {
                HandlerResponse::Reply(s) => Some(s.len()),
                _ => None,
            };
            info!(
                handler = %name,
                response = ?response_kind(&response),
                reply_len = ?reply_len,
                "step: handler handle done"
            );

            if matches!(response, HandlerResponse::Stop | HandlerResponse::Reply(_)) {
                final_response = response;
                break;
            }
        }

        for h in self.handlers.iter().rev() {
            h.after(message, &final_response).await?;
        }

        info!(
            chat_id = message.chat.id,
            message_id = %message.id,
            response = ?response_kind(&final_response),
            "step: handler_chain finished"
        );

        Ok(final_response)
    }
}

fn response_kind(response: &HandlerResponse) -> &'static str {
    match response {
        HandlerResponse::Continue => "Continue",
        HandlerResponse::Stop => "Stop",
        HandlerResponse::Ignore => "Ignore",
        HandlerResponse::Reply(_) => "Reply",
    }
}

// Tests live in tests/handler_chain_test.rs
