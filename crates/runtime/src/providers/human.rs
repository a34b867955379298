//! Interactive policy: a human picks from the numbered legal list.
//!
//! The provider does no I/O itself. It sends a [`ChoiceRequest`] to whichever
//! frontend owns the receiving end and waits for the raw text reply.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use game_core::{Action, BattleState, CombatantId, Dice};

use crate::api::{ActionProvider, ActionRequest, Result, RuntimeError};

/// A prompt for the frontend.
///
/// Answer by sending the user's raw input through `reply`. Dropping `reply`
/// cancels the encounter.
#[derive(Debug)]
pub struct ChoiceRequest {
    pub actor: CombatantId,
    pub view: BattleState,
    /// Entry `n` is offered to the user as choice `n + 1`.
    pub legal: Vec<Action>,
    /// Why the previous answer was refused, if this is a re-prompt.
    pub rejection: Option<String>,
    pub reply: oneshot::Sender<String>,
}

/// Why a typed choice was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChoiceRejection {
    #[error("enter the number of an action")]
    Empty,

    #[error("'{input}' is not a number")]
    NotANumber { input: String },

    #[error("{choice} is not between 1 and {count}")]
    OutOfRange { choice: u64, count: usize },
}

/// Parses a 1-based selection into an index into a list of `count` entries.
pub fn parse_choice(input: &str, count: usize) -> std::result::Result<usize, ChoiceRejection> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ChoiceRejection::Empty);
    }
    let choice: u64 = input.parse().map_err(|_| ChoiceRejection::NotANumber {
        input: input.to_owned(),
    })?;

    match usize::try_from(choice) {
        Ok(n) if (1..=count).contains(&n) => Ok(n - 1),
        _ => Err(ChoiceRejection::OutOfRange { choice, count }),
    }
}

/// Forwards prompts to a frontend over a channel.
#[derive(Clone, Debug)]
pub struct HumanProvider {
    requests: mpsc::Sender<ChoiceRequest>,
}

impl HumanProvider {
    pub fn new(requests: mpsc::Sender<ChoiceRequest>) -> Self {
        Self { requests }
    }

    /// Creates a provider and the receiver its prompts arrive on.
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<ChoiceRequest>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl ActionProvider for HumanProvider {
    async fn provide_action(&self, request: &ActionRequest, _dice: &mut Dice) -> Result<Action> {
        let actor = request.actor;
        if request.legal.is_empty() {
            return Err(RuntimeError::NoLegalActions { actor });
        }

        let mut rejection = None;
        loop {
            let (reply, answer) = oneshot::channel();
            self.requests
                .send(ChoiceRequest {
                    actor,
                    view: request.view.clone(),
                    legal: request.legal.clone(),
                    rejection: rejection.take(),
                    reply,
                })
                .await
                .map_err(|_| RuntimeError::InputCancelled { actor })?;

            let text = answer
                .await
                .map_err(|_| RuntimeError::InputCancelled { actor })?;

            match parse_choice(&text, request.legal.len()) {
                Ok(index) => {
                    if let Some(action) = request.legal.get(index) {
                        return Ok(action.clone());
                    }
                }
                Err(reason) => {
                    tracing::debug!(
                        target: "runtime::provider",
                        actor = %actor,
                        input = %text.trim(),
                        %reason,
                        "choice rejected"
                    );
                    rejection = Some(reason.to_string());
                }
            }
        }
    }
}
