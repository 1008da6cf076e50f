//! Advantage choice dialog
//!
//! The host presents three buttons (advantage, normal, disadvantage) and may
//! be dismissed. Whatever happens, exactly one [`RollChoice`] comes back over a
//! single oneshot channel; a dropped responder reads as `Cancelled`.

use serde::{Deserialize, Serialize};
use std::future::Future;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::dice::Advantage;
use crate::render::RollMode;

/// Outcome of the choice dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollChoice {
    Advantage,
    Normal,
    Disadvantage,
    Cancelled,
}

impl RollChoice {
    /// The advantage to roll with, or `None` if the dialog was dismissed
    pub fn advantage(&self) -> Option<Advantage> {
        match self {
            RollChoice::Advantage => Some(Advantage::Advantage),
            RollChoice::Normal => Some(Advantage::Normal),
            RollChoice::Disadvantage => Some(Advantage::Disadvantage),
            RollChoice::Cancelled => None,
        }
    }
}

impl From<Advantage> for RollChoice {
    fn from(advantage: Advantage) -> Self {
        match advantage {
            Advantage::Advantage => RollChoice::Advantage,
            Advantage::Normal => RollChoice::Normal,
            Advantage::Disadvantage => RollChoice::Disadvantage,
        }
    }
}

/// What the dialog shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogPrompt {
    pub title: String,
    pub formula: String,
    pub roll_mode: RollMode,
}

/// Asks the user how to roll
pub trait ChoiceDialog {
    fn choose(&self, prompt: &DialogPrompt) -> impl Future<Output = RollChoice> + Send;
}

/// Single-use responder for one prompt
#[derive(Debug)]
pub struct ChoiceResponder {
    tx: oneshot::Sender<RollChoice>,
}

impl ChoiceResponder {
    /// Deliver the choice. Returns false if nobody is waiting any more.
    pub fn respond(self, choice: RollChoice) -> bool {
        self.tx.send(choice).is_ok()
    }
}

/// A prompt waiting for the host UI
#[derive(Debug)]
pub struct PendingChoice {
    pub prompt: DialogPrompt,
    pub responder: ChoiceResponder,
}

/// Dialog that forwards prompts to the host over a channel
#[derive(Debug, Clone)]
pub struct ChannelDialog {
    prompts: mpsc::Sender<PendingChoice>,
}

impl ChannelDialog {
    /// Create a dialog and the receiver the host UI reads prompts from
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<PendingChoice>) {
        let (prompts, rx) = mpsc::channel(buffer);
        (Self { prompts }, rx)
    }
}

impl ChoiceDialog for ChannelDialog {
    async fn choose(&self, prompt: &DialogPrompt) -> RollChoice {
        let (tx, rx) = oneshot::channel();
        let pending = PendingChoice {
            prompt: prompt.clone(),
            responder: ChoiceResponder { tx },
        };

        if self.prompts.send(pending).await.is_err() {
            debug!("dialog host gone, treating as cancelled");
            return RollChoice::Cancelled;
        }

        rx.await.unwrap_or(RollChoice::Cancelled)
    }
}
