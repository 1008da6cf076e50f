//! Integration test harness
//!
//! - `scripted_roller` - Roller over a fixed sequence of die results
//! - `RecordingRenderer` - Renderer that keeps every outcome it is handed
//! - `FixedDialog` - Choice dialog that always answers the same way

use std::sync::atomic::{AtomicUsize, Ordering};

use rollcore::{
    ChoiceDialog, DialogPrompt, RenderContext, RollChoice, RollError, RollOutcome, RollRenderer,
    RollSettings, Roller, ScriptedDice,
};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install a test subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Roller that replays the given die results
pub fn scripted_roller(values: &[u32]) -> Roller<ScriptedDice> {
    init_tracing();
    Roller::with_dice(
        ScriptedDice::new(values.iter().copied()),
        RollSettings::default(),
    )
}

/// Renderer that records outcomes and acknowledges with a message number
#[derive(Default)]
pub struct RecordingRenderer {
    pub rendered: Mutex<Vec<(RollOutcome, RenderContext)>>,
    fail: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer whose every call fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn count(&self) -> usize {
        self.rendered.lock().await.len()
    }
}

impl RollRenderer for RecordingRenderer {
    type Ack = usize;

    async fn render(&self, outcome: &RollOutcome, ctx: &RenderContext) -> Result<usize, RollError> {
        if self.fail {
            return Err(RollError::Render("chat log unavailable".into()));
        }
        let mut rendered = self.rendered.lock().await;
        rendered.push((outcome.clone(), ctx.clone()));
        Ok(rendered.len())
    }
}

/// Dialog with a canned answer that counts how often it was asked
pub struct FixedDialog {
    choice: RollChoice,
    asked: AtomicUsize,
}

impl FixedDialog {
    pub fn new(choice: RollChoice) -> Self {
        Self {
            choice,
            asked: AtomicUsize::new(0),
        }
    }

    pub fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl ChoiceDialog for FixedDialog {
    async fn choose(&self, _prompt: &DialogPrompt) -> RollChoice {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.choice
    }
}
