//! Advantage dialog scenarios

use crate::harness::{scripted_roller, FixedDialog, RecordingRenderer};
use rollcore::{
    Advantage, ChannelDialog, Item, RenderContext, RollChoice, RollContext, RollMode,
    RollOptions,
};

/// Test: choosing advantage over the channel rolls 2d20kh
#[tokio::test]
async fn test_channel_advantage() {
    let mut roller = scripted_roller(&[6, 15]);
    let renderer = RecordingRenderer::new();
    let (dialog, mut prompts) = ChannelDialog::new(4);
    let ctx = RollContext::new().with_bonus("itemBonus", 1);
    let options = RollOptions::new()
        .with_title("Sneak past the guard")
        .with_roll_mode(RollMode::Blind);

    let host = tokio::spawn(async move {
        let pending = prompts.recv().await.expect("no prompt");
        assert_eq!(pending.prompt.title, "Sneak past the guard");
        assert_eq!(pending.prompt.formula, "1d20 + @itemBonus");
        assert_eq!(pending.prompt.roll_mode, RollMode::Blind);
        pending.responder.respond(RollChoice::Advantage);
    });

    let rendered = roller
        .prompt_and_roll(
            &["1d20", "@itemBonus"],
            &ctx,
            &options,
            &dialog,
            &renderer,
            &RenderContext::default(),
        )
        .await
        .expect("roll failed")
        .expect("dialog cancelled");
    host.await.expect("host panicked");

    assert_eq!(rendered.outcome.advantage, Advantage::Advantage);
    assert_eq!(rendered.outcome.bundle.main().formula(), "2d20kh + @itemBonus");
    assert_eq!(rendered.outcome.bundle.main().total(), 16);
    assert_eq!(renderer.count().await, 1);
}

/// Test: disadvantage maps to a single keep-lowest roll
#[tokio::test]
async fn test_fixed_disadvantage() {
    let mut roller = scripted_roller(&[6, 15]);
    let dialog = FixedDialog::new(RollChoice::Disadvantage);

    let rendered = roller
        .prompt_and_roll(
            &["1d20"],
            &RollContext::new(),
            &RollOptions::new(),
            &dialog,
            &RecordingRenderer::new(),
            &RenderContext::default(),
        )
        .await
        .expect("roll failed")
        .expect("dialog cancelled");

    assert_eq!(rendered.outcome.advantage.indicator(), -1);
    assert_eq!(rendered.outcome.bundle.main().total(), 6);
}

/// Test: dismissing the dialog resolves to nothing and rolls nothing
#[tokio::test]
async fn test_dismissed_dialog() {
    let mut roller = scripted_roller(&[6]);
    let renderer = RecordingRenderer::new();
    let (dialog, mut prompts) = ChannelDialog::new(1);

    let host = tokio::spawn(async move {
        let pending = prompts.recv().await.expect("no prompt");
        drop(pending);
    });

    let result = roller
        .prompt_and_roll(
            &["1d20"],
            &RollContext::new().with_item(Item::plain("Rope")),
            &RollOptions::new(),
            &dialog,
            &renderer,
            &RenderContext::default(),
        )
        .await
        .expect("roll failed");
    host.await.expect("host panicked");

    assert!(result.is_none());
    assert_eq!(renderer.count().await, 0);
    assert_eq!(roller.dice_mut().remaining(), 1);
}

/// Test: fast-forward skips the dialog and rolls normally
#[tokio::test]
async fn test_fast_forward_skips_dialog() {
    let mut roller = scripted_roller(&[8]);
    let dialog = FixedDialog::new(RollChoice::Advantage);

    let rendered = roller
        .prompt_and_roll(
            &["1d20"],
            &RollContext::new(),
            &RollOptions::new().fast_forward(),
            &dialog,
            &RecordingRenderer::new(),
            &RenderContext::default(),
        )
        .await
        .expect("roll failed")
        .expect("dialog cancelled");

    assert_eq!(dialog.asked(), 0);
    assert_eq!(rendered.outcome.advantage, Advantage::Normal);
    assert_eq!(rendered.outcome.bundle.main().formula(), "1d20");
}
