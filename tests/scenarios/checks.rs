//! Plain check scenarios

use crate::harness::{scripted_roller, RecordingRenderer};
use rollcore::dice::TermResult;
use rollcore::{
    Advantage, Critical, RenderContext, RngDice, RollContext, RollMode, RollOptions, RollSettings,
    Roller, Speaker,
};

/// Test: bonus reference is substituted into the formula total
#[tokio::test]
async fn test_check_with_item_bonus() {
    let mut roller = scripted_roller(&[12]);
    let renderer = RecordingRenderer::new();
    let ctx = RollContext::new().with_bonus("itemBonus", 3);

    let rendered = roller
        .roll_and_render(
            &["1d20", "@itemBonus"],
            &ctx,
            Advantage::Normal,
            &RollOptions::new(),
            &renderer,
            &RenderContext::default(),
        )
        .await
        .expect("roll failed");

    let main = rendered.outcome.bundle.main();
    assert_eq!(main.formula(), "1d20 + @itemBonus");
    assert_eq!(main.resolved_formula(), "1d20 + 3");
    assert_eq!(main.total(), 15);
    assert_eq!(
        main.terms()[1],
        TermResult::Bonus {
            key: "itemBonus".into(),
            value: 3
        }
    );
    assert_eq!(rendered.ack, Some(1));
    assert_eq!(renderer.count().await, 1);
}

/// Test: zero and missing bonuses vanish from the formula
#[tokio::test]
async fn test_empty_bonuses_dropped() {
    let mut roller = scripted_roller(&[9]);
    let ctx = RollContext::new()
        .with_bonus("abilityBonus", 0)
        .with_bonus("talentBonus", 1);

    let outcome = roller
        .roll(
            &["1d20", "@abilityBonus", "@itemBonus", "@talentBonus"],
            &ctx,
            Advantage::Normal,
            &RollOptions::new(),
        )
        .expect("roll failed");

    assert_eq!(outcome.bundle.main().formula(), "1d20 + @talentBonus");
    assert_eq!(outcome.bundle.main().total(), 10);
}

/// Test: disadvantage keeps the lower die and the natural 1 is a failure
#[tokio::test]
async fn test_disadvantage_critical_failure() {
    let mut roller = scripted_roller(&[1, 19]);
    let outcome = roller
        .roll(
            &["1d20"],
            &RollContext::new(),
            Advantage::Disadvantage,
            &RollOptions::new(),
        )
        .expect("roll failed");

    assert_eq!(outcome.bundle.main().formula(), "2d20kl");
    assert_eq!(outcome.bundle.main().total(), 1);
    assert_eq!(outcome.bundle.critical(), Critical::Failure);
}

/// Test: target comparison uses the total, bonuses included
#[tokio::test]
async fn test_target_success_flag() {
    let ctx = RollContext::new().with_bonus("itemBonus", 2);
    let options = RollOptions::new().with_target(12);

    let outcome = scripted_roller(&[10])
        .roll(&["1d20", "@itemBonus"], &ctx, Advantage::Normal, &options)
        .expect("roll failed");
    assert_eq!(outcome.bundle.success(), Some(true));

    let outcome = scripted_roller(&[9])
        .roll(&["1d20", "@itemBonus"], &ctx, Advantage::Normal, &options)
        .expect("roll failed");
    assert_eq!(outcome.bundle.success(), Some(false));
}

/// Test: no chat message means no render call
#[tokio::test]
async fn test_chat_message_disabled() {
    let mut roller = scripted_roller(&[7]);
    let renderer = RecordingRenderer::new();
    let options = RollOptions::new()
        .with_chat_message(false)
        .with_roll_mode(RollMode::Private);

    let rendered = roller
        .roll_and_render(
            &["1d20"],
            &RollContext::new(),
            Advantage::Normal,
            &options,
            &renderer,
            &RenderContext::default(),
        )
        .await
        .expect("roll failed");

    assert!(rendered.ack.is_none());
    assert_eq!(rendered.outcome.roll_mode(), RollMode::Private);
    assert_eq!(renderer.count().await, 0);
}

/// Test: render context is passed through untouched
#[tokio::test]
async fn test_render_context_forwarded() {
    let mut roller = scripted_roller(&[7]);
    let renderer = RecordingRenderer::new();
    let render_ctx = RenderContext {
        user: Some("gm".into()),
        locale: "de".into(),
        is_gm: true,
    };
    let speaker = Speaker {
        actor: Some("Aria".into()),
        alias: Some("Aria the Bold".into()),
    };

    roller
        .roll_and_render(
            &["1d20"],
            &RollContext::new(),
            Advantage::Normal,
            &RollOptions::new().with_speaker(speaker.clone()),
            &renderer,
            &render_ctx,
        )
        .await
        .expect("roll failed");

    let rendered = renderer.rendered.lock().await;
    assert_eq!(rendered[0].1, render_ctx);
    assert_eq!(rendered[0].0.options.speaker, Some(speaker));
}

/// Test: renderer errors reach the caller
#[tokio::test]
async fn test_render_failure_propagates() {
    let mut roller = scripted_roller(&[7]);
    let err = roller
        .roll_and_render(
            &["1d20"],
            &RollContext::new(),
            Advantage::Normal,
            &RollOptions::new(),
            &RecordingRenderer::failing(),
            &RenderContext::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, rollcore::RollError::Render(_)));
}

/// Test: the same seed reproduces the same roll
#[test]
fn test_seeded_rolls_repeat() {
    let ctx = RollContext::new().with_bonus("itemBonus", 1);
    let roll = |seed| {
        Roller::with_dice(RngDice::seeded(seed), RollSettings::default())
            .roll(&["1d20", "@itemBonus"], &ctx, Advantage::Advantage, &RollOptions::new())
            .expect("roll failed")
    };
    assert_eq!(roll(99), roll(99));
}
