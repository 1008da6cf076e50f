//! Roll orchestration
//!
//! [`Roller`] runs a whole action:
//! 1. Resolve the roll mode
//! 2. Apply advantage and evaluate the main roll
//! 3. For a d20: classify the critical, then roll weapon damage or compute
//!    the spell target, and pick a default flavor
//! 4. Compare against the target, if any
//! 5. Hand the result to the renderer (unless no chat message is wanted)

use rand::rngs::ThreadRng;
use tracing::{debug, warn};

use super::bundle::RollBundle;
use super::critical::{classify, Critical, CRITICAL_DIE_FACES};
use super::damage::roll_weapon_damage;
use crate::config::RollSettings;
use crate::context::RollContext;
use crate::dialog::{ChoiceDialog, DialogPrompt};
use crate::dice::{apply_advantage, evaluate, join_terms, Advantage, DieSource, RngDice};
use crate::error::RollError;
use crate::render::{Flavor, RenderContext, Rendered, RollOptions, RollOutcome, RollRenderer};

/// Evaluates actions against a die source and settings
#[derive(Debug, Clone)]
pub struct Roller<D> {
    dice: D,
    settings: RollSettings,
}

impl Roller<RngDice<ThreadRng>> {
    /// Roller backed by the thread-local RNG
    pub fn new(settings: RollSettings) -> Self {
        Self::with_dice(RngDice::thread(), settings)
    }
}

impl<D: DieSource> Roller<D> {
    pub fn with_dice(dice: D, settings: RollSettings) -> Self {
        Self { dice, settings }
    }

    pub fn settings(&self) -> &RollSettings {
        &self.settings
    }

    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    /// Evaluate an action without rendering it
    pub fn roll<S: AsRef<str>>(
        &mut self,
        terms: &[S],
        ctx: &RollContext,
        advantage: Advantage,
        options: &RollOptions,
    ) -> Result<RollOutcome, RollError> {
        let mut options = options.clone();
        if options.roll_mode.is_none() {
            options.roll_mode = Some(self.settings.default_roll_mode.clone());
        }
        if options.chat_message.is_none() {
            options.chat_message = Some(self.settings.chat_message);
        }

        let terms = apply_advantage(terms, advantage);
        let main = evaluate(&terms, ctx, &mut self.dice)?;

        let is_d20 = main
            .primary()
            .is_some_and(|p| p.faces == CRITICAL_DIE_FACES);

        let mut bundle = if is_d20 {
            let thresholds = self
                .settings
                .critical
                .with_overrides(ctx.critical_success, ctx.critical_failure);
            let critical = classify(&main, thresholds);
            let mut bundle = RollBundle::new(main, critical);

            if let Some((item, weapon)) = ctx.weapon() {
                let damage = roll_weapon_damage(&bundle, &item.name, weapon, ctx, &mut self.dice)?;
                bundle = bundle.with_damage(damage);
                options.flavor.get_or_insert_with(|| Flavor::ItemRoll {
                    item: item.name.clone(),
                });
            } else if let Some((item, spell)) = ctx.spell() {
                let target = spell.tier as i64 + self.settings.spell_target_base;
                options.target = Some(target);
                options.flavor.get_or_insert_with(|| Flavor::SpellCast {
                    spell: item.name.clone(),
                    target,
                });
            }
            bundle
        } else {
            RollBundle::new(main, Critical::None)
        };

        if let Some(target) = options.target {
            bundle.resolve_target(target);
        }

        debug!(
            formula = %bundle.main().formula(),
            total = bundle.main().total(),
            critical = ?bundle.critical(),
            success = ?bundle.success(),
            damage = ?bundle.primary_damage().map(|r| r.total()),
            "roll complete"
        );

        Ok(RollOutcome {
            bundle,
            advantage,
            options,
        })
    }

    /// Evaluate an action and hand it to the renderer
    pub async fn roll_and_render<S, R>(
        &mut self,
        terms: &[S],
        ctx: &RollContext,
        advantage: Advantage,
        options: &RollOptions,
        renderer: &R,
        render_ctx: &RenderContext,
    ) -> Result<Rendered<R::Ack>, RollError>
    where
        S: AsRef<str>,
        R: RollRenderer,
    {
        let outcome = self.roll(terms, ctx, advantage, options)?;
        if !outcome.chat_message() {
            return Ok(Rendered { outcome, ack: None });
        }

        let ack = renderer.render(&outcome, render_ctx).await.inspect_err(|e| {
            warn!(error = %e, "failed to render roll");
        })?;
        Ok(Rendered {
            outcome,
            ack: Some(ack),
        })
    }

    /// Ask how to roll, then roll and render.
    ///
    /// Fast-forwarded rolls skip the dialog and roll normally. A dismissed
    /// dialog resolves to `Ok(None)`.
    pub async fn prompt_and_roll<S, C, R>(
        &mut self,
        terms: &[S],
        ctx: &RollContext,
        options: &RollOptions,
        dialog: &C,
        renderer: &R,
        render_ctx: &RenderContext,
    ) -> Result<Option<Rendered<R::Ack>>, RollError>
    where
        S: AsRef<str>,
        C: ChoiceDialog,
        R: RollRenderer,
    {
        let advantage = if options.fast_forward {
            Advantage::Normal
        } else {
            let prompt = self.prompt(terms, ctx, options);
            match dialog.choose(&prompt).await.advantage() {
                Some(advantage) => advantage,
                None => {
                    debug!(title = %prompt.title, "roll dialog cancelled");
                    return Ok(None);
                }
            }
        };

        self.roll_and_render(terms, ctx, advantage, options, renderer, render_ctx)
            .await
            .map(Some)
    }

    fn prompt<S: AsRef<str>>(&self, terms: &[S], ctx: &RollContext, options: &RollOptions) -> DialogPrompt {
        let title = options
            .title
            .clone()
            .or_else(|| options.flavor.as_ref().map(ToString::to_string))
            .or_else(|| ctx.item.as_ref().map(|i| i.name.clone()))
            .unwrap_or_default();

        DialogPrompt {
            title,
            formula: join_terms(terms),
            roll_mode: options
                .roll_mode
                .clone()
                .unwrap_or_else(|| self.settings.default_roll_mode.clone()),
        }
    }
}
