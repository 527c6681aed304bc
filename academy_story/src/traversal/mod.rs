//! Traversal Engine - walks a session through the scene graph.
//!
//! States are `(arc, scene)` pairs and the input alphabet is choice indices.
//! One call to [`TraversalEngine::choose`] performs one step:
//!
//! 1. **Check**: the session is live, the scene exists and is accessible
//! 2. **Stage**: the choice exists, its consequence resolves to a target, and
//!    the target is accessible once the consequence is applied
//! 3. **Apply**: traits, relationships, flags, experience, achievements
//! 4. **Move**: to the target scene, into a pending fight, or to game over
//!
//! Staging works on a copy of the state that is only committed once every
//! check has passed, so a rejected choice leaves the session untouched.

mod combat;

pub use combat::*;

use academy_rules::{GameState, PendingCombat};
use tracing::{debug, info, warn};

use crate::arc::{Arc, ArcRegistry};
use crate::config::EngineConfig;
use crate::error::StoryError;
use crate::scene::{ConsequenceDefect, Scene};

/// What a traversal step led to.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The session is now at this scene.
    Moved { arc: u32, scene: String },
    /// Traversal is suspended until the fight is resolved.
    Combat(CombatRequest),
    /// The session has ended.
    GameOver,
}

enum Next {
    Move(u32, String),
    Fight(PendingCombat),
    End,
}

/// The choice state machine. Holds no session state of its own.
pub struct TraversalEngine<'a> {
    registry: &'a ArcRegistry,
    config: EngineConfig,
}

impl<'a> TraversalEngine<'a> {
    pub fn new(registry: &'a ArcRegistry, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    pub fn with_defaults(registry: &'a ArcRegistry) -> Self {
        Self::new(registry, EngineConfig::default())
    }

    /// Create a session at the starting arc's entry scene.
    pub fn new_game(&self) -> Result<GameState, StoryError> {
        let arc = self.config.starting_arc;
        let scene = self.registry.get_starting_scene(arc)?;
        info!(arc, scene, "new game");
        Ok(GameState::new(arc, scene))
    }

    /// The scene the session is on, ready for display.
    ///
    /// Fails with `RequirementNotMet` if the scene's requirements do not hold;
    /// the engine never skips ahead on its own.
    pub fn current_scene(&self, state: &GameState) -> Result<&'a Scene, StoryError> {
        let scene = self
            .registry
            .get_scene(state.current_arc, &state.current_scene)?;
        self.check_requirements(state.current_arc, scene, state)?;
        Ok(scene)
    }

    /// Check if a scene's requirements hold for this state.
    pub fn is_accessible(
        &self,
        arc: u32,
        scene_id: &str,
        state: &GameState,
    ) -> Result<bool, StoryError> {
        Ok(self.registry.get_scene(arc, scene_id)?.is_accessible(state))
    }

    fn check_requirements(
        &self,
        arc: u32,
        scene: &Scene,
        state: &GameState,
    ) -> Result<(), StoryError> {
        if !self.config.enforce_requirements {
            return Ok(());
        }
        match scene.unmet_requirement(state) {
            Some(requirement) => Err(StoryError::RequirementNotMet {
                arc,
                scene: scene.id.clone(),
                requirement: requirement.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Take choice `index` on the current scene.
    ///
    /// Fails with `RequirementNotMet` if the target scene would be
    /// inaccessible after the choice; the caller can then pick another one.
    pub fn choose(&self, state: &mut GameState, index: usize) -> Result<Step, StoryError> {
        if state.game_over {
            return Err(StoryError::SessionEnded);
        }
        if state.is_suspended() {
            return Err(StoryError::CombatPending);
        }

        let arc_number = state.current_arc;
        let arc = self.registry.get_arc(arc_number)?;
        let scene = self.current_scene(state)?;
        let choice = scene.choice(index).ok_or_else(|| StoryError::InvalidChoice {
            arc: arc_number,
            scene: scene.id.clone(),
            index,
            available: scene.choices.len(),
        })?;

        let consequence = &choice.consequence;
        let malformed = |defect| StoryError::MalformedConsequence {
            arc: arc_number,
            scene: scene.id.clone(),
            choice: index,
            defect,
        };
        let transition = consequence.transition().map_err(malformed)?;
        let target = self.registry.resolve_target(arc_number, &transition)?;

        let mut staged = state.clone();
        consequence.apply(&mut staged);
        if let Some((target_arc, target_scene)) = &target {
            let scene = self.registry.get_scene(*target_arc, target_scene)?;
            self.check_requirements(*target_arc, scene, &staged)?;
        }

        let next = match (target, &consequence.combat) {
            (Some((arc, scene)), Some(trigger)) => Next::Fight(PendingCombat {
                enemy: trigger.enemy.clone(),
                allies: trigger.allies.clone(),
                resume_arc: arc,
                resume_scene: scene,
            }),
            (Some((arc, scene)), None) => Next::Move(arc, scene),
            (None, None) => Next::End,
            (None, Some(_)) => return Err(malformed(ConsequenceDefect::CombatEndsGame)),
        };

        *state = staged;
        debug!(arc = arc_number, scene = %scene.id, choice = index, "applied choice");

        Ok(match next {
            Next::Move(arc, scene) => self.enter(state, arc, scene),
            Next::Fight(pending) => {
                let request = self.combat_request(arc, &pending, state.level());
                info!(
                    enemy = %request.enemy.tag,
                    level = request.enemy.level,
                    allies = ?request.allies,
                    "combat requested"
                );
                state.pending_combat = Some(pending);
                Step::Combat(request)
            }
            Next::End => self.end(state),
        })
    }

    /// Rebuild the request for the fight the session is waiting on.
    pub fn pending_request(&self, state: &GameState) -> Result<CombatRequest, StoryError> {
        let pending = state
            .pending_combat
            .as_ref()
            .ok_or(StoryError::NoCombatPending)?;
        let arc = self.registry.get_arc(state.current_arc)?;
        Ok(self.combat_request(arc, pending, state.level()))
    }

    /// Resume traversal with the outcome of the pending fight.
    ///
    /// Victory and flight continue to the declared next scene. Defeat follows
    /// the configured [`CombatLossPolicy`].
    pub fn resolve_combat(
        &self,
        state: &mut GameState,
        outcome: CombatOutcome,
    ) -> Result<Step, StoryError> {
        let pending = state
            .pending_combat
            .take()
            .ok_or(StoryError::NoCombatPending)?;
        state.set_flag(LAST_COMBAT_OUTCOME_FLAG, outcome.as_str());
        info!(enemy = %pending.enemy, outcome = outcome.as_str(), "combat resolved");

        if outcome == CombatOutcome::Defeat {
            match self.config.combat_loss {
                CombatLossPolicy::Proceed => {
                    warn!(
                        scene = %state.current_scene,
                        "defeat has no authored branch, proceeding"
                    );
                }
                CombatLossPolicy::RetryScene => {
                    return Ok(Step::Moved {
                        arc: state.current_arc,
                        scene: state.current_scene.clone(),
                    });
                }
                CombatLossPolicy::GameOver => return Ok(self.end(state)),
            }
        }

        Ok(self.enter(state, pending.resume_arc, pending.resume_scene))
    }

    /// Hand the pending fight to a resolver and resume with its outcome.
    pub fn settle_combat<R>(
        &self,
        state: &mut GameState,
        resolver: &mut R,
    ) -> Result<Step, StoryError>
    where
        R: CombatResolver + ?Sized,
    {
        let request = self.pending_request(state)?;
        let outcome = resolver.resolve(&request);
        self.resolve_combat(state, outcome)
    }

    fn combat_request(
        &self,
        arc: &Arc,
        pending: &PendingCombat,
        player_level: u32,
    ) -> CombatRequest {
        CombatRequest {
            enemy: arc.create_enemy(&pending.enemy, player_level, &self.config.scaling),
            allies: pending.allies.clone(),
        }
    }

    fn enter(&self, state: &mut GameState, arc: u32, scene: String) -> Step {
        if arc != state.current_arc {
            info!(from = state.current_arc, to = arc, scene = %scene, "entering arc");
        }
        state.move_to(arc, scene.clone());
        Step::Moved { arc, scene }
    }

    fn end(&self, state: &mut GameState) -> Step {
        state.game_over = true;
        info!(arc = state.current_arc, scene = %state.current_scene, "game over");
        Step::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arc::ArcBuilder;
    use crate::scene::{Consequence, Requirement};
    use academy_rules::{EnemyRoster, EnemyTemplate, SpecialGradeRule};

    fn arc_one() -> Result<Arc, StoryError> {
        ArcBuilder::new(1, "Trial")
            .enemies(EnemyRoster::new(SpecialGradeRule::new(4, 11)).with_enemy(
                "warden",
                EnemyTemplate::special_grade("Warden", 350, 120),
            ))
            .scene(
                Scene::new("start", "Start")
                    .with_choice(
                        "Befriend Yuji",
                        Consequence::new()
                            .with_relationship("yuji", 10)
                            .with_trait("compassion", 1)
                            .to_scene("hall"),
                    )
                    .with_choice(
                        "Fight the warden",
                        Consequence::new()
                            .with_experience(250)
                            .with_combat("warden", &["yuji"])
                            .to_scene("hall"),
                    )
                    .with_choice("Try the vault", Consequence::new().to_scene("vault"))
                    .with_choice("Skip ahead", Consequence::new().to_arc(2))
                    .with_choice("Give up", Consequence::new().ending())
                    .with_choice(
                        "Pick the lock and enter the vault",
                        Consequence::new()
                            .with_flag("has_key", true)
                            .to_scene("vault"),
                    ),
            )?
            .scene(
                Scene::new("hall", "Hall")
                    .with_choice("Back", Consequence::new().to_scene("start")),
            )?
            .scene(
                Scene::new("vault", "Vault")
                    .requires(Requirement::flag_set("has_key"))
                    .with_choice("Leave", Consequence::new().to_scene("start")),
            )?
            .build()
    }

    fn arc_two() -> Result<Arc, StoryError> {
        ArcBuilder::new(2, "Epilogue")
            .starting_scene("epilogue")
            .scene(
                Scene::new("epilogue", "Epilogue")
                    .with_choice("End", Consequence::new().ending()),
            )?
            .build()
    }

    fn registry() -> ArcRegistry {
        ArcRegistry::from_constructors(&[(1, arc_one), (2, arc_two)]).unwrap()
    }

    #[test]
    fn test_new_game_starts_at_arc_one() {
        let registry = registry();
        let engine = TraversalEngine::with_defaults(&registry);
        let state = engine.new_game().unwrap();

        assert_eq!(state.current_arc, 1);
        assert_eq!(state.current_scene, "start");
        assert_eq!(engine.current_scene(&state).unwrap().title, "Start");
    }

    #[test]
    fn test_choice_moves_within_arc_and_applies_once() {
        let registry = registry();
        let engine = TraversalEngine::with_defaults(&registry);
        let mut state = engine.new_game().unwrap();

        let step = engine.choose(&mut state, 0).unwrap();

        assert_eq!(
            step,
            Step::Moved {
                arc: 1,
                scene: "hall".to_string()
            }
        );
        assert_eq!(state.relationship("yuji"), 10);
        assert_eq!(state.trait_value("compassion"), 1);
    }

    #[test]
    fn test_next_arc_uses_starting_scene() {
        let registry = registry();
        let engine = TraversalEngine::with_defaults(&registry);
        let mut state = engine.new_game().unwrap();

        engine.choose(&mut state, 3).unwrap();
        assert_eq!((state.current_arc, state.current_scene.as_str()), (2, "epilogue"));
    }

    #[test]
    fn test_game_over_is_terminal() {
        let registry = registry();
        let engine = TraversalEngine::with_defaults(&registry);
        let mut state = engine.new_game().unwrap();

        assert_eq!(engine.choose(&mut state, 4).unwrap(), Step::GameOver);
        assert!(state.game_over);
        assert!(matches!(engine.choose(&mut state, 0), Err(StoryError::SessionEnded)));
    }

    #[test]
    fn test_invalid_choice_leaves_state_untouched() {
        let registry = registry();
        let engine = TraversalEngine::with_defaults(&registry);
        let mut state = engine.new_game().unwrap();
        let before = state.clone();

        let result = engine.choose(&mut state, 6);

        assert!(matches!(
            result,
            Err(StoryError::InvalidChoice {
                index: 6,
                available: 6,
                ..
            })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_inaccessible_target_is_rejected_before_moving() {
        let registry = registry();
        let engine = TraversalEngine::with_defaults(&registry);
        let mut state = engine.new_game().unwrap();
        let before = state.clone();

        assert!(!engine.is_accessible(1, "vault", &state).unwrap());
        let result = engine.choose(&mut state, 2);

        assert!(matches!(
            result,
            Err(StoryError::RequirementNotMet { arc: 1, ref scene, .. }) if scene == "vault"
        ));
        assert_eq!(state, before);

        // The session is still playable from the same scene.
        assert_eq!(
            engine.choose(&mut state, 0).unwrap(),
            Step::Moved {
                arc: 1,
                scene: "hall".to_string()
            }
        );
    }

    #[test]
    fn test_target_requirements_see_the_choice_consequences() {
        let registry = registry();
        let engine = TraversalEngine::with_defaults(&registry);
        let mut state = engine.new_game().unwrap();

        engine.choose(&mut state, 5).unwrap();

        assert_eq!(state.current_scene, "vault");
        assert!(state.has_flag("has_key"));
        assert_eq!(engine.current_scene(&state).unwrap().id, "vault");
    }

    #[test]
    fn test_current_scene_reports_unmet_requirements() {
        let registry = registry();
        let engine = TraversalEngine::with_defaults(&registry);
        let mut state = engine.new_game().unwrap();
        state.move_to(1, "vault");

        assert!(matches!(
            engine.current_scene(&state),
            Err(StoryError::RequirementNotMet { ref scene, .. }) if scene == "vault"
        ));
        assert!(matches!(
            engine.choose(&mut state, 0),
            Err(StoryError::RequirementNotMet { .. })
        ));

        state.set_flag("has_key", true);
        assert!(engine.is_accessible(1, "vault", &state).unwrap());
        assert_eq!(engine.current_scene(&state).unwrap().id, "vault");
    }

    #[test]
    fn test_requirements_can_be_disabled() {
        let registry = registry();
        let config = EngineConfig {
            enforce_requirements: false,
            ..EngineConfig::default()
        };
        let engine = TraversalEngine::new(&registry, config);
        let mut state = engine.new_game().unwrap();

        assert_eq!(
            engine.choose(&mut state, 2).unwrap(),
            Step::Moved {
                arc: 1,
                scene: "vault".to_string()
            }
        );
        assert!(engine.current_scene(&state).is_ok());
    }

    #[test]
    fn test_combat_suspends_traversal() {
        let registry = registry();
        let engine = TraversalEngine::with_defaults(&registry);
        let mut state = engine.new_game().unwrap();

        let Step::Combat(request) = engine.choose(&mut state, 1).unwrap() else {
            panic!("expected a combat request");
        };

        // Experience is applied before the enemy is built: level 3 -> max(3 + 4, 11).
        assert_eq!(state.level(), 3);
        assert_eq!(request.enemy.tag, "warden");
        assert_eq!(request.enemy.level, 11);
        assert_eq!(request.allies, vec!["yuji"]);
        assert_eq!(state.current_scene, "start");
        assert!(state.is_suspended());
        assert!(matches!(engine.choose(&mut state, 0), Err(StoryError::CombatPending)));
        assert_eq!(engine.pending_request(&state).unwrap(), request);
    }

    #[test]
    fn test_combat_outcomes_resume_at_next_scene() {
        let registry = registry();
        let engine = TraversalEngine::with_defaults(&registry);

        for outcome in [CombatOutcome::Victory, CombatOutcome::Defeat, CombatOutcome::Fled] {
            let mut state = engine.new_game().unwrap();
            engine.choose(&mut state, 1).unwrap();

            let step = engine.resolve_combat(&mut state, outcome).unwrap();

            assert_eq!(
                step,
                Step::Moved {
                    arc: 1,
                    scene: "hall".to_string()
                }
            );
            assert!(!state.is_suspended());
            assert_eq!(
                state.flag(LAST_COMBAT_OUTCOME_FLAG),
                Some(&outcome.as_str().into())
            );
        }
    }

    #[test]
    fn test_defeat_policies() {
        let registry = registry();

        let retry = TraversalEngine::new(
            &registry,
            EngineConfig {
                combat_loss: CombatLossPolicy::RetryScene,
                ..EngineConfig::default()
            },
        );
        let mut state = retry.new_game().unwrap();
        retry.choose(&mut state, 1).unwrap();
        retry.resolve_combat(&mut state, CombatOutcome::Defeat).unwrap();
        assert_eq!(state.current_scene, "start");
        assert!(!state.is_suspended());

        let fatal = TraversalEngine::new(
            &registry,
            EngineConfig {
                combat_loss: CombatLossPolicy::GameOver,
                ..EngineConfig::default()
            },
        );
        let mut state = fatal.new_game().unwrap();
        fatal.choose(&mut state, 1).unwrap();
        assert_eq!(
            fatal.resolve_combat(&mut state, CombatOutcome::Defeat).unwrap(),
            Step::GameOver
        );
        assert!(state.game_over);
    }

    #[test]
    fn test_resolve_without_pending_combat() {
        let registry = registry();
        let engine = TraversalEngine::with_defaults(&registry);
        let mut state = engine.new_game().unwrap();

        assert!(matches!(
            engine.resolve_combat(&mut state, CombatOutcome::Victory),
            Err(StoryError::NoCombatPending)
        ));
    }

    #[test]
    fn test_settle_combat_with_resolver() {
        let registry = registry();
        let engine = TraversalEngine::with_defaults(&registry);
        let mut state = engine.new_game().unwrap();
        engine.choose(&mut state, 1).unwrap();

        let mut seen = Vec::new();
        let mut resolver = |request: &CombatRequest| {
            seen.push(request.enemy.name.clone());
            CombatOutcome::Victory
        };
        let step = engine.settle_combat(&mut state, &mut resolver).unwrap();

        assert_eq!(seen, vec!["Warden"]);
        assert!(matches!(step, Step::Moved { ref scene, .. } if scene == "hall"));
    }
}
