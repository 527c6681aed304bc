//! Arc definitions and the registry that owns them.

mod registry;

pub use registry::*;

use academy_rules::{Enemy, EnemyRoster, ScalingConfig};
use std::collections::HashMap;

use crate::error::StoryError;
use crate::scene::Scene;

/// A numbered segment of the story with its own scene set.
///
/// Built once through [`ArcBuilder`] and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Arc {
    pub number: u32,
    pub name: String,
    scenes: HashMap<String, Scene>,
    starting_scene: String,
    achievements: Vec<String>,
    enemies: EnemyRoster,
}

impl Arc {
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(id)
    }

    pub fn contains_scene(&self, id: &str) -> bool {
        self.scenes.contains_key(id)
    }

    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.values()
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Entry scene for a session arriving in this arc.
    pub fn starting_scene(&self) -> &str {
        &self.starting_scene
    }

    /// Achievements that can be earned in this arc.
    pub fn achievements(&self) -> &[String] {
        &self.achievements
    }

    /// Create an enemy using this arc's roster, falling back to the default tier.
    pub fn create_enemy(&self, tag: &str, player_level: u32, config: &ScalingConfig) -> Enemy {
        self.enemies.create_enemy(tag, player_level, config)
    }
}

/// Single-shot builder for an [`Arc`].
#[derive(Debug)]
pub struct ArcBuilder {
    number: u32,
    name: String,
    scenes: HashMap<String, Scene>,
    starting_scene: Option<String>,
    achievements: Vec<String>,
    enemies: EnemyRoster,
}

impl ArcBuilder {
    pub fn new(number: u32, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            scenes: HashMap::new(),
            starting_scene: None,
            achievements: Vec::new(),
            enemies: EnemyRoster::default(),
        }
    }

    /// Add a scene. Scene ids must be unique within the arc.
    pub fn scene(mut self, scene: Scene) -> Result<Self, StoryError> {
        if self.scenes.contains_key(&scene.id) {
            return Err(StoryError::DuplicateScene {
                arc: self.number,
                scene: scene.id,
            });
        }
        self.scenes.insert(scene.id.clone(), scene);
        Ok(self)
    }

    /// Set the entry scene. Defaults to "start".
    pub fn starting_scene(mut self, id: impl Into<String>) -> Self {
        self.starting_scene = Some(id.into());
        self
    }

    pub fn achievement(mut self, id: impl Into<String>) -> Self {
        self.achievements.push(id.into());
        self
    }

    pub fn enemies(mut self, roster: EnemyRoster) -> Self {
        self.enemies = roster;
        self
    }

    /// Finish the arc. Fails if the starting scene was never added.
    pub fn build(self) -> Result<Arc, StoryError> {
        let starting_scene = self.starting_scene.unwrap_or_else(|| "start".to_string());
        if !self.scenes.contains_key(&starting_scene) {
            return Err(StoryError::SceneNotFound {
                arc: self.number,
                scene: starting_scene,
            });
        }

        Ok(Arc {
            number: self.number,
            name: self.name,
            scenes: self.scenes,
            starting_scene,
            achievements: self.achievements,
            enemies: self.enemies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Consequence;

    fn scene(id: &str) -> Scene {
        Scene::new(id, id).with_choice("End", Consequence::new().ending())
    }

    #[test]
    fn test_build_arc() {
        let arc = ArcBuilder::new(1, "Test")
            .scene(scene("start"))
            .unwrap()
            .scene(scene("second"))
            .unwrap()
            .achievement("tested")
            .build()
            .unwrap();

        assert_eq!(arc.number, 1);
        assert_eq!(arc.starting_scene(), "start");
        assert_eq!(arc.scene_count(), 2);
        assert!(arc.contains_scene("second"));
        assert_eq!(arc.achievements(), ["tested".to_string()]);
    }

    #[test]
    fn test_duplicate_scene_rejected() {
        let result = ArcBuilder::new(2, "Test")
            .scene(scene("start"))
            .and_then(|builder| builder.scene(scene("start")));

        assert!(matches!(
            result,
            Err(StoryError::DuplicateScene { arc: 2, scene }) if scene == "start"
        ));
    }

    #[test]
    fn test_missing_starting_scene_rejected() {
        let result = ArcBuilder::new(3, "Test")
            .scene(scene("start"))
            .unwrap()
            .starting_scene("elsewhere")
            .build();

        assert!(matches!(
            result,
            Err(StoryError::SceneNotFound { arc: 3, scene }) if scene == "elsewhere"
        ));
    }
}
