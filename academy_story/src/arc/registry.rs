//! The arc registry - the authoritative arc number -> arc mapping.

use std::collections::BTreeMap;
use tracing::{debug, info};

use super::Arc;
use crate::content;
use crate::error::StoryError;
use crate::scene::{Scene, Transition};

/// Builds one arc. Invoked exactly once, when the registry is built.
pub type ArcConstructor = fn() -> Result<Arc, StoryError>;

/// Read-only collection of every arc, validated at build time.
///
/// Building checks that arc numbers run 1..=N, that every choice resolves to
/// exactly one outcome, and that every scene it points at exists.
#[derive(Debug, Clone)]
pub struct ArcRegistry {
    arcs: BTreeMap<u32, Arc>,
}

impl ArcRegistry {
    /// Build the registry from the shipped content.
    pub fn new() -> Result<Self, StoryError> {
        Self::from_constructors(content::ARC_CONSTRUCTORS)
    }

    /// Build a registry from arc number -> constructor pairs.
    pub fn from_constructors(constructors: &[(u32, ArcConstructor)]) -> Result<Self, StoryError> {
        let mut arcs = BTreeMap::new();

        for (registered, construct) in constructors {
            if arcs.contains_key(registered) {
                return Err(StoryError::DuplicateArc(*registered));
            }
            let arc = construct()?;
            if arc.number != *registered {
                return Err(StoryError::ArcNumberMismatch {
                    registered: *registered,
                    built: arc.number,
                });
            }
            debug!(arc = arc.number, name = %arc.name, scenes = arc.scene_count(), "built arc");
            arcs.insert(arc.number, arc);
        }

        for (expected, found) in (1u32..).zip(arcs.keys()) {
            if expected != *found {
                return Err(StoryError::NonContiguousArcs {
                    expected,
                    found: *found,
                });
            }
        }

        let registry = Self { arcs };
        registry.validate()?;
        info!(arcs = registry.len(), "arc registry built");
        Ok(registry)
    }

    pub fn get_arc(&self, number: u32) -> Result<&Arc, StoryError> {
        self.arcs.get(&number).ok_or(StoryError::ArcNotFound(number))
    }

    /// Look up a scene. A missing arc and a missing scene are distinct errors.
    pub fn get_scene(&self, arc: u32, scene_id: &str) -> Result<&Scene, StoryError> {
        self.get_arc(arc)?
            .scene(scene_id)
            .ok_or_else(|| StoryError::SceneNotFound {
                arc,
                scene: scene_id.to_string(),
            })
    }

    pub fn get_starting_scene(&self, arc: u32) -> Result<&str, StoryError> {
        Ok(self.get_arc(arc)?.starting_scene())
    }

    pub fn arcs(&self) -> impl Iterator<Item = &Arc> {
        self.arcs.values()
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Resolve a transition taken from `current_arc` into the position it
    /// lands on, or `None` for game over. The target scene must exist.
    pub fn resolve_target(
        &self,
        current_arc: u32,
        transition: &Transition,
    ) -> Result<Option<(u32, String)>, StoryError> {
        let (arc, scene) = match transition {
            Transition::GameOver => return Ok(None),
            Transition::Scene(scene) => (current_arc, scene.as_str()),
            Transition::Arc {
                arc,
                scene: Some(scene),
            } => (*arc, scene.as_str()),
            Transition::Arc { arc, scene: None } => (*arc, self.get_starting_scene(*arc)?),
        };
        self.get_scene(arc, scene)?;
        Ok(Some((arc, scene.to_string())))
    }

    fn validate(&self) -> Result<(), StoryError> {
        for arc in self.arcs.values() {
            for scene in arc.scenes() {
                for (index, choice) in scene.choices.iter().enumerate() {
                    let transition =
                        choice
                            .consequence
                            .transition()
                            .map_err(|defect| StoryError::MalformedConsequence {
                                arc: arc.number,
                                scene: scene.id.clone(),
                                choice: index,
                                defect,
                            })?;
                    self.resolve_target(arc.number, &transition)?;
                }
            }
        }
        Ok(())
    }
}
