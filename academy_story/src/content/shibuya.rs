//! Arc 4: Shibuya. Placeholder until the arc is written.

use academy_rules::{EnemyRoster, EnemyTemplate, SpecialGradeRule};

use crate::arc::{Arc, ArcBuilder};
use crate::error::StoryError;
use crate::scene::{Consequence, Scene};

pub fn build() -> Result<Arc, StoryError> {
    let roster = EnemyRoster::new(SpecialGradeRule::new(8, 20)).with_enemy(
        "mahito",
        EnemyTemplate::special_grade("Mahito", 650, 400)
            .with_abilities(["idle_transfiguration", "self_embodiment_of_perfection"])
            .with_behavior("sadistic")
            .with_phases(3),
    );

    ArcBuilder::new(4, "Shibuya")
        .enemies(roster)
        .starting_scene("shibuya_placeholder")
        .scene(
            Scene::new("shibuya_placeholder", "Halloween Night")
                .at("Shibuya Station")
                .with_text("The station is sealed behind a curtain. To be continued.")
                .with_choice("End the session here", Consequence::new().ending()),
        )?
        .build()
}
