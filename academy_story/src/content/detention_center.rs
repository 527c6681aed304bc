//! Arc 2: the detention center and the finger bearer.

use academy_rules::{EnemyRoster, EnemyTemplate, SpecialGradeRule};

use crate::arc::{Arc, ArcBuilder};
use crate::error::StoryError;
use crate::scene::{Consequence, Scene};

pub fn build() -> Result<Arc, StoryError> {
    let roster = EnemyRoster::new(SpecialGradeRule::new(5, 12)).with_enemy(
        "finger_bearer",
        EnemyTemplate::special_grade("Finger Bearer", 400, 200)
            .with_abilities(["domain_expansion", "cursed_womb"])
            .with_behavior("relentless")
            .with_phases(2),
    );

    ArcBuilder::new(2, "Detention Center")
        .enemies(roster)
        .starting_scene("detention_center_entrance")
        .achievement("survivor")
        .scene(
            Scene::new("detention_center_entrance", "The Cursed Womb")
                .at("Eishuu Juvenile Detention Center")
                .with_text(
                    "The air is thick enough to chew. Yuji, Megumi and Nobara wait for \
                     you at the gate.",
                )
                .with_choice(
                    "Go in together",
                    Consequence::new()
                        .with_relationship("nobara", 5)
                        .with_relationship("megumi", 5)
                        .to_scene("womb_corridor"),
                )
                .with_choice(
                    "Take point and go in first",
                    Consequence::new()
                        .with_trait("courage", 2)
                        .with_relationship("nobara", 10)
                        .to_scene("womb_corridor"),
                ),
        )?
        .scene(
            Scene::new("womb_corridor", "The Corridor That Folds")
                .at("Eishuu Juvenile Detention Center, inner block")
                .with_text("The corridor bends back on itself. Something vast wakes up.")
                .with_choice(
                    "Stand with Yuji against the finger bearer",
                    Consequence::new()
                        .with_relationship("yuji", 10)
                        .with_combat("finger_bearer", &["yuji"])
                        .to_scene("aftermath"),
                )
                .with_choice(
                    "Cover Megumi and Nobara's retreat",
                    Consequence::new()
                        .with_relationship("megumi", 10)
                        .with_relationship("nobara", 10)
                        .with_combat("grade_2_curse", &["megumi", "nobara"])
                        .to_scene("aftermath"),
                ),
        )?
        .scene(
            Scene::new("aftermath", "What It Cost")
                .at("Eishuu Juvenile Detention Center, courtyard")
                .with_text("Rain washes the blood from the courtyard stones.")
                .with_choice(
                    "Sit with Megumi in silence",
                    Consequence::new()
                        .with_relationship("megumi", 10)
                        .with_flag("survived_detention_center", true)
                        .with_experience(150)
                        .with_achievement("survivor")
                        .to_arc(3),
                )
                .with_choice(
                    "Throw yourself into training",
                    Consequence::new()
                        .with_trait("determination", 3)
                        .with_flag("survived_detention_center", true)
                        .with_experience(150)
                        .with_achievement("survivor")
                        .to_arc_scene(3, "training_grounds"),
                ),
        )?
        .build()
}
