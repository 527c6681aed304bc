//! Arc 3: the goodwill exchange with Kyoto.

use academy_rules::{EnemyRoster, EnemyTemplate, SpecialGradeRule};

use crate::arc::{Arc, ArcBuilder};
use crate::error::StoryError;
use crate::scene::{Consequence, Scene};

pub fn build() -> Result<Arc, StoryError> {
    let roster = EnemyRoster::new(SpecialGradeRule::new(6, 15))
        .with_enemy(
            "kyoto_student",
            EnemyTemplate::ordinary("Kyoto Student", 110, 70).with_behavior("duelist"),
        )
        .with_enemy(
            "hanami",
            EnemyTemplate::special_grade("Hanami", 520, 260)
                .with_abilities(["cursed_buds", "flower_field", "wooden_armor"])
                .with_behavior("attrition")
                .with_phases(3),
        );

    ArcBuilder::new(3, "Goodwill Exchange")
        .enemies(roster)
        .starting_scene("exchange_briefing")
        .achievement("best_friend")
        .achievement("exchange_veteran")
        .scene(
            Scene::new("exchange_briefing", "Team Briefing")
                .at("Kyoto Jujutsu High, forest edge")
                .with_text(
                    "Maki unrolls a map of the forest. \"Kyoto wants Yuji dead. We don't let \
                     that happen.\"",
                )
                .with_choice(
                    "Stick close to Maki",
                    Consequence::new()
                        .with_relationship("maki", 10)
                        .to_scene("forest_clash"),
                )
                .with_choice(
                    "Go find the big guy everyone's worried about",
                    Consequence::new()
                        .with_trait("courage", 1)
                        .to_scene("training_grounds"),
                ),
        )?
        .scene(
            Scene::new("training_grounds", "Who's Your Type?")
                .at("Kyoto Jujutsu High, training grounds")
                .with_text(
                    "Aoi Todo cracks his knuckles. \"Tell me. What kind of person is your \
                     type?\"",
                )
                .with_choice(
                    "Answer honestly and spar with Todo",
                    Consequence::new()
                        .with_relationship("todo", 15)
                        .with_flag("trained_with_todo", true)
                        .with_achievement("best_friend")
                        .to_scene("forest_clash"),
                )
                .with_choice(
                    "Refuse to answer",
                    Consequence::new()
                        .with_relationship("todo", -10)
                        .with_combat("kyoto_student", &[])
                        .to_scene("forest_clash"),
                ),
        )?
        .scene(
            Scene::new("forest_clash", "Clash in the Trees")
                .at("Kyoto Jujutsu High, forest")
                .with_text("Branches snap overhead as Kyoto's second-years close in.")
                .with_choice(
                    "Fight beside Maki",
                    Consequence::new()
                        .with_relationship("maki", 10)
                        .with_combat("kyoto_student", &["maki"])
                        .to_scene("exchange_interrupted"),
                )
                .with_choice(
                    "Regroup with the first-years",
                    Consequence::new()
                        .with_relationship("yuji", 5)
                        .with_relationship("megumi", 5)
                        .with_relationship("nobara", 5)
                        .to_scene("exchange_interrupted"),
                ),
        )?
        .scene(
            Scene::new("exchange_interrupted", "A Curtain Falls")
                .at("Kyoto Jujutsu High, forest")
                .with_text(
                    "A black curtain drops over the forest. A curse with flowers for eyes \
                     walks out of the dark.",
                )
                .with_choice(
                    "Hold Hanami off until the teachers arrive",
                    Consequence::new()
                        .with_flag("kyoto_exchange_complete", true)
                        .with_experience(200)
                        .with_achievement("exchange_veteran")
                        .with_combat("hanami", &["todo", "yuji"])
                        .to_arc(4),
                )
                .with_choice(
                    "Escort the injured out of the curtain",
                    Consequence::new()
                        .with_trait("compassion", 2)
                        .with_flag("kyoto_exchange_complete", true)
                        .with_experience(200)
                        .with_achievement("exchange_veteran")
                        .to_arc(4),
                ),
        )?
        .build()
}
