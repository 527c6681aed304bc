//! Arc 1: the first mission and the invitation to Jujutsu High.

use academy_rules::{EnemyRoster, EnemyTemplate, SpecialGradeRule};

use crate::arc::{Arc, ArcBuilder};
use crate::error::StoryError;
use crate::scene::{Consequence, Scene};

pub fn build() -> Result<Arc, StoryError> {
    let roster = EnemyRoster::new(SpecialGradeRule::new(3, 10)).with_enemy(
        "roadside_curse",
        EnemyTemplate::ordinary("Roadside Curse", 40, 25).with_behavior("ambusher"),
    );

    ArcBuilder::new(1, "Orientation")
        .enemies(roster)
        .achievement("first_steps")
        .achievement("guardian_instinct")
        .scene(
            Scene::new("start", "An Ordinary Afternoon")
                .at("Sugisawa Third High, rooftop")
                .with_text(
                    "A scream cuts across the rooftop. A student lies bleeding beside a \
                     broken talisman, and something with too many eyes is crawling down \
                     the stairwell.",
                )
                .with_choice(
                    "Help the injured student immediately",
                    Consequence::new()
                        .with_trait("compassion", 2)
                        .with_relationship("yuji", 10)
                        .with_flag("helped_injured_student", true)
                        .to_scene("first_mission_compassionate"),
                )
                .with_choice(
                    "Chase the curse down the stairwell",
                    Consequence::new()
                        .with_trait("courage", 2)
                        .with_relationship("yuji", 5)
                        .to_scene("first_mission_aggressive"),
                )
                .with_choice(
                    "Call for a sorcerer and hold the door",
                    Consequence::new()
                        .with_trait("wisdom", 2)
                        .with_relationship("megumi", 10)
                        .with_flag("called_for_backup", true)
                        .to_scene("first_mission_cautious"),
                ),
        )?
        .scene(
            Scene::new("first_mission_compassionate", "Pressure on the Wound")
                .at("Sugisawa Third High, rooftop")
                .with_text(
                    "A boy with pink hair vaults the railing to kneel beside you. \"I'm \
                     Yuji. Keep pressing, I'll handle the ugly one.\"",
                )
                .with_choice(
                    "Guard the student while Yuji fights",
                    Consequence::new()
                        .with_relationship("yuji", 5)
                        .with_achievement("guardian_instinct")
                        .with_combat("weak_curse", &["yuji"])
                        .to_scene("school_gates"),
                )
                .with_choice(
                    "Leave the student with Yuji and scout the stairwell",
                    Consequence::new()
                        .with_trait("courage", 1)
                        .with_relationship("megumi", 5)
                        .to_scene("school_gates"),
                ),
        )?
        .scene(
            Scene::new("first_mission_aggressive", "Down the Stairwell")
                .at("Sugisawa Third High, stairwell")
                .with_text("The curse turns at the landing and shrieks.")
                .with_choice(
                    "Fight it head on",
                    Consequence::new()
                        .with_trait("determination", 1)
                        .with_combat("roadside_curse", &[])
                        .to_scene("school_gates"),
                ),
        )?
        .scene(
            Scene::new("first_mission_cautious", "Holding the Door")
                .at("Sugisawa Third High, rooftop door")
                .with_text(
                    "A first-year sorcerer in a dark uniform arrives within minutes, \
                     shikigami already loose on the stairs.",
                )
                .with_choice(
                    "Follow Megumi's lead",
                    Consequence::new()
                        .with_relationship("megumi", 5)
                        .to_scene("school_gates"),
                ),
        )?
        .scene(
            Scene::new("school_gates", "The Invitation")
                .at("Tokyo Jujutsu High, front gates")
                .with_text(
                    "A tall man in a blindfold grins at you. \"You've got a knack for \
                     this. Want to learn to do it properly?\"",
                )
                .with_choice(
                    "Accept the invitation to Jujutsu High",
                    Consequence::new()
                        .with_experience(100)
                        .with_flag("enrolled", true)
                        .with_achievement("first_steps")
                        .to_arc(2),
                )
                .with_choice(
                    "Walk away from the world of sorcerers",
                    Consequence::new().with_flag("enrolled", false).ending(),
                ),
        )?
        .build()
}
