//! Property-based tests for targets, ball physics and action discovery.

mod common;

use proptest::prelude::*;

use crate::common::StateBuilder;
use dicebowl_core::actions::core::registry::ActionRegistry;
use dicebowl_core::actions::validation::validate_action;
use dicebowl_core::config::EngineConfig;
use dicebowl_core::dice::ScriptedDice;
use dicebowl_core::error::EngineError;
use dicebowl_core::model::action::Action;
use dicebowl_core::model::enums::{ActionType, PassDistance, PlayerCondition, Skill, TeamSide, WeatherType};
use dicebowl_core::model::event::EventKind;
use dicebowl_core::model::game::GameState;
use dicebowl_core::model::player::Player;
use dicebowl_core::model::position::Square;
use dicebowl_core::model::skills::SkillSet;
use dicebowl_core::rules::ball::resolve_bounce;
use dicebowl_core::rules::context::ResolutionContext;
use dicebowl_core::rules::tacklezones::{
    catch_target, dodge_target, interception_target, landing_target, leap_target, pass_target, pickup_target,
    SourceThreats,
};

const MODIFIER_SKILLS: [Skill; 14] = [
    Skill::Accurate,
    Skill::BigHand,
    Skill::BreakTackle,
    Skill::Dodge,
    Skill::ExtraArms,
    Skill::NervesOfSteel,
    Skill::Stunty,
    Skill::Titchy,
    Skill::TwoHeads,
    Skill::VeryLongLegs,
    Skill::StrongArm,
    Skill::Block,
    Skill::Tackle,
    Skill::Wrestle,
];

const WEATHER: [WeatherType; 5] = [
    WeatherType::Nice,
    WeatherType::Blizzard,
    WeatherType::PouringRain,
    WeatherType::SwelteringHeat,
    WeatherType::VerySunny,
];

fn skill_set() -> impl Strategy<Value = SkillSet> {
    proptest::collection::vec(0..MODIFIER_SKILLS.len(), 0..6)
        .prop_map(|indices| indices.into_iter().map(|i| MODIFIER_SKILLS[i]).collect())
}

/// Up to five players a side on distinct squares of the middle of the pitch.
fn scattered_game() -> impl Strategy<Value = (GameState, Option<usize>)> {
    let squares = proptest::collection::btree_set((2..24i32, 1..14i32), 2..10);
    (squares, proptest::collection::vec(any::<bool>(), 10), any::<Option<usize>>()).prop_map(
        |(squares, prone, carrier)| {
            let mut builder = StateBuilder::new();
            for (index, (x, y)) in squares.iter().enumerate() {
                let side = if index % 2 == 0 { TeamSide::Home } else { TeamSide::Away };
                let id = format!("p{index}");
                builder = builder.player(&id, side, *x, *y, &[]);
                if prone[index] {
                    builder = builder.edit(&id, |player| player.state.condition = PlayerCondition::Prone);
                }
            }
            let count = squares.len();
            let carrier = carrier.map(|c| c % count);
            if let Some(index) = carrier {
                let id = format!("p{index}");
                builder = builder.edit(&id, |player| player.state.condition = PlayerCondition::Standing);
                builder = builder.carrier(&id);
            }
            (builder.build(), carrier)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// No modifier stack pushes a target outside 2..=6.
    #[test]
    fn prop_targets_stay_in_range(
        agility in 0u8..12,
        strength in 0u8..12,
        skills in skill_set(),
        tacklezones in 0u32..9,
        presence in 0u32..9,
        tails in 0u32..3,
        tackle in any::<bool>(),
        diving in any::<bool>(),
        modifier in -2i32..3,
        distance in 1u32..20,
        weather in 0..WEATHER.len(),
    ) {
        let weather = WEATHER[weather];
        let threats = SourceThreats { tackle, prehensile_tails: tails, diving_tackle: diving };
        let targets = [
            dodge_target(agility, strength, &skills, tacklezones, threats),
            pickup_target(agility, &skills, tacklezones, weather),
            catch_target(agility, &skills, modifier, tacklezones, presence, weather),
            pass_target(agility, &skills, PassDistance::from_distance(distance), tacklezones, presence, weather),
            interception_target(agility, &skills, tacklezones),
            leap_target(agility, &skills, tacklezones),
            landing_target(agility, tacklezones),
        ];
        for target in targets {
            prop_assert!((2..=6).contains(&target), "target {}", target);
        }
    }

    /// A ball dropped into a crowd of players who all fail to hold it still comes to rest
    /// within the bounce cap.
    #[test]
    fn prop_bounce_terminates(
        rolls in proptest::collection::vec(1u8..=6, 40),
        standing in proptest::collection::vec(any::<bool>(), 9),
        max_bounce_depth in 0u8..6,
    ) {
        let mut state = GameState::default();
        state.home.rerolls = 0;
        state.away.rerolls = 0;
        for (index, (dx, dy)) in (-1..=1).flat_map(|dx| (-1..=1).map(move |dy| (dx, dy))).enumerate() {
            let mut player = Player {
                player_id: format!("crowd{index}"),
                side: TeamSide::Away,
                position: Some(Square::new(12 + dx, 7 + dy)),
                ..Default::default()
            };
            if !standing[index] {
                player.state.condition = PlayerCondition::Prone;
            }
            state.add_player(player);
        }

        let config = EngineConfig { max_bounce_depth, ..Default::default() };
        let mut dice = ScriptedDice::new(rolls);
        let mut ctx = ResolutionContext::new(state, &mut dice, &config);
        prop_assert!(resolve_bounce(&mut ctx, Square::new(12, 7), 0).is_ok());

        let bounces = ctx.events.iter().filter(|event| event.kind == EventKind::Bounce).count();
        prop_assert!(bounces <= max_bounce_depth as usize + 1);
        prop_assert!(ctx.game_state.ball.position().is_some_and(|square| square.is_on_pitch()));
        prop_assert!(ctx.game_state.check_invariants().is_ok());
    }

    /// Discovery is a pure function of the state, and every action it offers is legal.
    #[test]
    fn prop_available_actions_idempotent((state, _) in scattered_game()) {
        let registry = ActionRegistry::new();
        let actions = registry.available_actions(&state);
        prop_assert_eq!(&actions, &registry.available_actions(&state));
        for action in &actions {
            prop_assert!(validate_action(&state, action, registry.config()).is_ok());
        }
    }

    /// Whatever the dice say, a resolved action leaves the ball with its carrier.
    #[test]
    fn prop_ball_follows_carrier(
        (state, _) in scattered_game(),
        pick in any::<prop::sample::Index>(),
        rolls in proptest::collection::vec(1u8..=6, 60),
    ) {
        let registry = ActionRegistry::new();
        let actions: Vec<Action> = registry
            .available_actions(&state)
            .into_iter()
            .filter(|action| action.action_type() != ActionType::EndTurn)
            .collect();
        prop_assume!(!actions.is_empty());
        let action = pick.get(&actions);

        let mut dice = ScriptedDice::new(rolls);
        match registry.resolve(&state, action, &mut dice) {
            Ok(result) => prop_assert!(result.state.check_invariants().is_ok()),
            Err(EngineError::DiceExhausted { .. }) => {}
            Err(error) => prop_assert!(false, "{:?} failed: {}", action, error),
        }
    }
}
