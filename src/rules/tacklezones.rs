use crate::model::constants::{
    DISTURBING_PRESENCE_RANGE, GFI_TARGET_BLIZZARD, GFI_TARGET_NORMAL, MAX_TARGET, MIN_TARGET,
};
use crate::model::enums::{PassDistance, Skill, TeamSide, WeatherType};
use crate::model::game::GameState;
use crate::model::player::Player;
use crate::model::position::Square;
use crate::model::skills::SkillSet;

/// Clamps a raw target into `[2, 6]`: a natural 1 always fails and a 6 always succeeds.
pub fn clamp_target(raw: i32) -> u8 {
    raw.clamp(MIN_TARGET, MAX_TARGET) as u8
}

/// What the enemies around the square a player leaves do to a dodge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SourceThreats {
    pub tackle: bool,
    pub prehensile_tails: u32,
    pub diving_tackle: bool,
}

pub fn dodge_target(
    agility: u8,
    strength: u8,
    skills: &SkillSet,
    tacklezones: u32,
    threats: SourceThreats,
) -> u8 {
    let mut stat = agility;
    if skills.has(Skill::BreakTackle) {
        stat = stat.max(strength);
    }
    let mut target = 7 - stat as i32 + tacklezones as i32;

    if skills.has(Skill::Dodge) && !threats.tackle {
        target -= 1;
    }
    for skill in [Skill::Stunty, Skill::Titchy, Skill::TwoHeads] {
        if skills.has(skill) {
            target -= 1;
        }
    }
    target += threats.prehensile_tails as i32;
    if threats.diving_tackle {
        target += 2;
    }
    clamp_target(target)
}

pub fn pickup_target(agility: u8, skills: &SkillSet, tacklezones: u32, weather: WeatherType) -> u8 {
    let mut target = 7 - agility as i32 - 1;
    if !skills.has(Skill::BigHand) {
        target += tacklezones as i32;
        if weather == WeatherType::PouringRain {
            target += 1;
        }
    }
    if skills.has(Skill::ExtraArms) {
        target -= 1;
    }
    clamp_target(target)
}

/// `modifier` is +1 for accurate passes and hand-offs, 0 for bounces and scatters.
pub fn catch_target(
    agility: u8,
    skills: &SkillSet,
    modifier: i32,
    tacklezones: u32,
    disturbing_presence: u32,
    weather: WeatherType,
) -> u8 {
    let mut target = 7 - agility as i32 - modifier;
    if !skills.has(Skill::NervesOfSteel) {
        target += tacklezones as i32;
    }
    target += disturbing_presence as i32;
    if skills.has(Skill::ExtraArms) {
        target -= 1;
    }
    if skills.has(Skill::DivingCatch) {
        target -= 1;
    }
    if weather == WeatherType::PouringRain {
        target += 1;
    }
    clamp_target(target)
}

pub fn effective_pass_distance(distance: u32, skills: &SkillSet) -> PassDistance {
    let band = PassDistance::from_distance(distance);
    if skills.has(Skill::StrongArm) {
        band.shorter()
    } else {
        band
    }
}

pub fn pass_target(
    agility: u8,
    skills: &SkillSet,
    distance: PassDistance,
    tacklezones: u32,
    disturbing_presence: u32,
    weather: WeatherType,
) -> u8 {
    let mut target = 7 - agility as i32 - distance.modifier();
    if skills.has(Skill::Accurate) {
        target -= 1;
    }
    if !skills.has(Skill::NervesOfSteel) {
        target += tacklezones as i32;
    }
    target += disturbing_presence as i32;
    if matches!(
        weather,
        WeatherType::PouringRain | WeatherType::Blizzard | WeatherType::VerySunny
    ) {
        target += 1;
    }
    clamp_target(target)
}

pub fn interception_target(agility: u8, skills: &SkillSet, tacklezones: u32) -> u8 {
    let mut target = 7 - agility as i32 + 2;
    if skills.has(Skill::VeryLongLegs) {
        target -= 1;
    }
    if skills.has(Skill::ExtraArms) {
        target -= 1;
    }
    if !skills.has(Skill::NervesOfSteel) {
        target += tacklezones as i32;
    }
    clamp_target(target)
}

pub fn leap_target(agility: u8, skills: &SkillSet, tacklezones: u32) -> u8 {
    let mut target = 7 - agility as i32 + tacklezones as i32;
    if skills.has(Skill::VeryLongLegs) {
        target -= 1;
    }
    clamp_target(target)
}

pub fn landing_target(agility: u8, tacklezones: u32) -> u8 {
    clamp_target(7 - agility as i32 + tacklezones as i32)
}

pub fn gfi_target(weather: WeatherType) -> u8 {
    if weather == WeatherType::Blizzard {
        GFI_TARGET_BLIZZARD
    } else {
        GFI_TARGET_NORMAL
    }
}

/// Enemy tacklezones on `square` for a player of `side`, ignoring `exclude`.
pub fn count_tacklezones(
    game_state: &GameState,
    square: &Square,
    side: TeamSide,
    exclude: Option<&str>,
) -> u32 {
    threatening(game_state, square, side)
        .filter(|enemy| Some(enemy.player_id.as_str()) != exclude)
        .count() as u32
}

fn threatening<'a>(
    game_state: &'a GameState,
    square: &'a Square,
    side: TeamSide,
) -> impl Iterator<Item = &'a Player> {
    game_state
        .players_of(side.opponent())
        .filter(|enemy| enemy.exerts_tacklezones())
        .filter(move |enemy| enemy.position.is_some_and(|p| p.is_adjacent(square)))
}

pub fn source_threats(game_state: &GameState, source: &Square, side: TeamSide) -> SourceThreats {
    let mut threats = SourceThreats::default();
    for enemy in threatening(game_state, source, side) {
        threats.tackle |= enemy.has_skill(Skill::Tackle);
        threats.diving_tackle |= enemy.has_skill(Skill::DivingTackle);
        if enemy.has_skill(Skill::PrehensileTail) {
            threats.prehensile_tails += 1;
        }
    }
    threats
}

pub fn count_disturbing_presence(game_state: &GameState, square: &Square, side: TeamSide) -> u32 {
    game_state
        .players_of(side.opponent())
        .filter(|enemy| enemy.has_skill(Skill::DisturbingPresence))
        .filter(|enemy| {
            enemy
                .position
                .is_some_and(|p| p.distance(square) <= DISTURBING_PRESENCE_RANGE)
        })
        .count() as u32
}

/// Players of `side` that can assist against the player on `target_square`: standing, with
/// tacklezones, not one of `excluded`, and either Guard or free of enemy tacklezones (the
/// player `tz_exclude` does not count towards those).
pub fn count_assists(
    game_state: &GameState,
    target_square: &Square,
    side: TeamSide,
    excluded: &[&str],
    tz_exclude: Option<&str>,
) -> u32 {
    game_state
        .adjacent_standing(target_square, side)
        .into_iter()
        .filter(|ally| !excluded.contains(&ally.player_id.as_str()))
        .filter(|ally| !ally.state.lost_tacklezones)
        .filter(|ally| {
            ally.has_skill(Skill::Guard)
                || ally.position.is_some_and(|square| {
                    count_tacklezones(game_state, &square, side, tz_exclude) == 0
                })
        })
        .count() as u32
}

pub fn dodge_target_for(game_state: &GameState, player: &Player, from: &Square, to: &Square) -> u8 {
    dodge_target(
        player.get_ag(),
        player.get_st(),
        &player.skills,
        count_tacklezones(game_state, to, player.side, Some(&player.player_id)),
        source_threats(game_state, from, player.side),
    )
}

pub fn leap_target_for(game_state: &GameState, player: &Player, to: &Square) -> u8 {
    leap_target(
        player.get_ag(),
        &player.skills,
        count_tacklezones(game_state, to, player.side, None),
    )
}

/// Zones at the player's own square; a player off the pitch is never threatened.
fn own_square_zones(game_state: &GameState, player: &Player) -> u32 {
    player
        .position
        .map(|square| count_tacklezones(game_state, &square, player.side, None))
        .unwrap_or(0)
}

fn own_square_presence(game_state: &GameState, player: &Player) -> u32 {
    player
        .position
        .map(|square| count_disturbing_presence(game_state, &square, player.side))
        .unwrap_or(0)
}

pub fn pickup_target_for(game_state: &GameState, player: &Player) -> u8 {
    pickup_target(
        player.get_ag(),
        &player.skills,
        own_square_zones(game_state, player),
        game_state.weather,
    )
}

pub fn catch_target_for(game_state: &GameState, player: &Player, modifier: i32) -> u8 {
    catch_target(
        player.get_ag(),
        &player.skills,
        modifier,
        own_square_zones(game_state, player),
        own_square_presence(game_state, player),
        game_state.weather,
    )
}

pub fn pass_target_for(game_state: &GameState, player: &Player, distance: u32) -> u8 {
    pass_target(
        player.get_ag(),
        &player.skills,
        effective_pass_distance(distance, &player.skills),
        own_square_zones(game_state, player),
        own_square_presence(game_state, player),
        game_state.weather,
    )
}

pub fn interception_target_for(game_state: &GameState, player: &Player) -> u8 {
    interception_target(
        player.get_ag(),
        &player.skills,
        own_square_zones(game_state, player),
    )
}

pub fn landing_target_for(game_state: &GameState, player: &Player, square: &Square) -> u8 {
    landing_target(
        player.get_ag(),
        count_tacklezones(game_state, square, player.side, None),
    )
}
