use serde::{Deserialize, Serialize};

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(&self) -> TeamSide {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

/// Physical condition of a player. Only `Standing`, `Prone` and `Stunned` players are on the
/// pitch; every other condition implies the player has no position.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerCondition {
    #[default]
    Standing,
    Prone,
    Stunned,
    KnockedOut,
    Injured,
    Ejected,
    Reserves,
}

impl PlayerCondition {
    pub fn is_on_pitch(&self) -> bool {
        matches!(
            self,
            PlayerCondition::Standing | PlayerCondition::Prone | PlayerCondition::Stunned
        )
    }

    pub fn is_standing(&self) -> bool {
        *self == PlayerCondition::Standing
    }

    pub fn is_down(&self) -> bool {
        matches!(self, PlayerCondition::Prone | PlayerCondition::Stunned)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Skill {
    Accurate,
    AlwaysHungry,
    BallAndChain,
    BigHand,
    Block,
    Bloodlust,
    Bombardier,
    BoneHead,
    BreakTackle,
    Catch,
    Chainsaw,
    Claw,
    Dauntless,
    Decay,
    DirtyPlayer,
    DisturbingPresence,
    DivingCatch,
    DivingTackle,
    Dodge,
    ExtraArms,
    Fend,
    FoulAppearance,
    Frenzy,
    Grab,
    Guard,
    HailMaryPass,
    Horns,
    HypnoticGaze,
    Juggernaut,
    JumpUp,
    Leap,
    Loner,
    MightyBlow,
    MultipleBlock,
    NervesOfSteel,
    NoHands,
    NurglesRot,
    Pass,
    PrehensileTail,
    Pro,
    ReallyStupid,
    Regeneration,
    RightStuff,
    SafeThrow,
    SecretWeapon,
    Shadowing,
    SideStep,
    SneakyGit,
    Sprint,
    Stab,
    Stakes,
    StandFirm,
    StripBall,
    StrongArm,
    Stunty,
    SureFeet,
    SureHands,
    Tackle,
    TakeRoot,
    Tentacles,
    ThickSkull,
    ThrowTeamMate,
    Titchy,
    TwoHeads,
    VeryLongLegs,
    WildAnimal,
    Wrestle,
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeatherType {
    Blizzard,
    #[default]
    Nice,
    PouringRain,
    SwelteringHeat,
    VerySunny,
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    CoinToss,
    Setup,
    Kickoff,
    #[default]
    Play,
    Touchdown,
    HalfTime,
    GameOver,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Move,
    StandUp,
    Block,
    Blitz,
    Pass,
    Handoff,
    Foul,
    ThrowTeamMate,
    BombThrow,
    HypnoticGaze,
    BallAndChain,
    MultipleBlock,
    EndTurn,
}

impl ActionType {
    pub fn requires_player(&self) -> bool {
        *self != ActionType::EndTurn
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockDiceFace {
    AttackerDown,
    BothDown,
    Pushed,
    DefenderStumbles,
    DefenderDown,
}

impl BlockDiceFace {
    /// Block die faces on a d6: 1 AD, 2 BD, 3-4 Pushed, 5 DS, 6 DD.
    pub fn from_d6(roll: u8) -> Self {
        match roll {
            1 => BlockDiceFace::AttackerDown,
            2 => BlockDiceFace::BothDown,
            3 | 4 => BlockDiceFace::Pushed,
            5 => BlockDiceFace::DefenderStumbles,
            _ => BlockDiceFace::DefenderDown,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Hash, PartialOrd, Ord)]
pub enum PassDistance {
    QuickPass,
    ShortPass,
    LongPass,
    LongBomb,
}

impl PassDistance {
    pub fn from_distance(distance: u32) -> Self {
        match distance {
            0..=3 => PassDistance::QuickPass,
            4..=6 => PassDistance::ShortPass,
            7..=10 => PassDistance::LongPass,
            _ => PassDistance::LongBomb,
        }
    }

    /// Strong Arm moves the pass one band closer.
    pub fn shorter(&self) -> Self {
        match self {
            PassDistance::QuickPass | PassDistance::ShortPass => PassDistance::QuickPass,
            PassDistance::LongPass => PassDistance::ShortPass,
            PassDistance::LongBomb => PassDistance::LongPass,
        }
    }

    pub fn modifier(&self) -> i32 {
        match self {
            PassDistance::QuickPass => 1,
            PassDistance::ShortPass => 0,
            PassDistance::LongPass => -1,
            PassDistance::LongBomb => -2,
        }
    }
}
