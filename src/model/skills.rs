use super::enums::Skill;
use serde::{Deserialize, Serialize};

/// Fixed-size set of skills backed by a bitmask. Serialized as a plain list of skill names.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Skill>", into = "Vec<Skill>")]
pub struct SkillSet {
    bits: u128,
}

impl SkillSet {
    pub fn new() -> Self {
        SkillSet { bits: 0 }
    }

    fn mask(skill: Skill) -> u128 {
        1u128 << (skill as u8)
    }

    pub fn has(&self, skill: Skill) -> bool {
        self.bits & Self::mask(skill) != 0
    }

    pub fn add(&mut self, skill: Skill) {
        self.bits |= Self::mask(skill);
    }

    pub fn remove(&mut self, skill: Skill) {
        self.bits &= !Self::mask(skill);
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Skill> + '_ {
        ALL_SKILLS.iter().copied().filter(|skill| self.has(*skill))
    }
}

impl From<Vec<Skill>> for SkillSet {
    fn from(skills: Vec<Skill>) -> Self {
        skills.into_iter().collect()
    }
}

impl From<SkillSet> for Vec<Skill> {
    fn from(set: SkillSet) -> Self {
        set.iter().collect()
    }
}

impl<const N: usize> From<[Skill; N]> for SkillSet {
    fn from(skills: [Skill; N]) -> Self {
        skills.into_iter().collect()
    }
}

impl FromIterator<Skill> for SkillSet {
    fn from_iter<I: IntoIterator<Item = Skill>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.add(skill);
        }
        set
    }
}

const ALL_SKILLS: [Skill; 67] = [
    Skill::Accurate,
    Skill::AlwaysHungry,
    Skill::BallAndChain,
    Skill::BigHand,
    Skill::Block,
    Skill::Bloodlust,
    Skill::Bombardier,
    Skill::BoneHead,
    Skill::BreakTackle,
    Skill::Catch,
    Skill::Chainsaw,
    Skill::Claw,
    Skill::Dauntless,
    Skill::Decay,
    Skill::DirtyPlayer,
    Skill::DisturbingPresence,
    Skill::DivingCatch,
    Skill::DivingTackle,
    Skill::Dodge,
    Skill::ExtraArms,
    Skill::Fend,
    Skill::FoulAppearance,
    Skill::Frenzy,
    Skill::Grab,
    Skill::Guard,
    Skill::HailMaryPass,
    Skill::Horns,
    Skill::HypnoticGaze,
    Skill::Juggernaut,
    Skill::JumpUp,
    Skill::Leap,
    Skill::Loner,
    Skill::MightyBlow,
    Skill::MultipleBlock,
    Skill::NervesOfSteel,
    Skill::NoHands,
    Skill::NurglesRot,
    Skill::Pass,
    Skill::PrehensileTail,
    Skill::Pro,
    Skill::ReallyStupid,
    Skill::Regeneration,
    Skill::RightStuff,
    Skill::SafeThrow,
    Skill::SecretWeapon,
    Skill::Shadowing,
    Skill::SideStep,
    Skill::SneakyGit,
    Skill::Sprint,
    Skill::Stab,
    Skill::Stakes,
    Skill::StandFirm,
    Skill::StripBall,
    Skill::StrongArm,
    Skill::Stunty,
    Skill::SureFeet,
    Skill::SureHands,
    Skill::Tackle,
    Skill::TakeRoot,
    Skill::Tentacles,
    Skill::ThickSkull,
    Skill::ThrowTeamMate,
    Skill::Titchy,
    Skill::TwoHeads,
    Skill::VeryLongLegs,
    Skill::WildAnimal,
    Skill::Wrestle,
];
