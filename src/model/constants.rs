// Pitch squares are 0-based: x in 0..PITCH_WIDTH, y in 0..PITCH_HEIGHT.
// Home scores in the away end zone (x == PITCH_WIDTH - 1), away scores at x == 0.
pub const PITCH_WIDTH: i32 = 26;
pub const PITCH_HEIGHT: i32 = 15;

// Target numbers on a d6 are always clamped into this range.
pub const MIN_TARGET: i32 = 2;
pub const MAX_TARGET: i32 = 6;

// GFI (Go For It) target numbers on d6
pub const GFI_TARGET_NORMAL: u8 = 2; // 2+ on d6
pub const GFI_TARGET_BLIZZARD: u8 = 3; // 3+ on d6 in blizzard

// Maximum GFI attempts per activation
pub const MAX_GFI: u8 = 2;
pub const MAX_GFI_SPRINT: u8 = 3;

pub const STAND_UP_COST: u8 = 3;
pub const LEAP_COST: u8 = 2;

// Pro, Loner, Thick Skull and Regeneration all succeed on 4+
pub const SKILL_CHECK_TARGET: u8 = 4;

pub const MAX_PASS_RANGE: u32 = 13;
pub const MAX_BOUNCE_DEPTH: u8 = 5;
pub const MAX_CHAIN_PUSH_DEPTH: u8 = 22;

pub const DISTURBING_PRESENCE_RANGE: u32 = 3;

// Injury bands on the (modified) 2d6 injury roll
pub const STUNNED_MAX: i32 = 7;
pub const KNOCKED_OUT_MAX: i32 = 9;

// Claw breaks armour on this roll regardless of AV
pub const CLAW_ARMOUR_BREAK: i32 = 8;

pub const MULTIPLE_BLOCK_STRENGTH_BONUS: u8 = 2;

/// Scatter offsets indexed by `d8 - 1`, clockwise from north.
pub const SCATTER_OFFSETS: [(i32, i32); 8] = [
    (0, -1),  // 1: N
    (1, -1),  // 2: NE
    (1, 0),   // 3: E
    (1, 1),   // 4: SE
    (0, 1),   // 5: S
    (-1, 1),  // 6: SW
    (-1, 0),  // 7: W
    (-1, -1), // 8: NW
];
