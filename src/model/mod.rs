pub mod action;
pub mod ball;
pub mod block;
pub mod constants;
pub mod enums;
pub mod event;
pub mod game;
pub mod player;
pub mod position;
pub mod result;
pub mod skills;
pub mod team;
