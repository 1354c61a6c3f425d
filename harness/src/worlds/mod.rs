//! World implementations for the harness runner.

pub mod ball_rooms;
pub mod blocks_world;
pub mod courier_route;
