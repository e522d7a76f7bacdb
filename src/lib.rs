//! Server Gacha - reward draws and area rules for a modded Minecraft server
//!
//! This library holds the pure logic behind the server's gameplay scripts.
//! Event wiring, entity mutation, and chat live in the host; handlers call
//! into these modules and act on what they return.

pub mod gacha;
pub mod simulator;
pub mod zones;
