// Author: Dustin Pilgrim
// License: MIT

pub mod action;
pub mod config;
pub mod error;
pub mod events;
pub mod info;
pub mod manager;
pub mod manager_msg;
pub mod state;
pub mod timer;

#[cfg(test)]
mod manager_tests;
