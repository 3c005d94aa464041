//! Subway route server.
//!
//! A web application that answers: "what is the shortest way between
//! these two stations, and what does it cost me?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod favorites;
pub mod network;
pub mod planner;
pub mod web;
