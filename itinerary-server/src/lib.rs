//! Tourist itinerary planner server.
//!
//! A web application that answers: "I have this many days, this budget and
//! these interests. What should I visit each day, and what will it cost?"

pub mod catalog;
pub mod config;
pub mod domain;
pub mod planner;
pub mod web;
