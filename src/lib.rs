//! Scientific calculator engine.
//!
//! [`calculator::CalculatorEngine`] owns the state of one calculator and is
//! driven by [`input::Action`]s coming from a front-end.

pub mod calculator;
pub mod config;
pub mod input;
