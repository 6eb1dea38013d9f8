//! Calculator module for building and evaluating expressions.
//!
//! This module provides functionality to:
//! - Turn button and key actions into an expression string
//! - Sanitize and evaluate expressions without executing code
//! - Apply degree-based scientific functions to the current operand
//! - Format results for display

mod display;
mod engine;
mod error;
mod evaluation;
mod events;
mod functions;
mod lexer;
mod parser;
mod sanitize;

pub use display::DisplaySnapshot;
pub use engine::{CalculatorEngine, Operator, Parenthesis};
pub use error::{CalcError, CalcResult, FaultKind};
pub use evaluation::{ERROR_TEXT, evaluate_expression, format_number};
pub use events::{EngineEvent, EventListener};
pub use functions::{Constant, ScientificFunction};
pub use sanitize::{current_operand, sanitize};
