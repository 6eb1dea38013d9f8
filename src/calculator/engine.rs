//! The calculator state machine.
//!
//! [`CalculatorEngine`] turns discrete user actions into an expression
//! string, re-evaluates it live while digits arrive, and commits a result
//! on `=`. One engine backs one calculator widget; nothing is global.

use tracing::{debug, trace, warn};

use super::display::DisplaySnapshot;
use super::error::{CalcError, CalcResult, FaultKind};
use super::evaluation::{ERROR_TEXT, ensure_finite, evaluate_expression, format_number};
use super::events::{EngineEvent, EventListener};
use super::functions::{Constant, ScientificFunction};
use super::sanitize::{current_operand, parse_float_prefix};

/// A binary operator the user can insert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl Operator {
    /// The symbol written into the expression.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Modulo => '%',
        }
    }

    /// Accepts ASCII symbols and the display glyphs `× ÷ −`.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '*' | '×' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            '%' => Some(Self::Modulo),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parenthesis {
    Open,
    Close,
}

/// Calculator state and the actions that mutate it.
pub struct CalculatorEngine {
    expression: String,
    result: String,
    memory: f64,
    /// The next digit or constant replaces the expression.
    is_new_entry: bool,
    /// An operator was just appended and may be substituted.
    awaiting_operand: bool,
    /// Unmatched `(` in `expression`.
    open_paren_count: usize,
    listener: Option<EventListener>,
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CalculatorEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculatorEngine")
            .field("expression", &self.expression)
            .field("result", &self.result)
            .field("memory", &self.memory)
            .field("is_new_entry", &self.is_new_entry)
            .field("awaiting_operand", &self.awaiting_operand)
            .field("open_paren_count", &self.open_paren_count)
            .finish_non_exhaustive()
    }
}

impl CalculatorEngine {
    pub fn new() -> Self {
        Self {
            expression: "0".to_string(),
            result: "0".to_string(),
            memory: 0.0,
            is_new_entry: true,
            awaiting_operand: false,
            open_paren_count: 0,
            listener: None,
        }
    }

    /// Set callback for error/success/memory notifications.
    pub fn set_listener(&mut self, listener: impl Fn(&EngineEvent) + Send + Sync + 'static) {
        self.listener = Some(std::sync::Arc::new(listener));
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// Drives the memory indicator.
    pub fn has_memory(&self) -> bool {
        self.memory != 0.0
    }

    pub fn is_new_entry(&self) -> bool {
        self.is_new_entry
    }

    pub fn is_awaiting_operand(&self) -> bool {
        self.awaiting_operand
    }

    pub fn open_paren_count(&self) -> usize {
        self.open_paren_count
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            expression: self.expression.clone(),
            result: self.result.clone(),
            memory_active: self.has_memory(),
        }
    }

    fn emit(&self, event: EngineEvent) {
        if let Some(listener) = &self.listener {
            listener(&event);
        }
    }

    /// Replace the whole expression, keeping the paren counter in sync.
    fn set_expression(&mut self, text: String) {
        self.expression = text;
        self.open_paren_count = unmatched_open_parens(&self.expression);
    }

    /// Append text the way a digit or constant is entered.
    fn enter_text(&mut self, text: &str) {
        if self.is_new_entry {
            self.set_expression(text.to_string());
            self.is_new_entry = false;
        } else if self.expression == "0" {
            self.set_expression(text.to_string());
        } else {
            self.expression.push_str(text);
        }
    }

    pub fn input_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            trace!(?digit, "ignoring non-digit input");
            return;
        }
        self.enter_text(digit.encode_utf8(&mut [0; 4]));
        self.awaiting_operand = false;
        self.preview_evaluate();
    }

    /// Append a decimal point, at most one per expression.
    pub fn input_decimal_point(&mut self) {
        if self.is_new_entry {
            self.set_expression("0.".to_string());
            self.is_new_entry = false;
        } else if !self.expression.contains('.') {
            self.expression.push('.');
        }
        self.awaiting_operand = false;
    }

    /// Append ` op `, or substitute the operator just appended.
    pub fn input_operator(&mut self, op: Operator) {
        let token = format!(" {} ", op.symbol());

        if self.awaiting_operand && ends_with_operator_token(&self.expression) {
            let keep = self.expression.len() - 3;
            self.expression.truncate(keep);
            self.expression.push_str(&token);
            debug!(operator = %op.symbol(), "substituted operator");
        } else {
            self.expression.push_str(&token);
            self.awaiting_operand = true;
        }
    }

    /// Apply `function` to the current operand and replace the expression
    /// with the result.
    pub fn apply_function(&mut self, function: ScientificFunction) -> CalcResult<()> {
        let operand = current_operand(&self.expression);

        match function.apply(operand).and_then(ensure_finite) {
            Ok(value) => {
                debug!(function = function.name(), operand, value, "applied function");
                self.set_expression(format_number(value));
                self.is_new_entry = true;
                self.awaiting_operand = false;
                self.preview_evaluate();
                Ok(())
            }
            Err(err) => {
                warn!(function = function.name(), operand, error = %err, "function failed");
                self.result = ERROR_TEXT.to_string();
                let message = match err.kind() {
                    FaultKind::Domain => "Function error",
                    _ => "Invalid input for function",
                };
                self.emit(EngineEvent::error(message));
                Err(err)
            }
        }
    }

    pub fn append_constant(&mut self, constant: Constant) {
        self.enter_text(&format_number(constant.value()));
        self.preview_evaluate();
    }

    /// Insert `(` or `)`, whichever fits: open when nothing is open yet or
    /// the expression ends with `(`, close otherwise.
    pub fn toggle_parentheses(&mut self) {
        if self.open_paren_count == 0 || self.expression.ends_with('(') {
            self.input_parenthesis(Parenthesis::Open);
        } else {
            self.input_parenthesis(Parenthesis::Close);
        }
    }

    /// `(` is always inserted; `)` only while some `(` is unmatched.
    ///
    /// A `(` typed over the bare `"0"` replaces it.
    pub fn input_parenthesis(&mut self, paren: Parenthesis) {
        match paren {
            Parenthesis::Open => {
                if self.expression == "0" {
                    self.set_expression("(".to_string());
                    self.is_new_entry = false;
                } else {
                    self.expression.push('(');
                    self.open_paren_count += 1;
                }
            }
            Parenthesis::Close if self.open_paren_count > 0 => {
                self.expression.push(')');
                self.open_paren_count -= 1;
            }
            Parenthesis::Close => {
                trace!("no open parenthesis to close");
            }
        }
    }

    /// The `=` action.
    ///
    /// Unmatched parentheses are closed first. On success the result
    /// becomes the new expression; on failure the expression is left for
    /// correction and the result shows `"Error"`.
    pub fn evaluate(&mut self) -> CalcResult<()> {
        if self.open_paren_count > 0 {
            debug!(count = self.open_paren_count, "closing open parentheses");
            let closing = ")".repeat(self.open_paren_count);
            self.expression.push_str(&closing);
            self.open_paren_count = 0;
        }

        match evaluate_expression(&self.expression) {
            Ok(value) => {
                let formatted = format_number(value);
                debug!(expression = %self.expression, result = %formatted, "evaluated");
                self.result = formatted.clone();
                self.set_expression(formatted);
                self.is_new_entry = true;
                self.awaiting_operand = false;
                self.emit(EngineEvent::success(""));
                Ok(())
            }
            Err(err) => {
                warn!(expression = %self.expression, error = %err, "evaluation failed");
                self.result = ERROR_TEXT.to_string();
                let message = match err {
                    CalcError::NonFiniteResult(_) => "Invalid calculation",
                    _ => "Calculation error",
                };
                self.emit(EngineEvent::error(message));
                Err(err)
            }
        }
    }

    /// Live evaluation after digit, constant or function input.
    ///
    /// Only `result` changes. Mid-entry expressions are often incomplete,
    /// so failures just show `"Error"`.
    pub fn preview_evaluate(&mut self) {
        self.result = match evaluate_expression(&self.expression) {
            Ok(value) => format_number(value),
            Err(err) => {
                trace!(expression = %self.expression, error = %err, "preview failed");
                ERROR_TEXT.to_string()
            }
        };
    }

    /// Reset everything except memory.
    pub fn clear_all(&mut self) {
        self.set_expression("0".to_string());
        self.result = "0".to_string();
        self.is_new_entry = true;
        self.awaiting_operand = false;
    }

    /// Reset the expression only.
    pub fn clear_entry(&mut self) {
        self.set_expression("0".to_string());
        self.is_new_entry = true;
        self.awaiting_operand = false;
    }

    pub fn backspace(&mut self) {
        if self.expression.chars().count() <= 1 {
            self.set_expression("0".to_string());
            self.is_new_entry = true;
        } else {
            self.expression.pop();
            self.open_paren_count = unmatched_open_parens(&self.expression);
        }
        self.awaiting_operand = ends_with_operator_token(&self.expression);
        self.preview_evaluate();
    }

    pub fn memory_clear(&mut self) {
        self.memory = 0.0;
        self.emit(EngineEvent::MemoryChanged { active: false });
        self.emit(EngineEvent::success("Memory cleared"));
    }

    /// Load memory as a new entry. Does nothing while memory is exactly zero.
    pub fn memory_recall(&mut self) {
        if !self.has_memory() {
            trace!("memory is empty, nothing to recall");
            return;
        }
        self.set_expression(format_number(self.memory));
        self.is_new_entry = true;
        self.awaiting_operand = false;
        self.preview_evaluate();
    }

    pub fn memory_add(&mut self) {
        self.memory += self.result_value();
        self.emit(EngineEvent::MemoryChanged {
            active: self.has_memory(),
        });
        self.emit(EngineEvent::success("Added to memory"));
    }

    pub fn memory_subtract(&mut self) {
        self.memory -= self.result_value();
        self.emit(EngineEvent::MemoryChanged {
            active: self.has_memory(),
        });
        self.emit(EngineEvent::success("Subtracted from memory"));
    }

    /// The displayed result as a number; `0` when it is not one.
    fn result_value(&self) -> f64 {
        parse_float_prefix(&self.result).unwrap_or(0.0)
    }
}

/// Whether `text` ends with an operator token as written by
/// [`CalculatorEngine::input_operator`].
fn ends_with_operator_token(text: &str) -> bool {
    let bytes = text.as_bytes();
    match bytes {
        [.., b' ', op, b' '] => Operator::from_symbol(*op as char).is_some(),
        _ => false,
    }
}

fn unmatched_open_parens(text: &str) -> usize {
    text.chars().fold(0usize, |open, ch| match ch {
        '(' => open + 1,
        ')' => open.saturating_sub(1),
        _ => open,
    })
}
