//! Mapping from keyboard keys and button names to calculator actions.

use crate::calculator::{
    CalcResult, CalculatorEngine, Constant, Operator, Parenthesis, ScientificFunction,
};

/// Keys a front-end should swallow instead of passing on.
const CALCULATOR_KEYS: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", ",", "+", "-", "*", "/", "=", "enter",
    "escape", "backspace", "s", "c", "t", "l", "(", ")",
];

/// A single user action on the calculator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Digit(char),
    DecimalPoint,
    Operator(Operator),
    Function(ScientificFunction),
    Constant(Constant),
    ToggleParentheses,
    Parenthesis(Parenthesis),
    Evaluate,
    ClearAll,
    ClearEntry,
    Backspace,
    MemoryClear,
    MemoryRecall,
    MemoryAdd,
    MemorySubtract,
}

impl Action {
    /// Map a keyboard key name (as a browser reports it) to an action.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.to_lowercase();
        let action = match key.as_str() {
            "." | "," => Self::DecimalPoint,
            "+" => Self::Operator(Operator::Add),
            "-" => Self::Operator(Operator::Subtract),
            "*" => Self::Operator(Operator::Multiply),
            "/" => Self::Operator(Operator::Divide),
            "enter" | "=" => Self::Evaluate,
            "escape" => Self::ClearAll,
            "backspace" => Self::Backspace,
            "s" => Self::Function(ScientificFunction::Sin),
            "c" => Self::Function(ScientificFunction::Cos),
            "t" => Self::Function(ScientificFunction::Tan),
            "l" => Self::Function(ScientificFunction::Log10),
            "(" => Self::Parenthesis(Parenthesis::Open),
            ")" => Self::Parenthesis(Parenthesis::Close),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) if ch.is_ascii_digit() => Self::Digit(ch),
                    _ => return None,
                }
            }
        };
        Some(action)
    }

    /// Map a calculator button's action name to an action.
    pub fn from_button(name: &str) -> Option<Self> {
        let action = match name {
            "ac" => Self::ClearAll,
            "c" => Self::ClearEntry,
            "backspace" => Self::Backspace,
            "add" => Self::Operator(Operator::Add),
            "subtract" => Self::Operator(Operator::Subtract),
            "multiply" => Self::Operator(Operator::Multiply),
            "divide" => Self::Operator(Operator::Divide),
            "mod" => Self::Operator(Operator::Modulo),
            "equals" => Self::Evaluate,
            "decimal" => Self::DecimalPoint,
            "parentheses" => Self::ToggleParentheses,
            "mc" => Self::MemoryClear,
            "mr" => Self::MemoryRecall,
            "m-plus" => Self::MemoryAdd,
            "m-minus" => Self::MemorySubtract,
            _ => {
                if let Some(constant) = Constant::from_name(name) {
                    Self::Constant(constant)
                } else if let Some(function) = ScientificFunction::from_name(name) {
                    Self::Function(function)
                } else {
                    return None;
                }
            }
        };
        Some(action)
    }
}

/// Whether `key` is one the calculator reacts to.
pub fn is_calculator_key(key: &str) -> bool {
    CALCULATOR_KEYS.contains(&key.to_lowercase().as_str())
}

impl CalculatorEngine {
    /// Route an action to the matching engine operation.
    ///
    /// Only `=` and function application can fail.
    pub fn dispatch(&mut self, action: Action) -> CalcResult<()> {
        match action {
            Action::Digit(digit) => self.input_digit(digit),
            Action::DecimalPoint => self.input_decimal_point(),
            Action::Operator(op) => self.input_operator(op),
            Action::Function(function) => return self.apply_function(function),
            Action::Constant(constant) => self.append_constant(constant),
            Action::ToggleParentheses => self.toggle_parentheses(),
            Action::Parenthesis(paren) => self.input_parenthesis(paren),
            Action::Evaluate => return self.evaluate(),
            Action::ClearAll => self.clear_all(),
            Action::ClearEntry => self.clear_entry(),
            Action::Backspace => self.backspace(),
            Action::MemoryClear => self.memory_clear(),
            Action::MemoryRecall => self.memory_recall(),
            Action::MemoryAdd => self.memory_add(),
            Action::MemorySubtract => self.memory_subtract(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(engine: &mut CalculatorEngine, keys: &[&str]) {
        for key in keys {
            if let Some(action) = Action::from_key(key) {
                let _ = engine.dispatch(action);
            }
        }
    }

    #[test]
    fn test_keys() {
        assert_eq!(Action::from_key("7"), Some(Action::Digit('7')));
        assert_eq!(Action::from_key(","), Some(Action::DecimalPoint));
        assert_eq!(Action::from_key("Enter"), Some(Action::Evaluate));
        assert_eq!(Action::from_key("Escape"), Some(Action::ClearAll));
        assert_eq!(
            Action::from_key("L"),
            Some(Action::Function(ScientificFunction::Log10))
        );
        assert_eq!(Action::from_key("x"), None);
        assert_eq!(Action::from_key("12"), None);
        assert_eq!(Action::from_key(""), None);
    }

    #[test]
    fn test_buttons() {
        assert_eq!(Action::from_button("ac"), Some(Action::ClearAll));
        assert_eq!(Action::from_button("c"), Some(Action::ClearEntry));
        assert_eq!(
            Action::from_button("mod"),
            Some(Action::Operator(Operator::Modulo))
        );
        assert_eq!(
            Action::from_button("power"),
            Some(Action::Function(ScientificFunction::Square))
        );
        assert_eq!(
            Action::from_button("pi"),
            Some(Action::Constant(Constant::Pi))
        );
        assert_eq!(
            Action::from_button("e"),
            Some(Action::Constant(Constant::E))
        );
        assert_eq!(Action::from_button("m-plus"), Some(Action::MemoryAdd));
        assert_eq!(Action::from_button("random"), None);
    }

    #[test]
    fn test_is_calculator_key() {
        assert!(is_calculator_key("Backspace"));
        assert!(is_calculator_key("5"));
        assert!(!is_calculator_key("Tab"));
    }

    #[test]
    fn test_keyboard_session() {
        let mut engine = CalculatorEngine::new();
        press(&mut engine, &["1", "2", "*", "(", "3", "-", "1", "Enter"]);
        assert_eq!(engine.expression(), "24");
        assert_eq!(engine.result(), "24");

        press(&mut engine, &["Escape", "9", "0", "s"]);
        assert_eq!(engine.expression(), "1");
    }

    #[test]
    fn test_dispatch_reports_faults() {
        let mut engine = CalculatorEngine::new();
        engine.dispatch(Action::Digit('4')).unwrap();
        engine.dispatch(Action::Operator(Operator::Divide)).unwrap();
        engine.dispatch(Action::Digit('0')).unwrap();
        assert!(engine.dispatch(Action::Evaluate).is_err());
        assert!(engine.dispatch(Action::Backspace).is_ok());
    }
}
