//! Read-only view of the calculator for rendering.

use serde::Serialize;

use super::evaluation::ERROR_TEXT;

/// What a front-end needs to draw the calculator.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DisplaySnapshot {
    /// The expression being built.
    pub expression: String,
    /// The last computed or previewed result, or `"Error"`.
    pub result: String,
    /// Whether memory holds a non-zero value.
    pub memory_active: bool,
}

impl DisplaySnapshot {
    /// Whether the result line currently shows the error sentinel.
    pub fn is_error(&self) -> bool {
        self.result == ERROR_TEXT
    }

    /// Render as two lines: expression, then result.
    pub fn render(&self, show_memory: bool) -> String {
        let marker = if show_memory && self.memory_active {
            "[M] "
        } else {
            ""
        };
        format!("{}{}\n= {}", marker, self.expression, self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(result: &str, memory_active: bool) -> DisplaySnapshot {
        DisplaySnapshot {
            expression: "1 + 2".to_string(),
            result: result.to_string(),
            memory_active,
        }
    }

    #[test]
    fn test_is_error() {
        assert!(snapshot("Error", false).is_error());
        assert!(!snapshot("3", false).is_error());
    }

    #[test]
    fn test_render() {
        assert_eq!(snapshot("3", false).render(true), "1 + 2\n= 3");
        assert_eq!(snapshot("3", true).render(true), "[M] 1 + 2\n= 3");
        assert_eq!(snapshot("3", true).render(false), "1 + 2\n= 3");
    }
}
