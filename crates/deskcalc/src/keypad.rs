//! Calculator keypad model
//!
//! The 7x4 button grid of the calculator widget. Each button knows its label,
//! element id, style class and the [`Input`] it produces. Frontends render
//! from this model; the CLI parses textual key sequences through it.
//!
//! ```text
//! [ MC ] [ MR ] [ M+ ] [ M- ]
//! [ C  ] [ ±  ] [ %  ] [ ÷  ]
//! [ 7  ] [ 8  ] [ 9  ] [ ×  ]
//! [ 4  ] [ 5  ] [ 6  ] [ -  ]
//! [ 1  ] [ 2  ] [ 3  ] [ +  ]
//! [ 0  ] [ .  ] [ ⌫  ] [ =  ]
//! [ √  ] [ x² ] [1/x ] [ π  ]
//! ```

use serde::Serialize;

use crate::core::{CalcError, CalcResult, Input, MemoryOp, Operator};

/// Visual class of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    /// Memory, sign, percentage, backspace and scientific keys
    Function,
    /// The clear key
    Clear,
    /// Digits and the decimal point
    Digit,
    /// Binary operators and equals
    Operator,
}

impl ButtonStyle {
    /// CSS-style class name
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Function => "keypad-function",
            Self::Clear => "keypad-clear",
            Self::Digit => "keypad-digit",
            Self::Operator => "keypad-operator",
        }
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeypadButton {
    /// The input this button produces
    pub input: Input,
    /// Text printed on the button
    pub label: &'static str,
    /// Element id, e.g. `btn-7`
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
    /// Visual class
    pub style: ButtonStyle,
}

impl KeypadButton {
    /// Creates a button for `input` at the given grid cell
    #[must_use]
    pub fn new(input: Input, row: usize, col: usize) -> Self {
        Self {
            input,
            label: label_for(input),
            id: id_for(input),
            row,
            col,
            style: style_for(input),
        }
    }
}

/// Label printed on the key producing `input`
#[must_use]
pub fn label_for(input: Input) -> &'static str {
    const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
    match input {
        Input::Digit(d) => DIGITS.get(usize::from(d)).copied().unwrap_or("?"),
        Input::Decimal => ".",
        Input::Operator(op) => op.label(),
        Input::Equals => "=",
        Input::Clear => "C",
        Input::ToggleSign => "±",
        Input::Percentage => "%",
        Input::SquareRoot => "√",
        Input::Square => "x²",
        Input::Reciprocal => "1/x",
        Input::Pi => "π",
        Input::Backspace => "⌫",
        Input::Memory(op) => op.label(),
    }
}

fn id_for(input: Input) -> String {
    let name = match input {
        Input::Digit(d) => return format!("btn-{d}"),
        Input::Decimal => "decimal",
        Input::Operator(Operator::Add) => "plus",
        Input::Operator(Operator::Subtract) => "minus",
        Input::Operator(Operator::Multiply) => "times",
        Input::Operator(Operator::Divide) => "divide",
        Input::Equals => "equals",
        Input::Clear => "clear",
        Input::ToggleSign => "sign",
        Input::Percentage => "percent",
        Input::SquareRoot => "sqrt",
        Input::Square => "square",
        Input::Reciprocal => "reciprocal",
        Input::Pi => "pi",
        Input::Backspace => "backspace",
        Input::Memory(MemoryOp::Clear) => "mc",
        Input::Memory(MemoryOp::Recall) => "mr",
        Input::Memory(MemoryOp::Add) => "m-plus",
        Input::Memory(MemoryOp::Subtract) => "m-minus",
    };
    format!("btn-{name}")
}

fn style_for(input: Input) -> ButtonStyle {
    match input {
        Input::Digit(_) | Input::Decimal => ButtonStyle::Digit,
        Input::Operator(_) | Input::Equals => ButtonStyle::Operator,
        Input::Clear => ButtonStyle::Clear,
        _ => ButtonStyle::Function,
    }
}

/// Keypad layout
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Buttons in row-major order
    buttons: Vec<KeypadButton>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard calculator keypad
    #[must_use]
    pub fn new() -> Self {
        let layout: [[Input; 4]; 7] = [
            [
                Input::Memory(MemoryOp::Clear),
                Input::Memory(MemoryOp::Recall),
                Input::Memory(MemoryOp::Add),
                Input::Memory(MemoryOp::Subtract),
            ],
            [
                Input::Clear,
                Input::ToggleSign,
                Input::Percentage,
                Input::Operator(Operator::Divide),
            ],
            [
                Input::Digit(7),
                Input::Digit(8),
                Input::Digit(9),
                Input::Operator(Operator::Multiply),
            ],
            [
                Input::Digit(4),
                Input::Digit(5),
                Input::Digit(6),
                Input::Operator(Operator::Subtract),
            ],
            [
                Input::Digit(1),
                Input::Digit(2),
                Input::Digit(3),
                Input::Operator(Operator::Add),
            ],
            [
                Input::Digit(0),
                Input::Decimal,
                Input::Backspace,
                Input::Equals,
            ],
            [
                Input::SquareRoot,
                Input::Square,
                Input::Reciprocal,
                Input::Pi,
            ],
        ];

        let buttons = layout
            .iter()
            .enumerate()
            .flat_map(|(row, keys)| {
                keys.iter()
                    .enumerate()
                    .map(move |(col, input)| KeypadButton::new(*input, row, col))
            })
            .collect();

        Self {
            buttons,
            cols: 4,
            rows: 7,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds a button by element id
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds a button by its printed label
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.label == label)
    }

    /// Index of the button producing `input`
    #[must_use]
    pub fn position_of(&self, input: Input) -> Option<usize> {
        self.buttons.iter().position(|b| b.input == input)
    }

    /// Processes a click on an element id and returns its input
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<Input> {
        self.find_by_id(element_id).map(|btn| btn.input)
    }

    /// Parses a whitespace-separated key sequence such as `"12 + 3 ="`
    ///
    /// Tokens are key labels, ASCII aliases (`*`, `/`, `sqrt`, `pi`, `bs`,
    /// `+/-`, ...) or runs of digits and `.` which expand to one press each.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::UnknownKey`] for the first token that matches
    /// no key.
    pub fn parse_sequence(&self, text: &str) -> CalcResult<Vec<Input>> {
        let mut inputs = Vec::new();
        for token in text.split_whitespace() {
            self.parse_token(token, &mut inputs)?;
        }
        Ok(inputs)
    }

    fn parse_token(&self, token: &str, out: &mut Vec<Input>) -> CalcResult<()> {
        if let Some(btn) = self.find_by_label(token) {
            out.push(btn.input);
            return Ok(());
        }
        if let Some(input) = alias(token) {
            out.push(input);
            return Ok(());
        }

        let is_number = token.chars().all(|c| c.is_ascii_digit() || c == '.');
        if !is_number {
            return Err(CalcError::UnknownKey(token.to_string()));
        }
        for ch in token.chars() {
            let input = match ch.to_digit(10) {
                Some(d) => Input::Digit(d as u8),
                None => Input::Decimal,
            };
            out.push(input);
        }
        Ok(())
    }
}

fn alias(token: &str) -> Option<Input> {
    let input = match token.to_ascii_lowercase().as_str() {
        "*" | "x" => Input::Operator(Operator::Multiply),
        "/" => Input::Operator(Operator::Divide),
        "c" | "clear" => Input::Clear,
        "+/-" | "neg" => Input::ToggleSign,
        "sqrt" => Input::SquareRoot,
        "sq" | "x^2" => Input::Square,
        "inv" => Input::Reciprocal,
        "pi" => Input::Pi,
        "bs" | "back" => Input::Backspace,
        "mc" => Input::Memory(MemoryOp::Clear),
        "mr" => Input::Memory(MemoryOp::Recall),
        "m+" => Input::Memory(MemoryOp::Add),
        "m-" => Input::Memory(MemoryOp::Subtract),
        _ => return None,
    };
    Some(input)
}
