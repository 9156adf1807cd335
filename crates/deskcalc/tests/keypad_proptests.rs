//! Property-based tests for the keypad layout and key parsing

use deskcalc::core::Calculator;
use deskcalc::keypad::Keypad;
use deskcalc::widget::CalculatorWidget;
use proptest::prelude::*;

fn button_index() -> impl Strategy<Value = usize> {
    0..Keypad::new().button_count()
}

proptest! {
    /// Every button is found again by its position, id and label
    #[test]
    fn prop_button_lookups_agree(index in button_index()) {
        let keypad = Keypad::new();
        let btn = keypad.get_button(index).unwrap();

        prop_assert_eq!(keypad.get_button_at(btn.row, btn.col), Some(btn));
        prop_assert_eq!(keypad.find_by_id(&btn.id), Some(btn));
        prop_assert_eq!(keypad.find_by_label(btn.label), Some(btn));
        prop_assert_eq!(keypad.handle_click(&btn.id), Some(btn.input));
        prop_assert_eq!(keypad.position_of(btn.input), Some(index));
    }

    /// Positions outside the grid hold no button
    #[test]
    fn prop_out_of_grid_is_empty(row in 0usize..20, col in 0usize..20) {
        let keypad = Keypad::new();
        let (rows, cols) = keypad.dimensions();
        prop_assume!(row >= rows || col >= cols);
        prop_assert!(keypad.get_button_at(row, col).is_none());
    }

    /// Typing labels separated by spaces presses the same keys as clicking
    #[test]
    fn prop_labels_match_clicks(indices in prop::collection::vec(button_index(), 0..25)) {
        let keypad = Keypad::new();
        let buttons: Vec<_> = indices.iter().filter_map(|&i| keypad.get_button(i)).collect();

        let text = buttons.iter().map(|b| b.label).collect::<Vec<_>>().join(" ");
        let mut typed = CalculatorWidget::new();
        typed.press_keys(&text).unwrap();

        let mut clicked = CalculatorWidget::new();
        for btn in &buttons {
            clicked.click(&btn.id);
        }

        prop_assert_eq!(typed.display(), clicked.display());
        prop_assert_eq!(typed.state().expression(), clicked.state().expression());
    }

    /// Number tokens expand to one digit or point press per character
    #[test]
    fn prop_number_tokens(number in "[0-9]{1,6}(\\.[0-9]{1,4})?") {
        let inputs = Keypad::new().parse_sequence(&number).unwrap();
        prop_assert_eq!(inputs.len(), number.chars().count());

        let mut calc = Calculator::new();
        calc.press_all(inputs);
        let expected = number.trim_start_matches('0');
        let expected = if expected.is_empty() || expected.starts_with('.') {
            format!("0{expected}")
        } else {
            expected.to_string()
        };
        prop_assert_eq!(calc.display(), expected);
    }

    /// Anything with a letter outside the alias set is rejected
    #[test]
    fn prop_unknown_tokens_rejected(word in "[g-l]{3,8}") {
        prop_assert!(Keypad::new().parse_sequence(&word).is_err());
    }
}
