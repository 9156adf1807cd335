//! `press` and `eval` handlers

use deskcalc::core::numfmt::format_number;
use deskcalc::core::{Evaluator, ExpressionEvaluator};
use deskcalc::widget::CalculatorWidget;

use crate::config::DeskConfig;
use crate::error::CliResult;
use crate::{EvalArgs, PressArgs};

/// Presses the keys on a fresh widget and renders the outcome
pub fn execute_press(desk: &DeskConfig, args: &PressArgs) -> CliResult<String> {
    let mut widget = CalculatorWidget::with_evaluator(Evaluator::with_config(desk.operators));
    let state = widget.press_keys(&args.keys.join(" "))?;
    tracing::info!(display = state.display(), "pressed {} key group(s)", args.keys.len());

    if args.json {
        Ok(serde_json::to_string_pretty(state)?)
    } else {
        Ok(state.display().to_string())
    }
}

/// Evaluates the expression with the configured operator profile
pub fn execute_eval(desk: &DeskConfig, args: &EvalArgs) -> CliResult<String> {
    let expression = args.expression.join(" ");
    let mut evaluator = Evaluator::with_config(desk.operators);
    let value = evaluator.evaluate_expression(&expression)?;
    Ok(format_number(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use deskcalc::core::CalcError;

    fn press(keys: &[&str], json: bool) -> CliResult<String> {
        let args = PressArgs {
            keys: keys.iter().map(ToString::to_string).collect(),
            json,
        };
        execute_press(&DeskConfig::default(), &args)
    }

    fn eval(expr: &str) -> CliResult<String> {
        let args = EvalArgs {
            expression: vec![expr.to_string()],
        };
        execute_eval(&DeskConfig::default(), &args)
    }

    #[test]
    fn test_press_display() {
        assert_eq!(press(&["12", "+", "3", "="], false).unwrap(), "15");
        assert_eq!(press(&["9", "√"], false).unwrap(), "3");
        assert_eq!(press(&["1", "/", "0", "="], false).unwrap(), "Error");
    }

    #[test]
    fn test_press_json() {
        let out = press(&["7", "*"], true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["display"], "7");
        assert_eq!(value["expression"], "7 *");
    }

    #[test]
    fn test_press_unknown_key() {
        let err = press(&["7", "banana"], false).unwrap_err();
        assert!(matches!(err, CliError::Calc(CalcError::UnknownKey(_))));
    }

    #[test]
    fn test_press_respects_operator_profile() {
        let mut desk = DeskConfig::default();
        desk.operators.divide = false;
        let args = PressArgs {
            keys: vec!["8 / 2 =".to_string()],
            json: false,
        };
        assert_eq!(execute_press(&desk, &args).unwrap(), "Error");
    }

    #[test]
    fn test_eval() {
        assert_eq!(eval("5 + 3 * 2").unwrap(), "11");
        assert_eq!(eval("2 ^ 10").unwrap(), "1024");
        assert_eq!(eval("1 / 4").unwrap(), "0.25");
    }

    #[test]
    fn test_eval_joins_words() {
        let args = EvalArgs {
            expression: vec!["-2".to_string(), "*".to_string(), "3".to_string()],
        };
        assert_eq!(execute_eval(&DeskConfig::default(), &args).unwrap(), "-6");
    }

    #[test]
    fn test_eval_errors() {
        assert!(matches!(
            eval("1 / 0").unwrap_err(),
            CliError::Calc(CalcError::DivisionByZero)
        ));
        assert!(eval("").is_err());
    }
}
