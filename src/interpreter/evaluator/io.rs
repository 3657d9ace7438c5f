use std::io::{BufRead, Write};

use crate::interpreter::{
    evaluator::core::{EvalResult, Interpreter},
    value::Value,
};

impl Interpreter {
    /// Prints a value followed by a newline to the output handle.
    ///
    /// Uses the canonical printer: strings print raw, arrays print
    /// bracketed with quoted string elements, null prints `null`. Output
    /// failures are ignored, matching console semantics.
    pub(crate) fn write_line(&mut self, value: &Value) {
        let _ = writeln!(self.out, "{value}");
    }

    /// Reads one line of input, after printing an optional prompt.
    ///
    /// The prompt is printed without a trailing newline and the output
    /// handle is flushed so it appears before the program blocks on input.
    /// The terminating newline (and a carriage return before it) is
    /// stripped from the line. If the whole line parses as an integer the
    /// result is `Integer`, otherwise the raw line is kept as a string.
    /// End of input yields the empty string.
    ///
    /// # Parameters
    /// - `prompt`: Optional prompt value.
    #[allow(clippy::unnecessary_wraps)]
    pub(crate) fn read_value(&mut self, prompt: Option<&Value>) -> EvalResult<Value> {
        if let Some(prompt) = prompt {
            let _ = write!(self.out, "{prompt}");
            let _ = self.out.flush();
        }

        let mut input = String::new();
        let _ = self.input.read_line(&mut input);

        if input.ends_with('\n') {
            input.pop();
            if input.ends_with('\r') {
                input.pop();
            }
        }

        Ok(match input.parse::<i64>() {
               Ok(number) => Value::Integer(number),
               Err(_) => Value::Str(input),
           })
    }
}
