use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        parser::core::parse_source,
    },
};

impl Interpreter {
    /// Executes an `include` statement.
    ///
    /// The source loader resolves the path to source text, which is then
    /// lexed, parsed, and evaluated in the current environment, so
    /// declarations in the included file become visible to the rest of the
    /// program. Includes nest; a path that is already being loaded fails
    /// with a cycle error instead of recursing forever.
    ///
    /// Every failure inside the included file, whether a parse error or a
    /// runtime error, is wrapped and reported at the `include` site.
    ///
    /// # Parameters
    /// - `path`: The path string from the statement.
    /// - `line`: Line of the `include` statement.
    ///
    /// # Errors
    /// `IncludeError` for unloadable files, cycles, and wrapped inner
    /// failures.
    pub(crate) fn exec_include(&mut self, path: &str, line: usize) -> EvalResult<()> {
        if self.including.iter().any(|loading| loading == path) {
            return Err(RuntimeError::IncludeCycle { path: path.to_string(),
                                                    line });
        }

        let source =
            self.loader
                .load(path)
                .map_err(|_| RuntimeError::IncludeFailed { path: path.to_string(),
                                                           line })?;

        let statements = match parse_source(&source) {
            Ok(statements) => statements,
            Err(error) => {
                return Err(RuntimeError::IncludedFile { message: error.to_string(),
                                                        line });
            },
        };

        self.including.push(path.to_string());
        let outcome = self.run(&statements);
        self.including.pop();

        outcome.map_err(|error| RuntimeError::IncludedFile { message: error.to_string(),
                                                             line })
    }
}
