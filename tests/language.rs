use std::{
    cell::RefCell,
    collections::HashMap,
    io::{self, Cursor},
    rc::Rc,
};

use foxl::{
    interpreter::{
        evaluator::core::Interpreter,
        loader::{FsLoader, SourceLoader},
        value::Value,
    },
    run_source,
};
use walkdir::WalkDir;

/// An output sink that can be inspected after the interpreter is done with
/// it.
#[derive(Clone, Default)]
struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl io::Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedOutput {
    fn text(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("script output should be UTF-8")
    }
}

/// An in-memory source loader for include tests.
struct MapLoader(HashMap<String, String>);

impl SourceLoader for MapLoader {
    fn load(&self, path: &str) -> io::Result<String> {
        self.0
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
    }
}

fn interpreter_with_stdin(stdin: &str) -> (Interpreter, SharedOutput) {
    let output = SharedOutput::default();
    let interpreter = Interpreter::with_parts(Box::new(Cursor::new(stdin.as_bytes().to_vec())),
                                              Box::new(output.clone()),
                                              Box::new(FsLoader));
    (interpreter, output)
}

/// Runs a script and returns the interpreter for binding inspection.
fn run(src: &str) -> Interpreter {
    let (mut interpreter, _) = interpreter_with_stdin("");
    if let Err(e) = run_source(src, &mut interpreter) {
        panic!("Script failed: {e}\n{src}");
    }
    interpreter
}

/// Runs a script and returns everything it wrote.
fn run_output(src: &str) -> String {
    let (mut interpreter, output) = interpreter_with_stdin("");
    if let Err(e) = run_source(src, &mut interpreter) {
        panic!("Script failed: {e}\n{src}");
    }
    output.text()
}

/// Runs a script that must fail and returns the rendered error.
fn run_error(src: &str) -> String {
    let (mut interpreter, _) = interpreter_with_stdin("");
    match run_source(src, &mut interpreter) {
        Ok(()) => panic!("Script succeeded but was expected to fail:\n{src}"),
        Err(e) => e.to_string(),
    }
}

fn assert_var(interpreter: &Interpreter, name: &str, expected: Value) {
    assert_eq!(interpreter.get(name), Some(&expected), "binding '{name}'");
}

#[test]
fn hello_world() {
    assert_eq!(run_output(r#"write("Hello, world!");"#), "Hello, world!\n");
}

#[test]
fn integer_addition_prints_without_decimals() {
    assert_eq!(run_output("let x = 2; let y = 3; write(x + y);"), "5\n");
}

#[test]
fn arithmetic_keeps_integers_and_promotes_mixed() {
    let interpreter = run("let a = 7 * 9;\n\
                           let b = 8 - 5;\n\
                           let c = 10 / 2;\n\
                           let d = 1 / 2;\n\
                           let e = 7 % 3;\n\
                           let f = 2.5 + 1;");
    assert_var(&interpreter, "a", Value::Integer(63));
    assert_var(&interpreter, "b", Value::Integer(3));
    assert_var(&interpreter, "c", Value::Integer(5));
    assert_var(&interpreter, "d", Value::Float(0.5));
    assert_var(&interpreter, "e", Value::Integer(1));
    assert_var(&interpreter, "f", Value::Float(3.5));
}

#[test]
fn operator_precedence_layers() {
    let interpreter = run("let a = 2 + 3 * 4;\n\
                           let b = 2 * 3 ^ 2;\n\
                           let c = 1 + 1 << 2;\n\
                           let d = 2 < 3 && 3 < 2 || true;");
    assert_var(&interpreter, "a", Value::Integer(14));
    assert_var(&interpreter, "b", Value::Integer(18));
    assert_var(&interpreter, "c", Value::Integer(5));
    assert_var(&interpreter, "d", Value::Bool(true));
}

#[test]
fn recursive_function_factorial() {
    let src = "let n = 5;\n\
               function fact(k) {\n\
                   if (k <= 1) { return 1; }\n\
                   return k * fact(k - 1);\n\
               }\n\
               write(fact(n));";
    assert_eq!(run_output(src), "120\n");
}

#[test]
fn array_index_read_and_write() {
    let src = "let a = [1, 2, 3]; write(a[1]); a[1] = 20; write(a[1]);";
    assert_eq!(run_output(src), "2\n20\n");
}

#[test]
fn arrays_are_independent_after_first_write() {
    let src = "let a = [1, 2]; let b = a; a[0] = 9; write(a[0]); write(b[0]);";
    assert_eq!(run_output(src), "9\n1\n");
}

#[test]
fn const_reassignment_is_a_const_error() {
    let message = run_error("const c = 7; c = 8;");
    assert!(message.contains("ConstError"), "{message}");
    assert!(message.contains("line 1"), "{message}");
}

#[test]
fn while_loop_counts() {
    let src = "let i = 0; while (i < 3) { write(i); i = i + 1; }";
    assert_eq!(run_output(src), "0\n1\n2\n");
}

#[test]
fn for_loop_sums() {
    let src = "let sum = 0;\n\
               for (let i = 1; i <= 5; i++) { sum += i; }\n\
               write(sum);";
    assert_eq!(run_output(src), "15\n");
}

#[test]
fn foreach_iterates_arrays() {
    let src = "let total = 0;\n\
               for (x in [2, 3, 4]) { total += x; }\n\
               write(total);";
    assert_eq!(run_output(src), "9\n");
}

#[test]
fn foreach_over_non_array_is_a_type_error() {
    let message = run_error("for (x in 5) { write(x); }");
    assert!(message.contains("TypeError"), "{message}");
}

#[test]
fn if_else_chains() {
    let src = "let x = 7;\n\
               if (x < 5) { write(\"small\"); }\n\
               else if (x < 10) { write(\"medium\"); }\n\
               else { write(\"large\"); }";
    assert_eq!(run_output(src), "medium\n");
}

#[test]
fn unbraced_bodies_are_single_statements() {
    assert_eq!(run_output("if (true) write(1); else write(2);"), "1\n");
}

#[test]
fn non_boolean_condition_is_a_type_error() {
    let message = run_error("if (1) { write(1); }");
    assert!(message.contains("TypeError"), "{message}");
}

#[test]
fn short_circuit_skips_side_effects() {
    let interpreter = run("let i = 0;\n\
                           let j = 0;\n\
                           let a = false && i++ > 0;\n\
                           let b = true || j++ > 0;");
    assert_var(&interpreter, "i", Value::Integer(0));
    assert_var(&interpreter, "j", Value::Integer(0));
    assert_var(&interpreter, "a", Value::Bool(false));
    assert_var(&interpreter, "b", Value::Bool(true));
}

#[test]
fn ternary_evaluates_one_branch() {
    let interpreter = run("let i = 0;\n\
                           let j = 0;\n\
                           let r = 1 < 2 ? i++ : j++;");
    assert_var(&interpreter, "i", Value::Integer(1));
    assert_var(&interpreter, "j", Value::Integer(0));
    assert_var(&interpreter, "r", Value::Integer(0));
}

#[test]
fn elvis_shorthand_is_rejected() {
    let message = run_error("let x = true ?: 1;");
    assert!(message.contains("ParseError"), "{message}");
}

#[test]
fn nullish_coalescing() {
    let interpreter = run("let x;\n\
                           let y = x ?? 5;\n\
                           let z = 3 ?? 7;");
    assert_var(&interpreter, "x", Value::Null);
    assert_var(&interpreter, "y", Value::Integer(5));
    assert_var(&interpreter, "z", Value::Integer(3));
}

#[test]
fn compound_assignments() {
    let interpreter = run("let x = 2; x += 3;\n\
                           let y = 7; y -= 2;\n\
                           let z = 4; z *= 2;\n\
                           let w = 9; w /= 3;\n\
                           let m = 9; m %= 4;\n\
                           let p = 2; p ^= 10;\n\
                           let s = 1; s <<= 4;\n\
                           let t = 16; t >>= 2;");
    assert_var(&interpreter, "x", Value::Integer(5));
    assert_var(&interpreter, "y", Value::Integer(5));
    assert_var(&interpreter, "z", Value::Integer(8));
    assert_var(&interpreter, "w", Value::Integer(3));
    assert_var(&interpreter, "m", Value::Integer(1));
    assert_var(&interpreter, "p", Value::Integer(1024));
    assert_var(&interpreter, "s", Value::Integer(16));
    assert_var(&interpreter, "t", Value::Integer(4));
}

#[test]
fn logical_and_nullish_compound_assignments() {
    let interpreter = run("let a = 1; a &&= 2;\n\
                           let b = 0; b &&= 2;\n\
                           let c = 0; c ||= 3;\n\
                           let d; d ??= 4;\n\
                           let e = 9; e ??= 4;\n\
                           let f = 5; f ~= 0;");
    assert_var(&interpreter, "a", Value::Bool(true));
    assert_var(&interpreter, "b", Value::Bool(false));
    assert_var(&interpreter, "c", Value::Bool(true));
    assert_var(&interpreter, "d", Value::Integer(4));
    assert_var(&interpreter, "e", Value::Integer(9));
    assert_var(&interpreter, "f", Value::Integer(-6));
}

#[test]
fn coalescing_assignment_skips_rhs_when_bound() {
    // The counter must not move when ??= decides not to assign.
    let interpreter = run("let i = 0; let e = 9; e ??= i++; write(e);");
    assert_var(&interpreter, "i", Value::Integer(0));
    assert_var(&interpreter, "e", Value::Integer(9));
}

#[test]
fn increment_and_decrement_forms() {
    let interpreter = run("let i = 5;\n\
                           let a = i++;\n\
                           let b = ++i;\n\
                           let c = i--;\n\
                           let d = --i;");
    assert_var(&interpreter, "a", Value::Integer(5));
    assert_var(&interpreter, "b", Value::Integer(7));
    assert_var(&interpreter, "c", Value::Integer(7));
    assert_var(&interpreter, "d", Value::Integer(5));
    assert_var(&interpreter, "i", Value::Integer(5));
}

#[test]
fn bitwise_and_shift_operators() {
    let interpreter = run("let a = 5 ^^ 3;\n\
                           let b = 6 & 3;\n\
                           let c = 6 | 1;\n\
                           let d = 1 << 4;\n\
                           let e = -16 >> 2;\n\
                           let f = -1 >>> 63;\n\
                           let g = ~5;");
    assert_var(&interpreter, "a", Value::Integer(6));
    assert_var(&interpreter, "b", Value::Integer(2));
    assert_var(&interpreter, "c", Value::Integer(7));
    assert_var(&interpreter, "d", Value::Integer(16));
    assert_var(&interpreter, "e", Value::Integer(-4));
    assert_var(&interpreter, "f", Value::Integer(1));
    assert_var(&interpreter, "g", Value::Integer(-6));
}

#[test]
fn power_and_root() {
    let interpreter = run("let a = 2 ^ 10; let b = 27 ^/ 3; let c = 2 ^ 0 - 3;");
    assert_var(&interpreter, "a", Value::Integer(1024));
    assert_var(&interpreter, "c", Value::Integer(-2));

    let Some(Value::Float(root)) = interpreter.get("b") else {
        panic!("expected a float root");
    };
    assert!((root - 3.0).abs() < 1e-9, "27 ^/ 3 was {root}");
}

#[test]
fn root_with_zero_exponent_fails() {
    let message = run_error("let x = 8 ^/ 0;");
    assert!(message.contains("ArithError"), "{message}");
}

#[test]
fn string_concatenation_stringifies() {
    let interpreter = run("let a = \"count: \" + 3;\n\
                           let b = 1 + \"!\";\n\
                           let c = \"is \" + true;");
    assert_var(&interpreter, "a", Value::Str("count: 3".into()));
    assert_var(&interpreter, "b", Value::Str("1!".into()));
    assert_var(&interpreter, "c", Value::Str("is true".into()));
}

#[test]
fn string_escapes_resolve() {
    assert_eq!(run_output(r#"write("a\tb\\c\"d");"#), "a\tb\\c\"d\n");
    assert_eq!(run_output(r"write('it\'s');"), "it's\n");
}

#[test]
fn equality_spans_the_value_union() {
    let interpreter = run("let a = 3 == 3.0;\n\
                           let b = \"x\" == \"x\";\n\
                           let c = 1 == \"1\";\n\
                           let d = [1, 2] == [1, 2.0];\n\
                           let e = true != false;");
    assert_var(&interpreter, "a", Value::Bool(true));
    assert_var(&interpreter, "b", Value::Bool(true));
    assert_var(&interpreter, "c", Value::Bool(false));
    assert_var(&interpreter, "d", Value::Bool(true));
    assert_var(&interpreter, "e", Value::Bool(true));
}

#[test]
fn membership_operators() {
    let interpreter = run("let a = 2 in [1, 2, 3];\n\
                           let b = 5 in [1, 2, 3];\n\
                           let c = 5 not in [1, 2, 3];");
    assert_var(&interpreter, "a", Value::Bool(true));
    assert_var(&interpreter, "b", Value::Bool(false));
    assert_var(&interpreter, "c", Value::Bool(true));
}

#[test]
fn canonical_printer_forms() {
    assert_eq!(run_output("write([1, \"two\", true, [2, \"x\"]]);"),
               "[1, \"two\", true, [2, \"x\"]]\n");
    assert_eq!(run_output("let x; write(x);"), "null\n");
    assert_eq!(run_output("write(2.5); write(10); write(false);"),
               "2.5\n10\nfalse\n");
}

#[test]
fn functions_do_not_leak_mutations() {
    let src = "let x = 1;\n\
               function f(a) { x = 99; return a + x; }\n\
               write(f(5));\n\
               write(x);";
    assert_eq!(run_output(src), "104\n1\n");
}

#[test]
fn function_fallthrough_returns_null() {
    assert_eq!(run_output("function f() { let y = 1; } write(f());"), "null\n");
}

#[test]
fn function_redeclaration_replaces() {
    let src = "function f() { return 1; }\n\
               function f() { return 2; }\n\
               write(f());";
    assert_eq!(run_output(src), "2\n");
}

#[test]
fn return_at_top_level_ends_only_that_node() {
    assert_eq!(run_output("return; write(\"after\");"), "after\n");
}

#[test]
fn wrong_arity_is_an_arity_error() {
    let message = run_error("function f(x, y) { return x + y; } f(3);");
    assert!(message.contains("ArityError"), "{message}");
}

#[test]
fn unknown_names_are_name_errors() {
    assert!(run_error("let y = x + 1;").contains("NameError"));
    assert!(run_error("g(1);").contains("NameError"));
}

#[test]
fn redeclaration_is_a_redeclare_error() {
    let message = run_error("let x = 1; let x = 2;");
    assert!(message.contains("RedeclareError"), "{message}");
}

#[test]
fn redeclaration_inside_a_loop_body_fails_on_reentry() {
    // Blocks share the enclosing environment, so a `let` that runs twice
    // collides with itself.
    let message = run_error("let i = 0; while (i < 2) { let t = 1; i = i + 1; }");
    assert!(message.contains("RedeclareError"), "{message}");
}

#[test]
fn function_bodies_may_redeclare_per_call() {
    // Each call works on a fresh snapshot, so the body's `let` never
    // collides across calls.
    let src = "function f(n) { let local = n * 2; return local; }\n\
               write(f(1) + f(2));";
    assert_eq!(run_output(src), "6\n");
}

#[test]
fn out_of_bounds_indices_are_bounds_errors() {
    assert!(run_error("let a = [1, 2, 3]; write(a[3]);").contains("BoundsError"));
    assert!(run_error("let a = [1, 2, 3]; write(a[0 - 1]);").contains("BoundsError"));
}

#[test]
fn division_and_modulo_by_zero_fail() {
    assert!(run_error("let x = 1 / 0;").contains("ArithError"));
    assert!(run_error("let x = 1 % 0;").contains("ArithError"));
    assert!(run_error("let x = 1; x /= 0;").contains("ArithError"));
}

#[test]
fn parse_errors_carry_the_head_line() {
    let message = run_error("let x = 1");
    assert!(message.contains("ParseError"), "{message}");
    assert!(message.contains("line 1"), "{message}");
}

#[test]
fn lex_errors_name_the_problem() {
    assert!(run_error("let x = $;").contains("LexError"));
    assert!(run_error("write(\"open;").contains("Unterminated"));
    assert!(run_error("let x = 99999999999999999999;").contains("LexError"));
}

#[test]
fn classes_parse_but_do_not_execute() {
    let src = "class Point {\n\
                   public int x;\n\
                   private int y;\n\
                   public move(dx, dy) { return dx + dy; }\n\
               }";
    let message = run_error(src);
    assert!(message.contains("NotImplemented"), "{message}");
}

#[test]
fn read_parses_integers_and_keeps_strings() {
    let (mut interpreter, output) = interpreter_with_stdin("42\nhello\n");
    run_source("read(\"n: \") n; read() s;", &mut interpreter).unwrap();

    assert_eq!(interpreter.get("n"), Some(&Value::Integer(42)));
    assert_eq!(interpreter.get("s"), Some(&Value::Str("hello".into())));
    // The prompt prints without a trailing newline.
    assert_eq!(output.text(), "n: ");
}

#[test]
fn read_expression_form() {
    let (mut interpreter, _) = interpreter_with_stdin("7\n");
    run_source("let doubled = read(\"? \") * 2; write(doubled);", &mut interpreter).unwrap();
    assert_eq!(interpreter.get("doubled"), Some(&Value::Integer(14)));
}

#[test]
fn include_runs_in_the_current_environment() {
    let mut files = HashMap::new();
    files.insert("lib.foxl".to_string(),
                 "function square(x) { return x * x; } let shared = 10;".to_string());

    let output = SharedOutput::default();
    let mut interpreter = Interpreter::with_parts(Box::new(Cursor::new(Vec::new())),
                                                  Box::new(output.clone()),
                                                  Box::new(MapLoader(files)));

    run_source("include \"lib.foxl\"; write(square(shared));", &mut interpreter).unwrap();
    assert_eq!(output.text(), "100\n");
}

#[test]
fn include_accepts_a_dotted_target() {
    let mut files = HashMap::new();
    files.insert("geometry.foxl".to_string(),
                 "function area(w, h) { return w * h; }".to_string());

    let output = SharedOutput::default();
    let mut interpreter = Interpreter::with_parts(Box::new(Cursor::new(Vec::new())),
                                                  Box::new(output.clone()),
                                                  Box::new(MapLoader(files)));

    run_source("include geometry.area from \"geometry.foxl\"; write(area(3, 4));",
               &mut interpreter).unwrap();
    assert_eq!(output.text(), "12\n");
}

#[test]
fn missing_include_is_an_include_error() {
    let (mut interpreter, _) = interpreter_with_stdin("");
    let message = run_source("include \"no_such_file.foxl\";", &mut interpreter).unwrap_err()
                                                                               .to_string();
    assert!(message.contains("IncludeError"), "{message}");
}

#[test]
fn include_cycles_are_detected() {
    let mut files = HashMap::new();
    files.insert("a.foxl".to_string(), "include \"b.foxl\";".to_string());
    files.insert("b.foxl".to_string(), "include \"a.foxl\";".to_string());

    let mut interpreter = Interpreter::with_parts(Box::new(Cursor::new(Vec::new())),
                                                  Box::new(SharedOutput::default()),
                                                  Box::new(MapLoader(files)));

    let message = run_source("include \"a.foxl\";", &mut interpreter).unwrap_err()
                                                                     .to_string();
    assert!(message.contains("cycle"), "{message}");
}

#[test]
fn errors_inside_included_files_are_wrapped() {
    let mut files = HashMap::new();
    files.insert("broken.foxl".to_string(), "let x = 1 / 0;".to_string());

    let mut interpreter = Interpreter::with_parts(Box::new(Cursor::new(Vec::new())),
                                                  Box::new(SharedOutput::default()),
                                                  Box::new(MapLoader(files)));

    let message = run_source("include \"broken.foxl\";", &mut interpreter).unwrap_err()
                                                                          .to_string();
    assert!(message.contains("Error in included file"), "{message}");
    assert!(message.contains("ArithError"), "{message}");
}

#[test]
fn utf8_identifiers_lex_verbatim() {
    assert_eq!(run_output("let größe = 3; write(größe);"), "3\n");
}

#[test]
fn comments_and_crlf_are_tolerated() {
    let src = "let x = 1; // trailing comment\r\nwrite(x); // another\n";
    assert_eq!(run_output(src), "1\n");
}

#[test]
fn runtime_errors_report_the_failing_line() {
    let message = run_error("let a = 1;\nlet b = 2;\nlet c = a / 0;");
    assert!(message.contains("line 3"), "{message}");
}

#[test]
fn example_scripts_run_clean() {
    let mut count = 0;

    for entry in WalkDir::new("tests/scripts").into_iter()
                                              .filter_map(Result::ok)
                                              .filter(|e| {
                                                  e.path()
                                                   .extension()
                                                   .is_some_and(|ext| ext == "foxl")
                                              })
    {
        let path = entry.path();
        let source = std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        let (mut interpreter, _) = interpreter_with_stdin("");
        if let Err(e) = run_source(&source, &mut interpreter) {
            panic!("Example script {path:?} failed:\n{e}");
        }
    }

    assert!(count > 0, "No example scripts found in tests/scripts");
}
