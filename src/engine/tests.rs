//! Integration tests.
//!
//! This module runs the (input, output) pairs from the src/tests folder as tests. Adding a test
//! case is just a matter of adding a query and the expected expression to one of the .sql files.
//!
//! Run with `cargo test -- --nocapture` to see every failure, not just the first one.
use crate::engine::tests::reader::{SqlTestFileReader, Test};
use crate::engine::{render, Format};
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;


/// Scans the entire src/tests folder and runs everything in it.
#[test]
fn run_integration_tests() {
    let results = run_all_tests_in_test_folder();
    assert!(!results.is_empty(), "No integration tests found");

    let failures: Vec<_> = results
        .iter()
        .filter(|result| !result.is_success())
        .collect();

    for failure in &failures {
        println!("{failure}");
    }

    assert!(
        failures.is_empty(),
        "{} integration test(s) failed, the first one:\n{}",
        failures.len(),
        failures[0]
    );
}

fn run_all_tests_in_test_folder() -> Vec<TestResult> {
    let test_files = fs::read_dir(Path::new("src/tests")).expect("Failed to read the test folder");
    let mut results = Vec::new();

    for file in test_files.flatten() {
        let path = file.path();
        if path.extension().map_or(true, |extension| extension != "sql") {
            continue;
        }

        let reader = SqlTestFileReader::new(path).expect("Failed to open a test file");

        for test in reader {
            let test = test.expect("Failed to read a test");
            let found = run_single_test(&test);

            results.push(TestResult { test, found });
        }
    }

    results
}

/// Renders the input, or the error message if it can't be translated.
fn run_single_test(test: &Test) -> String {
    match render(test.input(), Format::Text) {
        Ok(output) => output,
        Err(error) => match error.translation_error() {
            Some(translation_error) => format!("ERROR: {translation_error}"),
            None => format!("ERROR: {error}"),
        },
    }
}

struct TestResult {
    test: Test,
    found: String,
}

impl TestResult {
    fn is_success(&self) -> bool {
        self.test.expected() == self.found
    }
}

impl Display for TestResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}:{}", self.test.file, self.test.line_nr)?;
        writeln!(f, "  input:    {}", self.test.input())?;
        writeln!(f, "  expected: {}", self.test.expected())?;
        write!(f, "  found:    {}", self.found)
    }
}
