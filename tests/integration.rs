use std::path::PathBuf;
use std::process::Command;

// ── helpers ──────────────────────────────────────────────────────────────────

fn pylexer_bin() -> PathBuf {
    // CARGO_BIN_EXE_pylexer is set by cargo test for integration tests
    PathBuf::from(env!("CARGO_BIN_EXE_pylexer"))
}

struct TempPy {
    dir: tempfile::TempDir,
    files: Vec<PathBuf>,
}

impl TempPy {
    fn new() -> Self {
        Self {
            dir: tempfile::TempDir::new().unwrap(),
            files: Vec::new(),
        }
    }

    fn file(&mut self, name: &str, content: &str) -> &mut Self {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        self.files.push(path);
        self
    }

    /// Run pylexer on every file written so far.  Returns (stdout, stderr, exit_code).
    fn run(&self, extra: &[&str]) -> (String, String, i32) {
        let mut cmd = Command::new(pylexer_bin());
        cmd.args(&self.files).args(extra);
        Self::output(cmd)
    }

    /// Run pylexer on the temp directory itself.
    fn run_dir(&self, extra: &[&str]) -> (String, String, i32) {
        let mut cmd = Command::new(pylexer_bin());
        cmd.arg(self.dir.path()).args(extra);
        Self::output(cmd)
    }

    fn output(mut cmd: Command) -> (String, String, i32) {
        let out = cmd.output().expect("failed to run pylexer");
        (
            String::from_utf8_lossy(&out.stdout).into_owned(),
            String::from_utf8_lossy(&out.stderr).into_owned(),
            out.status.code().unwrap_or(-1),
        )
    }

    fn json(&self, extra: &[&str]) -> serde_json::Value {
        let mut args = vec!["--json", "--no-exit-code"];
        args.extend_from_slice(extra);
        let (stdout, _, _) = self.run(&args);
        serde_json::from_str(&stdout).expect("output should be valid JSON")
    }
}

fn kinds(file: &serde_json::Value) -> Vec<String> {
    file["tokens"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["kind"].as_str().unwrap().to_string())
        .collect()
}

// ── basic output ─────────────────────────────────────────────────────────────

#[test]
fn test_text_output_lists_tokens() {
    let mut t = TempPy::new();
    t.file("m.py", "x = 1\n");
    let (stdout, _, code) = t.run(&[]);
    assert_eq!(code, 0);
    assert!(stdout.contains(":1:1: ident x"), "stdout: {stdout}");
    assert!(stdout.contains(":1:3: ="));
    assert!(stdout.contains(":1:5: int 1"));
    assert!(stdout.contains(":1:6: newline"));
    assert!(stdout.contains("Lexed 1 file(s), 4 token(s)"));
}

#[test]
fn test_comments_flag() {
    let mut t = TempPy::new();
    t.file("m.py", "x = 1 # note\n");
    let (without, _, _) = t.run(&[]);
    assert!(!without.contains("comment"));
    let (with, _, _) = t.run(&["--comments"]);
    assert!(with.contains(":1:7: comment # note"), "stdout: {with}");
}

#[test]
fn test_json_output() {
    let mut t = TempPy::new();
    t.file("m.py", "y = 0x1F  # hex\n");
    let out = t.json(&[]);
    assert_eq!(out["version"], "3.4");
    assert_eq!(out["failed"], 0);
    let file = &out["files"][0];
    assert_eq!(kinds(file), ["ident", "=", "int", "newline"]);
    assert_eq!(file["tokens"][2]["value"], "31");
    assert_eq!(file["comments"][0]["text"], "# hex");
}

// ── version selection ────────────────────────────────────────────────────────

#[test]
fn test_python2_print_keyword() {
    let mut t = TempPy::new();
    t.file("m.py", "print x\n");
    let py2 = t.json(&["--python", "2.7"]);
    assert_eq!(kinds(&py2["files"][0]), ["print", "ident", "newline"]);
    let py3 = t.json(&["--python", "3.4"]);
    assert_eq!(kinds(&py3["files"][0]), ["ident", "ident", "newline"]);
}

#[test]
fn test_long_suffix_fails_under_python3() {
    let mut t = TempPy::new();
    t.file("m.py", "n = 10L\n");
    let (_, stderr, code) = t.run(&["--python", "3.4"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("long integer literals were removed"), "stderr: {stderr}");
    assert!(stderr.contains("m.py:1:7"), "stderr: {stderr}");

    let (_, _, code) = t.run(&["--python", "2.6"]);
    assert_eq!(code, 0);
}

#[test]
fn test_unsupported_version_exits_2() {
    let mut t = TempPy::new();
    t.file("m.py", "x\n");
    let (_, stderr, code) = t.run(&["--python", "3.9"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("cannot lex Python 3.9"));
}

#[test]
fn test_malformed_version_rejected_by_cli() {
    let mut t = TempPy::new();
    t.file("m.py", "x\n");
    let (_, stderr, code) = t.run(&["--python", "three"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("invalid Python version"));
}

// ── errors ───────────────────────────────────────────────────────────────────

#[test]
fn test_bracket_mismatch_reports_both_ends() {
    let mut t = TempPy::new();
    t.file("m.py", "a = (1,\n  2]\n");
    let (_, stderr, code) = t.run(&[]);
    assert_eq!(code, 1);
    assert!(stderr.contains("m.py:2:4: fatal: mismatched ']'"), "stderr: {stderr}");
    assert!(stderr.contains("m.py:1:5: note: '(' opened here"), "stderr: {stderr}");
}

#[test]
fn test_no_exit_code_flag() {
    let mut t = TempPy::new();
    t.file("m.py", "x = $\n");
    let (stdout, stderr, code) = t.run(&["--no-exit-code"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("unexpected '$'"));
    assert!(stdout.contains("1 of 1 file(s) failed to lex"));
}

#[test]
fn test_json_error_record() {
    let mut t = TempPy::new();
    t.file("m.py", "x = 010\n");
    let out = t.json(&[]);
    assert_eq!(out["failed"], 1);
    let error = &out["files"][0]["error"];
    assert_eq!(error["level"], "error");
    assert_eq!(error["line"], 1);
    assert_eq!(error["col"], 5);
    assert_eq!(
        error["message"],
        "in Python 3, decimal literals must not start with a zero"
    );
    // Tokens before the error are still reported.
    assert_eq!(kinds(&out["files"][0]), ["ident", "="]);
}

// ── discovery ────────────────────────────────────────────────────────────────

#[test]
fn test_directory_walk_and_exclude() {
    let mut t = TempPy::new();
    t.file("pkg/a.py", "a\n");
    t.file("tests/test_a.py", "b\n");
    t.file("venv/lib/x.py", "c\n");
    t.file("README.md", "# not python\n");

    let (stdout, _, code) = t.run_dir(&[]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Lexed 2 file(s)"), "stdout: {stdout}");

    let (stdout, _, _) = t.run_dir(&["--exclude", "tests"]);
    assert!(stdout.contains("Lexed 1 file(s)"), "stdout: {stdout}");
}

#[test]
fn test_missing_path_exits_2() {
    let t = TempPy::new();
    let missing = t.dir.path().join("missing");
    let mut cmd = Command::new(pylexer_bin());
    cmd.arg(&missing);
    let (_, stderr, code) = TempPy::output(cmd);
    assert_eq!(code, 2);
    assert!(stderr.contains("error"));
}

// ── help ─────────────────────────────────────────────────────────────────────

#[test]
fn test_help_warns_that_string_bodies_are_lexed_as_code() {
    let mut cmd = Command::new(pylexer_bin());
    cmd.arg("--help");
    let (stdout, _, code) = TempPy::output(cmd);
    assert_eq!(code, 0);
    assert!(stdout.contains("String bodies are not scanned"), "stdout: {stdout}");
}
