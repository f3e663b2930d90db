//! Canned linter outputs for adapter tests.

/// Analyzer output for a clean file.
pub const ANALYZER_CLEAN: &str = "[]";

/// Analyzer output with one warning and one error, in the JSON shape
/// produced by `pylint --output-format=json`.
pub const ANALYZER_MIXED: &str = r#"[
    {
        "type": "warning",
        "module": "app",
        "obj": "",
        "line": 3,
        "column": 0,
        "path": "src/app.py",
        "symbol": "unused-import",
        "message": "Unused import sys",
        "message-id": "W0611"
    },
    {
        "type": "error",
        "module": "app",
        "obj": "",
        "line": 7,
        "column": 19,
        "path": "src/app.py",
        "symbol": "undefined-variable",
        "message": "Undefined variable 'confg'",
        "message-id": "E0602"
    }
]"#;

/// Analyzer output with every severity class the tool reports.
pub const ANALYZER_ALL_KINDS: &str = r#"[
    {"type": "convention", "line": 1, "column": 0, "symbol": "missing-docstring", "message": "Missing module docstring", "message-id": "C0114"},
    {"type": "refactor", "line": 2, "column": 0, "symbol": "too-many-branches", "message": "Too many branches", "message-id": "R0912"},
    {"type": "warning", "line": 3, "column": 0, "symbol": "unused-variable", "message": "Unused variable 'x'", "message-id": "W0612"},
    {"type": "error", "line": 4, "column": 0, "symbol": "undefined-variable", "message": "Undefined variable 'y'", "message-id": "E0602"},
    {"type": "fatal", "line": 5, "column": 0, "symbol": "syntax-error", "message": "invalid syntax", "message-id": "E0001"}
]"#;

/// Format-checker stdout for a file that needs reformatting
/// (the shape of `black --check --diff`).
pub const FORMAT_NEEDS_REFORMAT: &str = "--- src/app.py\t(original)
+++ src/app.py\t(formatted)
@@ -1,2 +1,2 @@
-x=1
+x = 1
 y = 2
";
