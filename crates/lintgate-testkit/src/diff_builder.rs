//! Builders for well-formed unified diff strings.
//!
//! # Example
//!
//! ```rust
//! use lintgate_testkit::{DiffBuilder, FileDiff, Hunk};
//!
//! let diff = DiffBuilder::new()
//!     .file(
//!         FileDiff::new("src/a.py")
//!             .hunk(Hunk::new(1, 1, 1, 2).context("import os").add("import sys")),
//!     )
//!     .build();
//!
//! assert!(diff.contains("+import sys"));
//! ```

/// Builds a multi-file unified diff.
#[derive(Debug, Clone, Default)]
pub struct DiffBuilder {
    files: Vec<FileDiff>,
}

impl DiffBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, file: FileDiff) -> Self {
        self.files.push(file);
        self
    }

    pub fn build(self) -> String {
        let mut out = String::new();
        for file in &self.files {
            file.render(&mut out);
        }
        out
    }
}

/// One file's entry in a diff.
#[derive(Debug, Clone)]
pub struct FileDiff {
    path: String,
    old_path: Option<String>,
    deleted: bool,
    hunks: Vec<Hunk>,
}

impl FileDiff {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            old_path: None,
            deleted: false,
            hunks: Vec::new(),
        }
    }

    /// Mark as a rename from `old_path`.
    pub fn renamed_from(mut self, old_path: &str) -> Self {
        self.old_path = Some(old_path.to_string());
        self
    }

    /// Mark as deleted (`+++ /dev/null`).
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    pub fn hunk(mut self, hunk: Hunk) -> Self {
        self.hunks.push(hunk);
        self
    }

    fn render(&self, out: &mut String) {
        let a_path = self.old_path.as_deref().unwrap_or(&self.path);

        out.push_str(&format!("diff --git a/{} b/{}\n", a_path, self.path));

        if self.deleted {
            out.push_str("deleted file mode 100644\n");
            out.push_str(&format!("--- a/{a_path}\n"));
            out.push_str("+++ /dev/null\n");
        } else {
            if self.old_path.is_some() {
                out.push_str("similarity index 90%\n");
                out.push_str(&format!("rename from {a_path}\n"));
                out.push_str(&format!("rename to {}\n", self.path));
            }
            out.push_str("index 0000000..1111111 100644\n");
            out.push_str(&format!("--- a/{a_path}\n"));
            out.push_str(&format!("+++ b/{}\n", self.path));
        }

        for hunk in &self.hunks {
            hunk.render(out);
        }
    }
}

/// One hunk within a file diff.
#[derive(Debug, Clone)]
pub struct Hunk {
    old_start: u32,
    old_count: u32,
    new_start: u32,
    new_count: u32,
    lines: Vec<HunkLine>,
}

#[derive(Debug, Clone)]
enum HunkLine {
    Context(String),
    Add(String),
    Remove(String),
}

impl Hunk {
    pub fn new(old_start: u32, old_count: u32, new_start: u32, new_count: u32) -> Self {
        Self {
            old_start,
            old_count,
            new_start,
            new_count,
            lines: Vec::new(),
        }
    }

    /// Hunk appending `count` lines starting at `new_start`.
    pub fn additions(new_start: u32, count: u32) -> Self {
        Self::new(new_start.saturating_sub(1), 0, new_start, count)
    }

    pub fn context(mut self, content: &str) -> Self {
        self.lines.push(HunkLine::Context(content.to_string()));
        self
    }

    pub fn add(mut self, content: &str) -> Self {
        self.lines.push(HunkLine::Add(content.to_string()));
        self
    }

    pub fn remove(mut self, content: &str) -> Self {
        self.lines.push(HunkLine::Remove(content.to_string()));
        self
    }

    fn render(&self, out: &mut String) {
        out.push_str(&format!(
            "@@ -{},{} +{},{} @@\n",
            self.old_start, self.old_count, self.new_start, self.new_count
        ));
        for line in &self.lines {
            match line {
                HunkLine::Context(c) => out.push_str(&format!(" {c}\n")),
                HunkLine::Add(c) => out.push_str(&format!("+{c}\n")),
                HunkLine::Remove(c) => out.push_str(&format!("-{c}\n")),
            }
        }
    }
}
