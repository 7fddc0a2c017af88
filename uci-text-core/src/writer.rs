use crate::section::{UciPackage, UciSection};

/// Whitespace-cleanup policy applied to rendered output.
///
/// Different device classes expect different output density. The policy is
/// data handed to [`render`], not behavior baked into a renderer subclass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPolicy {
    /// Strip trailing whitespace and keep single blank lines between blocks.
    #[default]
    BlockSeparated,
    /// Strip every line and drop all blank lines, including block separators.
    Dense,
}

impl CleanupPolicy {
    /// Apply the policy to already-rendered text.
    pub fn apply(&self, text: &str) -> String {
        match self {
            CleanupPolicy::BlockSeparated => cleanup_block_separated(text),
            CleanupPolicy::Dense => cleanup_dense(text),
        }
    }
}

/// Serialize packages into canonical native text.
///
/// Per package: a `package <name>` header, then each section as a
/// `config <type> '<name>'` header followed by tab-indented `option`/`list`
/// lines, blocks separated by blank lines. Values are wrapped in single
/// quotes with no further escaping; callers must not pass values containing
/// single quotes.
pub fn render(packages: &[UciPackage], policy: CleanupPolicy) -> String {
    let mut out = String::new();
    for package in packages {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("package ");
        out.push_str(&package.name);
        out.push('\n');
        for section in &package.sections {
            out.push('\n');
            push_section(&mut out, section);
        }
    }
    policy.apply(&out)
}

fn push_section(out: &mut String, section: &UciSection) {
    out.push_str(&section.to_string());
}

fn cleanup_block_separated(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut previous_blank = true;
    for raw in text.lines() {
        let line = raw.trim_end();
        if line.trim().is_empty() {
            if !previous_blank {
                lines.push("");
                previous_blank = true;
            }
        } else {
            lines.push(line);
            previous_blank = false;
        }
    }
    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }
    finish(lines)
}

fn cleanup_dense(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    finish(lines)
}

fn finish(lines: Vec<&str>) -> String {
    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}
