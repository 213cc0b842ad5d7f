use std::fmt::{self, Write};

use serde::Serialize;

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// File is readable but looks suspicious
    Warning(String),
    /// File would be rejected by the decoder
    Failed(String),
}

/// Severity used to pick a marker and a terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Good,
    Caution,
    Bad,
}

impl Tone {
    fn marker(self) -> &'static str {
        match self {
            Tone::Good => "✓",
            Tone::Caution => "⚠",
            Tone::Bad => "✗",
        }
    }
}

impl CheckStatus {
    fn tone(&self) -> Tone {
        match self {
            CheckStatus::Ok => Tone::Good,
            CheckStatus::Warning(_) => Tone::Caution,
            CheckStatus::Failed(_) => Tone::Bad,
        }
    }

    fn message(&self) -> Option<&str> {
        match self {
            CheckStatus::Ok => None,
            CheckStatus::Warning(msg) | CheckStatus::Failed(msg) => Some(msg),
        }
    }
}

/// Named check and its outcome
#[derive(Debug, Clone, Serialize)]
pub struct ValidationCheck {
    /// What was checked
    pub name: String,
    /// Outcome
    #[serde(flatten)]
    pub status: CheckStatus,
}

impl ValidationCheck {
    pub(crate) fn new(name: impl Into<String>, status: CheckStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }

    pub(crate) fn ok(name: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Ok)
    }

    pub(crate) fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Warning(message.into()))
    }

    pub(crate) fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Failed(message.into()))
    }
}

/// Check counts by outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Passed checks
    pub passed: usize,
    /// Warnings
    pub warnings: usize,
    /// Failures
    pub failed: usize,
}

impl Tally {
    fn verdict(&self) -> (Tone, &'static str) {
        if self.failed > 0 {
            (Tone::Bad, "Validation FAILED")
        } else if self.warnings > 0 {
            (Tone::Caution, "Validation PASSED with warnings")
        } else {
            (Tone::Good, "Validation PASSED")
        }
    }
}

/// All checks run against one instrument directory
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    /// Checks in the order they ran
    pub checks: Vec<ValidationCheck>,
    /// Directory that was validated
    pub file_path: String,
}

impl ValidationReport {
    /// Empty report for `file_path`
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            checks: Vec::new(),
            file_path: file_path.into(),
        }
    }

    /// Record a check
    pub fn add_check(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    /// Count checks by outcome
    pub fn tally(&self) -> Tally {
        self.checks
            .iter()
            .fold(Tally::default(), |mut tally, check| {
                match check.status {
                    CheckStatus::Ok => tally.passed += 1,
                    CheckStatus::Warning(_) => tally.warnings += 1,
                    CheckStatus::Failed(_) => tally.failed += 1,
                }
                tally
            })
    }

    /// Whether any check failed
    pub fn has_failures(&self) -> bool {
        self.tally().failed > 0
    }

    /// Whether any check warned
    pub fn has_warnings(&self) -> bool {
        self.tally().warnings > 0
    }

    /// Number of passed checks
    pub fn success_count(&self) -> usize {
        self.tally().passed
    }

    /// Number of warnings
    pub fn warning_count(&self) -> usize {
        self.tally().warnings
    }

    /// Number of failures
    pub fn failure_count(&self) -> usize {
        self.tally().failed
    }

    /// Look up a check by name
    pub fn check(&self, name: &str) -> Option<&ValidationCheck> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// Format the report with terminal colors (plain text without the
    /// `colorized_output` feature)
    pub fn format_colored(&self) -> String {
        let mut out = String::new();
        // writes into a String are infallible
        #[cfg(feature = "colorized_output")]
        let _ = self.render(&mut out, paint);
        #[cfg(not(feature = "colorized_output"))]
        let _ = self.render(&mut out, |_, text| text.to_string());
        out
    }

    /// Shared layout of the plain and colored renderings. `paint` styles a
    /// fragment by tone; `None` marks headings.
    fn render<W, P>(&self, out: &mut W, paint: P) -> fmt::Result
    where
        W: Write,
        P: Fn(Option<Tone>, &str) -> String,
    {
        writeln!(out, "{}", paint(None, "DATA.MS Validation Report"))?;
        writeln!(out, "Path: {}", self.file_path)?;
        writeln!(out)?;

        for check in &self.checks {
            let tone = check.status.tone();
            write!(
                out,
                "  {} {}",
                paint(Some(tone), tone.marker()),
                check.name
            )?;
            match check.status.message() {
                Some(msg) => writeln!(out, ": {}", paint(Some(tone), msg))?,
                None => writeln!(out)?,
            }
        }

        let tally = self.tally();
        let (tone, verdict) = tally.verdict();
        writeln!(out)?;
        writeln!(
            out,
            "Summary: {} passed, {} warnings, {} failed",
            tally.passed, tally.warnings, tally.failed
        )?;
        writeln!(out, "{}", paint(Some(tone), verdict))
    }
}

#[cfg(feature = "colorized_output")]
fn paint(tone: Option<Tone>, text: &str) -> String {
    use console::style;

    let styled = style(text);
    match tone {
        None => styled.bold().cyan(),
        Some(Tone::Good) => styled.green(),
        Some(Tone::Caution) => styled.yellow(),
        Some(Tone::Bad) => styled.red().bold(),
    }
    .to_string()
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, |_, text| text.to_string())
    }
}
