//! Human-readable harness output.
//!
//! Status lines and summaries go to the `out` stream, diffs to the `err`
//! stream. Styling uses crossterm and is skipped entirely when color is off,
//! in which case diff lines are prefixed with `+`, `-` or a space instead.

use crossterm::style::Stylize;
use std::io::{self, Stderr, Stdout, Write};
use std::path::Path;

use crate::engine::ActionType;
use crate::runner::{RunMode, RunOutcome, RunSummary};
use crate::snapshot::{Segment, SegmentKind, diff_lines};

#[derive(Debug, Clone, Copy)]
enum Tone {
    Bold,
    BoldGrey,
    Grey,
    Green,
    BoldGreen,
    Red,
    BoldRed,
    BoldYellow,
}

fn paint(text: &str, tone: Tone, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match tone {
        Tone::Bold => text.bold().to_string(),
        Tone::BoldGrey => text.bold().dark_grey().to_string(),
        Tone::Grey => text.dark_grey().to_string(),
        Tone::Green => text.green().to_string(),
        Tone::BoldGreen => text.bold().green().to_string(),
        Tone::Red => text.red().to_string(),
        Tone::BoldRed => text.bold().red().to_string(),
        Tone::BoldYellow => text.bold().yellow().to_string(),
    }
}

/// Render diff segments in order, without dropping any content
pub fn render_segments(segments: &[Segment], color: bool) -> String {
    let mut rendered = String::new();
    for segment in segments {
        if color {
            let tone = match segment.kind {
                SegmentKind::Common => Tone::Grey,
                SegmentKind::Added => Tone::Green,
                SegmentKind::Removed => Tone::Red,
            };
            rendered.push_str(&paint(&segment.value, tone, true));
        } else {
            let marker = match segment.kind {
                SegmentKind::Common => ' ',
                SegmentKind::Added => '+',
                SegmentKind::Removed => '-',
            };
            for line in segment.value.split_inclusive('\n') {
                rendered.push(marker);
                rendered.push_str(line);
            }
        }
    }
    rendered
}

/// Writes per-fixture progress, statuses, diffs and the final summary
pub struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
    color: bool,
}

impl Reporter<Stdout, Stderr> {
    /// Report to the process stdout/stderr
    pub fn stdio(color: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), color)
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E, color: bool) -> Self {
        Self { out, err, color }
    }

    /// Give back the underlying streams
    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        paint(text, tone, self.color)
    }

    /// Announce the fixture about to be validated
    pub fn fixture_header(&mut self, path: &Path, action_type: ActionType) -> io::Result<()> {
        let header = self.paint(&format!(" > {} ", path.display()), Tone::Bold);
        let kind = self.paint(&format!("({} file)", action_type), Tone::BoldGrey);
        writeln!(self.out, "{}{}\n", header, kind)
    }

    /// Marker written right before the engine runs
    pub fn output_start(&mut self) -> io::Result<()> {
        let marker = self.paint("=== OUTPUT START ===", Tone::BoldGrey);
        writeln!(self.out, "{}", marker)?;
        self.out.flush()
    }

    /// Marker written right after the engine returns
    pub fn output_end(&mut self) -> io::Result<()> {
        let marker = self.paint("=== OUTPUT END ===", Tone::BoldGrey);
        writeln!(self.out, "{}", marker)
    }

    /// Status line, plus a diff of `expected` against the new snapshot on mismatch
    pub fn outcome(&mut self, outcome: &RunOutcome, expected: &str, mode: RunMode) -> io::Result<()> {
        if outcome.matched {
            let status = self.paint("\n   SNAPSHOT MATCHED", Tone::BoldGreen);
            writeln!(self.out, "{}", status)?;
        } else {
            let tone = match mode {
                RunMode::Update => Tone::BoldYellow,
                RunMode::Check => Tone::BoldRed,
            };
            let status = self.paint("\n   SNAPSHOT MISMATCH\n", tone);
            writeln!(self.out, "{}", status)?;
            self.diff(expected, &outcome.new_snapshot)?;
        }
        writeln!(self.out, "\n")
    }

    /// Legend on `out`, diff body on `err`
    pub fn diff(&mut self, old: &str, new: &str) -> io::Result<()> {
        let legend = if self.color {
            format!(
                "{} {} {} {} {} {} {}",
                self.paint("Diff:", Tone::BoldGrey),
                self.paint("red", Tone::BoldRed),
                self.paint("for deletions,", Tone::Grey),
                self.paint("green", Tone::BoldGreen),
                self.paint("for additions,", Tone::Grey),
                self.paint("grey", Tone::BoldGrey),
                self.paint("for common parts", Tone::Grey),
            )
        } else {
            "Diff: - for deletions, + for additions, space for common parts".to_string()
        };
        writeln!(self.out, "{}", legend)?;
        self.out.flush()?;

        let segments = diff_lines(old, new);
        write!(self.err, "{}", render_segments(&segments, self.color))?;
        writeln!(self.err)?;
        self.err.flush()
    }

    /// Note that a snapshot is being rewritten
    pub fn updating(&mut self, fixture: &Path) -> io::Result<()> {
        let line = self.paint(&format!("Updating snapshot for {}", fixture.display()), Tone::BoldYellow);
        writeln!(self.out, "{}", line)
    }

    /// Note that a fixture failed in check mode
    pub fn mismatch(&mut self, fixture: &Path) -> io::Result<()> {
        let line = self.paint(&format!("Snapshot mismatch for {}", fixture.display()), Tone::BoldRed);
        writeln!(self.out, "{}", line)
    }

    /// Final pass/fail line
    pub fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        if summary.passed() {
            let line = self.paint(
                &format!("\nPassed all tests in {:.3}s", summary.elapsed_secs),
                Tone::BoldGreen,
            );
            writeln!(self.out, "{}", line)?;
        } else {
            let line = self.paint("\nFailed some tests", Tone::BoldRed);
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }
}
