//! Centralized shell output.
//!
//! All user-facing status output goes through [`Shell`]:
//! - Status messages with consistent, right-aligned verbs
//! - Verbosity filtering (`--quiet` / `--verbose`)
//! - Color detection for stderr
//! - Scoped timing spans
//!
//! Status lines go to stderr. Only plan output meant for piping
//! (see [`Shell::print`]) is written to stdout.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// --quiet: errors only
    Quiet,
    /// Default: status messages
    #[default]
    Normal,
    /// --verbose: status messages plus per-package detail
    Verbose,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

/// Status types for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success statuses (green)
    Linked,
    Updated,
    Finished,

    // In-progress statuses (cyan)
    Scanning,
    Locating,
    Linking,

    // Info statuses (blue)
    Found,
    Profile,
    Planned,

    // Warning statuses (yellow)
    Skipped,
    Warning,

    // Error status (red)
    Error,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Linked => "Linked",
            Status::Updated => "Updated",
            Status::Finished => "Finished",
            Status::Scanning => "Scanning",
            Status::Locating => "Locating",
            Status::Linking => "Linking",
            Status::Found => "Found",
            Status::Profile => "Profile",
            Status::Planned => "Would link",
            Status::Skipped => "Skipped",
            Status::Warning => "Warning",
            Status::Error => "error",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Linked | Status::Updated | Status::Finished => "\x1b[1;32m",
            Status::Scanning | Status::Locating | Status::Linking => "\x1b[1;36m",
            Status::Found | Status::Profile | Status::Planned => "\x1b[1;34m",
            Status::Skipped | Status::Warning => "\x1b[1;33m",
            Status::Error => "\x1b[1;31m",
        }
    }

    /// Width for alignment (12 characters).
    fn width(&self) -> usize {
        12
    }
}

/// Central shell for all CLI output.
#[derive(Debug)]
pub struct Shell {
    verbosity: Verbosity,
    use_color: bool,
    /// Set once a stdout write fails; later `print` calls are dropped.
    stdout_closed: AtomicBool,
}

impl Shell {
    /// Create a new shell.
    pub fn new(verbosity: Verbosity, color: ColorChoice) -> Self {
        let use_color = match color {
            ColorChoice::Auto => io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        };

        Shell {
            verbosity,
            use_color,
            stdout_closed: AtomicBool::new(false),
        }
    }

    /// Create a shell from CLI flags. Quiet wins over verbose.
    pub fn from_flags(quiet: bool, verbose: bool, color: ColorChoice) -> Self {
        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Shell::new(verbosity, color)
    }

    /// A shell that prints nothing but errors, without color.
    pub fn quiet() -> Self {
        Shell::new(Verbosity::Quiet, ColorChoice::Never)
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Print a status message.
    ///
    /// Format: `{status:>12} {message}`
    ///
    /// In quiet mode, only Error status is printed.
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.is_quiet() && status != Status::Error {
            return;
        }

        let prefix = self.format_status(status);
        eprintln!("{} {}", prefix, msg);
    }

    /// Print a status message only in verbose mode.
    pub fn verbose(&self, status: Status, msg: impl Display) {
        if self.is_verbose() {
            self.status(status, msg);
        }
    }

    /// Print a warning message.
    pub fn warn(&self, msg: impl Display) {
        self.status(Status::Warning, msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: impl Display) {
        self.status(Status::Error, msg);
    }

    /// Print a plain line to stdout, regardless of verbosity.
    ///
    /// After the first failed write (e.g. a closed pipe) nothing more is
    /// written to stdout.
    pub fn print(&self, msg: impl Display) {
        self.print_to(&mut io::stdout().lock(), msg);
    }

    fn print_to(&self, out: &mut impl Write, msg: impl Display) {
        if self.stdout_closed.load(Ordering::Relaxed) {
            return;
        }
        if let Err(e) = writeln!(out, "{}", msg).and_then(|()| out.flush()) {
            tracing::debug!("stdout closed, dropping further output: {}", e);
            self.stdout_closed.store(true, Ordering::Relaxed);
        }
    }

    fn format_status(&self, status: Status) -> String {
        let text = status.as_str();
        let width = status.width();

        if self.use_color {
            let color = status.color_code();
            format!("{}{:>width$}\x1b[0m", color, text, width = width)
        } else {
            format!("{:>width$}", text, width = width)
        }
    }

    /// Create a scoped span for timing an operation.
    ///
    /// In verbose mode the start message is printed immediately. The end
    /// message with timing is printed when the span is finished.
    pub fn span(&self, status: Status, msg: impl Display) -> Span<'_> {
        Span::new(self, status, msg.to_string())
    }
}

/// A scoped timing span.
pub struct Span<'a> {
    shell: &'a Shell,
    start: Instant,
}

impl<'a> Span<'a> {
    fn new(shell: &'a Shell, status: Status, message: String) -> Self {
        shell.verbose(status, &message);
        Span {
            shell,
            start: Instant::now(),
        }
    }

    /// Finish the span, printing `msg` with the elapsed time.
    pub fn finish_with_message(self, msg: impl Display) {
        let duration_str = format_duration(self.start.elapsed());
        self.shell
            .status(Status::Finished, format!("{} in {}", msg, duration_str));
    }
}

/// Format a duration in a human-readable way.
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        let mins = secs / 60.0;
        format!("{:.1}m", mins)
    }
}
