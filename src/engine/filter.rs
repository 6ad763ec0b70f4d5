//! JMeter console output filtering

/// Decides which console lines are shown to the user
pub trait OutputFilter {
    /// Whether `line` should be relayed
    fn relay(&self, line: &str) -> bool;
}

impl<F> OutputFilter for F
where
    F: Fn(&str) -> bool,
{
    fn relay(&self, line: &str) -> bool {
        self(line)
    }
}

/// Drops JMeter's startup, summariser and shutdown chatter
#[derive(Clone, Debug)]
pub struct NoiseFilter {
    prefixes: Vec<String>,
    suffixes: Vec<String>,
}

impl NoiseFilter {
    pub const DEFAULT_PREFIXES: &'static [&'static str] = &[
        "Creating", "Created", "Starting", "Waiting", "summary", "Tidying",
    ];

    pub const DEFAULT_SUFFIXES: &'static [&'static str] = &["end of run"];

    /// Filter with no rules; relays every non-blank line
    pub fn empty() -> Self {
        Self {
            prefixes: Vec::new(),
            suffixes: Vec::new(),
        }
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffixes.push(suffix.into());
        self
    }

    /// Whether the trimmed line matches a noise rule
    pub fn is_noise(&self, line: &str) -> bool {
        self.prefixes.iter().any(|p| line.starts_with(p.as_str()))
            || self.suffixes.iter().any(|s| line.ends_with(s.as_str()))
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        let filter = Self::DEFAULT_PREFIXES
            .iter()
            .fold(Self::empty(), |f, p| f.prefix(*p));
        Self::DEFAULT_SUFFIXES.iter().fold(filter, |f, s| f.suffix(*s))
    }
}

impl OutputFilter for NoiseFilter {
    fn relay(&self, line: &str) -> bool {
        !line.is_empty() && !self.is_noise(line)
    }
}
