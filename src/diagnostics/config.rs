/// Selects which declarations a compiler stage prints trace output for.
/// Declarations are numbered from 1 in the order they appear in the schema.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TracingConfig {
    All,
    Between(usize, usize),
    Before(usize),
    After(usize),
    Only(usize),
    Off,
}

pub trait Tracing {
    fn set_tracing(&mut self, config: TracingConfig);
}

impl TracingConfig {
    /// Parses the command line form of a tracing selection:
    /// `all`, `off`, `N`, `N:M`, `:M`, or `N:`.
    pub fn parse(text: &str) -> Option<TracingConfig> {
        let text = text.trim();
        match text {
            "all" => return Some(TracingConfig::All),
            "off" => return Some(TracingConfig::Off),
            _ => (),
        }

        match text.split_once(':') {
            None => text.parse().ok().map(TracingConfig::Only),
            Some(("", "")) => Some(TracingConfig::All),
            Some(("", end)) => end.parse().ok().map(TracingConfig::Before),
            Some((start, "")) => start.parse().ok().map(TracingConfig::After),
            Some((start, end)) => {
                let start: usize = start.parse().ok()?;
                let end: usize = end.parse().ok()?;
                if start <= end {
                    Some(TracingConfig::Between(start, end))
                } else {
                    None
                }
            }
        }
    }

    /// Returns true if declaration number `n` should be traced.
    pub fn selects(&self, n: usize) -> bool {
        match *self {
            TracingConfig::All => true,
            TracingConfig::After(start) if start <= n => true,
            TracingConfig::Before(end) if n <= end => true,
            TracingConfig::Between(start, end) if start <= n && n <= end => true,
            TracingConfig::Only(only) if n == only => true,
            _ => false,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        TracingConfig::Off
    }
}
