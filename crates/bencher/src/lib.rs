use micro_bind::Args;

/// A query string recorded under `resources/query`.
#[derive(Debug, Copy, Clone)]
pub struct QueryFile {
    name: &'static str,
    content: &'static str,
}

impl QueryFile {
    pub const fn new(name: &'static str, content: &'static str) -> Self {
        Self { name, content }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    /// Size of the raw query in bytes, used as the bench throughput
    pub fn byte_len(&self) -> u64 {
        self.content.len() as u64
    }

    /// Parses the recorded query string, panicking on malformed fixtures
    pub fn args(&self) -> Args {
        Args::parse(self.content).expect("recorded query should be valid form data")
    }
}
