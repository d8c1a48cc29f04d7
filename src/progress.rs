/// Lightweight progress reporting for a load (fetch → extract → map).
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called once before the request goes out.
    fn begin(&mut self, _url: &str) {}

    /// Called as each pipeline stage starts.
    fn stage(&mut self, _stage: Stage) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called at the end; `rows` is `None` when the load failed.
    fn finish(&mut self, _rows: Option<usize>) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Extract,
    Map,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Fetch => "Fetching page",
            Stage::Extract => "Extracting embedded data",
            Stage::Map => "Building table",
        }
    }
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
