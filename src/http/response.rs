/// Snapshot of one probe response. Transport failures are folded into the
/// snapshot (status -1, body = error text) so every downstream heuristic sees
/// a uniform shape and never has to handle a separate error channel.
#[derive(Debug, Clone)]
pub struct ResponseSnapshot {
    pub status: i32,
    pub body: Option<String>,
    pub elapsed_ms: u128,
}

impl ResponseSnapshot {
    pub fn new(status: i32, body: Option<String>, elapsed_ms: u128) -> Self {
        Self {
            status,
            body,
            elapsed_ms,
        }
    }

    pub fn body_len(&self) -> usize {
        self.body.as_deref().map_or(0, str::len)
    }
}
