#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The listener socket itself failed. Connection-level faults never
    /// surface here — they are reported per connection via
    /// [`IngestEvent::Closed`](crate::IngestEvent::Closed).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
