use std::fmt::Debug;

/// Write-only audit collaborator. Fire-and-forget: recording never fails the
/// checkout attempt it describes.
pub trait AuditSink: Debug + Send + Sync {
    fn record(&self, message: &str);
}
