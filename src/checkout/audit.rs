use std::sync::Mutex;

use crate::checkout::{error::CheckoutError, ports::AuditSink};

pub fn failure_record(err: &CheckoutError) -> String {
    format!("{}: {}", err.kind.as_str(), err.message)
}

pub fn attempt_finished_record(requester_id: &str, asset_id: &str) -> String {
    format!("attempt finished for requester={requester_id}, asset={asset_id}")
}

#[derive(Debug, Clone, Default)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _message: &str) {}
}

#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<String>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<String> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, message: &str) {
        let mut records = match self.records.lock() {
            Ok(records) => records,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.push(message.to_string());
    }
}

#[derive(Debug, Clone, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, message: &str) {
        tracing::info!(target: "audit", record = %message, "audit_record");
    }
}

#[derive(Debug, Clone, Default)]
pub struct StdoutAuditSink;

impl AuditSink for StdoutAuditSink {
    fn record(&self, message: &str) {
        println!("[AUDIT] {message}");
    }
}
