pub mod assets;
pub mod audit;
pub mod error;
pub mod policy;
pub mod ports;
pub mod requesters;
pub mod service;
pub mod types;
pub mod validation;

pub use assets::AssetDirectory;
pub use audit::{MemoryAuditSink, NoopAuditSink, StdoutAuditSink, TracingAuditSink};
pub use error::{CheckoutError, CheckoutErrorKind};
pub use policy::CheckoutPolicy;
pub use ports::AuditSink;
pub use requesters::RequesterDirectory;
pub use service::CheckoutService;
pub use types::{Asset, AssetId, CheckoutRequest, PolicyNotice, Receipt, Requester, RequesterId};
