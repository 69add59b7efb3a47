//! Domain layer: values, contexts, transactions and topics.
//!
//! These are the data types that flow through the registry and the request
//! observer. None of them owns behavior beyond simple accessors.

pub mod context;
pub mod topic;
pub mod transaction;
pub mod value;

pub use context::{ContextId, MonitorContext, PersistedState};
pub use topic::{HTTP_EVENT, HttpTopic};
pub use transaction::{
    HttpChannel, HttpTransaction, NotificationSubject, RequestId, crop_string,
};
pub use value::{Value, ValueType};
