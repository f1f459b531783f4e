pub mod tasks;

pub use tasks::{refresh_channel, RefreshSource};

#[cfg(feature = "tokio-runtime")]
pub use tasks::RefreshTask;
