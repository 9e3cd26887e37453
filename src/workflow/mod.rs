pub mod lease_ctx;
pub mod lease_flow;

pub use lease_ctx::LeaseCtx;
pub use lease_flow::LeaseFlow;
