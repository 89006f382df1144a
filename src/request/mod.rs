pub mod builder;
pub mod event;

pub use builder::{ProbeRequest, Target, build_request};
pub use event::{EventBody, ProbeEvent};
