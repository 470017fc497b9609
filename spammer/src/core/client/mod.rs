pub mod endpoint;

pub use endpoint::{Endpoint, EndpointError, EndpointHandle, ReceiptStatus, RpcEndpoint, SubmitError};
