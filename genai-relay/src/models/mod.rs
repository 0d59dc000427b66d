//! Request, response and route models for the relay.

pub mod operation;
pub mod request;
pub mod response;

pub use operation::{FileRule, Operation};
pub use request::{Attachment, GenerateTextRequest, RelayRequest, UploadForm};
pub use response::GenerateResponse;
