pub mod encoder;
pub mod invoker;
pub mod metrics;
pub mod providers;

pub use encoder::{decode_inline_data, file_to_generative_part};
pub use invoker::ModelInvoker;
pub use metrics::{get_metrics, init_metrics};
