pub mod http;
pub mod mock;

pub use http::HttpTranscriber;
pub use mock::MockTranscriber;
