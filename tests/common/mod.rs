//! Common test utilities for gemini-image-gateway
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{MockGemini, fixtures};
//!
//! #[actix_web::test]
//! async fn my_test() {
//!     let gemini = MockGemini::start().await;
//!     gemini.respond_with_image("image/png", fixtures::PNG_BYTES).await;
//!     let app = actix_web::test::init_service(create_app(gemini.state())).await;
//!     // ...
//! }
//! ```


// Re-export commonly used items
pub use fixtures::MultipartBody;
pub use gemini::{DEFAULT_KEY, MockGemini};

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).map(|v| v.is_empty()).unwrap_or(true) {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}
