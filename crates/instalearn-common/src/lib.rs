//! Instalearn-Common: shared error type and typed IDs.
//!
//! - **Typed IDs**: integer wrappers for quiz topics, questions and options
//! - **Error Handling**: common error type and result alias
//!
//! # Examples
//!
//! ```
//! use instalearn_common::{Error, Result, TopicId};
//!
//! let topic: TopicId = "3".parse().unwrap();
//! assert_eq!(topic.get(), 3);
//!
//! fn example() -> Result<()> {
//!     Err(Error::invalid_input("Question text is required"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod ids;

pub use error::{Error, Result};
pub use ids::*;
