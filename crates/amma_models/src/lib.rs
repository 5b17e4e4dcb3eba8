//! Provider clients for AMMA.
//!
//! - [`OpenAIClient`] implements [`amma_interface::ChatDriver`] over the
//!   chat-completions endpoint with function calling.
//! - [`OpenAIVideoClient`] implements [`amma_interface::VideoGenerator`]
//!   over the videos endpoint.
//!
//! ```no_run
//! use amma_core::{GenerateRequest, Message};
//! use amma_interface::ChatDriver;
//! use amma_models::OpenAIClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAIClient::new(std::env::var("OPENAI_API_KEY")?, "gpt-4.1");
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::user("Hello")])
//!     .build()?;
//! let response = client.generate_with_tools(&request, &[]).await?;
//! println!("{:?}", response.message.content);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;

pub use openai::{OpenAIClient, OpenAIVideoClient};
