//! Live API tests. Run with `--features api` and `OPENAI_API_KEY` set.
#![cfg(feature = "api")]

use amma_core::{GenerateRequest, Message};
use amma_interface::{ChatDriver, VideoGenerator};
use amma_models::{OpenAIClient, OpenAIVideoClient};

#[tokio::test]
async fn chat_completion_returns_text() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let client = OpenAIClient::new(std::env::var("OPENAI_API_KEY")?, "gpt-4.1-mini");

    let request = GenerateRequest::builder()
        .messages(vec![Message::user("Reply with the single word: ready")])
        .max_tokens(Some(10))
        .build()?;
    let response = client.generate_with_tools(&request, &[]).await?;

    assert!(response.message.content.is_some());
    Ok(())
}

#[tokio::test]
async fn unknown_video_job_is_an_api_error() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let client = OpenAIVideoClient::new(std::env::var("OPENAI_API_KEY")?);

    let result = client.retrieve("video_does_not_exist").await;

    assert!(result.is_err());
    Ok(())
}
