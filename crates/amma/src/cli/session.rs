//! One interactive run: prompts, script, optional video, summary.

use crate::cli::{Prompter, SessionRequest, collect_request};
use amma::VideoScriptPipeline;
use amma::report::{self, banner};
use std::process::ExitCode;
use tracing::{error, info};

/// Run the interactive session to completion.
pub async fn run_session(pipeline: &VideoScriptPipeline, prompter: &mut Prompter) -> ExitCode {
    let request = match collect_request(prompter).await {
        Ok(Some(request)) => request,
        Ok(None) => {
            eprintln!("No email provided");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            error!(error = %e, "Failed to read input");
            eprintln!("Failed to read input: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!();
    banner("Medical Video Script Generator");

    let script = match pipeline.generate_script(&request.patient_email).await {
        Ok(script) => script,
        Err(e) => {
            error!(error = %e, "Script generation failed");
            report::print_agent_failure(&e);
            return ExitCode::FAILURE;
        }
    };

    println!();
    banner("Video Script Generated");
    println!();
    println!("{script}");
    println!();

    let video_url = if request.generate_video {
        banner("GENERATING VIDEO");
        println!("This may take a few minutes...");
        let outcome = pipeline
            .produce_video(
                &script,
                &request.patient_email,
                request.doctor_email.as_deref(),
            )
            .await;
        report::print_video_outcome(&outcome);
        outcome.into_url()
    } else {
        None
    };

    print_summary(&request, video_url.as_deref());
    info!("Session complete");
    ExitCode::SUCCESS
}

fn print_summary(request: &SessionRequest, video_url: Option<&str>) {
    println!();
    banner("COMPLETE!");
    println!("Script generated");
    match video_url {
        Some(url) => {
            println!("Video generated: {url}");
            if request.doctor_email.is_some() {
                println!("Video linked to {}", request.patient_email);
            }
        }
        None if request.generate_video => println!("No video was produced"),
        None => {
            println!("Video not requested");
            println!("Run again and answer 'y' to generate a video");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amma::{
        AmmaConfig, HttpDocumentSource, OpenAIClient, OpenAIVideoClient, PdfTextExtractor,
        PipelineServices, SupabaseClient,
    };
    use std::io::{BufReader, Read};
    use std::sync::Arc;
    use std::sync::mpsc;
    use std::time::Duration;

    /// Input that never produces a byte, like a terminal nobody types into.
    struct SilentInput;

    impl Read for SilentInput {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            loop {
                std::thread::park();
            }
        }
    }

    fn offline_pipeline() -> anyhow::Result<VideoScriptPipeline> {
        let services = PipelineServices {
            store: Arc::new(SupabaseClient::new("http://127.0.0.1:9", "key")),
            source: Arc::new(HttpDocumentSource::new(Duration::from_secs(1))?),
            extractor: Arc::new(PdfTextExtractor),
            chat: Arc::new(OpenAIClient::new("key", "model")),
            video: Arc::new(OpenAIVideoClient::new("key")),
        };
        Ok(VideoScriptPipeline::from_services(services, &AmmaConfig::default()))
    }

    #[test]
    fn test_cancelled_session_does_not_wait_for_input() -> anyhow::Result<()> {
        let (done_tx, done_rx) = mpsc::channel();

        std::thread::spawn(move || -> anyhow::Result<()> {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            let pipeline = offline_pipeline()?;
            let mut prompter = Prompter::spawn(BufReader::new(SilentInput))?;

            let finished = runtime.block_on(async {
                tokio::select! {
                    _ = run_session(&pipeline, &mut prompter) => true,
                    _ = tokio::time::sleep(Duration::from_millis(20)) => false,
                }
            });
            drop(prompter);
            drop(runtime);
            done_tx.send(finished)?;
            Ok(())
        });

        let finished = done_rx.recv_timeout(Duration::from_secs(5))?;
        assert!(!finished, "session should still be waiting for an answer");
        Ok(())
    }
}
