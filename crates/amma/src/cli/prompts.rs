//! Interactive prompts.
//!
//! Answers are read on a dedicated thread and handed over a channel, so a
//! pending read never holds up runtime shutdown after Ctrl-C.

use std::io::{BufRead, Write};
use tokio::sync::mpsc;

/// What the operator asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    /// Patient whose files are read
    pub patient_email: String,
    /// Whether to produce a video after the script
    pub generate_video: bool,
    /// Doctor the video record is saved for
    pub doctor_email: Option<String>,
}

/// Asks questions on stdout and reads answers line by line.
#[derive(Debug)]
pub struct Prompter {
    lines: mpsc::UnboundedReceiver<std::io::Result<String>>,
}

impl Prompter {
    /// Prompter over the process's stdin.
    pub fn stdin() -> std::io::Result<Self> {
        Self::spawn(std::io::BufReader::new(std::io::stdin()))
    }

    /// Prompter over any line source, read on its own thread.
    pub fn spawn<R>(reader: R) -> std::io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (sender, lines) = mpsc::unbounded_channel();
        std::thread::Builder::new()
            .name("amma-input".to_string())
            .spawn(move || {
                for line in reader.lines() {
                    if sender.send(line).is_err() {
                        break;
                    }
                }
            })?;
        Ok(Self { lines })
    }

    /// Print `question` and return the trimmed answer; end of input is an
    /// empty answer.
    pub async fn ask(&mut self, question: &str) -> std::io::Result<String> {
        print!("{question}");
        std::io::stdout().flush()?;
        let answer = match self.lines.recv().await {
            Some(line) => line?,
            None => String::new(),
        };
        Ok(answer.trim().to_string())
    }
}

/// Only `y` and `yes` (any case) mean yes.
fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}

fn non_empty(answer: String) -> Option<String> {
    if answer.is_empty() { None } else { Some(answer) }
}

/// Ask for the patient, the video flag, and the doctor.
///
/// Returns `None` when no patient email was given.
pub async fn collect_request(prompter: &mut Prompter) -> std::io::Result<Option<SessionRequest>> {
    let Some(patient_email) = non_empty(prompter.ask("Enter patient email: ").await?) else {
        return Ok(None);
    };

    println!();
    let generate_video = is_yes(&prompter.ask("Generate video? (y/n) [n]: ").await?);

    let doctor_email = if generate_video {
        non_empty(
            prompter
                .ask("Doctor email (for database record) [optional]: ")
                .await?,
        )
    } else {
        None
    };

    Ok(Some(SessionRequest {
        patient_email,
        generate_video,
        doctor_email,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    async fn collect(input: &'static str) -> Option<SessionRequest> {
        let mut prompter = Prompter::spawn(Cursor::new(input)).unwrap();
        collect_request(&mut prompter).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_email_is_no_request() {
        assert_eq!(collect("   \n").await, None);
        assert_eq!(collect("").await, None);
    }

    #[tokio::test]
    async fn test_video_defaults_to_no() {
        let request = collect("pat@example.com\n\n").await.unwrap();
        assert_eq!(request.patient_email, "pat@example.com");
        assert!(!request.generate_video);
        assert_eq!(request.doctor_email, None);
    }

    #[tokio::test]
    async fn test_yes_with_doctor() {
        let request = collect(" pat@example.com \nYES\ndoc@example.com\n")
            .await
            .unwrap();
        assert!(request.generate_video);
        assert_eq!(request.doctor_email.as_deref(), Some("doc@example.com"));
    }

    #[tokio::test]
    async fn test_yes_without_doctor() {
        let request = collect("pat@example.com\ny\n\n").await.unwrap();
        assert!(request.generate_video);
        assert_eq!(request.doctor_email, None);
    }

    #[test]
    fn test_only_y_and_yes_count() {
        assert!(is_yes("Y"));
        assert!(is_yes("yes"));
        assert!(!is_yes("yeah"));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
    }
}
