use crate::config::Config;
use crate::core::{PipelineError, SourceKind, SummarizeRequest, SummaryPipeline};
use crate::extractors::{TranscriptExtractor, WebPageExtractor};
use crate::summarize::GroqSummarizer;
use anyhow::{Context, Result};
use clap::Parser;
use secrecy::SecretString;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "websum")]
#[command(about = "Summarize YouTube videos and web pages from the command line")]
#[command(version)]
pub struct Cli {
    /// URL to summarize
    #[arg(value_name = "URL")]
    pub url: String,

    /// Groq API key; falls back to the GROQ_API_KEY environment variable
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Model used for summarization
    #[arg(short, long)]
    pub model: Option<String>,

    /// Sampling temperature, between 0.0 and 1.0
    #[arg(short, long, default_value_t = 0.3, value_parser = parse_temperature)]
    pub temperature: f32,

    /// Maximum tokens in the generated summary
    #[arg(long, default_value_t = 512, value_parser = clap::value_parser!(u32).range(100..=2048))]
    pub max_tokens: u32,

    /// Reject video identifiers containing unusual characters
    #[arg(long)]
    pub strict_video_ids: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_temperature(s: &str) -> std::result::Result<f32, String> {
    let value: f32 = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("temperature must be between 0.0 and 1.0, got {}", value))
    }
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        let api_key = self
            .api_key
            .clone()
            .or_else(Config::api_key_from_env)
            .context("no API key given; pass --api-key or set GROQ_API_KEY")?;

        let mut config = Config::default();
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        config.strict_video_ids = self.strict_video_ids;

        if self.verbose {
            println!("Verbose mode enabled");
        }

        println!("Summarizing: {}", self.url);
        println!("Model: {}", config.model);

        let fetch_timeout = Duration::from_secs(config.fetch_timeout);
        let summarizer = GroqSummarizer::new(Duration::from_secs(config.llm_timeout));

        let mut pipeline = SummaryPipeline::new(config.clone(), Box::new(summarizer));
        pipeline.register_extractor(Box::new(TranscriptExtractor::new(fetch_timeout)));
        pipeline.register_extractor(Box::new(WebPageExtractor::new(
            fetch_timeout,
            &config.user_agent,
        )));

        let request = SummarizeRequest {
            url: self.url.clone(),
            api_key: SecretString::from(api_key),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        match pipeline.run(request).await {
            Ok(result) => {
                println!();
                match result.source {
                    SourceKind::Video => println!("YouTube video summary:"),
                    SourceKind::Website => println!("Website summary:"),
                }
                println!("{}", result.summary);
                if result.truncated {
                    println!();
                    println!("Note: the source text was truncated before summarization.");
                }
                Ok(())
            }
            Err(err) => {
                if let PipelineError::TranscriptUnavailable(_) = &err {
                    eprintln!("Possible reasons:");
                    eprintln!("  - No transcript available");
                    eprintln!("  - Video might be private or age-restricted");
                    eprintln!("  - Transcript generation failed");
                }
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_bounds() {
        assert!(parse_temperature("0.0").is_ok());
        assert!(parse_temperature("1.0").is_ok());
        assert!(parse_temperature("0.3").is_ok());
        assert!(parse_temperature("1.5").is_err());
        assert!(parse_temperature("-0.1").is_err());
        assert!(parse_temperature("warm").is_err());
    }
}
