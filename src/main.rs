// PROMPTOID Main Entry Point
// Copyright (c) 2026 Xing_The_Creator | PROMPTOID

use promptoid_core::diff::prompt_diff;
use promptoid_core::engine::capabilities::ModelHub;
use promptoid_core::engine::pipeline::PromptEngine;
use promptoid_core::engine::recommender::HistoryRecommender;
use promptoid_core::engine::selector::{PromptSelector, Provenance};
use promptoid_core::engine::trace::TracingSink;
use promptoid_core::engine::EngineConfig;
use promptoid_core::history::{HistoryEntry, HistoryLog};
use promptoid_core::renderer::RenderBridge;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "promptoid-core")]
#[command(about = "PROMPTOID Prompt-to-Video Kernel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive prompt session (describe, review, edit, render)
    Run,

    /// Generate a single prompt and print it as JSON
    Generate {
        /// Free-form description of the desired video
        #[arg(short, long)]
        input: String,

        /// Optional style hint to bias the tone
        #[arg(short, long, default_value = "")]
        style: String,
    },

    /// Rank past sessions against an input
    Recommend {
        /// Free-form description to match against history
        #[arg(short, long)]
        input: String,

        /// Number of candidates to keep
        #[arg(short = 'n', long, default_value = "1")]
        top_n: usize,

        /// Minimum cosine similarity
        #[arg(short, long, default_value = "0.75")]
        threshold: f32,
    },

    /// Show recent history entries
    History {
        /// Number of entries to show, newest first
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = EngineConfig::from_env();

    match cli.command {
        Commands::Run => run_session(&config).await?,

        Commands::Generate { input, style } => {
            let hub = ModelHub::connect(&config)?;
            let engine = PromptEngine::new(hub, Arc::new(TracingSink));
            let prompt = engine.generate(&input, &style).await?;
            println!("{}", serde_json::to_string_pretty(&prompt)?);
        }

        Commands::Recommend {
            input,
            top_n,
            threshold,
        } => {
            let hub = ModelHub::connect(&config)?;
            let recommender = HistoryRecommender::new(
                hub.encoder.clone(),
                hub.qa.clone(),
                HistoryLog::new(&config.history_path),
            );
            let candidates = recommender.recommend(&input, top_n, threshold).await?;
            if candidates.is_empty() {
                println!("No past session at or above threshold {threshold}.");
            }
            for candidate in candidates {
                println!("{:.3}  {}", candidate.score, candidate.style);
            }
        }

        Commands::History { limit } => {
            let log = HistoryLog::new(&config.history_path);
            for entry in log.load().iter().rev().take(limit) {
                println!("[{}] {}", entry.timestamp, entry.input);
                println!("    -> {}", entry.auto_korean_prompt);
            }
        }
    }
    Ok(())
}

/// Interactive loop: the terminal counterpart of the original web shell.
/// The shell owns history writes and the render hand-off; the engine
/// only ever reads history.
async fn run_session(config: &EngineConfig) -> Result<()> {
    let hub = ModelHub::connect(config)?;
    let engine = PromptEngine::new(hub.clone(), Arc::new(TracingSink));
    let recommender = HistoryRecommender::new(
        hub.encoder.clone(),
        hub.qa.clone(),
        HistoryLog::new(&config.history_path),
    );
    let selector = PromptSelector::new(engine, recommender, config.similarity_threshold);
    let log = HistoryLog::new(&config.history_path);
    let renderer = RenderBridge::from_env();

    println!("PROMPTOID ready. Describe the video you want (exit to quit).");
    let stdin = io::stdin();
    loop {
        print!("영상 설명> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() || input == "exit" || input == "quit" {
            break;
        }

        let (prompt, provenance) = selector.select(input).await?;
        match provenance {
            Provenance::Recommended => {
                println!("과거 유사 이력 기반으로 프롬프트가 추천되었습니다.")
            }
            Provenance::Generated => {
                println!("새로운 입력에 따라 프롬프트가 생성되었습니다.")
            }
        }
        println!("자동 생성된 프롬프트: {}", prompt.auto_prompt);
        if !prompt.components.style_hint.is_empty() {
            println!("반영된 분위기 스타일: {}", prompt.components.style_hint);
        }

        print!("최종 프롬프트 (엔터 = 그대로 사용)> ");
        io::stdout().flush()?;
        let mut edit = String::new();
        stdin.lock().read_line(&mut edit)?;
        let edited = if edit.trim().is_empty() {
            prompt.auto_prompt.clone()
        } else {
            edit.trim().to_string()
        };

        let diff_text = prompt_diff(&prompt.auto_prompt, &edited);
        println!("프롬프트 변경 내용: {}", diff_text);

        log.append(HistoryEntry {
            input: input.to_string(),
            auto_korean_prompt: prompt.auto_prompt.clone(),
            edited_korean_prompt: edited.clone(),
            diff_text,
            timestamp: String::new(),
        })?;

        let artifact = renderer.render(&edited).await?;
        info!("[SHELL] Render hand-off complete: {:?}", artifact);
    }
    Ok(())
}
