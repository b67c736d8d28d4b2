use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cli::{import, server};
use recommender_core::assist;
use recommender_core::config;
use recommender_core::context::AppContext;
use std::net::SocketAddr;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;
    let ctx = AppContext::open(cfg).await?;

    match cli.command {
        Commands::Recommend {
            question_id,
            topk,
            json,
            scores,
        } => run_recommend(&ctx, &question_id, topk, json, scores).await,
        Commands::Serve { bind } => {
            let addr: SocketAddr = bind
                .unwrap_or_else(|| ctx.config.server.bind.clone())
                .parse()
                .context("invalid bind address")?;
            server::start_server(ctx, addr).await
        }
        Commands::Import { file, json } => {
            let summary = import::import_file(&ctx.store, &file).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "imported {} questions, {} answers",
                    summary.questions, summary.answers
                );
            }
            Ok(())
        }
        Commands::Tags { text } => {
            let tags = assist::suggest_tags(&text, &ctx.registry).await?;
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "tags": tags }))?);
            Ok(())
        }
        Commands::Summarize { question, answers } => {
            let mut answers = answers;
            if let Some(id) = question {
                answers.extend(ctx.store.fetch_answers(&id).await?);
            }
            let summary = assist::summarize_answers(&answers, &ctx.registry).await?;
            println!("{}", summary);
            Ok(())
        }
        Commands::Rephrase { title, description } => {
            let rephrased = assist::rephrase_question(&title, &description, &ctx.registry).await?;
            println!("{}", serde_json::to_string_pretty(&rephrased)?);
            Ok(())
        }
    }
}

#[derive(Parser)]
#[command(name = "qa-recommender")]
#[command(about = "Related-question recommendations and LLM text helpers", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend questions related to the given one
    Recommend {
        question_id: String,
        /// Number of results (defaults to recommend.top_k)
        #[arg(short, long)]
        topk: Option<usize>,
        /// Output JSON
        #[arg(long)]
        json: bool,
        /// Include similarity scores
        #[arg(long, default_value_t = false)]
        scores: bool,
    },
    /// Run the HTTP server
    Serve {
        /// Listen address, overrides server.bind
        #[arg(long)]
        bind: Option<String>,
    },
    /// Load questions (and answers) from a JSON array file
    Import {
        file: PathBuf,
        /// Output JSON summary
        #[arg(long)]
        json: bool,
    },
    /// Suggest tags for a question text
    Tags { text: String },
    /// Summarize answers given inline and/or stored for a question
    Summarize {
        /// Question whose stored answers are included
        #[arg(long)]
        question: Option<String>,
        answers: Vec<String>,
    },
    /// Rephrase a question title and description
    Rephrase {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
}

async fn run_recommend(
    ctx: &AppContext,
    question_id: &str,
    topk: Option<usize>,
    json: bool,
    scores: bool,
) -> Result<()> {
    let top_k = topk.unwrap_or(ctx.recommender.default_top_k());
    let results = ctx.recommender.recommend_scored(question_id, top_k).await?;
    if json {
        let out = if scores {
            serde_json::to_value(&results)?
        } else {
            serde_json::to_value(results.iter().map(|r| &r.id).collect::<Vec<_>>())?
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if results.is_empty() {
        println!("no recommendations for {question_id}");
    } else {
        for r in &results {
            if scores {
                println!("{}\t{:.4}", r.id, r.score);
            } else {
                println!("{}", r.id);
            }
        }
    }
    Ok(())
}
