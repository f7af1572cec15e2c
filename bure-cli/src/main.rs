//! `bure`: ask the recipe agent for one recipe and print it as JSON.
//!
//! Credentials come from the environment (a `.env` file in the working
//! directory is loaded first): `MISTRAL_API_KEY`, `LLM_MODEL`,
//! `TAVILY_API_KEY`.

use std::path::PathBuf;

use anyhow::{bail, Context};
use bure_agent::{AgentConfig, RecipeAgent};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bure", about = "Find or invent a recipe for a free-text request", version)]
struct Cli {
    /// What you want to cook, e.g. "хочу пасту болоньезе без томатной пасты"
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,

    /// Directory with classify.txt, generate_recipe_with_ingredients.txt and search_for_recipe.txt
    #[arg(long, env = "BURE_PROMPTS_DIR")]
    prompts_dir: Option<PathBuf>,

    /// Pretty-print the recipe
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut config = AgentConfig::from_env().context("reading agent configuration")?;
    if let Some(dir) = cli.prompts_dir {
        config = config.with_prompts_dir(dir);
    }
    let agent = RecipeAgent::from_config(config).context("building the recipe agent")?;

    let query = cli.query.join(" ");
    let Some(recipe) = agent.invoke(&query).await else {
        bail!("no recipe could be produced for {query:?}");
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&recipe)?
    } else {
        serde_json::to_string(&recipe)?
    };
    println!("{rendered}");
    Ok(())
}
