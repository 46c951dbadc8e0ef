use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pocket_recipe_core::{
    application::create_recipe_extractor,
    domain::{
        common::LLMConfig,
        recipe_extraction::{
            entities::{ExtractionModel, ExtractionOutcome, ImageOptions},
            ports::RecipeExtractionService,
            value_objects::mime_type_for_path,
        },
    },
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "recipe-extract",
    version,
    about = "Extract a structured recipe from a photo with Gemini"
)]
struct Cli {
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: String,

    /// Timeout of one model request, in seconds.
    #[arg(long, env = "GEMINI_TIMEOUT_SECS", default_value_t = 120)]
    timeout_secs: u64,

    #[arg(
        long,
        env = "GEMINI_API_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com",
        hide = true
    )]
    api_base_url: String,

    #[arg(long, env = "LOG_FILTER", default_value = "warn")]
    log_filter: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract a recipe from an image file.
    Extract {
        image: PathBuf,

        #[arg(long, default_value = "flash", value_parser = ExtractionModel::CHOICES)]
        model: String,

        #[arg(long, default_value_t = 1600)]
        max_width: u32,

        #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: u8,
    },
    /// List models that support content generation.
    ListModels,
}

fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }
}

fn print_outcome(outcome: &ExtractionOutcome) -> Result<(), anyhow::Error> {
    let stats = &outcome.image;
    println!("Original size:  {}", format_size(stats.original_size));
    if stats.optimized {
        println!(
            "Optimized size: {} ({:.1}% smaller)",
            format_size(stats.optimized_size),
            stats.reduction_percent()
        );
    } else {
        println!("Optimization skipped, sending original bytes");
    }
    println!("MIME type:      {}", stats.mime_type);
    println!("Model time:     {:.2}s", outcome.elapsed.as_secs_f64());
    println!();

    let Some(recipe) = &outcome.recipe else {
        println!("Could not parse JSON from the model response. Raw response:");
        println!("{}", outcome.raw_text);
        return Ok(());
    };

    println!("{}", serde_json::to_string_pretty(recipe.as_value())?);
    println!();
    println!("Title:       {}", recipe.title().unwrap_or("(none)"));
    println!("Ingredients: {}", recipe.ingredient_count());
    println!("Steps:       {}", recipe.step_count());
    println!("Confidence:  {}", recipe.confidence().unwrap_or("(unknown)"));

    let issues = recipe.issues();
    if !issues.is_empty() {
        println!("Issues:");
        for issue in issues {
            println!("  - {}", issue);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::from_filename(".env.local").ok();
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&cli.log_filter).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let extractor = create_recipe_extractor(LLMConfig {
        gemini_api_key: cli.gemini_api_key,
        api_base_url: cli.api_base_url,
        request_timeout_secs: cli.timeout_secs,
    })?;

    match cli.command {
        Command::Extract {
            image,
            model,
            max_width,
            quality,
        } => {
            let model: ExtractionModel = model.parse()?;
            let bytes = tokio::fs::read(&image).await?;
            let mime_type = mime_type_for_path(&image);

            println!("Image: {}", image.display());
            println!("Model: {}", model.model_name());

            let outcome = extractor
                .extract_recipe(
                    bytes,
                    mime_type.to_string(),
                    model,
                    ImageOptions { max_width, quality },
                )
                .await?;

            print_outcome(&outcome)?;
        }
        Command::ListModels => {
            for model in extractor.list_models().await? {
                println!(
                    "{}\t{}\t{}",
                    model.short_name(),
                    model.display_name.as_deref().unwrap_or(""),
                    model.supported_generation_methods.join(", ")
                );
            }
        }
    }

    Ok(())
}
