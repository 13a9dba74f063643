//! soko CLI - command-line client for the daemon's HTTP API

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Deserialize;
use tabled::Tabled;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Parser)]
#[command(name = "oj")]
#[command(about = "soko job engine CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Daemon API base URL
    #[arg(long, env = "SOKO_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Trigger a flow run
    Run {
        /// Flow id, e.g. "project.build"
        flow_id: String,
    },

    /// Show a job's current state and output
    Status {
        /// Job id returned by `run`
        job_id: String,
    },

    /// Check daemon connectivity
    Ping,
}

#[derive(Deserialize, Tabled)]
struct StepResultRow {
    input: String,
    output: String,
}

#[derive(Deserialize)]
struct JobResponse {
    id: String,
    flow: String,
    state: String,
    output: Vec<StepResultRow>,
}

async fn get_json<T: for<'de> Deserialize<'de>>(url: &str) -> Result<(reqwest::StatusCode, Option<T>)> {
    let response = reqwest::get(url).await.context("failed to connect to daemon")?;
    let status = response.status();
    if status.is_success() {
        let body = response.json::<T>().await.context("failed to parse response")?;
        Ok((status, Some(body)))
    } else {
        Ok((status, None))
    }
}

async fn post_json<T: for<'de> Deserialize<'de>>(url: &str) -> Result<(reqwest::StatusCode, Option<T>)> {
    let client = reqwest::Client::new();
    let response = client.post(url).send().await.context("failed to connect to daemon")?;
    let status = response.status();
    if status.is_success() {
        let body = response.json::<T>().await.context("failed to parse response")?;
        Ok((status, Some(body)))
    } else {
        Ok((status, None))
    }
}

fn print_job(job: &JobResponse) {
    println!("  {} {}", "Id:".bold(), job.id);
    println!("  {} {}", "Flow:".bold(), job.flow);
    let colored_state = match job.state.as_str() {
        "succeeded" => job.state.green(),
        "failed" => job.state.red(),
        "running" => job.state.yellow(),
        _ => job.state.normal(),
    };
    println!("  {} {}", "State:".bold(), colored_state);
    println!();
    if !job.output.is_empty() {
        println!("{}", tabled::Table::new(&job.output));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { flow_id } => {
            let url = format!("{}/api/flows/{}/run", cli.api_url, flow_id);
            let (status, job) = post_json::<JobResponse>(&url).await?;
            if status == reqwest::StatusCode::NOT_FOUND {
                println!("{}", "Flow not found".red().bold());
                return Ok(());
            }
            let job = job.ok_or_else(|| anyhow::anyhow!("unexpected response ({status})"))?;
            println!("{}", "Job started".green().bold());
            print_job(&job);
        }

        Commands::Status { job_id } => {
            let url = format!("{}/api/jobs/{}", cli.api_url, job_id);
            let (status, job) = get_json::<JobResponse>(&url).await?;
            if status == reqwest::StatusCode::NOT_FOUND {
                println!("{}", "Job not found".red().bold());
                return Ok(());
            }
            let job = job.ok_or_else(|| anyhow::anyhow!("unexpected response ({status})"))?;
            print_job(&job);
        }

        Commands::Ping => {
            let url = format!("{}/api/ping", cli.api_url);
            match reqwest::get(&url).await {
                Ok(resp) if resp.status().is_success() => {
                    println!("{} {}", "soko daemon:".bold(), "ONLINE".green());
                }
                Ok(resp) => {
                    println!("{} {}", "soko daemon:".bold(), format!("HTTP {}", resp.status()).red());
                }
                Err(e) => {
                    println!("{} {}", "soko daemon:".bold(), "UNREACHABLE".red());
                    println!("  {} {}", "Error:".bold(), e);
                }
            }
        }
    }

    Ok(())
}
