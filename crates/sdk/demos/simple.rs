//! Simple SDK Demo
//!
//! Demonstrates basic usage of the soko SDK.
//!
//! # Usage
//!
//! 1. Start the daemon:
//!    ```bash
//!    cargo run --package soko-daemon
//!    ```
//!
//! 2. Run this demo:
//!    ```bash
//!    cargo run --package soko-sdk --bin simple
//!    ```

use soko_sdk::SokoClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("soko SDK - Simple Demo");
    println!("======================\n");

    let client = SokoClient::new("http://127.0.0.1:8000");

    println!("1. Pinging daemon...");
    client.ping().await?;
    println!("   ✓ Online\n");

    println!("2. Running flow 'project.build'...");
    let job = client.run_flow("project.build").await?;
    println!("   ✓ Job started: {} (state: {})\n", job.id, job.state);

    println!("3. Waiting 2 seconds...");
    tokio::time::sleep(tokio::time::Duration::from_secs(2)).await;

    println!("4. Fetching job status...");
    let job = client.get_job(&job.id).await?;
    println!("   ✓ State: {}", job.state);
    for step in &job.output {
        println!("     - {} -> {}", step.input, step.output);
    }

    Ok(())
}
