//! Manual testing tool for a running relay.
//!
//! Simulates GitHub webhook calls against a deployed or local server:
//! a health-check GET, a POST with a bad signature (expected to be
//! rejected), and, when a secret is supplied, a correctly signed
//! pull_request/opened delivery that should land in the Discord channel.
//!
//! Usage:
//!   gitbot-webhook-test <url> [secret]
//!
//! Examples:
//!   gitbot-webhook-test http://localhost:3000/webhooks/github
//!   gitbot-webhook-test https://relay.example.com/webhooks/github your-secret

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use hmac::{Hmac, Mac};
use reqwest::{Client, StatusCode};
use sha2::Sha256;

fn sign(secret: &str, body: &[u8]) -> String {
    // Any key length is accepted, so new_from_slice cannot fail here.
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("hmac accepts any key length");
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

async fn check_health(client: &Client, url: &str) -> Result<bool> {
    println!("\nTest 1: health check (GET {url})");

    let response = client.get(url).send().await.context("request failed")?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    println!("  status: {status}");
    println!("  response: {body}");

    if status == StatusCode::OK {
        println!("  ok: health check passed");
        Ok(true)
    } else {
        println!("  FAIL: expected 200");
        Ok(false)
    }
}

async fn check_invalid_signature(client: &Client, url: &str) -> Result<bool> {
    println!("\nTest 2: invalid signature (POST {url})");

    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .header("X-GitHub-Event", "ping")
        .header("X-Hub-Signature-256", "sha256=invalid")
        .body(r#"{"test":"data"}"#)
        .send()
        .await
        .context("request failed")?;

    let status = response.status();
    println!("  status: {status}");

    if status == StatusCode::UNAUTHORIZED {
        println!("  ok: invalid signature rejected");
        Ok(true)
    } else {
        println!("  FAIL: expected 401");
        Ok(false)
    }
}

async fn check_valid_webhook(client: &Client, url: &str, secret: &str) -> Result<bool> {
    println!("\nTest 3: signed pull_request/opened (POST {url})");

    let payload = serde_json::json!({
        "action": "opened",
        "pull_request": {
            "title": "Test PR from webhook tester",
            "html_url": "https://github.com/test/repo/pull/1",
            "user": { "login": "test-user" },
            "base": { "ref": "main" },
            "head": { "ref": "test-branch" }
        },
        "repository": { "full_name": "test/repo" }
    });
    let body = serde_json::to_vec(&payload).context("failed to serialize payload")?;
    let signature = sign(secret, &body);

    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .header("X-GitHub-Event", "pull_request")
        .header("X-Hub-Signature-256", signature)
        .body(body)
        .send()
        .await
        .context("request failed")?;

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    println!("  status: {status}");
    println!("  response: {text}");

    if status == StatusCode::OK {
        println!("  ok: webhook accepted, check the Discord channel for the notification");
        Ok(true)
    } else {
        println!("  FAIL: expected 200");
        Ok(false)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let mut args = std::env::args().skip(1);
    let Some(url) = args.next() else {
        eprintln!("Usage: gitbot-webhook-test <url> [secret]");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  gitbot-webhook-test http://localhost:3000/webhooks/github");
        eprintln!("  gitbot-webhook-test https://relay.example.com/webhooks/github your-secret");
        return Ok(ExitCode::FAILURE);
    };
    let secret = args.next();

    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .context("failed to build http client")?;

    let mut results = vec![
        check_health(&client, &url).await?,
        check_invalid_signature(&client, &url).await?,
    ];

    match secret {
        Some(secret) => results.push(check_valid_webhook(&client, &url, &secret).await?),
        None => println!("\nTest 3: signed pull_request/opened - skipped (no secret provided)"),
    }

    let passed = results.iter().filter(|r| **r).count();
    println!("\nResults: {passed}/{} passed", results.len());

    if passed == results.len() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
