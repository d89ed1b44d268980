//! frontdesk CLI — salon receptionist control plane and escalation tools.
//!
//! ```text
//! frontdesk serve [--port 3000] [--host 127.0.0.1] [--request-ttl-mins 30]
//! frontdesk escalate "Can I book a haircut for 5pm?" --phone +15551234567 [--call-id room-42]
//! frontdesk simulate "What are your hours?" --phone +15551234567 [--server http://localhost:3000]
//! frontdesk requests [--pending] / resolve <id> <answer> / stats [--server ...]
//! ```

use std::time::Duration;

use clap::{Parser, Subcommand};

use frontdesk_lib::agent::AgentService;
use frontdesk_lib::frontdesk_core::types::{NotifierConfig, SalonContext};
use frontdesk_lib::notifier::{Escalate, EscalationNotifier};
use frontdesk_lib::server::{router, spawn_expiry};
use frontdesk_lib::store::{HelpRequestStore, KnowledgeStore};

/// Interval between sweeps for stale pending requests.
const EXPIRY_PERIOD: Duration = Duration::from_secs(5 * 60);

/// frontdesk — voice receptionist control plane for the salon
#[derive(Parser)]
#[command(name = "frontdesk", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the control-plane server
    Serve {
        /// Listen port
        #[arg(long, default_value = "3000")]
        port: u16,
        /// Listen host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Minutes before a pending request expires
        #[arg(long, default_value = "30")]
        request_ttl_mins: i64,
    },
    /// Escalate one question through the notifier and print the caller-facing reply
    Escalate {
        /// The customer's question
        question: String,
        /// Customer phone number for follow-up
        #[arg(long)]
        phone: String,
        /// Call / room identifier
        #[arg(long, default_value = "cli")]
        call_id: String,
        /// Control-plane function-call endpoint
        #[arg(long, default_value = "http://localhost:3000/api/agent/function-call")]
        endpoint: String,
    },
    /// Simulate an incoming call against the running server
    Simulate {
        /// What the caller says
        message: String,
        /// Caller phone number
        #[arg(long)]
        phone: String,
        /// Server URL
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
    },
    /// List help requests
    Requests {
        /// Only pending requests
        #[arg(long)]
        pending: bool,
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
    },
    /// Resolve a help request with an answer
    Resolve {
        /// Request id
        id: String,
        /// The supervisor's answer
        answer: String,
        /// Supervisor name
        #[arg(long, default_value = "Supervisor")]
        name: String,
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
    },
    /// Get dashboard stats
    Stats {
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            port,
            host,
            request_ttl_mins,
        } => {
            let service = AgentService::new(
                SalonContext::default(),
                HelpRequestStore::new(request_ttl_mins),
                KnowledgeStore::default(),
            );
            spawn_expiry(service.clone(), EXPIRY_PERIOD);

            let app = router(service);
            let addr = format!("{host}:{port}");
            eprintln!("frontdesk listening on {addr}");

            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .expect("failed to bind");

            axum::serve(listener, app).await.expect("server error");
        }

        Command::Escalate {
            question,
            phone,
            call_id,
            endpoint,
        } => {
            let notifier = EscalationNotifier::new(NotifierConfig {
                endpoint,
                ..Default::default()
            });
            let reply = notifier.escalate(&question, &phone, &call_id).await;
            println!("{reply}");
        }

        Command::Simulate {
            message,
            phone,
            server,
        } => {
            let resp = reqwest::Client::new()
                .post(format!("{server}/api/agent/simulate-call"))
                .json(&serde_json::json!({
                    "customerPhone": phone,
                    "customerMessage": message,
                }))
                .send()
                .await
                .expect("request failed");
            println!("{}", resp.text().await.unwrap_or_default());
        }

        Command::Requests { pending, server } => {
            let path = if pending {
                "/api/supervisor/requests/pending"
            } else {
                "/api/supervisor/requests"
            };
            get_simple(&server, path).await;
        }

        Command::Resolve {
            id,
            answer,
            name,
            server,
        } => {
            let resp = reqwest::Client::new()
                .post(format!("{server}/api/supervisor/requests/{id}/resolve"))
                .json(&serde_json::json!({
                    "answer": answer,
                    "supervisorName": name,
                }))
                .send()
                .await
                .expect("request failed");
            println!("{}", resp.text().await.unwrap_or_default());
        }

        Command::Stats { server } => get_simple(&server, "/api/supervisor/stats").await,
    }
}

async fn get_simple(server: &str, path: &str) {
    let resp = reqwest::Client::new()
        .get(format!("{server}{path}"))
        .send()
        .await
        .expect("request failed");
    println!("{}", resp.text().await.unwrap_or_default());
}
