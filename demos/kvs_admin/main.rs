use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use linstor_client::{BatchOutcome, LinstorClient, Notification, PropsModify};

/// Inspect and edit the LINSTOR key-value store.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Controller URL.
    #[arg(long, env = "LINSTOR_CONTROLLER", default_value = "http://localhost:3370")]
    controller: String,

    /// Accept self-signed controller certificates.
    #[arg(long, env = "LINSTOR_INSECURE")]
    insecure: bool,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every instance.
    List,
    /// Print the keys of one instance.
    Get { instance: String },
    /// Set keys, given as KEY=VALUE.
    Set {
        instance: String,
        #[arg(required = true, value_parser = parse_pair)]
        pairs: Vec<(String, String)>,
    },
    /// Delete keys from an instance.
    Unset {
        instance: String,
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Delete a whole instance.
    Drop { instance: String },
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let cli = Cli::parse();

    let client = LinstorClient::builder()
        .controller_url(&cli.controller)
        .accept_invalid_certs(cli.insecure)
        .timeout(Duration::from_secs(cli.timeout))
        .notifier(Arc::new(|body: &serde_json::Value| {
            for notification in Notification::from_body(body) {
                eprintln!("[{:?}] {notification}", notification.level);
            }
        }))
        .build()?;

    let kvs = client.key_value_store();
    match cli.command {
        Command::List => {
            for store in kvs.list().await? {
                println!("{} ({} keys)", store.name, store.props.len());
            }
        }
        Command::Get { instance } => match kvs.get(&instance).await? {
            Some(store) => {
                for (key, value) in &store.props {
                    println!("{key:<40} {value}");
                }
                if let Some(updated) = store.updated_at() {
                    println!("\nLast updated {updated}");
                }
            }
            None => println!("Instance '{instance}' is empty."),
        },
        Command::Set { instance, pairs } => {
            let modify = pairs
                .into_iter()
                .fold(PropsModify::new(), |modify, (key, value)| modify.set(key, value));
            report(kvs.modify(&instance, modify).await?.outcome());
        }
        Command::Unset { instance, keys } => {
            let modify = keys.into_iter().fold(PropsModify::new(), PropsModify::delete);
            report(kvs.modify(&instance, modify).await?.outcome());
        }
        Command::Drop { instance } => report(kvs.delete(&instance).await?.outcome()),
    }

    Ok(())
}

fn report(outcome: BatchOutcome) {
    match outcome {
        BatchOutcome::Success => println!("Done."),
        BatchOutcome::Partial => println!("Done, with errors."),
        BatchOutcome::Failure | BatchOutcome::Unknown => println!("Failed."),
    }
}
