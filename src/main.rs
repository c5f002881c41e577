//! Quote wizard terminal host.
//!
//! Entry point. Loads configuration, initialises structured logging, then
//! feeds stdin commands into a single wizard session one at a time,
//! printing the control state after every event. On completion the payload
//! goes to the configured handoff transport and the process exits.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use quote_wizard::config::AppConfig;
use quote_wizard::handoff::{self, HandoffReceipt};
use quote_wizard::types::{DesignTier, ProjectType};
use quote_wizard::wizard::step::Step;
use quote_wizard::wizard::WizardSession;

const BANNER: &str = r#"
  ___              _         __        ___                  _
 / _ \ _   _  ___ | |_ ___   \ \      / (_)______ _ _ __ __| |
| | | | | | |/ _ \| __/ _ \   \ \ /\ / /| |_  / _` | '__/ _` |
| |_| | |_| | (_) | ||  __/    \ V  V / | |/ / (_| | | | (_| |
 \__\_\\__,_|\___/ \__\___|     \_/\_/  |_/___\__,_|_|  \__,_|
"#;

const HELP: &str = "\
commands:
  pick <field> <value>   choose an option (type, design)
  set <field> <value>    enter a value (pages, name, phone, email)
  next                   continue / submit on the last step
  back                   previous step
  status                 show current selection
  quit                   leave without submitting";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let config_path = AppConfig::path_from_env();
    let cfg = AppConfig::load_or_default(&config_path)?;

    println!("{BANNER}");
    info!(
        config = %config_path,
        transport = ?cfg.handoff.transport,
        destination = %cfg.handoff.destination,
        enforce_email = cfg.wizard.enforce_email_format,
        "Quote wizard starting"
    );

    let mut session = WizardSession::from_config(&cfg)?;
    let sink = handoff::build_sink(&cfg.handoff)?;

    println!("{HELP}\n");
    print_prompt(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed, leaving without submitting");
                    break;
                };
                match handle_command(&mut session, sink.as_ref(), line.trim()) {
                    Flow::Continue => print_prompt(&session),
                    Flow::Done => break,
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received.");
                break;
            }
        }
    }

    Ok(())
}

enum Flow {
    Continue,
    Done,
}

/// Apply one user command to the session.
fn handle_command(
    session: &mut WizardSession,
    sink: &dyn handoff::HandoffSink,
    line: &str,
) -> Flow {
    let mut parts = line.splitn(3, ' ');
    let command = parts.next().unwrap_or_default();

    match command {
        "pick" | "set" => {
            let (Some(field), value) = (parts.next(), parts.next().unwrap_or_default()) else {
                println!("usage: {command} <field> <value>");
                return Flow::Continue;
            };
            if let Err(e) = session.set_field_by_name(field, value.trim()) {
                println!("{e}");
            }
        }
        "next" => match session.advance_with(sink) {
            Ok(Some(receipt)) => {
                if let Some(quote) = session.quote() {
                    println!("\nEstimated price: {} - {}", quote.min, quote.max);
                }
                match receipt {
                    HandoffReceipt::Redirect { url } => println!("Continue at: {url}"),
                    HandoffReceipt::Written { path } => {
                        println!("Request saved to {}", path.display())
                    }
                }
                return Flow::Done;
            }
            Ok(None) => {}
            Err(e) => {
                error!(error = %e, "Could not hand off quote request");
                println!("Submission failed: {e}. Try again with `next`.");
            }
        },
        "back" => {
            session.retreat();
        }
        "status" => {
            let s = session.selection();
            println!(
                "type={:?} pages={:?} design={:?} name={:?} phone={:?} email={:?}",
                s.project_type, s.page_count, s.design_tier, s.contact_name, s.contact_phone,
                s.contact_email,
            );
        }
        "help" => println!("{HELP}"),
        "quit" | "exit" => return Flow::Done,
        "" => {}
        other => {
            warn!(command = other, "Unknown command");
            println!("unknown command `{other}`, try `help`");
        }
    }

    Flow::Continue
}

/// Print the current step and the state of the navigation controls.
fn print_prompt(session: &WizardSession) {
    let controls = session.controls();
    let filled = (controls.progress_percent / 10.0).round() as usize;

    println!(
        "\n[{}{}] step {}",
        "#".repeat(filled),
        ".".repeat(10 - filled),
        controls.step
    );

    match controls.step {
        Step::ProjectType => {
            let options: Vec<_> = ProjectType::ALL
                .iter()
                .map(|t| format!("{} ({})", t.key(), t.label()))
                .collect();
            println!("  pick type <{}>", options.join(" | "));
        }
        Step::PageCount => println!("  set pages <number>  (first 5 included)"),
        Step::DesignTier => {
            let options: Vec<_> = DesignTier::ALL.iter().map(|t| t.key()).collect();
            println!("  pick design <{}>", options.join(" | "));
        }
        Step::Contact => println!("  set name <..> / set phone <..> / set email <..> (optional)"),
    }

    let back = if controls.back_visible { "[back] " } else { "" };
    let forward = if controls.forward_enabled {
        format!("[{}]", controls.forward_label)
    } else {
        format!("({} disabled)", controls.forward_label)
    };
    println!("  {back}{forward}");
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("quote_wizard=info"));

    let json_logging = std::env::var("QUOTE_WIZARD_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
