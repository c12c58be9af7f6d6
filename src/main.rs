//! Type Master · terminal driver
//!
//! - One line per input: a shortcut key (F/G/H/D/J/R, Enter) or a command word
//! - One-second ticks drive the timed challenge
//! - Stats and preferences are written back after every change
//!
//! Important env variables:
//!   TYPEMASTER_CONFIG_PATH : path to TOML config (data_dir, dual_mode, show_feedback)
//!   TYPEMASTER_DATA_DIR    : overrides data_dir
//!   OUTPUT_FORMAT          : "text" (default) or "json"
//!   LOG_LEVEL              : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT             : "pretty" (default) or "json"

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, instrument};

use typemaster::config::{load_config_from_env, OutputFormat};
use typemaster::protocol::{parse_command, to_out, Command, Reply};
use typemaster::render::render_text;
use typemaster::state::{help_text, GameState};
use typemaster::store::{Persisted, Store};
use typemaster::telemetry;

#[instrument(level = "info", skip_all)]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = load_config_from_env();
  let format = OutputFormat::from_env();
  let store = Store::new(cfg.data_dir.clone());

  // A corrupt snapshot stops startup here.
  let persisted = store.load_all(cfg.show_feedback)?;
  info!(target: "typemaster_backend", data_dir = %store.dir().display(), score = persisted.stats.score, "Snapshots loaded");

  let mut state = GameState::new(persisted.clone(), cfg.dual_mode);
  let mut saved = persisted;

  let mut out = tokio::io::stdout();
  let welcome = vec![
    Reply::Help { text: help_text(&state.shortcuts) },
    Reply::Question { question: to_out(&state.question) },
  ];
  emit(&mut out, format, &welcome).await?;

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  let mut ticker = interval(Duration::from_secs(1));
  ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

  loop {
    tokio::select! {
      line = lines.next_line() => {
        let Some(line) = line? else { break };
        let replies = match parse_command(&line) {
          Ok(Command::Quit) => break,
          Ok(cmd) => {
            let restarts_clock = matches!(cmd, Command::StartChrono(_));
            let replies = state.handle(cmd);
            if restarts_clock {
              ticker.reset();
            }
            replies
          }
          Err(message) => vec![Reply::Error { message }],
        };
        emit(&mut out, format, &replies).await?;
        saved = write_back(&store, &state, saved);
      }
      _ = ticker.tick() => {
        if let Some(reply) = state.tick() {
          emit(&mut out, format, &[reply]).await?;
        }
      }
      _ = tokio::signal::ctrl_c() => break,
    }
  }

  info!(target: "typemaster_backend", score = state.stats.score, "Shutting down");
  Ok(())
}

/// Persist whatever changed since the last successful write.
fn write_back(store: &Store, state: &GameState, saved: Persisted) -> Persisted {
  let current = state.persisted();
  if current == saved {
    return saved;
  }
  match store.save_all(&current) {
    Ok(()) => current,
    Err(e) => {
      error!(target: "typemaster_backend", error = %e, "Failed to write snapshots");
      saved
    }
  }
}

async fn emit(out: &mut tokio::io::Stdout, format: OutputFormat, replies: &[Reply]) -> std::io::Result<()> {
  for reply in replies {
    let text = match format {
      OutputFormat::Text => render_text(reply),
      OutputFormat::Json => serde_json::to_string(reply).unwrap_or_else(|e| {
        serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
      }),
    };
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
  }
  out.flush().await
}
