//! Interactive link menu
//!
//! Terminal interface for browsing and opening the scanned links, built
//! with ratatui. Entries keep the color of their source file; `/` filters
//! by description, Enter opens the selection in the browser.

mod app;
mod event;
mod ui;

use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};

use super::output::Output;
use super::session::Session;
use app::App;
use event::EventHandler;

/// Launch the interactive menu
pub fn run(session: Session, output: &Output) -> Result<()> {
    output.verbose_ctx("menu", "initializing interactive menu");

    if session.registry.is_empty() {
        output.warn("no links found; nothing to browse");
        output.success("Add .dokk files with lines like: \"Team wiki\" -> \"https://wiki.example.com\"");
        return Ok(());
    }

    let mut terminal = ui::init_terminal()?;
    let mut app = App::new(session);
    let event_handler = EventHandler::new(250);

    // Run the main loop with panic safety so the terminal is always restored
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(&mut terminal, event_handler)
    }));

    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("menu panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("menu panicked: {}", s))
            } else {
                Err(anyhow!("menu panicked with unknown error"))
            }
        }
    }
}
