use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

use roundtable::cli::{parse_args, run_cli_command, CliCommand};
use roundtable::config::ClientConfig;
use roundtable::logging;
use roundtable::terminal::{setup_panic_hook, TerminalManager};
use roundtable::{ui, App, AppMessage, ChatClient};

/// Frame interval for animations (spinner, cursor blink).
const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = parse_args(std::env::args());
    let config = args.overrides.apply(ClientConfig::from_env());
    if args.command.needs_backend() {
        config.validate()?;
    }
    logging::init(&config);

    let runtime = tokio::runtime::Runtime::new()?;

    if args.command != CliCommand::RunTui {
        if let Some(result) = runtime.block_on(run_cli_command(&args.command, &config)) {
            return result;
        }
    }

    // Installed after color_eyre so the terminal is restored before its report prints
    setup_panic_hook();

    let client = ChatClient::from_config(&config);
    let mut app = App::new(client, config.session_id.as_str());
    info!(base_url = %config.base_url, session_id = %config.session_id, "Starting TUI");

    let mut manager = TerminalManager::new()?;
    let size = manager.terminal().size()?;
    app.update_terminal_dimensions(size.width, size.height);

    let result = runtime.block_on(run_app(manager.terminal(), &mut app));
    manager.restore()?;
    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        // Draw only when needed (dirty flag or streaming)
        if app.needs_redraw || app.is_streaming() {
            terminal.draw(|f| ui::render(f, &mut *app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            _ = tokio::time::sleep(TICK) => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Resize(width, height))) => {
                        app.update_terminal_dimensions(width, height);
                    }
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Paste(text))) => app.handle_paste(&text),
                    Some(Ok(Event::Mouse(mouse))) => app.handle_mouse(mouse),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    // Input closed
                    None => app.quit(),
                }
            }

            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                }
            }
        }

        if app.should_quit {
            info!("Quitting");
            return Ok(());
        }
    }
}
