//! Minimal demo: show a message box and wait for the okay press

use anyhow::Result;
use casement::terminal::{init_terminal, restore_terminal};
use casement::{
    Backend, LayoutRegistry, MessageBoxEvent, MessageBoxFactory, Theme, WindowFactory,
    WindowManager,
};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::Terminal;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run() {
        error!("Demo error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "casement=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

fn run() -> Result<()> {
    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal);
    restore_terminal(&mut terminal)?;
    result
}

fn event_loop(terminal: &mut Terminal<Backend>) -> Result<()> {
    let theme = Theme::default();
    let manager = WindowManager::new();
    let mut factory = MessageBoxFactory::new(
        manager.clone(),
        WindowFactory::new(LayoutRegistry::builtin()),
    );

    let mut message_box = factory.create("Press Enter to acknowledge, or q to quit.")?;

    let acknowledged = Rc::new(Cell::new(false));
    {
        let acknowledged = Rc::clone(&acknowledged);
        message_box
            .observers()
            .subscribe::<MessageBoxEvent>(move |_| acknowledged.set(true));
    }

    loop {
        terminal.draw(|frame| manager.render(frame, &theme))?;

        if acknowledged.get() {
            info!("message box acknowledged");
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    _ => manager.handle_key_event(key)?,
                }
            }
        }
    }

    message_box.dispose();
    Ok(())
}
