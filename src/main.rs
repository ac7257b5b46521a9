//! scrollnorm - Scroll Delta Viewer
//!
//! Feeds terminal mouse and keyboard input through the normalizer and shows the
//! resulting scroll deltas and totals.

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use ratatui::crossterm::event;
use scrollnorm::host::TerminalHost;
use scrollnorm::viewer::{is_quit, ScrollView, TerminalViewer};
use scrollnorm::{Config, Normalizer, ScrollnormError};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const POLL_INTERVAL_MS: u64 = 100;

fn main() -> Result<()> {
    // Initialize logging for development
    env_logger::init();

    let matches = Command::new("scrollnorm")
        .version(scrollnorm::VERSION)
        .about("Shows normalized scroll deltas for terminal wheel, drag and key input")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Configuration file (defaults to the user config directory)"),
        )
        .arg(number_arg("mouse-multiplier", "Scale applied to wheel deltas"))
        .arg(number_arg("touch-multiplier", "Scale applied to drag deltas"))
        .arg(number_arg(
            "firefox-multiplier",
            "Extra scale for line-mode wheel deltas on quirky engines",
        ))
        .arg(number_arg("key-step", "Magnitude of one arrow key press"))
        .arg(number_arg("lines-per-notch", "Lines reported per wheel notch"))
        .arg(
            Arg::new("prevent-touch")
                .long("prevent-touch")
                .action(ArgAction::SetTrue)
                .help("Suppress the default action of drag moves"),
        )
        .get_matches();

    let config = build_config(&matches)?;
    let mut host = TerminalHost::new();
    if let Some(lines) = matches.get_one::<f64>("lines-per-notch") {
        if *lines <= 0.0 {
            return Err(ScrollnormError::invalid_argument(format!(
                "--lines-per-notch must be positive, got {lines}"
            ))
            .into());
        }
        host = host.with_lines_per_notch(*lines);
    }

    run(Normalizer::new(host, config))
}

fn number_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("N")
        .value_parser(clap::value_parser!(f64))
        .help(help)
}

#[cfg(feature = "config")]
fn base_config(matches: &ArgMatches) -> Result<Config> {
    match matches.get_one::<String>("config") {
        Some(path) => Ok(Config::load(std::path::Path::new(path))?),
        None => Ok(Config::load_default()?),
    }
}

#[cfg(not(feature = "config"))]
fn base_config(matches: &ArgMatches) -> Result<Config> {
    if matches.get_one::<String>("config").is_some() {
        anyhow::bail!("--config requires the `config` feature");
    }
    Ok(Config::default())
}

fn build_config(matches: &ArgMatches) -> Result<Config> {
    let mut config = base_config(matches)?;

    if let Some(value) = matches.get_one::<f64>("mouse-multiplier") {
        config = config.with_mouse_multiplier(*value);
    }
    if let Some(value) = matches.get_one::<f64>("touch-multiplier") {
        config = config.with_touch_multiplier(*value);
    }
    if let Some(value) = matches.get_one::<f64>("firefox-multiplier") {
        config = config.with_firefox_multiplier(*value);
    }
    if let Some(value) = matches.get_one::<f64>("key-step") {
        config = config.with_key_step(*value);
    }
    if matches.get_flag("prevent-touch") {
        config = config.with_prevent_touch(true);
    }

    config.validate()?;
    Ok(config)
}

fn run(mut normalizer: Normalizer<TerminalHost>) -> Result<()> {
    let view = Rc::new(RefCell::new(ScrollView::default()));
    let sink = Rc::clone(&view);
    normalizer.subscribe(move |event| {
        sink.borrow_mut().record(event);
        Ok(())
    });
    view.borrow_mut().bound = normalizer.host().attached_events();

    let mut viewer = TerminalViewer::new();
    viewer.initialize()?;

    let outcome = event_loop(&mut normalizer, &mut viewer, &view);

    normalizer.destroy();
    viewer.cleanup()?;
    outcome
}

fn event_loop(
    normalizer: &mut Normalizer<TerminalHost>,
    viewer: &mut TerminalViewer,
    view: &Rc<RefCell<ScrollView>>,
) -> Result<()> {
    loop {
        viewer.draw(&view.borrow())?;

        if !event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
            continue;
        }

        let terminal_event = event::read()?;
        if is_quit(&terminal_event) {
            return Ok(());
        }

        if let Some(raw) = normalizer.host().translate(&terminal_event) {
            let handled = normalizer.handle_event(&raw)?;
            log::trace!("{:?} -> {handled:?}", raw.event_type());
        }
    }
}
