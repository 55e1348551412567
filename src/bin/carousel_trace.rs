//! `carousel_trace` - headless carousel walkthrough
//!
//! Mounts a carousel of numbered cards, runs a script of navigation steps and
//! prints the visible viewport as text after every step, before and after the
//! transition settles.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin carousel_trace -- --items 10 --show 6 --script pppn
//! cargo run --bin carousel_trace -- --script "d-40 d-20 n" --events
//! ```

use card_carousel::{
    CardCarousel, CarouselOptions, Container, HeadlessSurface, ItemMetrics, PointerEvent, Track,
    render_viewport, set_event_callback,
};
use std::ffi::OsString;
use std::time::Duration;

// ============================================================================
// CLI Parsing
// ============================================================================

const HELP_TEXT: &str = "carousel_trace - headless carousel walkthrough

USAGE:
    carousel_trace [OPTIONS]

OPTIONS:
    -h, --help              Print this help message and exit
    --items <N>             Number of cards (default: 10)
    --show <N>              Cards visible at once (default: 6)
    --columns <N>           Text columns per card (default: 5)
    --script <STEPS>        Steps to run (default: \"pn\"):
                              n      advance
                              p      retreat
                              .<N>   jump to card N
                              d<PX>  drag by PX (negative = leftwards)
    --no-loop               Disable wraparound
    --events                Print lifecycle events to stderr

EXAMPLES:
    carousel_trace --script pppn
    carousel_trace --items 3 --show 6 --script nn
";

/// One scripted step.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Step {
    Advance,
    Retreat,
    Jump(usize),
    Drag(f32),
}

/// Walkthrough configuration.
#[derive(Clone, Debug, PartialEq)]
struct Config {
    items: usize,
    show: usize,
    columns: usize,
    script: Vec<Step>,
    loop_enabled: bool,
    events: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            items: 10,
            show: 6,
            columns: 5,
            script: vec![Step::Retreat, Step::Advance],
            loop_enabled: true,
            events: false,
        }
    }
}

/// Result of CLI parsing.
enum ParseResult {
    Config(Config),
    Help,
    Error(String),
}

fn parse_count(flag: &str, value: Option<OsString>) -> Result<usize, String> {
    let value = value.ok_or_else(|| format!("{flag} requires a value"))?;
    let value = value.to_string_lossy();
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{flag} expects a positive integer, got '{value}'")),
    }
}

/// Parse a step script such as `"pp d-40 .3 n"`.
fn parse_script(script: &str) -> Result<Vec<Step>, String> {
    let mut steps = Vec::new();
    let mut chars = script.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            'n' => steps.push(Step::Advance),
            'p' => steps.push(Step::Retreat),
            '.' | 'd' => {
                let mut number = String::new();
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_digit() || next == '-' || next == '.' {
                        number.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let step = if ch == '.' {
                    number.parse().ok().map(Step::Jump)
                } else {
                    number.parse().ok().map(Step::Drag)
                };
                steps.push(step.ok_or_else(|| format!("bad step '{ch}{number}'"))?);
            }
            c if c.is_whitespace() || c == ',' => {}
            other => return Err(format!("unknown step '{other}'")),
        }
    }
    Ok(steps)
}

impl Config {
    fn from_args<I>(args: I) -> ParseResult
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        // Skip program name
        args.next();

        while let Some(arg) = args.next() {
            let arg_str = arg.to_string_lossy();
            let parsed = match arg_str.as_ref() {
                "-h" | "--help" => return ParseResult::Help,
                "--items" => parse_count("--items", args.next()).map(|n| config.items = n),
                "--show" => parse_count("--show", args.next()).map(|n| config.show = n),
                "--columns" => parse_count("--columns", args.next()).map(|n| config.columns = n),
                "--script" => match args.next() {
                    Some(v) => parse_script(&v.to_string_lossy()).map(|s| config.script = s),
                    None => Err("--script requires a value".to_string()),
                },
                "--no-loop" => {
                    config.loop_enabled = false;
                    Ok(())
                }
                "--events" => {
                    config.events = true;
                    Ok(())
                }
                other => Err(format!("unknown option '{other}'")),
            };
            if let Err(msg) = parsed {
                return ParseResult::Error(msg);
            }
        }
        ParseResult::Config(config)
    }
}

// ============================================================================
// Walkthrough
// ============================================================================

const CARD_PX: f32 = 100.0;

fn frame(carousel: &CardCarousel<String, HeadlessSurface>, columns: usize) -> String {
    match (carousel.sequence(), carousel.pitch(), carousel.viewport_width()) {
        (Some(sequence), Some(pitch), Some(width)) => {
            render_viewport(sequence, carousel.surface().offset(), pitch, width, columns)
        }
        _ => String::new(),
    }
}

fn dots(carousel: &CardCarousel<String, HeadlessSurface>) -> String {
    carousel
        .surface()
        .indicators()
        .iter()
        .map(|&active| if active { '●' } else { '○' })
        .collect()
}

fn run(config: &Config) {
    if config.events {
        set_event_callback(|name, data| eprintln!("[{name}] {data}"));
    }

    let cards = (1..=config.items).map(|n| format!("#{n}")).collect();
    let track = Track::new(cards, ItemMetrics::new(CARD_PX));
    let options = CarouselOptions::new(config.show).with_loop(config.loop_enabled);
    let mut carousel = CardCarousel::mount(
        Container::with_all(track, CARD_PX * config.show as f32),
        options,
        HeadlessSurface::new(),
        Duration::ZERO,
    );

    let settle = options.settle_delay();
    let mut now = Duration::ZERO;
    println!("start    |{}| {}", frame(&carousel, config.columns), dots(&carousel));

    for step in &config.script {
        let label = match *step {
            Step::Advance => {
                carousel.advance(now);
                "next".to_string()
            }
            Step::Retreat => {
                carousel.retreat(now);
                "prev".to_string()
            }
            Step::Jump(n) => {
                carousel.slide_to_real(n, now);
                format!("dot {n}")
            }
            Step::Drag(dx) => {
                carousel.handle(&PointerEvent::touch_start(300.0, 50.0).into(), now);
                carousel.handle(&PointerEvent::touch_move(300.0 + dx, 50.0).into(), now);
                println!("  drag   |{}|", frame(&carousel, config.columns));
                carousel.handle(&PointerEvent::touch_end(300.0 + dx, 50.0).into(), now);
                format!("drag {dx}")
            }
        };
        println!("{label:<8} |{}|", frame(&carousel, config.columns));
        now += settle;
        carousel.tick(now);
        println!(
            "  settle |{}| {} index={}",
            frame(&carousel, config.columns),
            dots(&carousel),
            carousel.index().unwrap_or_default()
        );
    }
}

fn main() {
    match Config::from_args(std::env::args_os()) {
        ParseResult::Config(config) => run(&config),
        ParseResult::Help => print!("{HELP_TEXT}"),
        ParseResult::Error(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage information.");
            std::process::exit(1);
        }
    }
}
