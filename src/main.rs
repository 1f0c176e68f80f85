use std::env;
use std::io::{self, BufRead};
use std::process;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use circular_progress::{
    CircularProgressPanel, Color, PanelCommand, PanelConfig, TextFont, TextPen,
};
use log::{error, info, warn};
use rand::Rng;

const USAGE: &str = "usage: circular-progress [--size W H] [--ratio OUTER INNER] [--title T] \
[--font PATH] [--font-size PX] [--interval MS] [--demo]";

struct Options {
    width: usize,
    height: usize,
    ratio: Option<(f64, f64)>,
    title: Option<String>,
    font: Option<String>,
    font_size: f32,
    interval_ms: u64,
    demo: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            ratio: None,
            title: None,
            font: None,
            font_size: 24.0,
            interval_ms: 50,
            demo: false,
        }
    }
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or_else(|| format!("{name} needs a value"));
        match arg.as_str() {
            "--size" => {
                options.width = parse(&value("--size")?)?;
                options.height = parse(&value("--size")?)?;
            }
            "--ratio" => {
                let outer = parse(&value("--ratio")?)?;
                let inner = parse(&value("--ratio")?)?;
                options.ratio = Some((outer, inner));
            }
            "--title" => options.title = Some(value("--title")?),
            "--font" => options.font = Some(value("--font")?),
            "--font-size" => options.font_size = parse(&value("--font-size")?)?,
            "--interval" => options.interval_ms = parse(&value("--interval")?)?,
            "--demo" => options.demo = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                process::exit(0);
            }
            other => return Err(format!("unknown argument {other:?}")),
        }
    }
    Ok(options)
}

fn parse<T: std::str::FromStr>(raw: &str) -> Result<T, String> {
    raw.parse().map_err(|_| format!("invalid number {raw:?}"))
}

/// Maps one stdin line to a command. Lines starting with ':' are controls,
/// anything else becomes the label.
fn parse_line(line: &str, default_interval_ms: u64) -> Option<PanelCommand> {
    let line = line.trim();
    let Some(control) = line.strip_prefix(':') else {
        return Some(PanelCommand::SetText(line.to_string()));
    };
    let mut parts = control.split_whitespace();
    match parts.next()? {
        "start" => {
            let interval = parts
                .next()
                .and_then(|ms| ms.parse().ok())
                .unwrap_or(default_interval_ms);
            Some(PanelCommand::StartAnimation(interval))
        }
        "stop" => Some(PanelCommand::StopAnimation(false)),
        "reset" => Some(PanelCommand::StopAnimation(true)),
        "ratio" => {
            let outer = parts.next()?.parse().ok()?;
            let inner = parts.next()?.parse().ok()?;
            Some(PanelCommand::SetCircleRatio(outer, inner))
        }
        _ => None,
    }
}

fn spawn_stdin_reader(sender: Sender<PanelCommand>, default_interval_ms: u64) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines().map_while(Result::ok) {
            match parse_line(&line, default_interval_ms) {
                Some(command) => {
                    if sender.send(command).is_err() {
                        break;
                    }
                }
                None => warn!("ignoring unknown control line {line:?}"),
            }
        }
    });
}

fn spawn_random_readings(sender: Sender<PanelCommand>) {
    thread::spawn(move || {
        let mut rng = rand::rng();
        loop {
            let reading: f64 = rng.random_range(0.0..1.0);
            if sender
                .send(PanelCommand::SetText(format!("{reading:.2}mg/l")))
                .is_err()
            {
                break;
            }
            thread::sleep(Duration::from_secs(1));
        }
    });
}

fn main() {
    env_logger::init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            process::exit(2);
        }
    };

    let mut config = PanelConfig::builder().build();
    if let Some((outer, inner)) = options.ratio {
        config.outer_ratio = outer;
        config.inner_ratio = inner;
    }
    if let Some(title) = options.title.clone() {
        config.title = title;
    }

    let mut panel = CircularProgressPanel::with_config(options.width, options.height, config);
    let custom_font = match options.font.as_deref() {
        Some(path) => match TextFont::from_file(path, options.font_size) {
            Ok(font) => Some(font),
            Err(err) => {
                warn!("{err}; falling back to the bundled font");
                None
            }
        },
        None => None,
    };
    let font = custom_font
        .or_else(|| panel.text_font().map(|font| font.with_size(options.font_size)));
    panel.set_text_property(TextPen::new(Color::WHITE, 1.0), font);
    panel.start_animation(options.interval_ms);

    let (sender, receiver) = mpsc::channel();
    spawn_stdin_reader(sender.clone(), options.interval_ms);
    if options.demo {
        info!("sending random readings once per second");
        spawn_random_readings(sender);
    }

    if let Err(err) = panel.show_with_commands(receiver) {
        error!("{err}");
        process::exit(1);
    }
}
