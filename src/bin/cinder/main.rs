use std::io::Write as _;

use clap::Parser as _;
use proc_exit::prelude::*;

mod args;
mod check;
mod debug;
mod error;

fn main() {
    human_panic::setup_panic!();
    let result = run();
    proc_exit::exit(result);
}

fn run() -> proc_exit::ExitResult {
    let cli = args::Cli::parse();

    cli.color.write_global();
    let colored_stderr = !matches!(
        anstream::AutoStream::choice(&std::io::stderr()),
        anstream::ColorChoice::Never
    );
    init_logging(cli.verbose.log_level_filter(), colored_stderr);

    cli.command.run().with_code(proc_exit::Code::FAILURE)?;

    Ok(())
}

fn init_logging(level: log::LevelFilter, colored: bool) {
    let palette = if colored {
        Palette::colored()
    } else {
        Palette::plain()
    };

    let mut builder = env_logger::Builder::new();
    builder.write_style(if colored {
        env_logger::WriteStyle::Always
    } else {
        env_logger::WriteStyle::Never
    });
    builder.filter(None, level);

    if level == log::LevelFilter::Trace {
        builder.format_timestamp_secs();
    } else {
        builder.format(move |f, record| {
            let level = format!("[{}]", record.level()).to_lowercase();
            let style = palette.style(record.level());
            writeln!(f, "{style}{level:8}{style:#} {}", record.args())
        });
    }

    builder.init();
}

#[derive(Copy, Clone, Debug, Default)]
struct Palette {
    error: anstyle::Style,
    warn: anstyle::Style,
    info: anstyle::Style,
    debug: anstyle::Style,
    trace: anstyle::Style,
}

impl Palette {
    fn colored() -> Self {
        Self {
            error: anstyle::AnsiColor::Red.on_default() | anstyle::Effects::BOLD,
            warn: anstyle::AnsiColor::Yellow.on_default(),
            info: anstyle::AnsiColor::Green.on_default(),
            debug: anstyle::AnsiColor::Blue.on_default(),
            trace: anstyle::AnsiColor::Cyan.on_default(),
        }
    }

    fn plain() -> Self {
        Self::default()
    }

    fn style(&self, level: log::Level) -> anstyle::Style {
        match level {
            log::Level::Error => self.error,
            log::Level::Warn => self.warn,
            log::Level::Info => self.info,
            log::Level::Debug => self.debug,
            log::Level::Trace => self.trace,
        }
    }
}
