use anyhow::{bail, Result};
use clap::Parser;
use dician::roll::DEFAULT_MAX_ROLLS;
use dician::{Error, RollContext};
use log::info;
use simplelog::{Config as LogConfig, LevelFilter, SimpleLogger};
use std::io::{self, BufRead, Write};

const PROMPT: &str = "Roll >> ";

#[derive(Parser)]
#[command(about = "Interactive dice roller")]
struct Opt {
    /// Show debug output
    #[arg(short, long)]
    debug: bool,

    /// Most dice a single expression may roll
    #[arg(long, default_value_t = DEFAULT_MAX_ROLLS)]
    max_rolls: usize,
}

fn init_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Error
    };

    match SimpleLogger::init(filter, LogConfig::default()) {
        Ok(_) => Ok(()),
        Err(e) => bail!("Failed to init logger: {}", e),
    }
}

fn prompt() -> io::Result<()> {
    print!("{}", PROMPT);
    io::stdout().flush()
}

fn main() -> Result<()> {
    let opts = Opt::parse();
    init_logging(opts.debug)?;

    let mut ctx = RollContext::new_bounded(opts.max_rolls, rand::thread_rng());

    println!("Input a roll expression (\"q\" to exit, empty line repeats the last roll):");
    if let Some(max) = ctx.max_rolls() {
        println!("At most {} dice are rolled per expression.", max);
    }
    let mut last: Option<String> = None;

    prompt()?;
    for line in io::stdin().lock().lines() {
        let line = line?;
        let input = line.trim();
        info!("read: {}", input);

        let expr = match (input, &last) {
            ("", Some(last)) => last.clone(),
            ("", None) => {
                prompt()?;
                continue;
            }
            (input, _) if input.eq_ignore_ascii_case("q") => break,
            (input, _) => input.to_string(),
        };

        ctx.reset();
        match dician::roll_with(&expr, &mut ctx) {
            Ok(total) => {
                println!("{} = {}", expr, total);
                last = Some(expr);
            }
            Err(Error::Parse(why)) => eprintln!("\"{}\" is not a roll expression. {}", expr, why),
            Err(why) => eprintln!("Error: {}", why),
        }
        prompt()?;
    }

    Ok(())
}
