use std::{env, error::Error, fs, process::ExitCode};
use svelte_lexer::{config::LexOptions, detect_language, render_tokens, tokenize};

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    // Only initialize if RUST_LOG is set
    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

#[cfg(feature = "config_serde")]
fn load_options() -> Result<LexOptions, Box<dyn Error>> {
    match fs::read_to_string("svelte_lexer.toml") {
        Ok(config) => Ok(toml::from_str(&config)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(LexOptions::default()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(not(feature = "config_serde"))]
fn load_options() -> Result<LexOptions, Box<dyn Error>> {
    Ok(LexOptions::default())
}

fn run(file_path: &str) -> Result<(), Box<dyn Error>> {
    let language = detect_language(file_path)
        .ok_or_else(|| format!("unsupported file extension: {file_path}"))?;
    let code = fs::read_to_string(file_path)?;
    let options = load_options()?;

    let tokens = tokenize(&code, language, &options)?;
    println!("{}", render_tokens(&code, &tokens));
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let Some(file_path) = env::args().nth(1) else {
        eprintln!("usage: svelte_lexer <file.svelte|file.html>");
        return ExitCode::FAILURE;
    };
    match run(&file_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
