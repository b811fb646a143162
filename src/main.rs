use std::{path::Path, process, time::Instant};

use anyhow::Context;
use budgetfuzz::{
    configuration::{load_config, ConfigReadError, FuzzConfig, OutputFormat},
    generate_program,
    log::{pull_messages, LOG_CAPACITY},
    Node, TypeSet,
};

fn render(program: &Node, format: OutputFormat) -> Result<String, anyhow::Error> {
    match format {
        OutputFormat::Source => {
            let mut buffer = b"(".to_vec();
            program.fold(&mut buffer);
            buffer.extend_from_slice(b");\n");
            String::from_utf8(buffer).context("program text is not utf-8")
        }
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(program).context("serializing program")?;
            text.push('\n');
            Ok(text)
        }
    }
}

fn emit(config: &FuzzConfig, seed: u64, text: &str) -> Result<(), anyhow::Error> {
    let Some(directory) = &config.output.directory else {
        print!("{text}");
        return Ok(());
    };

    let extension = match config.output.format {
        OutputFormat::Source => "js",
        OutputFormat::Json => "json",
    };

    std::fs::create_dir_all(directory).context("trying to create output directory")?;
    let path = Path::new(directory).join(format!("program_{seed}.{extension}"));
    std::fs::write(&path, text).context(format!("trying to write {}", path.to_string_lossy()))
}

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| "fuzz.toml".to_string());

    let config = match load_config(&path) {
        Ok(config) => config,
        Err(ConfigReadError::Read(e)) => {
            eprintln!("failed to read {path}: {e}");
            process::exit(exitcode::IOERR)
        }

        Err(e @ ConfigReadError::Parse(_)) => {
            eprintln!("{e}");
            process::exit(exitcode::CONFIG)
        }
    };

    if let Err(e) = config.generation.validate() {
        eprintln!("errors in generator configuration");
        eprintln!("{e:?}");
        process::exit(exitcode::CONFIG)
    }

    let types: TypeSet = config.run.types.iter().copied().collect();
    let started = Instant::now();

    for offset in 0..config.run.count {
        let seed = config.run.seed.wrapping_add(offset as u64);

        let program = match generate_program(seed, config.run.budget, &types, config.generation.clone()) {
            Ok(program) => program,
            Err(e) => {
                eprintln!("generation failed for seed {seed}: {e}");
                process::exit(exitcode::SOFTWARE)
            }
        };

        if let Err(e) = render(&program, config.output.format).and_then(|text| emit(&config, seed, &text)) {
            eprintln!("{e:?}");
            process::exit(exitcode::IOERR)
        }
    }

    for message in pull_messages(LOG_CAPACITY) {
        eprintln!("{message}");
    }

    eprintln!(
        "generated {} programs in {}",
        config.run.count,
        humantime::format_duration(started.elapsed())
    );
}
