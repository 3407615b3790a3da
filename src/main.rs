use std::{path::PathBuf, time::Instant};

use anyhow::{Result, anyhow};
use log::info;
use r1_shadergen::{
    cases::{CaseCatalog, StandardRules},
    config::{self, GenerationConfig},
    output,
};

#[derive(Debug, Default, Clone)]
struct Cli {
    output_dir: Option<PathBuf>,
    config: Option<PathBuf>,
    validate: bool,
    list: bool,
}

const USAGE: &str =
    "usage: r1-shadergen --output-dir <dir> [--config <file.json>] [--validate] [--list]";

fn parse_cli(args: &[String]) -> Result<Cli> {
    let mut cli = Cli::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--validate" => {
                cli.validate = true;
                i += 1;
            }
            "--list" => {
                cli.list = true;
                i += 1;
            }
            "--config" => {
                let Some(v) = args.get(i + 1) else {
                    return Err(anyhow!("missing value for --config"));
                };
                cli.config = Some(PathBuf::from(v));
                i += 2;
            }
            "--output-dir" => {
                let Some(v) = args.get(i + 1) else {
                    return Err(anyhow!("missing value for --output-dir"));
                };
                cli.output_dir = Some(PathBuf::from(v));
                i += 2;
            }
            other => {
                return Err(anyhow!("unknown argument: {other}\n{USAGE}"));
            }
        }
    }
    if cli.output_dir.is_none() && !cli.list && !cli.validate {
        return Err(anyhow!("nothing to do\n{USAGE}"));
    }
    Ok(cli)
}

fn main() -> Result<()> {
    env_logger::init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_cli(&argv)?;

    let config = match cli.config.as_deref() {
        Some(path) => config::load_config(path)?,
        None => GenerationConfig::default(),
    };
    let packaging = config.packaging();

    let started = Instant::now();
    let modules = output::generate_modules(&CaseCatalog::standard(), &StandardRules, &config);
    info!("synthesis took {:?}", started.elapsed());

    if cli.validate {
        output::validate_modules(&modules)?;
    }

    if cli.list {
        for module in &modules {
            println!("{}", module.qualified_name());
        }
    }

    if let Some(dir) = cli.output_dir.as_deref() {
        let written = output::write_modules(&modules, dir, &packaging)?;
        if config.write_manifest {
            let manifest = output::write_manifest(&modules, dir, &packaging)?;
            println!("[shadergen] manifest: {}", manifest.display());
        }
        println!("[shadergen] wrote {} modules to {}", written.len(), dir.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_output_dir_and_flags() {
        let cli = parse_cli(&args(&["--output-dir", "out", "--validate", "--config", "c.json"]))
            .unwrap();
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
        assert!(cli.validate);
        assert!(!cli.list);
    }

    #[test]
    fn rejects_missing_value_and_unknown_flag() {
        assert!(parse_cli(&args(&["--output-dir"])).is_err());
        assert!(parse_cli(&args(&["--headless"])).is_err());
        assert!(parse_cli(&args(&["--outputdir", "out"])).is_err());
        assert!(parse_cli(&[]).is_err());
    }
}
