use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;

use matstep_cli::config::CliConfig;
use matstep_cli::input::{parse_vector, read_matrix_csv, read_script};
use matstep_cli::report::format_response;
use matstep_cli::session::{Request, Response, Session};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("MATSTEP_LOG", "error,matstep=info"))
        .init();

    let matches = build_cli().get_matches();
    let config = CliConfig::from_arguments(&matches)?;
    let json = matches.get_flag("json");

    let (responses, script) = match matches.subcommand() {
        Some(("run", run_matches)) => (handle_run(run_matches, config.clone())?, true),
        Some((name, op_matches)) => (
            vec![handle_one_shot(name, op_matches, config.clone())?],
            false,
        ),
        None => unreachable!("Subcommand is required by CLI configuration"),
    };

    if json {
        let payload = if script {
            serde_json::to_string_pretty(&responses)?
        } else {
            serde_json::to_string_pretty(&responses[0])?
        };
        println!("{}", payload);
    } else {
        let blocks: Vec<String> = responses
            .iter()
            .map(|response| format_response(response, config.precision))
            .collect();
        println!("{}", blocks.join("\n\n"));
    }

    let failed = responses.iter().filter(|r| !r.success).count();
    if failed > 0 {
        log::error!("{} of {} request(s) failed", failed, responses.len());
        std::process::exit(1)
    }
    Ok(())
}

fn build_cli() -> Command {
    Command::new("matstep")
        .version(clap::crate_version!())
        .about("matstep - small-matrix linear algebra with every step shown")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a JSON configuration file")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print responses as JSON instead of text")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("precision")
                .short('p')
                .long("precision")
                .help("Decimals for non-integer values. Overrides the configuration file.")
                .global(true)
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("epsilon")
                .long("epsilon")
                .help("Zero tolerance for pivots and singularity checks. Overrides the configuration file.")
                .global(true)
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("no_steps")
                .long("no-steps")
                .help("Omit the step-by-step trace")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("run")
                .about("Execute a JSON array of requests against one matrix store")
                .arg(
                    Arg::new("script")
                        .help("Path to the request script (*.json)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(binary_op("add", "Add two matrices element by element"))
        .subcommand(binary_op("subtract", "Subtract the second matrix from the first"))
        .subcommand(binary_op("multiply", "Multiply two matrices"))
        .subcommand(unary_op("determinant", "Determinant by cofactor expansion"))
        .subcommand(unary_op("inverse", "Inverse by Gauss-Jordan elimination of [A|I]"))
        .subcommand(unary_op("lu", "Doolittle LU factorization (no pivoting)"))
        .subcommand(elimination_op(
            "gaussian",
            "Gaussian elimination; with --rhs, solve the system by back substitution",
        ))
        .subcommand(elimination_op(
            "gauss-jordan",
            "Gauss-Jordan elimination; with --rhs, solve the system",
        ))
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
}

fn matrix_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn binary_op(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(matrix_arg("left", "Left operand (headerless CSV)"))
        .arg(matrix_arg("right", "Right operand (headerless CSV)"))
}

fn unary_op(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(matrix_arg("matrix", "Input matrix (headerless CSV)"))
}

fn elimination_op(name: &'static str, about: &'static str) -> Command {
    unary_op(name, about).arg(
        Arg::new("rhs")
            .short('b')
            .long("rhs")
            .help("Right-hand side as comma-separated values, e.g. 3,5")
            .allow_hyphen_values(true)
            .value_parser(clap::builder::NonEmptyStringValueParser::new()),
    )
}

fn handle_run(matches: &ArgMatches, config: CliConfig) -> Result<Vec<Response>> {
    let script_path = matches
        .get_one::<PathBuf>("script")
        .context("missing script path")?;
    log::info!("[matstep] Running script: {:?}", script_path);

    let requests = read_script(script_path)?;
    let mut session = Session::new(config);
    Ok(session.run_script(requests))
}

fn handle_one_shot(name: &str, matches: &ArgMatches, config: CliConfig) -> Result<Response> {
    let mut session = Session::new(config);

    let request = match name {
        "add" | "subtract" | "multiply" => {
            let lhs = stage_matrix(&mut session, matches, "left")?;
            let rhs = stage_matrix(&mut session, matches, "right")?;
            match name {
                "add" => Request::Add { lhs, rhs },
                "subtract" => Request::Subtract { lhs, rhs },
                _ => Request::Multiply { lhs, rhs },
            }
        }
        "determinant" => Request::Determinant {
            id: stage_matrix(&mut session, matches, "matrix")?,
        },
        "inverse" => Request::Inverse {
            id: stage_matrix(&mut session, matches, "matrix")?,
        },
        "lu" => Request::Lu {
            id: stage_matrix(&mut session, matches, "matrix")?,
        },
        "gaussian" | "gauss-jordan" => {
            let id = stage_matrix(&mut session, matches, "matrix")?;
            let rhs = matches
                .get_one::<String>("rhs")
                .map(|text| parse_vector(text))
                .transpose()?;
            let solve = rhs.is_some();
            if name == "gaussian" {
                Request::Gaussian { id, solve, rhs }
            } else {
                Request::GaussJordan { id, solve, rhs }
            }
        }
        other => bail!("Unknown subcommand: {}", other),
    };

    Ok(session.execute(request))
}

/// Read the CSV named by `arg` into the session and return its identifier.
fn stage_matrix(session: &mut Session, matches: &ArgMatches, arg: &str) -> Result<String> {
    let path = matches
        .get_one::<PathBuf>(arg)
        .with_context(|| format!("missing argument: {}", arg))?;
    let matrix = read_matrix_csv(path)?;

    let response = session.execute(Request::Create { matrix });
    if !response.success {
        bail!("{}: {}", path.display(), response.message);
    }
    response
        .matrix_ids
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("no identifier assigned to {}", path.display()))
}
