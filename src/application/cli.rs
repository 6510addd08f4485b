#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::env;
use std::io;
use std::path;
use std::process;
use std::str::FromStr;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::pretty_json;
use crate::domain::models::Experience;
use crate::domain::models::FormState;
use crate::domain::models::Measurement;
use crate::domain::models::RequestPayload;
use crate::domain::models::Sex;
use crate::domain::models::Weekday;
use crate::domain::services::actions::help_text;
use crate::domain::services::ResultView;
use crate::infrastructure::api::ApiManager;

/// Exit code for input rejected before anything was sent.
pub const EXIT_VALIDATION: i32 = 2;
/// Exit code for a request that was sent but didn't produce a plan.
pub const EXIT_REQUEST: i32 = 1;

pub fn debug_log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("LIFTPLAN_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(|| return path::PathBuf::from("."))
        .join("liftplan");
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn parse_training_days(text: &str) -> Result<Vec<Weekday>> {
    let mut days = vec![];
    for name in text.split(',') {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        match Weekday::parse(name) {
            Some(day) => days.push(day),
            None => bail!(
                "Unknown training day '{name}'. Use one of: {}",
                Weekday::VARIANTS.join(", ")
            ),
        }
    }

    return Ok(days);
}

/// Builds a form from the shared form arguments. Values are only checked for
/// shape here, range and consistency checks happen when the payload is built.
pub fn form_from_matches(matches: &ArgMatches) -> Result<FormState> {
    let mut form = FormState::default();

    if let Some(goal) = matches.get_one::<String>("goal") {
        form.goal_text = goal.to_string();
    }
    if let Some(days) = matches.get_one::<u8>("days") {
        form.set_days_per_week(*days);
    }
    if let Some(minutes) = matches.get_one::<u16>("minutes") {
        form.session_minutes = *minutes;
    }
    if let Some(training_days) = matches.get_one::<String>("training-days") {
        form.select_training_days(&parse_training_days(training_days)?);
    }
    if let Some(sex) = matches.get_one::<String>("sex") {
        form.sex = Some(Sex::from_str(sex)?);
    }
    if let Some(experience) = matches.get_one::<String>("experience") {
        form.experience = Some(Experience::from_str(experience)?);
    }
    if let Some(equipment) = matches.get_one::<String>("equipment") {
        form.equipment = equipment.to_string();
    }
    if let Some(seed) = matches.get_one::<String>("seed") {
        form.seed = seed.to_string();
    }

    for measurement in Measurement::all() {
        if let Some(value) = matches.get_one::<String>(measurement.key()) {
            *form.measurement_mut(measurement) = value.to_string();
        }
    }

    return Ok(form);
}

fn render_response(raw: serde_json::Value, expand: bool) -> String {
    let mut view = ResultView::new(raw).without_hints();
    if expand {
        view.toggle_all();
    }

    return view.plain_text();
}

async fn run_generate(matches: &ArgMatches) -> Result<i32> {
    let form = form_from_matches(matches)?;
    let payload = match RequestPayload::build(&form) {
        Ok(payload) => payload,
        Err(err) => {
            eprintln!("{}", Paint::yellow(err.to_string()));
            return Ok(EXIT_VALIDATION);
        }
    };

    if matches.get_flag("dry-run") {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(0);
    }

    let api = ApiManager::get()?;
    match api.generate(&payload).await {
        Ok(value) => {
            if matches.get_flag("json") {
                println!("{}", pretty_json(&value));
            } else {
                println!("{}", render_response(value, matches.get_flag("expand")));
            }

            return Ok(0);
        }
        Err(err) => {
            eprintln!("{}", Paint::red(err.to_string()));
            return Ok(EXIT_REQUEST);
        }
    }
}

async fn run_render(matches: &ArgMatches) -> Result<()> {
    let text = if let Some(file) = matches.get_one::<String>("file") {
        fs::read_to_string(file).await?
    } else {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        buf
    };

    let value = serde_json::from_str::<serde_json::Value>(&text)?;
    println!("{}", render_response(value, matches.get_flag("expand")));

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for liftplan")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running liftplan with environment variable RUST_LOG=liftplan")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn arg_expand() -> Arg {
    return Arg::new("expand")
        .long("expand")
        .help("Expand audit metadata, other fields and the raw JSON response.")
        .action(ArgAction::SetTrue);
}

fn args_form() -> Vec<Arg> {
    let mut args = vec![
        Arg::new("goal")
            .short('g')
            .long("goal")
            .num_args(1)
            .help("Describe your training goal in your own words."),
        Arg::new("days")
            .short('d')
            .long("days")
            .num_args(1)
            .value_parser(value_parser!(u8))
            .help("Training sessions per week, 1 to 7. [default: 4]"),
        Arg::new("minutes")
            .short('m')
            .long("minutes")
            .num_args(1)
            .value_parser(value_parser!(u16))
            .help("Length of each session in minutes, 10 to 240. [default: 60]"),
        Arg::new("training-days")
            .long("training-days")
            .num_args(1)
            .help("Comma separated weekdays to train on, e.g. mon,wed,fri. Must match --days. Leave unset to let the service choose."),
        Arg::new("sex")
            .long("sex")
            .num_args(1)
            .value_parser(PossibleValuesParser::new(Sex::VARIANTS))
            .help("Sex used to tune the plan."),
        Arg::new("experience")
            .long("experience")
            .num_args(1)
            .value_parser(PossibleValuesParser::new(Experience::VARIANTS))
            .help("Training experience."),
        Arg::new("equipment")
            .long("equipment")
            .num_args(1)
            .help("Comma separated list of available equipment, sent as written."),
        Arg::new("seed")
            .long("seed")
            .num_args(1)
            .help("Seed for reproducible plans."),
    ];

    for (key, help) in [
        ("height", "Height in cm."),
        ("weight", "Weight in kg."),
        ("waist", "Waist circumference in cm."),
        ("hip", "Hip circumference in cm."),
        ("chest", "Chest circumference in cm."),
    ] {
        args.push(Arg::new(key).long(key).num_args(1).help(help));
    }

    return args;
}

fn subcommand_form() -> Command {
    return Command::new("form")
        .about("Open the interactive form. This is the default when no subcommand is given. Form arguments prefill the form.")
        .args(args_form());
}

fn subcommand_generate() -> Command {
    return Command::new("generate")
        .about("Generate a workout plan without the interactive form.")
        .args(args_form())
        .mut_arg("goal", |arg| return arg.required(true))
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Print the request payload instead of sending it.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the raw JSON response instead of rendering it.")
                .action(ArgAction::SetTrue),
        )
        .arg(arg_expand());
}

fn subcommand_render() -> Command {
    return Command::new("render")
        .about("Render a saved plan response. Reads stdin when no file is given.")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .num_args(1)
                .help("Path to a JSON response."),
        )
        .arg(arg_expand());
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.ends_with("HOTKEYS:") {
                return Paint::new(line).underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("liftplan")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(subcommand_form())
        .subcommand(subcommand_generate())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .subcommand(subcommand_render())
        .arg(
            Arg::new(ConfigKey::ApiURL.to_string())
                .long(ConfigKey::ApiURL.to_string())
                .env("LIFTPLAN_API_URL")
                .num_args(1)
                .help(format!("Base URL of the plan service. [default: {}]", Config::default(ConfigKey::ApiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Endpoint.to_string())
                .long(ConfigKey::Endpoint.to_string())
                .env("LIFTPLAN_ENDPOINT")
                .num_args(1)
                .help(format!("Path of the plan generation endpoint, relative to api-url. [default: {}]", Config::default(ConfigKey::Endpoint)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ApiHealthCheckTimeout.to_string())
                .long(ConfigKey::ApiHealthCheckTimeout.to_string())
                .env("LIFTPLAN_API_HEALTH_CHECK_TIMEOUT")
                .num_args(1)
                .help(format!("Time to wait in milliseconds before timing out when doing a health check against the plan service. [default: {}]", Config::default(ConfigKey::ApiHealthCheckTimeout)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("LIFTPLAN_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true),
        );
}

/// Handles every subcommand that runs to completion on its own. Returns the form
/// to open when the interactive shell should start.
pub async fn parse() -> Result<Option<FormState>> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = debug_log_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(None);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }

            return Ok(None);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(None);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(None);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(None);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(None);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(None);
        }
        Some(("generate", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            let code = run_generate(subcmd_matches).await?;
            if code != 0 {
                process::exit(code);
            }

            return Ok(None);
        }
        Some(("render", subcmd_matches)) => {
            run_render(subcmd_matches).await?;
            return Ok(None);
        }
        Some(("form", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            return Ok(Some(form_from_matches(subcmd_matches)?));
        }
        _ => {
            Config::load(vec![&matches]).await?;
            return Ok(Some(FormState::default()));
        }
    }
}
