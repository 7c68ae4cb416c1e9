// Command-line interface for mitosis
//
// This binary converts components between builder content JSON and the Mitosis component IR.
// All conversion work is done by the mitosis-babel library; this crate only handles files,
// configuration and argument parsing.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file name
// (`*.mitosis.json` is mitosis-json, any other `*.json` is builder), while being overwrittable
// by an explicit --from flag.
// Usage:
//  mitosis <input> --to <format> [--from <format>] [--output <file>]          - Convert (default)
//  mitosis convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above
//  mitosis --list-formats                                                     - List formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Import settings (component-name, placeholder-tag) are taken by the CLI itself.
// Example:
//  mitosis page.json --to mitosis-json --extra-pretty false
//
// Logging:
//
// Diagnostics are written to stderr and filtered by the MITOSIS_LOG environment variable
// (e.g. MITOSIS_LOG=debug to see every construct the converter drops).

use clap::{Arg, ArgAction, Command, ValueHint};
use mitosis_babel::{BuilderFormat, FormatRegistry, MitosisJsonFormat};
use mitosis_config::{Loader, MitosisConfig};
use std::collections::HashMap;
use std::fs;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MITOSIS_LOG";
const SUBCOMMANDS: &[&str] = &["convert", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("mitosis")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert components between builder content and the Mitosis IR")
        .long_about(
            "mitosis converts visual-builder content JSON to and from the Mitosis component IR.\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            mitosis page.json --to mitosis-json              # Import builder content (stdout)\n  \
            mitosis card.mitosis.json --to builder -o out.json\n  \
            mitosis page.json --to builder --extra-pretty false"
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a mitosis.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between component formats (default command)")
                .long_about(
                    "Convert components between formats.\n\n\
                    Supported formats:\n  \
                    - builder:      Builder content JSON (.json)\n  \
                    - mitosis-json: Mitosis component IR (.mitosis.json)\n\n\
                    The source format is auto-detected from the file name.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    mitosis convert page.json --to mitosis-json\n  \
                    mitosis convert card.mitosis.json --to builder -o card.json\n  \
                    mitosis page.json --to mitosis-json            # 'convert' is optional"
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file name if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .long_help(
                            "Target format to convert to.\n\n\
                            Available formats: builder, mitosis-json\n\
                            Use the format name, not the file extension."
                        )
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    // If no subcommand is provided, inject "convert"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    let registry = registry_from_config(&config);

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return;
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                fail("Error: an input file is required");
            };
            let Some(to) = sub_matches.get_one::<String>("to") else {
                fail("Error: --to is required");
            };

            let from = match sub_matches.get_one::<String>("from") {
                Some(from) => from.to_string(),
                None => match registry.detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        fail("Please specify --from explicitly");
                    }
                },
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, input, &from, to, output, &extra_params);
        }
        _ => fail("Unknown subcommand. Use --help for usage information."),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
) {
    if let Err(e) = registry.get(from) {
        fail(&format!("Error: {e}"));
    }
    if let Err(e) = registry.get(to) {
        fail(&format!("Error: {e}"));
    }

    let source = fs::read_to_string(input)
        .unwrap_or_else(|e| fail(&format!("Error reading file '{input}': {e}")));

    let component = registry
        .parse(&source, from)
        .unwrap_or_else(|e| fail(&format!("Parse error: {e}")));
    tracing::debug!(from, to, component = %component.name, "parsed input");

    let result = registry
        .serialize_with_options(&component, to, extra_params)
        .unwrap_or_else(|e| fail(&format!("Serialization error: {e}")));

    match output {
        Some(path) => {
            fs::write(path, format!("{result}\n"))
                .unwrap_or_else(|e| fail(&format!("Error writing file '{path}': {e}")));
        }
        None => println!("{result}"),
    }
}

/// Handle the list-formats command
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available formats:\n");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            println!(
                "  {name:<14} {} (*.{})",
                format.description(),
                format.file_extensions().join(", *.")
            );
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> MitosisConfig {
    let loader = Loader::new().with_optional_file("mitosis.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader
        .build()
        .unwrap_or_else(|err| fail(&format!("Failed to load configuration: {err}")))
}

/// Build the registry with formats configured from `config`.
fn registry_from_config(config: &MitosisConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::new();
    registry.register(BuilderFormat::new(
        (&config.import).into(),
        config.export.into(),
    ));
    registry.register(MitosisJsonFormat::new(config.export.pretty));
    registry
}

/// Move import settings out of the extras into the configuration.
///
/// What remains in `extra_params` is handed to the target format.
fn apply_config_overrides(config: &mut MitosisConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(name) = take_override(extra_params, &["component-name", "name"]) {
        config.import.component_name = name;
    }
    if let Some(tag) = take_override(extra_params, &["placeholder-tag"]) {
        config.import.placeholder_tag = tag;
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}
