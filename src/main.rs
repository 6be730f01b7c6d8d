//! `acl`: command-line front end for the Alaveri common library

use std::path::PathBuf;

use alaveri_common::config::{
    configuration_filename, ConfigSerializer, ConfigurationKind, JsonSerializer, TomlSerializer, XmlSerializer,
};
use alaveri_common::constants::logging;
use alaveri_common::convert::{BooleanTokens, Convertible, Culture, SafeConverter, Value};
use alaveri_common::enums::EnumDescriptor;
use alaveri_common::globalization::{dev_translator, DevLanguageReader, ResourceLanguageReader, Translator};
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing::{debug, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "acl", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a value to a primitive type, falling back to a default
    Convert {
        value: String,
        /// Target type
        #[arg(long, value_enum)]
        to: TargetType,
        /// Returned when the value does not convert (parsed with the invariant culture)
        #[arg(long)]
        default: Option<String>,
        /// Culture used to parse the value (e.g. en-US, de-DE); defaults to the process locale
        #[arg(long)]
        culture: Option<String>,
        /// Replace the strings recognised as true
        #[arg(long, value_delimiter = ',')]
        true_values: Option<Vec<String>>,
        /// Replace the strings recognised as false
        #[arg(long, value_delimiter = ',')]
        false_values: Option<Vec<String>>,
    },
    /// Print where a configuration file is stored
    ConfigPath {
        #[arg(long)]
        organization: String,
        #[arg(long)]
        app: String,
        #[arg(long, value_parser = parse_kind, default_value = "user")]
        kind: ConfigurationKind,
        #[arg(long, value_enum, default_value = "json")]
        format: ConfigFormat,
        /// Configuration name; defaults to the application name
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Translate an identifier, substituting {0}, {1}, ... with ARGS
    Translate {
        identifier: String,
        args: Vec<String>,
        /// Directory of <culture>.json resource files; built-in resources when omitted
        #[arg(long)]
        resources: Option<PathBuf>,
        #[arg(long)]
        culture: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TargetType {
    Int16,
    Int32,
    Int64,
    Uint16,
    Uint32,
    Uint64,
    Byte,
    Sbyte,
    Single,
    Double,
    Decimal,
    Char,
    Boolean,
    String,
    DateTime,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConfigFormat {
    Json,
    Xml,
    Toml,
}

impl ConfigFormat {
    fn extension(self) -> &'static str {
        match self {
            ConfigFormat::Json => JsonSerializer::default().file_extension(),
            ConfigFormat::Xml => XmlSerializer::default().file_extension(),
            ConfigFormat::Toml => TomlSerializer.file_extension(),
        }
    }
}

fn init_logging() -> Result<()> {
    let log_level = match std::env::var(logging::LEVEL_ENV)
        .unwrap_or_else(|_| logging::DEFAULT_LEVEL.to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("Failed to install log subscriber")
}

fn parse_kind(identifier: &str) -> Result<ConfigurationKind, String> {
    ConfigurationKind::from_identifier(identifier).ok_or_else(|| {
        let known: Vec<_> = ConfigurationKind::values_and_identifiers()
            .into_iter()
            .filter_map(|(_, identifier)| identifier)
            .collect();
        format!("expected one of: {}", known.join(", "))
    })
}

fn parse_culture(name: Option<&str>) -> Result<Option<Culture>> {
    name.map(|name| Culture::from_name(name).ok_or_else(|| anyhow!("Unknown culture {:?}", name)))
        .transpose()
}

/// Convert `input` to `T`; the default is parsed invariantly and must itself be valid
fn convert_as<T>(converter: &SafeConverter, input: &str, default: Option<&str>, culture: &Culture) -> Result<Value>
where
    T: Convertible + Default + Into<Value>,
{
    let fallback = match default {
        Some(text) => converter
            .try_change_type_with_culture::<T>(text, &Culture::invariant())
            .with_context(|| format!("Default {:?} is not a valid {}", text, T::TYPE_NAME))?,
        None => T::default(),
    };
    Ok(converter.change_type_with_culture(input, fallback, culture).into())
}

fn run_convert(
    input: &str,
    to: TargetType,
    default: Option<&str>,
    culture: Option<Culture>,
    tokens: BooleanTokens,
) -> Result<String> {
    let converter = SafeConverter::with_tokens(tokens);
    let culture = culture.unwrap_or_else(|| converter.culture().clone());
    debug!(value = input, target = ?to, culture = %culture.name(), "Converting");

    let value = match to {
        TargetType::Int16 => convert_as::<i16>(&converter, input, default, &culture)?,
        TargetType::Int32 => convert_as::<i32>(&converter, input, default, &culture)?,
        TargetType::Int64 => convert_as::<i64>(&converter, input, default, &culture)?,
        TargetType::Uint16 => convert_as::<u16>(&converter, input, default, &culture)?,
        TargetType::Uint32 => convert_as::<u32>(&converter, input, default, &culture)?,
        TargetType::Uint64 => convert_as::<u64>(&converter, input, default, &culture)?,
        TargetType::Byte => convert_as::<u8>(&converter, input, default, &culture)?,
        TargetType::Sbyte => convert_as::<i8>(&converter, input, default, &culture)?,
        TargetType::Single => convert_as::<f32>(&converter, input, default, &culture)?,
        TargetType::Double => convert_as::<f64>(&converter, input, default, &culture)?,
        TargetType::Decimal => convert_as::<Decimal>(&converter, input, default, &culture)?,
        TargetType::Char => convert_as::<char>(&converter, input, default, &culture)?,
        TargetType::Boolean => convert_as::<bool>(&converter, input, default, &culture)?,
        TargetType::String => convert_as::<String>(&converter, input, default, &culture)?,
        TargetType::DateTime => convert_as::<NaiveDateTime>(&converter, input, default, &culture)?,
    };
    Ok(value.to_text(&culture).unwrap_or_default())
}

fn run_translate(
    identifier: &str,
    args: &[String],
    resources: Option<PathBuf>,
    culture: Option<Culture>,
) -> Result<String> {
    let args: Vec<Value> = args.iter().map(Value::from).collect();
    let text = match (resources, culture) {
        (Some(dir), culture) => {
            let reader = ResourceLanguageReader::load(&dir)?;
            Translator::with_reader(reader, culture.unwrap_or_else(Culture::current)).translate_format(identifier, &args)
        }
        (None, Some(culture)) => Translator::with_reader(DevLanguageReader, culture).translate_format(identifier, &args),
        (None, None) => dev_translator().translate_format(identifier, &args),
    };
    Ok(text)
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let output = match cli.command {
        Command::Convert {
            value,
            to,
            default,
            culture,
            true_values,
            false_values,
        } => {
            let mut tokens = BooleanTokens::default();
            if let Some(values) = true_values {
                tokens = tokens.with_true_values(values);
            }
            if let Some(values) = false_values {
                tokens = tokens.with_false_values(values);
            }
            run_convert(&value, to, default.as_deref(), parse_culture(culture.as_deref())?, tokens)?
        }
        Command::ConfigPath {
            organization,
            app,
            kind,
            format,
            name,
        } => configuration_filename(kind, &organization, &app, format.extension(), &name)
            .display()
            .to_string(),
        Command::Translate {
            identifier,
            args,
            resources,
            culture,
        } => run_translate(&identifier, &args, resources, parse_culture(culture.as_deref())?)?,
    };

    println!("{output}");
    Ok(())
}
