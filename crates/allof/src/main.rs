use allof::{vocabulary, Dialect, Reducer, Vocabulary};
use anyhow::Context;
use clap::Parser;
use std::io::{self, Read, Write};

/// flatten-allof reads a JSON schema and writes an equivalent schema
/// from which every `allOf` keyword has been folded into its parent.
///
/// Schemas may be given as JSON or YAML.
#[derive(Debug, clap::Parser)]
#[clap(author, name = "flatten-allof", version)]
struct Args {
    /// Path to the schema to flatten. Defaults to '-', which represents stdin.
    #[clap(long, default_value = "-")]
    file: String,
    /// Path to which the flattened schema is written. Defaults to '-', which represents stdout.
    #[clap(long, default_value = "-")]
    output: String,
    /// Dialect of the schema, as a `$schema` URI or a short name like "draft-04".
    /// Overrides the `$schema` of the document. If neither is present, draft-07 is used.
    #[clap(long)]
    dialect: Option<Dialect>,
    /// Path to a YAML or JSON mapping of keywords to merge kinds,
    /// such as `x-tags: union`. May be repeated, and later extensions win.
    #[clap(long = "extension")]
    extensions: Vec<String>,
    /// Reject the `$merge` and `$patch` keywords of the JSON schema merge / patch extensions.
    #[clap(long)]
    merge_patch: bool,
    /// Format of the flattened schema.
    #[clap(long, value_enum, default_value = "json")]
    format: Format,

    #[clap(flatten)]
    log_args: LogArgs,
}

#[derive(clap::ValueEnum, Debug, Copy, Clone, PartialEq)]
enum Format {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

#[derive(Debug, clap::Args)]
struct LogArgs {
    /// Filter of log events to emit, such as "debug" or "allof=trace".
    #[clap(long = "log", default_value = "warn", env = "FLATTEN_ALLOF_LOG")]
    filter: String,
    /// Format of emitted log events.
    #[clap(id = "log_format", long = "log-format", value_enum, default_value = "text")]
    format: LogFormat,
}

#[derive(clap::ValueEnum, Debug, Copy, Clone, PartialEq)]
enum LogFormat {
    Text,
    Json,
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    init_logging(&args.log_args);

    let result = run(&args);

    if let Err(err) = result.as_ref() {
        tracing::error!(error = ?err, "failed to flatten schema");
    }
    result
}

// Logs are always written to stderr, as stdout may hold the flattened schema.
fn init_logging(args: &LogArgs) {
    let builder = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(args.filter.as_str())
        .with_target(false);

    match args.format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder
            .json()
            // Keep fields at the top level, rather than nested within "fields".
            .flatten_event(true)
            .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
            .init(),
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let input = read_input(&args.file)?;
    let mut doc = parse_document(&input).with_context(|| format!("failed to parse {}", args.file))?;

    let mut extensions = args
        .extensions
        .iter()
        .map(|path| load_extension(path))
        .collect::<anyhow::Result<Vec<_>>>()?;
    if args.merge_patch {
        extensions.push(vocabulary::merge_patch());
    }

    let reducer = match args.dialect {
        Some(dialect) => Reducer::new(dialect, &extensions),
        None => Reducer::for_document(&doc, Dialect::default(), &extensions)
            .context("failed to select the schema dialect")?,
    };
    tracing::debug!(
        keywords = reducer.vocabulary().len(),
        extensions = extensions.len(),
        "built vocabulary"
    );

    reducer
        .flatten(&mut doc)
        .with_context(|| format!("failed to flatten {}", args.file))?;

    let mut output = match args.format {
        Format::Json => serde_json::to_string_pretty(&doc)?,
        Format::Yaml => serde_yaml::to_string(&doc)?,
    };
    if !output.ends_with('\n') {
        output.push('\n');
    }
    write_output(&args.output, output.as_bytes())
}

fn read_input(file: &str) -> anyhow::Result<String> {
    let mut content = String::new();

    if file == "-" {
        io::stdin()
            .read_to_string(&mut content)
            .context("failed to read stdin")?;
    } else {
        content = std::fs::read_to_string(file).with_context(|| format!("failed to read {file}"))?;
    }
    Ok(content)
}

fn write_output(output: &str, content: &[u8]) -> anyhow::Result<()> {
    if output == "-" {
        io::stdout().write_all(content).context("failed to write stdout")
    } else {
        std::fs::write(output, content).with_context(|| format!("failed to write {output}"))
    }
}

// JSON is a subset of YAML, but is parsed as JSON where possible
// so that its numbers keep their exact representation.
fn parse_document(content: &str) -> anyhow::Result<serde_json::Value> {
    match serde_json::from_str(content) {
        Ok(doc) => Ok(doc),
        Err(json_err) => serde_yaml::from_str(content)
            .map_err(|yaml_err| anyhow::anyhow!("invalid JSON ({json_err}) or YAML ({yaml_err})")),
    }
}

fn load_extension(path: &str) -> anyhow::Result<Vocabulary> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read extension {path}"))?;
    let extension: Vocabulary =
        serde_yaml::from_str(&content).with_context(|| format!("failed to parse extension {path}"))?;

    tracing::debug!(%path, keywords = extension.len(), "loaded vocabulary extension");
    Ok(extension)
}
