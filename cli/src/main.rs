mod store;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use designer::camera::Size;
use designer::config::EditorConfig;
use designer::doc::{DocumentError, ElementKind, TemplateDocument};
use designer::engine::{Action, EditorSession};
use designer::intent::Intent;
use designer::placeholder::{self, PlaceholderValues, SubstitutionContext};
use designer::preset::{self, Preset};
use designer::properties::{self, Property};
use designer::store::{StoreError, TemplateStore};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use crate::store::FileStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0} [{code}]", code = .0.error_code())]
    Store(#[from] StoreError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("writing output failed: {0}")]
    Output(#[from] io::Error),
    #[error("no element `{0}` in template")]
    UnknownElement(String),
    #[error("unknown property `{0}`")]
    UnknownProperty(String),
    #[error("property `{property}` is not editable on {kind} elements")]
    NotEditable { property: &'static str, kind: &'static str },
    #[error("invalid value {value:?} for `{property}`")]
    InvalidValue { property: &'static str, value: String },
    #[error("rows must be a JSON array of objects")]
    InvalidRows,
}

#[derive(Parser, Debug)]
#[command(name = "designer", about = "Certificate and card template designer")]
struct Cli {
    /// Directory holding one `<key>.json` per template.
    #[arg(long, env = "DESIGNER_STORE_DIR", default_value = "templates")]
    store_dir: PathBuf,

    #[arg(long, env = "DESIGNER_MAX_ZOOM", default_value_t = 2.0, value_parser = parse_positive)]
    max_zoom: f64,

    #[arg(long, env = "DESIGNER_MIN_SCALE", default_value_t = 0.2, value_parser = parse_positive)]
    min_scale: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List stored templates.
    List,
    /// List element presets.
    Presets,
    /// Create a template.
    New {
        key: String,
        /// Start from the default certificate layout.
        #[arg(long, default_value_t = false)]
        starter: bool,
        #[arg(long)]
        width: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
    },
    /// Print a template.
    Show { key: String },
    /// Add an element from the factory.
    Add {
        key: String,
        #[arg(long, default_value = "text")]
        kind: String,
        #[arg(long)]
        preset: Option<String>,
    },
    /// Set one property of an element.
    Set { key: String, element: String, property: String, value: String },
    /// Delete an element.
    Remove { key: String, element: String },
    /// Change the page size, relaying out the elements.
    Resize {
        key: String,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
    },
    /// Print the fit scale and page offset for a viewport.
    Fit {
        key: String,
        #[arg(long)]
        viewport_width: f64,
        #[arg(long)]
        viewport_height: f64,
    },
    /// Print a template with placeholders substituted.
    Preview {
        key: String,
        /// Placeholder value, `name=value`. Repeatable.
        #[arg(long = "set", value_parser = parse_assignment)]
        values: Vec<(String, String)>,
        /// Date for date tokens, `YYYY-MM-DD`. Defaults to today.
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Write one substituted document per row of a JSON rows file.
    Issue {
        key: String,
        #[arg(long)]
        rows: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();
    run(cli, &mut stdout)
}

fn editor_config(cli: &Cli) -> EditorConfig {
    EditorConfig { max_zoom: cli.max_zoom, min_scale: cli.min_scale, ..EditorConfig::default() }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    let config = editor_config(&cli);
    let mut store = FileStore::new(cli.store_dir);

    match cli.command {
        Command::List => print_json(out, &json!(store.list()?)),
        Command::Presets => {
            let presets: Vec<Value> = Preset::ALL
                .into_iter()
                .map(|p| json!({ "key": p.key(), "kind": p.kind().as_str() }))
                .collect();
            print_json(out, &Value::Array(presets))
        }
        Command::New { key, starter, width, height } => {
            let doc = if starter { preset::starter_document() } else { TemplateDocument::new() };
            let mut session = EditorSession::new(doc, config);
            if width.is_some() || height.is_some() {
                let page = session.document().page_size();
                session.apply(Intent::SetPageSize {
                    width: width.unwrap_or(page.width),
                    height: height.unwrap_or(page.height),
                });
            }
            store.create(&key, session.document())?;
            tracing::info!(key = %key, elements = session.document().elements.len(), "template created");
            print_document(out, session.document())
        }
        Command::Show { key } => print_document(out, &store.read(&key)?),
        Command::Add { key, kind, preset } => {
            let kind = ElementKind::parse(&kind).unwrap_or_else(|| {
                tracing::warn!(kind = %kind, "unknown element kind; adding text");
                ElementKind::default()
            });
            let session = edit(&mut store, config, &key, |s| {
                let element = preset::create_element_by_key(kind, preset.as_deref(), s.document().page_size());
                Ok(s.apply(Intent::InsertElement(element)))
            })?;
            print_document(out, session.document())
        }
        Command::Set { key, element, property, value } => {
            let session = edit(&mut store, config, &key, |s| set_property(s, &element, &property, &value))?;
            print_document(out, session.document())
        }
        Command::Remove { key, element } => {
            let session = edit(&mut store, config, &key, |s| {
                if s.document().element(&element).is_none() {
                    return Err(CliError::UnknownElement(element.clone()));
                }
                Ok(s.apply(Intent::DeleteElement { id: element.clone() }))
            })?;
            print_document(out, session.document())
        }
        Command::Resize { key, width, height } => {
            let session = edit(&mut store, config, &key, |s| Ok(s.apply(Intent::SetPageSize { width, height })))?;
            print_document(out, session.document())
        }
        Command::Fit { key, viewport_width, viewport_height } => {
            let mut session = EditorSession::new(TemplateDocument::new(), config);
            session.load_from(&store, &key)?;
            session.set_viewport(Size::new(viewport_width, viewport_height));
            let t = session.transform();
            print_json(out, &json!({ "scale": t.scale, "offsetX": t.offset_x, "offsetY": t.offset_y }))
        }
        Command::Preview { key, values, date } => {
            let doc = store.read(&key)?;
            let values: PlaceholderValues = values.into_iter().collect();
            let shown = placeholder::substitute(&doc, &values, &context(date));
            print_document(out, &shown)
        }
        Command::Issue { key, rows, out: out_dir, date } => {
            let doc = store.read(&key)?;
            let raw = fs::read_to_string(&rows).map_err(|source| CliError::Io { path: rows.clone(), source })?;
            let rows = parse_rows(&raw)?;
            let issued = placeholder::substitute_rows(&doc, &rows, &context(date));
            let written = write_issued(&key, &issued, &out_dir)?;
            tracing::info!(key = %key, count = written.len(), dir = %out_dir.display(), "documents issued");
            print_json(out, &json!(written))
        }
    }
}

/// Load `key`, run `f` against the session, and save if it committed.
fn edit(
    store: &mut FileStore,
    config: EditorConfig,
    key: &str,
    f: impl FnOnce(&mut EditorSession) -> Result<Vec<Action>, CliError>,
) -> Result<EditorSession, CliError> {
    let mut session = EditorSession::new(TemplateDocument::new(), config);
    session.load_from(&*store, key)?;
    let actions = f(&mut session)?;
    if actions.iter().any(|a| matches!(a, Action::Committed { .. })) {
        session.save_to(store, key)?;
        tracing::info!(key, "template saved");
    } else {
        tracing::info!(key, "no change");
    }
    Ok(session)
}

fn set_property(session: &mut EditorSession, element: &str, name: &str, raw: &str) -> Result<Vec<Action>, CliError> {
    let property = Property::from_name(name).ok_or_else(|| CliError::UnknownProperty(name.to_owned()))?;
    let kind = session
        .document()
        .element(element)
        .map(|el| el.kind)
        .ok_or_else(|| CliError::UnknownElement(element.to_owned()))?;
    if !properties::properties_for(kind).contains(&property) {
        return Err(CliError::NotEditable { property: property.name(), kind: kind.as_str() });
    }
    let value = property
        .parse_value(raw)
        .ok_or_else(|| CliError::InvalidValue { property: property.name(), value: raw.to_owned() })?;
    session.select(Some(element));
    Ok(session.set_property(property, &value))
}

fn context(date: Option<NaiveDate>) -> SubstitutionContext {
    date.map_or_else(SubstitutionContext::today, SubstitutionContext::new)
}

/// Rows file: a JSON array of objects. Strings are used as-is, `null` as
/// empty, anything else by its JSON text.
fn parse_rows(raw: &str) -> Result<Vec<PlaceholderValues>, CliError> {
    let Value::Array(items) = serde_json::from_str::<Value>(raw)? else {
        return Err(CliError::InvalidRows);
    };
    items
        .into_iter()
        .map(|item| {
            let Value::Object(fields) = item else {
                return Err(CliError::InvalidRows);
            };
            Ok(fields
                .into_iter()
                .map(|(name, value)| {
                    let text = match value {
                        Value::String(s) => s,
                        Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    (name, text)
                })
                .collect())
        })
        .collect()
}

fn write_issued(key: &str, docs: &[TemplateDocument], dir: &Path) -> Result<Vec<String>, CliError> {
    fs::create_dir_all(dir).map_err(|source| CliError::Io { path: dir.to_path_buf(), source })?;
    let mut written = Vec::with_capacity(docs.len());
    for (i, doc) in docs.iter().enumerate() {
        let path = dir.join(format!("{key}-{:03}.json", i + 1));
        let json = doc.to_json_pretty()?;
        fs::write(&path, format!("{json}\n")).map_err(|source| CliError::Io { path: path.clone(), source })?;
        written.push(path.display().to_string());
    }
    Ok(written)
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw.split_once('=').ok_or_else(|| format!("expected name=value, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty placeholder name in {raw:?}"));
    }
    Ok((name.to_owned(), value.to_owned()))
}

fn parse_positive(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        Ok(_) => Err(format!("expected a positive number, got {raw:?}")),
        Err(err) => Err(format!("expected a number: {err}")),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

fn print_document(out: &mut impl Write, doc: &TemplateDocument) -> Result<(), CliError> {
    writeln!(out, "{}", doc.to_json_pretty()?)?;
    Ok(())
}

fn print_json(out: &mut impl Write, value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    writeln!(out, "{rendered}")?;
    Ok(())
}
