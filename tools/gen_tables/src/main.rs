use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use libviet_core::{
    builtin_methods, by_name, compose_entries, expand, ComposeEntry, MethodSpec, RuleGroup,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

mod render;

#[derive(Parser)]
#[command(about = "Generate Vietnamese compose and keying-method tables")]
struct Args {
    /// Which stream(s) to render
    #[arg(long, value_enum, default_value = "all")]
    table: Table,

    /// Output syntax
    #[arg(long, value_enum, default_value = "c")]
    format: Format,

    /// Methods to include, by name (defaults to every built-in method)
    #[arg(long)]
    method: Vec<String>,

    /// Write to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Table {
    Compose,
    Methods,
    All,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    C,
    Json,
}

#[derive(Serialize)]
struct MethodRecord<'a> {
    name: &'a str,
    groups: Vec<RuleGroup>,
}

#[derive(Serialize)]
struct Records<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    compose: Option<&'a [ComposeEntry]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    methods: Option<&'a [MethodRecord<'a>]>,
}

fn selected_methods(names: &[String]) -> Result<Vec<&'static MethodSpec>> {
    if names.is_empty() {
        return Ok(builtin_methods());
    }
    names
        .iter()
        .map(|name| {
            by_name(name).with_context(|| format!("unknown keying method {name:?}"))
        })
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();

    let entries = if args.table != Table::Methods {
        Some(compose_entries().context("building compose table")?)
    } else {
        None
    };
    let methods: Vec<MethodRecord> = if args.table != Table::Compose {
        selected_methods(&args.method)?
            .into_iter()
            .map(|spec| MethodRecord {
                name: spec.name,
                groups: expand(spec),
            })
            .collect()
    } else {
        Vec::new()
    };

    let mut out = String::new();
    match args.format {
        Format::C => {
            if let Some(entries) = &entries {
                out.push_str(&render::render_compose_cases(entries, "    "));
            }
            for record in &methods {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(&render::render_method_array(
                    record.name,
                    &record.groups,
                    "    ",
                ));
            }
        }
        Format::Json => {
            let records = Records {
                compose: entries.as_deref(),
                methods: if methods.is_empty() {
                    None
                } else {
                    Some(&methods)
                },
            };
            out = serde_json::to_string_pretty(&records)?;
            out.push('\n');
        }
    }

    match &args.output {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            file.write_all(out.as_bytes())?;
        }
        None => {
            std::io::stdout().write_all(out.as_bytes())?;
        }
    }

    Ok(())
}
