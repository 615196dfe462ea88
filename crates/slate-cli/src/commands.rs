use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use slate_cli::assign::apply_assignments;
use slate_cli::logging::redact_value;
use slate_cli::source::{SourceTable, read_table};
use slate_map::{ConversionOptions, EnumFallback, MappingEngine, MappingSession};
use slate_model::{ConvertedRecord, MatchThresholds};
use slate_standards::SchemaRegistry;
use tracing::{debug, info, info_span, trace};

use crate::cli::{ConvertArgs, MapArgs};
use crate::summary::{entities_table, fields_table, print_mapping};

pub fn load_registry(schemas: &[PathBuf]) -> Result<SchemaRegistry> {
    let mut registry = SchemaRegistry::builtin().context("load built-in entities")?;
    for path in schemas {
        let count = registry
            .load_toml(path)
            .with_context(|| format!("load schemas: {}", path.display()))?;
        info!(path = %path.display(), entities = count, "schema file loaded");
    }
    Ok(registry)
}

pub fn run_entities(registry: &SchemaRegistry) -> Result<()> {
    println!("{}", entities_table(registry));
    Ok(())
}

pub fn run_fields(registry: &SchemaRegistry, entity: &str) -> Result<()> {
    let schema = registry
        .get(entity)
        .with_context(|| format!("unknown entity: {entity}"))?;
    println!("{} ({})", schema.label(), schema.key());
    println!("{}", fields_table(schema));
    Ok(())
}

/// Prints the mapping and returns whether it is valid.
pub fn run_map(registry: &SchemaRegistry, args: &MapArgs) -> Result<bool> {
    let (session, _) = build_session(registry, args, ConversionOptions::default())?;
    print_mapping(session.current(), &session.summary(), session.engine());
    Ok(session.current().is_valid())
}

/// Converts the sheet and returns the number of records written.
pub fn run_convert(registry: &SchemaRegistry, args: &ConvertArgs) -> Result<usize> {
    let options = ConversionOptions {
        enum_fallback: if args.raw_enums {
            EnumFallback::Raw
        } else {
            EnumFallback::FirstDeclared
        },
    };
    let (session, table) = build_session(registry, &args.map, options)?;
    let current = session.current();
    if !current.is_valid() && !args.allow_invalid {
        let missing: Vec<&str> = current
            .missing_required()
            .iter()
            .map(|field| field.key.as_str())
            .collect();
        bail!(
            "required fields are unmapped: {} (use --assign or --allow-invalid)",
            missing.join(", ")
        );
    }

    let records = session.convert(&table.rows);
    for (row, record) in records.iter().enumerate() {
        let rendered = serde_json::to_string(record).context("serialize record")?;
        trace!(row, record = %redact_value(&rendered), "record converted");
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create output: {}", path.display()))?;
            write_records(BufWriter::new(file), &records)
                .with_context(|| format!("write output: {}", path.display()))?;
            info!(path = %path.display(), records = records.len(), "records written");
        }
        None => write_records(io::stdout().lock(), &records).context("write records")?,
    }
    Ok(records.len())
}

fn build_session(
    registry: &SchemaRegistry,
    args: &MapArgs,
    options: ConversionOptions,
) -> Result<(MappingSession, SourceTable)> {
    let span = info_span!("map", entity = %args.entity, csv = %args.csv.display());
    let _guard = span.enter();

    let schema = registry
        .get(&args.entity)
        .with_context(|| format!("unknown entity: {}", args.entity))?;
    let thresholds = MatchThresholds::new(args.lock_in, args.min_score)
        .context("invalid thresholds")?;
    let table = read_table(&args.csv)?;
    info!(columns = table.headers.len(), rows = table.rows.len(), "source loaded");

    let engine = MappingEngine::new(schema.fields().to_vec()).with_thresholds(thresholds);
    let mut session = MappingSession::new(engine, &table.headers).with_options(options);
    apply_assignments(&mut session, &args.assign)?;
    debug!(valid = session.current().is_valid(), "mapping ready");
    Ok((session, table))
}

fn write_records<W: Write>(mut writer: W, records: &[ConvertedRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
