//! csvprep - Preprocessing toolkit for delimited text tables

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use regex::Regex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use csvprep::config::{IndexList, PositionList, ReadOptions, ValueList};
use csvprep::model::template::{detect_file, read_template_dir};
use csvprep::model::{HeaderTemplate, Table};
use csvprep::output::{write_lines_to, write_reports, write_table_to, FileReport};
use csvprep::parser::read_table_from;
use csvprep::transform::{
    add_columns, delete_columns, flatten_header, merge_exclusive, move_columns, quote_column,
    replace_in_column, split_exclusive, truncate_at_separator, ColumnFill, FillSource,
    RowPredicate, SortSpec,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFillSource {
    Constant,
    Ffill,
    Column,
}

impl CliFillSource {
    fn with_value(self, value: String) -> csvprep::Result<FillSource> {
        match self {
            CliFillSource::Constant => Ok(FillSource::Constant(value)),
            CliFillSource::Ffill => Ok(FillSource::Forward(value)),
            CliFillSource::Column => FillSource::column_index(&value),
        }
    }
}

/// Input/output selection shared by every table command
#[derive(Args, Debug)]
struct IoArgs {
    /// Input file (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Preprocessing toolkit for delimited text tables
#[derive(Parser, Debug)]
#[command(name = "csvprep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Field delimiter
    #[arg(long, global = true, default_value_t = ',')]
    delimiter: char,

    /// Trim leading/trailing whitespace of every field
    #[arg(long, global = true)]
    trim: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Insert blank columns
    ColumnAdd {
        #[command(flatten)]
        io: IoArgs,

        /// Positions to insert before, -1 for the end: [index[,...]]
        #[arg(long)]
        column: PositionList,

        /// Number of columns inserted at each position
        #[arg(long, default_value_t = 1)]
        column_count: usize,
    },

    /// Delete columns
    ColumnDel {
        #[command(flatten)]
        io: IoArgs,

        /// Columns to delete: [index[,...]]
        #[arg(long)]
        column: IndexList,
    },

    /// Split rows so that each holds values from one column group only
    ColumnExclusive {
        #[command(flatten)]
        io: IoArgs,

        /// Column group, repeat for each group: [index[,...]]
        #[arg(long, required = true)]
        column_group: Vec<IndexList>,
    },

    /// Fill blank cells
    ColumnFill {
        #[command(flatten)]
        io: IoArgs,

        /// Columns to fill: [index[,...]]
        #[arg(long)]
        column: IndexList,

        /// Where fill values come from
        #[arg(long, value_enum, default_value = "constant")]
        value_source: CliFillSource,

        /// Fill value (constant), seed (ffill), or source column index (column)
        #[arg(long, default_value = "")]
        value: String,

        /// Only fill rows matching <index>==<value> or <index>!=<value>
        #[arg(long)]
        column_if: Option<String>,

        /// Leading rows left untouched
        #[arg(long, default_value_t = 0)]
        header: usize,
    },

    /// Merge rows produced by column-exclusive back together
    ColumnMerge {
        #[command(flatten)]
        io: IoArgs,

        /// Columns that must be equal in merged rows: [index[,...]]
        #[arg(long)]
        column_key: IndexList,

        /// Column group, repeat for each group: [index[,...]]
        #[arg(long, required = true)]
        column_group: Vec<IndexList>,
    },

    /// Move columns
    ColumnMove {
        #[command(flatten)]
        io: IoArgs,

        /// Source columns: [index[,...]]
        #[arg(long)]
        from: IndexList,

        /// Destinations, counted after all sources are removed: [index[,...]]
        #[arg(long)]
        to: IndexList,
    },

    /// Wrap cells in double quotes
    ColumnQuote {
        #[command(flatten)]
        io: IoArgs,

        /// Columns to quote: [index[,...]]
        #[arg(long)]
        column: IndexList,
    },

    /// Regex replacement inside cells
    ColumnReplace {
        #[command(flatten)]
        io: IoArgs,

        /// Columns to edit: [index[,...]]
        #[arg(long)]
        column: IndexList,

        /// Pattern to replace
        #[arg(long)]
        regex: String,

        /// Replacement text ($1 for groups)
        #[arg(long)]
        repl: String,
    },

    /// Keep only the listed columns, in the listed order
    ColumnSelect {
        #[command(flatten)]
        io: IoArgs,

        /// Columns to keep: [index[,...]]
        #[arg(long)]
        column: IndexList,
    },

    /// Sort rows on key columns
    ColumnSort {
        #[command(flatten)]
        io: IoArgs,

        /// Key columns, most significant first: [index[,...]]
        #[arg(long)]
        column_key: IndexList,

        /// Key types (str, int, float), all str when omitted: [type[,...]]
        #[arg(long)]
        column_attr: Option<ValueList>,

        /// Sort descending
        #[arg(long)]
        reverse: bool,
    },

    /// Keep the header block: rows up to and including the `==` separator row
    CustomHeaderGet {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Flatten the rows above the `==` separator into a one-line header
    #[command(name = "custom-header-line1")]
    CustomHeaderLine1 {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Print the detected header type of each file
    CsvFiletype {
        /// Directory holding *_header.csv templates
        #[arg(long)]
        csv_info_dir: PathBuf,

        /// Files to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Put template header rows on top of a table
    CsvHeaderAdd {
        #[command(flatten)]
        io: IoArgs,

        /// Template file to add
        #[arg(long)]
        add_header: PathBuf,
    },

    /// Replace a table's header rows with another template
    CsvHeaderChange {
        #[command(flatten)]
        io: IoArgs,

        /// Template the input currently carries
        #[arg(long)]
        input_header: PathBuf,

        /// Template to put in its place
        #[arg(long)]
        output_header: PathBuf,
    },

    /// Remove header rows
    CsvHeaderDel {
        #[command(flatten)]
        io: IoArgs,

        /// Template the input currently carries
        #[arg(long, conflicts_with = "header")]
        input_header: Option<PathBuf>,

        /// Number of header rows
        #[arg(long)]
        header: Option<usize>,
    },

    /// Report header type, column counts, and row count of each file as JSON
    CsvReport {
        /// Directory holding *_header.csv templates
        #[arg(long)]
        csv_info_dir: PathBuf,

        /// Files to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("csvprep=warn".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

fn read_input(
    path: Option<&Path>,
    options: &ReadOptions,
    template: Option<&HeaderTemplate>,
) -> Result<Table> {
    read_table_from(path, options, template).with_context(|| match path {
        Some(path) => format!("Failed to read {}", path.display()),
        None => "Failed to read stdin".to_string(),
    })
}

fn write_failure(path: Option<&Path>) -> String {
    match path {
        Some(path) => format!("Failed to write {}", path.display()),
        None => "Failed to write stdout".to_string(),
    }
}

fn write_output(path: Option<&Path>, table: &Table, delimiter: char) -> Result<()> {
    write_table_to(path, table, delimiter).with_context(|| write_failure(path))
}

/// Read, transform in place, write
fn edit_table(
    io: &IoArgs,
    options: &ReadOptions,
    edit: impl FnOnce(&mut Table) -> Result<()>,
) -> Result<()> {
    let mut table = read_input(io.input.as_deref(), options, None)?;
    edit(&mut table)?;
    write_output(io.output.as_deref(), &table, options.delimiter)
}

fn read_template(path: &Path, options: &ReadOptions) -> Result<HeaderTemplate> {
    HeaderTemplate::read(path, options)
        .with_context(|| format!("Failed to read header template: {}", path.display()))
}

fn load_templates(dir: &Path, options: &ReadOptions) -> Result<Vec<HeaderTemplate>> {
    let templates = read_template_dir(dir, options)
        .with_context(|| format!("Failed to read header templates in {}", dir.display()))?;
    if templates.is_empty() {
        bail!("No *_header.csv templates found in {}", dir.display());
    }
    Ok(templates)
}

fn groups(list: Vec<IndexList>) -> Vec<Vec<usize>> {
    list.into_iter().map(IndexList::into_inner).collect()
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let options = ReadOptions::new()
        .with_delimiter(cli.delimiter)
        .with_trim(cli.trim);

    match cli.command {
        Command::ColumnAdd {
            io,
            column,
            column_count,
        } => edit_table(&io, &options, |table| {
            add_columns(table, &column.0, column_count);
            Ok(())
        }),

        Command::ColumnDel { io, column } => edit_table(&io, &options, |table| {
            delete_columns(table, &column.0);
            Ok(())
        }),

        Command::ColumnExclusive { io, column_group } => {
            let groups = groups(column_group);
            edit_table(&io, &options, |table| {
                let added = split_exclusive(table, &groups);
                tracing::info!("column-exclusive added {} rows", added);
                Ok(())
            })
        }

        Command::ColumnFill {
            io,
            column,
            value_source,
            value,
            column_if,
            header,
        } => {
            let source = value_source.with_value(value)?;
            let predicate = column_if
                .as_deref()
                .map(str::parse::<RowPredicate>)
                .transpose()?;

            edit_table(&io, &options, |table| {
                for &index in &column.0 {
                    let mut fill = ColumnFill::new(index, source.clone()).with_skip_rows(header);
                    if let Some(predicate) = &predicate {
                        fill = fill.with_predicate(predicate.clone());
                    }
                    fill.apply(table);
                }
                Ok(())
            })
        }

        Command::ColumnMerge {
            io,
            column_key,
            column_group,
        } => {
            let groups = groups(column_group);
            edit_table(&io, &options, |table| {
                let removed = merge_exclusive(table, &column_key.0, &groups);
                tracing::info!("column-merge removed {} rows", removed);
                Ok(())
            })
        }

        Command::ColumnMove { io, from, to } => edit_table(&io, &options, |table| {
            move_columns(table, &from.0, &to.0)?;
            Ok(())
        }),

        Command::ColumnQuote { io, column } => edit_table(&io, &options, |table| {
            for &index in &column.0 {
                quote_column(table, index);
            }
            Ok(())
        }),

        Command::ColumnReplace {
            io,
            column,
            regex,
            repl,
        } => {
            let regex =
                Regex::new(&regex).with_context(|| format!("Invalid --regex: {}", regex))?;
            edit_table(&io, &options, |table| {
                for &index in &column.0 {
                    replace_in_column(table, index, &regex, &repl);
                }
                Ok(())
            })
        }

        Command::ColumnSelect { io, column } => {
            let table = read_input(io.input.as_deref(), &options, None)?;
            let selected = table.select_columns(&column.0);
            write_output(io.output.as_deref(), &selected, options.delimiter)
        }

        Command::ColumnSort {
            io,
            column_key,
            column_attr,
            reverse,
        } => {
            let sort = match column_attr {
                Some(types) => SortSpec::with_type_names(&column_key.0, &types.0)?,
                None => SortSpec::strings(&column_key.0),
            }
            .with_reverse(reverse);

            edit_table(&io, &options, |table| {
                sort.apply(table)?;
                Ok(())
            })
        }

        Command::CustomHeaderGet { io } => edit_table(&io, &options, |table| {
            truncate_at_separator(table, true);
            Ok(())
        }),

        Command::CustomHeaderLine1 { io } => {
            let mut table = read_input(io.input.as_deref(), &options, None)?;
            truncate_at_separator(&mut table, false);
            let names = flatten_header(&table);
            let line = names.join(&options.delimiter.to_string());
            let output = io.output.as_deref();
            write_lines_to(output, &[line]).with_context(|| write_failure(output))
        }

        Command::CsvFiletype {
            csv_info_dir,
            files,
        } => {
            let templates = load_templates(&csv_info_dir, &options)?;
            for file in &files {
                let detected = detect_file(&templates, file)
                    .with_context(|| format!("Failed to read {}", file.display()))?;
                let name = detected.map_or("***unknown***", |t| t.type_name.as_str());
                println!("{}\t{}", file.display(), name);
            }
            Ok(())
        }

        Command::CsvHeaderAdd { io, add_header } => {
            let template = read_template(&add_header, &options)?;
            edit_table(&io, &options, |table| {
                table.apply_template(&template)?;
                Ok(())
            })
        }

        Command::CsvHeaderChange {
            io,
            input_header,
            output_header,
        } => {
            let input_template = read_template(&input_header, &options)?;
            let output_template = read_template(&output_header, &options)?;

            let mut table = read_input(io.input.as_deref(), &options, Some(&input_template))?;
            table.clear_header_rows();
            table.apply_template(&output_template)?;
            write_output(io.output.as_deref(), &table, options.delimiter)
        }

        Command::CsvHeaderDel {
            io,
            input_header,
            header,
        } => {
            let mut table = match (input_header, header) {
                (Some(path), _) => {
                    let template = read_template(&path, &options)?;
                    read_input(io.input.as_deref(), &options, Some(&template))?
                }
                (None, Some(count)) => {
                    let options = options.clone().with_header_rows(count);
                    read_input(io.input.as_deref(), &options, None)?
                }
                (None, None) => bail!("Either --input-header or --header is required"),
            };
            table.clear_header_rows();
            write_output(io.output.as_deref(), &table, options.delimiter)
        }

        Command::CsvReport {
            csv_info_dir,
            files,
        } => {
            let templates = load_templates(&csv_info_dir, &options)?;
            let reports = files
                .iter()
                .map(|file| {
                    FileReport::build(&templates, file, &options)
                        .with_context(|| format!("Failed to read {}", file.display()))
                })
                .collect::<Result<Vec<_>>>()?;
            write_reports(&reports, &mut std::io::stdout().lock())?;
            Ok(())
        }
    }
}
