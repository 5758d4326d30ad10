//! pageconv CLI - PAGE XML layout document converter

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use pageconv::{
    ConvertOptions, Error, LayoutFormat, MeasurementUnit, NegativeCoordPolicy, OutputFormat,
    Region, ResolutionUnit, TextFilter,
};

#[derive(Parser)]
#[command(name = "pageconv")]
#[command(version)]
#[command(about = "Convert PAGE XML layout documents", long_about = None)]
struct Cli {
    /// Input layout file (PAGE XML or JSON)
    #[arg(value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// Output file
    #[arg(value_name = "TARGET")]
    target: Option<PathBuf>,

    #[command(flatten)]
    convert: ConvertArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a layout document
    Convert {
        /// Input layout file (PAGE XML or JSON)
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Output file
        #[arg(value_name = "TARGET")]
        target: PathBuf,

        #[command(flatten)]
        convert: ConvertArgs,
    },

    /// Show document information
    Info {
        /// Input layout file (PAGE XML or JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Dump the full document model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args, Default)]
struct ConvertArgs {
    /// Source format (sniffed if not given)
    #[arg(long, value_enum)]
    source_format: Option<SourceFormatArg>,

    /// Recover from broken content instead of failing
    #[arg(long)]
    lenient: bool,

    /// Target schema version or ALTO
    /// (LATEST, 2019-07-15, 2017-07-15, 2013-07-15, 2010-03-19, ALTO)
    #[arg(long, value_name = "VERSION")]
    convert_to: Option<String>,

    /// GtsID to set: a literal ID or prefix[start,end] to extract
    /// from the source filename
    #[arg(long, value_name = "PATTERN")]
    set_gtsid: Option<String>,

    /// XML file with text filter rules
    #[arg(long, value_name = "FILE")]
    text_filter: Option<PathBuf>,

    /// What to do with objects that have negative coordinates
    #[arg(long, value_enum, value_name = "POLICY")]
    neg_coords: Option<NegCoordsArg>,

    /// Horizontal image resolution
    #[arg(long, value_name = "N")]
    xres: Option<f64>,

    /// Vertical image resolution
    #[arg(long, value_name = "N")]
    yres: Option<f64>,

    /// Image resolution for both axes (overridden by --xres/--yres)
    #[arg(long, value_name = "N")]
    res: Option<f64>,

    /// Unit of the given resolution values
    #[arg(long, value_enum, value_name = "UNIT")]
    res_unit: Option<ResUnitArg>,

    /// Coordinate unit of the source document
    #[arg(long, value_enum, value_name = "UNIT")]
    measurement_unit: Option<MeasurementUnitArg>,

    /// Rescale coordinates from the measurement unit to pixels
    #[arg(long)]
    transform_coords: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SourceFormatArg {
    /// PAGE XML
    Xml,
    /// Vendor JSON layout (e.g. Google Cloud Vision output)
    Json,
}

impl From<SourceFormatArg> for LayoutFormat {
    fn from(arg: SourceFormatArg) -> Self {
        match arg {
            SourceFormatArg::Xml => LayoutFormat::PageXml,
            SourceFormatArg::Json => LayoutFormat::Json,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum NegCoordsArg {
    /// Remove the offending object and everything it contains
    #[value(name = "remove-obj", alias = "removeObj")]
    RemoveObj,
    /// Clamp negative coordinate components to zero
    #[value(name = "to-zero", alias = "toZero")]
    ToZero,
}

impl From<NegCoordsArg> for NegativeCoordPolicy {
    fn from(arg: NegCoordsArg) -> Self {
        match arg {
            NegCoordsArg::RemoveObj => NegativeCoordPolicy::DeleteObject,
            NegCoordsArg::ToZero => NegativeCoordPolicy::ZeroClamp,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ResUnitArg {
    /// Pixels per inch
    Ppi,
    /// Pixels per centimeter
    Ppcm,
}

impl From<ResUnitArg> for ResolutionUnit {
    fn from(arg: ResUnitArg) -> Self {
        match arg {
            ResUnitArg::Ppi => ResolutionUnit::Ppi,
            ResUnitArg::Ppcm => ResolutionUnit::Ppcm,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum MeasurementUnitArg {
    /// Plain pixels
    #[value(name = "pixel")]
    Pixel,
    /// 1/1200 inch units
    #[value(name = "inch1200")]
    Inch1200,
    /// 1/10 millimeter units
    #[value(name = "mm10")]
    Mm10,
}

impl From<MeasurementUnitArg> for MeasurementUnit {
    fn from(arg: MeasurementUnitArg) -> Self {
        match arg {
            MeasurementUnitArg::Pixel => MeasurementUnit::Pixel,
            MeasurementUnitArg::Inch1200 => MeasurementUnit::Inch1200,
            MeasurementUnitArg::Mm10 => MeasurementUnit::Mm10,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            source,
            target,
            convert,
        }) => cmd_convert(&source, &target, convert),
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match (cli.source, cli.target) {
            (Some(source), Some(target)) => cmd_convert(&source, &target, cli.convert),
            _ => {
                println!("{}", "Usage: pageconv <SOURCE> <TARGET>".yellow());
                println!("       pageconv --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        report_error(e.as_ref());
        std::process::exit(1);
    }
}

fn report_error(error: &(dyn std::error::Error + 'static)) {
    // Validation failures carry one entry per problem.
    if let Some(Error::Validation(errors)) = error.downcast_ref::<Error>() {
        eprintln!("{}: document validation failed", "Error".red().bold());
        for error in errors {
            eprintln!("  {} {}", "-".dimmed(), error);
        }
    } else {
        eprintln!("{}: {}", "Error".red().bold(), error);
    }
}

fn cmd_convert(
    source: &Path,
    target: &Path,
    args: ConvertArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ConvertOptions::new();

    if let Some(format) = args.source_format {
        options = options.with_source_format(format.into());
    }
    if args.lenient {
        options = options.lenient();
    }
    if let Some(version) = &args.convert_to {
        // An unknown target version is logged and the document keeps
        // its source schema.
        match OutputFormat::from_identifier(version) {
            Ok(format) => options = options.convert_to(format),
            Err(e) => eprintln!(
                "{}: could not convert to target schema format: {}",
                "Warning".yellow().bold(),
                e
            ),
        }
    }
    if let Some(pattern) = &args.set_gtsid {
        options = options.with_gts_id(pattern);
    }
    if let Some(path) = &args.text_filter {
        // A broken rule file is not fatal; the run continues without
        // text filtering.
        match TextFilter::from_file(path) {
            Ok(filter) => options = options.with_text_filter(filter),
            Err(e) => eprintln!(
                "{}: could not load text filter {}: {}",
                "Warning".yellow().bold(),
                path.display(),
                e
            ),
        }
    }
    if let Some(policy) = args.neg_coords {
        options = options.with_neg_coords(policy.into());
    }
    // Per-axis overrides; the document's own resolution attributes
    // fill whichever axis is not given.
    options.x_resolution = args.xres.or(args.res);
    options.y_resolution = args.yres.or(args.res);
    if let Some(unit) = args.res_unit {
        options = options.with_resolution_unit(unit.into());
    }
    if let Some(unit) = args.measurement_unit {
        options = options.with_measurement_unit(unit.into());
    }
    options = options.transform_coords(args.transform_coords);

    let summary = pageconv::convert_file(source, target, &options)?;

    println!(
        "{} {} {} {}",
        "Converted".green().bold(),
        source.display(),
        "->".dimmed(),
        target.display()
    );
    println!("{}: {}", "Format".bold(), summary.output_format);
    if let Some(gts_id) = &summary.gts_id {
        println!("{}: {}", "GtsID".bold(), gts_id);
    }
    if summary.sanitized.is_some() && summary.objects_after != summary.objects_before {
        println!(
            "{}: {} of {} objects removed",
            "Sanitized".bold(),
            summary.objects_before - summary.objects_after,
            summary.objects_before
        );
    }
    println!("{}: {}", "Objects".bold(), summary.objects_after);

    Ok(())
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = pageconv::read_file(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PAGE {}", "Schema".bold(), doc.schema_version);
    if let Some(ref gts_id) = doc.gts_id {
        println!("{}: {}", "GtsID".bold(), gts_id);
    }
    println!("{}: {}", "Image".bold(), doc.layout.image_filename);
    println!(
        "{}: {} x {}",
        "Size".bold(),
        doc.layout.width,
        doc.layout.height
    );
    println!("{}: {}", "Unit".bold(), doc.measurement_unit);
    if let (Some(x), Some(y)) = (doc.x_resolution, doc.y_resolution) {
        let unit = doc.resolution_unit.unwrap_or_default();
        println!("{}: {} x {} {}", "Resolution".bold(), x, y, unit);
    }
    if let Some(ref creator) = doc.metadata.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(ref created) = doc.metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref last_change) = doc.metadata.last_change {
        println!("{}: {}", "Modified".bold(), last_change);
    }

    println!();
    println!("{}", "Layout Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = LayoutStats::collect(&doc.layout.regions);
    println!("{}: {}", "Regions".bold(), stats.regions);
    println!("{}: {}", "Text lines".bold(), stats.lines);
    println!("{}: {}", "Words".bold(), stats.words);
    println!("{}: {}", "Glyphs".bold(), stats.glyphs);
    println!(
        "{}: {}",
        "Border".bold(),
        if doc.layout.border.is_some() { "Yes" } else { "No" }
    );
    println!(
        "{}: {}",
        "Print space".bold(),
        if doc.layout.print_space.is_some() { "Yes" } else { "No" }
    );

    Ok(())
}

#[derive(Default)]
struct LayoutStats {
    regions: usize,
    lines: usize,
    words: usize,
    glyphs: usize,
}

impl LayoutStats {
    fn collect(regions: &[Region]) -> Self {
        let mut stats = Self::default();
        stats.visit(regions);
        stats
    }

    fn visit(&mut self, regions: &[Region]) {
        for region in regions {
            self.regions += 1;
            if let Some(content) = region.text_content() {
                for line in &content.lines {
                    self.lines += 1;
                    for word in &line.words {
                        self.words += 1;
                        self.glyphs += word.glyphs.len();
                    }
                }
            }
            self.visit(&region.children);
        }
    }
}

fn cmd_version() {
    println!("{} {}", "pageconv".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PAGE XML layout document converter");
    println!();
    println!(
        "Supported PAGE versions: {}",
        pageconv::SchemaVersion::ALL
            .map(|v| v.identifier())
            .join(", ")
    );
    println!("License: MIT");
}
