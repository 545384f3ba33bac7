use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use postkit::{
    Composer, ComposerOpts, FileTemplateStore, FontBook, HeadlessRenderer, RasterFormat,
    RenderSettings, Template, TemplateStore,
};

#[derive(Parser, Debug)]
#[command(name = "postkit", version)]
struct Cli {
    /// Log filter, e.g. `info` or `postkit=debug`.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one template over one background image.
    Render(RenderArgs),
    /// Render one template over many background images.
    Batch(BatchArgs),
    /// Manage a file-backed template store.
    Templates(TemplatesArgs),
}

#[derive(Parser, Debug)]
struct AssetArgs {
    /// Template JSON.
    #[arg(long)]
    template: PathBuf,

    /// Logo artwork (raster or SVG).
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Register a font face: `FAMILY[:bold][:italic]=PATH`. Repeatable.
    #[arg(long = "font", value_parser = parse_font)]
    fonts: Vec<FontArg>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    assets: AssetArgs,

    /// Background image.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Output path; `.jpg`/`.jpeg` selects JPEG, anything else PNG.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    #[command(flatten)]
    assets: AssetArgs,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    /// Background images, one output each.
    #[arg(required = true)]
    images: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct TemplatesArgs {
    /// Store file.
    #[arg(long)]
    store: PathBuf,

    #[command(subcommand)]
    cmd: TemplatesCommand,
}

#[derive(Subcommand, Debug)]
enum TemplatesCommand {
    /// List stored templates.
    List,
    /// Import a template file (one template or an array).
    Import { file: PathBuf },
    /// Export one template.
    Export {
        id: String,
        /// Output directory; the file name is derived from the template name.
        #[arg(long)]
        out_dir: PathBuf,
    },
    /// Export every template into one file.
    ExportAll {
        #[arg(long)]
        out_dir: PathBuf,
    },
    /// Delete a template by id.
    Delete { id: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Jpeg,
}

impl From<FormatChoice> for RasterFormat {
    fn from(v: FormatChoice) -> Self {
        match v {
            FormatChoice::Png => RasterFormat::Png,
            FormatChoice::Jpeg => RasterFormat::Jpeg,
        }
    }
}

#[derive(Clone, Debug)]
struct FontArg {
    family: String,
    bold: bool,
    italic: bool,
    path: PathBuf,
}

fn parse_font(s: &str) -> Result<FontArg, String> {
    let (face, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FAMILY=PATH, got '{s}'"))?;
    let mut parts = face.split(':');
    let family = parts.next().unwrap_or_default().trim();
    if family.is_empty() {
        return Err("font family must not be empty".to_owned());
    }
    let (mut bold, mut italic) = (false, false);
    for flag in parts {
        match flag.trim() {
            "bold" => bold = true,
            "italic" => italic = true,
            other => return Err(format!("unknown font flag '{other}'")),
        }
    }
    Ok(FontArg {
        family: family.to_owned(),
        bold,
        italic,
        path: PathBuf::from(path),
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Templates(args) => cmd_templates(args),
    }
}

fn init_tracing(filter: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_new(filter)
        .with_context(|| format!("invalid log filter '{filter}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn read_template(path: &Path) -> anyhow::Result<Template> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("open template '{}'", path.display()))?;
    let t = Template::from_json_str(&s).with_context(|| "parse template JSON")?;
    t.validate()?;
    Ok(t)
}

fn load_fonts(fonts: &[FontArg]) -> anyhow::Result<FontBook> {
    let mut book = FontBook::new();
    for f in fonts {
        book.register_file(&f.family, f.bold, f.italic, &f.path)?;
    }
    Ok(book)
}

fn read_bytes(path: &Path, what: &str) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read {what} '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let template = read_template(&args.assets.template)?;
    let fonts = load_fonts(&args.assets.fonts)?;
    let format = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .and_then(RasterFormat::from_extension)
        .unwrap_or_default();

    let mut composer = Composer::new(ComposerOpts::default(), fonts);
    composer.apply_template(&template)?;
    if let Some(path) = &args.image {
        composer.set_background_image_bytes(&read_bytes(path, "image")?)?;
    }
    if let Some(path) = &args.assets.logo {
        composer.set_logo_image_bytes(&read_bytes(path, "logo")?)?;
    }
    let bytes = composer.export_raster(format)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, bytes)
        .with_context(|| format!("write '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let scene = read_template(&args.assets.template)?.scene()?;
    let fonts = load_fonts(&args.assets.fonts)?;
    let logo = args
        .assets
        .logo
        .as_deref()
        .map(|p| -> anyhow::Result<_> { Ok(postkit::decode_logo(&read_bytes(p, "logo")?)?) })
        .transpose()?;

    // An unreadable file is reported like an undecodable one.
    let inputs: Vec<Vec<u8>> = args
        .images
        .iter()
        .map(|p| {
            std::fs::read(p).unwrap_or_else(|e| {
                tracing::warn!(path = %p.display(), error = %e, "input unreadable");
                Vec::new()
            })
        })
        .collect();

    let mut sink = postkit::DirBatchSink::new(&args.out_dir);
    let mut renderer = HeadlessRenderer::new(fonts, RenderSettings::default(), logo);
    let report = renderer.render_batch(&scene, &inputs, args.format.into(), &mut sink)?;

    for (i, reason) in &report.failed {
        eprintln!("skipped {}: {reason}", args.images[*i].display());
    }
    eprintln!(
        "wrote {} of {} images to {}",
        report.rendered,
        inputs.len(),
        args.out_dir.display()
    );
    if report.rendered == 0 {
        anyhow::bail!("no input could be rendered");
    }
    Ok(())
}

fn cmd_templates(args: TemplatesArgs) -> anyhow::Result<()> {
    let mut store = FileTemplateStore::new(&args.store);
    match args.cmd {
        TemplatesCommand::List => {
            for t in store.list()? {
                println!(
                    "{}\t{}\t{}x{}\t{} text layer(s)",
                    t.id,
                    t.name,
                    t.canvas_width,
                    t.canvas_height,
                    t.text_configs.len()
                );
            }
        }
        TemplatesCommand::Import { file } => {
            let bytes = read_bytes(&file, "template file")?;
            let imported = postkit::import_templates(&mut store, &bytes)?;
            for t in &imported {
                println!("{}\t{}", t.id, t.name);
            }
            eprintln!("imported {} template(s)", imported.len());
        }
        TemplatesCommand::Export { id, out_dir } => {
            let t = store
                .list()?
                .into_iter()
                .find(|t| t.id == id)
                .with_context(|| format!("no template with id '{id}'"))?;
            write_export(&out_dir, &postkit::export_one(&t)?)?;
        }
        TemplatesCommand::ExportAll { out_dir } => match postkit::export_all(&store)? {
            Some(f) => write_export(&out_dir, &f)?,
            None => eprintln!("store is empty, nothing exported"),
        },
        TemplatesCommand::Delete { id } => store.delete(&id)?,
    }
    Ok(())
}

fn write_export(dir: &Path, file: &postkit::ExportFile) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("create '{}'", dir.display()))?;
    let path = dir.join(&file.name);
    std::fs::write(&path, &file.contents)
        .with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
