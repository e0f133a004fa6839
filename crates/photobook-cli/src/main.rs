use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::{LevelFilter, debug};
use std::path::PathBuf;

use photobook_layout::{LayoutOptions, LayoutStyle, PageSize};

#[derive(Parser)]
#[command(name = "photobook", about = "Photo book layout CLI", version)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a photo manifest into book pages
    Layout {
        /// Photo manifest (JSON array of photo metadata)
        #[arg(short, long)]
        photos: PathBuf,

        /// Layout options file (JSON); flags below override it
        #[arg(long)]
        options: Option<PathBuf>,

        /// Book page size
        #[arg(long, value_enum)]
        page_size: Option<PageSizeArg>,

        /// Layout style
        #[arg(long, value_enum)]
        style: Option<StyleArg>,

        /// Add a cover page
        #[arg(long)]
        cover: bool,

        /// Photo to use on the cover
        #[arg(long)]
        cover_photo: Option<String>,

        /// Cover title
        #[arg(long)]
        title: Option<String>,

        /// Add a back page
        #[arg(long)]
        back_page: bool,

        /// Start a new page whenever the capture date changes
        #[arg(long)]
        group_by_date: bool,

        /// Tilt photos in styles that allow it
        #[arg(long)]
        rotate: bool,

        /// Maximum page count of the print product
        #[arg(long)]
        max_pages: Option<usize>,

        /// Output file for the layout (JSON); printed to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Check the generated layout and fail on violations
        #[arg(long)]
        validate: bool,
    },

    /// Estimate the page count for a number of photos
    Estimate {
        /// Number of photos
        #[arg(short, long)]
        count: usize,

        /// Layout style (recommended style when omitted)
        #[arg(long, value_enum)]
        style: Option<StyleArg>,
    },

    /// Recommend a style for a number of photos
    Recommend {
        /// Number of photos
        #[arg(short, long)]
        count: usize,
    },

    /// List the template catalog
    Templates,

    /// List the layout styles
    Styles,

    /// Show the print geometry of a page size
    Dimensions {
        /// Book page size
        #[arg(long, default_value = "8x8", value_enum)]
        page_size: PageSizeArg,

        /// Output resolution
        #[arg(long, default_value = "300")]
        dpi: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PageSizeArg {
    #[value(name = "8x8")]
    Square8,
    #[value(name = "10x10")]
    Square10,
    #[value(name = "12x12")]
    Square12,
    #[value(name = "8x11")]
    Portrait8x11,
    A4,
    Letter,
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    Classic,
    Collage,
    Magazine,
    Minimalist,
}

impl From<PageSizeArg> for PageSize {
    fn from(arg: PageSizeArg) -> Self {
        match arg {
            PageSizeArg::Square8 => Self::Square8,
            PageSizeArg::Square10 => Self::Square10,
            PageSizeArg::Square12 => Self::Square12,
            PageSizeArg::Portrait8x11 => Self::Portrait8x11,
            PageSizeArg::A4 => Self::A4,
            PageSizeArg::Letter => Self::Letter,
        }
    }
}

impl From<StyleArg> for LayoutStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Classic => Self::Classic,
            StyleArg::Collage => Self::Collage,
            StyleArg::Magazine => Self::Magazine,
            StyleArg::Minimalist => Self::Minimalist,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match cli.command {
        Commands::Layout {
            photos,
            options,
            page_size,
            style,
            cover,
            cover_photo,
            title,
            back_page,
            group_by_date,
            rotate,
            max_pages,
            output,
            validate,
        } => {
            let mut layout_options = match &options {
                Some(path) => LayoutOptions::load(path)
                    .await
                    .with_context(|| format!("Failed to load options from {}", path.display()))?,
                None => LayoutOptions::default(),
            };

            if let Some(page_size) = page_size {
                layout_options.page_size = page_size.into();
            }
            if let Some(style) = style {
                layout_options.layout_style = style.into();
            }
            layout_options.include_cover |= cover;
            layout_options.include_back_page |= back_page;
            layout_options.group_by_date |= group_by_date;
            layout_options.allow_rotation |= rotate;
            if cover_photo.is_some() {
                layout_options.cover_photo_id = cover_photo;
            }
            if title.is_some() {
                layout_options.title = title;
            }
            if max_pages.is_some() {
                layout_options.max_pages = max_pages;
            }

            let photo_set = photobook_layout::load_photos(&photos)
                .await
                .with_context(|| format!("Failed to load photos from {}", photos.display()))?;
            debug!("Loaded {} photo(s) from {}", photo_set.len(), photos.display());

            let result = photobook_layout::generate_layout(&photo_set, &layout_options)?;

            // Keep stdout clean for the JSON when no output file is given
            let mut summary = vec![
                "Layout Summary:".to_string(),
                format!("  Style: {}", layout_options.layout_style),
                format!("  Page size: {}", layout_options.page_size),
                format!("  Pages: {}", result.total_pages),
                format!("  Photos placed: {}", result.photos_used),
                format!("  Photos unused: {}", result.photos_unused.len()),
                format!("  Warnings: {}", result.warnings.len()),
            ];
            summary.extend(result.warnings.iter().map(|w| format!("    - {}", w)));
            for line in &summary {
                if output.is_some() {
                    println!("{}", line);
                } else {
                    eprintln!("{}", line);
                }
            }

            if validate {
                let violations = photobook_layout::validate_layout_against(&result, &photo_set);
                if !violations.is_empty() {
                    for violation in &violations {
                        eprintln!("  ✗ {}", violation);
                    }
                    bail!("Layout has {} violation(s)", violations.len());
                }
                eprintln!("  ✓ Layout is valid");
            }

            let json = serde_json::to_string_pretty(&result)?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, json)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Layout → {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Estimate { count, style } => {
            let style = style
                .map(LayoutStyle::from)
                .unwrap_or_else(|| photobook_layout::recommend_style(count));
            let per_page = photobook_layout::optimal_photos_per_page_for_style(count, style);
            let pages = photobook_layout::estimate_page_count(count, style, None);

            println!("Estimate for {} photo(s) in {} style:", count, style);
            println!("  Estimated pages: {}", pages);
            println!("  Optimal photos per page: {}", per_page);
        }

        Commands::Recommend { count } => {
            let style = photobook_layout::recommend_style(count);
            let rules = photobook_layout::get_style_rules(style);
            let templates: Vec<_> = rules.templates.iter().map(|t| t.as_str()).collect();

            println!("Recommended style for {} photo(s): {}", count, style);
            println!("  Templates: {}", templates.join(", "));
            println!(
                "  Photos per page: {}-{}",
                rules.photos_per_page_range.min, rules.photos_per_page_range.max
            );
        }

        Commands::Templates => {
            for template in photobook_layout::get_all_templates() {
                println!(
                    "{:<12} {:>2} photo(s)  {}",
                    template.id.as_str(),
                    template.photos_per_page,
                    template.description
                );
            }
        }

        Commands::Styles => {
            for rules in photobook_layout::get_all_styles() {
                let templates: Vec<_> = rules.templates.iter().map(|t| t.as_str()).collect();
                println!("{}:", rules.style);
                println!(
                    "  Photos per page: {}-{}",
                    rules.photos_per_page_range.min, rules.photos_per_page_range.max
                );
                println!(
                    "  Margin / gutter: {}in / {}in",
                    rules.spacing.margin, rules.spacing.gutter
                );
                println!("  Templates: {}", templates.join(", "));
                println!(
                    "  Rotation: {}  Asymmetry: {}",
                    rules.allow_rotation, rules.allow_asymmetry
                );
            }
        }

        Commands::Dimensions { page_size, dpi } => {
            if dpi == 0 {
                bail!("DPI must be greater than zero");
            }
            let page_size = PageSize::from(page_size);
            let dims = photobook_layout::get_dimensions(page_size);
            let printable = photobook_layout::get_printable_area(page_size);
            let content = photobook_layout::get_content_area(page_size);
            let pixels = photobook_layout::get_dimensions_in_pixels(page_size, dpi);

            println!("Page size {}:", page_size);
            println!("  Trim: {}in × {}in", dims.width, dims.height);
            println!("  Bleed: {}in  Safe zone: {}in", dims.bleed, dims.safe_zone);
            println!(
                "  Content area: {:.3}in × {:.3}in",
                content.width, content.height
            );
            println!(
                "  Printable area: {:.3}in × {:.3}in",
                printable.width, printable.height
            );
            println!("  At {} DPI: {} × {} px", dpi, pixels.width, pixels.height);
            println!(
                "  Orientation: {:?}",
                photobook_layout::get_page_orientation(page_size)
            );
        }
    }

    Ok(())
}
