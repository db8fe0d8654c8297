use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use tracing::info;
use wuapi_dispatch::{load_fixture, InMemoryDispatch, ObjectRef};
use wuapi_model::{CategoryIndex, CategoryRecord, MaterializeOptions, Materializer};
use wuapi_variant::Variant;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let options = load_options(cli.config.as_deref(), cli.link_parents)?;
    match cli.command {
        Command::Category(args) => cmd_category(args, options, cli.format),
        Command::Categories(args) => cmd_categories(args, options, cli.format),
        Command::Path(args) => cmd_path(args, options),
    }
}

fn cmd_category(args: FixtureArgs, options: MaterializeOptions, format: OutputFormat) -> anyhow::Result<()> {
    let (dispatch, root) = load_graph(&args.fixture)?;
    let record = Materializer::with_options(&dispatch, options)
        .category(&root)
        .with_context(|| format!("materializing {}", args.fixture.display()))?;
    info!(descendants = record.descendant_count(), "category materialized");
    print(std::slice::from_ref(&record), format)
}

fn cmd_categories(args: FixtureArgs, options: MaterializeOptions, format: OutputFormat) -> anyhow::Result<()> {
    let (dispatch, root) = load_graph(&args.fixture)?;
    let records = Materializer::with_options(&dispatch, options)
        .categories(&root)
        .with_context(|| format!("materializing {}", args.fixture.display()))?;
    info!(count = records.len(), "categories materialized");
    print(&records, format)
}

fn cmd_path(args: PathArgs, options: MaterializeOptions) -> anyhow::Result<()> {
    let (dispatch, root) = load_graph(&args.fixture)?;
    let materializer = Materializer::with_options(&dispatch, options);
    let records = if args.collection {
        materializer.categories(&root)?
    } else {
        vec![materializer.category(&root)?]
    };
    let index = CategoryIndex::build(&records);
    if index.get(&args.category_id).is_none() {
        bail!("category {} not found", args.category_id);
    }
    println!("{}", index.path(&args.category_id).join(" › "));
    Ok(())
}

/// Read options from an optional TOML file, then apply command-line overrides.
fn load_options(config: Option<&Path>, link_parents: bool) -> anyhow::Result<MaterializeOptions> {
    let mut options = match config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str::<MaterializeOptions>(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => MaterializeOptions::default(),
    };
    if link_parents {
        options.link_parents = true;
    }
    Ok(options)
}

fn load_graph(path: &Path) -> anyhow::Result<(InMemoryDispatch, ObjectRef)> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading fixture {}", path.display()))?;
    let mut dispatch = InMemoryDispatch::new();
    let root = load_fixture(&mut dispatch, &json)
        .with_context(|| format!("loading fixture {}", path.display()))?;
    match root {
        Variant::Object(handle) => Ok((dispatch, handle)),
        other => bail!("fixture root must be an object or collection, found {}", other.kind()),
    }
}

fn print(records: &[CategoryRecord], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(records)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
    }
    Ok(())
}

fn render_text(records: &[CategoryRecord]) -> String {
    let mut out = String::new();
    for record in records {
        render_node(&mut out, record, 0);
    }
    out
}

fn render_node(out: &mut String, record: &CategoryRecord, depth: usize) {
    let _ = write!(
        out,
        "{:indent$}{} {} [{}] order={}",
        "",
        record.category_id.cyan(),
        record.name.bold(),
        record.category_type.yellow(),
        record.order,
        indent = depth * 2,
    );
    if let Some(image) = &record.image {
        let _ = write!(out, " image={}x{}", image.width, image.height);
    }
    if let Some(parent) = &record.parent_id {
        let _ = write!(out, " parent={parent}");
    }
    out.push('\n');
    for child in &record.children {
        render_node(out, child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wuapi_model::ImageInfo;

    fn record(id: &str, children: Vec<CategoryRecord>) -> CategoryRecord {
        CategoryRecord {
            category_id: id.into(),
            name: format!("{id} name"),
            category_type: "Product".into(),
            children,
            ..Default::default()
        }
    }

    #[test]
    fn text_is_indented_by_depth() {
        colored::control::set_override(false);
        let mut root = record("R", vec![record("C", vec![])]);
        root.image = Some(ImageInfo {
            width: 48,
            height: 32,
            ..Default::default()
        });
        let text = render_text(&[root]);
        assert_eq!(
            text,
            "R R name [Product] order=0 image=48x32\n  C C name [Product] order=0\n"
        );
    }

    #[test]
    fn options_default_without_config() {
        let options = load_options(None, false).unwrap();
        assert_eq!(options, MaterializeOptions::default());
        assert!(load_options(None, true).unwrap().link_parents);
    }

    #[test]
    fn options_read_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "link_parents = true").unwrap();
        let options = load_options(Some(file.path()), false).unwrap();
        assert!(options.link_parents);
    }

    #[test]
    fn bad_config_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "link_parents = \"sometimes\"").unwrap();
        assert!(load_options(Some(file.path()), false).is_err());
    }

    #[test]
    fn scalar_fixture_root_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\"just a string\"").unwrap();
        let err = load_graph(file.path()).unwrap_err();
        assert!(err.to_string().contains("found string"));
    }

    #[test]
    fn collection_fixture_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"[{{"CategoryID": "A", "Children": null, "Description": "", "Image": null,
                 "Name": "a", "Order": 1, "Type": "Product"}}]"#
        )
        .unwrap();
        let (dispatch, root) = load_graph(file.path()).unwrap();
        let records = Materializer::new(&dispatch).categories(&root).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].order, 1);
    }
}
