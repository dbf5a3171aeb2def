use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{Local, Utc};
use tracing::{info, info_span};

use pkspec_cli::workflow::{
    catalog_listings, check_specification, generate_specification, load_type_selection,
    resume_draft, save_wizard_draft,
};
use pkspec_core::PreflightReport;
use pkspec_model::PackagingSpecification;
use pkspec_persistence::{default_file_name, load_specification, save_specification};
use pkspec_report::{RenderOptions, ReportFormat, render_report, write_report};

use crate::cli::{GenerateArgs, RenderArgs, RenderFormatArg, ResumeArgs, SpecArgs};
use crate::summary::{print_catalogs, print_preview, print_report};

pub fn run_catalog() -> Result<()> {
    print_catalogs(&catalog_listings());
    Ok(())
}

/// Returns the step-1 pre-flight; a blocked report means nothing was written.
pub fn run_generate(args: &GenerateArgs) -> Result<PreflightReport> {
    let span = info_span!("generate", input = %args.type_selection.display());
    let _guard = span.enter();

    let selection = load_type_selection(&args.type_selection)?;
    let generation = generate_specification(selection, Utc::now())?;
    print_report(&generation.report);
    let Some(specification) = generation.specification else {
        return Ok(generation.report);
    };

    write_specification(&specification, args.output.as_deref())?;
    if let (Some(path), Some(store)) = (&args.draft, &generation.store) {
        save_wizard_draft(store, path)?;
        println!("Draft: {}", path.display());
    }
    Ok(generation.report)
}

/// Returns the pre-flight of the resumed specification.
pub fn run_resume(args: &ResumeArgs) -> Result<PreflightReport> {
    let span = info_span!("resume", draft = %args.draft.display());
    let _guard = span.enter();

    let Some(mut store) = resume_draft(&args.draft)? else {
        bail!("no draft at {}", args.draft.display());
    };
    let specification = store.full_data(Utc::now());
    let report = check_specification(&specification);
    print_report(&report);
    write_specification(&specification, args.output.as_deref())?;
    Ok(report)
}

fn write_specification(
    specification: &PackagingSpecification,
    output: Option<&Path>,
) -> Result<()> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(default_file_name(Local::now().date_naive())));
    save_specification(specification, &output)
        .with_context(|| format!("save specification {}", output.display()))?;
    println!("Specification: {}", output.display());
    Ok(())
}

pub fn run_check(args: &SpecArgs) -> Result<PreflightReport> {
    let specification = read_specification(&args.specification)?;
    let report = check_specification(&specification);
    print_report(&report);
    Ok(report)
}

pub fn run_preview(args: &SpecArgs) -> Result<()> {
    let specification = read_specification(&args.specification)?;
    print_preview(&specification);
    Ok(())
}

pub fn run_render(args: &RenderArgs) -> Result<()> {
    let span = info_span!("render", input = %args.specification.display());
    let _guard = span.enter();

    let specification = read_specification(&args.specification)?;
    let mut options = RenderOptions::new(Local::now().date_naive());
    if let Some(title) = &args.title {
        options = options.with_title(title);
    }
    if args.no_images {
        options = options.without_images();
    }
    let format = match args.format {
        RenderFormatArg::Text => ReportFormat::Text,
        RenderFormatArg::Html => ReportFormat::Html,
    };

    match &args.output {
        Some(path) => {
            write_report(path, &specification, &options, format)?;
            println!("Document: {}", path.display());
        }
        None => {
            let document = render_report(&specification, &options, format)?;
            if document.ends_with('\n') {
                print!("{document}");
            } else {
                println!("{document}");
            }
        }
    }
    Ok(())
}

fn read_specification(path: &Path) -> Result<PackagingSpecification> {
    let specification = load_specification(path).map_err(|error| {
        let message = match error.suggestion() {
            Some(suggestion) => format!("{} {suggestion}", error.user_message()),
            None => error.user_message(),
        };
        anyhow::Error::new(error).context(message)
    })?;
    info!(
        path = %path.display(),
        marking_forms = specification.marking_forms.len(),
        "Loaded specification"
    );
    Ok(specification)
}
