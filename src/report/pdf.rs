//! Final output: SVG page → single-page PDF on disk.

use std::{
    fs::{File, create_dir_all},
    io::{BufWriter, Write},
    path::Path,
};

use log::{debug, info};
use svg2pdf::{
    ConversionOptions, PageOptions,
    usvg::{
        self,
        fontdb::{Database, Family, Query},
    },
};

use crate::{
    report::{figure::Figure, render::render_svg},
    utils::{
        config::ReportConfig,
        error::{ReportError, Result},
    },
};

/// Renders the figure with its shared legend and writes it to `config.output_path`.
pub fn compose_and_save(figure: &Figure, config: &ReportConfig) -> Result<()> {
    let svg = render_svg(figure, config)?;
    let pdf = svg_to_pdf(&svg)?;
    write_output(&config.output_path, &pdf)?;
    info!(
        "Wrote {} panels to {} ({} bytes)",
        figure.panels.len(),
        config.output_path.display(),
        pdf.len()
    );
    Ok(())
}

/// Installed faces tried, in order, when the generic sans-serif family does not resolve.
const SANS_FALLBACKS: [&str; 6] = [
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "FreeSans",
    "Helvetica",
    "Arial",
];

pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    {
        // usvg drops text it cannot shape, so the generic family must map to a real face
        let fontdb = options.fontdb_mut();
        fontdb.load_system_fonts();
        resolve_sans_serif(fontdb)?;
    }
    debug!("font database holds {} faces", options.fontdb.len());

    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| ReportError::Pdf(e.to_string()))?;
    svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
        .map_err(|e| ReportError::Pdf(format!("{e:?}")))
}

/// Points the generic `sans-serif` family at an installed face.
pub fn resolve_sans_serif(fontdb: &mut Database) -> Result<()> {
    let resolves = |db: &Database, family: Family<'_>| {
        db.query(&Query {
            families: &[family],
            ..Query::default()
        })
        .is_some()
    };

    if resolves(&*fontdb, Family::SansSerif) {
        return Ok(());
    }

    let fallback = SANS_FALLBACKS
        .iter()
        .find(|&&name| resolves(&*fontdb, Family::Name(name)))
        .map(|name| name.to_string())
        .or_else(|| {
            fontdb
                .faces()
                .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
        })
        .ok_or_else(|| ReportError::Pdf("no font face available to render text".to_string()))?;

    debug!("sans-serif resolved to {:?}", fallback);
    fontdb.set_sans_serif_family(fallback);
    Ok(())
}

/// Writes through a scoped buffered handle; the file is closed on every return path.
fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| ReportError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .and_then(|_| writer.flush())
        .map_err(|e| ReportError::io(path, e))
}
