pub mod group;
pub mod html;
pub mod page;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::config::{MODELS_PAGE, SIZES_PAGE};
use crate::denormalize::SizeRecord;

use html::NavItem;
use page::TablesPage;

/// Write the size and model pages into `build_dir`, returning their paths.
pub fn write_pages(records: &[SizeRecord], build_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(build_dir)
        .with_context(|| format!("Failed to create {}", build_dir.display()))?;

    let sizes = TablesPage::new(&SIZES_PAGE, group::group_reference_sizes(records));
    let models = TablesPage::new(&MODELS_PAGE, group::group_labels(records));

    let nav = [
        NavItem {
            filename: sizes.filename(),
            title: sizes.title.clone(),
        },
        NavItem {
            filename: models.filename(),
            title: models.title.clone(),
        },
    ];

    let rendered = [
        (sizes.filename(), html::render_page(&sizes, &nav), sizes.groups.len()),
        (models.filename(), html::render_page(&models, &nav), models.groups.len()),
    ];

    let mut written = Vec::new();
    for (filename, contents, groups) in rendered {
        let path = build_dir.join(&filename);
        fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {} ({} groups)", path.display(), groups);
        written.push(path);
    }
    Ok(written)
}
