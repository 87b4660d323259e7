// assay/src/commands/list.rs
//
// USE CASE: Show which queries each template file defines.

use std::path::Path;

use assay_core::infrastructure::templates::TemplateStore;

pub fn execute(template_dir: &Path, file: Option<&str>) -> anyhow::Result<()> {
    let mut store = TemplateStore::new(template_dir);

    let files = match file {
        Some(f) => vec![f.to_string()],
        None => {
            let count = store.preload()?;
            if count == 0 {
                println!("No template files under {}", template_dir.display());
                return Ok(());
            }
            store.list_files()
        }
    };

    for f in files {
        store.load_file(&f)?;
        let Some(template) = store.file(&f) else {
            continue;
        };

        println!("📄 {} ({} queries)", f, template.queries.len());
        for spec in template.query_specs() {
            let first_line = spec.body.lines().next().unwrap_or_default();
            println!("   ➜ {:<24} {}", spec.name, first_line);
        }
    }
    Ok(())
}
