// assay/src/commands/render.rs
//
// USE CASE: Print one named query with its placeholders filled.

use std::path::Path;

use assay_core::domain::template::Params;
use assay_core::infrastructure::templates::TemplateStore;

pub fn execute(
    template_dir: &Path,
    file: &str,
    name: &str,
    params: Vec<(String, String)>,
) -> anyhow::Result<()> {
    let mut store = TemplateStore::new(template_dir);
    let params: Params = params.into_iter().collect();

    let sql = store.get_query(name, Some(file), Some(&params))?;
    println!("{}", sql);
    Ok(())
}
