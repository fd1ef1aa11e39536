use std::fs;
use std::path::Path;

use snippetgen::app::diagnostics::Diagnostic;
use snippetgen::app::extract::MarkerExtractor;
use snippetgen::app::generate::{GenerateOptions, Generator};
use snippetgen::app::walk::SkipRules;
use snippetgen::infra::render::ModuleRenderer;

/// Tree matching `fixtures/snippets.rs` when generated relative to its root.
pub fn write_fixture_tree(root: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(root.join("a"))?;
    fs::create_dir_all(root.join("src"))?;
    fs::write(
        root.join("a/ex.txt"),
        "intro\n\n# @snippet_begin(Hello)\nprint(1)\n# @snippet_end\ntrailer\n",
    )?;

    let mut lib = String::new();
    for line in 1..=9 {
        lib.push_str(&format!("// line {line}\n"));
    }
    lib.push_str("// @snippet_begin(Quote)\nlet s = \"it's\";\n\tdone\n// @snippet_end\n");
    fs::write(root.join("src/lib.rs"), lib)?;
    Ok(())
}

pub fn options(root: &Path) -> GenerateOptions {
    GenerateOptions {
        package: "generated".into(),
        scan_dir: root.to_path_buf(),
        rel_base: Some(root.to_path_buf()),
        skip: SkipRules::default(),
        location_import: "snippetgen::Location".into(),
    }
}

pub fn generate(options: &GenerateOptions) -> anyhow::Result<(String, Vec<Diagnostic>)> {
    let generator = Generator::new(MarkerExtractor::new(), ModuleRenderer::new()?);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let rendered = generator.generate(options, &mut diagnostics)?;
    Ok((rendered, diagnostics))
}
