//! Rendering of generated modules to Rust source text.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use minijinja::Environment;
use serde::Serialize;

use crate::domain::errors::GenerateError;
use crate::domain::model::{Fragment, GeneratedModule};

const MODULE_TEMPLATE_NAME: &str = "rust_module";

/// Renders a [`GeneratedModule`] through a `minijinja` template.
pub struct ModuleRenderer {
    source: Cow<'static, str>,
}

impl ModuleRenderer {
    /// Renderer using the built-in module template.
    pub fn new() -> Result<Self, GenerateError> {
        Self::from_source(Cow::Borrowed(DEFAULT_MODULE_TEMPLATE))
    }

    /// Renderer using a template loaded from `path`.
    pub fn with_template_file(path: &Path) -> Result<Self, GenerateError> {
        let source = fs::read_to_string(path).map_err(|source| GenerateError::Template {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_source(Cow::Owned(source))
    }

    fn from_source(source: Cow<'static, str>) -> Result<Self, GenerateError> {
        let renderer = Self { source };
        // Surface syntax errors before any walking happens.
        renderer.environment()?;
        Ok(renderer)
    }

    fn environment(&self) -> Result<Environment<'_>, GenerateError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template(MODULE_TEMPLATE_NAME, &self.source)?;
        Ok(env)
    }

    /// Render `module`; the output always ends with a newline.
    pub fn render(&self, module: &GeneratedModule) -> Result<String, GenerateError> {
        let context = ModuleContext {
            package: &module.package,
            import: module.import.as_deref(),
            location_type: module.location_type(),
            fragments: &module.fragments,
        };
        let env = self.environment()?;
        let mut rendered = env.get_template(MODULE_TEMPLATE_NAME)?.render(context)?;
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        Ok(rendered)
    }
}

#[derive(Serialize)]
struct ModuleContext<'a> {
    package: &'a str,
    import: Option<&'a str>,
    location_type: Option<&'a str>,
    fragments: &'a [Fragment],
}

const DEFAULT_MODULE_TEMPLATE: &str = r#"// Code generated by snippetgen. DO NOT EDIT.

#[allow(non_upper_case_globals)]
pub mod {{ package }} {
{% if import %}
    use {{ import }};
{% endif %}
{% for fragment in fragments %}

    pub const {{ fragment.name }}: &[u8] = {{ fragment.code_literal }};
    pub const {{ fragment.name }}Location: {{ location_type }} = {{ location_type }} {
        file: {{ fragment.file_literal }},
        start_line: {{ fragment.start_line }},
        end_line: {{ fragment.end_line }},
    };
{% endfor %}
}
"#;
