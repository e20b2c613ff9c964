//! Instruction files from templates
//!
//! Fills `{{KEY}}` placeholders in a template with project details, so a
//! standing system instruction can be kept alongside a project.

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{([A-Za-z_]+)\}\}").expect("static regex is valid"))
}

/// Project details substituted into a template
#[derive(Debug, Clone)]
pub struct InstructionContext {
    pub project_name: String,
    pub technologies: String,
    pub style_guide: String,
    pub testing_framework: String,
    pub rules: String,
}

impl Default for InstructionContext {
    fn default() -> Self {
        Self {
            project_name: "Unnamed Project".to_string(),
            technologies: "Not specified".to_string(),
            style_guide: "Not specified".to_string(),
            testing_framework: "Not specified".to_string(),
            rules: "- Follow standard best practices.".to_string(),
        }
    }
}

impl InstructionContext {
    fn values(&self) -> HashMap<&'static str, String> {
        HashMap::from([
            ("PROJECT_NAME", self.project_name.clone()),
            ("TECHNOLOGIES", self.technologies.clone()),
            ("STYLE_GUIDE", self.style_guide.clone()),
            ("TESTING_FRAMEWORK", self.testing_framework.clone()),
            // Rules typed on a command line carry literal "\n"
            ("RULES", self.rules.replace("\\n", "\n")),
        ])
    }
}

/// Replace every `{{KEY}}`; unknown keys become `{{__KEY_UNDEFINED__}}`
pub fn render(template: &str, context: &InstructionContext) -> String {
    let values = context.values();

    placeholder()
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            values
                .get(key)
                .cloned()
                .unwrap_or_else(|| format!("{{{{__{}_UNDEFINED__}}}}", key))
        })
        .into_owned()
}

/// Render `template` into `output`
pub fn generate(template: &Path, output: &Path, context: &InstructionContext) -> Result<()> {
    let content = fs::read_to_string(template)
        .with_context(|| format!("Template file not found at {}", template.display()))?;

    let rendered = render(&content, context);

    fs::write(output, rendered)
        .with_context(|| format!("Could not write output file at {}", output.display()))?;

    tracing::debug!(template = %template.display(), output = %output.display(), "rendered instruction");
    Ok(())
}
