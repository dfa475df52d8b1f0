//! Template rendering with Handlebars
//!
//! Supported markup is plain Handlebars: `{{Field}}`, `{{#if Flag}}...{{/if}}`,
//! `{{#unless Flag}}...{{/unless}}`, `{{#each List}}...{{/each}}` and the `or` /
//! `and` subexpressions.
//!
//! The registry runs in strict mode with strict conditional helpers, so a
//! reference to a field absent from the [`RenderContext`] fails with
//! [`ScaffoldError::UndefinedReference`] wherever it appears, including inside
//! `if` and `unless`. Output is not HTML-escaped: templates produce
//! source code, not markup. Rendering is pure; identical body and context always
//! produce identical output.

use super::context::RenderContext;
use super::helpers;
use super::resolver::ResolvedTemplate;
use crate::error::{Result, ScaffoldError};
use handlebars::{Handlebars, RenderError, RenderErrorReason};

/// Renders resolved templates against a render context
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        helpers::register(&mut registry);
        Self { registry }
    }

    /// Render a template located by the resolver
    pub fn render(
        &self,
        template: &ResolvedTemplate<'_>,
        context: &RenderContext,
    ) -> Result<String> {
        self.render_str(&template.qualified_id(), template.body, context)
    }

    /// Render a raw template body; `template_id` only labels errors
    pub fn render_str(
        &self,
        template_id: &str,
        body: &str,
        context: &RenderContext,
    ) -> Result<String> {
        self.registry
            .render_template(body, context)
            .map_err(|err| map_render_error(template_id, err))
    }
}

fn map_render_error(template_id: &str, err: RenderError) -> ScaffoldError {
    match err.reason() {
        RenderErrorReason::TemplateError(syntax) => {
            let (line, column) = match syntax.pos() {
                Some((line, column)) => (Some(line), Some(column)),
                None => (None, None),
            };
            ScaffoldError::TemplateSyntax {
                template: template_id.to_string(),
                line,
                column,
                message: syntax.reason().to_string(),
            }
        }
        RenderErrorReason::MissingVariable(field) => ScaffoldError::UndefinedReference {
            field: field.clone().unwrap_or_else(|| "<unknown>".to_string()),
            template: template_id.to_string(),
        },
        _ => ScaffoldError::Render {
            template: template_id.to_string(),
            message: err.to_string(),
        },
    }
}
