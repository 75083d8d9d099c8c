//! Handlebars implementation of [`Renderer`].

use handlebars::{Handlebars, handlebars_helper};

use crate::settings::DeviceConfig;

use super::{RenderError, RenderedDocument, Renderer, file_name_for};

const TEMPLATE_NAME: &str = "provision";

handlebars_helper!(xml_comment: |text: str| comment_text(text));

/// Built-in template producing Grandstream XML provisioning files.
///
/// Available variables:
/// - `dev`: the device, with `mac`, `user`, `password`, `auth_id`
/// - `settings`: array of settings, each with:
///   - `id`: setting key, e.g. `P34`
///   - `value`: effective value
///   - `comments`: comment lines from the base configuration
///
/// Helpers:
/// - `xml_comment`: makes text safe inside `<!-- -->` without escaping it;
///   use with triple braces, e.g. `{{{xml_comment this}}}`
pub const DEFAULT_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<!-- Grandstream XML Provisioning Configuration -->
<gs_provision version="1">
  <mac>{{dev.mac}}</mac>
  <config version="1">
{{#each settings}}
{{#each comments}}
    <!-- {{{xml_comment this}}} -->
{{/each}}
    <{{id}}>{{value}}</{{id}}>
{{/each}}
  </config>
</gs_provision>
"#;

/// Renders device configurations through a compiled Handlebars template.
///
/// Values are XML-escaped (see [`xml_escape`]).
///
/// # Example
///
/// ```
/// use gs_provision::device::Device;
/// use gs_provision::render::{HandlebarsRenderer, Renderer};
/// use gs_provision::settings::{DeviceConfig, Setting};
///
/// let renderer = HandlebarsRenderer::builtin().unwrap();
/// let config = DeviceConfig {
///     device: Device::new("000b82aabbcc", "alice", "pw1", "auth1"),
///     settings: vec![Setting::new("P34", "pw1")],
/// };
///
/// let doc = renderer.render(&config).unwrap();
/// assert_eq!(doc.file_name, "cfg000b82aabbcc.xml");
/// ```
#[derive(Debug)]
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    /// Creates a renderer using [`DEFAULT_TEMPLATE`].
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if the template does not compile.
    pub fn builtin() -> Result<Self, RenderError> {
        Self::from_template(DEFAULT_TEMPLATE)
    }

    /// Creates a renderer from custom template source.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if the template does not compile.
    pub fn from_template(template: &str) -> Result<Self, RenderError> {
        let mut registry = provisioning_registry();
        registry
            .register_template_string(TEMPLATE_NAME, template)
            .map_err(|e| RenderError::Template {
                reason: e.to_string(),
            })?;

        Ok(Self { registry })
    }
}

impl Renderer for HandlebarsRenderer {
    fn render(&self, config: &DeviceConfig) -> Result<RenderedDocument, RenderError> {
        let rendered = self
            .registry
            .render(TEMPLATE_NAME, config)
            .map_err(|e| RenderError::Render {
                mac: config.device.mac.clone(),
                reason: e.to_string(),
            })?;

        Ok(RenderedDocument {
            file_name: file_name_for(&config.device.mac),
            content: rendered.into_bytes(),
        })
    }
}

/// Returns a registry with the XML escape function and the `xml_comment` helper.
#[must_use]
pub fn provisioning_registry() -> Handlebars<'static> {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(xml_escape);
    registry.register_helper("xml_comment", Box::new(xml_comment));
    registry
}

/// Escapes the five XML special characters.
#[must_use]
pub fn xml_escape(data: &str) -> String {
    let mut escaped = String::with_capacity(data.len());
    for c in data.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Prepares text for an XML comment body.
///
/// Text is kept verbatim except that a space is inserted between adjacent
/// hyphens, and after a trailing hyphen, since `--` may not appear inside a
/// comment and the body may not end in `-`.
#[must_use]
pub fn comment_text(text: &str) -> String {
    let mut body = String::with_capacity(text.len());
    let mut previous = None;
    for c in text.chars() {
        if c == '-' && previous == Some('-') {
            body.push(' ');
        }
        body.push(c);
        previous = Some(c);
    }
    if previous == Some('-') {
        body.push(' ');
    }
    body
}
