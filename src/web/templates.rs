//! Template rendering with Tera

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

/// Stylesheet served at `/static/style.css`
pub const STYLESHEET: &str = include_str!("../static/style.css");

/// Template renderer
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Create a new template renderer with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            ("index.html", include_str!("../templates/index.html")),
            ("stats.html", include_str!("../templates/stats.html")),
            (
                "components/summary.html",
                include_str!("../templates/components/summary.html"),
            ),
            (
                "components/related.html",
                include_str!("../templates/components/related.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with a serializable context
    pub fn render(&self, template: &str, context: &impl Serialize) -> Result<String> {
        let ctx = Context::from_serialize(context)?;
        Ok(self.tera.render(template, &ctx)?)
    }
}
