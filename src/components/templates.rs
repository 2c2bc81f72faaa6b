use std::borrow::Cow;
use crate::errors::ServeError;
use crate::types::RenderedPage;
use crate::utils::escape_attr;

const CONTENT_SLOT: &str = "{{CONTENT}}";

/// Page shell used when no other template is supplied
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{TITLE}}</title>
    <link rel="stylesheet" href="{{STYLE}}">
</head>
<body>
    {{CONTENT}}
</body>
</html>"#;

/// Component for wrapping rendered content in the HTML page shell
#[derive(Clone)]
pub struct TemplateComponent {
    template: Cow<'static, str>,
}

impl TemplateComponent {
    /// Create a new template component
    pub fn new() -> Self {
        Self { template: Cow::Borrowed(DEFAULT_TEMPLATE) }
    }

    /// Use a different shell with `{{TITLE}}`, `{{STYLE}}` and `{{CONTENT}}` slots
    pub fn with_template(template: impl Into<Cow<'static, str>>) -> Self {
        Self { template: template.into() }
    }

    /// Render the full page. Title and stylesheet are escaped, content is not.
    pub fn render_page(&self, page: &RenderedPage) -> Result<String, ServeError> {
        let Some((head, tail)) = self.template.split_once(CONTENT_SLOT) else {
            return Err(ServeError::TemplateError("template has no {{CONTENT}} slot".to_string()));
        };

        let fill = |part: &str| {
            part.replace("{{TITLE}}", &escape_attr(&page.title))
                .replace("{{STYLE}}", &escape_attr(page.style_path))
        };

        let mut html = fill(head);
        html.push_str(&page.content);
        html.push_str(&fill(tail));
        Ok(html)
    }
}

impl Default for TemplateComponent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_content_with_title_and_stylesheet() {
        let page = RenderedPage::new("a <b>.md", "<p>{{TITLE}} stays</p>");
        let html = TemplateComponent::new().render_page(&page).unwrap();
        assert!(html.contains("<title>a &lt;b&gt;.md</title>"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"/__godown_style.css\">"));
        assert!(html.contains("<p>{{TITLE}} stays</p>"));
    }

    #[test]
    fn template_without_content_slot_fails() {
        let component = TemplateComponent::with_template("<html>{{TITLE}}</html>");
        let err = component.render_page(&RenderedPage::new("t", "c")).unwrap_err();
        assert!(matches!(err, ServeError::TemplateError(_)));
    }
}
