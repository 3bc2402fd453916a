pub trait Converter: Send + Sync {
    fn to_markdown(&self, html: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Html2MdConverter;

impl Converter for Html2MdConverter {
    fn to_markdown(&self, html: &str) -> String {
        html2md::parse_html(html)
    }
}

/// Listing descriptions arrive as plain text or HTML; only markup is converted.
pub fn render_description(converter: &dyn Converter, description: &str) -> String {
    let trimmed = description.trim();
    if trimmed.contains('<') && trimmed.contains('>') {
        converter.to_markdown(trimmed).trim().to_string()
    } else {
        trimmed.to_string()
    }
}
