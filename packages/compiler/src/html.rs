//! Static HTML rendering of compiled slides.
//!
//! Used by the CLI and the admin iframe to show a compiled campaign without a
//! live runtime. Style nodes are rendered with their `nth-child` tokens
//! resolved for the slide's position in the host container.

use crate::css::marquee_css;
use crate::vdom::VNode;
use std::collections::BTreeMap;

/// Options for HTML rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Render `mobile_styles` instead of `styles` where present
    pub mobile: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            mobile: false,
        }
    }
}

struct Context<'a> {
    options: &'a RenderOptions,
    slide_number: usize,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a RenderOptions, slide_number: usize) -> Self {
        Self {
            options,
            slide_number,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Render one slide; `slide_number` is its 1-based position in the host
pub fn render_html(node: &VNode, slide_number: usize, options: &RenderOptions) -> String {
    let mut ctx = Context::new(options, slide_number);
    render_node(node, &mut ctx);
    ctx.get_output()
}

/// Render every slide inside a host container
pub fn render_host_html(host_id: &str, slides: &[&VNode], options: &RenderOptions) -> String {
    let mut ctx = Context::new(options, 1);
    ctx.add_line(&format!("<div id=\"{}\">", escape_html(host_id)));
    ctx.indent();
    for (index, slide) in slides.iter().enumerate() {
        ctx.slide_number = index + 1;
        render_node(slide, &mut ctx);
    }
    ctx.dedent();
    ctx.add_line("</div>");
    ctx.get_output()
}

/// A standalone preview document: font stylesheet, host container, and the
/// marquee keyframes when requested.
pub fn render_document(
    host_id: &str,
    slides: &[&VNode],
    font_url: Option<&str>,
    marquee: Option<(f64, f64)>,
    options: &RenderOptions,
) -> String {
    let mut ctx = Context::new(options, 1);
    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();
    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    if let Some(url) = font_url {
        ctx.add_line(&format!(
            "<link rel=\"stylesheet\" href=\"{}\" />",
            escape_html(url)
        ));
    }
    if let Some((percent, seconds)) = marquee {
        ctx.add_line(&format!("<style>{}</style>", marquee_css(host_id, percent, seconds)));
    }
    ctx.dedent();
    ctx.add_line("</head>");
    ctx.add_line("<body>");
    ctx.indent();
    let depth = ctx.depth;
    let host = render_host_html(host_id, slides, options);
    for line in host.lines() {
        if options.pretty {
            for _ in 0..depth {
                ctx.buffer.push_str(&options.indent);
            }
            ctx.add(line);
            ctx.add("\n");
        } else {
            ctx.add(line);
        }
    }
    ctx.dedent();
    ctx.add_line("</body>");
    ctx.dedent();
    ctx.add_line("</html>");
    ctx.get_output()
}

fn render_node(node: &VNode, ctx: &mut Context<'_>) {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            mobile_styles,
            children,
        } => {
            let styles = match mobile_styles {
                Some(mobile) if ctx.options.mobile => mobile,
                _ => styles,
            };
            render_tag(tag, attributes, styles, children, ctx);
        }
        VNode::Text { content } => {
            let escaped = escape_html(content);
            ctx.add_line(&escaped);
        }
        VNode::Markup { content } => {
            ctx.add_line(content);
        }
        VNode::Style { rule } => {
            let css = rule.css_text(ctx.slide_number);
            ctx.add_line(&format!("<style>{}</style>", css));
        }
    }
}

fn render_tag(
    name: &str,
    attributes: &BTreeMap<String, String>,
    styles: &BTreeMap<String, String>,
    children: &[VNode],
    ctx: &mut Context<'_>,
) {
    if ctx.options.pretty {
        ctx.add_indent();
    }
    ctx.add(&format!("<{}", name));

    for (attr_name, value) in attributes {
        ctx.add(&format!(" {}=\"{}\"", attr_name, escape_html(value)));
    }

    if !styles.is_empty() {
        let inline: Vec<String> = styles
            .iter()
            .map(|(key, value)| format!("{}: {};", key, value))
            .collect();
        ctx.add(&format!(" style=\"{}\"", escape_html(&inline.join(" "))));
    }

    if children.is_empty() && is_self_closing(name) {
        ctx.add(" />");
        if ctx.options.pretty {
            ctx.add("\n");
        }
        return;
    }

    ctx.add(">");
    if ctx.options.pretty {
        ctx.add("\n");
    }

    ctx.indent();
    for child in children {
        render_node(child, ctx);
    }
    ctx.dedent();

    if ctx.options.pretty {
        ctx.add_indent();
    }
    ctx.add(&format!("</{}>", name));
    if ctx.options.pretty {
        ctx.add("\n");
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
