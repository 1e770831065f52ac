use schemars::schema_for;

use crate::schema::LlmComponentResponse;

pub const SYSTEM_PROMPT: &str = "You are a senior front-end engineer. \
Always respond with a JSON object matching the provided schema.";

/// JSON Schema of [`LlmComponentResponse`], pretty printed with a 2-space indent.
pub fn response_schema() -> String {
    let schema = schema_for!(LlmComponentResponse);
    // A derived schema always serializes; the fallback only keeps this total.
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

pub fn build_component_prompt(message: &str) -> String {
    format!(
        r#"You are a meticulous front-end engineer who delivers a single self-contained HTML document.
Requirements:
- Inline CSS inside a <style> tag in the <head>
- Inline JavaScript in a <script> tag at the end of <body>
- Responsive layout (mobile-friendly)
- Semantic HTML structure with clear sections
- Use modern CSS (flexbox or grid) and subtle animations
- Include a distinct color palette, typography choices, and spacing scale
- Avoid referencing external assets (fonts, images, CDNs). Use base64 data URIs if needed.
- Comment tricky parts of CSS/JS
- Ensure the component works standalone when saved as index.html

User request:
{}

Output format:
"""
<!DOCTYPE html>
<html lang="en">
...
</html>
"""

Provide only the HTML file content, nothing else.

Respond strictly as JSON matching this schema:
{}
"#,
        message,
        response_schema()
    )
}
