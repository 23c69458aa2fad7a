/// JavaScript body of the "Route to Generators" code node
///
/// The body builds one generation request per generator workflow and hands
/// them to n8n as separate items. At execution time it relies on an upstream
/// "Combine Context" node (optional `config.output_folder_id`) and on an input
/// item carrying `analyzed_documents`, `company_snippet` and `enrichment_data`.

use crate::config::GeneratorSpec;

const PREAMBLE: &str = "const item = $input.first();
const analyzedDocs = item.json.analyzed_documents || [];
const context = item.json;
const combineContext = $('Combine Context').first().json;
const outputFolderId = combineContext.config?.output_folder_id || '';
";

const EPILOGUE: &str = "return generationRequests.map(req => ({ json: req }));";

/// Upstream context fields passed through unchanged into every request
const PASS_THROUGH: [(&str, &str); 4] = [
    ("analyzed_documents", "analyzedDocs"),
    ("company_snippet", "context.company_snippet"),
    ("enrichment_data", "context.enrichment_data"),
    ("output_folder_id", "outputFolderId"),
];

/// Slots of one generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorRoute {
    /// Resolved workflow id; empty when the lookup missed
    pub generator_id: String,
    pub generator_name: String,
    pub document_type: String,
    /// Literal fields emitted between `document_type` and the pass-through fields
    pub extra_fields: Vec<(String, String)>,
}

impl GeneratorRoute {
    pub fn new(spec: &GeneratorSpec, generator_id: Option<&str>) -> Self {
        Self {
            generator_id: generator_id.unwrap_or_default().to_string(),
            generator_name: spec.workflow_name.clone(),
            document_type: spec.document_type.clone(),
            extra_fields: spec.extra_fields.clone(),
        }
    }

    fn render(&self) -> String {
        let mut fields = vec![
            format!("generator_id: {}", js_string(&self.generator_id)),
            format!("generator_name: {}", js_string(&self.generator_name)),
            format!("document_type: {}", js_string(&self.document_type)),
        ];
        fields.extend(
            self.extra_fields
                .iter()
                .map(|(key, value)| format!("{}: {}", key, js_string(value))),
        );
        fields.extend(
            PASS_THROUGH
                .iter()
                .map(|(key, expr)| format!("{}: {}", key, expr)),
        );
        format!("  {{ {} }}", fields.join(", "))
    }
}

/// Router body template; requests are emitted in route order
#[derive(Debug, Clone, Default)]
pub struct RouterTemplate {
    routes: Vec<GeneratorRoute>,
}

impl RouterTemplate {
    pub fn new(routes: Vec<GeneratorRoute>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[GeneratorRoute] {
        &self.routes
    }

    /// Render the complete `jsCode` text
    ///
    /// No syntax validation happens here; the text is stored as-is.
    pub fn render(&self) -> String {
        let requests = self
            .routes
            .iter()
            .map(GeneratorRoute::render)
            .collect::<Vec<_>>()
            .join(",\n");

        format!(
            "{}\nconst generationRequests = [\n{}\n];\n\n{}",
            PREAMBLE, requests, EPILOGUE
        )
    }
}

/// Single-quoted JavaScript string literal
fn js_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}
