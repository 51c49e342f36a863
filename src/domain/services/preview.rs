#[cfg(test)]
#[path = "preview_test.rs"]
mod tests;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::models::CodeArtifact;

static IMPORT_FROM: Lazy<Regex> =
    Lazy::new(|| return Regex::new(r#"(?m)^\s*import\s+.*?from\s+['"][^'"]*['"];?\s*$"#).unwrap());
static IMPORT_BARE: Lazy<Regex> =
    Lazy::new(|| return Regex::new(r#"(?m)^\s*import\s+['"][^'"]*['"];?\s*$"#).unwrap());
static EXPORT_DEFAULT: Lazy<Regex> =
    Lazy::new(|| return Regex::new(r"(?m)^\s*export\s+default\s+\w+;?\s*$").unwrap());
static EXPORT_BRACES: Lazy<Regex> =
    Lazy::new(|| return Regex::new(r"(?m)^\s*export\s+\{[^}]*\}\s*;?\s*$").unwrap());
static EXPORT_DECL: Lazy<Regex> =
    Lazy::new(|| return Regex::new(r"export\s+(const|let|var|function|class)\s+").unwrap());

static COMPONENT_DECL: Lazy<Regex> =
    Lazy::new(|| return Regex::new(r"(?:function|class)\s+([A-Z]\w*)").unwrap());
static COMPONENT_ARROW: Lazy<Regex> = Lazy::new(|| {
    return Regex::new(r"const\s+([A-Z]\w*)\s*=\s*(?:\([^)]*\)\s*=>|React\.memo|React\.forwardRef|memo\b|forwardRef\b)")
        .unwrap();
});

static REACT_DESTRUCTURE: Lazy<Regex> =
    Lazy::new(|| return Regex::new(r"const\s*\{\s*[^}]+\s*\}\s*=\s*React\s*;?\s*").unwrap());

const REACT_HOOKS: [&str; 9] = [
    "useState",
    "useEffect",
    "useContext",
    "useReducer",
    "useCallback",
    "useMemo",
    "useRef",
    "useImperativeHandle",
    "useLayoutEffect",
];

const REACT_REFS: [&str; 7] = [
    "Component",
    "PureComponent",
    "Fragment",
    "createElement",
    "cloneElement",
    "memo",
    "forwardRef",
];

const PREVIEWABLE: [&str; 6] = ["html", "css", "javascript", "jsx", "tsx", "react"];

pub fn is_previewable(language: &str) -> bool {
    return PREVIEWABLE.contains(&language.to_lowercase().as_str());
}

/// A fully self-contained preview page for one artifact. The artifact's
/// document never runs in the host page: it is embedded through a sandboxed
/// iframe that only permits script execution and same-origin storage, so
/// arbitrary AI-generated code cannot reach the hosting document.
pub struct PreviewDocument {
    pub html: String,
}

impl PreviewDocument {
    pub fn build(artifact: &CodeArtifact) -> PreviewDocument {
        let title = artifact
            .filename
            .clone()
            .unwrap_or_else(|| return format!("{} artifact", artifact.language));
        let inner = inner_document(artifact);

        return PreviewDocument {
            html: host_document(&title, &inner),
        };
    }
}

fn host_document(title: &str, inner: &str) -> String {
    return format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<title>{title}</title>
<style>
  html, body {{ margin: 0; height: 100%; }}
  iframe {{ border: 0; width: 100%; height: 100%; }}
</style>
</head>
<body>
<iframe sandbox="allow-scripts allow-same-origin" srcdoc="{srcdoc}"></iframe>
</body>
</html>
"#,
        title = escape_angle_brackets(title),
        srcdoc = escape_attribute(inner),
    );
}

fn inner_document(artifact: &CodeArtifact) -> String {
    match artifact.language.to_lowercase().as_str() {
        "html" => return artifact.code.to_string(),
        "css" => return css_document(&artifact.code),
        "javascript" | "jsx" | "tsx" | "react" => return component_document(&artifact.code),
        other => return placeholder_document(other),
    }
}

/// CSS has nothing to render on its own, so the template ships a handful of
/// fixed sample elements the styles can land on.
fn css_document(css: &str) -> String {
    return format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<style>{css}</style>
<style>
  body {{
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    margin: 0;
    padding: 20px;
    background: #f8fafc;
  }}
  .preview-content {{
    max-width: 800px;
    margin: 0 auto;
    background: white;
    padding: 20px;
    border-radius: 8px;
    box-shadow: 0 1px 3px rgba(0,0,0,0.1);
  }}
</style>
</head>
<body>
  <div class="preview-content">
    <h1>CSS Preview</h1>
    <p>This is a preview of your CSS styles.</p>
    <button class="btn">Sample Button</button>
    <div class="card">
      <h2>Sample Card</h2>
      <p>This card demonstrates your CSS styling.</p>
    </div>
    <div class="container">
      <div class="item">Item 1</div>
      <div class="item">Item 2</div>
      <div class="item">Item 3</div>
    </div>
  </div>
</body>
</html>
"#
    );
}

fn placeholder_document(language: &str) -> String {
    return format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<style>
  body {{
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    display: flex;
    align-items: center;
    justify-content: center;
    height: 100vh;
    margin: 0;
    background: #f8fafc;
    color: #6b7280;
  }}
</style>
</head>
<body>
  <p>Live preview is not available for {language} code.</p>
</body>
</html>
"#
    );
}

/// The component pipeline. This is deliberately best-effort pattern matching
/// over source text, not a parser: the contract is heuristic component
/// discovery for loosely written snippets, not correctness.
pub fn process_component_source(code: &str) -> String {
    let stripped = strip_module_statements(code);
    let bound = bind_component_globals(&stripped);
    return qualify_react_globals(&bound);
}

/// Browser execution has no module loader, so import/export statements are
/// removed and exported declarations demoted to plain ones.
fn strip_module_statements(code: &str) -> String {
    let mut out = IMPORT_FROM.replace_all(code, "").to_string();
    out = IMPORT_BARE.replace_all(&out, "").to_string();
    out = EXPORT_DEFAULT.replace_all(&out, "").to_string();
    out = EXPORT_BRACES.replace_all(&out, "").to_string();
    out = EXPORT_DECL.replace_all(&out, "$1 ").to_string();
    return out;
}

/// Binds every capitalized top-level function/class/arrow declaration onto
/// the global scope so the discovery step can find it later.
fn bind_component_globals(code: &str) -> String {
    let mut names: Vec<String> = vec![];
    for caps in COMPONENT_DECL
        .captures_iter(code)
        .chain(COMPONENT_ARROW.captures_iter(code))
    {
        let name = caps.get(1).unwrap().as_str().to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }

    if names.is_empty() {
        return code.to_string();
    }

    let bindings = names
        .iter()
        .map(|name| return format!("window.{name} = {name};"))
        .collect::<Vec<String>>()
        .join("\n");

    return format!("{code}\n\n{bindings}");
}

/// Qualifies bare hook and React reference identifiers with the `React.`
/// namespace, and drops any destructure-from-React prelude the snippet
/// already carries.
fn qualify_react_globals(code: &str) -> String {
    let mut out = REACT_DESTRUCTURE.replace_all(code, "").to_string();

    for hook in REACT_HOOKS {
        out = qualify_identifier(&out, hook, &[':']);
    }
    for name in REACT_REFS {
        out = qualify_identifier(&out, name, &[':', '=']);
    }

    return out;
}

/// Prefixes standalone occurrences of `name` with `React.` unless the
/// occurrence is already qualified (preceded by a dot) or is being declared
/// (followed by one of `stop_following`).
fn qualify_identifier(code: &str, name: &str, stop_following: &[char]) -> String {
    let pattern = Regex::new(&format!(r"\b{name}\b")).unwrap();
    let mut out = String::with_capacity(code.len() + 16);
    let mut cursor = 0;

    for found in pattern.find_iter(code) {
        let qualified = code[..found.start()].ends_with('.');
        let declared = code[found.end()..]
            .trim_start()
            .chars()
            .next()
            .map(|c| return stop_following.contains(&c))
            .unwrap_or(false);

        out.push_str(&code[cursor..found.start()]);
        if !qualified && !declared {
            out.push_str("React.");
        }
        out.push_str(found.as_str());
        cursor = found.end();
    }

    out.push_str(&code[cursor..]);
    return out;
}

fn component_document(code: &str) -> String {
    let processed = process_component_source(code);

    // Precomputed for the error panel: angle brackets escaped, capped at 300
    // characters, embedded as a JSON string literal.
    let code_preview = escape_angle_brackets(&processed)
        .chars()
        .take(300)
        .collect::<String>();
    let code_preview_js =
        serde_json::to_string(&code_preview).unwrap_or_else(|_| return "\"\"".to_string());

    return format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>AI Code Preview</title>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">

<script crossorigin src="https://unpkg.com/react@18/umd/react.development.js"></script>
<script crossorigin src="https://unpkg.com/react-dom@18/umd/react-dom.development.js"></script>
<script src="https://unpkg.com/@babel/standalone/babel.min.js"></script>

<style>
  * {{ box-sizing: border-box; }}
  body {{
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    margin: 0;
    padding: 20px;
    background: #f8fafc;
    color: #1a202c;
    line-height: 1.6;
  }}
  #root {{
    min-height: 200px;
    background: white;
    border-radius: 8px;
    box-shadow: 0 1px 3px rgba(0,0,0,0.1);
    padding: 20px;
    max-width: 1200px;
    margin: 0 auto;
  }}
  .error-message {{
    color: #ef4444;
    padding: 16px;
    background: #fef2f2;
    border: 1px solid #fecaca;
    border-radius: 6px;
    margin: 16px 0;
    font-family: 'Courier New', monospace;
    white-space: pre-wrap;
    font-size: 13px;
  }}
  .loading {{
    display: flex;
    align-items: center;
    justify-content: center;
    height: 200px;
    color: #6b7280;
    font-size: 14px;
  }}
</style>
</head>
<body>
<div id="root">
  <div class="loading">Loading component...</div>
</div>

<script type="text/babel">
  var codePreview = {code_preview_js};
  try {{
    {processed}

    const findComponent = () => {{
      const commonNames = ['App', 'Component', 'Main', 'Index', 'Counter', 'TodoApp', 'Calculator'];
      for (const name of commonNames) {{
        if (window[name] && typeof window[name] === 'function') {{
          return window[name];
        }}
      }}

      const componentKeys = Object.keys(window).filter(key =>
        typeof window[key] === 'function' &&
        /^[A-Z]/.test(key) &&
        !['Object', 'Array', 'String', 'Number', 'Boolean', 'Date', 'RegExp', 'Error', 'Promise', 'Symbol'].includes(key)
      );

      if (componentKeys.length > 0) {{
        return window[componentKeys[0]];
      }}

      return null;
    }};

    const AppComponent = findComponent();
    if (!AppComponent) {{
      throw new Error('No component found to render. Make sure your component name starts with a capital letter.');
    }}

    if (ReactDOM.createRoot) {{
      const root = ReactDOM.createRoot(document.getElementById('root'));
      root.render(React.createElement(AppComponent));
    }} else {{
      ReactDOM.render(React.createElement(AppComponent), document.getElementById('root'));
    }}
  }} catch (error) {{
    const errorDiv = document.createElement('div');
    errorDiv.className = 'error-message';
    errorDiv.innerHTML =
      '<strong>Error rendering component:</strong><br>' +
      error.message + '<br><br>' +
      '<strong>Common fixes:</strong><br>' +
      '&bull; Remove import/export statements (not supported in browser preview)<br>' +
      '&bull; Make sure your component name starts with a capital letter<br>' +
      '&bull; Check for syntax errors in your JSX<br>' +
      '&bull; Use React.useState instead of useState<br>' +
      '&bull; Use React.useEffect instead of useEffect<br><br>' +
      '<strong>Processed code preview:</strong><br>' +
      '<code style="font-size: 11px; opacity: 0.7; white-space: pre-wrap;">' +
      codePreview +
      '...</code>';

    const root = document.getElementById('root');
    root.innerHTML = '';
    root.appendChild(errorDiv);
  }}
</script>
</body>
</html>
"#
    );
}

fn escape_attribute(text: &str) -> String {
    return text
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
}

fn escape_angle_brackets(text: &str) -> String {
    return text.replace('<', "&lt;").replace('>', "&gt;");
}
