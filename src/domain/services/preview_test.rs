use test_utils::component_fixture;

use super::is_previewable;
use super::process_component_source;
use super::PreviewDocument;
use crate::domain::models::CodeArtifact;

fn artifact(language: &str, code: &str) -> CodeArtifact {
    return CodeArtifact::new(language, code, None);
}

#[test]
fn it_knows_which_languages_are_previewable() {
    for language in ["html", "css", "javascript", "jsx", "tsx", "react", "HTML"] {
        assert!(is_previewable(language), "{language} should be previewable");
    }
    for language in ["python", "rust", "sql", ""] {
        assert!(!is_previewable(language), "{language} should not be previewable");
    }
}

#[test]
fn it_embeds_html_verbatim_inside_a_sandboxed_frame() {
    let doc = PreviewDocument::build(&artifact("html", "<h1>Hello</h1>"));

    assert!(doc.html.contains(r#"sandbox="allow-scripts allow-same-origin""#));
    // The artifact lands in the srcdoc attribute, entity escaped.
    assert!(doc.html.contains("&lt;h1&gt;Hello&lt;/h1&gt;"));
    assert!(!doc.html.contains("<h1>Hello</h1>"));
}

#[test]
fn it_wraps_css_with_sample_elements() {
    let doc = PreviewDocument::build(&artifact("css", ".btn { color: red; }"));

    assert!(doc.html.contains(".btn { color: red; }"));
    assert!(doc.html.contains("Sample Button"));
    assert!(doc.html.contains("Sample Card"));
    assert!(doc.html.contains("Item 1"));
}

#[test]
fn it_renders_a_placeholder_for_unsupported_languages() {
    let doc = PreviewDocument::build(&artifact("python", "print(1)"));

    assert!(doc.html.contains("Live preview is not available for python code."));
    // No execution machinery for unsupported languages.
    assert!(!doc.html.contains("babel"));
    assert!(!doc.html.contains("unpkg.com/react"));
}

#[test]
fn it_loads_runtime_and_transpiler_for_components() {
    let doc = PreviewDocument::build(&artifact("jsx", component_fixture()));

    assert!(doc.html.contains("unpkg.com/react@18"));
    assert!(doc.html.contains("unpkg.com/react-dom@18"));
    assert!(doc.html.contains("@babel/standalone"));
}

#[test]
fn it_strips_import_statements() {
    let processed = process_component_source(
        "import React from 'react';\nimport './styles.css';\nfunction App() { return null; }",
    );

    assert!(!processed.contains("import"));
    assert!(processed.contains("function App()"));
}

#[test]
fn it_strips_export_statements() {
    let processed = process_component_source(
        "export function App() { return null; }\nexport default App;\n",
    );

    assert!(!processed.contains("export"));
    assert!(processed.contains("function App()"));
}

#[test]
fn it_binds_components_onto_the_global_scope() {
    let processed = process_component_source(
        "function App() { return null; }\nconst Widget = () => null;\nclass Panel {}",
    );

    assert!(processed.contains("window.App = App;"));
    assert!(processed.contains("window.Widget = Widget;"));
    assert!(processed.contains("window.Panel = Panel;"));
}

#[test]
fn it_does_not_bind_lowercase_functions() {
    let processed = process_component_source("function helper() { return 1; }");
    assert!(!processed.contains("window.helper"));
}

#[test]
fn it_qualifies_bare_hooks() {
    let processed = process_component_source(
        "function App() { const [n, setN] = useState(0); return n; }",
    );

    assert!(processed.contains("React.useState(0)"));
}

#[test]
fn it_leaves_qualified_hooks_alone() {
    let processed = process_component_source(
        "function App() { const [n, setN] = React.useState(0); return n; }",
    );

    assert!(processed.contains("React.useState(0)"));
    assert!(!processed.contains("React.React.useState"));
}

#[test]
fn it_strips_a_react_destructure_prelude() {
    let processed = process_component_source(
        "const { useState, useEffect } = React;\nfunction App() { return useState(0); }",
    );

    assert!(!processed.contains("} = React"));
    assert!(processed.contains("React.useState(0)"));
}

#[test]
fn it_carries_the_error_panel_and_fix_hints() {
    let doc = PreviewDocument::build(&artifact("jsx", component_fixture()));

    assert!(doc.html.contains("Error rendering component:"));
    assert!(doc.html.contains("Common fixes:"));
    assert!(doc.html.contains("Remove import/export statements"));
    assert!(doc.html.contains("Processed code preview:"));
    assert!(doc.html.contains("codePreview"));
}
