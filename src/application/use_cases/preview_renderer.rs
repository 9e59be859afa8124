// ============================================================
// PREVIEW RENDERER
// ============================================================
// PreviewState -> HTML. Pure string building, no I/O.

use std::fmt::Write as _;

use crate::domain::preview::{
    LoadDiagnostics, PreviewOutcome, PreviewState, Record, RecordField, ACCEPTED_EXTENSIONS,
};

pub const PAGE_TITLE: &str = "Carregar e Exibir CSV/Excel";
pub const LOADING_MESSAGE: &str = "Carregando arquivo...";
pub const EMPTY_MESSAGE: &str = "Nenhum arquivo carregado.";

/// Client script: uploads the picked file, polls the fragment once per
/// second while the upload is pending and clears the timer afterwards.
const PAGE_SCRIPT: &str = r#"
const input = document.getElementById('file');
const preview = document.getElementById('preview');

async function refresh() {
  const res = await fetch('/preview');
  preview.innerHTML = await res.text();
}

input.addEventListener('change', async () => {
  const file = input.files[0];
  if (!file) return;

  const poll = setInterval(refresh, 1000);
  try {
    const res = await fetch('/api/upload?fileName=' + encodeURIComponent(file.name), {
      method: 'POST',
      body: file,
    });
    if (!res.ok) {
      const body = await res.json().catch(() => ({}));
      alert(body.error || res.statusText);
    }
  } finally {
    clearInterval(poll);
    input.value = '';
    await refresh();
  }
});
"#;

#[derive(Default, Clone, Copy)]
pub struct PreviewRenderer;

impl PreviewRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Whole page: title, file picker and the body for `state`
    pub fn render_page(&self, state: &PreviewState) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{title}</title>\n</head>\n<body>\n<div class=\"p-4\">\n\
             <h1>{title}</h1>\n\
             <input id=\"file\" type=\"file\" accept=\"{accept}\">\n\
             <div id=\"preview\">{body}</div>\n</div>\n<script>{script}</script>\n</body>\n</html>\n",
            title = PAGE_TITLE,
            accept = ACCEPTED_EXTENSIONS,
            body = self.render_body(state),
            script = PAGE_SCRIPT,
        )
    }

    /// Fragment shown under the file picker
    pub fn render_body(&self, state: &PreviewState) -> String {
        match state {
            PreviewState::Idle => empty_state(),
            PreviewState::Loading {
                file_name,
                elapsed_seconds,
                ..
            } => format!(
                "<p class=\"loading\">{} <span class=\"elapsed\">({}s)</span> {}</p>",
                LOADING_MESSAGE,
                elapsed_seconds,
                escape_html(file_name)
            ),
            PreviewState::Ready(outcome) => self.render_outcome(outcome),
        }
    }

    fn render_outcome(&self, outcome: &PreviewOutcome) -> String {
        let mut html = if outcome.records.is_empty() {
            empty_state()
        } else {
            self.render_table(&outcome.records)
        };

        if let Some(error) = &outcome.decode_error {
            let _ = write!(html, "<p class=\"decode-error\">{}</p>", escape_html(error));
        }

        html.push_str(&self.render_diagnostics(&outcome.diagnostics));
        html
    }

    /// Record table with one column per field
    pub fn render_table(&self, records: &[Record]) -> String {
        let mut html = String::from("<table>\n<thead>\n<tr>");
        for field in RecordField::ALL {
            let _ = write!(html, "<th>{}</th>", field.label());
        }
        html.push_str("</tr>\n</thead>\n<tbody>\n");

        for record in records {
            html.push_str("<tr>");
            for field in RecordField::ALL {
                let _ = write!(html, "<td>{}</td>", escape_html(record.get(field)));
            }
            html.push_str("</tr>\n");
        }

        html.push_str("</tbody>\n</table>\n");
        html
    }

    pub fn render_diagnostics(&self, diagnostics: &LoadDiagnostics) -> String {
        format!(
            "<dl class=\"diagnostics\">\
             <dt>Arquivo</dt><dd>{}</dd>\
             <dt>Tipo</dt><dd>{}</dd>\
             <dt>Tamanho</dt><dd>{} bytes</dd>\
             <dt>Registros</dt><dd>{} de {}</dd>\
             <dt>Tempo de upload</dt><dd>{:.3}s</dd>\
             <dt>Tempo de renderização</dt><dd>{:.3}s</dd>\
             </dl>\n",
            escape_html(&diagnostics.file_name),
            diagnostics.file_kind,
            diagnostics.file_size_bytes,
            diagnostics.displayed_records,
            diagnostics.total_records,
            diagnostics.upload_duration_seconds,
            diagnostics.render_duration_seconds,
        )
    }
}

fn empty_state() -> String {
    format!("<p class=\"empty\">{}</p>\n", EMPTY_MESSAGE)
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::preview::FileKind;
    use uuid::Uuid;

    fn ready(records: Vec<Record>, decode_error: Option<&str>) -> PreviewState {
        let mut diagnostics = LoadDiagnostics::new("contatos.csv", FileKind::Csv);
        diagnostics.total_records = records.len();
        diagnostics.displayed_records = records.len();
        PreviewState::Ready(PreviewOutcome {
            upload_id: Uuid::new_v4(),
            records,
            diagnostics,
            decode_error: decode_error.map(str::to_string),
        })
    }

    #[test]
    fn test_idle_shows_empty_state() {
        let html = PreviewRenderer::new().render_body(&PreviewState::Idle);
        assert!(html.contains(EMPTY_MESSAGE));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_loading_shows_elapsed_seconds() {
        let state = PreviewState::Loading {
            upload_id: Uuid::new_v4(),
            file_name: "a.xlsx".to_string(),
            file_kind: FileKind::Spreadsheet,
            elapsed_seconds: 4,
        };
        let html = PreviewRenderer::new().render_body(&state);
        assert!(html.contains(LOADING_MESSAGE));
        assert!(html.contains("(4s)"));
    }

    #[test]
    fn test_table_rows_and_escaping() {
        let record = Record {
            name: "<Ana & Bia>".to_string(),
            phone: "123".to_string(),
            ..Record::default()
        };
        let html = PreviewRenderer::new().render_body(&ready(vec![record], None));

        assert!(html.contains("<th>Endereço</th>"));
        assert!(html.contains("<td>&lt;Ana &amp; Bia&gt;</td>"));
        assert_eq!(html.matches("<tr>").count(), 2);
        assert!(html.contains("1 de 1"));
    }

    #[test]
    fn test_ready_without_records_shows_empty_state_and_error() {
        let html = PreviewRenderer::new().render_body(&ready(Vec::new(), Some("bad <file>")));
        assert!(html.contains(EMPTY_MESSAGE));
        assert!(html.contains("bad &lt;file&gt;"));
        assert!(html.contains("class=\"diagnostics\""));
    }

    #[test]
    fn test_page_has_picker() {
        let html = PreviewRenderer::new().render_page(&PreviewState::Idle);
        assert!(html.contains(PAGE_TITLE));
        assert!(html.contains("accept=\".csv, .xlsx, .xls, .txt\""));
        assert!(html.contains("id=\"preview\""));
    }
}
