#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-agenda-ui]";

/// Default CSS for the scheduling panel along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --agenda-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --agenda-bg: #ffffff;
  --agenda-card-bg: #ffffff;
  --agenda-card-border: rgba(148, 163, 184, 0.28);
  --agenda-radius: 16px;
  --agenda-text: #1f2933;
  --agenda-muted: #52606d;
  --agenda-heading: #11181c;
  --agenda-surface: #f8fafc;
  --agenda-accent: #2563eb;
  --agenda-accent-text: #ffffff;
  --agenda-accent-soft: rgba(37, 99, 235, 0.12);
  --agenda-overlay: rgba(15, 23, 42, 0.45);
  --agenda-scheduled: #067647;
  --agenda-in-progress: #dc6803;
  --agenda-cancelled: #b42318;
}

.agenda-root {
  font-family: var(--agenda-font-family);
  background: var(--agenda-bg);
  color: var(--agenda-text);
  border-radius: var(--agenda-radius);
  display: flex;
  flex-direction: column;
  gap: 24px;
  padding: 28px;
  box-shadow: 0 24px 48px rgba(15, 23, 42, 0.1);
}

.agenda-toolbar {
  display: flex;
  align-items: center;
  justify-content: space-between;
  gap: 16px;
  flex-wrap: wrap;
}

.agenda-primary,
.agenda-secondary,
.card-cancel {
  font: inherit;
  font-weight: 600;
  border-radius: 999px;
  padding: 10px 20px;
  cursor: pointer;
  border: 1px solid transparent;
}

.agenda-primary {
  background: var(--agenda-accent);
  color: var(--agenda-accent-text);
}

.agenda-primary:disabled {
  opacity: 0.45;
  cursor: not-allowed;
}

.agenda-secondary {
  background: transparent;
  color: var(--agenda-muted);
  border-color: var(--agenda-card-border);
}

.agenda-switch {
  display: inline-flex;
  align-items: center;
  gap: 8px;
  color: var(--agenda-muted);
  font-size: 0.9rem;
}

.agenda-overlay {
  position: fixed;
  inset: 0;
  background: var(--agenda-overlay);
  display: flex;
  align-items: center;
  justify-content: center;
  z-index: 50;
}

.agenda-dialog {
  background: var(--agenda-card-bg);
  border-radius: var(--agenda-radius);
  padding: 24px;
  width: min(520px, calc(100vw - 32px));
  display: flex;
  flex-direction: column;
  gap: 16px;
  box-shadow: 0 32px 64px rgba(15, 23, 42, 0.25);
}

.agenda-dialog h2 {
  margin: 0;
  color: var(--agenda-heading);
  font-size: 1.3rem;
}

.agenda-dialog-description {
  margin: 6px 0 0;
  color: var(--agenda-muted);
}

.agenda-field {
  display: flex;
  flex-direction: column;
  gap: 6px;
  font-weight: 600;
  font-size: 0.9rem;
}

.agenda-field textarea,
.agenda-field input {
  font: inherit;
  font-weight: 400;
  border: 1px solid var(--agenda-card-border);
  border-radius: 10px;
  padding: 10px 12px;
  background: var(--agenda-surface);
}

.agenda-field textarea {
  min-height: 88px;
  resize: vertical;
}

.agenda-slots {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(96px, 1fr));
  gap: 8px;
}

.agenda-slot {
  font: inherit;
  font-size: 0.85rem;
  padding: 8px 6px;
  border-radius: 10px;
  border: 1px solid var(--agenda-card-border);
  background: var(--agenda-surface);
  color: var(--agenda-text);
  cursor: pointer;
  font-variant-numeric: tabular-nums;
}

.agenda-slot.is-selected {
  background: var(--agenda-accent);
  border-color: var(--agenda-accent);
  color: var(--agenda-accent-text);
}

.agenda-dialog-actions {
  display: flex;
  justify-content: flex-end;
  gap: 10px;
}

.agenda-section header {
  display: flex;
  align-items: center;
  gap: 10px;
  margin-bottom: 12px;
}

.agenda-section h3 {
  margin: 0;
  font-size: 1.05rem;
  color: var(--agenda-heading);
}

.agenda-count {
  font-size: 0.78rem;
  font-weight: 600;
  border-radius: 999px;
  padding: 2px 10px;
  background: var(--agenda-accent-soft);
  color: var(--agenda-accent);
}

.agenda-empty {
  color: var(--agenda-muted);
  font-style: italic;
  margin: 0;
}

.agenda-cards {
  list-style: none;
  margin: 0;
  padding: 0;
  display: grid;
  gap: 12px;
}

.appointment-card {
  display: flex;
  align-items: center;
  gap: 18px;
  padding: 16px;
  border: 1px solid var(--agenda-card-border);
  border-left-width: 4px;
  border-radius: calc(var(--agenda-radius) - 4px);
  background: var(--agenda-card-bg);
}

.agenda-section[data-kind="scheduled"] .appointment-card {
  border-left-color: var(--agenda-scheduled);
}

.agenda-section[data-kind="in-progress"] .appointment-card {
  border-left-color: var(--agenda-in-progress);
}

.agenda-section[data-kind="cancelled"] .appointment-card {
  border-left-color: var(--agenda-cancelled);
  opacity: 0.7;
}

.card-date {
  display: flex;
  flex-direction: column;
  align-items: center;
  min-width: 64px;
  font-variant-numeric: tabular-nums;
}

.card-day {
  font-size: 1.6rem;
  font-weight: 700;
  color: var(--agenda-heading);
}

.card-month {
  font-size: 0.8rem;
  font-weight: 600;
  letter-spacing: 0.08em;
  color: var(--agenda-accent);
}

.card-year {
  font-size: 0.75rem;
  color: var(--agenda-muted);
}

.card-body {
  flex: 1;
  display: flex;
  flex-direction: column;
  gap: 4px;
}

.card-reason {
  margin: 0;
  font-size: 1rem;
  color: var(--agenda-heading);
}

.card-diagnosis {
  margin: 0;
  color: var(--agenda-muted);
  font-size: 0.88rem;
}

.card-meta {
  display: flex;
  gap: 12px;
  font-size: 0.82rem;
  color: var(--agenda-muted);
}

.card-cancel {
  background: transparent;
  color: var(--agenda-cancelled);
  border-color: rgba(180, 35, 24, 0.3);
  font-size: 0.82rem;
  padding: 6px 14px;
}

@media (max-width: 640px) {
  .agenda-root {
    padding: 18px;
  }

  .appointment-card {
    flex-direction: column;
    align-items: flex-start;
  }

  .card-date {
    flex-direction: row;
    gap: 6px;
  }

  .agenda-dialog-actions {
    flex-direction: column-reverse;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document không có thẻ <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-agenda-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
