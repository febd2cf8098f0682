//! Settings → Lua statements for `init.lua`.
use crate::settings::{Setting, SettingRole, SettingValue, Settings};

/// First line of every generated `init.lua`.
pub const HEADER: &str = "-- Managed by nvim-adapter. Manual edits will be overwritten.";

/// Render one statement per setting, in input order.
#[must_use]
pub fn statements(settings: &Settings) -> Vec<String> {
    settings.iter().map(statement).collect()
}

/// Render the complete `init.lua` content: header, statements, trailing newline.
#[must_use]
pub fn render_document(settings: &Settings) -> String {
    let mut lines = Vec::with_capacity(settings.len() + 1);
    lines.push(HEADER.to_string());
    lines.extend(statements(settings));
    let mut doc = lines.join("\n");
    doc.push('\n');
    doc
}

fn statement(setting: &Setting) -> String {
    match setting.role() {
        SettingRole::Colorscheme => {
            format!("vim.cmd('colorscheme {}')", literal(&setting.value))
        }
        SettingRole::Option => {
            let value = match &setting.value {
                SettingValue::Boolean(_) | SettingValue::Integer(_) => literal(&setting.value),
                SettingValue::Text(s) => quote(s),
            };
            format!("vim.opt.{} = {value}", setting.name)
        }
    }
}

/// The bare token for a value: `true`, `42`, or the string itself.
fn literal(value: &SettingValue) -> String {
    match value {
        SettingValue::Boolean(b) => b.to_string(),
        SettingValue::Integer(n) => n.to_string(),
        SettingValue::Text(s) => s.clone(),
    }
}

/// Double-quoted Lua string literal; keeps the statement on one line.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
