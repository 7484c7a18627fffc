//! What the shell shows, and its HTML rendering.
//!
//! Page bodies belong to the front end; the shell renders a mount point
//! carrying the page name and its route parameters.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Serialize;

use crate::env_guard::EnvCheck;
use crate::navigation::table::{Access, Page, RouteMatch, RouteTable};
use crate::session::{Role, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    /// Indeterminate progress indicator.
    Spinner,
    Page(PageView),
    /// Missing configuration panel.
    Diagnostic(EnvCheck),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub page: Page,
    pub title: &'static str,
    pub params: BTreeMap<&'static str, String>,
    /// Present for pages nested under the protected layout.
    pub layout: Option<Layout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub user: String,
    pub role: Role,
    pub menu: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub path: &'static str,
    pub title: &'static str,
    pub active: bool,
}

impl View {
    /// The view for a route the gate allowed to render.
    pub fn page(route: &RouteMatch, session: &SessionState, table: &RouteTable) -> View {
        let layout = match (route.access, session.resolved_profile()) {
            (Access::Protected, Some(profile)) => Some(Layout {
                user: profile.display_name().to_string(),
                role: profile.role,
                menu: table
                    .protected_pages()
                    .filter(|(path, page)| !path.contains(':') && page.visible_to(profile.role))
                    .map(|(path, page)| MenuItem {
                        path,
                        title: page.title(),
                        active: page == route.page,
                    })
                    .collect(),
            }),
            _ => None,
        };
        View::Page(PageView {
            page: route.page,
            title: route.page.title(),
            params: route.params.clone(),
            layout,
        })
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

pub fn render_html(view: &View) -> String {
    match view {
        View::Spinner => document("Carregando", &spinner()),
        View::Page(page) => document(page.title, &page_body(page)),
        View::Diagnostic(check) => {
            document("Variaveis de Ambiente Faltando", &diagnostic_panel(check))
        }
    }
}

fn spinner() -> String {
    "<div class=\"min-h-screen flex items-center justify-center bg-slate-50\">\
     <div class=\"animate-spin rounded-full h-8 w-8 border-2 border-blue-600 border-t-transparent\" \
     role=\"progressbar\" aria-busy=\"true\"></div></div>"
        .to_string()
}

fn mount_point(page: &PageView) -> String {
    let mut out = format!("<main id=\"page\" data-page=\"{}\"", page.page.as_str());
    for (name, value) in &page.params {
        let _ = write!(out, " data-param-{}=\"{}\"", name, escape(value));
    }
    out.push_str("></main>");
    out
}

fn page_body(page: &PageView) -> String {
    let layout = match &page.layout {
        Some(layout) => layout,
        None => return mount_point(page),
    };
    let mut nav = String::new();
    for item in &layout.menu {
        let _ = write!(
            nav,
            "<li><a href=\"{}\"{}>{}</a></li>",
            item.path,
            if item.active {
                " aria-current=\"page\""
            } else {
                ""
            },
            escape(item.title)
        );
    }
    format!(
        "<div class=\"layout\" data-role=\"{}\">\n<aside><nav><ul>{}</ul></nav>\
         <p class=\"user\">{}</p></aside>\n{}\n</div>",
        layout.role,
        nav,
        escape(&layout.user),
        mount_point(page)
    )
}

fn diagnostic_panel(check: &EnvCheck) -> String {
    let mut rows = String::new();
    for (name, present) in check.entries() {
        let (class, label) = if present {
            ("text-green-600", "OK")
        } else {
            ("text-red-600", "FALTANDO")
        };
        let _ = write!(
            rows,
            "<div class=\"flex items-center justify-between\"><span>{}:</span>\
             <span class=\"{}\">{}</span></div>",
            name, class, label
        );
    }
    format!(
        "<div class=\"min-h-screen bg-slate-50 flex items-center justify-center p-6\">\
         <div class=\"max-w-md w-full bg-white rounded-2xl shadow-lg p-8\">\
         <h2>Variaveis de Ambiente Faltando</h2>\
         <p>As variaveis de ambiente do Supabase nao foram encontradas.</p>\
         <div class=\"font-mono\">{}</div>\
         <p class=\"text-xs\">Verifique o arquivo .env na raiz do projeto</p>\
         </div></div>",
        rows
    )
}
