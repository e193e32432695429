//! rouille response adapters.
//!
//! View handlers produce a node tree, optionally with a status code and
//! extra headers; this crate wraps the rendered HTML into a
//! [`rouille::Response`]. A bare node means status 200 with
//! `Content-Type: text/html`; a pair adds either a status or headers
//! (disambiguated by type); a triple sets both. Render and compile
//! failures translate into a minimal 500 page — the compiler itself never
//! recovers.
//!
//! ```no_run
//! use espalier_dom::builders::{div, p};
//! use espalier_web::html_response;
//!
//! rouille::start_server("0.0.0.0:8000", move |_request| {
//!     html_response(div((), p((), "Hello world!")))
//! });
//! ```

use std::borrow::Cow;
use std::fmt::Display;

use rouille::{Response, ResponseBody};

use espalier_dom::{render, Element, Node};

/// Extra response headers.
pub type Headers = Vec<(String, String)>;

/// A node tree plus response metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub node: Node,
    pub status: u16,
    pub headers: Headers,
}

impl From<Node> for View {
    fn from(node: Node) -> Self {
        View {
            node,
            status: 200,
            headers: Vec::new(),
        }
    }
}

impl From<Element> for View {
    fn from(element: Element) -> Self {
        Node::from(element).into()
    }
}

impl From<(Node, u16)> for View {
    fn from((node, status): (Node, u16)) -> Self {
        View {
            node,
            status,
            headers: Vec::new(),
        }
    }
}

impl From<(Node, Headers)> for View {
    fn from((node, headers): (Node, Headers)) -> Self {
        View {
            node,
            status: 200,
            headers,
        }
    }
}

impl From<(Node, u16, Headers)> for View {
    fn from((node, status, headers): (Node, u16, Headers)) -> Self {
        View {
            node,
            status,
            headers,
        }
    }
}

/// Render a view into an HTML response.
pub fn html_response(view: impl Into<View>) -> Response {
    let view = view.into();
    match render(&view.node) {
        Ok(body) => {
            let mut headers: Vec<(Cow<'static, str>, Cow<'static, str>)> = vec![(
                Cow::from("Content-Type"),
                Cow::from("text/html; charset=utf-8"),
            )];
            headers.extend(
                view.headers
                    .into_iter()
                    .map(|(name, value)| (Cow::from(name), Cow::from(value))),
            );
            Response {
                status_code: view.status,
                headers,
                data: ResponseBody::from_string(body),
                upgrade: None,
            }
        }
        Err(err) => internal_error(&err),
    }
}

/// Translate a handler result: a view on success, a 500 page on failure.
pub fn render_response<V: Into<View>, E: Display>(result: Result<V, E>) -> Response {
    match result {
        Ok(view) => html_response(view),
        Err(err) => internal_error(&err),
    }
}

/// A standalone error page for the given status code.
pub fn error_response(status: u16) -> Response {
    let title = status_title(status);
    let body = format!(
        "<html><head><title>{status} {title}</title></head>\
         <body><h1>{status} {title}</h1></body></html>\n"
    );
    Response {
        status_code: status,
        headers: vec![(
            Cow::from("Content-Type"),
            Cow::from("text/html; charset=utf-8"),
        )],
        data: ResponseBody::from_string(body),
        upgrade: None,
    }
}

fn internal_error(err: &dyn Display) -> Response {
    eprintln!("espalier_web: render failed: {err}");
    error_response(500)
}

fn status_title(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Error",
    }
}
