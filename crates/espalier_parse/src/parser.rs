//! Template parser.
//!
//! Drives the tokenizer and assembles the parse tree. The parser recovers
//! from malformed input: unclosed elements are reported and attached where
//! they stood, stray end tags are reported and skipped, and the tree that
//! did parse is always returned.

use compact_str::CompactString;

use crate::ast::*;
use crate::error::{ErrorCode, ParseError};
use crate::options::{ParserOptions, WhitespaceStrategy};
use crate::tokenizer::{Callbacks, QuoteType, Tokenizer};

/// Parse a template with default options.
pub fn parse(source: &str) -> (RootNode, Vec<ParseError>) {
    parse_with_options(source, ParserOptions::default())
}

/// Parse a template with custom options.
pub fn parse_with_options(source: &str, options: ParserOptions) -> (RootNode, Vec<ParseError>) {
    Parser::new(source, options).parse()
}

/// Parser context for building the tree
struct Parser<'a> {
    /// Source code
    source: &'a str,
    /// Parser options
    options: ParserOptions,
    /// Open element stack
    stack: Vec<ElementNode>,
    /// Children collected at the root
    root_children: Vec<TemplateNode>,
    /// Element whose tag is open
    current_element: Option<CurrentElement>,
    /// Attribute currently being collected
    current_attr: Option<CurrentAttribute>,
    /// Errors collected during parsing
    errors: Vec<ParseError>,
    /// Newline positions for line/column calculation
    newlines: Vec<usize>,
}

struct CurrentElement {
    tag: CompactString,
    tag_start: usize,
    attrs: Vec<AttributeNode>,
}

struct CurrentAttribute {
    name: CompactString,
    dynamic: bool,
    name_start: usize,
    value: Option<String>,
    value_end: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, options: ParserOptions) -> Self {
        let newlines = source
            .bytes()
            .enumerate()
            .filter(|(_, b)| *b == b'\n')
            .map(|(i, _)| i)
            .collect();
        Self {
            source,
            options,
            stack: Vec::new(),
            root_children: Vec::new(),
            current_element: None,
            current_attr: None,
            errors: Vec::new(),
            newlines,
        }
    }

    fn parse(mut self) -> (RootNode, Vec<ParseError>) {
        let source = self.source;
        let mut tokenizer = Tokenizer::new(source, ParserCallbacks { parser: &mut self });
        tokenizer.tokenize();

        self.handle_unclosed_elements();

        if self.options.whitespace == WhitespaceStrategy::Condense {
            condense_whitespace(&mut self.root_children);
        }

        let root = RootNode {
            children: self.root_children,
            source: source.to_string(),
        };
        (root, self.errors)
    }

    /// Calculate position from byte offset
    fn get_pos(&self, offset: usize) -> Position {
        let line = match self.newlines.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i + 1,
        };

        let column = if line == 1 {
            offset + 1
        } else {
            offset - self.newlines[line - 2]
        };

        Position::new(offset as u32, line as u32, column as u32)
    }

    fn create_loc(&self, start: usize, end: usize) -> SourceLocation {
        SourceLocation::new(self.get_pos(start), self.get_pos(end), &self.source[start..end])
    }

    /// Add child to current context (stack top or root)
    fn add_child(&mut self, child: TemplateNode) {
        let children = match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.root_children,
        };

        // Merge adjacent text runs; the tokenizer may split them around
        // characters that looked like markup.
        if let (Some(TemplateNode::Text(last)), TemplateNode::Text(next)) =
            (children.last_mut(), &child)
        {
            last.content.push_str(&next.content);
            last.loc.end = next.loc.end;
            return;
        }
        children.push(child);
    }

    /// Report and attach everything still open at end of input.
    fn handle_unclosed_elements(&mut self) {
        while let Some(element) = self.stack.pop() {
            self.errors.push(ParseError::new(
                ErrorCode::MissingEndTag,
                Some(element.loc.clone()),
            ));
            self.add_child(TemplateNode::Element(Box::new(element)));
        }
    }

    fn on_text_impl(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }

        let content = htmlize::unescape(&self.source[start..end]).into_owned();
        let text = TextNode {
            content,
            loc: self.create_loc(start, end),
        };
        self.add_child(TemplateNode::Text(Box::new(text)));
    }

    fn on_interpolation_impl(&mut self, start: usize, end: usize) {
        let expr = self.source[start..end].trim();
        let full_start = start.saturating_sub(2);
        let interp = InterpolationNode {
            expr: CompactString::new(expr),
            loc: self.create_loc(full_start, (end + 2).min(self.source.len())),
        };
        self.add_child(TemplateNode::Interpolation(Box::new(interp)));
    }

    fn on_open_tag_name_impl(&mut self, start: usize, end: usize) {
        self.current_element = Some(CurrentElement {
            tag: CompactString::new(&self.source[start..end]),
            tag_start: start,
            attrs: Vec::new(),
        });
    }

    fn finish_open_tag(&mut self, end: usize, self_closing: bool) {
        let Some(current) = self.current_element.take() else {
            return;
        };

        // Include the surrounding < and >
        let loc = self.create_loc(current.tag_start - 1, (end + 1).min(self.source.len()));
        let element = ElementNode {
            tag: current.tag,
            attrs: current.attrs,
            children: Vec::new(),
            self_closing,
            loc,
        };

        if self_closing || (self.options.is_void_tag)(&element.tag) {
            self.add_child(TemplateNode::Element(Box::new(element)));
        } else {
            self.stack.push(element);
        }
    }

    fn on_close_tag_impl(&mut self, start: usize, end: usize) {
        let tag = &self.source[start..end];

        let matched = self
            .stack
            .iter()
            .rposition(|element| element.tag.eq_ignore_ascii_case(tag));

        match matched {
            Some(index) => {
                // Anything left open above the match was never closed;
                // report it and attach it in place, keeping the nesting.
                while self.stack.len() > index + 1 {
                    let unclosed = self.stack.pop().unwrap();
                    self.errors.push(ParseError::new(
                        ErrorCode::MissingEndTag,
                        Some(unclosed.loc.clone()),
                    ));
                    self.add_child(TemplateNode::Element(Box::new(unclosed)));
                }
                let element = self.stack.pop().unwrap();
                self.add_child(TemplateNode::Element(Box::new(element)));
            }
            None => {
                let loc_start = start.saturating_sub(2);
                let loc = self.create_loc(loc_start, (end + 1).min(self.source.len()));
                self.errors
                    .push(ParseError::new(ErrorCode::InvalidEndTag, Some(loc)));
            }
        }
    }

    fn on_attrib_name_impl(&mut self, start: usize, end: usize) {
        let raw = &self.source[start..end];
        let (dynamic, name) = match raw.strip_prefix(':') {
            Some(stripped) => (true, stripped),
            None => (false, raw),
        };
        self.current_attr = Some(CurrentAttribute {
            name: CompactString::new(name),
            dynamic,
            name_start: start,
            value: None,
            value_end: end,
        });
    }

    fn on_attrib_data_impl(&mut self, start: usize, end: usize) {
        if let Some(attr) = &mut self.current_attr {
            attr.value
                .get_or_insert_with(String::new)
                .push_str(&self.source[start..end]);
            attr.value_end = end;
        }
    }

    fn on_attrib_end_impl(&mut self, quote: QuoteType, end: usize) {
        let Some(attr) = self.current_attr.take() else {
            return;
        };

        let value = match quote {
            QuoteType::NoValue => None,
            _ => {
                let raw = attr.value.unwrap_or_default();
                Some(htmlize::unescape(&raw).into_owned())
            }
        };

        let loc_end = end.max(attr.value_end);
        let loc = self.create_loc(attr.name_start, loc_end.min(self.source.len()));
        let node = AttributeNode {
            name: attr.name,
            value,
            dynamic: attr.dynamic,
            loc,
        };

        if let Some(element) = &mut self.current_element {
            element.attrs.push(node);
        }
    }

    fn on_comment_impl(&mut self, start: usize, end: usize) {
        if !self.options.comments {
            return;
        }
        let comment = CommentNode {
            content: self.source[start..end].to_string(),
            loc: self.create_loc(start, end),
        };
        self.add_child(TemplateNode::Comment(Box::new(comment)));
    }
}

/// Adapter handing tokenizer callbacks to the parser
struct ParserCallbacks<'p, 'a> {
    parser: &'p mut Parser<'a>,
}

impl Callbacks for ParserCallbacks<'_, '_> {
    fn on_text(&mut self, start: usize, end: usize) {
        self.parser.on_text_impl(start, end);
    }

    fn on_interpolation(&mut self, start: usize, end: usize) {
        self.parser.on_interpolation_impl(start, end);
    }

    fn on_open_tag_name(&mut self, start: usize, end: usize) {
        self.parser.on_open_tag_name_impl(start, end);
    }

    fn on_open_tag_end(&mut self, end: usize) {
        self.parser.finish_open_tag(end, false);
    }

    fn on_self_closing_tag(&mut self, end: usize) {
        self.parser.finish_open_tag(end, true);
    }

    fn on_close_tag(&mut self, start: usize, end: usize) {
        self.parser.on_close_tag_impl(start, end);
    }

    fn on_attrib_name(&mut self, start: usize, end: usize) {
        self.parser.on_attrib_name_impl(start, end);
    }

    fn on_attrib_data(&mut self, start: usize, end: usize) {
        self.parser.on_attrib_data_impl(start, end);
    }

    fn on_attrib_end(&mut self, quote: QuoteType, end: usize) {
        self.parser.on_attrib_end_impl(quote, end);
    }

    fn on_comment(&mut self, start: usize, end: usize) {
        self.parser.on_comment_impl(start, end);
    }

    fn on_processing_instruction(&mut self, _start: usize, _end: usize) {
        // Dropped; processing instructions have no meaning here.
    }

    fn on_end(&mut self) {}

    fn on_error(&mut self, code: ErrorCode, index: usize) {
        let loc = self.parser.create_loc(index.min(self.parser.source.len()), index.min(self.parser.source.len()));
        self.parser.errors.push(ParseError::new(code, Some(loc)));
    }
}

/// Drop whitespace-only runs between elements and collapse internal
/// whitespace, recursively.
fn condense_whitespace(children: &mut Vec<TemplateNode>) {
    children.retain(|child| match child {
        TemplateNode::Text(text) => !text.content.chars().all(char::is_whitespace),
        _ => true,
    });
    for child in children.iter_mut() {
        match child {
            TemplateNode::Text(text) => {
                let mut condensed = String::with_capacity(text.content.len());
                let mut in_ws = false;
                for c in text.content.chars() {
                    if c.is_whitespace() {
                        if !in_ws {
                            condensed.push(' ');
                        }
                        in_ws = true;
                    } else {
                        condensed.push(c);
                        in_ws = false;
                    }
                }
                text.content = condensed;
            }
            TemplateNode::Element(element) => condense_whitespace(&mut element.children),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_clean(source: &str) -> RootNode {
        let (root, errors) = parse(source);
        assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");
        root
    }

    fn first_element(root: &RootNode) -> &ElementNode {
        match &root.children[0] {
            TemplateNode::Element(element) => element,
            other => panic!("expected element, got {other:?}"),
        }
    }

    #[test]
    fn nested_elements() {
        let root = parse_clean("<div class=\"a\"><p>Hello</p></div>");
        let div = first_element(&root);
        assert_eq!(div.tag, "div");
        assert_eq!(div.attrs.len(), 1);
        assert_eq!(div.attrs[0].name, "class");
        assert_eq!(div.attrs[0].value.as_deref(), Some("a"));
        assert!(!div.attrs[0].dynamic);

        let p = match &div.children[0] {
            TemplateNode::Element(p) => p,
            other => panic!("expected <p>, got {other:?}"),
        };
        assert_eq!(p.tag, "p");
        assert!(matches!(&p.children[0], TemplateNode::Text(t) if t.content == "Hello"));
    }

    #[test]
    fn dynamic_attribute_marker() {
        let root = parse_clean("<div :example=\"example_var\"></div>");
        let div = first_element(&root);
        assert_eq!(div.attrs[0].name, "example");
        assert!(div.attrs[0].dynamic);
        assert_eq!(div.attrs[0].value.as_deref(), Some("example_var"));
    }

    #[test]
    fn interpolation_and_surrounding_text() {
        let root = parse_clean("<div>{{ example_var }} okay</div>");
        let div = first_element(&root);
        assert_eq!(div.children.len(), 2);
        assert!(
            matches!(&div.children[0], TemplateNode::Interpolation(i) if i.expr == "example_var")
        );
        assert!(matches!(&div.children[1], TemplateNode::Text(t) if t.content == " okay"));
    }

    #[test]
    fn multiple_roots_are_legal() {
        let root = parse_clean("<p>a</p><p>b</p>");
        assert_eq!(root.children.len(), 2);
    }

    #[test]
    fn void_and_self_closing_do_not_nest() {
        let root = parse_clean("<div><br>text<img src=\"x\"></div>");
        let div = first_element(&root);
        assert_eq!(div.children.len(), 3);
        assert!(matches!(&div.children[0], TemplateNode::Element(e) if e.tag == "br"));
        assert!(matches!(&div.children[2], TemplateNode::Element(e) if e.tag == "img"));
    }

    #[test]
    fn unclosed_element_is_recovered() {
        let (root, errors) = parse("<div><p>text</div>");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::MissingEndTag);

        let div = first_element(&root);
        assert_eq!(div.tag, "div");
        // The unclosed <p> stays nested where it stood.
        assert!(matches!(&div.children[0], TemplateNode::Element(e) if e.tag == "p"));
    }

    #[test]
    fn stray_close_tag_is_reported_and_skipped() {
        let (root, errors) = parse("<div>a</span>b</div>");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::InvalidEndTag);

        let div = first_element(&root);
        // "a" and "b" merge into one run once the stray tag is dropped.
        assert_eq!(div.children.len(), 1);
        assert!(matches!(&div.children[0], TemplateNode::Text(t) if t.content == "ab"));
    }

    #[test]
    fn close_tag_matching_is_case_insensitive() {
        let root = parse_clean("<div>x</DIV>");
        assert_eq!(first_element(&root).tag, "div");
    }

    #[test]
    fn entities_are_decoded() {
        let root = parse_clean("<p title=\"a&amp;b\">x &amp; y</p>");
        let p = first_element(&root);
        assert_eq!(p.attrs[0].value.as_deref(), Some("a&b"));
        assert!(matches!(&p.children[0], TemplateNode::Text(t) if t.content == "x & y"));
    }

    #[test]
    fn whitespace_preserved_by_default() {
        let root = parse_clean("<p>  spaced  </p>");
        let p = first_element(&root);
        assert!(matches!(&p.children[0], TemplateNode::Text(t) if t.content == "  spaced  "));
    }

    #[test]
    fn whitespace_condense_option() {
        let options = ParserOptions {
            whitespace: WhitespaceStrategy::Condense,
            ..ParserOptions::default()
        };
        let (root, errors) = parse_with_options("<div>  <p>a   b</p>  </div>", options);
        assert!(errors.is_empty());
        let div = first_element(&root);
        assert_eq!(div.children.len(), 1);
        let p = match &div.children[0] {
            TemplateNode::Element(p) => p,
            other => panic!("expected <p>, got {other:?}"),
        };
        assert!(matches!(&p.children[0], TemplateNode::Text(t) if t.content == "a b"));
    }

    #[test]
    fn comments_kept_then_dropped() {
        let root = parse_clean("<div><!-- note --></div>");
        assert!(matches!(
            &first_element(&root).children[0],
            TemplateNode::Comment(c) if c.content == " note "
        ));

        let options = ParserOptions {
            comments: false,
            ..ParserOptions::default()
        };
        let (root, _) = parse_with_options("<div><!-- note --></div>", options);
        assert!(first_element(&root).children.is_empty());
    }

    #[test]
    fn positions_track_lines() {
        let (root, _) = parse("<div>\n  <p>x</p>\n</div>");
        let div = first_element(&root);
        let p = div
            .children
            .iter()
            .find_map(|c| match c {
                TemplateNode::Element(e) => Some(e),
                _ => None,
            })
            .unwrap();
        assert_eq!(p.loc.start.line, 2);
        assert_eq!(p.loc.start.column, 3);
    }

    #[test]
    fn valueless_attribute() {
        let root = parse_clean("<input disabled>");
        let input = first_element(&root);
        assert_eq!(input.attrs[0].name, "disabled");
        assert_eq!(input.attrs[0].value, None);
    }
}
