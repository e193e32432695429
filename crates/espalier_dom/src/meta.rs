//! Static element metadata.
//!
//! Compile-time perfect hash tables for void elements, the known HTML
//! element set, and the attribute schema used by strict-mode validation.
//! Pure data, zero runtime initialization.

use phf::{phf_map, phf_set};

/// Elements that never carry children or a closing tag.
static VOID_TAGS: phf::Set<&'static str> = phf_set! {
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link",
    "meta", "param", "source", "track", "wbr",
};

/// Every tag the builder surface knows about. Tags outside this set resolve
/// through the component registry.
static KNOWN_TAGS: phf::Set<&'static str> = phf_set! {
    "a", "abbr", "address", "area", "article", "aside", "audio", "b",
    "base", "bdi", "bdo", "big", "blockquote", "body", "br", "button",
    "canvas", "caption", "cite", "code", "col", "colgroup", "data",
    "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt",
    "em", "embed", "fieldset", "figcaption", "figure", "footer", "form",
    "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup", "hr",
    "html", "i", "iframe", "img", "input", "ins", "kbd", "keygen", "label",
    "legend", "li", "link", "main", "map", "mark", "menu", "menuitem",
    "meta", "meter", "nav", "noscript", "object", "ol", "optgroup",
    "option", "output", "p", "param", "picture", "pre", "progress", "rp",
    "rt", "ruby", "s", "samp", "script", "section", "select", "small",
    "source", "span", "strong", "style", "sub", "summary", "sup", "table",
    "tbody", "td", "textarea", "tfoot", "th", "thead", "time", "title",
    "tr", "track", "u", "ul", "var", "video", "wbr", "webview",
};

#[inline]
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(tag)
}

#[inline]
pub fn is_known_tag(tag: &str) -> bool {
    KNOWN_TAGS.contains(tag)
}

/// Expected type of an attribute value in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    Str,
    Int,
    Bool,
    /// One of a fixed set of literal strings.
    Enum(&'static [&'static str]),
}

/// Attributes legal on every element.
static GLOBAL_ATTRS: phf::Map<&'static str, AttrType> = phf_map! {
    "accesskey" => AttrType::Str,
    "class" => AttrType::Str,
    "contenteditable" => AttrType::Enum(&["true", "false"]),
    "dir" => AttrType::Enum(&["ltr", "rtl", "auto"]),
    "draggable" => AttrType::Enum(&["true", "false"]),
    "hidden" => AttrType::Bool,
    "id" => AttrType::Str,
    "lang" => AttrType::Str,
    "slot" => AttrType::Str,
    "spellcheck" => AttrType::Enum(&["true", "false"]),
    "style" => AttrType::Str,
    "tabindex" => AttrType::Int,
    "title" => AttrType::Str,
    "translate" => AttrType::Enum(&["yes", "no"]),
};

/// Per-tag attribute schema beyond the global set.
static TAG_ATTRS: phf::Map<&'static str, &'static [(&'static str, AttrType)]> = phf_map! {
    "a" => &[
        ("href", AttrType::Str),
        ("target", AttrType::Enum(&["_self", "_blank", "_parent", "_top"])),
        ("rel", AttrType::Str),
        ("download", AttrType::Str),
        ("hreflang", AttrType::Str),
        ("type", AttrType::Str),
    ],
    "area" => &[
        ("alt", AttrType::Str),
        ("coords", AttrType::Str),
        ("href", AttrType::Str),
        ("shape", AttrType::Enum(&["rect", "circle", "poly", "default"])),
        ("target", AttrType::Str),
    ],
    "audio" => &[
        ("src", AttrType::Str),
        ("autoplay", AttrType::Bool),
        ("controls", AttrType::Bool),
        ("loop", AttrType::Bool),
        ("muted", AttrType::Bool),
        ("preload", AttrType::Enum(&["none", "metadata", "auto"])),
    ],
    "base" => &[("href", AttrType::Str), ("target", AttrType::Str)],
    "button" => &[
        ("disabled", AttrType::Bool),
        ("form", AttrType::Str),
        ("name", AttrType::Str),
        ("type", AttrType::Enum(&["submit", "reset", "button"])),
        ("value", AttrType::Str),
    ],
    "canvas" => &[("width", AttrType::Int), ("height", AttrType::Int)],
    "col" => &[("span", AttrType::Int)],
    "colgroup" => &[("span", AttrType::Int)],
    "embed" => &[
        ("src", AttrType::Str),
        ("type", AttrType::Str),
        ("width", AttrType::Int),
        ("height", AttrType::Int),
    ],
    "form" => &[
        ("action", AttrType::Str),
        ("method", AttrType::Enum(&["get", "post", "dialog"])),
        ("enctype", AttrType::Str),
        ("name", AttrType::Str),
        ("novalidate", AttrType::Bool),
        ("target", AttrType::Str),
    ],
    "iframe" => &[
        ("src", AttrType::Str),
        ("srcdoc", AttrType::Str),
        ("name", AttrType::Str),
        ("width", AttrType::Int),
        ("height", AttrType::Int),
        ("allowfullscreen", AttrType::Bool),
        ("allowtransparency", AttrType::Bool),
        ("sandbox", AttrType::Str),
        ("loading", AttrType::Enum(&["eager", "lazy"])),
    ],
    "img" => &[
        ("src", AttrType::Str),
        ("alt", AttrType::Str),
        ("width", AttrType::Int),
        ("height", AttrType::Int),
        ("srcset", AttrType::Str),
        ("sizes", AttrType::Str),
        ("loading", AttrType::Enum(&["eager", "lazy"])),
        ("decoding", AttrType::Enum(&["sync", "async", "auto"])),
    ],
    "input" => &[
        ("type", AttrType::Str),
        ("name", AttrType::Str),
        ("value", AttrType::Str),
        ("placeholder", AttrType::Str),
        ("checked", AttrType::Bool),
        ("disabled", AttrType::Bool),
        ("readonly", AttrType::Bool),
        ("required", AttrType::Bool),
        ("multiple", AttrType::Bool),
        ("min", AttrType::Str),
        ("max", AttrType::Str),
        ("step", AttrType::Str),
        ("maxlength", AttrType::Int),
        ("minlength", AttrType::Int),
        ("size", AttrType::Int),
        ("autocomplete", AttrType::Str),
    ],
    "label" => &[("for", AttrType::Str), ("form", AttrType::Str)],
    "li" => &[("value", AttrType::Int)],
    "link" => &[
        ("href", AttrType::Str),
        ("rel", AttrType::Str),
        ("type", AttrType::Str),
        ("media", AttrType::Str),
        ("sizes", AttrType::Str),
        ("crossorigin", AttrType::Enum(&["anonymous", "use-credentials"])),
    ],
    "meta" => &[
        ("charset", AttrType::Str),
        ("content", AttrType::Str),
        ("name", AttrType::Str),
    ],
    "meter" => &[
        ("value", AttrType::Int),
        ("min", AttrType::Int),
        ("max", AttrType::Int),
        ("low", AttrType::Int),
        ("high", AttrType::Int),
        ("optimum", AttrType::Int),
    ],
    "ol" => &[
        ("start", AttrType::Int),
        ("reversed", AttrType::Bool),
        ("type", AttrType::Enum(&["1", "a", "A", "i", "I"])),
    ],
    "option" => &[
        ("value", AttrType::Str),
        ("selected", AttrType::Bool),
        ("disabled", AttrType::Bool),
        ("label", AttrType::Str),
    ],
    "progress" => &[("value", AttrType::Int), ("max", AttrType::Int)],
    "script" => &[
        ("src", AttrType::Str),
        ("type", AttrType::Str),
        ("defer", AttrType::Bool),
        ("async", AttrType::Bool),
        ("crossorigin", AttrType::Str),
        ("integrity", AttrType::Str),
        ("nomodule", AttrType::Bool),
    ],
    "select" => &[
        ("name", AttrType::Str),
        ("multiple", AttrType::Bool),
        ("disabled", AttrType::Bool),
        ("required", AttrType::Bool),
        ("size", AttrType::Int),
    ],
    "source" => &[
        ("src", AttrType::Str),
        ("srcset", AttrType::Str),
        ("type", AttrType::Str),
        ("media", AttrType::Str),
    ],
    "table" => &[("border", AttrType::Int)],
    "td" => &[
        ("colspan", AttrType::Int),
        ("rowspan", AttrType::Int),
        ("headers", AttrType::Str),
    ],
    "textarea" => &[
        ("name", AttrType::Str),
        ("rows", AttrType::Int),
        ("cols", AttrType::Int),
        ("placeholder", AttrType::Str),
        ("disabled", AttrType::Bool),
        ("readonly", AttrType::Bool),
        ("required", AttrType::Bool),
        ("maxlength", AttrType::Int),
        ("wrap", AttrType::Enum(&["hard", "soft"])),
    ],
    "th" => &[
        ("colspan", AttrType::Int),
        ("rowspan", AttrType::Int),
        ("scope", AttrType::Enum(&["row", "col", "rowgroup", "colgroup"])),
    ],
    "time" => &[("datetime", AttrType::Str)],
    "track" => &[
        ("src", AttrType::Str),
        ("kind", AttrType::Enum(&["subtitles", "captions", "descriptions", "chapters", "metadata"])),
        ("srclang", AttrType::Str),
        ("label", AttrType::Str),
        ("default", AttrType::Bool),
    ],
    "video" => &[
        ("src", AttrType::Str),
        ("width", AttrType::Int),
        ("height", AttrType::Int),
        ("poster", AttrType::Str),
        ("autoplay", AttrType::Bool),
        ("controls", AttrType::Bool),
        ("loop", AttrType::Bool),
        ("muted", AttrType::Bool),
        ("playsinline", AttrType::Bool),
    ],
};

/// Look up the expected type for `attr` on `tag`.
///
/// Checks the per-tag schema first, then the global attribute set. `None`
/// means the attribute is outside the schema (custom or `data-*`/`aria-*`
/// names) and validation does not apply.
pub fn attr_spec(tag: &str, attr: &str) -> Option<&'static AttrType> {
    if let Some(attrs) = TAG_ATTRS.get(tag) {
        if let Some((_, ty)) = attrs.iter().find(|(name, _)| *name == attr) {
            return Some(ty);
        }
    }
    GLOBAL_ATTRS.get(attr)
}
