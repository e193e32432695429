//! Per-tag element constructors.
//!
//! One function per known HTML element plus the generic [`h`]. Builders
//! return [`Element`] so flags can still be chained
//! (`div((), "x").safe(true)`); an `Element` converts into a [`Node`] with
//! `.into()`.

use crate::node::{Element, IntoAttrs, IntoChildren, Node};

/// Generic constructor, for tags picked at runtime.
pub fn h(tag: &str, attrs: impl IntoAttrs, children: impl IntoChildren) -> Element {
    Element::with_parts(tag, attrs.into_attrs(), children.into_children())
}

macro_rules! element_builders {
    ($($name:ident => $tag:literal,)*) => {
        $(
        pub fn $name(attrs: impl IntoAttrs, children: impl IntoChildren) -> Element {
            Element::with_parts($tag, attrs.into_attrs(), children.into_children())
        }
        )*

    };
}

element_builders! {
    a => "a",
    abbr => "abbr",
    address => "address",
    area => "area",
    article => "article",
    aside => "aside",
    audio => "audio",
    b => "b",
    base => "base",
    bdi => "bdi",
    bdo => "bdo",
    big => "big",
    blockquote => "blockquote",
    body => "body",
    br => "br",
    button => "button",
    canvas => "canvas",
    caption => "caption",
    cite => "cite",
    code => "code",
    col => "col",
    colgroup => "colgroup",
    data => "data",
    datalist => "datalist",
    dd => "dd",
    del => "del",
    details => "details",
    dfn => "dfn",
    dialog => "dialog",
    div => "div",
    dl => "dl",
    dt => "dt",
    em => "em",
    embed => "embed",
    fieldset => "fieldset",
    figcaption => "figcaption",
    figure => "figure",
    footer => "footer",
    form => "form",
    h1 => "h1",
    h2 => "h2",
    h3 => "h3",
    h4 => "h4",
    h5 => "h5",
    h6 => "h6",
    head => "head",
    header => "header",
    hgroup => "hgroup",
    hr => "hr",
    html => "html",
    i => "i",
    iframe => "iframe",
    img => "img",
    input => "input",
    ins => "ins",
    kbd => "kbd",
    keygen => "keygen",
    label => "label",
    legend => "legend",
    li => "li",
    link => "link",
    main => "main",
    map => "map",
    mark => "mark",
    menu => "menu",
    menuitem => "menuitem",
    meta => "meta",
    meter => "meter",
    nav => "nav",
    noscript => "noscript",
    object => "object",
    ol => "ol",
    optgroup => "optgroup",
    option => "option",
    output => "output",
    p => "p",
    param => "param",
    picture => "picture",
    pre => "pre",
    progress => "progress",
    rp => "rp",
    rt => "rt",
    ruby => "ruby",
    s => "s",
    samp => "samp",
    script => "script",
    section => "section",
    select => "select",
    small => "small",
    source => "source",
    span => "span",
    strong => "strong",
    style => "style",
    sub => "sub",
    summary => "summary",
    sup => "sup",
    table => "table",
    tbody => "tbody",
    td => "td",
    textarea => "textarea",
    tfoot => "tfoot",
    th => "th",
    thead => "thead",
    time => "time",
    title => "title",
    tr => "tr",
    track => "track",
    u => "u",
    ul => "ul",
    var => "var",
    video => "video",
    wbr => "wbr",
    webview => "webview",
}

/// A fragment node from a list of children.
pub fn fragment(children: impl IntoChildren) -> Node {
    Node::Fragment(children.into_children())
}
