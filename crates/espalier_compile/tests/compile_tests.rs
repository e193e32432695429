//! Compiler behavior tests.
//!
//! Each section covers one slice of the compile pipeline: plain markup,
//! interpolation, dynamic attributes, component resolution, prop
//! validation, and failure modes.

use espalier_compile::{
    compile, CompileError, CompileOptions, ComponentDef, EvalError, ParamType, ResolutionMode,
    Scope, TemplateCompiler,
};
use espalier_dom::builders::{div, p, strong};
use espalier_dom::{Node, Value};

fn compile_html(source: &str, globals: &Scope, locals: &Scope) -> String {
    compile(source, globals, locals)
        .unwrap_or_else(|err| panic!("compile failed for {source:?}: {err}"))
        .render()
        .unwrap()
}

fn compile_empty(source: &str) -> String {
    compile_html(source, &Scope::new(), &Scope::new())
}

// =============================================================================
// Plain markup
// =============================================================================

mod markup {
    use super::*;

    #[test]
    fn nested_elements() {
        insta::assert_snapshot!(
            compile_empty("<div><div>hello world!</div><p>i'm normal</p></div>"),
            @"<div><div>hello world!</div><p>i&#39;m normal</p></div>"
        );
    }

    #[test]
    fn self_closing_normal_element_reopens() {
        assert_eq!(
            compile_empty(r#"<div class="something" />"#),
            r#"<div class="something"></div>"#
        );
    }

    #[test]
    fn void_element_stays_self_closing() {
        assert_eq!(
            compile_empty(r#"<area class="something" />"#),
            r#"<area class="something" />"#
        );
        // Children supplied to a void element are dropped at render.
        assert_eq!(
            compile_empty("<input>ignored</input>"),
            r#"<input />ignored"#
        );
    }

    #[test]
    fn multiple_roots_become_a_fragment() {
        let node = compile("<p>a</p><p>b</p>", &Scope::new(), &Scope::new()).unwrap();
        assert!(matches!(node, Node::Fragment(_)));
        assert_eq!(node.render().unwrap(), "<p>a</p><p>b</p>");
    }

    #[test]
    fn malformed_markup_still_renders() {
        // Unclosed <p>: reported as a diagnostic, kept in place.
        let (node, diagnostics) = TemplateCompiler::new()
            .compile_with_diagnostics("<div><p>text</div>", &Scope::new(), &Scope::new())
            .unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(node.render().unwrap(), "<div><p>text</p></div>");
    }

    #[test]
    fn whitespace_is_preserved() {
        assert_eq!(compile_empty("<p>  a  b  </p>"), "<p>  a  b  </p>");
    }
}

// =============================================================================
// Interpolation
// =============================================================================

mod interpolation {
    use super::*;

    #[test]
    fn text_interpolation() {
        let globals = Scope::new().with("example_var", "working");
        assert_eq!(
            compile_html("<div>{{ example_var }} okay</div>", &globals, &Scope::new()),
            "<div>working okay</div>"
        );
    }

    #[test]
    fn greeting_scenario() {
        let globals = Scope::new().with("name", "World");
        assert_eq!(
            compile_html(
                r#"<div class="a"><p>Hello {{ name }}</p></div>"#,
                &globals,
                &Scope::new()
            ),
            r#"<div class="a"><p>Hello World</p></div>"#
        );
    }

    #[test]
    fn locals_shadow_globals() {
        let globals = Scope::new().with("x", "G");
        let locals = Scope::new().with("x", "L");
        assert_eq!(compile_html("<p>{{ x }}</p>", &globals, &locals), "<p>L</p>");
    }

    #[test]
    fn map_literal_keeps_inner_braces() {
        assert_eq!(
            compile_empty("<p>{{ {'a': 1} }}</p>"),
            "<p>{&quot;a&quot;: 1}</p>"
        );
    }

    #[test]
    fn list_results_are_spliced() {
        let globals = Scope::new().with(
            "items",
            Value::List(vec![
                Value::from("a"),
                Value::Node(strong((), "b").into()),
                Value::from(3),
            ]),
        );
        assert_eq!(
            compile_html("<div>{{ items }}</div>", &globals, &Scope::new()),
            "<div>a<strong>b</strong>3</div>"
        );
    }

    #[test]
    fn node_results_insert_subtrees() {
        let globals = Scope::new().with("card", Value::Node(p([("class", "card")], "x").into()));
        assert_eq!(
            compile_html("<div>{{ card }}</div>", &globals, &Scope::new()),
            r#"<div><p class="card">x</p></div>"#
        );
    }

    #[test]
    fn interpolated_text_is_escaped() {
        let globals = Scope::new().with("evil", "<script>alert(1)</script>");
        assert_eq!(
            compile_html("<div>{{ evil }}</div>", &globals, &Scope::new()),
            "<div>&lt;script&gt;alert(1)&lt;/script&gt;</div>"
        );
    }

    #[test]
    fn lone_braces_stay_literal() {
        assert_eq!(compile_empty("<p>a { b } c</p>"), "<p>a { b } c</p>");
    }

    #[test]
    fn undefined_identifier_aborts_the_compile() {
        let err = compile("<p>{{ missing }}</p>", &Scope::new(), &Scope::new()).unwrap_err();
        match err {
            CompileError::Eval { expr, source } => {
                assert_eq!(expr, "missing");
                assert_eq!(source, EvalError::Undefined("missing".into()));
            }
            other => panic!("expected Eval error, got {other:?}"),
        }
    }
}

// =============================================================================
// Dynamic attributes
// =============================================================================

mod dynamic_attrs {
    use super::*;

    #[test]
    fn expression_binds_value() {
        let globals = Scope::new().with("example_var", "working");
        assert_eq!(
            compile_html(
                r#"<div :example="example_var"></div>"#,
                &globals,
                &Scope::new()
            ),
            r#"<div example="working"></div>"#
        );
    }

    #[test]
    fn locals_win_in_attribute_position() {
        let globals = Scope::new().with("cls", "g");
        let locals = Scope::new().with("cls", "l");
        assert_eq!(
            compile_html(r#"<div :class="cls"></div>"#, &globals, &locals),
            r#"<div class="l"></div>"#
        );
    }

    #[test]
    fn non_string_values_render_by_type() {
        let globals = Scope::new().with("n", 3).with("on", true);
        assert_eq!(
            compile_html(
                r#"<input :maxlength="n" :required="on" />"#,
                &globals,
                &Scope::new()
            ),
            r#"<input maxlength="3" required="true" />"#
        );
    }

    #[test]
    fn list_valued_attribute_fails_at_render() {
        let globals = Scope::new().with("xs", Value::List(Vec::new()));
        let node = compile(r#"<div :invalid="xs"></div>"#, &globals, &Scope::new()).unwrap();
        assert!(matches!(
            node.render(),
            Err(espalier_dom::RenderError::InvalidAttributeType { .. })
        ));
    }

    #[test]
    fn failing_expression_aborts_with_expression_text() {
        let err = compile(r#"<div :x="no_such"></div>"#, &Scope::new(), &Scope::new())
            .unwrap_err();
        assert!(matches!(
            err,
            CompileError::Eval { ref expr, .. } if expr == "no_such"
        ));
    }

    #[test]
    fn bare_marker_is_an_error() {
        let err = compile("<div :></div>", &Scope::new(), &Scope::new()).unwrap_err();
        assert!(matches!(err, CompileError::Eval { .. }));
    }

    #[test]
    fn interpolation_inside_static_attribute_is_rejected() {
        let err = compile(
            r#"<div example="{{ example_var }}"></div>"#,
            &Scope::new(),
            &Scope::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CompileError::InterpolationInAttribute { ref attr } if attr == "example"
        ));
    }
}

// =============================================================================
// Component resolution
// =============================================================================

mod components {
    use super::*;

    fn widget() -> ComponentDef {
        ComponentDef::new("my_widget", |props| {
            let title = props.str("title").unwrap_or_default().to_string();
            Ok(p([("class", "widget")], title).into())
        })
        .param("title", ParamType::Str)
    }

    #[test]
    fn custom_tag_resolves_and_uses_returned_node() {
        let globals = Scope::new().with_component(widget());
        assert_eq!(
            compile_html(r#"<my_widget title="Hi"/>"#, &globals, &Scope::new()),
            r#"<p class="widget">Hi</p>"#
        );
    }

    #[test]
    fn hyphenated_tag_normalizes() {
        let globals = Scope::new().with_component(widget());
        assert_eq!(
            compile_html(r#"<my-widget title="Hi"/>"#, &globals, &Scope::new()),
            r#"<p class="widget">Hi</p>"#
        );
    }

    #[test]
    fn local_component_shadows_global() {
        let globals = Scope::new().with_component(ComponentDef::new("card", |_| {
            Ok(p((), "global").into())
        }));
        let locals = Scope::new().with_component(ComponentDef::new("card", |_| {
            Ok(p((), "local").into())
        }));
        assert_eq!(
            compile_html("<card />", &globals, &locals),
            "<p>local</p>"
        );
    }

    #[test]
    fn children_pass_through_when_declared() {
        let globals = Scope::new().with_component(
            ComponentDef::new("wrap", |props| {
                Ok(div([("class", "wrap")], props.children).into())
            })
            .with_children(),
        );
        assert_eq!(
            compile_html("<wrap><p>inner</p></wrap>", &globals, &Scope::new()),
            r#"<div class="wrap"><p>inner</p></div>"#
        );
    }

    #[test]
    fn children_withheld_when_not_declared() {
        let globals = Scope::new().with_component(ComponentDef::new("leaf", |props| {
            assert!(props.children.is_empty());
            Ok(p((), "leaf").into())
        }));
        assert_eq!(
            compile_html("<leaf><p>dropped</p></leaf>", &globals, &Scope::new()),
            "<p>leaf</p>"
        );
    }

    #[test]
    fn unknown_tag_falls_back_to_generic_element() {
        assert_eq!(
            compile_empty(r#"<custom tag="yeah!"><p>hello</p></custom>"#),
            r#"<custom tag="yeah!"><p>hello</p></custom>"#
        );
    }

    #[test]
    fn strict_mode_raises_for_unknown_tags() {
        let compiler = TemplateCompiler::with_options(CompileOptions {
            resolution: ResolutionMode::Strict,
            ..CompileOptions::default()
        });
        let err = compiler
            .compile("<custom />", &Scope::new(), &Scope::new())
            .unwrap_err();
        assert!(matches!(
            err,
            CompileError::UnresolvedComponent { ref tag } if tag == "custom"
        ));
    }

    #[test]
    fn dynamic_props_reach_components_typed() {
        let globals = Scope::new()
            .with("n", 3)
            .with_component(
                ComponentDef::new("counter", |props| {
                    let count = props.int("count").unwrap_or(0);
                    Ok(p((), count.to_string()).into())
                })
                .param("count", ParamType::Int),
            );
        assert_eq!(
            compile_html(r#"<counter :count="n" />"#, &globals, &Scope::new()),
            "<p>3</p>"
        );
    }
}

// =============================================================================
// Prop validation
// =============================================================================

mod prop_validation {
    use super::*;

    fn profile() -> ComponentDef {
        ComponentDef::new("profile", |props| {
            let name = props.str("name").unwrap_or_default().to_string();
            Ok(p((), name).into())
        })
        .param("name", ParamType::Str)
        .param("age", ParamType::Int)
        .optional_param("bio", ParamType::Str)
    }

    #[test]
    fn type_mismatch_is_detailed() {
        let globals = Scope::new().with("age", "not a number").with_component(profile());
        let err = compile(
            r#"<profile name="Ada" :age="age" />"#,
            &globals,
            &Scope::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CompileError::PropTypeMismatch {
                component: "profile".into(),
                prop: "age".into(),
                expected: "integer",
                found: "string",
            }
        );
    }

    #[test]
    fn missing_props_aggregate_into_one_error() {
        let globals = Scope::new().with_component(profile());
        let err = compile("<profile />", &globals, &Scope::new()).unwrap_err();
        match err {
            CompileError::MissingProps { component, missing } => {
                assert_eq!(component, "profile");
                assert_eq!(missing, vec!["age".to_string(), "name".to_string()]);
            }
            other => panic!("expected MissingProps, got {other:?}"),
        }
    }

    #[test]
    fn optional_params_may_be_absent() {
        let globals = Scope::new().with("n", 36).with_component(profile());
        assert_eq!(
            compile_html(r#"<profile name="Ada" :n="n" :age="n" />"#, &globals, &Scope::new()),
            "<p>Ada</p>"
        );
    }

    #[test]
    fn undeclared_props_are_discarded() {
        let globals = Scope::new().with_component(
            ComponentDef::new("plain", |props| {
                assert!(props.get("extra").is_none());
                Ok(p((), "ok").into())
            })
            .optional_param("known", ParamType::Str),
        );
        assert_eq!(
            compile_html(r#"<plain extra="x" />"#, &globals, &Scope::new()),
            "<p>ok</p>"
        );
    }
}

// =============================================================================
// Strict-mode attribute schema
// =============================================================================

mod attr_schema {
    use super::*;

    fn strict() -> TemplateCompiler<'static> {
        TemplateCompiler::with_options(CompileOptions {
            resolution: ResolutionMode::Strict,
            ..CompileOptions::default()
        })
    }

    #[test]
    fn dynamic_value_must_match_schema_type() {
        let globals = Scope::new().with("w", "wide");
        let err = strict()
            .compile(r#"<img :width="w" />"#, &globals, &Scope::new())
            .unwrap_err();
        assert!(matches!(
            err,
            CompileError::InvalidAttribute { ref tag, ref attr, .. }
                if tag == "img" && attr == "width"
        ));
    }

    #[test]
    fn enumerated_literals_are_checked() {
        let err = strict()
            .compile(r#"<a target="_blank2"></a>"#, &Scope::new(), &Scope::new())
            .unwrap_err();
        assert!(matches!(err, CompileError::InvalidAttribute { .. }));

        assert_eq!(
            strict()
                .compile(r#"<a target="_blank"></a>"#, &Scope::new(), &Scope::new())
                .unwrap()
                .render()
                .unwrap(),
            r#"<a target="_blank"></a>"#
        );
    }

    #[test]
    fn static_strings_satisfy_non_enum_schema() {
        // A static literal is a string by nature; strict mode does not
        // demand `:tabindex="3"` spelling.
        assert_eq!(
            strict()
                .compile(r#"<div tabindex="3"></div>"#, &Scope::new(), &Scope::new())
                .unwrap()
                .render()
                .unwrap(),
            r#"<div tabindex="3"></div>"#
        );
    }

    #[test]
    fn unknown_attributes_are_not_validated() {
        let globals = Scope::new().with("v", 1);
        assert_eq!(
            strict()
                .compile(r#"<div :data-count="v"></div>"#, &globals, &Scope::new())
                .unwrap()
                .render()
                .unwrap(),
            r#"<div data-count="1"></div>"#
        );
    }
}

// =============================================================================
// Round-trip equivalence with the builder API
// =============================================================================

mod round_trip {
    use super::*;

    #[test]
    fn template_matches_programmatic_build() {
        let programmatic: Node = div([("class", "x")], "hi").into();
        let compiled = compile(r#"<div class="x">hi</div>"#, &Scope::new(), &Scope::new())
            .unwrap();
        assert_eq!(
            programmatic.render().unwrap(),
            compiled.render().unwrap()
        );
        assert_eq!(programmatic, compiled);
    }

    #[test]
    fn nested_structures_match() {
        let programmatic: Node = div(
            [("class", "a")],
            p((), vec![Node::text("Hello "), strong((), "World").into()]),
        )
        .into();
        let compiled = compile(
            r#"<div class="a"><p>Hello <strong>World</strong></p></div>"#,
            &Scope::new(),
            &Scope::new(),
        )
        .unwrap();
        assert_eq!(programmatic, compiled);
    }

    #[test]
    fn compiled_output_is_idempotent() {
        let globals = Scope::new().with("name", "World");
        let node = compile("<p>Hello {{ name }}</p>", &globals, &Scope::new()).unwrap();
        assert_eq!(node.render().unwrap(), node.render().unwrap());
    }
}
