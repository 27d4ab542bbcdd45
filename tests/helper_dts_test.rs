use aura_typegen::typegen::build_helper_dts;
use aura_typegen::TypegenError;
use std::path::Path;

const TS_HELPER: &str = "/dir1/dir2/dir3/force-app/main/default/aura/TestComponent/TestComponentHelper.ts";
const JS_HELPER: &str = "/dir1/dir2/dir3/force-app/main/default/aura/TestComponent/TestComponentHelper.js";
const MARKUP: &str = "/dir1/dir2/dir3/force-app/main/default/aura/TestComponent/TestComponent.cmp";

const CMP_WITHOUT_BASE: &str = "<aura:component>
    {!v.body}
</aura:component>
";
const CMP_WITH_BASE: &str = "<aura:component extends=\"c:TestBaseComp\">
    {!v.body}
</aura:component>
";

fn build(helper_path: &str, helper: &str, markup: &str) -> String {
    build_helper_dts(Path::new(helper_path), helper, Path::new(MARKUP), markup).unwrap()
}

fn expected(members: &str, base: &str) -> String {
    format!(
        "declare namespace Helper.c {{
  interface TestComponent {} {{
    {}
  }}
}}",
        base, members
    )
}

const TYPED_HELPER: &str = "({
    method1: function(
      this: Helper.c.TestComponent,
      cmp: Cmp.c.TestComponent,
      event: Aura.Event
    ) {
    }
});
";

const UNTYPED_HELPER: &str = "({
  method1: function(
    cmp,
    event
  ) {
  }
});
";

// ---------------------------------------------------------------------------
// TypeScript helpers
// ---------------------------------------------------------------------------

#[test]
fn test_typed_method_without_base() {
    assert_eq!(
        build(TS_HELPER, TYPED_HELPER, CMP_WITHOUT_BASE),
        expected("method1(cmp: Cmp.c.TestComponent, event: Aura.Event): any;", "")
    );
}

#[test]
fn test_typed_method_with_base() {
    assert_eq!(
        build(TS_HELPER, TYPED_HELPER, CMP_WITH_BASE),
        expected(
            "method1(cmp: Cmp.c.TestComponent, event: Aura.Event): any;",
            "extends Helper.c.TestBaseComp"
        )
    );
}

#[test]
fn test_untyped_method_without_base() {
    assert_eq!(
        build(TS_HELPER, UNTYPED_HELPER, CMP_WITHOUT_BASE),
        expected("method1(cmp, event): any;", "")
    );
}

#[test]
fn test_untyped_method_with_base() {
    assert_eq!(
        build(TS_HELPER, UNTYPED_HELPER, CMP_WITH_BASE),
        expected("method1(cmp, event): any;", "extends Helper.c.TestBaseComp")
    );
}

#[test]
fn test_method_type_parameters() {
    let output = build(TS_HELPER, "({\n  method1: function<T,R>(cmp) {\n  }\n});", CMP_WITHOUT_BASE);
    assert_eq!(output, expected("method1<T,R>(cmp): any;", ""));
}

#[test]
fn test_method_return_type() {
    let output = build(TS_HELPER, "({\n  method1: function(cmp):     string {\n  }\n});", CMP_WITHOUT_BASE);
    assert_eq!(output, expected("method1(cmp): string;", ""));
}

#[test]
fn test_arrow_function_and_method_shorthand() {
    let output = build(
        TS_HELPER,
        "({\n  load(cmp: Cmp.c.TestComponent): void {},\n  save: async (cmp) => {}\n});",
        CMP_WITHOUT_BASE,
    );
    assert_eq!(
        output,
        expected("load(cmp: Cmp.c.TestComponent): void;\n    save(cmp): any;", "")
    );
}

// ---------------------------------------------------------------------------
// Literal properties
// ---------------------------------------------------------------------------

#[test]
fn test_literal_properties() {
    let cases = [
        ("\"hello world\"", "val:string;"),
        ("false", "val:boolean;"),
        ("true", "val:boolean;"),
        ("42", "val:number;"),
        ("[]", "val: [];"),
        ("{subval1: 12345, subval2: \"hello world\"}", "val:any;"),
        ("null", "val:any;"),
    ];
    for (literal, member) in cases {
        let helper = format!("({{\n  val: {}\n}});", literal);
        assert_eq!(
            build(TS_HELPER, &helper, CMP_WITHOUT_BASE),
            expected(member, ""),
            "literal {}",
            literal
        );
    }
}

#[test]
fn test_type_assertion_property() {
    let output = build(TS_HELPER, "({\n  cache: <Map<string, Account>>{}\n});", CMP_WITHOUT_BASE);
    assert_eq!(output, expected("cache:Map<string, Account>;", ""));
}

#[test]
fn test_empty_helper_object() {
    assert_eq!(build(TS_HELPER, "({});", CMP_WITHOUT_BASE), expected("", ""));
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[test]
fn test_single_line_comment_carried_forward() {
    let output = build(
        TS_HELPER,
        "({\n    // this is a comment\n    val: \"hello world\"\n});",
        CMP_WITHOUT_BASE,
    );
    assert_eq!(output, expected("// this is a comment\n    val:string;", ""));
}

#[test]
fn test_comment_stays_with_its_own_property() {
    let output = build(
        TS_HELPER,
        "({\n    first: 1,\n    // about second\n    second: 2\n});",
        CMP_WITHOUT_BASE,
    );
    assert_eq!(
        output,
        expected("first:number;\n    // about second\n    second:number;", "")
    );
}

// ---------------------------------------------------------------------------
// JavaScript helpers with JSDoc
// ---------------------------------------------------------------------------

const JSDOC_HELPER: &str = "({
    /**
     * @param {Cmp.c.TestComponent} cmp
     * @param {Aura.Event} event
     */
    method1: function(cmp,event) {
    }
});
";

const JSDOC_MEMBER: &str = "/**
     * @param {Cmp.c.TestComponent} cmp
     * @param {Aura.Event} event
     */
    method1(cmp: Cmp.c.TestComponent, event: Aura.Event): any;";

#[test]
fn test_jsdoc_params_without_base() {
    assert_eq!(
        build(JS_HELPER, JSDOC_HELPER, CMP_WITHOUT_BASE),
        expected(JSDOC_MEMBER, "")
    );
}

#[test]
fn test_jsdoc_params_with_base() {
    assert_eq!(
        build(JS_HELPER, JSDOC_HELPER, CMP_WITH_BASE),
        expected(JSDOC_MEMBER, "extends Helper.c.TestBaseComp")
    );
}

#[test]
fn test_jsdoc_returns_and_type() {
    let output = build(
        JS_HELPER,
        "({\n    /** @returns {Promise<void>} */\n    load: function(cmp) {},\n    /** @type {Date} */\n    started: null\n});",
        CMP_WITHOUT_BASE,
    );
    assert_eq!(
        output,
        expected(
            "/** @returns {Promise<void>} */\n    load(cmp): Promise<void>;\n    /** @type {Date} */\n    started:Date;",
            ""
        )
    );
}

#[test]
fn test_inline_annotation_beats_jsdoc() {
    let output = build(
        TS_HELPER,
        "({\n    /** @param {string} cmp */\n    load: function(cmp: number) {}\n});",
        CMP_WITHOUT_BASE,
    );
    assert!(output.contains("    load(cmp: number): any;"), "{}", output);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn test_unhandled_shape_is_reported() {
    let err = build_helper_dts(
        Path::new(JS_HELPER),
        "({\n    handler: otherHelper.handler\n});",
        Path::new(MARKUP),
        CMP_WITHOUT_BASE,
    )
    .unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, TypegenError::UnhandledShape { .. }));
    assert!(message.contains("TestComponentHelper.js"), "{}", message);
    assert!(message.contains("handler"), "{}", message);
}

#[test]
fn test_malformed_markup_is_reported_against_markup_file() {
    let err = build_helper_dts(
        Path::new(JS_HELPER),
        "({ val: 1 });",
        Path::new(MARKUP),
        "<aura:component>",
    )
    .unwrap_err();
    match err {
        TypegenError::Parse { file, .. } => assert_eq!(file, Path::new(MARKUP)),
        other => panic!("unexpected error: {other:?}"),
    }
}
