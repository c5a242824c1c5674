use expect_test::expect;

use super::*;

fn render(
    file: &FileId,
    text: &str,
) -> String {
    scan_declarations(file, text)
        .map(|decl| {
            format!("{} {} {}:{}", decl.kind.as_str(), decl.name, decl.location.line, decl.location.column)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn finds_components_and_directives_with_positions() {
    let file = FileId::from("file:///app/widgets.js");
    let text = "angular\n    .module('app')\n    .component('myWidget', {})\n    .directive(\"fooBar\", fooBarDirective);\n";

    expect![[r#"
        component myWidget 2:4
        directive fooBar 3:4"#]]
    .assert_eq(&render(&file, text));
}

#[test]
fn line_equals_newlines_before_match_start() {
    let file = FileId::from("a.js");
    let text = "// header\nvar m = angular.module('x');\n\nm.component('one', {});\n  m.directive( 'two', f);\n\t\tm.component('three',{})";

    let decls: Vec<_> = scan_declarations(&file, text).collect();
    assert_eq!(decls.len(), 3);

    let mut search_from = 0;
    for decl in &decls {
        let call = if decl.kind == SymbolKind::Directive { ".directive(" } else { ".component(" };
        let start = search_from + text[search_from..].find(call).expect("call present");
        search_from = start + call.len();

        let newlines = text[..start].matches('\n').count() as u32;
        let line_start = text[..start].rfind('\n').map_or(0, |idx| idx + 1);
        assert_eq!(decl.location.line, newlines, "{}", decl.name);
        assert_eq!(decl.location.column, (start - line_start) as u32, "{}", decl.name);
    }
}

#[test]
fn column_counts_utf16_units() {
    let file = FileId::from("a.js");
    let decls: Vec<_> = scan_declarations(&file, "/* 😀 */ app.component('smile', {})").collect();
    assert_eq!(decls.len(), 1);
    assert_eq!(decls[0].location.column, 12);
}

#[test]
fn hyphenated_registration_is_normalized() {
    let file = FileId::from("a.js");
    let decls: Vec<_> = scan_declarations(&file, "app.directive('my-widget', f)").collect();
    assert_eq!(decls[0].name.as_str(), "myWidget");
}

#[test]
fn empty_and_non_source_text_yield_nothing() {
    let file = FileId::from("a.js");
    assert_eq!(scan_declarations(&file, "").count(), 0);
    assert_eq!(scan_declarations(&file, "<html><body>not a script</body></html>").count(), 0);
}

#[test]
fn malformed_calls_are_skipped() {
    let file = FileId::from("a.js");
    let text = "app.component(name, {});\napp.component(`tpl`, {});\napp.controller('Ctrl', f);\napp.component('ok', {});";
    let names: Vec<_> = scan_declarations(&file, text).map(|decl| decl.name.as_str().to_owned()).collect();
    assert_eq!(names, vec!["ok".to_string()]);
}

#[test]
fn iterator_is_restartable_by_clone() {
    let file = FileId::from("a.js");
    let scan = scan_declarations(&file, "a.component('x', {}); a.component('y', {});");
    let first: Vec<_> = scan.clone().collect();
    let second: Vec<_> = scan.collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}
