//! End-to-end extraction over the sample sources in `tests/fixtures`.

use glean_parser::{
    CommentKind, CommentRecord, ConstructKind, ExtractionResult, MarkerKind, TagEntry,
    extract_comments,
};
use pretty_assertions::assert_eq;

const SAMPLE_CPP: &str = include_str!("fixtures/comment-extraction/sample.cpp");
const SAMPLE_RS: &str = include_str!("fixtures/comment-extraction/sample.rs");
const SAMPLE_GO: &str = include_str!("fixtures/comment-extraction/sample.go");
const SAMPLE_JAVA: &str = include_str!("fixtures/comment-extraction/Sample.java");
const SAMPLE_PY: &str = include_str!("fixtures/comment-extraction/sample.py");
const C_SAMPLE: &str = include_str!("fixtures/samples/c-sample.c");
const CPP_SAMPLE: &str = include_str!("fixtures/samples/cpp-sample.cpp");

fn extract(source: &str, language: &str) -> ExtractionResult {
    extract_comments(source, language).expect("built-in language")
}

/// `(start_line, construct kind, construct name)` per comment.
fn attachments(result: &ExtractionResult) -> Vec<(u32, Option<(ConstructKind, String)>)> {
    result
        .iter()
        .map(|c| {
            (
                c.start_line,
                c.construct.as_ref().map(|k| (k.kind, k.name.clone())),
            )
        })
        .collect()
}

fn some(kind: ConstructKind, name: &str) -> Option<(ConstructKind, String)> {
    Some((kind, name.to_string()))
}

fn at_line(result: &ExtractionResult, line: u32) -> &CommentRecord {
    result
        .iter()
        .find(|c| c.start_line == line)
        .unwrap_or_else(|| panic!("no comment starts on line {line}"))
}

fn signature(record: &CommentRecord) -> &str {
    record.construct.as_ref().map_or("", |c| c.signature.as_str())
}

// ── C++ ───────────────────────────────────────────────────────────

#[test]
fn cpp_sample_attachments() {
    use ConstructKind::{Constant, Field, Function, Method, Type};
    let result = extract(SAMPLE_CPP, "cpp");
    assert!(result.diagnostics.is_empty());
    assert_eq!(
        attachments(&result),
        vec![
            (1, some(Function, "add")),
            (3, some(Function, "add")),
            (10, None),
            (11, None),
            (14, some(Type, "User")),
            (20, some(Field, "name")),
            (23, some(Method, "User")),
            (29, some(Method, "validate")),
            (31, None),
            (35, some(Method, "process")),
            (38, None),
            (42, some(Function, "fetchData")),
            (47, None),
            (51, some(Constant, "MAX_RETRIES")),
        ]
    );
}

#[test]
fn cpp_sample_signatures() {
    let result = extract(SAMPLE_CPP, "cpp");
    assert_eq!(signature(at_line(&result, 3)), "int add(int a, int b)");
    assert_eq!(signature(at_line(&result, 14)), "class User");
    assert_eq!(signature(at_line(&result, 20)), "std::string name");
    assert_eq!(signature(at_line(&result, 23)), "User(const std::string& name)");
    assert_eq!(signature(at_line(&result, 51)), "const int MAX_RETRIES = 3");
}

#[test]
fn cpp_sample_kinds_and_tags() {
    let result = extract(SAMPLE_CPP, "cpp");
    assert_eq!(result.of_kind(CommentKind::DocBlock).count(), 5);
    assert_eq!(at_line(&result, 14).kind, CommentKind::Block);

    let add = at_line(&result, 3);
    assert_eq!(add.tag_all("brief"), &[TagEntry::new(None, "Add two numbers")]);
    assert_eq!(
        add.tag_all("param"),
        &[
            TagEntry::new(Some("a"), "First number"),
            TagEntry::new(Some("b"), "Second number"),
        ]
    );
    assert_eq!(add.tag_all("return"), &[TagEntry::new(None, "Sum of a and b")]);

    let fetch = at_line(&result, 42);
    assert_eq!(
        fetch.tag_all("throws"),
        &[TagEntry::new(Some("std::runtime_error"), "When network request fails")]
    );
}

#[test]
fn cpp_sample_markers() {
    let result = extract(SAMPLE_CPP, "cpp");
    let markers: Vec<(MarkerKind, &str, u32)> = result
        .iter()
        .flat_map(|c| c.markers.iter())
        .map(|m| (m.kind, m.text.as_str(), m.line))
        .collect();
    assert_eq!(
        markers,
        vec![
            (MarkerKind::Todo, "Implement user validation", 29),
            (MarkerKind::Fixme, "This is a placeholder implementation", 31),
            (MarkerKind::Note, "This method should be optimized", 35),
            (MarkerKind::Hack, "Quick fix for performance issue", 36),
            (MarkerKind::Xxx, "Temporary workaround", 47),
            (MarkerKind::Bug, "Known issue with error handling", 48),
        ]
    );
}

#[test]
fn cpp_project_sample() {
    use ConstructKind::{Function, Type};
    let result = extract(CPP_SAMPLE, "cpp");
    assert_eq!(
        attachments(&result),
        vec![
            (8, some(Type, "User")),
            (23, some(Type, "Repository")),
            (33, some(Type, "UserManager")),
            (72, some(Function, "calculateTotal")),
            (83, some(Function, "maxValue")),
            (89, None),
        ]
    );
    assert_eq!(signature(at_line(&result, 33)), "class UserManager : public Repository");
    assert_eq!(
        signature(at_line(&result, 72)),
        "double calculateTotal(const std::vector<double>& items)"
    );
    assert_eq!(
        signature(at_line(&result, 83)),
        "template<typename T> T maxValue(T a, T b)"
    );
}

// ── C ─────────────────────────────────────────────────────────────

#[test]
fn c_sample_typedefs_and_functions() {
    use ConstructKind::{Function, Type};
    let result = extract(C_SAMPLE, "c");
    assert_eq!(
        attachments(&result),
        vec![
            (5, some(Type, "User")),
            (14, some(Type, "UserManager")),
            (23, some(Function, "createUserManager")),
            (43, some(Function, "addUser")),
            (66, some(Function, "getUserById")),
            (82, some(Function, "getUserCount")),
            (92, some(Function, "calculateTotal")),
            (103, some(Function, "freeUserManager")),
        ]
    );
    assert_eq!(signature(at_line(&result, 5)), "typedef struct { ... } User");
    assert_eq!(
        signature(at_line(&result, 66)),
        "User* getUserById(UserManager* manager, int id)"
    );
    assert_eq!(at_line(&result, 5).text(), "User struct definition");
}

// ── Rust ──────────────────────────────────────────────────────────

#[test]
fn rust_sample_attachments() {
    use ConstructKind::{Constant, Field, Function, Method, Type};
    let result = extract(SAMPLE_RS, "rust");
    assert_eq!(
        attachments(&result),
        vec![
            (1, some(Function, "add")),
            (3, some(Function, "add")),
            (12, None),
            (13, None),
            (16, some(Type, "User")),
            (21, some(Field, "name")),
            (26, some(Method, "new")),
            (34, some(Method, "validate")),
            (36, None),
            (40, some(Method, "process")),
            (43, None),
            (47, some(Function, "fetch_data")),
            (52, None),
            (57, some(Constant, "MAX_RETRIES")),
        ]
    );
}

#[test]
fn rust_doc_lines_merge_into_one_doc_block() {
    let result = extract(SAMPLE_RS, "rust");
    let add = at_line(&result, 3);
    assert_eq!(add.kind, CommentKind::DocBlock);
    assert_eq!(add.end_line, 10);
    assert!(add.raw_text.starts_with("Doc comment for add function\n\n# Arguments"));
    assert_eq!(signature(add), "pub fn add(a: i32, b: i32) -> i32");
    assert_eq!(
        signature(at_line(&result, 47)),
        "pub async fn fetch_data() -> Result<(), Box<dyn std::error::Error>>"
    );
}

// ── Go ────────────────────────────────────────────────────────────

#[test]
fn go_sample_attachments() {
    use ConstructKind::{Constant, Function, Method, Type};
    let result = extract(SAMPLE_GO, "go");
    assert_eq!(
        attachments(&result),
        vec![
            (3, some(Function, "Add")),
            (5, some(Function, "Add")),
            (8, None),
            (9, None),
            (12, some(Type, "User")),
            (17, None),
            (20, some(Function, "NewUser")),
            (26, some(Method, "Validate")),
            (28, None),
            (32, some(Method, "Process")),
            (35, None),
            (38, some(Function, "FetchData")),
            (44, None),
            (49, some(Constant, "MaxRetries")),
        ]
    );
    for comment in &result {
        assert!(!comment.kind.is_doc(), "line {}", comment.start_line);
    }
    assert_eq!(signature(at_line(&result, 26)), "func (u *User) Validate() bool");
}

// ── Java ──────────────────────────────────────────────────────────

#[test]
fn java_sample_attachments() {
    use ConstructKind::{Constant, Field, Method, Type};
    let result = extract(SAMPLE_JAVA, "java");
    assert_eq!(
        attachments(&result),
        vec![
            (1, some(Type, "Sample")),
            (3, some(Type, "Sample")),
            (8, some(Field, "name")),
            (11, some(Method, "Sample")),
            (19, some(Method, "add")),
            (26, None),
            (27, None),
            (30, some(Method, "validate")),
            (32, None),
            (36, some(Method, "process")),
            (39, None),
            (42, some(Method, "fetchData")),
            (47, None),
            (51, some(Constant, "MAX_RETRIES")),
        ]
    );
    assert_eq!(
        signature(at_line(&result, 42)),
        "public void fetchData() throws Exception"
    );
    assert_eq!(
        at_line(&result, 42).tag_all("throws"),
        &[TagEntry::new(Some("Exception"), "When network request fails")]
    );
}

// ── Python ────────────────────────────────────────────────────────

#[test]
fn python_sample_attachments() {
    use ConstructKind::{Function, Method};
    let result = extract(SAMPLE_PY, "python");
    assert!(result.diagnostics.is_empty());
    assert_eq!(
        attachments(&result),
        vec![
            (1, some(Function, "add")),
            (14, None),
            (15, None),
            (33, some(Method, "validate")),
            (35, None),
            (38, some(Method, "process")),
            (52, None),
            (57, None),
            (58, None),
        ]
    );
    assert!(result.iter().all(|c| c.kind == CommentKind::Line));
    assert_eq!(signature(at_line(&result, 1)), "def add(a: int, b: int) -> int");
    assert_eq!(signature(at_line(&result, 33)), "def validate(self) -> bool");

    let markers: Vec<(MarkerKind, u32)> = result
        .iter()
        .flat_map(|c| c.markers.iter())
        .map(|m| (m.kind, m.line))
        .collect();
    assert_eq!(
        markers,
        vec![
            (MarkerKind::Todo, 33),
            (MarkerKind::Fixme, 35),
            (MarkerKind::Note, 38),
            (MarkerKind::Hack, 39),
            (MarkerKind::Xxx, 52),
            (MarkerKind::Bug, 53),
        ]
    );
}
