//! Preconfigured profiles.

use super::{
    BlockDelimiters, DeclStyle, DeclarationSyntax, LanguageProfile, RawStringStyle, RawStringSyntax,
};

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| (*w).to_string()).collect()
}

// ── C family ──────────────────────────────────────────────────────

const C_STATEMENTS: &[&str] = &[
    "return", "if", "else", "for", "while", "do", "switch", "case", "default", "break",
    "continue", "goto", "sizeof",
];

const C_MODIFIERS: &[&str] = &[
    "static", "inline", "extern", "volatile", "register", "_Noreturn", "__inline",
    "__inline__", "__extension__",
];

fn c_family(id: &str) -> LanguageProfile {
    LanguageProfile {
        line_comment: Some("//".to_string()),
        block_comment: Some(BlockDelimiters::new("/*", "*/")),
        doc_block_opens: words(&["/**", "/*!"]),
        doc_line_prefixes: words(&["///", "//!"]),
        string_delimiters: vec!['"'],
        char_delimiters: vec!['\''],
        escape: Some('\\'),
        ..LanguageProfile::empty(id)
    }
}

pub(super) fn c() -> LanguageProfile {
    LanguageProfile {
        extensions: words(&["c", "h"]),
        syntax: DeclarationSyntax {
            style: DeclStyle::TypeFirst,
            type_keywords: words(&["struct", "union", "enum", "typedef"]),
            enum_keywords: words(&["enum"]),
            constant_keywords: words(&["const"]),
            modifiers: words(C_MODIFIERS),
            statement_keywords: words(C_STATEMENTS),
            typedef_keyword: Some("typedef".to_string()),
            macro_define: Some("#define".to_string()),
            ..DeclarationSyntax::default()
        },
        ..c_family("c")
    }
}

pub(super) fn cpp() -> LanguageProfile {
    let mut statements = words(C_STATEMENTS);
    statements.extend(words(&[
        "throw", "try", "catch", "delete", "new", "using", "co_return", "co_await",
        "co_yield", "static_assert",
    ]));
    let mut modifiers = words(C_MODIFIERS);
    modifiers.extend(words(&[
        "virtual", "explicit", "friend", "mutable", "thread_local", "consteval", "constinit",
    ]));

    LanguageProfile {
        aliases: words(&["c++", "cxx"]),
        extensions: words(&["cpp", "cc", "cxx", "hpp", "hxx", "hh", "h++"]),
        raw_strings: Some(RawStringSyntax {
            prefixes: words(&["R", "u8R", "uR", "UR", "LR"]),
            style: RawStringStyle::Parenthesized,
        }),
        syntax: DeclarationSyntax {
            style: DeclStyle::TypeFirst,
            type_keywords: words(&["class", "struct", "union", "enum", "typedef", "concept"]),
            enum_keywords: words(&["enum"]),
            namespace_keywords: words(&["namespace"]),
            constant_keywords: words(&["const", "constexpr"]),
            modifiers,
            access_labels: words(&["public", "private", "protected"]),
            statement_keywords: statements,
            attribute_opens: words(&["[["]),
            typedef_keyword: Some("typedef".to_string()),
            macro_define: Some("#define".to_string()),
            generic_prefix: Some("template".to_string()),
            ..DeclarationSyntax::default()
        },
        ..c_family("cpp")
    }
}

pub(super) fn java() -> LanguageProfile {
    LanguageProfile {
        extensions: words(&["java"]),
        doc_line_prefixes: Vec::new(),
        doc_block_opens: words(&["/**"]),
        syntax: DeclarationSyntax {
            style: DeclStyle::TypeFirst,
            type_keywords: words(&["class", "interface", "enum", "record"]),
            enum_keywords: words(&["enum"]),
            constant_keywords: words(&["static final", "final static"]),
            modifiers: words(&[
                "public", "private", "protected", "static", "final", "abstract",
                "synchronized", "native", "transient", "volatile", "strictfp", "default",
                "sealed",
            ]),
            statement_keywords: words(&[
                "return", "if", "else", "for", "while", "do", "switch", "case", "break",
                "continue", "throw", "try", "catch", "finally", "new", "assert", "yield",
                "var", "package", "import",
            ]),
            annotation_prefix: Some('@'),
            ..DeclarationSyntax::default()
        },
        ..c_family("java")
    }
}

// ── Keyword-function languages ────────────────────────────────────

pub(super) fn rust() -> LanguageProfile {
    LanguageProfile {
        aliases: words(&["rs"]),
        extensions: words(&["rs"]),
        nested_block_comments: true,
        multiline_strings: true,
        quote_may_open_lifetime: true,
        raw_strings: Some(RawStringSyntax {
            prefixes: words(&["r", "br", "cr"]),
            style: RawStringStyle::Hashed,
        }),
        syntax: DeclarationSyntax {
            style: DeclStyle::NameFirst,
            function_keywords: words(&["fn"]),
            keyword_functions_only: true,
            type_keywords: words(&["struct", "enum", "union", "trait", "type"]),
            enum_keywords: words(&["enum"]),
            impl_keywords: words(&["impl"]),
            namespace_keywords: words(&["mod"]),
            constant_keywords: words(&["const", "static"]),
            modifiers: words(&["pub", "unsafe", "async", "default", "extern", "mut"]),
            statement_keywords: words(&[
                "let", "return", "if", "else", "for", "while", "loop", "match", "break",
                "continue", "use", "macro_rules",
            ]),
            attribute_opens: words(&["#[", "#!["]),
            ..DeclarationSyntax::default()
        },
        ..c_family("rust")
    }
}

pub(super) fn go() -> LanguageProfile {
    LanguageProfile {
        aliases: words(&["golang"]),
        extensions: words(&["go"]),
        doc_block_opens: Vec::new(),
        doc_line_prefixes: Vec::new(),
        raw_string_delimiters: vec!['`'],
        syntax: DeclarationSyntax {
            style: DeclStyle::NameFirst,
            function_keywords: words(&["func"]),
            keyword_functions_only: true,
            type_keywords: words(&["type", "struct", "interface"]),
            constant_keywords: words(&["const"]),
            statement_keywords: words(&[
                "return", "if", "else", "for", "switch", "select", "case", "default", "break",
                "continue", "goto", "go", "defer", "var", "package", "import", "fallthrough",
            ]),
            newline_terminated: true,
            ..DeclarationSyntax::default()
        },
        ..c_family("go")
    }
}

// ── Python ────────────────────────────────────────────────────────

const PY_STRING_PREFIXES: &[&str] = &["", "r", "b", "f", "u", "rb", "br", "rf", "fr"];

pub(super) fn python() -> LanguageProfile {
    let triple_quoted = PY_STRING_PREFIXES
        .iter()
        .flat_map(|p| [format!("{p}\"\"\""), format!("{p}'''")])
        .collect();
    LanguageProfile {
        aliases: words(&["py", "python3"]),
        extensions: words(&["py", "pyi"]),
        line_comment: Some("#".to_string()),
        string_delimiters: vec!['"', '\''],
        raw_strings: Some(RawStringSyntax {
            prefixes: triple_quoted,
            style: RawStringStyle::TripleQuoted,
        }),
        escape: Some('\\'),
        syntax: DeclarationSyntax {
            style: DeclStyle::NameFirst,
            function_keywords: words(&["def"]),
            keyword_functions_only: true,
            type_keywords: words(&["class"]),
            modifiers: words(&["async"]),
            statement_keywords: words(&[
                "return", "if", "elif", "else", "for", "while", "with", "try", "except",
                "finally", "raise", "pass", "import", "from", "assert", "del", "global",
                "nonlocal", "yield", "break", "continue", "lambda", "match", "case",
            ]),
            annotation_prefix: Some('@'),
            newline_terminated: true,
            indentation_scoped: true,
            ..DeclarationSyntax::default()
        },
        ..LanguageProfile::empty("python")
    }
}
